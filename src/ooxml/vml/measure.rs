//! Resolution of a single geometric style property.
//!
//! A property written with a `pt` suffix is already absolute. A bare number
//! lives in the parent group's coordinate space and is scaled by the parent's
//! resolved extent over its unit basis on the same axis:
//!
//! ```text
//! value_pt = raw * parent.width / parent.width_unit     (width, left, margin-left)
//! value_pt = raw * parent.height / parent.height_unit   (height, top, margin-top)
//! ```
//!
//! Without a shape-like parent there is no frame to scale against, and a bare
//! number resolves to zero.

use super::node::{GroupBase, ShapeLike};
use super::style::StyleLength;
use super::tree::ShapeTree;
use crate::common::error::{Error, Result};
use crate::ooxml::xml::NodeId;
use once_cell::unsync::OnceCell;

/// Horizontal or vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A geometric property of a group-base node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Width,
    Height,
    Left,
    Top,
    MarginLeft,
    MarginTop,
}

impl Measure {
    /// Every property, in declaration order.
    pub const ALL: [Measure; 6] = [
        Measure::Width,
        Measure::Height,
        Measure::Left,
        Measure::Top,
        Measure::MarginLeft,
        Measure::MarginTop,
    ];

    /// Normalized style property name.
    #[inline]
    pub fn key(self) -> &'static str {
        match self {
            Measure::Width => "width",
            Measure::Height => "height",
            Measure::Left => "left",
            Measure::Top => "top",
            Measure::MarginLeft => "margin_left",
            Measure::MarginTop => "margin_top",
        }
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Measure::Width | Measure::Left | Measure::MarginLeft => Axis::Horizontal,
            Measure::Height | Measure::Top | Measure::MarginTop => Axis::Vertical,
        }
    }

    /// Alignment property that, when set to anything but `absolute`,
    /// overrides this margin.
    #[inline]
    fn alignment_key(self) -> Option<&'static str> {
        match self {
            Measure::MarginLeft => Some("mso_position_horizontal"),
            Measure::MarginTop => Some("mso_position_vertical"),
            _ => None,
        }
    }

    fn cell(self, shape: &GroupBase) -> &OnceCell<f64> {
        let memo = &shape.memo;
        match self {
            Measure::Width => &memo.width,
            Measure::Height => &memo.height,
            Measure::Left => &memo.left,
            Measure::Top => &memo.top,
            Measure::MarginLeft => &memo.margin_left,
            Measure::MarginTop => &memo.margin_top,
        }
    }
}

impl ShapeTree {
    /// Resolve one geometric property of a group-base node, in points.
    pub fn measure(&self, id: NodeId, measure: Measure) -> Result<f64> {
        let shape = self.shape(id)?;
        self.memoize(id, measure.key(), measure.cell(shape), || {
            self.compute_measure(id, shape, measure)
        })
    }

    /// Resolved width in points.
    #[inline]
    pub fn width(&self, id: NodeId) -> Result<f64> {
        self.measure(id, Measure::Width)
    }

    /// Resolved height in points.
    #[inline]
    pub fn height(&self, id: NodeId) -> Result<f64> {
        self.measure(id, Measure::Height)
    }

    /// Resolved `left` in points.
    #[inline]
    pub fn left(&self, id: NodeId) -> Result<f64> {
        self.measure(id, Measure::Left)
    }

    /// Resolved `top` in points.
    #[inline]
    pub fn top(&self, id: NodeId) -> Result<f64> {
        self.measure(id, Measure::Top)
    }

    /// Resolved `margin-left` in points; zero when horizontally aligned.
    #[inline]
    pub fn margin_left(&self, id: NodeId) -> Result<f64> {
        self.measure(id, Measure::MarginLeft)
    }

    /// Resolved `margin-top` in points; zero when vertically aligned.
    #[inline]
    pub fn margin_top(&self, id: NodeId) -> Result<f64> {
        self.measure(id, Measure::MarginTop)
    }

    fn compute_measure(&self, id: NodeId, shape: &GroupBase, measure: Measure) -> Result<f64> {
        if let Some(alignment) = measure.alignment_key()
            && shape.style().get(alignment).is_some_and(|v| v != "absolute")
        {
            return Ok(0.0);
        }

        let Some(length) = shape.style().length(measure.key())? else {
            return Ok(0.0);
        };

        match length {
            StyleLength::Points(pt) => Ok(pt),
            StyleLength::Units(units) => {
                let Some((parent_id, parent)) = self.group_base_parent(id)? else {
                    return Ok(0.0);
                };
                let (extent, unit) = match measure.axis() {
                    Axis::Horizontal => (self.width(parent_id)?, parent.width_unit()),
                    Axis::Vertical => (self.height(parent_id)?, parent.height_unit()),
                };
                if unit == 0 {
                    return Err(Error::schema(format!(
                        "<{}> declares a zero-extent coordinate space",
                        parent.kind().tag()
                    )));
                }
                Ok(units * extent / unit as f64)
            },
        }
    }
}
