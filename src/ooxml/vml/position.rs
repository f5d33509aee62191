//! Positioning mode and vertical reference frame.
//!
//! Both properties are inherited: a shape that does not declare them takes
//! them from the nearest shape-like ancestor. The vertical frame can also come
//! from the DrawingML anchor of an enclosing `mc:AlternateContent`.

use super::node::ShapeLike;
use super::options::VerticalRelativeOrder;
use super::tree::ShapeTree;
use crate::common::error::Result;
use crate::ooxml::xml::NodeId;

/// Positioning mode of a root shape that declares none.
pub const ABSOLUTE: &str = "absolute";

/// Positioning of a shape, as consumed by a layout stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativePositioning {
    /// `absolute` or another CSS-like positioning token
    pub position: String,
    /// Vertical reference frame (`page`, `margin`, `paragraph`, ...)
    pub mso_position_vertical_relative: Option<String>,
}

impl ShapeTree {
    /// Positioning mode of a group-base node.
    pub fn position(&self, id: NodeId) -> Result<String> {
        let shape = self.shape(id)?;
        self.memoize(id, "position", &shape.memo.position, || {
            if let Some(position) = shape.style().get("position") {
                return Ok(position.to_string());
            }
            match self.group_base_parent(id)? {
                Some((parent, _)) => self.position(parent),
                None => Ok(ABSOLUTE.to_string()),
            }
        })
    }

    /// Vertical frame of the anchor of the enclosing `mc:AlternateContent`.
    ///
    /// This is the `relativeFrom` of the anchor's `wp:positionV`, also for
    /// simple-positioned anchors. `None` when the node is not wrapped or when
    /// that attribute cannot be reached; malformed wrappers are common and
    /// never fail resolution.
    pub fn drawing_relative_from(&self, id: NodeId) -> Result<Option<String>> {
        let shape = self.shape(id)?;
        self.memoize(id, "drawing_relative_from", &shape.memo.drawing_relative_from, || {
            Ok(self.anchor_vertical_frame(id))
        })
    }

    fn anchor_vertical_frame(&self, id: NodeId) -> Option<String> {
        let wrapper = self.enclosing_alternate(id)?;
        let frame = self
            .alternate_content(wrapper)
            .and_then(|alternate| alternate.vertical_relative_from());
        match frame {
            Ok(frame) => frame.map(str::to_string),
            Err(e) => {
                tracing::warn!(
                    node = id.index(),
                    wrapper = wrapper.index(),
                    error = %e,
                    "drawing anchor unavailable"
                );
                None
            },
        }
    }

    /// Effective `mso-position-vertical-relative` of a group-base node.
    ///
    /// The node's own declaration always wins. The fallback chain after that
    /// depends on [`VerticalRelativeOrder`]:
    ///
    /// - `DrawingFirst`: enclosing anchor frame, then nearest shape-like
    ///   ancestor.
    /// - `HeightRelativeFirst`: `mso-height-relative`, then nearest
    ///   shape-like ancestor; the anchor frame only for a node without one.
    pub fn mso_position_vertical_relative(&self, id: NodeId) -> Result<Option<String>> {
        let shape = self.shape(id)?;
        self.memoize(
            id,
            "mso_position_vertical_relative",
            &shape.memo.vertical_relative,
            || {
                let style = shape.style();
                if let Some(frame) = style.get("mso_position_vertical_relative") {
                    return Ok(Some(frame.to_string()));
                }
                let parent = self.group_base_parent(id)?.map(|(parent, _)| parent);

                match self.options().vertical_relative_order {
                    VerticalRelativeOrder::DrawingFirst => {
                        if let Some(frame) = self.drawing_relative_from(id)? {
                            return Ok(Some(frame));
                        }
                        match parent {
                            Some(parent) => self.mso_position_vertical_relative(parent),
                            None => Ok(None),
                        }
                    },
                    VerticalRelativeOrder::HeightRelativeFirst => {
                        if let Some(frame) = style.get("mso_height_relative") {
                            return Ok(Some(frame.to_string()));
                        }
                        match parent {
                            Some(parent) => self.mso_position_vertical_relative(parent),
                            None => self.drawing_relative_from(id),
                        }
                    },
                }
            },
        )
    }

    /// Positioning mode and vertical frame together.
    pub fn relative_positioning(&self, id: NodeId) -> Result<RelativePositioning> {
        Ok(RelativePositioning {
            position: self.position(id)?,
            mso_position_vertical_relative: self.mso_position_vertical_relative(id)?,
        })
    }
}
