//! Accumulated offsets of nested shapes.
//!
//! A shape's `left`/`top` is relative to its group. The absolute offset adds
//! the group's own offset and margin, recursively up to the outermost
//! shape-like ancestor.

use super::measure::Axis;
use super::tree::ShapeTree;
use crate::common::error::Result;
use crate::ooxml::xml::NodeId;

impl ShapeTree {
    /// Absolute horizontal offset in points.
    pub fn off_x(&self, id: NodeId) -> Result<f64> {
        self.offset(id, Axis::Horizontal)
    }

    /// Absolute vertical offset in points.
    pub fn off_y(&self, id: NodeId) -> Result<f64> {
        self.offset(id, Axis::Vertical)
    }

    fn offset(&self, id: NodeId, axis: Axis) -> Result<f64> {
        let shape = self.shape(id)?;
        let (property, cell) = match axis {
            Axis::Horizontal => ("off_x", &shape.memo.off_x),
            Axis::Vertical => ("off_y", &shape.memo.off_y),
        };
        self.memoize(id, property, cell, || {
            let own = match axis {
                Axis::Horizontal => self.left(id)?,
                Axis::Vertical => self.top(id)?,
            };
            let Some((parent, _)) = self.group_base_parent(id)? else {
                return Ok(own);
            };
            let inherited = match axis {
                Axis::Horizontal => self.off_x(parent)? + self.margin_left(parent)?,
                Axis::Vertical => self.off_y(parent)? + self.margin_top(parent)?,
            };
            Ok(own + inherited)
        })
    }
}
