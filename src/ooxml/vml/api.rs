//! Entry points for the layout stage.
//!
//! These bundle the individual resolvers into the three records a renderer
//! needs. They are thin: each value still comes from the node's memo cells,
//! so calling them repeatedly is cheap.

use super::content::ContentFrame;
use super::position::RelativePositioning;
use super::tree::ShapeTree;
use crate::common::error::Result;
use crate::ooxml::xml::NodeId;

/// Resolved geometry of a shape, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub off_x: f64,
    pub off_y: f64,
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_top: f64,
}

impl ShapeTree {
    /// Offsets, size and margins of a group-base node.
    pub fn geometry(&self, id: NodeId) -> Result<Geometry> {
        Ok(Geometry {
            off_x: self.off_x(id)?,
            off_y: self.off_y(id)?,
            width: self.width(id)?,
            height: self.height(id)?,
            margin_left: self.margin_left(id)?,
            margin_top: self.margin_top(id)?,
        })
    }
}

/// Resolve the geometry of a shape.
#[inline]
pub fn resolve_geometry(tree: &ShapeTree, shape: NodeId) -> Result<Geometry> {
    tree.geometry(shape)
}

/// Resolve the positioning mode and vertical frame of a shape.
#[inline]
pub fn resolve_relative_positioning(tree: &ShapeTree, shape: NodeId) -> Result<RelativePositioning> {
    tree.relative_positioning(shape)
}

/// Resolve the frame of a `w:txbxContent`.
#[inline]
pub fn resolve_content_frame(tree: &ShapeTree, content: NodeId) -> Result<ContentFrame> {
    tree.content_frame(content)
}
