//! VML text-box geometry.
//!
//! Legacy Word documents draw floating text boxes with VML: a `v:rect`,
//! `v:oval`, `v:roundrect`, `v:shape` or nested `v:group` whose placement is
//! written in a CSS-like `style` attribute. Sizes and offsets are either
//! absolute (`12pt`) or bare numbers in the coordinate space of the enclosing
//! group, so a shape's final placement depends on every group above it.
//!
//! # Architecture
//!
//! - [`ShapeTree`] classifies every element of an [`XmlTree`] once and keeps
//!   a [`GroupBase`] facet for the shape-like ones.
//! - Geometry is resolved on demand ([`ShapeTree::measure`],
//!   [`ShapeTree::off_x`], [`ShapeTree::position`], ...) and memoized per
//!   node, so a query on a deeply nested shape resolves its ancestors once.
//! - [`AlternateContent`] models the `mc:AlternateContent` wrapper whose
//!   DrawingML anchor supplies the vertical frame for many fallbacks.
//! - [`resolve_geometry`], [`resolve_relative_positioning`] and
//!   [`resolve_content_frame`] are the records a layout stage consumes.
//!
//! # Example
//!
//! ```rust
//! use vml_textbox::ooxml::vml::{ShapeTree, resolve_content_frame};
//!
//! let tree = ShapeTree::parse(br#"
//!     <v:group style="left:10pt;width:200pt;height:100pt" coordsize="1000,1000">
//!         <v:rect style="left:100;width:500;height:500;margin-left:2pt">
//!             <v:textbox><w:txbxContent><w:p/></w:txbxContent></v:textbox>
//!         </v:rect>
//!     </v:group>"#)?;
//!
//! let content = tree.text_box_contents().next().unwrap();
//! let frame = resolve_content_frame(&tree, content)?;
//! assert_eq!(frame.off_x, 32.0);
//! assert_eq!((frame.width, frame.height), (100.0, 50.0));
//! # Ok::<(), vml_textbox::Error>(())
//! ```
//!
//! [`XmlTree`]: crate::ooxml::xml::XmlTree

pub mod alternate;
pub mod api;
pub mod content;
pub mod coords;
pub mod measure;
pub mod node;
pub mod offset;
pub mod options;
pub mod position;
pub mod style;
pub mod tree;

pub use alternate::{AlternateContent, Anchor, AxisPosition, PositionValue};
pub use api::{Geometry, resolve_content_frame, resolve_geometry, resolve_relative_positioning};
pub use content::ContentFrame;
pub use coords::{CoordinateSpace, DEFAULT_UNIT};
pub use measure::{Axis, Measure};
pub use node::{GroupBase, NodeKind, ShapeKind, ShapeLike};
pub use options::{ResolveOptions, VerticalRelativeOrder};
pub use position::RelativePositioning;
pub use style::{StyleLength, StyleMap};
pub use tree::ShapeTree;
