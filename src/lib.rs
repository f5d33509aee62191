//! vml-textbox - geometry of legacy VML text boxes in Word documents
//!
//! Word still writes floating text boxes as VML, either on their own inside a
//! `w:pict` or as the `mc:Fallback` half of an `mc:AlternateContent` whose
//! `mc:Choice` holds the DrawingML version. This crate resolves where such a
//! box and its text content end up on the page.
//!
//! # Features
//!
//! - **Style parsing**: the CSS-like `style` attribute with `pt` and
//!   coordinate-space values
//! - **Nested groups**: `coordsize`/`coordorigin` scaling through any depth
//!   of `v:group`
//! - **Relative positioning**: `position` and `mso-position-vertical-relative`
//!   inheritance, including the frame of an enclosing DrawingML anchor
//! - **Lazy resolution**: every value is computed once, on first request
//!
//! # Example
//!
//! ```rust
//! use vml_textbox::ooxml::vml::{ShapeTree, resolve_geometry, resolve_relative_positioning};
//!
//! # fn main() -> Result<(), vml_textbox::Error> {
//! let tree = ShapeTree::parse(br#"
//!     <w:pict>
//!         <v:group style="position:absolute;left:10pt;top:20pt;width:200pt;height:100pt" coordsize="1000,1000">
//!             <v:rect style="left:250;top:500;width:500;height:200"/>
//!         </v:group>
//!     </w:pict>"#)?;
//!
//! let rect = tree.shapes().nth(1).unwrap();
//!
//! let geometry = resolve_geometry(&tree, rect)?;
//! assert_eq!((geometry.off_x, geometry.off_y), (60.0, 70.0));
//! assert_eq!((geometry.width, geometry.height), (100.0, 20.0));
//!
//! let positioning = resolve_relative_positioning(&tree, rect)?;
//! assert_eq!(positioning.position, "absolute");
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events (tree construction at `debug`, first-time
//! value resolution at `trace`, malformed shapes at `warn`) and never installs
//! a subscriber.

/// Shared error and unit types
pub mod common;

/// Office Open XML element arena and VML text-box geometry
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{Emu, Error, Result};
pub use ooxml::vml::{
    ContentFrame, Geometry, RelativePositioning, ResolveOptions, ShapeTree, VerticalRelativeOrder,
};
pub use ooxml::xml::{NodeId, XmlTree};
