//! Office Open XML pieces.
//!
//! - `xml`: element arena and loader
//! - `vml`: text-box shapes and their geometry
pub mod vml;
pub mod xml;

pub use vml::ShapeTree;
pub use xml::XmlTree;
