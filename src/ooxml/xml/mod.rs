//! In-memory XML element tree.
//!
//! The geometry engine never touches raw XML text. It navigates an arena of
//! elements that offers attribute lookup, required/optional child access and
//! parent back-references. [`XmlTree::parse`] builds that arena from bytes
//! with `quick-xml`; callers that already hold a parsed document can fill an
//! [`XmlTree`] through [`XmlTree::push`] instead.

pub mod element;
pub mod reader;

pub use element::{NodeId, XmlElement, XmlTree};
