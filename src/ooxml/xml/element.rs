//! Arena-backed XML element tree.
//!
//! Every element of a parsed part lives in one `Vec`, in document order.
//! Children are referenced by [`NodeId`], and each element keeps a
//! non-owning back-reference to its parent, so upward lookups never need
//! shared ownership.

use crate::common::error::{Error, Result};
use smallvec::SmallVec;

/// Index of an element inside an [`XmlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the element in document order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single XML element with its attributes and direct text.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// Qualified tag name as written in the document (e.g. `v:group`)
    name: String,
    /// Attributes in document order, keyed by qualified name
    attributes: SmallVec<[(String, String); 4]>,
    /// Concatenated direct text content, if any
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl XmlElement {
    /// Qualified tag name (e.g. `v:group`).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag name without its namespace prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        match memchr::memchr(b':', self.name.as_bytes()) {
            Some(colon) => &self.name[colon + 1..],
            None => &self.name,
        }
    }

    /// Look up a raw attribute value by qualified name.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over all attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Direct text content of the element.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// An immutable-once-built tree of XML elements.
///
/// # Example
///
/// ```
/// use vml_textbox::ooxml::xml::XmlTree;
///
/// let mut tree = XmlTree::new();
/// let pict = tree.push(None, "w:pict", []);
/// let rect = tree.push(
///     Some(pict),
///     "v:rect",
///     [("style".to_string(), "width:10pt".to_string())],
/// );
///
/// assert_eq!(tree.parent(rect), Some(pict));
/// assert_eq!(tree.attribute(rect, "style"), Some("width:10pt"));
/// assert_eq!(tree.required_child(pict, "v:rect").unwrap(), rect);
/// ```
#[derive(Debug, Clone, Default)]
pub struct XmlTree {
    elements: Vec<XmlElement>,
}

impl XmlTree {
    /// Create an empty tree.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The document element, if the tree is not empty.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        (!self.elements.is_empty()).then_some(NodeId(0))
    }

    /// Append an element as the last child of `parent`.
    ///
    /// Elements must be pushed in document order; the loader does this and
    /// so should hand-built trees.
    pub fn push<I>(&mut self, parent: Option<NodeId>, name: impl Into<String>, attributes: I) -> NodeId
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let id = NodeId(self.elements.len());
        self.elements.push(XmlElement {
            name: name.into(),
            attributes: attributes.into_iter().collect(),
            text: None,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent.and_then(|p| self.elements.get_mut(p.0)) {
            parent.children.push(id);
        }
        id
    }

    /// Append text to an element's direct text content.
    pub fn append_text(&mut self, id: NodeId, text: &str) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.text.get_or_insert_with(String::new).push_str(text);
        }
    }

    /// Get an element by id.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&XmlElement> {
        self.elements.get(id.0)
    }

    /// Get an element by id, failing if it does not belong to this tree.
    #[inline]
    pub fn element(&self, id: NodeId) -> Result<&XmlElement> {
        self.get(id).ok_or(Error::NodeNotFound(id.0))
    }

    /// Qualified tag name of an element.
    #[inline]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(XmlElement::name)
    }

    /// Raw attribute lookup.
    #[inline]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.attribute(name))
    }

    /// Direct text content of an element.
    #[inline]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(XmlElement::text)
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(XmlElement::parent)
    }

    /// Children of `id` whose qualified name is `tag`, in document order.
    pub fn children<'a>(&'a self, id: NodeId, tag: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.get(id)
            .map(XmlElement::children)
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(move |child| self.name(*child) == Some(tag))
    }

    /// The single child named `tag`, if present.
    ///
    /// More than one matching child is a schema violation.
    pub fn optional_child(&self, id: NodeId, tag: &str) -> Result<Option<NodeId>> {
        let mut matches = self.children(id, tag);
        let first = matches.next();
        if first.is_some() && matches.next().is_some() {
            return Err(Error::schema(format!(
                "<{}> allows at most one <{}> child",
                self.name(id).unwrap_or("?"),
                tag
            )));
        }
        Ok(first)
    }

    /// The one and only child named `tag`.
    pub fn required_child(&self, id: NodeId, tag: &str) -> Result<NodeId> {
        let element = self.element(id)?;
        self.optional_child(id, tag)?.ok_or_else(|| {
            Error::schema(format!(
                "<{}> requires exactly one <{}> child",
                element.name(),
                tag
            ))
        })
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// All element ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.elements.len()).map(NodeId)
    }
}
