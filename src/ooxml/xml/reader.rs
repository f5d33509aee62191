//! Streaming loader that materializes an [`XmlTree`] from XML text.

use super::element::{NodeId, XmlTree};
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

impl XmlTree {
    /// Parse XML bytes (typically `word/document.xml` or a fragment of it).
    ///
    /// Namespace prefixes are kept verbatim in element and attribute names.
    /// Text nodes are attached to their enclosing element; comments,
    /// processing instructions and entity references are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use vml_textbox::ooxml::xml::XmlTree;
    ///
    /// let tree = XmlTree::parse(br#"<w:pict><v:rect style="width:10pt"/></w:pict>"#).unwrap();
    /// let root = tree.root().unwrap();
    /// let rect = tree.required_child(root, "v:rect").unwrap();
    /// assert_eq!(tree.attribute(rect, "style"), Some("width:10pt"));
    /// ```
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut tree = XmlTree::new();
        let mut open: Vec<NodeId> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let id = push_element(&mut tree, open.last().copied(), e)?;
                    open.push(id);
                },
                Ok(Event::Empty(ref e)) => {
                    push_element(&mut tree, open.last().copied(), e)?;
                },
                Ok(Event::End(_)) => {
                    open.pop();
                },
                Ok(Event::Text(ref e)) => {
                    if let Some(&current) = open.last() {
                        tree.append_text(current, std::str::from_utf8(e.as_ref())?);
                    }
                },
                Ok(Event::CData(ref e)) => {
                    if let Some(&current) = open.last() {
                        tree.append_text(current, std::str::from_utf8(e.as_ref())?);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Parse error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        if let Some(&unclosed) = open.last() {
            return Err(Error::Xml(format!(
                "Unclosed element <{}>",
                tree.name(unclosed).unwrap_or("?")
            )));
        }

        tracing::debug!(elements = tree.len(), "loaded xml tree");
        Ok(tree)
    }
}

fn push_element(tree: &mut XmlTree, parent: Option<NodeId>, start: &BytesStart<'_>) -> Result<NodeId> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();

    let mut attributes: SmallVec<[(String, String); 4]> = SmallVec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(tree.push(parent, name, attributes))
}
