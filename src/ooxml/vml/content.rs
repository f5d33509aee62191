//! Frame of a text box's content.
//!
//! `w:txbxContent` has no geometry of its own. It sits exactly two levels
//! below the shape that draws the box:
//!
//! ```text
//! v:rect (or any shape-like element)
//! └── v:textbox
//!     └── w:txbxContent
//!         ├── w:p
//!         └── w:p
//! ```
//!
//! and takes its frame from that shape.

use super::node::{GroupBase, NodeKind};
use super::tree::ShapeTree;
use crate::common::error::{Error, Result};
use crate::ooxml::xml::NodeId;

/// Placement of text box content, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentFrame {
    pub off_x: f64,
    pub off_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ShapeTree {
    /// The shape that owns a `w:txbxContent`.
    ///
    /// Anything other than `v:textbox` under a shape-like element is a
    /// [`Error::SchemaViolation`]; in particular the DrawingML `wps:txbx`
    /// has no VML owner.
    pub fn content_owner(&self, id: NodeId) -> Result<(NodeId, &GroupBase)> {
        self.expect_kind(id, NodeKind::TxbxContent)?;

        let textbox = self
            .parent(id)
            .ok_or_else(|| Error::schema("<w:txbxContent> has no enclosing text box"))?;
        let textbox_kind = self.kind(textbox)?;
        if textbox_kind != NodeKind::Textbox {
            return Err(Error::schema(format!(
                "<w:txbxContent> must be held by <v:textbox>, found <{}>",
                textbox_kind
            )));
        }

        let owner = self
            .parent(textbox)
            .ok_or_else(|| Error::schema("<v:textbox> has no enclosing shape"))?;
        let owner_kind = self.kind(owner)?;
        if !owner_kind.is_group_base() {
            return Err(Error::schema(format!(
                "<v:textbox> must be held by a shape-like element, found <{}>",
                owner_kind
            )));
        }
        Ok((owner, self.shape(owner)?))
    }

    /// Offset and size of a `w:txbxContent`, delegated to its owning shape.
    pub fn content_frame(&self, id: NodeId) -> Result<ContentFrame> {
        let (owner, _) = self.content_owner(id)?;
        Ok(ContentFrame {
            off_x: self.off_x(owner)? + self.margin_left(owner)?,
            off_y: self.off_y(owner)? + self.margin_top(owner)?,
            width: self.width(owner)?,
            height: self.height(owner)?,
        })
    }

    /// Paragraphs of a `w:txbxContent`, in document order.
    pub fn paragraphs(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.expect_kind(id, NodeKind::TxbxContent)?;
        Ok(self.xml().children(id, "w:p").collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::vml::node::ShapeKind;
    use crate::ooxml::vml::ShapeLike;

    fn tree(xml: &str) -> ShapeTree {
        ShapeTree::parse(xml.as_bytes()).unwrap()
    }

    fn first_content(tree: &ShapeTree) -> NodeId {
        tree.text_box_contents().next().unwrap()
    }

    #[test]
    fn test_frame_adds_owner_margin() {
        let tree = tree(
            r#"<v:rect style="left:20pt;top:7pt;margin-left:5pt;margin-top:1pt;width:80pt;height:40pt">
                <v:textbox><w:txbxContent><w:p/></w:txbxContent></v:textbox>
            </v:rect>"#,
        );
        let frame = tree.content_frame(first_content(&tree)).unwrap();
        assert_eq!(
            frame,
            ContentFrame {
                off_x: 25.0,
                off_y: 8.0,
                width: 80.0,
                height: 40.0,
            }
        );
    }

    #[test]
    fn test_frame_inside_group() {
        let tree = tree(
            r#"<v:group style="left:100pt;width:200pt;height:200pt" coordsize="1000,1000">
                <v:roundrect style="left:100;width:500;height:250">
                    <v:textbox><w:txbxContent/></v:textbox>
                </v:roundrect>
            </v:group>"#,
        );
        let frame = tree.content_frame(first_content(&tree)).unwrap();
        assert_eq!(frame.off_x, 120.0);
        assert_eq!(frame.width, 100.0);
        assert_eq!(frame.height, 50.0);
    }

    #[test]
    fn test_owner() {
        let tree = tree(
            r#"<v:oval style="width:1pt"><v:textbox><w:txbxContent/></v:textbox></v:oval>"#,
        );
        let (owner, shape) = tree.content_owner(first_content(&tree)).unwrap();
        assert_eq!(owner, tree.shapes().next().unwrap());
        assert_eq!(shape.kind(), ShapeKind::Oval);
    }

    #[test]
    fn test_drawing_textbox_has_no_vml_owner() {
        let tree = tree(
            r#"<wps:wsp><wps:txbx><w:txbxContent><w:p/></w:txbxContent></wps:txbx></wps:wsp>"#,
        );
        assert!(matches!(
            tree.content_frame(first_content(&tree)),
            Err(Error::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_textbox_outside_shape() {
        let tree = tree(r#"<w:pict><v:textbox><w:txbxContent/></v:textbox></w:pict>"#);
        assert_eq!(
            tree.content_frame(first_content(&tree)).unwrap_err(),
            Error::SchemaViolation(
                "<v:textbox> must be held by a shape-like element, found <w:pict>".to_string()
            )
        );
    }

    #[test]
    fn test_owner_without_style() {
        let tree = tree(r#"<v:shape><v:textbox><w:txbxContent/></v:textbox></v:shape>"#);
        assert!(matches!(
            tree.content_frame(first_content(&tree)),
            Err(Error::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_wrong_kind() {
        let tree = tree(r#"<v:rect style="width:1pt"/>"#);
        let rect = tree.shapes().next().unwrap();
        assert!(matches!(tree.content_frame(rect), Err(Error::UnexpectedNode { .. })));
    }

    #[test]
    fn test_paragraphs() {
        let tree = tree(
            r#"<v:rect style="width:1pt"><v:textbox><w:txbxContent>
                <w:p><w:r><w:t>one</w:t></w:r></w:p>
                <w:tbl/>
                <w:p/>
            </w:txbxContent></v:textbox></v:rect>"#,
        );
        let paragraphs = tree.paragraphs(first_content(&tree)).unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert!(paragraphs.iter().all(|p| tree.xml().name(*p) == Some("w:p")));
    }
}
