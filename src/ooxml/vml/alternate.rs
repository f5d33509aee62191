//! `mc:AlternateContent` wrappers around text boxes.
//!
//! Word writes a floating text box twice: a DrawingML version under
//! `mc:Choice` and a VML version under `mc:Fallback` for older readers.
//!
//! ```xml
//! <mc:AlternateContent>
//!   <mc:Choice Requires="wps">
//!     <w:drawing>
//!       <wp:anchor simplePos="0" ...>
//!         <wp:simplePos x="0" y="0"/>
//!         <wp:positionH relativeFrom="column"><wp:posOffset>914400</wp:posOffset></wp:positionH>
//!         <wp:positionV relativeFrom="paragraph"><wp:posOffset>457200</wp:posOffset></wp:positionV>
//!         ...
//!       </wp:anchor>
//!     </w:drawing>
//!   </mc:Choice>
//!   <mc:Fallback>
//!     <w:pict>
//!       <v:rect style="...">...</v:rect>
//!     </w:pict>
//!   </mc:Fallback>
//! </mc:AlternateContent>
//! ```
//!
//! The anchor tells how the modern representation is positioned, which is
//! the only source of the vertical reference frame for many VML fallbacks.

use super::node::NodeKind;
use super::tree::ShapeTree;
use crate::common::error::{Error, Result};
use crate::common::unit::Emu;
use crate::ooxml::xml::{NodeId, XmlTree};

/// Frame reported for simple-positioned anchors.
pub const PAGE: &str = "page";

/// Fallback picture children that carry geometry.
const PICTURE_SHAPES: [&str; 3] = ["v:group", "v:shape", "v:rect"];

/// A typed handle on an `mc:AlternateContent` node.
///
/// Construction checks that exactly one `mc:Choice` and one `mc:Fallback`
/// are present; everything below them is read on demand.
#[derive(Clone, Copy)]
pub struct AlternateContent<'t> {
    tree: &'t ShapeTree,
    id: NodeId,
    choice: NodeId,
    fallback: NodeId,
}

impl<'t> AlternateContent<'t> {
    /// The wrapper's node id.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The `mc:Choice` node.
    #[inline]
    pub fn choice(&self) -> NodeId {
        self.choice
    }

    /// The `mc:Fallback` node.
    #[inline]
    pub fn fallback(&self) -> NodeId {
        self.fallback
    }

    #[inline]
    fn xml(&self) -> &'t XmlTree {
        self.tree.xml()
    }

    /// The `w:drawing` under `mc:Choice`.
    pub fn drawing(&self) -> Result<NodeId> {
        self.xml().required_child(self.choice, "w:drawing")
    }

    /// The parsed `wp:anchor` of the drawing.
    ///
    /// Inline drawings (`wp:inline`) have no anchor and fail with a
    /// [`Error::SchemaViolation`].
    pub fn anchor(&self) -> Result<Anchor> {
        let drawing = self.drawing()?;
        let anchor = self.xml().required_child(drawing, "wp:anchor")?;
        Anchor::from_xml(self.xml(), anchor)
    }

    /// The `w:pict` under `mc:Fallback`.
    pub fn pict(&self) -> Result<NodeId> {
        self.xml().required_child(self.fallback, "w:pict")
    }

    /// The single `v:group`, `v:shape` or `v:rect` of the fallback picture.
    pub fn picture(&self) -> Result<Option<NodeId>> {
        let pict = self.pict()?;
        let mut found = None;
        for tag in PICTURE_SHAPES {
            if let Some(child) = self.xml().optional_child(pict, tag)? {
                if found.is_some() {
                    return Err(Error::schema("<w:pict> holds more than one shape"));
                }
                found = Some(child);
            }
        }
        Ok(found)
    }

    /// Frame the horizontal offset is measured against.
    pub fn offset_x_type(&self) -> Result<String> {
        self.anchor()?.offset_x_type().map(str::to_string)
    }

    /// Frame the vertical offset is measured against.
    pub fn offset_y_type(&self) -> Result<String> {
        self.anchor()?.offset_y_type().map(str::to_string)
    }

    /// Horizontal offset; `None` when the position is an alignment.
    pub fn offset_x(&self) -> Result<Option<Emu>> {
        self.anchor()?.offset_x()
    }

    /// Vertical offset; `None` when the position is an alignment.
    pub fn offset_y(&self) -> Result<Option<Emu>> {
        self.anchor()?.offset_y()
    }

    /// `relativeFrom` of the anchor's `wp:positionV`.
    ///
    /// Only the path `w:drawing/wp:anchor/wp:positionV` is read, and
    /// `simplePos` is ignored: Word writes `wp:positionV` either way.
    /// `Ok(None)` when any step of the path is missing.
    pub fn vertical_relative_from(&self) -> Result<Option<&'t str>> {
        let xml = self.xml();
        let Some(drawing) = xml.optional_child(self.choice, "w:drawing")? else {
            return Ok(None);
        };
        let Some(anchor) = xml.optional_child(drawing, "wp:anchor")? else {
            return Ok(None);
        };
        let Some(position_v) = xml.optional_child(anchor, "wp:positionV")? else {
            return Ok(None);
        };
        Ok(xml.attribute(position_v, "relativeFrom"))
    }
}

impl std::fmt::Debug for AlternateContent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlternateContent")
            .field("id", &self.id)
            .field("choice", &self.choice)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl ShapeTree {
    /// Typed handle on an `mc:AlternateContent` node.
    pub fn alternate_content(&self, id: NodeId) -> Result<AlternateContent<'_>> {
        self.expect_kind(id, NodeKind::AlternateContent)?;
        Ok(AlternateContent {
            tree: self,
            id,
            choice: self.xml().required_child(id, "mc:Choice")?,
            fallback: self.xml().required_child(id, "mc:Fallback")?,
        })
    }

    /// Nearest `mc:AlternateContent` ancestor of a node.
    pub fn enclosing_alternate(&self, id: NodeId) -> Option<NodeId> {
        self.xml()
            .ancestors(id)
            .find(|ancestor| self.kind(*ancestor).ok() == Some(NodeKind::AlternateContent))
    }
}

/// One axis of a compound-positioned anchor (`wp:positionH` / `wp:positionV`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisPosition {
    /// `relativeFrom` token (e.g. `page`, `margin`, `paragraph`)
    pub relative_from: String,
    /// `None` when the element carries neither an offset nor an alignment
    pub value: Option<PositionValue>,
}

/// How an anchor axis is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionValue {
    /// `wp:posOffset`
    Offset(Emu),
    /// `wp:align` (e.g. `center`, `top`)
    Align(String),
}

impl AxisPosition {
    fn from_xml(xml: &XmlTree, id: NodeId) -> Result<Self> {
        let relative_from = xml
            .attribute(id, "relativeFrom")
            .ok_or_else(|| {
                Error::schema(format!(
                    "<{}> is missing required attribute 'relativeFrom'",
                    xml.name(id).unwrap_or("?")
                ))
            })?
            .to_string();

        let value = if let Some(offset) = xml.optional_child(id, "wp:posOffset")? {
            Some(PositionValue::Offset(xml.text(offset).unwrap_or("").parse()?))
        } else {
            xml.optional_child(id, "wp:align")?
                .map(|align| PositionValue::Align(xml.text(align).unwrap_or("").trim().to_string()))
        };

        Ok(Self { relative_from, value })
    }

    /// Numeric offset, if the axis is offset rather than aligned.
    #[inline]
    pub fn offset(&self) -> Option<Emu> {
        match self.value {
            Some(PositionValue::Offset(offset)) => Some(offset),
            _ => None,
        }
    }
}

/// A parsed `wp:anchor`.
///
/// Either simple-positioned (a literal `x`/`y` pair measured from the page)
/// or compound-positioned through `wp:positionH` / `wp:positionV`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    simple_pos: Option<(Emu, Emu)>,
    position_h: Option<AxisPosition>,
    position_v: Option<AxisPosition>,
}

impl Anchor {
    /// Parse a `wp:anchor` element.
    pub fn from_xml(xml: &XmlTree, id: NodeId) -> Result<Self> {
        let simple = xml.attribute(id, "simplePos").is_some_and(is_truthy);
        let simple_pos = if simple {
            let pos = xml.required_child(id, "wp:simplePos")?;
            Some((emu_attribute(xml, pos, "x")?, emu_attribute(xml, pos, "y")?))
        } else {
            None
        };

        let position_h = xml
            .optional_child(id, "wp:positionH")?
            .map(|h| AxisPosition::from_xml(xml, h))
            .transpose()?;
        let position_v = xml
            .optional_child(id, "wp:positionV")?
            .map(|v| AxisPosition::from_xml(xml, v))
            .transpose()?;

        Ok(Self {
            simple_pos,
            position_h,
            position_v,
        })
    }

    /// Whether the anchor uses a literal page position.
    #[inline]
    pub fn is_simple_pos(&self) -> bool {
        self.simple_pos.is_some()
    }

    /// The literal `(x, y)` of a simple-positioned anchor.
    #[inline]
    pub fn simple_pos(&self) -> Option<(Emu, Emu)> {
        self.simple_pos
    }

    #[inline]
    pub fn position_h(&self) -> Option<&AxisPosition> {
        self.position_h.as_ref()
    }

    #[inline]
    pub fn position_v(&self) -> Option<&AxisPosition> {
        self.position_v.as_ref()
    }

    /// Frame of the horizontal offset.
    pub fn offset_x_type(&self) -> Result<&str> {
        if self.is_simple_pos() {
            return Ok(PAGE);
        }
        Ok(axis(&self.position_h, "wp:positionH")?.relative_from.as_str())
    }

    /// Frame of the vertical offset.
    pub fn offset_y_type(&self) -> Result<&str> {
        if self.is_simple_pos() {
            return Ok(PAGE);
        }
        Ok(axis(&self.position_v, "wp:positionV")?.relative_from.as_str())
    }

    /// Horizontal offset.
    pub fn offset_x(&self) -> Result<Option<Emu>> {
        if let Some((x, _)) = self.simple_pos {
            return Ok(Some(x));
        }
        Ok(axis(&self.position_h, "wp:positionH")?.offset())
    }

    /// Vertical offset.
    pub fn offset_y(&self) -> Result<Option<Emu>> {
        if let Some((_, y)) = self.simple_pos {
            return Ok(Some(y));
        }
        Ok(axis(&self.position_v, "wp:positionV")?.offset())
    }
}

fn axis<'a>(position: &'a Option<AxisPosition>, tag: &str) -> Result<&'a AxisPosition> {
    position
        .as_ref()
        .ok_or_else(|| Error::schema(format!("<wp:anchor> requires <{}>", tag)))
}

fn emu_attribute(xml: &XmlTree, id: NodeId, name: &str) -> Result<Emu> {
    xml.attribute(id, name)
        .ok_or_else(|| {
            Error::schema(format!(
                "<{}> is missing required attribute '{}'",
                xml.name(id).unwrap_or("?"),
                name
            ))
        })?
        .parse()
}

#[inline]
fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(anchor: &str, fallback: &str) -> String {
        format!(
            r#"<w:r><mc:AlternateContent>
                <mc:Choice Requires="wps"><w:drawing>{}</w:drawing></mc:Choice>
                <mc:Fallback><w:pict>{}</w:pict></mc:Fallback>
            </mc:AlternateContent></w:r>"#,
            anchor, fallback
        )
    }

    fn first_alternate(tree: &ShapeTree) -> AlternateContent<'_> {
        let id = tree.alternate_contents().next().unwrap();
        tree.alternate_content(id).unwrap()
    }

    #[test]
    fn test_simple_pos_anchor() {
        let xml = wrap(
            r#"<wp:anchor simplePos="1"><wp:simplePos x="914400" y="457200"/>
                <wp:positionH relativeFrom="column"><wp:posOffset>1</wp:posOffset></wp:positionH>
                <wp:positionV relativeFrom="paragraph"><wp:posOffset>2</wp:posOffset></wp:positionV>
            </wp:anchor>"#,
            r#"<v:rect style="width:10pt"/>"#,
        );
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        let alternate = first_alternate(&tree);

        assert_eq!(alternate.offset_x_type().unwrap(), "page");
        assert_eq!(alternate.offset_y_type().unwrap(), "page");
        assert_eq!(alternate.offset_x().unwrap(), Some(Emu(914_400)));
        assert_eq!(alternate.offset_y().unwrap(), Some(Emu(457_200)));
    }

    #[test]
    fn test_compound_anchor() {
        let xml = wrap(
            r#"<wp:anchor simplePos="0"><wp:simplePos x="0" y="0"/>
                <wp:positionH relativeFrom="margin"><wp:align>center</wp:align></wp:positionH>
                <wp:positionV relativeFrom="paragraph"><wp:posOffset>-12700</wp:posOffset></wp:positionV>
            </wp:anchor>"#,
            r#"<v:rect style="width:10pt"/>"#,
        );
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        let alternate = first_alternate(&tree);
        let anchor = alternate.anchor().unwrap();

        assert!(!anchor.is_simple_pos());
        assert_eq!(alternate.offset_x_type().unwrap(), "margin");
        assert_eq!(alternate.offset_y_type().unwrap(), "paragraph");
        assert_eq!(alternate.offset_x().unwrap(), None);
        assert_eq!(alternate.offset_y().unwrap(), Some(Emu(-12_700)));
        assert_eq!(
            anchor.position_h().unwrap().value,
            Some(PositionValue::Align("center".to_string()))
        );
    }

    #[test]
    fn test_picture() {
        let xml = wrap(
            r#"<wp:anchor/>"#,
            r#"<v:group style="width:10pt"><v:rect style="width:1pt"/></v:group>"#,
        );
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        let alternate = first_alternate(&tree);
        let picture = alternate.picture().unwrap().unwrap();
        assert_eq!(tree.xml().name(picture), Some("v:group"));

        let xml = wrap(r#"<wp:anchor/>"#, r#"<v:rect style="a:b"/><v:shape style="a:b"/>"#);
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        assert!(matches!(
            first_alternate(&tree).picture(),
            Err(Error::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_missing_fallback() {
        let xml = r#"<mc:AlternateContent><mc:Choice/></mc:AlternateContent>"#;
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        let id = tree.alternate_contents().next().unwrap();
        assert_eq!(
            tree.alternate_content(id).unwrap_err(),
            Error::SchemaViolation(
                "<mc:AlternateContent> requires exactly one <mc:Fallback> child".to_string()
            )
        );
    }

    #[test]
    fn test_inline_drawing_has_no_anchor() {
        let xml = wrap(r#"<wp:inline/>"#, r#"<v:rect style="width:10pt"/>"#);
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        assert!(matches!(
            first_alternate(&tree).anchor(),
            Err(Error::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_vertical_relative_from() {
        let xml = wrap(
            r#"<wp:anchor simplePos="1">
                <wp:positionH relativeFrom="column"><wp:posOffset>1.5</wp:posOffset></wp:positionH>
                <wp:positionV relativeFrom="paragraph"><wp:posOffset>0</wp:posOffset></wp:positionV>
            </wp:anchor>"#,
            r#"<v:rect style="width:10pt"/>"#,
        );
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        let alternate = first_alternate(&tree);
        assert!(alternate.anchor().is_err());
        assert_eq!(alternate.vertical_relative_from().unwrap(), Some("paragraph"));

        let xml = wrap(r#"<wp:inline/>"#, r#"<v:rect style="width:10pt"/>"#);
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        assert_eq!(first_alternate(&tree).vertical_relative_from().unwrap(), None);

        let xml = wrap(r#"<wp:anchor simplePos="0"/>"#, r#"<v:rect style="width:10pt"/>"#);
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        assert_eq!(first_alternate(&tree).vertical_relative_from().unwrap(), None);
    }

    #[test]
    fn test_anchor_missing_axis() {
        let xml = wrap(r#"<wp:anchor simplePos="0"/>"#, r#"<v:rect style="width:10pt"/>"#);
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        let alternate = first_alternate(&tree);
        assert_eq!(
            alternate.offset_y_type().unwrap_err(),
            Error::SchemaViolation("<wp:anchor> requires <wp:positionV>".to_string())
        );
    }

    #[test]
    fn test_enclosing_alternate() {
        let xml = wrap(r#"<wp:anchor/>"#, r#"<v:group style="a:b"><v:rect style="a:b"/></v:group>"#);
        let tree = ShapeTree::parse(xml.as_bytes()).unwrap();
        let wrapper = tree.alternate_contents().next().unwrap();
        let rect = tree.shapes().nth(1).unwrap();
        assert_eq!(tree.enclosing_alternate(rect), Some(wrapper));
        assert_eq!(tree.enclosing_alternate(wrapper), None);
    }

    #[test]
    fn test_wrong_kind() {
        let tree = ShapeTree::parse(br#"<v:rect style="a:b"/>"#).unwrap();
        let rect = tree.shapes().next().unwrap();
        assert!(matches!(
            tree.alternate_content(rect),
            Err(Error::UnexpectedNode { .. })
        ));
    }
}
