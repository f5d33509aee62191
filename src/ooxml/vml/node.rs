//! Node classification and the group-base facet.
//!
//! Every element of the tree is classified into a [`NodeKind`]. The five
//! shape-like VML elements (`v:group`, `v:rect`, `v:shape`, `v:oval`,
//! `v:roundrect`) additionally carry a [`GroupBase`] facet holding their
//! style, coordinate space and memoized geometry. Parents that are not
//! shape-like (a paragraph run, `w:pict`, a table cell) carry no facet, so
//! geometry inheritance simply stops there.

use super::coords::CoordinateSpace;
use super::style::StyleMap;
use crate::common::error::{Error, Result};
use crate::ooxml::xml::XmlElement;
use once_cell::unsync::OnceCell;
use phf::phf_map;
use std::fmt;

/// The shape-like VML element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// `v:group`
    Group,
    /// `v:rect`
    Rect,
    /// `v:shape`
    Shape,
    /// `v:oval`
    Oval,
    /// `v:roundrect`
    RoundRect,
}

impl ShapeKind {
    /// Qualified tag name.
    #[inline]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Group => "v:group",
            Self::Rect => "v:rect",
            Self::Shape => "v:shape",
            Self::Oval => "v:oval",
            Self::RoundRect => "v:roundrect",
        }
    }
}

/// Classification of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A group-base VML element
    Shape(ShapeKind),
    /// `v:textbox`
    Textbox,
    /// `wps:txbx`, the DrawingML text box wrapper
    DrawingTextbox,
    /// `w:txbxContent`
    TxbxContent,
    /// `w:p`
    Paragraph,
    /// `mc:AlternateContent`
    AlternateContent,
    /// `mc:Choice`
    Choice,
    /// `mc:Fallback`
    Fallback,
    /// `w:pict`
    Pict,
    /// `w:drawing`
    Drawing,
    /// `wp:anchor`
    Anchor,
    /// `wp:inline`
    Inline,
    /// Anything else; opaque to the geometry engine
    Other,
}

static NODE_KINDS: phf::Map<&'static str, NodeKind> = phf_map! {
    "v:group" => NodeKind::Shape(ShapeKind::Group),
    "v:rect" => NodeKind::Shape(ShapeKind::Rect),
    "v:shape" => NodeKind::Shape(ShapeKind::Shape),
    "v:oval" => NodeKind::Shape(ShapeKind::Oval),
    "v:roundrect" => NodeKind::Shape(ShapeKind::RoundRect),
    "v:textbox" => NodeKind::Textbox,
    "wps:txbx" => NodeKind::DrawingTextbox,
    "w:txbxContent" => NodeKind::TxbxContent,
    "w:p" => NodeKind::Paragraph,
    "mc:AlternateContent" => NodeKind::AlternateContent,
    "mc:Choice" => NodeKind::Choice,
    "mc:Fallback" => NodeKind::Fallback,
    "w:pict" => NodeKind::Pict,
    "w:drawing" => NodeKind::Drawing,
    "wp:anchor" => NodeKind::Anchor,
    "wp:inline" => NodeKind::Inline,
};

impl NodeKind {
    /// Classify a qualified tag name.
    #[inline]
    pub fn from_tag(tag: &str) -> Self {
        NODE_KINDS.get(tag).copied().unwrap_or(NodeKind::Other)
    }

    /// The shape kind, for group-base nodes.
    #[inline]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            NodeKind::Shape(kind) => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub fn is_group_base(self) -> bool {
        self.shape_kind().is_some()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Shape(kind) => kind.tag(),
            NodeKind::Textbox => "v:textbox",
            NodeKind::DrawingTextbox => "wps:txbx",
            NodeKind::TxbxContent => "w:txbxContent",
            NodeKind::Paragraph => "w:p",
            NodeKind::AlternateContent => "mc:AlternateContent",
            NodeKind::Choice => "mc:Choice",
            NodeKind::Fallback => "mc:Fallback",
            NodeKind::Pict => "w:pict",
            NodeKind::Drawing => "w:drawing",
            NodeKind::Anchor => "wp:anchor",
            NodeKind::Inline => "wp:inline",
            NodeKind::Other => "other element",
        };
        f.write_str(name)
    }
}

/// Read access shared by every shape-like node.
///
/// Only the group-base facet implements this; asking the tree for the
/// capability of any other node yields `None`.
pub trait ShapeLike {
    /// Which VML element this is.
    fn kind(&self) -> ShapeKind;

    /// Parsed `style` attribute.
    fn style(&self) -> &StyleMap;

    /// Declared local coordinate space.
    fn coordinate_space(&self) -> &CoordinateSpace;

    /// Raw `fillcolor` attribute.
    fn fill_color(&self) -> Option<&str>;

    /// Horizontal unit basis used to scale children's unit-less values.
    #[inline]
    fn width_unit(&self) -> i64 {
        self.coordinate_space().width_unit()
    }

    /// Vertical unit basis used to scale children's unit-less values.
    #[inline]
    fn height_unit(&self) -> i64 {
        self.coordinate_space().height_unit()
    }
}

/// Lazily computed geometry of one group-base node.
///
/// Each cell is written once, on first access, and never invalidated: the
/// tree is read-only after construction.
#[derive(Debug, Default)]
pub(crate) struct Memo {
    pub width: OnceCell<f64>,
    pub height: OnceCell<f64>,
    pub left: OnceCell<f64>,
    pub top: OnceCell<f64>,
    pub margin_left: OnceCell<f64>,
    pub margin_top: OnceCell<f64>,
    pub off_x: OnceCell<f64>,
    pub off_y: OnceCell<f64>,
    pub position: OnceCell<String>,
    pub drawing_relative_from: OnceCell<Option<String>>,
    pub vertical_relative: OnceCell<Option<String>>,
}

/// Shared facet of `v:group`, `v:rect`, `v:shape`, `v:oval` and `v:roundrect`.
#[derive(Debug)]
pub struct GroupBase {
    kind: ShapeKind,
    style: StyleMap,
    coords: CoordinateSpace,
    fill_color: Option<String>,
    pub(crate) memo: Memo,
}

impl GroupBase {
    /// Build the facet from an element.
    ///
    /// The `style` attribute is required; `coordsize` and `coordorigin`
    /// must be integer pairs when present.
    pub fn from_element(kind: ShapeKind, element: &XmlElement) -> Result<Self> {
        let style = element.attribute("style").ok_or_else(|| {
            Error::schema(format!(
                "<{}> is missing required attribute 'style'",
                kind.tag()
            ))
        })?;
        let coords = CoordinateSpace::parse(
            element.attribute("coordsize"),
            element.attribute("coordorigin"),
        )?;

        Ok(Self {
            kind,
            style: StyleMap::parse(style),
            coords,
            fill_color: element.attribute("fillcolor").map(str::to_string),
            memo: Memo::default(),
        })
    }
}

impl ShapeLike for GroupBase {
    #[inline]
    fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    fn style(&self) -> &StyleMap {
        &self.style
    }

    #[inline]
    fn coordinate_space(&self) -> &CoordinateSpace {
        &self.coords
    }

    #[inline]
    fn fill_color(&self) -> Option<&str> {
        self.fill_color.as_deref()
    }
}
