//! Typed view over an XML element arena.
//!
//! [`ShapeTree`] owns the [`XmlTree`] and a parallel vector of classified
//! nodes sharing the same [`NodeId`]s. Parent links are the XML arena's
//! non-owning back-references, so resolving a deeply nested node walks
//! upward by index and never needs shared ownership.

use super::node::{GroupBase, NodeKind, ShapeLike};
use super::options::ResolveOptions;
use crate::common::error::{Error, Result};
use crate::ooxml::xml::{NodeId, XmlTree};
use once_cell::unsync::OnceCell;
use std::cell::Cell;
use std::fmt;

struct ShapeNode {
    kind: NodeKind,
    /// Present for group-base nodes only; a construction failure is kept and
    /// reported whenever the node is resolved.
    facet: Option<Result<GroupBase>>,
}

/// A read-only shape tree with lazily memoized geometry.
///
/// Geometry is computed on first request and cached per node; repeated
/// queries return the cached value. The memo cells are not thread-safe, so a
/// tree stays on the thread that built it.
///
/// # Example
///
/// ```
/// use vml_textbox::ooxml::vml::ShapeTree;
///
/// let tree = ShapeTree::parse(
///     br#"<w:pict><v:rect style="width:100pt;height:50pt;left:10pt;top:5pt"/></w:pict>"#,
/// )
/// .unwrap();
///
/// let rect = tree.shapes().next().unwrap();
/// let geometry = tree.geometry(rect).unwrap();
/// assert_eq!((geometry.off_x, geometry.off_y), (10.0, 5.0));
/// assert_eq!((geometry.width, geometry.height), (100.0, 50.0));
/// ```
pub struct ShapeTree {
    xml: XmlTree,
    nodes: Vec<ShapeNode>,
    options: ResolveOptions,
    computations: Cell<u64>,
}

impl ShapeTree {
    /// Parse XML bytes with default options.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Self::parse_with_options(xml, ResolveOptions::default())
    }

    /// Parse XML bytes with explicit options.
    pub fn parse_with_options(xml: &[u8], options: ResolveOptions) -> Result<Self> {
        Ok(Self::from_xml_with_options(XmlTree::parse(xml)?, options))
    }

    /// Classify an existing element tree with default options.
    pub fn from_xml(xml: XmlTree) -> Self {
        Self::from_xml_with_options(xml, ResolveOptions::default())
    }

    /// Classify an existing element tree.
    ///
    /// Building never fails: a malformed shape-like element is recorded and
    /// only reported when it, or something nested in it, is resolved.
    pub fn from_xml_with_options(xml: XmlTree, options: ResolveOptions) -> Self {
        let mut invalid = 0usize;
        let nodes: Vec<ShapeNode> = xml
            .ids()
            .filter_map(|id| xml.get(id).map(|element| (id, element)))
            .map(|(id, element)| {
                let kind = NodeKind::from_tag(element.name());
                let facet = kind.shape_kind().map(|shape_kind| {
                    let facet = GroupBase::from_element(shape_kind, element);
                    if let Err(ref e) = facet {
                        invalid += 1;
                        tracing::warn!(node = id.index(), error = %e, "malformed shape element");
                    }
                    facet
                });
                ShapeNode { kind, facet }
            })
            .collect();

        tracing::debug!(
            nodes = nodes.len(),
            shapes = nodes.iter().filter(|n| n.facet.is_some()).count(),
            invalid,
            "built shape tree"
        );

        Self {
            xml,
            nodes,
            options,
            computations: Cell::new(0),
        }
    }

    /// Underlying element arena.
    #[inline]
    pub fn xml(&self) -> &XmlTree {
        &self.xml
    }

    #[inline]
    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Classification of a node.
    pub fn kind(&self, id: NodeId) -> Result<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    /// Containing node, if any.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.xml.parent(id)
    }

    /// The shape-like capability of a node.
    ///
    /// `None` for nodes that are not group-base and for group-base nodes
    /// whose construction failed.
    pub fn shape_like(&self, id: NodeId) -> Option<&dyn ShapeLike> {
        match self.nodes.get(id.index())?.facet.as_ref()? {
            Ok(facet) => Some(facet as &dyn ShapeLike),
            Err(_) => None,
        }
    }

    /// The group-base facet of a node.
    pub fn shape(&self, id: NodeId) -> Result<&GroupBase> {
        let node = self.node(id)?;
        match &node.facet {
            Some(Ok(facet)) => Ok(facet),
            Some(Err(e)) => Err(e.clone()),
            None => Err(Error::unexpected("shape-like VML element", node.kind.to_string())),
        }
    }

    /// Parent of `id` when that parent is group-base.
    ///
    /// A group-base parent that failed construction is an error: geometry
    /// cannot be inherited from it.
    pub(crate) fn group_base_parent(&self, id: NodeId) -> Result<Option<(NodeId, &GroupBase)>> {
        let Some(parent) = self.parent(id) else {
            return Ok(None);
        };
        if !self.kind(parent)?.is_group_base() {
            return Ok(None);
        }
        Ok(Some((parent, self.shape(parent)?)))
    }

    /// Fail with [`Error::UnexpectedNode`] unless `id` has the given kind.
    pub(crate) fn expect_kind(&self, id: NodeId, expected: NodeKind) -> Result<()> {
        let kind = self.kind(id)?;
        if kind == expected {
            Ok(())
        } else {
            Err(Error::unexpected(expected.to_string(), kind.to_string()))
        }
    }

    /// Group-base nodes in document order.
    pub fn shapes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids_of(|kind| kind.is_group_base())
    }

    /// `w:txbxContent` nodes in document order.
    pub fn text_box_contents(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids_of(|kind| kind == NodeKind::TxbxContent)
    }

    /// `mc:AlternateContent` wrappers in document order.
    pub fn alternate_contents(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids_of(|kind| kind == NodeKind::AlternateContent)
    }

    /// Number of memoized values computed so far.
    ///
    /// Cached reads do not count, which makes memoization observable.
    #[inline]
    pub fn computations(&self) -> u64 {
        self.computations.get()
    }

    /// Return the cached value of `cell`, computing it on first access.
    pub(crate) fn memoize<T>(
        &self,
        id: NodeId,
        property: &'static str,
        cell: &OnceCell<T>,
        compute: impl FnOnce() -> Result<T>,
    ) -> Result<T>
    where
        T: Clone + fmt::Debug,
    {
        cell.get_or_try_init(|| {
            let value = compute()?;
            self.computations.set(self.computations.get() + 1);
            tracing::trace!(node = id.index(), property, value = ?value, "resolved");
            Ok(value)
        })
        .cloned()
    }

    fn node(&self, id: NodeId) -> Result<&ShapeNode> {
        self.nodes.get(id.index()).ok_or(Error::NodeNotFound(id.index()))
    }

    fn ids_of(&self, pred: impl Fn(NodeKind) -> bool + 'static) -> impl Iterator<Item = NodeId> + '_ {
        self.xml
            .ids()
            .filter(move |id| self.nodes.get(id.index()).is_some_and(|n| pred(n.kind)))
    }
}

impl fmt::Debug for ShapeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeTree")
            .field("nodes", &self.nodes.len())
            .field("options", &self.options)
            .field("computations", &self.computations.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::vml::node::ShapeKind;

    const FRAGMENT: &[u8] = br#"<w:p><w:r><w:pict>
        <v:group style="width:200pt;height:100pt" coordsize="1000,1000">
            <v:rect style="width:500"/>
            <v:oval>
                <v:textbox><w:txbxContent><w:p/><w:p/></w:txbxContent></v:textbox>
            </v:oval>
        </v:group>
    </w:pict></w:r></w:p>"#;

    #[test]
    fn test_classification_and_iteration() {
        let tree = ShapeTree::parse(FRAGMENT).unwrap();
        let shapes: Vec<_> = tree.shapes().collect();
        assert_eq!(shapes.len(), 3);
        assert_eq!(tree.kind(shapes[0]).unwrap(), NodeKind::Shape(ShapeKind::Group));
        assert_eq!(tree.kind(shapes[2]).unwrap(), NodeKind::Shape(ShapeKind::Oval));
        assert_eq!(tree.text_box_contents().count(), 1);
        assert_eq!(tree.alternate_contents().count(), 0);
        assert_eq!(tree.kind(tree.xml().root().unwrap()).unwrap(), NodeKind::Paragraph);
    }

    #[test]
    fn test_invalid_shape_is_isolated() {
        let tree = ShapeTree::parse(FRAGMENT).unwrap();
        let shapes: Vec<_> = tree.shapes().collect();

        // The oval has no style: only it is affected.
        assert!(matches!(tree.shape(shapes[2]), Err(Error::SchemaViolation(_))));
        assert!(tree.shape_like(shapes[2]).is_none());
        assert!(tree.shape(shapes[1]).is_ok());
        assert_eq!(tree.shape_like(shapes[0]).map(|s| s.width_unit()), Some(1000));
    }

    #[test]
    fn test_non_shape_has_no_facet() {
        let tree = ShapeTree::parse(FRAGMENT).unwrap();
        let root = tree.xml().root().unwrap();
        assert!(tree.shape_like(root).is_none());
        assert_eq!(
            tree.shape(root).unwrap_err(),
            Error::unexpected("shape-like VML element", "w:p")
        );
        assert_eq!(tree.kind(NodeId(999)).unwrap_err(), Error::NodeNotFound(999));
    }

    #[test]
    fn test_group_base_parent() {
        let tree = ShapeTree::parse(FRAGMENT).unwrap();
        let shapes: Vec<_> = tree.shapes().collect();
        assert_eq!(tree.group_base_parent(shapes[0]).unwrap().map(|(id, _)| id), None);
        assert_eq!(
            tree.group_base_parent(shapes[1]).unwrap().map(|(id, _)| id),
            Some(shapes[0])
        );
    }
}
