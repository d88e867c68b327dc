// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Represents a [Proteus](https://www.dexpi.org/) P&ID document as a read-only tree.

`pidtree` uses [`roxmltree`](https://github.com/RazrFalcon/roxmltree) for parsing,
but instead of producing a generic XML tree it keeps only elements
and resolves tag and attribute names into strongly-typed identifiers.

Unlike `roxmltree`, the resulting [`Document`] owns all of its data,
so a subtree can be copied out into a new, independent [`Document`]
and modified without touching the source one.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

use std::num::NonZeroU32;
use std::str::FromStr;

#[rustfmt::skip] mod names;
mod parse;

pub use names::{AId, EId};

pub use roxmltree::{self, Error};

/// A Proteus tree container.
///
/// Contains only element nodes.
#[derive(Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    attrs: Vec<Attribute>,
}

impl Document {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> Node<'_> {
        self.get(NodeId::new(0))
    }

    /// Returns the root element.
    #[inline]
    pub fn root_element(&self) -> Node<'_> {
        // Elements are stored in document order and `Document`
        // always has at least one, so the root element directly follows the root.
        self.get(NodeId::new(1))
    }

    /// Returns an iterator over document's descendant nodes.
    ///
    /// Shorthand for `doc.root().descendants()`.
    #[inline]
    pub fn descendants(&self) -> Descendants<'_> {
        self.root().descendants()
    }

    /// Returns a node by its ID.
    ///
    /// # Panics
    ///
    /// When `id` doesn't belong to this document.
    #[inline]
    pub fn get(&self, id: NodeId) -> Node<'_> {
        Node {
            id,
            d: &self.nodes[id.get_usize()],
            doc: self,
        }
    }

    /// Sets an element attribute.
    ///
    /// Replaces an existing value or appends a new attribute.
    /// Does nothing for the root node.
    pub fn set_attribute(&mut self, id: NodeId, aid: AId, value: impl Into<String>) {
        let value = value.into();
        let range = match self.nodes[id.get_usize()].kind {
            NodeKind::Element { attributes, .. } => attributes,
            NodeKind::Root => return,
        };

        if let Some(attr) = self.attrs[range.to_urange()]
            .iter_mut()
            .find(|a| a.name == aid)
        {
            attr.value = value;
            return;
        }

        // Attributes are stored as a continuous range,
        // so a growing list has to be moved to the end first.
        let start = self.attrs.len();
        let moved = self.attrs[range.to_urange()].to_vec();
        self.attrs.extend(moved);
        self.attrs.push(Attribute { name: aid, value });
        let end = self.attrs.len();

        if let NodeKind::Element {
            ref mut attributes, ..
        } = self.nodes[id.get_usize()].kind
        {
            *attributes = ShortRange::new(start as u32, end as u32);
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        if !self.root().has_children() {
            return write!(f, "Document []");
        }

        macro_rules! writeln_indented {
            ($depth:expr, $f:expr, $fmt:expr) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt)?;
            };
            ($depth:expr, $f:expr, $fmt:expr, $($arg:tt)*) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt, $($arg)*)?;
            };
        }

        fn print_children(
            parent: Node,
            depth: usize,
            f: &mut std::fmt::Formatter,
        ) -> Result<(), std::fmt::Error> {
            for child in parent.children() {
                writeln_indented!(depth, f, "Element {{");
                writeln_indented!(depth, f, "    tag_name: {:?}", child.tag_name_str());

                if !child.attributes().is_empty() {
                    writeln_indented!(depth + 1, f, "attributes: [");
                    for attr in child.attributes() {
                        writeln_indented!(depth + 2, f, "{:?}", attr);
                    }
                    writeln_indented!(depth + 1, f, "]");
                }

                if child.has_children() {
                    writeln_indented!(depth, f, "    children: [");
                    print_children(child, depth + 2, f)?;
                    writeln_indented!(depth, f, "    ]");
                }

                writeln_indented!(depth, f, "}}");
            }

            Ok(())
        }

        writeln!(f, "Document [")?;
        print_children(self.root(), 1, f)?;
        writeln!(f, "]")?;

        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct ShortRange {
    start: u32,
    end: u32,
}

impl ShortRange {
    #[inline]
    fn new(start: u32, end: u32) -> Self {
        ShortRange { start, end }
    }

    #[inline]
    fn to_urange(self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// A node identifier inside a [`Document`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    #[inline]
    fn new(id: u32) -> Self {
        debug_assert!(id < u32::MAX);

        // We are using `NonZeroU32` to reduce overhead of `Option<NodeId>`.
        NodeId(NonZeroU32::new(id + 1).unwrap())
    }

    #[inline]
    fn get(self) -> u32 {
        self.0.get() - 1
    }

    #[inline]
    fn get_usize(self) -> usize {
        self.get() as usize
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(id: usize) -> Self {
        // We already checked that `id` is limited by u32::MAX.
        debug_assert!(id <= u32::MAX as usize);
        NodeId::new(id as u32)
    }
}

#[derive(Clone)]
enum NodeKind {
    Root,
    Element {
        tag_name: Option<EId>,
        name: Box<str>,
        attributes: ShortRange,
    },
}

#[derive(Clone)]
struct NodeData {
    parent: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    kind: NodeKind,
}

/// An attribute.
#[derive(Clone)]
pub struct Attribute {
    /// Attribute's name.
    pub name: AId,
    /// Attribute's value.
    pub value: String,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "Attribute {{ name: {:?}, value: {} }}",
            self.name, self.value
        )
    }
}

/// A Proteus node.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    id: NodeId,
    doc: &'a Document,
    d: &'a NodeData,
}

impl Eq for Node<'_> {}

impl PartialEq for Node<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.doc, other.doc) && std::ptr::eq(self.d, other.d)
    }
}

impl<'a> Node<'a> {
    /// Returns node's ID.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Checks if the current node is an element.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.d.kind, NodeKind::Element { .. })
    }

    /// Returns element's tag name.
    ///
    /// Returns `None` for the root node and for elements outside of the known vocabulary.
    #[inline]
    pub fn tag_name(&self) -> Option<EId> {
        match self.d.kind {
            NodeKind::Element { tag_name, .. } => tag_name,
            NodeKind::Root => None,
        }
    }

    /// Returns element's tag name as written in the document.
    ///
    /// Returns an empty string for the root node.
    #[inline]
    pub fn tag_name_str(&self) -> &'a str {
        match self.d.kind {
            NodeKind::Element { ref name, .. } => name,
            NodeKind::Root => "",
        }
    }

    /// Checks that the element has a specified tag name.
    #[inline]
    pub fn has_tag_name(&self, eid: EId) -> bool {
        self.tag_name() == Some(eid)
    }

    /// Returns element's `ID` attribute value.
    ///
    /// Returns an empty string otherwise.
    #[inline]
    pub fn element_id(&self) -> &'a str {
        self.attribute(AId::Id).unwrap_or("")
    }

    /// Parses an attribute value.
    ///
    /// Returns `None` when an attribute is not set or cannot be parsed.
    /// In the last case a warning will be logged.
    #[inline]
    pub fn attribute<T: FromValue<'a>>(&self, aid: AId) -> Option<T> {
        let value = self.raw_attribute(aid)?;
        match T::parse(*self, aid, value) {
            Some(v) => Some(v),
            None => {
                log::warn!(
                    "Failed to parse {}@{} value: '{}'.",
                    self.tag_name_str(),
                    aid,
                    value
                );
                None
            }
        }
    }

    /// Returns an unparsed attribute value.
    #[inline]
    pub fn raw_attribute(&self, aid: AId) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|a| a.name == aid)
            .map(|a| a.value.as_str())
    }

    /// Checks if an attribute is present.
    #[inline]
    pub fn has_attribute(&self, aid: AId) -> bool {
        self.attributes().iter().any(|a| a.name == aid)
    }

    /// Returns a list of all element's attributes.
    #[inline]
    pub fn attributes(&self) -> &'a [Attribute] {
        match self.d.kind {
            NodeKind::Element { ref attributes, .. } => &self.doc.attrs[attributes.to_urange()],
            NodeKind::Root => &[],
        }
    }

    /// Returns a parent node.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.d.parent.map(|id| self.doc.get(id))
    }

    /// Returns the next sibling.
    #[inline]
    pub fn next_sibling(&self) -> Option<Self> {
        self.d.next_sibling.map(|id| self.doc.get(id))
    }

    /// Returns the first child.
    #[inline]
    pub fn first_child(&self) -> Option<Self> {
        self.d.children.map(|(id, _)| self.doc.get(id))
    }

    /// Returns the last child.
    #[inline]
    pub fn last_child(&self) -> Option<Self> {
        self.d.children.map(|(_, id)| self.doc.get(id))
    }

    /// Returns the first child with a specified tag name.
    #[inline]
    pub fn child_by_tag(&self, eid: EId) -> Option<Self> {
        self.children().find(|n| n.has_tag_name(eid))
    }

    /// Returns an iterator over children with a specified tag name.
    #[inline]
    pub fn children_by_tag(&self, eid: EId) -> impl Iterator<Item = Node<'a>> {
        self.children().filter(move |n| n.has_tag_name(eid))
    }

    /// Checks if the node has child nodes.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.d.children.is_some()
    }

    /// Returns an iterator over ancestor nodes starting at this node.
    #[inline]
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors(Some(*self))
    }

    /// Returns an iterator over children nodes.
    #[inline]
    pub fn children(&self) -> Children<'a> {
        Children {
            front: self.first_child(),
            back: self.last_child(),
        }
    }

    /// Returns an iterator which traverses the subtree starting at this node.
    #[inline]
    fn traverse(&self) -> Traverse<'a> {
        Traverse {
            root: *self,
            edge: None,
        }
    }

    /// Returns an iterator over this node and its descendants.
    #[inline]
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants(self.traverse())
    }

    /// Copies this node and all of its descendants into a new document.
    ///
    /// The copied node becomes the root element of the new document.
    /// Calling this method on the root node copies the whole document.
    pub fn to_document(&self) -> Document {
        if !self.is_element() {
            return self.doc.clone();
        }

        let mut doc = Document::new();
        let root_id = doc.root().id;
        copy_subtree(*self, root_id, &mut doc);
        doc
    }
}

fn copy_subtree(node: Node, parent_id: NodeId, doc: &mut Document) {
    let new_id = doc.append_element(
        parent_id,
        node.tag_name(),
        node.tag_name_str(),
        node.attributes().iter().cloned(),
    );

    for child in node.children() {
        copy_subtree(child, new_id, doc);
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self.d.kind {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Element { ref name, .. } => {
                write!(
                    f,
                    "Element {{ tag_name: {:?}, attributes: {:?} }}",
                    name,
                    self.attributes()
                )
            }
        }
    }
}

/// An iterator over ancestor nodes.
#[derive(Clone, Debug)]
pub struct Ancestors<'a>(Option<Node<'a>>);

impl<'a> Iterator for Ancestors<'a> {
    type Item = Node<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.0.take();
        self.0 = node.as_ref().and_then(Node::parent);
        node
    }
}

/// An iterator over children nodes.
#[derive(Clone, Debug)]
pub struct Children<'a> {
    front: Option<Node<'a>>,
    back: Option<Node<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.front.take();
        if self.front == self.back {
            self.back = None;
        } else {
            self.front = node.as_ref().and_then(Node::next_sibling);
        }
        node
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Edge<'a> {
    Open(Node<'a>),
    Close(Node<'a>),
}

#[derive(Clone, Debug)]
struct Traverse<'a> {
    root: Node<'a>,
    edge: Option<Edge<'a>>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = Edge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.edge {
            Some(Edge::Open(node)) => {
                self.edge = Some(match node.first_child() {
                    Some(first_child) => Edge::Open(first_child),
                    None => Edge::Close(node),
                });
            }
            Some(Edge::Close(node)) => {
                if node == self.root {
                    self.edge = None;
                } else if let Some(next_sibling) = node.next_sibling() {
                    self.edge = Some(Edge::Open(next_sibling));
                } else {
                    self.edge = node.parent().map(Edge::Close);
                }
            }
            None => {
                self.edge = Some(Edge::Open(self.root));
            }
        }

        self.edge
    }
}

/// A descendants iterator.
#[derive(Clone, Debug)]
pub struct Descendants<'a>(Traverse<'a>);

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for edge in &mut self.0 {
            if let Edge::Open(node) = edge {
                return Some(node);
            }
        }

        None
    }
}

/// A trait for parsing attribute values.
pub trait FromValue<'a>: Sized {
    /// Parses an attribute value.
    ///
    /// When `None` is returned, the attribute value will be logged as a parsing failure.
    fn parse(node: Node<'a>, aid: AId, value: &'a str) -> Option<Self>;
}

impl<'a> FromValue<'a> for &'a str {
    #[inline]
    fn parse(_: Node, _: AId, value: &'a str) -> Option<Self> {
        Some(value)
    }
}

impl<'a> FromValue<'a> for f64 {
    fn parse(_: Node, _: AId, value: &str) -> Option<Self> {
        svgtypes::Number::from_str(value.trim())
            .ok()
            .map(|v| v.0)
            .filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "
    <PlantModel>
        <PlantInformation Units='mm' OriginatingSystem='Test'/>
        <Equipment ID='E1' ComponentName='PUMP01' Unknown='1'>
            <Position>
                <Location X='10' Y='20.5' Z='0'/>
            </Position>
            <CustomElement X='1'/>
        </Equipment>
    </PlantModel>
    ";

    #[test]
    fn parse_elements_only() {
        let doc = Document::parse_str(DOC).unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name(), Some(EId::PlantModel));
        assert_eq!(root.children().count(), 2);
        assert_eq!(doc.descendants().count(), 7);
    }

    #[test]
    fn typed_attributes() {
        let doc = Document::parse_str(DOC).unwrap();
        let location = doc
            .descendants()
            .find(|n| n.has_tag_name(EId::Location))
            .unwrap();
        assert_eq!(location.attribute::<f64>(AId::X), Some(10.0));
        assert_eq!(location.attribute::<f64>(AId::Y), Some(20.5));
        assert_eq!(location.attribute::<&str>(AId::Radius), None);
    }

    #[test]
    fn unknown_names() {
        let doc = Document::parse_str(DOC).unwrap();
        let equipment = doc.root_element().child_by_tag(EId::Equipment).unwrap();
        // Unknown attributes are dropped.
        assert_eq!(equipment.attributes().len(), 2);

        let custom = equipment.last_child().unwrap();
        assert_eq!(custom.tag_name(), None);
        assert_eq!(custom.tag_name_str(), "CustomElement");
    }

    #[test]
    fn invalid_number() {
        let doc = Document::parse_str("<PlantModel><Min X='abc' Y='1e3'/></PlantModel>").unwrap();
        let min = doc.root_element().first_child().unwrap();
        assert_eq!(min.attribute::<f64>(AId::X), None);
        assert_eq!(min.attribute::<f64>(AId::Y), Some(1000.0));
    }

    #[test]
    fn parent_links() {
        let doc = Document::parse_str(DOC).unwrap();
        let location = doc
            .descendants()
            .find(|n| n.has_tag_name(EId::Location))
            .unwrap();
        let names: Vec<_> = location
            .ancestors()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name_str())
            .collect();
        assert_eq!(names, ["Location", "Position", "Equipment", "PlantModel"]);
    }

    #[test]
    fn subtree_copy_is_independent() {
        let doc = Document::parse_str(DOC).unwrap();
        let equipment = doc.root_element().child_by_tag(EId::Equipment).unwrap();

        let mut copy = equipment.to_document();
        assert_eq!(copy.root_element().tag_name(), Some(EId::Equipment));
        assert_eq!(copy.descendants().count(), 5);

        let location_id = copy
            .descendants()
            .find(|n| n.has_tag_name(EId::Location))
            .unwrap()
            .id();
        copy.set_attribute(location_id, AId::X, "42");
        copy.set_attribute(location_id, AId::Radius, "3");

        let location = copy.get(location_id);
        assert_eq!(location.attribute::<f64>(AId::X), Some(42.0));
        assert_eq!(location.attribute::<f64>(AId::Y), Some(20.5));
        assert_eq!(location.attribute::<f64>(AId::Radius), Some(3.0));

        let original = doc
            .descendants()
            .find(|n| n.has_tag_name(EId::Location))
            .unwrap();
        assert_eq!(original.attribute::<f64>(AId::X), Some(10.0));
        assert!(!original.has_attribute(AId::Radius));
    }

    #[test]
    fn growing_attributes_keeps_siblings_intact() {
        let mut doc =
            Document::parse_str("<PlantModel><Min X='1'/><Max X='2'/></PlantModel>").unwrap();
        let min_id = doc.root_element().first_child().unwrap().id();
        doc.set_attribute(min_id, AId::Y, "5");

        let max = doc.root_element().last_child().unwrap();
        assert_eq!(max.attributes().len(), 1);
        assert_eq!(max.attribute::<f64>(AId::X), Some(2.0));

        let min = doc.get(min_id);
        assert_eq!(min.attribute::<f64>(AId::X), Some(1.0));
        assert_eq!(min.attribute::<f64>(AId::Y), Some(5.0));
    }
}
