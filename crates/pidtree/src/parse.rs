// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use roxmltree::Error;

use crate::{AId, Attribute, Document, EId, NodeData, NodeId, NodeKind, ShortRange};

impl Document {
    /// Parses a [`Document`] from a string.
    pub fn parse_str(text: &str) -> Result<Document, Error> {
        let xml = roxmltree::Document::parse(text)?;
        parse(&xml)
    }

    /// Parses a [`Document`] from a [`roxmltree::Document`].
    pub fn parse_tree(xml: &roxmltree::Document) -> Result<Document, Error> {
        parse(xml)
    }

    pub(crate) fn new() -> Self {
        Document {
            nodes: vec![NodeData {
                parent: None,
                next_sibling: None,
                children: None,
                kind: NodeKind::Root,
            }],
            attrs: Vec::new(),
        }
    }

    pub(crate) fn append_element(
        &mut self,
        parent_id: NodeId,
        tag_name: Option<EId>,
        name: &str,
        attributes: impl Iterator<Item = Attribute>,
    ) -> NodeId {
        let attrs_start_idx = self.attrs.len();
        self.attrs.extend(attributes);
        let attrs_end_idx = self.attrs.len();

        self.append(
            parent_id,
            NodeKind::Element {
                tag_name,
                name: name.into(),
                attributes: ShortRange::new(attrs_start_idx as u32, attrs_end_idx as u32),
            },
        )
    }

    fn append(&mut self, parent_id: NodeId, kind: NodeKind) -> NodeId {
        let new_child_id = NodeId::from(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent_id),
            next_sibling: None,
            children: None,
            kind,
        });

        let last_child_id = self.nodes[parent_id.get_usize()].children.map(|(_, id)| id);

        if let Some(id) = last_child_id {
            self.nodes[id.get_usize()].next_sibling = Some(new_child_id);
        }

        self.nodes[parent_id.get_usize()].children = Some(
            if let Some((first_child_id, _)) = self.nodes[parent_id.get_usize()].children {
                (first_child_id, new_child_id)
            } else {
                (new_child_id, new_child_id)
            },
        );

        new_child_id
    }
}

fn parse(xml: &roxmltree::Document) -> Result<Document, Error> {
    let mut doc = Document::new();
    let root_id = doc.root().id;
    parse_xml_node(xml.root_element(), root_id, 0, &mut doc)?;
    Ok(doc)
}

fn parse_xml_node(
    node: roxmltree::Node,
    parent_id: NodeId,
    depth: u32,
    doc: &mut Document,
) -> Result<(), Error> {
    if depth > 1024 {
        return Err(Error::NodesLimitReached);
    }

    // Proteus files are often exported with a default namespace,
    // so only the local name matters.
    let name = node.tag_name().name();
    let attributes = node.attributes().filter_map(|attr| {
        let name = AId::from_str(attr.name())?;
        Some(Attribute {
            name,
            value: attr.value().to_string(),
        })
    });

    let node_id = doc.append_element(parent_id, EId::from_str(name), name, attributes);

    for child in node.children().filter(|n| n.is_element()) {
        parse_xml_node(child, node_id, depth + 1, doc)?;
    }

    Ok(())
}
