// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pidtree::{AId, Document, EId, Node};

use super::{apply_transform, Error, Placement};

/// A shape catalog.
///
/// Stores reusable templates keyed by element kind and `ComponentName`.
#[derive(Clone, Copy, Debug)]
pub struct Catalog<'a> {
    root: Node<'a>,
}

impl<'a> Catalog<'a> {
    /// Creates a new catalog from a `ShapeCatalogue` element.
    #[inline]
    pub fn new(root: Node<'a>) -> Self {
        Catalog { root }
    }

    /// Looks up a template.
    ///
    /// Returns an independent copy of the first matching element,
    /// so it can be transformed without affecting the catalog.
    pub fn lookup(&self, kind: EId, component_name: &str) -> Option<Document> {
        self.root
            .descendants()
            .find(|n| {
                n.has_tag_name(kind) && n.attribute::<&str>(AId::ComponentName) == Some(component_name)
            })
            .map(|n| n.to_document())
    }
}

/// A template placed at its host element.
#[derive(Clone, Debug)]
pub struct Instance {
    doc: Document,
}

impl Instance {
    /// Places a template at the host element.
    ///
    /// Every graphical child of the template is transformed by the host's
    /// position, rotation reference and scale.
    pub fn new(host: Node, template: Document) -> Result<Self, Error> {
        let placement = Placement::from_node(host)?;

        let ids: Vec<_> = template
            .root_element()
            .children()
            .filter(|n| !is_template_metadata(*n))
            .map(|n| n.id())
            .collect();

        let mut doc = template;
        for id in ids {
            apply_transform(&mut doc, id, &placement)?;
        }

        Ok(Instance { doc })
    }

    /// Returns an iterator over transformed template children.
    ///
    /// Template metadata is skipped.
    pub fn children(&self) -> impl Iterator<Item = Node<'_>> {
        self.doc
            .root_element()
            .children()
            .filter(|n| !is_template_metadata(*n))
    }
}

fn is_template_metadata(node: Node) -> bool {
    matches!(
        node.tag_name(),
        Some(EId::Presentation)
            | Some(EId::Extent)
            | Some(EId::Position)
            | Some(EId::GenericAttributes)
            | Some(EId::Min)
            | Some(EId::Max)
    )
}
