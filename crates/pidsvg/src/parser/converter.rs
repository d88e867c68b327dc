// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pidtree::{AId, EId, Node};

use super::{color, shapes, text, Context, Error, Instance, Options};
use crate::tree::{self, Color, Group, Scene};

pub(crate) struct State<'a, 'input: 'a> {
    ctx: &'a Context<'input>,
    /// Catalog templates that are currently being expanded.
    instances: Vec<(EId, String)>,
}

pub(crate) fn convert_doc(doc: &pidtree::Document, opt: &Options) -> Result<Scene, Error> {
    let plant_model = doc.root_element();
    if !plant_model.has_tag_name(EId::PlantModel) {
        return Err(Error::NotAPlantModel(plant_model.tag_name_str().to_string()));
    }

    let ctx = Context::new(plant_model, opt)?;
    let size = ctx.size().ok_or(Error::InvalidSize)?;

    let background = if opt.background {
        resolve_background(plant_model)?
    } else {
        None
    };

    let mut state = State {
        ctx: &ctx,
        instances: Vec::new(),
    };

    let mut root = Group::empty();
    convert_element(plant_model, None, &mut state, &mut root)?;

    Ok(Scene {
        size,
        view_box: ctx.view_box(),
        background,
        root,
    })
}

fn resolve_background(plant_model: Node) -> Result<Option<Color>, Error> {
    let presentation = plant_model
        .child_by_tag(EId::Drawing)
        .and_then(|n| n.child_by_tag(EId::Presentation));

    match presentation {
        Some(presentation) => color(presentation).map(Some),
        None => {
            log::warn!("Drawing doesn't have a presentation. Background is not set.");
            Ok(None)
        }
    }
}

/// Converts an element into scene nodes and appends them to `parent_group`.
///
/// `parent` is the source parent element. It's used for presentation inheritance
/// and is not necessarily the one from the source tree, since catalog instances
/// are detached from it.
pub(crate) fn convert_element<'a>(
    node: Node<'a>,
    parent: Option<Node<'a>>,
    state: &mut State,
    parent_group: &mut Group,
) -> Result<(), Error> {
    let tag_name = match node.tag_name() {
        Some(v) => v,
        None => return unknown_element(node),
    };

    let ctx = state.ctx;
    let primitive = match tag_name {
        EId::Line => shapes::convert_line(node, ctx)?,
        EId::PolyLine | EId::CenterLine => shapes::convert_polyline(node, parent, false, ctx)?,
        EId::Shape => shapes::convert_polyline(node, parent, true, ctx)?,
        EId::Circle => shapes::convert_circle(node, ctx)?,
        EId::TrimmedCurve => shapes::convert_trimmed_curve(node, ctx)?,
        EId::Text => text::convert(node, ctx)?,
        EId::Ellipse => return Err(Error::NotImplemented("Ellipse")),
        EId::BsplineCurve => return Err(Error::NotImplemented("BsplineCurve")),
        // The root group already represents the plant model.
        EId::PlantModel => None,
        EId::Drawing
        | EId::Label
        | EId::Nozzle
        | EId::Equipment
        | EId::PipingNetworkSystem
        | EId::PipingNetworkSegment
        | EId::PipingComponent
        | EId::PipeFlowArrow
        | EId::PipeConnectorSymbol
        | EId::SignalLine
        | EId::InformationFlow
        | EId::InstrumentComponent
        | EId::ProcessInstrument
        | EId::InstrumentLoop
        | EId::CompositeCurve => Some(convert_group(node, tag_name)),
        EId::PlantInformation
        | EId::Extent
        | EId::Min
        | EId::Max
        | EId::Presentation
        | EId::ShapeCatalogue
        | EId::Position
        | EId::Location
        | EId::Axis
        | EId::Reference
        | EId::Scale
        | EId::Coordinate
        | EId::PersistentID
        | EId::GenericAttributes
        | EId::GenericAttribute
        | EId::ConnectionPoints
        | EId::Connection
        | EId::Node
        | EId::Association
        | EId::History => None,
    };

    let overlay = match primitive {
        Some(_) if ctx.debug => shapes::convert_extent(node, ctx),
        _ => None,
    };

    let is_container = is_container(tag_name);
    match primitive {
        Some(tree::Node::Group(mut g)) => {
            if is_container {
                convert_children(node, state, &mut g)?;
            }

            parent_group.children.push(tree::Node::Group(g));
            parent_group.children.extend(overlay);
        }
        Some(primitive) => {
            parent_group.children.push(primitive);
            parent_group.children.extend(overlay);
        }
        None => {
            if is_container {
                convert_children(node, state, parent_group)?;
            }
        }
    }

    Ok(())
}

fn convert_children(node: Node, state: &mut State, parent_group: &mut Group) -> Result<(), Error> {
    let mut children = node.children();

    if let Some(instance) = instantiate(node, state)? {
        // The first host child goes before the instance.
        // Usually, it's a host presentation.
        if let Some(child) = children.next() {
            convert_element(child, Some(node), state, parent_group)?;
        }

        for child in instance.children() {
            convert_element(child, Some(node), state, parent_group)?;
        }

        state.instances.pop();
    }

    for child in children {
        convert_element(child, Some(node), state, parent_group)?;
    }

    Ok(())
}

/// Places a catalog template referenced by the element, if any.
///
/// On success, the template is registered as being expanded
/// and must be unregistered by the caller.
fn instantiate(node: Node, state: &mut State) -> Result<Option<Instance>, Error> {
    let kind = match node.tag_name() {
        Some(kind) if is_instantiable(kind) => kind,
        _ => return Ok(None),
    };

    let catalog = match state.ctx.catalog {
        Some(catalog) => catalog,
        None => return Ok(None),
    };

    let name = match node.attribute::<&str>(AId::ComponentName) {
        Some(name) => name,
        None => return Ok(None),
    };

    if state.instances.iter().any(|(k, n)| *k == kind && n == name) {
        log::warn!("'{}' {} references itself. Skipped.", name, kind);
        return Ok(None);
    }

    let template = match catalog.lookup(kind, name) {
        Some(template) => template,
        None => {
            log::debug!("'{}' {} is not in the shape catalog.", name, kind);
            return Ok(None);
        }
    };

    let instance = Instance::new(node, template)?;
    state.instances.push((kind, name.to_string()));
    Ok(Some(instance))
}

fn convert_group(node: Node, tag_name: EId) -> tree::Node {
    let attribute = |aid| node.attribute::<&str>(aid).map(String::from);

    tree::Node::Group(Box::new(Group {
        id: node.element_id().to_string(),
        kind: tag_name.to_str().to_string(),
        component_class: attribute(AId::ComponentClass),
        component_name: attribute(AId::ComponentName),
        tag_name: attribute(AId::TagName),
        children: Vec::new(),
    }))
}

fn unknown_element(node: Node) -> Result<(), Error> {
    if cfg!(feature = "strict") {
        Err(Error::UnknownElement(node.tag_name_str().to_string()))
    } else {
        log::warn!("'{}' element is not supported. Skipped.", node.tag_name_str());
        Ok(())
    }
}

fn is_container(eid: EId) -> bool {
    matches!(
        eid,
        EId::PlantModel
            | EId::Drawing
            | EId::Label
            | EId::Nozzle
            | EId::Equipment
            | EId::PipingNetworkSystem
            | EId::PipingNetworkSegment
            | EId::PipingComponent
            | EId::PipeFlowArrow
            | EId::PipeConnectorSymbol
            | EId::SignalLine
            | EId::InformationFlow
            | EId::InstrumentComponent
            | EId::ProcessInstrument
            | EId::InstrumentLoop
            | EId::CompositeCurve
    )
}

fn is_instantiable(eid: EId) -> bool {
    matches!(
        eid,
        EId::Equipment
            | EId::Nozzle
            | EId::Label
            | EId::PipingComponent
            | EId::PipeConnectorSymbol
            | EId::InstrumentComponent
            | EId::ProcessInstrument
    )
}
