// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pidtree::{AId, Document, EId, Node, NodeId};

use super::{Error, NodeExt};
use crate::{Point, Rect, Rotation, Transform};

/// An instance placement.
///
/// All values are in source units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Placement {
    /// `Position/Location` of the host element.
    pub translate: Point,
    /// `Position/Reference` of the host element, as a `(cos, sin)` pair.
    ///
    /// Not validated yet.
    pub reference: (f64, f64),
    /// `Scale` of the host element. Z is unused.
    pub scale: (f64, f64, f64),
}

impl Default for Placement {
    fn default() -> Self {
        Placement {
            translate: Point::default(),
            reference: (1.0, 0.0),
            scale: (1.0, 1.0, 1.0),
        }
    }
}

impl Placement {
    /// Reads a placement from a host element.
    ///
    /// Missing parts fall back to an identity placement.
    pub fn from_node(host: Node) -> Result<Self, Error> {
        let mut placement = Placement::default();

        if let Some(position) = host.child_by_tag(EId::Position) {
            if let Some(location) = position.child_by_tag(EId::Location) {
                placement.translate = Point::new(
                    location.required_attribute(AId::X)?,
                    location.required_attribute(AId::Y)?,
                );
            }

            if let Some(reference) = position.child_by_tag(EId::Reference) {
                placement.reference = (
                    reference.required_attribute(AId::X)?,
                    reference.required_attribute(AId::Y)?,
                );
            }
        }

        if let Some(scale) = host.child_by_tag(EId::Scale) {
            placement.scale = (
                scale.optional_attribute(AId::X)?.unwrap_or(1.0),
                scale.optional_attribute(AId::Y)?.unwrap_or(1.0),
                scale.optional_attribute(AId::Z)?.unwrap_or(1.0),
            );
        }

        Ok(placement)
    }
}

/// Rewrites coordinates of an element and all of its descendants.
///
/// Each `Location`, `Coordinate` and `Extent` point is scaled, rotated and translated,
/// in that order. `Reference` vectors are rotated. `Radius` is multiplied by the X scale.
///
/// Fails when the rotation reference is not a unit vector.
pub fn apply_transform(doc: &mut Document, id: NodeId, placement: &Placement) -> Result<(), Error> {
    let (cos, sin) = placement.reference;
    let rotation = Rotation::new(cos, sin).ok_or(Error::InvalidRotation(cos, sin))?;
    let (sx, sy, _) = placement.scale;
    let ts = Transform::new_placement(placement.translate, rotation, sx, sy);

    let mut updates = Vec::new();
    for node in doc.get(id).descendants() {
        match node.tag_name() {
            Some(EId::Location) | Some(EId::Coordinate) => {
                if let Some((x, y)) = point(node) {
                    let (x, y) = ts.apply(x, y);
                    updates.push((node.id(), AId::X, x));
                    updates.push((node.id(), AId::Y, y));
                }
            }
            Some(EId::Reference) => {
                if let Some((x, y)) = point(node) {
                    let (x, y) = ts.apply_vector(x, y);
                    let len = x.hypot(y);
                    if len > 0.0 {
                        updates.push((node.id(), AId::X, x / len));
                        updates.push((node.id(), AId::Y, y / len));
                    }
                }
            }
            Some(EId::Extent) => transform_extent(node, &ts, &mut updates),
            _ => {}
        }

        if let Some(r) = node.attribute::<f64>(AId::Radius) {
            // Mirroring must not produce a negative radius.
            updates.push((node.id(), AId::Radius, r * sx.abs()));
        }
    }

    for (id, aid, value) in updates {
        doc.set_attribute(id, aid, value.to_string());
    }

    Ok(())
}

fn point(node: Node) -> Option<(f64, f64)> {
    Some((node.attribute(AId::X)?, node.attribute(AId::Y)?))
}

// A rotated box is replaced by its axis-aligned envelope.
fn transform_extent(extent: Node, ts: &Transform, updates: &mut Vec<(NodeId, AId, f64)>) {
    let min = extent.child_by_tag(EId::Min);
    let max = extent.child_by_tag(EId::Max);
    let (min, max) = match (min, max) {
        (Some(min), Some(max)) => (min, max),
        _ => return,
    };

    let ((x1, y1), (x2, y2)) = match (point(min), point(max)) {
        (Some(p1), Some(p2)) => (p1, p2),
        _ => return,
    };

    let corners = [(x1, y1), (x2, y1), (x2, y2), (x1, y2)].map(|(x, y)| {
        let (x, y) = ts.apply(x, y);
        Point::new(x, y)
    });

    if let Some(r) = Rect::from_points(corners) {
        updates.push((min.id(), AId::X, r.x));
        updates.push((min.id(), AId::Y, r.y));
        updates.push((max.id(), AId::X, r.right()));
        updates.push((max.id(), AId::Y, r.bottom()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "
    <Equipment ComponentName='PUMP01'>
        <Circle Radius='4'>
            <Position>
                <Location X='1' Y='2' Z='0'/>
                <Reference X='1' Y='0' Z='0'/>
            </Position>
        </Circle>
        <PolyLine NumPoints='2'>
            <Extent><Min X='0' Y='0'/><Max X='2' Y='1'/></Extent>
            <Coordinate X='0' Y='0'/>
            <Coordinate X='2' Y='1'/>
        </PolyLine>
    </Equipment>
    ";

    fn values(doc: &Document, eid: EId) -> Vec<(f64, f64)> {
        doc.descendants()
            .filter(|n| n.has_tag_name(eid))
            .map(|n| point(n).unwrap())
            .collect()
    }

    fn transform_all(doc: &mut Document, placement: &Placement) -> Result<(), Error> {
        let ids: Vec<_> = doc.root_element().children().map(|n| n.id()).collect();
        for id in ids {
            apply_transform(doc, id, placement)?;
        }
        Ok(())
    }

    #[test]
    fn identity() {
        let mut doc = Document::parse_str(TEMPLATE).unwrap();
        transform_all(&mut doc, &Placement::default()).unwrap();

        assert_eq!(values(&doc, EId::Location), [(1.0, 2.0)]);
        assert_eq!(values(&doc, EId::Coordinate), [(0.0, 0.0), (2.0, 1.0)]);
        assert_eq!(values(&doc, EId::Reference), [(1.0, 0.0)]);
        let circle = doc.root_element().first_child().unwrap();
        assert_eq!(circle.attribute::<f64>(AId::Radius), Some(4.0));
    }

    #[test]
    fn translate_and_scale() {
        let mut doc = Document::parse_str(TEMPLATE).unwrap();
        let placement = Placement {
            translate: Point::new(100.0, 200.0),
            reference: (1.0, 0.0),
            scale: (2.0, 3.0, 1.0),
        };
        transform_all(&mut doc, &placement).unwrap();

        assert_eq!(values(&doc, EId::Location), [(102.0, 206.0)]);
        assert_eq!(values(&doc, EId::Coordinate), [(100.0, 200.0), (104.0, 203.0)]);
        let circle = doc.root_element().first_child().unwrap();
        assert_eq!(circle.attribute::<f64>(AId::Radius), Some(8.0));
    }

    #[test]
    fn quarter_turn() {
        let mut doc = Document::parse_str(TEMPLATE).unwrap();
        let placement = Placement {
            translate: Point::new(10.0, 0.0),
            reference: (0.0, 1.0),
            scale: (1.0, 1.0, 1.0),
        };
        transform_all(&mut doc, &placement).unwrap();

        let location = values(&doc, EId::Location)[0];
        assert!((location.0 - 8.0).abs() < 1e-9);
        assert!((location.1 - 1.0).abs() < 1e-9);

        let reference = values(&doc, EId::Reference)[0];
        assert!(reference.0.abs() < 1e-9);
        assert!((reference.1 - 1.0).abs() < 1e-9);

        // (0,0)-(2,1) box turns into (9,0)-(10,2).
        let bounds = values(&doc, EId::Min)
            .into_iter()
            .chain(values(&doc, EId::Max))
            .collect::<Vec<_>>();
        assert!((bounds[0].0 - 9.0).abs() < 1e-9);
        assert!(bounds[0].1.abs() < 1e-9);
        assert!((bounds[1].0 - 10.0).abs() < 1e-9);
        assert!((bounds[1].1 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_rotation_reference() {
        let mut doc = Document::parse_str(TEMPLATE).unwrap();
        let placement = Placement {
            reference: (0.6, 0.9),
            ..Placement::default()
        };
        let err = transform_all(&mut doc, &placement).unwrap_err();
        assert!(matches!(err, Error::InvalidRotation(..)));
        assert_eq!(err.kind(), crate::ErrorKind::ValueOutOfDomain);
    }

    #[test]
    fn valid_rotation_reference() {
        let mut doc = Document::parse_str(TEMPLATE).unwrap();
        let placement = Placement {
            reference: (0.6, 0.8),
            ..Placement::default()
        };
        assert!(transform_all(&mut doc, &placement).is_ok());
    }

    #[test]
    fn placement_from_host() {
        let doc = Document::parse_str(
            "<Equipment ComponentName='PUMP01'>
                <Position>
                    <Location X='50' Y='60' Z='0'/>
                    <Axis X='0' Y='0' Z='1'/>
                    <Reference X='0.6' Y='0.8' Z='0'/>
                </Position>
                <Scale X='2' Y='2'/>
            </Equipment>",
        )
        .unwrap();
        let placement = Placement::from_node(doc.root_element()).unwrap();
        assert_eq!(placement.translate, Point::new(50.0, 60.0));
        assert_eq!(placement.reference, (0.6, 0.8));
        assert_eq!(placement.scale, (2.0, 2.0, 1.0));
    }
}
