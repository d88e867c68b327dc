// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pidtree::{AId, EId, Node};

use super::style::{inherited_presentation, is_filled, own_presentation, resolve_stroke};
use super::{Context, Error, NodeExt};
use crate::geom::polar_to_cartesian;
use crate::tree::{self, Color, PathData, Stroke};
use crate::{Point, Rect, Transform};

pub(crate) fn convert_line(node: Node, ctx: &Context) -> Result<Option<tree::Node>, Error> {
    let points = coordinates(node, ctx)?;
    if points.len() != 2 {
        return Err(Error::InvalidCoordinatesCount {
            element: node.tag_name_str().to_string(),
            expected: "exactly 2",
            found: points.len(),
        });
    }

    let stroke = resolve_stroke(own_presentation(node)?, ctx)?;

    Ok(Some(tree::Node::Line(Box::new(tree::Line {
        x1: points[0].x,
        y1: points[0].y,
        x2: points[1].x,
        y2: points[1].y,
        stroke,
    }))))
}

/// Converts `PolyLine`, `CenterLine` and `Shape`.
///
/// A `Shape` is closed.
pub(crate) fn convert_polyline(
    node: Node,
    parent: Option<Node>,
    closed: bool,
    ctx: &Context,
) -> Result<Option<tree::Node>, Error> {
    let points = coordinates(node, ctx)?;
    if points.is_empty() {
        return Err(Error::InvalidCoordinatesCount {
            element: node.tag_name_str().to_string(),
            expected: "at least 1",
            found: 0,
        });
    }

    let stroke = resolve_stroke(inherited_presentation(node, parent)?, ctx)?;
    let fill = fill(node, &stroke);

    let mut data = PathData::with_capacity(points.len() + 1);
    data.push_move_to(points[0].x, points[0].y);
    for p in &points[1..] {
        data.push_line_to(p.x, p.y);
    }

    if closed {
        data.push_close_path();
    }

    Ok(Some(tree::Node::Path(Box::new(tree::Path {
        data,
        stroke,
        fill,
        transform: Transform::default(),
    }))))
}

pub(crate) fn convert_circle(node: Node, ctx: &Context) -> Result<Option<tree::Node>, Error> {
    let stroke = resolve_stroke(own_presentation(node)?, ctx)?;
    let (x, y) = location(node)?;
    let center = ctx.convert_point(x, y);
    let r = ctx.convert_length(node.required_attribute(AId::Radius)?);
    let fill = fill(node, &stroke);

    Ok(Some(tree::Node::Circle(Box::new(tree::Circle {
        cx: center.x,
        cy: center.y,
        r,
        stroke,
        fill,
    }))))
}

/// Converts a `TrimmedCurve` into an arc.
///
/// Only circle based curves are supported.
pub(crate) fn convert_trimmed_curve(node: Node, ctx: &Context) -> Result<Option<tree::Node>, Error> {
    if node.child_by_tag(EId::Ellipse).is_some() {
        return Err(Error::NotImplemented("ellipse based TrimmedCurve"));
    }

    let circle = node.required_child(EId::Circle)?;
    let start_angle: f64 = node.required_attribute(AId::StartAngle)?;
    let end_angle: f64 = node.required_attribute(AId::EndAngle)?;

    let presentation = match node.child_by_tag(EId::Presentation) {
        Some(presentation) => presentation,
        None => own_presentation(circle)?,
    };
    let stroke = resolve_stroke(presentation, ctx)?;

    // The arc is built in a scaled Y-up frame and mirrored by the path transform,
    // so angles keep their counterclockwise meaning.
    let (x, y) = location(circle)?;
    let center = Point::new(ctx.convert_length(x), ctx.convert_length(y));
    let r = ctx.convert_length(circle.required_attribute(AId::Radius)?);

    let start = polar_to_cartesian(center, r, end_angle);
    let end = polar_to_cartesian(center, r, start_angle);
    let large_arc = end_angle - start_angle > 180.0;

    let mut data = PathData::with_capacity(2);
    data.push_move_to(start.x, start.y);
    data.push_arc_to(r, large_arc, false, end.x, end.y);

    Ok(Some(tree::Node::Path(Box::new(tree::Path {
        data,
        stroke,
        fill: None,
        transform: Transform::new_flip(ctx.y_max),
    }))))
}

/// Converts an element `Extent` into a bounding box overlay.
///
/// Returns `None` when the element doesn't have a complete extent.
pub(crate) fn convert_extent(node: Node, ctx: &Context) -> Option<tree::Node> {
    let extent = node.child_by_tag(EId::Extent)?;
    let min = extent.child_by_tag(EId::Min)?;
    let max = extent.child_by_tag(EId::Max)?;

    let p1 = ctx.convert_point(min.attribute(AId::X)?, min.attribute(AId::Y)?);
    let p2 = ctx.convert_point(max.attribute(AId::X)?, max.attribute(AId::Y)?);
    let rect = Rect::from_points([p1, p2])?;

    Some(tree::Node::Rectangle(Box::new(tree::Rectangle {
        rect,
        stroke: Stroke {
            color: Color::red(),
            width: 0.1,
            dasharray: None,
        },
    })))
}

fn coordinates(node: Node, ctx: &Context) -> Result<Vec<Point>, Error> {
    node.children_by_tag(EId::Coordinate)
        .map(|c| {
            let x = c.required_attribute(AId::X)?;
            let y = c.required_attribute(AId::Y)?;
            Ok(ctx.convert_point(x, y))
        })
        .collect()
}

fn location(node: Node) -> Result<(f64, f64), Error> {
    let location = node.required_child(EId::Position)?.required_child(EId::Location)?;
    Ok((
        location.required_attribute(AId::X)?,
        location.required_attribute(AId::Y)?,
    ))
}

fn fill(node: Node, stroke: &Stroke) -> Option<Color> {
    if is_filled(node) {
        Some(stroke.color)
    } else {
        None
    }
}
