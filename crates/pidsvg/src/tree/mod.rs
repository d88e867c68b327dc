// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A scene tree produced by the converter.
//!
//! All coordinates are in output units, with the Y axis pointing down.
//! Nodes are immutable once created.

mod path;

pub use path::{PathData, PathSegment};

use crate::{Rect, Size, Transform};

/// An 8-bit RGB color.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Constructs a new `Color` from RGB values.
    #[inline]
    pub fn new_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }

    /// Constructs a new `Color` set to red.
    #[inline]
    pub fn red() -> Color {
        Color::new_rgb(255, 0, 0)
    }
}

/// Formats a color as an uppercase `#RRGGBB` string.
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// A stroke style.
#[derive(Clone, PartialEq, Debug)]
pub struct Stroke {
    pub(crate) color: Color,
    pub(crate) width: f64,
    pub(crate) dasharray: Option<Vec<f64>>,
}

impl Stroke {
    /// Stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Stroke width in output units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Stroke dash array.
    ///
    /// `None` for solid lines. Never an empty list.
    pub fn dasharray(&self) -> Option<&[f64]> {
        self.dasharray.as_deref()
    }
}

/// Node's kind.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub enum Node {
    Group(Box<Group>),
    Line(Box<Line>),
    Path(Box<Path>),
    Circle(Box<Circle>),
    Rectangle(Box<Rectangle>),
    Text(Box<Text>),
}

/// A group container.
///
/// The only node that can have children.
/// Mirrors a container element of the source document.
///
/// `g` element in SVG.
#[derive(Clone, Debug)]
pub struct Group {
    pub(crate) id: String,
    pub(crate) kind: String,
    pub(crate) component_class: Option<String>,
    pub(crate) component_name: Option<String>,
    pub(crate) tag_name: Option<String>,
    pub(crate) children: Vec<Node>,
}

impl Group {
    pub(crate) fn empty() -> Self {
        Group {
            id: String::new(),
            kind: String::new(),
            component_class: None,
            component_name: None,
            tag_name: None,
            children: Vec::new(),
        }
    }

    /// Element identifier.
    ///
    /// Copied from the source element `ID` attribute. Can be empty.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Source element name, like `Equipment` or `Nozzle`.
    ///
    /// Empty for the scene root.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Source `ComponentClass` attribute.
    pub fn component_class(&self) -> Option<&str> {
        self.component_class.as_deref()
    }

    /// Source `ComponentName` attribute.
    pub fn component_name(&self) -> Option<&str> {
        self.component_name.as_deref()
    }

    /// Source `TagName` attribute.
    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    /// Group's children.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Checks if the current group has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A straight line segment.
///
/// `line` element in SVG.
#[derive(Clone, Debug)]
pub struct Line {
    pub(crate) x1: f64,
    pub(crate) y1: f64,
    pub(crate) x2: f64,
    pub(crate) y2: f64,
    pub(crate) stroke: Stroke,
}

impl Line {
    /// Start point.
    pub fn start(&self) -> (f64, f64) {
        (self.x1, self.y1)
    }

    /// End point.
    pub fn end(&self) -> (f64, f64) {
        (self.x2, self.y2)
    }

    /// Line stroke.
    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }
}

/// An open or closed path.
///
/// `path` element in SVG.
#[derive(Clone, Debug)]
pub struct Path {
    pub(crate) data: PathData,
    pub(crate) stroke: Stroke,
    pub(crate) fill: Option<Color>,
    pub(crate) transform: Transform,
}

impl Path {
    /// Path segments.
    pub fn data(&self) -> &PathData {
        &self.data
    }

    /// Path stroke.
    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    /// Fill color. `None` when the path is not filled.
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// Path transform.
    ///
    /// Set only for paths defined in a mirrored frame, like arcs.
    pub fn transform(&self) -> Transform {
        self.transform
    }
}

/// A circle.
///
/// `circle` element in SVG.
#[derive(Clone, Debug)]
pub struct Circle {
    pub(crate) cx: f64,
    pub(crate) cy: f64,
    pub(crate) r: f64,
    pub(crate) stroke: Stroke,
    pub(crate) fill: Option<Color>,
}

impl Circle {
    /// Center point.
    pub fn center(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.r
    }

    /// Circle stroke.
    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    /// Fill color. `None` when the circle is not filled.
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }
}

/// A bounding box overlay.
///
/// Produced only in debug mode.
///
/// `rect` element in SVG.
#[derive(Clone, Debug)]
pub struct Rectangle {
    pub(crate) rect: Rect,
    pub(crate) stroke: Stroke,
}

impl Rectangle {
    /// Rectangle geometry.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Rectangle stroke.
    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }
}

/// A horizontal text alignment.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A vertical text alignment.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DominantBaseline {
    Alphabetic,
    Middle,
    Hanging,
}

/// A text run.
///
/// `text` element in SVG.
#[derive(Clone, Debug)]
pub struct Text {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) font_family: Option<String>,
    pub(crate) font_size: f64,
    pub(crate) anchor: TextAnchor,
    pub(crate) baseline: DominantBaseline,
    pub(crate) rotation: f64,
    pub(crate) fill: Option<Color>,
    pub(crate) text: String,
    pub(crate) spans: Vec<TextSpan>,
}

impl Text {
    /// Anchor point.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Font family as set in the source document.
    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    /// Font size in output units.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Horizontal alignment.
    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    /// Vertical alignment.
    pub fn baseline(&self) -> DominantBaseline {
        self.baseline
    }

    /// Clockwise rotation around the anchor point, in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Fill color. `None` means a renderer default.
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// The first text line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Continuation lines.
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }
}

/// A continuation line of a text run.
///
/// `tspan` element in SVG.
#[derive(Clone, Debug)]
pub struct TextSpan {
    pub(crate) x: f64,
    pub(crate) dy: f64,
    pub(crate) text: String,
}

impl TextSpan {
    /// Absolute horizontal position.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical offset from the previous line.
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Line content.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A scene tree.
#[derive(Clone, Debug)]
pub struct Scene {
    pub(crate) size: Size,
    pub(crate) view_box: Rect,
    pub(crate) background: Option<Color>,
    pub(crate) root: Group,
}

impl Scene {
    /// Drawing size.
    ///
    /// Equals to the scaled bounding box of the plant model.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Drawing view box.
    pub fn view_box(&self) -> Rect {
        self.view_box
    }

    /// Canvas background color.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Root group.
    pub fn root(&self) -> &Group {
        &self.root
    }
}
