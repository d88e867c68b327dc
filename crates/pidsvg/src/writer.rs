// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use strict_num::ApproxEqUlps;
use xmlwriter::XmlWriter;

use crate::*;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

impl Scene {
    /// Writes `Scene` as SVG.
    pub fn to_string(&self, opt: &WriteOptions) -> String {
        convert(self, opt)
    }
}

/// XML writing options.
#[derive(Clone, Copy, Debug)]
pub struct WriteOptions {
    /// Adds a millimeter grid with a specified step.
    ///
    /// Each 10th line is bold.
    ///
    /// Default: None
    pub grid: Option<u32>,

    /// Set the coordinates numeric precision.
    ///
    /// Smaller precision can lead to a malformed output in some cases.
    ///
    /// Default: 8
    pub coordinates_precision: u8,

    /// Use single quote marks instead of double quote.
    ///
    /// # Examples
    ///
    /// Before:
    ///
    /// ```text
    /// <line stroke="#000000"/>
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// <line stroke='#000000'/>
    /// ```
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// Default: 4 spaces
    pub indent: Indent,

    /// Set XML attributes indention.
    ///
    /// # Examples
    ///
    /// `Indent::Spaces(2)`
    ///
    /// Before:
    ///
    /// ```text
    /// <g>
    ///     <line stroke="#000000" stroke-width="0.5"/>
    /// </g>
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// <g>
    ///     <line
    ///       stroke="#000000"
    ///       stroke-width="0.5"/>
    /// </g>
    /// ```
    ///
    /// Default: `None`
    pub attributes_indent: Indent,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            grid: None,
            coordinates_precision: 8,
            use_single_quote: false,
            indent: Indent::Spaces(4),
            attributes_indent: Indent::None,
        }
    }
}

pub(crate) fn convert(scene: &Scene, opt: &WriteOptions) -> String {
    let mut xml = XmlWriter::new(xmlwriter::Options {
        use_single_quote: opt.use_single_quote,
        indent: opt.indent,
        attributes_indent: opt.attributes_indent,
    });

    let view_box = scene.view_box;

    xml.start_element("svg");
    xml.write_attribute("xmlns", SVG_NS);
    xml.write_num("width", scene.size.width(), opt);
    xml.write_num("height", scene.size.height(), opt);
    xml.write_viewbox(view_box, opt);

    if let Some(step) = opt.grid {
        write_grid_defs(step, opt, &mut xml);
    }

    if let Some(color) = scene.background {
        xml.start_element("rect");
        xml.write_rect_attrs(view_box, opt);
        xml.write_color("fill", color);
        xml.end_element();
    }

    if opt.grid.is_some() {
        xml.start_element("rect");
        xml.write_rect_attrs(view_box, opt);
        xml.write_attribute("fill", "url(#grid)");
        xml.end_element();
    }

    write_elements(&scene.root, opt, &mut xml);

    xml.end_document()
}

fn write_grid_defs(step: u32, opt: &WriteOptions, xml: &mut XmlWriter) {
    fn write_pattern(id: &str, size: f64, stroke_width: f64, opt: &WriteOptions, xml: &mut XmlWriter) {
        xml.start_element("pattern");
        xml.write_attribute("id", id);
        xml.write_num("width", size, opt);
        xml.write_num("height", size, opt);
        xml.write_attribute("patternUnits", "userSpaceOnUse");

        if id == "grid" {
            xml.start_element("rect");
            xml.write_num("width", size, opt);
            xml.write_num("height", size, opt);
            xml.write_attribute("fill", "url(#smallGrid)");
            xml.end_element();
        }

        let mut data = PathData::with_capacity(3);
        data.push_move_to(size, 0.0);
        data.push_line_to(0.0, 0.0);
        data.push_line_to(0.0, size);

        xml.start_element("path");
        xml.write_path_data(&data, opt);
        xml.write_attribute("fill", "none");
        xml.write_attribute("stroke", "gray");
        xml.write_num("stroke-width", stroke_width, opt);
        xml.end_element();

        xml.end_element();
    }

    let step = step as f64;
    xml.start_element("defs");
    write_pattern("smallGrid", step, 0.5, opt, xml);
    write_pattern("grid", step * 10.0, 1.0, opt, xml);
    xml.end_element();
}

fn write_elements(parent: &Group, opt: &WriteOptions, xml: &mut XmlWriter) {
    for n in &parent.children {
        write_element(n, opt, xml);
    }
}

fn write_element(node: &Node, opt: &WriteOptions, xml: &mut XmlWriter) {
    match node {
        Node::Group(ref g) => {
            xml.start_element("g");
            if !g.id.is_empty() {
                xml.write_attribute("id", &escape_attribute(&g.id));
            }

            xml.write_attribute("class", &escape_attribute(&g.kind));

            if let Some(ref v) = g.component_class {
                xml.write_attribute("data-component-class", &escape_attribute(v));
            }

            if let Some(ref v) = g.component_name {
                xml.write_attribute("data-component-name", &escape_attribute(v));
            }

            if let Some(ref v) = g.tag_name {
                xml.write_attribute("data-tag-name", &escape_attribute(v));
            }

            write_elements(g, opt, xml);
            xml.end_element();
        }
        Node::Line(ref line) => {
            xml.start_element("line");
            xml.write_num("x1", line.x1, opt);
            xml.write_num("y1", line.y1, opt);
            xml.write_num("x2", line.x2, opt);
            xml.write_num("y2", line.y2, opt);
            xml.write_stroke(&line.stroke, opt);
            xml.end_element();
        }
        Node::Path(ref path) => {
            xml.start_element("path");
            xml.write_path_data(&path.data, opt);
            xml.write_fill(path.fill);
            xml.write_stroke(&path.stroke, opt);
            xml.write_transform("transform", path.transform, opt);
            xml.end_element();
        }
        Node::Circle(ref circle) => {
            xml.start_element("circle");
            xml.write_num("cx", circle.cx, opt);
            xml.write_num("cy", circle.cy, opt);
            xml.write_num("r", circle.r, opt);
            xml.write_fill(circle.fill);
            xml.write_stroke(&circle.stroke, opt);
            xml.end_element();
        }
        Node::Rectangle(ref rect) => {
            xml.start_element("rect");
            xml.write_rect_attrs(rect.rect, opt);
            xml.write_fill(None);
            xml.write_stroke(&rect.stroke, opt);
            xml.write_attribute("onmouseover", "evt.target.setAttribute('fill', 'blue');");
            xml.write_attribute("onmouseout", "evt.target.setAttribute('fill', 'none');");
            xml.end_element();
        }
        Node::Text(ref text) => write_text(text, opt, xml),
    }
}

fn write_text(text: &Text, opt: &WriteOptions, xml: &mut XmlWriter) {
    xml.start_element("text");
    xml.write_num("x", text.x, opt);
    xml.write_num("y", text.y, opt);

    if let Some(ref family) = text.font_family {
        xml.write_attribute("font-family", &escape_attribute(family));
    }

    xml.write_num("font-size", text.font_size, opt);

    match text.anchor {
        TextAnchor::Start => {}
        TextAnchor::Middle => xml.write_attribute("text-anchor", "middle"),
        TextAnchor::End => xml.write_attribute("text-anchor", "end"),
    }

    xml.write_attribute(
        "dominant-baseline",
        match text.baseline {
            DominantBaseline::Alphabetic => "alphabetic",
            DominantBaseline::Middle => "middle",
            DominantBaseline::Hanging => "hanging",
        },
    );

    if !text.rotation.approx_eq_ulps(&0.0, 4) {
        xml.write_attribute_raw("transform", |buf| {
            buf.extend_from_slice(b"rotate(");
            write_num(text.rotation, buf, opt.coordinates_precision);
            buf.push(b' ');
            write_num(text.x, buf, opt.coordinates_precision);
            buf.push(b' ');
            write_num(text.y, buf, opt.coordinates_precision);
            buf.push(b')');
        });
    }

    if let Some(color) = text.fill {
        xml.write_color("fill", color);
    }

    // Any indention would become a part of the text.
    xml.set_preserve_whitespaces(true);
    xml.write_text(&text.text.replace('&', "&amp;"));

    for span in &text.spans {
        xml.start_element("tspan");
        xml.write_num("x", span.x, opt);
        xml.write_num("dy", span.dy, opt);
        xml.write_text(&span.text.replace('&', "&amp;"));
        xml.end_element();
    }

    xml.end_element();
    xml.set_preserve_whitespaces(false);
}

// `xmlwriter` escapes only the quote character in attribute values.
fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;")
}

trait XmlWriterExt {
    fn write_num(&mut self, name: &str, n: f64, opt: &WriteOptions);
    fn write_color(&mut self, name: &str, color: Color);
    fn write_viewbox(&mut self, view_box: Rect, opt: &WriteOptions);
    fn write_rect_attrs(&mut self, r: Rect, opt: &WriteOptions);
    fn write_transform(&mut self, name: &str, ts: Transform, opt: &WriteOptions);
    fn write_numbers(&mut self, name: &str, list: &[f64], opt: &WriteOptions);
    fn write_path_data(&mut self, data: &PathData, opt: &WriteOptions);
    fn write_fill(&mut self, fill: Option<Color>);
    fn write_stroke(&mut self, stroke: &Stroke, opt: &WriteOptions);
}

impl XmlWriterExt for XmlWriter {
    #[inline(never)]
    fn write_num(&mut self, name: &str, n: f64, opt: &WriteOptions) {
        self.write_attribute_raw(name, |buf| write_num(n, buf, opt.coordinates_precision));
    }

    #[inline(never)]
    fn write_color(&mut self, name: &str, c: Color) {
        static CHARS: &[u8] = b"0123456789ABCDEF";

        #[inline]
        fn int2hex(n: u8) -> (u8, u8) {
            (CHARS[(n >> 4) as usize], CHARS[(n & 0xf) as usize])
        }

        let (r1, r2) = int2hex(c.red);
        let (g1, g2) = int2hex(c.green);
        let (b1, b2) = int2hex(c.blue);

        self.write_attribute_raw(name, |buf| {
            buf.extend_from_slice(&[b'#', r1, r2, g1, g2, b1, b2])
        });
    }

    fn write_viewbox(&mut self, r: Rect, opt: &WriteOptions) {
        self.write_numbers("viewBox", &[r.x, r.y, r.width, r.height], opt);
    }

    fn write_rect_attrs(&mut self, r: Rect, opt: &WriteOptions) {
        self.write_num("x", r.x, opt);
        self.write_num("y", r.y, opt);
        self.write_num("width", r.width, opt);
        self.write_num("height", r.height, opt);
    }

    fn write_transform(&mut self, name: &str, ts: Transform, opt: &WriteOptions) {
        if !ts.is_default() {
            self.write_attribute_raw(name, |buf| {
                buf.extend_from_slice(b"matrix(");
                write_list(&[ts.a, ts.b, ts.c, ts.d, ts.e, ts.f], buf, opt);
                buf.extend_from_slice(b")");
            });
        }
    }

    fn write_numbers(&mut self, name: &str, list: &[f64], opt: &WriteOptions) {
        self.write_attribute_raw(name, |buf| write_list(list, buf, opt));
    }

    fn write_path_data(&mut self, data: &PathData, opt: &WriteOptions) {
        let precision = opt.coordinates_precision;
        self.write_attribute_raw("d", |buf| {
            for seg in data.iter() {
                match *seg {
                    PathSegment::MoveTo { x, y } => {
                        buf.extend_from_slice(b"M ");
                        write_list(&[x, y], buf, opt);
                    }
                    PathSegment::LineTo { x, y } => {
                        buf.extend_from_slice(b"L ");
                        write_list(&[x, y], buf, opt);
                    }
                    PathSegment::ArcTo {
                        rx,
                        ry,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                        x,
                        y,
                    } => {
                        buf.extend_from_slice(b"A ");
                        write_list(&[rx, ry, x_axis_rotation], buf, opt);
                        buf.push(b' ');
                        buf.push(if large_arc { b'1' } else { b'0' });
                        buf.push(b' ');
                        buf.push(if sweep { b'1' } else { b'0' });
                        buf.push(b' ');
                        write_num(x, buf, precision);
                        buf.push(b' ');
                        write_num(y, buf, precision);
                    }
                    PathSegment::ClosePath => {
                        buf.push(b'Z');
                    }
                }

                buf.push(b' ');
            }

            buf.pop();
        });
    }

    fn write_fill(&mut self, fill: Option<Color>) {
        match fill {
            Some(color) => self.write_color("fill", color),
            None => self.write_attribute("fill", "none"),
        }
    }

    fn write_stroke(&mut self, stroke: &Stroke, opt: &WriteOptions) {
        self.write_color("stroke", stroke.color);
        self.write_num("stroke-width", stroke.width, opt);

        if let Some(ref list) = stroke.dasharray {
            self.write_numbers("stroke-dasharray", list, opt);
        }
    }
}

fn write_list(list: &[f64], buf: &mut Vec<u8>, opt: &WriteOptions) {
    for n in list {
        write_num(*n, buf, opt.coordinates_precision);
        buf.push(b' ');
    }

    if !list.is_empty() {
        buf.pop();
    }
}

static POW_VEC: &[f64] = &[
    1.0,
    10.0,
    100.0,
    1_000.0,
    10_000.0,
    100_000.0,
    1_000_000.0,
    10_000_000.0,
    100_000_000.0,
    1_000_000_000.0,
    10_000_000_000.0,
    100_000_000_000.0,
    1_000_000_000_000.0,
];

fn write_num(num: f64, buf: &mut Vec<u8>, precision: u8) {
    let precision = (precision as usize).min(POW_VEC.len() - 1);

    // Round numbers up to the specified precision to prevent writing
    // ugly numbers like 29.999999999999996.
    let v = (num * POW_VEC[precision]).round() / POW_VEC[precision];

    if v.fract().approx_eq_ulps(&0.0, 4) && v.abs() < i64::MAX as f64 {
        buf.extend_from_slice((v as i64).to_string().as_bytes());
    } else {
        buf.extend_from_slice(v.to_string().as_bytes());
    }
}
