// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pidtree::{AId, EId, Node};

use super::{color, Context, Error, NodeExt};
use crate::tree::{self, DominantBaseline, TextAnchor, TextSpan};

const DEFAULT_JUSTIFICATION: &str = "LeftBottom";

pub(crate) fn convert(node: Node, ctx: &Context) -> Result<Option<tree::Node>, Error> {
    let content = match node.attribute::<&str>(AId::String) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    let justification = node
        .attribute::<&str>(AId::Justification)
        .unwrap_or(DEFAULT_JUSTIFICATION);
    let (anchor, baseline) = parse_justification(justification)?;

    // Rounded to 0.1 of an output unit.
    let height: f64 = node.required_attribute(AId::Height)?;
    let font_size = (ctx.convert_length(height) * 10.0).round() / 10.0;

    let location = node
        .required_child(EId::Position)?
        .required_child(EId::Location)?;
    let pos = ctx.convert_point(
        location.required_attribute(AId::X)?,
        location.required_attribute(AId::Y)?,
    );

    // Source angles are counterclockwise, while SVG ones are clockwise.
    let rotation = match node.optional_attribute::<f64>(AId::TextAngle)? {
        Some(angle) if angle != 0.0 => -angle,
        _ => 0.0,
    };

    let fill = match node.child_by_tag(EId::Presentation) {
        Some(presentation) => Some(color(presentation)?),
        None => None,
    };

    let font_family = node
        .attribute::<&str>(AId::Font)
        .filter(|s| !s.trim().is_empty())
        .map(String::from);

    let mut lines = split_lines(content).into_iter();
    let text = lines.next().unwrap_or_default().to_string();
    let spans = lines
        .map(|line| TextSpan {
            x: pos.x,
            dy: font_size,
            text: line.to_string(),
        })
        .collect();

    Ok(Some(tree::Node::Text(Box::new(tree::Text {
        x: pos.x,
        y: pos.y,
        font_family,
        font_size,
        anchor,
        baseline,
        rotation,
        fill,
        text,
        spans,
    }))))
}

/// Parses a `Justification` value, like `CenterCenter`.
///
/// The first part sets a horizontal alignment, the second one a vertical.
fn parse_justification(value: &str) -> Result<(TextAnchor, DominantBaseline), Error> {
    let (anchor, rest) = if let Some(rest) = value.strip_prefix("Left") {
        (TextAnchor::Start, rest)
    } else if let Some(rest) = value.strip_prefix("Center") {
        (TextAnchor::Middle, rest)
    } else if let Some(rest) = value.strip_prefix("Right") {
        (TextAnchor::End, rest)
    } else {
        return Err(Error::UnknownJustification(value.to_string()));
    };

    let baseline = match rest {
        "Top" => DominantBaseline::Alphabetic,
        "Center" => DominantBaseline::Middle,
        "Bottom" => DominantBaseline::Hanging,
        _ => return Err(Error::UnknownJustification(value.to_string())),
    };

    Ok((anchor, baseline))
}

/// Splits text into lines.
///
/// `\r\n`, `\n`, `\r` and an escaped `\n` sequence are all treated as line breaks.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let len = match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => 2,
            b'\r' | b'\n' => 1,
            b'\\' if bytes.get(i + 1) == Some(&b'n') => 2,
            _ => 0,
        };

        if len == 0 {
            i += 1;
        } else {
            // Separators are ASCII, so we are always at a char boundary.
            lines.push(&text[start..i]);
            i += len;
            start = i;
        }
    }

    lines.push(&text[start..]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context<'static> {
        Context {
            x_min: 0.0,
            x_max: 100.0,
            y_min: 0.0,
            y_max: 50.0,
            units: crate::Units::Millimetre,
            origin: String::new(),
            debug: false,
            catalog: None,
        }
    }

    fn convert_str(text: &str) -> Result<Option<tree::Node>, Error> {
        let doc = pidtree::Document::parse_str(text).unwrap();
        convert(doc.root_element(), &context())
    }

    macro_rules! test_split {
        ($name:ident, $text:expr, $result:expr) => {
            #[test]
            fn $name() {
                assert_eq!(split_lines($text), $result);
            }
        };
    }

    test_split!(split_single, "P-101", ["P-101"]);
    test_split!(split_lf, "A\nB", ["A", "B"]);
    test_split!(split_crlf, "A\r\nB", ["A", "B"]);
    test_split!(split_cr, "A\rB\rC", ["A", "B", "C"]);
    test_split!(split_escaped, "A\\nB", ["A", "B"]);
    test_split!(split_trailing, "A\n", ["A", ""]);
    test_split!(split_unicode, "Ø 50\nΔp", ["Ø 50", "Δp"]);

    macro_rules! test_justification {
        ($name:ident, $text:expr, $anchor:expr, $baseline:expr) => {
            #[test]
            fn $name() {
                assert_eq!(parse_justification($text).unwrap(), ($anchor, $baseline));
            }
        };
    }

    test_justification!(justification_lb, "LeftBottom", TextAnchor::Start, DominantBaseline::Hanging);
    test_justification!(justification_cc, "CenterCenter", TextAnchor::Middle, DominantBaseline::Middle);
    test_justification!(justification_rt, "RightTop", TextAnchor::End, DominantBaseline::Alphabetic);

    #[test]
    fn justification_unknown() {
        assert!(matches!(
            parse_justification("MiddleBottom"),
            Err(Error::UnknownJustification(_))
        ));
        assert!(matches!(
            parse_justification("LeftMiddle"),
            Err(Error::UnknownJustification(_))
        ));
    }

    #[test]
    fn multiline_text() {
        let node = convert_str(
            "<Text String='P-101&#10;A' Height='2.54' Justification='CenterCenter' Font='Arial' TextAngle='90'>
                <Presentation R='0' G='0' B='1'/>
                <Position><Location X='10' Y='20'/></Position>
            </Text>",
        )
        .unwrap()
        .unwrap();
        let text = match node {
            tree::Node::Text(ref text) => text,
            _ => unreachable!(),
        };

        assert_eq!(text.position(), (10.0, 30.0));
        assert_eq!(text.font_size(), 2.5);
        assert_eq!(text.font_family(), Some("Arial"));
        assert_eq!(text.rotation(), -90.0);
        assert_eq!(text.anchor(), TextAnchor::Middle);
        assert_eq!(text.fill(), Some(crate::Color::new_rgb(0, 0, 255)));
        assert_eq!(text.text(), "P-101");
        assert_eq!(text.spans().len(), 1);
        assert_eq!(text.spans()[0].text(), "A");
        assert_eq!(text.spans()[0].x(), 10.0);
        assert_eq!(text.spans()[0].dy(), 2.5);
    }

    #[test]
    fn default_justification() {
        let node = convert_str(
            "<Text String='T' Height='3'>
                <Position><Location X='0' Y='0'/></Position>
            </Text>",
        )
        .unwrap()
        .unwrap();
        let text = match node {
            tree::Node::Text(ref text) => text,
            _ => unreachable!(),
        };
        assert_eq!(text.anchor(), TextAnchor::Start);
        assert_eq!(text.baseline(), DominantBaseline::Hanging);
        assert_eq!(text.rotation(), 0.0);
        assert_eq!(text.fill(), None);
        assert_eq!(text.font_family(), None);
    }

    #[test]
    fn no_string() {
        assert!(convert_str("<Text Height='3'/>").unwrap().is_none());
        assert!(convert_str("<Text String='' Height='3'/>").unwrap().is_none());
    }

    #[test]
    fn missing_height() {
        let err = convert_str(
            "<Text String='T'>
                <Position><Location X='0' Y='0'/></Position>
            </Text>",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidAttribute {
                attribute: AId::Height,
                ..
            }
        ));
    }
}
