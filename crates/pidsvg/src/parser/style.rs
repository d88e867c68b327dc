// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pidtree::{AId, EId, Node};
use strict_num::NormalizedF64;

use super::{Context, Error, NodeExt};
use crate::tree::{Color, Stroke};

/// A Proteus line type.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineType {
    Solid,
    Dotted,
    Dashed,
    LongDash,
    LongDashShortDash,
    ShortDash,
    LongDashShortDashShortDash,
    DashShortDash,
}

impl LineType {
    /// Returns a dash/gap sequence in source units.
    ///
    /// Empty for solid lines.
    pub fn dasharray(&self) -> &'static [f64] {
        match self {
            LineType::Solid => &[],
            LineType::Dotted => &[1.0],
            LineType::Dashed => &[3.0],
            LineType::LongDash => &[4.0, 1.0],
            LineType::LongDashShortDash => &[4.0, 1.0, 2.0, 1.0],
            LineType::ShortDash => &[2.0, 1.0],
            LineType::LongDashShortDashShortDash => &[4.0, 1.0, 2.0, 1.0, 2.0, 1.0],
            LineType::DashShortDash => &[3.0, 1.0, 2.0, 1.0],
        }
    }
}

impl Default for LineType {
    fn default() -> Self {
        LineType::Solid
    }
}

impl std::str::FromStr for LineType {
    type Err = Error;

    /// Parses a numeric code or a case-insensitive name.
    fn from_str(text: &str) -> Result<Self, Error> {
        let normalized = text.trim().to_ascii_lowercase();
        let line_type = match normalized.as_str() {
            "0" | "solid" => LineType::Solid,
            "1" | "dotted" => LineType::Dotted,
            "2" | "dashed" => LineType::Dashed,
            "3" | "long dash" => LineType::LongDash,
            "4"
            | "long dash + short dash"
            | "centerline"
            | "long dash + short dash, centerline" => LineType::LongDashShortDash,
            "5" | "short dash" => LineType::ShortDash,
            "6" | "long dash + short dash + short dash" => LineType::LongDashShortDashShortDash,
            "7" | "dash + short dash" => LineType::DashShortDash,
            _ => return Err(Error::UnknownLineType(text.to_string())),
        };

        Ok(line_type)
    }
}

/// Resolves a `Presentation` element color.
///
/// `R`, `G` and `B` attributes are required and must be in a `0..=1` range.
pub fn color(presentation: Node) -> Result<Color, Error> {
    rgb_color(
        presentation.required_attribute(AId::R)?,
        presentation.required_attribute(AId::G)?,
        presentation.required_attribute(AId::B)?,
    )
}

/// Converts normalized color channels into a [`Color`].
pub fn rgb_color(r: f64, g: f64, b: f64) -> Result<Color, Error> {
    fn channel(n: f64) -> Result<u8, Error> {
        let n = NormalizedF64::new(n).ok_or(Error::ColorOutOfRange(n))?;
        Ok((n.get() * 255.0).floor() as u8)
    }

    Ok(Color::new_rgb(channel(r)?, channel(g)?, channel(b)?))
}

/// Resolves a `Presentation` element dash pattern.
///
/// Uses `fallback` when `LineType` is not set.
pub fn dash_pattern(presentation: Node, fallback: LineType) -> Result<&'static [f64], Error> {
    let line_type = match presentation.raw_attribute(AId::LineType) {
        Some(value) => value.parse()?,
        None => fallback,
    };

    Ok(line_type.dasharray())
}

/// Returns the element's own `Presentation`.
pub(crate) fn own_presentation<'a>(node: Node<'a>) -> Result<Node<'a>, Error> {
    node.required_child(EId::Presentation)
}

/// Returns the element's own `Presentation` or the one of its parent.
pub(crate) fn inherited_presentation<'a>(
    node: Node<'a>,
    parent: Option<Node<'a>>,
) -> Result<Node<'a>, Error> {
    node.child_by_tag(EId::Presentation)
        .or_else(|| parent.and_then(|p| p.child_by_tag(EId::Presentation)))
        .ok_or_else(|| Error::MissingElement {
            parent: node.tag_name_str().to_string(),
            child: EId::Presentation,
        })
}

pub(crate) fn resolve_stroke(presentation: Node, ctx: &Context) -> Result<Stroke, Error> {
    let color = color(presentation)?;
    let width = ctx.convert_length(presentation.required_attribute::<f64>(AId::LineWeight)?);
    let dashes = dash_pattern(presentation, LineType::Solid)?;
    let dasharray = if dashes.is_empty() {
        None
    } else {
        Some(dashes.iter().map(|n| ctx.convert_length(*n)).collect())
    };

    Ok(Stroke {
        color,
        width,
        dasharray,
    })
}

/// Checks the `Filled` flag.
pub(crate) fn is_filled(node: Node) -> bool {
    match node.attribute::<&str>(AId::Filled) {
        Some(value) => {
            let value = value.trim();
            !(value.is_empty()
                || value.eq_ignore_ascii_case("false")
                || value.eq_ignore_ascii_case("none")
                || value == "0")
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_color {
        ($name:ident, $r:expr, $g:expr, $b:expr, $result:expr) => {
            #[test]
            fn $name() {
                assert_eq!(rgb_color($r, $g, $b).unwrap().to_string(), $result);
            }
        };
    }

    test_color!(color_white, 1.0, 1.0, 1.0, "#FFFFFF");
    test_color!(color_black, 0.0, 0.0, 0.0, "#000000");
    test_color!(color_red, 1.0, 0.0, 0.0, "#FF0000");
    test_color!(color_floor, 0.5, 0.25, 0.999, "#7F3FFE");

    macro_rules! test_color_err {
        ($name:ident, $r:expr, $g:expr, $b:expr) => {
            #[test]
            fn $name() {
                let err = rgb_color($r, $g, $b).unwrap_err();
                assert_eq!(err.kind(), crate::ErrorKind::ValueOutOfDomain);
            }
        };
    }

    test_color_err!(color_negative, -0.1, 0.0, 0.0);
    test_color_err!(color_too_big, 0.0, 1.01, 0.0);
    test_color_err!(color_nan, 0.0, 0.0, f64::NAN);

    #[test]
    fn color_is_stable() {
        let c1 = rgb_color(0.3, 0.6, 0.9).unwrap();
        let c2 = rgb_color(0.3, 0.6, 0.9).unwrap();
        assert_eq!(c1, c2);
    }

    macro_rules! test_line_type {
        ($name:ident, $text:expr, $result:expr) => {
            #[test]
            fn $name() {
                let line_type: LineType = $text.parse().unwrap();
                assert_eq!(line_type.dasharray(), $result);
            }
        };
    }

    test_line_type!(line_type_0, "0", &[] as &[f64]);
    test_line_type!(line_type_1, "1", &[1.0]);
    test_line_type!(line_type_2, "2", &[3.0]);
    test_line_type!(line_type_4, "4", &[4.0, 1.0, 2.0, 1.0]);
    test_line_type!(line_type_7, "7", &[3.0, 1.0, 2.0, 1.0]);
    test_line_type!(line_type_name, "Long Dash", &[4.0, 1.0]);
    test_line_type!(line_type_name_case, "SHORT DASH", &[2.0, 1.0]);
    test_line_type!(line_type_center_line, "CenterLine", &[4.0, 1.0, 2.0, 1.0]);

    #[test]
    fn line_type_unknown() {
        assert!(matches!(
            "9".parse::<LineType>(),
            Err(Error::UnknownLineType(_))
        ));
    }

    #[test]
    fn dash_pattern_fallback() {
        let doc = pidtree::Document::parse_str(
            "<Line><Presentation R='0' G='0' B='0'/><Presentation LineType='5'/></Line>",
        )
        .unwrap();
        let mut iter = doc.root_element().children();
        let first = iter.next().unwrap();
        let second = iter.next().unwrap();
        assert_eq!(dash_pattern(first, LineType::Dashed).unwrap(), &[3.0]);
        assert_eq!(dash_pattern(second, LineType::Dashed).unwrap(), &[2.0, 1.0]);
    }

    #[test]
    fn presentation_fallback() {
        let doc = pidtree::Document::parse_str(
            "<PipingNetworkSegment>
                <Presentation R='0' G='0' B='1' LineWeight='1'/>
                <CenterLine/>
            </PipingNetworkSegment>",
        )
        .unwrap();
        let segment = doc.root_element();
        let center_line = segment.child_by_tag(EId::CenterLine).unwrap();
        let presentation = inherited_presentation(center_line, Some(segment)).unwrap();
        assert_eq!(color(presentation).unwrap().to_string(), "#0000FF");
        assert!(inherited_presentation(center_line, None).is_err());
        assert!(own_presentation(center_line).is_err());
    }

    #[test]
    fn filled_flag() {
        let doc = pidtree::Document::parse_str(
            "<Drawing>
                <Circle Filled='Solid'/>
                <Circle Filled='false'/>
                <Circle Filled=''/>
                <Circle/>
            </Drawing>",
        )
        .unwrap();
        let flags: Vec<_> = doc.root_element().children().map(is_filled).collect();
        assert_eq!(flags, [true, false, false, false]);
    }
}
