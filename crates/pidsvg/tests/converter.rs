// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pidsvg::{Color, ErrorKind, Node, Options, PathSegment, Scene};

fn plant_model(units: &str, body: &str) -> String {
    format!(
        "<?xml version='1.0' encoding='utf-8'?>
        <PlantModel>
            <PlantInformation Units='{}' OriginatingSystem='Test' SchemaVersion='4.0.1'/>
            <Extent><Min X='0' Y='0'/><Max X='100' Y='20'/></Extent>
            {}
        </PlantModel>",
        units, body
    )
}

fn convert(body: &str) -> Scene {
    Scene::from_str(&plant_model("mm", body), &Options::default()).unwrap()
}

fn first_group(scene: &Scene) -> &pidsvg::Group {
    match scene.root().children()[0] {
        Node::Group(ref g) => g,
        _ => panic!("not a group"),
    }
}

#[test]
fn scene_size() {
    let scene = convert("");
    assert_eq!(scene.size().width(), 100.0);
    assert_eq!(scene.size().height(), 20.0);
    assert_eq!(scene.view_box(), pidsvg::Rect::new(0.0, 0.0, 100.0, 20.0));
    assert!(!scene.root().has_children());
}

#[test]
fn metre_units() {
    let text = plant_model(
        "Metre",
        "<Drawing>
            <Line>
                <Presentation R='0' G='0' B='0' LineWeight='0.0005' LineType='1'/>
                <Coordinate X='0.001' Y='0.002'/>
                <Coordinate X='0.003' Y='0.004'/>
            </Line>
        </Drawing>",
    );
    let scene = Scene::from_str(&text, &Options::default()).unwrap();
    assert!((scene.size().width() - 100_000.0).abs() < 1e-6);

    let line = match first_group(&scene).children()[0] {
        Node::Line(ref line) => line,
        _ => panic!("not a line"),
    };
    let (x1, y1) = line.start();
    assert!((x1 - 1.0).abs() < 1e-9);
    assert!((y1 - 19_998.0).abs() < 1e-6);
    assert!((line.stroke().width() - 0.5).abs() < 1e-9);
    assert_eq!(line.stroke().dasharray(), Some(&[1000.0][..]));
}

#[test]
fn flipped_line() {
    let scene = convert(
        "<Drawing>
            <Line>
                <Presentation R='1' G='0' B='0' LineWeight='2' LineType='2'/>
                <Coordinate X='0' Y='0'/>
                <Coordinate X='10' Y='5'/>
            </Line>
        </Drawing>",
    );

    let drawing = first_group(&scene);
    assert_eq!(drawing.kind(), "Drawing");

    let line = match drawing.children()[0] {
        Node::Line(ref line) => line,
        _ => panic!("not a line"),
    };
    assert_eq!(line.start(), (0.0, 20.0));
    assert_eq!(line.end(), (10.0, 15.0));
    assert_eq!(line.stroke().color(), Color::new_rgb(255, 0, 0));
    assert_eq!(line.stroke().width(), 2.0);
    assert_eq!(line.stroke().dasharray(), Some(&[3.0][..]));
}

#[test]
fn equipment_instance() {
    let scene = convert(
        "<ShapeCatalogue>
            <Equipment ComponentName='PUMP01' ComponentClass='CentrifugalPump'>
                <Extent><Min X='-5' Y='-5'/><Max X='5' Y='5'/></Extent>
                <Circle Radius='5'>
                    <Presentation R='0' G='0' B='0' LineWeight='0.5'/>
                    <Position>
                        <Location X='0' Y='0' Z='0'/>
                        <Axis X='0' Y='0' Z='1'/>
                        <Reference X='1' Y='0' Z='0'/>
                    </Position>
                </Circle>
                <PolyLine NumPoints='2'>
                    <Presentation R='0' G='0' B='0' LineWeight='0.5'/>
                    <Coordinate X='0' Y='0'/>
                    <Coordinate X='5' Y='0'/>
                </PolyLine>
            </Equipment>
        </ShapeCatalogue>
        <Equipment ID='P-101' ComponentName='PUMP01' ComponentClass='CentrifugalPump' TagName='P-101'>
            <Presentation R='0' G='0' B='0' LineWeight='0.5'/>
            <Position>
                <Location X='50' Y='10' Z='0'/>
                <Axis X='0' Y='0' Z='1'/>
                <Reference X='0' Y='1' Z='0'/>
            </Position>
            <Nozzle ID='N1'/>
        </Equipment>",
    );

    let equipment = first_group(&scene);
    assert_eq!(equipment.id(), "P-101");
    assert_eq!(equipment.component_name(), Some("PUMP01"));
    assert_eq!(equipment.tag_name(), Some("P-101"));
    assert_eq!(equipment.children().len(), 3);

    match equipment.children()[0] {
        Node::Circle(ref circle) => {
            assert_eq!(circle.center(), (50.0, 10.0));
            assert_eq!(circle.radius(), 5.0);
        }
        _ => panic!("not a circle"),
    }

    // Rotated by 90 degrees, so the polyline points up.
    match equipment.children()[1] {
        Node::Path(ref path) => match path.data()[1] {
            PathSegment::LineTo { x, y } => {
                assert!((x - 50.0).abs() < 1e-9);
                assert!((y - 5.0).abs() < 1e-9);
            }
            _ => panic!("not a line to"),
        },
        _ => panic!("not a path"),
    }

    match equipment.children()[2] {
        Node::Group(ref g) => assert_eq!(g.kind(), "Nozzle"),
        _ => panic!("not a group"),
    }
}

#[test]
fn instances_are_independent() {
    let scene = convert(
        "<ShapeCatalogue>
            <Label ComponentName='L1'>
                <Line>
                    <Presentation R='0' G='0' B='0' LineWeight='0.5'/>
                    <Coordinate X='0' Y='0'/>
                    <Coordinate X='1' Y='0'/>
                </Line>
            </Label>
        </ShapeCatalogue>
        <Label ComponentName='L1'>
            <Position><Location X='10' Y='0'/></Position>
        </Label>
        <Label ComponentName='L1'>
            <Position><Location X='20' Y='0'/></Position>
        </Label>",
    );

    let starts: Vec<_> = scene
        .root()
        .children()
        .iter()
        .map(|n| match n {
            Node::Group(g) => match g.children()[0] {
                Node::Line(ref line) => line.start(),
                _ => panic!("not a line"),
            },
            _ => panic!("not a group"),
        })
        .collect();
    assert_eq!(starts, [(10.0, 20.0), (20.0, 20.0)]);
}

#[test]
fn piping_network() {
    let scene = convert(
        "<PipingNetworkSystem ID='PNS1'>
            <PipingNetworkSegment ID='PNS1.1'>
                <Presentation R='0' G='0' B='1' LineWeight='0.7'/>
                <CenterLine NumPoints='3'>
                    <Coordinate X='0' Y='0'/>
                    <Coordinate X='10' Y='0'/>
                    <Coordinate X='10' Y='10'/>
                </CenterLine>
                <Connection FromID='E1' ToID='E2'/>
            </PipingNetworkSegment>
        </PipingNetworkSystem>",
    );

    let system = first_group(&scene);
    let segment = match system.children()[0] {
        Node::Group(ref g) => g,
        _ => panic!("not a group"),
    };
    assert_eq!(segment.id(), "PNS1.1");
    assert_eq!(segment.children().len(), 1);

    match segment.children()[0] {
        Node::Path(ref path) => {
            assert_eq!(path.stroke().color(), Color::new_rgb(0, 0, 255));
            assert_eq!(path.data().len(), 3);
            assert_eq!(path.fill(), None);
        }
        _ => panic!("not a path"),
    }
}

#[test]
fn not_a_plant_model() {
    let err = Scene::from_str("<Drawing/>", &Options::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(
        err.to_string(),
        "expected a 'PlantModel' root element, found 'Drawing'"
    );
}

#[test]
fn malformed_xml() {
    let err = Scene::from_str("<PlantModel>", &Options::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parsing);

    let err = Scene::from_data(&[0xFF, 0xFE], &Options::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parsing);
}

#[test]
fn unknown_units() {
    let err = Scene::from_str(&plant_model("furlong", ""), &Options::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueOutOfDomain);
}

#[test]
fn color_out_of_range() {
    let err = Scene::from_str(
        &plant_model(
            "mm",
            "<Line>
                <Presentation R='2' G='0' B='0' LineWeight='1'/>
                <Coordinate X='0' Y='0'/>
                <Coordinate X='1' Y='0'/>
            </Line>",
        ),
        &Options::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueOutOfDomain);
}

#[test]
fn invalid_rotation() {
    let err = Scene::from_str(
        &plant_model(
            "mm",
            "<ShapeCatalogue>
                <Equipment ComponentName='E'><Nozzle/></Equipment>
            </ShapeCatalogue>
            <Equipment ComponentName='E'>
                <Position>
                    <Location X='0' Y='0'/>
                    <Reference X='0.6' Y='0.9'/>
                </Position>
            </Equipment>",
        ),
        &Options::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueOutOfDomain);
}

#[test]
fn ellipse_trimmed_curve() {
    let err = Scene::from_str(
        &plant_model(
            "mm",
            "<Drawing>
                <TrimmedCurve StartAngle='0' EndAngle='90'>
                    <Ellipse/>
                </TrimmedCurve>
            </Drawing>",
        ),
        &Options::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unimplemented);
}

#[cfg(not(feature = "strict"))]
#[test]
fn unknown_element() {
    let scene = convert("<Drawing><Hologram/></Drawing>");
    assert!(!first_group(&scene).has_children());
}

#[test]
fn multiline_text() {
    let scene = convert(
        "<Label>
            <Text String='P-101&#13;&#10;Feed pump' Height='3' Justification='CenterBottom' Font='Arial'>
                <Position><Location X='5' Y='5'/></Position>
            </Text>
        </Label>",
    );

    let text = match first_group(&scene).children()[0] {
        Node::Text(ref text) => text,
        _ => panic!("not a text"),
    };
    assert_eq!(text.text(), "P-101");
    assert_eq!(text.spans().len(), 1);
    assert_eq!(text.spans()[0].text(), "Feed pump");
    assert_eq!(text.position(), (5.0, 15.0));
    assert_eq!(text.font_size(), 3.0);
}

#[test]
fn debug_overlay() {
    let body = "<Equipment ID='E1'>
        <Extent><Min X='1' Y='1'/><Max X='5' Y='5'/></Extent>
        <Circle Radius='1'>
            <Presentation R='0' G='0' B='0' LineWeight='0.1'/>
            <Extent><Min X='2' Y='2'/><Max X='4' Y='4'/></Extent>
            <Position><Location X='3' Y='3'/></Position>
        </Circle>
    </Equipment>";

    let opt = Options {
        debug: true,
        ..Options::default()
    };
    let scene = Scene::from_str(&plant_model("mm", body), &opt).unwrap();

    assert_eq!(scene.root().children().len(), 2);
    match scene.root().children()[1] {
        Node::Rectangle(ref r) => {
            assert_eq!(r.rect(), pidsvg::Rect::new(1.0, 15.0, 4.0, 4.0));
        }
        _ => panic!("not a rectangle"),
    }

    let equipment = first_group(&scene);
    assert_eq!(equipment.children().len(), 2);
    assert!(matches!(equipment.children()[1], Node::Rectangle(_)));
}

#[test]
fn circle_without_presentation() {
    let err = Scene::from_str(
        &plant_model(
            "mm",
            "<Equipment>
                <Presentation R='0' G='0' B='0' LineWeight='0.5'/>
                <Circle Radius='5'>
                    <Position><Location X='10' Y='10'/></Position>
                </Circle>
            </Equipment>",
        ),
        &Options::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
}

#[test]
fn shape_uses_parent_presentation() {
    let scene = convert(
        "<Equipment>
            <Presentation R='0' G='1' B='0' LineWeight='0.25' LineType='1'/>
            <Shape NumPoints='3' Filled='Solid'>
                <Coordinate X='0' Y='0'/>
                <Coordinate X='4' Y='0'/>
                <Coordinate X='4' Y='4'/>
            </Shape>
            <PolyLine NumPoints='2'>
                <Presentation R='1' G='0' B='0' LineWeight='1'/>
                <Coordinate X='0' Y='0'/>
                <Coordinate X='1' Y='1'/>
            </PolyLine>
        </Equipment>",
    );

    let equipment = first_group(&scene);
    assert_eq!(equipment.children().len(), 2);

    match equipment.children()[0] {
        Node::Path(ref path) => {
            assert_eq!(path.stroke().color(), Color::new_rgb(0, 255, 0));
            assert_eq!(path.stroke().width(), 0.25);
            assert_eq!(path.stroke().dasharray(), Some(&[1.0][..]));
            assert_eq!(path.fill(), Some(Color::new_rgb(0, 255, 0)));
            assert!(matches!(path.data()[3], PathSegment::ClosePath));
        }
        _ => panic!("not a path"),
    }

    // An own presentation takes precedence.
    match equipment.children()[1] {
        Node::Path(ref path) => {
            assert_eq!(path.stroke().color(), Color::new_rgb(255, 0, 0));
            assert_eq!(path.fill(), None);
        }
        _ => panic!("not a path"),
    }
}

#[test]
fn polyline_without_any_presentation() {
    let err = Scene::from_str(
        &plant_model(
            "mm",
            "<Drawing>
                <PolyLine NumPoints='2'>
                    <Coordinate X='0' Y='0'/>
                    <Coordinate X='1' Y='1'/>
                </PolyLine>
            </Drawing>",
        ),
        &Options::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
}
