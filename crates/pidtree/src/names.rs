// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// A Proteus element name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[allow(missing_docs)]
pub enum EId {
    Association,
    Axis,
    BsplineCurve,
    CenterLine,
    Circle,
    CompositeCurve,
    Connection,
    ConnectionPoints,
    Coordinate,
    Drawing,
    Ellipse,
    Equipment,
    Extent,
    GenericAttribute,
    GenericAttributes,
    History,
    InformationFlow,
    InstrumentComponent,
    InstrumentLoop,
    Label,
    Line,
    Location,
    Max,
    Min,
    Node,
    Nozzle,
    PersistentID,
    PipeConnectorSymbol,
    PipeFlowArrow,
    PipingComponent,
    PipingNetworkSegment,
    PipingNetworkSystem,
    PlantInformation,
    PlantModel,
    PolyLine,
    Position,
    Presentation,
    ProcessInstrument,
    Reference,
    Scale,
    Shape,
    ShapeCatalogue,
    SignalLine,
    Text,
    TrimmedCurve,
}

impl EId {
    /// Parses an element name.
    pub fn from_str(text: &str) -> Option<EId> {
        Some(match text {
            "Association" => EId::Association,
            "Axis" => EId::Axis,
            "BsplineCurve" => EId::BsplineCurve,
            "CenterLine" => EId::CenterLine,
            "Circle" => EId::Circle,
            "CompositeCurve" => EId::CompositeCurve,
            "Connection" => EId::Connection,
            "ConnectionPoints" => EId::ConnectionPoints,
            "Coordinate" => EId::Coordinate,
            "Drawing" => EId::Drawing,
            "Ellipse" => EId::Ellipse,
            "Equipment" => EId::Equipment,
            "Extent" => EId::Extent,
            "GenericAttribute" => EId::GenericAttribute,
            "GenericAttributes" => EId::GenericAttributes,
            "History" => EId::History,
            "InformationFlow" => EId::InformationFlow,
            "InstrumentComponent" => EId::InstrumentComponent,
            "InstrumentLoop" => EId::InstrumentLoop,
            "Label" => EId::Label,
            "Line" => EId::Line,
            "Location" => EId::Location,
            "Max" => EId::Max,
            "Min" => EId::Min,
            "Node" => EId::Node,
            "Nozzle" => EId::Nozzle,
            "PersistentID" => EId::PersistentID,
            "PipeConnectorSymbol" => EId::PipeConnectorSymbol,
            "PipeFlowArrow" => EId::PipeFlowArrow,
            "PipingComponent" => EId::PipingComponent,
            "PipingNetworkSegment" => EId::PipingNetworkSegment,
            "PipingNetworkSystem" => EId::PipingNetworkSystem,
            "PlantInformation" => EId::PlantInformation,
            "PlantModel" => EId::PlantModel,
            "PolyLine" => EId::PolyLine,
            "Position" => EId::Position,
            "Presentation" => EId::Presentation,
            "ProcessInstrument" => EId::ProcessInstrument,
            "Reference" => EId::Reference,
            "Scale" => EId::Scale,
            "Shape" => EId::Shape,
            "ShapeCatalogue" => EId::ShapeCatalogue,
            "SignalLine" => EId::SignalLine,
            "Text" => EId::Text,
            "TrimmedCurve" => EId::TrimmedCurve,
            _ => return None,
        })
    }

    /// Returns the element name as written in a document.
    pub fn to_str(&self) -> &'static str {
        match self {
            EId::Association => "Association",
            EId::Axis => "Axis",
            EId::BsplineCurve => "BsplineCurve",
            EId::CenterLine => "CenterLine",
            EId::Circle => "Circle",
            EId::CompositeCurve => "CompositeCurve",
            EId::Connection => "Connection",
            EId::ConnectionPoints => "ConnectionPoints",
            EId::Coordinate => "Coordinate",
            EId::Drawing => "Drawing",
            EId::Ellipse => "Ellipse",
            EId::Equipment => "Equipment",
            EId::Extent => "Extent",
            EId::GenericAttribute => "GenericAttribute",
            EId::GenericAttributes => "GenericAttributes",
            EId::History => "History",
            EId::InformationFlow => "InformationFlow",
            EId::InstrumentComponent => "InstrumentComponent",
            EId::InstrumentLoop => "InstrumentLoop",
            EId::Label => "Label",
            EId::Line => "Line",
            EId::Location => "Location",
            EId::Max => "Max",
            EId::Min => "Min",
            EId::Node => "Node",
            EId::Nozzle => "Nozzle",
            EId::PersistentID => "PersistentID",
            EId::PipeConnectorSymbol => "PipeConnectorSymbol",
            EId::PipeFlowArrow => "PipeFlowArrow",
            EId::PipingComponent => "PipingComponent",
            EId::PipingNetworkSegment => "PipingNetworkSegment",
            EId::PipingNetworkSystem => "PipingNetworkSystem",
            EId::PlantInformation => "PlantInformation",
            EId::PlantModel => "PlantModel",
            EId::PolyLine => "PolyLine",
            EId::Position => "Position",
            EId::Presentation => "Presentation",
            EId::ProcessInstrument => "ProcessInstrument",
            EId::Reference => "Reference",
            EId::Scale => "Scale",
            EId::Shape => "Shape",
            EId::ShapeCatalogue => "ShapeCatalogue",
            EId::SignalLine => "SignalLine",
            EId::Text => "Text",
            EId::TrimmedCurve => "TrimmedCurve",
        }
    }
}

impl std::fmt::Display for EId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// A Proteus attribute name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[allow(missing_docs)]
pub enum AId {
    B,
    Color,
    ComponentClass,
    ComponentClassUri,
    ComponentName,
    ComponentType,
    Date,
    Discipline,
    EndAngle,
    Filled,
    Font,
    Format,
    G,
    Height,
    Id,
    Is3D,
    Justification,
    Layer,
    LineType,
    LineWeight,
    Name,
    NumPoints,
    OriginatingSystem,
    R,
    Radius,
    SchemaVersion,
    Size,
    SlantAngle,
    StartAngle,
    String,
    TagName,
    TextAngle,
    Time,
    Title,
    Type,
    Units,
    Value,
    Width,
    X,
    Y,
    Z,
}

impl AId {
    /// Parses an attribute name.
    pub fn from_str(text: &str) -> Option<AId> {
        Some(match text {
            "B" => AId::B,
            "Color" => AId::Color,
            "ComponentClass" => AId::ComponentClass,
            "ComponentClassURI" => AId::ComponentClassUri,
            "ComponentName" => AId::ComponentName,
            "ComponentType" => AId::ComponentType,
            "Date" => AId::Date,
            "Discipline" => AId::Discipline,
            "EndAngle" => AId::EndAngle,
            "Filled" => AId::Filled,
            "Font" => AId::Font,
            "Format" => AId::Format,
            "G" => AId::G,
            "Height" => AId::Height,
            "ID" => AId::Id,
            "Is3D" => AId::Is3D,
            "Justification" => AId::Justification,
            "Layer" => AId::Layer,
            "LineType" => AId::LineType,
            "LineWeight" => AId::LineWeight,
            "Name" => AId::Name,
            "NumPoints" => AId::NumPoints,
            "OriginatingSystem" => AId::OriginatingSystem,
            "R" => AId::R,
            "Radius" => AId::Radius,
            "SchemaVersion" => AId::SchemaVersion,
            "Size" => AId::Size,
            "SlantAngle" => AId::SlantAngle,
            "StartAngle" => AId::StartAngle,
            "String" => AId::String,
            "TagName" => AId::TagName,
            "TextAngle" => AId::TextAngle,
            "Time" => AId::Time,
            "Title" => AId::Title,
            "Type" => AId::Type,
            "Units" => AId::Units,
            "Value" => AId::Value,
            "Width" => AId::Width,
            "X" => AId::X,
            "Y" => AId::Y,
            "Z" => AId::Z,
            _ => return None,
        })
    }

    /// Returns the attribute name as written in a document.
    pub fn to_str(&self) -> &'static str {
        match self {
            AId::B => "B",
            AId::Color => "Color",
            AId::ComponentClass => "ComponentClass",
            AId::ComponentClassUri => "ComponentClassURI",
            AId::ComponentName => "ComponentName",
            AId::ComponentType => "ComponentType",
            AId::Date => "Date",
            AId::Discipline => "Discipline",
            AId::EndAngle => "EndAngle",
            AId::Filled => "Filled",
            AId::Font => "Font",
            AId::Format => "Format",
            AId::G => "G",
            AId::Height => "Height",
            AId::Id => "ID",
            AId::Is3D => "Is3D",
            AId::Justification => "Justification",
            AId::Layer => "Layer",
            AId::LineType => "LineType",
            AId::LineWeight => "LineWeight",
            AId::Name => "Name",
            AId::NumPoints => "NumPoints",
            AId::OriginatingSystem => "OriginatingSystem",
            AId::R => "R",
            AId::Radius => "Radius",
            AId::SchemaVersion => "SchemaVersion",
            AId::Size => "Size",
            AId::SlantAngle => "SlantAngle",
            AId::StartAngle => "StartAngle",
            AId::String => "String",
            AId::TagName => "TagName",
            AId::TextAngle => "TextAngle",
            AId::Time => "Time",
            AId::Title => "Title",
            AId::Type => "Type",
            AId::Units => "Units",
            AId::Value => "Value",
            AId::Width => "Width",
            AId::X => "X",
            AId::Y => "Y",
            AId::Z => "Z",
        }
    }
}

impl std::fmt::Display for AId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
