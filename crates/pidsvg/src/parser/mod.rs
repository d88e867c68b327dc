// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

mod catalog;
mod context;
mod converter;
mod options;
mod shapes;
mod style;
mod text;
mod transform;

pub use catalog::{Catalog, Instance};
pub use context::{Context, Units};
pub use options::Options;
pub use style::{color, dash_pattern, rgb_color, LineType};
pub use transform::{apply_transform, Placement};

pub use pidtree::{AId, EId};

/// An error kind.
///
/// Groups [`Error`] variants by the way a caller is expected to react.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The input is not a well-formed XML.
    Parsing,
    /// The document structure doesn't match the expected one.
    SchemaMismatch,
    /// A value is outside of its allowed domain.
    ValueOutOfDomain,
    /// A construct that is known but not supported yet.
    Unimplemented,
    /// An element outside of the supported vocabulary.
    UnknownElement,
}

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// Only UTF-8 content are supported.
    NotAnUtf8Str,

    /// Failed to parse an XML data.
    ParsingFailed(roxmltree::Error),

    /// The root element is not `PlantModel`.
    NotAPlantModel(String),

    /// A required child element is missing.
    MissingElement {
        /// Parent element name.
        parent: String,
        /// Missing element name.
        child: EId,
    },

    /// A required attribute is missing or cannot be parsed.
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: AId,
    },

    /// An element has an unexpected number of coordinates.
    InvalidCoordinatesCount {
        /// Element name.
        element: String,
        /// A human readable expectation, like `2` or `at least 1`.
        expected: &'static str,
        /// Actual number of coordinates.
        found: usize,
    },

    /// The plant model extent doesn't have a positive area.
    InvalidSize,

    /// A color channel is outside of the `0..=1` range.
    ColorOutOfRange(f64),

    /// A rotation reference vector is not a unit vector.
    InvalidRotation(f64, f64),

    /// An unknown `LineType` value.
    UnknownLineType(String),

    /// An unknown `Justification` value.
    UnknownJustification(String),

    /// An unknown `Units` value.
    UnknownUnits(String),

    /// A known construct that is not supported yet.
    NotImplemented(&'static str),

    /// An element outside of the supported vocabulary.
    ///
    /// Produced only when the `strict` feature is enabled.
    UnknownElement(String),
}

impl Error {
    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::NotAnUtf8Str | Error::ParsingFailed(_) => ErrorKind::Parsing,
            Error::NotAPlantModel(_)
            | Error::MissingElement { .. }
            | Error::InvalidAttribute { .. }
            | Error::InvalidCoordinatesCount { .. }
            | Error::InvalidSize => ErrorKind::SchemaMismatch,
            Error::ColorOutOfRange(_)
            | Error::InvalidRotation(..)
            | Error::UnknownLineType(_)
            | Error::UnknownJustification(_)
            | Error::UnknownUnits(_) => ErrorKind::ValueOutOfDomain,
            Error::NotImplemented(_) => ErrorKind::Unimplemented,
            Error::UnknownElement(_) => ErrorKind::UnknownElement,
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "XML data parsing failed cause {}", e)
            }
            Error::NotAPlantModel(ref name) => {
                write!(f, "expected a 'PlantModel' root element, found '{}'", name)
            }
            Error::MissingElement {
                ref parent,
                child,
            } => {
                write!(f, "'{}' must have a '{}' child element", parent, child)
            }
            Error::InvalidAttribute {
                ref element,
                attribute,
            } => {
                write!(f, "'{}' has a missing or invalid '{}' attribute", element, attribute)
            }
            Error::InvalidCoordinatesCount {
                ref element,
                expected,
                found,
            } => {
                write!(
                    f,
                    "'{}' must have {} coordinates, found {}",
                    element, expected, found
                )
            }
            Error::InvalidSize => {
                write!(f, "plant model has an invalid extent")
            }
            Error::ColorOutOfRange(v) => {
                write!(f, "color channel {} is outside of the 0..1 range", v)
            }
            Error::InvalidRotation(cos, sin) => {
                write!(f, "rotation reference ({}, {}) is not a unit vector", cos, sin)
            }
            Error::UnknownLineType(ref v) => {
                write!(f, "unknown line type '{}'", v)
            }
            Error::UnknownJustification(ref v) => {
                write!(f, "unknown text justification '{}'", v)
            }
            Error::UnknownUnits(ref v) => {
                write!(f, "unknown units '{}'", v)
            }
            Error::NotImplemented(what) => {
                write!(f, "{} is not implemented", what)
            }
            Error::UnknownElement(ref name) => {
                write!(f, "unknown element '{}'", name)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Element lookup helpers that turn a missing value into an [`Error`].
pub(crate) trait NodeExt<'a> {
    fn required_child(&self, eid: EId) -> Result<pidtree::Node<'a>, Error>;
    fn required_attribute<T: pidtree::FromValue<'a>>(&self, aid: AId) -> Result<T, Error>;
    fn optional_attribute<T: pidtree::FromValue<'a>>(&self, aid: AId) -> Result<Option<T>, Error>;
}

impl<'a> NodeExt<'a> for pidtree::Node<'a> {
    fn required_child(&self, eid: EId) -> Result<pidtree::Node<'a>, Error> {
        self.child_by_tag(eid).ok_or_else(|| Error::MissingElement {
            parent: self.tag_name_str().to_string(),
            child: eid,
        })
    }

    fn required_attribute<T: pidtree::FromValue<'a>>(&self, aid: AId) -> Result<T, Error> {
        self.attribute(aid).ok_or_else(|| Error::InvalidAttribute {
            element: self.tag_name_str().to_string(),
            attribute: aid,
        })
    }

    // An absent attribute is fine, a malformed one is not.
    fn optional_attribute<T: pidtree::FromValue<'a>>(&self, aid: AId) -> Result<Option<T>, Error> {
        if self.has_attribute(aid) {
            self.required_attribute(aid).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl crate::Scene {
    /// Parses `Scene` from a Proteus data.
    pub fn from_data(data: &[u8], opt: &Options) -> Result<Self, Error> {
        let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
        Self::from_str(text, opt)
    }

    /// Parses `Scene` from a Proteus string.
    pub fn from_str(text: &str, opt: &Options) -> Result<Self, Error> {
        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };

        let doc = roxmltree::Document::parse_with_options(text, xml_opt)?;
        Self::from_xmltree(&doc, opt)
    }

    /// Parses `Scene` from `roxmltree::Document`.
    pub fn from_xmltree(doc: &roxmltree::Document, opt: &Options) -> Result<Self, Error> {
        let doc = pidtree::Document::parse_tree(doc)?;
        Self::from_tree(&doc, opt)
    }

    /// Converts an already parsed [`pidtree::Document`].
    pub fn from_tree(doc: &pidtree::Document, opt: &Options) -> Result<Self, Error> {
        converter::convert_doc(doc, opt)
    }
}
