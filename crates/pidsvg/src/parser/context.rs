// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pidtree::{AId, EId};

use super::{Catalog, Error, NodeExt, Options};
use crate::{Point, Rect, Size};

/// Source length units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Units {
    /// Millimeters. Output units are millimeters as well.
    Millimetre,
    #[allow(missing_docs)]
    Centimetre,
    #[allow(missing_docs)]
    Metre,
    #[allow(missing_docs)]
    Inch,
    #[allow(missing_docs)]
    Foot,
}

impl Units {
    /// Returns a multiplier that converts source lengths into output units.
    pub fn scale(&self) -> f64 {
        match self {
            Units::Millimetre => 1.0,
            Units::Centimetre => 10.0,
            Units::Metre => 1000.0,
            Units::Inch => 25.4,
            Units::Foot => 304.8,
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Units::Millimetre
    }
}

impl std::str::FromStr for Units {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        match text.trim() {
            "mm" | "Millimetre" | "Millimeter" => Ok(Units::Millimetre),
            "cm" | "Centimetre" | "Centimeter" => Ok(Units::Centimetre),
            "m" | "Metre" | "Meter" => Ok(Units::Metre),
            "in" | "Inch" => Ok(Units::Inch),
            "ft" | "Foot" => Ok(Units::Foot),
            _ => Err(Error::UnknownUnits(text.to_string())),
        }
    }
}

/// A conversion context.
///
/// Created once per document and never modified during conversion.
#[derive(Clone, Debug)]
pub struct Context<'a> {
    /// Plant model bounding box in output units.
    pub x_min: f64,
    #[allow(missing_docs)]
    pub x_max: f64,
    #[allow(missing_docs)]
    pub y_min: f64,
    #[allow(missing_docs)]
    pub y_max: f64,
    /// Source length units.
    pub units: Units,
    /// `OriginatingSystem` of the plant model. Can be empty.
    pub origin: String,
    /// Whether bounding box overlays should be produced.
    pub debug: bool,
    /// Shape catalog of the plant model, if any.
    pub catalog: Option<Catalog<'a>>,
}

impl<'a> Context<'a> {
    /// Creates a new context from a `PlantModel` element.
    pub fn new(plant_model: pidtree::Node<'a>, opt: &Options) -> Result<Self, Error> {
        let info = plant_model.child_by_tag(EId::PlantInformation);
        let units = match info.and_then(|n| n.raw_attribute(AId::Units)) {
            Some(value) => value.parse()?,
            None => Units::default(),
        };

        let origin = info
            .and_then(|n| n.attribute::<&str>(AId::OriginatingSystem))
            .unwrap_or_default()
            .to_string();

        let extent = plant_model.required_child(EId::Extent)?;
        let min = extent.required_child(EId::Min)?;
        let max = extent.required_child(EId::Max)?;

        let scale = units.scale();
        Ok(Context {
            x_min: min.required_attribute::<f64>(AId::X)? * scale,
            x_max: max.required_attribute::<f64>(AId::X)? * scale,
            y_min: min.required_attribute::<f64>(AId::Y)? * scale,
            y_max: max.required_attribute::<f64>(AId::Y)? * scale,
            units,
            origin,
            debug: opt.debug,
            catalog: plant_model.child_by_tag(EId::ShapeCatalogue).map(Catalog::new),
        })
    }

    /// Returns the source units scale factor.
    #[inline]
    pub fn unit_scale(&self) -> f64 {
        self.units.scale()
    }

    /// Converts a source length into output units.
    #[inline]
    pub fn convert_length(&self, n: f64) -> f64 {
        n * self.unit_scale()
    }

    /// Converts a source point into output coordinates.
    ///
    /// Flips the Y axis, since the source is Y-up and the output is Y-down.
    #[inline]
    pub fn convert_point(&self, x: f64, y: f64) -> Point {
        Point::new(self.convert_length(x), self.y_max - self.convert_length(y))
    }

    /// Returns the drawing size.
    pub fn size(&self) -> Option<Size> {
        Size::from_wh(self.x_max - self.x_min, self.y_max - self.y_min)
    }

    /// Returns the drawing view box.
    ///
    /// The flipped Y axis always starts at zero.
    pub fn view_box(&self) -> Rect {
        Rect::new(
            self.x_min,
            0.0,
            self.x_max - self.x_min,
            self.y_max - self.y_min,
        )
    }
}
