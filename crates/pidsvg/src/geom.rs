// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use strict_num::ApproxEqUlps;

/// Maximum allowed deviation of `cos² + sin²` from one.
pub const ROTATION_TOLERANCE: f64 = 1e-4;

/// A trait for fuzzy/approximate equality comparisons of float numbers.
pub trait FuzzyEq<Rhs: ?Sized = Self> {
    /// Returns `true` if values are approximately equal.
    fn fuzzy_eq(&self, other: &Rhs) -> bool;
}

impl FuzzyEq for f64 {
    #[inline]
    fn fuzzy_eq(&self, other: &f64) -> bool {
        self.approx_eq_ulps(other, 4)
    }
}

/// A trait for fuzzy/approximate comparisons of float numbers.
pub trait FuzzyZero: FuzzyEq {
    /// Returns `true` if the number is approximately zero.
    fn is_fuzzy_zero(&self) -> bool;
}

impl FuzzyZero for f64 {
    #[inline]
    fn is_fuzzy_zero(&self) -> bool {
        self.fuzzy_eq(&0.0)
    }
}

/// A 2D point representation.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[allow(missing_docs)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new `Point` from values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A 2D size representation.
///
/// Width and height are guarantee to be > 0.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new `Size` from values.
    #[inline]
    pub fn from_wh(width: f64, height: f64) -> Option<Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Some(Size { width, height })
        } else {
            None
        }
    }

    /// Returns width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// A rect representation.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[allow(missing_docs)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a new `Rect` from values.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the smallest `Rect` containing all points.
    ///
    /// Returns `None` for an empty list.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Returns the right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A rotation represented by a unit vector.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rotation {
    cos: f64,
    sin: f64,
}

impl Rotation {
    /// No rotation.
    pub const IDENTITY: Rotation = Rotation { cos: 1.0, sin: 0.0 };

    /// Creates a new rotation from a reference vector.
    ///
    /// Returns `None` when `cos² + sin²` deviates from one
    /// by more than [`ROTATION_TOLERANCE`].
    pub fn new(cos: f64, sin: f64) -> Option<Self> {
        let norm = cos * cos + sin * sin;
        if norm.is_finite() && (norm - 1.0).abs() <= ROTATION_TOLERANCE {
            Some(Rotation { cos, sin })
        } else {
            None
        }
    }
}

impl Default for Rotation {
    #[inline]
    fn default() -> Self {
        Rotation::IDENTITY
    }
}

/// A 2D affine transform representation.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// Constructs a new transform.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    /// Constructs a new translate transform.
    #[inline]
    pub fn new_translate(x: f64, y: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Constructs a new scale transform.
    #[inline]
    pub fn new_scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Constructs a new rotate transform.
    #[inline]
    pub fn new_rotate(rotation: Rotation) -> Self {
        let a = rotation.cos;
        let b = rotation.sin;
        Transform::new(a, b, -b, a, 0.0, 0.0)
    }

    /// Constructs an instance placement transform.
    ///
    /// A point is scaled first, then rotated and then translated.
    pub fn new_placement(translate: Point, rotation: Rotation, sx: f64, sy: f64) -> Self {
        let mut ts = Transform::new_translate(translate.x, translate.y);
        ts.append(&Transform::new_rotate(rotation));
        ts.append(&Transform::new_scale(sx, sy));
        ts
    }

    /// Constructs a vertical mirror around `y = height / 2`.
    ///
    /// Maps a Y-up coordinate frame of the given height onto a Y-down one.
    #[inline]
    pub fn new_flip(height: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, -1.0, 0.0, height)
    }

    /// Appends transform to the current transform.
    #[inline]
    pub fn append(&mut self, other: &Transform) {
        *self = multiply(self, other);
    }

    /// Checks that transform is default, aka `(1 0 0 1 0 0)`.
    pub fn is_default(&self) -> bool {
        self.a.fuzzy_eq(&1.0)
            && self.b.is_fuzzy_zero()
            && self.c.is_fuzzy_zero()
            && self.d.fuzzy_eq(&1.0)
            && self.e.is_fuzzy_zero()
            && self.f.is_fuzzy_zero()
    }

    /// Applies transform to the point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let new_x = self.a * x + self.c * y + self.e;
        let new_y = self.b * x + self.d * y + self.f;
        (new_x, new_y)
    }

    /// Applies transform to the point without the translate part.
    #[inline]
    pub fn apply_vector(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y, self.b * x + self.d * y)
    }
}

#[inline(never)]
fn multiply(ts1: &Transform, ts2: &Transform) -> Transform {
    Transform {
        a: ts1.a * ts2.a + ts1.c * ts2.b,
        b: ts1.b * ts2.a + ts1.d * ts2.b,
        c: ts1.a * ts2.c + ts1.c * ts2.d,
        d: ts1.b * ts2.c + ts1.d * ts2.d,
        e: ts1.a * ts2.e + ts1.c * ts2.f + ts1.e,
        f: ts1.b * ts2.e + ts1.d * ts2.f + ts1.f,
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

/// Returns a point on a circle.
///
/// Angle is in degrees, counted counterclockwise in a Y-up frame.
#[inline]
pub fn polar_to_cartesian(center: Point, radius: f64, angle: f64) -> Point {
    let angle = angle.to_radians();
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}
