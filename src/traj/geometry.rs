//! Pixel-space points and axis-aligned boxes.
//!
//! Trajectory rows store boxes as center + size, label records store them as
//! two corner points. [`BBoxXYXY`] converts between the two.

/// A 2D pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    /// Creates a new coordinate with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Coord {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Coord> for [f64; 2] {
    fn from(coord: Coord) -> Self {
        [coord.x, coord.y]
    }
}

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax).
///
/// Boxes built through [`BBoxXYXY::from_corners`] are always ordered;
/// [`BBoxXYXY::from_cxcywh`] trusts the caller's sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BBoxXYXY {
    pub min: Coord,
    pub max: Coord,
}

impl BBoxXYXY {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Coord::new(xmin, ymin),
            max: Coord::new(xmax, ymax),
        }
    }

    /// Builds an ordered box from two opposite corners given in any order.
    pub fn from_corners(a: Coord, b: Coord) -> Self {
        Self::from_xyxy(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Builds a box from its center and size.
    #[inline]
    pub fn from_cxcywh(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::from_xyxy(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the midpoint of the box.
    #[inline]
    pub fn center(&self) -> Coord {
        Coord::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns the (min, max) corners in label-record point form.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [self.min.into(), self.max.into()]
    }
}
