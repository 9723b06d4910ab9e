//! Per-frame trajectory rows.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::{BBoxXYXY, Coord};
use super::shape::{Shape, BALL_LABEL};
use crate::error::TrajlabelError;

/// Box size assumed when a trajectory row has no `W`/`H` column.
pub const DEFAULT_BOX_SIZE: f64 = 20.0;

/// Shape types a row can be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// No detection in the frame.
    Empty,
    /// A bare position without box geometry.
    Point,
    /// A box given by two opposite corners.
    Rectangle,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Empty => "empty",
            ShapeKind::Point => "point",
            ShapeKind::Rectangle => "rectangle",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = TrajlabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(ShapeKind::Empty),
            "point" => Ok(ShapeKind::Point),
            "rectangle" => Ok(ShapeKind::Rectangle),
            other => Err(TrajlabelError::UnsupportedShape(other.to_string())),
        }
    }
}

/// The annotation for one video frame.
///
/// A row with `visibility == 0` is empty. The canonical empty row also has
/// zero center and size; see [`DataRow::empty`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataRow {
    pub center_x: f64,
    pub center_y: f64,
    pub visibility: i32,
    pub frame: usize,
    pub width: f64,
    pub height: f64,
}

/// The CSV form of a row: every field truncated to an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvPoint {
    #[serde(rename = "Frame")]
    pub frame: u64,
    #[serde(rename = "Visibility")]
    pub visibility: i64,
    #[serde(rename = "X")]
    pub x: i64,
    #[serde(rename = "Y")]
    pub y: i64,
    #[serde(rename = "W")]
    pub w: i64,
    #[serde(rename = "H")]
    pub h: i64,
}

impl DataRow {
    /// Creates a visible row with the default 20x20 box.
    pub fn new(frame: usize, center_x: f64, center_y: f64) -> Self {
        Self {
            center_x,
            center_y,
            visibility: 1,
            frame,
            width: DEFAULT_BOX_SIZE,
            height: DEFAULT_BOX_SIZE,
        }
    }

    /// Sets the box size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// The canonical empty row for `frame`.
    pub fn empty(frame: usize) -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            visibility: 0,
            frame,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Builds a row from an annotation shape.
    ///
    /// `points` follows the label-record layout: one `[x, y]` for `"point"`,
    /// two opposite corners (any order) for `"rectangle"`. It is ignored for
    /// `"empty"`.
    ///
    /// # Errors
    /// [`TrajlabelError::UnsupportedShape`] for any other shape type, and
    /// [`TrajlabelError::InvalidShapePoints`] when too few points are given.
    pub fn from_shape(
        shape_type: &str,
        frame: usize,
        points: &[[f64; 2]],
    ) -> Result<Self, TrajlabelError> {
        let kind: ShapeKind = shape_type.parse()?;
        Self::from_kind(kind, frame, points)
    }

    /// Typed variant of [`DataRow::from_shape`].
    pub fn from_kind(
        kind: ShapeKind,
        frame: usize,
        points: &[[f64; 2]],
    ) -> Result<Self, TrajlabelError> {
        match kind {
            ShapeKind::Empty => Ok(Self::empty(frame)),
            ShapeKind::Point => {
                let [[x, y]] = require_points::<1>(kind, points)?;
                Ok(Self::new(frame, x, y).with_size(0.0, 0.0))
            }
            ShapeKind::Rectangle => {
                let [a, b] = require_points::<2>(kind, points)?;
                let bbox = BBoxXYXY::from_corners(Coord::from(a), Coord::from(b));
                let center = bbox.center();
                Ok(Self::new(frame, center.x, center.y).with_size(bbox.width(), bbox.height()))
            }
        }
    }

    /// Returns true if the object is absent in this frame.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visibility == 0
    }

    /// Rows loaded with a zero coordinate or zero visibility are treated as
    /// "no detection", whatever their box size.
    pub(crate) fn normalized(self) -> Self {
        if self.center_x == 0.0 || self.center_y == 0.0 || self.visibility == 0 {
            Self::empty(self.frame)
        } else {
            self
        }
    }

    /// The bounding box of this row, centered on its position.
    pub fn bbox(&self) -> BBoxXYXY {
        BBoxXYXY::from_cxcywh(self.center_x, self.center_y, self.width, self.height)
    }

    /// The integer CSV view of this row.
    pub fn point(&self) -> CsvPoint {
        CsvPoint {
            frame: self.frame as u64,
            visibility: i64::from(self.visibility),
            x: self.center_x as i64,
            y: self.center_y as i64,
            w: self.width as i64,
            h: self.height as i64,
        }
    }

    /// Shapes for this frame's label record: nothing for empty rows or
    /// degenerate boxes, otherwise a single `"ball"` rectangle.
    pub fn shapes(&self) -> impl Iterator<Item = Shape> {
        let has_box = !self.is_empty() && self.width != 0.0 && self.height != 0.0;
        has_box
            .then(|| {
                let [min, max] = self.bbox().corners();
                Shape::rectangle(BALL_LABEL, min, max)
            })
            .into_iter()
    }
}

fn require_points<const N: usize>(
    kind: ShapeKind,
    points: &[[f64; 2]],
) -> Result<[[f64; 2]; N], TrajlabelError> {
    points
        .get(..N)
        .and_then(|head| <[[f64; 2]; N]>::try_from(head).ok())
        .ok_or_else(|| TrajlabelError::InvalidShapePoints {
            shape_type: kind.as_str().to_string(),
            expected: N,
            found: points.len(),
        })
}
