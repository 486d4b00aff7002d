//! Bounding box types.

use serde::{Deserialize, Serialize};

/// A bounding box expressed in the units of a particular CRS.
///
/// For geographic CRSs the values are degrees, for projected CRSs they are
/// usually meters. `left`/`right` run along the horizontal axis and
/// `bottom`/`top` along the vertical axis regardless of the CRS axis order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrsBoundingBox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl CrsBoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Smallest box containing every point in `points`, or `None` if empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => Self::new(x, y, x, y),
                Some(b) => Self::new(b.left.min(x), b.bottom.min(y), b.right.max(x), b.top.max(y)),
            })
        })
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}
