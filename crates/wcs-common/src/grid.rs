//! Native grid definitions for coverage layers.

use serde::{Deserialize, Serialize};

/// The native sampling grid of a layer in one CRS.
///
/// Resolution is the geographic size of one cell along each axis, in the
/// units of the CRS. The vertical resolution is commonly negative for
/// north-up data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NativeGrid {
    /// (x resolution, y resolution)
    pub resolution: (f64, f64),
}

impl NativeGrid {
    pub fn new(x_res: f64, y_res: f64) -> Self {
        Self {
            resolution: (x_res, y_res),
        }
    }

    /// Resolution along the horizontal axis.
    pub fn x_res(&self) -> f64 {
        self.resolution.0
    }

    /// Resolution along the vertical axis.
    pub fn y_res(&self) -> f64 {
        self.resolution.1
    }
}
