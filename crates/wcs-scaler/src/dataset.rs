//! Empty, labeled output buffers for the data loader to fill.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array3};
use tracing::warn;
use wcs_common::AxisOrder;

/// Largest raster size accepted for one spatial axis.
pub const MAX_AXIS_CELLS: u32 = u32::MAX;

/// Largest number of cells (times × rows × columns) allocated per band.
pub const MAX_BAND_CELLS: usize = 1 << 30;

/// A named coordinate axis with one value per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateAxis {
    pub name: String,
    pub values: Array1<f64>,
}

impl CoordinateAxis {
    /// `num` evenly spaced values from `start` to `end` inclusive. A single
    /// value is `start`.
    pub fn linspace(name: impl Into<String>, start: f64, end: f64, num: usize) -> Self {
        Self {
            name: name.into(),
            values: Array1::linspace(start, end, num),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A multi-band, multi-time raster pre-filled with each band's no-data value.
///
/// Every band array has the dimensions named in `dims`: time first, then the
/// two spatial axes in the order declared by the CRS.
#[derive(Debug, Clone)]
pub struct EmptyDataset {
    pub times: Vec<DateTime<Utc>>,
    pub x: CoordinateAxis,
    pub y: CoordinateAxis,
    pub spatial_order: AxisOrder,
    pub bands: BTreeMap<String, Array3<i16>>,
}

impl EmptyDataset {
    pub(crate) fn new(
        times: Vec<DateTime<Utc>>,
        x: CoordinateAxis,
        y: CoordinateAxis,
        spatial_order: AxisOrder,
        fills: impl IntoIterator<Item = (String, f64)>,
    ) -> Self {
        let shape = match spatial_order {
            AxisOrder::YX => (times.len(), y.len(), x.len()),
            AxisOrder::XY => (times.len(), x.len(), y.len()),
        };

        let bands = fills
            .into_iter()
            .map(|(band, nodata)| {
                let fill = nodata_as_i16(&band, nodata);
                (band, Array3::from_elem(shape, fill))
            })
            .collect();

        Self {
            times,
            x,
            y,
            spatial_order,
            bands,
        }
    }

    /// Dimension names of every band array, outermost first.
    pub fn dims(&self) -> [&str; 3] {
        match self.spatial_order {
            AxisOrder::YX => ["time", &self.y.name, &self.x.name],
            AxisOrder::XY => ["time", &self.x.name, &self.y.name],
        }
    }

    /// Shape shared by every band array.
    pub fn shape(&self) -> (usize, usize, usize) {
        match self.spatial_order {
            AxisOrder::YX => (self.times.len(), self.y.len(), self.x.len()),
            AxisOrder::XY => (self.times.len(), self.x.len(), self.y.len()),
        }
    }

    pub fn band(&self, name: &str) -> Option<&Array3<i16>> {
        self.bands.get(name)
    }

    pub fn band_mut(&mut self, name: &str) -> Option<&mut Array3<i16>> {
        self.bands.get_mut(name)
    }
}

/// Convert a no-data value to the output sample type. Fractions truncate
/// toward zero and out-of-range values saturate; non-finite values become 0.
fn nodata_as_i16(band: &str, nodata: f64) -> i16 {
    if !nodata.is_finite() {
        warn!(band = %band, nodata = nodata, "No-data value is not finite, filling with 0");
        return 0;
    }
    if nodata < i16::MIN as f64 || nodata > i16::MAX as f64 {
        warn!(band = %band, nodata = nodata, "No-data value does not fit in int16, saturating");
    }
    nodata as i16
}
