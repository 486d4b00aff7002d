//! The immutable result of grid negotiation.

use chrono::{DateTime, Utc};
use wcs_common::{CoverageLayer, CrsDefinition};

use tracing::warn;

use crate::dataset::{CoordinateAxis, EmptyDataset, MAX_BAND_CELLS};
use crate::{Affine, AxisParam, ScalerError, ScalerResult};

/// A fully specified output grid: CRS, extent and raster size.
#[derive(Debug, Clone)]
pub struct ResolvedGrid<'a> {
    pub(crate) layer: &'a CoverageLayer,
    pub(crate) crs: String,
    pub(crate) crs_def: &'a CrsDefinition,
    pub(crate) min: AxisParam<f64>,
    pub(crate) max: AxisParam<f64>,
    pub(crate) size: AxisParam<usize>,
}

impl<'a> ResolvedGrid<'a> {
    pub fn crs(&self) -> &str {
        &self.crs
    }

    pub fn crs_def(&self) -> &CrsDefinition {
        self.crs_def
    }

    pub fn min(&self) -> AxisParam<f64> {
        self.min
    }

    pub fn max(&self) -> AxisParam<f64> {
        self.max
    }

    /// Raster size in cells.
    pub fn size(&self) -> AxisParam<usize> {
        self.size
    }

    /// Transform from output pixel `(col, row)` to CRS coordinates.
    ///
    /// Row 0 is the top (maximum y) row, so the y scale is negative for a
    /// north-up extent.
    pub fn affine(&self) -> Affine {
        let x_scale = (self.max.x - self.min.x) / self.size.x as f64;
        let y_scale = (self.min.y - self.max.y) / self.size.y as f64;
        Affine::translation(self.min.x, self.max.y) * Affine::scale(x_scale, y_scale)
    }

    /// An output buffer for `bands` at `times`, filled with each band's
    /// no-data value.
    ///
    /// Fails without allocating when a band would exceed [`MAX_BAND_CELLS`].
    pub fn empty_dataset<S: AsRef<str>>(
        &self,
        bands: &[S],
        times: &[DateTime<Utc>],
    ) -> ScalerResult<EmptyDataset> {
        // The coordinate axes are allocated even without time steps.
        let cells = times
            .len()
            .max(1)
            .checked_mul(self.size.y)
            .and_then(|n| n.checked_mul(self.size.x));
        if !matches!(cells, Some(n) if n <= MAX_BAND_CELLS) {
            warn!(
                times = times.len(),
                rows = self.size.y,
                columns = self.size.x,
                "Output buffer too large"
            );
            return Err(ScalerError::OutputTooLarge {
                times: times.len(),
                rows: self.size.y,
                columns: self.size.x,
                limit: MAX_BAND_CELLS,
            });
        }

        let fills = bands
            .iter()
            .map(|band| -> ScalerResult<(String, f64)> {
                let band = band.as_ref();
                Ok((band.to_string(), self.layer.nodata(band)?))
            })
            .collect::<ScalerResult<Vec<_>>>()?;

        let x = CoordinateAxis::linspace(
            self.crs_def.horizontal_coord.clone(),
            self.min.x,
            self.max.x,
            self.size.x,
        );
        let y = CoordinateAxis::linspace(
            self.crs_def.vertical_coord.clone(),
            self.min.y,
            self.max.y,
            self.size.y,
        );

        Ok(EmptyDataset::new(
            times.to_vec(),
            x,
            y,
            self.crs_def.axis_order(),
            fills,
        ))
    }
}
