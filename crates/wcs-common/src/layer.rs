//! Coverage layer metadata consumed by the scaler.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{CrsBoundingBox, CrsDefinition, CrsRegistry, NativeGrid, WcsError, WcsResult};

/// Read-only metadata of a published coverage layer.
///
/// Holds everything needed to negotiate an output grid: the CRS table of the
/// service, the layer's native CRS, its native grid and full extent in every
/// CRS it is offered in, and the fill value of each band.
#[derive(Debug, Clone)]
pub struct CoverageLayer {
    /// Layer name as advertised in capabilities
    pub name: String,
    /// Identifier of the layer's native CRS
    pub native_crs: String,
    /// CRS table shared by all layers of the service
    pub published_crs: Arc<CrsRegistry>,
    /// Native grid per CRS identifier
    pub grids: HashMap<String, NativeGrid>,
    /// Full layer extent per CRS identifier
    pub bboxes: HashMap<String, CrsBoundingBox>,
    /// No-data fill value per band name
    pub nodata: HashMap<String, f64>,
}

impl CoverageLayer {
    /// Create a layer with no grids, extents or bands.
    pub fn new(
        name: impl Into<String>,
        native_crs: impl Into<String>,
        published_crs: Arc<CrsRegistry>,
    ) -> Self {
        Self {
            name: name.into(),
            native_crs: native_crs.into(),
            published_crs,
            grids: HashMap::new(),
            bboxes: HashMap::new(),
            nodata: HashMap::new(),
        }
    }

    pub fn with_grid(mut self, crs: impl Into<String>, grid: NativeGrid) -> Self {
        self.grids.insert(crs.into(), grid);
        self
    }

    pub fn with_bbox(mut self, crs: impl Into<String>, bbox: CrsBoundingBox) -> Self {
        self.bboxes.insert(crs.into(), bbox);
        self
    }

    pub fn with_band(mut self, band: impl Into<String>, nodata: f64) -> Self {
        self.nodata.insert(band.into(), nodata);
        self
    }

    /// Definition of a published CRS.
    pub fn crs_def(&self, crs: &str) -> WcsResult<&CrsDefinition> {
        self.published_crs.get(crs)
    }

    /// Definition of the layer's native CRS.
    pub fn native_crs_def(&self) -> WcsResult<&CrsDefinition> {
        self.published_crs.get(&self.native_crs)
    }

    /// Native grid of the layer in `crs`.
    pub fn grid(&self, crs: &str) -> WcsResult<&NativeGrid> {
        self.grids.get(crs).ok_or_else(|| WcsError::MissingGrid {
            layer: self.name.clone(),
            crs: crs.to_string(),
        })
    }

    /// Full extent of the layer in `crs`.
    pub fn bbox(&self, crs: &str) -> WcsResult<&CrsBoundingBox> {
        self.bboxes
            .get(crs)
            .ok_or_else(|| WcsError::MissingBoundingBox {
                layer: self.name.clone(),
                crs: crs.to_string(),
            })
    }

    /// Fill value of `band`.
    pub fn nodata(&self, band: &str) -> WcsResult<f64> {
        self.nodata
            .get(band)
            .copied()
            .ok_or_else(|| WcsError::UnknownBand {
                layer: self.name.clone(),
                band: band.to_string(),
            })
    }

    /// Band names in sorted order.
    pub fn bands(&self) -> Vec<&str> {
        let mut bands: Vec<&str> = self.nodata.keys().map(String::as_str).collect();
        bands.sort_unstable();
        bands
    }
}
