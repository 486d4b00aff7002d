//! Service configuration loader.
//!
//! Loads the published CRS table and the coverage layers from a single YAML
//! (or JSON) document:
//!
//! ```yaml
//! published_crs:
//!   "EPSG:4326":
//!     horizontal_coord: longitude
//!     vertical_coord: latitude
//!     vertical_coord_first: true
//!     geographic: true
//! layers:
//!   - name: s2_l2a
//!     native_crs: "EPSG:4326"
//!     grids:
//!       "EPSG:4326": { resolution: [0.001, -0.001] }
//!     bboxes:
//!       "EPSG:4326": { left: 110.0, bottom: -45.0, right: 155.0, top: -10.0 }
//!     bands:
//!       red: -999
//! ```
//!
//! Every CRS a layer refers to must be published; a layer that breaks this
//! rejects the whole document.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{CoverageLayer, CrsBoundingBox, CrsRegistry, NativeGrid, WcsError, WcsResult};

/// Validated service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// CRS table shared by every layer
    pub published_crs: Arc<CrsRegistry>,
    /// Layers in document order
    pub layers: Vec<CoverageLayer>,
}

// ============================================================================
// Parsing Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawServiceConfig {
    published_crs: CrsRegistry,
    #[serde(default)]
    layers: Vec<RawLayer>,
}

#[derive(Debug, Deserialize)]
struct RawLayer {
    name: String,
    native_crs: String,
    #[serde(default)]
    grids: HashMap<String, NativeGrid>,
    #[serde(default)]
    bboxes: HashMap<String, CrsBoundingBox>,
    #[serde(default)]
    bands: HashMap<String, f64>,
}

impl ServiceConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(contents: &str) -> WcsResult<Self> {
        let raw: RawServiceConfig = serde_yaml::from_str(contents)?;
        Self::from_raw(raw)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(contents: &str) -> WcsResult<Self> {
        let raw: RawServiceConfig = serde_json::from_str(contents)?;
        Self::from_raw(raw)
    }

    /// Load a configuration file; `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> WcsResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            warn!(error = %e, path = ?path, "Failed to read service config");
            e
        })?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            Self::from_json_str(&contents)?
        } else {
            Self::from_yaml_str(&contents)?
        };

        info!(
            path = ?path,
            crs = config.published_crs.len(),
            layers = config.layers.len(),
            "Loaded service config"
        );
        Ok(config)
    }

    fn from_raw(raw: RawServiceConfig) -> WcsResult<Self> {
        let published_crs = Arc::new(raw.published_crs);

        let layers = raw
            .layers
            .into_iter()
            .map(|l| -> WcsResult<CoverageLayer> {
                validate_layer(&l, &published_crs)?;
                Ok(CoverageLayer {
                    name: l.name,
                    native_crs: l.native_crs,
                    published_crs: Arc::clone(&published_crs),
                    grids: l.grids,
                    bboxes: l.bboxes,
                    nodata: l.bands,
                })
            })
            .collect::<WcsResult<Vec<_>>>()?;

        Ok(Self {
            published_crs,
            layers,
        })
    }

    /// Index the layers by name.
    pub fn into_registry(self) -> LayerRegistry {
        LayerRegistry::new(self.layers)
    }
}

fn validate_layer(layer: &RawLayer, published: &CrsRegistry) -> WcsResult<()> {
    let referenced = std::iter::once(&layer.native_crs)
        .chain(layer.grids.keys())
        .chain(layer.bboxes.keys());

    for crs in referenced {
        if !published.contains(crs) {
            warn!(layer = %layer.name, crs = %crs, "Layer refers to unpublished CRS");
            return Err(WcsError::UnknownCrs(crs.clone()));
        }
    }

    for (crs, grid) in &layer.grids {
        let usable = |res: f64| res != 0.0 && res.is_finite();
        if !usable(grid.x_res()) || !usable(grid.y_res()) {
            warn!(layer = %layer.name, crs = %crs, "Layer grid has degenerate resolution");
            return Err(WcsError::InvalidConfig(format!(
                "layer '{}' has a zero or non-finite resolution in {}",
                layer.name, crs
            )));
        }
    }

    Ok(())
}

// ============================================================================
// Registry
// ============================================================================

/// Layers indexed by name (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    layers: HashMap<String, CoverageLayer>,
}

impl LayerRegistry {
    pub fn new(layers: impl IntoIterator<Item = CoverageLayer>) -> Self {
        let layers = layers
            .into_iter()
            .map(|l| (l.name.to_lowercase(), l))
            .collect();
        Self { layers }
    }

    /// Find a layer by name.
    pub fn get(&self, name: &str) -> WcsResult<&CoverageLayer> {
        self.layers
            .get(&name.to_lowercase())
            .ok_or_else(|| WcsError::LayerNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
