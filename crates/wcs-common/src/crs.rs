//! Coordinate Reference System definitions published by the service.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{WcsError, WcsResult};

/// Axis order for coordinate interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrder {
    /// X (longitude/easting), Y (latitude/northing)
    XY,
    /// Y (latitude/northing), X (longitude/easting)
    YX,
}

/// How a published CRS names and orders its horizontal and vertical axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrsDefinition {
    /// Name of the horizontal coordinate (e.g. "longitude", "x")
    pub horizontal_coord: String,
    /// Name of the vertical coordinate (e.g. "latitude", "y")
    pub vertical_coord: String,
    /// Whether arrays in this CRS are laid out vertical-coordinate first
    #[serde(default)]
    pub vertical_coord_first: bool,
    /// Whether this is a geographic (lat/lon) CRS
    #[serde(default)]
    pub geographic: bool,
    /// GML URI advertised for this CRS
    #[serde(default)]
    pub gml_name: Option<String>,
}

impl CrsDefinition {
    /// Definition for a projected CRS with "x"/"y" axes.
    pub fn projected() -> Self {
        Self {
            horizontal_coord: "x".to_string(),
            vertical_coord: "y".to_string(),
            vertical_coord_first: false,
            geographic: false,
            gml_name: None,
        }
    }

    /// Definition for a geographic CRS with "longitude"/"latitude" axes.
    pub fn geographic() -> Self {
        Self {
            horizontal_coord: "longitude".to_string(),
            vertical_coord: "latitude".to_string(),
            vertical_coord_first: true,
            geographic: true,
            gml_name: None,
        }
    }

    /// Declared array axis order for the spatial dimensions.
    pub fn axis_order(&self) -> AxisOrder {
        if self.vertical_coord_first {
            AxisOrder::YX
        } else {
            AxisOrder::XY
        }
    }
}

/// The table of CRSs a service publishes, keyed by identifier (e.g. "EPSG:4326").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrsRegistry {
    definitions: HashMap<String, CrsDefinition>,
}

impl CrsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, crs: impl Into<String>, def: CrsDefinition) {
        self.definitions.insert(crs.into(), def);
    }

    /// Builder-style insert.
    pub fn with(mut self, crs: impl Into<String>, def: CrsDefinition) -> Self {
        self.insert(crs, def);
        self
    }

    pub fn contains(&self, crs: &str) -> bool {
        self.definitions.contains_key(crs)
    }

    /// Look up a published CRS.
    pub fn get(&self, crs: &str) -> WcsResult<&CrsDefinition> {
        self.definitions
            .get(crs)
            .ok_or_else(|| WcsError::UnknownCrs(crs.to_string()))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
