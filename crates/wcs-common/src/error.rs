//! Error types for coverage layer metadata.

use thiserror::Error;

/// Result type alias using WcsError.
pub type WcsResult<T> = Result<T, WcsError>;

/// Errors raised while looking up or loading layer metadata.
#[derive(Debug, Error)]
pub enum WcsError {
    // === Metadata lookups ===
    #[error("CRS not published: {0}")]
    UnknownCrs(String),

    #[error("Layer '{layer}' has no native grid for CRS {crs}")]
    MissingGrid { layer: String, crs: String },

    #[error("Layer '{layer}' has no bounding box for CRS {crs}")]
    MissingBoundingBox { layer: String, crs: String },

    #[error("Layer '{layer}' has no band named '{band}'")]
    UnknownBand { layer: String, band: String },

    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    // === Configuration ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl WcsError {
    /// Get the OGC exception code for this error.
    pub fn ows_exception_code(&self) -> &'static str {
        match self {
            WcsError::UnknownCrs(_) => "InvalidParameterValue",
            WcsError::LayerNotFound(_) => "NoSuchCoverage",
            WcsError::UnknownBand { .. } => "InvalidParameterValue",
            _ => "NoApplicableCode",
        }
    }
}
