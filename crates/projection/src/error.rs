//! Error types for geometry reprojection.

use thiserror::Error;

/// Errors that can occur while reprojecting a geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The CRS identifier is not in the EPSG database.
    #[error("unsupported CRS: {0}")]
    UnsupportedCrs(String),

    /// The database definition of the CRS could not be parsed.
    #[error("invalid definition for {crs}: {reason}")]
    InvalidDefinition { crs: String, reason: String },

    /// A line or polygon was built with no coordinates.
    #[error("geometry has no coordinates")]
    EmptyGeometry,

    /// A coordinate could not be represented in the target CRS.
    #[error("coordinate ({x}, {y}) is outside the domain of {crs}")]
    OutOfDomain { x: f64, y: f64, crs: String },
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
