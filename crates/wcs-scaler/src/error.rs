//! Error types for output grid negotiation.

use projection::ProjectionError;
use thiserror::Error;
use wcs_common::WcsError;

use crate::Axis;

/// Errors raised while resolving an output grid. All are fatal to the request.
#[derive(Error, Debug)]
pub enum ScalerError {
    /// The dimension label matches neither the current nor the native CRS
    /// axes, nor a generic x/y alias.
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    /// The output size of the axis was already requested.
    #[error("size of the {0} axis is specified more than once")]
    OverspecifiedDimension(Axis),

    /// The requested size is not a positive number of cells.
    #[error("illegal size: {0}")]
    IllegalSize(f64),

    /// The output buffer would hold more cells per band than can be allocated.
    #[error("output of {times} x {rows} x {columns} cells per band exceeds the limit of {limit}")]
    OutputTooLarge {
        times: usize,
        rows: usize,
        columns: usize,
        limit: usize,
    },

    /// The axis has no extent yet, so its size cannot be derived.
    #[error("extent of the {0} axis is not defined")]
    UndefinedExtent(Axis),

    /// Layer metadata needed by the operation is missing.
    #[error(transparent)]
    Metadata(#[from] WcsError),

    /// The geometry/CRS capability rejected a reprojection.
    #[error("reprojection failed: {0}")]
    Projection(#[from] ProjectionError),
}

impl ScalerError {
    /// Get the OGC exception code for this error.
    pub fn ows_exception_code(&self) -> &'static str {
        match self {
            ScalerError::UnknownDimension(_) => "InvalidAxisLabel",
            ScalerError::OverspecifiedDimension(_) => "InvalidParameterValue",
            ScalerError::IllegalSize(_) => "InvalidScaleFactor",
            ScalerError::OutputTooLarge { .. } => "InvalidParameterValue",
            ScalerError::UndefinedExtent(_) => "InvalidSubsetting",
            ScalerError::Metadata(err) => err.ows_exception_code(),
            ScalerError::Projection(_) => "NoApplicableCode",
        }
    }
}

/// Result type for scaler operations.
pub type ScalerResult<T> = Result<T, ScalerError>;
