//! Output grid negotiation for coverage requests.
//!
//! A client describes the grid it wants with some mix of subsets, sizes,
//! scale factors and an output CRS. [`GridScaler`] collects those requests,
//! rejects contradictory ones, reprojects the extent when the CRS changes and
//! finally produces a [`ResolvedGrid`]: extent, raster size, [`Affine`]
//! transform and an empty, no-data filled [`EmptyDataset`] for the data
//! loader to write into.
//!
//! # Example
//!
//! ```ignore
//! use projection::EpsgReprojector;
//! use wcs_scaler::GridScaler;
//!
//! let reprojector = EpsgReprojector::default();
//! let mut scaler = GridScaler::new(&layer, &reprojector)?;
//! scaler.trim("x", 0.0, 50_000.0)?;
//! scaler.trim("y", 0.0, 50_000.0)?;
//! scaler.to_crs("EPSG:4326")?;
//! scaler.set_size("longitude", 256.0)?;
//!
//! let grid = scaler.finalize()?;
//! let transform = grid.affine();
//! let buffer = grid.empty_dataset(&["red", "nir"], &times)?;
//! ```

pub mod affine;
pub mod axis;
pub mod dataset;
pub mod error;
pub mod resolved;
pub mod scaler;

pub use affine::Affine;
pub use axis::{Axis, AxisLabels, AxisParam};
pub use dataset::{CoordinateAxis, EmptyDataset, MAX_AXIS_CELLS, MAX_BAND_CELLS};
pub use error::{ScalerError, ScalerResult};
pub use resolved::ResolvedGrid;
pub use scaler::GridScaler;
