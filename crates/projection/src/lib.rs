//! Coordinate reference system transformations.
//!
//! Geometries (points, lines, polygons) tagged with a CRS identifier, and the
//! [`Reprojector`] capability that moves them between CRSs. The built-in
//! [`EpsgReprojector`] looks CRS definitions up in the EPSG database
//! (`crs-definitions`) and transforms with `proj4rs`.

pub mod error;
pub mod geometry;
pub mod reproject;

pub use error::{ProjectionError, Result};
pub use geometry::{Geometry, Shape};
pub use reproject::{EpsgReprojector, Reprojector, MAX_LATITUDE};
