//! Common types shared by the coverage services: CRS definitions, native
//! grids, per-CRS bounding boxes and the layer metadata the scaler reads.

pub mod bbox;
pub mod config;
pub mod crs;
pub mod error;
pub mod grid;
pub mod layer;

pub use bbox::CrsBoundingBox;
pub use config::{LayerRegistry, ServiceConfig};
pub use crs::{AxisOrder, CrsDefinition, CrsRegistry};
pub use error::{WcsError, WcsResult};
pub use grid::NativeGrid;
pub use layer::CoverageLayer;
