//! Common test fixtures for coverage scaler tests.
//!
//! Two layers are provided:
//! - a synthetic layer with CRSs "A" and "B", where "B" is "A" scaled down
//!   by ten (see [`crate::LinearReprojector`]);
//! - a Web Mercator layer covering one degree square at the origin, usable
//!   with the built-in `EpsgReprojector`.

use std::sync::Arc;

use wcs_common::{CoverageLayer, CrsBoundingBox, CrsDefinition, CrsRegistry, NativeGrid};

/// Common CRS identifiers.
pub mod crs {
    /// Synthetic native CRS with "x"/"y" axes
    pub const CRS_A: &str = "A";

    /// Synthetic CRS with "easting"/"northing" axes, vertical first
    pub const CRS_B: &str = "B";

    /// WGS84 geographic
    pub const EPSG_4326: &str = "EPSG:4326";

    /// Web Mercator
    pub const EPSG_3857: &str = "EPSG:3857";
}

/// Band names and fill values used by the fixture layers.
pub mod bands {
    pub const RED: &str = "red";
    pub const NIR: &str = "nir";
    pub const QA: &str = "qa";

    pub const RED_NODATA: f64 = -999.0;
    pub const NIR_NODATA: f64 = -999.0;
    pub const QA_NODATA: f64 = 1.0;
}

/// Web Mercator reference coordinates.
pub mod mercator {
    /// Half the width of the projected world.
    pub const HALF_EXTENT: f64 = 20_037_508.342_789_244;
    pub const ONE_DEGREE_X: f64 = 111_319.490_793_273_57;
    pub const ONE_DEGREE_Y: f64 = 111_325.142_866_384_86;
}

/// CRS definition with "easting"/"northing" axes laid out vertical first.
pub fn easting_northing() -> CrsDefinition {
    CrsDefinition {
        horizontal_coord: "easting".to_string(),
        vertical_coord: "northing".to_string(),
        vertical_coord_first: true,
        geographic: false,
        gml_name: None,
    }
}

/// Published CRS table for the synthetic layer.
pub fn synthetic_crs_registry() -> CrsRegistry {
    CrsRegistry::new()
        .with(crs::CRS_A, CrsDefinition::projected())
        .with(crs::CRS_B, easting_northing())
}

/// Synthetic layer: native CRS "A" covering 0..1000 on both axes, offered in
/// "B" covering 0..100. Both grids have a resolution of 10.
pub fn synthetic_layer() -> CoverageLayer {
    CoverageLayer::new("synthetic", crs::CRS_A, Arc::new(synthetic_crs_registry()))
        .with_grid(crs::CRS_A, NativeGrid::new(10.0, 10.0))
        .with_grid(crs::CRS_B, NativeGrid::new(10.0, 10.0))
        .with_bbox(crs::CRS_A, CrsBoundingBox::new(0.0, 0.0, 1000.0, 1000.0))
        .with_bbox(crs::CRS_B, CrsBoundingBox::new(0.0, 0.0, 100.0, 100.0))
        .with_band(bands::RED, bands::RED_NODATA)
        .with_band(bands::NIR, bands::NIR_NODATA)
        .with_band(bands::QA, bands::QA_NODATA)
}

/// Published CRS table for the Web Mercator layer.
pub fn epsg_crs_registry() -> CrsRegistry {
    CrsRegistry::new()
        .with(crs::EPSG_4326, CrsDefinition::geographic())
        .with(crs::EPSG_3857, CrsDefinition::projected())
}

/// Web Mercator layer covering lon 0..1, lat 0..1 with 10 m native cells and
/// a 0.0001° grid in EPSG:4326.
pub fn web_mercator_layer() -> CoverageLayer {
    CoverageLayer::new("s2_l2a", crs::EPSG_3857, Arc::new(epsg_crs_registry()))
        .with_grid(crs::EPSG_3857, NativeGrid::new(10.0, 10.0))
        .with_grid(crs::EPSG_4326, NativeGrid::new(0.0001, 0.0001))
        .with_bbox(
            crs::EPSG_3857,
            CrsBoundingBox::new(0.0, 0.0, mercator::ONE_DEGREE_X, mercator::ONE_DEGREE_Y),
        )
        .with_bbox(crs::EPSG_4326, CrsBoundingBox::new(0.0, 0.0, 1.0, 1.0))
        .with_band(bands::RED, bands::RED_NODATA)
        .with_band(bands::NIR, bands::NIR_NODATA)
}
