//! Grid negotiation with the built-in EPSG reprojector.

use chrono::{DateTime, Utc};
use projection::{EpsgReprojector, ProjectionError};
use test_utils::{
    assert_approx_eq, assert_coords_approx_eq, crs, mercator, synthetic_layer,
    web_mercator_layer,
};
use wcs_common::ServiceConfig;
use wcs_scaler::{Axis, GridScaler, ScalerError};

#[test]
fn test_mercator_request_to_geographic() {
    test_utils::init_tracing();
    let layer = web_mercator_layer();
    let reprojector = EpsgReprojector::default();
    let mut scaler = GridScaler::new(&layer, &reprojector).unwrap();

    scaler.trim("x", 0.0, mercator::ONE_DEGREE_X).unwrap();
    scaler.trim("y", 0.0, mercator::ONE_DEGREE_Y).unwrap();
    scaler.to_crs(crs::EPSG_4326).unwrap();

    assert_eq!(scaler.crs(), crs::EPSG_4326);
    let (min, max) = (scaler.min(), scaler.max());
    assert_coords_approx_eq!((min.x.unwrap(), min.y.unwrap()), (0.0, 0.0), 1e-8);
    assert_coords_approx_eq!((max.x.unwrap(), max.y.unwrap()), (1.0, 1.0), 1e-8);

    let grid = scaler.finalize().unwrap();
    assert_eq!(grid.size().x, 10_000);
    assert_eq!(grid.size().y, 10_000);
}

#[test]
fn test_geographic_request_to_mercator() {
    let layer = web_mercator_layer();
    let reprojector = EpsgReprojector::default();
    let mut scaler = GridScaler::with_crs(&layer, &reprojector, crs::EPSG_4326).unwrap();

    scaler.trim("longitude", 0.0, 1.0).unwrap();
    scaler.trim("latitude", 0.0, 1.0).unwrap();
    scaler.to_crs(crs::EPSG_3857).unwrap();

    let (min, max) = (scaler.min(), scaler.max());
    assert_coords_approx_eq!((min.x.unwrap(), min.y.unwrap()), (0.0, 0.0), 1e-3);
    assert_approx_eq!(max.x.unwrap(), mercator::ONE_DEGREE_X, 1e-3);
    assert_approx_eq!(max.y.unwrap(), mercator::ONE_DEGREE_Y, 1e-3);

    // 10 m cells
    let affine = scaler.affine().unwrap();
    assert_eq!(scaler.size().x, Some(11_132));
    assert_eq!(scaler.size().y, Some(11_133));
    assert!(affine.is_rectilinear());
    assert_approx_eq!(affine.c, 0.0, 1e-3);
    assert_approx_eq!(affine.f, mercator::ONE_DEGREE_Y, 1e-3);
}

#[test]
fn test_unsubsetted_request_uses_published_extent() {
    let layer = web_mercator_layer();
    let reprojector = EpsgReprojector::default();
    let mut scaler = GridScaler::new(&layer, &reprojector).unwrap();

    scaler.to_crs(crs::EPSG_4326).unwrap();
    assert_eq!(scaler.min().x, Some(0.0));
    assert_eq!(scaler.max().y, Some(1.0));

    scaler.set_size("longitude", 4.0).unwrap();
    scaler.set_size("lat", 2.0).unwrap();

    let times: Vec<DateTime<Utc>> = vec!["2023-06-01T10:30:00Z".parse().unwrap()];
    let dataset = scaler.empty_dataset(&["red", "nir"], &times).unwrap();
    assert_eq!(dataset.dims(), ["time", "latitude", "longitude"]);
    assert_eq!(dataset.shape(), (1, 2, 4));
    assert_eq!(dataset.y.values.to_vec(), vec![0.0, 1.0]);
    assert_eq!(dataset.bands.len(), 2);
}

#[test]
fn test_point_request_to_geographic() {
    let layer = web_mercator_layer();
    let reprojector = EpsgReprojector::default();
    let mut scaler = GridScaler::new(&layer, &reprojector).unwrap();

    scaler.slice("x", mercator::ONE_DEGREE_X).unwrap();
    scaler.slice("y", mercator::ONE_DEGREE_Y).unwrap();
    scaler.to_crs(crs::EPSG_4326).unwrap();

    let (min, max) = (scaler.min(), scaler.max());
    assert_coords_approx_eq!((min.x.unwrap(), min.y.unwrap()), (1.0, 1.0), 1e-8);
    assert_coords_approx_eq!((max.x.unwrap(), max.y.unwrap()), (1.0001, 1.0001), 1e-8);
    assert_eq!(scaler.size().x, Some(1));
    assert_eq!(scaler.size().y, Some(1));
}

#[test]
fn test_small_request_snaps_to_one_cell() {
    let layer = web_mercator_layer();
    let reprojector = EpsgReprojector::default();
    let mut scaler = GridScaler::new(&layer, &reprojector).unwrap();

    // About 5 m wide, less than one 0.0001° cell.
    scaler.trim("x", 1000.0, 1005.0).unwrap();
    scaler.trim("y", 0.0, mercator::ONE_DEGREE_Y).unwrap();
    scaler.to_crs(crs::EPSG_4326).unwrap();

    let (min, max) = (scaler.min(), scaler.max());
    assert_approx_eq!(max.x.unwrap() - min.x.unwrap(), 0.0001, 1e-12);
    assert_eq!(scaler.size().x, Some(1));
    assert_eq!(scaler.size().y, None);
}

#[test]
fn test_unsupported_crs() {
    let layer = synthetic_layer();
    let reprojector = EpsgReprojector::default();
    let mut scaler = GridScaler::new(&layer, &reprojector).unwrap();

    scaler.trim("x", 0.0, 10.0).unwrap();
    scaler.trim("y", 0.0, 10.0).unwrap();
    let err = scaler.to_crs(crs::CRS_B).unwrap_err();

    assert!(matches!(
        err,
        ScalerError::Projection(ProjectionError::UnsupportedCrs(ref c)) if c == crs::CRS_A
    ));
    assert_eq!(err.ows_exception_code(), "NoApplicableCode");
    assert!(matches!(
        scaler.set_size("x", 0.0),
        Err(ScalerError::IllegalSize(_))
    ));
    assert_eq!(scaler.axis("y").unwrap(), Axis::Y);
}

#[test]
fn test_albers_layer_to_geographic() {
    let path = test_utils::testdata_file("wcs-common", "service.yaml");
    let registry = ServiceConfig::load(&path).unwrap().into_registry();
    let layer = registry.get("s2_l2a").unwrap();
    let reprojector = EpsgReprojector::default();

    let mut scaler = GridScaler::new(layer, &reprojector).unwrap();
    assert_eq!(scaler.crs(), "EPSG:3577");
    scaler.trim("x", 0.0, 100_000.0).unwrap();
    scaler.trim("y", -3_000_000.0, -2_900_000.0).unwrap();
    scaler.to_crs(crs::EPSG_4326).unwrap();

    assert_eq!(scaler.crs(), crs::EPSG_4326);
    let (min, max) = (scaler.min(), scaler.max());
    // x = 0 is the central meridian (132°E).
    assert_approx_eq!(min.x.unwrap(), 132.0, 1e-6);
    assert_approx_eq!(max.x.unwrap(), 133.025_95, 1e-3);
    assert_approx_eq!(min.y.unwrap(), -27.652_33, 1e-3);
    assert_approx_eq!(max.y.unwrap(), -26.757_34, 1e-3);

    let grid = scaler.finalize().unwrap();
    assert!((10_250..=10_270).contains(&grid.size().x), "width {}", grid.size().x);
    assert!((8_940..=8_960).contains(&grid.size().y), "height {}", grid.size().y);
}
