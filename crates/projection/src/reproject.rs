//! Reprojection of geometries between coordinate reference systems.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use tracing::trace;

use crate::geometry::Geometry;
use crate::{ProjectionError, Result};

/// Latitude beyond which Mercator targets are clamped, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Moves geometries from their own CRS into another one.
///
/// Implementations must be pure: the same geometry and target always give the
/// same result, and no state is shared between calls.
pub trait Reprojector: Send + Sync {
    /// Reproject `geom` into `target_crs`.
    fn reproject(&self, geom: &Geometry, target_crs: &str) -> Result<Geometry>;
}

/// EPSG code of a CRS identifier.
///
/// Accepts "EPSG:3577", the OGC URN and URL forms, and the CRS:84 and
/// EPSG:900913 aliases.
fn epsg_code(crs: &str) -> Option<u16> {
    let upper = crs.trim().to_uppercase();
    match upper.as_str() {
        "CRS:84" | "OGC:CRS84" | "CRS84" => return Some(4326),
        "EPSG:900913" => return Some(3857),
        _ => {}
    }
    if !upper.contains("EPSG") {
        return None;
    }
    upper
        .rsplit(|c: char| c == ':' || c == '/')
        .next()
        .and_then(|code| code.parse().ok())
}

/// PROJ string of a CRS identifier from the crs-definitions database.
fn proj_string(crs: &str) -> Option<&'static str> {
    epsg_code(crs)
        .and_then(crs_definitions::from_code)
        .map(|def| def.proj4)
}

/// A parsed CRS ready for transformation.
struct CrsHandle {
    code: u16,
    proj: Proj,
    /// Coordinates are degrees (proj4rs works in radians)
    geographic: bool,
    mercator: bool,
}

impl CrsHandle {
    fn new(crs: &str) -> Result<Self> {
        let unsupported = || ProjectionError::UnsupportedCrs(crs.to_string());
        let code = epsg_code(crs).ok_or_else(unsupported)?;
        let definition = crs_definitions::from_code(code)
            .map(|def| def.proj4)
            .ok_or_else(unsupported)?;
        let proj = Proj::from_proj_string(definition).map_err(|e| {
            ProjectionError::InvalidDefinition {
                crs: crs.to_string(),
                reason: format!("{:?}", e),
            }
        })?;

        Ok(Self {
            code,
            proj,
            geographic: definition.contains("+proj=longlat"),
            mercator: definition.contains("+proj=merc"),
        })
    }
}

/// Built-in reprojector for any CRS in the EPSG database.
///
/// Lines and polygons are densified before transformation so the envelope of
/// the result follows edges that become curved in the target CRS.
#[derive(Debug, Clone)]
pub struct EpsgReprojector {
    /// Number of parts each segment is split into before transformation
    pub segments: usize,
}

impl Default for EpsgReprojector {
    fn default() -> Self {
        Self { segments: 16 }
    }
}

impl EpsgReprojector {
    pub fn new(segments: usize) -> Self {
        Self { segments }
    }

    /// Whether `crs` can be used as a source or target.
    pub fn supports(crs: &str) -> bool {
        proj_string(crs).is_some()
    }

    fn transform_point(
        from: &CrsHandle,
        to: &CrsHandle,
        target_crs: &str,
        (x, y): (f64, f64),
    ) -> Result<(f64, f64)> {
        let out_of_domain = || ProjectionError::OutOfDomain {
            x,
            y,
            crs: target_crs.to_string(),
        };

        let mut point = if from.geographic {
            let lat = if to.mercator {
                y.clamp(-MAX_LATITUDE, MAX_LATITUDE)
            } else {
                y
            };
            (x.to_radians(), lat.to_radians(), 0.0)
        } else {
            (x, y, 0.0)
        };

        transform(&from.proj, &to.proj, &mut point).map_err(|_| out_of_domain())?;

        let (px, py) = if to.geographic {
            (point.0.to_degrees(), point.1.to_degrees())
        } else {
            (point.0, point.1)
        };

        if px.is_finite() && py.is_finite() {
            Ok((px, py))
        } else {
            Err(out_of_domain())
        }
    }
}

impl Reprojector for EpsgReprojector {
    fn reproject(&self, geom: &Geometry, target_crs: &str) -> Result<Geometry> {
        let from = CrsHandle::new(&geom.crs)?;
        let to = CrsHandle::new(target_crs)?;

        trace!(from = %geom.crs, to = %target_crs, "Reprojecting geometry");

        if from.code == to.code {
            return geom.map_coords(target_crs, |p| Ok(p));
        }

        geom.densify(self.segments)
            .map_coords(target_crs, |p| Self::transform_point(&from, &to, target_crs, p))
    }
}
