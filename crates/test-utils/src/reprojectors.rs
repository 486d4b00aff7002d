//! Deterministic reprojectors for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use projection::{Geometry, ProjectionError, Reprojector, Result};

/// Per-axis linear transform: `x' = x * scale.0 + offset.0`, same for y.
#[derive(Debug, Clone, Copy)]
struct Linear {
    scale: (f64, f64),
    offset: (f64, f64),
}

impl Linear {
    fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            x * self.scale.0 + self.offset.0,
            y * self.scale.1 + self.offset.1,
        )
    }

    fn inverse(&self) -> Self {
        Self {
            scale: (1.0 / self.scale.0, 1.0 / self.scale.1),
            offset: (
                -self.offset.0 / self.scale.0,
                -self.offset.1 / self.scale.1,
            ),
        }
    }
}

/// A reprojector between named CRSs related by axis-wise linear maps.
///
/// Every geometry passed to [`Reprojector::reproject`] is recorded so tests
/// can check which kind of geometry a caller built.
#[derive(Debug, Default)]
pub struct LinearReprojector {
    transforms: HashMap<(String, String), Linear>,
    calls: Mutex<Vec<(Geometry, String)>>,
}

impl LinearReprojector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `from` → `to` and its inverse.
    pub fn with(
        mut self,
        from: &str,
        to: &str,
        scale: (f64, f64),
        offset: (f64, f64),
    ) -> Self {
        let linear = Linear { scale, offset };
        self.transforms
            .insert((to.to_string(), from.to_string()), linear.inverse());
        self.transforms
            .insert((from.to_string(), to.to_string()), linear);
        self
    }

    /// The reprojector matching the synthetic fixture layer: "B" is "A"
    /// divided by ten.
    pub fn synthetic() -> Self {
        Self::new().with(
            crate::fixtures::crs::CRS_A,
            crate::fixtures::crs::CRS_B,
            (0.1, 0.1),
            (0.0, 0.0),
        )
    }

    /// Geometries received so far, with their target CRS.
    pub fn calls(&self) -> Vec<(Geometry, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl Reprojector for LinearReprojector {
    fn reproject(&self, geom: &Geometry, target_crs: &str) -> Result<Geometry> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((geom.clone(), target_crs.to_string()));
        }

        if geom.crs == target_crs {
            return Ok(geom.clone());
        }

        let linear = self
            .transforms
            .get(&(geom.crs.clone(), target_crs.to_string()))
            .ok_or_else(|| ProjectionError::UnsupportedCrs(target_crs.to_string()))?;

        geom.map_coords(target_crs, |p| Ok(linear.apply(p)))
    }
}
