//! Simple geometries tagged with the CRS their coordinates are expressed in.

use wcs_common::CrsBoundingBox;

use crate::{ProjectionError, Result};

/// The shape of a geometry. Coordinates are `(x, y)` pairs in the
/// horizontal/vertical order of the CRS, independent of its declared axis
/// order.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point((f64, f64)),
    Line(Vec<(f64, f64)>),
    /// A single closed exterior ring.
    Polygon(Vec<(f64, f64)>),
}

/// A geometry in a named CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub crs: String,
    pub shape: Shape,
}

impl Geometry {
    pub fn point(x: f64, y: f64, crs: impl Into<String>) -> Self {
        Self {
            crs: crs.into(),
            shape: Shape::Point((x, y)),
        }
    }

    pub fn line(coords: Vec<(f64, f64)>, crs: impl Into<String>) -> Result<Self> {
        if coords.is_empty() {
            return Err(ProjectionError::EmptyGeometry);
        }
        Ok(Self {
            crs: crs.into(),
            shape: Shape::Line(coords),
        })
    }

    /// Build a polygon from an exterior ring; the ring is closed if the last
    /// coordinate does not repeat the first.
    pub fn polygon(mut ring: Vec<(f64, f64)>, crs: impl Into<String>) -> Result<Self> {
        let first = *ring.first().ok_or(ProjectionError::EmptyGeometry)?;
        if ring.last() != Some(&first) {
            ring.push(first);
        }
        Ok(Self {
            crs: crs.into(),
            shape: Shape::Polygon(ring),
        })
    }

    pub fn is_point(&self) -> bool {
        matches!(self.shape, Shape::Point(_))
    }

    /// All coordinates of the geometry, in order.
    pub fn coords(&self) -> &[(f64, f64)] {
        match &self.shape {
            Shape::Point(p) => std::slice::from_ref(p),
            Shape::Line(c) | Shape::Polygon(c) => c,
        }
    }

    /// Axis-aligned envelope of the geometry.
    pub fn bounding_box(&self) -> CrsBoundingBox {
        // Constructors reject empty coordinate lists.
        CrsBoundingBox::from_points(self.coords().iter().copied())
            .unwrap_or_else(|| CrsBoundingBox::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN))
    }

    /// Apply `f` to every coordinate, producing a geometry in `crs`.
    pub fn map_coords<F>(&self, crs: impl Into<String>, mut f: F) -> Result<Self>
    where
        F: FnMut((f64, f64)) -> Result<(f64, f64)>,
    {
        let shape = match &self.shape {
            Shape::Point(p) => Shape::Point(f(*p)?),
            Shape::Line(c) => Shape::Line(c.iter().map(|p| f(*p)).collect::<Result<_>>()?),
            Shape::Polygon(c) => Shape::Polygon(c.iter().map(|p| f(*p)).collect::<Result<_>>()?),
        };
        Ok(Self {
            crs: crs.into(),
            shape,
        })
    }

    /// Insert intermediate vertices so that every segment of a line or
    /// polygon is split into `segments` equal parts. Points are unchanged.
    pub fn densify(&self, segments: usize) -> Self {
        let densify_path = |coords: &[(f64, f64)]| -> Vec<(f64, f64)> {
            if segments <= 1 || coords.len() < 2 {
                return coords.to_vec();
            }
            let mut out = Vec::with_capacity((coords.len() - 1) * segments + 1);
            for pair in coords.windows(2) {
                let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
                for step in 0..segments {
                    let t = step as f64 / segments as f64;
                    out.push((x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));
                }
            }
            out.extend(coords.last().copied());
            out
        };

        let shape = match &self.shape {
            Shape::Point(p) => Shape::Point(*p),
            Shape::Line(c) => Shape::Line(densify_path(c)),
            Shape::Polygon(c) => Shape::Polygon(densify_path(c)),
        };
        Self {
            crs: self.crs.clone(),
            shape,
        }
    }
}
