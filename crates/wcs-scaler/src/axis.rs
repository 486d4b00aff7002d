//! Two-slot (x/y) containers addressed by dimension labels.
//!
//! Clients name spatial dimensions in many ways: generic "x"/"lat" style
//! aliases, or the coordinate names of the CRS in use ("easting",
//! "longitude", ...). [`AxisLabels`] maps such a label to an [`Axis`], and
//! [`AxisParam`] stores one value per axis.

use std::fmt;
use std::ops::{Index, IndexMut};

use wcs_common::CrsDefinition;

use crate::{ScalerError, ScalerResult};

/// Labels that always address the horizontal axis.
const X_ALIASES: &[&str] = &["x", "i", "lon", "long", "lng", "longitude"];

/// Labels that always address the vertical axis.
const Y_ALIASES: &[&str] = &["y", "j", "lat", "latitude"];

/// A horizontal or vertical spatial axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both axes, x first.
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Axis names a dimension label is resolved against: those of the CRS in
/// effect, then those of the layer's native CRS, then the fixed aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    current: (String, String),
    native: (String, String),
}

impl AxisLabels {
    pub fn new(current: &CrsDefinition, native: &CrsDefinition) -> Self {
        let names = |def: &CrsDefinition| {
            (
                def.horizontal_coord.to_lowercase(),
                def.vertical_coord.to_lowercase(),
            )
        };
        Self {
            current: names(current),
            native: names(native),
        }
    }

    /// Resolve a dimension label (case-insensitive) to an axis.
    pub fn resolve(&self, label: &str) -> ScalerResult<Axis> {
        let label = label.to_lowercase();

        for (horizontal, vertical) in [&self.current, &self.native] {
            if label == *horizontal {
                return Ok(Axis::X);
            }
            if label == *vertical {
                return Ok(Axis::Y);
            }
        }

        if X_ALIASES.contains(&label.as_str()) {
            Ok(Axis::X)
        } else if Y_ALIASES.contains(&label.as_str()) {
            Ok(Axis::Y)
        } else {
            Err(ScalerError::UnknownDimension(label))
        }
    }

    /// Horizontal and vertical coordinate names of the CRS in effect.
    pub fn current(&self) -> (&str, &str) {
        (&self.current.0, &self.current.1)
    }
}

/// One value per spatial axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisParam<T> {
    pub x: T,
    pub y: T,
}

impl<T> AxisParam<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Value of the axis addressed by `label`.
    pub fn get(&self, label: &str, labels: &AxisLabels) -> ScalerResult<&T> {
        Ok(&self[labels.resolve(label)?])
    }

    /// Store `value` in the axis addressed by `label`.
    pub fn set(&mut self, label: &str, value: T, labels: &AxisLabels) -> ScalerResult<()> {
        self[labels.resolve(label)?] = value;
        Ok(())
    }

    /// Assign both slots directly.
    pub fn set_both(&mut self, x: T, y: T) {
        self.x = x;
        self.y = y;
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> AxisParam<U> {
        AxisParam {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

impl<T> Index<Axis> for AxisParam<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl<T> IndexMut<Axis> for AxisParam<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn easting_northing() -> CrsDefinition {
        CrsDefinition {
            horizontal_coord: "Easting".to_string(),
            vertical_coord: "Northing".to_string(),
            vertical_coord_first: false,
            geographic: false,
            gml_name: None,
        }
    }

    fn labels() -> AxisLabels {
        AxisLabels::new(&easting_northing(), &CrsDefinition::geographic())
    }

    #[test]
    fn test_resolve_current_crs_names() {
        let labels = labels();
        assert_eq!(labels.resolve("easting").unwrap(), Axis::X);
        assert_eq!(labels.resolve("NORTHING").unwrap(), Axis::Y);
    }

    #[test]
    fn test_resolve_native_crs_names() {
        let labels = labels();
        assert_eq!(labels.resolve("longitude").unwrap(), Axis::X);
        assert_eq!(labels.resolve("latitude").unwrap(), Axis::Y);
    }

    #[test]
    fn test_resolve_aliases() {
        let labels = labels();
        for alias in X_ALIASES {
            assert_eq!(labels.resolve(alias).unwrap(), Axis::X, "alias {}", alias);
        }
        for alias in Y_ALIASES {
            assert_eq!(labels.resolve(alias).unwrap(), Axis::Y, "alias {}", alias);
        }
    }

    #[test]
    fn test_current_crs_takes_precedence_over_aliases() {
        // A CRS whose horizontal axis is called "y" claims that label.
        let swapped = CrsDefinition {
            horizontal_coord: "y".to_string(),
            vertical_coord: "x".to_string(),
            ..CrsDefinition::projected()
        };
        let labels = AxisLabels::new(&swapped, &CrsDefinition::projected());
        assert_eq!(labels.resolve("y").unwrap(), Axis::X);
        assert_eq!(labels.resolve("x").unwrap(), Axis::Y);
        assert_eq!(labels.resolve("lat").unwrap(), Axis::Y);
    }

    #[test]
    fn test_unknown_label() {
        let result = labels().resolve("time");
        assert!(matches!(result, Err(ScalerError::UnknownDimension(ref l)) if l == "time"));
    }

    #[test]
    fn test_param_get_set() {
        let labels = labels();
        let mut param: AxisParam<Option<f64>> = AxisParam::default();

        param.set("easting", Some(1.5), &labels).unwrap();
        param.set("lat", Some(-2.0), &labels).unwrap();
        assert_eq!(*param.get("x", &labels).unwrap(), Some(1.5));
        assert_eq!(param[Axis::Y], Some(-2.0));

        assert!(param.set("band", None, &labels).is_err());
        assert_eq!(param.x, Some(1.5));
    }

    #[test]
    fn test_set_both() {
        let mut param = AxisParam::new(false, false);
        param.set_both(true, false);
        assert!(param[Axis::X]);
        assert!(!param[Axis::Y]);
    }
}
