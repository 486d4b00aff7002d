//! Test support shared by the coverage scaler crates.
//!
//! - [`fixtures`]: CRS tables and coverage layers with known extents
//! - [`LinearReprojector`]: a reprojector with exact, recordable results
//! - [`paths`]: locations of checked-in test data
//! - float assertions: [`assert_approx_eq!`] and [`assert_coords_approx_eq!`]
//!
//! Only integration tests (`tests/`) should pull this crate in; it depends on
//! `wcs-common` and `projection` itself.

pub mod fixtures;
pub mod paths;
pub mod reprojectors;

pub use fixtures::*;
pub use paths::*;
pub use reprojectors::LinearReprojector;

/// Route `tracing` output of the code under test through the test harness.
///
/// Filtering follows `RUST_LOG`. Repeated calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `|left - right| <= epsilon`, used by the assertion macros.
#[doc(hidden)]
pub fn within(left: f64, right: f64, epsilon: f64) -> bool {
    (left - right).abs() <= epsilon
}

/// Assert that two numbers differ by at most `epsilon`.
///
/// ```ignore
/// assert_approx_eq!(grid.max().x, 10.5, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        if !$crate::within(left, right, epsilon) {
            panic!(
                "assertion failed: {} ≈ {}\n  left: {:?}\n right: {:?}\n  diff: {:?} (epsilon {:?})",
                stringify!($left),
                stringify!($right),
                left,
                right,
                (left - right).abs(),
                epsilon
            );
        }
    }};
}

/// Assert that two `(x, y)` pairs match component-wise within `epsilon`.
///
/// ```ignore
/// let (x, y) = geom.coords()[0];
/// assert_coords_approx_eq!((x, y), (0.5, 0.7), 1e-9);
/// ```
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $epsilon:expr $(,)?) => {{
        $crate::assert_approx_eq!($x1, $x2, $epsilon);
        $crate::assert_approx_eq!($y1, $y2, $epsilon);
    }};
}
