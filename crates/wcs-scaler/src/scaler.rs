//! Incremental negotiation of a coverage request's output grid.
//!
//! A [`GridScaler`] starts from the layer's full extent in the request CRS
//! and is narrowed by subsets (`slice`, `trim`), given a raster size by
//! exactly one of the size-setting operations per axis, and optionally moved
//! to another CRS with [`GridScaler::to_crs`]. [`GridScaler::finalize`] turns
//! it into an immutable [`ResolvedGrid`].
//!
//! Operations are order dependent: `scale_axis` uses the extent and CRS in
//! effect when it is called, and `to_crs` only reprojects axes that were
//! subsetted.

use projection::{Geometry, Reprojector};
use tracing::debug;
use wcs_common::{CoverageLayer, CrsDefinition, NativeGrid};

use crate::dataset::{EmptyDataset, MAX_AXIS_CELLS};
use crate::resolved::ResolvedGrid;
use crate::{Affine, Axis, AxisLabels, AxisParam, ScalerError, ScalerResult};

/// Mutable, request-scoped output grid builder.
pub struct GridScaler<'a> {
    layer: &'a CoverageLayer,
    reprojector: &'a dyn Reprojector,
    crs: String,
    crs_def: &'a CrsDefinition,
    native_def: &'a CrsDefinition,
    labels: AxisLabels,
    min: AxisParam<Option<f64>>,
    max: AxisParam<Option<f64>>,
    size: AxisParam<Option<usize>>,
    subsetted: AxisParam<bool>,
}

impl<'a> GridScaler<'a> {
    /// Start a request in the layer's native CRS.
    pub fn new(layer: &'a CoverageLayer, reprojector: &'a dyn Reprojector) -> ScalerResult<Self> {
        Self::with_crs(layer, reprojector, &layer.native_crs)
    }

    /// Start a request in `crs`. The extent defaults to the layer's bounding
    /// box in that CRS when one is known.
    pub fn with_crs(
        layer: &'a CoverageLayer,
        reprojector: &'a dyn Reprojector,
        crs: &str,
    ) -> ScalerResult<Self> {
        let crs_def = layer.crs_def(crs)?;
        let native_def = layer.native_crs_def()?;

        let (min, max) = match layer.bboxes.get(crs) {
            Some(bbox) => (
                AxisParam::new(Some(bbox.left), Some(bbox.bottom)),
                AxisParam::new(Some(bbox.right), Some(bbox.top)),
            ),
            None => (AxisParam::default(), AxisParam::default()),
        };

        debug!(layer = %layer.name, crs = %crs, "Starting grid negotiation");

        Ok(Self {
            layer,
            reprojector,
            crs: crs.to_string(),
            crs_def,
            native_def,
            labels: AxisLabels::new(crs_def, native_def),
            min,
            max,
            size: AxisParam::default(),
            subsetted: AxisParam::default(),
        })
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Identifier of the CRS currently in effect.
    pub fn crs(&self) -> &str {
        &self.crs
    }

    pub fn crs_def(&self) -> &CrsDefinition {
        self.crs_def
    }

    pub fn layer(&self) -> &CoverageLayer {
        self.layer
    }

    pub fn min(&self) -> AxisParam<Option<f64>> {
        self.min
    }

    pub fn max(&self) -> AxisParam<Option<f64>> {
        self.max
    }

    pub fn size(&self) -> AxisParam<Option<usize>> {
        self.size
    }

    pub fn subsetted(&self) -> AxisParam<bool> {
        self.subsetted
    }

    /// Resolve a dimension label against the CRS in effect.
    pub fn axis(&self, dimension: &str) -> ScalerResult<Axis> {
        self.labels.resolve(dimension)
    }

    /// `(size, min, max)` of the addressed axis.
    pub fn dim(&self, dimension: &str) -> ScalerResult<(Option<usize>, Option<f64>, Option<f64>)> {
        let axis = self.axis(dimension)?;
        Ok((self.size[axis], self.min[axis], self.max[axis]))
    }

    /// Whether the addressed axis was subsetted to a single coordinate.
    pub fn is_slice(&self, dimension: &str) -> ScalerResult<bool> {
        Ok(self.is_axis_slice(self.axis(dimension)?))
    }

    fn is_axis_slice(&self, axis: Axis) -> bool {
        self.subsetted[axis] && self.min[axis] == self.max[axis]
    }

    fn extent(&self, axis: Axis) -> ScalerResult<(f64, f64)> {
        match (self.min[axis], self.max[axis]) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(ScalerError::UndefinedExtent(axis)),
        }
    }

    // ========================================================================
    // Subsetting
    // ========================================================================

    /// Reduce an axis to the single coordinate `value`.
    pub fn slice(&mut self, dimension: &str, value: f64) -> ScalerResult<()> {
        let axis = self.axis(dimension)?;
        self.min[axis] = Some(value);
        self.max[axis] = Some(value);
        self.subsetted[axis] = true;
        Ok(())
    }

    /// Restrict an axis to `lower..higher`.
    pub fn trim(&mut self, dimension: &str, lower: f64, higher: f64) -> ScalerResult<()> {
        let axis = self.axis(dimension)?;
        self.min[axis] = Some(lower);
        self.max[axis] = Some(higher);
        self.subsetted[axis] = true;
        Ok(())
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Request `size` cells along an axis. Fractional sizes round half up.
    pub fn set_size(&mut self, dimension: &str, size: f64) -> ScalerResult<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ScalerError::IllegalSize(size));
        }
        let axis = self.axis(dimension)?;
        self.set_axis_size(axis, size)
    }

    fn set_axis_size(&mut self, axis: Axis, size: f64) -> ScalerResult<()> {
        let cells = (size + 0.5).trunc();
        if !cells.is_finite() || cells < 1.0 || cells > MAX_AXIS_CELLS as f64 {
            return Err(ScalerError::IllegalSize(size));
        }
        if self.size[axis].is_some() {
            return Err(ScalerError::OverspecifiedDimension(axis));
        }
        self.size[axis] = Some(cells as usize);
        Ok(())
    }

    /// Derive an axis size from its extent, the native resolution of the
    /// current CRS and `factor` (1.0 is native resolution).
    pub fn scale_axis(&mut self, dimension: &str, factor: f64) -> ScalerResult<()> {
        let axis = self.axis(dimension)?;
        self.scale_axis_by(axis, factor)
    }

    fn scale_axis_by(&mut self, axis: Axis, factor: f64) -> ScalerResult<()> {
        if self.size[axis].is_some() {
            return Err(ScalerError::OverspecifiedDimension(axis));
        }
        let (min, max) = self.extent(axis)?;
        let res = resolution(self.layer.grid(&self.crs)?, axis);
        let scaled = ((max - min) * factor / res).abs();

        debug!(axis = %axis, factor = factor, resolution = res, size = scaled, "Scaling axis");

        if !scaled.is_finite() || scaled <= 0.0 {
            return Err(ScalerError::IllegalSize(scaled));
        }
        self.set_axis_size(axis, scaled)
    }

    /// Same as [`GridScaler::set_size`].
    pub fn scale_size(&mut self, dimension: &str, size: f64) -> ScalerResult<()> {
        self.set_size(dimension, size)
    }

    /// Sets the axis size to `high - low`.
    pub fn scale_extent(&mut self, dimension: &str, low: f64, high: f64) -> ScalerResult<()> {
        self.set_size(dimension, high - low)
    }

    // ========================================================================
    // Reprojection
    // ========================================================================

    /// Move the request into `new_crs`.
    ///
    /// Axes that were not subsetted take the layer's extent in `new_crs`
    /// directly. Subsetted axes are reprojected as a point (both axes
    /// sliced), a line (one axis sliced) or a rectangle, and the result is
    /// snapped to the target grid. Requesting the current CRS only snaps.
    pub fn to_crs(&mut self, new_crs: &str) -> ScalerResult<()> {
        let layer = self.layer;
        let new_def = layer.crs_def(new_crs)?;
        let grid = *layer.grid(new_crs)?;

        if self.crs != new_crs {
            match (self.subsetted.x, self.subsetted.y) {
                (false, false) => {
                    let bbox = layer.bbox(new_crs)?;
                    self.min.set_both(Some(bbox.left), Some(bbox.bottom));
                    self.max.set_both(Some(bbox.right), Some(bbox.top));
                    debug!(from = %self.crs, to = %new_crs, "Using layer extent in target CRS");
                    self.switch_crs(new_crs, new_def);
                }
                (true, false) => {
                    let bbox = layer.bbox(new_crs)?;
                    self.min.y = Some(bbox.bottom);
                    self.max.y = Some(bbox.top);
                }
                (false, true) => {
                    let bbox = layer.bbox(new_crs)?;
                    self.min.x = Some(bbox.left);
                    self.max.x = Some(bbox.right);
                }
                (true, true) => {}
            }
        }

        if self.crs == new_crs {
            return self.quantise_to_resolution(&grid);
        }

        let geom = self.extent_geometry()?;
        let projected = self.reprojector.reproject(&geom, new_crs)?;

        if geom.is_point() {
            let (x, y) = projected.coords()[0];
            self.min.set_both(Some(x), Some(y));
            self.max
                .set_both(Some(x + grid.x_res()), Some(y + grid.y_res()));
            self.size.set_both(Some(1), Some(1));
        } else {
            let bbox = projected.bounding_box();
            self.min.set_both(Some(bbox.left), Some(bbox.bottom));
            self.max.set_both(Some(bbox.right), Some(bbox.top));
            self.quantise_to_resolution(&grid)?;
        }

        debug!(
            from = %self.crs,
            to = %new_crs,
            min_x = ?self.min.x,
            min_y = ?self.min.y,
            max_x = ?self.max.x,
            max_y = ?self.max.y,
            "Reprojected request extent"
        );
        self.switch_crs(new_crs, new_def);
        Ok(())
    }

    fn switch_crs(&mut self, crs: &str, def: &'a CrsDefinition) {
        self.crs = crs.to_string();
        self.crs_def = def;
        self.labels = AxisLabels::new(def, self.native_def);
    }

    /// Geometry covering the current extent in the current CRS.
    fn extent_geometry(&self) -> ScalerResult<Geometry> {
        let (min_x, max_x) = self.extent(Axis::X)?;
        let (min_y, max_y) = self.extent(Axis::Y)?;

        let geom = match (self.is_axis_slice(Axis::X), self.is_axis_slice(Axis::Y)) {
            (true, true) => Geometry::point(min_x, min_y, self.crs.as_str()),
            (true, false) | (false, true) => {
                Geometry::line(vec![(min_x, min_y), (max_x, max_y)], self.crs.as_str())?
            }
            (false, false) => Geometry::polygon(
                vec![
                    (min_x, min_y),
                    (min_x, max_y),
                    (max_x, max_y),
                    (max_x, min_y),
                    (min_x, min_y),
                ],
                self.crs.as_str(),
            )?,
        };
        Ok(geom)
    }

    /// Grow any axis narrower than one and a half cells of `grid` to exactly
    /// one cell.
    fn quantise_to_resolution(&mut self, grid: &NativeGrid) -> ScalerResult<()> {
        for axis in Axis::BOTH {
            let res = resolution(grid, axis);
            let (min, max) = self.extent(axis)?;
            if max - min < (res * 1.5).abs() {
                debug!(axis = %axis, min = min, max = max, resolution = res, "Snapping axis to one cell");
                self.max[axis] = Some(min + res);
                self.size[axis] = Some(1);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Snapshot the grid, giving unsized axes their native-resolution size.
    fn resolve(&mut self) -> ScalerResult<ResolvedGrid<'a>> {
        for axis in Axis::BOTH {
            if self.size[axis].is_none() {
                self.scale_axis_by(axis, 1.0)?;
            }
        }

        let mut min = AxisParam::new(0.0, 0.0);
        let mut max = AxisParam::new(0.0, 0.0);
        let mut size = AxisParam::new(0, 0);
        for axis in Axis::BOTH {
            let (lo, hi) = self.extent(axis)?;
            min[axis] = lo;
            max[axis] = hi;
            size[axis] = self.size[axis].ok_or(ScalerError::UndefinedExtent(axis))?;
        }

        Ok(ResolvedGrid {
            layer: self.layer,
            crs: self.crs.clone(),
            crs_def: self.crs_def,
            min,
            max,
            size,
        })
    }

    /// Finish negotiation. Axes with no requested size get the size of the
    /// extent at native resolution.
    pub fn finalize(mut self) -> ScalerResult<ResolvedGrid<'a>> {
        let grid = self.resolve()?;
        debug!(
            crs = %grid.crs,
            width = grid.size.x,
            height = grid.size.y,
            "Resolved output grid"
        );
        Ok(grid)
    }

    /// Pixel-to-CRS transform of the output grid, sizing unsized axes at
    /// native resolution first.
    pub fn affine(&mut self) -> ScalerResult<Affine> {
        Ok(self.resolve()?.affine())
    }

    /// Empty output buffer for `bands` at `times`, sizing unsized axes at
    /// native resolution first.
    pub fn empty_dataset<S: AsRef<str>>(
        &mut self,
        bands: &[S],
        times: &[chrono::DateTime<chrono::Utc>],
    ) -> ScalerResult<EmptyDataset> {
        self.resolve()?.empty_dataset(bands, times)
    }
}

fn resolution(grid: &NativeGrid, axis: Axis) -> f64 {
    match axis {
        Axis::X => grid.x_res(),
        Axis::Y => grid.y_res(),
    }
}

impl std::fmt::Debug for GridScaler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridScaler")
            .field("layer", &self.layer.name)
            .field("crs", &self.crs)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("size", &self.size)
            .field("subsetted", &self.subsetted)
            .finish()
    }
}
