use crate::errors::{CubeError, Result};
use crate::grid::{Axis, Size, Volume, VolumetricGrid};
use crate::progress::Bar;

/// Number of target points evaluated at once, bounds the memory used for the
/// query coordinates.
pub const BATCH_SIZE: usize = 100_000;

/// Builds the cartesian coordinates along each axis of a grid:
/// `coords[a][n] = origin[a] + n * axes[a].step[a]`.
///
/// Only the diagonal component of each step vector is used, the grid is
/// assumed to be axis-aligned.
pub fn axis_coordinates(origin: [f64; 3], axes: &[Axis; 3]) -> [Vec<f64>; 3] {
    let coordinates = |a: usize| {
        (0..axes[a].points).map(|n| origin[a] + n as f64 * axes[a].step[a])
                           .collect::<Vec<f64>>()
    };
    [coordinates(0), coordinates(1), coordinates(2)]
}

/// Piecewise-trilinear interpolation over a regular grid.
///
/// Queries outside of the extent of the axes evaluate to 0.
pub struct Trilinear<'a> {
    axes: [Vec<f64>; 3],
    values: &'a Volume,
}

impl<'a> Trilinear<'a> {
    /// Builds the interpolant. Each axis must be non-empty and strictly
    /// ascending and the shape of `values` must equal the axis lengths.
    pub fn new(axes: [Vec<f64>; 3], values: &'a Volume) -> Result<Self> {
        for (i, axis) in axes.iter().enumerate() {
            if axis.is_empty() {
                return Err(CubeError::Interpolation(format!("axis {} has no points",
                                                            i)));
            }
            if !axis.windows(2).all(|w| w[0] < w[1]) {
                return Err(CubeError::Interpolation(format!("the points in axis {} are not strictly ascending",
                                                            i)));
            }
        }
        let lengths = [axes[0].len(), axes[1].len(), axes[2].len()];
        if lengths != values.shape() {
            return Err(CubeError::ShapeMismatch { expected: lengths,
                                                  found: values.shape() });
        }
        Ok(Self { axes, values })
    }

    /// Finds the cell containing `x` along an axis and the fractional
    /// distance through it. None if `x` lies outside the axis.
    fn locate(axis: &[f64], x: f64) -> Option<(usize, f64)> {
        let last = axis.len() - 1;
        if !(x >= axis[0] && x <= axis[last]) {
            return None;
        }
        if last == 0 {
            return Some((0, 0.));
        }
        // first index with axis[i] > x, the cell starts one before it
        let i = axis.partition_point(|v| *v <= x).clamp(1, last) - 1;
        let t = (x - axis[i]) / (axis[i + 1] - axis[i]);
        Some((i, t))
    }

    /// Evaluates the interpolant at a cartesian point.
    pub fn evaluate(&self, point: [f64; 3]) -> f64 {
        let mut cell = [(0usize, 0f64); 3];
        for a in 0..3 {
            cell[a] = match Self::locate(&self.axes[a], point[a]) {
                Some(c) => c,
                None => return 0.,
            };
        }
        let size = self.values.size();
        let data = self.values.data();
        let mut out = 0f64;
        // sum over the 8 corners of the cell, skipping corners with no weight
        // so that the upper edge of an axis never indexes past the end
        for corner in 0..8usize {
            let mut weight = 1f64;
            let mut index = [0usize; 3];
            for a in 0..3 {
                let (i, t) = cell[a];
                let upper = (corner >> (2 - a)) & 1 == 1;
                weight *= if upper { t } else { 1. - t };
                index[a] = i + upper as usize;
            }
            if weight != 0. {
                out += weight * data[size.to_1d(index)];
            }
        }
        out
    }

    /// Evaluates the interpolant at each point of the batch.
    pub fn evaluate_batch(&self, points: &[[f64; 3]]) -> Vec<f64> {
        points.iter().map(|p| self.evaluate(*p)).collect()
    }
}

/// Checks the source array against its axis lengths and returns the array in
/// the matching orientation.
fn orient<'a>(lengths: [usize; 3],
              values: &'a Volume)
              -> Result<std::borrow::Cow<'a, Volume>> {
    let shape = values.shape();
    if shape == lengths {
        Ok(std::borrow::Cow::Borrowed(values))
    } else if shape == [lengths[1], lengths[0], lengths[2]] {
        log::warn!("Source array has shape {:?} but its axes are {:?}, transposing the first two dimensions.",
                   shape,
                   lengths);
        Ok(std::borrow::Cow::Owned(values.transpose_xy()))
    } else {
        Err(CubeError::ShapeMismatch { expected: lengths,
                                       found: shape })
    }
}

/// Resamples the values of `source` onto the grid of `target`.
///
/// If both grids have the same point counts the source values are returned
/// unchanged, the geometry is assumed to match.
pub fn resample(source: &VolumetricGrid,
                target: &VolumetricGrid,
                progress_bar: Bar)
                -> Result<Volume> {
    resample_batched(source, target, BATCH_SIZE, progress_bar)
}

/// As [`resample`] with an explicit batch size.
pub fn resample_batched(source: &VolumetricGrid,
                        target: &VolumetricGrid,
                        batch_size: usize,
                        progress_bar: Bar)
                        -> Result<Volume> {
    if source.counts() == target.counts() {
        log::info!("Grids match, no interpolation needed.");
        return Ok(source.values.clone());
    }
    if batch_size == 0 {
        return Err(CubeError::Config(String::from("batch size must be positive")));
    }
    let source_axes = axis_coordinates(source.origin, &source.axes);
    let lengths = [source_axes[0].len(),
                   source_axes[1].len(),
                   source_axes[2].len()];
    log::info!("Source grid: {} x {} x {}, array shape {:?}.",
               lengths[0],
               lengths[1],
               lengths[2],
               source.values.shape());
    let values = orient(lengths, &source.values)?;
    let interpolator = Trilinear::new(source_axes, &values)?;
    let [xs, ys, zs] = axis_coordinates(target.origin, &target.axes);
    let size = Size::checked(xs.len(), ys.len(), zs.len()).ok_or_else(|| {
                   CubeError::Config(String::from("target grid is too large"))
               })?;
    log::info!("Target grid: {} x {} x {}, {} points to interpolate.",
               size.x,
               size.y,
               size.z,
               size.total);
    let mut out = Vec::with_capacity(size.total);
    let mut batch = Vec::with_capacity(batch_size.min(size.total));
    let batches = (size.total + batch_size - 1) / batch_size;
    for (n, start) in (0..size.total).step_by(batch_size).enumerate() {
        let end = (start + batch_size).min(size.total);
        batch.clear();
        batch.extend((start..end).map(|p| {
                                      let [x, y, z] = size.to_3d(p);
                                      [xs[x], ys[y], zs[z]]
                                  }));
        out.extend(interpolator.evaluate_batch(&batch));
        progress_bar.inc(end - start);
        if n % 10 == 0 {
            log::info!("Interpolation progress: {:.1}% ({}/{} batches).",
                       progress_bar.position() as f64 / size.total as f64 * 100.,
                       n + 1,
                       batches);
        }
    }
    log::info!("Interpolation complete.");
    Volume::new(size.shape(), out)
}
