use crate::errors::{CubeError, Result};
use crate::grid::{Size, Volume};

/// A boolean region of interest over a grid, stored in the same row-major
/// order as a [`Volume`].
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    size: Size,
    data: Vec<bool>,
}

impl Mask {
    /// Wraps a flat array of flags, which must hold exactly the number of
    /// points in `shape`.
    pub fn new(shape: [usize; 3], data: Vec<bool>) -> Result<Self> {
        let size = Size::from(shape);
        if size.total != data.len() {
            return Err(CubeError::LengthMismatch { expected: size.total,
                                                   found: data.len() });
        }
        Ok(Self { size, data })
    }

    pub fn shape(&self) -> [usize; 3] {
        self.size.shape()
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// The number of voxels inside the region.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|m| **m).count()
    }

    /// True if every voxel of self is also set in other.
    pub fn is_subset(&self, other: &Mask) -> bool {
        self.size == other.size
        && self.data.iter().zip(&other.data).all(|(a, b)| !*a || *b)
    }
}

/// Statistics of applying a mask, informational only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskStats {
    /// Number of points in the grid.
    pub total: usize,
    /// Number of points inside the mask.
    pub kept: usize,
    /// Fraction of the points set to zero.
    pub zeroed_fraction: f64,
}

/// Marks every voxel with a value at or above the isovalue.
pub fn threshold(volume: &Volume, isovalue: f64) -> Mask {
    Mask { size: volume.size(),
           data: volume.data().iter().map(|v| *v >= isovalue).collect() }
}

/// Converts a physical radius into a whole number of voxels,
/// `ceil(radius / spacing)`.
pub fn voxel_radius(radius: f64, spacing: f64) -> Result<usize> {
    if !(spacing.is_finite() && spacing > 0.) {
        return Err(CubeError::Config(format!("grid spacing must be positive, got {}",
                                             spacing)));
    }
    if !(radius.is_finite() && radius >= 0.) {
        return Err(CubeError::Config(format!("search radius must be non-negative, got {}",
                                             radius)));
    }
    Ok((radius / spacing).ceil() as usize)
}

/// Dilates the mask by a physical radius on a grid of the given spacing.
pub fn dilate(mask: &Mask, radius: f64, spacing: f64) -> Result<Mask> {
    let r = voxel_radius(radius, spacing)?;
    log::debug!("Dilating mask by {} voxels ({} / {}).", r, radius, spacing);
    Ok(dilate_voxels(mask, r))
}

/// Binary dilation with a cube of side 2r + 1 centred on each voxel. Voxels
/// beyond the edge of the grid are treated as unset.
pub fn dilate_voxels(mask: &Mask, r: usize) -> Mask {
    // a radius past the longest axis already reaches every voxel
    let r = r.min(mask.size.x.max(mask.size.y).max(mask.size.z));
    if r == 0 {
        return mask.clone();
    }
    // the cube is separable so dilate along each axis in turn
    let data = (0..3).fold(mask.data.clone(), |data, axis| {
                         dilate_axis(&data, mask.size, axis, r)
                     });
    Mask { size: mask.size,
           data }
}

/// One dimensional dilation by r along a single axis using a running count.
fn dilate_axis(data: &[bool], size: Size, axis: usize, r: usize) -> Vec<bool> {
    let n = size.shape()[axis];
    let stride = match axis {
        0 => size.y * size.z,
        1 => size.z,
        _ => 1,
    };
    let mut out = vec![false; size.total];
    let mut prefix = vec![0usize; n + 1];
    for start in (0..size.total).filter(|p| (p / stride) % n == 0) {
        for i in 0..n {
            prefix[i + 1] = prefix[i] + data[start + i * stride] as usize;
        }
        for i in 0..n {
            let high = i.saturating_add(r).saturating_add(1).min(n);
            let low = i.saturating_sub(r);
            out[start + i * stride] = prefix[high] > prefix[low];
        }
    }
    out
}

/// Zeroes every value outside of the mask.
pub fn apply(volume: &Volume, mask: &Mask) -> Result<(Volume, MaskStats)> {
    if volume.shape() != mask.shape() {
        return Err(CubeError::ShapeMismatch { expected: volume.shape(),
                                              found: mask.shape() });
    }
    let data = volume.data()
                     .iter()
                     .zip(&mask.data)
                     .map(|(v, m)| if *m { *v } else { 0. })
                     .collect();
    let total = mask.size.total;
    let kept = mask.count();
    let zeroed_fraction = if total == 0 {
        0.
    } else {
        1. - kept as f64 / total as f64
    };
    log::info!("Mask keeps {} of {} points, {:.2}% zeroed.",
               kept,
               total,
               zeroed_fraction * 100.);
    let stats = MaskStats { total,
                            kept,
                            zeroed_fraction };
    Ok((Volume::new(volume.shape(), data)?, stats))
}
