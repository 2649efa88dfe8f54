use crate::errors::{CubeError, Result};

/// A single atom from the atom table of a cube file.
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    /// The atomic number.
    pub number: i64,
    /// The nuclear charge column, usually equal to the atomic number.
    pub charge: f64,
    /// Cartesian position of the atom.
    pub position: [f64; 3],
}

/// One of the three grid axes in the cube header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axis {
    /// Number of grid points along the axis.
    pub points: usize,
    /// The step vector between neighbouring points.
    pub step: [f64; 3],
    /// The point count was negative in the file, marking Ångström units.
    pub angstrom: bool,
}

impl Axis {
    /// Creates an axis in the default (Bohr) units.
    pub fn new(points: usize, step: [f64; 3]) -> Self {
        Self { points,
               step,
               angstrom: false }
    }
}

/// The 3d size of a flattened, row-major, array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    /// Number of voxels in the x-direction.
    pub x: usize,
    /// Number of voxels in the y-direction.
    pub y: usize,
    /// Number of voxels in the z-direction.
    pub z: usize,
    /// Total number of voxels.
    pub total: usize,
}

impl Size {
    /// The length of the flattened array for the data in 3d
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        match Self::checked(x, y, z) {
            Some(size) => size,
            None => panic!("Grid size is too large!"),
        }
    }

    /// As [`Size::new`] but returns None if the total overflows.
    pub fn checked(x: usize, y: usize, z: usize) -> Option<Self> {
        let total = x.checked_mul(y)?.checked_mul(z)?;
        Some(Self { x, y, z, total })
    }

    /// The size as an array of [x, y, z].
    pub fn shape(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts a 1D index of the array into a 3D index
    pub fn to_3d(&self, p: usize) -> [usize; 3] {
        let x = p / (self.y * self.z);
        let y = (p / self.z) % self.y;
        let z = p % self.z;
        [x, y, z]
    }

    /// Converts a 3D index into the 1D index of the flattened array
    pub fn to_1d(&self, [x, y, z]: [usize; 3]) -> usize {
        (x * self.y + y) * self.z + z
    }
}

impl From<[usize; 3]> for Size {
    fn from(shape: [usize; 3]) -> Self {
        Self::new(shape[0], shape[1], shape[2])
    }
}

/// A dense 3d array of scalars stored flat in row-major order (x slowest, z
/// fastest).
#[derive(Clone, Debug, PartialEq)]
pub struct Volume {
    size: Size,
    data: Vec<f64>,
}

impl Volume {
    /// Wraps a flat array, which must hold exactly the number of points in
    /// `shape`.
    pub fn new(shape: [usize; 3], data: Vec<f64>) -> Result<Self> {
        let size = Size::checked(shape[0], shape[1], shape[2]).ok_or_else(|| {
                       CubeError::Config(format!("grid {:?} is too large", shape))
                   })?;
        if size.total != data.len() {
            return Err(CubeError::LengthMismatch { expected: size.total,
                                                   found: data.len() });
        }
        Ok(Self { size, data })
    }

    /// A volume of zeros.
    pub fn zeros(shape: [usize; 3]) -> Self {
        let size = Size::from(shape);
        Self { size,
               data: vec![0f64; size.total] }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn shape(&self) -> [usize; 3] {
        self.size.shape()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// The value at a 3d index.
    pub fn get(&self, index: [usize; 3]) -> f64 {
        self.data[self.size.to_1d(index)]
    }

    /// Swaps the first two dimensions so that `out[j][i][k] = self[i][j][k]`.
    pub fn transpose_xy(&self) -> Self {
        let Size { x, y, z, total } = self.size;
        let mut data = Vec::with_capacity(total);
        for j in 0..y {
            for i in 0..x {
                let start = (i * y + j) * z;
                data.extend_from_slice(&self.data[start..start + z]);
            }
        }
        Self { size: Size::new(y, x, z),
               data }
    }
}

/// A parsed cube file: header, geometry, atoms and the scalar field.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumetricGrid {
    /// The two free-text comment lines.
    pub comments: [String; 2],
    /// Cartesian position of grid index (0, 0, 0).
    pub origin: [f64; 3],
    /// The three grid axes in file order.
    pub axes: [Axis; 3],
    /// The atom table in file order.
    pub atoms: Vec<Atom>,
    /// The scalar field.
    pub values: Volume,
}

impl VolumetricGrid {
    /// The point counts along each axis.
    pub fn counts(&self) -> [usize; 3] {
        [self.axes[0].points, self.axes[1].points, self.axes[2].points]
    }

    /// The declared size of the grid.
    pub fn size(&self) -> Size {
        Size::from(self.counts())
    }

    /// The diagonal component of each step vector.
    pub fn diagonal_steps(&self) -> [f64; 3] {
        [self.axes[0].step[0], self.axes[1].step[1], self.axes[2].step[2]]
    }

    /// The smallest absolute diagonal step, the finest spacing of the grid.
    pub fn min_spacing(&self) -> f64 {
        self.diagonal_steps()
            .iter()
            .map(|s| s.abs())
            .fold(f64::INFINITY, f64::min)
    }
}
