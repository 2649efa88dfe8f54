//! Resamples an electrostatic potential stored in a [cube] file onto the grid
//! of an electron density cube and restricts it to the neighbourhood of a
//! density isosurface. The result is written as a cube file on the density
//! grid so it can be mapped onto the isosurface by a visualiser.
//!
//! ## Installing the binary
//! ### From Source
//! ```sh
//! $ cargo build --verbose --release
//! ```
//! This creates the ./target/release/cubeinterp executable, which can be moved
//! or linked to a folder in your path.
//!
//! ## Usage
//! The program takes the density cube and the potential cube as input:
//! ```sh
//! $ cubeinterp density.cub esp.cub -o potential_interpolated.cube
//! ```
//! If the two grids have the same number of points the potential is used as
//! is, otherwise it is interpolated onto the density grid with trilinear
//! interpolation. Points of the density grid outside the potential grid are
//! set to zero.
//!
//! The potential is then zeroed everywhere except within a search radius of
//! the region where the density is at or above the isovalue. The radius is
//! converted into voxels using the smallest step of the density grid, or the
//! value passed with --spacing. Pass --no-mask to skip this step.
//! ```sh
//! $ cubeinterp density.cub esp.cub --isovalue 0.001 --radius 0.3
//! ```
//! For a detailed list of usage options run
//! ```sh
//! $ cubeinterp --help
//! ```
//!
//! ## Using the library
//! ```no_run
//! use cubeinterp::process::{process, Config};
//!
//! let mut config = Config::new("density.cub", "esp.cub");
//! config.radius = 0.5;
//! let summary = process(&config).unwrap();
//! println!("{} non-zero points", summary.nonzero);
//! ```
//! ## License
//! MIT
//!
//! [cube]: <https://gaussian.com/cubegen/>

/// For parsing command-line arguments.
pub mod arguments;
/// Provides the custom error type, [CubeError](errors::CubeError).
pub mod errors;
/// Contains [VolumetricGrid](grid::VolumetricGrid) and [Volume](grid::Volume)
/// for storing a parsed cube file and its scalar field.
pub mod grid;
/// Trilinear interpolation of one grid onto another.
pub mod interpolate;
/// Handles the File I/O for cube files.
pub mod io;
/// Builds, dilates and applies the isosurface [Mask](mask::Mask).
pub mod mask;
/// The full density/potential pipeline.
pub mod process;
/// Provides a [visible or hidden](progress::Bar) progress bar.
pub mod progress;
/// Misc functions for formatting and summarising values.
pub mod utils;
