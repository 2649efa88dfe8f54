use crate::io::cube;
use crate::mask::{self, MaskStats};
use crate::progress::Bar;
use crate::utils;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Default isovalue of the density isosurface.
pub const DEFAULT_ISOVALUE: f64 = 0.001;
/// Default search radius around the isosurface.
pub const DEFAULT_RADIUS: f64 = 0.3;
/// Default output file.
pub const DEFAULT_OUTPUT: &str = "potential_interpolated.cube";

/// Everything needed for a single run of the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The electron density cube, its grid is used for the output.
    pub density: PathBuf,
    /// The electrostatic potential cube to resample.
    pub potential: PathBuf,
    /// Where to write the result.
    pub output: PathBuf,
    /// Density value defining the isosurface.
    pub isovalue: f64,
    /// Distance around the isosurface in which the potential is kept.
    pub radius: f64,
    /// Grid spacing used to convert the radius into voxels. If None it is
    /// taken from the density grid.
    pub spacing: Option<f64>,
    /// Zero the potential outside of the isosurface neighbourhood.
    pub apply_mask: bool,
    /// Draw a progress bar during the interpolation.
    pub show_progress: bool,
}

impl Config {
    /// A configuration with the default isovalue, radius and output.
    pub fn new(density: impl Into<PathBuf>, potential: impl Into<PathBuf>) -> Self {
        Self { density: density.into(),
               potential: potential.into(),
               output: PathBuf::from(DEFAULT_OUTPUT),
               isovalue: DEFAULT_ISOVALUE,
               radius: DEFAULT_RADIUS,
               spacing: None,
               apply_mask: true,
               show_progress: false }
    }
}

/// Statistics of the written potential.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    /// Number of points in the output grid.
    pub points: usize,
    /// Number of points with a non-zero potential.
    pub nonzero: usize,
    /// Smallest potential value.
    pub min: f64,
    /// Largest potential value.
    pub max: f64,
    /// The potential had to be interpolated onto the density grid.
    pub resampled: bool,
    /// Statistics of the mask, if one was applied.
    pub mask: Option<MaskStats>,
}

/// Resamples the potential onto the density grid, optionally masks it to the
/// neighbourhood of the density isosurface and writes it out using the
/// density file as the template. Nothing is written unless every step before
/// it succeeds.
pub fn process(config: &Config) -> Result<Summary> {
    log::info!("1. Reading density file.");
    let density = cube::read(&config.density).with_context(|| {
                      format!("Failed to read the density cube {}",
                              config.density.display())
                  })?;
    log::info!("   Density grid: {:?}", density.counts());

    log::info!("2. Reading potential file.");
    let potential = cube::read(&config.potential).with_context(|| {
                        format!("Failed to read the potential cube {}",
                                config.potential.display())
                    })?;
    log::info!("   Potential grid: {:?}", potential.counts());

    let resampled = density.counts() != potential.counts();
    let values = if resampled {
        log::info!("3. Grids differ, interpolating.");
        let total = density.size().total as u64;
        let pbar = if config.show_progress {
            Bar::visible(total, 100, String::from("Interpolating: "))
        } else {
            Bar::new(total, 100, String::from("Interpolating: "))
        };
        crate::interpolate::resample(&potential, &density, pbar)
            .context("Failed to interpolate the potential onto the density grid")?
    } else {
        log::info!("3. Grids match, no interpolation needed.");
        potential.values
    };

    let (values, mask_stats) = if config.apply_mask {
        log::info!("4. Applying isosurface mask.");
        let spacing = match config.spacing {
            Some(s) => s,
            None => density.min_spacing(),
        };
        let region = mask::threshold(&density.values, config.isovalue);
        let region = mask::dilate(&region, config.radius, spacing)
            .context("Failed to build the isosurface mask")?;
        log::info!("   Mask contains {} points.", region.count());
        let (masked, stats) =
            mask::apply(&values, &region).context("Failed to apply the isosurface mask")?;
        (masked, Some(stats))
    } else {
        log::info!("4. Skipping isosurface mask.");
        (values, None)
    };

    log::info!("5. Writing result.");
    cube::write(&density, &values, &config.output).with_context(|| {
                                                      format!("Failed to write {}",
                                                              config.output.display())
                                                  })?;

    let (min, max) = utils::min_max(values.data()).unwrap_or((0., 0.));
    let summary = Summary { points: values.data().len(),
                            nonzero: utils::count_nonzero(values.data()),
                            min,
                            max,
                            resampled,
                            mask: mask_stats };
    log::info!("Output file: {}", config.output.display());
    log::info!("Potential range: [{}, {}]",
               utils::scientific(summary.min, 6),
               utils::scientific(summary.max, 6));
    log::info!("Non-zero points: {} of {}", summary.nonzero, summary.points);
    if let Some(stats) = summary.mask {
        log::info!("Points skipped by the mask: {:.2}%",
                   stats.zeroed_fraction * 100.);
    }
    Ok(summary)
}
