use crate::process::{Config, DEFAULT_OUTPUT};
use clap::{crate_authors, crate_version, value_parser, Arg, ArgAction,
           ArgMatches, Command};
use log::LevelFilter;
use std::path::PathBuf;

/// Create a container for dealing with clap and being able to test arg parsing
pub struct ClapApp {}

impl ClapApp {
    /// Create and return the clap::Command
    pub fn get() -> Command {
        Command::new("Cube Potential Interpolation")
            .author(crate_authors!())
            .version(crate_version!())
            .arg(Arg::new("density")
                .required(true)
                .index(1)
                .value_parser(value_parser!(PathBuf))
                .help("The electron density cube file.")
                .long_help(
"The electron density cube file. Its grid, header and atoms are used as the
template for the output file and its values define the isosurface mask."))
            .arg(Arg::new("potential")
                .required(true)
                .index(2)
                .value_parser(value_parser!(PathBuf))
                .help("The electrostatic potential cube file.")
                .long_help(
"The electrostatic potential cube file. If its grid differs from the density
grid it is interpolated onto the density grid with trilinear interpolation,
points outside of the potential grid are set to zero."))
            .arg(Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTPUT)
                .help("Where to write the resulting cube file."))
            .arg(Arg::new("isovalue")
                .short('i')
                .long("isovalue")
                .value_parser(value_parser!(f64))
                .default_value("0.001")
                .help("Density value defining the isosurface."))
            .arg(Arg::new("radius")
                .short('r')
                .long("radius")
                .value_parser(value_parser!(f64))
                .default_value("0.3")
                .help("Search radius around the isosurface.")
                .long_help(
"Distance, in the units of the grid, around the isosurface in which the
potential is kept. The radius is rounded up to a whole number of voxels."))
            .arg(Arg::new("spacing")
                .short('s')
                .long("spacing")
                .value_parser(value_parser!(f64))
                .help("Grid spacing used to convert the radius into voxels.")
                .long_help(
"The grid spacing used to convert the search radius into a number of voxels.
By default this is the smallest diagonal step of the density grid."))
            .arg(Arg::new("no mask")
                .long("no-mask")
                .action(ArgAction::SetTrue)
                .help("Write the interpolated potential without masking."))
            .arg(Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only print warnings and errors, hide the progress bar."))
            .arg(Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Print more information, repeat for more detail."))
    }
}

/// Holds the arguments passed to the program from the command-line
pub struct Args {
    pub density: PathBuf,
    pub potential: PathBuf,
    pub output: PathBuf,
    pub isovalue: f64,
    pub radius: f64,
    pub spacing: Option<f64>,
    pub apply_mask: bool,
    pub quiet: bool,
    pub verbose: u8,
}

impl Args {
    /// Initialises the structure from the command-line arguments.
    pub fn new(arguments: ArgMatches) -> Self {
        let path = |id: &str| {
            arguments.get_one::<PathBuf>(id).cloned().unwrap_or_default()
        };
        let density = path("density");
        let potential = path("potential");
        let output = arguments.get_one::<PathBuf>("output")
                              .cloned()
                              .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        // safe to default as both have default values
        let isovalue = arguments.get_one::<f64>("isovalue").copied().unwrap_or(0.001);
        let radius = arguments.get_one::<f64>("radius").copied().unwrap_or(0.3);
        let spacing = arguments.get_one::<f64>("spacing").copied();
        let apply_mask = !arguments.get_flag("no mask");
        let quiet = arguments.get_flag("quiet");
        let verbose = arguments.get_count("verbose");
        Self { density,
               potential,
               output,
               isovalue,
               radius,
               spacing,
               apply_mask,
               quiet,
               verbose }
    }

    /// The logging level requested by -q and -v.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Converts the arguments into the configuration for a run.
    pub fn config(&self) -> Config {
        Config { density: self.density.clone(),
                 potential: self.potential.clone(),
                 output: self.output.clone(),
                 isovalue: self.isovalue,
                 radius: self.radius,
                 spacing: self.spacing,
                 apply_mask: self.apply_mask,
                 show_progress: !self.quiet }
    }
}
