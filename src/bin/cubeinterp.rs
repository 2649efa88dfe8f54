use anyhow::Result;
use cubeinterp::arguments::{Args, ClapApp};
use cubeinterp::process::process;

fn main() -> Result<()> {
    // argument parsing
    let app = ClapApp::get();
    let args = Args::new(app.get_matches());
    // RUST_LOG takes precedence over -q/-v
    env_logger::Builder::new().filter_level(args.log_level())
                              .parse_default_env()
                              .format_target(false)
                              .init();
    // print splash
    println!("Cube Potential Interpolation ({})", env!("CARGO_PKG_VERSION"));
    let config = args.config();
    let summary = process(&config)?;
    println!("Wrote {} ({} of {} points non-zero).",
             config.output.display(),
             summary.nonzero,
             summary.points);
    Ok(())
}
