//! reRadar CLI - host-launched backend process
//!
//! The host starts this binary with the path of its Unix-domain socket as the
//! first argument and exchanges framed messages with it until it sends the
//! terminate message.

mod error;
mod runner;

use std::path::PathBuf;

use clap::Parser;

use runner::{CliRunner, Overrides};

#[derive(Parser)]
#[command(name = "reradar")]
#[command(version = reradar::VERSION)]
#[command(about = "Live flight tracking backend", long_about = None)]
struct Args {
    /// Path of the host's Unix-domain socket
    socket: PathBuf,

    /// Config file (default: <user config dir>/reradar/config.ini)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the session log file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Directory with AircraftTypes.json and airlines.csv to use instead of
    /// the bundled datasets
    #[arg(long)]
    datasets: Option<PathBuf>,

    /// Waypoints JSON file (default: <user config dir>/waypoints.json)
    #[arg(long)]
    waypoints: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let overrides = Overrides {
        config: args.config,
        log_dir: args.log_dir,
        datasets: args.datasets,
        waypoints: args.waypoints,
    };

    let runner = match CliRunner::new(&overrides) {
        Ok(runner) => runner,
        Err(e) => e.exit(),
    };

    if let Err(e) = runner.run(&args.socket) {
        e.exit();
    }
}
