//! Course Planner
//!
//! Interactive menu for loading a course catalog and looking courses up.

use std::io;
use std::path::PathBuf;

use catalog::config::{Config, DEFAULT_DELIMITER};
use catalog::planner::Planner;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "course-planner")]
#[command(about = "Load a course catalog and look up courses and their prerequisites")]
struct Args {
    /// Course file to load before showing the menu
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Field separator used in course files
    #[arg(short = 'd', long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,

    /// Reject course files that define the same course number twice
    #[arg(long)]
    reject_duplicates: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with the menu.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::default()
        .with_delimiter(args.delimiter)
        .with_reject_duplicates(args.reject_duplicates);
    info!(?config, "starting course planner");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut planner = Planner::new(stdin.lock(), stdout.lock(), config);

    if let Some(path) = &args.file {
        planner.load(path)?;
    }

    planner.run()?;
    Ok(())
}
