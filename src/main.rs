//! CLI entry point for the brick pixel map converter

use brickmap::io::cli::{Cli, FileProcessor};
use clap::Parser;

fn main() -> brickmap::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
