//! CLI entry point for the tile-based wave function collapse generator

use clap::Parser;
use wfc_tiles::io::cli::{Cli, Runner};

fn main() -> wfc_tiles::Result<()> {
    let cli = Cli::parse();
    let mut runner = Runner::new(cli);
    runner.run().map(|_| ())
}
