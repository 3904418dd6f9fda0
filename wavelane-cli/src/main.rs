//! # Wavelane
//!
//! Renders a JSON lane document to a timing-diagram SVG.

use clap::Parser;

use wavelane_cli::{init_tracing, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    run(&cli)
}
