//! Binary crate for the `cvs-vaccine` command-line tool.
//!
//! This crate focuses on:
//! - Parsing and validating the state argument
//! - Running the single status lookup
//! - Printing available cities or a summary line

use clap::Parser;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for the report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
