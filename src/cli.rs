use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use shamir_recover::{reconstruct, Document, Recovery, Result, Strategy};

#[derive(Parser)]
#[command(
    name = "shamir-recover",
    about = "Recover a threshold-shared secret by majority vote over all k-subsets",
    version
)]
pub struct Cli {
    /// Path to the JSON share document
    pub input: PathBuf,
    /// Override the threshold `k` from the document
    #[arg(short = 'k', long)]
    pub threshold: Option<usize>,
    /// How subsets are interpolated
    #[arg(long, value_enum, default_value_t = Strategy::Sequential)]
    pub strategy: Strategy,
    /// Log progress to stderr (same as RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run(cli: &Cli) -> Result<Recovery> {
    let mut document = Document::from_path(&cli.input)?;
    if let Some(threshold) = cli.threshold {
        info!(threshold, "overriding threshold from the command line");
        document.parameters = document.parameters.with_threshold(threshold)?;
    }
    reconstruct(&document, cli.strategy)
}
