//! Command line arguments for `claim-eval`

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "claim-eval",
    version,
    about = "Estimate the validity of a crop insurance claim from historical weather"
)]
pub struct Cli {
    /// JSON file describing the insured land
    pub claim: PathBuf,

    /// Sliding window size, overriding evaluation.check_intervals
    #[arg(long)]
    pub check_intervals: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
