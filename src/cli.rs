use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Load an Olympic Games workbook into an idempotent SQL insert batch", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a workbook into a SQL insert batch in dependency order
    Extract(ExtractArgs),
    /// List the sheets of a workbook with row and column counts
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input workbook (.xlsx)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output SQL file (stdout if omitted or '-')
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// First internal registration id to allocate
    #[arg(long = "first-id", default_value_t = 1)]
    pub first_id: u32,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Input workbook (.xlsx)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Emit the summary as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}
