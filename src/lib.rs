pub mod cli;
pub mod emit;
pub mod extract;
pub mod resolver;
pub mod workbook;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("olympic_ingest", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => extract::execute(&args),
        Commands::Inspect(args) => handle_inspect(&args),
    }
}

fn handle_inspect(args: &cli::InspectArgs) -> Result<()> {
    let summaries = workbook::sheet_summaries(&args.input)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for sheet in &summaries {
            println!(
                "{}: {} row(s), {} column(s)",
                sheet.name, sheet.rows, sheet.columns
            );
        }
    }
    Ok(())
}
