use std::fs;

use anyhow::{Context, Result};
use log::info;

use crate::{cli::ExtractArgs, emit, resolver::Resolver, workbook};

pub fn execute(args: &ExtractArgs) -> Result<()> {
    let data = workbook::load(&args.input)?;
    info!(
        "Workbook '{}': {} athlete(s), {} event(s), {} entry row(s), {} podium row(s)",
        args.input.display(),
        data.athletes.len(),
        data.events.len(),
        data.entries.len(),
        data.podiums.len()
    );

    let source = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());
    let mut resolver = Resolver::new(args.first_id);
    let lines = emit::build_batch(&data, &mut resolver, &source);
    info!(
        "Resolved {} registration(s), skipped {} unresolved participant reference(s)",
        resolver.assigned_count(),
        resolver.unresolved_count()
    );

    // The batch is complete before anything is written; a failed run never
    // leaves a truncated statement file behind.
    let batch = lines.join("\n") + "\n";
    match args.output.as_deref() {
        Some(path) if path.to_str() != Some("-") => {
            fs::write(path, &batch).with_context(|| format!("Writing SQL batch to {path:?}"))?;
            info!("Wrote {} line(s) to {:?}", lines.len(), path);
        }
        _ => print!("{batch}"),
    }
    Ok(())
}
