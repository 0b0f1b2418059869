use std::path::PathBuf;

use clap::Args;
use dayplan_core::{export_filename, IcsEncoder, PlanBlock};
use serde::Deserialize;

use super::read_input;

#[derive(Args)]
pub struct ExportArgs {
    /// Plan file (`{"plan": [...]}` or a bare block array), or "-" for stdin
    #[arg(short, long, default_value = "-")]
    input: String,
    /// Calendar name (default: "Plan <date>")
    #[arg(short, long)]
    label: Option<String>,
    /// Output file (default: plan-<date>.ics)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,
    /// Write the calendar to stdout
    #[arg(long)]
    stdout: bool,
}

/// Either a planning response body or the bare block list.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlanDocument {
    Response { plan: Vec<PlanBlock> },
    Blocks(Vec<PlanBlock>),
}

impl PlanDocument {
    fn into_blocks(self) -> Vec<PlanBlock> {
        match self {
            PlanDocument::Response { plan } => plan,
            PlanDocument::Blocks(blocks) => blocks,
        }
    }
}

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(&args.input)?;
    let blocks = serde_json::from_str::<PlanDocument>(&raw)
        .map_err(|_| "input is neither a plan response nor a block array")?
        .into_blocks();

    let date = blocks
        .first()
        .map(|b| b.start.date())
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let label = args
        .label
        .unwrap_or_else(|| format!("Plan {}", date.format("%Y-%m-%d")));
    let document = IcsEncoder::new().encode(&blocks, &label);

    if args.stdout {
        print!("{document}");
        return Ok(());
    }

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(export_filename(date)));
    std::fs::write(&path, document)?;
    tracing::debug!(path = %path.display(), blocks = blocks.len(), "calendar written");
    println!("exported {} blocks to {}", blocks.len(), path.display());
    Ok(())
}
