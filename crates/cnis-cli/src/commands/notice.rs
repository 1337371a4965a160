//! Notice command - clean an INSS notice body.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use cnis_core::notice::process_notice;

use super::load_config;

/// Arguments for the notice command.
#[derive(Args)]
pub struct NoticeArgs {
    /// Decoded message body (plain text or HTML)
    #[arg(required = true)]
    input: PathBuf,

    /// Message subject, searched for the protocol number first
    #[arg(short, long)]
    subject: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: NoticeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let body = fs::read_to_string(&args.input)?;
    info!("Processing notice: {}", args.input.display());

    let notice = process_notice(args.subject.as_deref(), &body, &config.notice);
    let output = serde_json::to_string_pretty(&notice)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
