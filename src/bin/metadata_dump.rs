//! Metadata Dump CLI
//!
//! Reads a stored metadata document (or audit trail) and prints it as JSON
//! or as labelled text.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use libra_metadata::config::{MetadataConfig, OutputFormat};
use libra_metadata::dump::{render_audit_json, render_audit_text, render_json, render_text};
use libra_metadata::{load_audit_trail, load_work, upgrade_work, WorkKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "metadata-dump")]
#[command(about = "Dump a stored ETD or open-access metadata document")]
struct Cli {
    /// Input file name
    #[arg(short, long)]
    infile: PathBuf,

    /// Output format (json, text)
    #[arg(short, long)]
    format: Option<String>,

    /// Document kind (etd, oa)
    #[arg(short, long)]
    kind: Option<String>,

    /// Treat the input as an audit trail
    #[arg(long)]
    audit: bool,

    /// Upgrade documents from earlier schema generations
    #[arg(long)]
    upgrade: bool,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Configuration file
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        println!("ERROR: {:#}", e);
        std::process::exit(1);
    }
    println!("INFO: terminating normally");
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = MetadataConfig::load_from(cli.config.as_deref())
        .context("loading configuration")?;

    let format = match cli.format.as_deref() {
        Some(f) => f.parse::<OutputFormat>()?,
        None => config.dump.format,
    };
    let kind = match cli.kind.as_deref() {
        Some(k) => k.parse::<WorkKind>()?,
        None => config.dump.kind,
    };
    let pretty = cli.pretty || config.dump.pretty;
    let upgrade = cli.upgrade || config.schema.upgrade;

    let buf = std::fs::read(&cli.infile)
        .with_context(|| format!("reading {}", cli.infile.display()))?;
    debug!(path = %cli.infile.display(), bytes = buf.len(), %format, "read input");

    let rendered = if cli.audit {
        let records = load_audit_trail(&buf)?;
        info!(records = records.len(), "decoded audit trail");
        match format {
            OutputFormat::Json => render_audit_json(&records, pretty)?,
            OutputFormat::Text => render_audit_text(&records),
        }
    } else {
        let work = if upgrade {
            upgrade_work(kind, &buf)?
        } else {
            load_work(kind, &buf)?
        };
        info!(%kind, "decoded document");
        match format {
            OutputFormat::Json => render_json(&work, pretty)?,
            OutputFormat::Text => render_text(&work),
        }
    };

    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
