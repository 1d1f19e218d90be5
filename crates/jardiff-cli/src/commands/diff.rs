//! Diff command
//!
//! Usage: jardiff diff --old <OLD> --new <NEW> [--config <FILE>] [--strategy <NAME>]
//! [--format markdown|json] [--output <FILE>]

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use jardiff_core::logging_facility;
use jardiff_core::{
    compute_differences, render_human_summary, render_json_report, DiffConfig, JarDiffError,
    Snapshot,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown summary for release review
    #[default]
    Markdown,
    /// Structured JSON report
    Json,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot of the older version (JSON)
    #[arg(long)]
    pub old: PathBuf,

    /// Snapshot of the newer version (JSON)
    #[arg(long)]
    pub new: PathBuf,

    /// TOML settings file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Difference strategy: api, code, incompatible or noop
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Project name shown at the root of the report
    #[arg(long)]
    pub name: Option<String>,

    /// Label for the older version
    #[arg(long)]
    pub old_label: Option<String>,

    /// Label for the newer version
    #[arg(long)]
    pub new_label: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&args)?;
    logging_facility::init(config.log_profile);
    tracing::debug!(
        strategy = %config.strategy,
        old = %args.old.display(),
        new = %args.new.display(),
        "diff settings resolved"
    );

    let old = Snapshot::load(&args.old)?;
    let new = Snapshot::load(&args.new)?;

    let tree = compute_differences(
        &config.project_name,
        &config.old_label,
        &old,
        &config.new_label,
        &new,
        config.strategy.build(),
    )?;

    let rendered = match args.format {
        OutputFormat::Markdown => render_human_summary(&tree),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&render_json_report(&tree))?;
            text.push('\n');
            text
        }
    };

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, rendered)
            .map_err(|e| JarDiffError::io(&output_path, e))?;
        println!("✓ Report written to {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

/// Start from the config file (or defaults) and apply flag overrides
fn resolve_config(args: &DiffArgs) -> Result<DiffConfig, JarDiffError> {
    let mut config = match &args.config {
        Some(path) => DiffConfig::load(path)?,
        None => DiffConfig::default(),
    };
    if let Some(strategy) = &args.strategy {
        config.strategy = strategy.parse()?;
    }
    if let Some(name) = &args.name {
        config.project_name = name.clone();
    }
    if let Some(label) = &args.old_label {
        config.old_label = label.clone();
    }
    if let Some(label) = &args.new_label {
        config.new_label = label.clone();
    }
    Ok(config)
}
