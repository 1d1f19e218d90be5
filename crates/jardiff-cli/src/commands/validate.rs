//! Validate command
//!
//! Usage: jardiff validate <SNAPSHOT>...

use std::path::PathBuf;

use clap::Args;
use jardiff_core::Snapshot;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Snapshot files (JSON) to check
    #[arg(required = true)]
    pub snapshots: Vec<PathBuf>,
}

/// Execute validate command
///
/// Stops at the first snapshot that cannot be loaded or breaks the contract.
pub fn execute(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    for path in &args.snapshots {
        let snapshot = Snapshot::load(path)?;
        snapshot
            .validate()
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        println!(
            "✓ {}: {} classes in {} packages",
            path.display(),
            snapshot.class_count(),
            snapshot.package_names().count()
        );
    }
    Ok(())
}
