//! JarDiff Core - API difference engine for compiled component snapshots
//!
//! This crate compares two structural snapshots of a compiled component
//! (package → class → members) and builds a hierarchical differences tree:
//! - Structural model with hierarchy-aware member lookup ([`model`])
//! - Chainable difference strategies deciding what counts as a change ([`strategy`])
//! - The differencing engine, the tree, a tree visitor and two renderers ([`diff`])
//! - Structured errors, logging and configuration

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod strategy;

// Used by the exported logging macros
pub use jardiff_core_types;

// Re-export commonly used types
pub use config::DiffConfig;
pub use diff::{
    compute_differences, render_human_summary, render_json_report, Differences,
    DifferencesFactory, ProjectDifferences,
};
pub use errors::{ExError, ExErrorKind, JarDiffError, Result};
pub use model::{ClassRecord, FieldRecord, MethodRecord, Snapshot};
pub use strategy::{DifferenceStrategy, StrategyKind};
