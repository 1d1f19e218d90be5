//! Differences tree and the engine that builds it.
//!
//! ## Entry point
//!
//! ```
//! use jardiff_core::diff::{compute_differences, render_human_summary};
//! use jardiff_core::model::{ClassRecord, MethodRecord, Snapshot};
//! use jardiff_core::strategy::ApiStrategy;
//!
//! let old = Snapshot::new()
//!     .with_class(ClassRecord::new("p.A").with_method(MethodRecord::new("m()", "p.A.m()")));
//! let new = Snapshot::new().with_class(ClassRecord::new("p.A"));
//!
//! let tree = compute_differences("demo", "1.0", &old, "2.0", &new, ApiStrategy::default())?;
//! let summary = render_human_summary(&tree);
//! assert!(summary.contains("Removed method `p.A.m()`"));
//! # Ok::<(), jardiff_core::ExError>(())
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: children are ordered by identity key (package name,
//!   class name, field name, method signature), never by input iteration order.
//! - **Presence**: a node is added or removed, never both; added and removed
//!   nodes have no children.
//! - **Deprecation independence**: a flipped deprecated flag always yields a
//!   node carrying the change, even when the strategy reports no difference.
//! - **No shared state**: per-comparison state travels in a
//!   [`ComparisonContext`], so one [`DifferencesFactory`] can be used from
//!   several threads.

pub mod engine;
pub mod human_summary;
pub mod json_report;
pub mod model;
pub mod visitor;

pub use engine::{compute_differences, ClassScope, ComparisonContext, DifferencesFactory};
pub use human_summary::render_human_summary;
pub use json_report::render_json_report;
pub use model::{
    ClassDifferences, ClassKind, DeprecationChange, Differences, FeatureDifferences, FeatureKind,
    PackageDifferences, ProjectDifferences,
};
pub use visitor::{ChangeCounts, DifferencesVisitor, LevelCounts};
