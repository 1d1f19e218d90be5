//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//!   emitting the canonical field keys from `jardiff_core_types::schema`
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use jardiff_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! The `RUST_LOG` environment variable overrides the profile's default filter.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
