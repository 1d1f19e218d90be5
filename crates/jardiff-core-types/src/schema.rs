//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers; the engine's compare events and per-package/per-class
// progress events use these keys
pub const FIELD_PROJECT: &str = "project";
pub const FIELD_PACKAGE: &str = "package";
pub const FIELD_CLASS: &str = "class";

// Collection sizes
pub const FIELD_PACKAGE_COUNT: &str = "package_count";
pub const FIELD_CLASS_COUNT: &str = "class_count";
pub const FIELD_FEATURE_COUNT: &str = "feature_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
