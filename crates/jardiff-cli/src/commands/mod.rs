pub mod diff;
pub mod validate;
