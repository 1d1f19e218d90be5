//! Structural model of a compiled component
//!
//! These records are what an external class-file reader produces and what the
//! differencing engine consumes. The engine never mutates them.

pub mod class;
pub mod declaration;
pub mod feature;
pub mod hierarchy;
pub mod snapshot;

pub use class::{package_of, ClassRecord};
pub use declaration::{Access, ClassDeclaration, FeatureDeclaration};
pub use feature::{CodeBody, ConstantValue, FieldRecord, MethodRecord};
pub use hierarchy::{HierarchyLookup, Located};
pub use snapshot::{Package, Snapshot, EMPTY_PACKAGE};
