use super::DifferenceStrategy;
use crate::model::{ClassRecord, CodeBody, ConstantValue, FieldRecord, MethodRecord};

/// Permissive base: every compared pair counts as different
///
/// On its own this reports every class and feature present on both sides.
/// It exists to be wrapped by a filtering decorator such as
/// [`IncompatibleStrategy`](super::IncompatibleStrategy), whose own checks then
/// decide alone.
///
/// # Example
/// ```
/// use jardiff_core::model::ClassRecord;
/// use jardiff_core::strategy::{DifferenceStrategy, NoOpStrategy};
///
/// let class = ClassRecord::new("p.A");
/// assert!(NoOpStrategy.declaration_modified(&class, &class));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpStrategy;

impl DifferenceStrategy for NoOpStrategy {
    fn declaration_modified(&self, _: &ClassRecord, _: &ClassRecord) -> bool {
        true
    }

    fn field_declaration_modified(&self, _: &FieldRecord, _: &FieldRecord) -> bool {
        true
    }

    fn method_declaration_modified(&self, _: &MethodRecord, _: &MethodRecord) -> bool {
        true
    }

    fn constant_value_differs(&self, _: Option<&ConstantValue>, _: Option<&ConstantValue>) -> bool {
        true
    }

    fn code_differs(&self, _: Option<&CodeBody>, _: Option<&CodeBody>) -> bool {
        true
    }
}
