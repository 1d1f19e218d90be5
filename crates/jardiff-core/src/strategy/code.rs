use super::DifferenceStrategy;
use crate::model::{ClassRecord, CodeBody, ConstantValue, FieldRecord, MethodRecord};

/// Base strategy comparing constant values and code bodies by value
///
/// Declarations never count as modified; wrap in
/// [`ApiStrategy`](super::ApiStrategy) to add declaration sensitivity.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeStrategy;

impl DifferenceStrategy for CodeStrategy {
    fn declaration_modified(&self, _: &ClassRecord, _: &ClassRecord) -> bool {
        false
    }

    fn field_declaration_modified(&self, _: &FieldRecord, _: &FieldRecord) -> bool {
        false
    }

    fn method_declaration_modified(&self, _: &MethodRecord, _: &MethodRecord) -> bool {
        false
    }

    fn constant_value_differs(
        &self,
        old: Option<&ConstantValue>,
        new: Option<&ConstantValue>,
    ) -> bool {
        old != new
    }

    fn code_differs(&self, old: Option<&CodeBody>, new: Option<&CodeBody>) -> bool {
        old != new
    }
}
