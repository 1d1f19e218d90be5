use super::{CodeStrategy, DifferenceStrategy};
use crate::model::{ClassRecord, CodeBody, ConstantValue, FieldRecord, MethodRecord};

/// Broadening decorator: declaration changes OR the inner verdict
///
/// A class declaration differs when its kind (class/interface) or any of its
/// declaration attributes changed. A field or method declaration differs when
/// its modifiers, type, `throws` list or full signature changed. Constant value
/// and code comparisons are left to the inner strategy.
///
/// `ApiStrategy::default()` wraps [`CodeStrategy`], which flags signature and
/// body changes while ignoring documentation-only differences.
#[derive(Debug, Clone, Copy)]
pub struct ApiStrategy<S = CodeStrategy> {
    inner: S,
}

impl<S> ApiStrategy<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl Default for ApiStrategy<CodeStrategy> {
    fn default() -> Self {
        Self::new(CodeStrategy)
    }
}

impl<S: DifferenceStrategy> DifferenceStrategy for ApiStrategy<S> {
    fn declaration_modified(&self, old: &ClassRecord, new: &ClassRecord) -> bool {
        old.is_interface() != new.is_interface()
            || old.declaration != new.declaration
            || self.inner.declaration_modified(old, new)
    }

    fn field_declaration_modified(&self, old: &FieldRecord, new: &FieldRecord) -> bool {
        old.declaration != new.declaration
            || old.full_signature != new.full_signature
            || self.inner.field_declaration_modified(old, new)
    }

    fn method_declaration_modified(&self, old: &MethodRecord, new: &MethodRecord) -> bool {
        old.declaration != new.declaration
            || old.full_signature != new.full_signature
            || self.inner.method_declaration_modified(old, new)
    }

    fn constant_value_differs(
        &self,
        old: Option<&ConstantValue>,
        new: Option<&ConstantValue>,
    ) -> bool {
        self.inner.constant_value_differs(old, new)
    }

    fn code_differs(&self, old: Option<&CodeBody>, new: Option<&CodeBody>) -> bool {
        self.inner.code_differs(old, new)
    }
}
