//! Filtering decorator reporting only changes that can break existing clients

use super::DifferenceStrategy;
use crate::model::{
    ClassRecord, CodeBody, ConstantValue, FeatureDeclaration, FieldRecord, MethodRecord,
};

/// Filtering decorator: own incompatibility checks AND the inner verdict
///
/// Because every leaf is `own && inner`, wrapping a strategy can only narrow
/// what it reports. Wrap [`NoOpStrategy`](super::NoOpStrategy) to let the
/// incompatibility checks decide alone.
///
/// A changed constant value or code body is never incompatible: clients
/// compiled against the old version keep linking. Gaining or losing one
/// still counts, since every leaf reports one-sided absence.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncompatibleStrategy<S> {
    inner: S,
}

impl<S> IncompatibleStrategy<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DifferenceStrategy> DifferenceStrategy for IncompatibleStrategy<S> {
    fn declaration_modified(&self, old: &ClassRecord, new: &ClassRecord) -> bool {
        class_incompatible(old, new) && self.inner.declaration_modified(old, new)
    }

    fn field_declaration_modified(&self, old: &FieldRecord, new: &FieldRecord) -> bool {
        feature_incompatible(&old.declaration, &new.declaration)
            && self.inner.field_declaration_modified(old, new)
    }

    fn method_declaration_modified(&self, old: &MethodRecord, new: &MethodRecord) -> bool {
        feature_incompatible(&old.declaration, &new.declaration)
            && self.inner.method_declaration_modified(old, new)
    }

    fn constant_value_differs(
        &self,
        old: Option<&ConstantValue>,
        new: Option<&ConstantValue>,
    ) -> bool {
        old.is_some() != new.is_some() && self.inner.constant_value_differs(old, new)
    }

    fn code_differs(&self, old: Option<&CodeBody>, new: Option<&CodeBody>) -> bool {
        old.is_some() != new.is_some() && self.inner.code_differs(old, new)
    }
}

fn class_incompatible(old: &ClassRecord, new: &ClassRecord) -> bool {
    let (before, after) = (&old.declaration, &new.declaration);
    old.is_interface() != new.is_interface()
        || after.access.is_narrower_than(before.access)
        || (after.is_final && !before.is_final)
        || (!new.is_interface() && after.is_abstract && !before.is_abstract)
        || before.superclass != after.superclass
        || before
            .interfaces
            .iter()
            .any(|iface| !after.interfaces.contains(iface))
}

fn feature_incompatible(before: &FeatureDeclaration, after: &FeatureDeclaration) -> bool {
    after.access.is_narrower_than(before.access)
        || before.is_static != after.is_static
        || (after.is_final && !before.is_final)
        || (after.is_abstract && !before.is_abstract)
        || before.type_name != after.type_name
        || after
            .throws
            .iter()
            .any(|exception| !before.throws.contains(exception))
}
