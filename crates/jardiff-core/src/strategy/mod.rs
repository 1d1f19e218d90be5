//! Difference strategies
//!
//! A [`DifferenceStrategy`] decides, at every granularity, whether an old/new
//! pair counts as different. Strategies compose by delegation: a decorator
//! holds its inner strategy in an explicit field, answers the leaf predicates
//! from its own checks combined with the inner verdict, and inherits the
//! aggregate predicates, which recurse through `self` so the whole chain's leaf
//! answers drive package- and class-level decisions.
//!
//! | Strategy | Role | Combination |
//! |---|---|---|
//! | [`NoOpStrategy`] | permissive base | everything differs |
//! | [`CodeStrategy`] | base | constant values and code bodies |
//! | [`ApiStrategy`] | broadening decorator | own declaration checks OR inner |
//! | [`IncompatibleStrategy`] | filtering decorator | own incompatibility checks AND inner |
//!
//! All strategies are stateless and `Send + Sync`.

pub mod api;
pub mod code;
pub mod incompatible;
pub mod kind;
pub mod noop;

pub use api::ApiStrategy;
pub use code::CodeStrategy;
pub use incompatible::IncompatibleStrategy;
pub use kind::StrategyKind;
pub use noop::NoOpStrategy;

use std::collections::BTreeSet;

use crate::model::{ClassRecord, CodeBody, ConstantValue, FieldRecord, MethodRecord, Package};

/// Policy answering "is X different" at each level of the tree
///
/// Contract on absence: every aggregate predicate returns `true` when exactly
/// one side is absent, so callers never special-case additions and removals.
pub trait DifferenceStrategy {
    /// Class-level declaration change; both sides present
    fn declaration_modified(&self, old: &ClassRecord, new: &ClassRecord) -> bool;

    /// Field declaration change; both sides present
    fn field_declaration_modified(&self, old: &FieldRecord, new: &FieldRecord) -> bool;

    /// Method or constructor declaration change; both sides present
    fn method_declaration_modified(&self, old: &MethodRecord, new: &MethodRecord) -> bool;

    fn constant_value_differs(
        &self,
        old: Option<&ConstantValue>,
        new: Option<&ConstantValue>,
    ) -> bool;

    fn code_differs(&self, old: Option<&CodeBody>, new: Option<&CodeBody>) -> bool;

    /// An absent package is passed as an empty one
    fn package_differs(&self, old: &Package, new: &Package) -> bool {
        match (old.is_empty(), new.is_empty()) {
            (true, true) => false,
            (false, false) => union_keys(old.class_names(), new.class_names())
                .into_iter()
                .any(|name| self.class_differs(old.get(name), new.get(name))),
            _ => true,
        }
    }

    fn class_differs(&self, old: Option<&ClassRecord>, new: Option<&ClassRecord>) -> bool {
        match (old, new) {
            (Some(old), Some(new)) => {
                self.declaration_modified(old, new)
                    || field_names(old, new)
                        .into_iter()
                        .any(|name| self.field_differs(old.field(name), new.field(name)))
                    || method_signatures(old, new)
                        .into_iter()
                        .any(|sig| self.method_differs(old.method(sig), new.method(sig)))
            }
            (None, None) => false,
            _ => true,
        }
    }

    fn field_differs(&self, old: Option<&FieldRecord>, new: Option<&FieldRecord>) -> bool {
        match (old, new) {
            (Some(old), Some(new)) => {
                self.field_declaration_modified(old, new)
                    || self.constant_value_differs(
                        old.constant_value.as_ref(),
                        new.constant_value.as_ref(),
                    )
            }
            (None, None) => false,
            _ => true,
        }
    }

    fn method_differs(&self, old: Option<&MethodRecord>, new: Option<&MethodRecord>) -> bool {
        match (old, new) {
            (Some(old), Some(new)) => {
                self.method_declaration_modified(old, new)
                    || self.code_differs(old.code.as_ref(), new.code.as_ref())
            }
            (None, None) => false,
            _ => true,
        }
    }
}

macro_rules! forward_strategy {
    () => {
        fn declaration_modified(&self, old: &ClassRecord, new: &ClassRecord) -> bool {
            (**self).declaration_modified(old, new)
        }

        fn field_declaration_modified(&self, old: &FieldRecord, new: &FieldRecord) -> bool {
            (**self).field_declaration_modified(old, new)
        }

        fn method_declaration_modified(&self, old: &MethodRecord, new: &MethodRecord) -> bool {
            (**self).method_declaration_modified(old, new)
        }

        fn constant_value_differs(
            &self,
            old: Option<&ConstantValue>,
            new: Option<&ConstantValue>,
        ) -> bool {
            (**self).constant_value_differs(old, new)
        }

        fn code_differs(&self, old: Option<&CodeBody>, new: Option<&CodeBody>) -> bool {
            (**self).code_differs(old, new)
        }

        fn package_differs(&self, old: &Package, new: &Package) -> bool {
            (**self).package_differs(old, new)
        }

        fn class_differs(&self, old: Option<&ClassRecord>, new: Option<&ClassRecord>) -> bool {
            (**self).class_differs(old, new)
        }

        fn field_differs(&self, old: Option<&FieldRecord>, new: Option<&FieldRecord>) -> bool {
            (**self).field_differs(old, new)
        }

        fn method_differs(&self, old: Option<&MethodRecord>, new: Option<&MethodRecord>) -> bool {
            (**self).method_differs(old, new)
        }
    };
}

impl<S: DifferenceStrategy + ?Sized> DifferenceStrategy for &S {
    forward_strategy!();
}

impl<S: DifferenceStrategy + ?Sized> DifferenceStrategy for Box<S> {
    forward_strategy!();
}

/// Sorted, de-duplicated union of two key sequences
pub(crate) fn union_keys<'a>(
    old: impl Iterator<Item = &'a str>,
    new: impl Iterator<Item = &'a str>,
) -> BTreeSet<&'a str> {
    old.chain(new).collect()
}

pub(crate) fn field_names<'a>(old: &'a ClassRecord, new: &'a ClassRecord) -> BTreeSet<&'a str> {
    union_keys(
        old.fields.iter().map(|f| f.name.as_str()),
        new.fields.iter().map(|f| f.name.as_str()),
    )
}

pub(crate) fn method_signatures<'a>(
    old: &'a ClassRecord,
    new: &'a ClassRecord,
) -> BTreeSet<&'a str> {
    union_keys(
        old.methods.iter().map(|m| m.signature.as_str()),
        new.methods.iter().map(|m| m.signature.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_always_differs_for_every_strategy() {
        let class = ClassRecord::new("p.A");
        let field = FieldRecord::new("x", "p.A.x");
        let method = MethodRecord::new("m()", "p.A.m()");
        let value = ConstantValue::Int(1);
        let body = CodeBody::new(vec![1]);
        let mut package = Package::new();
        package.insert(class.clone());

        let strategies: Vec<Box<dyn DifferenceStrategy>> = vec![
            Box::new(NoOpStrategy),
            Box::new(CodeStrategy),
            Box::new(ApiStrategy::default()),
            Box::new(IncompatibleStrategy::new(NoOpStrategy)),
            Box::new(IncompatibleStrategy::new(ApiStrategy::default())),
        ];

        for strategy in &strategies {
            assert!(strategy.package_differs(&package, &Package::new()));
            assert!(strategy.package_differs(&Package::new(), &package));
            assert!(strategy.class_differs(Some(&class), None));
            assert!(strategy.class_differs(None, Some(&class)));
            assert!(strategy.field_differs(Some(&field), None));
            assert!(strategy.field_differs(None, Some(&field)));
            assert!(strategy.method_differs(Some(&method), None));
            assert!(strategy.method_differs(None, Some(&method)));

            assert!(strategy.constant_value_differs(Some(&value), None));
            assert!(strategy.constant_value_differs(None, Some(&value)));
            assert!(strategy.code_differs(Some(&body), None));
            assert!(strategy.code_differs(None, Some(&body)));

            assert!(!strategy.package_differs(&Package::new(), &Package::new()));
            assert!(!strategy.class_differs(None, None));
            assert!(!strategy.field_differs(None, None));
            assert!(!strategy.method_differs(None, None));
        }
    }

    #[test]
    fn test_reference_and_box_forward() {
        let a = ClassRecord::new("p.A").with_method(
            MethodRecord::new("m()", "p.A.m()").with_code(CodeBody::new(vec![1])),
        );
        let b = ClassRecord::new("p.A").with_method(
            MethodRecord::new("m()", "p.A.m()").with_code(CodeBody::new(vec![2])),
        );

        let code = CodeStrategy;
        let by_ref: &dyn DifferenceStrategy = &code;
        let boxed: Box<dyn DifferenceStrategy> = Box::new(CodeStrategy);

        assert!(code.class_differs(Some(&a), Some(&b)));
        assert!((&by_ref).class_differs(Some(&a), Some(&b)));
        assert!(boxed.class_differs(Some(&a), Some(&b)));
        assert!(!boxed.class_differs(Some(&a), Some(&a)));
    }

    #[test]
    fn test_union_keys_sorted_and_deduplicated() {
        let keys = union_keys(["b", "a"].into_iter(), ["c", "a"].into_iter());
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }
}
