//! Differencing engine.
//!
//! [`DifferencesFactory`] walks two snapshots top-down, consults its strategy at
//! every level and builds the [`ProjectDifferences`] tree. The factory holds
//! only the strategy; everything that changes during one comparison lives in a
//! [`ComparisonContext`] and a [`ClassScope`] passed down the recursion, so a
//! single factory can serve concurrent comparisons.

use std::time::Instant;

use jardiff_core_types::RequestId;

use crate::diff::model::{
    ClassDifferences, ClassKind, DeprecationChange, Differences, FeatureDifferences, FeatureKind,
    PackageDifferences, ProjectDifferences,
};
use crate::errors::{ExError, JarDiffError};
use crate::model::{
    ClassRecord, FieldRecord, HierarchyLookup, MethodRecord, Package, Snapshot, EMPTY_PACKAGE,
};
use crate::strategy::{field_names, method_signatures, union_keys, DifferenceStrategy};
use crate::{log_op_end, log_op_error, log_op_start};

/// Per-comparison state shared by every level of the walk
#[derive(Debug, Clone)]
pub struct ComparisonContext<'a> {
    pub old: &'a Snapshot,
    pub new: &'a Snapshot,
    pub request_id: RequestId,
}

impl<'a> ComparisonContext<'a> {
    pub fn new(old: &'a Snapshot, new: &'a Snapshot) -> Self {
        Self {
            old,
            new,
            request_id: RequestId::new(),
        }
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }
}

/// The class pair whose features are being compared
#[derive(Debug, Clone, Copy)]
pub struct ClassScope<'a> {
    pub old: &'a ClassRecord,
    pub new: &'a ClassRecord,
}

/// Builds differences trees with a fixed strategy
#[derive(Debug, Clone, Default)]
pub struct DifferencesFactory<S> {
    strategy: S,
}

impl<S: DifferenceStrategy> DifferencesFactory<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Compare two snapshots without validating them
    ///
    /// Packages are visited in sorted name order; a package absent on one side
    /// is compared as an empty one.
    pub fn create_project_differences<'a>(
        &self,
        ctx: &ComparisonContext<'a>,
        name: &str,
        old_label: &str,
        new_label: &str,
    ) -> ProjectDifferences<'a> {
        let packages = union_keys(ctx.old.package_names(), ctx.new.package_names())
            .into_iter()
            .filter_map(|package_name| {
                let old = present(ctx.old.package(package_name));
                let new = present(ctx.new.package(package_name));
                let differs = self
                    .strategy
                    .package_differs(old.unwrap_or(&EMPTY_PACKAGE), new.unwrap_or(&EMPTY_PACKAGE))
                    || package_deprecation_flipped(old, new);
                differs.then(|| self.create_package_differences(ctx, package_name, old, new))
            })
            .collect();

        ProjectDifferences {
            name: name.to_string(),
            old_label: old_label.to_string(),
            new_label: new_label.to_string(),
            old: ctx.old,
            new: ctx.new,
            packages,
        }
    }

    /// Build the node for one package; classes are compared only when the
    /// package exists on both sides
    pub fn create_package_differences<'a>(
        &self,
        ctx: &ComparisonContext<'a>,
        name: &str,
        old: Option<&'a Package>,
        new: Option<&'a Package>,
    ) -> PackageDifferences<'a> {
        let mut classes = Vec::new();
        if let (Some(old_pkg), Some(new_pkg)) = (old, new) {
            for class_name in union_keys(old_pkg.class_names(), new_pkg.class_names()) {
                let old_class = old_pkg.get(class_name);
                let new_class = new_pkg.get(class_name);
                if self.strategy.class_differs(old_class, new_class)
                    || class_deprecation_flipped(old_class, new_class)
                {
                    classes.push(self.create_class_differences(
                        ctx, class_name, old_class, new_class,
                    ));
                }
            }
        }

        tracing::debug!(
            request_id = %ctx.request_id,
            package = name,
            class_count = classes.len(),
            "package has {} class(es) that changed",
            classes.len()
        );

        PackageDifferences {
            name: name.to_string(),
            old,
            new,
            classes,
        }
    }

    /// Build the node for one class; features are compared only when the class
    /// exists on both sides
    pub fn create_class_differences<'a>(
        &self,
        ctx: &ComparisonContext<'a>,
        name: &str,
        old: Option<&'a ClassRecord>,
        new: Option<&'a ClassRecord>,
    ) -> ClassDifferences<'a> {
        let mut node = ClassDifferences {
            name: name.to_string(),
            kind: ClassKind::of(old, new),
            old,
            new,
            declaration_modified: false,
            features: Vec::new(),
            deprecation: None,
        };

        let (Some(old), Some(new)) = (old, new) else {
            return node;
        };
        let scope = ClassScope { old, new };

        node.declaration_modified = self.strategy.declaration_modified(old, new);
        node.deprecation = DeprecationChange::between(old.is_deprecated(), new.is_deprecated());

        for field_name in field_names(old, new) {
            let old_field = old.field(field_name);
            let new_field = new.field(field_name);
            if self.strategy.field_differs(old_field, new_field)
                || field_deprecation_flipped(old_field, new_field)
            {
                node.features.push(self.create_field_differences(
                    ctx, scope, field_name, old_field, new_field,
                ));
            }
        }

        for signature in method_signatures(old, new) {
            let old_method = old.method(signature);
            let new_method = new.method(signature);
            if self.strategy.method_differs(old_method, new_method)
                || method_deprecation_flipped(old_method, new_method)
            {
                node.features.push(self.create_method_differences(
                    ctx, scope, signature, old_method, new_method,
                ));
            }
        }

        tracing::debug!(
            request_id = %ctx.request_id,
            class = name,
            feature_count = node.features.len(),
            "class has {} feature(s) that changed",
            node.features.len()
        );

        node
    }

    /// Build the node for one field
    ///
    /// A removed field that is still reachable by name through the new class's
    /// supertypes is marked inherited.
    pub fn create_field_differences<'a>(
        &self,
        ctx: &ComparisonContext<'a>,
        scope: ClassScope<'a>,
        name: &str,
        old: Option<&'a FieldRecord>,
        new: Option<&'a FieldRecord>,
    ) -> FeatureDifferences<'a> {
        let mut declaration_modified = false;
        let mut constant_value_changed = false;
        let mut inherited = false;
        let mut deprecation = None;

        match (old, new) {
            (Some(old), Some(new)) => {
                declaration_modified = self.strategy.field_declaration_modified(old, new);
                constant_value_changed = self
                    .strategy
                    .constant_value_differs(old.constant_value.as_ref(), new.constant_value.as_ref());
                deprecation =
                    DeprecationChange::between(old.is_deprecated(), new.is_deprecated());
            }
            (Some(_), None) => {
                inherited = ctx.new.locate_field(scope.new, name).is_some();
            }
            _ => {}
        }

        FeatureDifferences {
            name: display_name(name, new.or(old).map(|f| f.full_signature.as_str())),
            key: name.to_string(),
            kind: FeatureKind::Field {
                old,
                new,
                constant_value_changed,
            },
            declaration_modified,
            inherited,
            deprecation,
        }
    }

    /// Build the node for one method or constructor
    ///
    /// A removed method is marked inherited when the new class's hierarchy
    /// still resolves its signature and the resolving owner is of the same
    /// kind (class or interface) as the class it was removed from.
    pub fn create_method_differences<'a>(
        &self,
        ctx: &ComparisonContext<'a>,
        scope: ClassScope<'a>,
        signature: &str,
        old: Option<&'a MethodRecord>,
        new: Option<&'a MethodRecord>,
    ) -> FeatureDifferences<'a> {
        let mut declaration_modified = false;
        let mut code_changed = false;
        let mut inherited = false;
        let mut deprecation = None;

        match (old, new) {
            (Some(old), Some(new)) => {
                declaration_modified = self.strategy.method_declaration_modified(old, new);
                code_changed = self
                    .strategy
                    .code_differs(old.code.as_ref(), new.code.as_ref());
                deprecation =
                    DeprecationChange::between(old.is_deprecated(), new.is_deprecated());
            }
            (Some(_), None) => {
                inherited = ctx
                    .new
                    .locate_method(scope.new, signature)
                    .is_some_and(|located| located.owner.is_interface() == scope.old.is_interface());
            }
            _ => {}
        }

        let constructor = old.into_iter().chain(new).any(MethodRecord::is_constructor);
        let kind = if constructor {
            FeatureKind::Constructor {
                old,
                new,
                code_changed,
            }
        } else {
            FeatureKind::Method {
                old,
                new,
                code_changed,
            }
        };

        FeatureDifferences {
            name: display_name(signature, new.or(old).map(|m| m.full_signature.as_str())),
            key: signature.to_string(),
            kind,
            declaration_modified,
            inherited,
            deprecation,
        }
    }

    /// Validate both snapshots, then build the tree
    ///
    /// # Errors
    ///
    /// - `InvalidSnapshot` / `DuplicateFeature`: either snapshot breaks the
    ///   input contract checked by [`Snapshot::validate`]; the error's entity id
    ///   is `old` or `new`
    pub fn compare<'a>(
        &self,
        name: &str,
        old_label: &str,
        old: &'a Snapshot,
        new_label: &str,
        new: &'a Snapshot,
    ) -> Result<ProjectDifferences<'a>, ExError> {
        self.compare_with_request_id(name, old_label, old, new_label, new, RequestId::new())
    }

    /// [`compare`](Self::compare) under a caller-supplied request id
    ///
    /// The id tags every log event of the run and any error returned, so a
    /// caller can correlate the comparison with its own request.
    ///
    /// # Errors
    ///
    /// See [`DifferencesFactory::compare`].
    pub fn compare_with_request_id<'a>(
        &self,
        name: &str,
        old_label: &str,
        old: &'a Snapshot,
        new_label: &str,
        new: &'a Snapshot,
        request_id: RequestId,
    ) -> Result<ProjectDifferences<'a>, ExError> {
        let ctx = ComparisonContext::new(old, new).with_request_id(request_id);
        log_op_start!(
            "compare",
            request_id = %ctx.request_id,
            project = name
        );
        let start = Instant::now();

        let checked = validate_side(&ctx, "old", old).and_then(|()| validate_side(&ctx, "new", new));
        if let Err(err) = checked {
            log_op_error!(
                "compare",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %ctx.request_id
            );
            return Err(err);
        }

        let project = self.create_project_differences(&ctx, name, old_label, new_label);

        log_op_end!(
            "compare",
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = %ctx.request_id,
            project = name,
            package_count = project.packages.len(),
            class_count = project.class_count(),
            feature_count = project.feature_count(),
            modified = project.is_modified()
        );

        Ok(project)
    }
}

/// Compare two snapshots with the given strategy
///
/// Shorthand for [`DifferencesFactory::compare`].
///
/// # Errors
///
/// See [`DifferencesFactory::compare`].
///
/// # Example
///
/// ```
/// use jardiff_core::model::{ClassRecord, Snapshot};
/// use jardiff_core::strategy::ApiStrategy;
/// use jardiff_core::compute_differences;
///
/// let old = Snapshot::new().with_class(ClassRecord::new("p.A"));
/// let new = Snapshot::new();
/// let tree = compute_differences("demo", "1.0", &old, "2.0", &new, ApiStrategy::default())?;
/// assert!(tree.class("p.A").is_some());
/// # Ok::<(), jardiff_core::ExError>(())
/// ```
pub fn compute_differences<'a, S: DifferenceStrategy>(
    name: &str,
    old_label: &str,
    old: &'a Snapshot,
    new_label: &str,
    new: &'a Snapshot,
    strategy: S,
) -> Result<ProjectDifferences<'a>, ExError> {
    DifferencesFactory::new(strategy).compare(name, old_label, old, new_label, new)
}

fn validate_side(ctx: &ComparisonContext<'_>, side: &str, snapshot: &Snapshot) -> Result<(), ExError> {
    snapshot.validate().map_err(|err: JarDiffError| {
        let cause = ExError::from(err);
        ExError::new(cause.kind())
            .with_op("compare")
            .with_entity_id(side)
            .with_request_id(ctx.request_id.clone())
            .with_message(format!("{} snapshot failed validation", side))
            .with_source(cause)
    })
}

/// Packages with no classes count as absent
fn present(package: Option<&Package>) -> Option<&Package> {
    package.filter(|p| !p.is_empty())
}

fn display_name(key: &str, full_signature: Option<&str>) -> String {
    full_signature
        .filter(|s| !s.is_empty())
        .unwrap_or(key)
        .to_string()
}

fn package_deprecation_flipped(old: Option<&Package>, new: Option<&Package>) -> bool {
    let (Some(old), Some(new)) = (old, new) else {
        return false;
    };
    old.classes()
        .any(|class| class_deprecation_flipped(Some(class), new.get(&class.name)))
}

fn class_deprecation_flipped(old: Option<&ClassRecord>, new: Option<&ClassRecord>) -> bool {
    let (Some(old), Some(new)) = (old, new) else {
        return false;
    };
    old.is_deprecated() != new.is_deprecated()
        || old
            .fields
            .iter()
            .any(|field| field_deprecation_flipped(Some(field), new.field(&field.name)))
        || old
            .methods
            .iter()
            .any(|method| method_deprecation_flipped(Some(method), new.method(&method.signature)))
}

fn field_deprecation_flipped(old: Option<&FieldRecord>, new: Option<&FieldRecord>) -> bool {
    matches!((old, new), (Some(old), Some(new)) if old.is_deprecated() != new.is_deprecated())
}

fn method_deprecation_flipped(old: Option<&MethodRecord>, new: Option<&MethodRecord>) -> bool {
    matches!((old, new), (Some(old), Some(new)) if old.is_deprecated() != new.is_deprecated())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConstantValue, FeatureDeclaration};
    use crate::strategy::{ApiStrategy, CodeStrategy, IncompatibleStrategy, NoOpStrategy};

    fn compare_with<'a, S: DifferenceStrategy>(
        strategy: S,
        old: &'a Snapshot,
        new: &'a Snapshot,
    ) -> ProjectDifferences<'a> {
        DifferencesFactory::new(strategy)
            .compare("test", "old", old, "new", new)
            .unwrap()
    }

    #[test]
    fn test_identical_snapshots_produce_empty_tree() {
        let snapshot = Snapshot::new().with_class(
            ClassRecord::new("p.A").with_method(MethodRecord::new("m()", "p.A.m()")),
        );
        let tree = compare_with(ApiStrategy::default(), &snapshot, &snapshot);
        assert!(tree.is_empty());
        assert!(!tree.is_modified());
    }

    #[test]
    fn test_added_package_has_no_children() {
        let old = Snapshot::new();
        let new = Snapshot::new().with_class(ClassRecord::new("p.A"));
        let tree = compare_with(ApiStrategy::default(), &old, &new);
        let package = tree.package("p").unwrap();
        assert!(package.is_added());
        assert!(package.classes.is_empty());
    }

    #[test]
    fn test_empty_package_counts_as_absent() {
        let old: Snapshot = serde_json::from_str(r#"{"p": {}}"#).unwrap();
        let new = Snapshot::new();
        let tree = compare_with(NoOpStrategy, &old, &new);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_constructor_variant() {
        let old = Snapshot::new().with_class(
            ClassRecord::new("p.A").with_method(MethodRecord::new_constructor("<init>()", "p.A()")),
        );
        let new = Snapshot::new().with_class(ClassRecord::new("p.A"));
        let tree = compare_with(ApiStrategy::default(), &old, &new);
        let class = tree.class("p.A").unwrap();
        assert_eq!(class.constructors().count(), 1);
        let ctor = class.feature("<init>()").unwrap();
        assert!(ctor.is_removed());
        assert_eq!(ctor.name, "p.A()");
        assert_eq!(ctor.kind.label(), "constructor");
    }

    #[test]
    fn test_feature_declaration_flag() {
        let old = Snapshot::new()
            .with_class(ClassRecord::new("p.A").with_field(FieldRecord::new("x", "p.A.x")));
        let new = Snapshot::new().with_class(ClassRecord::new("p.A").with_field(
            FieldRecord::new("x", "p.A.x").with_declaration(FeatureDeclaration {
                is_static: true,
                ..Default::default()
            }),
        ));
        let tree = compare_with(ApiStrategy::default(), &old, &new);
        let field = tree.class("p.A").unwrap().feature("x").unwrap();
        assert!(field.declaration_modified);
        assert!(field.is_modified());
        assert!(!field.constant_value_changed());
    }

    #[test]
    fn test_code_strategy_ignores_declaration_only_change() {
        let old = Snapshot::new().with_class(ClassRecord::new("p.A"));
        let new = Snapshot::new().with_class(ClassRecord::new("p.A").with_superclass("p.Base"));
        assert!(compare_with(CodeStrategy, &old, &new).is_empty());
        assert!(!compare_with(ApiStrategy::default(), &old, &new).is_empty());
    }

    #[test]
    fn test_incompatible_filter_drops_constant_change() {
        let old = Snapshot::new().with_class(ClassRecord::new("p.A").with_field(
            FieldRecord::new("x", "p.A.x").with_constant_value(ConstantValue::Int(1)),
        ));
        let new = Snapshot::new().with_class(ClassRecord::new("p.A").with_field(
            FieldRecord::new("x", "p.A.x").with_constant_value(ConstantValue::Int(2)),
        ));
        assert!(compare_with(IncompatibleStrategy::new(NoOpStrategy), &old, &new).is_empty());
    }

    #[test]
    fn test_invalid_snapshot_rejected_with_side() {
        let old: Snapshot = serde_json::from_str(r#"{"q": {"p.A": {"name": "p.A"}}}"#).unwrap();
        let new = Snapshot::new();
        let err = DifferencesFactory::new(NoOpStrategy)
            .compare("test", "old", &old, "new", &new)
            .unwrap_err();
        assert_eq!(err.kind(), crate::errors::ExErrorKind::InvalidSnapshot);
        assert_eq!(err.op(), Some("compare"));
        assert_eq!(err.entity_id(), Some("old"));
        assert!(err.request_id().is_some());
        assert_eq!(err.source_error().and_then(|e| e.entity_id()), Some("p.A"));
    }

    #[test]
    fn test_display_name_falls_back_to_key() {
        assert_eq!(display_name("x", Some("")), "x");
        assert_eq!(display_name("x", None), "x");
        assert_eq!(display_name("x", Some("p.A.x")), "p.A.x");
    }
}
