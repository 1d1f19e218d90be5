//! Differences tree types.
//!
//! The tree borrows the two snapshots it was built from and is never mutated
//! after the engine returns it. Children are stored in identity-key order.

use serde::{Deserialize, Serialize};

use crate::model::{ClassRecord, FieldRecord, MethodRecord, Package, Snapshot};

/// Common query surface of every node in the tree
pub trait Differences {
    fn name(&self) -> &str;

    /// Absent on the old side, present on the new side
    fn is_added(&self) -> bool;

    /// Present on the old side, absent on the new side
    fn is_removed(&self) -> bool;

    /// Present on both sides with a direct change, or containing at least one
    /// added, removed or modified child
    fn is_modified(&self) -> bool;

    /// Deprecated flag flipped between old and new
    fn deprecation_changed(&self) -> bool {
        false
    }

    /// Added, removed or modified
    fn has_changed(&self) -> bool {
        self.is_added() || self.is_removed() || self.is_modified()
    }
}

/// Overlay recording a flip of the deprecated flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeprecationChange {
    Deprecated,
    Undeprecated,
}

impl DeprecationChange {
    /// `None` when the flag did not change
    pub fn between(old: bool, new: bool) -> Option<Self> {
        match (old, new) {
            (false, true) => Some(DeprecationChange::Deprecated),
            (true, false) => Some(DeprecationChange::Undeprecated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
}

impl ClassKind {
    /// Interface if either present side is an interface
    pub fn of(old: Option<&ClassRecord>, new: Option<&ClassRecord>) -> Self {
        if old.into_iter().chain(new).any(ClassRecord::is_interface) {
            ClassKind::Interface
        } else {
            ClassKind::Class
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
        }
    }
}

/// Root of the tree
#[derive(Debug, Clone)]
pub struct ProjectDifferences<'a> {
    pub name: String,
    pub old_label: String,
    pub new_label: String,
    pub old: &'a Snapshot,
    pub new: &'a Snapshot,
    /// One entry per differing package, sorted by package name
    pub packages: Vec<PackageDifferences<'a>>,
}

impl<'a> ProjectDifferences<'a> {
    /// True when no package differs at all
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn package(&self, name: &str) -> Option<&PackageDifferences<'a>> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Resolve a class node by fully-qualified name
    pub fn class(&self, name: &str) -> Option<&ClassDifferences<'a>> {
        self.packages.iter().find_map(|p| p.class(name))
    }

    pub fn class_count(&self) -> usize {
        self.packages.iter().map(|p| p.classes.len()).sum()
    }

    pub fn feature_count(&self) -> usize {
        self.packages
            .iter()
            .flat_map(|p| &p.classes)
            .map(|c| c.features.len())
            .sum()
    }
}

impl Differences for ProjectDifferences<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_added(&self) -> bool {
        false
    }

    fn is_removed(&self) -> bool {
        false
    }

    fn is_modified(&self) -> bool {
        self.packages.iter().any(Differences::has_changed)
    }
}

#[derive(Debug, Clone)]
pub struct PackageDifferences<'a> {
    pub name: String,
    pub old: Option<&'a Package>,
    pub new: Option<&'a Package>,
    /// Empty unless the package exists on both sides
    pub classes: Vec<ClassDifferences<'a>>,
}

impl<'a> PackageDifferences<'a> {
    pub fn class(&self, name: &str) -> Option<&ClassDifferences<'a>> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn added_classes(&self) -> impl Iterator<Item = &ClassDifferences<'a>> {
        self.classes.iter().filter(|c| c.is_added())
    }

    pub fn removed_classes(&self) -> impl Iterator<Item = &ClassDifferences<'a>> {
        self.classes.iter().filter(|c| c.is_removed())
    }

    pub fn modified_classes(&self) -> impl Iterator<Item = &ClassDifferences<'a>> {
        self.classes.iter().filter(|c| c.is_modified())
    }
}

impl Differences for PackageDifferences<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_added(&self) -> bool {
        self.old.is_none() && self.new.is_some()
    }

    fn is_removed(&self) -> bool {
        self.old.is_some() && self.new.is_none()
    }

    fn is_modified(&self) -> bool {
        self.old.is_some()
            && self.new.is_some()
            && self.classes.iter().any(Differences::has_changed)
    }
}

/// A class or interface present on at least one side
#[derive(Debug, Clone)]
pub struct ClassDifferences<'a> {
    /// Fully-qualified class name
    pub name: String,
    pub kind: ClassKind,
    pub old: Option<&'a ClassRecord>,
    pub new: Option<&'a ClassRecord>,
    pub declaration_modified: bool,
    /// Fields sorted by name, then methods and constructors sorted by signature
    pub features: Vec<FeatureDifferences<'a>>,
    pub deprecation: Option<DeprecationChange>,
}

impl<'a> ClassDifferences<'a> {
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Class changed between class and interface
    pub fn kind_changed(&self) -> bool {
        match (self.old, self.new) {
            (Some(old), Some(new)) => old.is_interface() != new.is_interface(),
            _ => false,
        }
    }

    /// Resolve a feature node by identity key (field name or method signature)
    pub fn feature(&self, key: &str) -> Option<&FeatureDifferences<'a>> {
        self.features.iter().find(|f| f.key == key)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FeatureDifferences<'a>> {
        self.features.iter().filter(|f| f.is_field())
    }

    pub fn methods(&self) -> impl Iterator<Item = &FeatureDifferences<'a>> {
        self.features
            .iter()
            .filter(|f| matches!(f.kind, FeatureKind::Method { .. }))
    }

    pub fn constructors(&self) -> impl Iterator<Item = &FeatureDifferences<'a>> {
        self.features
            .iter()
            .filter(|f| matches!(f.kind, FeatureKind::Constructor { .. }))
    }
}

impl Differences for ClassDifferences<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_added(&self) -> bool {
        self.old.is_none() && self.new.is_some()
    }

    fn is_removed(&self) -> bool {
        self.old.is_some() && self.new.is_none()
    }

    fn is_modified(&self) -> bool {
        self.old.is_some()
            && self.new.is_some()
            && (self.declaration_modified || self.features.iter().any(Differences::has_changed))
    }

    fn deprecation_changed(&self) -> bool {
        self.deprecation.is_some()
    }
}

/// Variant-specific part of a feature node
#[derive(Debug, Clone)]
pub enum FeatureKind<'a> {
    Field {
        old: Option<&'a FieldRecord>,
        new: Option<&'a FieldRecord>,
        constant_value_changed: bool,
    },
    Method {
        old: Option<&'a MethodRecord>,
        new: Option<&'a MethodRecord>,
        code_changed: bool,
    },
    Constructor {
        old: Option<&'a MethodRecord>,
        new: Option<&'a MethodRecord>,
        code_changed: bool,
    },
}

impl FeatureKind<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            FeatureKind::Field { .. } => "field",
            FeatureKind::Method { .. } => "method",
            FeatureKind::Constructor { .. } => "constructor",
        }
    }

    fn presence(&self) -> (bool, bool) {
        match self {
            FeatureKind::Field { old, new, .. } => (old.is_some(), new.is_some()),
            FeatureKind::Method { old, new, .. } | FeatureKind::Constructor { old, new, .. } => {
                (old.is_some(), new.is_some())
            }
        }
    }
}

/// A field, method or constructor present on at least one side
#[derive(Debug, Clone)]
pub struct FeatureDifferences<'a> {
    /// Full signature (new side preferred)
    pub name: String,
    /// Identity key inside the class: field name or method signature
    pub key: String,
    pub kind: FeatureKind<'a>,
    pub declaration_modified: bool,
    /// Removed from the class but still reachable through a supertype
    pub inherited: bool,
    pub deprecation: Option<DeprecationChange>,
}

impl<'a> FeatureDifferences<'a> {
    pub fn is_field(&self) -> bool {
        matches!(self.kind, FeatureKind::Field { .. })
    }

    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    pub fn constant_value_changed(&self) -> bool {
        matches!(
            self.kind,
            FeatureKind::Field {
                constant_value_changed: true,
                ..
            }
        )
    }

    pub fn code_changed(&self) -> bool {
        match self.kind {
            FeatureKind::Method { code_changed, .. }
            | FeatureKind::Constructor { code_changed, .. } => code_changed,
            FeatureKind::Field { .. } => false,
        }
    }

    pub fn old_field(&self) -> Option<&'a FieldRecord> {
        match self.kind {
            FeatureKind::Field { old, .. } => old,
            _ => None,
        }
    }

    pub fn new_field(&self) -> Option<&'a FieldRecord> {
        match self.kind {
            FeatureKind::Field { new, .. } => new,
            _ => None,
        }
    }

    pub fn old_method(&self) -> Option<&'a MethodRecord> {
        match self.kind {
            FeatureKind::Method { old, .. } | FeatureKind::Constructor { old, .. } => old,
            FeatureKind::Field { .. } => None,
        }
    }

    pub fn new_method(&self) -> Option<&'a MethodRecord> {
        match self.kind {
            FeatureKind::Method { new, .. } | FeatureKind::Constructor { new, .. } => new,
            FeatureKind::Field { .. } => None,
        }
    }
}

impl Differences for FeatureDifferences<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_added(&self) -> bool {
        self.kind.presence() == (false, true)
    }

    fn is_removed(&self) -> bool {
        self.kind.presence() == (true, false)
    }

    fn is_modified(&self) -> bool {
        self.kind.presence() == (true, true)
            && (self.declaration_modified || self.constant_value_changed() || self.code_changed())
    }

    fn deprecation_changed(&self) -> bool {
        self.deprecation.is_some()
    }
}
