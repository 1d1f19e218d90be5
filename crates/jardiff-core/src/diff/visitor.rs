//! Generic traversal over a differences tree.
//!
//! Renderers implement [`DifferencesVisitor`] and override only the levels they
//! care about. Each default `visit_*` method descends through the matching
//! `walk_*` function, so an override that still wants the children calls the
//! walk function itself.

use serde::Serialize;

use crate::diff::model::{
    ClassDifferences, Differences, FeatureDifferences, PackageDifferences, ProjectDifferences,
};

pub trait DifferencesVisitor<'a> {
    fn visit_project(&mut self, project: &ProjectDifferences<'a>) {
        walk_project(self, project);
    }

    fn visit_package(&mut self, package: &PackageDifferences<'a>) {
        walk_package(self, package);
    }

    fn visit_class(&mut self, class: &ClassDifferences<'a>) {
        walk_class(self, class);
    }

    fn visit_feature(&mut self, _feature: &FeatureDifferences<'a>) {}
}

pub fn walk_project<'a, V>(visitor: &mut V, project: &ProjectDifferences<'a>)
where
    V: DifferencesVisitor<'a> + ?Sized,
{
    for package in &project.packages {
        visitor.visit_package(package);
    }
}

pub fn walk_package<'a, V>(visitor: &mut V, package: &PackageDifferences<'a>)
where
    V: DifferencesVisitor<'a> + ?Sized,
{
    for class in &package.classes {
        visitor.visit_class(class);
    }
}

pub fn walk_class<'a, V>(visitor: &mut V, class: &ClassDifferences<'a>)
where
    V: DifferencesVisitor<'a> + ?Sized,
{
    for feature in &class.features {
        visitor.visit_feature(feature);
    }
}

impl<'a> ProjectDifferences<'a> {
    pub fn accept<V: DifferencesVisitor<'a> + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_project(self);
    }
}

impl<'a> PackageDifferences<'a> {
    pub fn accept<V: DifferencesVisitor<'a> + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_package(self);
    }
}

impl<'a> ClassDifferences<'a> {
    pub fn accept<V: DifferencesVisitor<'a> + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_class(self);
    }
}

impl<'a> FeatureDifferences<'a> {
    pub fn accept<V: DifferencesVisitor<'a> + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_feature(self);
    }
}

/// Added/removed/modified tallies for one level of the tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    /// Nodes whose deprecated flag flipped, whatever their other state
    pub deprecation_changed: usize,
}

impl LevelCounts {
    fn record(&mut self, node: &impl Differences) {
        if node.is_added() {
            self.added += 1;
        } else if node.is_removed() {
            self.removed += 1;
        } else if node.is_modified() {
            self.modified += 1;
        }
        if node.deprecation_changed() {
            self.deprecation_changed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.added + self.removed + self.modified
    }
}

/// Per-level tallies for a whole tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeCounts {
    pub packages: LevelCounts,
    pub classes: LevelCounts,
    pub features: LevelCounts,
}

impl ChangeCounts {
    pub fn of(project: &ProjectDifferences<'_>) -> Self {
        let mut counts = Self::default();
        project.accept(&mut counts);
        counts
    }
}

impl<'a> DifferencesVisitor<'a> for ChangeCounts {
    fn visit_package(&mut self, package: &PackageDifferences<'a>) {
        self.packages.record(package);
        walk_package(self, package);
    }

    fn visit_class(&mut self, class: &ClassDifferences<'a>) {
        self.classes.record(class);
        walk_class(self, class);
    }

    fn visit_feature(&mut self, feature: &FeatureDifferences<'a>) {
        self.features.record(feature);
    }
}

/// Short state word for a node, used by both renderers
pub fn state_label(node: &impl Differences) -> &'static str {
    if node.is_added() {
        "added"
    } else if node.is_removed() {
        "removed"
    } else if node.is_modified() {
        "modified"
    } else if node.deprecation_changed() {
        "deprecation"
    } else {
        "unchanged"
    }
}
