//! Hierarchy-aware member resolution
//!
//! Used by the engine to decide whether a member that disappeared from a class
//! is still reachable through one of its supertypes.

use std::collections::BTreeSet;

use super::class::ClassRecord;
use super::declaration::Access;
use super::feature::{FieldRecord, MethodRecord};
use super::snapshot::Snapshot;

/// A member found during a hierarchy search, with the class that declares it
#[derive(Debug, Clone, Copy)]
pub struct Located<'a, T> {
    pub owner: &'a ClassRecord,
    pub feature: &'a T,
}

/// Resolve classes by name and search their effective hierarchy
///
/// Search order is the class itself, then the superclass chain, then
/// interfaces, depth-first in declaration order. Private members of supertypes
/// are not accessible and are skipped. A supertype that cannot be resolved ends
/// the search along that branch.
pub trait HierarchyLookup {
    fn resolve_class(&self, name: &str) -> Option<&ClassRecord>;

    fn locate_field<'s>(
        &'s self,
        class: &'s ClassRecord,
        name: &str,
    ) -> Option<Located<'s, FieldRecord>> {
        locate(
            self,
            class,
            &|c: &'s ClassRecord| c.field(name),
            &|f: &FieldRecord| f.declaration.access != Access::Private,
        )
    }

    fn locate_method<'s>(
        &'s self,
        class: &'s ClassRecord,
        signature: &str,
    ) -> Option<Located<'s, MethodRecord>> {
        locate(
            self,
            class,
            &|c: &'s ClassRecord| c.method(signature),
            &|m: &MethodRecord| m.declaration.access != Access::Private && !m.is_constructor(),
        )
    }
}

impl HierarchyLookup for Snapshot {
    fn resolve_class(&self, name: &str) -> Option<&ClassRecord> {
        self.class(name)
    }
}

type Finder<'f, 's, T> = &'f dyn Fn(&'s ClassRecord) -> Option<&'s T>;
type Filter<'f, T> = &'f dyn Fn(&T) -> bool;

fn locate<'s, L, T>(
    lookup: &'s L,
    class: &'s ClassRecord,
    find: Finder<'_, 's, T>,
    inheritable: Filter<'_, T>,
) -> Option<Located<'s, T>>
where
    L: HierarchyLookup + ?Sized,
{
    if let Some(feature) = find(class) {
        return Some(Located {
            owner: class,
            feature,
        });
    }
    let mut visited = BTreeSet::new();
    visited.insert(class.name.clone());
    class
        .supertypes()
        .find_map(|name| search(lookup, name, &mut visited, find, inheritable))
}

fn search<'s, L, T>(
    lookup: &'s L,
    name: &str,
    visited: &mut BTreeSet<String>,
    find: Finder<'_, 's, T>,
    inheritable: Filter<'_, T>,
) -> Option<Located<'s, T>>
where
    L: HierarchyLookup + ?Sized,
{
    if !visited.insert(name.to_string()) {
        return None;
    }
    let class = lookup.resolve_class(name)?;
    if let Some(feature) = find(class).filter(|f| inheritable(f)) {
        return Some(Located {
            owner: class,
            feature,
        });
    }
    class
        .supertypes()
        .find_map(|super_name| search(lookup, super_name, visited, find, inheritable))
}
