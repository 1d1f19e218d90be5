use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::class::{package_of, ClassRecord};
use crate::errors::{JarDiffError, Result};

/// Shared empty package used for the side of a comparison where a package is absent
pub static EMPTY_PACKAGE: Package = Package::new();

/// The classes of one package, keyed by fully-qualified class name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Package {
    classes: BTreeMap<String, ClassRecord>,
}

impl Package {
    pub const fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassRecord> {
        self.classes.get(class_name)
    }

    /// Insert a class under its own name, replacing any previous record
    pub fn insert(&mut self, class: ClassRecord) -> Option<ClassRecord> {
        self.classes.insert(class.name.clone(), class)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassRecord> {
        self.classes.values()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &ClassRecord)> {
        self.classes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// One version of a component: package name to package contents
///
/// The serde representation of this type is the JSON snapshot format
/// accepted by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    packages: BTreeMap<String, Package>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a class into the package its name implies
    pub fn insert_class(&mut self, class: ClassRecord) -> Option<ClassRecord> {
        let package = package_of(&class.name).to_string();
        self.packages.entry(package).or_default().insert(class)
    }

    /// Builder form of [`Snapshot::insert_class`]
    pub fn with_class(mut self, class: ClassRecord) -> Self {
        self.insert_class(class);
        self
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Resolve a class by fully-qualified name
    pub fn class(&self, name: &str) -> Option<&ClassRecord> {
        self.packages.get(package_of(name))?.get(name)
    }

    pub fn class_count(&self) -> usize {
        self.packages.values().map(Package::len).sum()
    }

    /// Parse a snapshot from its JSON representation
    ///
    /// # Errors
    ///
    /// - `Serialization`: the text is not a valid snapshot document
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON snapshot file
    ///
    /// # Errors
    ///
    /// - `Io`: the file cannot be read
    /// - `Serialization`: the file is not a valid snapshot document
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| JarDiffError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Check the input contract the differencing engine relies on
    ///
    /// # Errors
    ///
    /// - `UnnamedClass`: a class record has an empty name
    /// - `ClassKeyMismatch`: a class is stored under a key other than its name
    /// - `MisplacedClass`: a class is stored in a package its name does not imply
    /// - `DuplicateField` / `DuplicateMethod`: a class declares the same
    ///   field name or method signature twice
    pub fn validate(&self) -> Result<()> {
        for (package_name, package) in &self.packages {
            for (key, class) in package.entries() {
                if class.name.is_empty() {
                    return Err(JarDiffError::UnnamedClass {
                        package: package_name.clone(),
                    });
                }
                if key != class.name {
                    return Err(JarDiffError::ClassKeyMismatch {
                        key: key.to_string(),
                        name: class.name.clone(),
                    });
                }
                if class.package_name() != package_name {
                    return Err(JarDiffError::MisplacedClass {
                        class_name: class.name.clone(),
                        package: package_name.clone(),
                    });
                }
                validate_members(class)?;
            }
        }
        Ok(())
    }
}

fn validate_members(class: &ClassRecord) -> Result<()> {
    let mut field_names = BTreeSet::new();
    for field in &class.fields {
        if !field_names.insert(field.name.as_str()) {
            return Err(JarDiffError::DuplicateField {
                class_name: class.name.clone(),
                field: field.name.clone(),
            });
        }
    }
    let mut signatures = BTreeSet::new();
    for method in &class.methods {
        if !signatures.insert(method.signature.as_str()) {
            return Err(JarDiffError::DuplicateMethod {
                class_name: class.name.clone(),
                signature: method.signature.clone(),
            });
        }
    }
    Ok(())
}
