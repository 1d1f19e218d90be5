use serde::{Deserialize, Serialize};

use super::declaration::ClassDeclaration;
use super::feature::{FieldRecord, MethodRecord};

/// Structural record of one compiled class or interface
///
/// Produced by an external reader; read-only to the differencing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Fully-qualified name (e.g. `com.acme.Widget`)
    pub name: String,

    #[serde(default)]
    pub interface: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub declaration: ClassDeclaration,

    /// Declared fields, in class-file order
    #[serde(default)]
    pub fields: Vec<FieldRecord>,

    /// Declared methods and constructors, in class-file order
    #[serde(default)]
    pub methods: Vec<MethodRecord>,
}

impl ClassRecord {
    /// Create a new class record with no members
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interface: false,
            deprecated: false,
            declaration: ClassDeclaration::default(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Create a new interface record with no members
    pub fn new_interface(name: impl Into<String>) -> Self {
        Self {
            interface: true,
            declaration: ClassDeclaration {
                is_abstract: true,
                ..ClassDeclaration::default()
            },
            ..Self::new(name)
        }
    }

    pub fn is_interface(&self) -> bool {
        self.interface
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Package part of the name (empty for the default package)
    pub fn package_name(&self) -> &str {
        package_of(&self.name)
    }

    /// Name without its package prefix
    pub fn simple_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(_, simple)| simple)
            .unwrap_or(&self.name)
    }

    /// Find a declared field by simple name
    pub fn field(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Find a declared method or constructor by signature
    pub fn method(&self, signature: &str) -> Option<&MethodRecord> {
        self.methods.iter().find(|m| m.signature == signature)
    }

    /// Direct supertypes: superclass first, then interfaces in declaration order
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.declaration
            .superclass
            .iter()
            .chain(self.declaration.interfaces.iter())
            .map(String::as_str)
    }

    pub fn with_declaration(mut self, declaration: ClassDeclaration) -> Self {
        self.declaration = declaration;
        self
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.declaration.superclass = Some(superclass.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.declaration.interfaces.push(interface.into());
        self
    }

    pub fn with_field(mut self, field: FieldRecord) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodRecord) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }
}

/// Package part of a fully-qualified class name
pub fn package_of(class_name: &str) -> &str {
    class_name
        .rsplit_once('.')
        .map(|(package, _)| package)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let class = ClassRecord::new("com.acme.Widget");
        assert_eq!(class.package_name(), "com.acme");
        assert_eq!(class.simple_name(), "Widget");

        let default_pkg = ClassRecord::new("Main");
        assert_eq!(default_pkg.package_name(), "");
        assert_eq!(default_pkg.simple_name(), "Main");
    }

    #[test]
    fn test_member_lookup() {
        let class = ClassRecord::new("p.A")
            .with_field(FieldRecord::new("x", "p.A.x"))
            .with_method(MethodRecord::new("m()", "p.A.m()"))
            .with_method(MethodRecord::new("m(int)", "p.A.m(int)"));

        assert!(class.field("x").is_some());
        assert!(class.field("y").is_none());
        assert_eq!(
            class.method("m(int)").map(|m| m.full_signature.as_str()),
            Some("p.A.m(int)")
        );
        assert!(class.method("m(long)").is_none());
    }

    #[test]
    fn test_supertypes_order() {
        let class = ClassRecord::new("p.A")
            .with_superclass("p.Base")
            .with_interface("p.I")
            .with_interface("p.J");
        let supers: Vec<&str> = class.supertypes().collect();
        assert_eq!(supers, vec!["p.Base", "p.I", "p.J"]);
    }

    #[test]
    fn test_new_interface_is_abstract() {
        let iface = ClassRecord::new_interface("p.I");
        assert!(iface.is_interface());
        assert!(iface.declaration.is_abstract);
    }
}
