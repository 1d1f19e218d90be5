use serde::{Deserialize, Serialize};

/// Access level of a class or member, ordered from widest to narrowest
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl Access {
    /// Source keyword for this access level (empty for package-private)
    pub fn keyword(&self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Protected => "protected",
            Access::Package => "",
            Access::Private => "private",
        }
    }

    /// True if `self` grants strictly less access than `other`
    pub fn is_narrower_than(self, other: Access) -> bool {
        self > other
    }
}

/// Declaration-level attributes of a class or interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassDeclaration {
    pub access: Access,
    pub is_final: bool,
    pub is_abstract: bool,
    /// Fully-qualified superclass name (None for interfaces and roots)
    pub superclass: Option<String>,
    /// Fully-qualified names of directly implemented/extended interfaces
    pub interfaces: Vec<String>,
}

impl ClassDeclaration {
    /// Render a Java-like declaration line for reports
    ///
    /// ```
    /// use jardiff_core::model::ClassDeclaration;
    ///
    /// let decl = ClassDeclaration {
    ///     superclass: Some("p.Base".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(decl.descriptor("p.A", false), "public class p.A extends p.Base");
    /// ```
    pub fn descriptor(&self, name: &str, is_interface: bool) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.access.keyword().is_empty() {
            parts.push(self.access.keyword().to_string());
        }
        if self.is_abstract && !is_interface {
            parts.push("abstract".to_string());
        }
        if self.is_final {
            parts.push("final".to_string());
        }
        parts.push(if is_interface { "interface" } else { "class" }.to_string());
        parts.push(name.to_string());
        if let Some(superclass) = &self.superclass {
            parts.push(format!("extends {}", superclass));
        }
        if !self.interfaces.is_empty() {
            let keyword = if is_interface { "extends" } else { "implements" };
            parts.push(format!("{} {}", keyword, self.interfaces.join(", ")));
        }
        parts.join(" ")
    }
}

/// Declaration-level attributes of a field, method or constructor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureDeclaration {
    pub access: Access,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    /// Field type or method return type (empty for constructors)
    pub type_name: String,
    /// Declared checked exceptions (methods and constructors only)
    pub throws: Vec<String>,
}

impl FeatureDeclaration {
    /// Render the modifier prefix (`public static final ...`) followed by the type
    pub fn modifiers(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if !self.access.keyword().is_empty() {
            parts.push(self.access.keyword());
        }
        if self.is_abstract {
            parts.push("abstract");
        }
        if self.is_static {
            parts.push("static");
        }
        if self.is_final {
            parts.push("final");
        }
        if !self.type_name.is_empty() {
            parts.push(&self.type_name);
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_ordering() {
        assert!(Access::Private.is_narrower_than(Access::Public));
        assert!(Access::Package.is_narrower_than(Access::Protected));
        assert!(!Access::Public.is_narrower_than(Access::Protected));
        assert!(!Access::Public.is_narrower_than(Access::Public));
    }

    #[test]
    fn test_interface_descriptor_uses_extends() {
        let decl = ClassDeclaration {
            interfaces: vec!["p.I".to_string(), "p.J".to_string()],
            ..Default::default()
        };
        assert_eq!(
            decl.descriptor("p.K", true),
            "public interface p.K extends p.I, p.J"
        );
    }

    #[test]
    fn test_package_private_abstract_descriptor() {
        let decl = ClassDeclaration {
            access: Access::Package,
            is_abstract: true,
            ..Default::default()
        };
        assert_eq!(decl.descriptor("p.A", false), "abstract class p.A");
    }

    #[test]
    fn test_feature_modifiers() {
        let decl = FeatureDeclaration {
            is_static: true,
            is_final: true,
            type_name: "int".to_string(),
            ..Default::default()
        };
        assert_eq!(decl.modifiers(), "public static final int");
    }

    #[test]
    fn test_declaration_defaults_from_empty_json() {
        let decl: FeatureDeclaration = serde_json::from_str("{}").unwrap();
        assert_eq!(decl, FeatureDeclaration::default());
        let access: Access = serde_json::from_str("\"protected\"").unwrap();
        assert_eq!(access, Access::Protected);
    }
}
