use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use super::declaration::FeatureDeclaration;

/// Compile-time constant attached to a field
///
/// Floating-point values compare by bit pattern so that equality is total
/// (`NaN == NaN`, `0.0 != -0.0`), which is what a constant pool comparison needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ConstantValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl PartialEq for ConstantValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ConstantValue::Int(a), ConstantValue::Int(b)) => a == b,
            (ConstantValue::Long(a), ConstantValue::Long(b)) => a == b,
            (ConstantValue::Float(a), ConstantValue::Float(b)) => a.to_bits() == b.to_bits(),
            (ConstantValue::Double(a), ConstantValue::Double(b)) => a.to_bits() == b.to_bits(),
            (ConstantValue::String(a), ConstantValue::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ConstantValue {}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(v) => write!(f, "{}", v),
            ConstantValue::Long(v) => write!(f, "{}L", v),
            ConstantValue::Float(v) => write!(f, "{}f", v),
            ConstantValue::Double(v) => write!(f, "{}", v),
            ConstantValue::String(v) => write!(f, "{:?}", v),
        }
    }
}

/// Opaque method body token
///
/// The engine only ever asks whether two bodies are identical; it never
/// interprets the bytes. Serialized as a hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeBody(#[serde(with = "hex_bytes")] Vec<u8>);

impl CodeBody {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// SHA-256 of the body, hex encoded
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.0);
        hex::encode(hasher.finalize())
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(&text).map_err(serde::de::Error::custom)
    }
}

/// A field as read from a compiled class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Simple name; the identity key inside its class
    pub name: String,

    /// Fully-qualified name used for display (e.g. `p.A.x`)
    pub full_signature: String,

    #[serde(default)]
    pub declaration: FeatureDeclaration,

    #[serde(default)]
    pub constant_value: Option<ConstantValue>,

    #[serde(default)]
    pub deprecated: bool,
}

impl FieldRecord {
    pub fn new(name: impl Into<String>, full_signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_signature: full_signature.into(),
            declaration: FeatureDeclaration::default(),
            constant_value: None,
            deprecated: false,
        }
    }

    pub fn with_declaration(mut self, declaration: FeatureDeclaration) -> Self {
        self.declaration = declaration;
        self
    }

    pub fn with_constant_value(mut self, value: ConstantValue) -> Self {
        self.constant_value = Some(value);
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }
}

/// A method or constructor as read from a compiled class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    /// Name plus parameter list (e.g. `m(int)`); the identity key inside its class
    pub signature: String,

    /// Fully-qualified signature used for display (e.g. `p.A.m(int)`)
    pub full_signature: String,

    #[serde(default)]
    pub declaration: FeatureDeclaration,

    #[serde(default)]
    pub constructor: bool,

    #[serde(default)]
    pub deprecated: bool,

    /// Absent for abstract and native methods
    #[serde(default)]
    pub code: Option<CodeBody>,
}

impl MethodRecord {
    pub fn new(signature: impl Into<String>, full_signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            full_signature: full_signature.into(),
            declaration: FeatureDeclaration::default(),
            constructor: false,
            deprecated: false,
            code: None,
        }
    }

    /// Create a constructor record
    pub fn new_constructor(
        signature: impl Into<String>,
        full_signature: impl Into<String>,
    ) -> Self {
        Self {
            constructor: true,
            ..Self::new(signature, full_signature)
        }
    }

    pub fn with_declaration(mut self, declaration: FeatureDeclaration) -> Self {
        self.declaration = declaration;
        self
    }

    pub fn with_code(mut self, code: CodeBody) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.constructor
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_value_float_equality_is_bitwise() {
        assert_eq!(
            ConstantValue::Double(f64::NAN),
            ConstantValue::Double(f64::NAN)
        );
        assert_ne!(ConstantValue::Float(0.0), ConstantValue::Float(-0.0));
        assert_ne!(ConstantValue::Int(1), ConstantValue::Long(1));
    }

    #[test]
    fn test_constant_value_json_shape() {
        let json = serde_json::to_value(ConstantValue::Int(7)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "int", "value": 7}));
    }

    #[test]
    fn test_code_body_hex_serialization() {
        let body = CodeBody::new(vec![0xca, 0xfe]);
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, "\"cafe\"");
        let back: CodeBody = serde_json::from_str(&json).unwrap();
        assert_eq!(back, body);
    }

    #[test]
    fn test_code_body_rejects_bad_hex() {
        assert!(serde_json::from_str::<CodeBody>("\"zz\"").is_err());
    }

    #[test]
    fn test_code_body_digest_is_stable() {
        let a = CodeBody::new(b"return 1".to_vec());
        let b = CodeBody::new(b"return 1".to_vec());
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 64);
        assert_ne!(a.digest(), CodeBody::new(b"return 2".to_vec()).digest());
    }

    #[test]
    fn test_method_record_defaults_from_json() {
        let method: MethodRecord =
            serde_json::from_str(r#"{"signature": "m()", "full_signature": "p.A.m()"}"#).unwrap();
        assert!(!method.is_constructor());
        assert!(!method.is_deprecated());
        assert!(method.code.is_none());
    }
}
