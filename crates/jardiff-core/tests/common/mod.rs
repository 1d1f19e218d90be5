//! Shared builders for the integration suites

#![allow(dead_code)]

use jardiff_core::model::{
    Access, ClassRecord, CodeBody, ConstantValue, FeatureDeclaration, FieldRecord, MethodRecord,
    Snapshot,
};

/// Field with the conventional `Class.name` full signature
pub fn field(class_name: &str, name: &str) -> FieldRecord {
    FieldRecord::new(name, format!("{}.{}", class_name, name))
}

pub fn constant_field(class_name: &str, name: &str, value: i32) -> FieldRecord {
    field(class_name, name).with_constant_value(ConstantValue::Int(value))
}

/// Method with the conventional `Class.signature` full signature and a body
pub fn method(class_name: &str, signature: &str, body: &[u8]) -> MethodRecord {
    MethodRecord::new(signature, format!("{}.{}", class_name, signature))
        .with_code(CodeBody::new(body.to_vec()))
}

pub fn abstract_method(class_name: &str, signature: &str) -> MethodRecord {
    MethodRecord::new(signature, format!("{}.{}", class_name, signature)).with_declaration(
        FeatureDeclaration {
            is_abstract: true,
            ..Default::default()
        },
    )
}

pub fn constructor(class_name: &str, params: &str) -> MethodRecord {
    MethodRecord::new_constructor(
        format!("<init>({})", params),
        format!("{}({})", class_name, params),
    )
    .with_code(CodeBody::new(vec![0x2a, 0xb7]))
}

pub fn with_access(method: MethodRecord, access: Access) -> MethodRecord {
    let declaration = FeatureDeclaration {
        access,
        ..method.declaration.clone()
    };
    method.with_declaration(declaration)
}

pub fn snapshot(classes: impl IntoIterator<Item = ClassRecord>) -> Snapshot {
    classes
        .into_iter()
        .fold(Snapshot::new(), |snapshot, class| snapshot.with_class(class))
}
