//! Structured JSON report of a differences tree.
//!
//! Object keys are emitted by `serde_json::Map`, which keeps them sorted, and
//! arrays follow tree order, so the same tree always serializes to the same
//! bytes.

use serde_json::{json, Map, Value};

use crate::diff::model::{
    ClassDifferences, Differences, FeatureDifferences, FeatureKind, PackageDifferences,
    ProjectDifferences,
};
use crate::diff::visitor::{state_label, walk_class, walk_package, ChangeCounts, DifferencesVisitor};

/// Version of the report layout
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Render a [`ProjectDifferences`] as a JSON value
pub fn render_json_report(project: &ProjectDifferences<'_>) -> Value {
    let mut builder = ReportBuilder::default();
    project.accept(&mut builder);

    json!({
        "report_schema_version": REPORT_SCHEMA_VERSION,
        "project": project.name,
        "old_label": project.old_label,
        "new_label": project.new_label,
        "modified": project.is_modified(),
        "summary": ChangeCounts::of(project),
        "packages": builder.packages,
    })
}

#[derive(Default)]
struct ReportBuilder {
    packages: Vec<Value>,
    classes: Vec<Value>,
    features: Vec<Value>,
}

impl<'a> DifferencesVisitor<'a> for ReportBuilder {
    fn visit_package(&mut self, package: &PackageDifferences<'a>) {
        walk_package(self, package);
        self.packages.push(json!({
            "name": package.name,
            "state": state_label(package),
            "classes": std::mem::take(&mut self.classes),
        }));
    }

    fn visit_class(&mut self, class: &ClassDifferences<'a>) {
        walk_class(self, class);

        let mut entry = Map::new();
        entry.insert("name".into(), json!(class.name));
        entry.insert("kind".into(), json!(class.kind));
        entry.insert("state".into(), json!(state_label(class)));
        entry.insert("declaration_modified".into(), json!(class.declaration_modified));
        entry.insert("kind_changed".into(), json!(class.kind_changed()));
        entry.insert("deprecation".into(), json!(class.deprecation));
        if let Some(old) = class.old {
            entry.insert(
                "old_declaration".into(),
                json!(old.declaration.descriptor(&old.name, old.is_interface())),
            );
        }
        if let Some(new) = class.new {
            entry.insert(
                "new_declaration".into(),
                json!(new.declaration.descriptor(&new.name, new.is_interface())),
            );
        }
        entry.insert("features".into(), Value::Array(std::mem::take(&mut self.features)));
        self.classes.push(Value::Object(entry));
    }

    fn visit_feature(&mut self, feature: &FeatureDifferences<'a>) {
        let mut entry = Map::new();
        entry.insert("name".into(), json!(feature.name));
        entry.insert("key".into(), json!(feature.key));
        entry.insert("kind".into(), json!(feature.kind.label()));
        entry.insert("state".into(), json!(state_label(feature)));
        entry.insert("declaration_modified".into(), json!(feature.declaration_modified));
        entry.insert("inherited".into(), json!(feature.inherited));
        entry.insert("deprecation".into(), json!(feature.deprecation));

        match feature.kind {
            FeatureKind::Field {
                old,
                new,
                constant_value_changed,
            } => {
                entry.insert("constant_value_changed".into(), json!(constant_value_changed));
                if constant_value_changed {
                    entry.insert(
                        "old_value".into(),
                        json!(old.and_then(|f| f.constant_value.as_ref())),
                    );
                    entry.insert(
                        "new_value".into(),
                        json!(new.and_then(|f| f.constant_value.as_ref())),
                    );
                }
            }
            FeatureKind::Method {
                old,
                new,
                code_changed,
            }
            | FeatureKind::Constructor {
                old,
                new,
                code_changed,
            } => {
                entry.insert("code_changed".into(), json!(code_changed));
                if code_changed {
                    let digest = |m: &crate::model::MethodRecord| m.code.as_ref().map(|c| c.digest());
                    entry.insert("old_code_digest".into(), json!(old.and_then(digest)));
                    entry.insert("new_code_digest".into(), json!(new.and_then(digest)));
                }
            }
        }

        self.features.push(Value::Object(entry));
    }
}
