#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Visitor traversal and the two bundled renderers.

mod common;

use common::{constant_field, field, method, snapshot};
use jardiff_core::diff::visitor::{walk_class, DifferencesVisitor};
use jardiff_core::diff::{
    render_human_summary, render_json_report, ClassDifferences, FeatureDifferences,
};
use jardiff_core::model::{ClassRecord, Snapshot};
use jardiff_core::compute_differences;
use jardiff_core::strategy::ApiStrategy;

fn release() -> (Snapshot, Snapshot) {
    let old = snapshot([
        ClassRecord::new("com.acme.Widget")
            .with_field(constant_field("com.acme.Widget", "SIZE", 4))
            .with_field(field("com.acme.Widget", "legacy"))
            .with_method(method("com.acme.Widget", "draw()", b"d1")),
        ClassRecord::new("com.acme.Gadget"),
        ClassRecord::new("org.old.Thing"),
    ]);
    let new = snapshot([
        ClassRecord::new("com.acme.Widget")
            .with_field(constant_field("com.acme.Widget", "SIZE", 8))
            .with_method(method("com.acme.Widget", "draw()", b"d2"))
            .with_method(method("com.acme.Widget", "resize(int)", b"r")),
        ClassRecord::new("com.acme.Gadget").with_deprecated(true),
        ClassRecord::new("org.fresh.Thing"),
    ]);
    (old, new)
}

/// Counts only the classes it is shown and stops descending after one
#[derive(Default)]
struct FirstClassOnly {
    classes: usize,
    features: usize,
}

impl<'a> DifferencesVisitor<'a> for FirstClassOnly {
    fn visit_class(&mut self, class: &ClassDifferences<'a>) {
        self.classes += 1;
        if self.classes == 1 {
            walk_class(self, class);
        }
    }

    fn visit_feature(&mut self, _feature: &FeatureDifferences<'a>) {
        self.features += 1;
    }
}

#[test]
fn test_visitor_overrides_control_descent() {
    let (old, new) = release();
    let tree = compute_differences("acme", "1", &old, "2", &new, ApiStrategy::default()).unwrap();

    let mut visitor = FirstClassOnly::default();
    tree.accept(&mut visitor);

    // com.acme.Gadget comes first and has no features; Widget is skipped
    assert_eq!(visitor.classes, 4);
    assert_eq!(visitor.features, 0);
}

#[test]
fn test_markdown_summary_sections() {
    let (old, new) = release();
    let tree =
        compute_differences("acme", "1.0", &old, "2.0", &new, ApiStrategy::default()).unwrap();
    let summary = render_human_summary(&tree);

    assert!(summary.contains("## API Differences: acme"));
    assert!(summary.contains("### Package `com.acme` (modified)"));
    assert!(summary.contains("### Package `org.fresh` (added)"));
    assert!(summary.contains("### Package `org.old` (removed)"));
    assert!(summary.contains("#### Class `com.acme.Gadget` (deprecation) [deprecated]"));
    assert!(summary.contains("- Modified field `com.acme.Widget.SIZE`: constant value 4 to 8"));
    assert!(summary.contains("- Removed field `com.acme.Widget.legacy`"));
    assert!(summary.contains("- Modified method `com.acme.Widget.draw()`: code changed"));
    assert!(summary.contains("- Added method `com.acme.Widget.resize(int)`"));

    let gadget = summary.find("com.acme.Gadget").unwrap();
    let widget = summary.find("com.acme.Widget").unwrap();
    assert!(gadget < widget);
}

#[test]
fn test_json_report_structure() {
    let (old, new) = release();
    let tree =
        compute_differences("acme", "1.0", &old, "2.0", &new, ApiStrategy::default()).unwrap();
    let report = render_json_report(&tree);

    assert_eq!(report["report_schema_version"], 1);
    assert_eq!(report["old_label"], "1.0");
    assert_eq!(report["new_label"], "2.0");

    let packages = report["packages"].as_array().unwrap();
    let names: Vec<&str> = packages.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["com.acme", "org.fresh", "org.old"]);

    let widget = &packages[0]["classes"][1];
    assert_eq!(widget["name"], "com.acme.Widget");
    assert_eq!(widget["state"], "modified");
    assert_eq!(widget["old_declaration"], "public class com.acme.Widget");

    let size = &widget["features"][0];
    assert_eq!(size["key"], "SIZE");
    assert_eq!(size["old_value"], serde_json::json!({"type": "int", "value": 4}));
    assert_eq!(size["new_value"], serde_json::json!({"type": "int", "value": 8}));

    assert_eq!(report["summary"]["packages"]["added"], 1);
    assert_eq!(report["summary"]["packages"]["removed"], 1);
    assert_eq!(report["summary"]["classes"]["deprecation_changed"], 1);
}
