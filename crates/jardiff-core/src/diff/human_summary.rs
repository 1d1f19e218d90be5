//! Human-readable Markdown summary of a differences tree.

use crate::diff::model::{
    ClassDifferences, DeprecationChange, FeatureDifferences, FeatureKind,
    PackageDifferences, ProjectDifferences,
};
use crate::diff::visitor::{state_label, walk_class, walk_package, ChangeCounts, DifferencesVisitor};

/// Render a Markdown summary of a [`ProjectDifferences`].
///
/// The summary is intended for release review. It is informational only and
/// is derived entirely from the tree.
pub fn render_human_summary(project: &ProjectDifferences<'_>) -> String {
    let mut writer = SummaryWriter::default();

    writer.out.push_str(&format!("## API Differences: {}\n\n", project.name));
    writer.out.push_str(&format!(
        "**Old**: `{}`  \n**New**: `{}`\n\n",
        project.old_label, project.new_label
    ));

    if project.is_empty() {
        writer.out.push_str("_No differences detected._\n");
        return writer.out;
    }

    let counts = ChangeCounts::of(project);
    writer.out.push_str(
        "| | Added | Removed | Modified | Deprecation |\n\
         |---|---|---|---|---|\n",
    );
    for (label, level) in [
        ("Packages", counts.packages),
        ("Classes", counts.classes),
        ("Features", counts.features),
    ] {
        writer.out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            label, level.added, level.removed, level.modified, level.deprecation_changed
        ));
    }
    writer.out.push('\n');

    project.accept(&mut writer);
    writer.out
}

#[derive(Default)]
struct SummaryWriter {
    out: String,
}

impl<'a> DifferencesVisitor<'a> for SummaryWriter {
    fn visit_package(&mut self, package: &PackageDifferences<'a>) {
        self.out.push_str(&format!(
            "### Package `{}` ({})\n\n",
            display_package(&package.name),
            state_label(package)
        ));
        walk_package(self, package);
    }

    fn visit_class(&mut self, class: &ClassDifferences<'a>) {
        self.out.push_str(&format!(
            "#### {} `{}` ({}){}\n\n",
            capitalize(class.kind.label()),
            class.name,
            state_label(class),
            deprecation_marker(class.deprecation)
        ));

        if class.kind_changed() {
            if let (Some(old), Some(new)) = (class.old, class.new) {
                self.out.push_str(&format!(
                    "- Kind changed: {} to {}\n",
                    kind_word(old.is_interface()),
                    kind_word(new.is_interface())
                ));
            }
        }
        if class.declaration_modified {
            if let (Some(old), Some(new)) = (class.old, class.new) {
                self.out.push_str(&format!(
                    "- Declaration: `{}` to `{}`\n",
                    old.declaration.descriptor(&old.name, old.is_interface()),
                    new.declaration.descriptor(&new.name, new.is_interface())
                ));
            }
        }

        walk_class(self, class);
        if class.declaration_modified || !class.features.is_empty() {
            self.out.push('\n');
        }
    }

    fn visit_feature(&mut self, feature: &FeatureDifferences<'a>) {
        let mut details: Vec<String> = Vec::new();
        if feature.is_inherited() {
            details.push("still inherited".to_string());
        }
        if feature.declaration_modified {
            details.push("declaration changed".to_string());
        }
        if let FeatureKind::Field {
            old: Some(old),
            new: Some(new),
            constant_value_changed: true,
        } = feature.kind
        {
            details.push(format!(
                "constant value {} to {}",
                constant_text(old.constant_value.as_ref()),
                constant_text(new.constant_value.as_ref())
            ));
        }
        if feature.code_changed() {
            details.push("code changed".to_string());
        }

        let suffix = if details.is_empty() {
            String::new()
        } else {
            format!(": {}", details.join(", "))
        };
        self.out.push_str(&format!(
            "- {} {} `{}`{}{}\n",
            capitalize(state_label(feature)),
            feature.kind.label(),
            feature.name,
            suffix,
            deprecation_marker(feature.deprecation)
        ));
    }
}

fn display_package(name: &str) -> &str {
    if name.is_empty() {
        "(default)"
    } else {
        name
    }
}

fn kind_word(interface: bool) -> &'static str {
    if interface {
        "interface"
    } else {
        "class"
    }
}

fn deprecation_marker(change: Option<DeprecationChange>) -> &'static str {
    match change {
        Some(DeprecationChange::Deprecated) => " [deprecated]",
        Some(DeprecationChange::Undeprecated) => " [no longer deprecated]",
        None => "",
    }
}

fn constant_text(value: Option<&crate::model::ConstantValue>) -> String {
    value.map_or_else(|| "(none)".to_string(), ToString::to_string)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compute_differences;
    use crate::model::{ClassRecord, ConstantValue, FieldRecord, MethodRecord, Snapshot};
    use crate::strategy::ApiStrategy;

    #[test]
    fn test_empty_tree_summary() {
        let snapshot = Snapshot::new().with_class(ClassRecord::new("p.A"));
        let tree =
            compute_differences("demo", "1.0", &snapshot, "1.1", &snapshot, ApiStrategy::default())
                .unwrap();
        let summary = render_human_summary(&tree);
        assert!(summary.starts_with("## API Differences: demo\n"));
        assert!(summary.contains("**Old**: `1.0`"));
        assert!(summary.contains("_No differences detected._"));
    }

    #[test]
    fn test_summary_lists_feature_details() {
        let old = Snapshot::new().with_class(
            ClassRecord::new("p.A")
                .with_field(FieldRecord::new("x", "p.A.x").with_constant_value(ConstantValue::Int(1)))
                .with_method(MethodRecord::new("m()", "p.A.m()")),
        );
        let new = Snapshot::new().with_class(
            ClassRecord::new("p.A")
                .with_field(FieldRecord::new("x", "p.A.x").with_constant_value(ConstantValue::Int(2)))
                .with_method(MethodRecord::new("m()", "p.A.m()").with_deprecated(true)),
        );
        let tree =
            compute_differences("demo", "1.0", &old, "2.0", &new, ApiStrategy::default()).unwrap();
        let summary = render_human_summary(&tree);

        assert!(summary.contains("### Package `p` (modified)"));
        assert!(summary.contains("#### Class `p.A` (modified)"));
        assert!(summary.contains("- Modified field `p.A.x`: constant value 1 to 2"));
        assert!(summary.contains("- Deprecation method `p.A.m()` [deprecated]"));
        assert!(summary.contains("| Features | 0 | 0 | 1 | 1 |"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("removed"), "Removed");
        assert_eq!(capitalize(""), "");
    }
}
