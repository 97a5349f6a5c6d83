//! Position-addressed queries over loose-JSON workspace configuration.
//!
//! The workspace file is parsed loosely so that byte ranges survive for the
//! offset-addressed edit layer; a plain parse-to-value would discard them.
//! Every function here is read-only: absence is a normal outcome returned as
//! `None` or an empty sequence, never an error, and no nodes are ever
//! constructed or mutated.

use crate::text::{node_text, unquote};

/// A matched build target together with its enclosing project object.
#[derive(Debug, Clone, Copy)]
pub struct TargetMatch<'t> {
    /// The target object node (e.g. the value of `architect.build`).
    pub target: tree_sitter::Node<'t>,
    /// The project object node that owns the target.
    pub project: tree_sitter::Node<'t>,
}

/// Returns the unquoted value of a JSON string node.
///
/// `None` when the node is not a string.
#[must_use]
pub fn string_value<'s>(node: tree_sitter::Node<'_>, source: &'s str) -> Option<&'s str> {
    if node.kind() != "string" {
        return None;
    }
    node_text(node, source).map(unquote)
}

/// Resolves the top-level object of a parsed JSON document.
///
/// Accepts either the document root or an object node directly; `None` when
/// the document has no object at its top level.
#[must_use]
pub fn document_object(root: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if root.kind() == "object" {
        return Some(root);
    }
    let mut cursor = root.walk();
    let object = root
        .named_children(&mut cursor)
        .find(|node| node.kind() == "object");
    object
}

/// Finds the value node of the first property named `key` in an object.
///
/// Scans the object's pairs in source order. Malformed input (a non-object
/// node, pairs missing a key or value) yields `None` rather than an error.
#[must_use]
pub fn find_property<'t>(
    object: tree_sitter::Node<'t>,
    source: &str,
    key: &str,
) -> Option<tree_sitter::Node<'t>> {
    if object.kind() != "object" {
        return None;
    }
    let mut cursor = object.walk();
    for pair in object.named_children(&mut cursor) {
        if pair.kind() != "pair" {
            continue;
        }
        let Some(key_node) = pair.child_by_field_name("key") else {
            continue;
        };
        let Some(key_text) = node_text(key_node, source) else {
            continue;
        };
        if unquote(key_text) == key {
            return pair.child_by_field_name("value");
        }
    }
    None
}

/// Finds every `(target, project)` pair whose builder matches.
///
/// Iterates the `projects` object in source order. A project is silently
/// skipped when it lacks a string `root` property or an object
/// `architect`/`targets` property, when the named target is missing or not
/// an object, or when the target's `builder` string differs from
/// `builder_name`.
#[must_use]
pub fn find_targets<'t>(
    workspace: tree_sitter::Node<'t>,
    source: &str,
    target_name: &str,
    builder_name: &str,
) -> Vec<TargetMatch<'t>> {
    let mut matches = Vec::new();
    let Some(root_object) = document_object(workspace) else {
        return matches;
    };
    let Some(projects) = find_property(root_object, source, "projects") else {
        return matches;
    };
    if projects.kind() != "object" {
        return matches;
    }

    let mut cursor = projects.walk();
    for pair in projects.named_children(&mut cursor) {
        if pair.kind() != "pair" {
            continue;
        }
        let Some(project) = pair.child_by_field_name("value") else {
            continue;
        };
        if project.kind() != "object" {
            continue;
        }
        let Some(project_root) = find_property(project, source, "root") else {
            continue;
        };
        if project_root.kind() != "string" {
            continue;
        }
        let Some(targets) = find_property(project, source, "architect")
            .or_else(|| find_property(project, source, "targets"))
        else {
            continue;
        };
        let Some(target) = find_property(targets, source, target_name) else {
            continue;
        };
        if target.kind() != "object" {
            continue;
        }
        let Some(builder) = find_property(target, source, "builder") else {
            continue;
        };
        if string_value(builder, source) == Some(builder_name) {
            matches.push(TargetMatch { target, project });
        }
    }
    matches
}

/// Collects the option objects of a target.
///
/// Always includes each object value inside `configurations` (in source
/// order); additionally includes the top-level `options` object unless
/// `configurations_only` is set. Non-object entries are filtered out.
#[must_use]
pub fn collect_option_sets<'t>(
    target: tree_sitter::Node<'t>,
    source: &str,
    configurations_only: bool,
) -> Vec<tree_sitter::Node<'t>> {
    let mut sets = Vec::new();

    if let Some(configurations) = find_property(target, source, "configurations") {
        if configurations.kind() == "object" {
            let mut cursor = configurations.walk();
            for pair in configurations.named_children(&mut cursor) {
                if pair.kind() != "pair" {
                    continue;
                }
                if let Some(value) = pair.child_by_field_name("value") {
                    if value.kind() == "object" {
                        sets.push(value);
                    }
                }
            }
        }
    }

    if !configurations_only {
        if let Some(options) = find_property(target, source, "options") {
            if options.kind() == "object" {
                sets.push(options);
            }
        }
    }

    sets
}

#[cfg(test)]
mod tests {
    use crate::language::SourceLanguage;
    use crate::parser::{ParseResult, Parser};

    use super::{collect_option_sets, find_property, find_targets, string_value};

    fn parse(source: &str) -> ParseResult {
        let mut parser = Parser::new(SourceLanguage::Json).expect("parser");
        parser.parse(source).expect("parse")
    }

    const WORKSPACE: &str = r#"{
  "version": 1,
  "projects": {
    "app": {
      "root": "",
      "architect": {
        "build": {
          "builder": "builder-x",
          "options": {"outputPath": "dist"},
          "configurations": {
            "production": {"optimization": true},
            "staging": {"optimization": false}
          }
        }
      }
    },
    "lib": {
      "root": "projects/lib",
      "architect": {
        "build": {
          "builder": "builder-y",
          "options": {}
        }
      }
    },
    "bare": {
      "root": ""
    }
  }
}"#;

    #[test]
    fn find_property_returns_value_node() {
        let parsed = parse(r#"{"a": 1, "b": "two"}"#);
        let object = super::document_object(parsed.root_node()).expect("object");
        let value = find_property(object, parsed.source(), "b").expect("property");
        assert_eq!(string_value(value, parsed.source()), Some("two"));
    }

    #[test]
    fn find_property_absence_is_none_not_an_error() {
        let parsed = parse(r#"{"a": 1}"#);
        let object = super::document_object(parsed.root_node()).expect("object");
        assert!(find_property(object, parsed.source(), "missing").is_none());
    }

    #[test]
    fn find_property_on_non_object_is_none() {
        let parsed = parse(r#"[1, 2]"#);
        let root = parsed.root_node();
        let array = root.named_child(0).expect("array");
        assert!(find_property(array, parsed.source(), "a").is_none());
    }

    #[test]
    fn find_targets_filters_by_builder_exactly() {
        let parsed = parse(WORKSPACE);
        let matches = find_targets(parsed.root_node(), parsed.source(), "build", "builder-x");
        assert_eq!(matches.len(), 1);
        let found = matches.first().expect("match");
        let builder = find_property(found.target, parsed.source(), "builder").expect("builder");
        assert_eq!(string_value(builder, parsed.source()), Some("builder-x"));
        // The project node is the enclosing object, which owns "root".
        assert!(find_property(found.project, parsed.source(), "root").is_some());
    }

    #[test]
    fn find_targets_skips_projects_without_architect() {
        let parsed = parse(WORKSPACE);
        // "bare" has a root but no architect; it is skipped, not an error.
        let matches = find_targets(parsed.root_node(), parsed.source(), "build", "builder-y");
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn find_targets_on_workspace_without_projects_is_empty() {
        let parsed = parse(r#"{"version": 1}"#);
        let matches = find_targets(parsed.root_node(), parsed.source(), "build", "builder-x");
        assert!(matches.is_empty());
    }

    #[test]
    fn find_targets_accepts_targets_spelling() {
        let parsed = parse(
            r#"{"projects": {"app": {"root": "", "targets": {"test": {"builder": "karma"}}}}}"#,
        );
        let matches = find_targets(parsed.root_node(), parsed.source(), "test", "karma");
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn collect_option_sets_orders_configurations_before_options() {
        let parsed = parse(WORKSPACE);
        let matches = find_targets(parsed.root_node(), parsed.source(), "build", "builder-x");
        let target = matches.first().expect("match").target;

        let sets = collect_option_sets(target, parsed.source(), false);
        assert_eq!(sets.len(), 3);

        let configurations_only = collect_option_sets(target, parsed.source(), true);
        assert_eq!(configurations_only.len(), 2);
    }

    #[test]
    fn collect_option_sets_filters_non_objects() {
        let parsed = parse(r#"{"builder": "x", "options": "not-an-object"}"#);
        let target = super::document_object(parsed.root_node()).expect("object");
        assert!(collect_option_sets(target, parsed.source(), false).is_empty());
    }
}
