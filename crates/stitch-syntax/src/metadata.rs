//! Decorator metadata list insertion-point computation.
//!
//! Locates a decorator-style call (`@Name({...})`), finds an array-valued
//! property inside its single object-literal argument, and computes the text
//! needed to append an element — or to add the property when absent. Failure
//! to locate the decorator or its argument is a recoverable condition
//! signalled by an empty result, not an error.

use crate::insertion::Insertion;
use crate::parser::ParseResult;
use crate::text::{line_indent, node_text, unquote};

/// Fallback indentation when a list has no existing element to copy from.
const DEFAULT_ELEMENT_INDENT: &str = "    ";

/// Computes the edits that append `element` to the array-valued `property`
/// of the object literal passed to the `@decorator_name(...)` call.
///
/// When the property exists and has elements, the element is appended after
/// the last one, copying that element's line indentation. When the property
/// is absent, a `property: [element]` pair is inserted into the object with
/// a leading comma if needed. Returns an empty sequence when the decorator
/// call or its object argument cannot be located, when the property exists
/// but is not an array, or when the list already contains the element, so
/// repeated application is a no-op.
#[must_use]
pub fn metadata_list_append(
    parsed: &ParseResult,
    decorator_name: &str,
    property: &str,
    element: &str,
) -> Vec<Insertion> {
    let source = parsed.source();
    let Some(object) = decorator_argument(parsed.root_node(), source, decorator_name) else {
        return Vec::new();
    };

    match object_property(object, source, property) {
        Some(value) if value.kind() == "array" => {
            if array_contains(value, source, element) {
                Vec::new()
            } else {
                append_to_array(value, source, element)
            }
        }
        Some(_) => Vec::new(),
        None => add_property(object, source, property, element),
    }
}

/// Checks whether any array element's source text equals `element`.
fn array_contains(array: tree_sitter::Node<'_>, source: &str, element: &str) -> bool {
    let mut cursor = array.walk();
    array
        .named_children(&mut cursor)
        .any(|node| node_text(node, source) == Some(element))
}

/// Appends after the last array element, or fills an empty array.
fn append_to_array(
    array: tree_sitter::Node<'_>,
    source: &str,
    element: &str,
) -> Vec<Insertion> {
    let mut cursor = array.walk();
    let last = array
        .named_children(&mut cursor)
        .filter(|node| node.kind() != "comment")
        .last();
    match last {
        Some(last_element) => {
            let indent = line_indent(source, last_element.start_byte());
            let indent = if indent.is_empty() {
                DEFAULT_ELEMENT_INDENT
            } else {
                indent
            };
            vec![Insertion::new(
                last_element.end_byte(),
                format!(",\n{indent}{element}"),
            )]
        }
        None => vec![Insertion::new(
            array.end_byte().saturating_sub(1),
            element.to_owned(),
        )],
    }
}

/// Inserts a new `property: [element]` pair into the object literal.
fn add_property(
    object: tree_sitter::Node<'_>,
    source: &str,
    property: &str,
    element: &str,
) -> Vec<Insertion> {
    let mut cursor = object.walk();
    let last_pair = object
        .named_children(&mut cursor)
        .filter(|node| node.kind() == "pair")
        .last();
    match last_pair {
        Some(pair) => {
            let indent = line_indent(source, pair.start_byte());
            vec![Insertion::new(
                pair.end_byte(),
                format!(",\n{indent}{property}: [{element}]"),
            )]
        }
        None => vec![Insertion::new(
            object.start_byte().saturating_add(1),
            format!(" {property}: [{element}] "),
        )],
    }
}

/// Finds the object-literal argument of the first `@decorator_name(...)`
/// call in the tree.
fn decorator_argument<'t>(
    node: tree_sitter::Node<'t>,
    source: &str,
    decorator_name: &str,
) -> Option<tree_sitter::Node<'t>> {
    if node.kind() == "decorator" {
        if let Some(object) = decorator_call_object(node, source, decorator_name) {
            return Some(object);
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = decorator_argument(child, source, decorator_name) {
            return Some(found);
        }
    }
    None
}

fn decorator_call_object<'t>(
    decorator: tree_sitter::Node<'t>,
    source: &str,
    decorator_name: &str,
) -> Option<tree_sitter::Node<'t>> {
    let mut cursor = decorator.walk();
    let call = decorator
        .named_children(&mut cursor)
        .find(|node| node.kind() == "call_expression")?;
    let function = call.child_by_field_name("function")?;
    if node_text(function, source) != Some(decorator_name) {
        return None;
    }
    let arguments = call.child_by_field_name("arguments")?;
    let mut args_cursor = arguments.walk();
    let object = arguments
        .named_children(&mut args_cursor)
        .find(|node| node.kind() == "object");
    object
}

/// Finds the value of a named property in a TypeScript object literal.
fn object_property<'t>(
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

#[cfg(test)]
mod tests {
    use crate::insertion::Insertion;
    use crate::language::SourceLanguage;
    use crate::parser::{ParseResult, Parser};

    use super::metadata_list_append;

    fn parse(source: &str) -> ParseResult {
        let mut parser = Parser::new(SourceLanguage::TypeScript).expect("parser");
        parser.parse(source).expect("parse")
    }

    fn apply_all(source: &str, insertions: &[Insertion]) -> String {
        let mut sorted: Vec<&Insertion> = insertions.iter().collect();
        sorted.sort_by_key(|insertion| insertion.offset);
        let mut output = String::new();
        let mut cursor = 0usize;
        for insertion in sorted {
            output.push_str(source.get(cursor..insertion.offset).expect("gap"));
            output.push_str(&insertion.text);
            cursor = insertion.offset;
        }
        output.push_str(source.get(cursor..).expect("tail"));
        output
    }

    const APP_MODULE: &str = "\
import { NgModule } from '@angular/core';
import { BrowserModule } from '@angular/platform-browser';

@NgModule({
  declarations: [
    AppComponent
  ],
  imports: [
    BrowserModule
  ],
  bootstrap: [AppComponent]
})
export class AppModule {}
";

    #[test]
    fn appends_after_the_last_list_element_with_matching_indent() {
        let parsed = parse(APP_MODULE);
        let insertions = metadata_list_append(&parsed, "NgModule", "imports", "NewModule");
        assert_eq!(insertions.len(), 1);
        let updated = apply_all(parsed.source(), &insertions);
        assert!(updated.contains("    BrowserModule,\n    NewModule\n  ],"));
    }

    #[test]
    fn appends_to_a_single_line_list() {
        let parsed = parse(APP_MODULE);
        let insertions = metadata_list_append(&parsed, "NgModule", "bootstrap", "OtherComponent");
        let updated = apply_all(parsed.source(), &insertions);
        assert!(updated.contains("bootstrap: [AppComponent,"));
        assert!(updated.contains("OtherComponent]"));
    }

    #[test]
    fn fills_an_empty_list() {
        let parsed = parse("@NgModule({ imports: [] })\nexport class M {}\n");
        let insertions = metadata_list_append(&parsed, "NgModule", "imports", "X");
        let updated = apply_all(parsed.source(), &insertions);
        assert!(updated.contains("imports: [X]"));
    }

    #[test]
    fn adds_a_missing_property_after_the_last_pair() {
        let parsed = parse("@NgModule({\n  declarations: []\n})\nexport class M {}\n");
        let insertions = metadata_list_append(&parsed, "NgModule", "imports", "X");
        let updated = apply_all(parsed.source(), &insertions);
        assert!(updated.contains("declarations: [],\n  imports: [X]"));
    }

    #[test]
    fn adds_a_property_to_an_empty_object() {
        let parsed = parse("@NgModule({})\nexport class M {}\n");
        let insertions = metadata_list_append(&parsed, "NgModule", "imports", "X");
        let updated = apply_all(parsed.source(), &insertions);
        assert!(updated.contains("@NgModule({ imports: [X] })"));
    }

    #[test]
    fn missing_decorator_yields_no_edits() {
        let parsed = parse("export class Plain {}\n");
        let insertions = metadata_list_append(&parsed, "NgModule", "imports", "X");
        assert!(insertions.is_empty());
    }

    #[test]
    fn wrong_decorator_name_yields_no_edits() {
        let parsed = parse("@Component({ imports: [] })\nexport class C {}\n");
        let insertions = metadata_list_append(&parsed, "NgModule", "imports", "X");
        assert!(insertions.is_empty());
    }

    #[test]
    fn an_already_listed_element_yields_no_edits() {
        let parsed = parse(APP_MODULE);
        let insertions = metadata_list_append(&parsed, "NgModule", "imports", "BrowserModule");
        assert!(insertions.is_empty());
    }

    #[test]
    fn non_array_property_yields_no_edits() {
        let parsed = parse("@NgModule({ imports: true })\nexport class M {}\n");
        let insertions = metadata_list_append(&parsed, "NgModule", "imports", "X");
        assert!(insertions.is_empty());
    }

    #[test]
    fn quoted_property_keys_match() {
        let parsed = parse("@NgModule({ 'imports': [A] })\nexport class M {}\n");
        let insertions = metadata_list_append(&parsed, "NgModule", "imports", "X");
        assert_eq!(insertions.len(), 1);
    }

    #[test]
    fn result_stays_parsable_after_application() {
        let parsed = parse(APP_MODULE);
        let insertions = metadata_list_append(&parsed, "NgModule", "imports", "NewModule");
        let updated = apply_all(parsed.source(), &insertions);
        let reparsed = parse(&updated);
        assert!(!reparsed.has_errors());
    }
}
