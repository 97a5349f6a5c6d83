//! Import-statement inspection and insertion-point computation.
//!
//! Works over the top-level import declarations of a parsed TypeScript file.
//! A symbol counts as imported only from exactly the requested module
//! specifier; the same name imported from a different module never matches.

use crate::insertion::Insertion;
use crate::parser::ParseResult;
use crate::text::{node_text, unquote};

/// Returns whether `symbol` is bound by an import from `module`.
///
/// Matches named imports (the local binding, so aliases count), a default
/// binding, or a namespace binding of that name.
#[must_use]
pub fn is_imported(parsed: &ParseResult, symbol: &str, module: &str) -> bool {
    import_statements(parsed.root_node())
        .into_iter()
        .filter(|import| module_specifier(*import, parsed.source()) == Some(module))
        .any(|import| binds_symbol(import, parsed.source(), symbol))
}

/// Computes the edit that makes `symbol` imported from `module`.
///
/// Returns `None` when the symbol is already imported (idempotent). When an
/// import from `module` exists, the symbol is appended to its bindings;
/// otherwise a fresh import statement is placed after the last top-level
/// import, or at the start of the file when there are none.
#[must_use]
pub fn import_insertion(parsed: &ParseResult, module: &str, symbol: &str) -> Option<Insertion> {
    if is_imported(parsed, symbol, module) {
        return None;
    }

    let source = parsed.source();
    let imports = import_statements(parsed.root_node());
    let existing = imports
        .iter()
        .copied()
        .find(|import| module_specifier(*import, source) == Some(module));

    if let Some(import) = existing {
        if let Some(named) = named_imports(import) {
            return Some(append_to_named_imports(named, symbol));
        }
        if let Some(default) = default_binding(import) {
            // `import D from 'm'` becomes `import D, { symbol } from 'm'`.
            return Some(Insertion::new(
                default.end_byte(),
                format!(", {{ {symbol} }}"),
            ));
        }
        // Side-effect import only: fall through to a fresh statement.
    }

    match imports.last() {
        Some(last) => Some(Insertion::new(
            last.end_byte(),
            format!("\nimport {{ {symbol} }} from '{module}';"),
        )),
        None => Some(Insertion::new(
            0,
            format!("import {{ {symbol} }} from '{module}';\n"),
        )),
    }
}

/// Appends `symbol` inside an existing named-bindings list.
fn append_to_named_imports(named: tree_sitter::Node<'_>, symbol: &str) -> Insertion {
    let mut cursor = named.walk();
    let last_specifier = named
        .named_children(&mut cursor)
        .filter(|node| node.kind() == "import_specifier")
        .last();
    match last_specifier {
        Some(specifier) => Insertion::new(specifier.end_byte(), format!(", {symbol}")),
        // `import {} from 'm'`: place the symbol inside the braces.
        None => Insertion::new(named.end_byte().saturating_sub(1), format!(" {symbol} ")),
    }
}

fn import_statements(root: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut cursor = root.walk();
    root.named_children(&mut cursor)
        .filter(|node| node.kind() == "import_statement")
        .collect()
}

fn module_specifier<'s>(import: tree_sitter::Node<'_>, source: &'s str) -> Option<&'s str> {
    let specifier = import.child_by_field_name("source")?;
    node_text(specifier, source).map(unquote)
}

fn import_clause(import: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    let mut cursor = import.walk();
    let clause = import
        .named_children(&mut cursor)
        .find(|node| node.kind() == "import_clause");
    clause
}

fn named_imports(import: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    let clause = import_clause(import)?;
    let mut cursor = clause.walk();
    let named = clause
        .named_children(&mut cursor)
        .find(|node| node.kind() == "named_imports");
    named
}

fn default_binding(import: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    let clause = import_clause(import)?;
    let mut cursor = clause.walk();
    let binding = clause
        .named_children(&mut cursor)
        .find(|node| node.kind() == "identifier");
    binding
}

fn namespace_binding(import: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    let clause = import_clause(import)?;
    let mut cursor = clause.walk();
    let namespace = clause
        .named_children(&mut cursor)
        .find(|node| node.kind() == "namespace_import")?;
    let mut inner = namespace.walk();
    let identifier = namespace
        .named_children(&mut inner)
        .find(|node| node.kind() == "identifier");
    identifier
}

fn binds_symbol(import: tree_sitter::Node<'_>, source: &str, symbol: &str) -> bool {
    if default_binding(import).and_then(|node| node_text(node, source)) == Some(symbol) {
        return true;
    }
    if namespace_binding(import).and_then(|node| node_text(node, source)) == Some(symbol) {
        return true;
    }
    let Some(named) = named_imports(import) else {
        return false;
    };
    let mut cursor = named.walk();
    named
        .named_children(&mut cursor)
        .filter(|node| node.kind() == "import_specifier")
        .any(|specifier| {
            // The local binding is the alias when present, the name otherwise.
            let local = specifier
                .child_by_field_name("alias")
                .or_else(|| specifier.child_by_field_name("name"));
            local.and_then(|node| node_text(node, source)) == Some(symbol)
        })
}
