//! Shared text extraction helpers.

/// Returns the source text covered by a node, if its range is valid.
pub(crate) fn node_text<'s>(node: tree_sitter::Node<'_>, source: &'s str) -> Option<&'s str> {
    source.get(node.byte_range())
}

/// Strips one layer of matching single or double quotes.
pub(crate) fn unquote(text: &str) -> &str {
    let inner = text.strip_prefix(['"', '\'']).unwrap_or(text);
    inner.strip_suffix(['"', '\'']).unwrap_or(inner)
}

/// Returns the leading whitespace of the line containing `offset`.
pub(crate) fn line_indent(source: &str, offset: usize) -> &str {
    let head = source.get(..offset).unwrap_or_default();
    let line_start = head.rfind('\n').map_or(0, |index| index.saturating_add(1));
    let line = head.get(line_start..).unwrap_or_default();
    let indent_len = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    line.get(..indent_len).unwrap_or_default()
}
