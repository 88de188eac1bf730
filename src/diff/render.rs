use crate::response::pretty_json;

use super::{diff_texts, DiffLine, DiffTag};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnifiedOptions {
    /// Drop unchanged lines from the rendering.
    pub changes_only: bool,
}

/// JSON bodies are pretty-printed with sorted keys so that key order and
/// whitespace do not show up as changes. Other text is compared verbatim.
pub fn normalize_body(body: &str) -> String {
    pretty_json(body).unwrap_or_else(|| body.to_string())
}

pub fn diff_bodies(left: &str, right: &str) -> Vec<DiffLine> {
    diff_texts(&normalize_body(left), &normalize_body(right))
}

/// One line per entry, prefixed with the tag symbol.
pub fn render_unified(lines: &[DiffLine], options: UnifiedOptions) -> String {
    lines
        .iter()
        .filter(|line| !(options.changes_only && line.tag == DiffTag::Unchanged))
        .map(|line| format!("{}{}", line.tag.symbol(), line.text))
        .collect::<Vec<_>>()
        .join("\n")
}
