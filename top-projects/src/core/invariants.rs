//! Dataset table invariants not expressible via serde.

use std::collections::HashSet;

/// Check ecosystem ids used to build the task table:
/// - Non-empty
/// - No whitespace or path separators (ids become task ids and file names)
/// - No duplicates
pub fn validate_ecosystems<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for (index, id) in ids.into_iter().enumerate() {
        if id.is_empty() {
            errors.push(format!("dataset[{index}]: ecosystem must be non-empty"));
            continue;
        }
        if id.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
            errors.push(format!(
                "dataset[{index}]: ecosystem '{id}' must not contain whitespace or path separators"
            ));
        }
        if !seen.insert(id) {
            errors.push(format!("duplicate ecosystem '{id}' at dataset[{index}]"));
        }
    }
    errors
}
