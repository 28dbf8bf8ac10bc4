//! Materialized path construction.

/// Build the path of a child placed under `parent_path`.
///
/// Paths are always trailing-slash-terminated; the root is `/`, so a
/// root-level folder "Docs" gets `/Docs/` and its child "2024" gets
/// `/Docs/2024/`.
pub(crate) fn child_path(parent_path: &str, name: &str) -> String {
    format!("{}/{}/", parent_path.trim_end_matches('/'), name)
}
