//! Wikitext list items.

/// Returns the raw text of each top-level item of the first list in `text`,
/// without the list marker.
///
/// A list is a run of consecutive lines starting with `*` or `#`. Deeper
/// items (`**`, `*#`, …) belong to sub-lists and are not returned.
pub fn items(text: &str) -> Vec<&str> {
    super::parser::wikitext::list_items(text).unwrap_or_default()
}
