//! Wikilink substitution.

use crate::wikitext::Link;

/// Returns the text a wikilink contributes to an ingredient name, given the
/// raw link body between `[[` and `]]`.
///
/// The link text is used if there is any; otherwise the title. An empty link
/// text (`[[Sugar|]]`) counts as no text.
pub fn resolve(body: &str) -> &str {
    let link = Link::parse(body);
    match link.content {
        Some(content) if !content.is_empty() => content,
        _ => link.title(),
    }
}
