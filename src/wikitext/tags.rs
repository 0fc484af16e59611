//! Tag stripping for HTML-like markup embedded in Wikitext.
//!
//! Only text which is not inside any element is kept. This discards the
//! content of `<ref>` citations, `<small>` asides, `<sup>` markers and the
//! like, which never name an ingredient.

use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

/// Self-closing start tags like `<ref name="a" />`.
///
/// Wikitext treats these as empty elements, but HTML ignores the trailing
/// slash on non-void elements and would swallow the text which follows.
static SELF_CLOSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z][^<>]*/\s*>").unwrap());

/// Returns the text of `source` which is not inside any element.
///
/// The markup is parsed as an HTML fragment, so comments are dropped,
/// character references are decoded, stray end tags are ignored, and a `<`
/// which does not start a tag is kept as text. Unclosed elements extend to the
/// end of the input.
pub fn top_level_text(source: &str) -> String {
    let source = SELF_CLOSING.replace_all(source, "");
    let fragment = Html::parse_fragment(&source);
    fragment
        .root_element()
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect()
}
