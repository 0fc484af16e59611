//! Lexical cleanup of an infobox argument before it is scanned.

use crate::wikitext::tags::top_level_text;
use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

/// Line break tags in any of their spellings, and literal line breaks.
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*/?\s*br\s*/?\s*>|\r?\n").unwrap());

/// Runs of apostrophes used for bold and italic text. Alternation order makes
/// the longest run win at each position, so `'''''` is not read as `''` and
/// `'''`.
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new("'''''|'''|''").unwrap());

/// Normalises raw argument text so that the scanner only sees list
/// punctuation, links, templates, and names.
///
/// 1. Line breaks become commas, so one-ingredient-per-line lists split like
///    comma lists.
/// 2. Only top-level text is kept, dropping citations and other elements,
///    and character references are decoded. If that leaves nothing, the text
///    is used as-is.
/// 3. Bold and italic markers are removed.
///
/// The steps repeat until the text stops changing, since removing markup can
/// expose more markup (`<''ref>`, `&lt;ref&gt;`). Every pass that changes
/// anything makes the text shorter or replaces a newline, so this terminates.
pub fn normalize(text: &str) -> String {
    let mut current = pass(text);
    loop {
        let next = pass(&current);
        if next == current {
            return current;
        }
        log::trace!("normalize: another pass over {next:?}");
        current = next;
    }
}

/// Applies every normalisation step once.
fn pass(text: &str) -> String {
    let text = LINE_BREAK.replace_all(text, ",");

    let stripped = top_level_text(&text);
    let text = if stripped.is_empty() {
        text
    } else {
        Cow::Owned(stripped)
    };

    EMPHASIS.replace_all(&text, "").into_owned()
}
