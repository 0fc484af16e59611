//! List templates in an ingredient argument.
//!
//! Editors often write the ingredient argument as a bulleted list wrapped in a
//! list template instead of as inline text. These are flattened into the
//! comma-separated form the scanner understands.

use crate::wikitext::{Document, Template, lists};

/// The shape of a list template.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListKind {
    /// `{{flatlist|\n* a\n* b}}`
    Flat,
    /// `{{plainlist|\n* a\n* b}}`
    Plain,
    /// `{{ubl|a|b}}`
    Unbulleted,
}

/// Known list templates, by normalised name.
static LIST_TEMPLATES: phf::Map<&str, ListKind> = phf::phf_map! {
    "flatlist" => ListKind::Flat,
    "plainlist" => ListKind::Plain,
    "ubl" => ListKind::Unbulleted,
    "unbulleted list" => ListKind::Unbulleted,
};

/// The order in which list kinds are looked for. Bulleted lists win over
/// unbulleted ones wherever they appear in the argument.
const PRIORITY: [ListKind; 3] = [ListKind::Flat, ListKind::Plain, ListKind::Unbulleted];

/// List template errors.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum ListError {
    /// A list template was found but it contained no items.
    #[error("{0:?} list template has no items")]
    Empty(ListKind),
}

/// Finds a list template in `text` and returns its items joined with commas.
///
/// Returns `Ok(None)` if `text` contains no known list template, in which case
/// the caller should use `text` directly.
pub fn resolve(text: &str) -> Result<Option<String>, ListError> {
    let document = Document::parse(text);
    let found = PRIORITY.iter().find_map(|kind| {
        document
            .templates()
            .iter()
            .find(|template| list_kind(template) == Some(*kind))
            .map(|template| (*kind, template))
    });

    let Some((kind, template)) = found else {
        return Ok(None);
    };

    let items = match kind {
        ListKind::Flat | ListKind::Plain => template
            .positional()
            .map(|argument| lists::items(argument.value))
            .find(|items| !items.is_empty())
            .unwrap_or_default(),
        ListKind::Unbulleted => template
            .positional()
            .map(|argument| argument.trimmed_value())
            .collect(),
    };

    if items.is_empty() {
        return Err(ListError::Empty(kind));
    }

    log::trace!("{kind:?} list with {} items", items.len());
    Ok(Some(items.join(",")))
}

/// Returns the list kind of a template, if it is a list template.
fn list_kind(template: &Template<'_>) -> Option<ListKind> {
    LIST_TEMPLATES.get(template.normalized_name().as_str()).copied()
}
