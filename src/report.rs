//! Output formats for extracted ingredient lists.

use crate::ingredient::Ingredient;
use std::io;

/// The ingredients of one page.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct Page {
    /// The page title.
    pub title: String,
    /// The extracted ingredients.
    pub ingredients: Vec<Ingredient>,
}

/// Writes a page as a text block: a blank line, the title followed by a colon,
/// then one `- ` line per top-level ingredient with its sub-ingredients in
/// parentheses.
pub fn write_text<W: io::Write>(out: &mut W, page: &Page) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}:", page.title)?;
    for ingredient in &page.ingredients {
        writeln!(out, "- {ingredient}")?;
    }
    Ok(())
}

/// Writes pages as a pretty-printed JSON array.
pub fn write_json<W: io::Write>(out: &mut W, pages: &[Page]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, pages)?;
    writeln!(out).map_err(serde_json::Error::io)
}
