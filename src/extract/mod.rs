//! Ingredient extraction from a page's food infobox.
//!
//! ```text
//! page source
//!   └─ infobox::ingredient_text   find the infobox and its ingredient argument
//!       └─ lists::resolve         flatten list templates into comma lists
//!           └─ normalize          line breaks, tags, emphasis
//!               └─ scanner        links, templates, splitting, nesting
//!                   └─ trim       placeholder cleanup
//! ```

use crate::{config::Configuration, ingredient::Ingredient, wikitext::Document};
use std::borrow::Cow;

pub mod infobox;
pub mod link;
pub mod lists;
pub mod normalize;
pub mod scanner;
#[cfg(test)]
mod tests;
pub mod trim;

pub use lists::ListError;

/// Extracts ingredient trees from pages.
#[derive(Clone, Debug, Default)]
pub struct Extractor {
    /// Which infoboxes and arguments to read.
    config: Configuration,
}

impl Extractor {
    /// Creates a new extractor with the given configuration.
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// The extractor configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Extracts the ingredients listed in the food infobox of the page
    /// `source`. An empty result means the page is not usable.
    pub fn extract(&self, source: &str) -> Vec<Ingredient> {
        let document = Document::parse(source);
        infobox::ingredient_text(&document, &self.config)
            .map(|text| self.parse_argument(text))
            .unwrap_or_default()
    }

    /// Parses the text of an ingredient argument.
    pub fn parse_argument(&self, text: &str) -> Vec<Ingredient> {
        let text = match lists::resolve(text) {
            Ok(Some(joined)) => Cow::Owned(joined),
            Ok(None) => Cow::Borrowed(text),
            Err(error) => {
                log::warn!("{error}; parsing the argument as plain text");
                Cow::Borrowed(text)
            }
        };

        let text = normalize::normalize(&text);
        trim::trim(&scanner::parse_list(&text))
    }
}
