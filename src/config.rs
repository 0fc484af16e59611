//! Extractor configuration.
//!
//! Which infoboxes and which infobox argument hold a food's ingredients is a
//! convention of the English Wikipedia, so it is configurable. The list
//! templates the argument may use are fixed syntax and live in static tables.

/// The infoboxes used on food articles.
pub const DEFAULT_INFOBOXES: &[&str] = &["infobox food", "infobox prepared food"];

/// The infobox argument which lists a food's main ingredients.
pub const DEFAULT_INGREDIENT_ARGUMENT: &str = "main_ingredient";

/// Runtime configuration for an [`Extractor`](crate::Extractor).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Configuration {
    /// Names of the infobox templates to search, in any case.
    pub infoboxes: Vec<String>,
    /// The name of the infobox argument holding the ingredient list.
    pub ingredient_argument: String,
}

impl Configuration {
    /// Adds another infobox name to search after the existing ones.
    pub fn with_infobox(mut self, name: impl Into<String>) -> Self {
        self.infoboxes.push(name.into());
        self
    }

    /// Replaces the ingredient argument name.
    pub fn with_ingredient_argument(mut self, name: impl Into<String>) -> Self {
        self.ingredient_argument = name.into();
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            infoboxes: DEFAULT_INFOBOXES.iter().map(ToString::to_string).collect(),
            ingredient_argument: DEFAULT_INGREDIENT_ARGUMENT.to_string(),
        }
    }
}
