//! The ingredient tree.

use core::fmt;

/// A named ingredient, which may itself be made of other ingredients.
///
/// ```wikitext
/// juice (water, sugar)
/// ^^^^^  ^^^^^  ^^^^^
/// name   children
/// ```
///
/// The name is never empty and never has leading or trailing whitespace.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct Ingredient {
    /// The trimmed, non-empty name.
    name: String,
    /// Sub-ingredients, in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Ingredient>,
}

impl Ingredient {
    /// Creates a new ingredient from an untrimmed name. Returns `None` if the
    /// trimmed name is empty, in which case `children` are dropped as well.
    pub fn new(name: impl AsRef<str>, children: Vec<Ingredient>) -> Option<Self> {
        let name = name.as_ref().trim();
        (!name.is_empty()).then(|| Self {
            name: name.to_string(),
            children,
        })
    }

    /// Creates a new ingredient with no sub-ingredients.
    pub fn leaf(name: impl AsRef<str>) -> Option<Self> {
        Self::new(name, Vec::new())
    }

    /// The ingredient name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sub-ingredients.
    #[inline]
    pub fn children(&self) -> &[Ingredient] {
        &self.children
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.children.is_empty() {
            write!(f, " ({})", Forest(&self.children))?;
        }
        Ok(())
    }
}

/// Displays a list of ingredients separated by commas.
#[derive(Clone, Copy, Debug)]
pub struct Forest<'a>(pub &'a [Ingredient]);

impl fmt::Display for Forest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, ingredient) in self.0.iter().enumerate() {
            if index != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ingredient}")?;
        }
        Ok(())
    }
}
