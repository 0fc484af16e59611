//! Cosmetic cleanup of a parsed ingredient tree.

use crate::ingredient::Ingredient;

/// The non-breaking hyphen template, which stands in for a plain hyphen.
pub const NON_BREAKING_HYPHEN: &str = "{{Non breaking hyphen}}";

/// Returns a copy of `forest` with every non-breaking hyphen template in a
/// name replaced by `-`.
pub fn trim(forest: &[Ingredient]) -> Vec<Ingredient> {
    forest
        .iter()
        .filter_map(|ingredient| {
            Ingredient::new(
                ingredient.name().replace(NON_BREAKING_HYPHEN, "-"),
                trim(ingredient.children()),
            )
        })
        .collect()
}
