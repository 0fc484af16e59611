//! Infobox lookup.

use crate::{
    config::Configuration,
    wikitext::{Document, Spanned, Template},
};

/// Finds the food infobox of a page.
pub fn find<'d, 'a>(
    document: &'d Document<'a>,
    config: &Configuration,
) -> Option<&'d Spanned<Template<'a>>> {
    document.find_template(config.infoboxes.as_slice())
}

/// Returns the trimmed ingredient argument of the page's food infobox.
///
/// Pages without a food infobox, or whose infobox has no ingredient argument,
/// have no ingredients. No other part of the page is considered.
pub fn ingredient_text<'a>(document: &Document<'a>, config: &Configuration) -> Option<&'a str> {
    let Some(infobox) = find(document, config) else {
        log::debug!("no food infobox");
        return None;
    };

    let Some(argument) = infobox.argument(&config.ingredient_argument) else {
        log::debug!(
            "{} has no {} argument",
            infobox.normalized_name(),
            config.ingredient_argument
        );
        return None;
    };

    Some(argument.trimmed_value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepared_food() {
        let document = Document::parse(
            "{{Infobox prepared food\n| name = Trifle\n| main_ingredient = Custard, fruit\n}}",
        );
        assert_eq!(
            ingredient_text(&document, &Configuration::default()),
            Some("Custard, fruit")
        );
    }

    #[test]
    fn first_infobox_wins() {
        let document = Document::parse(
            "{{infobox food|main_ingredient=a}}{{Infobox prepared food|main_ingredient=b}}",
        );
        assert_eq!(ingredient_text(&document, &Configuration::default()), Some("a"));
    }

    #[test]
    fn missing() {
        let config = Configuration::default();
        let document = Document::parse("{{Infobox cheese|main_ingredient=milk}}");
        assert_eq!(ingredient_text(&document, &config), None);
        let document = Document::parse("{{Infobox food|name=Cake}}");
        assert_eq!(ingredient_text(&document, &config), None);
        assert!(find(&document, &config).is_some());
    }

    #[test]
    fn configured() {
        let config = Configuration::default()
            .with_infobox("Infobox cheese")
            .with_ingredient_argument("source");
        let document = Document::parse("{{Infobox cheese|source=[[Cow]]s' milk}}");
        assert_eq!(ingredient_text(&document, &config), Some("[[Cow]]s' milk"));
    }
}
