use super::*;
use crate::{
    ingredient::Forest,
    report::{Page, write_text},
};

const BASE_DIR: &str = "./src/extract/tests";

macro_rules! run_tests {
    ($($name:ident),* $(,)?) => {
        $(#[test]
        fn $name() {
            run_test(
                stringify!($name),
                include_str!(concat!("./", stringify!($name), ".wiki"))
            );
        })*
    }
}

#[track_caller]
fn run_test(test_name: &str, source: &str) {
    let _ = env_logger::try_init();

    let mut mint = goldenfile::Mint::new(format!("{BASE_DIR}/goldenfiles"));
    let mut file = mint.new_goldenfile(format!("{test_name}.txt")).unwrap();
    let page = Page {
        title: test_name.to_string(),
        ingredients: Extractor::default().extract(source),
    };
    write_text(&mut file, &page).unwrap();
}

run_tests! {
    kheer,
    pavlova,
    trifle,
}

/// Parses an argument and renders the result like `a (b, c), d`.
fn render(text: &str) -> String {
    Forest(&Extractor::default().parse_argument(text)).to_string()
}

#[test]
fn page_without_infobox() {
    let _ = env_logger::try_init();
    assert!(Extractor::default()
        .extract(include_str!("./gulab_jamun.wiki"))
        .is_empty());
}

#[test]
fn infobox_without_ingredients() {
    let source = "{{Infobox food\n| name = Halva\n| course = [[Dessert]]\n}}";
    assert!(Extractor::default().extract(source).is_empty());
}

#[test]
fn markup_free_names() {
    let forest = Extractor::default().parse_argument(
        "[[Flour|plain flour]] {{convert|200|g}}, ''[[Butter]]''<ref>x</ref>, '''eggs'''",
    );
    let mut stack = forest.iter().collect::<Vec<_>>();
    while let Some(ingredient) = stack.pop() {
        let name = ingredient.name();
        assert_eq!(name, name.trim());
        assert!(!name.is_empty());
        for markup in ["[[", "]]", "{{", "}}", "''", "<"] {
            assert!(!name.contains(markup), "{name:?} contains {markup:?}");
        }
        stack.extend(ingredient.children());
    }
    assert_eq!(Forest(&forest).to_string(), "plain flour, Butter, eggs");
}

#[test]
fn line_breaks_split() {
    assert_eq!(render("Milk<br>Sugar<BR />Rice\nSalt"), "Milk, Sugar, Rice, Salt");
}

#[test]
fn element_content_is_dropped() {
    assert_eq!(render("Rice <small>(optional)</small>, ''milk''"), "Rice, milk");
    assert_eq!(render("'''Rice'''<sup>[1]</sup> flour"), "Rice flour");
}

#[test]
fn sub_ingredients() {
    assert_eq!(
        render("[[Pastry]] ([[flour]], [[butter]] or [[lard]]), [[jam]]"),
        "Pastry (flour, butter, lard), jam"
    );
}

#[test]
fn empty_list_template_falls_back_to_text() {
    let _ = env_logger::try_init();
    assert_eq!(render("{{plainlist|no bullets}} milk"), "milk");
}

#[test]
fn non_breaking_hyphen() {
    assert_eq!(
        render("[[Semi{{Non breaking hyphen}}sweet]] chocolate"),
        "Semi-sweet chocolate"
    );
}

#[test]
fn custom_configuration() {
    let extractor = Extractor::new(
        Configuration::default()
            .with_infobox("Infobox cheese")
            .with_ingredient_argument("source"),
    );
    let forest = extractor.extract("{{Infobox cheese\n| source = [[Cow]]'s milk\n}}");
    assert_eq!(Forest(&forest).to_string(), "Cow's milk");
    assert_eq!(extractor.config().ingredient_argument, "source");
}

#[test]
fn extractor_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Extractor>();
}

#[test]
fn citation_pipes_do_not_split_arguments() {
    let forest = Extractor::default().extract(
        "{{Infobox food| main_ingredient = Sugar<ref>Smith | Jones 2001</ref>, flour}}",
    );
    let names = forest.iter().map(Ingredient::name).collect::<Vec<_>>();
    assert_eq!(names, ["Sugar", "flour"]);
}

#[test]
fn deeply_nested_sub_lists() {
    let _ = env_logger::try_init();
    let text = format!("{}z", "a (".repeat(100_000));
    let forest = Extractor::default().parse_argument(&text);
    assert_eq!(forest.len(), 1);

    let mut depth = 0;
    let mut node = &forest[0];
    while let Some(child) = node.children().first() {
        assert_eq!(node.name(), "a");
        depth += 1;
        node = child;
    }
    assert_eq!(depth, scanner::MAX_DEPTH);
    assert!(node.name().ends_with("a (z"));

    let rendered = Forest(&forest).to_string();
    assert!(rendered.starts_with("a (a ("));
    assert!(rendered.ends_with(&")".repeat(scanner::MAX_DEPTH)));
    drop(forest);
}
