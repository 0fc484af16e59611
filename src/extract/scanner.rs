//! The ingredient list scanner.
//!
//! This is a single pass over normalised argument text which strips links and
//! templates, splits on commas and connective words, and nests parenthesised
//! sub-lists under the name they follow:
//!
//! ```wikitext
//! [[Pastry]], [[Custard|vanilla custard]] {{citation needed}} and fruit (apples / pears)
//! ```
//!
//! becomes `Pastry, vanilla custard, fruit (apples, pears)`.
//!
//! The scanner never fails. Markup which is not closed by the end of the input
//! is dropped, a single stray bracket or brace is kept as text, and unmatched
//! parentheses are either text (`)`) or closed implicitly at the end (`(`).
//! Sub-lists are kept on an explicit stack. Parentheses nested more than
//! [`MAX_DEPTH`] lists deep are kept as text, so the depth of the resulting
//! tree is bounded no matter the input.

use super::link;
use crate::ingredient::Ingredient;
use core::{mem, ops::ControlFlow};

/// Words which split a list like a comma does. Each begins with the space
/// which started the candidate word, so only whole words match.
const CONNECTIVES: [&str; 4] = [" /", " or", " and", " and/or"];

/// The maximum number of sub-lists opened by a single parse.
pub const MAX_DEPTH: usize = 32;

/// Scanner states.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Accumulating an ingredient name.
    Normal,
    /// Seen one `[`.
    PossibleLinkOpen,
    /// Inside `[[`.
    InLink,
    /// Seen one `]` inside a link.
    PossibleLinkClose,
    /// Seen the `]]` closing a link. The link is resolved when the next
    /// character arrives.
    LinkClosed,
    /// Seen one `{`.
    PossibleTemplateOpen,
    /// Inside `{{`.
    InTemplate,
    /// Seen one `}` inside a template.
    PossibleTemplateClose,
    /// Seen the `}}` closing a template. The template is dropped when the
    /// next character arrives.
    TemplateClosed,
    /// Seen a space, and accumulating the word after it in case it is a
    /// connective.
    PossibleSplitWord,
}

/// Parses an ingredient list starting at byte `start` of `text`.
///
/// `depth` is the number of sub-lists which are already open at `start`. When
/// it is non-zero, each unmatched `)` closes one of them, and scanning stops at
/// the `)` which closes the last one. The returned index is the position of
/// that `)`, or the length of `text` if the input ran out first.
///
/// Top-level callers should use [`parse_list`].
pub fn parse(text: &str, start: usize, depth: usize) -> (Vec<Ingredient>, usize) {
    let Some(rest) = text.get(start..) else {
        log::warn!("scan start {start} is not a character boundary of the input");
        return (Vec::new(), text.len());
    };

    let mut scanner = Scanner::new(depth);
    for (offset, c) in rest.char_indices() {
        if scanner.feed(c).is_break() {
            return (scanner.level.done, start + offset);
        }
    }

    (scanner.finish(), text.len())
}

/// Parses a complete ingredient list.
pub fn parse_list(text: &str) -> Vec<Ingredient> {
    parse(text, 0, 0).0
}

/// An ingredient which has not reached its boundary yet.
#[derive(Debug, Default)]
struct Pending {
    /// The untrimmed name.
    name: String,
    /// Sub-ingredients from parenthesised lists after the name.
    children: Vec<Ingredient>,
}

/// One list being built.
#[derive(Debug, Default)]
struct Level {
    /// Ingredients which have been completed.
    done: Vec<Ingredient>,
    /// The ingredient currently being accumulated.
    pending: Pending,
}

/// The scanner state for a single parse.
#[derive(Debug)]
struct Scanner {
    /// The current state.
    state: State,
    /// Lists which were already open when scanning started.
    open_lists: usize,
    /// Enclosing lists opened during this scan, innermost last.
    parents: Vec<Level>,
    /// The innermost list.
    level: Level,
    /// Raw link markup, including brackets.
    link: String,
    /// Raw template markup, including braces.
    template: String,
    /// Nested `{{` pairs inside the current template.
    template_depth: usize,
    /// The last character inside the template was an unpaired `{`.
    template_brace: bool,
    /// A space and the word after it, which may be a connective.
    split: String,
    /// Parentheses beyond [`MAX_DEPTH`] which are still open, and which were
    /// kept as text.
    literal_parens: usize,
}

impl Scanner {
    /// Creates a scanner for input with `open_lists` lists already open.
    fn new(open_lists: usize) -> Self {
        Self {
            state: State::Normal,
            open_lists,
            parents: Vec::new(),
            level: Level::default(),
            link: String::new(),
            template: String::new(),
            template_depth: 0,
            template_brace: false,
            split: String::new(),
            literal_parens: 0,
        }
    }

    /// Consumes one character. Breaks when the last already-open list closes.
    fn feed(&mut self, c: char) -> ControlFlow<()> {
        match (self.state, c) {
            (State::PossibleLinkOpen, '[') => {
                self.link.push(c);
                self.state = State::InLink;
            }
            (State::InLink, ']') => {
                self.link.push(c);
                self.state = State::PossibleLinkClose;
            }
            (State::InLink, _) => self.link.push(c),
            (State::PossibleLinkClose, ']') => {
                self.link.push(c);
                self.state = State::LinkClosed;
            }
            (State::PossibleTemplateOpen, '{') => {
                self.template.push(c);
                self.state = State::InTemplate;
            }
            (State::InTemplate, '{') => {
                self.template.push(c);
                if mem::take(&mut self.template_brace) {
                    self.template_depth += 1;
                } else {
                    self.template_brace = true;
                }
            }
            (State::InTemplate, '}') => {
                self.template.push(c);
                self.template_brace = false;
                self.state = State::PossibleTemplateClose;
            }
            (State::InTemplate, _) => {
                self.template.push(c);
                self.template_brace = false;
            }
            (State::PossibleTemplateClose, '}') => {
                self.template.push(c);
                if self.template_depth > 0 {
                    self.template_depth -= 1;
                    self.state = State::InTemplate;
                } else {
                    self.state = State::TemplateClosed;
                }
            }
            (
                State::PossibleLinkOpen
                | State::PossibleLinkClose
                | State::PossibleTemplateOpen
                | State::PossibleTemplateClose,
                _,
            ) => {
                // Not markup after all
                self.flush_markup();
                self.state = State::Normal;
                return self.feed(c);
            }
            (State::LinkClosed | State::TemplateClosed, _) => {
                self.settle();
                return self.feed(c);
            }
            (State::Normal | State::PossibleSplitWord, '[') => {
                self.flush_split();
                self.link.push(c);
                self.state = State::PossibleLinkOpen;
            }
            (State::Normal | State::PossibleSplitWord, '{') => {
                self.flush_split();
                self.template.push(c);
                self.template_depth = 0;
                self.template_brace = false;
                self.state = State::PossibleTemplateOpen;
            }
            (State::Normal, ' ') => {
                self.split.push(c);
                self.state = State::PossibleSplitWord;
            }
            (State::PossibleSplitWord, ' ') => {
                if is_connective(&self.split) {
                    self.split.clear();
                    self.end_ingredient();
                    self.state = State::Normal;
                } else {
                    self.flush_split();
                    self.split.push(c);
                }
            }
            (State::Normal | State::PossibleSplitWord, ',') => {
                self.take_split();
                self.end_ingredient();
                self.state = State::Normal;
            }
            (State::Normal | State::PossibleSplitWord, '(') => {
                self.flush_split();
                if self.parents.len() < MAX_DEPTH {
                    self.open_list();
                } else {
                    if self.literal_parens == 0 {
                        log::debug!("sub-lists nested deeper than {MAX_DEPTH}; keeping text");
                    }
                    self.literal_parens += 1;
                    self.level.pending.name.push(c);
                }
                self.state = State::Normal;
            }
            (State::Normal | State::PossibleSplitWord, ')') if self.literal_parens > 0 => {
                self.flush_split();
                self.literal_parens -= 1;
                self.level.pending.name.push(c);
                self.state = State::Normal;
            }
            (State::Normal | State::PossibleSplitWord, ')') if self.in_list() => {
                self.take_split();
                self.state = State::Normal;
                return self.close_list();
            }
            (State::Normal, _) => self.level.pending.name.push(c),
            (State::PossibleSplitWord, _) => self.split.push(c),
        }

        ControlFlow::Continue(())
    }

    /// Finishes a closed link or template and returns to [`State::Normal`].
    fn settle(&mut self) {
        match self.state {
            State::LinkClosed => {
                let raw = mem::take(&mut self.link);
                let body = raw
                    .strip_prefix("[[")
                    .and_then(|raw| raw.strip_suffix("]]"))
                    .unwrap_or(&raw);
                let text = link::resolve(body);
                log::trace!("link {raw:?} -> {text:?}");
                self.level.pending.name += text;
            }
            State::TemplateClosed => {
                log::trace!("dropping template {:?}", self.template);
                self.template.clear();
            }
            _ => return,
        }
        self.state = State::Normal;
    }

    /// Returns true if a `)` would close a list.
    fn in_list(&self) -> bool {
        !self.parents.is_empty() || self.open_lists > 0
    }

    /// Moves any buffered link or template text into the pending name as
    /// plain text.
    fn flush_markup(&mut self) {
        let name = &mut self.level.pending.name;
        name.push_str(&self.link);
        name.push_str(&self.template);
        self.link.clear();
        self.template.clear();
    }

    /// Moves the split candidate into the pending name.
    fn flush_split(&mut self) {
        self.level.pending.name.push_str(&self.split);
        self.split.clear();
    }

    /// Moves the split candidate into the pending name unless it is a
    /// connective, which is dropped instead.
    fn take_split(&mut self) {
        if !is_connective(&self.split) {
            self.level.pending.name.push_str(&self.split);
        }
        self.split.clear();
    }

    /// Completes the pending ingredient of the innermost list.
    fn end_ingredient(&mut self) {
        let Pending { name, children } = mem::take(&mut self.level.pending);
        match Ingredient::new(&name, children) {
            Some(ingredient) => self.level.done.push(ingredient),
            None => log::trace!("dropping unnamed ingredient {name:?}"),
        }
    }

    /// Starts a sub-list of the pending ingredient.
    fn open_list(&mut self) {
        let parent = mem::take(&mut self.level);
        self.parents.push(parent);
    }

    /// Closes the innermost list. Breaks if that was the last list which was
    /// open when scanning started.
    fn close_list(&mut self) -> ControlFlow<()> {
        self.end_ingredient();
        if let Some(parent) = self.parents.pop() {
            let list = mem::replace(&mut self.level, parent).done;
            self.level.pending.children.extend(list);
            ControlFlow::Continue(())
        } else {
            self.open_lists -= 1;
            if self.open_lists == 0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }

    /// Completes the parse at the end of the input.
    fn finish(mut self) -> Vec<Ingredient> {
        match self.state {
            State::PossibleLinkOpen | State::PossibleTemplateOpen => self.flush_markup(),
            State::InLink | State::PossibleLinkClose => {
                log::debug!("dropping unterminated link {:?}", self.link);
            }
            State::InTemplate | State::PossibleTemplateClose => {
                log::debug!("dropping unterminated template {:?}", self.template);
            }
            State::LinkClosed | State::TemplateClosed => self.settle(),
            State::Normal | State::PossibleSplitWord => {}
        }

        loop {
            self.flush_split();
            self.end_ingredient();
            let Some(parent) = self.parents.pop() else {
                break;
            };
            let list = mem::replace(&mut self.level, parent).done;
            self.level.pending.children.extend(list);
        }

        self.level.done
    }
}

/// Returns true if `candidate` is a connective word.
fn is_connective(candidate: &str) -> bool {
    CONNECTIVES.contains(&candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::Forest;

    /// Parses `text` and renders the result like `a (b, c), d`.
    fn render(text: &str) -> String {
        Forest(&parse_list(text)).to_string()
    }

    /// Parses `text` and returns the top-level names.
    fn names(text: &str) -> Vec<String> {
        parse_list(text)
            .iter()
            .map(|ingredient| ingredient.name().to_string())
            .collect()
    }

    #[test]
    fn plain_text() {
        assert_eq!(names("  caster sugar  "), ["caster sugar"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list("   ").is_empty());
    }

    #[test]
    fn commas() {
        let forest = parse_list("a, b, c");
        assert_eq!(names("a, b, c"), ["a", "b", "c"]);
        assert!(forest.iter().all(|ingredient| ingredient.children().is_empty()));
    }

    #[test]
    fn empty_segments() {
        assert_eq!(names("a, , b"), ["a", "b"]);
        assert_eq!(names(",,a,,"), ["a"]);
    }

    #[test]
    fn connectives() {
        assert_eq!(names("flour and sugar"), ["flour", "sugar"]);
        assert_eq!(names("flour and/or sugar"), ["flour", "sugar"]);
        assert_eq!(names("apples / pears"), ["apples", "pears"]);
        assert_eq!(names("eggs or milk or cream"), ["eggs", "milk", "cream"]);
        assert_eq!(names("dark red or black cherries"), ["dark red", "black cherries"]);
    }

    #[test]
    fn connectives_are_whole_words() {
        assert_eq!(names("android"), ["android"]);
        assert_eq!(names("sweet andy sugar"), ["sweet andy sugar"]);
        assert_eq!(names("ice orange"), ["ice orange"]);
        assert_eq!(names("apples/pears"), ["apples/pears"]);
        assert_eq!(names("a And b"), ["a And b"]);
    }

    #[test]
    fn trailing_connective_is_kept() {
        assert_eq!(names("sugar and"), ["sugar and"]);
        assert_eq!(names("sugar and, milk"), ["sugar", "milk"]);
    }

    #[test]
    fn sub_lists() {
        assert_eq!(render("juice (water, sugar)"), "juice (water, sugar)");
        let forest = parse_list("juice (water, sugar)");
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name(), "juice");
        assert_eq!(forest[0].children().len(), 2);
    }

    #[test]
    fn nested_sub_lists() {
        let forest = parse_list("a (b (c, d), e)");
        assert_eq!(forest.len(), 1);
        let a = &forest[0];
        assert_eq!(a.name(), "a");
        assert_eq!(a.children().len(), 2);
        assert_eq!(a.children()[0].name(), "b");
        assert_eq!(Forest(a.children()[0].children()).to_string(), "c, d");
        assert_eq!(a.children()[1].name(), "e");
        assert!(a.children()[1].children().is_empty());
    }

    #[test]
    fn sub_list_then_siblings() {
        assert_eq!(
            render("cream (whipped), fruit (apples or pears), nuts"),
            "cream (whipped), fruit (apples, pears), nuts"
        );
    }

    #[test]
    fn repeated_sub_lists_are_joined() {
        assert_eq!(render("syrup (sugar) (water)"), "syrup (sugar, water)");
    }

    #[test]
    fn text_after_sub_list_joins_name() {
        let forest = parse_list("milk (whole) powder, salt");
        assert_eq!(forest[0].name(), "milk  powder");
        assert_eq!(Forest(forest[0].children()).to_string(), "whole");
        assert_eq!(forest[1].name(), "salt");
    }

    #[test]
    fn unclosed_sub_list() {
        assert_eq!(render("juice (water, sugar"), "juice (water, sugar)");
        assert_eq!(render("a (b (c"), "a (b (c))");
    }

    #[test]
    fn unnamed_sub_list_is_dropped() {
        assert_eq!(render("(water, sugar), salt"), "salt");
    }

    #[test]
    fn excess_close_is_text() {
        assert_eq!(names("a) b, c"), ["a) b", "c"]);
    }

    #[test]
    fn deep_nesting() {
        let open = "(".repeat(200_000);
        assert!(parse_list(&open).is_empty());
        let balanced = format!("{open}x{}", ")".repeat(200_000));
        assert!(parse_list(&balanced).is_empty());

        let depth = MAX_DEPTH + 10;
        let named = format!("{}z{}, b", "a (".repeat(depth), ")".repeat(depth));
        let forest = parse_list(&named);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[1].name(), "b");
        let mut node = &forest[0];
        for _ in 0..MAX_DEPTH {
            assert_eq!(node.name(), "a");
            assert_eq!(node.children().len(), 1);
            node = &node.children()[0];
        }
        assert_eq!(node.name(), format!("{}z{}", "a (".repeat(10), ")".repeat(10)));
        assert!(node.children().is_empty());
    }

    #[test]
    fn closed_states_settle_on_next_character() {
        let mut scanner = Scanner::new(0);
        for c in "[[a]]".chars() {
            let _ = scanner.feed(c);
        }
        assert_eq!(scanner.state, State::LinkClosed);
        assert!(scanner.level.pending.name.is_empty());
        let _ = scanner.feed('b');
        assert_eq!(scanner.state, State::Normal);
        assert_eq!(scanner.level.pending.name, "ab");

        let mut scanner = Scanner::new(0);
        for c in "{{a}}".chars() {
            let _ = scanner.feed(c);
        }
        assert_eq!(scanner.state, State::TemplateClosed);
        assert_eq!(scanner.finish(), Vec::new());
    }

    #[test]
    fn links() {
        assert_eq!(names("[[Sugar]]"), ["Sugar"]);
        assert_eq!(names("[[Sugar|refined sugar]]"), ["refined sugar"]);
        assert_eq!(names("[[Egg (food)|Egg]]s and [[Milk]]"), ["Eggs", "Milk"]);
        assert_eq!(names("[[Salt, table|salt]], pepper"), ["salt", "pepper"]);
        assert_eq!(
            render("[[Pastry]] ([[Flour]], [[Butter]])"),
            "Pastry (Flour, Butter)"
        );
    }

    #[test]
    fn templates() {
        assert_eq!(names("Sugar {{convert|1|kg}}"), ["Sugar"]);
        assert_eq!(names("Sugar {{convert|1|{{kg}}}} syrup"), ["Sugar  syrup"]);
        assert_eq!(names("{{nowrap|a, b}}, c"), ["c"]);
        assert_eq!(names("[[a|{{b}}]]"), ["{{b}}"]);
    }

    #[test]
    fn stray_brackets_and_braces() {
        assert_eq!(names("a [b] c"), ["a [b] c"]);
        assert_eq!(names("a { b"), ["a { b"]);
        assert_eq!(names("x ["), ["x ["]);
        assert_eq!(names("[[a]b]], c"), ["[[a]b]]", "c"]);
    }

    #[test]
    fn unterminated_markup_is_dropped() {
        assert_eq!(names("sugar, [[flour"), ["sugar"]);
        assert_eq!(names("sugar, {{cite web|url=x"), ["sugar"]);
        assert_eq!(names("sugar, milk [[flour]"), ["sugar", "milk"]);
    }

    #[test]
    fn resume_inside_sub_list() {
        let text = "x (a, b) y";
        assert_eq!(parse(text, 3, 1), (parse_list("a, b"), 7));

        let (forest, end) = parse("a), b)", 0, 2);
        assert_eq!(Forest(&forest).to_string(), "a, b");
        assert_eq!(end, 5);

        let (forest, end) = parse("a (b), c", 0, 1);
        assert_eq!(Forest(&forest).to_string(), "a (b), c");
        assert_eq!(end, 8);
    }

    #[test]
    fn bad_start() {
        assert_eq!(parse("é", 1, 0), (Vec::new(), 2));
        assert_eq!(parse("a", 5, 0), (Vec::new(), 1));
    }
}
