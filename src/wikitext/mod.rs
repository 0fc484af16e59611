//! A small owned view over Wikitext page source.
//!
//! This is not a full Wikitext parser. It only understands as much of the
//! syntax as is needed to find top-level templates and their arguments, read
//! wikilink bodies, and pull items out of lists. Everything else is left as raw
//! text for the ingredient scanner.

pub use codemap::{Span, Spanned};

mod codemap;
pub mod lists;
mod parser;
pub mod tags;

/// Extension tags. Their content is not Wikitext, so delimiters inside them
/// never split a template.
static EXTENSION_TAGS: phf::Set<&str> = phf::phf_set! {
    "pre", "nowiki", "gallery", "indicator", "langconvert", "graph", "timeline",
    "hiero", "charinsert", "ref", "references", "inputbox", "imagemap", "source",
    "syntaxhighlight", "poem", "categorytree", "section", "score", "templatestyles",
    "templatedata", "math", "ce", "chem", "maplink", "mapframe", "page-collection",
    "phonos"
};

/// A lexical token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token {
    /// `{{`
    TemplateStart,
    /// `}}`
    TemplateEnd,
    /// `[[`
    LinkStart,
    /// `]]`
    LinkEnd,
    /// `|`
    Pipe,
    /// `=`
    Equals,
    /// `<!-- … -->`
    Comment,
    /// An extension tag with its content, like `<ref>…</ref>`.
    Extension,
    /// An HTML start or end tag.
    Tag,
    /// Anything else.
    Text,
}

/// Splits `source` into tokens.
fn tokenize(source: &str) -> Vec<Spanned<Token>> {
    parser::wikitext::tokens(source).unwrap_or_else(|error| {
        log::warn!("tokenizer failed at {error}; treating the input as text");
        vec![Spanned::new(Token::Text, 0, source.len())]
    })
}

/// A parsed page.
///
/// The document records only the top-level templates, since those are the
/// only structured blocks the extractor ever looks up.
#[derive(Clone, Debug)]
pub struct Document<'a> {
    /// Templates which are not nested inside another template, in source
    /// order.
    templates: Vec<Spanned<Template<'a>>>,
}

impl<'a> Document<'a> {
    /// Parses the top-level templates of `source`.
    ///
    /// Unterminated templates are not templates; their text is skipped over
    /// when looking for the next one, but templates nested inside them are
    /// still found.
    pub fn parse(source: &'a str) -> Self {
        let tokens = tokenize(source);

        let mut open = Vec::new();
        let mut complete = Vec::new();
        for (index, token) in tokens.iter().enumerate() {
            match token.node {
                Token::TemplateStart => open.push(index),
                Token::TemplateEnd => {
                    if let Some(start) = open.pop() {
                        complete.push((start, index));
                    }
                }
                _ => {}
            }
        }

        // Inner templates complete before their parents, so sort by position
        // and drop anything inside the last kept template.
        complete.sort_unstable_by_key(|&(start, _)| start);
        let mut outermost: Vec<(usize, usize)> = Vec::new();
        for (start, end) in complete {
            if outermost.last().is_none_or(|&(_, last_end)| start > last_end) {
                outermost.push((start, end));
            }
        }

        let templates = outermost
            .into_iter()
            .map(|(start, end)| {
                let (open, close) = (tokens[start].span, tokens[end].span);
                let inner = Span::new(open.end, close.start);
                let template = Template::parse(source, &tokens[start + 1..end], inner);
                Spanned::new(template, open.start, close.end)
            })
            .collect();

        Self { templates }
    }

    /// All top-level templates, in source order.
    #[inline]
    pub fn templates(&self) -> &[Spanned<Template<'a>>] {
        &self.templates
    }

    /// Finds the first top-level template whose normalised name is one of
    /// `names`. Names are compared using [`normalize_name`].
    pub fn find_template<N>(&self, names: &[N]) -> Option<&Spanned<Template<'a>>>
    where
        N: AsRef<str>,
    {
        self.templates
            .iter()
            .find(|template| names.iter().any(|name| template.is_named(name.as_ref())))
    }

    /// Returns true if a top-level template with one of `names` exists.
    pub fn has_template<N>(&self, names: &[N]) -> bool
    where
        N: AsRef<str>,
    {
        self.find_template(names).is_some()
    }
}

/// A template transclusion.
///
/// ```wikitext
/// {{Infobox food|name=Pavlova|main_ingredient=[[Meringue]]}}
///   ^^^^^^^^^^^^ ^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^
///   name         argument     argument
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Template<'a> {
    /// The raw template name, including any whitespace and comments.
    pub name: &'a str,
    /// The template arguments, in source order.
    pub arguments: Vec<Spanned<Argument<'a>>>,
}

impl<'a> Template<'a> {
    /// Parses a template from the `tokens` between its braces, which cover
    /// `inner` in `source`.
    fn parse(source: &'a str, tokens: &[Spanned<Token>], inner: Span) -> Self {
        let mut parts = Vec::new();
        let mut first = 0;
        let mut part_start = inner.start;
        for pipe in top_level(tokens, Token::Pipe) {
            let span = Span::new(part_start, tokens[pipe].span.start);
            parts.push((span, &tokens[first..pipe]));
            first = pipe + 1;
            part_start = tokens[pipe].span.end;
        }
        parts.push((Span::new(part_start, inner.end), &tokens[first..]));

        let mut parts = parts.into_iter();
        let name = parts.next().map_or("", |(span, _)| span.text(source));
        let arguments = parts
            .map(|(span, tokens)| Argument::parse(source, tokens, span))
            .collect();

        Self { name, arguments }
    }

    /// The normalised template name.
    pub fn normalized_name(&self) -> String {
        normalize_name(self.name)
    }

    /// Returns true if the normalised name of this template equals the
    /// normalised form of `name`.
    pub fn is_named(&self, name: &str) -> bool {
        self.normalized_name() == normalize_name(name)
    }

    /// Finds a named argument. Like MediaWiki, when an argument is given more
    /// than once, the last one wins.
    pub fn argument(&self, name: &str) -> Option<&Spanned<Argument<'a>>> {
        self.arguments
            .iter()
            .rev()
            .find(|argument| argument.name.is_some_and(|own| own == name))
    }

    /// Iterates over the positional (unnamed) arguments.
    pub fn positional(&self) -> impl Iterator<Item = &Spanned<Argument<'a>>> {
        self.arguments
            .iter()
            .filter(|argument| argument.name.is_none())
    }
}

/// A template argument.
///
/// ```wikitext
/// {{Template|name = value|positional}}
///            ^^^^^^^^^^^^ ^^^^^^^^^^
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Argument<'a> {
    /// The trimmed argument name, if this is a named argument.
    pub name: Option<&'a str>,
    /// The raw argument value.
    pub value: &'a str,
}

impl<'a> Argument<'a> {
    /// Parses the argument made of `tokens`, which cover `span` in `source`.
    fn parse(source: &'a str, tokens: &[Spanned<Token>], span: Span) -> Spanned<Self> {
        let node = match top_level(tokens, Token::Equals).next() {
            Some(index) => {
                let equals = tokens[index].span;
                Self {
                    name: Some(Span::new(span.start, equals.start).text(source).trim()),
                    value: Span::new(equals.end, span.end).text(source),
                }
            }
            None => Self {
                name: None,
                value: span.text(source),
            },
        };
        Spanned::new(node, span.start, span.end)
    }

    /// The argument value with surrounding whitespace removed.
    #[inline]
    pub fn trimmed_value(&self) -> &'a str {
        self.value.trim()
    }
}

/// The body of a wikilink, without the surrounding brackets.
///
/// ```wikitext
/// [[Sugar#Refined|refined sugar]]
///   ^^^^^^^^^^^^^ ^^^^^^^^^^^^^
///   target        content
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Link<'a> {
    /// The raw link target.
    pub target: &'a str,
    /// The raw link text, if a pipe was present.
    pub content: Option<&'a str>,
}

impl<'a> Link<'a> {
    /// Splits a wikilink body into its target and content.
    pub fn parse(body: &'a str) -> Self {
        parser::wikitext::link(body).unwrap_or(Self {
            target: body,
            content: None,
        })
    }

    /// The title part of the target, without any leading colon, fragment, or
    /// surrounding whitespace.
    pub fn title(&self) -> &'a str {
        let target = self.target.trim();
        let target = target.strip_prefix(':').unwrap_or(target);
        target
            .split_once('#')
            .map_or(target, |(title, _)| title)
            .trim()
    }
}

/// Normalises a template name for comparison: comments are removed,
/// underscores become spaces, runs of whitespace collapse to one space, and
/// ASCII letters are lowercased.
pub fn normalize_name(name: &str) -> String {
    let without_comments = tokenize(name)
        .into_iter()
        .filter(|token| token.node != Token::Comment)
        .map(|token| token.span.text(name))
        .collect::<String>();

    let mut out = String::with_capacity(without_comments.len());
    for word in without_comments
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
    {
        if !out.is_empty() {
            out.push(' ');
        }
        out += word;
    }
    out.make_ascii_lowercase();
    out
}

/// Returns the indices of the `delimiter` tokens in `tokens` which are not
/// nested inside a template or wikilink.
fn top_level(tokens: &[Spanned<Token>], delimiter: Token) -> impl Iterator<Item = usize> + '_ {
    let mut braces = 0_usize;
    let mut brackets = 0_usize;
    tokens
        .iter()
        .enumerate()
        .filter_map(move |(index, token)| {
            match token.node {
                Token::TemplateStart => braces += 1,
                Token::TemplateEnd => braces = braces.saturating_sub(1),
                Token::LinkStart => brackets += 1,
                Token::LinkEnd => brackets = brackets.saturating_sub(1),
                node if node == delimiter && braces == 0 && brackets == 0 => return Some(index),
                _ => {}
            }
            None
        })
}
