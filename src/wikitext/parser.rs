//! A parsing expression grammar for the parts of Wikitext the extractor reads.
//!
//! The grammar is flat. Template and wikilink delimiters are emitted as
//! separate tokens instead of being matched here, and nesting is resolved
//! afterwards with an explicit stack, so no input makes the parser recurse
//! more than a fixed number of rules deep.

use super::{
    EXTENSION_TAGS, Link, Token,
    codemap::{Span, Spanned},
};

peg::parser! { pub(super) grammar wikitext() for str {
    /// Splits a document into tokens. Every byte of the input belongs to
    /// exactly one token.
    pub rule tokens() -> Vec<Spanned<Token>>
    = t:token()*
    { t }

    /// Splits a wikilink body into its target and content.
    ///
    /// ```wikitext
    /// [[Sugar#Refined|refined sugar]]
    ///   ^^^^^^^^^^^^^ ^^^^^^^^^^^^^
    /// ```
    pub rule link() -> Link<'input>
    = target:$([^'|']*) content:("|" c:$([_]*) { c })?
    { Link { target, content } }

    /// The raw text of each top-level item of the first list in the input,
    /// without the list marker.
    ///
    /// ```wikitext
    /// * Flour
    /// ** Plain
    /// # Sugar
    /// ```
    pub rule list_items() -> Vec<&'input str>
    = (!list_line() line() newline())*
      items:(list_line() ** newline())
      [_]*
    { items.into_iter().flatten().collect() }

    ///////////
    // Lists //
    ///////////

    /// A list line. Only depth-one items produce content.
    rule list_line() -> Option<&'input str>
    = list_char() nested:$(list_char())? content:$(line())
    { nested.is_none().then_some(content) }

    /// An unordered or ordered list marker.
    rule list_char()
    = ['*'|'#']

    /// The rest of the current line.
    rule line()
    = [^'\r'|'\n']*

    ////////////
    // Tokens //
    ////////////

    /// A single token.
    rule token() -> Spanned<Token>
    = spanned(<token_kind()>)

    /// The kind of the next token. Extension tags take priority over
    /// everything else, since their content is never Wikitext.
    rule token_kind() -> Token
    = comment() { Token::Comment }
    / extension_tag() { Token::Extension }
    / html_tag() { Token::Tag }
    / "{{" { Token::TemplateStart }
    / "}}" { Token::TemplateEnd }
    / "[[" { Token::LinkStart }
    / "]]" { Token::LinkEnd }
    / "|" { Token::Pipe }
    / "=" { Token::Equals }
    / text() { Token::Text }

    /// A run of characters with no meaning to this grammar, or a single
    /// character which did not start any other token.
    rule text()
    = [^'{'|'}'|'['|']'|'|'|'='|'<']+
    / [_]

    /// An HTML comment. Unclosed comments extend to the end of the input.
    rule comment()
    = "<!--" ([^'-']+ / !"-->" [_])* ("-->" / eof())

    //////////
    // Tags //
    //////////

    /// An extension tag and its content, which is opaque.
    ///
    /// ```wikitext
    /// <ref name="a">Smith | Jones</ref>
    /// ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
    /// ```
    ///
    /// An extension tag without a matching end tag is only a start tag.
    rule extension_tag()
    = "<" name:$(tag_name())
      &assert(is_extension_tag(name), "extension tag")
      attributes()
      ("/>" / ">" (!end_tag(name) [_])* end_tag(name))

    /// An end tag with the given name, in any case.
    rule end_tag(name: &str)
    = "</" end:$(tag_name())
      &assert(end.eq_ignore_ascii_case(name), "matching end tag")
      space_or_newline()* ">"

    /// A start or end HTML tag.
    ///
    /// ```wikitext
    /// <span class="x">a</span>
    /// ^^^^^^^^^^^^^^^^ ^^^^^^^
    /// ```
    rule html_tag()
    = "<" "/"? tag_name() attributes() "/"? ">"

    /// The tag name part of a tag.
    rule tag_name()
    = ['a'..='z'|'A'..='Z'] ['a'..='z'|'A'..='Z'|'0'..='9'|'-'|':'|'_']*

    /// Tag attributes, which must be separated from the name by whitespace.
    rule attributes()
    = (space_or_newline()+ (quoted() / !("/>" / ">") [_])*)?

    /// A quoted attribute value.
    rule quoted()
    = "\"" [^'"']* "\""
    / "'" [^'\'']* "'"

    ///////////
    // Utils //
    ///////////

    /// A newline.
    rule newline()
    = "\r"? "\n"

    /// Characters that match the PCRE "\s" class.
    rule space_or_newline()
    = [' '|'\t'|'\n'|'\r'|'\x0c']

    /// End of input.
    rule eof()
    = ![_]

    /// A lookahead that fails with `msg` unless `cond` holds.
    rule assert(cond: bool, msg: &'static str)
    = {? if cond { Ok(()) } else { Err(msg) } }

    /// Records the span of the given rule.
    rule spanned<T>(r: rule<T>) -> Spanned<T>
    = start:position!() node:r() end:position!()
    { Spanned { node, span: Span::new(start, end) } }
}}

/// Returns true if `name` is an extension tag, in any case.
fn is_extension_tag(name: &str) -> bool {
    EXTENSION_TAGS.contains(name.to_ascii_lowercase().as_str())
}
