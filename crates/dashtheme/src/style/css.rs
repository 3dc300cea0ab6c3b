//! CSS theme documents.
//!
//! A theme is written as a small CSS dialect: custom properties in `:root`
//! blocks define the token table, and every other rule targets widgets by
//! their logical names (see [`rule`](super::rule) for the selector syntax).
//!
//! ```css
//! :root {
//!     --primary-color: #4CAF50;
//!     --button-hover-color: #388E3C;
//!     --radius: 8px;
//! }
//!
//! button {
//!     background-color: var(--primary-color);
//!     color: white;
//!     border-radius: var(--radius);
//! }
//!
//! button:hover {
//!     background-color: var(--button-hover-color);
//! }
//! ```
//!
//! The tokenizer is `cssparser`, so comments, escapes and nested functions
//! behave as in a browser. What the dialect rejects:
//!
//! - at-rules (`@media`, `@import`): a theme is swapped whole, never by query
//! - nested rules
//! - custom properties outside `:root` and plain properties inside it
//!
//! `!important` is accepted and dropped; precedence comes from the explicit
//! cascade, not from flags.

use cssparser::{
    AtRuleParser, BasicParseError, CowRcStr, DeclarationParser, ParseError, ParseErrorKind, Parser,
    ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};

use super::rule::Selector;
use super::value::describe_basic;
use crate::error::{Result, ThemeError};
use crate::theme::ThemeBuilder;

/// Parses a CSS theme document into an unvalidated builder.
///
/// Syntax errors carry their line and column. Semantic checks (undefined
/// tokens, unknown properties) run in [`ThemeBuilder::build`].
pub fn parse_css(name: &str, css: &str) -> Result<ThemeBuilder> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    let mut document = ThemeDocumentParser {
        builder: ThemeBuilder::new(name),
    };

    let rules = cssparser::StyleSheetParser::new(&mut parser, &mut document);
    for result in rules {
        if let Err((err, _)) = result {
            return Err(to_theme_error(err));
        }
    }

    Ok(document.builder)
}

fn to_theme_error(err: ParseError<'_, DocumentError>) -> ThemeError {
    let message = match err.kind {
        ParseErrorKind::Custom(e) => e.message(),
        ParseErrorKind::Basic(kind) => describe_basic(&kind),
    };
    ThemeError::Parse {
        path: None,
        line: err.location.line + 1,
        column: err.location.column,
        message,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DocumentError {
    EmptySelector,
    InvalidSelector(String),
    PlainPropertyInRoot(String),
    TokenOutsideRoot(String),
}

impl DocumentError {
    fn message(&self) -> String {
        match self {
            DocumentError::EmptySelector => "rule has no selector".to_string(),
            DocumentError::InvalidSelector(message) => message.clone(),
            DocumentError::PlainPropertyInRoot(name) => {
                format!("':root' may only define tokens (--name), found '{}'", name)
            }
            DocumentError::TokenOutsideRoot(name) => {
                format!("token '{}' must be defined in ':root'", name)
            }
        }
    }
}

enum Prelude {
    Root,
    Widgets(String),
}

struct ThemeDocumentParser {
    builder: ThemeBuilder,
}

impl<'i> QualifiedRuleParser<'i> for ThemeDocumentParser {
    type Prelude = Prelude;
    type QualifiedRule = ();
    type Error = DocumentError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let is_root = input
            .try_parse(|i| {
                i.expect_colon()?;
                i.expect_ident_matching("root")?;
                i.expect_exhausted()
            })
            .is_ok();
        if is_root {
            return Ok(Prelude::Root);
        }

        let start = input.position();
        while input.next().is_ok() {}
        let text = input.slice_from(start).trim();

        if text.is_empty() {
            return Err(input.new_custom_error(DocumentError::EmptySelector));
        }
        if let Err(message) = Selector::parse_list(text) {
            return Err(input.new_custom_error(DocumentError::InvalidSelector(message)));
        }
        Ok(Prelude::Widgets(text.to_string()))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut decl_parser = DeclarationListParser {
            root: matches!(prelude, Prelude::Root),
        };
        let mut declarations = Vec::new();
        for item in RuleBodyParser::new(input, &mut decl_parser) {
            match item {
                Ok(declaration) => declarations.push(declaration),
                Err((err, _)) => return Err(err),
            }
        }

        match prelude {
            Prelude::Root => {
                for (name, value) in declarations {
                    self.builder.push_token(name, value);
                }
            }
            Prelude::Widgets(selector) => self.builder.push_rule(selector, declarations),
        }
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for ThemeDocumentParser {
    type Prelude = ();
    type AtRule = ();
    type Error = DocumentError;
}

struct DeclarationListParser {
    root: bool,
}

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = (String, String);
    type Error = DocumentError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let is_token = name.starts_with("--");
        if self.root && !is_token {
            return Err(input.new_custom_error(DocumentError::PlainPropertyInRoot(name.to_string())));
        }
        if !self.root && is_token {
            return Err(input.new_custom_error(DocumentError::TokenOutsideRoot(name.to_string())));
        }

        let start = input.position();
        let mut end = start;
        loop {
            if input.try_parse(important_suffix).is_ok() {
                break;
            }
            let opens_block = match input.next_including_whitespace_and_comments() {
                Ok(token) => matches!(
                    token,
                    Token::Function(_)
                        | Token::ParenthesisBlock
                        | Token::SquareBracketBlock
                        | Token::CurlyBracketBlock
                ),
                Err(_) => break,
            };
            if opens_block {
                input.parse_nested_block(|nested| {
                    while nested.next_including_whitespace_and_comments().is_ok() {}
                    Ok::<_, ParseError<'i, DocumentError>>(())
                })?;
            }
            end = input.position();
        }
        let value = input.slice(start..end).trim();

        Ok((name.to_string(), value.to_string()))
    }
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = DocumentError;
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = DocumentError;
}

impl<'i> RuleBodyItemParser<'i, (String, String), DocumentError> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Matches a trailing `!important` that ends the declaration.
fn important_suffix<'i>(input: &mut Parser<'i, '_>) -> std::result::Result<(), BasicParseError<'i>> {
    cssparser::parse_important(input)?;
    input.expect_exhausted()
}
