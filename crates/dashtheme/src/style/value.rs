//! Property values with token references.
//!
//! A value is a run of literal text interleaved with `var(--token)`
//! references, as tokenized by `cssparser`:
//!
//! ```css
//! border-left: 5px solid var(--error-border);
//! ```
//!
//! parses into `[Literal("5px solid "), Token("error-border")]`. References
//! may sit inside other functions (`calc(var(--gap) * 2)`). Resolution
//! replaces each reference with the token's literal through a single lookup.
//!
//! A `var()` fallback (`var(--accent, #fff)`) is kept for CSS output but never
//! substitutes for a missing token: undefined references fail at load time.

use cssparser::{
    BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, SourcePosition, Token,
};

/// One piece of a property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuePart {
    /// Literal text, copied to the output as written.
    Literal(String),
    /// A `var(--name)` reference.
    Token {
        /// Token name without the `--` prefix.
        name: String,
        /// Fallback text from `var(--name, fallback)`, if any.
        fallback: Option<String>,
    },
}

/// A parsed property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    raw: String,
    parts: Vec<ValuePart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ValueError {
    NotCustomProperty(String),
    Unbalanced,
    Forbidden(&'static str),
}

impl PropertyValue {
    /// Parses a value as written in a theme document.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err("empty value".to_string());
        }

        let mut input = ParserInput::new(raw);
        let mut parser = Parser::new(&mut input);
        let mut parts = Vec::new();
        let mut segment_start = parser.position();

        collect_parts(&mut parser, &mut parts, &mut segment_start, true).map_err(describe_error)?;
        push_literal(&mut parts, parser.slice_from(segment_start));

        Ok(PropertyValue {
            raw: raw.to_string(),
            parts,
        })
    }

    /// A value made of literal text only.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        PropertyValue {
            parts: vec![ValuePart::Literal(text.clone())],
            raw: text,
        }
    }

    /// The value as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn parts(&self) -> &[ValuePart] {
        &self.parts
    }

    /// Names of all referenced tokens, in order of appearance.
    pub fn token_refs(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            ValuePart::Token { name, .. } => Some(name.as_str()),
            ValuePart::Literal(_) => None,
        })
    }

    pub fn has_tokens(&self) -> bool {
        self.token_refs().next().is_some()
    }

    /// If the whole value is one `var()` reference, returns its token name.
    pub fn sole_token(&self) -> Option<&str> {
        let mut token = None;
        for part in &self.parts {
            match part {
                ValuePart::Token { name, .. } if token.is_none() => token = Some(name.as_str()),
                ValuePart::Literal(text) if text.trim().is_empty() => {}
                _ => return None,
            }
        }
        token
    }

    /// Substitutes every reference through `lookup`.
    ///
    /// Returns the name of the first token `lookup` does not know.
    pub fn resolve<'a, F>(&self, lookup: F) -> Result<String, String>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut out = String::with_capacity(self.raw.len());
        for part in &self.parts {
            match part {
                ValuePart::Literal(text) => out.push_str(text),
                ValuePart::Token { name, .. } => {
                    out.push_str(lookup(name).ok_or_else(|| name.clone())?)
                }
            }
        }
        Ok(out.trim().to_string())
    }
}

/// Walks the value, splitting out `var()` references.
///
/// A value never ends a declaration or opens a rule body, so `;` and `{}`
/// are refused at any depth and `!` at the top level.
fn collect_parts<'i, 't>(
    input: &mut Parser<'i, 't>,
    parts: &mut Vec<ValuePart>,
    segment_start: &mut SourcePosition,
    top_level: bool,
) -> Result<(), ParseError<'i, ValueError>> {
    loop {
        let before = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };

        match token {
            Token::Function(ref name) if name.eq_ignore_ascii_case("var") => {
                push_literal(parts, input.slice(*segment_start..before));
                let part = input.parse_nested_block(parse_var)?;
                parts.push(part);
                *segment_start = input.position();
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                input.parse_nested_block(|nested| {
                    collect_parts(nested, parts, segment_start, false)
                })?;
            }
            Token::Semicolon => return Err(input.new_custom_error(ValueError::Forbidden(";"))),
            Token::CurlyBracketBlock => {
                return Err(input.new_custom_error(ValueError::Forbidden("{")));
            }
            Token::Delim('!') if top_level => {
                return Err(input.new_custom_error(ValueError::Forbidden("!")));
            }
            Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::CloseCurlyBracket
            | Token::BadString(_)
            | Token::BadUrl(_) => {
                return Err(input.new_custom_error(ValueError::Unbalanced));
            }
            _ => {}
        }
    }
}

fn parse_var<'i, 't>(input: &mut Parser<'i, 't>) -> Result<ValuePart, ParseError<'i, ValueError>> {
    let ident = input.expect_ident()?.clone();
    let name = match ident.strip_prefix("--") {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return Err(input.new_custom_error(ValueError::NotCustomProperty(ident.to_string())));
        }
    };

    let fallback = if input.try_parse(|i| i.expect_comma()).is_ok() {
        let start = input.position();
        let mut nested_start = start;
        collect_parts(input, &mut Vec::new(), &mut nested_start, false)?;
        let text = input.slice_from(start).trim();
        (!text.is_empty()).then(|| text.to_string())
    } else {
        None
    };

    input.expect_exhausted()?;
    Ok(ValuePart::Token { name, fallback })
}

fn push_literal(parts: &mut Vec<ValuePart>, text: &str) {
    if text.is_empty() {
        return;
    }
    match parts.last_mut() {
        Some(ValuePart::Literal(prev)) => prev.push_str(text),
        _ => parts.push(ValuePart::Literal(text.to_string())),
    }
}

fn describe_error(err: ParseError<'_, ValueError>) -> String {
    match err.kind {
        ParseErrorKind::Custom(ValueError::NotCustomProperty(name)) => {
            format!("var() expects a '--' token name, got '{}'", name)
        }
        ParseErrorKind::Custom(ValueError::Unbalanced) => "unbalanced or malformed value".to_string(),
        ParseErrorKind::Custom(ValueError::Forbidden(text)) => {
            format!("'{}' is not allowed in a value", text)
        }
        ParseErrorKind::Basic(kind) => describe_basic(&kind),
    }
}

/// Human-readable text for a `cssparser` basic error.
pub(crate) fn describe_basic(kind: &BasicParseErrorKind<'_>) -> String {
    match kind {
        BasicParseErrorKind::UnexpectedToken(token) => format!("unexpected {:?}", token),
        BasicParseErrorKind::EndOfInput => "unexpected end of input".to_string(),
        BasicParseErrorKind::AtRuleInvalid(name) => format!("unsupported at-rule '@{}'", name),
        BasicParseErrorKind::QualifiedRuleInvalid => "invalid rule".to_string(),
        other => format!("invalid syntax ({:?})", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<&'static str> {
        match name {
            "primary-color" => Some("#4CAF50"),
            "error-border" => Some("#F44336"),
            "gap" => Some("8px"),
            _ => None,
        }
    }

    #[test]
    fn test_parse_plain_literal() {
        let value = PropertyValue::parse("white").unwrap();
        assert_eq!(value.parts(), &[ValuePart::Literal("white".to_string())]);
        assert!(!value.has_tokens());
    }

    #[test]
    fn test_parse_single_token() {
        let value = PropertyValue::parse("var(--primary-color)").unwrap();
        assert_eq!(value.sole_token(), Some("primary-color"));
        assert_eq!(value.resolve(lookup).unwrap(), "#4CAF50");
    }

    #[test]
    fn test_parse_token_inside_shorthand() {
        let value = PropertyValue::parse("5px solid var(--error-border)").unwrap();
        assert_eq!(value.sole_token(), None);
        assert_eq!(
            value.token_refs().collect::<Vec<_>>(),
            vec!["error-border"]
        );
        assert_eq!(value.resolve(lookup).unwrap(), "5px solid #F44336");
    }

    #[test]
    fn test_parse_token_inside_function() {
        let value = PropertyValue::parse("calc(var(--gap) * 2)").unwrap();
        assert_eq!(value.resolve(lookup).unwrap(), "calc(8px * 2)");
    }

    #[test]
    fn test_parse_fallback_is_recorded() {
        let value = PropertyValue::parse("var(--accent, #fff)").unwrap();
        assert_eq!(
            value.parts(),
            &[ValuePart::Token {
                name: "accent".to_string(),
                fallback: Some("#fff".to_string()),
            }]
        );
    }

    #[test]
    fn test_resolve_reports_missing_token() {
        let value = PropertyValue::parse("var(--accent, #fff)").unwrap();
        assert_eq!(value.resolve(lookup), Err("accent".to_string()));
    }

    #[test]
    fn test_parse_rejects_non_custom_var() {
        let err = PropertyValue::parse("var(color)").unwrap_err();
        assert!(err.contains("'--'"), "{}", err);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(PropertyValue::parse("   ").is_err());
    }

    #[test]
    fn test_parse_rejects_unbalanced() {
        assert!(PropertyValue::parse("1px)").is_err());
    }

    #[test]
    fn test_parse_rejects_declaration_break() {
        let err = PropertyValue::parse("1rem; display: none").unwrap_err();
        assert!(err.contains("';'"), "{}", err);
        assert!(PropertyValue::parse("calc(1px; 2px)").is_err());
    }

    #[test]
    fn test_parse_rejects_block_and_bang() {
        assert!(PropertyValue::parse("red } body { color: blue").is_err());
        assert!(PropertyValue::parse("{ color: blue }").is_err());
        assert!(PropertyValue::parse("red !important").is_err());
        assert!(PropertyValue::parse("var(--gap, 1px; color: red)").is_err());
    }

    #[test]
    fn test_parse_allows_bang_in_string() {
        let value = PropertyValue::parse("\"Wow!\"").unwrap();
        assert_eq!(value.raw(), "\"Wow!\"");
    }

    #[test]
    fn test_two_tokens() {
        let value = PropertyValue::parse("var(--gap) var(--gap)").unwrap();
        assert_eq!(value.token_refs().count(), 2);
        assert_eq!(value.resolve(lookup).unwrap(), "8px 8px");
    }
}
