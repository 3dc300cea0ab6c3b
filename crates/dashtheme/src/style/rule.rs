//! Selectors, declarations and style rules.
//!
//! # Selector Syntax
//!
//! ```text
//! selector := family [ "." variant ] [ ":" state ]
//! list     := selector { "," selector }
//! ```
//!
//! - `button` targets the button in its base state
//! - `button:hover` targets the hovered button
//! - `alert` targets every alert kind; `alert.error` only error alerts
//! - `heading.h1, heading.h2` targets two heading levels
//!
//! # Specificity
//!
//! When several rules match a widget, they are applied from least to most
//! specific, and in source order among equals, so the last applied value wins:
//!
//! 1. base-state rules before state rules (`button` before `button:hover`)
//! 2. family-wide rules before variant rules (`alert` before `alert.error`)
//! 3. earlier rules before later ones

use std::fmt;
use std::str::FromStr;

use cssparser::{ParseError, ParseErrorKind, Parser, ParserInput, Token};

use super::property::Property;
use super::value::{describe_basic, PropertyValue};
use crate::widget::{InteractionState, WidgetCategory, WidgetFamily};

/// One widget/state pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector {
    family: WidgetFamily,
    category: Option<WidgetCategory>,
    state: InteractionState,
}

/// How specific a matching selector is. Higher applies later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    state_specific: bool,
    variant_specific: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectorError(String);

impl Selector {
    /// A selector for one category in one state.
    pub fn new(category: WidgetCategory, state: InteractionState) -> Self {
        Selector {
            family: category.family(),
            category: Some(category),
            state,
        }
    }

    /// A selector for every category of a family.
    pub fn family(family: WidgetFamily, state: InteractionState) -> Self {
        Selector {
            family,
            category: family.sole_category(),
            state,
        }
    }

    /// Parses a comma-separated selector list.
    pub fn parse_list(text: &str) -> Result<Vec<Selector>, String> {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        parser
            .parse_entirely(|p| p.parse_comma_separated(|one| parse_selector(one)))
            .map_err(|err| match err.kind {
                ParseErrorKind::Custom(SelectorError(message)) => message,
                ParseErrorKind::Basic(kind) => describe_basic(&kind),
            })
    }

    pub fn widget_family(&self) -> WidgetFamily {
        self.family
    }

    /// The targeted category, or `None` for a family-wide selector.
    pub fn category(&self) -> Option<WidgetCategory> {
        self.category
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Categories this selector applies to.
    pub fn categories(&self) -> Vec<WidgetCategory> {
        match self.category {
            Some(category) => vec![category],
            None => self.family.categories().collect(),
        }
    }

    /// Returns the specificity if the selector applies to `category` in `state`.
    ///
    /// Base-state selectors apply to every state; state selectors only to
    /// their own state.
    pub fn matches(&self, category: WidgetCategory, state: InteractionState) -> Option<Specificity> {
        if self.family != category.family() {
            return None;
        }
        if self.category.is_some_and(|c| c != category) {
            return None;
        }
        if !self.state.is_default() && self.state != state {
            return None;
        }
        Some(self.specificity())
    }

    /// The rank this selector carries wherever it matches.
    pub fn specificity(&self) -> Specificity {
        Specificity {
            state_specific: !self.state.is_default(),
            variant_specific: self.family.has_variants() && self.category.is_some(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(category) => write!(f, "{}", category)?,
            None => write!(f, "{}", self.family)?,
        }
        if !self.state.is_default() {
            write!(f, ":{}", self.state)?;
        }
        Ok(())
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut list = Selector::parse_list(s)?;
        match list.len() {
            1 => Ok(list.remove(0)),
            n => Err(format!("expected one selector, found {}", n)),
        }
    }
}

fn parse_selector<'i, 't>(
    input: &mut Parser<'i, 't>,
) -> Result<Selector, ParseError<'i, SelectorError>> {
    let family_name = input.expect_ident()?.clone();
    let family = WidgetFamily::from_str(&family_name)
        .map_err(|e| input.new_custom_error(SelectorError(e)))?;

    let mut category = family.sole_category();
    let mut variant_seen = false;
    let mut state = InteractionState::Default;
    let mut state_seen = false;

    loop {
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Delim('.') if !variant_seen && !state_seen => {
                let variant = input.expect_ident()?.clone();
                category = Some(
                    family
                        .variant(&variant)
                        .map_err(|e| input.new_custom_error(SelectorError(e)))?,
                );
                variant_seen = true;
            }
            Token::Colon if !state_seen => {
                let name = input.expect_ident()?.clone();
                state = InteractionState::from_str(&name)
                    .map_err(|e| input.new_custom_error(SelectorError(e)))?;
                state_seen = true;
            }
            Token::WhiteSpace(_) => {
                // Descendant combinators are not supported; only trailing space.
                input.expect_exhausted()?;
                break;
            }
            other => return Err(input.new_unexpected_token_error(other)),
        }
    }

    Ok(Selector {
        family,
        category,
        state,
    })
}

/// A property assignment with its resolved literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub(crate) property: Property,
    pub(crate) value: PropertyValue,
    pub(crate) literal: String,
}

impl Declaration {
    pub fn property(&self) -> Property {
        self.property
    }

    /// The value as written, token references included.
    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    /// The value with every token reference replaced by its literal.
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

/// A selector list paired with property assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub(crate) selector_text: String,
    pub(crate) selectors: Vec<Selector>,
    pub(crate) declarations: Vec<Declaration>,
}

impl StyleRule {
    /// The selector list as written.
    pub fn selector_text(&self) -> &str {
        &self.selector_text
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// The specificity of the most specific selector matching the target.
    pub fn specificity_for(
        &self,
        category: WidgetCategory,
        state: InteractionState,
    ) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter_map(|s| s.matches(category, state))
            .max()
    }
}
