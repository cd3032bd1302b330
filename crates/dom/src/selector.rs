//! Selector parsing.
//!
//! Supported: type (`div`), universal (`*`), `#id`, `.class`, `[attr]`,
//! `[attr=value]` (quoted or bare), compounds of those, the descendant
//! combinator (whitespace) and comma-separated lists. Anything else is an
//! [`DomError::UnsupportedSelector`].

use core::iter::Peekable;
use core::str::{Chars, FromStr};

use crate::document::Element;
use crate::error::{DomError, DomResult};

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Complex>,
}

/// Compounds joined by descendant combinators, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Complex {
    pub(crate) compounds: Vec<Compound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

impl Selector {
    pub fn parse(input: &str) -> DomResult<Self> {
        let unsupported = || DomError::UnsupportedSelector(input.to_string());
        let mut chars = input.chars().peekable();
        let mut alternatives = Vec::new();

        loop {
            let complex = parse_complex(&mut chars).ok_or_else(unsupported)?;
            alternatives.push(complex);
            match chars.next() {
                None => break,
                Some(',') => continue,
                Some(_) => return Err(unsupported()),
            }
        }

        Ok(Self { alternatives })
    }

    pub(crate) fn alternatives(&self) -> &[Complex] {
        &self.alternatives
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Compound {
    pub(crate) fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match (element.attr(&a.name), &a.value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        })
    }
}

/// Parse compounds until `,` or end of input. Stops *before* the comma.
fn parse_complex(chars: &mut Peekable<Chars<'_>>) -> Option<Complex> {
    let mut compounds = Vec::new();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.peek() {
            None | Some(',') => break,
            Some(_) => compounds.push(parse_compound(chars)?),
        }
    }

    if compounds.is_empty() {
        return None;
    }
    Some(Complex { compounds })
}

fn parse_compound(chars: &mut Peekable<Chars<'_>>) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut universal = false;

    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                chars.next();
                compound.id = Some(parse_ident(chars)?);
            }
            '.' => {
                chars.next();
                compound.classes.push(parse_ident(chars)?);
            }
            '[' => {
                chars.next();
                compound.attrs.push(parse_attr(chars)?);
            }
            '*' if compound == Compound::default() && !universal => {
                chars.next();
                universal = true;
            }
            c if is_ident_char(c) && compound == Compound::default() && !universal => {
                compound.tag = Some(parse_ident(chars)?.to_ascii_lowercase());
            }
            c if c.is_whitespace() || c == ',' => break,
            _ => return None,
        }
    }

    if compound == Compound::default() && !universal {
        return None;
    }
    Some(compound)
}

fn parse_attr(chars: &mut Peekable<Chars<'_>>) -> Option<AttrMatch> {
    let name = parse_ident(chars)?;
    match chars.next()? {
        ']' => Some(AttrMatch { name, value: None }),
        '=' => {
            let value = match chars.peek()? {
                '"' | '\'' => {
                    let quote = chars.next()?;
                    let mut value = String::new();
                    loop {
                        match chars.next()? {
                            c if c == quote => break,
                            c => value.push(c),
                        }
                    }
                    value
                }
                _ => parse_ident(chars)?,
            };
            (chars.next()? == ']').then_some(AttrMatch {
                name,
                value: Some(value),
            })
        }
        _ => None,
    }
}

fn parse_ident(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    (!ident.is_empty()).then_some(ident)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
