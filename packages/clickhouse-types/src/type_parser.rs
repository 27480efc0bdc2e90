//! # ClickHouse Type Parser
//!
//! Recursive-descent parser turning a ClickHouse type string such as
//! `Nullable(Array(Decimal(18, 4)))` into a [`TypeNode`].
//!
//! Parsing works directly on the whitespace-stripped string:
//! - a bare name is looked up in the primitive vocabulary (the recursion base case);
//! - otherwise the string is matched against the construct table, a static list of
//!   `Keyword(` prefixes each paired with a builder;
//! - the builder receives the text between the prefix and the closing `)` and
//!   recurses into nested types through the splitter helpers.
//!
//! When several construct prefixes match, the longest one wins. The current
//! keywords never shadow each other because every prefix ends in `(`, but the
//! rule keeps dispatch independent of table order as the vocabulary grows.
//!
//! Parenthesis balance and nesting depth are checked once, up front, in a single
//! pass. Input nested deeper than [`MAX_NESTING_DEPTH`] levels is rejected with
//! `MalformedType` instead of recursing until the stack runs out.

use crate::errors::ParseError;
use crate::node::{PrimitiveType, TypeNode};
use crate::splitter::{is_balanced, split_padded, split_top_level};
use std::str::FromStr;
use tracing::trace;

/// Deepest parenthesis nesting `parse_type` accepts
pub const MAX_NESTING_DEPTH: usize = 256;

type Builder = fn(&str) -> Result<TypeNode, ParseError>;

/// A parameterised type keyword and the builder for its argument list
pub(crate) struct Construct {
    pub(crate) prefix: &'static str,
    builder: Builder,
}

pub(crate) static CONSTRUCTS: &[Construct] = &[
    Construct {
        prefix: "DateTime64(",
        builder: build_datetime64,
    },
    Construct {
        prefix: "Decimal(",
        builder: build_decimal,
    },
    Construct {
        prefix: "Decimal256(",
        builder: build_decimal256,
    },
    Construct {
        prefix: "FixedString(",
        builder: build_fixed_string,
    },
    Construct {
        prefix: "Array(",
        builder: build_array,
    },
    Construct {
        prefix: "Tuple(",
        builder: build_tuple,
    },
    Construct {
        prefix: "Map(",
        builder: build_map,
    },
    Construct {
        prefix: "Nullable(",
        builder: build_nullable,
    },
];

/// Finds the construct whose prefix is the longest one `text` starts with
pub(crate) fn find_construct(text: &str) -> Option<&'static Construct> {
    CONSTRUCTS
        .iter()
        .filter(|construct| text.starts_with(construct.prefix))
        .max_by_key(|construct| construct.prefix.len())
}

/// Parses a ClickHouse type string.
///
/// Whitespace between tokens is insignificant and removed before parsing.
pub fn parse_type(text: &str) -> Result<TypeNode, ParseError> {
    let normalized: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    check_nesting(&normalized)?;
    parse_normalized(&normalized)
}

/// Rejects unbalanced parentheses and nesting beyond [`MAX_NESTING_DEPTH`]
fn check_nesting(text: &str) -> Result<(), ParseError> {
    let mut depth: usize = 0;
    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(ParseError::malformed_type(
                        text,
                        format!("nesting deeper than {MAX_NESTING_DEPTH} levels"),
                    ));
                }
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    ParseError::malformed_type(text, "unbalanced parentheses")
                })?;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ParseError::malformed_type(text, "unbalanced parentheses"));
    }
    Ok(())
}

fn parse_normalized(text: &str) -> Result<TypeNode, ParseError> {
    if text.is_empty() {
        return Err(ParseError::malformed_type(text, "empty type string"));
    }

    if let Some(primitive) = PrimitiveType::from_name(text) {
        return Ok(TypeNode::Primitive(primitive));
    }

    let construct = find_construct(text)
        .ok_or_else(|| ParseError::malformed_type(text, "unknown type name"))?;

    let inner = text[construct.prefix.len()..]
        .strip_suffix(')')
        .ok_or_else(|| ParseError::malformed_type(text, "missing closing parenthesis"))?;

    trace!(construct = construct.prefix, inner, "Dispatching type construct");
    (construct.builder)(inner)
}

/// Parses a non-negative integer made only of ASCII digits
fn parse_unsigned<T: FromStr>(text: &str, what: &str) -> Result<T, ParseError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::malformed_type(
            text,
            format!("{what} must be a non-negative integer"),
        ));
    }
    text.parse::<T>()
        .map_err(|_| ParseError::malformed_type(text, format!("{what} is out of range")))
}

fn build_datetime64(inner: &str) -> Result<TypeNode, ParseError> {
    // The timezone is opaque, so `DateTime64(3,a)b(c)` must not pass as zone `a)b(c`
    if !is_balanced(inner) {
        return Err(ParseError::malformed_type(inner, "unbalanced parentheses"));
    }

    let params = split_padded(inner, 2)
        .map_err(|e| ParseError::malformed_type(inner, format!("DateTime64: {e}")))?;

    let (code, timezone) = match params.as_slice() {
        [code, timezone] => (code.unwrap_or_default(), *timezone),
        _ => {
            return Err(ParseError::malformed_type(
                inner,
                "DateTime64 expects a precision and an optional timezone",
            ))
        }
    };

    let mut digits = code.chars();
    let precision = match (digits.next(), digits.next()) {
        (Some(d @ '0'..='9'), None) => d as u8 - b'0',
        _ => {
            return Err(ParseError::malformed_type(
                code,
                "DateTime64 precision must be a single digit 0-9",
            ))
        }
    };

    if timezone == Some("") {
        return Err(ParseError::malformed_type(
            inner,
            "DateTime64 timezone must not be empty",
        ));
    }

    Ok(TypeNode::DateTime64 {
        precision,
        timezone: timezone.map(str::to_string),
    })
}

fn decimal_params(inner: &str, type_name: &str) -> Result<(u32, u32), ParseError> {
    let (precision, scale) = inner.split_once(',').ok_or_else(|| {
        ParseError::malformed_type(inner, format!("{type_name} expects precision and scale"))
    })?;
    Ok((
        parse_unsigned(precision, "precision")?,
        parse_unsigned(scale, "scale")?,
    ))
}

fn build_decimal(inner: &str) -> Result<TypeNode, ParseError> {
    let (precision, scale) = decimal_params(inner, "Decimal")?;
    Ok(TypeNode::Decimal { precision, scale })
}

fn build_decimal256(inner: &str) -> Result<TypeNode, ParseError> {
    let (precision, scale) = decimal_params(inner, "Decimal256")?;
    Ok(TypeNode::Decimal256 { precision, scale })
}

fn build_fixed_string(inner: &str) -> Result<TypeNode, ParseError> {
    Ok(TypeNode::FixedString(parse_unsigned(
        inner,
        "FixedString length",
    )?))
}

fn build_array(inner: &str) -> Result<TypeNode, ParseError> {
    Ok(TypeNode::Array(Box::new(parse_normalized(inner)?)))
}

fn build_tuple(inner: &str) -> Result<TypeNode, ParseError> {
    let elements = split_top_level(inner)
        .into_iter()
        .map(parse_normalized)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TypeNode::Tuple(elements))
}

fn build_map(inner: &str) -> Result<TypeNode, ParseError> {
    match split_top_level(inner).as_slice() {
        [key, value] => Ok(TypeNode::Map {
            key: Box::new(parse_normalized(key)?),
            value: Box::new(parse_normalized(value)?),
        }),
        segments => Err(ParseError::malformed_type(
            inner,
            format!(
                "Map expects a key and a value type, found {} arguments",
                segments.len()
            ),
        )),
    }
}

fn build_nullable(inner: &str) -> Result<TypeNode, ParseError> {
    Ok(TypeNode::Nullable(Box::new(parse_normalized(inner)?)))
}

impl FromStr for TypeNode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}
