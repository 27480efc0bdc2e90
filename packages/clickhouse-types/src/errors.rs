use thiserror::Error;

/// Errors that can occur while parsing ClickHouse type strings and column lists
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The text matches no primitive or construct rule, or a numeric parameter is invalid
    #[error("Malformed ClickHouse type '{input}': {reason}")]
    MalformedType { input: String, reason: String },

    /// A column entry lacks the mandatory `name Type` separator
    #[error("Malformed field '{input}': {reason}")]
    MalformedField { input: String, reason: String },
}

impl ParseError {
    pub(crate) fn malformed_type(input: &str, reason: impl Into<String>) -> Self {
        ParseError::MalformedType {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_field(input: &str, reason: impl Into<String>) -> Self {
        ParseError::MalformedField {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// The offending input fragment
    pub fn input(&self) -> &str {
        match self {
            ParseError::MalformedType { input, .. } | ParseError::MalformedField { input, .. } => {
                input
            }
        }
    }
}

/// A flat parameter list had more segments than its grammar allows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected at most {expected} parameters, found {found}")]
pub struct ArityError {
    pub expected: usize,
    pub found: usize,
}
