// SPDX-License-Identifier: MIT

//! Typed errors for condition parsing, document evaluation and stream filtering

use thiserror::Error;

use crate::filter::Operator;

/// Flat classification of every error the crate can return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidExpression,
    InvalidOperator,
    DocumentParse,
    TypeMismatch,
    UnsupportedOperator,
    UnsupportedType,
    Io,
    InteractiveInput,
}

/// Errors raised while turning a condition string into a `Condition`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    /// The input does not have the `<path> <operator> <value>` shape
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    /// An operator-shaped token that matches none of the known operators
    #[error("invalid operator: found operator {0}")]
    InvalidOperator(String),
}

/// Errors raised while evaluating a condition against one document
#[derive(Debug, Error)]
pub enum EvalError {
    /// The line is not a valid JSON document
    #[error("parse json error: {0}")]
    DocumentParse(#[from] serde_json::Error),

    /// The literal cannot be read as the type found in the document
    #[error("fail to parse '{value}' as {expected}")]
    TypeMismatch {
        value: String,
        expected: &'static str,
    },

    /// The operator has no meaning for the resolved value's type
    #[error("unsupported operator: passed {operator} for {value_type}")]
    UnsupportedOperator {
        operator: Operator,
        value_type: &'static str,
    },

    /// The path resolved to a value that cannot be compared
    #[error("unsupported type: {value_type} by path '{path}'")]
    UnsupportedType {
        path: String,
        value_type: &'static str,
    },
}

/// Top-level error for filtering a whole stream
#[derive(Debug, Error)]
pub enum StreamError {
    /// The condition string could not be parsed
    #[error("parse filter error: {0}")]
    Condition(#[from] ConditionError),

    /// A line failed to evaluate; `line` is 1-based
    #[error("process line {line} error: {source}")]
    Line { line: usize, source: EvalError },

    /// Reading input or writing output failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Standard input is a terminal instead of a pipe
    #[error("the command is intended to work with pipes")]
    InteractiveInput,
}

impl ConditionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidExpression(_) => ErrorKind::InvalidExpression,
            Self::InvalidOperator(_) => ErrorKind::InvalidOperator,
        }
    }

    pub(crate) fn expression(message: impl Into<String>) -> Self {
        Self::InvalidExpression(message.into())
    }
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DocumentParse(_) => ErrorKind::DocumentParse,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::UnsupportedOperator { .. } => ErrorKind::UnsupportedOperator,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
        }
    }
}

impl StreamError {
    /// Kind of the underlying error, looking through the line wrapper
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Condition(err) => err.kind(),
            Self::Line { source, .. } => source.kind(),
            Self::Io(_) => ErrorKind::Io,
            Self::InteractiveInput => ErrorKind::InteractiveInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_error_display() {
        let err = ConditionError::InvalidOperator("==".to_string());
        assert_eq!(err.to_string(), "invalid operator: found operator ==");
        assert_eq!(err.kind(), ErrorKind::InvalidOperator);
    }

    #[test]
    fn test_line_error_keeps_source_kind() {
        let err = StreamError::Line {
            line: 3,
            source: EvalError::TypeMismatch {
                value: "abc".to_string(),
                expected: "number",
            },
        };
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(
            err.to_string(),
            "process line 3 error: fail to parse 'abc' as number"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_stream_error_kinds() {
        let err = StreamError::InteractiveInput;
        assert_eq!(err.kind(), ErrorKind::InteractiveInput);
        assert_eq!(err.to_string(), "the command is intended to work with pipes");

        let err: StreamError = std::io::Error::other("broken pipe").into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "broken pipe");

        let err: StreamError = ConditionError::expression("empty expression").into();
        assert_eq!(err.kind(), ErrorKind::InvalidExpression);
        assert_eq!(
            err.to_string(),
            "parse filter error: invalid expression: empty expression"
        );
    }

    #[test]
    fn test_document_parse_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: EvalError = serde_err.into();
        assert_eq!(err.kind(), ErrorKind::DocumentParse);
    }
}
