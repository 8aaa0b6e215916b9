// SPDX-License-Identifier: MIT

//! Parsed form of a filter condition

use std::fmt;
use std::str::FromStr;

use crate::error::ConditionError;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// =
    Eq,
    /// !=
    NotEq,
    /// <
    Lt,
    /// <=
    Lte,
    /// >
    Gt,
    /// >=
    Gte,
    /// ~ (reserved, no comparison defined)
    Like,
    /// !~ (reserved, no comparison defined)
    NotLike,
}

impl Operator {
    /// All operators, two-character tokens before their one-character prefixes
    pub const TOKENS: [Operator; 8] = [
        Operator::NotEq,
        Operator::NotLike,
        Operator::Lte,
        Operator::Gte,
        Operator::Eq,
        Operator::Lt,
        Operator::Gt,
        Operator::Like,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Like => "~",
            Operator::NotLike => "!~",
        }
    }

    /// Look up the operator written exactly as `token`
    pub fn from_token(token: &str) -> Option<Operator> {
        Self::TOKENS.into_iter().find(|op| op.as_str() == token)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a path: an optional object key followed by array indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Object key; `None` when the step only indexes into an array
    pub key: Option<String>,
    pub indices: Vec<usize>,
}

impl Segment {
    pub fn key(key: impl Into<String>) -> Self {
        Self::indexed(key, Vec::new())
    }

    pub fn indexed(key: impl Into<String>, indices: Vec<usize>) -> Self {
        Self {
            key: Some(key.into()),
            indices,
        }
    }

    /// A step like the leading `[0]` in `[0].id`
    pub fn indices(indices: Vec<usize>) -> Self {
        Self { key: None, indices }
    }
}

/// Dotted path into a document, kept both as written and as segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    raw: String,
    segments: Vec<Segment>,
}

impl Path {
    pub(crate) fn new(raw: String, segments: Vec<Segment>) -> Self {
        Self { raw, segments }
    }

    /// The path exactly as written in the condition, quotes included
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A parsed `<path> <operator> <value>` condition
///
/// Only [`super::parse`] builds conditions, so a value of this type always
/// has a non-empty path and an unquoted, trimmed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub(crate) path: Path,
    pub(crate) operator: Operator,
    pub(crate) value: String,
}

impl Condition {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.path, self.operator, self.value)
    }
}

impl FromStr for Condition {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse(s)
    }
}
