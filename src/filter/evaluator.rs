//! Condition evaluator

use serde_json::{Number, Value};

use super::ast::{Condition, Operator, Segment};
use crate::error::EvalError;

/// Result of evaluating one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The document re-serialized in compact canonical form
    pub document: String,
    pub matched: bool,
}

/// Parse a raw JSON document and evaluate the condition against it
pub fn evaluate(condition: &Condition, document: &[u8]) -> Result<Evaluation, EvalError> {
    let value: Value = serde_json::from_slice(document)?;
    let matched = matches(condition, &value)?;

    Ok(Evaluation {
        // Display writes compact JSON; a `Value` always has string keys so it cannot fail
        document: value.to_string(),
        matched,
    })
}

/// Evaluate the condition against an already parsed document
pub fn matches(condition: &Condition, document: &Value) -> Result<bool, EvalError> {
    check_path(document, condition.path().segments(), condition)
}

fn check_path(
    current: &Value,
    segments: &[Segment],
    condition: &Condition,
) -> Result<bool, EvalError> {
    let Some((segment, rest)) = segments.split_first() else {
        return check_value(current, condition);
    };

    match current {
        // a key applied to an array is applied to each of its elements
        Value::Array(items) if segment.key.is_some() => {
            any_match(items, |item| check_path(item, segments, condition))
        }
        _ => match step(current, segment) {
            Some(next) => check_path(next, rest, condition),
            // missing field never matches
            None => Ok(false),
        },
    }
}

fn step<'a>(current: &'a Value, segment: &Segment) -> Option<&'a Value> {
    let mut value = match &segment.key {
        Some(key) => current.as_object()?.get(key)?,
        None => current,
    };

    for &index in &segment.indices {
        value = value.as_array()?.get(index)?;
    }
    Some(value)
}

fn check_value(value: &Value, condition: &Condition) -> Result<bool, EvalError> {
    match value {
        Value::String(s) => check_string(s, condition),
        Value::Number(n) => check_number(n, condition),
        Value::Bool(b) => check_bool(*b, condition),
        Value::Null => Ok(false),
        Value::Array(items) => any_match(items, |item| check_value(item, condition)),
        Value::Object(_) => Err(EvalError::UnsupportedType {
            path: condition.path().to_string(),
            value_type: "object",
        }),
    }
}

fn any_match<F>(items: &[Value], mut check: F) -> Result<bool, EvalError>
where
    F: FnMut(&Value) -> Result<bool, EvalError>,
{
    for item in items {
        if check(item)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn check_string(actual: &str, condition: &Condition) -> Result<bool, EvalError> {
    compare(actual, condition.value(), condition.operator(), "string")
}

fn check_number(actual: &Number, condition: &Condition) -> Result<bool, EvalError> {
    let expected = condition
        .value()
        .parse::<f64>()
        .map_err(|_| type_mismatch(condition, "number"))?;
    // only `None` under serde_json's arbitrary_precision, which is not enabled
    let actual = actual.as_f64().unwrap_or(f64::NAN);

    compare(&actual, &expected, condition.operator(), "number")
}

fn check_bool(actual: bool, condition: &Condition) -> Result<bool, EvalError> {
    let expected =
        parse_bool(condition.value()).ok_or_else(|| type_mismatch(condition, "bool"))?;

    match condition.operator() {
        Operator::Eq => Ok(actual == expected),
        Operator::NotEq => Ok(actual != expected),
        operator => Err(EvalError::UnsupportedOperator {
            operator,
            value_type: "boolean",
        }),
    }
}

fn compare<T>(
    actual: &T,
    expected: &T,
    operator: Operator,
    value_type: &'static str,
) -> Result<bool, EvalError>
where
    T: PartialOrd + ?Sized,
{
    match operator {
        Operator::Eq => Ok(actual == expected),
        Operator::NotEq => Ok(actual != expected),
        Operator::Lt => Ok(actual < expected),
        Operator::Lte => Ok(actual <= expected),
        Operator::Gt => Ok(actual > expected),
        Operator::Gte => Ok(actual >= expected),
        Operator::Like | Operator::NotLike => Err(EvalError::UnsupportedOperator {
            operator,
            value_type,
        }),
    }
}

/// Boolean literals in the spellings the command line tool has always accepted
fn parse_bool(literal: &str) -> Option<bool> {
    match literal {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn type_mismatch(condition: &Condition, expected: &'static str) -> EvalError {
    EvalError::TypeMismatch {
        value: condition.value().to_string(),
        expected,
    }
}
