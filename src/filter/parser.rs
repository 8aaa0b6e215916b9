//! Condition parser
//!
//! Parses expressions like:
//! - `attr = value`
//! - `user.age >= 21`
//! - `attr.'sub attr'.items[0].id != "some id"`

use super::ast::{Condition, Operator, Path, Segment};
use crate::error::ConditionError;

const QUOTES: [char; 2] = ['\'', '"'];
const OPERATOR_CHARS: [char; 5] = ['!', '=', '<', '>', '~'];

/// Parse a condition string into a `Condition`
pub fn parse(input: &str) -> Result<Condition, ConditionError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ConditionError::expression("empty expression"));
    }

    let start = find_operator(input)?.ok_or_else(|| {
        ConditionError::expression(format!("no operator found in '{}'", input))
    })?;

    let operator = match_operator(&input[start..])?;
    let end = start + operator.as_str().len();

    let raw_path = input[..start].trim();
    if raw_path.is_empty() {
        return Err(ConditionError::expression(format!(
            "empty path before operator {}",
            operator
        )));
    }
    let segments = parse_path(raw_path)?;

    Ok(Condition {
        path: Path::new(raw_path.to_string(), segments),
        operator,
        value: unquote(input[end..].trim()).to_string(),
    })
}

/// Byte offset of the first operator character outside quoted path segments
fn find_operator(input: &str) -> Result<Option<usize>, ConditionError> {
    let mut quote: Option<char> = None;
    let mut at_segment_start = true;

    for (i, c) in input.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }

        if OPERATOR_CHARS.contains(&c) {
            return Ok(Some(i));
        }

        if at_segment_start && QUOTES.contains(&c) {
            quote = Some(c);
            at_segment_start = false;
        } else if c == '.' {
            at_segment_start = true;
        } else if !c.is_whitespace() {
            at_segment_start = false;
        }
    }

    if let Some(q) = quote {
        return Err(ConditionError::expression(format!(
            "unterminated {} in path",
            q
        )));
    }
    Ok(None)
}

/// Longest known operator at the start of `input`; whatever follows is the value
///
/// `<=` is never read as `<` followed by a stray `=`, while `x =<5` reads as
/// `=` with the value `<5`.
fn match_operator(input: &str) -> Result<Operator, ConditionError> {
    Operator::TOKENS
        .into_iter()
        .find(|op| input.starts_with(op.as_str()))
        .ok_or_else(|| {
            let end = input
                .find(|c: char| !OPERATOR_CHARS.contains(&c))
                .unwrap_or(input.len());
            ConditionError::InvalidOperator(input[..end].to_string())
        })
}

fn parse_path(raw: &str) -> Result<Vec<Segment>, ConditionError> {
    let mut segments = Vec::new();
    let mut rest = raw;

    loop {
        let (segment, tail) = parse_segment(rest)?;
        segments.push(segment);
        match tail.strip_prefix('.') {
            Some(next) => rest = next,
            None => break,
        }
    }

    Ok(segments)
}

/// Parse one segment, returning it with the unparsed tail (empty or starting at `.`)
fn parse_segment(input: &str) -> Result<(Segment, &str), ConditionError> {
    let input = input.trim_start();

    let (key, rest) = match input.chars().next().filter(|c| QUOTES.contains(c)) {
        Some(q) => {
            let body = &input[q.len_utf8()..];
            let close = body.find(q).ok_or_else(|| {
                ConditionError::expression(format!("unterminated {} in path", q))
            })?;
            (Some(&body[..close]), &body[close + q.len_utf8()..])
        }
        None => {
            let end = input.find(['.', '[']).unwrap_or(input.len());
            let key = input[..end].trim_end();
            ((!key.is_empty()).then_some(key), &input[end..])
        }
    };

    let (indices, rest) = parse_indices(rest)?;
    let rest = rest.trim_start();

    if !rest.is_empty() && !rest.starts_with('.') {
        return Err(ConditionError::expression(format!(
            "unexpected '{}' in path",
            rest
        )));
    }
    let segment = match key {
        Some(key) => Segment::indexed(key, indices),
        None if !indices.is_empty() => Segment::indices(indices),
        None => return Err(ConditionError::expression("empty path segment")),
    };

    Ok((segment, rest))
}

fn parse_indices(mut input: &str) -> Result<(Vec<usize>, &str), ConditionError> {
    let mut indices = Vec::new();

    while let Some(body) = input.strip_prefix('[') {
        let close = body
            .find(']')
            .ok_or_else(|| ConditionError::expression("unterminated [ in path"))?;
        let digits = body[..close].trim();
        let index = digits
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| digits.parse::<usize>().ok())
            .flatten()
            .ok_or_else(|| {
                ConditionError::expression(format!("invalid array index '{}'", &body[..close]))
            })?;
        indices.push(index);
        input = &body[close + 1..];
    }

    Ok((indices, input))
}

/// Strip one layer of matching surrounding quotes
fn unquote(value: &str) -> &str {
    for q in QUOTES {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
