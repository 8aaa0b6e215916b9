// SPDX-License-Identifier: MIT

//! Line-by-line filtering of a newline-delimited JSON stream

use serde::Serialize;
use std::io::{BufRead, Write};

use crate::error::StreamError;
use crate::filter::{evaluate, Condition};

/// How per-line errors are handled
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Drop lines that fail to evaluate instead of aborting the run
    pub skip_err_lines: bool,
}

/// Counters for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Non-blank lines read
    pub read: usize,
    pub matched: usize,
    pub skipped: usize,
}

/// Copy every line of `reader` that satisfies `condition` to `writer`
///
/// Lines are written in canonical JSON form, one per line. Blank lines are
/// ignored. The first failing line aborts the run with its 1-based line
/// number unless `options.skip_err_lines` is set.
pub fn filter_lines<R, W>(
    condition: &Condition,
    mut reader: R,
    mut writer: W,
    options: &FilterOptions,
) -> Result<FilterStats, StreamError>
where
    R: BufRead,
    W: Write,
{
    let mut stats = FilterStats::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = trim_line_end(&buf);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        stats.read += 1;

        match evaluate(condition, line) {
            Ok(result) => {
                if result.matched {
                    writeln!(writer, "{}", result.document)?;
                    stats.matched += 1;
                }
            }
            Err(e) if options.skip_err_lines => {
                log::warn!("Skipping line {}: {}", line_no, e);
                stats.skipped += 1;
            }
            Err(source) => {
                return Err(StreamError::Line {
                    line: line_no,
                    source,
                })
            }
        }
    }

    writer.flush()?;
    log::debug!(
        "Filter finished: {} read, {} matched, {} skipped",
        stats.read,
        stats.matched,
        stats.skipped
    );

    Ok(stats)
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::filter::parse;

    fn run(expr: &str, input: &str, skip: bool) -> Result<(String, FilterStats), StreamError> {
        let cond = parse(expr).unwrap();
        let mut out = Vec::new();
        let options = FilterOptions {
            skip_err_lines: skip,
        };
        let stats = filter_lines(&cond, input.as_bytes(), &mut out, &options)?;
        Ok((String::from_utf8(out).unwrap(), stats))
    }

    #[test]
    fn test_trim_line_end() {
        assert_eq!(trim_line_end(b"{}\r\n"), b"{}");
        assert_eq!(trim_line_end(b"{}\n"), b"{}");
        assert_eq!(trim_line_end(b"{}"), b"{}");
    }

    #[test]
    fn test_emits_only_matching_lines() {
        let input = "{\"age\": 30}\n{\"age\": 12}\n{\"name\": \"x\"}\n{\"age\": 21}";
        let (out, stats) = run("age >= 21", input, false).unwrap();
        assert_eq!(out, "{\"age\":30}\n{\"age\":21}\n");
        assert_eq!(
            stats,
            FilterStats {
                read: 4,
                matched: 2,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_blank_lines_ignored() {
        let (out, stats) = run("a = 1", "\n{\"a\": 1}\r\n   \n", false).unwrap();
        assert_eq!(out, "{\"a\":1}\n");
        assert_eq!(stats.read, 1);
    }

    #[test]
    fn test_error_aborts_with_line_number() {
        let input = "{\"a\": 1}\nnot json\n{\"a\": 1}\n";
        let err = run("a = 1", input, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DocumentParse);
        match err {
            StreamError::Line { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected Line error, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_err_lines() {
        let input = "{\"a\": 1}\nnot json\n{\"a\": \"abc\"}\n{\"a\": {}}\n{\"a\": 1}\n";
        let (out, stats) = run("a = 1", input, true).unwrap();
        assert_eq!(out, "{\"a\":1}\n{\"a\":1}\n");
        assert_eq!(
            stats,
            FilterStats {
                read: 5,
                matched: 2,
                skipped: 2
            }
        );
    }
}
