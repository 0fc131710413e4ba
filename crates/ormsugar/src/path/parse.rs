//! Dotted path text.
//!
//! - Names are separated by `.` and match `[A-Za-z0-9_]+` without `__`
//! - `[i]` adds a positional segment, `[a:b]` a range segment (`a_b`)
//! - The empty string is the root
//!
//! ```ignore
//! let p = ormsugar::Path::parse("user.tags[0:1].name")?;
//! assert_eq!(p.get_path(), "user__tags__0_1__name");
//! ```

use super::Path;
use crate::error::{SugarError, SugarResult};
use crate::lookup::SEPARATOR;
use std::iter::Peekable;
use std::str::Chars;

/// One parsed segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Name(String),
    Index(i64),
    Range(i64, i64),
}

impl Segment {
    pub(crate) fn apply(self, path: &Path) -> Path {
        match self {
            Segment::Name(name) => path.child(name),
            Segment::Index(i) => path.index(i),
            Segment::Range(start, end) => path.index(start..end),
        }
    }
}

pub(crate) fn parse_segments(s: &str) -> SugarResult<Vec<Segment>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut chars = s.chars().peekable();

    loop {
        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c == '_' || c.is_ascii_alphanumeric() {
                name.push(c);
                chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(match chars.peek() {
                Some(c) => SugarError::invalid_path(format!("Expected a segment name, got '{c}'")),
                None => SugarError::invalid_path("Trailing '.' in path"),
            });
        }
        if name.contains(SEPARATOR) {
            return Err(SugarError::invalid_path(format!(
                "Segment '{name}' contains the '{SEPARATOR}' separator"
            )));
        }
        segments.push(Segment::Name(name));

        while chars.peek() == Some(&'[') {
            chars.next();
            segments.push(parse_index(&mut chars)?);
        }

        match chars.next() {
            None => break,
            Some('.') => {}
            Some(c) => {
                return Err(SugarError::invalid_path(format!(
                    "Expected '.' between segments, got '{c}'"
                )));
            }
        }
    }

    Ok(segments)
}

/// Parse the rest of `[i]` or `[a:b]` after the opening bracket.
fn parse_index(chars: &mut Peekable<Chars<'_>>) -> SugarResult<Segment> {
    let start = parse_int(chars)?;
    match chars.next() {
        Some(']') => Ok(Segment::Index(start)),
        Some(':') => {
            let end = parse_int(chars)?;
            match chars.next() {
                Some(']') => Ok(Segment::Range(start, end)),
                _ => Err(SugarError::invalid_path("Unclosed index bracket")),
            }
        }
        Some(c) => Err(SugarError::invalid_path(format!(
            "Invalid character in index: '{c}'"
        ))),
        None => Err(SugarError::invalid_path("Unclosed index bracket")),
    }
}

fn parse_int(chars: &mut Peekable<Chars<'_>>) -> SugarResult<i64> {
    let mut digits = String::new();
    if chars.peek() == Some(&'-') {
        digits.push('-');
        chars.next();
    }
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(c);
            chars.next();
        } else {
            break;
        }
    }
    digits
        .parse()
        .map_err(|_| SugarError::invalid_path(format!("Invalid index '{digits}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(
            parse_segments("user.age").unwrap(),
            vec![Segment::Name("user".into()), Segment::Name("age".into())]
        );
        assert!(parse_segments("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_indexes() {
        assert_eq!(
            parse_segments("tags[0][-1:2]").unwrap(),
            vec![
                Segment::Name("tags".into()),
                Segment::Index(0),
                Segment::Range(-1, 2),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "user.",
            ".user",
            "user..age",
            "user age",
            "user__age",
            "tags[",
            "tags[x]",
            "tags[1:]",
            "tags[1:2",
            "tags[1;2]",
        ] {
            let err = parse_segments(bad).unwrap_err();
            assert!(matches!(err, SugarError::InvalidPath(_)), "{bad}: {err}");
        }
    }
}
