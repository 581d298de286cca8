//! Lists of code point ranges, as given on the command line: comma separated
//! items that are either a single code point or an inclusive range `A-B`.
//! Code points are decimal or `U+` hex.

use crate::{
    error::{FontError, FontResult},
    unicode::{cp_to_string, parse_cp},
};

const SEPARATOR: u8 = b',';

/// Inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpRange {
    pub first: u32,
    pub last: u32,
}

impl CpRange {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub const fn single(cp: u32) -> Self {
        Self::new(cp, cp)
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.first..=self.last
    }
}

fn skip_whitespace(bytes: &[u8], pos: usize) -> usize {
    pos + bytes[pos..]
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count()
}

fn char_at(s: &str, pos: usize) -> char {
    s.get(pos..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or_default()
}

fn parse_range_cp(s: &str, pos: usize) -> FontResult<(u32, usize)> {
    match parse_cp(&s[pos..]) {
        Some((cp, len)) => Ok((cp, pos + len)),
        None => {
            let token = s[pos..]
                .split(|c: char| c == char::from(SEPARATOR) || c.is_ascii_whitespace())
                .next()
                .unwrap_or_default();

            Err(FontError::validation(format!(
                "Invalid code point specifier \"{}\"",
                token
            )))
        }
    }
}

/// Parses a range list. Whitespace around items and empty items are
/// ignored; ranges aren't sorted or merged.
pub fn parse(s: &str) -> FontResult<Vec<CpRange>> {
    let bytes = s.as_bytes();
    let mut pos = 0;
    let mut ranges = Vec::new();

    loop {
        pos = skip_whitespace(bytes, pos);

        match bytes.get(pos) {
            None => break,
            Some(&SEPARATOR) => {
                pos += 1;
                continue;
            }
            Some(_) => {}
        }

        let (first, next) = parse_range_cp(s, pos)?;
        pos = skip_whitespace(bytes, next);

        match bytes.get(pos) {
            None | Some(&SEPARATOR) => {
                ranges.push(CpRange::single(first));
                continue;
            }
            Some(b'-') => pos += 1,
            Some(_) => {
                return Err(FontError::validation(format!(
                    "Expected \"-\" after the range start, but \"{}\" found",
                    char_at(s, pos)
                )))
            }
        }

        pos = skip_whitespace(bytes, pos);
        if matches!(bytes.get(pos), None | Some(&SEPARATOR)) {
            return Err(FontError::validation("Unexpected end of the range"));
        }

        let (last, next) = parse_range_cp(s, pos)?;
        if first > last {
            return Err(FontError::validation(format!(
                "Range start > range end ({} > {})",
                cp_to_string(first),
                cp_to_string(last)
            )));
        }

        ranges.push(CpRange::new(first, last));

        pos = skip_whitespace(bytes, next);
        if !matches!(bytes.get(pos), None | Some(&SEPARATOR)) {
            return Err(FontError::validation(format!(
                "Unexpected character at the end of the range: \"{}\"",
                char_at(s, pos)
            )));
        }
    }

    Ok(ranges)
}

/// Sorts ranges and merges the ones that overlap or touch
pub fn compress(ranges: &mut Vec<CpRange>) {
    if ranges.len() < 2 {
        return;
    }

    ranges.sort_unstable_by_key(|range| range.first);

    let mut cur_idx = 0;
    for next_idx in 1..ranges.len() {
        let next = ranges[next_idx];
        let cur = &mut ranges[cur_idx];

        if cur.last.saturating_add(1) < next.first {
            cur_idx += 1;
            ranges[cur_idx] = next;
        } else if cur.last < next.last {
            cur.last = next.last;
        }
    }

    ranges.truncate(cur_idx + 1);
}
