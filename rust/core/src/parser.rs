// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QDF line tokenizer
//!
//! Splits record lines into keyword, id prefix, orientation block and
//! trailing parameters. Zero-copy: every token borrows from the input.

use nom::{
    character::complete::{char, multispace0},
    combinator::all_consuming,
    multi::separated_list1,
    number::complete::double,
    sequence::delimited,
    IResult,
};
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Parameter list of a record; most records have fewer than 16 fields
pub type Fields<'a> = SmallVec<[&'a str; 16]>;

/// A record body split around its first balanced brace block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceSplit<'a> {
    /// Text before the opening brace (the id prefix)
    pub before: &'a str,
    /// The block itself, braces included
    pub block: &'a str,
    /// Text after the closing brace (trailing parameters)
    pub after: &'a str,
}

/// Find the first balanced `{...}` block in `input`
///
/// Only the first top-level block is extracted; braces in `after` are left
/// untouched.
pub fn split_brace_block(input: &str) -> Result<BraceSplit<'_>> {
    let bytes = input.as_bytes();
    let open = memchr::memchr(b'{', bytes).ok_or(Error::MissingBraceBlock)?;

    let mut depth = 1usize;
    let mut pos = open + 1;
    while let Some(offset) = memchr::memchr2(b'{', b'}', &bytes[pos..]) {
        let at = pos + offset;
        if bytes[at] == b'{' {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Ok(BraceSplit {
                    before: &input[..open],
                    block: &input[open..=at],
                    after: &input[at + 1..],
                });
            }
        }
        pos = at + 1;
    }

    Err(Error::UnbalancedBraces)
}

/// Split a comma-separated list, keeping `"..."` spans intact
///
/// Quote characters are kept in the emitted token. Tokens are trimmed and
/// empty trailing tokens are dropped.
pub fn split_quoted_csv(input: &str) -> Fields<'_> {
    let mut fields = Fields::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, b) in input.bytes().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => {
                fields.push(input[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(input[start..].trim());

    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Remove one pair of surrounding double quotes, if present
pub fn strip_quotes(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(token)
}

/// Parse number list: {1, -2.5, 3e2}
fn number_block(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(
        char('{'),
        separated_list1(
            char(','),
            delimited(multispace0, double, multispace0),
        ),
        char('}'),
    )(input)
}

/// Parse an orientation block into exactly seven finite numbers
pub fn parse_orientation_block(block: &str) -> Result<[f64; 7]> {
    let (_, values) = all_consuming(number_block)(block.trim())
        .map_err(|e| Error::MalformedOrientation(e.to_string()))?;

    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::MalformedOrientation(block.to_string()));
    }

    values
        .try_into()
        .map_err(|values: Vec<f64>| Error::OrientationArity(values.len()))
}

/// Classification of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// File header: `0, ... ;`
    Header,
    /// `//` or `#` comment
    Comment,
    /// Data line. `body` is everything after the keyword's comma with the
    /// trailing `;` removed.
    Record { keyword: &'a str, body: &'a str },
}

/// Classify a single line of QDF text
pub fn classify_line(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with("//") || line.starts_with('#') {
        return Line::Comment;
    }
    if line.starts_with("0,") && line.ends_with(';') {
        return Line::Header;
    }

    let line = line.strip_suffix(';').unwrap_or(line).trim_end();
    match line.split_once(',') {
        Some((keyword, body)) => Line::Record {
            keyword: keyword.trim(),
            body: body.trim(),
        },
        None => Line::Record {
            keyword: line,
            body: "",
        },
    }
}

/// A data line located by [`RecordScanner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// 1-based line number in the source text
    pub line_number: usize,
    pub keyword: &'a str,
    pub body: &'a str,
}

/// Fast record scanner - walks the text once, yielding data lines
/// and counting everything it skips
pub struct RecordScanner<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    skipped: usize,
}

impl<'a> RecordScanner<'a> {
    /// Create a new scanner
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().enumerate(),
            skipped: 0,
        }
    }

    /// Blank, header and comment lines passed over so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = RawRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            match classify_line(line) {
                Line::Record { keyword, body } => {
                    return Some(RawRecord {
                        line_number: index + 1,
                        keyword,
                        body,
                    })
                }
                Line::Blank | Line::Header | Line::Comment => self.skipped += 1,
            }
        }
        None
    }
}
