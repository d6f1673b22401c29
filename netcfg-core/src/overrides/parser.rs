//! Line parser for override sources.
//!
//! Each non-blank line is `key = value`, optionally followed by a `#` comment.
//! Values are integers (decimal or `0x` hex, optionally negative), `true` /
//! `false`, double-quoted strings, or bare names.

use core::fmt;

use winnow::ascii::{dec_int, hex_uint, space0};
use winnow::combinator::{alt, delimited, eof, opt, preceded, terminated};
use winnow::prelude::*;
use winnow::token::{rest, take_till, take_while};

/// Lexical value as written in the source.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RawValue<'a> {
    Integer(i64),
    Boolean(bool),
    Text(&'a str),
    Name(&'a str),
}

/// One `key = value` assignment.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Assignment<'a> {
    pub key: &'a str,
    pub value: RawValue<'a>,
}

/// Line that is not a `key = value` assignment.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SyntaxError {
    /// 1-based column where parsing stopped.
    pub column: usize,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected `key = value` (column {})", self.column)
    }
}

/// Parses a single source line. Blank and comment-only lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Assignment<'_>>, SyntaxError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let indent = line.len() - line.trim_start().len();

    terminated(assignment, (space0, opt(comment), eof))
        .parse(trimmed)
        .map(Some)
        .map_err(|error| SyntaxError {
            column: indent + error.offset() + 1,
        })
}

fn assignment<'a>(input: &mut &'a str) -> ModalResult<Assignment<'a>> {
    let key = key.parse_next(input)?;
    (space0, '=', space0).parse_next(input)?;
    let value = value.parse_next(input)?;
    Ok(Assignment { key, value })
}

fn key<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.').parse_next(input)
}

fn value<'a>(input: &mut &'a str) -> ModalResult<RawValue<'a>> {
    alt((
        quoted.map(RawValue::Text),
        integer.map(RawValue::Integer),
        name.map(|word: &'a str| match word {
            "true" => RawValue::Boolean(true),
            "false" => RawValue::Boolean(false),
            other => RawValue::Name(other),
        }),
    ))
    .parse_next(input)
}

fn quoted<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited('"', take_till(0.., '"'), '"').parse_next(input)
}

fn integer(input: &mut &str) -> ModalResult<i64> {
    alt((hex_integer, dec_int)).parse_next(input)
}

fn hex_integer(input: &mut &str) -> ModalResult<i64> {
    let negative = opt('-').parse_next(input)?.is_some();
    let magnitude: u32 = preceded(alt(("0x", "0X")), hex_uint).parse_next(input)?;
    let magnitude = i64::from(magnitude);
    Ok(if negative { -magnitude } else { magnitude })
}

fn name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn comment<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded('#', rest).parse_next(input)
}
