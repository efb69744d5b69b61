//! nom helpers

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric1, char, digit1};
use nom::combinator::{opt, recognize};
use nom::error::ParseError;
use nom::multi::many0_count;
use nom::sequence::{pair, preceded};
use nom::IResult;

/// Recognizes `[A-Za-z_][A-Za-z0-9_]*`
pub fn recognize_identifier<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

/// Recognizes an unsigned integer or decimal number. A `.` only belongs to the number when
/// at least one digit follows it, so `3.` recognizes `3`.
pub fn recognize_decimal<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(pair(digit1, opt(preceded(char('.'), digit1))))(input)
}

/// Checks if a character can continue an identifier
#[inline]
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
