use frobo_common::nom_helpers::{is_identifier_char, recognize_decimal, recognize_identifier};
use frobo_tokens::token::TokenKind;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_while};
use nom::character::complete::{char, satisfy, space0};
use nom::combinator::{all_consuming, consumed, map, map_parser, not, peek, recognize, rest, value};
use nom::error::{context, VerboseError};
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;

type Result<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Parses a single token from the start of `src`, which must not start with insignificant
/// whitespace. Returns the kind and the text of the token.
pub fn parse_token(src: &str) -> Result<(TokenKind, &str)> {
    context(
        "token",
        alt((
            parse_newline,
            parse_string,
            parse_number,
            parse_word,
            parse_operator,
            parse_punctuation,
        )),
    )(src)
}

/// Spaces, tabs and carriage returns
pub fn parse_insignificant(src: &str) -> Result<&str> {
    context(
        "insignificant",
        take_while(|c: char| c == ' ' || c == '\t' || c == '\r'),
    )(src)
}

fn parse_newline(src: &str) -> Result<(TokenKind, &str)> {
    context("newline", map(tag("\n"), |nl| (TokenKind::Nl, nl)))(src)
}

fn parse_string(src: &str) -> Result<(TokenKind, &str)> {
    context(
        "string",
        map(
            delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
            |contents| (TokenKind::String, contents),
        ),
    )(src)
}

fn parse_number(src: &str) -> Result<(TokenKind, &str)> {
    context(
        "number",
        map(recognize_decimal, |number| (TokenKind::Number, number)),
    )(src)
}

fn parse_word(src: &str) -> Result<(TokenKind, &str)> {
    let (rest, (word, kind)) = context(
        "word",
        preceded(
            peek(satisfy(|c| c.is_ascii_alphabetic() || c == '_')),
            consumed(map_parser(recognize_identifier, |p| {
                alt((parse_keyword, parse_identifier))(p)
            })),
        ),
    )(src)?;
    if kind == TokenKind::Else {
        if let Ok((rest, _)) = parse_if_after_else(rest) {
            return Ok((rest, (TokenKind::ElseIf, "else if")));
        }
    }
    Ok((rest, (kind, word)))
}

/// The `if` of an `else if`, which must not be the start of a longer identifier
fn parse_if_after_else(src: &str) -> Result<&str> {
    context(
        "else if",
        recognize(tuple((
            space0,
            tag("if"),
            not(satisfy(is_identifier_char)),
        ))),
    )(src)
}

fn all_consuming_tag(src: &str) -> impl FnMut(&str) -> Result<&str> + '_ {
    move |i| all_consuming(tag(src))(i)
}

fn parse_keyword(src: &str) -> Result<TokenKind> {
    context(
        "keyword",
        alt((
            alt((
                value(TokenKind::Component, all_consuming_tag("component")),
                value(TokenKind::State, all_consuming_tag("state")),
                value(TokenKind::Computed, all_consuming_tag("computed")),
                value(TokenKind::Function, all_consuming_tag("function")),
                value(TokenKind::If, all_consuming_tag("if")),
                value(TokenKind::Else, all_consuming_tag("else")),
                value(TokenKind::For, all_consuming_tag("for")),
                value(TokenKind::In, all_consuming_tag("in")),
                value(TokenKind::Props, all_consuming_tag("props")),
                value(TokenKind::OnMount, all_consuming_tag("onMount")),
                value(TokenKind::OnUpdate, all_consuming_tag("onUpdate")),
                value(TokenKind::Fetch, all_consuming_tag("fetch")),
                value(TokenKind::Watch, all_consuming_tag("watch")),
            )),
            alt((
                value(TokenKind::Return, all_consuming_tag("return")),
                value(TokenKind::Async, all_consuming_tag("async")),
                value(TokenKind::Await, all_consuming_tag("await")),
                value(TokenKind::Import, all_consuming_tag("import")),
                value(TokenKind::Export, all_consuming_tag("export")),
                value(TokenKind::From, all_consuming_tag("from")),
            )),
            alt((
                value(TokenKind::Boolean, all_consuming_tag("true")),
                value(TokenKind::Boolean, all_consuming_tag("false")),
                value(TokenKind::Null, all_consuming_tag("null")),
            )),
        )),
    )(src)
}

fn parse_identifier(src: &str) -> Result<TokenKind> {
    context("identifier", value(TokenKind::Identifier, rest))(src)
}

fn parse_operator(src: &str) -> Result<(TokenKind, &str)> {
    context(
        "operator",
        consumed_kind(alt((
            value(TokenKind::EqEq, tag("==")),
            value(TokenKind::Neq, tag("!=")),
            value(TokenKind::Gte, tag(">=")),
            value(TokenKind::Lte, tag("<=")),
            value(TokenKind::And, tag("&&")),
            value(TokenKind::Or, tag("||")),
            value(TokenKind::Assign, char('=')),
            value(TokenKind::Bang, char('!')),
            value(TokenKind::Gt, char('>')),
            value(TokenKind::Lt, char('<')),
            value(TokenKind::Plus, char('+')),
            value(TokenKind::Minus, char('-')),
            value(TokenKind::Star, char('*')),
            value(TokenKind::Slash, char('/')),
        ))),
    )(src)
}

fn parse_punctuation(src: &str) -> Result<(TokenKind, &str)> {
    context(
        "punctuation",
        consumed_kind(alt((
            value(TokenKind::LBrace, char('{')),
            value(TokenKind::RBrace, char('}')),
            value(TokenKind::LBracket, char('[')),
            value(TokenKind::RBracket, char(']')),
            value(TokenKind::LParen, char('(')),
            value(TokenKind::RParen, char(')')),
            value(TokenKind::Comma, char(',')),
            value(TokenKind::Colon, char(':')),
            value(TokenKind::Dot, char('.')),
        ))),
    )(src)
}

/// Pairs the kind produced by a parser with the text it consumed
fn consumed_kind<'a, P>(parser: P) -> impl FnMut(&'a str) -> Result<'a, (TokenKind, &'a str)>
where
    P: FnMut(&'a str) -> Result<'a, TokenKind>,
{
    map(consumed(parser), |(text, kind)| (kind, text))
}
