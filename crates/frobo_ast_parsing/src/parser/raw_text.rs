//! Re-joins token sequences into text.
//!
//! Function, hook and watcher bodies, computed expressions and call arguments are not parsed any
//! further. Their tokens are joined back together, keeping a space between two tokens exactly
//! when the source had whitespace between them, and string tokens get their quotes back.

use frobo_tokens::location::Located;
use frobo_tokens::token::{Token, TokenKind};
use itertools::Itertools;
use std::borrow::Cow;

/// Joins tokens on a single line of output. Newline tokens are dropped.
pub fn join_tokens(tokens: &[Token]) -> String {
    let mut buffer = String::new();
    let mut previous: Option<&Token> = None;
    for token in tokens.iter().filter(|t| !t.is(TokenKind::Nl)) {
        if previous.is_some_and(|prev| separated(prev, token)) {
            buffer.push(' ');
        }
        buffer.push_str(&token_source(token));
        previous = Some(token);
    }
    buffer
}

/// Joins the tokens of a block body, one statement per line. A `;` is placed after every
/// statement unless the line already ends in a way that continues onto the next line.
pub fn render_body(tokens: &[Token]) -> String {
    let lines = tokens
        .split(|t| t.is(TokenKind::Nl))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    let mut buffer = String::new();
    for (idx, line) in lines.iter().enumerate() {
        buffer.push_str(&join_tokens(line));
        if idx + 1 < lines.len() {
            let next_opens_with_close = lines[idx + 1]
                .first()
                .is_some_and(|t| t.is(TokenKind::RBrace));
            if continues_onto_next_line(line) || next_opens_with_close {
                buffer.push('\n');
            } else {
                buffer.push_str(";\n");
            }
        }
    }
    buffer
}

/// Splits tokens at top level commas, joining each part
pub fn split_arguments(tokens: &[Token]) -> Vec<String> {
    let mut depth = 0_usize;
    let mut parts = vec![vec![]];
    for token in tokens {
        match token.kind() {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                depth = depth.saturating_sub(1)
            }
            TokenKind::Comma if depth == 0 => {
                parts.push(vec![]);
                continue;
            }
            _ => {}
        }
        if let Some(part) = parts.last_mut() {
            part.push(token.clone());
        }
    }
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| join_tokens(part))
        .collect_vec()
}

/// How a token is written in source
fn token_source(token: &Token) -> Cow<'_, str> {
    if token.is(TokenKind::String) {
        Cow::Owned(format!("\"{}\"", token.text()))
    } else {
        Cow::Borrowed(token.text())
    }
}

/// Was there whitespace between two tokens in the source
fn separated(previous: &Token, next: &Token) -> bool {
    let prev = previous.location();
    let next = next.location();
    prev.line() != next.line() || next.column() > prev.column() + prev.len()
}

fn continues_onto_next_line(line: &[Token]) -> bool {
    use TokenKind::*;
    line.last().is_some_and(|last| {
        matches!(
            last.kind(),
            LBrace | RBrace | LParen | LBracket | Comma | Colon | Plus | Minus | Star | Slash
                | Assign | And | Or | Bang | Dot
        ) || last.kind().is_comparison()
    })
}
