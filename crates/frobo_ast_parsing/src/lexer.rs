//! Responsible with converting source text into a token sequence

use crate::lexer::token_parsing::{parse_insignificant, parse_token};
use frobo_tokens::location::Location;
use frobo_tokens::token::{Token, TokenKind};
use frobo_tokens::LocatedError;
use thiserror::Error;
use tracing::{debug, instrument, trace};

mod token_parsing;

/// An error found while lexing
pub type LexError = LocatedError<LexErrorKind>;

/// The kind of a [LexError]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
}

/// Converts source text into tokens.
///
/// Lexing never fails. Unexpected characters and unterminated strings are recorded and can be
/// retrieved with [Lexer::errors] after [Lexer::tokenize] returns.
#[derive(Debug)]
pub struct Lexer<'s> {
    source: &'s str,
    offset: usize,
    line: usize,
    column: usize,
    errors: Vec<LexError>,
}

impl<'s> Lexer<'s> {
    /// Creates a new lexer over some source text
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
            errors: vec![],
        }
    }

    /// Tokenizes the whole source. The returned tokens always end with exactly one
    /// [TokenKind::Eof] token.
    ///
    /// Calling this again starts over from the beginning of the source.
    #[instrument(level = "debug", skip_all)]
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.offset = 0;
        self.line = 1;
        self.column = 1;
        self.errors.clear();

        let mut tokens = vec![];
        loop {
            self.skip_insignificant();
            let source = self.source;
            let remaining = &source[self.offset..];
            if remaining.is_empty() {
                break;
            }
            if let Some(token) = self.next_token(remaining) {
                trace!("lexed {token:?}");
                tokens.push(token);
            }
        }
        tokens.push(Token::new(TokenKind::Eof, "", self.location(0)));
        debug!(
            "lexed {} tokens with {} errors",
            tokens.len(),
            self.errors.len()
        );
        tokens
    }

    /// Gets the errors found during the last call to [Lexer::tokenize]
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    fn next_token(&mut self, remaining: &'s str) -> Option<Token> {
        match parse_token(remaining) {
            Ok((rest, (kind, text))) => {
                let consumed = &remaining[..remaining.len() - rest.len()];
                let location = self.location(consumed.chars().count());
                self.advance(consumed);
                Some(Token::new(kind, text, location))
            }
            Err(_) if remaining.starts_with('"') => {
                // everything up to the end of input belongs to the string
                let location = self.location(remaining.chars().count());
                self.errors.push(
                    LexError::new(LexErrorKind::UnterminatedString, location)
                        .with_suggestion("add a closing '\"'"),
                );
                self.advance(remaining);
                Some(Token::new(TokenKind::String, &remaining[1..], location))
            }
            Err(_) => {
                let c = remaining.chars().next()?;
                let error = LexError::new(LexErrorKind::UnexpectedCharacter(c), self.location(1));
                let error = match c {
                    '&' => error.with_suggestion("use '&&' for a logical and"),
                    '|' => error.with_suggestion("use '||' for a logical or"),
                    _ => error,
                };
                trace!("skipping unexpected character {c:?}");
                self.errors.push(error);
                self.advance(&remaining[..c.len_utf8()]);
                None
            }
        }
    }

    fn skip_insignificant(&mut self) {
        let source = self.source;
        let remaining = &source[self.offset..];
        if let Ok((_, skipped)) = parse_insignificant(remaining) {
            self.advance(skipped);
        }
    }

    fn location(&self, length: usize) -> Location {
        Location::new(self.line, self.column, length)
    }

    /// Moves past some consumed text, keeping the line and column up to date
    fn advance(&mut self, consumed: &str) {
        for c in consumed.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += consumed.len();
    }
}

/// Tokenizes some source text, returning the tokens and any errors found
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();
    (tokens, lexer.into_errors())
}

#[cfg(test)]
mod tests {
    use super::*;
    use frobo_tokens::location::Located;
    use test_log::test;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(Token::kind).collect()
    }

    #[test]
    fn test_lexer() {
        let (tokens, errors) = tokenize("component Counter {\n  state count = 0\n}");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Component,
                TokenKind::Identifier,
                TokenKind::LBrace,
                TokenKind::Nl,
                TokenKind::State,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Nl,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let (tokens, errors) = tokenize("");
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_line_and_column() {
        let (tokens, _) = tokenize("component\nstate count = 0");
        assert_eq!(tokens[0].location(), Location::new(1, 1, 9));
        assert_eq!(tokens[1].location().line(), 1);
        assert_eq!(tokens[2].location().line(), 2);
        assert_eq!(tokens[2].location().column(), 1);
        assert_eq!(tokens[4].location().column(), 13);
    }

    #[test]
    fn test_string_token() {
        let (tokens, _) = tokenize("\"hello\" \"world\"");
        assert_eq!(tokens[0].text(), "hello");
        assert_eq!(tokens[0].location().len(), 7);
        assert_eq!(tokens[1].text(), "world");
        assert_eq!(tokens[1].location().column(), 9);
    }

    #[test]
    fn test_backslash_is_literal() {
        let (tokens, _) = tokenize(r#""a\nb""#);
        assert_eq!(tokens[0].text(), r"a\nb");
    }

    #[test]
    fn test_numbers() {
        let (tokens, _) = tokenize("42 3.14 0 7.");
        let texts = tokens.iter().map(Token::text).collect::<Vec<_>>();
        assert_eq!(texts, vec!["42", "3.14", "0", "7", ".", ""]);
    }

    #[test]
    fn test_negative_number_is_two_tokens() {
        let (tokens, _) = tokenize("-5");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Minus, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("\"hello");
        let tokens = lexer.tokenize();
        assert_eq!(lexer.errors().len(), 1);
        assert_eq!(lexer.errors()[0].message(), "Unterminated string");
        assert_eq!(tokens[0].kind(), TokenKind::String);
        assert_eq!(tokens[0].text(), "hello");
        assert_eq!(tokens.last().map(Token::kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_unexpected_character() {
        let (tokens, errors) = tokenize("test @ value");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message().contains("Unexpected character"));
        assert_eq!(errors[0].location(), Location::new(1, 6, 1));
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_only_unexpected_characters() {
        let (tokens, errors) = tokenize("@@@");
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_hash_is_unexpected() {
        let (_, errors) = tokenize("#");
        assert_eq!(errors[0].kind(), &LexErrorKind::UnexpectedCharacter('#'));
    }

    #[test]
    fn test_lone_ampersand_has_suggestion() {
        let (tokens, errors) = tokenize("a & b");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].suggestion().is_some_and(|s| s.contains("&&")));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_logical_operators() {
        let (tokens, _) = tokenize("a && b || !c");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Identifier,
                TokenKind::And,
                TokenKind::Identifier,
                TokenKind::Or,
                TokenKind::Bang,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_else_if_fusion() {
        let (tokens, _) = tokenize("} else if x {\n} else {");
        assert_eq!(tokens[1].kind(), TokenKind::ElseIf);
        assert_eq!(tokens[1].text(), "else if");
        assert_eq!(tokens[6].kind(), TokenKind::Else);
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let source = "component App {\n  text \"Hi {name}\" @\n}";
        let mut lexer = Lexer::new(source);
        let first = lexer.tokenize();
        let first_errors = lexer.errors().to_vec();
        let second = lexer.tokenize();
        assert_eq!(first, second);
        assert_eq!(first_errors, lexer.errors());
    }

    #[test]
    fn test_crlf() {
        let (tokens, errors) = tokenize("a\r\nb");
        assert!(errors.is_empty());
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Identifier, TokenKind::Nl, TokenKind::Identifier, TokenKind::Eof]
        );
    }
}
