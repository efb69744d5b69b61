//! Errors produced while parsing

use frobo_tokens::location::Located;
use frobo_tokens::token::{Token, TokenKind};
use frobo_tokens::LocatedError;
use thiserror::Error;

/// Represents an error occurring during parsing
pub type SyntaxError = LocatedError<ErrorKind>;

/// The result of a parse that may fail
pub type SyntaxResult<T = ()> = Result<T, SyntaxError>;

/// [SyntaxError] kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Expected {expected} but got {found}")]
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },
    #[error("Unexpected token {kind} {text:?}")]
    UnexpectedToken { kind: TokenKind, text: String },
    #[error("Expected number, string, boolean, null, array, or object for state value. Got: {found} with value: {text:?}")]
    InvalidStateValue { found: TokenKind, text: String },
    #[error("Expected identifier, number, string, boolean, null or '(' in condition, got {0}")]
    InvalidCondition(TokenKind),
    #[error("Expected string, number or identifier for {0} value")]
    InvalidAttributeValue(String),
    #[error("Expected 'in' keyword")]
    ExpectedIn,
    #[error("Expected component or function after export, got {0}")]
    ExpectedDeclaration(TokenKind),
    #[error("Unclosed block, expected '}}' before end of input")]
    UnclosedBlock,
}

impl ErrorKind {
    /// Creates an error pointing at `token`
    pub fn at(self, token: &Token) -> SyntaxError {
        SyntaxError::new(self, token.location())
    }

    pub fn expected_token(expected: TokenKind, found: &Token) -> SyntaxError {
        let error = Self::ExpectedToken {
            expected,
            found: found.kind(),
        }
        .at(found);
        match expected {
            TokenKind::RBrace => error.with_suggestion("add a closing '}'"),
            TokenKind::RParen => error.with_suggestion("add a closing ')'"),
            TokenKind::RBracket => error.with_suggestion("add a closing ']'"),
            _ => error,
        }
    }

    pub fn unexpected_token(found: &Token) -> SyntaxError {
        Self::UnexpectedToken {
            kind: found.kind(),
            text: found.text().to_string(),
        }
        .at(found)
    }
}
