//! A lexical token from a frobo source text

use crate::location::{Located, Location};
use std::fmt::{Debug, Formatter};

/// A lexical token.
///
/// The text of a string literal is its contents without the surrounding quotes, while the
/// location's length still covers the quotes.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    location: Location,
}

impl Token {
    /// Creates a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Gets the text of this token
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Checks if this token is of a given kind
    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})@{}", self.kind, self.text, self.location)
    }
}

impl Located for Token {
    fn location(&self) -> Location {
        self.location
    }
}

/// The kind for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Component,
    State,
    Computed,
    Function,
    If,
    Else,
    /// `else if`, fused into one token by the lexer
    ElseIf,
    For,
    In,
    Props,
    OnMount,
    OnUpdate,
    Fetch,
    Watch,
    Return,
    Async,
    Await,
    Import,
    Export,
    From,

    Identifier,
    String,
    Number,
    Boolean,
    Null,

    /// =
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Gt,
    Lt,
    Gte,
    Lte,
    /// ==
    EqEq,
    Neq,
    And,
    Or,
    Bang,

    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Colon,
    Dot,

    /// new line
    Nl,
    /// EOF, will only appear at the end of a token sequence
    Eof,
}

impl TokenKind {
    /// Is this one of the reserved words of the language
    pub fn is_keyword(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Component
                | State
                | Computed
                | Function
                | If
                | Else
                | ElseIf
                | For
                | In
                | Props
                | OnMount
                | OnUpdate
                | Fetch
                | Watch
                | Return
                | Async
                | Await
                | Import
                | Export
                | From
        )
    }

    /// Can this token appear where a name is expected, such as an attribute key
    pub fn is_word(&self) -> bool {
        self.is_keyword() || matches!(self, TokenKind::Identifier)
    }

    /// Is this a comparison operator
    pub fn is_comparison(&self) -> bool {
        use TokenKind::*;
        matches!(self, Gt | Lt | Gte | Lte | EqEq | Neq)
    }
}
