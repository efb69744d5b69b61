//! A frobo compilation error

use frobo_ast_parsing::lexer::LexError;
use frobo_ast_parsing::parser::SyntaxError;
use frobo_tokens::location::{Located, Location};
use frobo_tokens::Diagnostic;
use itertools::Itertools as _;
use std::io;
use thiserror::Error;

/// A problem found in source text, either while lexing or while parsing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceDiagnostic {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl Located for SourceDiagnostic {
    fn location(&self) -> Location {
        match self {
            SourceDiagnostic::Lex(e) => e.location(),
            SourceDiagnostic::Syntax(e) => e.location(),
        }
    }
}

impl Diagnostic for SourceDiagnostic {
    fn message(&self) -> String {
        match self {
            SourceDiagnostic::Lex(e) => e.message(),
            SourceDiagnostic::Syntax(e) => e.message(),
        }
    }

    fn suggestion(&self) -> Option<&str> {
        match self {
            SourceDiagnostic::Lex(e) => e.suggestion(),
            SourceDiagnostic::Syntax(e) => e.suggestion(),
        }
    }
}

/// The kind of error
#[derive(Debug, Error)]
pub enum FroboCErrorKind {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{}", .0.iter().join("\n"))]
    Diagnostics(Vec<SourceDiagnostic>),
    #[error("source is {size} bytes, more than the maximum of {max} bytes")]
    TooLarge { size: usize, max: usize },
}

impl From<Vec<SourceDiagnostic>> for FroboCErrorKind {
    fn from(value: Vec<SourceDiagnostic>) -> Self {
        FroboCErrorKind::Diagnostics(value)
    }
}

/// An error occurred while attempting to compile frobo source
#[derive(Debug, Error)]
#[error(transparent)]
pub struct FroboCError(#[from] FroboCErrorKind);

impl FroboCError {
    /// Gets the kind of this error
    pub fn kind(&self) -> &FroboCErrorKind {
        &self.0
    }

    /// The diagnostics that caused this error, if it was caused by problems in the source
    pub fn diagnostics(&self) -> &[SourceDiagnostic] {
        match &self.0 {
            FroboCErrorKind::Diagnostics(diagnostics) => diagnostics,
            _ => &[],
        }
    }
}

impl From<io::Error> for FroboCError {
    fn from(value: io::Error) -> Self {
        Self(FroboCErrorKind::from(value))
    }
}

impl From<Vec<SourceDiagnostic>> for FroboCError {
    fn from(value: Vec<SourceDiagnostic>) -> Self {
        Self(FroboCErrorKind::from(value))
    }
}

/// A type alias for general results in froboc
pub type FroboCResult<T> = Result<T, FroboCError>;
