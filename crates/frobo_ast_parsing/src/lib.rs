#![doc = include_str!("../README.md")]

use crate::lexer::{LexError, Lexer};
use crate::parser::{Parser, SyntaxError};
use frobo_ast::Program;
use tracing::{debug, debug_span};

pub mod lexer;
pub mod parser;

/// The result of parsing some source text, along with everything that went wrong on the way
#[derive(Debug, Clone)]
pub struct Parsed {
    pub program: Program,
    pub lex_errors: Vec<LexError>,
    pub syntax_errors: Vec<SyntaxError>,
}

impl Parsed {
    /// Checks if no errors were found at all
    pub fn is_clean(&self) -> bool {
        self.lex_errors.is_empty() && self.syntax_errors.is_empty()
    }
}

/// Lexes and parses source text, never failing
pub fn parse_source(source: &str) -> Parsed {
    let _enter = debug_span!("parse_source", len = source.len()).entered();
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();
    let lex_errors = lexer.into_errors();

    let mut parser = Parser::new(tokens);
    let program = parser.parse();
    let syntax_errors = parser.into_errors();
    debug!(
        "parsed {} top level nodes with {} lexical and {} syntax errors",
        program.children.len(),
        lex_errors.len(),
        syntax_errors.len()
    );
    Parsed {
        program,
        lex_errors,
        syntax_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_parse_clean_source() {
        let parsed = parse_source("component App {\n  text \"Hi\"\n}");
        assert!(parsed.is_clean());
        assert_eq!(parsed.program.children.len(), 1);
    }

    #[test]
    fn test_errors_from_both_stages() {
        let parsed = parse_source("component App {\n  text \"Hi\" @\n}\n");
        // the lexer skips the bad character, so the parser never sees it
        assert_eq!(parsed.lex_errors.len(), 1);
        assert!(parsed.syntax_errors.is_empty());
        assert_eq!(parsed.program.children.len(), 1);
    }
}
