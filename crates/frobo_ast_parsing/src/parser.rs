//! Recursive descent parser that builds the AST from a token sequence

use frobo_ast::{Node, Program};
use frobo_tokens::location::{Located, Location};
use frobo_tokens::token::{Token, TokenKind};
use tracing::{debug, instrument, trace};

mod component;
mod elements;
pub mod error;
mod expr;
mod items;
pub mod raw_text;

pub use error::{ErrorKind, SyntaxError, SyntaxResult};

/// Keywords that may only start a top level statement
const TOP_LEVEL_STARTERS: [TokenKind; 5] = [
    TokenKind::Component,
    TokenKind::Function,
    TokenKind::Async,
    TokenKind::Import,
    TokenKind::Export,
];

/// Creates a [Program] from a token sequence.
///
/// Parsing never fails as a whole. An error inside a top level statement abandons only that
/// statement; the error is recorded and parsing resumes at the next statement. Recorded errors
/// can be retrieved with [Parser::errors].
///
/// # Examples
/// ```
/// # use frobo_ast_parsing::lexer::tokenize;
/// # use frobo_ast_parsing::parser::Parser;
/// let (tokens, _) = tokenize("component App {\n  text \"Hi\"\n}");
/// let mut parser = Parser::new(tokens);
/// let program = parser.parse();
/// assert_eq!(program.children.len(), 1);
/// assert!(parser.errors().is_empty());
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    errors: Vec<SyntaxError>,
}

impl Parser {
    /// Creates a new parser. An end of file token is appended if `tokens` does not already end
    /// with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let location = tokens
                .last()
                .map(|t| {
                    let loc = t.location();
                    Location::new(loc.line(), loc.column() + loc.len(), 0)
                })
                .unwrap_or_else(|| Location::new(1, 1, 0));
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }
        Self {
            tokens,
            position: 0,
            errors: vec![],
        }
    }

    /// Parses the whole token sequence
    #[instrument(level = "debug", skip_all)]
    pub fn parse(&mut self) -> Program {
        self.position = 0;
        self.errors.clear();

        let mut children = vec![];
        loop {
            self.skip_newlines();
            if self.at_eof() {
                break;
            }
            let start = self.position;
            match self.parse_top_level() {
                Ok(node) => {
                    trace!("parsed top level {}", node.kind_name());
                    children.push(node);
                }
                Err(error) => {
                    debug!("recovering from syntax error: {error}");
                    self.errors.push(error);
                    self.recover(start);
                }
            }
        }
        debug!(
            "parsed {} top level statements with {} errors",
            children.len(),
            self.errors.len()
        );
        Program::new(children)
    }

    /// Gets the errors recorded during the last call to [Parser::parse]
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }

    fn parse_top_level(&mut self) -> SyntaxResult<Node> {
        match self.peek_kind() {
            TokenKind::Import => self.parse_import(),
            TokenKind::Export => self.parse_export(),
            TokenKind::Component | TokenKind::Function | TokenKind::Async => {
                self.parse_declaration()
            }
            _ => Err(ErrorKind::unexpected_token(self.peek())),
        }
    }

    /// Skips the statement that started at `start`. Braces are balanced so a broken block is
    /// skipped as a whole, but a top level keyword at the start of a line always ends the skip.
    fn recover(&mut self, start: usize) {
        self.position = start;
        let mut depth = 0_isize;
        while !self.at_eof() {
            let token = self.advance();
            match token.kind() {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                TokenKind::Nl => {
                    if depth <= 0 || TOP_LEVEL_STARTERS.contains(&self.peek_kind()) {
                        break;
                    }
                }
                _ => {}
            }
        }
        trace!("recovered at {:?}", self.peek());
    }

    /// The current token. Once the end is reached this is always the end of file token.
    fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + n).min(last)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consumes the current token. Never moves past the end of file token.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is(TokenKind::Eof) {
            self.position += 1;
        }
        token
    }

    /// Consumes the current token if it is of the given kind
    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> SyntaxResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ErrorKind::expected_token(kind, self.peek()))
        }
    }

    fn skip_newlines(&mut self) {
        while self.eat(TokenKind::Nl).is_some() {}
    }

    /// Collects the tokens of a brace delimited block, not including the outer braces
    fn braced_tokens(&mut self) -> SyntaxResult<Vec<Token>> {
        self.expect(TokenKind::LBrace)?;
        let mut depth = 0_usize;
        let mut tokens = vec![];
        loop {
            let token = self.peek();
            match token.kind() {
                TokenKind::Eof => return Err(ErrorKind::UnclosedBlock.at(token)),
                TokenKind::RBrace if depth == 0 => {
                    self.advance();
                    return Ok(tokens);
                }
                TokenKind::RBrace => depth -= 1,
                TokenKind::LBrace => depth += 1,
                _ => {}
            }
            tokens.push(self.advance());
        }
    }

    /// Collects tokens until a newline or unbalanced closing brace, respecting nesting
    fn tokens_until_line_end(&mut self) -> Vec<Token> {
        let mut depth = 0_usize;
        let mut tokens = vec![];
        loop {
            match self.peek_kind() {
                TokenKind::Eof => break,
                TokenKind::Nl | TokenKind::RBrace if depth == 0 => break,
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            tokens.push(self.advance());
        }
        tokens
    }

    /// Checks that the current token ends a statement without consuming it
    fn expect_statement_end(&self) -> SyntaxResult<()> {
        match self.peek_kind() {
            TokenKind::Nl | TokenKind::RBrace | TokenKind::Eof => Ok(()),
            _ => Err(ErrorKind::unexpected_token(self.peek())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use frobo_ast::items::Component;
    use test_log::test;

    /// Parses source text, asserting it lexes cleanly
    pub fn parse_str(source: &str) -> (Program, Vec<SyntaxError>) {
        let (tokens, lex_errors) = tokenize(source);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        let mut parser = Parser::new(tokens);
        let program = parser.parse();
        (program, parser.into_errors())
    }

    /// Parses source text that must contain exactly one component and no errors
    pub fn parse_component(source: &str) -> Component {
        let (program, errors) = parse_str(source);
        assert!(errors.is_empty(), "syntax errors: {errors:?}");
        assert_eq!(program.children.len(), 1);
        match program.children.into_iter().next() {
            Some(Node::Component(component)) => component,
            other => panic!("expected a component, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_program() {
        let (program, errors) = parse_str("");
        assert!(program.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_eof_is_added() {
        let mut parser = Parser::new(vec![]);
        assert!(parser.parse().is_empty());
    }

    #[test]
    fn test_recovers_from_unknown_statement() {
        let (program, errors) = parse_str("foo bar baz\ncomponent App {\n  text \"Hi\"\n}");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location().line(), 1);
        assert_eq!(errors[0].location().column(), 1);
        assert_eq!(program.children.len(), 1);
        assert_eq!(program.components().next().map(|c| c.name.as_str()), Some("App"));
    }

    #[test]
    fn test_recovers_from_broken_component() {
        let source = "component Broken {\n  state = 1\n  text \"skipped\"\n}\ncomponent App {\n  text \"Hi\"\n}";
        let (program, errors) = parse_str(source);
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].location().line(), 2);
        assert_eq!(program.children.len(), 1);
        assert!(program.find_component("App").is_some());
    }

    #[test]
    fn test_recovers_from_unclosed_component() {
        let source = "component Broken {\n  text \"a\"\n\ncomponent App {\n  text \"Hi\"\n}";
        let (program, errors) = parse_str(source);
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(program.find_component("App").is_some());
    }

    #[test]
    fn test_stray_closing_brace() {
        let (program, errors) = parse_str("}\ncomponent App {\n}");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.children.len(), 1);
    }

    #[test]
    fn test_garbage_only_terminates() {
        let (program, errors) = parse_str("{ { ( ] ) 1 2 3 \"x\"");
        assert!(program.is_empty());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let (tokens, _) = tokenize("x\ncomponent App {\n}");
        let mut parser = Parser::new(tokens);
        let first = parser.parse();
        let first_errors = parser.errors().to_vec();
        let second = parser.parse();
        assert_eq!(first, second);
        assert_eq!(first_errors, parser.errors());
    }
}
