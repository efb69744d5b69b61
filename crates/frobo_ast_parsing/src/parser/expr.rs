//! Conditions, parsed with the usual precedence: `||` binds loosest, then `&&`, then `!`, then a
//! single non-associative comparison.

use crate::parser::{ErrorKind, Parser, SyntaxResult};
use frobo_ast::expr::{ComparisonOp, Expr, Literal, LogicalOp};
use frobo_tokens::token::TokenKind;

impl Parser {
    pub(super) fn parse_condition(&mut self) -> SyntaxResult<Expr> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> SyntaxResult<Expr> {
        let mut left = self.parse_logical_and()?;
        while self.eat(TokenKind::Or).is_some() {
            let right = self.parse_logical_and()?;
            left = Expr::logical(LogicalOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> SyntaxResult<Expr> {
        let mut left = self.parse_logical_not()?;
        while self.eat(TokenKind::And).is_some() {
            let right = self.parse_logical_not()?;
            left = Expr::logical(LogicalOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_logical_not(&mut self) -> SyntaxResult<Expr> {
        if self.eat(TokenKind::Bang).is_some() {
            Ok(Expr::not(self.parse_logical_not()?))
        } else {
            self.parse_comparison()
        }
    }

    fn parse_comparison(&mut self) -> SyntaxResult<Expr> {
        let left = self.parse_primary()?;
        let op = match self.peek_kind() {
            TokenKind::Gt => ComparisonOp::Gt,
            TokenKind::Lt => ComparisonOp::Lt,
            TokenKind::Gte => ComparisonOp::Gte,
            TokenKind::Lte => ComparisonOp::Lte,
            TokenKind::EqEq => ComparisonOp::Eq,
            TokenKind::Neq => ComparisonOp::Neq,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_primary()?;
        Ok(Expr::comparison(op, left, right))
    }

    fn parse_primary(&mut self) -> SyntaxResult<Expr> {
        let token = self.peek().clone();
        match token.kind() {
            TokenKind::Identifier => Ok(Expr::path(self.parse_path()?)),
            TokenKind::Number => {
                self.advance();
                Ok(Expr::Literal(Literal::Number(token.text().to_string())))
            }
            TokenKind::Minus if self.peek_nth(1).is(TokenKind::Number) => {
                self.advance();
                let number = self.advance();
                Ok(Expr::Literal(Literal::Number(format!("-{}", number.text()))))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::Literal(Literal::String(token.text().to_string())))
            }
            TokenKind::Boolean => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(token.text() == "true")))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Literal(Literal::Null))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_logical_or()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            other => Err(ErrorKind::InvalidCondition(other).at(&token)),
        }
    }

    /// `a` or `a.b.c`. Any word, keywords included, may follow a `.`
    pub(super) fn parse_path(&mut self) -> SyntaxResult<Vec<String>> {
        let mut segments = vec![self.expect(TokenKind::Identifier)?.text().to_string()];
        while self.check(TokenKind::Dot) && self.peek_nth(1).kind().is_word() {
            self.advance();
            segments.push(self.advance().text().to_string());
        }
        Ok(segments)
    }
}
