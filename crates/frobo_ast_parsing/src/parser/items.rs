//! Top level declarations

use crate::parser::raw_text::render_body;
use crate::parser::{ErrorKind, Parser, SyntaxResult};
use frobo_ast::items::{ExportDeclaration, Function, ImportDeclaration};
use frobo_ast::Node;
use frobo_tokens::location::Located;
use frobo_tokens::token::TokenKind;

impl Parser {
    /// `component`, `function` or `async function`
    pub(super) fn parse_declaration(&mut self) -> SyntaxResult<Node> {
        match self.peek_kind() {
            TokenKind::Component => self.parse_component().map(Node::Component),
            TokenKind::Function => self.parse_function().map(Node::Function),
            TokenKind::Async => {
                self.advance();
                self.parse_function().map(Node::AsyncFunction)
            }
            other => Err(ErrorKind::ExpectedDeclaration(other).at(self.peek())),
        }
    }

    /// `function name(a, b) { ... }`
    pub(super) fn parse_function(&mut self) -> SyntaxResult<Function> {
        let keyword = self.expect(TokenKind::Function)?;
        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::LParen)?;
        let mut params = vec![];
        while !self.check(TokenKind::RParen) {
            params.push(self.expect(TokenKind::Identifier)?.text().to_string());
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        self.skip_newlines();
        let body = self.braced_tokens()?;
        Ok(Function {
            name: name.text().to_string(),
            params,
            body: render_body(&body),
            location: keyword.location().join(name.location()),
        })
    }

    /// `import a, b from "path"` or `import { a, b } from "path"`
    pub(super) fn parse_import(&mut self) -> SyntaxResult<Node> {
        let keyword = self.expect(TokenKind::Import)?;
        let braced = self.eat(TokenKind::LBrace).is_some();
        let mut specifiers = vec![];
        while self.check(TokenKind::Identifier) {
            specifiers.push(self.advance().text().to_string());
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        if braced {
            self.expect(TokenKind::RBrace)?;
        }
        self.expect(TokenKind::From)?;
        let source = self.expect(TokenKind::String)?;
        self.expect_statement_end()?;
        Ok(Node::Import(ImportDeclaration {
            specifiers,
            source: source.text().to_string(),
            location: keyword.location(),
        }))
    }

    /// `export component ...` or `export function ...`
    pub(super) fn parse_export(&mut self) -> SyntaxResult<Node> {
        let keyword = self.expect(TokenKind::Export)?;
        let declaration = self.parse_declaration()?;
        Ok(Node::Export(ExportDeclaration {
            declaration: Box::new(declaration),
            location: keyword.location(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::parse_str;
    use crate::parser::ErrorKind;
    use frobo_ast::Node;
    use frobo_tokens::token::TokenKind;
    use test_log::test;

    #[test]
    fn test_function_with_params() {
        let (program, errors) = parse_str("function greet(name, age) {\n  message = name + \" is \" + age\n}");
        assert!(errors.is_empty(), "{errors:?}");
        let function = program.functions().next().expect("no function");
        assert_eq!(function.name, "greet");
        assert_eq!(function.params, vec!["name", "age"]);
        assert_eq!(function.body, "message = name + \" is \" + age");
    }

    #[test]
    fn test_function_without_params() {
        let (program, errors) = parse_str("function reset() {\n  result = 0\n}");
        assert!(errors.is_empty());
        let function = program.functions().next().expect("no function");
        assert!(function.params.is_empty());
    }

    #[test]
    fn test_async_function() {
        let (program, errors) = parse_str("async function load() {\n  data = await get()\n}");
        assert!(errors.is_empty(), "{errors:?}");
        assert!(matches!(program.children[0], Node::AsyncFunction(_)));
    }

    #[test]
    fn test_import() {
        let (program, errors) = parse_str("import Card, Button from \"./ui.frobo\"\n");
        assert!(errors.is_empty(), "{errors:?}");
        let Node::Import(import) = &program.children[0] else {
            panic!("expected import");
        };
        assert_eq!(import.specifiers, vec!["Card", "Button"]);
        assert_eq!(import.source, "./ui.frobo");
    }

    #[test]
    fn test_braced_import() {
        let (program, errors) = parse_str("import { Card } from \"./ui.frobo\"");
        assert!(errors.is_empty(), "{errors:?}");
        assert!(matches!(program.children[0], Node::Import(_)));
    }

    #[test]
    fn test_export_component() {
        let (program, errors) = parse_str("export component Card {\n  text \"card\"\n}");
        assert!(errors.is_empty(), "{errors:?}");
        assert!(matches!(program.children[0], Node::Export(_)));
        assert!(program.find_component("Card").is_some());
    }

    #[test]
    fn test_export_requires_declaration() {
        let (program, errors) = parse_str("export state x = 1");
        assert!(program.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].kind(),
            &ErrorKind::ExpectedDeclaration(TokenKind::State)
        );
    }
}
