//! Element parsing, including attributes, inline styles and class bindings

use crate::parser::raw_text::{join_tokens, split_arguments};
use crate::parser::{ErrorKind, Parser, SyntaxResult};
use frobo_ast::elements::{AttributeValue, ComponentInstance, Element};
use frobo_ast::Node;
use frobo_tokens::location::Located;
use frobo_tokens::token::{Token, TokenKind};
use indexmap::IndexMap;

/// Attributes that are written directly on an element but are really style properties
const STYLE_SHORTHANDS: [(&str, &str); 9] = [
    ("bg", "background"),
    ("color", "color"),
    ("padding", "padding"),
    ("rounded", "border-radius"),
    ("margin", "margin"),
    ("width", "width"),
    ("height", "height"),
    ("gap", "gap"),
    ("shadow", "box-shadow"),
];

/// Gets the style property a shorthand attribute stands for
fn shorthand_property(name: &str) -> Option<&'static str> {
    STYLE_SHORTHANDS
        .iter()
        .find(|(shorthand, _)| *shorthand == name)
        .map(|(_, property)| *property)
}

impl Parser {
    /// Parses an element or a component instance
    pub(super) fn parse_element(&mut self) -> SyntaxResult<Node> {
        let name = self.expect(TokenKind::Identifier)?;
        let mut element = Element::new(name.text(), name.location());
        let is_instance = name.text().starts_with(|c: char| c.is_ascii_uppercase());

        if let Some(text) = self.eat(TokenKind::String) {
            element.text = Some(text.text().to_string());
        }

        while self.peek_kind().is_word() && self.peek_nth(1).is(TokenKind::Assign) {
            let key = self.advance();
            self.advance();
            match key.text() {
                "style" => {
                    let styles = self.parse_style_block()?;
                    element.styles.extend(styles);
                }
                "class" if self.check(TokenKind::LBrace) => {
                    let classes = self.parse_class_map()?;
                    element
                        .attributes
                        .insert("class".to_string(), AttributeValue::ClassMap(classes));
                }
                shorthand if !is_instance && shorthand_property(shorthand).is_some() => {
                    let value = self.parse_style_value(shorthand)?;
                    if let Some(property) = shorthand_property(shorthand) {
                        element.styles.insert(property.to_string(), value);
                    }
                }
                other => {
                    let value = self.parse_attribute_value(&key)?;
                    element.attributes.insert(other.to_string(), value);
                }
            }
        }

        if self.check(TokenKind::LBrace) {
            element.children = self.parse_children_block()?;
        }
        self.expect_statement_end()?;

        if is_instance {
            let Element {
                name,
                text,
                mut attributes,
                children,
                location,
                ..
            } = element;
            if let Some(text) = text {
                attributes
                    .entry("text".to_string())
                    .or_insert(AttributeValue::Text(text));
            }
            Ok(Node::ComponentInstance(ComponentInstance {
                name,
                attributes,
                children,
                location,
            }))
        } else {
            Ok(Node::Element(element))
        }
    }

    fn parse_attribute_value(&mut self, key: &Token) -> SyntaxResult<AttributeValue> {
        let token = self.peek().clone();
        let value = match token.kind() {
            TokenKind::String => AttributeValue::Text(token.text().to_string()),
            TokenKind::Number => AttributeValue::Number(token.text().to_string()),
            TokenKind::Minus if self.peek_nth(1).is(TokenKind::Number) => {
                self.advance();
                AttributeValue::Number(format!("-{}", self.peek().text()))
            }
            TokenKind::Boolean => AttributeValue::Boolean(token.text() == "true"),
            TokenKind::Null => AttributeValue::Identifier("null".to_string()),
            TokenKind::Identifier => {
                let name = self.parse_path()?.join(".");
                if self.check(TokenKind::LParen) {
                    let args = self.parenthesized_tokens()?;
                    return Ok(AttributeValue::Call {
                        name,
                        args: split_arguments(&args),
                    });
                }
                return Ok(AttributeValue::Identifier(name));
            }
            _ => {
                return Err(ErrorKind::InvalidAttributeValue(key.text().to_string()).at(&token));
            }
        };
        self.advance();
        Ok(value)
    }

    /// Collects the tokens between a pair of parentheses, not including the parentheses
    fn parenthesized_tokens(&mut self) -> SyntaxResult<Vec<Token>> {
        self.expect(TokenKind::LParen)?;
        let mut depth = 0_usize;
        let mut tokens = vec![];
        loop {
            match self.peek_kind() {
                TokenKind::Eof | TokenKind::Nl => {
                    return Err(ErrorKind::expected_token(TokenKind::RParen, self.peek()));
                }
                TokenKind::RParen if depth == 0 => {
                    self.advance();
                    return Ok(tokens);
                }
                TokenKind::RParen => depth -= 1,
                TokenKind::LParen => depth += 1,
                _ => {}
            }
            tokens.push(self.advance());
        }
    }

    /// `{ prop: value, ... }`, entries separated by commas or newlines
    fn parse_style_block(&mut self) -> SyntaxResult<IndexMap<String, String>> {
        self.expect(TokenKind::LBrace)?;
        let mut styles = IndexMap::new();
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RBrace).is_some() {
                return Ok(styles);
            }
            let property = self.parse_style_property()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_style_entry_value(&property)?;
            styles.insert(property, value);
            self.eat(TokenKind::Comma);
        }
    }

    /// A property name, which may be written with dashes such as `font-size`
    fn parse_style_property(&mut self) -> SyntaxResult<String> {
        let mut property = self.expect_word()?.text().to_string();
        while self.check(TokenKind::Minus) && self.peek_nth(1).kind().is_word() {
            self.advance();
            property.push('-');
            property.push_str(self.advance().text());
        }
        Ok(property)
    }

    /// The value of a shorthand style attribute, a single string or number
    fn parse_style_value(&mut self, property: &str) -> SyntaxResult<String> {
        let token = self.peek().clone();
        match token.kind() {
            TokenKind::String | TokenKind::Number => {
                self.advance();
                Ok(token.text().to_string())
            }
            TokenKind::Minus if self.peek_nth(1).is(TokenKind::Number) => {
                self.advance();
                Ok(format!("-{}", self.advance().text()))
            }
            _ => Err(ErrorKind::InvalidAttributeValue(property.to_string()).at(&token)),
        }
    }

    /// The value of a style block entry. Everything up to the end of the entry is taken, so
    /// `16px` and `1px solid black` work unquoted. A lone string loses its quotes.
    fn parse_style_entry_value(&mut self, property: &str) -> SyntaxResult<String> {
        let mut tokens = vec![];
        while !matches!(
            self.peek_kind(),
            TokenKind::Comma | TokenKind::Nl | TokenKind::RBrace | TokenKind::Eof
        ) {
            tokens.push(self.advance());
        }
        match tokens.as_slice() {
            [] => Err(ErrorKind::InvalidAttributeValue(property.to_string()).at(self.peek())),
            [single] if single.is(TokenKind::String) => Ok(single.text().to_string()),
            tokens => Ok(join_tokens(tokens)),
        }
    }

    /// `{ className: condition, ... }`
    fn parse_class_map(&mut self) -> SyntaxResult<IndexMap<String, String>> {
        self.expect(TokenKind::LBrace)?;
        let mut classes = IndexMap::new();
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RBrace).is_some() {
                return Ok(classes);
            }
            let class = self.parse_style_property()?;
            self.expect(TokenKind::Colon)?;
            let condition = self.parse_path()?.join(".");
            classes.insert(class, condition);
            self.eat(TokenKind::Comma);
        }
    }

    fn expect_word(&mut self) -> SyntaxResult<Token> {
        if self.peek_kind().is_word() || self.check(TokenKind::String) {
            Ok(self.advance())
        } else {
            Err(ErrorKind::expected_token(TokenKind::Identifier, self.peek()))
        }
    }
}
