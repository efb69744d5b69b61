//! Components and the statements of their bodies

use crate::parser::raw_text::{join_tokens, render_body};
use crate::parser::{ErrorKind, Parser, SyntaxResult};
use frobo_ast::items::Component;
use frobo_ast::statements::{
    ComputedDeclaration, ElseIfBranch, FetchDeclaration, ForLoop, HookKind, IfStatement,
    LifecycleHook, PropsDeclaration, StateDeclaration, Watcher,
};
use frobo_ast::values::StateValue;
use frobo_ast::Node;
use frobo_tokens::location::Located;
use frobo_tokens::token::TokenKind;
use indexmap::IndexMap;
use tracing::trace;

impl Parser {
    /// `component Name { ... }`
    pub(super) fn parse_component(&mut self) -> SyntaxResult<Component> {
        let keyword = self.expect(TokenKind::Component)?;
        let name = self.expect(TokenKind::Identifier)?;
        self.skip_newlines();
        self.expect(TokenKind::LBrace)?;
        let mut children = vec![];
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RBrace).is_some() {
                break;
            }
            let statement = self.parse_component_statement()?;
            trace!("parsed {} in component {}", statement.kind_name(), name.text());
            children.push(statement);
        }
        Ok(Component {
            name: name.text().to_string(),
            children,
            location: keyword.location().join(name.location()),
        })
    }

    fn parse_component_statement(&mut self) -> SyntaxResult<Node> {
        match self.peek_kind() {
            TokenKind::Props => self.parse_props().map(Node::Props),
            TokenKind::State => self.parse_state().map(Node::State),
            TokenKind::Computed => self.parse_computed().map(Node::Computed),
            TokenKind::OnMount | TokenKind::OnUpdate => self.parse_hook().map(Node::LifecycleHook),
            TokenKind::Fetch => self.parse_fetch().map(Node::Fetch),
            TokenKind::Watch => self.parse_watcher().map(Node::Watcher),
            _ => self.parse_child(),
        }
    }

    /// An element, `if` or `for`. These are the only things that may appear inside element,
    /// `if` and `for` blocks.
    pub(super) fn parse_child(&mut self) -> SyntaxResult<Node> {
        match self.peek_kind() {
            TokenKind::If => self.parse_if().map(Node::If),
            TokenKind::For => self.parse_for().map(Node::For),
            TokenKind::Identifier => self.parse_element(),
            _ => Err(ErrorKind::unexpected_token(self.peek())),
        }
    }

    /// `{ child* }`
    pub(super) fn parse_children_block(&mut self) -> SyntaxResult<Vec<Node>> {
        self.expect(TokenKind::LBrace)?;
        let mut children = vec![];
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RBrace).is_some() {
                return Ok(children);
            }
            if self.at_eof() {
                return Err(ErrorKind::expected_token(TokenKind::RBrace, self.peek()));
            }
            children.push(self.parse_child()?);
        }
    }

    fn parse_props(&mut self) -> SyntaxResult<PropsDeclaration> {
        let keyword = self.expect(TokenKind::Props)?;
        let mut names = vec![self.expect(TokenKind::Identifier)?.text().to_string()];
        while self.eat(TokenKind::Comma).is_some() {
            names.push(self.expect(TokenKind::Identifier)?.text().to_string());
        }
        self.expect_statement_end()?;
        Ok(PropsDeclaration {
            names,
            location: keyword.location(),
        })
    }

    fn parse_state(&mut self) -> SyntaxResult<StateDeclaration> {
        let keyword = self.expect(TokenKind::State)?;
        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_state_value()?;
        self.expect_statement_end()?;
        Ok(StateDeclaration {
            name: name.text().to_string(),
            value,
            location: keyword.location().join(name.location()),
        })
    }

    fn parse_state_value(&mut self) -> SyntaxResult<StateValue> {
        let token = self.peek().clone();
        let value = match token.kind() {
            TokenKind::Number => StateValue::Number(token.text().to_string()),
            TokenKind::Minus if self.peek_nth(1).is(TokenKind::Number) => {
                self.advance();
                StateValue::Number(format!("-{}", self.peek().text()))
            }
            TokenKind::String => StateValue::String(token.text().to_string()),
            TokenKind::Boolean => StateValue::Boolean(token.text() == "true"),
            TokenKind::Null => StateValue::Null,
            TokenKind::LBracket => return self.parse_array(),
            TokenKind::LBrace => return self.parse_object(),
            found => {
                return Err(ErrorKind::InvalidStateValue {
                    found,
                    text: token.text().to_string(),
                }
                .at(&token))
            }
        };
        self.advance();
        Ok(value)
    }

    /// `[a, b, c]`, which may span lines
    fn parse_array(&mut self) -> SyntaxResult<StateValue> {
        self.expect(TokenKind::LBracket)?;
        let mut elements = vec![];
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RBracket).is_some() {
                break;
            }
            elements.push(self.parse_state_value()?);
            self.skip_newlines();
            if self.eat(TokenKind::Comma).is_none() {
                self.skip_newlines();
                self.expect(TokenKind::RBracket)?;
                break;
            }
        }
        Ok(StateValue::Array(elements))
    }

    /// `{ key: value, other: value }`, where entries are separated by commas or newlines
    fn parse_object(&mut self) -> SyntaxResult<StateValue> {
        self.expect(TokenKind::LBrace)?;
        let mut entries = IndexMap::new();
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RBrace).is_some() {
                break;
            }
            let key = self.peek().clone();
            if !(key.kind().is_word() || key.is(TokenKind::String)) {
                return Err(ErrorKind::expected_token(TokenKind::Identifier, &key));
            }
            self.advance();
            self.expect(TokenKind::Colon)?;
            let value = self.parse_state_value()?;
            entries.insert(key.text().to_string(), value);
            self.eat(TokenKind::Comma);
        }
        Ok(StateValue::Object(entries))
    }

    /// `computed name = expression`, where the expression is kept as text
    fn parse_computed(&mut self) -> SyntaxResult<ComputedDeclaration> {
        let keyword = self.expect(TokenKind::Computed)?;
        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Assign)?;
        let expression = self.tokens_until_line_end();
        if expression.is_empty() {
            return Err(ErrorKind::unexpected_token(self.peek()));
        }
        Ok(ComputedDeclaration {
            name: name.text().to_string(),
            expression: join_tokens(&expression),
            location: keyword.location().join(name.location()),
        })
    }

    fn parse_hook(&mut self) -> SyntaxResult<LifecycleHook> {
        let keyword = self.advance();
        let kind = match keyword.kind() {
            TokenKind::OnUpdate => HookKind::Update,
            _ => HookKind::Mount,
        };
        self.skip_newlines();
        let body = self.braced_tokens()?;
        Ok(LifecycleHook {
            kind,
            body: render_body(&body),
            location: keyword.location(),
        })
    }

    /// `fetch url="..." into=data loading=isLoading error=error`
    fn parse_fetch(&mut self) -> SyntaxResult<FetchDeclaration> {
        let keyword = self.expect(TokenKind::Fetch)?;
        let mut fetch = FetchDeclaration {
            url: String::new(),
            into: None,
            loading: None,
            error: None,
            location: keyword.location(),
        };
        while self.peek_kind().is_word() && self.peek_nth(1).is(TokenKind::Assign) {
            let key = self.advance();
            self.advance();
            let value = self.peek().clone();
            let value = match value.kind() {
                TokenKind::String => {
                    self.advance();
                    value.text().to_string()
                }
                TokenKind::Identifier => self.parse_path()?.join("."),
                _ => {
                    return Err(
                        ErrorKind::InvalidAttributeValue(key.text().to_string()).at(&value)
                    )
                }
            };
            match key.text() {
                "url" => fetch.url = value,
                "into" => fetch.into = Some(value),
                "loading" => fetch.loading = Some(value),
                "error" => fetch.error = Some(value),
                other => trace!("ignoring unknown fetch attribute {other:?}"),
            }
        }
        self.expect_statement_end()?;
        Ok(fetch)
    }

    /// `watch name { ... }`
    fn parse_watcher(&mut self) -> SyntaxResult<Watcher> {
        let keyword = self.expect(TokenKind::Watch)?;
        let target = self.parse_path()?.join(".");
        self.skip_newlines();
        let body = self.braced_tokens()?;
        Ok(Watcher {
            target,
            body: render_body(&body),
            location: keyword.location(),
        })
    }

    /// `if c { ... } else if c { ... } else { ... }`. The `else` may be on the line after the
    /// closing brace.
    fn parse_if(&mut self) -> SyntaxResult<IfStatement> {
        let keyword = self.expect(TokenKind::If)?;
        let condition = self.parse_condition()?;
        self.skip_newlines();
        let consequent = self.parse_children_block()?;

        let mut else_ifs = vec![];
        let mut alternate = None;
        loop {
            let before = self.position;
            self.skip_newlines();
            if self.eat(TokenKind::ElseIf).is_some() {
                let condition = self.parse_condition()?;
                self.skip_newlines();
                let body = self.parse_children_block()?;
                else_ifs.push(ElseIfBranch { condition, body });
            } else if self.eat(TokenKind::Else).is_some() {
                self.skip_newlines();
                alternate = Some(self.parse_children_block()?);
                break;
            } else {
                self.position = before;
                break;
            }
        }
        Ok(IfStatement {
            condition,
            consequent,
            else_ifs,
            alternate,
            location: keyword.location(),
        })
    }

    /// `for item in array { ... }`
    fn parse_for(&mut self) -> SyntaxResult<ForLoop> {
        let keyword = self.expect(TokenKind::For)?;
        let item = self.expect(TokenKind::Identifier)?;
        if self.eat(TokenKind::In).is_none() {
            return Err(ErrorKind::ExpectedIn.at(self.peek()));
        }
        let array = self.parse_path()?.join(".");
        self.skip_newlines();
        let body = self.parse_children_block()?;
        Ok(ForLoop {
            item: item.text().to_string(),
            array,
            body,
            location: keyword.location(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::{parse_component, parse_str};
    use crate::parser::ErrorKind;
    use frobo_ast::expr::Expr;
    use frobo_ast::statements::HookKind;
    use frobo_ast::values::StateValue;
    use frobo_ast::Node;
    use frobo_tokens::location::Located;
    use test_log::test;

    #[test]
    fn test_component() {
        let component = parse_component("component Counter {\n}");
        assert_eq!(component.name, "Counter");
        assert!(component.children.is_empty());
    }

    #[test]
    fn test_state_values() {
        let component = parse_component(
            "component App {\n  state count = 0\n  state name = \"x\"\n  state on = true\n  state user = null\n  state offset = -5\n}",
        );
        let values = component.states().map(|s| s.value.clone()).collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                StateValue::Number("0".to_string()),
                StateValue::String("x".to_string()),
                StateValue::Boolean(true),
                StateValue::Null,
                StateValue::Number("-5".to_string()),
            ]
        );
    }

    #[test]
    fn test_array_and_object_state() {
        let component = parse_component(
            "component App {\n  state todos = [\"Buy milk\", \"Walk dog\"]\n  state user = { name: \"John\", profile: { age: 30 } }\n}",
        );
        let states = component.states().collect::<Vec<_>>();
        assert_eq!(
            states[0].value,
            StateValue::Array(vec![
                StateValue::String("Buy milk".to_string()),
                StateValue::String("Walk dog".to_string()),
            ])
        );
        let StateValue::Object(user) = &states[1].value else {
            panic!("expected object");
        };
        assert_eq!(user.keys().collect::<Vec<_>>(), vec!["name", "profile"]);
        assert!(matches!(user["profile"], StateValue::Object(_)));
    }

    #[test]
    fn test_multiline_array() {
        let component = parse_component("component App {\n  state xs = [\n    1,\n    2,\n  ]\n}");
        let state = component.states().next().expect("no state");
        assert!(matches!(&state.value, StateValue::Array(xs) if xs.len() == 2));
    }

    #[test]
    fn test_invalid_state_value() {
        let (_, errors) = parse_str("component App {\n  state x = foo\n}");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].kind(),
            ErrorKind::InvalidStateValue { text, .. } if text == "foo"
        ));
        assert_eq!(errors[0].location().line(), 2);
    }

    #[test]
    fn test_computed() {
        let component =
            parse_component("component App {\n  state count = 0\n  computed doubled = count * 2\n}");
        let computed = component.computed().next().expect("no computed");
        assert_eq!(computed.name, "doubled");
        assert_eq!(computed.expression, "count * 2");
    }

    #[test]
    fn test_props() {
        let component = parse_component("component Card {\n  props title, subtitle\n}");
        assert!(component.has_props());
        assert_eq!(component.prop_names().collect::<Vec<_>>(), vec!["title", "subtitle"]);
    }

    #[test]
    fn test_hooks_and_watchers() {
        let component = parse_component(
            "component App {\n  onMount {\n    count = 1\n  }\n  onUpdate { log = true }\n  watch count {\n    doubled = newVal * 2\n  }\n}",
        );
        let Node::LifecycleHook(mount) = &component.children[0] else {
            panic!("expected hook");
        };
        assert_eq!(mount.kind, HookKind::Mount);
        assert_eq!(mount.body, "count = 1");
        let Node::LifecycleHook(update) = &component.children[1] else {
            panic!("expected hook");
        };
        assert_eq!(update.kind, HookKind::Update);
        let Node::Watcher(watcher) = &component.children[2] else {
            panic!("expected watcher");
        };
        assert_eq!(watcher.target, "count");
        assert_eq!(watcher.body, "doubled = newVal * 2");
    }

    #[test]
    fn test_fetch() {
        let component = parse_component(
            "component App {\n  fetch url=\"https://api.example.com/users\" into=users loading=isLoading error=\"failure\"\n}",
        );
        let Node::Fetch(fetch) = &component.children[0] else {
            panic!("expected fetch");
        };
        assert_eq!(fetch.url, "https://api.example.com/users");
        assert_eq!(fetch.into.as_deref(), Some("users"));
        assert_eq!(fetch.loading.as_deref(), Some("isLoading"));
        assert_eq!(fetch.error.as_deref(), Some("failure"));
    }

    #[test]
    fn test_if_else_if_else() {
        let component = parse_component(
            "component App {\n  state score = 85\n  if score > 90 {\n    text \"A\"\n  } else if score > 80 {\n    text \"B\"\n  } else if score > 70 {\n    text \"C\"\n  } else {\n    text \"F\"\n  }\n}",
        );
        let Node::If(statement) = &component.children[1] else {
            panic!("expected if");
        };
        assert_eq!(statement.condition.to_string(), "score > 90");
        assert_eq!(statement.else_ifs.len(), 2);
        assert_eq!(statement.else_ifs[1].condition.to_string(), "score > 70");
        assert_eq!(statement.alternate.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_else_on_next_line() {
        let component = parse_component(
            "component App {\n  if a {\n    text \"yes\"\n  }\n  else {\n    text \"no\"\n  }\n}",
        );
        assert_eq!(component.children.len(), 1);
        let Node::If(statement) = &component.children[0] else {
            panic!("expected if");
        };
        assert!(statement.alternate.is_some());
    }

    #[test]
    fn test_if_without_else_keeps_following_siblings() {
        let component =
            parse_component("component App {\n  if a {\n    text \"yes\"\n  }\n  text \"after\"\n}");
        assert_eq!(component.children.len(), 2);
    }

    #[test]
    fn test_for() {
        let component = parse_component(
            "component App {\n  state todos = []\n  for todo in todos {\n    text \"{todo}\"\n  }\n}",
        );
        let Node::For(for_loop) = &component.children[1] else {
            panic!("expected for");
        };
        assert_eq!(for_loop.item, "todo");
        assert_eq!(for_loop.array, "todos");
        assert_eq!(for_loop.body.len(), 1);
    }

    #[test]
    fn test_for_requires_in() {
        let (_, errors) = parse_str("component App {\n  for todo of todos {\n  }\n}");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), &ErrorKind::ExpectedIn);
    }

    #[test]
    fn test_member_condition() {
        let component = parse_component("component App {\n  if user.age >= 18 {\n  }\n}");
        let Node::If(statement) = &component.children[0] else {
            panic!("expected if");
        };
        assert!(matches!(
            &statement.condition,
            Expr::Comparison { left, .. } if matches!(left.as_ref(), Expr::Member(path) if path.len() == 2)
        ));
    }
}
