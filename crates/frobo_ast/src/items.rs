//! Top level declarations

use crate::statements::{ComputedDeclaration, PropsDeclaration, StateDeclaration};
use crate::Node;
use frobo_tokens::location::Location;

/// `component Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub children: Vec<Node>,
    pub location: Location,
}

impl Component {
    /// Gets the first `props` declaration of this component
    pub fn props(&self) -> Option<&PropsDeclaration> {
        self.children.iter().find_map(|child| match child {
            Node::Props(props) => Some(props),
            _ => None,
        })
    }

    /// A component that declares props is only a template for instances
    pub fn has_props(&self) -> bool {
        self.props().is_some()
    }

    /// Every prop name declared by this component, over all of its `props` declarations
    pub fn prop_names(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Props(props) => Some(props.names.iter().map(String::as_str)),
                _ => None,
            })
            .flatten()
    }

    pub fn states(&self) -> impl Iterator<Item = &StateDeclaration> {
        self.children.iter().filter_map(|child| match child {
            Node::State(state) => Some(state),
            _ => None,
        })
    }

    pub fn computed(&self) -> impl Iterator<Item = &ComputedDeclaration> {
        self.children.iter().filter_map(|child| match child {
            Node::Computed(computed) => Some(computed),
            _ => None,
        })
    }
}

/// `function name(params) { body }`, or its `async` form
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    /// The body, re-joined from its tokens
    pub body: String,
    pub location: Location,
}

/// `import a, b from "path"`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    pub specifiers: Vec<String>,
    pub source: String,
    pub location: Location,
}

/// `export <declaration>`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDeclaration {
    pub declaration: Box<Node>,
    pub location: Location,
}

impl ExportDeclaration {
    pub fn declaration(&self) -> &Node {
        &self.declaration
    }
}
