//! UI elements and component instances

use crate::Node;
use frobo_tokens::location::Location;
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A primitive element, such as `text "Hello"` or `button "Go" onClick=go`
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    /// The string literal directly after the element name
    pub text: Option<String>,
    pub attributes: IndexMap<String, AttributeValue>,
    /// Style properties, already mapped from shorthands to their real names
    pub styles: IndexMap<String, String>,
    pub children: Vec<Node>,
    pub location: Location,
}

impl Element {
    /// Creates an element with no text, attributes, styles or children
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            text: None,
            attributes: IndexMap::new(),
            styles: IndexMap::new(),
            children: vec![],
            location,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

/// A use of a user defined component, such as `Card title="Hi"`. Any name starting with an
/// uppercase letter is an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInstance {
    pub name: String,
    pub attributes: IndexMap<String, AttributeValue>,
    pub children: Vec<Node>,
    pub location: Location,
}

/// The value of an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// A string literal
    Text(String),
    /// A bare name or dotted path
    Identifier(String),
    /// A number as written
    Number(String),
    Boolean(bool),
    /// `name(args)`, with each argument re-joined from its tokens
    Call { name: String, args: Vec<String> },
    /// `class={ active: isActive }`
    ClassMap(IndexMap<String, String>),
}

impl AttributeValue {
    /// Gets the value if it names something, either as an identifier or a string
    pub fn as_name(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) | AttributeValue::Identifier(s) => Some(s),
            _ => None,
        }
    }
}

/// Displays the value as text, the form used when substituting props and writing attributes
impl Display for AttributeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Text(s) | AttributeValue::Identifier(s) | AttributeValue::Number(s) => {
                write!(f, "{s}")
            }
            AttributeValue::Boolean(b) => write!(f, "{b}"),
            AttributeValue::Call { name, args } => write!(f, "{name}({})", args.iter().join(", ")),
            AttributeValue::ClassMap(map) => write!(
                f,
                "{{ {} }}",
                map.iter().map(|(k, v)| format!("{k}: {v}")).join(", ")
            ),
        }
    }
}
