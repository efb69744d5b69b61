#![doc = include_str!("../README.md")]

use frobo_tokens::location::{Located, Location};

pub mod elements;
pub mod expr;
pub mod items;
pub mod program;
pub mod statements;
pub mod values;

pub use program::Program;

use elements::{ComponentInstance, Element};
use items::{Component, ExportDeclaration, Function, ImportDeclaration};
use statements::{
    ComputedDeclaration, FetchDeclaration, ForLoop, IfStatement, LifecycleHook,
    PropsDeclaration, StateDeclaration, Watcher,
};

/// A node of the tree, other than the [Program] root and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Component(Component),
    ComponentInstance(ComponentInstance),
    Element(Element),
    Function(Function),
    AsyncFunction(Function),
    State(StateDeclaration),
    Computed(ComputedDeclaration),
    Props(PropsDeclaration),
    LifecycleHook(LifecycleHook),
    Fetch(FetchDeclaration),
    Watcher(Watcher),
    If(IfStatement),
    For(ForLoop),
    Import(ImportDeclaration),
    Export(ExportDeclaration),
}

impl Node {
    /// Gets the declaration this node stands for, looking through `export`
    pub fn declaration(&self) -> &Node {
        match self {
            Node::Export(export) => export.declaration().declaration(),
            other => other,
        }
    }

    /// Gets this node as a component, looking through `export`
    pub fn as_component(&self) -> Option<&Component> {
        match self.declaration() {
            Node::Component(component) => Some(component),
            _ => None,
        }
    }

    /// Gets this node as a function or async function, looking through `export`
    pub fn as_function(&self) -> Option<&Function> {
        match self.declaration() {
            Node::Function(function) | Node::AsyncFunction(function) => Some(function),
            _ => None,
        }
    }

    /// A short name for the kind of this node, used in logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Component(_) => "Component",
            Node::ComponentInstance(_) => "ComponentInstance",
            Node::Element(_) => "Element",
            Node::Function(_) => "Function",
            Node::AsyncFunction(_) => "AsyncFunction",
            Node::State(_) => "StateDeclaration",
            Node::Computed(_) => "ComputedDeclaration",
            Node::Props(_) => "PropsDeclaration",
            Node::LifecycleHook(_) => "LifecycleHook",
            Node::Fetch(_) => "FetchDeclaration",
            Node::Watcher(_) => "Watcher",
            Node::If(_) => "IfStatement",
            Node::For(_) => "ForLoop",
            Node::Import(_) => "ImportDeclaration",
            Node::Export(_) => "ExportDeclaration",
        }
    }
}

impl Located for Node {
    fn location(&self) -> Location {
        match self {
            Node::Component(n) => n.location,
            Node::ComponentInstance(n) => n.location,
            Node::Element(n) => n.location,
            Node::Function(n) | Node::AsyncFunction(n) => n.location,
            Node::State(n) => n.location,
            Node::Computed(n) => n.location,
            Node::Props(n) => n.location,
            Node::LifecycleHook(n) => n.location,
            Node::Fetch(n) => n.location,
            Node::Watcher(n) => n.location,
            Node::If(n) => n.location,
            Node::For(n) => n.location,
            Node::Import(n) => n.location,
            Node::Export(n) => n.location,
        }
    }
}
