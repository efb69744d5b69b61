//! The root of the tree

use crate::items::{Component, Function};
use crate::statements::{ComputedDeclaration, StateDeclaration};
use crate::Node;

/// The root node. Children are the top level declarations, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub children: Vec<Node>,
}

impl Program {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Every top level component, including exported ones
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.children.iter().filter_map(Node::as_component)
    }

    /// Every top level function, including async and exported ones
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.children.iter().filter_map(Node::as_function)
    }

    /// Finds a component definition by name
    pub fn find_component(&self, name: &str) -> Option<&Component> {
        self.components().find(|component| component.name == name)
    }

    /// Every state declaration of every component, flattened into one list in declaration order
    pub fn states(&self) -> impl Iterator<Item = &StateDeclaration> {
        self.components().flat_map(Component::states)
    }

    /// Every computed declaration of every component, flattened into one list in declaration
    /// order
    pub fn computed(&self) -> impl Iterator<Item = &ComputedDeclaration> {
        self.components().flat_map(Component::computed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ExportDeclaration;
    use crate::values::StateValue;
    use frobo_tokens::location::Location;
    use test_log::test;

    fn component(name: &str, children: Vec<Node>) -> Node {
        Node::Component(Component {
            name: name.to_string(),
            children,
            location: Location::default(),
        })
    }

    fn state(name: &str) -> Node {
        Node::State(StateDeclaration {
            name: name.to_string(),
            value: StateValue::Null,
            location: Location::default(),
        })
    }

    #[test]
    fn test_find_exported_component() {
        let program = Program::new(vec![Node::Export(ExportDeclaration {
            declaration: Box::new(component("Card", vec![])),
            location: Location::default(),
        })]);
        assert!(program.find_component("Card").is_some());
        assert!(program.find_component("Missing").is_none());
    }

    #[test]
    fn test_states_are_flattened_in_order() {
        let program = Program::new(vec![
            component("A", vec![state("a"), state("b")]),
            component("B", vec![state("c")]),
        ]);
        let names = program.states().map(|s| s.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
