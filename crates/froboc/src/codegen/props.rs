//! Substitution of `{prop}` placeholders when a component is instantiated

use frobo_ast::elements::AttributeValue;
use frobo_ast::Node;
use indexmap::IndexMap;

/// Values given to the props of one component instance, already rendered as text
pub type PropValues<'a> = IndexMap<&'a str, String>;

/// Copies a node, replacing `{prop}` in every text and string attribute of its subtree
pub fn substitute_props(node: &Node, props: &PropValues<'_>) -> Node {
    let mut node = node.clone();
    if !props.is_empty() {
        substitute_in(&mut node, props);
    }
    node
}

fn substitute_in(node: &mut Node, props: &PropValues<'_>) {
    match node {
        Node::Element(element) => {
            if let Some(text) = &mut element.text {
                *text = replace_props(text, props);
            }
            substitute_attributes(element.attributes.values_mut(), props);
            substitute_all(&mut element.children, props);
        }
        Node::ComponentInstance(instance) => {
            substitute_attributes(instance.attributes.values_mut(), props);
            substitute_all(&mut instance.children, props);
        }
        Node::If(statement) => {
            substitute_all(&mut statement.consequent, props);
            for branch in &mut statement.else_ifs {
                substitute_all(&mut branch.body, props);
            }
            if let Some(alternate) = &mut statement.alternate {
                substitute_all(alternate, props);
            }
        }
        Node::For(for_loop) => substitute_all(&mut for_loop.body, props),
        _ => {}
    }
}

fn substitute_all(nodes: &mut [Node], props: &PropValues<'_>) {
    for node in nodes {
        substitute_in(node, props);
    }
}

fn substitute_attributes<'v>(
    values: impl Iterator<Item = &'v mut AttributeValue>,
    props: &PropValues<'_>,
) {
    for value in values {
        if let AttributeValue::Text(text) = value {
            *text = replace_props(text, props);
        }
    }
}

fn replace_props(text: &str, props: &PropValues<'_>) -> String {
    props
        .iter()
        .fold(text.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use frobo_ast::elements::Element;
    use frobo_tokens::location::Location;
    use test_log::test;

    fn text(value: &str) -> Node {
        let mut element = Element::new("text", Location::default());
        element.text = Some(value.to_string());
        Node::Element(element)
    }

    #[test]
    fn test_substitutes_every_occurrence() {
        let props = PropValues::from([("title", "Hi".to_string())]);
        let Node::Element(element) = substitute_props(&text("{title} and {title}"), &props) else {
            panic!("expected element");
        };
        assert_eq!(element.text.as_deref(), Some("Hi and Hi"));
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        let props = PropValues::from([("title", "Hi".to_string())]);
        let Node::Element(element) = substitute_props(&text("{title}: {count}"), &props) else {
            panic!("expected element");
        };
        assert_eq!(element.text.as_deref(), Some("Hi: {count}"));
    }

    #[test]
    fn test_nested_children() {
        let mut column = Element::new("column", Location::default());
        column.children.push(text("{name}"));
        let props = PropValues::from([("name", "Ada".to_string())]);
        let Node::Element(column) = substitute_props(&Node::Element(column), &props) else {
            panic!("expected element");
        };
        assert_eq!(column.children[0], text("Ada"));
    }
}
