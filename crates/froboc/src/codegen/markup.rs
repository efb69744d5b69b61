//! Markup generation

use crate::codegen::condition::condition_script;
use crate::codegen::escape::escape_html;
use crate::codegen::props::{substitute_props, PropValues};
use crate::codegen::styles::inline_styles;
use frobo_ast::elements::{AttributeValue, ComponentInstance, Element};
use frobo_ast::expr::Expr;
use frobo_ast::items::Component;
use frobo_ast::statements::{ForLoop, IfStatement};
use frobo_ast::{Node, Program};
use indexmap::IndexMap;
use itertools::Itertools;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// `{name}` or `{a.b.c}` inside text
static INTERPOLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\}")
        .expect("interpolation pattern is valid")
});

/// Written in a loop template in place of the loop item
const LOOP_ITEM: &str = "LOOP_ITEM";
/// Written in a loop template in place of the item's position in its array
const LOOP_INDEX: &str = "LOOP_INDEX";

/// Where an element is being rendered
#[derive(Debug, Clone, Copy, Default)]
struct Scope<'a> {
    /// The item name of the innermost enclosing `for`
    loop_item: Option<&'a str>,
    /// The state path the innermost enclosing `for` iterates
    loop_array: Option<&'a str>,
    /// Set for the direct children of a `for` body
    loop_root: bool,
}

impl<'a> Scope<'a> {
    fn in_loop(item: &'a str, array: &'a str) -> Self {
        Self {
            loop_item: Some(item),
            loop_array: Some(array),
            loop_root: true,
        }
    }

    fn inner(self) -> Self {
        Self {
            loop_root: false,
            ..self
        }
    }

    /// Replaces `{item}` and `{item.field}` with the loop marker
    fn substitute<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(item) = self.loop_item else {
            return Cow::Borrowed(text);
        };
        INTERPOLATION.replace_all(text, |captures: &Captures| {
            let path = &captures[1];
            if path == item {
                format!("{{{{{LOOP_ITEM}}}}}")
            } else if let Some(field) = path
                .strip_prefix(item)
                .and_then(|rest| rest.strip_prefix('.'))
            {
                format!("{{{{{LOOP_ITEM}.{field}}}}}")
            } else {
                captures[0].to_string()
            }
        })
    }

    /// Rewrites a handler argument naming the loop item into a lookup of the item by its index,
    /// so the handler receives the item itself rather than its text
    fn argument<'t>(&self, argument: &'t str) -> Cow<'t, str> {
        let (Some(item), Some(array)) = (self.loop_item, self.loop_array) else {
            return Cow::Borrowed(argument);
        };
        let lookup = format!("Frobo.resolve('{array}')[{{{{{LOOP_INDEX}}}}}]");
        if argument == item {
            Cow::Owned(lookup)
        } else if let Some(field) = argument
            .strip_prefix(item)
            .filter(|rest| rest.starts_with('.'))
        {
            Cow::Owned(format!("{lookup}{field}"))
        } else {
            Cow::Borrowed(argument)
        }
    }
}

/// Gets the distinct paths interpolated in some text, in order of first appearance. Loop markers
/// are not interpolations.
pub fn interpolated_paths(text: &str) -> Vec<&str> {
    INTERPOLATION
        .captures_iter(text)
        .filter(|captures| {
            let start = captures.get(0).map_or(0, |m| m.start());
            !text[..start].ends_with('{')
        })
        .filter_map(|captures| captures.get(1).map(|m| m.as_str()))
        .unique()
        .collect()
}

/// Writes the markup of a program. Ids of generated elements are unique within one writer.
#[derive(Debug)]
pub struct MarkupWriter<'p> {
    program: &'p Program,
    state_names: HashSet<&'p str>,
    indent: usize,
    next_id: usize,
    used_ids: HashMap<String, usize>,
    /// Names of the components currently being instantiated, innermost last
    instances: Vec<String>,
}

impl<'p> MarkupWriter<'p> {
    pub fn new(program: &'p Program) -> Self {
        let state_names = program
            .states()
            .map(|state| state.name.as_str())
            .chain(program.computed().map(|computed| computed.name.as_str()))
            .collect();
        Self {
            program,
            state_names,
            indent: 0,
            next_id: 0,
            used_ids: HashMap::new(),
            instances: vec![],
        }
    }

    /// Renders every top level component, one after another
    pub fn program(&mut self) -> String {
        let program = self.program;
        program
            .components()
            .map(|component| self.component(component))
            .join("\n")
    }

    fn component(&mut self, component: &Component) -> String {
        if let Some(props) = component.props() {
            return format!(
                "<!-- Component {} defined with props: {} -->",
                component.name,
                props.names.join(", ")
            );
        }
        let lines = self.nested(&component.children, Scope::default());
        format!(
            "<div id=\"{}\" class=\"frobo-component\">\n{}\n</div>",
            escape_html(&component.name),
            lines.join("\n")
        )
    }

    /// Renders nodes one level deeper than the current one, one line each
    fn nested(&mut self, nodes: &[Node], scope: Scope<'_>) -> Vec<String> {
        self.indent += 1;
        let mut lines = vec![];
        for node in nodes {
            if let Some(markup) = self.node(node, scope) {
                lines.push(format!("{}{markup}", self.pad()));
            }
        }
        self.indent -= 1;
        lines
    }

    /// Children placed inside an element's tags, or nothing if there are none
    fn children_block(&mut self, nodes: &[Node], scope: Scope<'_>) -> String {
        let lines = self.nested(nodes, scope);
        if lines.is_empty() {
            String::new()
        } else {
            format!("\n{}\n{}", lines.join("\n"), self.pad())
        }
    }

    fn node(&mut self, node: &Node, scope: Scope<'_>) -> Option<String> {
        match node {
            Node::Element(element) => Some(self.element(element, scope)),
            Node::ComponentInstance(instance) => Some(self.instance(instance, scope)),
            Node::If(statement) => Some(self.conditional(statement, scope)),
            Node::For(for_loop) => Some(self.for_loop(for_loop)),
            _ => None,
        }
    }

    fn pad(&self) -> String {
        "  ".repeat(self.indent)
    }

    /// Creates an id such as `cond-3`
    fn generated_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// Uses `base` as an id, suffixing it if it was already used
    fn unique_id(&mut self, base: String) -> String {
        let count = self.used_ids.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}-{count}")
        }
    }

    fn instance(&mut self, instance: &ComponentInstance, scope: Scope<'_>) -> String {
        let program = self.program;
        let Some(definition) = program.find_component(&instance.name) else {
            debug!("no component named {:?} to instantiate", instance.name);
            return format!("<!-- Error: Component {} not found -->", instance.name);
        };
        if self.instances.contains(&instance.name) {
            debug!("component {:?} instantiates itself", instance.name);
            return format!(
                "<!-- Error: Component {} cannot instantiate itself -->",
                instance.name
            );
        }
        trace!("instantiating {}", instance.name);

        let props: PropValues = instance
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.to_string()))
            .collect();
        let children = definition
            .children
            .iter()
            .filter(|child| !matches!(child, Node::Props(_)))
            .map(|child| substitute_props(child, &props))
            .collect::<Vec<_>>();

        self.instances.push(instance.name.clone());
        let lines = self.nested(&children, scope.inner());
        self.instances.pop();

        let id = self.generated_id(&instance.name);
        format!(
            "<div id=\"{}\" class=\"frobo-component-instance\">\n{}\n{}</div>",
            escape_html(&id),
            lines.join("\n"),
            self.pad()
        )
    }

    fn element(&mut self, element: &Element, scope: Scope<'_>) -> String {
        let text = element
            .text
            .as_deref()
            .map(|text| scope.substitute(text))
            .unwrap_or_default();
        let class = class_attribute(element, scope);
        let children = self.children_block(&element.children, scope.inner());
        let attribute_text = |name: &str| {
            element
                .attribute(name)
                .map(|value| scope.substitute(&value.to_string()).into_owned())
        };

        match element.name.as_str() {
            "text" => {
                let attributes = format!("{class}{}", style_attribute(&element.styles, None));
                self.text_tag("p", &text, &attributes, &children, scope)
            }
            "heading" => {
                let level = attribute_text("level")
                    .and_then(|level| level.parse::<u8>().ok())
                    .filter(|level| (1..=6).contains(level))
                    .unwrap_or(1);
                let attributes = format!("{class}{}", style_attribute(&element.styles, None));
                self.text_tag(&format!("h{level}"), &text, &attributes, &children, scope)
            }
            tag @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
                let attributes = format!("{class}{}", style_attribute(&element.styles, None));
                self.text_tag(tag, &text, &attributes, &children, scope)
            }
            "button" => {
                let onclick = element
                    .attribute("onClick")
                    .map(|handler| {
                        format!(" onclick=\"{}\"", escape_html(&handler_call(handler, scope)))
                    })
                    .unwrap_or_default();
                format!(
                    "<button{onclick}{class}{}>{}{children}</button>",
                    style_attribute(&element.styles, None),
                    escape_html(&text)
                )
            }
            "input" => {
                let input_type = attribute_text("type").unwrap_or_else(|| "text".to_string());
                let placeholder = attribute_text("placeholder").unwrap_or_else(|| text.to_string());
                let (id, binding) = self.input_binding(element, "input");
                format!(
                    "<input type=\"{}\" id=\"{}\" placeholder=\"{}\"{class}{}{binding} />",
                    escape_html(&input_type),
                    escape_html(&id),
                    escape_html(&placeholder),
                    style_attribute(&element.styles, None),
                )
            }
            "textarea" => {
                let placeholder = attribute_text("placeholder").unwrap_or_else(|| text.to_string());
                let (id, binding) = self.input_binding(element, "textarea");
                format!(
                    "<textarea id=\"{}\" placeholder=\"{}\"{class}{}{binding}></textarea>",
                    escape_html(&id),
                    escape_html(&placeholder),
                    style_attribute(&element.styles, None),
                )
            }
            "image" => {
                let src = attribute_text("src").unwrap_or_else(|| text.to_string());
                let alt = attribute_text("alt").unwrap_or_else(|| "Image".to_string());
                format!(
                    "<img src=\"{}\" alt=\"{}\"{class}{} />",
                    escape_html(&src),
                    escape_html(&alt),
                    style_attribute(&element.styles, None),
                )
            }
            "link" => {
                let href = attribute_text("href").unwrap_or_else(|| "#".to_string());
                let target = attribute_text("target")
                    .map(|target| format!(" target=\"{}\"", escape_html(&target)))
                    .unwrap_or_default();
                format!(
                    "<a href=\"{}\"{target}{class}{}>{}{children}</a>",
                    escape_html(&href),
                    style_attribute(&element.styles, None),
                    escape_html(&text)
                )
            }
            layout @ ("row" | "column" | "grid" | "center") => {
                let layout_style = match layout {
                    "row" => "display: flex; flex-direction: row; gap: 16px;".to_string(),
                    "column" => "display: flex; flex-direction: column; gap: 16px;".to_string(),
                    "grid" => format!(
                        "display: grid; grid-template-columns: repeat({}, 1fr); gap: 16px;",
                        attribute_text("cols").unwrap_or_else(|| "3".to_string())
                    ),
                    _ => "display: flex; justify-content: center; align-items: center;".to_string(),
                };
                format!(
                    "<div{class}{}>{}{children}</div>",
                    style_attribute(&element.styles, Some(&layout_style)),
                    escape_html(&text)
                )
            }
            _ => format!(
                "<div{class}{}>{}{children}</div>",
                style_attribute(&element.styles, None),
                escape_html(&text)
            ),
        }
    }

    /// A text-like tag. Text with interpolations becomes a template the runtime re-renders.
    fn text_tag(
        &mut self,
        tag: &str,
        text: &str,
        attributes: &str,
        children: &str,
        scope: Scope<'_>,
    ) -> String {
        let escaped = escape_html(text);
        let paths = if scope.loop_item.is_some() {
            vec![]
        } else {
            interpolated_paths(text)
        };
        if paths.is_empty() {
            return format!("<{tag}{attributes}>{escaped}{children}</{tag}>");
        }
        let id = self.unique_id(format!("text-{}", paths.iter().join("-").replace('.', "-")));
        format!(
            "<{tag} id=\"{id}\" data-template=\"{escaped}\" data-vars=\"{}\"{attributes}>{escaped}{children}</{tag}>",
            paths.iter().join(",")
        )
    }

    /// The id of an input or textarea and its binding attributes
    ///
    /// Only a value whose root names declared state or a computed value is bound. A dotted path
    /// such as `user.name` binds the nested field.
    fn input_binding(&mut self, element: &Element, kind: &str) -> (String, String) {
        let bound = element
            .attribute("value")
            .and_then(AttributeValue::as_name)
            .filter(|name| {
                let root = name.split('.').next().unwrap_or_default();
                self.state_names.contains(root)
            });

        let mut attributes = String::new();
        let id = match bound {
            Some(name) => {
                attributes.push_str(&format!(" data-bind=\"{}\"", escape_html(name)));
                self.unique_id(format!("{kind}-{}", name.replace('.', "-")))
            }
            None => {
                if let Some(value) = element.attribute("value") {
                    attributes.push_str(&format!(" value=\"{}\"", escape_html(&value.to_string())));
                }
                self.generated_id(kind)
            }
        };
        if let Some(handler) = element.attribute("onChange") {
            let name = match handler {
                AttributeValue::Call { name, .. } => name.clone(),
                other => other.to_string(),
            };
            attributes.push_str(&format!(" data-onchange=\"{}\"", escape_html(&name)));
        }
        (id, attributes)
    }

    /// One hidden block per branch. The runtime decides which one is shown.
    fn conditional(&mut self, statement: &IfStatement, scope: Scope<'_>) -> String {
        let id = self.generated_id("cond");
        let mut blocks = vec![self.branch(
            &format!("{id}-if"),
            Some(&statement.condition),
            &statement.consequent,
            scope,
        )];
        for (index, branch) in statement.else_ifs.iter().enumerate() {
            blocks.push(self.branch(
                &format!("{id}-elseif-{index}"),
                Some(&branch.condition),
                &branch.body,
                scope,
            ));
        }
        if let Some(alternate) = &statement.alternate {
            blocks.push(self.branch(&format!("{id}-else"), None, alternate, scope));
        }
        blocks.join(format!("\n{}", self.pad()).as_str())
    }

    fn branch(
        &mut self,
        id: &str,
        condition: Option<&Expr>,
        body: &[Node],
        scope: Scope<'_>,
    ) -> String {
        let condition = condition
            .map(|condition| {
                format!(
                    " data-condition=\"{}\"",
                    escape_html(&condition_script(condition))
                )
            })
            .unwrap_or_default();
        let children = self.children_block(body, scope.inner());
        format!("<div id=\"{id}\"{condition} style=\"display: none;\">{children}</div>")
    }

    /// An empty container the runtime fills from the template that follows it
    fn for_loop(&mut self, for_loop: &ForLoop) -> String {
        let id = self.generated_id("loop");
        let body = self.children_block(&for_loop.body, Scope::in_loop(&for_loop.item, &for_loop.array));
        format!(
            "<div id=\"{id}\" data-loop=\"{}\" data-item=\"{}\"><!-- Loop items will be rendered here --></div>\n{}<template id=\"{id}-template\">{body}</template>",
            escape_html(&for_loop.array),
            escape_html(&for_loop.item),
            self.pad()
        )
    }
}

/// The script run by a button's `onClick`. Calls keep their arguments and bare names are called
/// with none. Inside a loop, arguments naming the loop item look the item up by index.
fn handler_call(handler: &AttributeValue, scope: Scope<'_>) -> String {
    match handler {
        AttributeValue::Call { name, args } => format!(
            "{name}({})",
            args.iter().map(|arg| scope.argument(arg)).join(", ")
        ),
        other => {
            let handler = other.to_string();
            if handler.ends_with(')') {
                handler
            } else {
                format!("{handler}()")
            }
        }
    }
}

/// The `class` and `data-dynamic-class` attributes of an element
fn class_attribute(element: &Element, scope: Scope<'_>) -> String {
    let mut classes = vec![];
    if scope.loop_root {
        classes.push("loop-item".to_string());
    }
    let mut dynamic = String::new();
    match element.attribute("class") {
        Some(AttributeValue::ClassMap(map)) => {
            let map = map
                .iter()
                .map(|(class, condition)| {
                    (class.clone(), serde_json::Value::String(condition.clone()))
                })
                .collect::<serde_json::Map<_, _>>();
            dynamic = format!(
                " data-dynamic-class=\"{}\"",
                escape_html(&serde_json::Value::Object(map).to_string())
            );
        }
        Some(class) => classes.push(class.to_string()),
        None => {}
    }
    if classes.is_empty() {
        dynamic
    } else {
        format!(" class=\"{}\"{dynamic}", escape_html(&classes.join(" ")))
    }
}

/// The `style` attribute of an element, with any styles a layout tag adds after the user's own
fn style_attribute(styles: &IndexMap<String, String>, layout: Option<&str>) -> String {
    let inline = inline_styles(styles);
    let style = match (inline.is_empty(), layout) {
        (true, None) => return String::new(),
        (true, Some(layout)) => layout.to_string(),
        (false, None) => inline,
        (false, Some(layout)) => format!("{inline}; {layout}"),
    };
    format!(" style=\"{}\"", escape_html(&style))
}
