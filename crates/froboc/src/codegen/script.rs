//! Script generation

use crate::codegen::rewrite::Qualifier;
use crate::codegen::runtime::{
    CONDITIONALS, DYNAMIC_CLASSES, FETCH_HELPER, INPUT_BINDINGS, LOOPS, RUNTIME, TEXT_WATCHERS,
};
use crate::reactive::to_json;
use frobo_ast::items::{Component, Function};
use frobo_ast::statements::{FetchDeclaration, HookKind};
use frobo_ast::values::StateValue;
use frobo_ast::{Node, Program};
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::trace;

/// Parameters every watcher callback receives
const WATCHER_PARAMS: [&str; 2] = ["newVal", "oldVal"];

/// Writes the script of a program
#[derive(Debug)]
pub struct ScriptWriter<'p> {
    program: &'p Program,
    /// Every state name, over all components
    states: Vec<&'p str>,
    /// Every computed name, over all components
    computed: Vec<&'p str>,
}

impl<'p> ScriptWriter<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            states: program
                .states()
                .map(|state| state.name.as_str())
                .unique()
                .collect(),
            computed: program
                .computed()
                .map(|computed| computed.name.as_str())
                .unique()
                .collect(),
        }
    }

    pub fn program(&self) -> String {
        let mut sections = vec![RUNTIME.to_string()];
        sections.extend(self.imports());
        sections.push(self.initial_state());
        sections.extend(self.computed_properties());
        if self.components().any(|component| fetches(component).next().is_some()) {
            sections.push(format!("// Fetch helper function\n{FETCH_HELPER}"));
        }
        sections.extend(self.listener());
        sections.extend(self.functions());
        sections.push("console.log(\"Frobo app loaded!\");".to_string());
        sections.join("\n\n").trim().to_string()
    }

    fn components(&self) -> impl Iterator<Item = &'p Component> {
        self.program.components()
    }

    /// Names readable as state from script bodies
    fn readable(&self) -> impl Iterator<Item = &'p str> + '_ {
        self.states.iter().chain(&self.computed).copied()
    }

    fn imports(&self) -> Option<String> {
        let imports = self
            .program
            .children
            .iter()
            .filter_map(|child| match child.declaration() {
                Node::Import(import) => Some(format!(
                    "// import {{ {} }} from {}",
                    import.specifiers.join(", "),
                    serde_json::Value::String(import.source.clone())
                )),
                _ => None,
            })
            .collect::<Vec<_>>();
        (!imports.is_empty()).then(|| imports.join("\n"))
    }

    /// The state record. A name declared more than once keeps its first position and last value.
    fn initial_state(&self) -> String {
        let mut initial = IndexMap::new();
        for state in self.program.states() {
            initial.insert(state.name.as_str(), state_literal(&state.value));
        }
        let record = if initial.is_empty() {
            "{}".to_string()
        } else {
            format!(
                "{{ {} }}",
                initial
                    .iter()
                    .map(|(name, value)| format!("{name}: {value}"))
                    .join(", ")
            )
        };
        format!("// Initialize state\nconst state = Frobo.createState({record});")
    }

    fn computed_properties(&self) -> Option<String> {
        let properties = self
            .program
            .computed()
            .map(|computed| {
                let others = self
                    .computed
                    .iter()
                    .copied()
                    .filter(|name| *name != computed.name);
                let expression = Qualifier::new(self.states.iter().copied().chain(others))
                    .rewrite(&computed.expression);
                trace!("computed {} = {expression}", computed.name);
                format!(
                    "Object.defineProperty(state, '{}', {{\n  get() {{ return {expression}; }},\n  enumerable: true\n}});\nFrobo.computedKeys.push('{}');",
                    computed.name, computed.name
                )
            })
            .collect::<Vec<_>>();
        (!properties.is_empty()).then(|| format!("// Computed properties\n{}", properties.join("\n")))
    }

    /// Registers everything that touches the document once it is loaded. Only written when some
    /// component has state.
    fn listener(&self) -> Option<String> {
        let stateful = self
            .components()
            .filter(|component| component.states().next().is_some())
            .collect::<Vec<_>>();
        if stateful.is_empty() {
            return None;
        }
        let qualifier = Qualifier::new(self.readable()).qualify_assignments();

        let mut body = String::from(DYNAMIC_CLASSES);
        for component in stateful {
            trace!("registering reactive elements of {}", component.name);
            for child in &component.children {
                if let Node::Watcher(watcher) = child {
                    let root = watcher.target.split('.').next().unwrap_or(&watcher.target);
                    let rewritten = Qualifier::new(self.readable())
                        .excluding(WATCHER_PARAMS)
                        .qualify_assignments()
                        .rewrite(&watcher.body);
                    body.push_str(&format!(
                        "\n  Frobo.addWatcher('{root}', (newVal, oldVal) => {{\n{}\n  }});\n",
                        indent(&rewritten, 4)
                    ));
                }
            }
            let calls = fetches(component).map(fetch_call).collect::<Vec<_>>();
            if !calls.is_empty() {
                body.push_str(&format!("\n  // Fetch data\n{}\n", calls.join("\n")));
            }
            for child in &component.children {
                match child {
                    Node::LifecycleHook(hook) if hook.kind == HookKind::Mount => {
                        body.push_str(&format!(
                            "\n  // onMount lifecycle\n{}\n",
                            indent(&qualifier.rewrite(&hook.body), 2)
                        ));
                    }
                    Node::LifecycleHook(hook) => {
                        body.push_str(&format!(
                            "\n  // onUpdate lifecycle\n  Frobo.onUpdate(() => {{\n{}\n  }});\n",
                            indent(&qualifier.rewrite(&hook.body), 4)
                        ));
                    }
                    _ => {}
                }
            }
        }
        for section in [TEXT_WATCHERS, CONDITIONALS, INPUT_BINDINGS, LOOPS] {
            body.push('\n');
            body.push_str(section);
        }
        Some(format!(
            "// Register reactive elements\nwindow.addEventListener('DOMContentLoaded', () => {{\n{body}}});"
        ))
    }

    fn functions(&self) -> Vec<String> {
        self.program
            .children
            .iter()
            .filter_map(|child| match child.declaration() {
                Node::Function(function) => Some(self.function(function, false)),
                Node::AsyncFunction(function) => Some(self.function(function, true)),
                _ => None,
            })
            .collect()
    }

    /// Parameters shadow state names inside the body
    fn function(&self, function: &Function, is_async: bool) -> String {
        let body = Qualifier::new(self.readable())
            .excluding(function.params.iter().map(String::as_str))
            .qualify_assignments()
            .rewrite(&function.body);
        format!(
            "{}function {}({}) {{\n{}\n}}",
            if is_async { "async " } else { "" },
            function.name,
            function.params.join(", "),
            indent(&body, 2)
        )
    }
}

fn fetches(component: &Component) -> impl Iterator<Item = &FetchDeclaration> {
    component.children.iter().filter_map(|child| match child {
        Node::Fetch(fetch) => Some(fetch),
        _ => None,
    })
}

fn fetch_call(fetch: &FetchDeclaration) -> String {
    let key = |key: &Option<String>| {
        key.as_ref()
            .map(|key| serde_json::Value::String(key.clone()).to_string())
            .unwrap_or_else(|| "null".to_string())
    };
    format!(
        "  froboFetch({}, {}, {}, {});",
        serde_json::Value::String(fetch.url.clone()),
        key(&fetch.into),
        key(&fetch.loading),
        key(&fetch.error)
    )
}

/// Numbers keep the text they were written with, everything else is written as JSON
fn state_literal(value: &StateValue) -> String {
    match value {
        StateValue::Number(number) => number.clone(),
        other => to_json(other).to_string(),
    }
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .join("\n")
}
