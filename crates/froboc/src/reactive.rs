//! An observable property map with the same semantics as the state proxy of the emitted runtime.
//!
//! Writes are batched: every written key is queued once until the next [flush](ReactiveState::flush),
//! while watchers of that key are called right away with the new and old values.

use frobo_ast::values::StateValue;
use frobo_ast::Program;
use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Number, Value};
use std::fmt::{Debug, Formatter};
use std::str::FromStr;
use tracing::trace;

/// A callback run when a key is written, with the new and old value
pub type Watcher = Box<dyn FnMut(&Value, &Value) + Send>;

/// Converts a state literal into a json value. Numbers json can't represent are kept as strings.
pub fn to_json(value: &StateValue) -> Value {
    match value {
        StateValue::Number(number) => Number::from_str(number)
            .map(Value::Number)
            .unwrap_or_else(|_| Value::String(number.clone())),
        StateValue::String(s) => Value::String(s.clone()),
        StateValue::Boolean(b) => Value::Bool(*b),
        StateValue::Null => Value::Null,
        StateValue::Array(items) => Value::Array(items.iter().map(to_json).collect()),
        StateValue::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, value)| (key.clone(), to_json(value)))
                .collect::<Map<_, _>>(),
        ),
    }
}

/// The state record of a program
#[derive(Default)]
pub struct ReactiveState {
    values: IndexMap<String, Value>,
    watchers: IndexMap<String, Vec<Watcher>>,
    queue: IndexSet<String>,
}

impl ReactiveState {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the record from every state declaration of every component. A name declared twice
    /// keeps the later value.
    pub fn from_program(program: &Program) -> Self {
        let values = program
            .states()
            .map(|state| (state.name.clone(), to_json(&state.value)))
            .collect();
        Self {
            values,
            ..Default::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Writes a value, queueing the key and then calling its watchers. Unset keys read as null
    /// to watchers.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let old = self
            .values
            .insert(key.clone(), value.clone())
            .unwrap_or(Value::Null);
        trace!("set {key}: {old} -> {value}");
        self.queue.insert(key.clone());
        if let Some(watchers) = self.watchers.get_mut(&key) {
            for watcher in watchers {
                watcher(&value, &old);
            }
        }
    }

    /// Registers a callback for writes of a key
    pub fn add_watcher<F>(&mut self, key: impl Into<String>, callback: F)
    where
        F: FnMut(&Value, &Value) + Send + 'static,
    {
        self.watchers
            .entry(key.into())
            .or_default()
            .push(Box::new(callback));
    }

    /// Keys written since the last flush, in the order they were first written
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    /// Takes every pending key
    pub fn flush(&mut self) -> Vec<String> {
        self.queue.drain(..).collect()
    }

    /// The record as a json object
    pub fn snapshot(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

impl Debug for ReactiveState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactiveState")
            .field("values", &self.values)
            .field("watched", &self.watchers.keys().collect::<Vec<_>>())
            .field("queue", &self.queue)
            .finish()
    }
}
