//! Initial values of state declarations

use indexmap::IndexMap;

/// The initial value of a `state` declaration
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    /// The number exactly as written, including a leading `-`
    Number(String),
    String(String),
    Boolean(bool),
    Null,
    Array(Vec<StateValue>),
    /// Keys keep the order they were written in
    Object(IndexMap<String, StateValue>),
}

impl StateValue {
    /// Is this value a scalar
    pub fn is_scalar(&self) -> bool {
        !matches!(self, StateValue::Array(_) | StateValue::Object(_))
    }
}
