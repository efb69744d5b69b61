//! Statements that may appear inside a component body

use crate::expr::Expr;
use crate::values::StateValue;
use crate::Node;
use frobo_tokens::location::Location;

/// `state name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct StateDeclaration {
    pub name: String,
    pub value: StateValue,
    pub location: Location,
}

/// `computed name = expression`
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedDeclaration {
    pub name: String,
    /// The expression, re-joined from its tokens
    pub expression: String,
    pub location: Location,
}

/// `props a, b, c`
#[derive(Debug, Clone, PartialEq)]
pub struct PropsDeclaration {
    pub names: Vec<String>,
    pub location: Location,
}

/// Which lifecycle event a hook runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum HookKind {
    #[strum(serialize = "onMount")]
    Mount,
    #[strum(serialize = "onUpdate")]
    Update,
}

/// `onMount { ... }` or `onUpdate { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleHook {
    pub kind: HookKind,
    pub body: String,
    pub location: Location,
}

/// `fetch url="..." into=data loading=isLoading error=err`
#[derive(Debug, Clone, PartialEq)]
pub struct FetchDeclaration {
    pub url: String,
    pub into: Option<String>,
    pub loading: Option<String>,
    pub error: Option<String>,
    pub location: Location,
}

/// `watch name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Watcher {
    pub target: String,
    pub body: String,
    pub location: Location,
}

/// One `else if condition { ... }` branch
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfBranch {
    pub condition: Expr,
    pub body: Vec<Node>,
}

/// `if condition { ... } else if ... else { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expr,
    pub consequent: Vec<Node>,
    pub else_ifs: Vec<ElseIfBranch>,
    pub alternate: Option<Vec<Node>>,
    pub location: Location,
}

/// `for item in array { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub item: String,
    pub array: String,
    pub body: Vec<Node>,
    pub location: Location,
}
