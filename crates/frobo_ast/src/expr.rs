//! Conditions used by `if` and `else if`

use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A condition expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A bare name, such as `count`
    Identifier(String),
    /// A dotted path of at least two names, such as `user.profile.name`
    Member(Vec<String>),
    Literal(Literal),
    /// `!operand`
    Not(Box<Expr>),
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Comparison {
        op: ComparisonOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Self::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn comparison(op: ComparisonOp, left: Expr, right: Expr) -> Self {
        Self::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: Expr) -> Self {
        Self::Not(Box::new(operand))
    }

    /// Creates an identifier or member expression from a path
    pub fn path(mut segments: Vec<String>) -> Self {
        if segments.len() == 1 {
            Self::Identifier(segments.remove(0))
        } else {
            Self::Member(segments)
        }
    }
}

/// Displays the expression the way it was written, fully parenthesized
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Identifier(id) => write!(f, "{id}"),
            Expr::Member(path) => write!(f, "{}", path.iter().join(".")),
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Not(operand) => write!(f, "!({operand})"),
            Expr::Logical { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Comparison { op, left, right } => write!(f, "{left} {op} {right}"),
        }
    }
}

/// A literal scalar
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    /// The number exactly as written
    Number(String),
    Boolean(bool),
    Null,
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::String(s) => write!(f, "\"{s}\""),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Null => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum LogicalOp {
    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "||")]
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ComparisonOp {
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">=")]
    Gte,
    #[strum(serialize = "<=")]
    Lte,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Neq,
}
