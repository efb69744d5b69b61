//! Lowers conditions into script expressions evaluated against the runtime state

use frobo_ast::expr::Expr;
use itertools::Itertools;

/// Renders a condition as a script expression. Names become reads of `state`, and every step of
/// a member path uses optional chaining so a missing object reads as `undefined`.
///
/// `(a && b) || !c` renders as `((state.a && state.b) || !(state.c))`.
pub fn condition_script(expr: &Expr) -> String {
    match expr {
        Expr::Identifier(name) => format!("state.{name}"),
        Expr::Member(path) => format!("state.{}", path.iter().join("?.")),
        Expr::Literal(literal) => literal.to_string(),
        Expr::Not(operand) => format!("!({})", condition_script(operand)),
        Expr::Logical { op, left, right } => format!(
            "({} {op} {})",
            condition_script(left),
            condition_script(right)
        ),
        Expr::Comparison { op, left, right } => format!(
            "{} {op} {}",
            condition_script(left),
            condition_script(right)
        ),
    }
}
