//! Expression tree shared by the parser and the typesetter.

pub mod expression;
pub mod latex;

pub use expression::{Constant, Expr};
pub use latex::{LaTeXExpr, LaTeXStatement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,  // = or ==
    Neq, // ~= or !=
    Lt,  // <
    Gt,  // >
    Leq, // <=
    Geq, // >=
}

impl std::fmt::Display for RelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelOp::Eq => write!(f, "="),
            RelOp::Neq => write!(f, "!="),
            RelOp::Lt => write!(f, "<"),
            RelOp::Gt => write!(f, ">"),
            RelOp::Leq => write!(f, "<="),
            RelOp::Geq => write!(f, ">="),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub lhs: Expr, // Left Hand Side
    pub rhs: Expr, // Right Hand Side
    pub op: RelOp,
}

/// A single parsed source statement: a bare expression or a relation.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Expr),
    Equation(Equation),
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Expression(e) => write!(f, "{}", e),
            Statement::Equation(eq) => write!(f, "{} {} {}", eq.lhs, eq.op, eq.rhs),
        }
    }
}
