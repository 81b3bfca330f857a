//! Expression AST nodes

use serde::{Deserialize, Serialize};
use crate::Span;

/// An expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Integer literal: `42`
    IntLiteral(i64),

    /// Boolean literal: `true`, `false`
    BoolLiteral(bool),

    /// Variable reference: `x`
    VariableRef(String),

    /// Arithmetic: `a + b`, `a / b`
    BinaryArith {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Comparison: `a < b`, `a == b`
    Comparison {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Short-circuit logic: `a && b`, `a || b`
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation: `!x`
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Assignment: `x = 5`
    Assignment {
        target: String,
        value: Box<Expr>,
    },

    /// Function call: `foo(a, b)`
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Yields the variable name if this is a `VariableRef`, handing the
    /// expression back otherwise.
    pub fn into_variable(self) -> Result<String, Expr> {
        match self.kind {
            ExprKind::VariableRef(name) => Ok(name),
            kind => Err(Expr { kind, span: self.span }),
        }
    }

    pub fn is_assignment(&self) -> bool {
        matches!(self.kind, ExprKind::Assignment { .. })
    }
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
        }
    }
}
