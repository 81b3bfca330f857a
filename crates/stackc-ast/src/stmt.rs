//! Statement and declaration AST nodes

use serde::{Deserialize, Serialize};
use crate::{Span, Expr};

/// A block of statements: `{ stmt* }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// A statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    /// Expression statement: `foo();`
    Expr(Expr),

    /// Variable declaration: `let x = 5;` or `let x;`
    VarDecl(VarDecl),

    /// Conditional: `if (c) { ... } else { ... }`
    If {
        condition: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },

    /// Loop: `while (c) { ... }`
    While {
        condition: Expr,
        body: Block,
    },

    /// Return statement: `return x;`
    Return(Expr),

    /// Function declaration: `fun add(a, b) { ... }`
    Function(FunctionDecl),
}

/// Variable declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: String,
    pub initializer: Option<Expr>,
    pub span: Span,
}

/// Function declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub span: Span,
}
