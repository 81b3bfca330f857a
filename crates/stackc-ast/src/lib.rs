//! stackc AST - Core types for the abstract syntax tree
//!
//! This crate defines the AST node types produced by the parser and consumed
//! by the code generator and the tree printer. The tree is built once and
//! never mutated afterwards; every node owns its children.

mod span;
mod expr;
mod stmt;
mod printer;

pub use span::*;
pub use expr::*;
pub use stmt::*;
pub use printer::*;

use serde::{Deserialize, Serialize};

/// A complete program: top-level declarations followed by `main`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level `let`, `fun` and any other statements, in source order
    pub declarations: Vec<Statement>,
    pub main: MainFunction,
    pub span: Span,
}

impl Program {
    /// Function declarations at the top level, in source order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.declarations.iter().filter_map(|stmt| match &stmt.kind {
            StatementKind::Function(func) => Some(func),
            _ => None,
        })
    }
}

/// The `main() { ... }` entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainFunction {
    pub body: Block,
    pub span: Span,
}
