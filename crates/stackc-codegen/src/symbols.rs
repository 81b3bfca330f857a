//! Data-segment symbol collection
//!
//! Every `let` that executes outside a function frame needs one zero-filled
//! slot in the data segment. That covers top-level declarations, `let`s in
//! `main` at any depth, and `let`s nested inside a function's `if`/`while`
//! bodies that the frame layout did not give a slot.

use std::collections::HashSet;

use stackc_ast::{Block, FunctionDecl, Program, Statement, StatementKind};

use crate::FrameLayout;

/// Names of all data-segment slots, in first-seen order without duplicates
pub fn collect_data_symbols(program: &Program) -> Vec<String> {
    let mut symbols = DataSymbols::default();
    for stmt in &program.declarations {
        symbols.visit_global(stmt);
    }
    symbols.visit_global_block(&program.main.body);
    symbols.names
}

#[derive(Default)]
struct DataSymbols {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl DataSymbols {
    fn add(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    fn visit_global_block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.visit_global(stmt);
        }
    }

    fn visit_global(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::VarDecl(decl) => self.add(&decl.name),
            StatementKind::If { then_branch, else_branch, .. } => {
                self.visit_global_block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit_global_block(else_branch);
                }
            }
            StatementKind::While { body, .. } => self.visit_global_block(body),
            StatementKind::Function(func) => self.visit_function(func),
            StatementKind::Expr(_) | StatementKind::Return(_) => {}
        }
    }

    fn visit_function(&mut self, func: &FunctionDecl) {
        let layout = FrameLayout::collect(func);
        for stmt in &func.body.statements {
            self.visit_framed(stmt, &layout);
        }
    }

    fn visit_framed_block(&mut self, block: &Block, layout: &FrameLayout) {
        for stmt in &block.statements {
            self.visit_framed(stmt, layout);
        }
    }

    fn visit_framed(&mut self, stmt: &Statement, layout: &FrameLayout) {
        match &stmt.kind {
            StatementKind::VarDecl(decl) => {
                if layout.offset_of(&decl.name).is_none() {
                    self.add(&decl.name);
                }
            }
            StatementKind::If { then_branch, else_branch, .. } => {
                self.visit_framed_block(then_branch, layout);
                if let Some(else_branch) = else_branch {
                    self.visit_framed_block(else_branch, layout);
                }
            }
            StatementKind::While { body, .. } => self.visit_framed_block(body, layout),
            StatementKind::Function(func) => self.visit_function(func),
            StatementKind::Expr(_) | StatementKind::Return(_) => {}
        }
    }
}
