//! Indented tree printer for the AST
//!
//! Renders a program as a human-readable syntax tree, two spaces per level.
//! Child groups are introduced with a `|- Label:` line one level deeper than
//! their parent.

use crate::{Block, Expr, ExprKind, FunctionDecl, Program, Statement, StatementKind, VarDecl};

/// Trait for rendering AST nodes as an indented tree.
pub trait ToTree {
    /// Render at the given indentation level, without a trailing newline.
    fn to_tree(&self, indent: usize) -> String;
}

/// Helper to generate indentation string (two spaces per level).
fn indent_str(level: usize) -> String {
    "  ".repeat(level)
}

fn label(level: usize, text: &str) -> String {
    format!("{}|- {}", indent_str(level), text)
}

// ===== Program =====

impl ToTree for Program {
    fn to_tree(&self, indent: usize) -> String {
        let mut lines = vec![format!("{}Program", indent_str(indent))];

        for (i, decl) in self.declarations.iter().enumerate() {
            lines.push(label(indent + 1, &format!("Declaration {}:", i + 1)));
            lines.push(decl.to_tree(indent + 2));
        }

        lines.push(label(indent + 1, "Main:"));
        lines.push(self.main.body.to_tree(indent + 2));

        lines.join("\n")
    }
}

// ===== Statements =====

impl ToTree for Block {
    fn to_tree(&self, indent: usize) -> String {
        let mut lines = vec![format!("{}Block", indent_str(indent))];
        for (i, stmt) in self.statements.iter().enumerate() {
            lines.push(label(indent + 1, &format!("Statement {}:", i + 1)));
            lines.push(stmt.to_tree(indent + 2));
        }
        lines.join("\n")
    }
}

impl ToTree for Statement {
    fn to_tree(&self, indent: usize) -> String {
        let ind = indent_str(indent);
        match &self.kind {
            StatementKind::Expr(expr) => {
                format!("{}ExpressionStatement\n{}", ind, expr.to_tree(indent + 1))
            }
            StatementKind::VarDecl(decl) => decl.to_tree(indent),
            StatementKind::If { condition, then_branch, else_branch } => {
                let mut lines = vec![
                    format!("{}IfStatement", ind),
                    label(indent + 1, "Condition:"),
                    condition.to_tree(indent + 2),
                    label(indent + 1, "Then:"),
                    then_branch.to_tree(indent + 2),
                ];
                if let Some(else_branch) = else_branch {
                    lines.push(label(indent + 1, "Else:"));
                    lines.push(else_branch.to_tree(indent + 2));
                }
                lines.join("\n")
            }
            StatementKind::While { condition, body } => [
                format!("{}WhileStatement", ind),
                label(indent + 1, "Condition:"),
                condition.to_tree(indent + 2),
                label(indent + 1, "Body:"),
                body.to_tree(indent + 2),
            ]
            .join("\n"),
            StatementKind::Return(expr) => {
                format!("{}ReturnStatement\n{}", ind, expr.to_tree(indent + 1))
            }
            StatementKind::Function(func) => func.to_tree(indent),
        }
    }
}

impl ToTree for VarDecl {
    fn to_tree(&self, indent: usize) -> String {
        let header = format!("{}VarDeclaration(\"{}\")", indent_str(indent), self.name);
        match &self.initializer {
            Some(init) => [
                header,
                label(indent + 1, "Initializer:"),
                init.to_tree(indent + 2),
            ]
            .join("\n"),
            None => header,
        }
    }
}

impl ToTree for FunctionDecl {
    fn to_tree(&self, indent: usize) -> String {
        let params = if self.params.is_empty() {
            "(none)".to_string()
        } else {
            self.params.join(", ")
        };
        [
            format!("{}FunctionDeclaration(\"{}\")", indent_str(indent), self.name),
            label(indent + 1, &format!("Parameters: {}", params)),
            label(indent + 1, "Body:"),
            self.body.to_tree(indent + 2),
        ]
        .join("\n")
    }
}

// ===== Expressions =====

impl ToTree for Expr {
    fn to_tree(&self, indent: usize) -> String {
        let ind = indent_str(indent);
        match &self.kind {
            ExprKind::IntLiteral(n) => format!("{}Int({})", ind, n),
            ExprKind::BoolLiteral(b) => format!("{}Bool({})", ind, b),
            ExprKind::VariableRef(name) => format!("{}Variable(\"{}\")", ind, name),
            ExprKind::BinaryArith { op, left, right } => {
                binary(&ind, "Arith", op.symbol(), left, right, indent)
            }
            ExprKind::Comparison { op, left, right } => {
                binary(&ind, "Comparison", op.symbol(), left, right, indent)
            }
            ExprKind::Logical { op, left, right } => {
                binary(&ind, "Logical", op.symbol(), left, right, indent)
            }
            ExprKind::Unary { op, operand } => {
                format!("{}Unary({})\n{}", ind, op.symbol(), operand.to_tree(indent + 1))
            }
            ExprKind::Assignment { target, value } => {
                format!("{}Assignment(\"{}\")\n{}", ind, target, value.to_tree(indent + 1))
            }
            ExprKind::Call { name, args } => {
                let mut lines = vec![format!("{}Call(\"{}\")", ind, name)];
                lines.extend(args.iter().map(|arg| arg.to_tree(indent + 1)));
                lines.join("\n")
            }
        }
    }
}

fn binary(ind: &str, node: &str, symbol: &str, left: &Expr, right: &Expr, indent: usize) -> String {
    format!(
        "{}{}({})\n{}\n{}",
        ind,
        node,
        symbol,
        left.to_tree(indent + 1),
        right.to_tree(indent + 1)
    )
}
