//! x86-64 assembly generation
//!
//! Every expression leaves its value in `%rax`. Operands waiting on a second
//! evaluation are parked on the machine stack and popped back into `%rbx`.
//! Inside a function, names resolve to frame slots first and fall back to
//! data-segment symbols.

use std::fmt;

use stackc_ast::*;

use crate::{collect_data_symbols, Asm, CodegenOptions, FrameLayout, LabelGenerator, SLOT_SIZE};

/// Where a variable lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Storage<'n> {
    /// Offset from `%rbp`
    Frame(i64),
    /// Data-segment symbol
    Global(&'n str),
}

impl fmt::Display for Storage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Storage::Frame(offset) => write!(f, "{}(%rbp)", offset),
            Storage::Global(name) => write!(f, "{}(%rip)", name),
        }
    }
}

/// Assembly generator for one compilation run
pub struct CodeGenerator<'o> {
    options: &'o CodegenOptions,
    asm: Asm,
    labels: LabelGenerator,
    /// Layout of the function being compiled; `None` at the entry point
    frame: Option<FrameLayout>,
}

impl<'o> CodeGenerator<'o> {
    pub fn new(options: &'o CodegenOptions) -> Self {
        Self {
            options,
            asm: Asm::new(),
            labels: LabelGenerator::new(),
            frame: None,
        }
    }

    /// Generate the complete assembly artifact for a program
    pub fn generate(mut self, program: &Program) -> String {
        let data_symbols = collect_data_symbols(program);
        log::debug!(
            "generating assembly: {} data symbols, {} functions",
            data_symbols.len(),
            program.functions().count()
        );

        if !data_symbols.is_empty() {
            self.asm.directive(".section .bss");
            for name in &data_symbols {
                self.asm.directive(format!(".lcomm {}, {}", name, SLOT_SIZE));
            }
            self.asm.blank();
        }

        self.asm.directive(".section .text");
        self.asm.directive(format!(".globl {}", self.options.entry_label));
        self.asm.blank();

        for func in program.functions() {
            self.gen_function(func);
            self.asm.blank();
        }

        self.asm.label(&self.options.entry_label);
        for stmt in &program.declarations {
            if !matches!(stmt.kind, StatementKind::Function(_)) {
                self.gen_statement(stmt);
            }
        }
        self.gen_block(&program.main.body);

        self.asm.blank();
        self.asm.ins(format!("call {}", self.options.exit_routine));
        if let Some(runtime) = &self.options.runtime_include {
            self.asm.blank();
            self.asm.directive(format!(".include \"{}\"", runtime));
        }

        log::debug!("issued {} control-flow labels", self.labels.issued());
        self.asm.finish()
    }

    // === Functions ===

    fn gen_function(&mut self, func: &FunctionDecl) {
        let layout = FrameLayout::collect(func);
        log::debug!(
            "function `{}`: {} params, {} locals, {} bytes of frame",
            func.name,
            layout.params().len(),
            layout.locals().len(),
            layout.stack_size()
        );

        self.asm.label(&func.name);
        self.asm.ins("push %rbp");
        self.asm.ins("mov %rsp, %rbp");
        if layout.stack_size() > 0 {
            self.asm.ins(format!("sub ${}, %rsp", layout.stack_size()));
        }

        let saved = self.frame.replace(layout);
        self.gen_block(&func.body);

        let ends_with_return = matches!(
            func.body.statements.last().map(|s| &s.kind),
            Some(StatementKind::Return(_))
        );
        if !ends_with_return {
            self.asm.ins("mov $0, %rax");
            self.gen_frame_exit();
        }
        self.frame = saved;
    }

    /// Release the current frame and return to the caller
    fn gen_frame_exit(&mut self) {
        let stack_size = self.frame.as_ref().map_or(0, FrameLayout::stack_size);
        if stack_size > 0 {
            self.asm.ins(format!("add ${}, %rsp", stack_size));
        }
        self.asm.ins("pop %rbp");
        self.asm.ins("ret");
    }

    // === Statements ===

    fn gen_block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.gen_statement(stmt);
        }
    }

    fn gen_statement(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::Expr(expr) => {
                self.gen_expr(expr);
                if !expr.is_assignment() {
                    self.asm.ins(format!("call {}", self.options.print_routine));
                }
            }
            StatementKind::VarDecl(decl) => {
                match &decl.initializer {
                    Some(init) => self.gen_expr(init),
                    None => self.asm.ins("mov $0, %rax"),
                }
                let storage = self.resolve(&decl.name);
                self.asm.ins(format!("mov %rax, {}", storage));
            }
            StatementKind::If { condition, then_branch, else_branch } => {
                let else_label = self.labels.next("else");
                let end_label = self.labels.next("end");

                self.gen_expr(condition);
                self.asm.ins("cmp $0, %rax");
                self.asm.ins(format!("jz {}", else_label));
                self.gen_block(then_branch);

                match else_branch {
                    Some(else_branch) => {
                        self.asm.ins(format!("jmp {}", end_label));
                        self.asm.label(&else_label);
                        self.gen_block(else_branch);
                        self.asm.label(&end_label);
                    }
                    None => self.asm.label(&else_label),
                }
            }
            StatementKind::While { condition, body } => {
                let loop_label = self.labels.next("loop");
                let end_label = self.labels.next("end");

                self.asm.label(&loop_label);
                self.gen_expr(condition);
                self.asm.ins("cmp $0, %rax");
                self.asm.ins(format!("jz {}", end_label));
                self.gen_block(body);
                self.asm.ins(format!("jmp {}", loop_label));
                self.asm.label(&end_label);
            }
            StatementKind::Return(expr) => {
                self.gen_expr(expr);
                if self.frame.is_some() {
                    self.gen_frame_exit();
                } else {
                    // The entry point has no caller: report the value and stop.
                    self.asm.ins(format!("call {}", self.options.print_routine));
                    self.asm.ins(format!("call {}", self.options.exit_routine));
                }
            }
            StatementKind::Function(func) => {
                // Only reachable for hand-built trees; keep it out of the
                // enclosing instruction stream.
                let skip_label = self.labels.next("after");
                self.asm.ins(format!("jmp {}", skip_label));
                self.gen_function(func);
                self.asm.label(&skip_label);
            }
        }
    }

    // === Expressions ===

    fn gen_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::IntLiteral(n) => self.asm.ins(format!("mov ${}, %rax", n)),
            ExprKind::BoolLiteral(b) => self.asm.ins(format!("mov ${}, %rax", *b as i64)),
            ExprKind::VariableRef(name) => {
                let storage = self.resolve(name);
                self.asm.ins(format!("mov {}, %rax", storage));
            }
            ExprKind::BinaryArith { op, left, right } => {
                // Right first, so the left operand ends up in %rax
                self.gen_expr(right);
                self.asm.ins("push %rax");
                self.gen_expr(left);
                self.asm.ins("pop %rbx");
                match op {
                    ArithOp::Add => self.asm.ins("add %rbx, %rax"),
                    ArithOp::Sub => self.asm.ins("sub %rbx, %rax"),
                    ArithOp::Mul => self.asm.ins("imul %rbx, %rax"),
                    ArithOp::Div => {
                        self.asm.ins("cqo");
                        self.asm.ins("idiv %rbx");
                    }
                }
            }
            ExprKind::Comparison { op, left, right } => {
                self.gen_expr(left);
                self.asm.ins("push %rax");
                self.gen_expr(right);
                self.asm.ins("pop %rbx");
                self.asm.ins("cmp %rax, %rbx");
                let set = match op {
                    CompareOp::Eq => "sete",
                    CompareOp::Ne => "setne",
                    CompareOp::Lt => "setl",
                    CompareOp::Gt => "setg",
                    CompareOp::Le => "setle",
                    CompareOp::Ge => "setge",
                };
                self.asm.ins(format!("{} %al", set));
                self.asm.ins("movzbl %al, %eax");
            }
            ExprKind::Logical { op, left, right } => {
                let short_label = self.labels.next("short");
                let end_label = self.labels.next("end");

                self.gen_expr(left);
                self.asm.ins("cmp $0, %rax");
                match op {
                    LogicalOp::Or => self.asm.ins(format!("jnz {}", short_label)),
                    LogicalOp::And => self.asm.ins(format!("jz {}", short_label)),
                }
                self.gen_expr(right);
                self.asm.ins(format!("jmp {}", end_label));
                self.asm.label(&short_label);
                self.asm.label(&end_label);
            }
            ExprKind::Unary { op: UnaryOp::Not, operand } => {
                self.gen_expr(operand);
                self.asm.ins("cmp $0, %rax");
                self.asm.ins("sete %al");
                self.asm.ins("movzbl %al, %eax");
            }
            ExprKind::Assignment { target, value } => {
                self.gen_expr(value);
                let storage = self.resolve(target);
                self.asm.ins(format!("mov %rax, {}", storage));
            }
            ExprKind::Call { name, args } => {
                // Rightmost first, so the first argument lands nearest the frame
                for arg in args.iter().rev() {
                    self.gen_expr(arg);
                    self.asm.ins("push %rax");
                }
                self.asm.ins(format!("call {}", name));
                if !args.is_empty() {
                    self.asm.ins(format!("add ${}, %rsp", args.len() as i64 * SLOT_SIZE));
                }
            }
        }
    }

    /// Parameter slot, then local slot, then data-segment symbol
    fn resolve<'n>(&self, name: &'n str) -> Storage<'n> {
        self.frame
            .as_ref()
            .and_then(|frame| frame.offset_of(name))
            .map(Storage::Frame)
            .unwrap_or(Storage::Global(name))
    }
}
