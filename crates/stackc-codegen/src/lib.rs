//! stackc Codegen - x86-64 assembly generation
//!
//! Lowers a parsed program into AT&T assembly for an accumulator machine:
//! `%rax` holds the current value, `%rbx` a saved operand, and every value
//! occupies one 8-byte slot. The artifact relies on an external runtime
//! (included by name) for printing and exiting.

mod asm;
mod frame;
mod generator;
mod labels;
mod symbols;

pub use asm::*;
pub use frame::*;
pub use generator::*;
pub use labels::*;
pub use symbols::*;

use stackc_ast::Program;
use stackc_parser::ParseError;

/// Names the generated code uses to reach the outside world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Program entry label, exported with `.globl`
    pub entry_label: String,
    /// Runtime routine that prints `%rax`
    pub print_routine: String,
    /// Runtime routine that terminates the process
    pub exit_routine: String,
    /// Runtime source pulled in with `.include`, if any
    pub runtime_include: Option<String>,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            entry_label: "_start".to_string(),
            print_routine: "print_num".to_string(),
            exit_routine: "exit_program".to_string(),
            runtime_include: Some("runtime.s".to_string()),
        }
    }
}

/// Generate assembly for a parsed program
pub fn generate(program: &Program, options: &CodegenOptions) -> String {
    CodeGenerator::new(options).generate(program)
}

/// Parse and compile source text to assembly
pub fn compile(source: &str, options: &CodegenOptions) -> Result<String, ParseError> {
    let program = stackc_parser::parse(source)?;
    Ok(generate(&program, options))
}
