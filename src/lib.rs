//! stackc - a compiler from a small imperative language to x86-64 assembly
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use stackc_ast as ast;
pub use stackc_codegen as codegen;
pub use stackc_lexer as lexer;
pub use stackc_parser as parser;

pub use stackc_codegen::{compile, CodegenOptions};
