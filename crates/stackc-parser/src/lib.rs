//! stackc Parser - Recursive descent parser
//!
//! Parses source text into a `Program` AST with one token of lookahead.
//! Precedence, lowest to highest:
//! - assignment (right-associative)
//! - `||`, then `&&`
//! - `==` `!=`, then `<` `>` `<=` `>=`
//! - `+` `-`, then `*` `/`
//! - unary `!`, then primaries
//!
//! The first error aborts the parse; no partial tree is returned.

mod error;
mod parser;

pub use error::*;
pub use parser::*;

use stackc_ast::Program;
use stackc_lexer::tokenize;

/// Parse a source string into a Program AST
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}
