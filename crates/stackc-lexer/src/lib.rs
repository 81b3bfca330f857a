//! stackc Lexer - Tokenization using logos
//!
//! Multi-character operators (`==`, `!=`, `<=`, `>=`, `&&`, `||`) are
//! resolved by longest match. Keywords are matched on exact text; every other
//! word is an identifier. Scanning stops at the first unrecognized character.

mod token;

pub use token::*;

use logos::Logos;
use stackc_ast::Span;
use thiserror::Error;

/// Lexical errors. There is no recovery: the first one aborts scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at offset {}", span.start)]
    UnexpectedChar { ch: char, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
        }
    }
}

/// Tokenize a source string into a vector of tokens ending with `Eof`
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        let kind = match result {
            Ok(kind) => kind,
            Err(_) => {
                let ch = source[span.start..].chars().next().unwrap_or('\0');
                let span = Span::new(span.start, span.start + ch.len_utf8());
                return Err(LexError::UnexpectedChar { ch, span });
            }
        };
        tokens.push(Token {
            kind,
            lexeme: lexer.slice().to_string(),
            span,
        });
    }

    // Add EOF token
    let end = source.len();
    tokens.push(Token {
        kind: TokenKind::Eof,
        lexeme: String::new(),
        span: Span::new(end, end),
    });

    log::trace!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Ok(tokens)
}

/// A token with its text and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    /// Byte offset of the token in the source
    pub fn offset(&self) -> usize {
        self.span.start
    }
}
