//! Parser error types

use stackc_ast::Span;
use stackc_lexer::{LexError, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexError),

    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("expected 'main()' function, found {found}")]
    MissingMain { found: String, span: Span },

    #[error("invalid assignment target")]
    InvalidAssignmentTarget { span: Span },

    #[error("expected number, variable, or '(', found {found}")]
    ExpectedExpression { found: String, span: Span },

    #[error("integer literal {literal} does not fit in 64 bits")]
    IntegerOutOfRange { literal: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lexical(err) => err.span(),
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::MissingMain { span, .. } => *span,
            ParseError::InvalidAssignmentTarget { span } => *span,
            ParseError::ExpectedExpression { span, .. } => *span,
            ParseError::IntegerOutOfRange { span, .. } => *span,
        }
    }

    /// Whether this error came from the tokenizer rather than the grammar
    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lexical(_))
    }

    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.describe().to_string(),
            span,
        }
    }
}
