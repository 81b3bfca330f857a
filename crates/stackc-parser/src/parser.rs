//! Recursive descent parser implementation

use stackc_ast::*;
use stackc_lexer::{Token, TokenKind};

use crate::ParseError;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// `tokens` must end with an `Eof` token, as produced by `tokenize`.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    // === Utilities ===

    fn current(&self) -> &Token {
        match self.tokens.get(self.pos) {
            Some(token) => token,
            None => &self.tokens[self.tokens.len() - 1],
        }
    }

    fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len().saturating_sub(1) {
            self.pos += 1;
        }
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    /// Consume the current token if it has the given kind
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(
                kind.describe(),
                self.peek(),
                self.span(),
            ))
        }
    }

    fn span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| t.span)
            .unwrap_or_default()
    }

    /// Span of the most recently consumed token
    fn prev_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
            .unwrap_or_default()
    }

    // === Program ===

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let start = self.span();
        let mut declarations = Vec::new();

        while !self.at(TokenKind::Eof) && !self.at(TokenKind::Main) {
            declarations.push(self.parse_declaration()?);
        }

        if !self.at(TokenKind::Main) {
            return Err(ParseError::MissingMain {
                found: self.peek().describe().to_string(),
                span: self.span(),
            });
        }
        let main = self.parse_main()?;

        if !self.at(TokenKind::Eof) {
            return Err(ParseError::unexpected(
                TokenKind::Eof.describe(),
                self.peek(),
                self.span(),
            ));
        }

        log::debug!("parsed program with {} top-level declarations", declarations.len());
        Ok(Program {
            declarations,
            main,
            span: start.merge(self.prev_span()),
        })
    }

    fn parse_main(&mut self) -> Result<MainFunction, ParseError> {
        let start = self.span();
        self.consume(TokenKind::Main)?;
        self.consume(TokenKind::LParen)?;
        self.consume(TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(MainFunction {
            body,
            span: start.merge(self.prev_span()),
        })
    }

    // === Declarations ===

    /// Top-level item: `let`, `fun`, or any other statement
    fn parse_declaration(&mut self) -> Result<Statement, ParseError> {
        match self.peek() {
            TokenKind::Let => self.parse_var_decl(),
            TokenKind::Fun => {
                let start = self.span();
                let func = self.parse_function_decl()?;
                Ok(Statement {
                    kind: StatementKind::Function(func),
                    span: start.merge(self.prev_span()),
                })
            }
            _ => self.parse_statement(),
        }
    }

    fn parse_var_decl(&mut self) -> Result<Statement, ParseError> {
        let start = self.span();
        self.consume(TokenKind::Let)?;
        let name = self.consume(TokenKind::Ident)?.lexeme;

        let initializer = if self.eat(TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon)?;
        let span = start.merge(self.prev_span());

        Ok(Statement {
            kind: StatementKind::VarDecl(VarDecl {
                name,
                initializer,
                span,
            }),
            span,
        })
    }

    fn parse_function_decl(&mut self) -> Result<FunctionDecl, ParseError> {
        let start = self.span();
        self.consume(TokenKind::Fun)?;
        let name = self.consume(TokenKind::Ident)?.lexeme;

        self.consume(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                params.push(self.consume(TokenKind::Ident)?.lexeme);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RParen)?;

        let body = self.parse_block()?;

        Ok(FunctionDecl {
            name,
            params,
            body,
            span: start.merge(self.prev_span()),
        })
    }

    // === Statements ===

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        let start = self.span();
        self.consume(TokenKind::LBrace)?;

        let mut statements = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }

        self.consume(TokenKind::RBrace)?;

        Ok(Block {
            statements,
            span: start.merge(self.prev_span()),
        })
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.span();

        let kind = match self.peek() {
            TokenKind::If => self.parse_if_stmt()?,
            TokenKind::While => self.parse_while_stmt()?,
            TokenKind::Return => self.parse_return_stmt()?,
            TokenKind::Let => return self.parse_var_decl(),
            _ => {
                let expr = self.parse_expr()?;
                self.consume(TokenKind::Semicolon)?;
                StatementKind::Expr(expr)
            }
        };

        Ok(Statement {
            kind,
            span: start.merge(self.prev_span()),
        })
    }

    fn parse_if_stmt(&mut self) -> Result<StatementKind, ParseError> {
        self.consume(TokenKind::If)?;
        self.consume(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.consume(TokenKind::RParen)?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.eat(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(StatementKind::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_stmt(&mut self) -> Result<StatementKind, ParseError> {
        self.consume(TokenKind::While)?;
        self.consume(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.consume(TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(StatementKind::While { condition, body })
    }

    fn parse_return_stmt(&mut self) -> Result<StatementKind, ParseError> {
        self.consume(TokenKind::Return)?;
        let value = self.parse_expr()?;
        self.consume(TokenKind::Semicolon)?;
        Ok(StatementKind::Return(value))
    }

    // === Expressions ===

    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let candidate = self.parse_or()?;

        if !self.at(TokenKind::Assign) {
            return Ok(candidate);
        }

        let target = candidate
            .into_variable()
            .map_err(|expr| ParseError::InvalidAssignmentTarget { span: expr.span })?;
        self.advance();

        // Right-associative: `a = b = c` is `a = (b = c)`
        let value = self.parse_assignment()?;
        Ok(Expr::new(
            ExprKind::Assignment {
                target,
                value: Box::new(value),
            },
            start.merge(self.prev_span()),
        ))
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let mut left = self.parse_and()?;

        while self.eat(TokenKind::OrOr) {
            let right = self.parse_and()?;
            left = Expr::new(
                ExprKind::Logical {
                    op: LogicalOp::Or,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                start.merge(self.prev_span()),
            );
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let mut left = self.parse_equality()?;

        while self.eat(TokenKind::AndAnd) {
            let right = self.parse_equality()?;
            left = Expr::new(
                ExprKind::Logical {
                    op: LogicalOp::And,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                start.merge(self.prev_span()),
            );
        }

        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let mut left = self.parse_relational()?;

        loop {
            let op = match self.peek() {
                TokenKind::EqEq => CompareOp::Eq,
                TokenKind::Ne => CompareOp::Ne,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational()?;
            left = Expr::new(
                ExprKind::Comparison {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                start.merge(self.prev_span()),
            );
        }

        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.peek() {
                TokenKind::Lt => CompareOp::Lt,
                TokenKind::Le => CompareOp::Le,
                TokenKind::Gt => CompareOp::Gt,
                TokenKind::Ge => CompareOp::Ge,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::new(
                ExprKind::Comparison {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                start.merge(self.prev_span()),
            );
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek() {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::new(
                ExprKind::BinaryArith {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                start.merge(self.prev_span()),
            );
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek() {
                TokenKind::Star => ArithOp::Mul,
                TokenKind::Slash => ArithOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::new(
                ExprKind::BinaryArith {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                start.merge(self.prev_span()),
            );
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();

        if self.eat(TokenKind::Bang) {
            let operand = self.parse_unary()?;
            return Ok(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                },
                start.merge(self.prev_span()),
            ));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();

        match self.peek() {
            TokenKind::Int => {
                let token = self.advance();
                let value: i64 = token.lexeme.parse().map_err(|_| {
                    ParseError::IntegerOutOfRange {
                        literal: token.lexeme.clone(),
                        span: token.span,
                    }
                })?;
                Ok(Expr::new(ExprKind::IntLiteral(value), start))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(ExprKind::BoolLiteral(true), start))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(ExprKind::BoolLiteral(false), start))
            }
            TokenKind::Ident => {
                let name = self.advance().lexeme;

                if !self.eat(TokenKind::LParen) {
                    return Ok(Expr::new(ExprKind::VariableRef(name), start));
                }

                let args = if self.at(TokenKind::RParen) {
                    vec![]
                } else {
                    self.parse_expr_list()?
                };
                self.consume(TokenKind::RParen)?;
                Ok(Expr::new(
                    ExprKind::Call { name, args },
                    start.merge(self.prev_span()),
                ))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.consume(TokenKind::RParen)?;
                Ok(expr)
            }
            found => Err(ParseError::ExpectedExpression {
                found: found.describe().to_string(),
                span: start,
            }),
        }
    }

    fn parse_expr_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = Vec::new();
        loop {
            exprs.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(exprs)
    }
}
