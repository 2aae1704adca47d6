//! ECMAScript 3 parser.
//!
//! Recursive descent for statements, precedence climbing for binary
//! expressions. Parentheses survive as [`ExprKind::Group`] so that a
//! printed tree keeps the grouping its source had.

use crate::ast::*;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parse error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} at {}..{}", .span.start, .span.end)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Parse a complete script.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source).parse()
}

/// The parser.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Current token.
    current: Token,
    /// End offset of the last consumed token.
    prev_end: u32,
    /// When false, `in` is not parsed as a binary operator (for-in init).
    allow_in: bool,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            prev_end: 0,
            allow_in: true,
        }
    }

    /// Parse the entire source into a program.
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let start = self.current.span.start;
        let mut body = Vec::new();
        while !self.is_eof() {
            body.push(self.parse_stmt()?);
        }
        Ok(Program::new(body, Span::new(start, self.prev_end)))
    }

    // =========================================================================
    // Token Handling
    // =========================================================================

    fn peek(&self) -> &TokenKind {
        &self.current.kind
    }

    /// Advance to the next token and return the previous.
    fn advance(&mut self) -> Token {
        self.prev_end = self.current.span.end;
        std::mem::replace(&mut self.current, self.lexer.next_token())
    }

    /// Check if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(kind)
    }

    fn is_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.prev_end)
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            TokenKind::Invalid(message) => ParseError::new(message.clone(), self.current.span),
            TokenKind::Eof => ParseError::new("Unexpected end of input", self.current.span),
            other => ParseError::new(format!("Unexpected token {other:?}"), self.current.span),
        }
    }

    /// Consume a token if it matches, otherwise return an error.
    fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else if matches!(self.peek(), TokenKind::Invalid(_) | TokenKind::Eof) {
            Err(self.unexpected())
        } else {
            Err(ParseError::new(
                format!("Expected {:?}, got {:?}", kind, self.peek()),
                self.current.span,
            ))
        }
    }

    /// Consume a token if it matches, returning true if consumed.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a semicolon (with ASI support).
    fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat(&TokenKind::Semicolon)
            || self.check(&TokenKind::RBrace)
            || self.is_eof()
            || self.current.had_newline_before
        {
            return Ok(());
        }
        Err(ParseError::new("Expected semicolon", self.current.span))
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let TokenKind::Identifier(name) = self.peek() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(ParseError::new(
                format!("Expected identifier, got {:?}", self.peek()),
                self.current.span,
            ))
        }
    }

    /// Identifier or reserved word, as allowed after `.` and as object keys.
    fn expect_property_name(&mut self) -> Result<String, ParseError> {
        if let Some(word) = self.peek().keyword_text() {
            self.advance();
            return Ok(word.to_string());
        }
        self.expect_identifier()
    }

    /// Run `f` with `in` re-enabled, restoring the previous setting after.
    fn with_in_allowed<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = std::mem::replace(&mut self.allow_in, true);
        let result = f(self);
        self.allow_in = saved;
        result
    }

    // =========================================================================
    // Statement Parsing
    // =========================================================================

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        if matches!(self.peek(), TokenKind::Identifier(_))
            && matches!(self.lexer.peek().kind, TokenKind::Colon)
        {
            return self.parse_labeled_stmt();
        }

        match self.peek() {
            TokenKind::LBrace => self.parse_block_stmt(),
            TokenKind::Semicolon => {
                let start = self.advance().span.start;
                Ok(Stmt::new(StmtKind::Empty, self.span_from(start)))
            }
            TokenKind::Var => self.parse_var_stmt(),
            TokenKind::Function => self.parse_function_decl(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::Switch => self.parse_switch_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Do => self.parse_do_while_stmt(),
            TokenKind::Break | TokenKind::Continue => self.parse_jump_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Throw => self.parse_throw_stmt(),
            TokenKind::Try => self.parse_try_stmt(),
            TokenKind::With => self.parse_with_stmt(),
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_block_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_eof() {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(stmts)
    }

    fn parse_block_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        let body = self.parse_block_body()?;
        Ok(Stmt::new(StmtKind::Block(body), self.span_from(start)))
    }

    fn parse_var_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::Var)?;
        let decls = self.parse_var_declarators()?;
        self.expect_semicolon()?;
        Ok(Stmt::new(StmtKind::Var(decls), self.span_from(start)))
    }

    fn parse_var_declarators(&mut self) -> Result<Vec<VarDeclarator>, ParseError> {
        let mut decls = vec![self.parse_var_declarator()?];
        while self.eat(&TokenKind::Comma) {
            decls.push(self.parse_var_declarator()?);
        }
        Ok(decls)
    }

    fn parse_var_declarator(&mut self) -> Result<VarDeclarator, ParseError> {
        let start = self.current.span.start;
        let name = self.expect_identifier()?;
        let init = if self.eat(&TokenKind::Eq) {
            Some(self.parse_assign_expr()?)
        } else {
            None
        };
        Ok(VarDeclarator {
            name,
            init,
            span: self.span_from(start),
        })
    }

    fn parse_function_decl(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        let func = self.parse_function()?;
        if func.name.is_none() {
            return Err(ParseError::new(
                "Function declaration requires a name",
                self.span_from(start),
            ));
        }
        Ok(Stmt::new(StmtKind::Function(Box::new(func)), self.span_from(start)))
    }

    fn parse_function(&mut self) -> Result<Function, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::Function)?;
        let name = match self.peek() {
            TokenKind::Identifier(_) => Some(self.expect_identifier()?),
            _ => None,
        };

        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            params.push(self.expect_identifier()?);
            while self.eat(&TokenKind::Comma) {
                params.push(self.expect_identifier()?);
            }
        }
        self.expect(&TokenKind::RParen)?;

        let body = self.with_in_allowed(Self::parse_block_body)?;
        Ok(Function {
            name,
            params,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::If)?;
        let test = self.parse_paren_condition()?;
        let consequent = Box::new(self.parse_stmt()?);
        let alternate = if self.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::new(
            StmtKind::If {
                test,
                consequent,
                alternate,
            },
            self.span_from(start),
        ))
    }

    fn parse_paren_condition(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        Ok(test)
    }

    fn parse_switch_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::Switch)?;
        let discriminant = self.parse_paren_condition()?;
        self.expect(&TokenKind::LBrace)?;

        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.check(&TokenKind::RBrace) && !self.is_eof() {
            let case_start = self.current.span.start;
            let test = if self.eat(&TokenKind::Case) {
                Some(self.parse_expr()?)
            } else if self.check(&TokenKind::Default) {
                if seen_default {
                    return Err(ParseError::new(
                        "More than one default clause in switch",
                        self.current.span,
                    ));
                }
                seen_default = true;
                self.advance();
                None
            } else {
                return Err(ParseError::new(
                    "Expected 'case' or 'default'",
                    self.current.span,
                ));
            };
            self.expect(&TokenKind::Colon)?;

            let mut consequent = Vec::new();
            while !self.check(&TokenKind::Case)
                && !self.check(&TokenKind::Default)
                && !self.check(&TokenKind::RBrace)
                && !self.is_eof()
            {
                consequent.push(self.parse_stmt()?);
            }
            cases.push(SwitchCase {
                test,
                consequent,
                span: self.span_from(case_start),
            });
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(Stmt::new(
            StmtKind::Switch {
                discriminant,
                cases,
            },
            self.span_from(start),
        ))
    }

    fn parse_for_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::For)?;
        self.expect(&TokenKind::LParen)?;

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else if self.eat(&TokenKind::Var) {
            self.allow_in = false;
            let decls = self.parse_var_declarators();
            self.allow_in = true;
            Some(ForInit::Var(decls?))
        } else {
            self.allow_in = false;
            let expr = self.parse_expr();
            self.allow_in = true;
            Some(ForInit::Expr(expr?))
        };

        if self.check(&TokenKind::In) {
            let in_span = self.current.span;
            let left = match init {
                Some(ForInit::Var(mut decls)) if decls.len() == 1 => {
                    ForInTarget::Var(decls.remove(0))
                }
                Some(ForInit::Expr(expr)) if is_assignable(&expr) => ForInTarget::Expr(expr),
                _ => {
                    return Err(ParseError::new("Invalid left-hand side in for-in", in_span));
                }
            };
            self.advance();
            let right = self.parse_expr()?;
            self.expect(&TokenKind::RParen)?;
            let body = Box::new(self.parse_stmt()?);
            return Ok(Stmt::new(
                StmtKind::ForIn { left, right, body },
                self.span_from(start),
            ));
        }

        self.expect(&TokenKind::Semicolon)?;
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon)?;
        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::RParen)?;
        let body = Box::new(self.parse_stmt()?);

        Ok(Stmt::new(
            StmtKind::For {
                init,
                test,
                update,
                body,
            },
            self.span_from(start),
        ))
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::While)?;
        let test = self.parse_paren_condition()?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::new(StmtKind::While { test, body }, self.span_from(start)))
    }

    fn parse_do_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::Do)?;
        let body = Box::new(self.parse_stmt()?);
        self.expect(&TokenKind::While)?;
        let test = self.parse_paren_condition()?;
        // A semicolon is inserted after `do ... while (x)` even on the same line.
        self.eat(&TokenKind::Semicolon);
        Ok(Stmt::new(StmtKind::DoWhile { body, test }, self.span_from(start)))
    }

    fn parse_jump_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        let keyword = self.advance();
        let label = if matches!(self.peek(), TokenKind::Identifier(_))
            && !self.current.had_newline_before
        {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.expect_semicolon()?;
        let kind = if matches!(keyword.kind, TokenKind::Break) {
            StmtKind::Break { label }
        } else {
            StmtKind::Continue { label }
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::Return)?;
        let arg = if self.check(&TokenKind::Semicolon)
            || self.check(&TokenKind::RBrace)
            || self.is_eof()
            || self.current.had_newline_before
        {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect_semicolon()?;
        Ok(Stmt::new(StmtKind::Return { arg }, self.span_from(start)))
    }

    fn parse_throw_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::Throw)?;
        if self.current.had_newline_before {
            return Err(ParseError::new("Illegal newline after throw", self.current.span));
        }
        let arg = self.parse_expr()?;
        self.expect_semicolon()?;
        Ok(Stmt::new(StmtKind::Throw { arg }, self.span_from(start)))
    }

    fn parse_try_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::Try)?;
        let block = self.parse_block_body()?;

        let handler = if self.check(&TokenKind::Catch) {
            let catch_start = self.advance().span.start;
            self.expect(&TokenKind::LParen)?;
            let param = self.expect_identifier()?;
            self.expect(&TokenKind::RParen)?;
            let body = self.parse_block_body()?;
            Some(CatchClause {
                param,
                body,
                span: self.span_from(catch_start),
            })
        } else {
            None
        };

        let finalizer = if self.eat(&TokenKind::Finally) {
            Some(self.parse_block_body()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(ParseError::new(
                "Missing catch or finally after try",
                self.current.span,
            ));
        }

        Ok(Stmt::new(
            StmtKind::Try {
                block,
                handler,
                finalizer,
            },
            self.span_from(start),
        ))
    }

    fn parse_with_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::With)?;
        let object = self.parse_paren_condition()?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::new(StmtKind::With { object, body }, self.span_from(start)))
    }

    fn parse_labeled_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        let label = self.expect_identifier()?;
        self.expect(&TokenKind::Colon)?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::new(StmtKind::Labeled { label, body }, self.span_from(start)))
    }

    fn parse_expr_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current.span.start;
        let expr = self.parse_expr()?;
        self.expect_semicolon()?;
        Ok(Stmt::new(StmtKind::Expr(expr), self.span_from(start)))
    }

    // =========================================================================
    // Expression Parsing
    // =========================================================================

    /// Parse an expression (with comma operator).
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span.start;
        let mut expr = self.parse_assign_expr()?;

        while self.eat(&TokenKind::Comma) {
            let right = self.parse_assign_expr()?;
            expr = Expr::new(
                ExprKind::Comma {
                    left: Box::new(expr),
                    right: Box::new(right),
                },
                self.span_from(start),
            );
        }

        Ok(expr)
    }

    fn parse_assign_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span.start;
        let target = self.parse_conditional_expr()?;

        let Some(op) = self.get_assign_op() else {
            return Ok(target);
        };
        if !is_assignable(&target) {
            return Err(ParseError::new(
                "Invalid assignment target",
                target.span,
            ));
        }
        self.advance();
        let value = self.parse_assign_expr()?;
        Ok(Expr::new(
            ExprKind::Assign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            self.span_from(start),
        ))
    }

    fn get_assign_op(&self) -> Option<AssignOp> {
        match self.peek() {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::AddAssign),
            TokenKind::MinusEq => Some(AssignOp::SubAssign),
            TokenKind::StarEq => Some(AssignOp::MulAssign),
            TokenKind::SlashEq => Some(AssignOp::DivAssign),
            TokenKind::PercentEq => Some(AssignOp::ModAssign),
            TokenKind::LtLtEq => Some(AssignOp::ShlAssign),
            TokenKind::GtGtEq => Some(AssignOp::ShrAssign),
            TokenKind::GtGtGtEq => Some(AssignOp::UShrAssign),
            TokenKind::AmpEq => Some(AssignOp::BitAndAssign),
            TokenKind::CaretEq => Some(AssignOp::BitXorAssign),
            TokenKind::PipeEq => Some(AssignOp::BitOrAssign),
            _ => None,
        }
    }

    /// Parse conditional expression (ternary).
    fn parse_conditional_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span.start;
        let test = self.parse_binary_expr(0)?;

        if !self.eat(&TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.with_in_allowed(Self::parse_assign_expr)?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assign_expr()?;
        Ok(Expr::new(
            ExprKind::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            self.span_from(start),
        ))
    }

    /// Parse binary expression using precedence climbing.
    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let start = self.current.span.start;
        let mut left = self.parse_unary_expr()?;

        loop {
            let prec = match self.peek().binary_precedence() {
                Some(prec) if prec >= min_prec => prec,
                _ => break,
            };
            // `in` is not an operator when allow_in is false
            let Some(op) = self.get_binary_op() else {
                break;
            };
            self.advance();

            let right = self.parse_binary_expr(prec + 1)?;
            let span = self.span_from(start);

            left = match (op, right.kind) {
                (BinaryOp::Add, ExprKind::String(value)) => Expr::new(
                    ExprKind::AppendString {
                        left: Box::new(left),
                        value,
                    },
                    span,
                ),
                (op, kind) => Expr::new(
                    ExprKind::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(Expr::new(kind, right.span)),
                    },
                    span,
                ),
            };
        }

        Ok(left)
    }

    fn get_binary_op(&self) -> Option<BinaryOp> {
        match self.peek() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::BangEq => Some(BinaryOp::NotEq),
            TokenKind::EqEqEq => Some(BinaryOp::StrictEq),
            TokenKind::BangEqEq => Some(BinaryOp::StrictNotEq),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            TokenKind::Pipe => Some(BinaryOp::BitOr),
            TokenKind::Caret => Some(BinaryOp::BitXor),
            TokenKind::Amp => Some(BinaryOp::BitAnd),
            TokenKind::LtLt => Some(BinaryOp::Shl),
            TokenKind::GtGt => Some(BinaryOp::Shr),
            TokenKind::GtGtGt => Some(BinaryOp::UShr),
            TokenKind::AmpAmp => Some(BinaryOp::And),
            TokenKind::PipePipe => Some(BinaryOp::Or),
            TokenKind::In if self.allow_in => Some(BinaryOp::In),
            TokenKind::Instanceof => Some(BinaryOp::Instanceof),
            _ => None,
        }
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span.start;

        let op = match self.peek() {
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Typeof => Some(UnaryOp::Typeof),
            TokenKind::Void => Some(UnaryOp::Void),
            TokenKind::Delete => Some(UnaryOp::Delete),
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            let arg = self.parse_unary_expr()?;
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    arg: Box::new(arg),
                },
                self.span_from(start),
            ));
        }

        if matches!(self.peek(), TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let op = if self.check(&TokenKind::PlusPlus) {
                UpdateOp::Increment
            } else {
                UpdateOp::Decrement
            };
            self.advance();
            let arg = self.parse_unary_expr()?;
            return Ok(Expr::new(
                ExprKind::Update {
                    op,
                    prefix: true,
                    arg: Box::new(arg),
                },
                self.span_from(start),
            ));
        }

        self.parse_postfix_expr()
    }

    fn parse_postfix_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span.start;
        let expr = self.parse_left_hand_side_expr()?;

        // A line break before `++`/`--` ends the expression statement.
        if matches!(self.peek(), TokenKind::PlusPlus | TokenKind::MinusMinus)
            && !self.current.had_newline_before
        {
            let op = if self.check(&TokenKind::PlusPlus) {
                UpdateOp::Increment
            } else {
                UpdateOp::Decrement
            };
            self.advance();
            return Ok(Expr::new(
                ExprKind::Update {
                    op,
                    prefix: false,
                    arg: Box::new(expr),
                },
                self.span_from(start),
            ));
        }

        Ok(expr)
    }

    /// Call and member chains: `a.b(c)[d]`.
    fn parse_left_hand_side_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span.start;
        let mut expr = self.parse_new_or_member_expr()?;

        loop {
            expr = match self.peek() {
                TokenKind::Dot | TokenKind::LBracket => self.parse_member_suffix(expr, start)?,
                TokenKind::LParen => {
                    let args = self.parse_arguments()?;
                    Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        self.span_from(start),
                    )
                }
                _ => return Ok(expr),
            };
        }
    }

    /// `new` binds to a member chain and at most one argument list.
    fn parse_new_or_member_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span.start;
        let mut expr = if self.eat(&TokenKind::New) {
            let callee = self.parse_new_or_member_expr()?;
            let args = if self.check(&TokenKind::LParen) {
                Some(self.parse_arguments()?)
            } else {
                None
            };
            Expr::new(
                ExprKind::New {
                    callee: Box::new(callee),
                    args,
                },
                self.span_from(start),
            )
        } else {
            self.parse_primary_expr()?
        };

        while matches!(self.peek(), TokenKind::Dot | TokenKind::LBracket) {
            expr = self.parse_member_suffix(expr, start)?;
        }
        Ok(expr)
    }

    fn parse_member_suffix(&mut self, object: Expr, start: u32) -> Result<Expr, ParseError> {
        if self.eat(&TokenKind::Dot) {
            let property = self.expect_property_name()?;
            return Ok(Expr::new(
                ExprKind::Member {
                    object: Box::new(object),
                    property,
                },
                self.span_from(start),
            ));
        }
        self.expect(&TokenKind::LBracket)?;
        let index = self.with_in_allowed(Self::parse_expr)?;
        self.expect(&TokenKind::RBracket)?;
        Ok(Expr::new(
            ExprKind::Index {
                object: Box::new(object),
                index: Box::new(index),
            },
            self.span_from(start),
        ))
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let args = self.with_in_allowed(|p| {
            let mut args = Vec::new();
            if p.check(&TokenKind::RParen) {
                return Ok(args);
            }
            args.push(p.parse_assign_expr()?);
            while p.eat(&TokenKind::Comma) {
                args.push(p.parse_assign_expr()?);
            }
            Ok(args)
        })?;
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span.start;

        let kind = match self.peek().clone() {
            TokenKind::This => ExprKind::This,
            TokenKind::Null => ExprKind::Null,
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Identifier(name) => ExprKind::Ident(name),
            TokenKind::Number(n) => ExprKind::Number(n),
            TokenKind::String(s) => ExprKind::String(s),
            TokenKind::Regex { pattern, flags } => ExprKind::Regex { pattern, flags },
            TokenKind::LParen => {
                self.advance();
                let inner = self.with_in_allowed(Self::parse_expr)?;
                self.expect(&TokenKind::RParen)?;
                return Ok(Expr::new(
                    ExprKind::Group(Box::new(inner)),
                    self.span_from(start),
                ));
            }
            TokenKind::LBracket => return self.parse_array_literal(),
            TokenKind::LBrace => return self.parse_object_literal(),
            TokenKind::Function => {
                let func = self.parse_function()?;
                return Ok(Expr::new(
                    ExprKind::Function(Box::new(func)),
                    self.span_from(start),
                ));
            }
            _ => return Err(self.unexpected()),
        };

        self.advance();
        Ok(Expr::new(kind, self.span_from(start)))
    }

    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::LBracket)?;

        let elements = self.with_in_allowed(|p| {
            let mut elements = Vec::new();
            loop {
                if p.check(&TokenKind::RBracket) {
                    return Ok(elements);
                }
                if p.eat(&TokenKind::Comma) {
                    elements.push(None);
                    continue;
                }
                elements.push(Some(p.parse_assign_expr()?));
                if !p.check(&TokenKind::RBracket) {
                    p.expect(&TokenKind::Comma)?;
                }
            }
        })?;

        self.expect(&TokenKind::RBracket)?;
        Ok(Expr::new(ExprKind::Array(elements), self.span_from(start)))
    }

    fn parse_object_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::LBrace)?;

        let properties = self.with_in_allowed(|p| {
            let mut properties = Vec::new();
            while !p.check(&TokenKind::RBrace) {
                let prop_start = p.current.span.start;
                let key = match p.peek().clone() {
                    TokenKind::String(s) => {
                        p.advance();
                        PropertyKey::String(s)
                    }
                    TokenKind::Number(n) => {
                        p.advance();
                        PropertyKey::Number(n)
                    }
                    _ => PropertyKey::Ident(p.expect_property_name()?),
                };
                p.expect(&TokenKind::Colon)?;
                let value = p.parse_assign_expr()?;
                properties.push(Property {
                    key,
                    value,
                    span: p.span_from(prop_start),
                });
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(properties)
        })?;

        self.expect(&TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::Object(properties), self.span_from(start)))
    }
}

/// Expressions that may appear on the left of `=` or `in`.
fn is_assignable(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Ident(_)
        | ExprKind::Member { .. }
        | ExprKind::Index { .. }
        | ExprKind::Call { .. }
        | ExprKind::New { .. } => true,
        ExprKind::Group(inner) => is_assignable(inner),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(source: &str) -> Vec<StmtKind> {
        parse(source)
            .unwrap_or_else(|e| panic!("{source:?}: {e}"))
            .body
            .into_iter()
            .map(|s| s.kind)
            .collect()
    }

    fn expr(source: &str) -> ExprKind {
        match body(source).remove(0) {
            StmtKind::Expr(e) => e.kind,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_variable_declaration() {
        let stmts = body("var x = 1, y;");
        let StmtKind::Var(decls) = &stmts[0] else {
            panic!("expected var");
        };
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "x");
        assert!(decls[1].init.is_none());
    }

    #[test]
    fn test_function_declaration() {
        let stmts = body("function add(a, b) { return a + b; }");
        let StmtKind::Function(func) = &stmts[0] else {
            panic!("expected function");
        };
        assert_eq!(func.name.as_deref(), Some("add"));
        assert_eq!(func.params, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(func.body.len(), 1);
    }

    #[test]
    fn test_anonymous_function_declaration_is_rejected() {
        assert!(parse("function () {}").is_err());
    }

    #[test]
    fn test_precedence() {
        let ExprKind::Binary { op, right, .. } = expr("a || b && c;") else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Or);
        assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::And, .. }));
    }

    #[test]
    fn test_string_concatenation_becomes_append() {
        let ExprKind::AppendString { left, value } = expr("a + 1 + 'x';") else {
            panic!("expected append string");
        };
        assert_eq!(value, "x");
        assert!(matches!(left.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));

        // Only a bare literal on the right folds.
        assert!(matches!(expr("a + 'x'.length;"), ExprKind::Binary { .. }));
    }

    #[test]
    fn test_parentheses_are_kept() {
        let ExprKind::Binary { left, .. } = expr("(a + b) * c;") else {
            panic!("expected binary");
        };
        assert!(matches!(left.kind, ExprKind::Group(_)));
    }

    #[test]
    fn test_new_binds_to_member_chain() {
        let ExprKind::Member { object, property } = expr("new a.B(1).c;") else {
            panic!("expected member");
        };
        assert_eq!(property, "c");
        let ExprKind::New { callee, args } = object.kind else {
            panic!("expected new");
        };
        assert!(matches!(callee.kind, ExprKind::Member { .. }));
        assert_eq!(args.map(|a| a.len()), Some(1));

        assert!(matches!(expr("new X;"), ExprKind::New { args: None, .. }));
    }

    #[test]
    fn test_array_holes() {
        let ExprKind::Array(elements) = expr("[a,,b,,];") else {
            panic!("expected array");
        };
        let holes: Vec<bool> = elements.iter().map(Option::is_none).collect();
        assert_eq!(holes, vec![false, true, false, true]);
    }

    #[test]
    fn test_object_keys() {
        let ExprKind::Group(inner) = expr("({a: 1, 'b': 2, 3: 4, default: 5});") else {
            panic!("expected group");
        };
        let ExprKind::Object(props) = inner.kind else {
            panic!("expected object");
        };
        assert_eq!(props[0].key, PropertyKey::Ident("a".into()));
        assert_eq!(props[1].key, PropertyKey::String("b".into()));
        assert_eq!(props[2].key, PropertyKey::Number(3.0));
        assert_eq!(props[3].key, PropertyKey::Ident("default".into()));
    }

    #[test]
    fn test_for_in_forms() {
        let stmts = body("for (var k in o) {} for (var i = 0 in o); for (a.b in o);");
        assert!(matches!(
            &stmts[0],
            StmtKind::ForIn { left: ForInTarget::Var(d), .. } if d.init.is_none()
        ));
        assert!(matches!(
            &stmts[1],
            StmtKind::ForIn { left: ForInTarget::Var(d), .. } if d.init.is_some()
        ));
        assert!(matches!(&stmts[2], StmtKind::ForIn { left: ForInTarget::Expr(_), .. }));
    }

    #[test]
    fn test_for_init_disallows_in() {
        let stmts = body("for (var i = 0, n = (a in b); i < n; i++) {}");
        assert!(matches!(&stmts[0], StmtKind::For { init: Some(ForInit::Var(d)), .. } if d.len() == 2));
    }

    #[test]
    fn test_asi_restricted_productions() {
        let stmts = body("function f() { return\n1 }");
        let StmtKind::Function(func) = &stmts[0] else {
            panic!("expected function");
        };
        assert!(matches!(func.body[0].kind, StmtKind::Return { arg: None }));

        let stmts = body("a\n++b");
        assert_eq!(stmts.len(), 2);
        assert!(matches!(&stmts[1], StmtKind::Expr(e) if matches!(e.kind, ExprKind::Update { prefix: true, .. })));
    }

    #[test]
    fn test_labels_and_jumps() {
        let stmts = body("outer: for (;;) { break outer; continue; }");
        let StmtKind::Labeled { label, body } = &stmts[0] else {
            panic!("expected label");
        };
        assert_eq!(label, "outer");
        let StmtKind::For { body: loop_body, .. } = &body.kind else {
            panic!("expected for");
        };
        let StmtKind::Block(inner) = &loop_body.kind else {
            panic!("expected block");
        };
        assert_eq!(inner[0].kind, StmtKind::Break { label: Some("outer".into()) });
        assert_eq!(inner[1].kind, StmtKind::Continue { label: None });
    }

    #[test]
    fn test_switch_keeps_default_position() {
        let stmts = body("switch (x) { case 1: a(); default: b(); case 2: }");
        let StmtKind::Switch { cases, .. } = &stmts[0] else {
            panic!("expected switch");
        };
        let tests: Vec<bool> = cases.iter().map(|c| c.test.is_some()).collect();
        assert_eq!(tests, vec![true, false, true]);
        assert!(parse("switch (x) { default: default: }").is_err());
    }

    #[test]
    fn test_try_requires_handler_or_finalizer() {
        assert!(parse("try {} catch (e) {} finally {}").is_ok());
        assert!(parse("try {}").is_err());
    }

    #[test]
    fn test_error_span_points_at_token() {
        let err = parse("var = 1;").unwrap_err();
        assert_eq!(err.span, Span::new(4, 5));
        assert!(err.to_string().contains("Expected identifier"));
    }

    #[test]
    fn test_invalid_assignment_target() {
        assert!(parse("1 = a;").is_err());
        assert!(parse("(a) = 1;").is_ok());
    }
}
