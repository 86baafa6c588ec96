//! Parser for the Baiko language.
//!
//! A recursive descent parser with one token of lookahead. The only
//! speculative parse is the `name[index] = value;` statement, which saves
//! and restores the cursor when the lookahead does not pan out.

use crate::ast::*;
use crate::common::Syntax;
use crate::diagnostics::BaikoError;
use crate::lexer::{Token, TokenKind};

/// Parse a token stream into an AST.
pub fn parse(tokens: &[Token], syntax: &Syntax) -> Result<Program, BaikoError> {
    Parser::new(tokens, syntax).parse_program()
}

/// Parser state.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    syntax: &'a Syntax,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], syntax: &'a Syntax) -> Self {
        Self {
            tokens,
            pos: 0,
            syntax,
        }
    }

    // ==================== PROGRAM ====================

    pub fn parse_program(&mut self) -> Result<Program, BaikoError> {
        let mut body = Vec::new();
        if self.tokens.is_empty() {
            return Ok(Program { body });
        }
        while !self.at(TokenKind::Eof) {
            body.push(self.parse_statement()?);
        }
        tracing::debug!(statements = body.len(), "parsing finished");
        Ok(Program { body })
    }

    // ==================== STATEMENTS ====================

    fn parse_statement(&mut self) -> Result<Stmt, BaikoError> {
        // Export prefix binds to the following declaration.
        if self.at(TokenKind::Avoaka) {
            self.advance();
            return self.parse_exported_declaration();
        }

        // "avereno raha" is the compound while keyword.
        if self.at(TokenKind::Avereno) && self.peek_n(1) == TokenKind::Raha {
            return self.parse_while();
        }

        // `name: Type ...` is a typed variable declaration.
        if self.at(TokenKind::Identifier)
            && self.peek_n(1) == TokenKind::Colon
            && self.syntax.is_type_start(self.peek_n(2))
        {
            return self.parse_var_decl(false);
        }

        // `name[index] = value;` needs bounded speculation to tell it apart
        // from an index-read expression statement.
        if self.at(TokenKind::Identifier) && self.peek_n(1) == TokenKind::LBracket {
            if let Some(stmt) = self.try_index_assign()? {
                return Ok(stmt);
            }
        }

        match self.peek() {
            TokenKind::Asa | TokenKind::Andrasana => self.parse_func_decl(false),
            TokenKind::Raha => self.parse_if(),
            TokenKind::Mamoaka => self.parse_return(),
            TokenKind::Asehoy => self.parse_print(),
            TokenKind::Ampidiro => self.parse_import(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_exported_declaration(&mut self) -> Result<Stmt, BaikoError> {
        match self.peek() {
            TokenKind::Asa | TokenKind::Andrasana => self.parse_func_decl(true),
            TokenKind::Identifier => self.parse_var_decl(true),
            _ => Err(self.unexpected("asa na fanambarana")),
        }
    }

    /// `[andrasana] asa name(param: Type, ...) [: ReturnType] dia ... farany`
    fn parse_func_decl(&mut self, exported: bool) -> Result<Stmt, BaikoError> {
        let pos = self.current().pos;
        let is_async = if self.at(TokenKind::Andrasana) {
            self.advance();
            true
        } else {
            false
        };
        self.expect(TokenKind::Asa)?;
        let name = self.expect(TokenKind::Identifier)?.text.clone();
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;

        let return_type = if self.eat(TokenKind::Colon) {
            Some(self.parse_base_type()?)
        } else {
            None
        };

        self.expect(TokenKind::Dia)?;
        let body = self.parse_block()?;
        self.expect(TokenKind::Farany)?;

        Ok(Stmt::FuncDecl {
            name,
            params,
            return_type,
            body,
            is_async,
            exported,
            pos,
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, BaikoError> {
        let mut params = Vec::new();
        if self.at(TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            let name = self.expect(TokenKind::Identifier)?.text.clone();
            self.expect(TokenKind::Colon)?;
            let param_type = self.parse_base_type()?;
            params.push(Param { name, param_type });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    /// `name: Type [= expr] ;` — non-optional types require the initializer.
    fn parse_var_decl(&mut self, exported: bool) -> Result<Stmt, BaikoError> {
        let name_tok = self.expect(TokenKind::Identifier)?;
        let name = name_tok.text.clone();
        let pos = name_tok.pos;
        self.expect(TokenKind::Colon)?;
        let var_type = self.parse_type_ann()?;

        let init = if self.eat(TokenKind::Equal) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        if init.is_none() && !var_type.is_optional() {
            return Err(BaikoError::MissingInitializer { name, pos });
        }

        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::VarDecl {
            name,
            var_type,
            init,
            exported,
            pos,
        })
    }

    fn parse_base_type(&mut self) -> Result<BaseType, BaikoError> {
        let tok = self.current();
        let base = match tok.kind {
            TokenKind::Isa => BaseType::Isa,
            TokenKind::Soratra => BaseType::Soratra,
            TokenKind::Marina => BaseType::Marina,
            _ => {
                return Err(BaikoError::ExpectedType {
                    found: self.found_text(),
                    pos: tok.pos,
                });
            }
        };
        self.advance();
        Ok(base)
    }

    /// Full annotation grammar: base, `Mety(base | Lisitra(...))`, or
    /// `Lisitra(T)` with `T` itself any annotation.
    fn parse_type_ann(&mut self) -> Result<TypeAnn, BaikoError> {
        match self.peek() {
            TokenKind::Mety => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let inner = match self.peek() {
                    TokenKind::Lisitra => self.parse_type_ann()?,
                    _ => TypeAnn::Base(self.parse_base_type()?),
                };
                self.expect(TokenKind::RParen)?;
                Ok(TypeAnn::Mety(Box::new(inner)))
            }
            TokenKind::Lisitra => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let inner = self.parse_type_ann()?;
                self.expect(TokenKind::RParen)?;
                Ok(TypeAnn::Lisitra(Box::new(inner)))
            }
            _ => Ok(TypeAnn::Base(self.parse_base_type()?)),
        }
    }

    /// `raha cond dia ... [ankoatra dia ...] farany`
    fn parse_if(&mut self) -> Result<Stmt, BaikoError> {
        self.expect(TokenKind::Raha)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Dia)?;
        let consequent = self.parse_block()?;

        let alternate = if self.eat(TokenKind::Ankoatra) {
            self.expect(TokenKind::Dia)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        self.expect(TokenKind::Farany)?;
        Ok(Stmt::If {
            condition,
            consequent,
            alternate,
        })
    }

    /// `avereno raha cond dia ... farany`
    fn parse_while(&mut self) -> Result<Stmt, BaikoError> {
        self.expect(TokenKind::Avereno)?;
        self.expect(TokenKind::Raha)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Dia)?;
        let body = self.parse_block()?;
        self.expect(TokenKind::Farany)?;
        Ok(Stmt::While { condition, body })
    }

    /// `mamoaka [expr] ;`
    fn parse_return(&mut self) -> Result<Stmt, BaikoError> {
        self.expect(TokenKind::Mamoaka)?;
        let value = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Return { value })
    }

    /// `asehoy expr ;`
    fn parse_print(&mut self) -> Result<Stmt, BaikoError> {
        self.expect(TokenKind::Asehoy)?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Print { value })
    }

    /// `ampidiro "path" ;`
    fn parse_import(&mut self) -> Result<Stmt, BaikoError> {
        let pos = self.expect(TokenKind::Ampidiro)?.pos;
        let path = self.expect(TokenKind::Str)?.text.clone();
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Import { path, pos })
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, BaikoError> {
        let expression = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Expr(expression))
    }

    /// Speculatively parse `name[index] =`. Restores the cursor and returns
    /// `None` when the shape does not match; once the `=` is seen the parse
    /// is committed and later errors are real.
    fn try_index_assign(&mut self) -> Result<Option<Stmt>, BaikoError> {
        let save = self.pos;
        let pos = self.current().pos;
        let target = self.advance().text.clone();
        self.advance(); // [

        let index = match self.parse_expression() {
            Ok(index) => index,
            Err(_) => {
                self.pos = save;
                return Ok(None);
            }
        };
        if !self.at(TokenKind::RBracket) || self.peek_n(1) != TokenKind::Equal {
            self.pos = save;
            return Ok(None);
        }
        self.advance(); // ]
        self.advance(); // =

        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Some(Stmt::IndexAssign {
            target,
            index,
            value,
            pos,
        }))
    }

    /// Parse statements until a block-closing token is reached.
    fn parse_block(&mut self) -> Result<Vec<Stmt>, BaikoError> {
        let mut stmts = Vec::new();
        while !matches!(
            self.peek(),
            TokenKind::Farany | TokenKind::Ankoatra | TokenKind::Eof
        ) {
            stmts.push(self.parse_statement()?);
        }
        Ok(stmts)
    }

    // ==================== EXPRESSIONS ====================

    fn parse_expression(&mut self) -> Result<Expr, BaikoError> {
        self.parse_assignment()
    }

    /// `name = expr`, only when the next token after the identifier is a
    /// plain `=` (the lexer already split `==` off as its own token).
    fn parse_assignment(&mut self) -> Result<Expr, BaikoError> {
        if self.at(TokenKind::Identifier) && self.peek_n(1) == TokenKind::Equal {
            let name = self.advance().text.clone();
            self.advance(); // =
            let value = self.parse_expression()?;
            return Ok(Expr::Assign {
                name,
                value: Box::new(value),
            });
        }
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> Result<Expr, BaikoError> {
        let mut left = self.parse_logical_and()?;
        while self.at(TokenKind::Or) {
            self.advance();
            let right = self.parse_logical_and()?;
            left = Expr::Binary {
                op: BinOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<Expr, BaikoError> {
        let mut left = self.parse_comparison()?;
        while self.at(TokenKind::And) {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::Binary {
                op: BinOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, BaikoError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = match self.peek() {
            TokenKind::EqualEqual => Some(BinOp::Eq),
            TokenKind::BangEqual => Some(BinOp::Ne),
            TokenKind::Less => Some(BinOp::Lt),
            TokenKind::LessEqual => Some(BinOp::Le),
            TokenKind::Greater => Some(BinOp::Gt),
            TokenKind::GreaterEqual => Some(BinOp::Ge),
            _ => None,
        } {
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, BaikoError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = match self.peek() {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            _ => None,
        } {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, BaikoError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = match self.peek() {
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            _ => None,
        } {
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, BaikoError> {
        if self.eat(TokenKind::Not) {
            let operand = self.parse_unary()?;
            return Ok(Expr::Not {
                operand: Box::new(operand),
            });
        }
        if self.eat(TokenKind::Miandry) {
            let operand = self.parse_unary()?;
            return Ok(Expr::Await {
                operand: Box::new(operand),
            });
        }
        // Unary minus is rewritten as `0 - operand`.
        if self.eat(TokenKind::Minus) {
            let right = self.parse_primary()?;
            return Ok(Expr::Binary {
                op: BinOp::Sub,
                left: Box::new(Expr::Number(0.0)),
                right: Box::new(right),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, BaikoError> {
        match self.peek() {
            TokenKind::Number => {
                let text = self.advance().text.clone();
                let value: f64 = text.parse().unwrap_or(0.0);
                Ok(Expr::Number(value))
            }
            TokenKind::Str => Ok(Expr::Str(self.advance().text.clone())),
            TokenKind::True => {
                self.advance();
                Ok(Expr::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Bool(false))
            }
            TokenKind::Tsisy => {
                self.advance();
                Ok(Expr::Null)
            }
            TokenKind::Identifier => {
                let name = self.advance().text.clone();
                let head = if self.eat(TokenKind::LParen) {
                    let args = self.parse_args()?;
                    self.expect(TokenKind::RParen)?;
                    Expr::Call { callee: name, args }
                } else {
                    Expr::Identifier(name)
                };
                self.parse_postfix(head)
            }
            TokenKind::LBracket => {
                self.advance();
                let mut elements = Vec::new();
                if !self.at(TokenKind::RBracket) {
                    loop {
                        elements.push(self.parse_expression()?);
                        if !self.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RBracket)?;
                self.parse_postfix(Expr::List(elements))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected("fanehoana")),
        }
    }

    /// Postfix chains after an identifier, call, or list literal:
    /// `.name`, `.name(args)`, `[index]`, composing left-to-right.
    fn parse_postfix(&mut self, mut expr: Expr) -> Result<Expr, BaikoError> {
        loop {
            if self.eat(TokenKind::Dot) {
                let name = self.expect(TokenKind::Identifier)?.text.clone();
                if self.eat(TokenKind::LParen) {
                    let args = self.parse_args()?;
                    self.expect(TokenKind::RParen)?;
                    expr = Expr::MemberCall {
                        object: Box::new(expr),
                        method: name,
                        args,
                    };
                } else {
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property: name,
                    };
                }
            } else if self.eat(TokenKind::LBracket) {
                let index = self.parse_expression()?;
                self.expect(TokenKind::RBracket)?;
                expr = Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, BaikoError> {
        let mut args = Vec::new();
        if self.at(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(args)
    }

    // ==================== HELPERS ====================

    fn current(&self) -> &Token {
        // advance() never moves past the trailing EOF token.
        &self.tokens[self.pos]
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_n(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn advance(&mut self) -> &Token {
        let index = self.pos;
        if !self.at(TokenKind::Eof) {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token, BaikoError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{kind}'")))
        }
    }

    fn unexpected(&self, expected: &str) -> BaikoError {
        BaikoError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.found_text(),
            pos: self.current().pos,
        }
    }

    fn found_text(&self) -> String {
        let tok = self.current();
        if tok.text.is_empty() {
            tok.kind.as_str().to_string()
        } else {
            tok.text.clone()
        }
    }
}
