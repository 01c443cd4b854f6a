//! mcc-par - Recursive-descent parser for the mini-C compiler pipeline.
//!
//! Consumes the flat [`mcc_lex::Token`] stream and produces an [`ast::Ast`]
//! (a list of top-level declarations), reporting syntax diagnostics through
//! a [`mcc_util::Handler`] as it goes. Parsing never aborts: on a malformed
//! production the parser emits a diagnostic, resynchronizes to the next `;`
//! or `}`, and keeps going so later errors are still discovered.

pub mod ast;
mod expr;
mod stmt;

mod edge_cases;

use mcc_lex::{Token, TokenKind};
use mcc_util::{Handler, Span};

pub use ast::{Ast, GenericNode, Node};

/// Recursive-descent parser over a fixed token stream.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        Self { tokens, position: 0, handler }
    }

    /// Parses the whole token stream into a program (list of declarations).
    pub fn parse(tokens: Vec<Token>, handler: &'a Handler) -> Ast {
        let mut parser = Self::new(tokens, handler);
        parser.parse_program()
    }

    fn parse_program(&mut self) -> Ast {
        let mut decls = Vec::new();
        while !self.is_at_end() {
            match self.parse_declaration() {
                Some(decl) => decls.push(decl),
                None => self.synchronize(),
            }
        }
        decls
    }

    // -- token stream primitives -----------------------------------------

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn previous(&self) -> Option<&Token> {
        self.position.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.position).cloned();
        if !self.is_at_end() {
            self.position += 1;
        }
        tok
    }

    /// True if the current token has the given kind and lexeme.
    fn check(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.current().map_or(false, |t| t.kind == kind && t.lexeme == lexeme)
    }

    fn check_kind(&self, kind: TokenKind) -> bool {
        self.current().map_or(false, |t| t.kind == kind)
    }

    /// Consumes the current token if it matches, returning whether it did.
    fn eat(&mut self, kind: TokenKind, lexeme: &str) -> bool {
        if self.check(kind, lexeme) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it matches, else emits a diagnostic and
    /// returns `None` without advancing.
    fn expect(&mut self, kind: TokenKind, lexeme: &str, what: &str) -> Option<Token> {
        if self.check(kind, lexeme) {
            self.advance()
        } else {
            self.error(format!("expected {what}"));
            None
        }
    }

    /// Consumes the current token if its kind matches, regardless of
    /// lexeme (e.g. any `Identifier`), else emits a diagnostic.
    fn expect_kind(&mut self, kind: TokenKind, what: &str) -> Option<Token> {
        if self.check_kind(kind) {
            self.advance()
        } else {
            self.error(format!("expected {what}"));
            None
        }
    }

    /// The span used to anchor a diagnostic: the current token's position,
    /// or the position just past the last token at end of input.
    fn error_span(&self) -> Span {
        match self.current() {
            Some(tok) => Span::point(tok.line, tok.column),
            None => match self.previous() {
                Some(tok) => Span::point(tok.line, tok.column),
                None => Span::point(1, 1),
            },
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        self.handler.error(message, self.error_span());
    }

    /// Skips tokens until the next `;` or `}` (consuming it), or end of
    /// input. Used to recover after a failed production so parsing can
    /// continue past the damaged region.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            let tok = self.current().unwrap();
            if tok.kind == TokenKind::Punctuation && tok.lexeme == ";" {
                self.advance();
                return;
            }
            if tok.kind == TokenKind::Punctuation && tok.lexeme == "}" {
                self.advance();
                return;
            }
            self.advance();
        }
    }

    fn pos(&self) -> (u32, u32) {
        match self.current().or_else(|| self.previous()) {
            Some(tok) => (tok.line, tok.column),
            None => (1, 1),
        }
    }

    // -- declarations -----------------------------------------------------

    /// `declaration := type IDENT ( functionRest | varRest )`
    fn parse_declaration(&mut self) -> Option<Node> {
        let (line, column) = self.pos();
        let ty = self.parse_type()?;
        let name_tok = self.expect_kind(TokenKind::Identifier, "identifier")?;
        let name = Node::Identifier { name: name_tok.lexeme, line: name_tok.line, column: name_tok.column };

        if self.check(TokenKind::Punctuation, "(") {
            self.parse_function_rest(ty, name, line, column)
        } else {
            self.parse_var_rest(ty, name, line, column)
        }
    }

    /// `functionRest := '(' paramList? ')' block`
    fn parse_function_rest(&mut self, ty: Node, name: Node, line: u32, column: u32) -> Option<Node> {
        self.expect(TokenKind::Punctuation, "(", "'('")?;
        let params = if self.check(TokenKind::Punctuation, ")") {
            Node::Parameters(Vec::new())
        } else {
            self.parse_param_list()?
        };
        self.expect(TokenKind::Punctuation, ")", "')'")?;
        let body = self.parse_block()?;
        Some(Node::FunctionDeclaration {
            ty: Box::new(ty),
            name: Box::new(name),
            params: Box::new(params),
            body: Box::new(body),
            line,
            column,
        })
    }

    /// `varRest := ('=' expression)? ';'`
    fn parse_var_rest(&mut self, ty: Node, name: Node, line: u32, column: u32) -> Option<Node> {
        let init = if self.eat(TokenKind::Operator, "=") {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        self.expect(TokenKind::Punctuation, ";", "';'")?;
        Some(Node::VarDeclaration { ty: Box::new(ty), name: Box::new(name), init, line, column })
    }

    /// `paramList := param (',' param)*`
    fn parse_param_list(&mut self) -> Option<Node> {
        let mut params = vec![self.parse_param()?];
        while self.eat(TokenKind::Punctuation, ",") {
            params.push(self.parse_param()?);
        }
        Some(Node::Parameters(params))
    }

    /// `param := type IDENT`
    fn parse_param(&mut self) -> Option<Node> {
        let ty = self.parse_type()?;
        let name_tok = self.expect_kind(TokenKind::Identifier, "identifier")?;
        let name = Node::Identifier { name: name_tok.lexeme, line: name_tok.line, column: name_tok.column };
        Some(Node::Parameter { ty: Box::new(ty), name: Box::new(name) })
    }

    /// A type keyword: `int | float | bool | void`.
    fn parse_type(&mut self) -> Option<Node> {
        const TYPE_KEYWORDS: [&str; 4] = ["int", "float", "bool", "void"];
        match self.current() {
            Some(tok) if tok.kind == TokenKind::Keyword && TYPE_KEYWORDS.contains(&tok.lexeme.as_str()) => {
                let tok = self.advance().unwrap();
                Some(Node::Type { name: tok.lexeme, line: tok.line, column: tok.column })
            }
            _ => {
                self.error("expected type");
                None
            }
        }
    }
}
