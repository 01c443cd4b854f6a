//! Core lexer implementation.
//!
//! This module contains the main Lexer struct and its core dispatch.

use mcc_util::{DiagnosticBuilder, Handler, Span};

use crate::cursor::Cursor;
use crate::token::Token;

/// Lexer for mini-C source code.
///
/// Transforms source text into a stream of tokens, skipping whitespace
/// and comments as it goes. Matching follows a fixed priority at every
/// position: identifier/keyword, number, string, operator, punctuation.
/// An unrecognized character is reported through `handler` and skipped
/// rather than aborting the scan.
pub struct Lexer<'a> {
    pub cursor: Cursor<'a>,
    pub handler: &'a Handler,
    pub token_start: usize,
    pub(super) token_start_line: u32,
    pub(super) token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Lex an entire source string into a flat token vector.
    ///
    /// Never fails: unrecognized characters are reported through
    /// `handler` and dropped from the returned stream.
    pub fn tokenize(source: &'a str, handler: &'a Handler) -> Vec<Token> {
        let mut lexer = Self::new(source, handler);
        let mut tokens = Vec::new();
        while let Some(tok) = lexer.next_token() {
            tokens.push(tok);
        }
        tokens
    }

    /// Returns the next token, or `None` once the source is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            self.cursor.skip_whitespace();
            if self.skip_comment() {
                continue;
            }
            break;
        }

        if self.cursor.is_at_end() {
            return None;
        }

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        let c = self.cursor.current_char();

        if crate::unicode::is_ascii_ident_start(c) {
            return Some(self.lex_identifier());
        }
        if c.is_ascii_digit() {
            return Some(self.lex_number());
        }
        if c == '"' {
            return Some(self.lex_string());
        }
        if let Some(tok) = self.lex_operator_or_punctuation() {
            return Some(tok);
        }

        self.report_error(format!("Unexpected character: {c}"));
        self.cursor.advance();
        self.next_token()
    }

    /// Skips a `//` line comment or `/* ... */` block comment starting at
    /// the cursor. Returns `true` if one was consumed, in which case the
    /// caller retries whitespace/comment skipping.
    fn skip_comment(&mut self) -> bool {
        if self.cursor.current_char() != '/' {
            return false;
        }
        match self.cursor.peek_char(1) {
            '/' => {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                true
            }
            '*' => {
                self.cursor.advance();
                self.cursor.advance();
                loop {
                    if self.cursor.is_at_end() {
                        self.report_error("unterminated block comment");
                        break;
                    }
                    if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                        self.cursor.advance();
                        self.cursor.advance();
                        break;
                    }
                    self.cursor.advance();
                }
                true
            }
            _ => false,
        }
    }

    pub(super) fn make_token(&self, kind: crate::token::TokenKind, lexeme: impl Into<String>) -> Token {
        Token::new(kind, lexeme, self.token_start_line, self.token_start_column)
    }

    /// Reports a lexical error spanning from the current token's start to
    /// the cursor's current position.
    pub fn report_error(&self, message: impl Into<String>) {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
    }

    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
