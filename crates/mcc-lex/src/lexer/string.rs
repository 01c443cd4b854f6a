//! String literal lexing.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a string literal matching `"([^"\\]|\\.)*"`.
    ///
    /// The lexeme keeps the enclosing quotes and any escape sequences
    /// verbatim; nothing is decoded here. A newline or end-of-input
    /// before the closing quote is an unterminated-string diagnostic,
    /// and the partial lexeme (with a synthesized closing quote) is
    /// still returned so the parser has something to consume.
    pub fn lex_string(&mut self) -> Token {
        self.cursor.advance(); // opening quote

        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated string literal");
                break;
            }

            let c = self.cursor.current_char();

            if c == '"' {
                self.cursor.advance();
                break;
            }

            if c == '\n' {
                self.report_error("unterminated string literal");
                break;
            }

            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    self.report_error("unterminated string literal");
                    break;
                }
                self.cursor.advance();
            } else {
                self.cursor.advance();
            }
        }

        let text = self.cursor.slice_from(self.token_start);
        self.make_token(TokenKind::String, text)
    }
}
