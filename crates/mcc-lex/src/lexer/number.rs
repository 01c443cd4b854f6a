//! Number literal lexing.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a number literal matching `[0-9]+(\.[0-9]+)?`.
    ///
    /// There is no hex/binary/octal prefix and no exponent notation; the
    /// lexeme is kept as text and left for later stages to interpret.
    pub fn lex_number(&mut self) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let text = self.cursor.slice_from(self.token_start);
        self.make_token(TokenKind::Number, text)
    }
}
