//! Identifier and keyword lexing.

use crate::token::{keyword_lookup, Token, TokenKind};
use crate::unicode::is_ascii_ident_continue;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers match `[A-Za-z_][A-Za-z0-9_]*`; the lexeme is then
    /// checked against the reserved word list to decide whether it is
    /// tagged `Keyword` or `Identifier`.
    pub fn lex_identifier(&mut self) -> Token {
        while is_ascii_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        let kind = if keyword_lookup(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.make_token(kind, text)
    }
}
