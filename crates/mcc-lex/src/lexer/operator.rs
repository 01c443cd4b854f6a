//! Operator and punctuation lexing.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes the next operator or punctuation token, trying multi-character
    /// operators before their single-character prefixes as the longest-match
    /// rule requires. Returns `None` if the current character starts neither.
    pub fn lex_operator_or_punctuation(&mut self) -> Option<Token> {
        let c = self.cursor.current_char();

        macro_rules! two_char {
            ($second:expr, $text:expr) => {{
                self.cursor.advance();
                if self.cursor.current_char() == $second {
                    self.cursor.advance();
                    return Some(self.make_token(TokenKind::Operator, $text));
                }
            }};
        }

        match c {
            '=' => {
                two_char!('=', "==");
                Some(self.make_token(TokenKind::Operator, "="))
            }
            '!' => {
                two_char!('=', "!=");
                Some(self.make_token(TokenKind::Operator, "!"))
            }
            '<' => {
                two_char!('=', "<=");
                Some(self.make_token(TokenKind::Operator, "<"))
            }
            '>' => {
                two_char!('=', ">=");
                Some(self.make_token(TokenKind::Operator, ">"))
            }
            '&' => {
                two_char!('&', "&&");
                self.report_error("Unexpected character: &");
                self.next_token()
            }
            '|' => {
                two_char!('|', "||");
                self.report_error("Unexpected character: |");
                self.next_token()
            }
            '+' | '-' | '*' | '/' | '%' => {
                self.cursor.advance();
                Some(self.make_token(TokenKind::Operator, c.to_string()))
            }
            '(' | ')' | '{' | '}' | '[' | ']' | ';' | ',' | '.' => {
                self.cursor.advance();
                Some(self.make_token(TokenKind::Punctuation, c.to_string()))
            }
            _ => None,
        }
    }
}
