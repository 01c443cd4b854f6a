//! Token kinds and the `Token` type produced by the lexer.

use std::fmt;

/// The coarse category a token belongs to.
///
/// This is intentionally a small, closed set: the language has no need
/// for a richer lexical taxonomy than keyword / identifier / number /
/// string / operator / punctuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// One of the reserved words (`if`, `while`, `int`, ...).
    Keyword,
    /// A user-defined name that is not a reserved word.
    Identifier,
    /// An integer or floating point literal.
    Number,
    /// A double-quoted string literal (escapes already resolved).
    String,
    /// A multi-character or single-character operator (`+`, `==`, `&&`, ...).
    Operator,
    /// Structural punctuation (`(`, `)`, `{`, `}`, `;`, `,`).
    Punctuation,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::Operator => "Operator",
            TokenKind::Punctuation => "Punctuation",
        };
        write!(f, "{s}")
    }
}

/// A single lexical token.
///
/// `lexeme` always holds the literal source text that produced the
/// token verbatim -- for [`TokenKind::String`] this includes the
/// enclosing quotes and any escape sequences undecoded -- and
/// `line`/`column` mark where the token starts, both 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}

/// The full set of reserved words. Anything else that matches an
/// identifier pattern is a plain [`TokenKind::Identifier`].
pub const KEYWORDS: &[&str] = &[
    "int", "float", "bool", "void", "if", "else", "while", "for", "return", "true", "false",
    "print", "read", "switch", "case", "default", "break",
];

pub fn keyword_lookup(s: &str) -> bool {
    KEYWORDS.contains(&s)
}
