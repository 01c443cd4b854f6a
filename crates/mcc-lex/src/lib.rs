//! mcc-lex - Lexical analysis for the mini-C compiler pipeline.
//!
//! Converts source text into a flat stream of [`Token`]s. The lexer never
//! fails fatally: unrecognized characters are reported through a
//! [`mcc_util::diagnostic::Handler`] and skipped so that tokenization
//! always reaches the end of the source.

pub mod cursor;
pub mod lexer;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use token::{Token, TokenKind, KEYWORDS};

mod edge_cases;
