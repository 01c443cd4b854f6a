//! Edge case tests for mcc-lex.
