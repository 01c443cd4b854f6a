//! mcc-util - Core utilities shared across the mini-C compiler pipeline.
//!
//! This crate provides the foundation types used by every other stage of
//! the pipeline: interned identifiers ([`Symbol`]), source locations
//! ([`Span`]/[`FileId`]), diagnostics ([`diagnostic::Handler`]), typed
//! arena vectors ([`IndexVec`]/[`Idx`]), and definition ids ([`DefId`]).
//!
//! None of these types depend on any particular compilation stage, which
//! is what lets the lexer, parser, semantic analyzer, IR generator and
//! code generator all speak the same vocabulary without circular crate
//! dependencies.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level, SourceSnippet};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
