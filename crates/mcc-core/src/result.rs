//! The pipeline's output types, mirroring the data model every stage's
//! crate already speaks: token list, generic AST, symbol table, raw and
//! optimized IR, assembly text, and the three diagnostic categories.

use mcc_lex::Token;
use mcc_par::ast::GenericNode;
use mcc_sem::SymbolTable;
use mcc_ir::Instruction;

/// A single diagnostic, stripped down to the fields the external data
/// model exposes. Richer detail (notes, help text, codes) lives on the
/// per-stage `mcc_util::diagnostic::Diagnostic` and is not carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

/// Diagnostics partitioned by the stage that raised them. A non-empty
/// `lexical` or `syntax` list means every later artifact is advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    pub lexical: Vec<Diagnostic>,
    pub syntax: Vec<Diagnostic>,
    pub semantic: Vec<Diagnostic>,
}

impl Errors {
    pub fn is_empty(&self) -> bool {
        self.lexical.is_empty() && self.syntax.is_empty() && self.semantic.is_empty()
    }
}

/// Every artifact produced by a single [`crate::compile`] call. All fields
/// are always present; a stage that found nothing to report still yields
/// an empty container rather than an absent one.
#[derive(Debug, Clone)]
pub struct CompilationResult {
    pub tokens: Vec<Token>,
    pub ast: GenericNode,
    pub symbol_table: SymbolTable,
    pub ir: Vec<Instruction>,
    pub optimized_ir: Vec<Instruction>,
    pub assembly: String,
    pub errors: Errors,
}
