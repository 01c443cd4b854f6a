//! mcc-core - the compiler pipeline's single pure entry point.
//!
//! [`compile`] runs all six stages (lexer, parser, semantic analyzer, IR
//! generator, optimizer, code generator) over a source string and returns
//! a [`CompilationResult`] holding every intermediate artifact plus the
//! diagnostics each stage produced. No stage aborts the pipeline: later
//! stages always run on whatever partial artifact the previous stage
//! managed to build, so a single call surfaces every category of error at
//! once. The function performs no I/O and touches no shared state between
//! calls.

mod result;

pub use result::{CompilationResult, Diagnostic, Errors};

use mcc_lex::Lexer;
use mcc_par::ast::program_to_generic;
use mcc_par::Parser;
use mcc_util::diagnostic::Diagnostic as UtilDiagnostic;
use mcc_util::Handler;

fn to_diagnostics(handler: &Handler) -> Vec<Diagnostic> {
    handler.diagnostics().iter().map(from_util_diagnostic).collect()
}

fn from_util_diagnostic(diag: &UtilDiagnostic) -> Diagnostic {
    Diagnostic { message: diag.message.clone(), line: diag.span.line, column: diag.span.column }
}

/// Compiles `source` and returns every artifact the pipeline produced,
/// whether or not earlier stages reported errors.
pub fn compile(source: &str) -> CompilationResult {
    let lex_handler = Handler::new();
    let tokens = Lexer::tokenize(source, &lex_handler);

    let par_handler = Handler::new();
    let ast = Parser::parse(tokens.clone(), &par_handler);
    let ast_generic = program_to_generic(&ast);

    let sem_handler = Handler::new();
    let symbol_table = mcc_sem::analyze(&ast, &sem_handler);

    let ir = mcc_ir::generate(&ast);
    let optimized_ir = mcc_ir::optimize(&ir);
    let assembly = mcc_gen::generate(&optimized_ir);

    CompilationResult {
        tokens,
        ast: ast_generic,
        symbol_table,
        ir,
        optimized_ir,
        assembly,
        errors: Errors {
            lexical: to_diagnostics(&lex_handler),
            syntax: to_diagnostics(&par_handler),
            semantic: to_diagnostics(&sem_handler),
        },
    }
}
