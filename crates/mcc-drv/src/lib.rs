//! mcc-drv - the command-line driver around [`mcc_core::compile`].
//!
//! The driver is the only part of this workspace that touches the
//! filesystem: it reads a source file, calls the pure pipeline entry
//! point, prints whichever artifact was asked for, and reports
//! diagnostics. None of that logic lives in `mcc-core` itself.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use mcc_core::{CompilationResult, Diagnostic};

/// Which pipeline artifact `--emit` asked to print. Defaults to assembly,
/// the pipeline's final output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitKind {
    Tokens,
    Ast,
    SymbolTable,
    Ir,
    OptimizedIr,
    Asm,
}

impl Default for EmitKind {
    fn default() -> Self {
        EmitKind::Asm
    }
}

impl EmitKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "tokens" => Some(EmitKind::Tokens),
            "ast" => Some(EmitKind::Ast),
            "symbols" => Some(EmitKind::SymbolTable),
            "ir" => Some(EmitKind::Ir),
            "optimized-ir" => Some(EmitKind::OptimizedIr),
            "asm" => Some(EmitKind::Asm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_file: PathBuf,
    pub emit: EmitKind,
    pub verbose: bool,
}

/// Parses the driver's argument vector: a single positional source path,
/// plus `--emit <kind>` and `--verbose`.
pub fn parse_args(args: &[String]) -> Result<Config> {
    let mut input_file = None;
    let mut emit = EmitKind::default();
    let mut verbose = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--emit" => {
                let kind = iter.next().context("--emit requires a value")?;
                emit = EmitKind::parse(kind)
                    .with_context(|| format!("unknown --emit value '{kind}'"))?;
            }
            "--verbose" | "-v" => verbose = true,
            other if !other.starts_with('-') => {
                if input_file.is_some() {
                    bail!("multiple input files given; this driver compiles one file per run");
                }
                input_file = Some(PathBuf::from(other));
            }
            other => bail!("unrecognized option '{other}'"),
        }
    }

    let input_file = input_file.context("no input file given")?;
    Ok(Config { input_file, emit, verbose })
}

/// Runs the driver end to end: parses arguments, reads the source file,
/// compiles it, prints the requested artifact and any diagnostics, and
/// returns an error if compilation reported any.
pub fn run(args: &[String]) -> Result<()> {
    let config = parse_args(args)?;

    tracing::debug!(file = %config.input_file.display(), emit = ?config.emit, "starting compilation");

    let source = std::fs::read_to_string(&config.input_file)
        .with_context(|| format!("reading {}", config.input_file.display()))?;

    let result = mcc_core::compile(&source);
    tracing::debug!(
        tokens = result.tokens.len(),
        ir = result.ir.len(),
        optimized_ir = result.optimized_ir.len(),
        "compilation finished"
    );
    print_artifact(&config, &result);
    print_diagnostics(&result);

    if !result.errors.is_empty() {
        bail!("compilation reported diagnostics");
    }
    Ok(())
}

fn print_artifact(config: &Config, result: &CompilationResult) {
    match config.emit {
        EmitKind::Tokens => {
            for token in &result.tokens {
                println!("{:?} {:?} {}:{}", token.kind, token.lexeme, token.line, token.column);
            }
        }
        EmitKind::Ast => println!("{:#?}", result.ast),
        EmitKind::SymbolTable => println!("{:#?}", result.symbol_table),
        EmitKind::Ir => {
            for instr in &result.ir {
                println!("{}", instr.render());
            }
        }
        EmitKind::OptimizedIr => {
            for instr in &result.optimized_ir {
                println!("{}", instr.render());
            }
        }
        EmitKind::Asm => print!("{}", result.assembly),
    }
}

fn print_diagnostics(result: &CompilationResult) {
    for (category, diags) in [
        ("lexical", &result.errors.lexical),
        ("syntax", &result.errors.syntax),
        ("semantic", &result.errors.semantic),
    ] {
        for diag in diags {
            print_diagnostic(category, diag);
        }
    }
}

fn print_diagnostic(category: &str, diag: &Diagnostic) {
    eprintln!("{category} error at {}:{}: {}", diag.line, diag.column, diag.message);
}
