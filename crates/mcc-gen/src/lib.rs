//! Linear x86 (32-bit) textual assembly generation from optimized IR.

pub mod asm;
pub mod error;
mod edge_cases;

use std::collections::HashSet;

use mcc_ir::{Instruction, Op};

pub use asm::AsmGenerator;
pub use error::{CodeGenError, Result};

/// Renders `instructions` to a complete assembly listing.
pub fn generate(instructions: &[Instruction]) -> String {
    asm::generate(instructions)
}

/// Checks that every `JUMP`/`JUMPTRUE`/`JUMPFALSE` target resolves to a
/// `LABEL` in the same instruction stream. The generator itself never
/// aborts on a violation; callers that want the invariant enforced call
/// this separately.
pub fn validate(instructions: &[Instruction]) -> Result<()> {
    let labels: HashSet<&str> = instructions
        .iter()
        .filter(|i| i.op == Op::Label)
        .filter_map(|i| i.result.as_deref())
        .collect();

    for instr in instructions {
        let target = match instr.op {
            Op::Jump => instr.arg1.as_deref(),
            Op::JumpTrue | Op::JumpFalse => instr.arg2.as_deref(),
            _ => None,
        };
        if let Some(target) = target {
            if !labels.contains(target) {
                return Err(CodeGenError::UnresolvedLabel(target.to_string()));
            }
        }
    }
    Ok(())
}
