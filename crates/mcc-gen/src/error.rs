//! Error types for assembly code generation.
//!
//! The code generator is total over any instruction stream the IR stage can
//! produce, so this exists mainly to give callers embedding [`crate::generate`]
//! a typed failure mode rather than a panic if that invariant is ever broken.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeGenError {
    /// A `JUMP`/`JUMPTRUE`/`JUMPFALSE` referenced a label no `LABEL` defines.
    #[error("jump target '{0}' has no matching label")]
    UnresolvedLabel(String),

    /// An instruction whose shape the emitter does not recognize.
    #[error("malformed instruction: {0}")]
    MalformedInstruction(String),
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
