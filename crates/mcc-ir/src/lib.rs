//! Flat three-address IR: generation from the AST and a small, single-pass
//! optimizer over the generated instruction stream.

pub mod gen;
pub mod instr;
pub mod optimize;
mod edge_cases;

pub use gen::generate;
pub use instr::{Instruction, Op};
pub use optimize::optimize;
