//! Flat three-address instruction format.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Label,
    Enter,
    Leave,
    Ret,
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Neg,
    Not,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Jump,
    JumpTrue,
    JumpFalse,
    Param,
    Call,
    Print,
    Nop,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::Label => "LABEL",
            Op::Enter => "ENTER",
            Op::Leave => "LEAVE",
            Op::Ret => "RET",
            Op::Assign => "ASSIGN",
            Op::Add => "ADD",
            Op::Sub => "SUB",
            Op::Mul => "MUL",
            Op::Div => "DIV",
            Op::Mod => "MOD",
            Op::Neg => "NEG",
            Op::Not => "NOT",
            Op::Eq => "EQ",
            Op::Ne => "NE",
            Op::Lt => "LT",
            Op::Gt => "GT",
            Op::Le => "LE",
            Op::Ge => "GE",
            Op::Jump => "JUMP",
            Op::JumpTrue => "JUMPTRUE",
            Op::JumpFalse => "JUMPFALSE",
            Op::Param => "PARAM",
            Op::Call => "CALL",
            Op::Print => "PRINT",
            Op::Nop => "NOP",
        };
        write!(f, "{s}")
    }
}

/// A single three-address instruction. Operands are always strings: numeric
/// literals, identifiers, temporaries (`t<N>`), or labels (`L<N>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub result: Option<String>,
    pub arg1: Option<String>,
    pub arg2: Option<String>,
}

impl Instruction {
    pub fn new(op: Op) -> Self {
        Self { op, result: None, arg1: None, arg2: None }
    }

    pub fn with_result(op: Op, result: impl Into<String>) -> Self {
        Self { op, result: Some(result.into()), arg1: None, arg2: None }
    }

    pub fn with_arg1(op: Op, arg1: impl Into<String>) -> Self {
        Self { op, result: None, arg1: Some(arg1.into()), arg2: None }
    }

    pub fn assign(result: impl Into<String>, arg1: impl Into<String>) -> Self {
        Self { op: Op::Assign, result: Some(result.into()), arg1: Some(arg1.into()), arg2: None }
    }

    pub fn binary(op: Op, result: impl Into<String>, arg1: impl Into<String>, arg2: impl Into<String>) -> Self {
        Self { op, result: Some(result.into()), arg1: Some(arg1.into()), arg2: Some(arg2.into()) }
    }

    pub fn jump_cond(op: Op, cond: impl Into<String>, label: impl Into<String>) -> Self {
        Self { op, result: None, arg1: Some(cond.into()), arg2: Some(label.into()) }
    }

    pub fn nop() -> Self {
        Self::new(Op::Nop)
    }

    /// Renders this instruction the way the optimizer/debug tooling prints
    /// an IR listing: `OP result, arg1, arg2` with absent fields omitted.
    pub fn render(&self) -> String {
        let mut parts = vec![self.op.to_string()];
        let operands: Vec<&str> = [self.result.as_deref(), self.arg1.as_deref(), self.arg2.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !operands.is_empty() {
            parts.push(operands.join(", "));
        }
        parts.join(" ")
    }
}

/// Returns true if `s` is a numeric literal, including a negative sign
/// introduced by constant folding (the source grammar itself has no
/// negative literals; unary minus is a separate operator).
pub fn is_numeric_literal(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    if s.is_empty() {
        return false;
    }
    let mut parts = s.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match parts.next() {
        None => true,
        Some(frac) => !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()),
    }
}
