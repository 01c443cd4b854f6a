//! Linear x86 (32-bit) textual assembly emitter.
//!
//! The emitter is a single pass over the optimized instruction stream. It
//! is intentionally illustrative rather than linkable: the calling
//! convention it documents (cdecl-style, arguments pushed left-to-right)
//! does not match a real cdecl callee, and no attempt is made to reconcile
//! that. See the ABI note in the crate root.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

use mcc_ir::{Instruction, Op};

const REGISTER_COUNT: u32 = 6;

pub struct AsmGenerator {
    registers: HashMap<String, String>,
    reg_count: u32,
    variables: BTreeSet<String>,
    labels: BTreeSet<String>,
    text: String,
}

impl AsmGenerator {
    pub fn new() -> Self {
        Self {
            registers: HashMap::new(),
            reg_count: 0,
            variables: BTreeSet::new(),
            labels: BTreeSet::new(),
            text: String::new(),
        }
    }

    /// Renders `instructions` to a complete assembly listing: `.data`
    /// section, `.text` section, and a canned `_start`/`printf` trampoline.
    pub fn generate(mut self, instructions: &[Instruction]) -> String {
        self.labels = instructions
            .iter()
            .filter(|i| i.op == Op::Label)
            .filter_map(|i| i.result.clone())
            .collect();

        for instr in instructions {
            self.emit(instr);
        }

        let mut out = String::new();
        self.write_data_section(&mut out);
        out.push_str(".text\n");
        out.push_str(&self.text);
        out.push_str(TRAMPOLINE);
        out
    }

    fn write_data_section(&self, out: &mut String) {
        out.push_str(".data\n");
        for name in &self.variables {
            let _ = writeln!(out, "{name} dd 0");
        }
        out.push_str("fmt db \"%d\", 10, 0\n");
    }

    /// Returns the physical register bound to `name`, allocating a fresh
    /// one on first use via the `r((n mod 6) + 1)` stride.
    fn reg_for(&mut self, name: &str) -> String {
        if let Some(reg) = self.registers.get(name) {
            return reg.clone();
        }
        let n = self.reg_count;
        self.reg_count += 1;
        let reg = format!("r{}", (n % REGISTER_COUNT) + 1);
        self.registers.insert(name.to_string(), reg.clone());
        reg
    }

    /// Renders an operand for use on the right-hand side of an instruction:
    /// a literal is an immediate, a label is emitted bare, an
    /// already-registered name is its register, anything else is a `.data`
    /// memory reference.
    fn operand(&mut self, name: &str) -> String {
        if mcc_ir::instr::is_numeric_literal(name) || name == "true" || name == "false" {
            return name.to_string();
        }
        if self.labels.contains(name) {
            return name.to_string();
        }
        if let Some(reg) = self.registers.get(name) {
            return reg.clone();
        }
        self.variables.insert(name.to_string());
        format!("[{name}]")
    }

    fn line(&mut self, s: impl AsRef<str>) {
        self.text.push_str(s.as_ref());
        self.text.push('\n');
    }

    fn emit(&mut self, instr: &Instruction) {
        match instr.op {
            Op::Label => {
                let name = instr.result.as_deref().unwrap_or_default();
                self.line(format!("{name}:"));
            }
            Op::Enter => {
                self.line("push ebp");
                self.line("mov ebp, esp");
            }
            Op::Leave => {
                self.line("mov esp, ebp");
                self.line("pop ebp");
            }
            Op::Ret => {
                if let Some(v) = &instr.arg1 {
                    let operand = self.operand(v);
                    self.line(format!("mov eax, {operand}"));
                    self.registers.remove(v);
                }
                self.line("ret");
            }
            Op::Assign => {
                let result = instr.result.clone().unwrap_or_default();
                let arg = self.operand(instr.arg1.as_deref().unwrap_or_default());
                let reg = self.reg_for(&result);
                self.line(format!("mov {reg}, {arg}"));
            }
            Op::Add | Op::Sub => {
                let result = instr.result.clone().unwrap_or_default();
                let a = self.operand(instr.arg1.as_deref().unwrap_or_default());
                let b = self.operand(instr.arg2.as_deref().unwrap_or_default());
                let reg = self.reg_for(&result);
                let mnemonic = if instr.op == Op::Add { "add" } else { "sub" };
                self.line(format!("mov {reg}, {a}"));
                self.line(format!("{mnemonic} {reg}, {b}"));
            }
            Op::Mul => {
                let result = instr.result.clone().unwrap_or_default();
                let a = self.operand(instr.arg1.as_deref().unwrap_or_default());
                let b = self.operand(instr.arg2.as_deref().unwrap_or_default());
                self.line(format!("mov eax, {a}"));
                self.line(format!("imul eax, {b}"));
                let reg = self.reg_for(&result);
                self.line(format!("mov {reg}, eax"));
            }
            Op::Div | Op::Mod => {
                let result = instr.result.clone().unwrap_or_default();
                let a = self.operand(instr.arg1.as_deref().unwrap_or_default());
                let b = self.operand(instr.arg2.as_deref().unwrap_or_default());
                self.line(format!("mov eax, {a}"));
                self.line("cdq");
                self.line(format!("idiv {b}"));
                let src = if instr.op == Op::Div { "eax" } else { "edx" };
                let reg = self.reg_for(&result);
                self.line(format!("mov {reg}, {src}"));
            }
            Op::Neg => {
                let result = instr.result.clone().unwrap_or_default();
                let a = self.operand(instr.arg1.as_deref().unwrap_or_default());
                let reg = self.reg_for(&result);
                self.line(format!("mov {reg}, {a}"));
                self.line(format!("neg {reg}"));
            }
            Op::Not => {
                let result = instr.result.clone().unwrap_or_default();
                let a = self.operand(instr.arg1.as_deref().unwrap_or_default());
                let reg = self.reg_for(&result);
                self.line(format!("mov {reg}, {a}"));
                self.line(format!("xor {reg}, 1"));
            }
            Op::Eq | Op::Ne | Op::Lt | Op::Gt | Op::Le | Op::Ge => {
                let result = instr.result.clone().unwrap_or_default();
                let a = self.operand(instr.arg1.as_deref().unwrap_or_default());
                let b = self.operand(instr.arg2.as_deref().unwrap_or_default());
                let setcc = match instr.op {
                    Op::Eq => "sete",
                    Op::Ne => "setne",
                    Op::Lt => "setl",
                    Op::Gt => "setg",
                    Op::Le => "setle",
                    Op::Ge => "setge",
                    _ => unreachable!(),
                };
                let reg = self.reg_for(&result);
                self.line(format!("cmp {a}, {b}"));
                self.line(format!("{setcc} al"));
                self.line(format!("movzx {reg}, al"));
            }
            Op::Jump => {
                let label = instr.arg1.as_deref().unwrap_or_default();
                self.line(format!("jmp {label}"));
            }
            Op::JumpTrue | Op::JumpFalse => {
                let cond = self.operand(instr.arg1.as_deref().unwrap_or_default());
                let label = instr.arg2.clone().unwrap_or_default();
                let branch = if instr.op == Op::JumpTrue { "jne" } else { "je" };
                self.line(format!("cmp {cond}, 0"));
                self.line(format!("{branch} {label}"));
            }
            Op::Param => {
                let v = self.operand(instr.arg1.as_deref().unwrap_or_default());
                self.line(format!("push {v}"));
            }
            Op::Call => {
                let result = instr.result.clone().unwrap_or_default();
                let callee = instr.arg1.clone().unwrap_or_default();
                let argc: u32 = instr.arg2.as_deref().and_then(|s| s.parse().ok()).unwrap_or(0);
                self.line(format!("call {callee}"));
                if argc > 0 {
                    self.line(format!("add esp, {}", argc * 4));
                }
                let reg = self.reg_for(&result);
                self.line(format!("mov {reg}, eax"));
            }
            Op::Print => {
                let v = self.operand(instr.arg1.as_deref().unwrap_or_default());
                self.line(format!("push {v}"));
                self.line("call printf");
                self.line("add esp, 4");
            }
            Op::Nop => {}
        }
    }
}

impl Default for AsmGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Canned entry point and libc trampoline. Illustrative only: the emitted
/// code is not expected to link against a real libc without adjustment.
const TRAMPOLINE: &str = r#"
_start:
call main
mov ebx, eax
mov eax, 1
int 0x80

extern printf
"#;

/// Renders a complete assembly listing for `instructions`.
pub fn generate(instructions: &[Instruction]) -> String {
    AsmGenerator::new().generate(instructions)
}
