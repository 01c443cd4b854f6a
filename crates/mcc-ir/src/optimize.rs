//! Three single-pass optimizations applied in order: constant folding,
//! constant propagation, then dead code elimination. None of them iterate
//! to a fixed point, reorder instructions, remove non-`ASSIGN` instructions,
//! or rewrite jump targets.

use std::collections::{HashMap, HashSet};

use crate::instr::{is_numeric_literal, Instruction, Op};

/// Runs all three passes over a copy of `instructions` and returns the
/// optimized stream.
pub fn optimize(instructions: &[Instruction]) -> Vec<Instruction> {
    let folded = fold_constants(instructions);
    let propagated = propagate_constants(&folded);
    eliminate_dead_assigns(&propagated)
}

fn parse_numeric(s: &str) -> Option<f64> {
    if is_numeric_literal(s) {
        s.parse::<f64>().ok()
    } else {
        None
    }
}

fn is_int_literal(s: &str) -> bool {
    is_numeric_literal(s) && !s.contains('.')
}

fn format_numeric(value: f64, as_int: bool) -> String {
    if as_int {
        format!("{}", value as i64)
    } else {
        let s = format!("{value}");
        if s.contains('.') { s } else { format!("{s}.0") }
    }
}

/// Pass 1: replaces arithmetic/comparison instructions whose operands are
/// both numeric literals with an equivalent `ASSIGN`. Division and modulo
/// by zero are left untouched.
fn fold_constants(instructions: &[Instruction]) -> Vec<Instruction> {
    instructions
        .iter()
        .map(|instr| {
            let (Some(arg1), Some(arg2)) = (instr.arg1.as_deref(), instr.arg2.as_deref()) else {
                return instr.clone();
            };
            let (Some(a), Some(b)) = (parse_numeric(arg1), parse_numeric(arg2)) else {
                return instr.clone();
            };
            let both_int = is_int_literal(arg1) && is_int_literal(arg2);

            let folded: Option<String> = match instr.op {
                Op::Add => Some(format_numeric(a + b, both_int)),
                Op::Sub => Some(format_numeric(a - b, both_int)),
                Op::Mul => Some(format_numeric(a * b, both_int)),
                Op::Div if b != 0.0 => Some(format_numeric(a / b, both_int)),
                Op::Mod if b != 0.0 => Some(format_numeric(a % b, both_int)),
                Op::Eq => Some((a == b).to_string()),
                Op::Ne => Some((a != b).to_string()),
                Op::Lt => Some((a < b).to_string()),
                Op::Gt => Some((a > b).to_string()),
                Op::Le => Some((a <= b).to_string()),
                Op::Ge => Some((a >= b).to_string()),
                _ => None,
            };

            match folded {
                Some(value) if instr.result.is_some() => {
                    Instruction::assign(instr.result.clone().unwrap(), value)
                }
                _ => instr.clone(),
            }
        })
        .collect()
}

/// Pass 2: a single forward scan tracking `variable -> constant` bindings.
/// Each instruction's operands are substituted using the map state *before*
/// this instruction updates its own entry, then the map is updated or
/// invalidated for this instruction's result.
fn propagate_constants(instructions: &[Instruction]) -> Vec<Instruction> {
    let mut constants: HashMap<String, String> = HashMap::new();
    let mut out = Vec::with_capacity(instructions.len());

    for instr in instructions {
        let mut next = instr.clone();
        if let Some(arg1) = &next.arg1 {
            if let Some(value) = constants.get(arg1) {
                next.arg1 = Some(value.clone());
            }
        }
        if let Some(arg2) = &next.arg2 {
            if let Some(value) = constants.get(arg2) {
                next.arg2 = Some(value.clone());
            }
        }

        if next.op == Op::Assign {
            if let (Some(result), Some(arg1)) = (&next.result, &next.arg1) {
                if is_numeric_literal(arg1) || arg1 == "true" || arg1 == "false" {
                    constants.insert(result.clone(), arg1.clone());
                } else if let Some(value) = constants.get(arg1).cloned() {
                    constants.insert(result.clone(), value);
                } else {
                    constants.remove(result);
                }
            }
        } else if let Some(result) = &next.result {
            constants.remove(result);
        }

        out.push(next);
    }

    out
}

fn collect_labels(instructions: &[Instruction]) -> HashSet<String> {
    instructions
        .iter()
        .filter(|i| i.op == Op::Label)
        .filter_map(|i| i.result.clone())
        .collect()
}

/// Pass 3: drops `ASSIGN` instructions whose result is never used as an
/// operand elsewhere (labels and numeric literals don't count as uses).
fn eliminate_dead_assigns(instructions: &[Instruction]) -> Vec<Instruction> {
    let labels = collect_labels(instructions);

    let mut used: HashSet<String> = HashSet::new();
    for instr in instructions {
        for operand in [instr.arg1.as_deref(), instr.arg2.as_deref()].into_iter().flatten() {
            if !is_numeric_literal(operand) && !labels.contains(operand) {
                used.insert(operand.to_string());
            }
        }
    }

    instructions
        .iter()
        .map(|instr| {
            if instr.op == Op::Assign {
                let is_used = instr.result.as_deref().map(|r| used.contains(r)).unwrap_or(false);
                if !is_used {
                    return Instruction::nop();
                }
            }
            instr.clone()
        })
        .filter(|instr| instr.op != Op::Nop)
        .collect()
}
