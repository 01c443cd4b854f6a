//! Lowers the AST into a flat instruction list.

use mcc_par::ast::{Ast, Node};

use crate::instr::{Instruction, Op};

/// Per-compilation lowering state: the temporary and label counters, reset
/// for every call to [`generate`].
struct IrGen {
    instructions: Vec<Instruction>,
    temp_count: u32,
    label_count: u32,
}

impl IrGen {
    fn new() -> Self {
        Self { instructions: Vec::new(), temp_count: 0, label_count: 0 }
    }

    fn new_temp(&mut self) -> String {
        let t = format!("t{}", self.temp_count);
        self.temp_count += 1;
        t
    }

    fn new_label(&mut self) -> String {
        let l = format!("L{}", self.label_count);
        self.label_count += 1;
        l
    }

    fn emit(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    fn lower_program(&mut self, ast: &Ast) {
        for decl in ast {
            match decl {
                Node::FunctionDeclaration { name, body, .. } => self.lower_function(name, body),
                Node::VarDeclaration { .. } => self.lower_statement(decl),
                _ => {}
            }
        }
    }

    fn lower_function(&mut self, name: &Node, body: &Node) {
        let fn_name = match name {
            Node::Identifier { name, .. } => name.clone(),
            _ => String::new(),
        };
        self.emit(Instruction::with_result(Op::Label, &fn_name));
        self.emit(Instruction::new(Op::Enter));
        self.lower_statement(body);
        self.emit(Instruction::new(Op::Leave));
        self.emit(Instruction::new(Op::Ret));
    }

    fn lower_statement(&mut self, node: &Node) {
        match node {
            Node::Block(stmts) => {
                for stmt in stmts {
                    self.lower_statement(stmt);
                }
            }
            Node::VarDeclaration { name, init, .. } => {
                let var_name = Self::identifier_name(name);
                if let Some(init) = init {
                    let v = self.lower_expr(init);
                    self.emit(Instruction::assign(var_name, v));
                }
            }
            Node::IfStatement { cond, then_branch, else_branch, .. } => {
                let l_else = self.new_label();
                let l_end = self.new_label();
                let cond_operand = self.lower_expr(cond);
                self.emit(Instruction::jump_cond(Op::JumpFalse, cond_operand, l_else.clone()));
                self.lower_statement(then_branch);
                self.emit(Instruction::with_arg1(Op::Jump, l_end.clone()));
                self.emit(Instruction::with_result(Op::Label, l_else));
                if let Some(else_branch) = else_branch {
                    self.lower_statement(else_branch);
                }
                self.emit(Instruction::with_result(Op::Label, l_end));
            }
            Node::WhileStatement { cond, body, .. } => {
                let l_start = self.new_label();
                let l_end = self.new_label();
                self.emit(Instruction::with_result(Op::Label, l_start.clone()));
                let cond_operand = self.lower_expr(cond);
                self.emit(Instruction::jump_cond(Op::JumpFalse, cond_operand, l_end.clone()));
                self.lower_statement(body);
                self.emit(Instruction::with_arg1(Op::Jump, l_start));
                self.emit(Instruction::with_result(Op::Label, l_end));
            }
            Node::ForStatement { init, cond, step, body, .. } => {
                self.lower_statement(init);
                let l_start = self.new_label();
                let l_end = self.new_label();
                self.emit(Instruction::with_result(Op::Label, l_start.clone()));
                if !matches!(cond.as_ref(), Node::Empty) {
                    let cond_operand = self.lower_expr(cond);
                    self.emit(Instruction::jump_cond(Op::JumpFalse, cond_operand, l_end.clone()));
                }
                self.lower_statement(body);
                if !matches!(step.as_ref(), Node::Empty) {
                    self.lower_expr(step);
                }
                self.emit(Instruction::with_arg1(Op::Jump, l_start));
                self.emit(Instruction::with_result(Op::Label, l_end));
            }
            Node::ReturnStatement { value, .. } => {
                if let Some(value) = value {
                    let v = self.lower_expr(value);
                    self.emit(Instruction::with_arg1(Op::Ret, v));
                } else {
                    self.emit(Instruction::new(Op::Ret));
                }
            }
            Node::PrintStatement { value, .. } => {
                let v = self.lower_expr(value);
                self.emit(Instruction::with_arg1(Op::Print, v));
            }
            Node::ExpressionStatement(expr) => {
                self.lower_expr(expr);
            }
            Node::Empty => {}
            _ => {}
        }
    }

    /// Lowers an expression, returning the operand string that represents
    /// its value (a literal, identifier, or freshly-minted temporary).
    fn lower_expr(&mut self, node: &Node) -> String {
        match node {
            Node::Assignment { target, value, .. } => {
                let v = self.lower_expr(value);
                let lhs_name = Self::identifier_name(target);
                self.emit(Instruction::assign(&lhs_name, v));
                lhs_name
            }
            Node::Binary { op, left, right, .. } => self.lower_binary(op, left, right),
            Node::Unary { op, operand, .. } => {
                let v = self.lower_expr(operand);
                let t = self.new_temp();
                let ir_op = match op.as_str() {
                    "-" => Op::Neg,
                    "!" => Op::Not,
                    _ => Op::Nop,
                };
                self.emit(Instruction { op: ir_op, result: Some(t.clone()), arg1: Some(v), arg2: None });
                t
            }
            Node::FunctionCall { callee, args, .. } => {
                let fn_name = Self::identifier_name(callee);
                let arg_operands: Vec<String> = args.iter().map(|a| self.lower_expr(a)).collect();
                for arg in &arg_operands {
                    self.emit(Instruction::with_arg1(Op::Param, arg));
                }
                let t = self.new_temp();
                self.emit(Instruction::binary(Op::Call, &t, fn_name, arg_operands.len().to_string()));
                t
            }
            Node::Grouping(inner) => self.lower_expr(inner),
            Node::Identifier { name, .. } => name.clone(),
            Node::NumberLiteral { value, .. } => value.clone(),
            Node::StringLiteral { value, .. } => value.clone(),
            Node::BoolLiteral { value, .. } => value.clone(),
            _ => String::new(),
        }
    }

    fn lower_binary(&mut self, op: &str, left: &Node, right: &Node) -> String {
        if op == "||" {
            return self.lower_short_circuit(left, right, Op::JumpTrue);
        }
        if op == "&&" {
            return self.lower_short_circuit(left, right, Op::JumpFalse);
        }

        let lv = self.lower_expr(left);
        let rv = self.lower_expr(right);
        let ir_op = match op {
            "+" => Op::Add,
            "-" => Op::Sub,
            "*" => Op::Mul,
            "/" => Op::Div,
            "%" => Op::Mod,
            "==" => Op::Eq,
            "!=" => Op::Ne,
            "<" => Op::Lt,
            ">" => Op::Gt,
            "<=" => Op::Le,
            ">=" => Op::Ge,
            _ => Op::Nop,
        };
        let t = self.new_temp();
        self.emit(Instruction::binary(ir_op, &t, lv, rv));
        t
    }

    /// `a || b` and `a && b` lower to the same shape, mirrored by which
    /// conditional jump short-circuits evaluation of `b`.
    fn lower_short_circuit(&mut self, left: &Node, right: &Node, short_circuit_on: Op) -> String {
        let t = self.new_temp();
        let l_end = self.new_label();

        let lv = self.lower_expr(left);
        self.emit(Instruction::assign(&t, lv));
        self.emit(Instruction::jump_cond(short_circuit_on, &t, l_end.clone()));

        let rv = self.lower_expr(right);
        self.emit(Instruction::assign(&t, rv));
        self.emit(Instruction::with_result(Op::Label, l_end));

        t
    }

    fn identifier_name(node: &Node) -> String {
        match node {
            Node::Identifier { name, .. } => name.clone(),
            _ => String::new(),
        }
    }
}

/// Lowers a whole program into a flat instruction list. Temporary and label
/// counters are local to this call.
pub fn generate(ast: &Ast) -> Vec<Instruction> {
    let mut gen = IrGen::new();
    gen.lower_program(ast);
    gen.instructions
}
