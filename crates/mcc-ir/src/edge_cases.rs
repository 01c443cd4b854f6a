//! Edge case tests for mcc-ir generation and optimization.

#[cfg(test)]
mod tests {
    use crate::instr::Op;
    use crate::{generate, optimize, Instruction};
    use mcc_lex::Lexer;
    use mcc_par::Parser;
    use mcc_util::Handler;

    fn gen_source(source: &str) -> Vec<Instruction> {
        let handler = Handler::new();
        let tokens = Lexer::tokenize(source, &handler);
        let ast = Parser::parse(tokens, &handler);
        generate(&ast)
    }

    fn render(instructions: &[Instruction]) -> Vec<String> {
        instructions.iter().map(Instruction::render).collect()
    }

    #[test]
    fn test_function_scaffold_always_has_label_enter_leave_ret() {
        let ir = gen_source("int main() { return 0; }");
        assert_eq!(ir[0].op, Op::Label);
        assert_eq!(ir[0].result.as_deref(), Some("main"));
        assert_eq!(ir[1].op, Op::Enter);
        assert_eq!(ir[ir.len() - 2].op, Op::Leave);
        assert_eq!(ir[ir.len() - 1].op, Op::Ret);
    }

    #[test]
    fn test_explicit_return_emits_its_own_ret_before_scaffold_ret() {
        let ir = gen_source("int main() { return 0; }");
        let ret_count = ir.iter().filter(|i| i.op == Op::Ret).count();
        assert_eq!(ret_count, 2);
    }

    #[test]
    fn test_var_decl_without_init_emits_nothing() {
        let ir = gen_source("int main() { int x; return 0; }");
        assert!(ir.iter().all(|i| i.op != Op::Assign));
    }

    #[test]
    fn test_var_decl_with_init_emits_assign() {
        let ir = gen_source("int main() { int x = 1; return 0; }");
        let assigns: Vec<_> = ir.iter().filter(|i| i.op == Op::Assign).collect();
        assert_eq!(assigns.len(), 1);
        assert_eq!(assigns[0].result.as_deref(), Some("x"));
        assert_eq!(assigns[0].arg1.as_deref(), Some("1"));
    }

    #[test]
    fn test_if_without_else_still_emits_both_labels() {
        let ir = gen_source("int main() { if (1 < 2) { } return 0; }");
        let labels: Vec<_> = ir.iter().filter(|i| i.op == Op::Label).collect();
        // function label + Lelse + Lend
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn test_while_loop_jumps_back_to_start() {
        let ir = gen_source("int main() { while (1 < 2) { } return 0; }");
        assert!(ir.iter().any(|i| i.op == Op::Jump));
        assert!(ir.iter().any(|i| i.op == Op::JumpFalse));
    }

    #[test]
    fn test_for_loop_emits_step_after_body_before_back_edge() {
        let ir = gen_source("int main() { for (int i = 0; i < 10; i = i + 1) { } return 0; }");
        let jump_pos = ir.iter().position(|i| i.op == Op::Jump).unwrap();
        let step_assign_pos = ir
            .iter()
            .position(|i| i.op == Op::Assign && i.result.as_deref() == Some("i"))
            .unwrap();
        assert!(step_assign_pos < jump_pos);
    }

    #[test]
    fn test_for_loop_missing_clauses_skip_cond_check() {
        let ir = gen_source("int main() { for (;;) { return 0; } return 1; }");
        assert_eq!(ir.iter().filter(|i| i.op == Op::JumpFalse).count(), 0);
    }

    #[test]
    fn test_logical_or_short_circuits_with_jumptrue() {
        let ir = gen_source("int main() { if (1 < 2 || 3 < 4) { } return 0; }");
        assert!(ir.iter().any(|i| i.op == Op::JumpTrue));
    }

    #[test]
    fn test_logical_and_short_circuits_with_jumpfalse() {
        let ir = gen_source("int main() { if (1 < 2 && 3 < 4) { } return 0; }");
        assert!(ir.iter().filter(|i| i.op == Op::JumpFalse).count() >= 2);
    }

    #[test]
    fn test_function_call_emits_param_per_arg_then_call() {
        let ir = gen_source("int add(int a, int b) { return a + b; } int main() { return add(1, 2); }");
        let param_count = ir.iter().filter(|i| i.op == Op::Param).count();
        assert_eq!(param_count, 2);
        let call = ir.iter().find(|i| i.op == Op::Call).unwrap();
        assert_eq!(call.arg1.as_deref(), Some("add"));
        assert_eq!(call.arg2.as_deref(), Some("2"));
    }

    #[test]
    fn test_arithmetic_and_unary_each_emit_one_instruction() {
        let ir = gen_source("int main() { int x = -5 + 1; return 0; }");
        assert!(ir.iter().any(|i| i.op == Op::Neg));
        assert!(ir.iter().any(|i| i.op == Op::Add));
    }

    #[test]
    fn test_print_statement_lowers_to_print_instruction() {
        let ir = gen_source("int main() { print 1; return 0; }");
        assert!(ir.iter().any(|i| i.op == Op::Print));
    }

    #[test]
    fn test_constant_folding_combines_literal_arithmetic() {
        let ir = gen_source("int main() { int x = 1 + 2; return 0; }");
        let opt = optimize(&ir);
        let assign = opt.iter().find(|i| i.result.as_deref() == Some("x")).unwrap();
        assert_eq!(assign.arg1.as_deref(), Some("3"));
    }

    #[test]
    fn test_constant_folding_leaves_division_by_zero_untouched() {
        let ir = vec![Instruction::binary(Op::Div, "t0", "1", "0")];
        let opt = optimize(&ir);
        assert_eq!(opt[0].op, Op::Div);
    }

    #[test]
    fn test_constant_propagation_substitutes_tracked_variable() {
        let ir = gen_source("int main() { int x = 5; int y = x + 1; return 0; }");
        let opt = optimize(&ir);
        let add = opt.iter().find(|i| i.op == Op::Add).unwrap();
        assert_eq!(add.arg1.as_deref(), Some("5"));
        assert_eq!(add.arg2.as_deref(), Some("1"));
    }

    #[test]
    fn test_constant_propagation_is_single_pass_not_fixed_point() {
        // a chain x -> y -> z is propagated in one forward scan, so each
        // instruction only ever sees the substitutions available *before* it.
        let ir = vec![
            Instruction::assign("x", "1"),
            Instruction::assign("y", "x"),
            Instruction::binary(Op::Add, "t0", "y", "1"),
        ];
        let opt = optimize(&ir);
        let add = opt.iter().find(|i| i.op == Op::Add).unwrap();
        assert_eq!(add.arg1.as_deref(), Some("1"));
    }

    #[test]
    fn test_dead_code_elimination_removes_unused_assign() {
        let ir = vec![Instruction::assign("x", "1"), Instruction::with_arg1(Op::Ret, "0")];
        let opt = optimize(&ir);
        assert!(opt.iter().all(|i| i.result.as_deref() != Some("x")));
    }

    #[test]
    fn test_dead_code_elimination_keeps_used_assign() {
        let ir = vec![Instruction::assign("x", "1"), Instruction::with_arg1(Op::Ret, "x")];
        let opt = optimize(&ir);
        assert!(opt.iter().any(|i| i.result.as_deref() == Some("x")));
    }

    #[test]
    fn test_optimizer_never_reorders_surviving_instructions() {
        let ir = gen_source("int main() { int x = 1; int y = 2; return x + y; }");
        let opt = optimize(&ir);
        let render_before = render(&ir);
        let render_after = render(&opt);
        let mut idx = 0;
        for line in &render_after {
            while idx < render_before.len() && &render_before[idx] != line {
                idx += 1;
            }
            assert!(idx < render_before.len(), "instruction order was not preserved: {line}");
            idx += 1;
        }
    }

    #[test]
    fn test_label_operands_are_never_treated_as_dead_assign_targets() {
        let ir = gen_source("int main() { if (1 < 2) { } return 0; }");
        let opt = optimize(&ir);
        assert!(opt.iter().any(|i| i.op == Op::Label));
    }
}
