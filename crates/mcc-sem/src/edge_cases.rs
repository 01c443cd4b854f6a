//! Edge case tests for mcc-sem.

#[cfg(test)]
mod tests {
    use crate::{analyze, SymbolKind, Type};
    use mcc_lex::Lexer;
    use mcc_par::Parser;
    use mcc_util::Handler;

    fn analyze_source(source: &str) -> (crate::SymbolTable, Handler) {
        let handler = Handler::new();
        let tokens = Lexer::tokenize(source, &handler);
        let ast = Parser::parse(tokens, &handler);
        let table = analyze(&ast, &handler);
        (table, handler)
    }

    #[test]
    fn test_accepts_well_formed_program() {
        let (_, handler) = analyze_source("int main() { return 0; }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_missing_main_is_an_error() {
        let (_, handler) = analyze_source("int helper() { return 0; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_undefined_symbol() {
        let (_, handler) = analyze_source("int main() { return x; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_redeclaration_in_same_scope() {
        let (_, handler) = analyze_source("int main() { int x = 1; int x = 2; return 0; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_shadowing_in_nested_block_is_allowed() {
        let (_, handler) = analyze_source("int main() { int x = 1; { int x = 2; } return 0; }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_arithmetic_type_mismatch() {
        let (_, handler) = analyze_source(r#"int main() { int x = 1 + "s"; return 0; }"#);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_int_widens_to_float() {
        let (_, handler) = analyze_source("float main() { float x = 1; return x; }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_float_does_not_narrow_to_int() {
        let (_, handler) = analyze_source("int main() { int x = 1.5; return x; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_if_condition_must_be_bool() {
        let (_, handler) = analyze_source("int main() { if (1 + 1) { return 0; } return 1; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_if_condition_bool_is_fine() {
        let (_, handler) = analyze_source("int main() { if (1 < 2) { return 0; } return 1; }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_non_void_function_must_return_value() {
        let (_, handler) = analyze_source("int main() { return; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_void_function_must_not_return_value() {
        let (_, handler) = analyze_source("void f() { return 1; } int main() { return 0; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_function_call_argument_count_mismatch() {
        let (_, handler) = analyze_source("int add(int a, int b) { return a + b; } int main() { return add(1); }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_function_call_correct_usage() {
        let (_, handler) = analyze_source("int add(int a, int b) { return a + b; } int main() { return add(1, 2); }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_recursive_call_resolves() {
        let (_, handler) = analyze_source(
            "int fact(int n) { if (n <= 1) { return 1; } return n * fact(n - 1); } int main() { return fact(5); }",
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_for_loop_variable_scoped_to_loop() {
        let (table, handler) = analyze_source("int main() { for (int i = 0; i < 10; i = i + 1) { } return 0; }");
        assert!(!handler.has_errors());
        assert_eq!(table.current_scope, "global");
    }

    #[test]
    fn test_current_scope_restored_to_global_after_analysis() {
        let (table, _) = analyze_source("int main() { { { int x = 1; } } return 0; }");
        assert_eq!(table.current_scope, "global");
    }

    #[test]
    fn test_main_symbol_is_recorded_as_function() {
        let (table, _) = analyze_source("int main() { return 0; }");
        let main_sym = table.scopes.get("global").unwrap().symbols.get("main").unwrap();
        assert_eq!(main_sym.kind, SymbolKind::Function);
        assert_eq!(main_sym.ty, Type::Int);
    }

    #[test]
    fn test_assignment_to_undeclared_variable() {
        let (_, handler) = analyze_source("int main() { x = 1; return 0; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_assignment_to_function_is_an_error() {
        let (_, handler) = analyze_source("int main() { main = 1; return 0; }");
        assert!(handler.has_errors());
    }
}
