//! Edge case tests for mcc-par.

#[cfg(test)]
mod tests {
    use crate::ast::{program_to_generic, Node};
    use crate::{Ast, Parser};
    use mcc_lex::Lexer;
    use mcc_util::Handler;

    fn parse_source(source: &str) -> (Ast, Handler) {
        let handler = Handler::new();
        let tokens = Lexer::tokenize(source, &handler);
        let ast = Parser::parse(tokens, &handler);
        (ast, handler)
    }

    #[test]
    fn test_edge_empty_program() {
        let (ast, handler) = parse_source("");
        assert!(ast.is_empty());
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_function_with_no_params() {
        let (ast, handler) = parse_source("int main() { return 0; }");
        assert!(!handler.has_errors());
        assert_eq!(ast.len(), 1);
        match &ast[0] {
            Node::FunctionDeclaration { params, .. } => match params.as_ref() {
                Node::Parameters(p) => assert!(p.is_empty()),
                other => panic!("expected Parameters, got {other:?}"),
            },
            other => panic!("expected FunctionDeclaration, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_function_with_multiple_params() {
        let (ast, handler) = parse_source("int add(int a, int b) { return a + b; }");
        assert!(!handler.has_errors());
        match &ast[0] {
            Node::FunctionDeclaration { params, .. } => match params.as_ref() {
                Node::Parameters(p) => assert_eq!(p.len(), 2),
                other => panic!("expected Parameters, got {other:?}"),
            },
            other => panic!("expected FunctionDeclaration, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_global_var_decl() {
        let (ast, handler) = parse_source("int x = 5;");
        assert!(!handler.has_errors());
        assert!(matches!(ast[0], Node::VarDeclaration { .. }));
    }

    #[test]
    fn test_edge_deeply_nested_blocks() {
        let source = "int main() { { { { { return 0; } } } } }";
        let (ast, handler) = parse_source(source);
        assert!(!handler.has_errors());
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn test_edge_deeply_nested_expression() {
        let source = "int main() { return ((((1 + 2)))); }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_missing_semicolon_recovers() {
        let source = "int x = 1 int y = 2;";
        let (ast, handler) = parse_source(source);
        assert!(handler.has_errors());
        // parsing continues past the damaged declaration
        assert!(ast.iter().any(|d| matches!(d, Node::VarDeclaration { .. })));
    }

    #[test]
    fn test_edge_missing_closing_brace_does_not_hang() {
        let source = "int main() { return 0;";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_edge_unexpected_token_in_expression_recovers() {
        let source = "int main() { int x = ; int y = 1; }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_edge_dangling_else_binds_to_nearest_if() {
        let source = "int main() { if (1) if (0) return 1; else return 2; }";
        let (ast, handler) = parse_source(source);
        assert!(!handler.has_errors());
        let generic = program_to_generic(&ast);
        let func_body = &generic.children.as_ref().unwrap()[0].children.as_ref().unwrap()[3];
        let outer_if = &func_body.children.as_ref().unwrap()[0];
        let inner_if = &outer_if.children.as_ref().unwrap()[1];
        assert_eq!(inner_if.kind, "IfStatement");
        assert_eq!(inner_if.children.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_edge_multiple_functions() {
        let source = "int a() { return 1; } int b() { return 2; }";
        let (ast, handler) = parse_source(source);
        assert!(!handler.has_errors());
        assert_eq!(ast.len(), 2);
    }

    #[test]
    fn test_edge_generic_program_root_kind() {
        let (ast, _) = parse_source("int main() { return 0; }");
        let generic = program_to_generic(&ast);
        assert_eq!(generic.kind, "Program");
        assert_eq!(generic.children.unwrap().len(), 1);
    }
}
