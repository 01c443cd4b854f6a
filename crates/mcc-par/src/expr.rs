//! Expression parsing, one function per precedence level, lowest to
//! highest: assignment, logicalOr, logicalAnd, equality, comparison, term,
//! factor, unary, call, primary.

use crate::ast::Node;
use crate::Parser;
use mcc_lex::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expression(&mut self) -> Option<Node> {
        self.parse_assignment()
    }

    /// `assignment := logicalOr ('=' assignment)?` -- right-associative.
    fn parse_assignment(&mut self) -> Option<Node> {
        let (line, column) = self.pos();
        let target = self.parse_logical_or()?;
        if self.eat(TokenKind::Operator, "=") {
            let value = self.parse_assignment()?;
            return Some(Node::Assignment { target: Box::new(target), value: Box::new(value), line, column });
        }
        Some(target)
    }

    fn parse_logical_or(&mut self) -> Option<Node> {
        self.parse_left_assoc_binary(Self::parse_logical_and, &[("||", TokenKind::Operator)])
    }

    fn parse_logical_and(&mut self) -> Option<Node> {
        self.parse_left_assoc_binary(Self::parse_equality, &[("&&", TokenKind::Operator)])
    }

    fn parse_equality(&mut self) -> Option<Node> {
        self.parse_left_assoc_binary(Self::parse_comparison, &[("==", TokenKind::Operator), ("!=", TokenKind::Operator)])
    }

    fn parse_comparison(&mut self) -> Option<Node> {
        self.parse_left_assoc_binary(
            Self::parse_term,
            &[("<", TokenKind::Operator), (">", TokenKind::Operator), ("<=", TokenKind::Operator), (">=", TokenKind::Operator)],
        )
    }

    fn parse_term(&mut self) -> Option<Node> {
        self.parse_left_assoc_binary(Self::parse_factor, &[("+", TokenKind::Operator), ("-", TokenKind::Operator)])
    }

    fn parse_factor(&mut self) -> Option<Node> {
        self.parse_left_assoc_binary(
            Self::parse_unary,
            &[("*", TokenKind::Operator), ("/", TokenKind::Operator), ("%", TokenKind::Operator)],
        )
    }

    /// Shared left-associative binary-operator loop: `next (op next)*`.
    fn parse_left_assoc_binary(
        &mut self,
        mut next: impl FnMut(&mut Self) -> Option<Node>,
        ops: &[(&str, TokenKind)],
    ) -> Option<Node> {
        let (line, column) = self.pos();
        let mut left = next(self)?;
        loop {
            let matched = ops.iter().find(|(lexeme, kind)| self.check(*kind, lexeme));
            let Some((lexeme, _kind)) = matched else { break };
            let lexeme = lexeme.to_string();
            self.advance();
            let right = next(self)?;
            left = Node::Binary { op: lexeme.to_string(), left: Box::new(left), right: Box::new(right), line, column };
        }
        Some(left)
    }

    /// `unary := ('!' | '-') unary | call`
    fn parse_unary(&mut self) -> Option<Node> {
        let (line, column) = self.pos();
        if self.check(TokenKind::Operator, "!") || self.check(TokenKind::Operator, "-") {
            let op = self.advance().unwrap().lexeme;
            let operand = self.parse_unary()?;
            return Some(Node::Unary { op, operand: Box::new(operand), line, column });
        }
        self.parse_call()
    }

    /// `call := primary ('(' args? ')')*`
    fn parse_call(&mut self) -> Option<Node> {
        let (line, column) = self.pos();
        let mut expr = self.parse_primary()?;
        while self.check(TokenKind::Punctuation, "(") {
            self.advance();
            let mut args = Vec::new();
            if !self.check(TokenKind::Punctuation, ")") {
                args.push(self.parse_expression()?);
                while self.eat(TokenKind::Punctuation, ",") {
                    args.push(self.parse_expression()?);
                }
            }
            self.expect(TokenKind::Punctuation, ")", "')'")?;
            expr = Node::FunctionCall { callee: Box::new(expr), args, line, column };
        }
        Some(expr)
    }

    /// `primary := NUMBER | STRING | 'true' | 'false' | IDENT | '(' expression ')'`
    fn parse_primary(&mut self) -> Option<Node> {
        let tok = match self.current() {
            Some(tok) => tok.clone(),
            None => {
                self.error("unexpected end of input, expected an expression");
                return None;
            }
        };

        match tok.kind {
            TokenKind::Number => {
                self.advance();
                Some(Node::NumberLiteral { value: tok.lexeme, line: tok.line, column: tok.column })
            }
            TokenKind::String => {
                self.advance();
                Some(Node::StringLiteral { value: tok.lexeme, line: tok.line, column: tok.column })
            }
            TokenKind::Keyword if tok.lexeme == "true" || tok.lexeme == "false" => {
                self.advance();
                Some(Node::BoolLiteral { value: tok.lexeme, line: tok.line, column: tok.column })
            }
            TokenKind::Identifier => {
                self.advance();
                Some(Node::Identifier { name: tok.lexeme, line: tok.line, column: tok.column })
            }
            TokenKind::Punctuation if tok.lexeme == "(" => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::Punctuation, ")", "')'")?;
                Some(Node::Grouping(Box::new(inner)))
            }
            _ => {
                self.error(format!("unexpected token '{}', expected an expression", tok.lexeme));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Node;
    use crate::Parser;
    use mcc_lex::Lexer;
    use mcc_util::Handler;

    fn parse_expr(source: &str) -> Node {
        let handler = Handler::new();
        let tokens = Lexer::tokenize(source, &handler);
        let mut parser = Parser::new(tokens, &handler);
        let node = parser.parse_expression().expect("expression should parse");
        assert!(!handler.has_errors(), "unexpected diagnostics for {source:?}");
        node
    }

    #[test]
    fn test_precedence_mul_over_add() {
        // 1 + 2 * 3 should parse as 1 + (2 * 3)
        let node = parse_expr("1 + 2 * 3");
        match node {
            Node::Binary { op, right, .. } => {
                assert_eq!(op, "+");
                assert!(matches!(*right, Node::Binary { ref op, .. } if op == "*"));
            }
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn test_left_associative_subtraction() {
        // 5 - 3 - 1 should parse as (5 - 3) - 1
        let node = parse_expr("5 - 3 - 1");
        match node {
            Node::Binary { op, left, .. } => {
                assert_eq!(op, "-");
                assert!(matches!(*left, Node::Binary { ref op, .. } if op == "-"));
            }
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn test_assignment_is_right_associative() {
        // a = b = 1 should parse as a = (b = 1)
        let node = parse_expr("a = b = 1");
        match node {
            Node::Assignment { value, .. } => assert!(matches!(*value, Node::Assignment { .. })),
            other => panic!("expected Assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_logical_and_binds_tighter_than_or() {
        let node = parse_expr("a || b && c");
        match node {
            Node::Binary { op, right, .. } => {
                assert_eq!(op, "||");
                assert!(matches!(*right, Node::Binary { ref op, .. } if op == "&&"));
            }
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn test_unary_negation() {
        let node = parse_expr("-x");
        assert!(matches!(node, Node::Unary { ref op, .. } if op == "-"));
    }

    #[test]
    fn test_function_call_with_args() {
        let node = parse_expr("foo(1, 2, 3)");
        match node {
            Node::FunctionCall { args, .. } => assert_eq!(args.len(), 3),
            other => panic!("expected FunctionCall, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_call() {
        let node = parse_expr("f(g(x))");
        match node {
            Node::FunctionCall { args, .. } => {
                assert_eq!(args.len(), 1);
                assert!(matches!(args[0], Node::FunctionCall { .. }));
            }
            other => panic!("expected FunctionCall, got {other:?}"),
        }
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        // (1 + 2) * 3 should parse with a Grouping on the left of '*'
        let node = parse_expr("(1 + 2) * 3");
        match node {
            Node::Binary { op, left, .. } => {
                assert_eq!(op, "*");
                assert!(matches!(*left, Node::Grouping(_)));
            }
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn test_comparison_chain_is_left_associative() {
        let node = parse_expr("a < b < c");
        match node {
            Node::Binary { op, left, .. } => {
                assert_eq!(op, "<");
                assert!(matches!(*left, Node::Binary { .. }));
            }
            other => panic!("expected Binary, got {other:?}"),
        }
    }
}
