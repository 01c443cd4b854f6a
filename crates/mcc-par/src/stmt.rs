//! Statement parsing: block, if, while, for, return, print, var decl, expr.

use crate::ast::Node;
use crate::Parser;
use mcc_lex::TokenKind;

impl<'a> Parser<'a> {
    /// `statement := block | ifStmt | whileStmt | forStmt
    ///             | returnStmt | printStmt | varDecl | exprStmt`
    pub(crate) fn parse_statement(&mut self) -> Option<Node> {
        if self.check(TokenKind::Punctuation, "{") {
            return self.parse_block();
        }
        if self.check(TokenKind::Keyword, "if") {
            return self.parse_if_statement();
        }
        if self.check(TokenKind::Keyword, "while") {
            return self.parse_while_statement();
        }
        if self.check(TokenKind::Keyword, "for") {
            return self.parse_for_statement();
        }
        if self.check(TokenKind::Keyword, "return") {
            return self.parse_return_statement();
        }
        if self.check(TokenKind::Keyword, "print") {
            return self.parse_print_statement();
        }
        if self.is_type_keyword() {
            return self.parse_var_decl_statement();
        }
        self.parse_expr_statement()
    }

    fn is_type_keyword(&self) -> bool {
        matches!(self.current(), Some(tok) if tok.kind == TokenKind::Keyword
            && matches!(tok.lexeme.as_str(), "int" | "float" | "bool" | "void"))
    }

    pub(crate) fn parse_block(&mut self) -> Option<Node> {
        self.expect(TokenKind::Punctuation, "{", "'{'")?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::Punctuation, "}") && !self.is_at_end() {
            match self.parse_statement() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize(),
            }
        }
        self.expect(TokenKind::Punctuation, "}", "'}'")?;
        Some(Node::Block(stmts))
    }

    /// `ifStmt := 'if' '(' expression ')' statement ('else' statement)?`
    fn parse_if_statement(&mut self) -> Option<Node> {
        let (line, column) = self.pos();
        self.advance();
        self.expect(TokenKind::Punctuation, "(", "'('")?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::Punctuation, ")", "')'")?;
        let then_branch = self.parse_statement()?;
        let else_branch = if self.eat(TokenKind::Keyword, "else") {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Some(Node::IfStatement {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch,
            line,
            column,
        })
    }

    /// `whileStmt := 'while' '(' expression ')' statement`
    fn parse_while_statement(&mut self) -> Option<Node> {
        let (line, column) = self.pos();
        self.advance();
        self.expect(TokenKind::Punctuation, "(", "'('")?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::Punctuation, ")", "')'")?;
        let body = self.parse_statement()?;
        Some(Node::WhileStatement { cond: Box::new(cond), body: Box::new(body), line, column })
    }

    /// `forStmt := 'for' '(' (statement|';') (expression)? ';' (expression)? ')' statement`
    fn parse_for_statement(&mut self) -> Option<Node> {
        let (line, column) = self.pos();
        self.advance();
        self.expect(TokenKind::Punctuation, "(", "'('")?;

        let init = if self.eat(TokenKind::Punctuation, ";") {
            Node::Empty
        } else if self.is_type_keyword() {
            self.parse_var_decl_statement()?
        } else {
            self.parse_expr_statement()?
        };

        let cond = if self.check(TokenKind::Punctuation, ";") {
            Node::Empty
        } else {
            self.parse_expression()?
        };
        self.expect(TokenKind::Punctuation, ";", "';'")?;

        let step = if self.check(TokenKind::Punctuation, ")") {
            Node::Empty
        } else {
            self.parse_expression()?
        };
        self.expect(TokenKind::Punctuation, ")", "')'")?;

        let body = self.parse_statement()?;
        Some(Node::ForStatement {
            init: Box::new(init),
            cond: Box::new(cond),
            step: Box::new(step),
            body: Box::new(body),
            line,
            column,
        })
    }

    /// `returnStmt := 'return' expression? ';'`
    fn parse_return_statement(&mut self) -> Option<Node> {
        let (line, column) = self.pos();
        self.advance();
        let value = if self.check(TokenKind::Punctuation, ";") {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect(TokenKind::Punctuation, ";", "';'")?;
        Some(Node::ReturnStatement { value, line, column })
    }

    /// `printStmt := 'print' '(' expression ')' ';'`
    fn parse_print_statement(&mut self) -> Option<Node> {
        let (line, column) = self.pos();
        self.advance();
        self.expect(TokenKind::Punctuation, "(", "'('")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Punctuation, ")", "')'")?;
        self.expect(TokenKind::Punctuation, ";", "';'")?;
        Some(Node::PrintStatement { value: Box::new(value), line, column })
    }

    /// A local variable declaration: `type IDENT ('=' expression)? ';'`.
    fn parse_var_decl_statement(&mut self) -> Option<Node> {
        let (line, column) = self.pos();
        let ty = self.parse_type()?;
        let name_tok = self.expect_kind(TokenKind::Identifier, "identifier")?;
        let name = Node::Identifier { name: name_tok.lexeme, line: name_tok.line, column: name_tok.column };
        let init = if self.eat(TokenKind::Operator, "=") {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        self.expect(TokenKind::Punctuation, ";", "';'")?;
        Some(Node::VarDeclaration { ty: Box::new(ty), name: Box::new(name), init, line, column })
    }

    /// `exprStmt := expression ';'`
    fn parse_expr_statement(&mut self) -> Option<Node> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Punctuation, ";", "';'")?;
        Some(Node::ExpressionStatement(Box::new(expr)))
    }
}

#[cfg(test)]
mod tests {
    use crate::Parser;
    use mcc_lex::Lexer;
    use mcc_util::Handler;

    fn parse_one_stmt(source: &str) -> crate::ast::Node {
        let handler = Handler::new();
        let tokens = Lexer::tokenize(source, &handler);
        let mut parser = Parser::new(tokens, &handler);
        parser.parse_statement().expect("statement should parse")
    }

    #[test]
    fn test_if_without_else() {
        let node = parse_one_stmt("if (x) { return 1; }");
        match node {
            crate::ast::Node::IfStatement { else_branch, .. } => assert!(else_branch.is_none()),
            other => panic!("expected IfStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_if_with_else() {
        let node = parse_one_stmt("if (x) { return 1; } else { return 2; }");
        match node {
            crate::ast::Node::IfStatement { else_branch, .. } => assert!(else_branch.is_some()),
            other => panic!("expected IfStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_for_with_missing_clauses_uses_empty() {
        let node = parse_one_stmt("for (;;) { print(1); }");
        match node {
            crate::ast::Node::ForStatement { init, cond, step, .. } => {
                assert_eq!(*init, crate::ast::Node::Empty);
                assert_eq!(*cond, crate::ast::Node::Empty);
                assert_eq!(*step, crate::ast::Node::Empty);
            }
            other => panic!("expected ForStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_for_with_all_clauses() {
        let node = parse_one_stmt("for (int i = 0; i < 10; i = i + 1) { print(i); }");
        match node {
            crate::ast::Node::ForStatement { init, cond, step, .. } => {
                assert_ne!(*init, crate::ast::Node::Empty);
                assert_ne!(*cond, crate::ast::Node::Empty);
                assert_ne!(*step, crate::ast::Node::Empty);
            }
            other => panic!("expected ForStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_return_without_value() {
        let node = parse_one_stmt("return;");
        match node {
            crate::ast::Node::ReturnStatement { value, .. } => assert!(value.is_none()),
            other => panic!("expected ReturnStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_return_with_value() {
        let node = parse_one_stmt("return 1 + 2;");
        match node {
            crate::ast::Node::ReturnStatement { value, .. } => assert!(value.is_some()),
            other => panic!("expected ReturnStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_var_decl_without_initializer() {
        let node = parse_one_stmt("int x;");
        match node {
            crate::ast::Node::VarDeclaration { init, .. } => assert!(init.is_none()),
            other => panic!("expected VarDeclaration, got {other:?}"),
        }
    }

    #[test]
    fn test_block_nesting() {
        let node = parse_one_stmt("{ { print(1); } }");
        match node {
            crate::ast::Node::Block(stmts) => {
                assert_eq!(stmts.len(), 1);
                assert!(matches!(stmts[0], crate::ast::Node::Block(_)));
            }
            other => panic!("expected Block, got {other:?}"),
        }
    }
}
