//! mcc-sem - Semantic analysis for the mini-C compiler pipeline.
//!
//! Walks the AST once, building a [`SymbolTable`] and reporting semantic
//! diagnostics (undefined names, redeclarations, type errors) through a
//! [`mcc_util::Handler`]. The walk never aborts: on an unresolved or
//! ill-typed expression it reports a diagnostic and substitutes
//! [`Type::Unknown`] so later checks in the same function aren't drowned in
//! cascading errors.

pub mod hir;
pub mod scope;
pub mod types;

mod edge_cases;

use mcc_par::ast::{Ast, Node};
use mcc_util::{Handler, Span};

pub use hir::{Param, Symbol, SymbolKind};
pub use scope::{Scope, ScopeId, SymbolTable};
pub use types::Type;

struct Analyzer<'a> {
    table: SymbolTable,
    handler: &'a Handler,
}

/// Walks `ast`, returning the populated [`SymbolTable`]. Diagnostics are
/// reported through `handler`; analysis proceeds best-effort past errors.
pub fn analyze(ast: &Ast, handler: &Handler) -> SymbolTable {
    let mut analyzer = Analyzer { table: SymbolTable::new(), handler };
    analyzer.walk_program(ast);
    analyzer.check_has_main();
    analyzer.table
}

impl<'a> Analyzer<'a> {
    fn error(&self, message: impl Into<String>, line: u32, column: u32) {
        self.handler.error(message, Span::point(line, column));
    }

    fn walk_program(&mut self, ast: &Ast) {
        for decl in ast {
            self.walk_top_level(decl);
        }
    }

    fn walk_top_level(&mut self, node: &Node) {
        match node {
            Node::FunctionDeclaration { ty, name, params, body, line, column } => {
                self.declare_function(ty, name, params, *line, *column);
                self.walk_function_body(name, params, body);
            }
            Node::VarDeclaration { .. } => {
                self.declare_variable(node);
            }
            _ => {}
        }
    }

    fn node_type_name(node: &Node) -> &str {
        match node {
            Node::Type { name, .. } => name.as_str(),
            _ => "",
        }
    }

    fn node_identifier(node: &Node) -> (&str, u32, u32) {
        match node {
            Node::Identifier { name, line, column } => (name.as_str(), *line, *column),
            _ => ("", 0, 0),
        }
    }

    fn declare_function(&mut self, ty: &Node, name: &Node, params: &Node, line: u32, column: u32) {
        let return_type = Type::from_name(Self::node_type_name(ty)).unwrap_or(Type::Unknown);
        let (fn_name, _, _) = Self::node_identifier(name);

        let param_list = match params {
            Node::Parameters(ps) => ps
                .iter()
                .map(|p| match p {
                    Node::Parameter { ty, name } => {
                        let pty = Type::from_name(Self::node_type_name(ty)).unwrap_or(Type::Unknown);
                        let (pname, _, _) = Self::node_identifier(name);
                        Param { name: pname.to_string(), ty: pty }
                    }
                    _ => Param { name: String::new(), ty: Type::Unknown },
                })
                .collect(),
            _ => Vec::new(),
        };

        let symbol = Symbol::function(fn_name, param_list, return_type, line, column);
        if let Some(prior) = self.table.declare(symbol) {
            self.error(
                format!("redeclaration of '{fn_name}': previously declared at line {}, column {}", prior.line, prior.column),
                line,
                column,
            );
        }
    }

    fn walk_function_body(&mut self, name: &Node, params: &Node, body: &Node) {
        let (fn_name, _, _) = Self::node_identifier(name);
        self.table.enter_function_scope(fn_name);

        if let Node::Parameters(ps) = params {
            for p in ps {
                if let Node::Parameter { ty, name } = p {
                    let pty = Type::from_name(Self::node_type_name(ty)).unwrap_or(Type::Unknown);
                    let (pname, pline, pcol) = Self::node_identifier(name);
                    let symbol = Symbol::parameter(pname, pty, pline, pcol);
                    if let Some(prior) = self.table.declare(symbol) {
                        self.error(
                            format!("redeclaration of '{pname}': previously declared at line {}, column {}", prior.line, prior.column),
                            pline,
                            pcol,
                        );
                    }
                }
            }
        }

        self.walk_statement(body);
        self.table.exit_scope();
    }

    fn declare_variable(&mut self, node: &Node) {
        if let Node::VarDeclaration { ty, name, init, line, column } = node {
            let var_type = Type::from_name(Self::node_type_name(ty)).unwrap_or(Type::Unknown);
            let (var_name, _, _) = Self::node_identifier(name);

            let mut symbol = Symbol::variable(var_name, var_type, *line, *column);
            if let Some(init) = init {
                let init_ty = self.walk_expr(init);
                if !init_ty.widens_to(var_type) {
                    self.error(format!("Cannot initialize variable of type '{var_type}' with value of type '{init_ty}'"), *line, *column);
                }
                symbol.initialized = true;
            }

            if let Some(prior) = self.table.declare(symbol) {
                self.error(
                    format!("redeclaration of '{var_name}': previously declared at line {}, column {}", prior.line, prior.column),
                    *line,
                    *column,
                );
            }
        }
    }

    /// Dispatches a statement-position node. `Block` nodes open their own
    /// child scope; everything else is handled in the current scope.
    fn walk_statement(&mut self, node: &Node) {
        match node {
            Node::Block(stmts) => {
                self.table.enter_block_scope();
                for stmt in stmts {
                    self.walk_statement(stmt);
                }
                self.table.exit_scope();
            }
            Node::VarDeclaration { .. } => self.declare_variable(node),
            Node::IfStatement { cond, then_branch, else_branch, line, column } => {
                self.check_condition(cond, *line, *column);
                self.walk_statement(then_branch);
                if let Some(else_branch) = else_branch {
                    self.walk_statement(else_branch);
                }
            }
            Node::WhileStatement { cond, body, line, column } => {
                self.check_condition(cond, *line, *column);
                self.walk_statement(body);
            }
            Node::ForStatement { init, cond, step, body, .. } => {
                self.table.enter_block_scope();
                self.walk_statement(init);
                if !matches!(cond.as_ref(), Node::Empty) {
                    let (_, line, column) = Self::expr_pos(cond);
                    self.check_condition(cond, line, column);
                }
                if !matches!(step.as_ref(), Node::Empty) {
                    self.walk_expr(step);
                }
                self.walk_statement(body);
                self.table.exit_scope();
            }
            Node::ReturnStatement { value, line, column } => self.check_return(value.as_deref(), *line, *column),
            Node::PrintStatement { value, .. } => {
                self.walk_expr(value);
            }
            Node::ExpressionStatement(expr) => {
                self.walk_expr(expr);
            }
            Node::Empty => {}
            _ => {}
        }
    }

    fn expr_pos(node: &Node) -> (&'static str, u32, u32) {
        match node {
            Node::Binary { line, column, .. }
            | Node::Unary { line, column, .. }
            | Node::Assignment { line, column, .. }
            | Node::FunctionCall { line, column, .. }
            | Node::Identifier { line, column, .. }
            | Node::NumberLiteral { line, column, .. }
            | Node::StringLiteral { line, column, .. }
            | Node::BoolLiteral { line, column, .. } => ("", *line, *column),
            _ => ("", 0, 0),
        }
    }

    fn check_condition(&mut self, cond: &Node, line: u32, column: u32) {
        let ty = self.walk_expr(cond);
        if ty != Type::Bool && ty != Type::Unknown {
            self.error(format!("condition must be of type 'bool', found '{ty}'"), line, column);
        }
    }

    fn check_return(&mut self, value: Option<&Node>, line: u32, column: u32) {
        let expected = self.table.enclosing_function_return_type().unwrap_or(Type::Unknown);
        match value {
            Some(expr) => {
                let actual = self.walk_expr(expr);
                if expected == Type::Void {
                    self.error("void function must not return a value", line, column);
                } else if !actual.widens_to(expected) && expected != Type::Unknown {
                    self.error(format!("expected return type '{expected}', found '{actual}'"), line, column);
                }
            }
            None => {
                if expected != Type::Void && expected != Type::Unknown {
                    self.error(format!("non-void function must return a value of type '{expected}'"), line, column);
                }
            }
        }
    }

    /// Type-checks an expression node, returning its resulting type.
    fn walk_expr(&mut self, node: &Node) -> Type {
        match node {
            Node::Assignment { target, value, line, column } => self.check_assignment(target, value, *line, *column),
            Node::Binary { op, left, right, line, column } => self.check_binary(op, left, right, *line, *column),
            Node::Unary { op, operand, line, column } => self.check_unary(op, operand, *line, *column),
            Node::FunctionCall { callee, args, line, column } => self.check_call(callee, args, *line, *column),
            Node::Identifier { name, line, column } => self.resolve_identifier(name, *line, *column),
            Node::NumberLiteral { value, .. } => {
                if value.contains('.') {
                    Type::Float
                } else {
                    Type::Int
                }
            }
            Node::StringLiteral { .. } => Type::String,
            Node::BoolLiteral { .. } => Type::Bool,
            Node::Grouping(inner) => self.walk_expr(inner),
            _ => Type::Unknown,
        }
    }

    fn resolve_identifier(&mut self, name: &str, line: u32, column: u32) -> Type {
        match self.table.resolve(name) {
            Some(sym) => sym.ty,
            None => {
                self.error(format!("Undefined symbol '{name}'"), line, column);
                Type::Unknown
            }
        }
    }

    fn check_assignment(&mut self, target: &Node, value: &Node, line: u32, column: u32) -> Type {
        let rhs_ty = self.walk_expr(value);
        let Node::Identifier { name, .. } = target else {
            self.error("left side of assignment must be a variable", line, column);
            return Type::Unknown;
        };

        let lhs_ty = match self.table.resolve(name) {
            Some(sym) if sym.kind == SymbolKind::Function => {
                self.error(format!("cannot assign to function '{name}'"), line, column);
                return Type::Unknown;
            }
            Some(sym) => sym.ty,
            None => {
                self.error(format!("Undefined symbol '{name}'"), line, column);
                return Type::Unknown;
            }
        };

        if !rhs_ty.widens_to(lhs_ty) {
            self.error(format!("cannot assign '{rhs_ty}' to '{lhs_ty}'"), line, column);
        }

        self.mark_initialized(name);
        lhs_ty
    }

    /// Marks `name`'s symbol initialized in the nearest scope that declares it.
    fn mark_initialized(&mut self, name: &str) {
        let mut scope_id = Some(self.table.current_scope.clone());
        while let Some(id) = scope_id {
            let Some(scope) = self.table.scopes.get_mut(&id) else { break };
            if let Some(sym) = scope.symbols.get_mut(name) {
                sym.initialized = true;
                return;
            }
            scope_id = scope.parent.clone();
        }
    }

    fn check_binary(&mut self, op: &str, left: &Node, right: &Node, line: u32, column: u32) -> Type {
        let lhs = self.walk_expr(left);
        let rhs = self.walk_expr(right);
        match op {
            "+" | "-" | "*" | "/" | "%" => match Type::arithmetic_result(lhs, rhs) {
                Some(ty) => ty,
                None => {
                    self.error("invalid operand types", line, column);
                    Type::Unknown
                }
            },
            "==" | "!=" | "<" | ">" | "<=" | ">=" => Type::Bool,
            "&&" | "||" => Type::Bool,
            _ => Type::Unknown,
        }
    }

    fn check_unary(&mut self, op: &str, operand: &Node, line: u32, column: u32) -> Type {
        let ty = self.walk_expr(operand);
        match op {
            "-" => {
                if ty.is_numeric() || ty == Type::Unknown {
                    ty
                } else {
                    self.error("invalid operand types", line, column);
                    Type::Unknown
                }
            }
            "!" => Type::Bool,
            _ => Type::Unknown,
        }
    }

    fn check_call(&mut self, callee: &Node, args: &[Node], line: u32, column: u32) -> Type {
        let Node::Identifier { name, .. } = callee else {
            self.error("callee must be an identifier", line, column);
            for arg in args {
                self.walk_expr(arg);
            }
            return Type::Unknown;
        };

        let resolved = self.table.resolve(name).cloned();
        let Some(sym) = resolved else {
            self.error(format!("Undefined symbol '{name}'"), line, column);
            for arg in args {
                self.walk_expr(arg);
            }
            return Type::Unknown;
        };

        if sym.kind != SymbolKind::Function {
            self.error(format!("'{name}' is not a function"), line, column);
            for arg in args {
                self.walk_expr(arg);
            }
            return Type::Unknown;
        }

        let params = sym.params.clone().unwrap_or_default();
        if params.len() != args.len() {
            self.error(format!("'{name}' expects {} argument(s), got {}", params.len(), args.len()), line, column);
        }

        for (i, arg) in args.iter().enumerate() {
            let arg_ty = self.walk_expr(arg);
            if let Some(param) = params.get(i) {
                if !arg_ty.widens_to(param.ty) {
                    self.error(format!("argument {} to '{name}': expected '{}', found '{arg_ty}'", i + 1, param.ty), line, column);
                }
            }
        }

        sym.return_type.unwrap_or(Type::Unknown)
    }

    fn check_has_main(&mut self) {
        let has_main = self
            .table
            .scopes
            .get("global")
            .map(|s| matches!(s.symbols.get("main"), Some(sym) if sym.kind == SymbolKind::Function))
            .unwrap_or(false);
        if !has_main {
            self.error("Program must have a main function", 0, 0);
        }
    }
}
