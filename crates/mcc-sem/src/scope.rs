//! Scope tree and symbol table.
//!
//! Scopes form a forest rooted at `global`, each identified by a stable
//! string id (`global`, `function_<name>`, or `block_<unique>`). This
//! mirrors the arena-of-ribs shape used elsewhere in this pipeline, but
//! keys scopes by their string ids rather than an opaque index, since
//! downstream consumers address scopes by name.

use std::collections::HashMap;

use crate::hir::Symbol;

pub type ScopeId = String;

#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub symbols: HashMap<String, Symbol>,
}

impl Scope {
    fn new(parent: Option<ScopeId>) -> Self {
        Self { parent, symbols: HashMap::new() }
    }
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    pub scopes: HashMap<ScopeId, Scope>,
    pub current_scope: ScopeId,
    next_block_id: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut scopes = HashMap::new();
        scopes.insert("global".to_string(), Scope::new(None));
        Self { scopes, current_scope: "global".to_string(), next_block_id: 0 }
    }

    /// Enters the function scope `function_<name>`, a child of `global`.
    pub fn enter_function_scope(&mut self, name: &str) -> ScopeId {
        let id = format!("function_{name}");
        self.scopes.insert(id.clone(), Scope::new(Some("global".to_string())));
        self.current_scope = id.clone();
        id
    }

    /// Enters a uniquely-named `block_<N>` scope, a child of the current one.
    pub fn enter_block_scope(&mut self) -> ScopeId {
        let id = format!("block_{}", self.next_block_id);
        self.next_block_id += 1;
        self.scopes.insert(id.clone(), Scope::new(Some(self.current_scope.clone())));
        self.current_scope = id.clone();
        id
    }

    /// Exits the current scope, restoring its parent. A no-op at `global`.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes.get(&self.current_scope).and_then(|s| s.parent.clone()) {
            self.current_scope = parent;
        }
    }

    /// Declares `symbol` in the current scope. Returns the prior symbol if
    /// this is a redeclaration within the same scope.
    pub fn declare(&mut self, symbol: Symbol) -> Option<Symbol> {
        let scope = self.scopes.get_mut(&self.current_scope).expect("current scope must exist");
        scope.symbols.insert(symbol.name.clone(), symbol)
    }

    /// Resolves `name` by walking from the current scope up to `global`.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        let mut scope_id = Some(self.current_scope.clone());
        while let Some(id) = scope_id {
            let scope = self.scopes.get(&id)?;
            if let Some(sym) = scope.symbols.get(name) {
                return Some(sym);
            }
            scope_id = scope.parent.clone();
        }
        None
    }

    /// Walks the scope chain upward from the current scope to find the
    /// enclosing function's declared return type.
    pub fn enclosing_function_return_type(&self) -> Option<crate::types::Type> {
        let mut scope_id = Some(self.current_scope.clone());
        while let Some(id) = scope_id {
            if let Some(name) = id.strip_prefix("function_") {
                return self.scopes.get("global")?.symbols.get(name).and_then(|s| s.return_type);
            }
            scope_id = self.scopes.get(&id)?.parent.clone();
        }
        None
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
