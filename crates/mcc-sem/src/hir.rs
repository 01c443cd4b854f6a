//! Symbol table entries produced by the analyzer.

use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Parameter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub kind: SymbolKind,
    pub line: u32,
    pub column: u32,
    pub initialized: bool,
    pub params: Option<Vec<Param>>,
    pub return_type: Option<Type>,
}

impl Symbol {
    pub fn variable(name: impl Into<String>, ty: Type, line: u32, column: u32) -> Self {
        Self { name: name.into(), ty, kind: SymbolKind::Variable, line, column, initialized: false, params: None, return_type: None }
    }

    pub fn parameter(name: impl Into<String>, ty: Type, line: u32, column: u32) -> Self {
        Self { name: name.into(), ty, kind: SymbolKind::Parameter, line, column, initialized: true, params: None, return_type: None }
    }

    pub fn function(name: impl Into<String>, params: Vec<Param>, return_type: Type, line: u32, column: u32) -> Self {
        Self {
            name: name.into(),
            ty: return_type,
            kind: SymbolKind::Function,
            line,
            column,
            initialized: true,
            params: Some(params),
            return_type: Some(return_type),
        }
    }
}
