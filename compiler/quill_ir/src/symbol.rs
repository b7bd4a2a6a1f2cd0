//! Scoped symbol table.
//!
//! Symbols live in one flat array and are addressed by [`SymbolId`]. Scopes
//! only map names to ids, so popping a scope hides its names while every id
//! handed out stays valid for the rest of the compilation. Scope 0 is the
//! global scope and holds nothing but functions.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{IrError, SourcePos, Type};

/// Dense symbol handle, also the WAT variable suffix (`$var<id>`).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        SymbolId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A declared variable, parameter or function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    /// Where the name was declared.
    pub pos: SourcePos,
    pub ty: Type,
}

type Scope = FxHashMap<String, SymbolId>;

#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    /// Variables declared since the last `clear_function_vars`.
    function_vars: Vec<SymbolId>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: Vec::new(),
            scopes: vec![Scope::default()],
            function_vars: Vec::new(),
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Leave the innermost scope. The global scope can never be popped.
    pub fn pop_scope(&mut self) -> Result<(), IrError> {
        if self.scopes.len() <= 1 {
            return Err(IrError::PopGlobalScope);
        }
        self.scopes.pop();
        Ok(())
    }

    /// Total number of symbols ever declared.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Declare a variable in the innermost scope.
    ///
    /// Shadowing a name from an outer scope is fine; repeating a name within
    /// the same scope is a redeclaration.
    pub fn declare(&mut self, name: &str, ty: Type, pos: SourcePos) -> Result<SymbolId, IrError> {
        let scope = self.scopes.len() - 1;
        let id = self.insert(scope, "variable", name, ty, pos)?;
        self.function_vars.push(id);
        Ok(id)
    }

    /// Declare a function. Functions always go into the global scope.
    pub fn declare_function(
        &mut self,
        name: &str,
        params: Vec<Type>,
        ret: Type,
        pos: SourcePos,
    ) -> Result<SymbolId, IrError> {
        self.insert(0, "function", name, Type::function(params, ret), pos)
    }

    fn insert(
        &mut self,
        scope: usize,
        what: &'static str,
        name: &str,
        ty: Type,
        pos: SourcePos,
    ) -> Result<SymbolId, IrError> {
        if let Some(&existing) = self.scopes[scope].get(name) {
            return Err(IrError::Redeclaration {
                what,
                name: name.to_owned(),
                pos,
                original_line: self.get(existing).pos.line,
            });
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "symbol count is bounded by source size"
        )]
        let id = SymbolId::new(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            name: name.to_owned(),
            pos,
            ty,
        });
        self.scopes[scope].insert(name.to_owned(), id);
        Ok(id)
    }

    /// Find the innermost declaration of `name`.
    pub fn resolve(&self, name: &str, pos: SourcePos) -> Result<SymbolId, IrError> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
            .ok_or_else(|| IrError::UnknownIdentifier {
                name: name.to_owned(),
                pos,
            })
    }

    /// Ids only come from `declare*`/`resolve`, so lookups cannot miss.
    #[inline]
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    #[inline]
    pub fn type_of(&self, id: SymbolId) -> &Type {
        &self.get(id).ty
    }

    #[inline]
    pub fn name_of(&self, id: SymbolId) -> &str {
        &self.get(id).name
    }

    /// Start collecting a fresh function's locals.
    pub fn clear_function_vars(&mut self) {
        self.function_vars.clear();
    }

    /// Every variable declared since the last clear, in declaration order.
    pub fn function_vars(&self) -> &[SymbolId] {
        &self.function_vars
    }
}
