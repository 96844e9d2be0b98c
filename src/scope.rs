//! Lexical scopes stored in an arena.
//!
//! Each [`Scope`] knows its parent by index rather than by reference. Blocks
//! only ever nest, so the arena behaves like a stack: entering a block pushes
//! a child of the current scope and leaving it truncates the arena back.

use std::collections::HashMap;

use log::debug;

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;

/// Index of a scope in the [`Scopes`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The outermost scope, holding the natives.
    pub const ROOT: ScopeId = ScopeId(0);
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub value: Value,
    pub mutable: bool,
}

#[derive(Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Binding>,
    parent: Option<ScopeId>,
}

impl Scope {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }
}

#[derive(Debug)]
pub struct Scopes {
    arena: Vec<Scope>,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Scopes {
    /// An arena holding only the root scope.
    pub fn new() -> Self {
        Self {
            arena: vec![Scope::default()],
        }
    }

    /// Number of live scopes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.arena.get(id.0)
    }

    /// Open a child of `parent`.
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.arena.len());

        self.arena.push(Scope {
            bindings: HashMap::new(),
            parent: Some(parent),
        });

        debug!("Opened scope {:?} (parent {:?})", id, parent);

        id
    }

    /// Discard `id` and every scope opened after it. The root is never
    /// discarded.
    pub fn truncate(&mut self, id: ScopeId) {
        let keep = id.0.max(1);

        if keep < self.arena.len() {
            debug!("Closing scopes from {:?}", id);
            self.arena.truncate(keep);
        }
    }

    /// Bind `name` in `scope`. Shadowing an outer binding is fine; binding the
    /// same name twice in one scope is not.
    pub fn define(
        &mut self,
        scope: ScopeId,
        name: &str,
        value: Value,
        mutable: bool,
        line: usize,
    ) -> RuntimeResult<()> {
        let table = &mut self.arena[scope.0].bindings;

        if table.contains_key(name) {
            return Err(RuntimeError::duplicate(name, line));
        }

        debug!("Defining '{}' in {:?} (mutable: {})", name, scope, mutable);

        table.insert(name.to_owned(), Binding { value, mutable });

        Ok(())
    }

    /// Look `name` up starting at `scope` and walking outward.
    pub fn get(&self, scope: ScopeId, name: &str, line: usize) -> RuntimeResult<Value> {
        self.resolve(scope, name)
            .map(|id| self.arena[id.0].bindings[name].value.clone())
            .ok_or_else(|| RuntimeError::undefined(name, line))
    }

    /// Overwrite the nearest binding of `name`, which must be mutable.
    pub fn assign(
        &mut self,
        scope: ScopeId,
        name: &str,
        value: Value,
        line: usize,
    ) -> RuntimeResult<()> {
        let id = self
            .resolve(scope, name)
            .ok_or_else(|| RuntimeError::undefined(name, line))?;

        let binding = self.arena[id.0]
            .bindings
            .get_mut(name)
            .ok_or_else(|| RuntimeError::undefined(name, line))?;

        if !binding.mutable {
            return Err(RuntimeError::immutable(name, line));
        }

        binding.value = value;

        Ok(())
    }

    /// Innermost scope, starting at `scope`, that binds `name`.
    fn resolve(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut cursor = Some(scope);

        while let Some(id) = cursor {
            let frame = self.arena.get(id.0)?;

            if frame.contains(name) {
                return Some(id);
            }

            cursor = frame.parent;
        }

        None
    }
}
