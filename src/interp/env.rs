//! Lexical environments.
//!
//! A chain of scopes linked through optional parents. Function calls get a
//! child of the callee's closure; `raha` and `avereno raha` bodies get a
//! child of the enclosing scope per entry or iteration.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::interp::value::Value;

/// Shared handle to a scope.
pub type Env = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    store: FxHashMap<String, Value>,
    parent: Option<Env>,
}

impl Environment {
    /// A fresh parentless scope.
    pub fn root() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// A scope nested inside `parent`.
    pub fn child(parent: &Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: FxHashMap::default(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Introduce or shadow a binding in this scope.
    pub fn define(&mut self, name: &str, value: Value) {
        self.store.insert(name.to_string(), value);
    }

    /// Resolve a name through the scope chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.borrow().get(name))
    }

    /// Mutate the closest scope that defines `name`. Returns `false` when no
    /// scope does; assignment never creates a binding.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if self.store.contains_key(name) {
            self.store.insert(name.to_string(), value);
            return true;
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }
}
