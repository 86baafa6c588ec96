//! Runtime values.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{Param, Stmt};
use crate::interp::env::Env;
use crate::interp::native::NativeObject;

/// A Baiko runtime value. Lists and callables are shared handles, so copies
/// alias the same underlying data.
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    Callable(Rc<Function>),
    List(Rc<RefCell<Vec<Value>>>),
    Native(Rc<dyn NativeObject>),
}

/// A user-declared function, carrying its defining environment.
#[derive(Debug)]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Rc<Vec<Stmt>>,
    pub closure: Env,
    pub is_async: bool,
}

/// Statement outcome: fall through, or unwind to the nearest call with a
/// return value.
#[derive(Debug, Clone)]
pub enum Flow {
    Normal,
    Return(Value),
}

impl Value {
    /// The value's kind in Baiko vocabulary, as used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Isa",
            Value::Str(_) => "Soratra",
            Value::Bool(_) => "Marina",
            Value::Null => "tsisy",
            Value::Callable(_) => "asa",
            Value::List(_) => "Lisitra",
            Value::Native(_) => "ivelany",
        }
    }

    /// Condition truthiness: null and `diso` are false, zero is false, the
    /// empty string is false, everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }
}

impl PartialEq for Value {
    /// Scalars compare by value, lists, callables and natives by identity,
    /// and values of different kinds are never equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Callable(a), Value::Callable(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    /// Canonical stringification, shared by `asehoy` and `+` concatenation.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // f64 Display already renders integral values without a
            // fractional part, matching the JS output of generated code.
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(true) => write!(f, "marina"),
            Value::Bool(false) => write!(f, "diso"),
            Value::Null => write!(f, "tsisy"),
            Value::Callable(func) => write!(f, "<asa {}>", func.name),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Native(native) => match native.to_json() {
                Some(json) => write!(f, "{json}"),
                None => write!(f, "{native:?}"),
            },
        }
    }
}
