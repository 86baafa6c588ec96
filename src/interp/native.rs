//! Host interop.
//!
//! Everything the interpreter cannot do alone goes through one of three
//! injected capabilities: a print sink, a file resolver for `ampidiro`
//! paths, and a package resolver for `ampidiro "package:..."` paths.
//! Foreign values live behind the [`NativeObject`] trait.

use std::rc::Rc;

use crate::diagnostics::RuntimeError;
use crate::interp::value::Value;

/// Receives each `asehoy` line.
pub type PrintSink = Box<dyn FnMut(&str)>;

/// Maps an import path to source text, or an error description.
pub type FileResolver = Box<dyn FnMut(&str) -> Result<String, String>>;

/// Maps a package identifier to a native module, if known.
pub type PackageResolver = Box<dyn FnMut(&str) -> Option<Rc<dyn NativeObject>>>;

/// A host-provided value. Default method bodies make every operation a
/// runtime error, so implementors only override what their object supports.
pub trait NativeObject: std::fmt::Debug {
    /// Invoke the object as a function.
    fn call(&self, _args: &[Value]) -> Result<Value, RuntimeError> {
        Err(RuntimeError::Native {
            message: "tsy asa ity ivelany ity".to_string(),
        })
    }

    /// Read a property.
    fn get(&self, property: &str) -> Result<Value, RuntimeError> {
        Err(RuntimeError::Native {
            message: format!("tsy misy \"{property}\""),
        })
    }

    /// Invoke a method.
    fn call_method(&self, method: &str, _args: &[Value]) -> Result<Value, RuntimeError> {
        Err(RuntimeError::Native {
            message: format!("tsy misy \"{method}\""),
        })
    }

    /// Settle the object under `miandry`. `None` means the object is not
    /// awaitable and passes through unchanged.
    fn resolve(&self) -> Result<Option<Value>, RuntimeError> {
        Ok(None)
    }

    /// JSON rendering for `asehoy`; `None` falls back to `Debug`.
    fn to_json(&self) -> Option<serde_json::Value> {
        None
    }
}

/// The result of arithmetic over a native operand. Supports nothing; it
/// exists so native-tainted expressions flow through without a type error.
#[derive(Debug)]
pub struct OpaqueNative;

impl NativeObject for OpaqueNative {}
