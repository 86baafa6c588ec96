//! Tree-walking interpreter.

pub mod env;
pub mod eval;
pub mod native;
pub mod value;

pub use env::{Env, Environment};
pub use eval::Interpreter;
pub use native::{FileResolver, NativeObject, OpaqueNative, PackageResolver, PrintSink};
pub use value::{Flow, Function, Value};
