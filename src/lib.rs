//! Baiko: a Malagasy-keyword programming language.
//!
//! The crate is a classic four-stage toolchain. [`lexer`] turns source text
//! into positioned tokens, [`parser`] builds the [`ast`], and from there a
//! program either runs on the tree-walking [`interp`] or is lowered to
//! JavaScript by [`codegen`]. Host embedders inject their capabilities
//! (printing, file and package resolution) into the interpreter.
//!
//! ```no_run
//! let program = baiko::parse("asehoy 1 + 2;")?;
//! let _js = baiko::compile_ast(&program)?;
//! # Ok::<(), baiko::BaikoError>(())
//! ```

pub mod ast;
pub mod codegen;
pub mod common;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod parser;

pub use codegen::Generator;
pub use diagnostics::{BaikoError, RuntimeError};
pub use interp::Interpreter;

use crate::ast::Program;
use crate::common::Syntax;

/// Lex and parse source text.
pub fn parse(source: &str) -> Result<Program, BaikoError> {
    let syntax = Syntax::new();
    let tokens = lexer::Lexer::new(source, &syntax).tokenize()?;
    parser::Parser::new(&tokens, &syntax).parse_program()
}

/// Generate JavaScript for an already-parsed program. Programs with file
/// imports need a [`Generator`] with a file resolver instead.
pub fn compile_ast(program: &Program) -> Result<String, BaikoError> {
    Generator::new().generate(program)
}

/// Source text straight to JavaScript.
pub fn compile(source: &str) -> Result<String, BaikoError> {
    compile_ast(&parse(source)?)
}

/// Parse and interpret source text with default host capabilities: output
/// to stdout, no import resolvers.
pub fn interpret(source: &str) -> Result<(), BaikoError> {
    let program = parse(source)?;
    Interpreter::new().run(&program)?;
    Ok(())
}
