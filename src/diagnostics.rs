//! Diagnostics for the Baiko toolchain.
//!
//! Every failure is a value: lexical and syntax errors live in [`BaikoError`],
//! evaluation failures in the distinguished [`RuntimeError`] so embedders can
//! prefix them differently. Messages use Baiko's own vocabulary and, when a
//! position is known, end with the fixed `(andalana L, toerana C)` suffix
//! that editor tooling parses with `\(andalana (\d+), toerana (\d+)\)`.

use miette::Diagnostic;
use thiserror::Error;

use crate::common::Pos;

/// Toolchain error: lexing, parsing, or a nested runtime failure.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum BaikoError {
    #[error("Tsy fantatra ny marika '{ch}' {pos}")]
    #[diagnostic(code(baiko::lex::unexpected_char))]
    UnexpectedChar { ch: char, pos: Pos },

    #[error("Tsy mikatona ny soratra {pos}")]
    #[diagnostic(code(baiko::lex::unterminated_string))]
    UnterminatedString { pos: Pos },

    #[error("Nandrasana {expected} fa '{found}' no hita {pos}")]
    #[diagnostic(code(baiko::parse::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: Pos,
    },

    #[error("Tokony ho karazana (Isa, Soratra, Marina, Mety, Lisitra) fa '{found}' no hita {pos}")]
    #[diagnostic(code(baiko::parse::expected_type))]
    ExpectedType { found: String, pos: Pos },

    #[error("Ny \"{name}\" dia karazana tsy azo tsisy ka mitaky sanda {pos}")]
    #[diagnostic(code(baiko::parse::missing_initializer))]
    MissingInitializer { name: String, pos: Pos },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Evaluation failure. Nothing is recovered locally: every runtime error
/// aborts the run and propagates to the embedding host.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum RuntimeError {
    #[error("Tsy fantatra ny \"{name}\" — ilaina ny fanambarana azy aloha")]
    #[diagnostic(code(baiko::run::undefined_name))]
    UndefinedName { name: String },

    #[error("Tsy azo ovaina ny \"{name}\" — tsy mbola nofaritana")]
    #[diagnostic(code(baiko::run::undefined_assignment))]
    UndefinedAssignment { name: String },

    #[error("Tsy mety ny karazana ho an'ny \"{name}\": niriny {expected} fa {found} no noraisina")]
    #[diagnostic(code(baiko::run::type_mismatch))]
    TypeMismatch {
        name: String,
        expected: String,
        found: String,
    },

    #[error("Tsy azo ampiasaina ny \"{op}\" amin'ny tsisy")]
    #[diagnostic(code(baiko::run::null_operand))]
    NullOperand { op: String },

    #[error("Tsy azo ampiasaina ny \"+\" eo amin'ny {left} sy {right}")]
    #[diagnostic(code(baiko::run::plus_operands))]
    PlusOperands { left: String, right: String },

    #[error("\"{op}\" mitaky isa fa noraisina {left} sy {right}")]
    #[diagnostic(code(baiko::run::numeric_operands))]
    NumericOperands {
        op: String,
        left: String,
        right: String,
    },

    #[error("Tsy azo zaraina amin'ny aotra (0)")]
    #[diagnostic(code(baiko::run::division_by_zero))]
    DivisionByZero,

    #[error("\"{name}\" mitaky tohan-teny {expected} fa {given} no nomena")]
    #[diagnostic(code(baiko::run::arity))]
    Arity {
        name: String,
        expected: usize,
        given: usize,
    },

    #[error("\"{name}\" tsy asa — {kind} no noraisina")]
    #[diagnostic(code(baiko::run::not_callable))]
    NotCallable { name: String, kind: String },

    #[error("Tsy azo alaina ny \"{member}\" amin'ny \"{object}\" — {kind} izy fa tsy ivelany")]
    #[diagnostic(code(baiko::run::member_on_non_native))]
    MemberOnNonNative {
        member: String,
        object: String,
        kind: String,
    },

    #[error("Tsy azo karohina amin'ny [ ] ny {kind}")]
    #[diagnostic(code(baiko::run::index_not_list))]
    IndexNotList { kind: String },

    #[error("Mitaky isa ny fanondroana lisitra fa {kind} no noraisina")]
    #[diagnostic(code(baiko::run::index_not_number))]
    IndexNotNumber { kind: String },

    #[error("Tsy misy toerana {index} ao amin'ny lisitra ({len} ny halavany)")]
    #[diagnostic(code(baiko::run::index_out_of_range))]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Tsy hita ny package \"{name}\"")]
    #[diagnostic(code(baiko::run::package_not_found))]
    PackageNotFound { name: String },

    #[error("Tsy azo ampidirina ny \"{path}\": {reason}")]
    #[diagnostic(code(baiko::run::import_failed))]
    ImportFailed { path: String, reason: String },

    #[error("Nisy olana tamin'ny ivelany: {message}")]
    #[diagnostic(code(baiko::run::native))]
    Native { message: String },
}
