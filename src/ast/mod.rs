//! Abstract Syntax Tree for the Baiko language.
//!
//! The shared data contract between parser, interpreter, and the JavaScript
//! generator. Nodes are immutable trees built bottom-up by the parser.

use serde::Serialize;

use crate::common::Pos;

/// Top-level AST.
#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub body: Vec<Stmt>,
}

// ==================== TYPES ====================

/// Scalar base types. Parameters may only use these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BaseType {
    Isa,
    Soratra,
    Marina,
}

impl BaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Isa => "Isa",
            BaseType::Soratra => "Soratra",
            BaseType::Marina => "Marina",
        }
    }
}

impl std::fmt::Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declared type annotation: base type, `Mety(T)`, or `Lisitra(T)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeAnn {
    Base(BaseType),
    Mety(Box<TypeAnn>),
    Lisitra(Box<TypeAnn>),
}

impl TypeAnn {
    /// Optional types accept the null sentinel.
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeAnn::Mety(_))
    }
}

impl std::fmt::Display for TypeAnn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnn::Base(base) => write!(f, "{base}"),
            TypeAnn::Mety(inner) => write!(f, "Mety({inner})"),
            TypeAnn::Lisitra(inner) => write!(f, "Lisitra({inner})"),
        }
    }
}

/// Typed function parameter.
#[derive(Debug, Clone, Serialize)]
pub struct Param {
    pub name: String,
    pub param_type: BaseType,
}

// ==================== STATEMENTS ====================

#[derive(Debug, Clone, Serialize)]
pub enum Stmt {
    /// `[avoaka] name: Type [= expr] ;`
    VarDecl {
        name: String,
        var_type: TypeAnn,
        init: Option<Expr>,
        exported: bool,
        pos: Pos,
    },
    /// `[avoaka] [andrasana] asa name(params) [: ReturnType] dia ... farany`
    FuncDecl {
        name: String,
        params: Vec<Param>,
        return_type: Option<BaseType>,
        body: Vec<Stmt>,
        is_async: bool,
        exported: bool,
        pos: Pos,
    },
    /// `ampidiro "path" ;`
    Import { path: String, pos: Pos },
    /// `raha cond dia ... [ankoatra dia ...] farany`
    If {
        condition: Expr,
        consequent: Vec<Stmt>,
        alternate: Option<Vec<Stmt>>,
    },
    /// `avereno raha cond dia ... farany`
    While { condition: Expr, body: Vec<Stmt> },
    /// `mamoaka [expr] ;`
    Return { value: Option<Expr> },
    /// `asehoy expr ;`
    Print { value: Expr },
    /// `name[index] = expr ;`
    IndexAssign {
        target: String,
        index: Expr,
        value: Expr,
        pos: Pos,
    },
    Expr(Expr),
}

// ==================== EXPRESSIONS ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinOp {
    /// Surface spelling, used in error messages and generated code.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "ary",
            BinOp::Or => "na",
        }
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum Expr {
    /// `name = expr`
    Assign { name: String, value: Box<Expr> },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `tsy expr`
    Not { operand: Box<Expr> },
    /// `miandry expr`
    Await { operand: Box<Expr> },
    /// `name(args)`
    Call { callee: String, args: Vec<Expr> },
    /// `object.method(args)`
    MemberCall {
        object: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// `object.property`
    Member {
        object: Box<Expr>,
        property: String,
    },
    /// `object[index]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Identifier(String),
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    List(Vec<Expr>),
}

impl Expr {
    /// A short human-readable handle for an expression, used when a runtime
    /// error needs to name the offending operand.
    pub fn describe(&self) -> String {
        match self {
            Expr::Identifier(name) => name.clone(),
            Expr::Call { callee, .. } => format!("{callee}(...)"),
            Expr::Member { property, .. } => format!(".{property}"),
            Expr::MemberCall { method, .. } => format!(".{method}(...)"),
            Expr::List(_) => "lisitra".to_string(),
            _ => "sanda".to_string(),
        }
    }
}
