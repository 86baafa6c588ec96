//! JavaScript code generator.
//!
//! Structural one-to-one emission with 2-space indentation. Declared types
//! survive as `/** @type {...} */` annotations so the output stays checkable
//! with `// @ts-check`. File imports are inlined as IIFEs exposing only
//! exported names; package imports become `require` calls.

use crate::ast::{BinOp, Expr, Program, Stmt, TypeAnn};
use crate::common::{Syntax, derived_package_name};
use crate::diagnostics::{BaikoError, RuntimeError};
use crate::interp::FileResolver;
use crate::lexer::Lexer;
use crate::parser::Parser;

pub struct Generator {
    lines: Vec<String>,
    indent: usize,
    files: Option<FileResolver>,
    syntax: Syntax,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            indent: 0,
            files: None,
            syntax: Syntax::new(),
        }
    }

    /// Enable inlining of file imports.
    pub fn with_file_resolver(mut self, resolver: FileResolver) -> Self {
        self.files = Some(resolver);
        self
    }

    pub fn generate(mut self, program: &Program) -> Result<String, BaikoError> {
        for stmt in &program.body {
            self.gen_stmt(stmt)?;
        }
        tracing::debug!(lines = self.lines.len(), "codegen finished");
        Ok(self.lines.join("\n"))
    }

    // ==================== STATEMENTS ====================

    fn gen_stmt(&mut self, stmt: &Stmt) -> Result<(), BaikoError> {
        match stmt {
            Stmt::VarDecl {
                name,
                var_type,
                init,
                ..
            } => {
                let ty = type_js(var_type);
                match init {
                    Some(expr) => {
                        let value = gen_expr(expr);
                        self.line(&format!("let /** @type {{{ty}}} */ {name} = {value};"));
                    }
                    None => self.line(&format!("let /** @type {{{ty}}} */ {name};")),
                }
            }
            Stmt::FuncDecl {
                name,
                params,
                body,
                is_async,
                ..
            } => {
                let prefix = if *is_async { "async function" } else { "function" };
                let params = params
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.line(&format!("{prefix} {name}({params}) {{"));
                self.indented(|g| g.gen_block(body))?;
                self.line("}");
            }
            Stmt::Import { path, .. } => self.gen_import(path)?,
            Stmt::If {
                condition,
                consequent,
                alternate,
            } => {
                self.line(&format!("if ({}) {{", gen_condition(condition)));
                self.indented(|g| g.gen_block(consequent))?;
                if let Some(alternate) = alternate {
                    self.line("} else {");
                    self.indented(|g| g.gen_block(alternate))?;
                }
                self.line("}");
            }
            Stmt::While { condition, body } => {
                self.line(&format!("while ({}) {{", gen_condition(condition)));
                self.indented(|g| g.gen_block(body))?;
                self.line("}");
            }
            Stmt::Return { value } => match value {
                Some(expr) => self.line(&format!("return {};", gen_expr(expr))),
                None => self.line("return;"),
            },
            Stmt::Print { value } => {
                self.line(&format!("console.log({});", gen_expr(value)));
            }
            Stmt::IndexAssign {
                target,
                index,
                value,
                ..
            } => {
                self.line(&format!(
                    "{target}[{}] = {};",
                    gen_expr(index),
                    gen_expr(value)
                ));
            }
            Stmt::Expr(expr) => self.line(&format!("{};", gen_expr(expr))),
        }
        Ok(())
    }

    fn gen_block(&mut self, stmts: &[Stmt]) -> Result<(), BaikoError> {
        for stmt in stmts {
            self.gen_stmt(stmt)?;
        }
        Ok(())
    }

    fn gen_import(&mut self, path: &str) -> Result<(), BaikoError> {
        if let Some(id) = path.strip_prefix("package:") {
            let name = derived_package_name(id);
            self.line(&format!("const {name} = require('{id}');"));
            return Ok(());
        }

        let resolver = self
            .files
            .as_mut()
            .ok_or_else(|| RuntimeError::ImportFailed {
                path: path.to_string(),
                reason: "tsy misy mpamaky rakitra".to_string(),
            })?;
        let source = resolver(path).map_err(|reason| RuntimeError::ImportFailed {
            path: path.to_string(),
            reason,
        })?;
        let tokens = Lexer::new(&source, &self.syntax).tokenize()?;
        let program = Parser::new(&tokens, &self.syntax).parse_program()?;

        let mut exports = Vec::new();
        for stmt in &program.body {
            if let Stmt::VarDecl {
                name,
                exported: true,
                ..
            }
            | Stmt::FuncDecl {
                name,
                exported: true,
                ..
            } = stmt
            {
                exports.push(name.clone());
            }
        }
        let names = exports.join(", ");

        self.line(&format!("const {{ {names} }} = (() => {{"));
        self.indented(|g| {
            g.gen_block(&program.body)?;
            g.line(&format!("return {{ {names} }};"));
            Ok(())
        })?;
        self.line("})();");
        Ok(())
    }

    // ==================== OUTPUT ====================

    fn line(&mut self, text: &str) {
        self.lines.push(format!("{}{text}", "  ".repeat(self.indent)));
    }

    fn indented(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<(), BaikoError>,
    ) -> Result<(), BaikoError> {
        self.indent += 1;
        let result = body(self);
        self.indent -= 1;
        result
    }
}

// ==================== EXPRESSIONS ====================

fn gen_expr(expr: &Expr) -> String {
    match expr {
        Expr::Number(n) => n.to_string(),
        Expr::Str(s) => js_string(s),
        Expr::Bool(true) => "true".to_string(),
        Expr::Bool(false) => "false".to_string(),
        Expr::Null => "null".to_string(),
        Expr::Identifier(name) => name.clone(),
        Expr::Assign { name, value } => format!("{name} = {}", gen_expr(value)),
        Expr::Binary { op, left, right } => {
            format!("({} {} {})", gen_expr(left), op_js(*op), gen_expr(right))
        }
        Expr::Not { operand } => format!("!({})", gen_expr(operand)),
        Expr::Await { operand } => format!("await {}", gen_expr(operand)),
        Expr::Call { callee, args } => format!("{callee}({})", gen_args(args)),
        Expr::MemberCall {
            object,
            method,
            args,
        } => format!("{}.{method}({})", gen_expr(object), gen_args(args)),
        Expr::Member { object, property } => format!("{}.{property}", gen_expr(object)),
        Expr::Index { object, index } => format!("{}[{}]", gen_expr(object), gen_expr(index)),
        Expr::List(elements) => format!("[{}]", gen_args(elements)),
    }
}

/// `if`/`while` headers already parenthesize, so a top-level binary operator
/// drops its own parentheses.
fn gen_condition(expr: &Expr) -> String {
    match expr {
        Expr::Binary { op, left, right } => {
            format!("{} {} {}", gen_expr(left), op_js(*op), gen_expr(right))
        }
        other => gen_expr(other),
    }
}

fn gen_args(args: &[Expr]) -> String {
    args.iter().map(gen_expr).collect::<Vec<_>>().join(", ")
}

fn op_js(op: BinOp) -> &'static str {
    match op {
        BinOp::And => "&&",
        BinOp::Or => "||",
        other => other.as_str(),
    }
}

fn type_js(ann: &TypeAnn) -> String {
    match ann {
        TypeAnn::Base(base) => base.as_str().to_string(),
        TypeAnn::Mety(inner) => format!("{} | null", type_js(inner)),
        TypeAnn::Lisitra(inner) => {
            let inner = type_js(inner);
            if inner.contains('|') {
                format!("({inner})[]")
            } else {
                format!("{inner}[]")
            }
        }
    }
}

fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
