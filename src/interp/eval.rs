//! Tree-walking evaluator.
//!
//! One `Interpreter` per program run. Host capabilities (print sink, file
//! resolver, package resolver) are injected up front; imports are guarded by
//! a per-instance seen-set keyed on the literal import path.

use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::ast::{BinOp, Expr, Param, Program, Stmt, TypeAnn};
use crate::common::{Syntax, derived_package_name};
use crate::diagnostics::RuntimeError;
use crate::interp::env::{Env, Environment};
use crate::interp::native::{FileResolver, NativeObject, OpaqueNative, PackageResolver, PrintSink};
use crate::interp::value::{Flow, Function, Value};
use crate::lexer::Lexer;
use crate::parser::Parser;

pub struct Interpreter {
    globals: Env,
    imported: FxHashSet<String>,
    print: PrintSink,
    files: Option<FileResolver>,
    packages: Option<PackageResolver>,
    syntax: Syntax,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            globals: Environment::root(),
            imported: FxHashSet::default(),
            print: Box::new(|line| println!("{line}")),
            files: None,
            packages: None,
            syntax: Syntax::new(),
        }
    }

    /// Redirect `asehoy` output.
    pub fn with_print_sink(mut self, sink: PrintSink) -> Self {
        self.print = sink;
        self
    }

    /// Enable file imports.
    pub fn with_file_resolver(mut self, resolver: FileResolver) -> Self {
        self.files = Some(resolver);
        self
    }

    /// Enable `package:` imports.
    pub fn with_package_resolver(mut self, resolver: PackageResolver) -> Self {
        self.packages = Some(resolver);
        self
    }

    /// Execute a program in the global environment. A top-level `mamoaka`
    /// stops execution but carries no value anywhere.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let globals = Rc::clone(&self.globals);
        self.exec_block(&program.body, &globals)?;
        Ok(())
    }

    // ==================== STATEMENTS ====================

    fn exec_block(&mut self, stmts: &[Stmt], env: &Env) -> Result<Flow, RuntimeError> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &Env) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::VarDecl {
                name,
                var_type,
                init,
                ..
            } => {
                // The parser guarantees a missing initializer only on
                // optional types.
                let value = match init {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Null,
                };
                check_declared_type(name, var_type, &value)?;
                env.borrow_mut().define(name, value);
                Ok(Flow::Normal)
            }
            Stmt::FuncDecl {
                name,
                params,
                body,
                is_async,
                ..
            } => {
                let function = Function {
                    name: name.clone(),
                    params: params.clone(),
                    body: Rc::new(body.clone()),
                    closure: Rc::clone(env),
                    is_async: *is_async,
                };
                env.borrow_mut()
                    .define(name, Value::Callable(Rc::new(function)));
                Ok(Flow::Normal)
            }
            Stmt::Import { path, .. } => {
                self.handle_import(path, env)?;
                Ok(Flow::Normal)
            }
            Stmt::If {
                condition,
                consequent,
                alternate,
            } => {
                let test = self.eval_expr(condition, env)?;
                if test.is_truthy() {
                    let scope = Environment::child(env);
                    self.exec_block(consequent, &scope)
                } else if let Some(alternate) = alternate {
                    let scope = Environment::child(env);
                    self.exec_block(alternate, &scope)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While { condition, body } => {
                while self.eval_expr(condition, env)?.is_truthy() {
                    let scope = Environment::child(env);
                    if let Flow::Return(value) = self.exec_block(body, &scope)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Return { value } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Print { value } => {
                let value = self.eval_expr(value, env)?;
                (self.print)(&value.to_string());
                Ok(Flow::Normal)
            }
            Stmt::IndexAssign {
                target,
                index,
                value,
                ..
            } => {
                let list = env
                    .borrow()
                    .get(target)
                    .ok_or_else(|| RuntimeError::UndefinedName {
                        name: target.clone(),
                    })?;
                let Value::List(items) = list else {
                    return Err(RuntimeError::IndexNotList {
                        kind: list.kind_name().to_string(),
                    });
                };
                let index = self.eval_expr(index, env)?;
                let Value::Number(n) = index else {
                    return Err(RuntimeError::IndexNotNumber {
                        kind: index.kind_name().to_string(),
                    });
                };
                let value = self.eval_expr(value, env)?;
                let len = items.borrow().len();
                if n < 0.0 || n.fract() != 0.0 || (n as usize) >= len {
                    return Err(RuntimeError::IndexOutOfRange {
                        index: n as i64,
                        len,
                    });
                }
                items.borrow_mut()[n as usize] = value;
                Ok(Flow::Normal)
            }
            Stmt::Expr(expr) => {
                self.eval_expr(expr, env)?;
                Ok(Flow::Normal)
            }
        }
    }

    // ==================== EXPRESSIONS ====================

    fn eval_expr(&mut self, expr: &Expr, env: &Env) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Null => Ok(Value::Null),
            Expr::List(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval_expr(element, env)?);
                }
                Ok(Value::List(Rc::new(std::cell::RefCell::new(items))))
            }
            Expr::Identifier(name) => {
                env.borrow()
                    .get(name)
                    .ok_or_else(|| RuntimeError::UndefinedName { name: name.clone() })
            }
            Expr::Assign { name, value } => {
                let value = self.eval_expr(value, env)?;
                if !env.borrow_mut().assign(name, value.clone()) {
                    return Err(RuntimeError::UndefinedAssignment { name: name.clone() });
                }
                Ok(value)
            }
            Expr::Not { operand } => {
                let value = self.eval_expr(operand, env)?;
                if matches!(value, Value::Null) {
                    return Err(RuntimeError::NullOperand {
                        op: "tsy".to_string(),
                    });
                }
                Ok(Value::Bool(!value.is_truthy()))
            }
            Expr::Await { operand } => {
                let value = self.eval_expr(operand, env)?;
                match value {
                    Value::Native(native) => match native.resolve()? {
                        Some(settled) => Ok(settled),
                        None => Ok(Value::Native(native)),
                    },
                    other => Ok(other),
                }
            }
            Expr::Binary { op, left, right } => self.eval_binary(*op, left, right, env),
            Expr::Call { callee, args } => self.eval_call(callee, args, env),
            Expr::Member { object, property } => {
                let value = self.eval_expr(object, env)?;
                match value {
                    Value::Native(native) => native.get(property),
                    other => Err(RuntimeError::MemberOnNonNative {
                        member: property.clone(),
                        object: object.describe(),
                        kind: other.kind_name().to_string(),
                    }),
                }
            }
            Expr::MemberCall {
                object,
                method,
                args,
            } => {
                let value = self.eval_expr(object, env)?;
                match value {
                    Value::Native(native) => {
                        let args = self.eval_args(args, env)?;
                        native.call_method(method, &args)
                    }
                    other => Err(RuntimeError::MemberOnNonNative {
                        member: method.clone(),
                        object: object.describe(),
                        kind: other.kind_name().to_string(),
                    }),
                }
            }
            Expr::Index { object, index } => {
                let value = self.eval_expr(object, env)?;
                let Value::List(items) = value else {
                    return Err(RuntimeError::IndexNotList {
                        kind: value.kind_name().to_string(),
                    });
                };
                let index = self.eval_expr(index, env)?;
                let Value::Number(n) = index else {
                    return Err(RuntimeError::IndexNotNumber {
                        kind: index.kind_name().to_string(),
                    });
                };
                // Reads are forgiving: anything off the list is just null.
                if n < 0.0 || n.fract() != 0.0 {
                    return Ok(Value::Null);
                }
                let items = items.borrow();
                Ok(items.get(n as usize).cloned().unwrap_or(Value::Null))
            }
        }
    }

    fn eval_binary(
        &mut self,
        op: BinOp,
        left: &Expr,
        right: &Expr,
        env: &Env,
    ) -> Result<Value, RuntimeError> {
        // Logical operators short-circuit, so they evaluate their own
        // operands; everything else evaluates both up front.
        match op {
            BinOp::And => {
                let l = self.eval_expr(left, env)?;
                reject_null(&l, op)?;
                if !l.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                let r = self.eval_expr(right, env)?;
                reject_null(&r, op)?;
                return Ok(Value::Bool(r.is_truthy()));
            }
            BinOp::Or => {
                let l = self.eval_expr(left, env)?;
                reject_null(&l, op)?;
                if l.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                let r = self.eval_expr(right, env)?;
                reject_null(&r, op)?;
                return Ok(Value::Bool(r.is_truthy()));
            }
            _ => {}
        }

        let l = self.eval_expr(left, env)?;
        let r = self.eval_expr(right, env)?;

        // Only equality tolerates null operands.
        if !matches!(op, BinOp::Eq | BinOp::Ne) {
            reject_null(&l, op)?;
            reject_null(&r, op)?;
        }

        match op {
            BinOp::Eq => Ok(Value::Bool(l == r)),
            BinOp::Ne => Ok(Value::Bool(l != r)),
            BinOp::Add => match (&l, &r) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!("{l}{r}"))),
                (Value::Native(_), _) | (_, Value::Native(_)) => {
                    Ok(Value::Native(Rc::new(OpaqueNative)))
                }
                _ => Err(RuntimeError::PlusOperands {
                    left: l.kind_name().to_string(),
                    right: r.kind_name().to_string(),
                }),
            },
            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                if op == BinOp::Div && matches!(r, Value::Number(n) if n == 0.0) {
                    return Err(RuntimeError::DivisionByZero);
                }
                if matches!(l, Value::Native(_)) || matches!(r, Value::Native(_)) {
                    return Ok(Value::Native(Rc::new(OpaqueNative)));
                }
                let (Value::Number(a), Value::Number(b)) = (&l, &r) else {
                    return Err(RuntimeError::NumericOperands {
                        op: op.as_str().to_string(),
                        left: l.kind_name().to_string(),
                        right: r.kind_name().to_string(),
                    });
                };
                Ok(match op {
                    BinOp::Sub => Value::Number(a - b),
                    BinOp::Mul => Value::Number(a * b),
                    BinOp::Div => Value::Number(a / b),
                    BinOp::Lt => Value::Bool(a < b),
                    BinOp::Le => Value::Bool(a <= b),
                    BinOp::Gt => Value::Bool(a > b),
                    _ => Value::Bool(a >= b),
                })
            }
            BinOp::And | BinOp::Or => unreachable!("handled above"),
        }
    }

    fn eval_args(&mut self, args: &[Expr], env: &Env) -> Result<Vec<Value>, RuntimeError> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg, env)?);
        }
        Ok(values)
    }

    fn eval_call(&mut self, callee: &str, args: &[Expr], env: &Env) -> Result<Value, RuntimeError> {
        let target = env
            .borrow()
            .get(callee)
            .ok_or_else(|| RuntimeError::UndefinedName {
                name: callee.to_string(),
            })?;

        match target {
            Value::Callable(function) => {
                if function.params.len() != args.len() {
                    return Err(RuntimeError::Arity {
                        name: callee.to_string(),
                        expected: function.params.len(),
                        given: args.len(),
                    });
                }
                let values = self.eval_args(args, env)?;
                let scope = Environment::child(&function.closure);
                for (param, value) in function.params.iter().zip(values) {
                    check_param_type(param, &value)?;
                    scope.borrow_mut().define(&param.name, value);
                }
                let body = Rc::clone(&function.body);
                match self.exec_block(&body, &scope)? {
                    Flow::Return(value) => Ok(value),
                    Flow::Normal => Ok(Value::Null),
                }
            }
            Value::Native(native) => {
                let values = self.eval_args(args, env)?;
                native.call(&values)
            }
            other => Err(RuntimeError::NotCallable {
                name: callee.to_string(),
                kind: other.kind_name().to_string(),
            }),
        }
    }

    // ==================== IMPORTS ====================

    fn handle_import(&mut self, path: &str, env: &Env) -> Result<(), RuntimeError> {
        // Recorded before the module runs, so circular imports terminate.
        if !self.imported.insert(path.to_string()) {
            tracing::debug!(path, "import already loaded");
            return Ok(());
        }

        if let Some(id) = path.strip_prefix("package:") {
            return self.import_package(id, env);
        }
        self.import_file(path, env)
    }

    fn import_package(&mut self, id: &str, env: &Env) -> Result<(), RuntimeError> {
        let resolver = self
            .packages
            .as_mut()
            .ok_or_else(|| RuntimeError::PackageNotFound {
                name: id.to_string(),
            })?;
        let native = resolver(id).ok_or_else(|| RuntimeError::PackageNotFound {
            name: id.to_string(),
        })?;
        let name = derived_package_name(id);
        tracing::debug!(id, name, "package import resolved");
        env.borrow_mut().define(&name, Value::Native(native));
        Ok(())
    }

    fn import_file(&mut self, path: &str, env: &Env) -> Result<(), RuntimeError> {
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

        let import_error = |err: String| RuntimeError::ImportFailed {
            path: path.to_string(),
            reason: err,
        };
        let tokens = Lexer::new(&source, &self.syntax)
            .tokenize()
            .map_err(|e| import_error(e.to_string()))?;
        let program = Parser::new(&tokens, &self.syntax)
            .parse_program()
            .map_err(|e| import_error(e.to_string()))?;

        // Modules run in their own world; only exported names cross over.
        let module_env = Environment::root();
        self.exec_block(&program.body, &module_env)
            .map_err(|e| import_error(e.to_string()))?;

        let mut exports = 0usize;
        for stmt in &program.body {
            let (Stmt::VarDecl {
                name,
                exported: true,
                ..
            }
            | Stmt::FuncDecl {
                name,
                exported: true,
                ..
            }) = stmt
            else {
                continue;
            };
            if let Some(value) = module_env.borrow().get(name) {
                env.borrow_mut().define(name, value);
                exports += 1;
            }
        }
        tracing::debug!(path, exports, "file import executed");
        Ok(())
    }
}

// ==================== TYPE CHECKS ====================

/// `tsisy` in a non-optional slot and kind mismatches both surface as the
/// ordinary mismatch error. Natives bypass checking entirely.
fn check_declared_type(name: &str, ann: &TypeAnn, value: &Value) -> Result<(), RuntimeError> {
    if ann_matches(ann, value) {
        Ok(())
    } else {
        Err(RuntimeError::TypeMismatch {
            name: name.to_string(),
            expected: ann.to_string(),
            found: value.kind_name().to_string(),
        })
    }
}

fn ann_matches(ann: &TypeAnn, value: &Value) -> bool {
    if matches!(value, Value::Native(_)) {
        return true;
    }
    match ann {
        TypeAnn::Base(base) => value.kind_name() == base.as_str(),
        TypeAnn::Mety(inner) => matches!(value, Value::Null) || ann_matches(inner, value),
        // Element types are not checked; lists verify only their own kind.
        TypeAnn::Lisitra(_) => matches!(value, Value::List(_)),
    }
}

fn check_param_type(param: &Param, value: &Value) -> Result<(), RuntimeError> {
    check_declared_type(&param.name, &TypeAnn::Base(param.param_type), value)
}

fn reject_null(value: &Value, op: BinOp) -> Result<(), RuntimeError> {
    if matches!(value, Value::Null) {
        return Err(RuntimeError::NullOperand {
            op: op.as_str().to_string(),
        });
    }
    Ok(())
}
