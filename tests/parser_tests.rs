use pretty_assertions::assert_eq;

use baiko::ast::{BaseType, BinOp, Expr, Stmt, TypeAnn};
use baiko::parse;

fn first(src: &str) -> Stmt {
    parse(src)
        .expect("parsing should succeed")
        .body
        .into_iter()
        .next()
        .expect("at least one statement")
}

fn expr(src: &str) -> Expr {
    match first(src) {
        Stmt::Expr(e) => e,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn number_literal() {
    assert!(matches!(expr("42;"), Expr::Number(n) if n == 42.0));
}

#[test]
fn string_literal() {
    assert!(matches!(expr("\"Salama\";"), Expr::Str(s) if s == "Salama"));
}

#[test]
fn boolean_literals() {
    assert!(matches!(expr("marina;"), Expr::Bool(true)));
    assert!(matches!(expr("diso;"), Expr::Bool(false)));
}

#[test]
fn identifier() {
    assert!(matches!(expr("x;"), Expr::Identifier(n) if n == "x"));
}

#[test]
fn null_literal() {
    assert!(matches!(expr("tsisy;"), Expr::Null));
}

#[test]
fn addition() {
    let Expr::Binary { op, left, right } = expr("1 + 2;") else {
        panic!("expected binary")
    };
    assert_eq!(op, BinOp::Add);
    assert!(matches!(*left, Expr::Number(n) if n == 1.0));
    assert!(matches!(*right, Expr::Number(n) if n == 2.0));
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let Expr::Binary { op, right, .. } = expr("1 + 2 * 3;") else {
        panic!("expected binary")
    };
    assert_eq!(op, BinOp::Add);
    assert!(matches!(*right, Expr::Binary { op: BinOp::Mul, .. }));
}

#[test]
fn parentheses_override_precedence() {
    let Expr::Binary { op, left, .. } = expr("(1 + 2) * 3;") else {
        panic!("expected binary")
    };
    assert_eq!(op, BinOp::Mul);
    assert!(matches!(*left, Expr::Binary { op: BinOp::Add, .. }));
}

#[test]
fn unary_not() {
    let Expr::Not { operand } = expr("tsy marina;") else {
        panic!("expected not")
    };
    assert!(matches!(*operand, Expr::Bool(true)));
}

#[test]
fn unary_minus_desugars_to_zero_minus() {
    let Expr::Binary { op, left, right } = expr("-5;") else {
        panic!("expected binary")
    };
    assert_eq!(op, BinOp::Sub);
    assert!(matches!(*left, Expr::Number(n) if n == 0.0));
    assert!(matches!(*right, Expr::Number(n) if n == 5.0));
}

#[test]
fn and_binds_tighter_than_or() {
    // a na b ary c  ->  a na (b ary c)
    let Expr::Binary { op, right, .. } = expr("a na b ary c;") else {
        panic!("expected binary")
    };
    assert_eq!(op, BinOp::Or);
    assert!(matches!(*right, Expr::Binary { op: BinOp::And, .. }));
}

#[test]
fn typed_var_decl() {
    let Stmt::VarDecl {
        name,
        var_type,
        init,
        exported,
        ..
    } = first("x: Isa = 5;")
    else {
        panic!("expected var decl")
    };
    assert_eq!(name, "x");
    assert_eq!(var_type, TypeAnn::Base(BaseType::Isa));
    assert!(matches!(init, Some(Expr::Number(n)) if n == 5.0));
    assert!(!exported);
}

#[test]
fn non_optional_decl_requires_initializer() {
    let err = parse("x: Isa;").unwrap_err().to_string();
    assert!(err.contains("karazana tsy azo tsisy"), "got: {err}");
}

#[test]
fn non_optional_decl_accepts_null_syntactically() {
    // The mismatch only surfaces at run time.
    let Stmt::VarDecl { init, .. } = first("x: Isa = tsisy;") else {
        panic!("expected var decl")
    };
    assert!(matches!(init, Some(Expr::Null)));
}

#[test]
fn optional_decl_without_initializer() {
    let Stmt::VarDecl { var_type, init, .. } = first("x: Mety(Isa);") else {
        panic!("expected var decl")
    };
    assert_eq!(var_type, TypeAnn::Mety(Box::new(TypeAnn::Base(BaseType::Isa))));
    assert!(init.is_none());
}

#[test]
fn optional_list_annotation() {
    let Stmt::VarDecl { var_type, .. } = first("x: Mety(Lisitra(Isa)) = tsisy;") else {
        panic!("expected var decl")
    };
    assert_eq!(
        var_type,
        TypeAnn::Mety(Box::new(TypeAnn::Lisitra(Box::new(TypeAnn::Base(
            BaseType::Isa
        )))))
    );
}

#[test]
fn list_annotation_and_literal() {
    let Stmt::VarDecl { var_type, init, .. } = first("x: Lisitra(Isa) = [1, 2];") else {
        panic!("expected var decl")
    };
    assert_eq!(var_type, TypeAnn::Lisitra(Box::new(TypeAnn::Base(BaseType::Isa))));
    assert!(matches!(init, Some(Expr::List(items)) if items.len() == 2));
}

#[test]
fn assignment_expression() {
    let Expr::Assign { name, value } = expr("x = 5;") else {
        panic!("expected assignment")
    };
    assert_eq!(name, "x");
    assert!(matches!(*value, Expr::Number(n) if n == 5.0));
}

#[test]
fn call_without_arguments() {
    let Expr::Call { callee, args } = expr("f();") else {
        panic!("expected call")
    };
    assert_eq!(callee, "f");
    assert!(args.is_empty());
}

#[test]
fn call_with_arguments() {
    let Expr::Call { callee, args } = expr("ampio(1, 2);") else {
        panic!("expected call")
    };
    assert_eq!(callee, "ampio");
    assert_eq!(args.len(), 2);
}

#[test]
fn print_statement() {
    let Stmt::Print { value } = first("asehoy \"Salama\";") else {
        panic!("expected print")
    };
    assert!(matches!(value, Expr::Str(s) if s == "Salama"));
}

#[test]
fn if_without_else() {
    let Stmt::If {
        consequent,
        alternate,
        ..
    } = first("raha x > 0 dia asehoy x; farany")
    else {
        panic!("expected if")
    };
    assert_eq!(consequent.len(), 1);
    assert!(alternate.is_none());
}

#[test]
fn if_with_else() {
    let Stmt::If { alternate, .. } = first("raha x > 0 dia asehoy x; ankoatra dia asehoy 0; farany")
    else {
        panic!("expected if")
    };
    assert_eq!(alternate.expect("else branch").len(), 1);
}

#[test]
fn while_statement() {
    let Stmt::While { body, .. } = first("avereno raha x > 0 dia asehoy x; farany") else {
        panic!("expected while")
    };
    assert_eq!(body.len(), 1);
}

#[test]
fn function_declaration() {
    let Stmt::FuncDecl {
        name,
        params,
        return_type,
        body,
        is_async,
        exported,
        ..
    } = first("asa ampio(a: Isa, b: Isa): Isa dia mamoaka a + b; farany")
    else {
        panic!("expected function")
    };
    assert_eq!(name, "ampio");
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "a");
    assert_eq!(params[0].param_type, BaseType::Isa);
    assert_eq!(return_type, Some(BaseType::Isa));
    assert_eq!(body.len(), 1);
    assert!(!is_async);
    assert!(!exported);
}

#[test]
fn function_without_return_type() {
    let Stmt::FuncDecl {
        return_type, body, ..
    } = first("asa f() dia mamoaka; farany")
    else {
        panic!("expected function")
    };
    assert!(return_type.is_none());
    assert!(matches!(&body[0], Stmt::Return { value: None }));
}

#[test]
fn async_function() {
    let Stmt::FuncDecl { is_async, .. } = first("andrasana asa f(): Isa dia mamoaka 1; farany")
    else {
        panic!("expected function")
    };
    assert!(is_async);
}

#[test]
fn await_expression() {
    let Expr::Await { operand } = expr("miandry f();") else {
        panic!("expected await")
    };
    assert!(matches!(*operand, Expr::Call { .. }));
}

#[test]
fn import_statement() {
    let Stmt::Import { path, .. } = first("ampidiro \"utils.baiko\";") else {
        panic!("expected import")
    };
    assert_eq!(path, "utils.baiko");
}

#[test]
fn member_call() {
    let Stmt::Print { value } = first("asehoy axios.get(\"url\");") else {
        panic!("expected print")
    };
    let Expr::MemberCall {
        object,
        method,
        args,
    } = value
    else {
        panic!("expected member call")
    };
    assert!(matches!(*object, Expr::Identifier(n) if n == "axios"));
    assert_eq!(method, "get");
    assert_eq!(args.len(), 1);
}

#[test]
fn member_access() {
    let Stmt::Print { value } = first("asehoy math.pi;") else {
        panic!("expected print")
    };
    assert!(matches!(value, Expr::Member { property, .. } if property == "pi"));
}

#[test]
fn index_read_is_an_expression() {
    let Expr::Index { object, index } = expr("x[0];") else {
        panic!("expected index")
    };
    assert!(matches!(*object, Expr::Identifier(n) if n == "x"));
    assert!(matches!(*index, Expr::Number(n) if n == 0.0));
}

#[test]
fn index_assignment_is_a_statement() {
    let Stmt::IndexAssign { target, .. } = first("x[0] = 5;") else {
        panic!("expected index assignment")
    };
    assert_eq!(target, "x");
}

#[test]
fn index_read_statement_is_not_misparsed_as_assignment() {
    assert!(matches!(first("x[0];"), Stmt::Expr(Expr::Index { .. })));
}

#[test]
fn exported_function() {
    let Stmt::FuncDecl { exported, .. } = first("avoaka asa f(n: Isa): Isa dia mamoaka n; farany")
    else {
        panic!("expected function")
    };
    assert!(exported);
}

#[test]
fn exported_variable() {
    let Stmt::VarDecl { exported, .. } = first("avoaka x: Isa = 5;") else {
        panic!("expected var decl")
    };
    assert!(exported);
}

#[test]
fn missing_semicolon_is_an_error() {
    assert!(parse("42").is_err());
}

#[test]
fn missing_farany_is_an_error() {
    assert!(parse("raha x dia asehoy x;").is_err());
}

#[test]
fn unknown_param_type() {
    let err = parse("asa f(x: Inconnu) dia farany").unwrap_err().to_string();
    assert!(err.starts_with("Tokony ho karazana"), "got: {err}");
}

#[test]
fn parse_error_carries_position() {
    let err = parse("x: Isa = ;").unwrap_err().to_string();
    assert!(err.contains("(andalana 1, toerana 10)"), "got: {err}");
}
