//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Operator precedence and associativity
//! - Paths, turbofish and struct expressions
//! - Blocks, statements and trailing expressions
//! - Types, including nested generics
//! - Items, attributes and `use` clauses
//! - Syntax errors and their positions

use super::parser::parse;
use crate::{
    ast::{
        ast::PathSegmentKind,
        expressions::{BinaryOperator, CompoundOperator, Expr, ExprKind, Field, Literal, UnaryOperator},
        items::{ItemKind, SourceFile, UseClause},
        statements::{Block, StmtKind},
        types::{PrimitiveType, Type, TypeKind},
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::lexer::tokenize,
};

fn parse_str(source: &str) -> Result<SourceFile, Error> {
    parse(tokenize(source)?, "test.alu")
}

fn body(source: &str) -> Block {
    let file = parse_str(&format!("fn test() {{ {} }}", source)).unwrap();
    match &file.items[0].kind {
        ItemKind::Function(function) => function.body.clone(),
        other => panic!("expected function, got {:?}", other),
    }
}

fn expr(source: &str) -> Expr {
    *body(source).trailing.expect("expected a trailing expression")
}

fn name(expr: &Expr) -> &str {
    match &expr.kind {
        ExprKind::Identifier(name) => name,
        other => panic!("expected identifier, got {:?}", other),
    }
}

fn int(expr: &Expr) -> &str {
    match &expr.kind {
        ExprKind::Literal(Literal::Integer(literal)) => &literal.value,
        other => panic!("expected integer literal, got {:?}", other),
    }
}

fn primitive(ty: &Type) -> PrimitiveType {
    match &ty.kind {
        TypeKind::Primitive(primitive) => *primitive,
        other => panic!("expected primitive type, got {:?}", other),
    }
}

fn parameter_types(source: &str) -> Vec<Type> {
    let file = parse_str(source).unwrap();
    match &file.items[0].kind {
        ItemKind::Function(function) => function.parameters.iter().map(|p| p.ty.clone()).collect(),
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let ExprKind::Binary { operator, left, right } = expr("1 + 2 * 3").kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator, BinaryOperator::Add);
    assert_eq!(int(&left), "1");

    let ExprKind::Binary { operator, left, right } = right.kind else {
        panic!("expected nested binary expression");
    };
    assert_eq!(operator, BinaryOperator::Mul);
    assert_eq!(int(&left), "2");
    assert_eq!(int(&right), "3");
}

#[test]
fn test_binary_operators_are_left_associative() {
    let ExprKind::Binary { operator, left, right } = expr("1 - 2 - 3").kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator, BinaryOperator::Sub);
    assert_eq!(int(&right), "3");
    assert!(matches!(
        left.kind,
        ExprKind::Binary {
            operator: BinaryOperator::Sub,
            ..
        }
    ));
}

#[test]
fn test_logical_and_bitwise_precedence() {
    // a || (b && (c == (d | e)))
    let ExprKind::Binary { operator, right, .. } = expr("a || b && c == d | e").kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator, BinaryOperator::Or);

    let ExprKind::Binary { operator, right, .. } = right.kind else {
        panic!("expected `&&`");
    };
    assert_eq!(operator, BinaryOperator::And);

    let ExprKind::Binary { operator, left, right } = right.kind else {
        panic!("expected `==`");
    };
    assert_eq!(operator, BinaryOperator::Eq);
    assert_eq!(name(&left), "c");
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            operator: BinaryOperator::BitOr,
            ..
        }
    ));
}

#[test]
fn test_assignment_is_right_associative() {
    let ExprKind::Assignment { target, value } = expr("a = b = c").kind else {
        panic!("expected assignment");
    };
    assert_eq!(name(&target), "a");

    let ExprKind::Assignment { target, value } = value.kind else {
        panic!("expected nested assignment");
    };
    assert_eq!(name(&target), "b");
    assert_eq!(name(&value), "c");
}

#[test]
fn test_compound_assignment() {
    let ExprKind::CompoundAssignment { operator, target, value } = expr("a += b << 2").kind else {
        panic!("expected compound assignment");
    };
    assert_eq!(operator, CompoundOperator::Add);
    assert_eq!(operator.binary_operator(), BinaryOperator::Add);
    assert_eq!(name(&target), "a");
    assert!(matches!(
        value.kind,
        ExprKind::Binary {
            operator: BinaryOperator::Shl,
            ..
        }
    ));
}

#[test]
fn test_less_than_is_never_generic() {
    let ExprKind::Binary { operator, left, right } = expr("a < b").kind else {
        panic!("expected comparison");
    };
    assert_eq!(operator, BinaryOperator::Lt);
    assert_eq!(name(&left), "a");
    assert_eq!(name(&right), "b");
}

#[test]
fn test_turbofish_call() {
    let ExprKind::Call { callee, arguments } = expr("foo::<u32, i64>(1)").kind else {
        panic!("expected call");
    };
    assert_eq!(arguments.len(), 1);
    assert_eq!(int(&arguments[0]), "1");

    let ExprKind::GenericFunction { function, type_arguments } = callee.kind else {
        panic!("expected generic function");
    };
    assert_eq!(name(&function), "foo");
    assert_eq!(primitive(&type_arguments[0]), PrimitiveType::U32);
    assert_eq!(primitive(&type_arguments[1]), PrimitiveType::I64);
}

#[test]
fn test_turbofish_on_inner_segment() {
    let ExprKind::Call { callee, .. } = expr("Vec::<T>::new()").kind else {
        panic!("expected call");
    };
    let ExprKind::ScopedIdentifier(path) = callee.kind else {
        panic!("expected scoped identifier");
    };
    assert_eq!(path.segments.len(), 2);
    assert_eq!(path.segments[0].name(), Some("Vec"));
    assert_eq!(path.segments[0].type_arguments.len(), 1);
    assert_eq!(path.last_name(), Some("new"));
    assert_eq!(path.to_string(), "Vec::<T>::new");
}

#[test]
fn test_turbofish_with_nested_generic_closing() {
    let ExprKind::Call { callee, .. } = expr("make::<Vec<u8>>(x)").kind else {
        panic!("expected call");
    };
    let ExprKind::GenericFunction { type_arguments, .. } = callee.kind else {
        panic!("expected generic function");
    };
    assert_eq!(type_arguments[0].to_string(), "Vec<u8>");
}

#[test]
fn test_method_turbofish() {
    let ExprKind::Call { callee, .. } = expr("x.cast::<u8>()").kind else {
        panic!("expected call");
    };
    let ExprKind::GenericFunction { function, .. } = callee.kind else {
        panic!("expected generic function");
    };
    assert!(matches!(function.kind, ExprKind::FieldAccess { .. }));
}

#[test]
fn test_scoped_identifiers() {
    let ExprKind::ScopedIdentifier(path) = expr("super::foo").kind else {
        panic!("expected scoped identifier");
    };
    assert_eq!(path.segments[0].kind, PathSegmentKind::Super);

    let ExprKind::ScopedIdentifier(path) = expr("::root::x").kind else {
        panic!("expected scoped identifier");
    };
    assert!(path.is_global());
    assert_eq!(path.segments.len(), 3);

    let ExprKind::Call { callee, .. } = expr("u8::max_value()").kind else {
        panic!("expected call");
    };
    assert!(matches!(callee.kind, ExprKind::ScopedIdentifier(_)));
}

#[test]
fn test_struct_expression() {
    let ExprKind::Struct { name: ty, fields } = expr("Point { x: 1, y: 2 }").kind else {
        panic!("expected struct expression");
    };
    assert_eq!(ty.kind, TypeKind::Identifier("Point".to_string()));
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name.name, "x");
    assert_eq!(int(&fields[0].value), "1");
    assert_eq!(fields[1].name.name, "y");
    assert_eq!(int(&fields[1].value), "2");
}

#[test]
fn test_struct_expression_forms() {
    assert!(matches!(
        expr("Empty {}").kind,
        ExprKind::Struct { ref fields, .. } if fields.is_empty()
    ));
    assert!(matches!(
        expr("Point { x: 1, }").kind,
        ExprKind::Struct { ref fields, .. } if fields.len() == 1
    ));

    let ExprKind::Struct { name: ty, .. } = expr("shapes::Point { x: 1 }").kind else {
        panic!("expected struct expression");
    };
    assert!(matches!(ty.kind, TypeKind::Scoped(_)));

    let ExprKind::Struct { name: ty, .. } = expr("Pair::<u8, u16> { a: 1 }").kind else {
        panic!("expected struct expression");
    };
    assert!(matches!(ty.kind, TypeKind::Generic { .. }));
}

#[test]
fn test_struct_literal_in_condition() {
    // `flag {}` is read as an empty struct literal, leaving `if` without a body
    let error = parse_str("fn f() { if flag {} }").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Syntax);

    // A block that doesn't start with `name:` or `}` is still a block
    assert!(matches!(expr("if flag { x }").kind, ExprKind::If(_)));
    assert!(matches!(expr("if (flag) {}").kind, ExprKind::If(_)));
}

#[test]
fn test_cast_precedence() {
    let ExprKind::Cast { value, ty } = expr("a + b as u8").kind else {
        panic!("expected cast");
    };
    assert_eq!(primitive(&ty), PrimitiveType::U8);
    assert!(matches!(value.kind, ExprKind::Binary { .. }));

    let ExprKind::Assignment { value, .. } = expr("a = b as u8").kind else {
        panic!("expected assignment");
    };
    assert!(matches!(value.kind, ExprKind::Cast { .. }));

    let ExprKind::Cast { value, .. } = expr("-x as i32").kind else {
        panic!("expected cast");
    };
    assert!(matches!(value.kind, ExprKind::Unary { .. }));

    let ExprKind::Cast { value, ty } = expr("x as u8 as u16").kind else {
        panic!("expected cast");
    };
    assert_eq!(primitive(&ty), PrimitiveType::U16);
    assert!(matches!(value.kind, ExprKind::Cast { .. }));
}

#[test]
fn test_unary_and_reference() {
    let ExprKind::Unary { operator, operand } = expr("-a.b()").kind else {
        panic!("expected unary");
    };
    assert_eq!(operator, UnaryOperator::Negate);
    assert!(matches!(operand.kind, ExprKind::Call { .. }));

    let ExprKind::Reference(inner) = expr("&&x").kind else {
        panic!("expected reference");
    };
    let ExprKind::Reference(inner) = inner.kind else {
        panic!("expected nested reference");
    };
    assert_eq!(name(&inner), "x");

    let ExprKind::Assignment { target, .. } = expr("*p = 1").kind else {
        panic!("expected assignment");
    };
    assert!(matches!(
        target.kind,
        ExprKind::Unary {
            operator: UnaryOperator::Deref,
            ..
        }
    ));
}

#[test]
fn test_postfix_chain() {
    let ExprKind::FieldAccess { receiver, field } = expr("a[0](1).b").kind else {
        panic!("expected field access");
    };
    assert!(matches!(field, Field::Named(ref ident) if ident.name == "b"));

    let ExprKind::Call { callee, .. } = receiver.kind else {
        panic!("expected call");
    };
    assert!(matches!(callee.kind, ExprKind::Index { .. }));
}

#[test]
fn test_tuple_field_chain() {
    let ExprKind::FieldAccess { receiver, field } = expr("t.0.1").kind else {
        panic!("expected field access");
    };
    assert!(matches!(field, Field::Index(ref index) if index.value == "1"));

    let ExprKind::FieldAccess { receiver, field } = receiver.kind else {
        panic!("expected inner field access");
    };
    assert!(matches!(field, Field::Index(ref index) if index.value == "0"));
    assert_eq!(name(&receiver), "t");
}

#[test]
fn test_parenthesized_versus_tuple() {
    assert_eq!(int(&expr("(1)")), "1");
    assert!(matches!(expr("(1,)").kind, ExprKind::Tuple(ref elements) if elements.len() == 1));
    assert!(matches!(expr("(1, 2)").kind, ExprKind::Tuple(ref elements) if elements.len() == 2));
    assert!(matches!(expr("()").kind, ExprKind::Tuple(ref elements) if elements.is_empty()));
}

#[test]
fn test_literals() {
    assert!(matches!(expr("\"hi\"").kind, ExprKind::Literal(Literal::String(ref s)) if s.raw == "hi"));
    assert!(matches!(expr("true").kind, ExprKind::Literal(Literal::Boolean(true))));
    assert!(matches!(expr("null").kind, ExprKind::Literal(Literal::Null)));
    assert!(matches!(
        expr("1.5f32").kind,
        ExprKind::Literal(Literal::Float(ref f)) if f.value == "1.5" && f.suffix.as_deref() == Some("f32")
    ));
}

#[test]
fn test_leading_dot_float_literal() {
    let block = body("let x = .5; x + .25");

    let StmtKind::Let(declaration) = &block.statements[0].kind else {
        panic!("expected let statement");
    };
    assert!(matches!(
        declaration.value.as_ref().map(|v| &v.kind),
        Some(ExprKind::Literal(Literal::Float(f))) if f.value == ".5"
    ));

    let Some(ExprKind::Binary { right, .. }) = block.trailing.as_deref().map(|e| &e.kind) else {
        panic!("expected binary expression");
    };
    assert!(matches!(&right.kind, ExprKind::Literal(Literal::Float(f)) if f.value == ".25"));
}

#[test]
fn test_block_trailing_expression() {
    let block = body("foo(); bar()");
    assert_eq!(block.statements.len(), 1);
    assert!(matches!(
        block.statements[0].kind,
        StmtKind::Expression {
            terminated: true,
            ..
        }
    ));
    assert!(block.has_trailing_expression());

    let block = body("foo(); bar();");
    assert_eq!(block.statements.len(), 2);
    assert!(!block.has_trailing_expression());
}

#[test]
fn test_block_like_statement_without_semicolon() {
    let block = body("if a { b(); } c()");
    assert_eq!(block.statements.len(), 1);

    let StmtKind::Expression { expression, terminated } = &block.statements[0].kind else {
        panic!("expected expression statement");
    };
    assert!(!terminated);
    assert!(expression.is_block_like());
    assert!(block.has_trailing_expression());
}

#[test]
fn test_missing_semicolon_is_an_error() {
    let error = parse_str("fn f() { a() b() }").unwrap_err();
    assert_eq!(
        error.get_inner(),
        &ErrorImpl::UnexpectedToken {
            token: "b".to_string(),
            expected: "`;` or `}`".to_string(),
        }
    );
}

#[test]
fn test_let_and_const_statements() {
    let block = body("let x: u32 = 5; let y; const Z: u8 = 1; ; x");
    assert_eq!(block.statements.len(), 4);

    let StmtKind::Let(declaration) = &block.statements[0].kind else {
        panic!("expected let");
    };
    assert_eq!(declaration.name.name, "x");
    assert_eq!(primitive(declaration.ty.as_ref().unwrap()), PrimitiveType::U32);
    assert!(declaration.value.is_some());

    let StmtKind::Let(declaration) = &block.statements[1].kind else {
        panic!("expected let");
    };
    assert!(declaration.ty.is_none());
    assert!(declaration.value.is_none());

    assert!(matches!(block.statements[2].kind, StmtKind::Const(_)));
    assert!(matches!(block.statements[3].kind, StmtKind::Empty));
}

#[test]
fn test_let_without_name() {
    let error = parse_str("fn f() { let = 5; }").unwrap_err();
    assert!(matches!(
        error.get_inner(),
        ErrorImpl::UnexpectedTokenDetailed { token, .. } if token == "="
    ));
}

#[test]
fn test_control_flow() {
    let ExprKind::If(if_expr) = expr("if a { 1 } else if b { 2 } else { 3 }").kind else {
        panic!("expected if");
    };
    let alternative = if_expr.alternative.expect("expected else branch");
    let ExprKind::If(nested) = alternative.kind else {
        panic!("expected else-if");
    };
    assert!(matches!(
        nested.alternative.map(|e| e.kind),
        Some(ExprKind::Block(_))
    ));

    assert!(matches!(expr("while i < 10 { i += 1; }").kind, ExprKind::While { .. }));
    assert!(matches!(expr("loop { }").kind, ExprKind::Loop { .. }));

    let ExprKind::For { start, stop, step, .. } = expr("for 0, n, 1 { }").kind else {
        panic!("expected for");
    };
    assert_eq!(int(&start), "0");
    assert_eq!(name(&stop), "n");
    assert_eq!(int(&step), "1");
}

#[test]
fn test_return() {
    assert!(matches!(expr("return").kind, ExprKind::Return(None)));

    let block = body("return 1 + 2;");
    let StmtKind::Expression { expression, .. } = &block.statements[0].kind else {
        panic!("expected expression statement");
    };
    assert!(matches!(expression.kind, ExprKind::Return(Some(_))));
}

#[test]
fn test_parse_types() {
    let types = parameter_types(
        "fn f(a: &u8, b: [u8], c: [u8; 4], d: (u8), e: fn(u8) -> u8, g: !, h: &&Foo, i: a::B<T>::C, j: ()) {}",
    );

    assert!(matches!(types[0].kind, TypeKind::Pointer(_)));
    assert!(matches!(types[1].kind, TypeKind::Slice(_)));
    assert!(matches!(types[2].kind, TypeKind::Array { ref size, .. } if size.value == "4"));
    assert!(matches!(types[3].kind, TypeKind::Tuple(ref elements) if elements.len() == 1));
    assert!(matches!(
        types[4].kind,
        TypeKind::FunctionPointer { ref parameters, return_type: Some(_) } if parameters.len() == 1
    ));
    assert_eq!(types[5].kind, TypeKind::Never);
    assert_eq!(types[6].to_string(), "&&Foo");

    let TypeKind::Scoped(path) = &types[7].kind else {
        panic!("expected scoped type");
    };
    assert_eq!(path.segments.len(), 3);
    assert_eq!(path.segments[1].type_arguments.len(), 1);

    assert!(matches!(types[8].kind, TypeKind::Tuple(ref elements) if elements.is_empty()));
}

#[test]
fn test_nested_generic_types() {
    let block = body("let x: Vec<Vec<u8>> = y; let z: Vec<u8>= w;");

    let StmtKind::Let(declaration) = &block.statements[0].kind else {
        panic!("expected let");
    };
    let ty = declaration.ty.as_ref().unwrap();
    assert_eq!(ty.to_string(), "Vec<Vec<u8>>");
    assert!(matches!(ty.kind, TypeKind::Generic { .. }));

    // `>=` gives up its `>` and leaves the `=` for the initializer
    let StmtKind::Let(declaration) = &block.statements[1].kind else {
        panic!("expected let");
    };
    assert_eq!(declaration.ty.as_ref().unwrap().to_string(), "Vec<u8>");
    assert!(declaration.value.is_some());
}

#[test]
fn test_expected_type_error() {
    let error = parse_str("fn f(a: 5) {}").unwrap_err();
    assert_eq!(
        error.get_inner(),
        &ErrorImpl::UnexpectedToken {
            token: "5".to_string(),
            expected: "type".to_string(),
        }
    );
}

#[test]
fn test_parse_items() {
    let file = parse_str(
        "fn id<T>(x: T) -> T { x }
         extern fn puts(s: &u8) -> i32;
         struct Pair<A, B,> { a: A, b: B, }
         struct Unit {}
         enum Color { Red, Green, Blue, }
         impl Pair { fn new() -> Pair { Pair {} } extern fn raw(); use a::b; }",
    )
    .unwrap();

    assert_eq!(file.items.len(), 6);
    assert_eq!(file.name, "test.alu");

    let ItemKind::Function(function) = &file.items[0].kind else {
        panic!("expected function");
    };
    assert_eq!(function.generics[0].name, "T");
    assert!(function.return_type.is_some());
    assert!(function.body.has_trailing_expression());

    assert!(matches!(file.items[1].kind, ItemKind::ExternFunction(_)));

    let ItemKind::Struct(definition) = &file.items[2].kind else {
        panic!("expected struct");
    };
    assert_eq!(definition.generics.len(), 2);
    assert_eq!(definition.fields.len(), 2);

    assert!(matches!(&file.items[3].kind, ItemKind::Struct(d) if d.fields.is_empty()));
    assert!(matches!(&file.items[4].kind, ItemKind::Enum(d) if d.items.len() == 3));
    assert!(matches!(&file.items[5].kind, ItemKind::Impl(block) if block.items.len() == 3));
}

#[test]
fn test_impl_items_are_restricted() {
    let error = parse_str("impl Foo { struct Bar {} }").unwrap_err();
    assert!(matches!(
        error.get_inner(),
        ErrorImpl::UnexpectedToken { token, .. } if token == "struct"
    ));
}

#[test]
fn test_nested_mods() {
    let file = parse_str("mod a { mod b<T> { fn c() {} } struct D {} }").unwrap();

    let ItemKind::Mod(outer) = &file.items[0].kind else {
        panic!("expected mod");
    };
    assert_eq!(outer.name.name, "a");
    assert_eq!(outer.items.len(), 2);

    let ItemKind::Mod(inner) = &outer.items[0].kind else {
        panic!("expected nested mod");
    };
    assert_eq!(inner.generics.len(), 1);
    assert!(matches!(inner.items[0].kind, ItemKind::Function(_)));
}

#[test]
fn test_use_scoped_list() {
    let file = parse_str("use a::{b, c as d};").unwrap();
    let ItemKind::Use(declaration) = &file.items[0].kind else {
        panic!("expected use");
    };
    let UseClause::ScopedList { path, list } = &declaration.clause else {
        panic!("expected scoped use list");
    };

    assert_eq!(path.as_ref().map(|p| p.to_string()), Some("a".to_string()));
    assert!(matches!(&list[0], UseClause::Path(path) if path.to_string() == "b"));
    assert!(matches!(
        &list[1],
        UseClause::Alias { path, alias } if path.to_string() == "c" && alias.name == "d"
    ));
}

#[test]
fn test_use_clause_forms() {
    let file = parse_str("use ::{a}; use {a, b::c}; use super::x; use crate::m::{n::{o}};").unwrap();
    let clauses: Vec<&UseClause> = file
        .items
        .iter()
        .map(|item| match &item.kind {
            ItemKind::Use(declaration) => &declaration.clause,
            other => panic!("expected use, got {:?}", other),
        })
        .collect();

    assert!(matches!(clauses[0], UseClause::ScopedList { path: None, .. }));
    assert!(matches!(clauses[1], UseClause::List(list) if list.len() == 2));
    assert!(matches!(clauses[2], UseClause::Path(path) if path.segments[0].kind == PathSegmentKind::Super));
    assert!(matches!(
        clauses[3],
        UseClause::ScopedList { list, .. } if matches!(list[0], UseClause::ScopedList { .. })
    ));
}

#[test]
fn test_attributes() {
    let file = parse_str("#[export, inline,] fn f() {} #[packed] struct S {}").unwrap();

    let attribute = file.items[0].attribute.as_ref().unwrap();
    assert_eq!(attribute.flags.len(), 2);
    assert!(attribute.has("inline"));
    assert_eq!(file.items[0].span.start.offset, 0);

    assert!(file.items[1].attribute.as_ref().unwrap().has("packed"));

    let error = parse_str("#[export] use a;").unwrap_err();
    assert!(matches!(error.get_inner(), ErrorImpl::UnexpectedTokenDetailed { .. }));
}

#[test]
fn test_missing_struct_name_position() {
    let error = parse_str("struct { }").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(error.get_span().start.offset, 7);
    assert_eq!(error.get_span().start.column, 8);
    assert_eq!(
        error.get_inner(),
        &ErrorImpl::UnexpectedToken {
            token: "{".to_string(),
            expected: "identifier".to_string(),
        }
    );
}

#[test]
fn test_unclosed_block() {
    let error = parse_str("fn f() {").unwrap_err();
    assert!(matches!(
        error.get_inner(),
        ErrorImpl::UnexpectedToken { token, .. } if token == "end of input"
    ));
}

#[test]
fn test_moderate_nesting_parses() {
    let source = format!("{}x{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(name(&expr(&source)), "x");
}

#[test]
fn test_deep_nesting_is_an_error() {
    let sources = [
        format!("fn f() {{ {}x{} }}", "(".repeat(10_000), ")".repeat(10_000)),
        format!("fn f() {}{}", "{".repeat(10_000), "}".repeat(10_000)),
        format!("fn f(x: {}u8{}) {{}}", "[".repeat(10_000), "]".repeat(10_000)),
        format!("{}{}", "mod m { ".repeat(10_000), "}".repeat(10_000)),
    ];

    for source in &sources {
        let error = parse_str(source).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert!(matches!(
            error.get_inner(),
            ErrorImpl::UnexpectedTokenDetailed { message, .. } if message.contains("nesting")
        ));
    }
}

#[test]
fn test_block_ids_are_unique() {
    let file = parse_str("fn a() { { } } fn b() {}").unwrap();
    let bodies: Vec<&Block> = file
        .items
        .iter()
        .filter_map(|item| match &item.kind {
            ItemKind::Function(function) => Some(&function.body),
            _ => None,
        })
        .collect();

    // `{ }` right before the closing brace is the body's trailing value
    let Some(ExprKind::Block(inner)) = bodies[0].trailing.as_deref().map(|e| &e.kind) else {
        panic!("expected nested block");
    };

    assert_ne!(bodies[0].id, inner.id);
    assert_ne!(bodies[0].id, bodies[1].id);
    assert_ne!(inner.id, bodies[1].id);
}

#[test]
fn test_expression_spans() {
    let source = "fn f() { 1 + 2 }";
    let file = parse_str(source).unwrap();
    let ItemKind::Function(function) = &file.items[0].kind else {
        panic!("expected function");
    };

    let trailing = function.body.trailing.as_ref().unwrap();
    assert_eq!(trailing.span.start.offset, 9);
    assert_eq!(trailing.span.end.offset, 14);
    assert_eq!(function.body.span.start.offset, 7);
    assert_eq!(function.body.span.end.offset as usize, source.len());
    assert_eq!(file.items[0].span.start.offset, 0);
}
