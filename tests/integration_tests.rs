//! Integration tests for the full front end.
//!
//! These tests drive the public API from source text through tokenization
//! and parsing, and check the diagnostics produced for broken input.

use alumina_syntax::{
    ast::{
        expressions::ExprKind,
        items::{ItemKind, SourceFile},
        statements::StmtKind,
    },
    errors::errors::ErrorKind,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parse_source, render_error,
};

const PROGRAM: &str = r#"
// Fixed-size stack of integers.
use std::mem::{size_of, zeroed as zero};

#[export]
extern fn malloc(size: usize) -> &u8;

struct Stack<T> {
    data: [T; 16],
    len: usize,
}

enum Status { Ok, Full, }

impl Stack {
    fn new() -> Stack<i32> {
        Stack::<i32> { data: zero::<[i32; 16]>(), len: 0 }
    }

    fn push(self: &Stack<i32>, value: i32) -> Status {
        if self.len >= 16 {
            return Status::Full;
        }
        (*self).data[self.len] = value;
        self.len += 1;
        Status::Ok
    }
}

mod tests {
    fn sum(n: u64) -> u64 {
        let total: u64 = 0;
        for 0, n, 1 {
            total = total + (n as u64) * 2;
        }
        loop { break_out(); }
        total
    }
}
"#;

fn parse_program() -> SourceFile {
    parse_source(PROGRAM, "stack.alu").unwrap()
}

#[test]
fn test_parse_complete_program() {
    let file = parse_program();

    assert_eq!(file.name, "stack.alu");
    assert_eq!(file.items.len(), 6);

    let names: Vec<Option<&str>> = file
        .items
        .iter()
        .map(|item| item.name().map(|name| name.name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![None, Some("malloc"), Some("Stack"), Some("Status"), Some("Stack"), Some("tests")]
    );
}

#[test]
fn test_program_attribute_and_extern() {
    let file = parse_program();
    let item = &file.items[1];

    assert!(item.attribute.as_ref().is_some_and(|a| a.has("export")));
    let ItemKind::ExternFunction(function) = &item.kind else {
        panic!("expected extern function");
    };
    assert_eq!(function.parameters.len(), 1);
    assert_eq!(function.return_type.as_ref().map(|t| t.to_string()), Some("&u8".to_string()));
}

#[test]
fn test_program_impl_methods() {
    let file = parse_program();
    let ItemKind::Impl(block) = &file.items[4].kind else {
        panic!("expected impl block");
    };
    assert_eq!(block.items.len(), 2);

    let ItemKind::Function(push) = &block.items[1].kind else {
        panic!("expected function");
    };
    // if, assignment, compound assignment; `Status::Ok` is the value
    assert_eq!(push.body.statements.len(), 3);
    assert!(matches!(
        push.body.trailing.as_deref().map(|e| &e.kind),
        Some(ExprKind::ScopedIdentifier(_))
    ));

    let StmtKind::Expression { expression, terminated } = &push.body.statements[0].kind else {
        panic!("expected expression statement");
    };
    assert!(!terminated);
    assert!(matches!(expression.kind, ExprKind::If(_)));
}

#[test]
fn test_program_generic_struct_expression() {
    let file = parse_program();
    let ItemKind::Impl(block) = &file.items[4].kind else {
        panic!("expected impl block");
    };
    let ItemKind::Function(new) = &block.items[0].kind else {
        panic!("expected function");
    };

    let Some(ExprKind::Struct { name, fields }) = new.body.trailing.as_deref().map(|e| &e.kind) else {
        panic!("expected struct expression");
    };
    assert_eq!(name.to_string(), "Stack<i32>");
    assert_eq!(fields.len(), 2);
    assert!(matches!(fields[0].value.kind, ExprKind::Call { .. }));
}

#[test]
fn test_tokenize_program() {
    let tokens = tokenize(PROGRAM).unwrap();

    assert_eq!(tokens.first().map(|t| t.kind), Some(TokenKind::Use));
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::EOF).count(), 1);
}

#[test]
fn test_lex_error_is_reported() {
    let source = "fn main() {\n    let s = \"open;\n}\n";
    let error = parse_source(source, "main.alu").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Lex);
    assert_eq!(error.get_span().start.line, 2);

    let rendered = render_error(&error, "main.alu", source);
    assert!(rendered.starts_with("Error: NewlineInString"));
    assert!(rendered.contains("-> main.alu:2:"));
}

#[test]
fn test_syntax_error_is_rendered() {
    let source = "fn main() {\n    let x = (1 + ;\n}\n";
    let error = parse_source(source, "main.alu").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(error.to_string(), "2:18: unexpected token \";\", expected expression");

    let rendered = render_error(&error, "main.alu", source);
    assert!(rendered.contains("-> main.alu:2:18"));
    assert!(rendered.contains("2 | let x = (1 + ;"));
}

#[test]
fn test_parsed_tree_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let file = parse_program();
    assert_send_sync(&file);

    let handle = std::thread::spawn(move || file.items.len());
    assert_eq!(handle.join().unwrap(), 6);
}

#[test]
fn test_empty_source() {
    let file = parse_source("  // nothing here\n", "empty.alu").unwrap();
    assert!(file.items.is_empty());
}
