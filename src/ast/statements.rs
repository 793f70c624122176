use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Ident, NodeId},
    expressions::Expr,
    types::Type,
};

/// `{ statements... trailing? }`
///
/// Whether the block's value is the trailing expression or unit is left to
/// semantic analysis; the parser only records which one was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub trailing: Option<Box<Expr>>,
    pub id: NodeId,
    pub span: Span,
}

impl Block {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn has_trailing_expression(&self) -> bool {
        self.trailing.is_some()
    }
}

/// Shape shared by `let` and `const`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalDeclaration {
    pub name: Ident,
    pub ty: Option<Type>,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Let(LocalDeclaration),
    Const(LocalDeclaration),
    /// A lone `;`.
    Empty,
    /// `terminated` is false only for block-like expressions written
    /// without a trailing `;`.
    Expression { expression: Expr, terminated: bool },
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }
}
