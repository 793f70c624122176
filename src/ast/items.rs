//! Items: the declarations that make up a source file, an `impl` block or
//! a `mod` body.

use crate::Span;

use super::{
    ast::{Attribute, Ident, Path},
    statements::Block,
    types::Type,
};

/// Root of a parsed file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub name: String,
    pub items: Vec<Item>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub attribute: Option<Attribute>,
    pub span: Span,
}

impl Item {
    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// Declared name; `None` for `use` declarations.
    pub fn name(&self) -> Option<&Ident> {
        match &self.kind {
            ItemKind::Use(_) => None,
            ItemKind::Function(function) => Some(&function.name),
            ItemKind::ExternFunction(function) => Some(&function.name),
            ItemKind::Struct(definition) => Some(&definition.name),
            ItemKind::Enum(definition) => Some(&definition.name),
            ItemKind::Impl(block) => Some(&block.name),
            ItemKind::Mod(definition) => Some(&definition.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Use(UseDeclaration),
    Function(FunctionDefinition),
    ExternFunction(ExternFunctionDeclaration),
    Struct(StructDefinition),
    Enum(EnumDefinition),
    Impl(ImplBlock),
    Mod(ModDefinition),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Ident,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: Ident,
    pub generics: Vec<Ident>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternFunctionDeclaration {
    pub name: Ident,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: Ident,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDefinition {
    pub name: Ident,
    pub generics: Vec<Ident>,
    pub fields: Vec<StructField>,
}

/// C-like enum variant: a name only.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumItem {
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDefinition {
    pub name: Ident,
    pub items: Vec<EnumItem>,
}

/// `impl Name { ... }`; items are limited to `use` and (extern) functions.
#[derive(Debug, Clone, PartialEq)]
pub struct ImplBlock {
    pub name: Ident,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModDefinition {
    pub name: Ident,
    pub generics: Vec<Ident>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseDeclaration {
    pub clause: UseClause,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UseClause {
    /// `a::b`
    Path(Path),
    /// `a::b as c`
    Alias { path: Path, alias: Ident },
    /// `{a, b::c}`
    List(Vec<UseClause>),
    /// `a::b::{c, d}`, or `::{c, d}` with no path.
    ScopedList {
        path: Option<Path>,
        list: Vec<UseClause>,
    },
}
