//! Type expressions in the AST.
//!
//! This module defines the syntactic forms a type annotation can take:
//!
//! - Primitive types (fixed-width integers, floats, `bool`)
//! - Named and path types, with or without generic arguments
//! - Pointers, slices, arrays and tuples
//! - Function pointers and the never type `!`
//!
//! Types here are purely syntactic. Nothing is resolved; `Foo` and
//! `a::Foo` are only names until a later stage looks them up.

use std::fmt::{self, Display};

use crate::Span;

use super::{
    ast::{write_comma_separated, Path},
    expressions::IntegerLiteral,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    U128,
    I128,
    Isize,
    Usize,
    F32,
    F64,
    Bool,
}

impl PrimitiveType {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "u8" => PrimitiveType::U8,
            "i8" => PrimitiveType::I8,
            "u16" => PrimitiveType::U16,
            "i16" => PrimitiveType::I16,
            "u32" => PrimitiveType::U32,
            "i32" => PrimitiveType::I32,
            "u64" => PrimitiveType::U64,
            "i64" => PrimitiveType::I64,
            "u128" => PrimitiveType::U128,
            "i128" => PrimitiveType::I128,
            "isize" => PrimitiveType::Isize,
            "usize" => PrimitiveType::Usize,
            "f32" => PrimitiveType::F32,
            "f64" => PrimitiveType::F64,
            "bool" => PrimitiveType::Bool,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::U8 => "u8",
            PrimitiveType::I8 => "i8",
            PrimitiveType::U16 => "u16",
            PrimitiveType::I16 => "i16",
            PrimitiveType::U32 => "u32",
            PrimitiveType::I32 => "i32",
            PrimitiveType::U64 => "u64",
            PrimitiveType::I64 => "i64",
            PrimitiveType::U128 => "u128",
            PrimitiveType::I128 => "i128",
            PrimitiveType::Isize => "isize",
            PrimitiveType::Usize => "usize",
            PrimitiveType::F32 => "f32",
            PrimitiveType::F64 => "f64",
            PrimitiveType::Bool => "bool",
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(
            self,
            PrimitiveType::F32 | PrimitiveType::F64 | PrimitiveType::Bool
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, PrimitiveType::F32 | PrimitiveType::F64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Primitive(PrimitiveType),
    Identifier(String),
    Scoped(Path),
    /// `Base<A, B>`
    Generic {
        base: Box<Type>,
        arguments: Vec<Type>,
    },
    /// `&T`
    Pointer(Box<Type>),
    /// `[T]`
    Slice(Box<Type>),
    /// `[T; N]`
    Array {
        element: Box<Type>,
        size: IntegerLiteral,
    },
    /// `(A, B)`; `(A)` stays a one-element tuple.
    Tuple(Vec<Type>),
    /// `fn(A, B) -> R`
    FunctionPointer {
        parameters: Vec<Type>,
        return_type: Option<Box<Type>>,
    },
    Never,
}

impl Type {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        Type { kind, span }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Primitive(primitive) => write!(f, "{}", primitive.as_str()),
            TypeKind::Identifier(name) => write!(f, "{}", name),
            TypeKind::Scoped(path) => write!(f, "{}", path),
            TypeKind::Generic { base, arguments } => {
                write!(f, "{}<", base)?;
                write_comma_separated(f, arguments)?;
                write!(f, ">")
            }
            TypeKind::Pointer(inner) => write!(f, "&{}", inner),
            TypeKind::Slice(inner) => write!(f, "[{}]", inner),
            TypeKind::Array { element, size } => write!(f, "[{}; {}]", element, size),
            TypeKind::Tuple(elements) => {
                write!(f, "(")?;
                write_comma_separated(f, elements)?;
                if elements.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            TypeKind::FunctionPointer {
                parameters,
                return_type,
            } => {
                write!(f, "fn(")?;
                write_comma_separated(f, parameters)?;
                write!(f, ")")?;
                match return_type {
                    Some(return_type) => write!(f, " -> {}", return_type),
                    None => Ok(()),
                }
            }
            TypeKind::Never => write!(f, "!"),
        }
    }
}
