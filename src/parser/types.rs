//! Type parsing implementation.
//!
//! This module handles parsing of type annotations and type expressions.
//! It supports:
//!
//! - Primitive, named and scoped types (`u8`, `Foo`, `a::b::Foo`)
//! - Generic types (`Foo<A, B>`, `a::Foo<T>::Inner`)
//! - Pointer, slice and array types (`&T`, `[T]`, `[T; 4]`)
//! - Tuple types (`(A, B)`, `(A)`, `()`)
//! - Function pointer types (`fn(A, B) -> R`)
//! - The never type `!`
//!
//! Similar to expression parsing, each form is dispatched through a NUD
//! lookup keyed on the first token of the type.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Path, PathSegment, PathSegmentKind},
        expressions::IntegerLiteral,
        types::{PrimitiveType, Type, TypeKind},
    },
    errors::errors::Error,
    lexer::tokens::{is_primitive_type, TokenKind},
    Position, Span,
};

use super::{
    parser::Parser,
    path::{parse_first_segment, parse_next_segment, segments_span},
};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Type, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_path_type);
    parser.type_nud(TokenKind::Super, parse_path_type);
    parser.type_nud(TokenKind::Crate, parse_path_type);
    parser.type_nud(TokenKind::PathSep, parse_path_type);
    parser.type_nud(TokenKind::Ampersand, parse_pointer_type);
    parser.type_nud(TokenKind::And, parse_pointer_type);
    parser.type_nud(TokenKind::OpenBracket, parse_slice_or_array_type);
    parser.type_nud(TokenKind::OpenParen, parse_tuple_type);
    parser.type_nud(TokenKind::Fn, parse_function_pointer_type);
    parser.type_nud(TokenKind::Not, parse_never_type);
}

pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let token_kind = parser.current_token_kind();
    let handler = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected("type")),
    };

    parser.nested(handler)
}

fn is_closing_angle(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Greater
            | TokenKind::GreaterEquals
            | TokenKind::ShiftRight
            | TokenKind::ShiftRightEquals
    )
}

/// `< Type (, Type)* ,? >`, used both for generic types and turbofish.
pub fn parse_type_arguments(parser: &mut Parser) -> Result<Vec<Type>, Error> {
    parser.expect(TokenKind::Less)?;

    let mut arguments = vec![];
    loop {
        arguments.push(parse_type(parser)?);
        if !parser.eat(TokenKind::Comma) || is_closing_angle(parser.current_token_kind()) {
            break;
        }
    }

    parser.expect_closing_angle()?;
    Ok(arguments)
}

/// Reads types separated by commas up to and including `closing`.
fn parse_type_list(parser: &mut Parser, closing: TokenKind) -> Result<Vec<Type>, Error> {
    let mut types = vec![];
    while parser.current_token_kind() != closing {
        types.push(parse_type(parser)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(closing)?;
    Ok(types)
}

/// Builds the type named by a path without generic arguments of its own.
pub fn path_to_type(segments: Vec<PathSegment>) -> Type {
    let span = segments_span(&segments);

    if let [segment] = segments.as_slice() {
        if let (PathSegmentKind::Ident(name), true) =
            (&segment.kind, segment.type_arguments.is_empty())
        {
            let kind = match PrimitiveType::from_name(name) {
                Some(primitive) => TypeKind::Primitive(primitive),
                None => TypeKind::Identifier(name.clone()),
            };
            return Type::new(kind, span);
        }
    }

    Type::new(TypeKind::Scoped(Path { segments, span }), span)
}

fn is_lone_primitive(segments: &[PathSegment]) -> bool {
    match segments {
        [segment] => segment.name().is_some_and(is_primitive_type),
        _ => false,
    }
}

pub fn parse_path_type(parser: &mut Parser) -> Result<Type, Error> {
    let mut segments = vec![parse_first_segment(parser)?];

    loop {
        match parser.current_token_kind() {
            TokenKind::PathSep if parser.peek_kind(1) == TokenKind::Less => {
                parser.advance();
            }
            TokenKind::PathSep => {
                segments.push(parse_next_segment(parser)?);
                continue;
            }
            // `u8 < x` after a cast stays a comparison.
            TokenKind::Less if !is_lone_primitive(&segments) => {}
            _ => break,
        }

        let arguments = parse_type_arguments(parser)?;

        // Arguments on an inner segment: `a::Foo<T>::Inner`.
        if parser.current_token_kind() == TokenKind::PathSep
            && parser.peek_kind(1) == TokenKind::Identifier
        {
            if let Some(last) = segments.last_mut() {
                last.type_arguments = arguments;
            }
            continue;
        }

        let base = path_to_type(segments);
        let span = parser.span_from(base.span.start);
        return Ok(Type::new(
            TypeKind::Generic {
                base: Box::new(base),
                arguments,
            },
            span,
        ));
    }

    Ok(path_to_type(segments))
}

pub fn parse_pointer_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.advance().clone();
    let inner = parse_type(parser)?;
    let end = inner.span.end;

    // `&&T` is lexed as a single token.
    let inner = if token.kind == TokenKind::And {
        let start = Position::new(
            token.span.start.offset + 1,
            token.span.start.line,
            token.span.start.column + 1,
        );
        Type::new(TypeKind::Pointer(Box::new(inner)), Span::new(start, end))
    } else {
        inner
    };

    Ok(Type::new(
        TypeKind::Pointer(Box::new(inner)),
        Span::new(token.span.start, end),
    ))
}

pub fn parse_slice_or_array_type(parser: &mut Parser) -> Result<Type, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span.start;
    let element = Box::new(parse_type(parser)?);

    if parser.eat(TokenKind::Semicolon) {
        let size = parser.expect(TokenKind::Integer)?;
        parser.expect(TokenKind::CloseBracket)?;

        return Ok(Type::new(
            TypeKind::Array {
                element,
                size: IntegerLiteral {
                    value: size.value,
                    suffix: size.suffix,
                },
            },
            parser.span_from(start),
        ));
    }

    parser.expect(TokenKind::CloseBracket)?;
    Ok(Type::new(TypeKind::Slice(element), parser.span_from(start)))
}

pub fn parse_tuple_type(parser: &mut Parser) -> Result<Type, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;
    let elements = parse_type_list(parser, TokenKind::CloseParen)?;

    Ok(Type::new(TypeKind::Tuple(elements), parser.span_from(start)))
}

pub fn parse_function_pointer_type(parser: &mut Parser) -> Result<Type, Error> {
    let start = parser.expect(TokenKind::Fn)?.span.start;
    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_type_list(parser, TokenKind::CloseParen)?;

    let return_type = if parser.eat(TokenKind::Arrow) {
        Some(Box::new(parse_type(parser)?))
    } else {
        None
    };

    Ok(Type::new(
        TypeKind::FunctionPointer {
            parameters,
            return_type,
        },
        parser.span_from(start),
    ))
}

pub fn parse_never_type(parser: &mut Parser) -> Result<Type, Error> {
    let span = parser.expect(TokenKind::Not)?.span;
    Ok(Type::new(TypeKind::Never, span))
}
