//! Item parsing: everything that can appear at the top level of a file, in
//! a `mod` body or in an `impl` block.
//!
//! Each item is introduced by its keyword, optionally preceded by a single
//! `#[flag, ...]` attribute, and dispatched through the item lookup table.

use crate::{
    ast::{
        ast::{Attribute, Ident, Path},
        items::{
            EnumDefinition, EnumItem, ExternFunctionDeclaration, FunctionDefinition, ImplBlock,
            Item, ItemKind, ModDefinition, Parameter, StructDefinition, StructField, UseClause,
            UseDeclaration,
        },
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    parser::Parser,
    path::{parse_first_segment, parse_ident, parse_next_segment, segments_span},
    stmt::parse_block,
    types::parse_type,
};

const TOP_LEVEL_ITEMS: [TokenKind; 7] = [
    TokenKind::Use,
    TokenKind::Fn,
    TokenKind::Extern,
    TokenKind::Struct,
    TokenKind::Enum,
    TokenKind::Impl,
    TokenKind::Mod,
];

const IMPL_ITEMS: [TokenKind; 3] = [TokenKind::Use, TokenKind::Fn, TokenKind::Extern];

pub fn parse_item(parser: &mut Parser) -> Result<Item, Error> {
    parse_item_of(parser, &TOP_LEVEL_ITEMS, "item")
}

fn parse_impl_member(parser: &mut Parser) -> Result<Item, Error> {
    parse_item_of(parser, &IMPL_ITEMS, "`use`, `fn` or `extern fn`")
}

fn parse_item_of(parser: &mut Parser, allowed: &[TokenKind], expected: &str) -> Result<Item, Error> {
    let attribute = parse_attribute(parser)?;
    let token_kind = parser.current_token_kind();

    if attribute.is_some() && token_kind == TokenKind::Use {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().to_string(),
                message: String::from("attributes are not allowed on `use` declarations"),
            },
            parser.current_token().span,
        ));
    }

    let handler = match parser.get_item_lookup().get(&token_kind) {
        Some(handler) if allowed.contains(&token_kind) => *handler,
        _ => return Err(parser.unexpected(expected)),
    };

    let item = parser.nested(|parser| handler(parser, attribute))?;
    tracing::debug!(
        kind = ?token_kind,
        name = item.name().map(|name| name.name.as_str()).unwrap_or_default(),
        "parsed item"
    );

    Ok(item)
}

/// `#[ident (, ident)* ,?]`
fn parse_attribute(parser: &mut Parser) -> Result<Option<Attribute>, Error> {
    if parser.current_token_kind() != TokenKind::Hash {
        return Ok(None);
    }

    let start = parser.advance().span.start;
    parser.expect(TokenKind::OpenBracket)?;

    let mut flags = vec![parse_ident(parser)?];
    while parser.eat(TokenKind::Comma) {
        if parser.current_token_kind() == TokenKind::CloseBracket {
            break;
        }
        flags.push(parse_ident(parser)?);
    }

    parser.expect(TokenKind::CloseBracket)?;

    Ok(Some(Attribute {
        flags,
        span: parser.span_from(start),
    }))
}

fn item_start(parser: &Parser, attribute: &Option<Attribute>) -> Position {
    match attribute {
        Some(attribute) => attribute.span.start,
        None => parser.current_token().span.start,
    }
}

fn finish_item(parser: &Parser, kind: ItemKind, attribute: Option<Attribute>, start: Position) -> Item {
    Item {
        kind,
        attribute,
        span: parser.span_from(start),
    }
}

/// Declaration generics: `<T, U,>`, plain identifiers only.
fn parse_generic_parameters(parser: &mut Parser) -> Result<Vec<Ident>, Error> {
    if !parser.eat(TokenKind::Less) {
        return Ok(vec![]);
    }

    let mut generics = vec![];
    while parser.current_token_kind() == TokenKind::Identifier {
        generics.push(parse_ident(parser)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect_closing_angle()?;
    Ok(generics)
}

/// `( name: Type, ... )`
fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let name = parse_ident(parser)?;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser)?;

        parameters.push(Parameter {
            span: name.span.to(&ty.span),
            name,
            ty,
        });

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(parameters)
}

fn parse_return_type(parser: &mut Parser) -> Result<Option<Type>, Error> {
    if parser.eat(TokenKind::Arrow) {
        Ok(Some(parse_type(parser)?))
    } else {
        Ok(None)
    }
}

/// Items between `{` and `}`, for `mod` and `impl` bodies.
fn parse_item_body(
    parser: &mut Parser,
    member: fn(&mut Parser) -> Result<Item, Error>,
) -> Result<Vec<Item>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut items = vec![];
    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly => break,
            TokenKind::EOF => return Err(parser.unexpected("`}`")),
            _ => items.push(member(parser)?),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(items)
}

pub fn parse_fn_item(parser: &mut Parser, attribute: Option<Attribute>) -> Result<Item, Error> {
    let start = item_start(parser, &attribute);
    parser.expect(TokenKind::Fn)?;

    let name = parse_ident(parser)?;
    let generics = parse_generic_parameters(parser)?;
    let parameters = parse_parameters(parser)?;
    let return_type = parse_return_type(parser)?;
    let body = parse_block(parser)?;

    let kind = ItemKind::Function(FunctionDefinition {
        name,
        generics,
        parameters,
        return_type,
        body,
    });
    Ok(finish_item(parser, kind, attribute, start))
}

pub fn parse_extern_fn_item(parser: &mut Parser, attribute: Option<Attribute>) -> Result<Item, Error> {
    let start = item_start(parser, &attribute);
    parser.expect(TokenKind::Extern)?;
    parser.expect(TokenKind::Fn)?;

    let name = parse_ident(parser)?;
    let parameters = parse_parameters(parser)?;
    let return_type = parse_return_type(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    let kind = ItemKind::ExternFunction(ExternFunctionDeclaration {
        name,
        parameters,
        return_type,
    });
    Ok(finish_item(parser, kind, attribute, start))
}

pub fn parse_struct_item(parser: &mut Parser, attribute: Option<Attribute>) -> Result<Item, Error> {
    let start = item_start(parser, &attribute);
    parser.expect(TokenKind::Struct)?;

    let name = parse_ident(parser)?;
    let generics = parse_generic_parameters(parser)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut fields = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let field_name = parse_ident(parser)?;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser)?;

        fields.push(StructField {
            span: field_name.span.to(&ty.span),
            name: field_name,
            ty,
        });

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    let kind = ItemKind::Struct(StructDefinition {
        name,
        generics,
        fields,
    });
    Ok(finish_item(parser, kind, attribute, start))
}

pub fn parse_enum_item(parser: &mut Parser, attribute: Option<Attribute>) -> Result<Item, Error> {
    let start = item_start(parser, &attribute);
    parser.expect(TokenKind::Enum)?;

    let name = parse_ident(parser)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut items = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        items.push(EnumItem {
            name: parse_ident(parser)?,
        });
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    let kind = ItemKind::Enum(EnumDefinition { name, items });
    Ok(finish_item(parser, kind, attribute, start))
}

pub fn parse_impl_item(parser: &mut Parser, attribute: Option<Attribute>) -> Result<Item, Error> {
    let start = item_start(parser, &attribute);
    parser.expect(TokenKind::Impl)?;

    let name = parse_ident(parser)?;
    let items = parse_item_body(parser, parse_impl_member)?;

    let kind = ItemKind::Impl(ImplBlock { name, items });
    Ok(finish_item(parser, kind, attribute, start))
}

pub fn parse_mod_item(parser: &mut Parser, attribute: Option<Attribute>) -> Result<Item, Error> {
    let start = item_start(parser, &attribute);
    parser.expect(TokenKind::Mod)?;

    let name = parse_ident(parser)?;
    let generics = parse_generic_parameters(parser)?;
    let items = parse_item_body(parser, parse_item)?;

    let kind = ItemKind::Mod(ModDefinition {
        name,
        generics,
        items,
    });
    Ok(finish_item(parser, kind, attribute, start))
}

/// `use clause ;`
pub fn parse_use_item(parser: &mut Parser, attribute: Option<Attribute>) -> Result<Item, Error> {
    let start = item_start(parser, &attribute);
    parser.expect(TokenKind::Use)?;

    let clause = parse_use_clause(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    let kind = ItemKind::Use(UseDeclaration { clause });
    Ok(finish_item(parser, kind, attribute, start))
}

fn parse_use_clause(parser: &mut Parser) -> Result<UseClause, Error> {
    match parser.current_token_kind() {
        TokenKind::OpenCurly => return Ok(UseClause::List(parse_use_list(parser)?)),
        TokenKind::PathSep if parser.peek_kind(1) == TokenKind::OpenCurly => {
            parser.advance();
            return Ok(UseClause::ScopedList {
                path: None,
                list: parse_use_list(parser)?,
            });
        }
        _ => {}
    }

    let mut segments = vec![parse_first_segment(parser)?];
    while parser.current_token_kind() == TokenKind::PathSep {
        if parser.peek_kind(1) == TokenKind::OpenCurly {
            parser.advance();
            let span = segments_span(&segments);
            return Ok(UseClause::ScopedList {
                path: Some(Path { segments, span }),
                list: parse_use_list(parser)?,
            });
        }
        segments.push(parse_next_segment(parser)?);
    }

    let span = segments_span(&segments);
    let path = Path { segments, span };

    if parser.eat(TokenKind::As) {
        let alias = parse_ident(parser)?;
        return Ok(UseClause::Alias { path, alias });
    }

    Ok(UseClause::Path(path))
}

/// `{ clause, ... }`
fn parse_use_list(parser: &mut Parser) -> Result<Vec<UseClause>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut list = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        list.push(parser.nested(parse_use_clause)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(list)
}
