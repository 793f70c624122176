//! Helpers shared by every production that reads a `::`-separated path.

use crate::{
    ast::ast::{Ident, PathSegment, PathSegmentKind},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

/// Reads the first segment of a path.
///
/// A leading `::` produces an empty `Root` segment and is left in place for
/// the caller's separator loop; it must be followed by an identifier.
pub fn parse_first_segment(parser: &mut Parser) -> Result<PathSegment, Error> {
    let token = parser.current_token().clone();
    let kind = match token.kind {
        TokenKind::PathSep => {
            if parser.peek_kind(1) != TokenKind::Identifier {
                parser.advance();
                return Err(parser.unexpected("identifier"));
            }
            let start = token.span.start;
            return Ok(PathSegment::new(PathSegmentKind::Root, Span::new(start, start)));
        }
        TokenKind::Identifier => PathSegmentKind::Ident(token.value.clone()),
        TokenKind::Super => PathSegmentKind::Super,
        TokenKind::Crate => PathSegmentKind::Crate,
        _ => return Err(parser.unexpected("path")),
    };
    parser.advance();
    Ok(PathSegment::new(kind, token.span))
}

/// Consumes an identifier token into an [`Ident`].
pub fn parse_ident(parser: &mut Parser) -> Result<Ident, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(Ident {
        name: token.value,
        span: token.span,
    })
}

/// Consumes `:: identifier` and returns the new segment.
pub fn parse_next_segment(parser: &mut Parser) -> Result<PathSegment, Error> {
    parser.expect(TokenKind::PathSep)?;
    let ident = parse_ident(parser)?;
    Ok(PathSegment::new(PathSegmentKind::Ident(ident.name), ident.span))
}

pub fn segments_span(segments: &[PathSegment]) -> Span {
    match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => first.span.to(&last.span),
        _ => Span::null(),
    }
}
