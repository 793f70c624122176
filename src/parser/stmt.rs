use crate::{
    ast::{
        ast::Ident,
        statements::{Block, LocalDeclaration, Stmt, StmtKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{
        expr::{is_block_like_start, parse_block_like_expr, parse_expr},
        lookups::BindingPower,
    },
    Span,
};

use super::{parser::Parser, types::parse_type};

/// `{ statement* expression? }`
///
/// An expression directly before the closing `}` becomes the trailing
/// expression. Any other expression needs a `;` unless it ends in a block.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    parser.nested(parse_block_at_depth)
}

fn parse_block_at_depth(parser: &mut Parser) -> Result<Block, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;
    let id = parser.advance_id();

    let mut statements = vec![];
    let mut trailing = None;

    loop {
        let token_kind = parser.current_token_kind();
        match token_kind {
            TokenKind::CloseCurly => break,
            TokenKind::EOF => return Err(parser.unexpected("`}`")),
            _ => {}
        }

        if let Some(handler) = parser.get_stmt_lookup().get(&token_kind).copied() {
            statements.push(handler(parser)?);
            continue;
        }

        let block_like = is_block_like_start(token_kind);
        let expression = if block_like {
            parse_block_like_expr(parser)?
        } else {
            parse_expr(parser, BindingPower::Default)?
        };

        if parser.current_token_kind() == TokenKind::CloseCurly {
            trailing = Some(Box::new(expression));
            break;
        }

        let terminated = parser.eat(TokenKind::Semicolon);
        if !terminated && !block_like {
            return Err(parser.unexpected("`;` or `}`"));
        }

        let span = parser.span_from(expression.span.start);
        statements.push(Stmt::new(
            StmtKind::Expression {
                expression,
                terminated,
            },
            span,
        ));
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Block {
        statements,
        trailing,
        id,
        span: parser.span_from(start),
    })
}

fn parse_local_declaration(
    parser: &mut Parser,
    keyword: TokenKind,
) -> Result<(LocalDeclaration, Span), Error> {
    let start = parser.expect(keyword)?.span.start;

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().to_string(),
            message: format!("expected identifier after `{}`", keyword_text(keyword)),
        },
        parser.current_token().span,
    );
    let token = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let name = Ident {
        name: token.value,
        span: token.span,
    };

    let ty = if parser.eat(TokenKind::Colon) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let value = if parser.eat(TokenKind::Assignment) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok((LocalDeclaration { name, ty, value }, parser.span_from(start)))
}

fn keyword_text(keyword: TokenKind) -> &'static str {
    match keyword {
        TokenKind::Const => "const",
        _ => "let",
    }
}

/// `let name (: Type)? (= expr)? ;`
pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let (declaration, span) = parse_local_declaration(parser, TokenKind::Let)?;
    Ok(Stmt::new(StmtKind::Let(declaration), span))
}

/// `const name (: Type)? (= expr)? ;`
pub fn parse_const_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let (declaration, span) = parse_local_declaration(parser, TokenKind::Const)?;
    Ok(Stmt::new(StmtKind::Const(declaration), span))
}

pub fn parse_empty_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.expect(TokenKind::Semicolon)?.span;
    Ok(Stmt::new(StmtKind::Empty, span))
}
