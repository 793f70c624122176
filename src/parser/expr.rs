use crate::{
    ast::{
        ast::{Ident, Path, PathSegment, PathSegmentKind},
        expressions::{
            BinaryOperator, CompoundOperator, Expr, ExprKind, Field, FieldInitializer,
            FloatLiteral, IfExpr, IntegerLiteral, Literal, StringLiteral, UnaryOperator,
        },
        types::{Type, TypeKind},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Position, Span,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    path::{parse_first_segment, parse_ident, parse_next_segment, segments_span},
    stmt::parse_block,
    types::{parse_type, parse_type_arguments, path_to_type},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.nested(|parser| parse_expr_at_depth(parser, bp))
}

fn parse_expr_at_depth(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected("expression")),
    };

    let mut left = nud(parser)?;

    // While the current token binds tighter than `bp`, keep extending the lhs
    loop {
        let token_kind = parser.current_token_kind();
        let power = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if power <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(handler) => *handler,
            None => return Err(parser.unexpected("operator")),
        };
        left = led(parser, left, power)?;
    }

    Ok(left)
}

/// Parses an expression that ends in a block, without any operator after it.
///
/// At the start of a statement these stand alone: `if a {} *p = 1;` is two
/// statements, not a multiplication.
pub fn parse_block_like_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::OpenCurly => parse_block_expr(parser),
        TokenKind::If => parse_if_expr(parser),
        TokenKind::While => parse_while_expr(parser),
        TokenKind::Loop => parse_loop_expr(parser),
        TokenKind::For => parse_for_expr(parser),
        _ => Err(parser.unexpected("block")),
    }
}

pub fn is_block_like_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::OpenCurly | TokenKind::If | TokenKind::While | TokenKind::Loop | TokenKind::For
    )
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let literal = match token.kind {
        TokenKind::Integer => Literal::Integer(IntegerLiteral {
            value: token.value,
            suffix: token.suffix,
        }),
        TokenKind::Float => Literal::Float(FloatLiteral {
            value: token.value,
            suffix: token.suffix,
        }),
        TokenKind::String => Literal::String(StringLiteral { raw: token.value }),
        TokenKind::Boolean => Literal::Boolean(token.value == "true"),
        TokenKind::Null => Literal::Null,
        _ => return Err(parser.unexpected("literal")),
    };

    parser.advance();
    Ok(Expr::new(ExprKind::Literal(literal), token.span))
}

fn path_to_expr(segments: Vec<PathSegment>) -> Expr {
    let span = segments_span(&segments);

    if let [segment] = segments.as_slice() {
        if let (PathSegmentKind::Ident(name), true) =
            (&segment.kind, segment.type_arguments.is_empty())
        {
            return Expr::new(ExprKind::Identifier(name.clone()), span);
        }
    }

    Expr::new(ExprKind::ScopedIdentifier(Path { segments, span }), span)
}

/// `{` starts a struct expression only when followed by `}` or `name :`.
///
/// This narrows the grammar, which takes a struct literal after any path:
/// `if Foo { x }` reads `Foo` as the condition and `{ x }` as the body.
fn is_struct_initializer(parser: &Parser) -> bool {
    parser.current_token_kind() == TokenKind::OpenCurly
        && match parser.peek_kind(1) {
            TokenKind::CloseCurly => true,
            TokenKind::Identifier => parser.peek_kind(2) == TokenKind::Colon,
            _ => false,
        }
}

pub fn parse_path_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut segments = vec![parse_first_segment(parser)?];

    // Generic arguments are only read after `::`. A bare `<` following a path
    // is left for the binary operator table, so `a < b` is a comparison.
    while parser.current_token_kind() == TokenKind::PathSep {
        if parser.peek_kind(1) != TokenKind::Less {
            segments.push(parse_next_segment(parser)?);
            continue;
        }

        parser.advance();
        let type_arguments = parse_type_arguments(parser)?;

        // `Vec::<T>::new` keeps going as a path
        if parser.current_token_kind() == TokenKind::PathSep
            && parser.peek_kind(1) == TokenKind::Identifier
        {
            if let Some(last) = segments.last_mut() {
                last.type_arguments = type_arguments;
            }
            continue;
        }

        let span = parser.span_from(segments_span(&segments).start);
        if is_struct_initializer(parser) {
            let name = Type::new(
                TypeKind::Generic {
                    base: Box::new(path_to_type(segments)),
                    arguments: type_arguments,
                },
                span,
            );
            return parse_struct_expr(parser, name);
        }

        return Ok(Expr::new(
            ExprKind::GenericFunction {
                function: Box::new(path_to_expr(segments)),
                type_arguments,
            },
            span,
        ));
    }

    // Only `{}` and `{ name:` commit to a struct literal; any other `{` is
    // left for the enclosing production, usually a block.
    if is_struct_initializer(parser) {
        return parse_struct_expr(parser, path_to_type(segments));
    }

    Ok(path_to_expr(segments))
}

pub fn parse_struct_expr(parser: &mut Parser, name: Type) -> Result<Expr, Error> {
    let start = name.span.start;
    parser.expect(TokenKind::OpenCurly)?;

    let mut fields = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let field_name = parse_ident(parser)?;
        parser.expect(TokenKind::Colon)?;
        let value = parse_expr(parser, BindingPower::Default)?;

        fields.push(FieldInitializer {
            name: field_name,
            value,
        });

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::new(
        ExprKind::Struct { name, fields },
        parser.span_from(start),
    ))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let Some(operator) = BinaryOperator::from_token_kind(parser.current_token_kind()) else {
        return Err(parser.unexpected("binary operator"));
    };
    parser.advance();

    let right = parse_expr(parser, bp)?;
    let span = left.span.to(&right.span);

    Ok(Expr::new(
        ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let Some(operator) = UnaryOperator::from_token_kind(parser.current_token_kind()) else {
        return Err(parser.unexpected("unary operator"));
    };
    let start = parser.advance().span.start;

    let operand = parse_expr(parser, BindingPower::Unary)?;
    let span = Span::new(start, operand.span.end);

    Ok(Expr::new(
        ExprKind::Unary {
            operator,
            operand: Box::new(operand),
        },
        span,
    ))
}

pub fn parse_reference_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;
    let end = operand.span.end;

    // `&&x` is lexed as a single token.
    let operand = if token.kind == TokenKind::And {
        let start = Position::new(
            token.span.start.offset + 1,
            token.span.start.line,
            token.span.start.column + 1,
        );
        Expr::new(ExprKind::Reference(Box::new(operand)), Span::new(start, end))
    } else {
        operand
    };

    Ok(Expr::new(
        ExprKind::Reference(Box::new(operand)),
        Span::new(token.span.start, end),
    ))
}

pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::Assignment)?;

    // Recursing at `Default` makes `a = b = c` group as `a = (b = c)`
    let value = parse_expr(parser, BindingPower::Default)?;
    let span = left.span.to(&value.span);

    Ok(Expr::new(
        ExprKind::Assignment {
            target: Box::new(left),
            value: Box::new(value),
        },
        span,
    ))
}

pub fn parse_compound_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let Some(operator) = CompoundOperator::from_token_kind(parser.current_token_kind()) else {
        return Err(parser.unexpected("assignment operator"));
    };
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;
    let span = left.span.to(&value.span);

    Ok(Expr::new(
        ExprKind::CompoundAssignment {
            operator,
            target: Box::new(left),
            value: Box::new(value),
        },
        span,
    ))
}

pub fn parse_cast_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::As)?;
    let ty = parse_type(parser)?;
    let span = left.span.to(&ty.span);

    Ok(Expr::new(
        ExprKind::Cast {
            value: Box::new(left),
            ty,
        },
        span,
    ))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let span = parser.span_from(left.span.start);
    Ok(Expr::new(
        ExprKind::Call {
            callee: Box::new(left),
            arguments,
        },
        span,
    ))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    let span = parser.span_from(left.span.start);
    Ok(Expr::new(
        ExprKind::Index {
            receiver: Box::new(left),
            index: Box::new(index),
        },
        span,
    ))
}

fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn field_index(value: &str) -> Field {
    Field::Index(IntegerLiteral {
        value: value.to_string(),
        suffix: None,
    })
}

pub fn parse_field_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::Dot)?;

    let start = left.span.start;
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Identifier => {
            parser.advance();
            let access = Expr::new(
                ExprKind::FieldAccess {
                    receiver: Box::new(left),
                    field: Field::Named(Ident {
                        name: token.value,
                        span: token.span,
                    }),
                },
                parser.span_from(start),
            );

            // Method turbofish: `x.f::<T>()`
            if parser.current_token_kind() == TokenKind::PathSep
                && parser.peek_kind(1) == TokenKind::Less
            {
                parser.advance();
                let type_arguments = parse_type_arguments(parser)?;
                return Ok(Expr::new(
                    ExprKind::GenericFunction {
                        function: Box::new(access),
                        type_arguments,
                    },
                    parser.span_from(start),
                ));
            }

            Ok(access)
        }
        TokenKind::Integer if token.suffix.is_none() && is_decimal(&token.value) => {
            parser.advance();
            Ok(Expr::new(
                ExprKind::FieldAccess {
                    receiver: Box::new(left),
                    field: field_index(&token.value),
                },
                parser.span_from(start),
            ))
        }
        // `t.0.1` reaches us as `t` `.` `0.1`
        TokenKind::Float if token.suffix.is_none() => {
            let Some((first, second)) = token
                .value
                .split_once('.')
                .filter(|(first, second)| is_decimal(first) && is_decimal(second))
            else {
                return Err(parser.unexpected("field name"));
            };
            parser.advance();

            let width = first.len() as u32;
            let first_end = Position::new(
                token.span.start.offset + width,
                token.span.start.line,
                token.span.start.column + width,
            );
            let inner = Expr::new(
                ExprKind::FieldAccess {
                    receiver: Box::new(left),
                    field: field_index(first),
                },
                Span::new(start, first_end),
            );

            Ok(Expr::new(
                ExprKind::FieldAccess {
                    receiver: Box::new(inner),
                    field: field_index(second),
                },
                parser.span_from(start),
            ))
        }
        _ => Err(parser.unexpected("field name")),
    }
}

/// `(e)` is the inner expression; a comma anywhere makes a tuple.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;

    if parser.eat(TokenKind::CloseParen) {
        return Ok(Expr::new(ExprKind::Tuple(vec![]), parser.span_from(start)));
    }

    let first = parse_expr(parser, BindingPower::Default)?;
    if !parser.eat(TokenKind::Comma) {
        parser.expect(TokenKind::CloseParen)?;
        return Ok(first);
    }

    let mut elements = vec![first];
    while parser.current_token_kind() != TokenKind::CloseParen {
        elements.push(parse_expr(parser, BindingPower::Default)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(Expr::new(ExprKind::Tuple(elements), parser.span_from(start)))
}

pub fn parse_block_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let block = parse_block(parser)?;
    let span = block.span;
    Ok(Expr::new(ExprKind::Block(block), span))
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let consequence = parse_block(parser)?;

    let alternative = if parser.eat(TokenKind::Else) {
        let alternative = if parser.current_token_kind() == TokenKind::If {
            parser.nested(parse_if_expr)?
        } else {
            parse_block_expr(parser)?
        };
        Some(Box::new(alternative))
    } else {
        None
    };

    Ok(Expr::new(
        ExprKind::If(IfExpr {
            condition: Box::new(condition),
            consequence,
            alternative,
        }),
        parser.span_from(start),
    ))
}

pub fn parse_while_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;
    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Expr::new(
        ExprKind::While {
            condition: Box::new(condition),
            body,
        },
        parser.span_from(start),
    ))
}

pub fn parse_loop_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::Loop)?.span.start;
    let body = parse_block(parser)?;

    Ok(Expr::new(ExprKind::Loop { body }, parser.span_from(start)))
}

/// `for start, stop, step { body }`
pub fn parse_for_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start_position = parser.expect(TokenKind::For)?.span.start;

    let start = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    let stop = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    let step = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Expr::new(
        ExprKind::For {
            start: Box::new(start),
            stop: Box::new(stop),
            step: Box::new(step),
            body,
        },
        parser.span_from(start_position),
    ))
}

pub fn parse_return_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let span = parser.expect(TokenKind::Return)?.span;

    // Bare `return` when nothing that could start a value follows
    if parser.current_token().is_one_of_many(&[
        TokenKind::Semicolon,
        TokenKind::CloseCurly,
        TokenKind::CloseParen,
        TokenKind::CloseBracket,
        TokenKind::Comma,
        TokenKind::EOF,
    ]) {
        return Ok(Expr::new(ExprKind::Return(None), span));
    }

    let value = parse_expr(parser, BindingPower::Default)?;
    let span = span.to(&value.span);
    Ok(Expr::new(ExprKind::Return(Some(Box::new(value))), span))
}
