use std::collections::HashMap;

use crate::{
    ast::{ast::Attribute, expressions::Expr, items::Item, statements::Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, item::*, parser::Parser, stmt::*};

/// Operator binding powers, weakest first.
///
/// An infix handler runs only while the binding power of the current token
/// is strictly greater than the minimum the caller asked for, which makes
/// every operator registered here left-associative. Assignment recurses at
/// `Default` instead, so it groups to the right.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    /// Reserved for closures.
    Closure,
    Assignment,
    Cast,
    LogicalOr,
    LogicalAnd,
    Comparative,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Field,
    Call,
    /// Reserved for ranges.
    Range,
    Primary,
}

pub type ItemHandler = fn(&mut Parser, Option<Attribute>) -> Result<Item, Error>;
pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Assignment
    parser.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);
    for kind in [
        TokenKind::PlusEquals,
        TokenKind::MinusEquals,
        TokenKind::StarEquals,
        TokenKind::SlashEquals,
        TokenKind::PercentEquals,
        TokenKind::AmpersandEquals,
        TokenKind::PipeEquals,
        TokenKind::CaretEquals,
        TokenKind::ShiftLeftEquals,
        TokenKind::ShiftRightEquals,
    ] {
        parser.led(kind, BindingPower::Assignment, parse_compound_assignment_expr);
    }

    parser.led(TokenKind::As, BindingPower::Cast, parse_cast_expr);

    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Comparative
    parser.led(TokenKind::Equals, BindingPower::Comparative, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Comparative, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Comparative, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Comparative, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Comparative, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Comparative, parse_binary_expr);

    // Bitwise
    parser.led(TokenKind::Pipe, BindingPower::BitOr, parse_binary_expr);
    parser.led(TokenKind::Caret, BindingPower::BitXor, parse_binary_expr);
    parser.led(TokenKind::Ampersand, BindingPower::BitAnd, parse_binary_expr);
    parser.led(TokenKind::ShiftLeft, BindingPower::Shift, parse_binary_expr);
    parser.led(TokenKind::ShiftRight, BindingPower::Shift, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    // Postfix
    parser.led(TokenKind::Dot, BindingPower::Field, parse_field_expr);
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Call, parse_index_expr);

    // Literals and symbols
    parser.nud(TokenKind::Integer, parse_primary_expr);
    parser.nud(TokenKind::Float, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Boolean, parse_primary_expr);
    parser.nud(TokenKind::Null, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_path_expr);
    parser.nud(TokenKind::Super, parse_path_expr);
    parser.nud(TokenKind::Crate, parse_path_expr);
    parser.nud(TokenKind::PathSep, parse_path_expr);

    // Prefix
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Star, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::Ampersand, parse_reference_expr);
    parser.nud(TokenKind::And, parse_reference_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Block-like and control flow
    parser.nud(TokenKind::OpenCurly, parse_block_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::While, parse_while_expr);
    parser.nud(TokenKind::Loop, parse_loop_expr);
    parser.nud(TokenKind::For, parse_for_expr);
    parser.nud(TokenKind::Return, parse_return_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Const, parse_const_stmt);
    parser.stmt(TokenKind::Semicolon, parse_empty_stmt);

    // Items
    parser.item(TokenKind::Use, parse_use_item);
    parser.item(TokenKind::Fn, parse_fn_item);
    parser.item(TokenKind::Extern, parse_extern_fn_item);
    parser.item(TokenKind::Struct, parse_struct_item);
    parser.item(TokenKind::Enum, parse_enum_item);
    parser.item(TokenKind::Impl, parse_impl_item);
    parser.item(TokenKind::Mod, parse_mod_item);
}

// Lookup tables inside parser struct, so it's easier
pub type ItemLookup = HashMap<TokenKind, ItemHandler>;
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
