//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parse entry point.
//! Expressions use precedence climbing driven by NUD/LED handler tables;
//! statements, items and types dispatch on their first token through
//! lookup tables of their own.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - Item handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers

use std::collections::HashMap;

use crate::{
    ast::{ast::NodeId, items::SourceFile},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    item::parse_item,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, ItemHandler, ItemLookup, LEDHandler,
        LEDLookup, NUDHandler, NUDLookup, StmtHandler, StmtLookup,
    },
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// Deepest nesting of expressions, types and items accepted before the
/// parse is abandoned with an error instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and maintains lookup tables for
/// parsing items, statements, expressions, and types. It tracks the current
/// position in the token stream and provides methods for token consumption.
pub struct Parser {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source being parsed
    file: String,
    /// Lookup table for item parsing handlers
    item_lookup: ItemLookup,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Counter for generating unique node ids
    current_id: u32,
    /// End of a `>` taken off the front of the current token
    split_end: Option<Position>,
    /// Number of nested productions currently being parsed
    depth: usize,
}

impl Parser {
    /// Creates a new Parser instance with its lookup tables populated.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse
    /// * `file` - Name of the source, used for the resulting `SourceFile`
    ///
    /// # Returns
    ///
    /// A new Parser instance ready to parse the token stream.
    pub fn new(mut tokens: Vec<Token>, file: &str) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map_or(Position::null(), |t| t.span.end);
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::new(), Span::new(end, end)));
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            file: file.to_string(),
            item_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            current_id: 0,
            split_end: None,
            depth: 0,
        };
        create_token_lookups(&mut parser);
        create_token_type_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token `n` positions ahead of the current one.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::EOF, |token| token.kind)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        self.split_end = None;
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    /// Builds the error for a current token that doesn't fit `expected`.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.to_string(),
                expected: expected.to_string(),
            },
            token.span,
        )
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `error` - Optional custom error to return if expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected(&describe_kind(expected_kind))),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Consumes the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a `>` closing a generic list.
    ///
    /// The lexer reads `>>`, `>=` and `>>=` greedily, so when one of them
    /// closes a nested list its first `>` is taken and the rest is left in
    /// place as the current token.
    pub fn expect_closing_angle(&mut self) -> Result<(), Error> {
        let remainder = match self.current_token_kind() {
            TokenKind::Greater => {
                self.advance();
                return Ok(());
            }
            TokenKind::ShiftRight => (TokenKind::Greater, ">"),
            TokenKind::GreaterEquals => (TokenKind::Assignment, "="),
            TokenKind::ShiftRightEquals => (TokenKind::GreaterEquals, ">="),
            _ => return Err(self.unexpected("`>`")),
        };

        let token = &mut self.tokens[self.pos];
        let split = Position::new(
            token.span.start.offset + 1,
            token.span.start.line,
            token.span.start.column + 1,
        );
        token.kind = remainder.0;
        token.value = remainder.1.to_string();
        token.span.start = split;
        self.split_end = Some(split);
        Ok(())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(index) => self.tokens[index].span,
            None => self.current_token().span,
        }
    }

    /// Span from `start` up to the end of the most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        let end = self.split_end.unwrap_or(self.previous_span().end);
        Span::new(start, end)
    }

    /// Returns the name of the source being parsed.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns a reference to the item lookup table.
    pub fn get_item_lookup(&self) -> &ItemLookup {
        &self.item_lookup
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type NUD lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Registers a left denotation (infix/postfix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers an item handler for the keyword that introduces it.
    pub fn item(&mut self, kind: TokenKind, item_fn: ItemHandler) {
        self.item_lookup.insert(kind, item_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Runs `production` one nesting level deeper.
    ///
    /// Fails at the current token once [`MAX_NESTING_DEPTH`] is reached.
    pub fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            let token = self.current_token();
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.to_string(),
                    message: format!("nesting exceeds {} levels", MAX_NESTING_DEPTH),
                },
                token.span,
            ));
        }

        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Advances the internal ID counter and returns the previous value.
    pub fn advance_id(&mut self) -> NodeId {
        let id = self.current_id;
        self.current_id += 1;
        NodeId(id)
    }
}

/// Human description of a token kind for "expected ..." messages.
pub fn describe_kind(kind: TokenKind) -> String {
    let text = match kind {
        TokenKind::EOF => return String::from("end of input"),
        TokenKind::Integer => return String::from("integer literal"),
        TokenKind::Float => return String::from("float literal"),
        TokenKind::String => return String::from("string literal"),
        TokenKind::Boolean => return String::from("boolean literal"),
        TokenKind::Identifier => return String::from("identifier"),
        TokenKind::OpenBracket => "[",
        TokenKind::CloseBracket => "]",
        TokenKind::OpenCurly => "{",
        TokenKind::CloseCurly => "}",
        TokenKind::OpenParen => "(",
        TokenKind::CloseParen => ")",
        TokenKind::Hash => "#",
        TokenKind::Assignment => "=",
        TokenKind::Semicolon => ";",
        TokenKind::Colon => ":",
        TokenKind::PathSep => "::",
        TokenKind::Comma => ",",
        TokenKind::Arrow => "->",
        TokenKind::Greater => ">",
        TokenKind::Less => "<",
        TokenKind::Fn => "fn",
        other => return format!("{:?}", other),
    };
    format!("`{}`", text)
}

/// Parses a stream of tokens into a [`SourceFile`].
///
/// This is the main entry point for parsing. Items are parsed until `EOF`;
/// the first error aborts the parse and no partial tree is returned.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse
/// * `file` - Name of the source, kept on the tree for diagnostics
#[tracing::instrument(skip_all, fields(file = file, token_count = tokens.len()))]
pub fn parse(tokens: Vec<Token>, file: &str) -> Result<SourceFile, Error> {
    let mut parser = Parser::new(tokens, file);
    parse_source_file(&mut parser)
}

/// `source_file := item*`
pub fn parse_source_file(parser: &mut Parser) -> Result<SourceFile, Error> {
    let start = parser.current_token().span.start;
    let mut items = vec![];

    while parser.has_tokens() {
        items.push(parse_item(parser)?);
    }

    let end = parser.current_token().span.end;
    tracing::debug!(item_count = items.len(), "parsed source file");

    Ok(SourceFile {
        name: parser.file().to_string(),
        items,
        span: Span::new(start, end),
    })
}
