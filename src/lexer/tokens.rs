use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("extern", TokenKind::Extern);
        map.insert("struct", TokenKind::Struct);
        map.insert("enum", TokenKind::Enum);
        map.insert("impl", TokenKind::Impl);
        map.insert("mod", TokenKind::Mod);
        map.insert("use", TokenKind::Use);
        map.insert("as", TokenKind::As);
        map.insert("let", TokenKind::Let);
        map.insert("const", TokenKind::Const);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("loop", TokenKind::Loop);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map.insert("super", TokenKind::Super);
        map.insert("crate", TokenKind::Crate);
        map.insert("null", TokenKind::Null);
        map.insert("true", TokenKind::Boolean);
        map.insert("false", TokenKind::Boolean);
        map
    };
}

/// Integer type names, also accepted as integer literal suffixes.
pub const INTEGER_TYPES: [&str; 12] = [
    "u8", "i8", "u16", "i16", "u32", "i32", "u64", "i64", "u128", "i128", "isize", "usize",
];

/// Float type names, also accepted as float literal suffixes.
pub const FLOAT_TYPES: [&str; 2] = ["f32", "f64"];

/// Primitive type names are lexed as identifiers and classified by the parser.
pub fn is_primitive_type(name: &str) -> bool {
    INTEGER_TYPES.contains(&name) || FLOAT_TYPES.contains(&name) || name == "bool"
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Float,
    String,
    Boolean,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Hash,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    ShiftLeft,
    ShiftRight,

    Or,  // ||
    And, // &&
    Ampersand,
    Pipe,
    Caret,

    Dot,
    Semicolon,
    Colon,
    PathSep, // ::
    Comma,
    Arrow,

    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    AmpersandEquals,
    PipeEquals,
    CaretEquals,
    ShiftLeftEquals,
    ShiftRightEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Fn,
    Extern,
    Struct,
    Enum,
    Impl,
    Mod,
    Use,
    As,
    Let,
    Const,
    If,
    Else,
    While,
    Loop,
    For,
    Return,
    Super,
    Crate,
    Null,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Fn
                | TokenKind::Extern
                | TokenKind::Struct
                | TokenKind::Enum
                | TokenKind::Impl
                | TokenKind::Mod
                | TokenKind::Use
                | TokenKind::As
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::Loop
                | TokenKind::For
                | TokenKind::Return
                | TokenKind::Super
                | TokenKind::Crate
                | TokenKind::Null
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token. Numeric literals exclude their suffix,
    /// string literals exclude the quotes and keep escapes unresolved, and
    /// raw identifiers exclude the `r#` prefix.
    pub value: String,
    pub span: Span,
    /// Type suffix of a numeric literal (`u8` in `10u8`).
    pub suffix: Option<String>,
    /// Set for identifiers written as `r#name`.
    pub raw: bool,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "end of input"),
            TokenKind::String => write!(f, "\"{}\"", self.value),
            _ => match &self.suffix {
                Some(suffix) => write!(f, "{}{}", self.value, suffix),
                None => write!(f, "{}", self.value),
            },
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// One-line dump used by `alumina-parse --tokens`.
    pub fn debug(&self) -> String {
        let location = format!("{}:{}", self.span.start.line, self.span.start.column);
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Float,
            TokenKind::Boolean,
        ]) {
            format!("{:<8} {} ({})", location, self.kind, self)
        } else {
            format!("{:<8} {}", location, self.kind)
        }
    }
}
