use std::fmt::{self, Display};

use crate::{lexer::tokens::TokenKind, Span};

use super::{
    ast::{Ident, Path},
    statements::Block,
    types::Type,
};

// LITERALS

/// Integer literal text as written, minus the suffix (`0xFF`, `10`).
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub value: String,
    pub suffix: Option<String>,
}

impl IntegerLiteral {
    /// Numeric value, honouring `0x`/`0b`/`0o` prefixes. `None` on overflow.
    pub fn parse_value(&self) -> Option<u128> {
        let (digits, radix) = match self.value.get(..2) {
            Some("0x") => (&self.value[2..], 16),
            Some("0b") => (&self.value[2..], 2),
            Some("0o") => (&self.value[2..], 8),
            _ => (self.value.as_str(), 10),
        };
        u128::from_str_radix(digits, radix).ok()
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.suffix.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub value: String,
    pub suffix: Option<String>,
}

/// String literal contents with escape sequences left as written.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub raw: String,
}

enum Unescaped {
    Char(char),
    Byte(u8),
}

impl StringLiteral {
    /// Resolves escape sequences into text.
    ///
    /// `\xHH` stands for a single byte, which has no place in a `String` when
    /// it is `0x80` or above; here it becomes the code point `U+00HH`. Use
    /// [`StringLiteral::unescaped_bytes`] for the exact bytes.
    pub fn unescaped(&self) -> String {
        let mut result = String::new();
        self.resolve_escapes(|unit| match unit {
            Unescaped::Char(ch) => result.push(ch),
            Unescaped::Byte(byte) => result.push(char::from(byte)),
        });
        result
    }

    /// Resolves escape sequences into the bytes the literal denotes.
    ///
    /// Characters are UTF-8 encoded and each `\xHH` is the byte `0xHH`.
    pub fn unescaped_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();
        self.resolve_escapes(|unit| match unit {
            Unescaped::Char(ch) => {
                let mut buffer = [0; 4];
                result.extend_from_slice(ch.encode_utf8(&mut buffer).as_bytes());
            }
            Unescaped::Byte(byte) => result.push(byte),
        });
        result
    }

    // The lexer has already rejected malformed `\x`/`\u` escapes, so any
    // other `\c` stands for `c` itself.
    fn resolve_escapes(&self, mut emit: impl FnMut(Unescaped)) {
        let mut chars = self.raw.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '\\' {
                emit(Unescaped::Char(ch));
                continue;
            }

            let Some(next_ch) = chars.next() else {
                emit(Unescaped::Char(ch)); // Keep the lone backslash
                break;
            };

            match next_ch {
                'n' => emit(Unescaped::Char('\n')),
                't' => emit(Unescaped::Char('\t')),
                'r' => emit(Unescaped::Char('\r')),
                '0' => emit(Unescaped::Char('\0')),
                'x' => {
                    let hex: String = chars.by_ref().take(2).collect();
                    if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                        emit(Unescaped::Byte(byte));
                    }
                }
                'u' => {
                    let hex: String = if chars.peek() == Some(&'{') {
                        chars.next();
                        chars.by_ref().take_while(|c| *c != '}').collect()
                    } else {
                        chars.by_ref().take(4).collect()
                    };
                    if let Some(c) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        emit(Unescaped::Char(c));
                    }
                }
                other => emit(Unescaped::Char(other)),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(StringLiteral),
    Boolean(bool),
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    Null,
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate, // -
    Deref,  // *
    Not,    // !
}

impl UnaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Dash => Some(UnaryOperator::Negate),
            TokenKind::Star => Some(UnaryOperator::Deref),
            TokenKind::Not => Some(UnaryOperator::Not),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitAnd,
    BitXor,
    BitOr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Dash => BinaryOperator::Sub,
            TokenKind::Star => BinaryOperator::Mul,
            TokenKind::Slash => BinaryOperator::Div,
            TokenKind::Percent => BinaryOperator::Rem,
            TokenKind::ShiftLeft => BinaryOperator::Shl,
            TokenKind::ShiftRight => BinaryOperator::Shr,
            TokenKind::Ampersand => BinaryOperator::BitAnd,
            TokenKind::Caret => BinaryOperator::BitXor,
            TokenKind::Pipe => BinaryOperator::BitOr,
            TokenKind::Equals => BinaryOperator::Eq,
            TokenKind::NotEquals => BinaryOperator::Ne,
            TokenKind::Less => BinaryOperator::Lt,
            TokenKind::LessEquals => BinaryOperator::Le,
            TokenKind::Greater => BinaryOperator::Gt,
            TokenKind::GreaterEquals => BinaryOperator::Ge,
            TokenKind::And => BinaryOperator::And,
            TokenKind::Or => BinaryOperator::Or,
            _ => return None,
        })
    }
}

/// The ten `op=` operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundOperator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl CompoundOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::PlusEquals => CompoundOperator::Add,
            TokenKind::MinusEquals => CompoundOperator::Sub,
            TokenKind::StarEquals => CompoundOperator::Mul,
            TokenKind::SlashEquals => CompoundOperator::Div,
            TokenKind::PercentEquals => CompoundOperator::Rem,
            TokenKind::AmpersandEquals => CompoundOperator::BitAnd,
            TokenKind::PipeEquals => CompoundOperator::BitOr,
            TokenKind::CaretEquals => CompoundOperator::BitXor,
            TokenKind::ShiftLeftEquals => CompoundOperator::Shl,
            TokenKind::ShiftRightEquals => CompoundOperator::Shr,
            _ => return None,
        })
    }

    /// The binary operator applied before storing.
    pub fn binary_operator(&self) -> BinaryOperator {
        match self {
            CompoundOperator::Add => BinaryOperator::Add,
            CompoundOperator::Sub => BinaryOperator::Sub,
            CompoundOperator::Mul => BinaryOperator::Mul,
            CompoundOperator::Div => BinaryOperator::Div,
            CompoundOperator::Rem => BinaryOperator::Rem,
            CompoundOperator::BitAnd => BinaryOperator::BitAnd,
            CompoundOperator::BitOr => BinaryOperator::BitOr,
            CompoundOperator::BitXor => BinaryOperator::BitXor,
            CompoundOperator::Shl => BinaryOperator::Shl,
            CompoundOperator::Shr => BinaryOperator::Shr,
        }
    }
}

// COMPLEX

/// Right-hand side of `.`: a name, or a position for tuples (`t.0`).
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Named(Ident),
    Index(IntegerLiteral),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInitializer {
    pub name: Ident,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub consequence: Block,
    /// Either a `Block` or another `If` expression.
    pub alternative: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    ScopedIdentifier(Path),
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `&value`
    Reference(Box<Expr>),
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    CompoundAssignment {
        operator: CompoundOperator,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Cast {
        value: Box<Expr>,
        ty: Type,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Struct {
        name: Type,
        fields: Vec<FieldInitializer>,
    },
    FieldAccess {
        receiver: Box<Expr>,
        field: Field,
    },
    Index {
        receiver: Box<Expr>,
        index: Box<Expr>,
    },
    Tuple(Vec<Expr>),
    /// Turbofish: `function::<A, B>`.
    GenericFunction {
        function: Box<Expr>,
        type_arguments: Vec<Type>,
    },
    Block(Block),
    If(IfExpr),
    While {
        condition: Box<Expr>,
        body: Block,
    },
    Loop {
        body: Block,
    },
    /// `for start, stop, step { body }`
    For {
        start: Box<Expr>,
        stop: Box<Expr>,
        step: Box<Expr>,
        body: Block,
    },
    Return(Option<Box<Expr>>),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// Block-terminated forms stand as statements without a `;`.
    pub fn is_block_like(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Block(_)
                | ExprKind::If(_)
                | ExprKind::While { .. }
                | ExprKind::Loop { .. }
                | ExprKind::For { .. }
        )
    }
}
