use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// A pattern handler consumes the text matched at the cursor.
///
/// Returns `Ok(None)` for trivia (whitespace, comments) so the lexer keeps
/// scanning.
pub type RegexHandler = fn(&mut Lexer<'_>, &Regex) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

// Patterns are tried in order and the first match wins, so longer
// punctuation must come before its prefixes.
lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^//[^\n\r]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*[^*]*\*+(?:[^/*][^*]*\*+)*/").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*").unwrap(), handler: unterminated_comment_handler },
        RegexPattern { regex: Regex::new(r#"^"(?:\\(?:[^xu]|u[0-9a-fA-F]{4}|u\{[0-9a-fA-F]+\}|x[0-9a-fA-F]{2})|[^"\\\n])*""#).unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r#"^""#).unwrap(), handler: malformed_string_handler },
        RegexPattern { regex: Regex::new(r"^[0-9]").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^(?:r#)?[_\p{XID_Start}]\p{XID_Continue}*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^<<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeftEquals, "<<=") },
        RegexPattern { regex: Regex::new(r"^>>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRightEquals, ">>=") },
        RegexPattern { regex: Regex::new(r"^::").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PathSep, "::") },
        RegexPattern { regex: Regex::new(r"^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->") },
        RegexPattern { regex: Regex::new(r"^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new(r"^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new(r"^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new(r"^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new(r"^<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<") },
        RegexPattern { regex: Regex::new(r"^>>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>") },
        RegexPattern { regex: Regex::new(r"^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new(r"^\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new(r"^\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=") },
        RegexPattern { regex: Regex::new(r"^-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=") },
        RegexPattern { regex: Regex::new(r"^\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=") },
        RegexPattern { regex: Regex::new(r"^/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=") },
        RegexPattern { regex: Regex::new(r"^%=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=") },
        RegexPattern { regex: Regex::new(r"^&=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AmpersandEquals, "&=") },
        RegexPattern { regex: Regex::new(r"^\|=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PipeEquals, "|=") },
        RegexPattern { regex: Regex::new(r"^\^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CaretEquals, "^=") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new(r"^#").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Hash, "#") },
        RegexPattern { regex: Regex::new(r"^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new(r"^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new(r"^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(r"^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(r"^&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&") },
        RegexPattern { regex: Regex::new(r"^\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|") },
        RegexPattern { regex: Regex::new(r"^\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret, "^") },
        RegexPattern { regex: Regex::new(r"^\.[0-9]").unwrap(), handler: leading_dot_handler },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new(r"^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new(r"^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
    ];

    static ref RADIX_INTEGER: Regex = Regex::new(r"^0(?:x[0-9a-fA-F]+|b[01]+|o[0-7]+)").unwrap();
    static ref DIGITS: Regex = Regex::new(r"^[0-9]+").unwrap();
    static ref FRACTION: Regex = Regex::new(r"^\.[0-9]+").unwrap();
    static ref EXPONENT: Regex = Regex::new(r"^[eE][+-]?[0-9]+").unwrap();
    static ref INTEGER_SUFFIX: Regex =
        Regex::new(r"^(?:u128|i128|usize|isize|u16|i16|u32|i32|u64|i64|u8|i8)").unwrap();
    static ref FLOAT_SUFFIX: Regex = Regex::new(r"^f(?:32|64)").unwrap();
    static ref IDENTIFIER_START: Regex = Regex::new(r"^[_\p{XID_Start}]").unwrap();
}

/// A forward-only cursor over source text producing tokens on demand.
#[derive(Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    finished: bool,
    previous: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            finished: false,
            previous: None,
        }
    }

    /// Current cursor location.
    pub fn location(&self) -> Position {
        Position::new(self.pos as u32, self.line, self.column)
    }

    /// Moves the cursor to a position previously returned by [`Lexer::location`].
    pub fn seek(&mut self, position: Position) {
        self.pos = position.offset as usize;
        self.line = position.line;
        self.column = position.column;
        self.finished = false;
    }

    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span covering the next `n` bytes without consuming them.
    fn peek_span(&self, n: usize) -> Span {
        let mut ahead = self.clone();
        ahead.advance_n(n);
        Span::new(self.location(), ahead.location())
    }

    /// Produces the next token, skipping trivia. Returns an `EOF` token once
    /// the input is exhausted; further calls keep returning `EOF`.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            if self.at_eof() {
                let end = self.location();
                return Ok(MK_TOKEN!(TokenKind::EOF, String::new(), Span::new(end, end)));
            }

            let remaining = self.remainder();
            let pattern = PATTERNS.iter().find(|pattern| pattern.regex.is_match(remaining));

            match pattern {
                Some(pattern) => {
                    if let Some(token) = (pattern.handler)(self, &pattern.regex)? {
                        self.previous = Some(token.kind);
                        return Ok(token);
                    }
                }
                None => {
                    let ch = self.at().unwrap_or_default();
                    return Err(Error::new(
                        ErrorImpl::UnrecognisedToken { token: ch.to_string() },
                        self.peek_span(ch.len_utf8()),
                    ));
                }
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.kind == TokenKind::EOF => self.finished = true,
            Err(_) => self.finished = true,
            _ => {}
        }
        Some(result)
    }
}

fn matched_len(lexer: &Lexer<'_>, regex: &Regex) -> usize {
    regex.find(lexer.remainder()).map_or(0, |m| m.end())
}

fn skip_handler(lexer: &mut Lexer<'_>, regex: &Regex) -> Result<Option<Token>, Error> {
    let len = matched_len(lexer, regex);
    lexer.advance_n(len);
    Ok(None)
}

fn unterminated_comment_handler(lexer: &mut Lexer<'_>, _regex: &Regex) -> Result<Option<Token>, Error> {
    Err(Error::new(
        ErrorImpl::UnterminatedBlockComment,
        lexer.peek_span(lexer.remainder().len()),
    ))
}

fn string_handler(lexer: &mut Lexer<'_>, regex: &Regex) -> Result<Option<Token>, Error> {
    let len = matched_len(lexer, regex);
    let contents = &lexer.remainder()[1..len - 1];

    let start = lexer.location();
    lexer.advance_n(len);

    Ok(Some(MK_TOKEN!(
        TokenKind::String,
        contents.to_string(),
        Span::new(start, lexer.location())
    )))
}

/// Runs when a `"` opens a literal the string pattern rejected, and works out why.
fn malformed_string_handler(lexer: &mut Lexer<'_>, _regex: &Regex) -> Result<Option<Token>, Error> {
    let remaining = lexer.remainder();
    let mut chars = remaining.char_indices().skip(1).peekable();

    while let Some((index, ch)) = chars.next() {
        match ch {
            '\n' => {
                let mut ahead = lexer.clone();
                ahead.advance_n(index);
                return Err(Error::new(ErrorImpl::NewlineInString, ahead.peek_span(1)));
            }
            '\\' => {
                let Some((_, escape)) = chars.next() else {
                    break;
                };

                let rest = &remaining[index + 1 + escape.len_utf8()..];
                let valid = match escape {
                    'x' => {
                        rest.len() >= 2 && rest.as_bytes()[..2].iter().all(u8::is_ascii_hexdigit)
                    }
                    'u' => match rest.strip_prefix('{') {
                        Some(braced) => {
                            let digits = braced.bytes().take_while(u8::is_ascii_hexdigit).count();
                            digits > 0 && braced[digits..].starts_with('}')
                        }
                        None => {
                            rest.len() >= 4
                                && rest.as_bytes()[..4].iter().all(u8::is_ascii_hexdigit)
                        }
                    },
                    _ => true,
                };

                if !valid {
                    let shown: String = remaining[index..].chars().take(4).collect();
                    let mut ahead = lexer.clone();
                    ahead.advance_n(index);
                    return Err(Error::new(
                        ErrorImpl::InvalidEscape { escape: shown },
                        ahead.peek_span(2),
                    ));
                }
            }
            _ => {}
        }
    }

    Err(Error::new(
        ErrorImpl::UnterminatedString,
        lexer.peek_span(remaining.len()),
    ))
}

/// Lexes integer and float literals with their optional type suffix.
///
/// A float needs a fractional part, a trailing `.`, or a float suffix; an
/// exponent alone does not make a float. A trailing `.` only belongs to the
/// literal when it is not followed by another `.` or an identifier, so
/// `1.max(2)` and `t.0` keep their field-access reading.
fn number_handler(lexer: &mut Lexer<'_>, _regex: &Regex) -> Result<Option<Token>, Error> {
    let remaining = lexer.remainder();
    let start = lexer.location();

    let (kind, len, suffix) = if let Some(radix) = RADIX_INTEGER.find(remaining) {
        let len = radix.end();
        let suffix = INTEGER_SUFFIX.find(&remaining[len..]).map(|m| m.as_str());
        (TokenKind::Integer, len, suffix)
    } else {
        let mut len = DIGITS.find(remaining).map_or(0, |m| m.end());
        let mut has_point = false;

        if let Some(fraction) = FRACTION.find(&remaining[len..]) {
            len += fraction.end();
            has_point = true;
        } else if remaining[len..].starts_with('.') {
            let after = &remaining[len + 1..];
            if !after.starts_with('.') && !IDENTIFIER_START.is_match(after) {
                len += 1;
                has_point = true;
            }
        }

        let exponent = EXPONENT.find(&remaining[len..]).map_or(0, |m| m.end());
        let float_suffix = FLOAT_SUFFIX.find(&remaining[len + exponent..]);

        if has_point || float_suffix.is_some() {
            (TokenKind::Float, len + exponent, float_suffix.map(|m| m.as_str()))
        } else {
            let suffix = INTEGER_SUFFIX.find(&remaining[len..]).map(|m| m.as_str());
            (TokenKind::Integer, len, suffix)
        }
    };

    let value = remaining[..len].to_string();
    let suffix = suffix.map(String::from);
    lexer.advance_n(len + suffix.as_ref().map_or(0, String::len));

    Ok(Some(MK_TOKEN!(kind, value, Span::new(start, lexer.location()), suffix)))
}

/// Kinds after which a `.` is field access rather than the start of a float.
fn ends_operand(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::Integer
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::Boolean
            | TokenKind::Null
            | TokenKind::CloseParen
            | TokenKind::CloseBracket
            | TokenKind::CloseCurly
    )
}

/// `.5` is a float where an operand can start, and field access otherwise.
fn leading_dot_handler(lexer: &mut Lexer<'_>, regex: &Regex) -> Result<Option<Token>, Error> {
    if lexer.previous.is_some_and(ends_operand) {
        return (MK_DEFAULT_HANDLER!(TokenKind::Dot, "."))(lexer, regex);
    }

    let remaining = lexer.remainder();
    let start = lexer.location();

    let fraction = FRACTION.find(remaining).map_or(0, |m| m.end());
    let len = fraction + EXPONENT.find(&remaining[fraction..]).map_or(0, |m| m.end());
    let suffix = FLOAT_SUFFIX.find(&remaining[len..]).map(|m| m.as_str().to_string());

    let value = remaining[..len].to_string();
    lexer.advance_n(len + suffix.as_ref().map_or(0, String::len));

    Ok(Some(MK_TOKEN!(TokenKind::Float, value, Span::new(start, lexer.location()), suffix)))
}

fn symbol_handler(lexer: &mut Lexer<'_>, regex: &Regex) -> Result<Option<Token>, Error> {
    let len = matched_len(lexer, regex);
    let text = &lexer.remainder()[..len];
    let start = lexer.location();
    lexer.advance_n(len);
    let span = Span::new(start, lexer.location());

    if let Some(name) = text.strip_prefix("r#") {
        let mut token = MK_TOKEN!(TokenKind::Identifier, name.to_string(), span);
        token.raw = true;
        return Ok(Some(token));
    }

    let kind = RESERVED_LOOKUP
        .get(text)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    Ok(Some(MK_TOKEN!(kind, text.to_string(), span)))
}

/// Lexes all of `source`, ending with a single `EOF` token.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(token_count = tokens.len(), "tokenized source");
    Ok(tokens)
}
