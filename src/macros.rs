//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-text tokens
//!
//! These macros reduce boilerplate in the lexer's pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
/// * `$suffix` - Optional numeric literal suffix
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), span);
/// let token = MK_TOKEN!(TokenKind::Integer, "10".to_string(), span, Some("u8".to_string()));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::MK_TOKEN!($kind, $value, $span, None)
    };
    ($kind:expr, $value:expr, $span:expr, $suffix:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            suffix: $suffix,
            raw: false,
        }
    };
}

/// Creates a default lexer handler for fixed-text tokens.
///
/// Generates a handler that advances the lexer past `$value` and returns a
/// token of the given kind spanning it.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal string value (used for length calculation)
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer<'_>, _regex: &Regex| -> Result<Option<Token>, Error> {
            let start = lexer.location();
            lexer.advance_n($value.len());
            Ok(Some($crate::MK_TOKEN!(
                $kind,
                String::from($value),
                Span::new(start, lexer.location())
            )))
        }
    };
}
