#![allow(clippy::module_inception)]

use std::fmt::Write as _;

use crate::{
    ast::items::SourceFile,
    errors::errors::{Error, ErrorTip},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in the source text.
///
/// `offset` is a byte offset; `line` and `column` are 1-based, with the
/// column counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Position { offset, line, column }
    }

    pub fn null() -> Self {
        Position::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    pub fn null() -> Self {
        Span::default()
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }

    pub fn len(&self) -> usize {
        (self.end.offset - self.start.offset) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tokenizes and parses `source` into a [`SourceFile`].
///
/// `name` is only used for diagnostics and is stored on the returned tree.
#[tracing::instrument(skip_all, fields(name = name, source_len = source.len()))]
pub fn parse_source(source: &str, name: &str) -> Result<SourceFile, Error> {
    let tokens = lexer::lexer::tokenize(source)?;
    parser::parser::parse(tokens, name)
}

/// Finds the line containing byte `position`.
///
/// Returns the 1-based line number, the line text (including its newline),
/// and the character column of `position` within that line (0-based).
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = source[start..pos].chars().count();
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // End of input sits after the last newline (or the source is empty).
    Some((line_number, String::new(), 0))
}

/// Renders a caret-style diagnostic for `error`.
///
/// ```text
/// Error: UnexpectedToken (found `{`, expected identifier)
/// -> main.alu:1:8
///   |
/// 1 | struct { }
///   | -------^
/// ```
pub fn render_error(error: &Error, file: &str, source: &str) -> String {
    let position = error.get_span().start;
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}:{}:{}", file, position.line, position.column);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.offset) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();
    (string.chars().skip(start).collect(), start)
}
