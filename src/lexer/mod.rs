//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking (byte offset, line, column) for error reporting
//! - Comments and whitespace as skipped trivia

pub mod lexer;
pub mod tokens;
