//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Item parsing (functions, structs, enums, impl blocks, modules, `use`)
//! - Statement and block parsing, including trailing block values
//! - Expression parsing (binary ops, casts, calls, paths, struct literals)
//! - Type parsing for type annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling. The
//! first error stops the parse.

pub mod expr;
pub mod item;
pub mod lookups;
pub mod parser;
pub mod path;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
