//! Error types and error handling for the parser.
//!
//! This module defines the errors produced while turning source text into
//! an AST. It includes:
//!
//! - Error structures with source span information
//! - Lexical and syntactic error variants
//! - Error naming and suggestion text used by diagnostic rendering

pub mod errors;

#[cfg(test)]
mod tests;
