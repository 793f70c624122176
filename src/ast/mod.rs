/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Shared building blocks (identifiers, paths, attributes, node ids)
/// - expressions: Definitions for the expression variants
/// - statements: Definitions for statements and blocks
/// - types: Definitions for type expressions
/// - items: Top-level and impl-level items and the `SourceFile` root
pub mod ast;
pub mod expressions;
pub mod items;
pub mod statements;
pub mod types;
