/// AST (Abstract Syntax Tree) module
/// Contains the syntax tree handed to semantic analysis
///
/// Submodules:
/// - ast: The `Node` trait, node types and the root `Entry`
/// - expressions: The expression ladder, operators and literal values
/// - statements: Definitions, control flow, blocks and simple statements
/// - types: The built-in data types
/// - display: Printing trees back to source text
pub mod ast;
pub mod display;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
