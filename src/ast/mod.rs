/// AST (Abstract Syntax Tree) module
/// Contains the tree handed over by the parser
///
/// Submodules:
/// - ast: Node arena, node ids and the bottom-up builder
/// - productions: The closed set of grammar categories
/// - expressions: Named views over expression constructs (L, B)
/// - statements: Named views over statement constructs (W, Z, A, R)
pub mod ast;
pub mod expressions;
pub mod productions;
pub mod statements;
