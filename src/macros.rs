//! Utility macros for the checker.
//!
//! This module defines helper macros used when assembling syntax trees:
//!
//! - `MK_NODE!` - Adds a node to an `AstBuilder`
//!
//! Parser glue and tests build many small trees; the macro keeps those
//! call sites to one line per node.

/// Adds a node to an `AstBuilder` and evaluates to `Result<NodeId, Error>`.
///
/// # Arguments
///
/// * `$builder` - The `AstBuilder` to add to
/// * `$production` - The node's `Production`
/// * `$lexeme` - The source text of the node
/// * `$child` - Ids of already-built children, left to right (optional)
///
/// # Example
///
/// ```ignore
/// let name = MK_NODE!(builder, Production::UserDefinedName, "x")?;
/// let var = MK_NODE!(builder, Production::NumberVariable, "x", [name])?;
/// ```
#[macro_export]
macro_rules! MK_NODE {
    ($builder:expr, $production:expr, $lexeme:expr) => {
        $builder.node($production, $lexeme, vec![])
    };
    ($builder:expr, $production:expr, $lexeme:expr, [$($child:expr),* $(,)?]) => {
        $builder.node($production, $lexeme, vec![$($child),*])
    };
}
