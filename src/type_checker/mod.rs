//! Type checking module.
//!
//! This module decides whether an SPL syntax tree is well-typed. It:
//!
//! - Records one type record per node in a flat, id-keyed type table
//! - Applies one syntax-directed rule per grammar production
//! - Stops at the first violated rule and returns it as an error
//! - Rejects any tree that still has an untyped node after traversal
//!
//! The annotated type table is handed to later phases on success.

pub mod type_checker;
pub mod type_table;
pub mod types;
