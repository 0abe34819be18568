//! Error types and error handling for the checker.
//!
//! This module defines the errors produced while building a tree or
//! checking it. It includes:
//!
//! - Error structures carrying the offending node's location
//! - Specific error variants for type, binding and structural faults
//! - Error names and suggestions used by the diagnostic printer

pub mod errors;
