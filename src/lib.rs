#![allow(clippy::module_inception)]

use std::fmt::Display;

use tracing::error;

use crate::{
    ast::{ast::NodeId, productions::Production},
    errors::errors::{Error, ErrorTip},
};

pub mod ast;
pub mod errors;
pub mod macros;
pub mod type_checker;

extern crate regex;

/// The node a diagnostic points at.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub node: NodeId,
    pub production: Production,
    pub lexeme: String,
}

impl Location {
    /// Location for an id that has no node behind it.
    pub fn unknown(node: NodeId) -> Self {
        Location {
            node,
            production: Production::Token,
            lexeme: String::from("<unknown>"),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node [{}] ({} {:?})", self.node, self.production, self.lexeme)
    }
}

pub fn format_error(error: &Error) -> String {
    /*
        Error: TypeMismatch (Expected type `Number`, received `String`)
        -> node [4]
           | class: A
           | snippet: =
        Expected a type of Number
        Received a type of String
    */

    let location = error.get_location();
    let mut lines = vec![];

    if let ErrorTip::None = error.get_tip() {
        lines.push(format!("Error: {}", error.get_error_name()));
    } else {
        lines.push(format!("Error: {} ({})", error.get_error_name(), error.get_tip()));
    }
    lines.push(format!("-> node [{}]", location.node));
    lines.push(format!("   | class: {}", location.production));
    lines.push(format!("   | snippet: {}", location.lexeme));

    if let Some((expected, received)) = error.type_pair() {
        lines.push(format!("Expected a type of {}", expected));
        lines.push(format!("Received a type of {}", received));
    }

    lines.join("\n")
}

/// Prints the diagnostic for `error` to stdout.
pub fn display_error(error: &Error) {
    error!(node = %error.get_location().node, kind = ?error.kind(), "{}", error);
    println!("{}", format_error(error));
}
