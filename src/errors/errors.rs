use std::fmt::Display;

use thiserror::Error;

use crate::{
    ast::{ast::NodeId, productions::Production},
    type_checker::types::{describe_tags, TypeTag},
    Location,
};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    location: Location,
}

/// Broad class of a failure, independent of the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,
    AmbiguousBinding,
    Structural,
    ResidualUnbound,
    Lookup,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: Location) -> Self {
        Error {
            internal_error: error_impl,
            location,
        }
    }

    pub fn get_location(&self) -> &Location {
        &self.location
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ErrorImpl::ProcedureAlreadyBound { .. } => ErrorKind::TypeMismatch,
            ErrorImpl::AmbiguousBinding { .. } => ErrorKind::AmbiguousBinding,
            ErrorImpl::InvalidArity { .. } => ErrorKind::Structural,
            ErrorImpl::ResidualUnbound => ErrorKind::ResidualUnbound,
            ErrorImpl::NodeNotFound { .. } => ErrorKind::Lookup,
            ErrorImpl::NodeAlreadyAttached { .. } => ErrorKind::Lookup,
            ErrorImpl::TooManyNodes { .. } => ErrorKind::Structural,
        }
    }

    /// The expected/received pair, present only for type mismatches.
    pub fn type_pair(&self) -> Option<(String, TypeTag)> {
        match &self.internal_error {
            ErrorImpl::TypeMismatch { expected, received } => {
                Some((describe_tags(expected), *received))
            }
            _ => None,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::AmbiguousBinding { .. } => "AmbiguousBinding",
            ErrorImpl::InvalidArity { .. } => "InvalidArity",
            ErrorImpl::ProcedureAlreadyBound { .. } => "ProcedureAlreadyBound",
            ErrorImpl::ResidualUnbound => "ResidualUnbound",
            ErrorImpl::NodeNotFound { .. } => "NodeNotFound",
            ErrorImpl::NodeAlreadyAttached { .. } => "NodeAlreadyAttached",
            ErrorImpl::TooManyNodes { .. } => "TooManyNodes",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                describe_tags(expected),
                received
            )),
            ErrorImpl::AmbiguousBinding { name, context } => match context {
                Some(context) => ErrorTip::Suggestion(format!(
                    "Name `{}` used under `{}` is neither a number nor a string variable",
                    name,
                    context.symbol()
                )),
                None => ErrorTip::Suggestion(format!("Name `{}` has no enclosing variable", name)),
            },
            ErrorImpl::InvalidArity {
                construct,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "{} expects {} children, received {}",
                construct, expected, received
            )),
            ErrorImpl::ProcedureAlreadyBound { name, bound } => ErrorTip::Suggestion(format!(
                "Procedure name `{}` is already bound as `{}`",
                name, bound
            )),
            ErrorImpl::ResidualUnbound => ErrorTip::None,
            ErrorImpl::NodeNotFound { id } => {
                ErrorTip::Suggestion(format!("No node with id {} exists", id))
            }
            ErrorImpl::NodeAlreadyAttached { id } => {
                ErrorTip::Suggestion(format!("Node {} already has a parent", id))
            }
            ErrorImpl::TooManyNodes { .. } => ErrorTip::Suggestion(format!(
                "A tree holds at most {} nodes",
                u64::from(u32::MAX) + 1
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.location)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("types do not match: expected {}, received {received}", describe_tags(.expected))]
    TypeMismatch {
        expected: Vec<TypeTag>,
        received: TypeTag,
    },
    #[error("cannot decide the type of name {name:?} from its context")]
    AmbiguousBinding {
        name: String,
        context: Option<Production>,
    },
    #[error("{construct}: invalid number of arguments: expected {expected}, received {received}")]
    InvalidArity {
        construct: &'static str,
        expected: String,
        received: usize,
    },
    #[error("procedure name {name:?} already bound as {bound}")]
    ProcedureAlreadyBound { name: String, bound: TypeTag },
    #[error("node never received a type")]
    ResidualUnbound,
    #[error("node {id} not found")]
    NodeNotFound { id: NodeId },
    #[error("node {id} is already attached to a parent")]
    NodeAlreadyAttached { id: NodeId },
    #[error("cannot add node: tree already holds {count} nodes")]
    TooManyNodes { count: usize },
}
