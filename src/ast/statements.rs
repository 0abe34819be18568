//! Named views over statement-level constructs.
//!
//! The parser keeps syntax tokens (`if`, `then`, `=`, ...) as children, so
//! the meaningful children sit at fixed positions. These views pin those
//! positions down once and reject any other child count.

use crate::errors::errors::Error;

use super::ast::{Node, NodeId};

/// W: `if (cond) then {code}` with an optional `else {code}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub condition: NodeId,
    pub then_body: NodeId,
    pub else_body: Option<NodeId>,
}

impl Branch {
    pub fn from_node(node: &Node) -> Result<Self, Error> {
        let c = &node.children;
        match c.len() {
            4 => Ok(Branch {
                condition: c[1],
                then_body: c[3],
                else_body: None,
            }),
            6 => Ok(Branch {
                condition: c[1],
                then_body: c[3],
                else_body: Some(c[5]),
            }),
            _ => Err(node.arity_error("Conditional branch", "4 or 6")),
        }
    }
}

/// Z, short form: `while (cond) {code}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileLoop {
    pub condition: NodeId,
    pub body: NodeId,
}

/// Z, counted form:
/// `for (counter = start; bound_left < bound_right; step_target = add(step_operand, step_amount)) {body}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForLoop {
    pub counter: NodeId,
    pub start: NodeId,
    pub bound_left: NodeId,
    pub bound_right: NodeId,
    pub step_target: NodeId,
    pub step_operand: NodeId,
    pub step_amount: NodeId,
    pub body: NodeId,
}

impl ForLoop {
    /// Number-typed slots in the order they are checked, grouped as
    /// initialisation, bound, then step.
    pub fn number_groups(&self) -> [Vec<NodeId>; 3] {
        [
            vec![self.counter, self.start],
            vec![self.bound_left, self.bound_right],
            vec![self.step_target, self.step_operand, self.step_amount],
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConditionalLoop {
    While(WhileLoop),
    For(ForLoop),
}

impl ConditionalLoop {
    pub fn from_node(node: &Node) -> Result<Self, Error> {
        let c = &node.children;
        match c.len() {
            3 => Ok(ConditionalLoop::While(WhileLoop {
                condition: c[1],
                body: c[2],
            })),
            13 => Ok(ConditionalLoop::For(ForLoop {
                counter: c[1],
                start: c[3],
                bound_left: c[4],
                bound_right: c[6],
                step_target: c[7],
                step_operand: c[10],
                step_amount: c[11],
                body: c[12],
            })),
            _ => Err(node.arity_error("Conditional loop", "3 or 13")),
        }
    }
}

/// A: `target = value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub target: NodeId,
    pub value: NodeId,
}

impl Assignment {
    pub fn from_node(node: &Node) -> Result<Self, Error> {
        match node.children.as_slice() {
            [target, _, value] => Ok(Assignment {
                target: *target,
                value: *value,
            }),
            _ => Err(node.arity_error("Assignment", "3")),
        }
    }
}

/// R: `proc name {body}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcDef {
    pub name: NodeId,
    pub body: NodeId,
}

impl ProcDef {
    pub fn from_node(node: &Node) -> Result<Self, Error> {
        match node.children.as_slice() {
            [_, name, body] => Ok(ProcDef {
                name: *name,
                body: *body,
            }),
            _ => Err(node.arity_error("Procedure", "3")),
        }
    }
}
