use crate::errors::errors::Error;

use super::ast::{Node, NodeId};

/// L: `add(left, right)`, `sub(...)`, `mult(...)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub operator: NodeId,
    pub left: NodeId,
    pub right: NodeId,
}

impl Calculation {
    pub fn from_node(node: &Node) -> Result<Self, Error> {
        match node.children.as_slice() {
            [operator, left, right] => Ok(Calculation {
                operator: *operator,
                left: *left,
                right: *right,
            }),
            _ => Err(node.arity_error("Calculation", "3")),
        }
    }
}

/// B: either `not operand` or `left op right` (eq, and, or, <, >).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BooleanExpr {
    Unary {
        operator: NodeId,
        operand: NodeId,
    },
    Binary {
        left: NodeId,
        operator: NodeId,
        right: NodeId,
    },
}

impl BooleanExpr {
    pub fn from_node(node: &Node) -> Result<Self, Error> {
        match node.children.as_slice() {
            [operator, operand] => Ok(BooleanExpr::Unary {
                operator: *operator,
                operand: *operand,
            }),
            [left, operator, right] => Ok(BooleanExpr::Binary {
                left: *left,
                operator: *operator,
                right: *right,
            }),
            _ => Err(node.arity_error("Boolean expression", "2 or 3")),
        }
    }
}
