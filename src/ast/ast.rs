use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Location,
};

use super::productions::Production;

/// Stable identifier of a node, assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One syntactic construct.
///
/// Nodes hold no type information; the checker's type table is the only
/// place types are recorded.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub production: Production,
    pub lexeme: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn arity(&self) -> usize {
        self.children.len()
    }

    /// Structural error for a child count outside the grammar.
    pub fn arity_error(&self, construct: &'static str, expected: &str) -> Error {
        Error::new(
            ErrorImpl::InvalidArity {
                construct,
                expected: String::from(expected),
                received: self.arity(),
            },
            self.location(),
        )
    }

    pub fn location(&self) -> Location {
        Location {
            node: self.id,
            production: self.production,
            lexeme: self.lexeme.clone(),
        }
    }
}

/// An immutable syntax tree stored as an arena of nodes.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, Error> {
        self.nodes.get(id.index()).ok_or_else(|| not_found(id))
    }

    /// Returns the `index`th child of `id`.
    pub fn child(&self, id: NodeId, index: usize) -> Result<&Node, Error> {
        let node = self.node(id)?;
        match node.children.get(index) {
            Some(child) => self.node(*child),
            None => Err(node.arity_error(
                node.production.symbol(),
                &format!("at least {}", index + 1),
            )),
        }
    }

    pub fn parent_production(&self, id: NodeId) -> Option<Production> {
        let parent = self.nodes.get(id.index())?.parent?;
        self.nodes.get(parent.index()).map(|node| node.production)
    }

    /// Node ids reachable from the root, parents before children,
    /// children left to right.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(id.index()) {
                for child in node.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }

        order
    }
}

/// Builds an [`Ast`] bottom-up.
///
/// A child must exist before its parent and may be attached only once, so
/// every tree produced here is finite and acyclic.
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(
        &mut self,
        production: Production,
        lexeme: &str,
        children: Vec<NodeId>,
    ) -> Result<NodeId, Error> {
        let id = node_id(self.nodes.len())?;

        for (position, child) in children.iter().enumerate() {
            let node = self.nodes.get(child.index()).ok_or_else(|| not_found(*child))?;
            if node.parent.is_some() || children[..position].contains(child) {
                return Err(Error::new(
                    ErrorImpl::NodeAlreadyAttached { id: *child },
                    node.location(),
                ));
            }
        }
        for child in children.iter() {
            self.nodes[child.index()].parent = Some(id);
        }

        self.nodes.push(Node {
            id,
            production,
            lexeme: String::from(lexeme),
            children,
            parent: None,
        });

        Ok(id)
    }

    /// Shorthand for a node with no children.
    pub fn leaf(&mut self, production: Production, lexeme: &str) -> Result<NodeId, Error> {
        self.node(production, lexeme, vec![])
    }

    pub fn build(self, root: NodeId) -> Result<Ast, Error> {
        let node = self.nodes.get(root.index()).ok_or_else(|| not_found(root))?;
        if node.parent.is_some() {
            return Err(Error::new(
                ErrorImpl::NodeAlreadyAttached { id: root },
                node.location(),
            ));
        }

        Ok(Ast {
            nodes: self.nodes,
            root,
        })
    }
}

/// The id of the node created after `count` others.
pub(crate) fn node_id(count: usize) -> Result<NodeId, Error> {
    u32::try_from(count).map(NodeId).map_err(|_| {
        Error::new(
            ErrorImpl::TooManyNodes { count },
            Location::unknown(NodeId(u32::MAX)),
        )
    })
}

fn not_found(id: NodeId) -> Error {
    Error::new(ErrorImpl::NodeNotFound { id }, Location::unknown(id))
}
