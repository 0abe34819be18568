use std::{collections::HashMap, fmt::Display, slice::Iter};

use crate::{
    ast::{
        ast::{Ast, NodeId},
        productions::Production,
    },
    errors::errors::{Error, ErrorImpl},
    Location,
};

use super::types::TypeTag;

/// Whether a name has been given a definition somewhere in the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Definition {
    Defined,
    #[default]
    Undefined,
}

#[derive(Debug, Clone)]
pub struct TableRecord {
    pub id: NodeId,
    pub production: Production,
    pub lexeme: String,
    pub type_tag: TypeTag,
    pub scope: u32,
    pub defined: Definition,
}

impl TableRecord {
    pub fn location(&self) -> Location {
        Location {
            node: self.id,
            production: self.production,
            lexeme: self.lexeme.clone(),
        }
    }
}

impl Display for TableRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} {:?} : {} (scope {}, {:?})",
            self.id, self.production, self.lexeme, self.type_tag, self.scope, self.defined
        )
    }
}

/// One record per AST node, in pre-order.
///
/// Records are addressed by node id through `index`, never by their
/// position in `records`.
#[derive(Debug, Default, Clone)]
pub struct TypeTable {
    records: Vec<TableRecord>,
    index: HashMap<NodeId, usize>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an `Unbound` record for every node reachable from the root.
    pub fn initialize(ast: &Ast) -> Result<Self, Error> {
        let mut table = TypeTable::new();
        for id in ast.pre_order() {
            let node = ast.node(id)?;
            table.insert(node.id, node.production, &node.lexeme);
        }
        Ok(table)
    }

    pub fn insert(&mut self, id: NodeId, production: Production, lexeme: &str) {
        if self.index.contains_key(&id) {
            return;
        }
        self.index.insert(id, self.records.len());
        self.records.push(TableRecord {
            id,
            production,
            lexeme: String::from(lexeme),
            type_tag: TypeTag::Unbound,
            scope: 0,
            defined: Definition::Undefined,
        });
    }

    pub fn get(&self, id: NodeId) -> Result<&TableRecord, Error> {
        match self.index.get(&id) {
            Some(position) => Ok(&self.records[*position]),
            None => Err(not_found(id)),
        }
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut TableRecord, Error> {
        match self.index.get(&id) {
            Some(position) => Ok(&mut self.records[*position]),
            None => Err(not_found(id)),
        }
    }

    pub fn get_type(&self, id: NodeId) -> Result<TypeTag, Error> {
        Ok(self.get(id)?.type_tag)
    }

    /// The type of `id`, `Unbound` when the node has no record.
    ///
    /// For reading a finished table; use [`TypeTable::get_type`] where a
    /// missing record is an error.
    pub fn type_of(&self, id: NodeId) -> TypeTag {
        self.get_type(id).unwrap_or_default()
    }

    pub fn set_type(&mut self, id: NodeId, tag: TypeTag) -> Result<(), Error> {
        self.get_mut(id)?.type_tag = tag;
        Ok(())
    }

    pub fn set_scope(&mut self, id: NodeId, scope: u32) -> Result<(), Error> {
        self.get_mut(id)?.scope = scope;
        Ok(())
    }

    pub fn scope(&self, id: NodeId) -> Result<u32, Error> {
        Ok(self.get(id)?.scope)
    }

    /// Marks every record spelled `name` as defined, wherever it appears.
    pub fn set_defined(&mut self, name: &str) {
        for record in self.records.iter_mut() {
            if record.lexeme == name {
                record.defined = Definition::Defined;
            }
        }
    }

    pub fn get_defined(&self, name: &str) -> Definition {
        self.records
            .iter()
            .find(|record| record.lexeme == name)
            .map(|record| record.defined)
            .unwrap_or(Definition::Undefined)
    }

    pub fn all_typed(&self) -> bool {
        self.records.iter().all(|record| record.type_tag.is_bound())
    }

    /// The earliest record, in pre-order, that is still `Unbound`.
    pub fn first_unbound(&self) -> Option<&TableRecord> {
        self.records.iter().find(|record| !record.type_tag.is_bound())
    }

    pub fn iter(&self) -> Iter<'_, TableRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Display for TypeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for record in self.records.iter() {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

fn not_found(id: NodeId) -> Error {
    Error::new(ErrorImpl::NodeNotFound { id }, Location::unknown(id))
}
