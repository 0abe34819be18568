use tracing::{debug, info, trace};

use crate::{
    ast::{
        ast::{Ast, Node, NodeId},
        expressions::{BooleanExpr, Calculation},
        productions::Production,
        statements::{Assignment, Branch, ConditionalLoop, ProcDef},
    },
    display_error,
    errors::errors::{Error, ErrorImpl},
};

use super::{type_table::TypeTable, types::TypeTag};

/// Operand types a binary boolean expression accepts, in the order the
/// matching pairs are tried.
const COMPARABLE: [TypeTag; 3] = [TypeTag::Output, TypeTag::Number, TypeTag::Boolean];

/// Syntax-directed checker over one tree.
///
/// Owns the type table for the duration of the check. The first violated
/// rule aborts the whole check with that error.
#[derive(Debug)]
pub struct TypeChecker<'a> {
    ast: &'a Ast,
    table: TypeTable,
    scope: u32,
    next_scope: u32,
}

impl<'a> TypeChecker<'a> {
    pub fn new(ast: &'a Ast) -> Result<Self, Error> {
        Ok(TypeChecker {
            ast,
            table: TypeTable::initialize(ast)?,
            scope: 0,
            next_scope: 0,
        })
    }

    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    pub fn into_table(self) -> TypeTable {
        self.table
    }

    /// Types the whole tree and returns the root's verdict.
    pub fn check(&mut self) -> Result<TypeTag, Error> {
        let root = self.ast.root();
        self.visit(root)?;

        if let Some(record) = self.table.first_unbound() {
            return Err(Error::new(ErrorImpl::ResidualUnbound, record.location()));
        }

        let ast = self.ast;
        let verdict = self.table.get_type(root)?;
        if verdict != TypeTag::WellTyped {
            return Err(mismatch(ast.node(root)?, &[TypeTag::WellTyped], verdict));
        }

        info!(records = self.table.len(), "type check complete");
        Ok(verdict)
    }

    fn visit(&mut self, id: NodeId) -> Result<(), Error> {
        if self.table.get_type(id)?.is_bound() {
            return Ok(());
        }

        let ast = self.ast;
        let node = ast.node(id)?;
        trace!(node = %id, production = %node.production, "visiting node");

        match node.production {
            Production::NumberLiteral => self.assign(id, TypeTag::Number),
            Production::ShortString => self.assign(id, TypeTag::String),
            // Settled only by the rule that holds them in an operator or
            // keyword slot.
            Production::BooleanOperator(_) | Production::Token | Production::Keyword => Ok(()),
            Production::UserDefinedName => self.check_name(node),
            Production::NumberVariable => self.check_wrapper(
                node,
                "Number variable",
                &[TypeTag::Number],
                TypeTag::Number,
            ),
            Production::StringVariable => self.check_wrapper(
                node,
                "String variable",
                &[TypeTag::String],
                TypeTag::String,
            ),
            Production::Variable => self.check_wrapper(
                node,
                "Variable",
                &[TypeTag::Number, TypeTag::String],
                TypeTag::Output,
            ),
            Production::IntermediateT | Production::IntermediateU => self.check_wrapper(
                node,
                "Intermediate statement",
                &[TypeTag::Number, TypeTag::String],
                TypeTag::WellTyped,
            ),
            Production::Terminator => self.check_wrapper(
                node,
                "Terminator",
                &[TypeTag::WellTyped],
                TypeTag::WellTyped,
            ),
            Production::Calculation => self.check_calculation(node),
            Production::BooleanExpr => self.check_boolean(node),
            Production::ConditionalBranch => self.check_branch(node),
            Production::Assign => self.check_assignment(node),
            Production::ConditionalLoop => self.check_loop(node),
            Production::Program => self.check_sequence(node, "Program"),
            Production::ProcDefs => self.check_sequence(node, "Procedure definitions"),
            Production::Code => self.check_sequence(node, "Code"),
            Production::Proc => self.check_proc(node),
            Production::Instr => self.check_instruction(node),
            Production::Io | Production::Call => self.check_argument(node),
        }
    }

    fn assign(&mut self, id: NodeId, tag: TypeTag) -> Result<(), Error> {
        self.table.set_type(id, tag)?;
        self.table.set_scope(id, self.scope)?;
        debug!(node = %id, tag = %tag, scope = self.scope, "assigned type");
        Ok(())
    }

    /// Settles the syntax tokens under `node` and gives `node` its type.
    fn finish(&mut self, node: &Node, tag: TypeTag) -> Result<(), Error> {
        let ast = self.ast;
        for child in node.children.iter() {
            let production = ast.node(*child)?.production;
            if production.is_syntax_token() {
                let settled = match production {
                    Production::BooleanOperator(_) => TypeTag::Boolean,
                    _ => TypeTag::WellTyped,
                };
                self.assign(*child, settled)?;
            }
        }
        self.assign(node.id, tag)
    }

    fn expect(&self, node: &Node, child: NodeId, expected: &[TypeTag]) -> Result<(), Error> {
        let received = self.table.get_type(child)?;
        if received.is_one_of(expected) {
            Ok(())
        } else {
            Err(mismatch(node, expected, received))
        }
    }

    fn check_name(&mut self, node: &Node) -> Result<(), Error> {
        match self.ast.parent_production(node.id) {
            Some(Production::NumberVariable) => self.assign(node.id, TypeTag::Number),
            Some(Production::StringVariable) => self.assign(node.id, TypeTag::String),
            context => Err(Error::new(
                ErrorImpl::AmbiguousBinding {
                    name: node.lexeme.clone(),
                    context,
                },
                node.location(),
            )),
        }
    }

    /// N, S, V, T, U and Q: one child whose type decides the node's.
    fn check_wrapper(
        &mut self,
        node: &Node,
        construct: &'static str,
        accepted: &[TypeTag],
        result: TypeTag,
    ) -> Result<(), Error> {
        if node.arity() != 1 {
            return Err(node.arity_error(construct, "1"));
        }
        let child = self.ast.child(node.id, 0)?.id;
        self.visit(child)?;
        self.expect(node, child, accepted)?;
        self.finish(node, result)
    }

    fn check_calculation(&mut self, node: &Node) -> Result<(), Error> {
        let calculation = Calculation::from_node(node)?;
        self.visit(calculation.left)?;
        self.visit(calculation.right)?;
        self.expect(node, calculation.left, &[TypeTag::Number])?;
        self.expect(node, calculation.right, &[TypeTag::Number])?;
        self.finish(node, TypeTag::Number)
    }

    fn check_boolean(&mut self, node: &Node) -> Result<(), Error> {
        match BooleanExpr::from_node(node)? {
            BooleanExpr::Unary { operand, .. } => {
                self.visit(operand)?;
                self.expect(node, operand, &[TypeTag::Boolean])?;
            }
            BooleanExpr::Binary { left, right, .. } => {
                self.visit(left)?;
                self.visit(right)?;
                let left_type = self.table.get_type(left)?;
                let right_type = self.table.get_type(right)?;

                let matched = COMPARABLE
                    .iter()
                    .any(|tag| left_type == *tag && right_type == *tag);
                if !matched {
                    if !left_type.is_one_of(&COMPARABLE) {
                        return Err(mismatch(node, &COMPARABLE, left_type));
                    }
                    if !right_type.is_one_of(&COMPARABLE) {
                        return Err(mismatch(node, &COMPARABLE, right_type));
                    }
                    return Err(mismatch(node, &[left_type], right_type));
                }
            }
        }
        self.finish(node, TypeTag::Boolean)
    }

    fn check_branch(&mut self, node: &Node) -> Result<(), Error> {
        let branch = Branch::from_node(node)?;
        self.visit(branch.condition)?;
        self.visit(branch.then_body)?;
        if let Some(else_body) = branch.else_body {
            self.visit(else_body)?;
        }

        self.expect(node, branch.condition, &[TypeTag::Boolean])?;
        self.expect(node, branch.then_body, &[TypeTag::WellTyped])?;
        if let Some(else_body) = branch.else_body {
            self.expect(node, else_body, &[TypeTag::WellTyped])?;
        }
        self.finish(node, TypeTag::WellTyped)
    }

    fn check_assignment(&mut self, node: &Node) -> Result<(), Error> {
        let assignment = Assignment::from_node(node)?;
        self.visit(assignment.target)?;
        self.visit(assignment.value)?;
        let target_type = self.table.get_type(assignment.target)?;
        let value_type = self.table.get_type(assignment.value)?;

        match (target_type, value_type) {
            (TypeTag::Number, TypeTag::Number) | (TypeTag::String, TypeTag::String) => {}
            (TypeTag::Number, _) | (TypeTag::String, _) => {
                return Err(mismatch(node, &[target_type], value_type));
            }
            _ => {
                return Err(mismatch(node, &[TypeTag::Number, TypeTag::String], target_type));
            }
        }

        if let Some(name) = self.variable_name(assignment.target) {
            self.table.set_defined(&name);
        }
        self.finish(node, TypeTag::WellTyped)
    }

    fn check_loop(&mut self, node: &Node) -> Result<(), Error> {
        match ConditionalLoop::from_node(node)? {
            ConditionalLoop::While(while_loop) => {
                self.visit(while_loop.condition)?;
                self.visit(while_loop.body)?;
                self.expect(node, while_loop.condition, &[TypeTag::Boolean])?;
                self.expect(node, while_loop.body, &[TypeTag::WellTyped])?;
            }
            ConditionalLoop::For(for_loop) => {
                // A later group is only looked at once every earlier one holds.
                for group in for_loop.number_groups() {
                    for slot in group.iter() {
                        self.visit(*slot)?;
                    }
                    for slot in group.iter() {
                        let slot_type = self.table.get_type(*slot)?;
                        if slot_type != TypeTag::Number {
                            return Err(mismatch(node, &[TypeTag::Number], slot_type));
                        }
                    }
                }
                self.visit(for_loop.body)?;
                self.expect(node, for_loop.body, &[TypeTag::WellTyped])?;
            }
        }
        self.finish(node, TypeTag::WellTyped)
    }

    /// P, D and C: one or two well-typed parts.
    fn check_sequence(&mut self, node: &Node, construct: &'static str) -> Result<(), Error> {
        if !(1..=2).contains(&node.arity()) {
            return Err(node.arity_error(construct, "1 or 2"));
        }
        for child in node.children.iter() {
            self.visit(*child)?;
        }
        for child in node.children.iter() {
            self.expect(node, *child, &[TypeTag::WellTyped])?;
        }
        self.finish(node, TypeTag::WellTyped)
    }

    fn check_proc(&mut self, node: &Node) -> Result<(), Error> {
        let proc = ProcDef::from_node(node)?;

        let outer = self.scope;
        self.next_scope += 1;
        self.scope = self.next_scope;
        let body = self.visit(proc.body);
        self.scope = outer;
        body?;

        let ast = self.ast;
        let name = ast.node(proc.name)?;
        let bound = self.table.get_type(proc.name)?;
        if bound.is_bound() {
            return Err(Error::new(
                ErrorImpl::ProcedureAlreadyBound {
                    name: name.lexeme.clone(),
                    bound,
                },
                node.location(),
            ));
        }
        self.expect(node, proc.body, &[TypeTag::WellTyped])?;

        self.assign(proc.name, TypeTag::Procedure)?;
        self.table.set_defined(&name.lexeme);
        self.finish(node, TypeTag::WellTyped)
    }

    fn check_instruction(&mut self, node: &Node) -> Result<(), Error> {
        if node.arity() != 1 {
            return Err(node.arity_error("Instruction", "1"));
        }
        let ast = self.ast;
        let instruction = ast.child(node.id, 0)?;
        if instruction.production == Production::Keyword {
            self.assign(instruction.id, TypeTag::Halt)?;
        } else {
            self.visit(instruction.id)?;
            self.expect(node, instruction.id, &[TypeTag::WellTyped])?;
        }
        self.finish(node, TypeTag::WellTyped)
    }

    /// O and Y: the argument receives a number; it is not inspected.
    fn check_argument(&mut self, node: &Node) -> Result<(), Error> {
        if node.arity() != 2 {
            return Err(node.arity_error("Argument statement", "2"));
        }
        let argument = self.ast.child(node.id, 1)?.id;
        self.assign(argument, TypeTag::Number)?;
        self.finish(node, TypeTag::WellTyped)
    }

    /// The user-defined name under a variable node, if any.
    fn variable_name(&self, id: NodeId) -> Option<String> {
        let mut node = self.ast.node(id).ok()?;
        loop {
            if node.production == Production::UserDefinedName {
                return Some(node.lexeme.clone());
            }
            node = self.ast.node(*node.children.first()?).ok()?;
        }
    }
}

fn mismatch(node: &Node, expected: &[TypeTag], received: TypeTag) -> Error {
    Error::new(
        ErrorImpl::TypeMismatch {
            expected: expected.to_vec(),
            received,
        },
        node.location(),
    )
}

/// Checks `ast` and returns the annotated table with the first error, if any.
///
/// With `report_errors` set the error is also printed as a diagnostic.
pub fn type_check(ast: &Ast, report_errors: bool) -> (TypeTable, Option<Error>) {
    let mut type_checker = match TypeChecker::new(ast) {
        Ok(type_checker) => type_checker,
        Err(error) => {
            if report_errors {
                display_error(&error);
            }
            return (TypeTable::new(), Some(error));
        }
    };

    match type_checker.check() {
        Ok(_) => (type_checker.into_table(), None),
        Err(error) => {
            if report_errors {
                display_error(&error);
            }
            (type_checker.into_table(), Some(error))
        }
    }
}
