//! Integration tests for end-to-end checking.
//!
//! These tests hand complete SPL syntax trees to the checker, the way the
//! parser would, and verify the verdict, the annotated type table and the
//! single diagnostic produced on failure.

use spl_checker::{
    ast::{
        ast::{Ast, AstBuilder, NodeId},
        productions::Production,
    },
    errors::errors::{ErrorImpl, ErrorKind},
    format_error,
    type_checker::{
        type_checker::{type_check, TypeChecker},
        types::TypeTag,
    },
    MK_NODE,
};

/// Adds a node from a parser class name, as parser glue would.
fn add(builder: &mut AstBuilder, class: &str, lexeme: &str, children: Vec<NodeId>) -> NodeId {
    builder
        .node(Production::from_token_class(class), lexeme, children)
        .unwrap()
}

fn number_var(builder: &mut AstBuilder, name: &str) -> NodeId {
    let leaf = add(builder, "user-defined name", name, vec![]);
    add(builder, "N", name, vec![leaf])
}

/// `P[C[I[body]]]`
fn program(mut builder: AstBuilder, body: NodeId) -> Ast {
    let instr = add(&mut builder, "I", "I", vec![body]);
    let code = add(&mut builder, "C", "C", vec![instr]);
    let prog = add(&mut builder, "P", "P", vec![code]);
    builder.build(prog).unwrap()
}

#[test]
fn test_assign_number_literal() {
    // x = 5
    let mut builder = AstBuilder::new();
    let target = number_var(&mut builder, "x");
    let assign_op = add(&mut builder, "=", "=", vec![]);
    let five = add(&mut builder, "number", "5", vec![]);
    let assign = add(&mut builder, "A", "=", vec![target, assign_op, five]);
    let ast = program(builder, assign);

    let (table, error) = type_check(&ast, false);

    assert!(error.is_none(), "Type checking should succeed");
    assert_eq!(table.type_of(assign), TypeTag::WellTyped);
    assert_eq!(table.type_of(target), TypeTag::Number);
    assert_eq!(table.type_of(five), TypeTag::Number);
    assert_eq!(table.type_of(ast.root()), TypeTag::WellTyped);
}

#[test]
fn test_if_eq_then_halt() {
    // if (eq(x, y)) then {halt}
    let mut builder = AstBuilder::new();
    let if_token = add(&mut builder, "if", "if", vec![]);
    let x = number_var(&mut builder, "x");
    let eq = add(&mut builder, "eq", "eq", vec![]);
    let y = number_var(&mut builder, "y");
    let condition = add(&mut builder, "B", "eq", vec![x, eq, y]);
    let then_token = add(&mut builder, "then", "then", vec![]);
    let halt = add(&mut builder, "keyword", "halt", vec![]);
    let halt_instr = add(&mut builder, "I", "halt", vec![halt]);
    let body = add(&mut builder, "C", "C", vec![halt_instr]);
    let branch = add(&mut builder, "W", "if", vec![if_token, condition, then_token, body]);
    let ast = program(builder, branch);

    let (table, error) = type_check(&ast, false);

    assert!(error.is_none(), "Type checking should succeed");
    assert_eq!(table.type_of(condition), TypeTag::Boolean);
    assert_eq!(table.type_of(branch), TypeTag::WellTyped);
    assert_eq!(table.type_of(halt), TypeTag::Halt);
    assert_eq!(table.type_of(eq), TypeTag::Boolean);
    assert!(table.all_typed());
}

#[test]
fn test_assign_string_to_number_variable() {
    // x = "hi", where x is a number variable
    let mut builder = AstBuilder::new();
    let target = number_var(&mut builder, "x");
    let assign_op = add(&mut builder, "=", "=", vec![]);
    let hi = add(&mut builder, "short string", "\"hi\"", vec![]);
    let assign = add(&mut builder, "A", "=", vec![target, assign_op, hi]);
    let ast = program(builder, assign);

    let (table, error) = type_check(&ast, false);

    let error = error.expect("Type checking should fail");
    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    assert_eq!(error.get_location().node, assign);
    assert_eq!(error.type_pair(), Some((String::from("Number"), TypeTag::String)));
    // Nothing above the failing assignment was typed.
    assert_eq!(table.type_of(ast.root()), TypeTag::Unbound);

    let diagnostic = format_error(&error);
    assert!(diagnostic.contains("-> node ["));
    assert!(diagnostic.contains("class: A"));
    assert!(diagnostic.contains("Expected a type of Number"));
    assert!(diagnostic.contains("Received a type of String"));
}

#[test]
fn test_counted_loop_stops_at_bound_group() {
    // for (i = 0; (x eq y) < n; ...) with a boolean where the bound belongs
    let mut builder = AstBuilder::new();
    let for_token = add(&mut builder, "for", "for", vec![]);
    let counter = number_var(&mut builder, "i");
    let init = add(&mut builder, "=", "=", vec![]);
    let zero = add(&mut builder, "number", "0", vec![]);

    let x = number_var(&mut builder, "x");
    let eq = add(&mut builder, "eq", "eq", vec![]);
    let y = number_var(&mut builder, "y");
    let bound_left = add(&mut builder, "B", "eq", vec![x, eq, y]);
    let less = add(&mut builder, "<", "<", vec![]);
    let bound_right = number_var(&mut builder, "n");

    let step_target = number_var(&mut builder, "i");
    let step = add(&mut builder, "=", "=", vec![]);
    let add_token = add(&mut builder, "add", "add", vec![]);
    let step_operand = number_var(&mut builder, "i");
    let one = add(&mut builder, "number", "1", vec![]);

    let halt = add(&mut builder, "keyword", "halt", vec![]);
    let halt_instr = add(&mut builder, "I", "halt", vec![halt]);
    let body = add(&mut builder, "C", "C", vec![halt_instr]);

    let counted = add(
        &mut builder,
        "Z",
        "for",
        vec![
            for_token, counter, init, zero, bound_left, less, bound_right, step_target, step,
            add_token, step_operand, one, body,
        ],
    );
    let ast = program(builder, counted);

    let (table, error) = type_check(&ast, false);

    let error = error.expect("Type checking should fail");
    assert_eq!(error.get_location().node, counted);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::TypeMismatch {
            expected: vec![TypeTag::Number],
            received: TypeTag::Boolean
        }
    );
    assert_eq!(table.type_of(counter), TypeTag::Number);
    assert_eq!(table.type_of(zero), TypeTag::Number);
    // The step group and the body are never reached.
    assert_eq!(table.type_of(step_target), TypeTag::Unbound);
    assert_eq!(table.type_of(step_operand), TypeTag::Unbound);
    assert_eq!(table.type_of(one), TypeTag::Unbound);
    assert_eq!(table.type_of(body), TypeTag::Unbound);
}

#[test]
fn test_boolean_expression_with_four_children() {
    let mut builder = AstBuilder::new();
    let x = number_var(&mut builder, "x");
    let eq = add(&mut builder, "eq", "eq", vec![]);
    let y = number_var(&mut builder, "y");
    let z = number_var(&mut builder, "z");
    let condition = add(&mut builder, "B", "eq", vec![x, eq, y, z]);
    let ast = builder.build(condition).unwrap();

    let (_, error) = type_check(&ast, false);

    let error = error.expect("Type checking should fail");
    assert_eq!(error.kind(), ErrorKind::Structural);
    assert!(error.type_pair().is_none());
    assert!(!format_error(&error).contains("Expected a type of"));
}

#[test]
fn test_boolean_expression_arity_boundary() {
    let mut builder = AstBuilder::new();
    let not = add(&mut builder, "not", "not", vec![]);
    let x = number_var(&mut builder, "x");
    let unary = add(&mut builder, "B", "not", vec![not, x]);
    let ast = builder.build(unary).unwrap();

    // Two children: the unary rule, which wants a boolean operand.
    let (_, error) = type_check(&ast, false);
    assert_eq!(
        error.unwrap().type_pair(),
        Some((String::from("Boolean"), TypeTag::Number))
    );

    let mut builder = AstBuilder::new();
    let x = number_var(&mut builder, "x");
    let less = add(&mut builder, "<", "<", vec![]);
    let y = number_var(&mut builder, "y");
    let binary = add(&mut builder, "B", "<", vec![x, less, y]);
    let ast = builder.build(binary).unwrap();

    // Three children: the binary rule; the boolean itself is not a program.
    let (table, _) = type_check(&ast, false);
    assert_eq!(table.type_of(binary), TypeTag::Boolean);
}

/// A program with a procedure, a loop, a branch and output.
fn full_program() -> Ast {
    let mut builder = AstBuilder::new();

    // while (x < n) { x = add(x, 1) }
    let while_token = add(&mut builder, "while", "while", vec![]);
    let x = number_var(&mut builder, "x");
    let less = add(&mut builder, "<", "<", vec![]);
    let n = number_var(&mut builder, "n");
    let condition = add(&mut builder, "B", "<", vec![x, less, n]);
    let target = number_var(&mut builder, "x");
    let assign_op = add(&mut builder, "=", "=", vec![]);
    let add_token = add(&mut builder, "add", "add", vec![]);
    let operand = number_var(&mut builder, "x");
    let one = add(&mut builder, "number", "1", vec![]);
    let calc = add(&mut builder, "L", "add", vec![add_token, operand, one]);
    let assign = add(&mut builder, "A", "=", vec![target, assign_op, calc]);
    let assign_instr = add(&mut builder, "I", "=", vec![assign]);
    let loop_body = add(&mut builder, "C", "C", vec![assign_instr]);
    let while_loop = add(&mut builder, "Z", "while", vec![while_token, condition, loop_body]);
    let loop_instr = add(&mut builder, "I", "while", vec![while_loop]);

    // output(x)
    let output = add(&mut builder, "output", "output", vec![]);
    let value = add(&mut builder, "user-defined name", "x", vec![]);
    let io = add(&mut builder, "O", "output", vec![output, value]);
    let io_instr = add(&mut builder, "I", "output", vec![io]);

    let tail = add(&mut builder, "C", "C", vec![io_instr]);
    let code = add(&mut builder, "C", "C", vec![loop_instr, tail]);

    // proc p1 { halt }
    let proc_token = add(&mut builder, "proc", "proc", vec![]);
    let name = add(&mut builder, "user-defined name", "p1", vec![]);
    let halt = MK_NODE!(builder, Production::Keyword, "halt").unwrap();
    let halt_instr = MK_NODE!(builder, Production::Instr, "halt", [halt]).unwrap();
    let proc_body = MK_NODE!(builder, Production::Code, "C", [halt_instr]).unwrap();
    let proc = add(&mut builder, "R", "p1", vec![proc_token, name, proc_body]);
    let defs = add(&mut builder, "D", "D", vec![proc]);

    let prog = add(&mut builder, "P", "P", vec![code, defs]);
    builder.build(prog).unwrap()
}

#[test]
fn test_full_program_is_well_typed() {
    let ast = full_program();

    let (table, error) = type_check(&ast, false);

    assert!(error.is_none(), "Type checking should succeed");
    assert_eq!(table.len(), ast.len());
    assert!(table.all_typed());
    assert!(table.iter().any(|record| record.type_tag == TypeTag::Procedure));
}

#[test]
fn test_check_is_deterministic() {
    let ast = full_program();

    let (first, _) = type_check(&ast, false);
    let (second, _) = type_check(&full_program(), false);

    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_recheck_keeps_assignments() {
    let ast = full_program();
    let mut type_checker = TypeChecker::new(&ast).unwrap();

    assert_eq!(type_checker.check().unwrap(), TypeTag::WellTyped);
    let before: Vec<TypeTag> = type_checker.table().iter().map(|record| record.type_tag).collect();

    assert_eq!(type_checker.check().unwrap(), TypeTag::WellTyped);
    let after: Vec<TypeTag> = type_checker.table().iter().map(|record| record.type_tag).collect();

    assert_eq!(before, after);
}
