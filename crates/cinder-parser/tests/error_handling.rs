// Failure-path tests: syntax errors with positions, and the runtime
// error taxonomy surfacing through compiled programs.

use cinder_grammar::{SYMBOLIC, VERBOSE};
use cinder_parser::{compile, parse_ast};
use cinder_runtime::{Context, Error};

fn run_err(source: &str) -> Error {
    let program = compile(source, &SYMBOLIC).expect("program should parse");
    let mut ctx = Context::new();
    program
        .run(&mut ctx)
        .expect_err("program should fail at runtime")
}

#[test]
fn unconsumed_input_is_a_syntax_error() {
    // A dangling list-close glyph matches no command; the empty
    // program matches, leaving input behind.
    let err = parse_ast("→ab⟧", &SYMBOLIC).expect_err("trailing glyph should fail");
    assert!(err.position >= 3, "position {} too early", err.position);
}

#[test]
fn truncated_command_reports_the_furthest_failure() {
    let err = parse_ast("Ｆ⁵", &SYMBOLIC).expect_err("for without a body should fail");
    assert!(err.position >= 2, "position {} too early", err.position);
}

#[test]
fn verbose_errors_point_past_whitespace() {
    let err = parse_ast("Print( )", &VERBOSE).expect_err("empty print should fail");
    assert!(err.position >= 6, "position {} too early", err.position);
}

#[test]
fn empty_program_is_fine() {
    assert!(compile("", &SYMBOLIC).unwrap().is_empty());
}

#[test]
fn input_exhaustion_is_fatal() {
    assert!(matches!(run_err("Ｓκ"), Error::EndOfInput));
}

#[test]
fn minimum_of_empty_sequence_is_fatal() {
    assert!(matches!(run_err("→⌊⟦⟧"), Error::EmptyReduction));
}

#[test]
fn irreconcilable_operands_are_fatal() {
    assert!(matches!(run_err("→⁻ab"), Error::TypeMismatch { .. }));
    assert!(matches!(run_err("→⪫⁵¦⁵x"), Error::TypeMismatch { .. }));
}

#[test]
fn division_by_zero_is_fatal() {
    assert!(matches!(run_err("→÷¹¦⁰"), Error::DivisionByZero));
}

#[test]
fn odd_rotation_steps_are_rejected() {
    assert!(matches!(
        run_err("→ab⟲Ｃ³"),
        Error::UnsupportedRotation(3)
    ));
}

#[test]
fn nested_evaluation_surfaces_parse_failures() {
    assert!(matches!(run_err("Ｖ´⟧"), Error::Eval(_)));
}

#[test]
fn unknown_names_are_null_not_errors() {
    let program = compile("¿ωa¦b", &SYMBOLIC).unwrap();
    let mut ctx = Context::new();
    program.run(&mut ctx).unwrap();
    assert_eq!(ctx.snapshot(), "b");
}
