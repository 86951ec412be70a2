// End-to-end interpreter tests: compile symbolic programs and check
// the canvas, cursor and scope they leave behind.
//
// Compilation is the parse: these tests exercise the ordered-choice
// grammar dispatch and the closure reductions together.

use cinder_grammar::{Nonterminal, SYMBOLIC};
use cinder_parser::{compile, parse_from, Compiled, Interpreter};
use cinder_runtime::{CapturingRenderer, Context, Error, Value};

fn run(source: &str) -> Context {
    let mut ctx = Context::new();
    let program = compile(source, &SYMBOLIC).expect("program should parse");
    program.run(&mut ctx).expect("program should run");
    ctx
}

fn eval_with(source: &str, ctx: &mut Context) -> Result<Value, Error> {
    let compiled = parse_from(source, &SYMBOLIC, &Interpreter, Nonterminal::Expression)
        .expect("expression should parse");
    match compiled {
        Compiled::Expr(expr) => expr(ctx),
        _ => panic!("expression did not reduce to a closure"),
    }
}

fn eval(source: &str) -> Value {
    eval_with(source, &mut Context::new()).expect("expression should evaluate")
}

#[test]
fn print_right_writes_each_character_and_advances() {
    let ctx = run("→AB");
    assert_eq!(ctx.canvas.get(0, 0).unwrap().glyph, 'A');
    assert_eq!(ctx.canvas.get(1, 0).unwrap().glyph, 'B');
    assert_eq!(ctx.cursor(), (2, 0));
}

#[test]
fn bare_expression_prints_in_the_facing_direction() {
    assert_eq!(run("abc").snapshot(), "abc");
}

#[test]
fn printing_a_number_draws_a_line() {
    assert_eq!(run("⁵").snapshot(), "-----");
    assert_eq!(run("↓³").snapshot(), "|\n|\n|");
}

#[test]
fn for_loop_repeats_its_body() {
    assert_eq!(run("Ｆ³x").snapshot(), "xxx");
}

#[test]
fn for_loop_binds_the_loop_variable() {
    // ι counts 0, 1, 2; printing Sum(ι, 1) draws lines of 1 + 2 + 3
    // dashes end to end.
    assert_eq!(run("Ｆ³⁺ι¹").snapshot(), "------");
}

#[test]
fn while_reevaluates_its_condition_each_iteration() {
    // κ = 3; while κ: print "a", κ = κ - 1. Must stop after 3 prints.
    assert_eq!(run("Ａ³κＷκ«aＡ⁻κ¹κ»").snapshot(), "aaa");
}

#[test]
fn if_branches_on_truthiness() {
    assert_eq!(run("¿¹a¦b").snapshot(), "a");
    assert_eq!(run("¿⁰a¦b").snapshot(), "b");
    // No-else form: falsy condition draws nothing.
    assert!(run("¿⁰a").snapshot().is_empty());
}

#[test]
fn assignment_aliases_lists() {
    // κ and λ name the same list; Push through λ is visible via κ.
    assert_eq!(run("Ａ⟦¹¦²⟧κＡκλ→Ｌ⊞λ³→Ｌκ").snapshot(), "------");
}

#[test]
fn multiprint_replays_from_one_origin_and_restores_the_cursor() {
    let ctx = run("Ｐ-ab");
    assert_eq!(ctx.snapshot(), "bab");
    assert_eq!(ctx.cursor(), (0, 0));
}

#[test]
fn hollow_polygon_draws_a_ring() {
    assert_eq!(run("ＧＨ→³↓³←³↑³#").snapshot(), "###\n# #\n###");
}

#[test]
fn filled_polygon_floods_the_interior() {
    assert_eq!(run("Ｇ→³↓³←³↑³#").snapshot(), "###\n###\n###");
}

#[test]
fn rectangle_uses_line_glyphs() {
    assert_eq!(run("ＢＲ⁴¦³").snapshot(), "|--|\n|  |\n|--|");
}

#[test]
fn box_cycles_its_text_around_the_border() {
    assert_eq!(run("Ｂ⁴¦³*").snapshot(), "****\n*  *\n****");
}

#[test]
fn fill_floods_the_enclosed_region() {
    assert_eq!(
        run("ＧＨ→⁴↓⁴←⁴↑⁴#Ｊ¹¦¹¤*").snapshot(),
        "####\n#**#\n#**#\n####"
    );
}

#[test]
fn rotate_copy_keeps_the_original() {
    let ctx = run("→ab⟲Ｃ²");
    // Originals at (0,0) and (1,0); replica rotated 90° about the
    // cursor, which ended at (2,0).
    assert_eq!(ctx.canvas.get(0, 0).unwrap().glyph, 'a');
    assert_eq!(ctx.canvas.get(1, 0).unwrap().glyph, 'b');
    assert_eq!(ctx.canvas.get(2, -2).unwrap().glyph, 'a');
    assert_eq!(ctx.canvas.get(2, -1).unwrap().glyph, 'b');
}

#[test]
fn reflect_flips_in_place() {
    assert_eq!(run("→ab‖→").snapshot(), "ba");
}

#[test]
fn jump_is_absolute() {
    let ctx = run("Ｊ⁵¦⁵");
    assert_eq!(ctx.cursor(), (5, 5));
}

#[test]
fn pivot_defaults_to_a_quarter_turn() {
    use cinder_runtime::Direction;
    let ctx = run("↷");
    assert_eq!(ctx.facing(), Direction::Down);
    let ctx = run("↷↷↷↷");
    assert_eq!(ctx.facing(), Direction::Right);
}

#[test]
fn clear_erases_and_homes() {
    let ctx = run("→ab⎚");
    assert!(ctx.canvas.is_empty());
    assert_eq!(ctx.cursor(), (0, 0));
}

#[test]
fn input_commands_read_the_queue_in_order() {
    let mut ctx = Context::new();
    ctx.queue_input("hi");
    ctx.queue_input("4");
    let program = compile("Ｓκ→κＮλ→λ", &SYMBOLIC).unwrap();
    program.run(&mut ctx).unwrap();
    // "hi" then a 4-long line.
    assert_eq!(ctx.snapshot(), "hi----");
}

#[test]
fn evaluate_command_runs_nested_source() {
    assert_eq!(run("Ｖ´→ab").snapshot(), "ab");
}

#[test]
fn evaluate_operator_yields_a_value() {
    assert_eq!(run("→Ｖ´⁺´²´¦´³").snapshot(), "-----");
}

#[test]
fn dump_hands_frames_to_the_renderer() {
    let renderer = CapturingRenderer::new();
    let mut ctx = Context::new();
    ctx.install_renderer(Box::new(renderer.clone()));
    let program = compile("→abＤ→c", &SYMBOLIC).unwrap();
    program.run(&mut ctx).unwrap();
    assert_eq!(renderer.frames(), vec!["ab".to_string()]);
    assert_eq!(ctx.snapshot(), "abc");
}

#[test]
fn set_background_shows_in_rendering() {
    assert_eq!(run("ＵＢ.→aＪ¹¦¹→b").snapshot(), "a.\n.b");
}

#[test]
fn dictionary_literals_index_by_key() {
    assert_eq!(run("→§⦃¹a²b⦄²").snapshot(), "b");
}

// --- expression semantics -------------------------------------------------

#[test]
fn sum_polymorphism() {
    assert_eq!(eval("⁺⁵¦³"), Value::Num(8));
    assert_eq!(eval("⁺ab³"), Value::text("ab3"));
    assert_eq!(
        eval("⁺⟦¹¦²⟧³"),
        Value::list(vec![1.into(), 2.into(), 3.into()])
    );
    assert_eq!(
        eval("⁺³⟦¹¦²⟧"),
        Value::list(vec![3.into(), 1.into(), 2.into()])
    );
}

#[test]
fn quotient_on_text_and_numbers() {
    assert_eq!(eval("÷abcdef²"), Value::text("abc"));
    assert_eq!(eval("÷⁷¦²"), Value::Num(3));
}

#[test]
fn find_operators() {
    assert_eq!(
        eval("⌕Ａabcabc¦a"),
        Value::list(vec![0.into(), 3.into()])
    );
    assert_eq!(eval("⌕abcabc¦z"), Value::Num(-1));
}

#[test]
fn comparisons_and_ranges() {
    assert_eq!(eval("‹²¦³"), Value::Bool(true));
    assert_eq!(eval("›²¦³"), Value::Bool(false));
    assert_eq!(eval("⁼²¦²"), Value::Bool(true));
    assert_eq!(
        eval("…·¹¦³"),
        Value::list(vec![1.into(), 2.into(), 3.into()])
    );
    assert_eq!(eval("…¹¦³"), Value::list(vec![1.into(), 2.into()]));
    assert_eq!(eval("…ab⁵"), Value::text("ababa"));
}

#[test]
fn unary_operators() {
    assert_eq!(eval("⁻⁵"), Value::Num(-5));
    assert_eq!(eval("Ｌabc"), Value::Num(3));
    assert_eq!(eval("¬⁰"), Value::Bool(true));
    assert_eq!(eval("Ｉ⁶⁵"), Value::text("A"));
    assert_eq!(eval("ＩAz"), Value::Num(65));
    assert_eq!(eval("↥ab"), Value::text("AB"));
    assert_eq!(eval("↧AB"), Value::text("ab"));
    assert_eq!(eval("⌊⟦³¦¹¦²⟧"), Value::Num(1));
    assert_eq!(eval("⌈⟦³¦¹¦²⟧"), Value::Num(3));
    assert_eq!(eval("⊟⟦¹¦²¦³⟧"), Value::Num(3));
}

#[test]
fn join_split_index() {
    assert_eq!(eval("⪫⟦¹¦²¦³⟧-"), Value::text("1-2-3"));
    assert_eq!(
        eval("⪪a,b,c¦,"),
        Value::list(vec!["a".into(), "b".into(), "c".into()])
    );
    assert_eq!(eval("§abc¹"), Value::text("b"));
    assert_eq!(eval("§⟦¹¦²⟧⁵"), Value::Null);
    assert_eq!(eval("Ｘ²¦¹⁰"), Value::Num(1024));
}

#[test]
fn lazy_operators_short_circuit() {
    // The right operand divides by zero; it must never run.
    assert_eq!(eval("∧⁰÷¹¦⁰"), Value::Num(0));
    assert_eq!(eval("∨¹÷¹¦⁰"), Value::Num(1));
    assert_eq!(eval("⎇¹a¦b"), Value::text("a"));
    assert_eq!(eval("⎇⁰a¦b"), Value::text("b"));
}

#[test]
fn name_lookup_falls_back_to_presets_then_null() {
    let mut ctx = Context::new();
    assert_eq!(
        eval_with("β", &mut ctx).unwrap(),
        Value::text("abcdefghijklmnopqrstuvwxyz")
    );
    assert_eq!(eval_with("ω", &mut ctx).unwrap(), Value::Null);
}

#[test]
fn peek_direction_reads_along_an_arrow() {
    let mut ctx = Context::new();
    let program = compile("→abcＪ⁰¦⁰", &SYMBOLIC).unwrap();
    program.run(&mut ctx).unwrap();
    assert_eq!(eval_with("ＫＤ³→", &mut ctx).unwrap(), Value::text("abc"));
}

#[test]
fn nilary_input_operators_pull_from_the_queue() {
    let mut ctx = Context::new();
    ctx.queue_input("xyz");
    assert_eq!(eval_with("Ｓ", &mut ctx).unwrap(), Value::text("xyz"));
    assert!(matches!(
        eval_with("Ｓ", &mut ctx),
        Err(Error::EndOfInput)
    ));
}

#[test]
fn bounded_random_is_in_range() {
    let mut ctx = Context::with_seed(11);
    for _ in 0..50 {
        let Value::Num(n) = eval_with("‽⁶", &mut ctx).unwrap() else {
            panic!("bounded random should be a number");
        };
        assert!((0..6).contains(&n));
    }
}
