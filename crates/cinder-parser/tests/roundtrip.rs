// Canonical re-serialization round trips.
//
// The stringifier must be a left inverse of parsing up to canonical
// spelling: canonicalizing a program and re-parsing it yields the same
// AST, whichever grammar the original was written in.

use cinder_grammar::{SYMBOLIC, VERBOSE};
use cinder_parser::{canonicalize, parse_ast};

const SYMBOLIC_PROGRAMS: &[&str] = &[
    "→abc",
    "abc",
    "⁵",
    "Ｆ³x",
    "Ａ³κＷκ«aＡ⁻κ¹κ»",
    "ＧＨ→³↓³←³↑³#",
    "Ｇ+¦³*",
    "¿⁰a¦b",
    "¿¹a",
    "Ｐ-ab",
    "Ｊ⁵¦⁵",
    "ＢＲ⁴¦³",
    "Ｂ³¦³#",
    "→ab⟲Ｃ²",
    "‖Ｃ→",
    "‖Ｔ⟦→↓⟧",
    "Ｍ³→",
    "↶²↷",
    "¤*",
    "ＵＢ.",
    "Ｄ⎚Ｈ",
    "ＨＦ¹⁰¦³x",
    "Ｔ²¦²ＵＥ¹",
    "→⌕Ａabcabc¦a",
    "→⎇κa¦b",
    "→§⦃¹a²b⦄²",
    "→⁺⟦¹²³⟧⁴",
    "Ｓκ→κ",
    "Ｖ´→ab",
    "→ＫＤ³→",
];

const VERBOSE_PROGRAMS: &[&str] = &[
    r#"Print("abc")"#,
    r#"Print(:Right; "abc")"#,
    r#"Print(5)"#,
    r#"for (3) Print("x")"#,
    r#"Assign(3 k) while (k) { Print("a") Assign(Subtract(k; 1) k) }"#,
    r#"if (0) Print("a") Print("b")"#,
    r##"PolygonHollow(:Right; 3; :Down; 3; :Left; 3; :Up; 3; "#")"##,
    r#"Rectangle(4; 3)"#,
    r##"Box(3; 3; "#")"##,
    r#"Multiprint(:Horizontal; "ab")"#,
    r#"Jump(5; 5)"#,
    r#"Move(3 :Right)"#,
    r#"PivotLeft(2) PivotRight()"#,
    r#"RotateCopy(2) ReflectCopy(:Right)"#,
    r#"ReflectTransform([:Right :Down])"#,
    r#"Fill("*") SetBackground(".")"#,
    r#"Dump() Clear() Refresh()"#,
    r#"Print(Sum(5; 3))"#,
    r#"Print(AtIndex({1 "a" 2 "b"}; 2))"#,
    r#"Print(FindAll("abcabc"; "a"))"#,
    r#"Print(Ternary(1; "a"; "b"))"#,
    r#"InputString(k) Print(k)"#,
    r#"Evaluate("abc")"#,
    r#"Print(PeekDirection(3; :Right))"#,
    r#"Trim(2; 2) Extend(1)"#,
];

#[test]
fn symbolic_canonicalization_is_a_left_inverse() {
    for source in SYMBOLIC_PROGRAMS {
        let direct = parse_ast(source, &SYMBOLIC)
            .unwrap_or_else(|err| panic!("{source:?} should parse: {err}"));
        let canonical = canonicalize(source, &SYMBOLIC)
            .unwrap_or_else(|err| panic!("{source:?} should stringify: {err}"));
        let reparsed = parse_ast(&canonical, &SYMBOLIC)
            .unwrap_or_else(|err| panic!("canonical {canonical:?} of {source:?} should parse: {err}"));
        assert_eq!(
            direct, reparsed,
            "round trip changed the tree: {source:?} → {canonical:?}"
        );
    }
}

#[test]
fn symbolic_canonicalization_is_idempotent() {
    for source in SYMBOLIC_PROGRAMS {
        let once = canonicalize(source, &SYMBOLIC).unwrap();
        let twice = canonicalize(&once, &SYMBOLIC)
            .unwrap_or_else(|err| panic!("canonical {once:?} should re-stringify: {err}"));
        assert_eq!(once, twice, "canonicalizing {source:?} is not stable");
    }
}

#[test]
fn verbose_programs_canonicalize_into_the_symbolic_grammar() {
    for source in VERBOSE_PROGRAMS {
        let direct = parse_ast(source, &VERBOSE)
            .unwrap_or_else(|err| panic!("{source:?} should parse: {err}"));
        let canonical = canonicalize(source, &VERBOSE)
            .unwrap_or_else(|err| panic!("{source:?} should stringify: {err}"));
        let reparsed = parse_ast(&canonical, &SYMBOLIC)
            .unwrap_or_else(|err| panic!("canonical {canonical:?} of {source:?} should parse: {err}"));
        assert_eq!(
            direct, reparsed,
            "cross-grammar round trip changed the tree: {source:?} → {canonical:?}"
        );
    }
}

#[test]
fn long_literals_compress_and_still_round_trip() {
    let source = "→the quick brown fox jumps over the lazy dog";
    let canonical = canonicalize(source, &SYMBOLIC).unwrap();
    assert!(
        canonical.chars().count() < source.chars().count(),
        "long ASCII text should compress: {canonical:?}"
    );
    assert_eq!(
        parse_ast(source, &SYMBOLIC).unwrap(),
        parse_ast(&canonical, &SYMBOLIC).unwrap()
    );
}

#[test]
fn adjacent_literals_keep_their_boundary() {
    // Two numbers in a row must not merge into one literal.
    let direct = parse_ast("⁵¦⁶", &SYMBOLIC).unwrap();
    let canonical = canonicalize("⁵¦⁶", &SYMBOLIC).unwrap();
    assert_eq!(direct, parse_ast(&canonical, &SYMBOLIC).unwrap());
    // Same for two bare strings.
    let direct = parse_ast("ab¦cd", &SYMBOLIC).unwrap();
    let canonical = canonicalize("ab¦cd", &SYMBOLIC).unwrap();
    assert_eq!(direct, parse_ast(&canonical, &SYMBOLIC).unwrap());
}
