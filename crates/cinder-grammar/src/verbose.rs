//! The verbose grammar: keyword spellings of the symbolic tokens.
//!
//! Production-for-production parallel with `symbolic.rs`; only the
//! terminal spellings differ (keywords, parentheses, `;` separators).

use crate::Nonterminal::*;
use crate::Symbol::{N, T};
use crate::{Grammar, Production, Style, Symbol};

const E: Symbol = N(Expression);
const SEP: Symbol = N(Separator);
const LP: Symbol = T("(");
const RP: Symbol = T(")");

static ARROW: &[Production] = &[
    &[T(":UpLeft")],
    &[T(":UpRight")],
    &[T(":DownRight")],
    &[T(":DownLeft")],
    &[T(":Left")],
    &[T(":Up")],
    &[T(":Right")],
    &[T(":Down")],
];

static MULTIDIRECTIONAL: &[Production] = &[
    &[N(Arrows)],
    &[T(":+"), SEP, N(Multidirectional)],
    &[T(":X"), SEP, N(Multidirectional)],
    &[T(":All"), SEP, N(Multidirectional)],
    &[T(":Vertical"), SEP, N(Multidirectional)],
    &[T(":Horizontal"), SEP, N(Multidirectional)],
    &[],
];

static SIDE: &[Production] = &[&[N(Arrow), SEP, E]];

static SEPARATOR: &[Production] = &[&[T(";")], &[]];

static LEXICAL: &[Production] = &[];

static ARROWS: &[Production] = &[&[N(Arrow), SEP, N(Arrows)], &[N(Arrow)]];

static SIDES: &[Production] = &[&[N(Side), SEP, N(Sides)], &[N(Side)]];

static EXPRESSIONS: &[Production] = &[&[E, N(Expressions)], &[E]];

static PAIR_EXPRESSIONS: &[Production] = &[&[E, E, N(PairExpressions)], &[E, E]];

static LIST: &[Production] = &[&[T("["), N(Expressions), T("]")], &[T("["), T("]")]];

static ARROW_LIST: &[Production] = &[&[T("["), N(Multidirectional), T("]")], &[T("["), T("]")]];

static DICTIONARY: &[Production] = &[&[T("{"), N(PairExpressions), T("}")], &[T("{"), T("}")]];

static EXPRESSION: &[Production] = &[
    &[N(Number), SEP],
    &[N(String), SEP],
    &[N(Name), SEP],
    &[N(List), SEP],
    &[N(Dictionary), SEP],
    &[N(OtherOperator), SEP],
    &[N(LazyTernary), LP, E, E, E, RP],
    &[N(LazyBinary), LP, E, E, RP],
    &[N(Binary), LP, E, E, RP],
    &[N(Unary), LP, E, RP],
    &[N(Nilary), SEP],
];

static NILARY: &[Production] = &[
    &[T("InputString")],
    &[T("InputNumber")],
    &[T("Random")],
    &[T("PeekAll")],
    &[T("Peek")],
];

static UNARY: &[Production] = &[
    &[T("Negate")],
    &[T("Length")],
    &[T("Not")],
    &[T("Cast")],
    &[T("Random")],
    &[T("Evaluate")],
    &[T("Pop")],
    &[T("Lowercase")],
    &[T("Uppercase")],
    &[T("Minimum")],
    &[T("Maximum")],
];

static BINARY: &[Production] = &[
    &[T("Add")],
    &[T("Subtract")],
    &[T("Multiply")],
    &[T("Divide")],
    &[T("Modulo")],
    &[T("Equals")],
    &[T("Less")],
    &[T("Greater")],
    &[T("InclusiveRange")],
    &[T("Mold")],
    &[T("Exponentiate")],
    &[T("AtIndex")],
    &[T("Push")],
    &[T("Join")],
    &[T("Split")],
    &[T("FindAll")],
    &[T("Find")],
];

static LAZY_BINARY: &[Production] = &[&[T("And")], &[T("Or")]];

static LAZY_TERNARY: &[Production] = &[&[T("Ternary")]];

static OTHER_OPERATOR: &[Production] = &[&[T("PeekDirection"), LP, E, N(Arrow), RP]];

static PROGRAM: &[Production] = &[&[N(Command), SEP, N(Program)], &[]];

static BODY: &[Production] = &[&[T("{"), N(Program), T("}")], &[N(Command)]];

static COMMAND: &[Production] = &[
    &[T("InputString"), LP, N(Name), RP],
    &[T("InputNumber"), LP, N(Name), RP],
    &[T("Evaluate"), LP, E, RP],
    &[T("Print"), LP, N(Arrow), SEP, E, RP],
    &[T("Print"), LP, E, RP],
    &[T("Multiprint"), LP, N(Multidirectional), SEP, E, RP],
    &[T("Multiprint"), LP, E, RP],
    &[T("PolygonHollow"), LP, N(Sides), SEP, E, RP],
    &[T("PolygonHollow"), LP, N(Multidirectional), SEP, E, E, RP],
    &[T("Polygon"), LP, N(Sides), SEP, E, RP],
    &[T("Polygon"), LP, N(Multidirectional), SEP, E, E, RP],
    &[T("Rectangle"), LP, E, E, RP],
    &[T("Box"), LP, E, E, E, RP],
    &[T("Move"), LP, N(Arrow), RP],
    &[T("Move"), LP, N(Arrow), RP],
    &[T("Move"), LP, E, N(Arrow), RP],
    &[T("PivotLeft"), LP, E, RP],
    &[T("PivotLeft"), LP, RP],
    &[T("PivotRight"), LP, E, RP],
    &[T("PivotRight"), LP, RP],
    &[T("Jump"), LP, E, E, RP],
    &[T("RotateTransform"), LP, E, RP],
    &[T("ReflectTransform"), LP, N(ArrowList), RP],
    &[T("ReflectTransform"), LP, N(Arrow), RP],
    &[T("ReflectMirror"), LP, N(ArrowList), RP],
    &[T("ReflectMirror"), LP, N(Arrow), RP],
    &[T("RotateCopy"), LP, E, RP],
    &[T("ReflectCopy"), LP, N(ArrowList), RP],
    &[T("ReflectCopy"), LP, N(Arrow), RP],
    &[T("RotateOverlap"), LP, E, RP],
    &[T("ReflectOverlap"), LP, N(ArrowList), RP],
    &[T("ReflectOverlap"), LP, N(Arrow), RP],
    &[T("Rotate"), LP, E, RP],
    &[T("Reflect"), LP, N(Arrow), RP],
    &[T("Copy"), LP, E, E, RP],
    &[T("for"), LP, E, RP, N(Body)],
    &[T("while"), LP, E, RP, N(Body)],
    &[T("if"), LP, E, RP, N(Body), N(Body)],
    &[T("if"), LP, E, RP, N(Body)],
    &[T("Assign"), LP, E, N(Name), RP],
    &[T("Fill"), LP, E, RP],
    &[T("SetBackground"), LP, E, RP],
    &[T("Dump"), LP, RP],
    &[T("RefreshFor"), LP, E, E, RP, N(Body)],
    &[T("RefreshWhile"), LP, E, E, RP, N(Body)],
    &[T("Refresh"), LP, E, RP],
    &[T("Refresh"), LP, RP],
    &[T("Trim"), LP, E, E, RP],
    &[T("Clear"), LP, RP],
    &[T("Extend"), LP, E, E, RP],
    &[T("Extend"), LP, E, RP],
];

/// The verbose grammar instance.
pub static VERBOSE: Grammar = Grammar {
    style: Style::Verbose,
    table: [
        ARROW,
        MULTIDIRECTIONAL,
        SIDE,
        SEPARATOR,
        LEXICAL,
        LEXICAL,
        LEXICAL,
        ARROWS,
        SIDES,
        EXPRESSIONS,
        PAIR_EXPRESSIONS,
        LIST,
        ARROW_LIST,
        DICTIONARY,
        EXPRESSION,
        NILARY,
        UNARY,
        BINARY,
        LAZY_BINARY,
        LAZY_TERNARY,
        OTHER_OPERATOR,
        PROGRAM,
        BODY,
        COMMAND,
    ],
};
