//! The symbolic grammar: one code-page glyph per token.

use crate::Nonterminal::*;
use crate::Symbol::{N, T};
use crate::{Grammar, Production, Style, Symbol};

const E: Symbol = N(Expression);
const SEP: Symbol = N(Separator);

static ARROW: &[Production] = &[
    &[T("↖")],
    &[T("↗")],
    &[T("↘")],
    &[T("↙")],
    &[T("←")],
    &[T("↑")],
    &[T("→")],
    &[T("↓")],
];

static MULTIDIRECTIONAL: &[Production] = &[
    &[N(Arrows)],
    &[T("+"), SEP, N(Multidirectional)],
    &[T("X"), SEP, N(Multidirectional)],
    &[T("*"), SEP, N(Multidirectional)],
    &[T("|"), SEP, N(Multidirectional)],
    &[T("-"), SEP, N(Multidirectional)],
    &[],
];

static SIDE: &[Production] = &[&[N(Arrow), SEP, E]];

static SEPARATOR: &[Production] = &[&[T("¦")], &[]];

static LEXICAL: &[Production] = &[];

static ARROWS: &[Production] = &[&[N(Arrow), SEP, N(Arrows)], &[N(Arrow)]];

static SIDES: &[Production] = &[&[N(Side), SEP, N(Sides)], &[N(Side)]];

static EXPRESSIONS: &[Production] = &[&[E, N(Expressions)], &[E]];

static PAIR_EXPRESSIONS: &[Production] = &[&[E, E, N(PairExpressions)], &[E, E]];

static LIST: &[Production] = &[&[T("⟦"), N(Expressions), T("⟧")], &[T("⟦"), T("⟧")]];

static ARROW_LIST: &[Production] = &[&[T("⟦"), N(Multidirectional), T("⟧")], &[T("⟦"), T("⟧")]];

static DICTIONARY: &[Production] = &[&[T("⦃"), N(PairExpressions), T("⦄")], &[T("⦃"), T("⦄")]];

static EXPRESSION: &[Production] = &[
    &[N(Number), SEP],
    &[N(String), SEP],
    &[N(Name), SEP],
    &[N(List), SEP],
    &[N(Dictionary), SEP],
    &[N(OtherOperator), SEP],
    &[N(LazyTernary), E, E, E],
    &[N(LazyBinary), E, E],
    &[N(Binary), E, E],
    &[N(Unary), E],
    &[N(Nilary), SEP],
];

static NILARY: &[Production] = &[&[T("Ｓ")], &[T("Ｎ")], &[T("‽")], &[T("ＫＡ")], &[T("Ｋ")]];

static UNARY: &[Production] = &[
    &[T("⁻")],
    &[T("Ｌ")],
    &[T("¬")],
    &[T("Ｉ")],
    &[T("‽")],
    &[T("Ｖ")],
    &[T("⊟")],
    &[T("↧")],
    &[T("↥")],
    &[T("⌊")],
    &[T("⌈")],
];

static BINARY: &[Production] = &[
    &[T("⁺")],
    &[T("⁻")],
    &[T("×")],
    &[T("÷")],
    &[T("﹪")],
    &[T("⁼")],
    &[T("‹")],
    &[T("›")],
    &[T("…·")],
    &[T("…")],
    &[T("Ｘ")],
    &[T("§")],
    &[T("⊞")],
    &[T("⪫")],
    &[T("⪪")],
    &[T("⌕Ａ")],
    &[T("⌕")],
];

static LAZY_BINARY: &[Production] = &[&[T("∧")], &[T("∨")]];

static LAZY_TERNARY: &[Production] = &[&[T("⎇")]];

static OTHER_OPERATOR: &[Production] = &[&[T("ＫＤ"), E, N(Arrow)]];

static PROGRAM: &[Production] = &[&[N(Command), SEP, N(Program)], &[]];

static BODY: &[Production] = &[&[T("«"), N(Program), T("»")], &[N(Command)]];

static COMMAND: &[Production] = &[
    &[T("Ｓ"), N(Name)],
    &[T("Ｎ"), N(Name)],
    &[T("Ｖ"), E],
    &[N(Arrow), SEP, E],
    &[E],
    &[T("Ｐ"), N(Multidirectional), SEP, E],
    &[T("Ｐ"), E],
    &[T("ＧＨ"), N(Sides), SEP, E],
    &[T("ＧＨ"), N(Multidirectional), SEP, E, E],
    &[T("Ｇ"), N(Sides), SEP, E],
    &[T("Ｇ"), N(Multidirectional), SEP, E, E],
    &[T("ＢＲ"), E, E],
    &[T("Ｂ"), E, E, E],
    &[N(Arrow)],
    &[T("Ｍ"), N(Arrow)],
    &[T("Ｍ"), E, N(Arrow)],
    &[T("↶"), E],
    &[T("↶")],
    &[T("↷"), E],
    &[T("↷")],
    &[T("Ｊ"), E, E],
    &[T("⟲Ｔ"), E],
    &[T("‖Ｔ"), N(ArrowList)],
    &[T("‖Ｔ"), N(Arrow)],
    &[T("‖Ｍ"), N(ArrowList)],
    &[T("‖Ｍ"), N(Arrow)],
    &[T("⟲Ｃ"), E],
    &[T("‖Ｃ"), N(ArrowList)],
    &[T("‖Ｃ"), N(Arrow)],
    &[T("⟲Ｏ"), E],
    &[T("‖Ｏ"), N(ArrowList)],
    &[T("‖Ｏ"), N(Arrow)],
    &[T("⟲"), E],
    &[T("‖"), N(Arrow)],
    &[T("Ｃ"), E, E],
    &[T("Ｆ"), E, N(Body)],
    &[T("Ｗ"), E, N(Body)],
    &[T("¿"), E, N(Body), N(Body)],
    &[T("¿"), E, N(Body)],
    &[T("Ａ"), E, N(Name)],
    &[T("¤"), E],
    &[T("ＵＢ"), E],
    &[T("Ｄ")],
    &[T("ＨＦ"), E, E, N(Body)],
    &[T("ＨＷ"), E, E, N(Body)],
    &[T("Ｈ"), E],
    &[T("Ｈ")],
    &[T("Ｔ"), E, E],
    &[T("⎚")],
    &[T("ＵＥ"), E, E],
    &[T("ＵＥ"), E],
];

/// The symbolic grammar instance.
pub static SYMBOLIC: Grammar = Grammar {
    style: Style::Symbolic,
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
