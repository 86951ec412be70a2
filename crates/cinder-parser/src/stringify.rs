//! The stringifier backend: canonical symbolic re-serialization.
//!
//! Whatever grammar parsed the source, the output is the symbolic
//! spelling: operator classes map to their canonical glyphs, numbers to
//! superscript digits, names to Greek letters, and string literals go
//! through the codec (compressed when that is shorter than escaping).
//! Bodies wrapping more than one command keep their `«»` block
//! delimiters; single-command bodies render bare.
//!
//! Adjacent fragments that would lex back as one token (two numbers,
//! two bare strings) get a `¦` separator; everywhere else separators
//! are dropped.

use cinder_codepage::{ascii_for_greek, codec, to_superscript, SUPERSCRIPTS};
use cinder_grammar::Nonterminal;

use crate::engine::{Part, Reducer};

/// A canonical fragment. `commands` counts the commands of a Program
/// value so Body can decide between bare and block spelling; it is zero
/// for everything else.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub text: String,
    commands: usize,
}

impl Fragment {
    fn new(text: impl Into<String>) -> Fragment {
        Fragment {
            text: text.into(),
            commands: 0,
        }
    }
}

const ARROW_GLYPHS: [&str; 8] = ["↖", "↗", "↘", "↙", "←", "↑", "→", "↓"];
const NILARY_GLYPHS: [&str; 5] = ["Ｓ", "Ｎ", "‽", "ＫＡ", "Ｋ"];
const UNARY_GLYPHS: [&str; 11] = ["⁻", "Ｌ", "¬", "Ｉ", "‽", "Ｖ", "⊟", "↧", "↥", "⌊", "⌈"];
const BINARY_GLYPHS: [&str; 17] = [
    "⁺", "⁻", "×", "÷", "﹪", "⁼", "‹", "›", "…·", "…", "Ｘ", "§", "⊞", "⪫", "⪪", "⌕Ａ", "⌕",
];
const COMMAND_GLYPHS: [&str; 51] = [
    "Ｓ", "Ｎ", "Ｖ", "", "", "Ｐ", "Ｐ", "ＧＨ", "ＧＨ", "Ｇ", "Ｇ", "ＢＲ", "Ｂ", "", "Ｍ",
    "Ｍ", "↶", "↶", "↷", "↷", "Ｊ", "⟲Ｔ", "‖Ｔ", "‖Ｔ", "‖Ｍ", "‖Ｍ", "⟲Ｃ", "‖Ｃ", "‖Ｃ",
    "⟲Ｏ", "‖Ｏ", "‖Ｏ", "⟲", "‖", "Ｃ", "Ｆ", "Ｗ", "¿", "¿", "Ａ", "¤", "ＵＢ", "Ｄ", "ＨＦ",
    "ＨＷ", "Ｈ", "Ｈ", "Ｔ", "⎚", "ＵＥ", "ＵＥ",
];

/// Would `head` followed directly by `tail` lex back as one token?
fn merges(head: &str, tail: &str) -> bool {
    let (Some(last), Some(first)) = (head.chars().last(), tail.chars().next()) else {
        return false;
    };
    let superscript = |c: char| SUPERSCRIPTS.contains(c);
    let stringy = |c: char| (' '..='~').contains(&c) || matches!(c, '¶' | '⸿' | '´');
    // A literal ending in an escape pair keeps the scanner running no
    // matter what the escaped character was.
    let head_open = stringy(last) || head.chars().rev().nth(1) == Some('´');
    (superscript(last) && superscript(first)) || (head_open && stringy(first))
}

/// Concatenate fragments, inserting `¦` wherever two would merge.
fn glue(fragments: &[&str]) -> String {
    glue_with("", fragments)
}

/// [`glue`] with a leading token (a command or operator glyph).
fn glue_with(head: &str, fragments: &[&str]) -> String {
    let mut out = String::from(head);
    for fragment in fragments {
        if fragment.is_empty() {
            continue;
        }
        if merges(&out, fragment) {
            out.push('¦');
        }
        out.push_str(fragment);
    }
    out
}

/// The stringifier reducer.
pub struct Stringifier;

fn values(parts: Vec<Part<Fragment>>) -> Vec<Fragment> {
    parts
        .into_iter()
        .filter_map(|part| match part {
            Part::Value(value) => Some(value),
            Part::Terminal(_) => None,
        })
        .collect()
}

impl Reducer for Stringifier {
    type Value = Fragment;

    fn string_literal(&self, text: &str) -> Fragment {
        Fragment::new(codec::compress(text))
    }

    fn number_literal(&self, value: i64) -> Fragment {
        Fragment::new(to_superscript(value))
    }

    fn name_literal(&self, name: char) -> Fragment {
        // Verbose names arrive canonicalized to Greek already; keep the
        // ASCII table in the loop so an unmapped name is loud.
        debug_assert!(ascii_for_greek(name).is_some(), "unknown name {name:?}");
        Fragment::new(name.to_string())
    }

    fn reduce(
        &self,
        nonterminal: Nonterminal,
        production: usize,
        parts: Vec<Part<Fragment>>,
    ) -> Fragment {
        let v = values(parts);
        let texts: Vec<&str> = v.iter().map(|f| f.text.as_str()).collect();
        match nonterminal {
            Nonterminal::Separator => Fragment::new(""),
            Nonterminal::Arrow => Fragment::new(ARROW_GLYPHS[production]),
            Nonterminal::Nilary => Fragment::new(NILARY_GLYPHS[production]),
            Nonterminal::Unary => Fragment::new(UNARY_GLYPHS[production]),
            Nonterminal::Binary => Fragment::new(BINARY_GLYPHS[production]),
            Nonterminal::LazyBinary => Fragment::new(if production == 0 { "∧" } else { "∨" }),
            Nonterminal::LazyTernary => Fragment::new("⎇"),
            Nonterminal::Multidirectional => match production {
                0 | 6 => Fragment::new(glue(&texts)),
                _ => {
                    let shorthand = ["+", "X", "*", "|", "-"][production - 1];
                    Fragment::new(glue_with(shorthand, &texts))
                }
            },
            Nonterminal::List | Nonterminal::ArrowList => {
                Fragment::new(format!("⟦{}⟧", glue(&texts)))
            }
            Nonterminal::Dictionary => Fragment::new(format!("⦃{}⦄", glue(&texts))),
            Nonterminal::OtherOperator => Fragment::new(glue_with("ＫＤ", &texts)),
            Nonterminal::Program => {
                let commands = match production {
                    0 => 1 + v.last().map_or(0, |tail| tail.commands),
                    _ => 0,
                };
                Fragment {
                    text: glue(&texts),
                    commands,
                }
            }
            Nonterminal::Body => {
                let inner = &v[0];
                match production {
                    0 if inner.commands != 1 => Fragment::new(format!("«{}»", inner.text)),
                    _ => Fragment::new(inner.text.clone()),
                }
            }
            Nonterminal::Command => {
                Fragment::new(glue_with(COMMAND_GLYPHS[production], &texts))
            }
            _ => Fragment::new(glue(&texts)),
        }
    }
}
