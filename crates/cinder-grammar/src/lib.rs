//! Declarative grammar tables for Cinder.
//!
//! The whole language is described as data: every token category is a
//! [`Nonterminal`] with an ordered list of productions, each production
//! an ordered sequence of [`Symbol`]s. The parser engine in
//! `cinder-parser` interprets these tables; nothing in this crate
//! executes anything.
//!
//! # Design
//!
//! - One shared taxonomy, two terminal spellings: [`SYMBOLIC`] uses the
//!   one-glyph code-page spellings, [`VERBOSE`] uses keywords
//! - Production order is significant: alternatives are tried first to
//!   last and the first match wins (ordered choice)
//! - The two grammars are structurally parallel: for every nonterminal
//!   they define the same number of productions with the same sequence
//!   of nonterminal references, so one reduction table per backend
//!   serves both (checked by the parity test)
//! - `String`, `Number` and `Name` carry no productions; where they end
//!   is a lexical question answered by `cinder-codepage`'s scanners

mod symbolic;
mod verbose;

pub use symbolic::SYMBOLIC;
pub use verbose::VERBOSE;

/// Grammar category of a token.
///
/// Discriminants index the production tables; keep declaration order in
/// sync with the `table` arrays in `symbolic.rs` and `verbose.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Nonterminal {
    Arrow,
    Multidirectional,
    Side,
    Separator,
    /// Lexical class, scanned rather than produced.
    String,
    /// Lexical class, scanned rather than produced.
    Number,
    /// Lexical class, scanned rather than produced.
    Name,
    Arrows,
    Sides,
    Expressions,
    PairExpressions,
    List,
    ArrowList,
    Dictionary,
    Expression,
    Nilary,
    Unary,
    Binary,
    LazyBinary,
    LazyTernary,
    OtherOperator,
    Program,
    Body,
    Command,
}

impl Nonterminal {
    /// Number of nonterminals (table length).
    pub const COUNT: usize = 24;

    /// Every nonterminal, in table order.
    pub const ALL: [Nonterminal; Self::COUNT] = [
        Nonterminal::Arrow,
        Nonterminal::Multidirectional,
        Nonterminal::Side,
        Nonterminal::Separator,
        Nonterminal::String,
        Nonterminal::Number,
        Nonterminal::Name,
        Nonterminal::Arrows,
        Nonterminal::Sides,
        Nonterminal::Expressions,
        Nonterminal::PairExpressions,
        Nonterminal::List,
        Nonterminal::ArrowList,
        Nonterminal::Dictionary,
        Nonterminal::Expression,
        Nonterminal::Nilary,
        Nonterminal::Unary,
        Nonterminal::Binary,
        Nonterminal::LazyBinary,
        Nonterminal::LazyTernary,
        Nonterminal::OtherOperator,
        Nonterminal::Program,
        Nonterminal::Body,
        Nonterminal::Command,
    ];

    /// True for the lexical classes whose extent is decided by the
    /// code-page scanners instead of productions.
    pub fn is_lexical(self) -> bool {
        matches!(
            self,
            Nonterminal::String | Nonterminal::Number | Nonterminal::Name
        )
    }
}

/// One element of a production: a literal terminal or a reference to
/// another nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Exact source text.
    T(&'static str),
    /// Recursive reference.
    N(Nonterminal),
}

/// One alternative expansion of a nonterminal. An empty production is
/// epsilon: it always matches and consumes nothing.
pub type Production = &'static [Symbol];

/// Which surface syntax a grammar parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// One-glyph spellings, no insignificant whitespace.
    Symbolic,
    /// Keyword spellings, whitespace between tokens ignored.
    Verbose,
}

/// A complete grammar: production tables for every nonterminal plus the
/// lexical style. Immutable after construction; the two instances are
/// `static`s.
pub struct Grammar {
    pub style: Style,
    pub(crate) table: [&'static [Production]; Nonterminal::COUNT],
}

impl Grammar {
    /// Ordered productions of `nonterminal`.
    pub fn productions(&self, nonterminal: Nonterminal) -> &'static [Production] {
        self.table[nonterminal as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The parity property: both grammars define the same production
    /// structure modulo terminal spelling, so production indices (and
    /// with them the backend reduction tables) line up.
    #[test]
    fn grammars_are_structurally_parallel() {
        for nt in Nonterminal::ALL {
            let sym = SYMBOLIC.productions(nt);
            let verb = VERBOSE.productions(nt);
            assert_eq!(
                sym.len(),
                verb.len(),
                "{nt:?} production counts differ between grammars"
            );
            for (index, (s, v)) in sym.iter().zip(verb.iter()).enumerate() {
                let s_refs: Vec<Nonterminal> = s
                    .iter()
                    .filter_map(|sym| match sym {
                        Symbol::N(n) => Some(*n),
                        Symbol::T(_) => None,
                    })
                    .collect();
                let v_refs: Vec<Nonterminal> = v
                    .iter()
                    .filter_map(|sym| match sym {
                        Symbol::N(n) => Some(*n),
                        Symbol::T(_) => None,
                    })
                    .collect();
                assert_eq!(
                    s_refs, v_refs,
                    "{nt:?} production {index} references differ between grammars"
                );
            }
        }
    }

    #[test]
    fn epsilon_productions_are_last() {
        for grammar in [&SYMBOLIC, &VERBOSE] {
            for nt in Nonterminal::ALL {
                let productions = grammar.productions(nt);
                for (index, production) in productions.iter().enumerate() {
                    if production.is_empty() {
                        assert_eq!(
                            index,
                            productions.len() - 1,
                            "{nt:?}: epsilon production must be last"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn lexical_classes_have_no_productions() {
        for nt in Nonterminal::ALL {
            if nt.is_lexical() {
                assert!(SYMBOLIC.productions(nt).is_empty());
                assert!(VERBOSE.productions(nt).is_empty());
            } else {
                assert!(
                    !SYMBOLIC.productions(nt).is_empty(),
                    "{nt:?} has no productions"
                );
            }
        }
    }

    #[test]
    fn ordered_choice_prefixes_come_first() {
        // Multi-glyph terminals must be tried before their prefixes,
        // or the shorter spelling shadows the longer one.
        fn first_terminals(grammar: &Grammar, nt: Nonterminal) -> Vec<&'static str> {
            grammar
                .productions(nt)
                .iter()
                .filter_map(|p| match p.first() {
                    Some(Symbol::T(t)) => Some(*t),
                    _ => None,
                })
                .collect()
        }
        for grammar in [&SYMBOLIC, &VERBOSE] {
            for nt in Nonterminal::ALL {
                let terminals = first_terminals(grammar, nt);
                for (earlier_idx, earlier) in terminals.iter().enumerate() {
                    for later in &terminals[earlier_idx + 1..] {
                        assert!(
                            !(later.starts_with(earlier) && later != earlier),
                            "{nt:?}: {later:?} is shadowed by earlier {earlier:?}"
                        );
                    }
                }
            }
        }
    }
}
