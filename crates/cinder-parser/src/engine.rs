//! The grammar-agnostic parsing engine.
//!
//! One backtracking recursive-descent algorithm drives every backend:
//! productions of a nonterminal are tried in table order, symbols
//! matched left to right, and the position restored whenever a
//! production fails. The first production whose symbols all match wins,
//! and exactly one backend reduction runs for it. Backends never see a
//! partial match.
//!
//! String/Number/Name are scanned with the code-page boundary rules
//! rather than matched against productions; the verbose style
//! additionally skips whitespace before every symbol.
//!
//! The grammar is small and right-recursive, so the engine revisits
//! (nonterminal, position) pairs without memoization; reductions are
//! side-effect-free at parse time (the interpreter backend builds
//! closures, it does not run them), which keeps backtracking safe.

use cinder_codepage::scan;
use cinder_grammar::{Grammar, Nonterminal, Style, Symbol};
use thiserror::Error;
use tracing::trace;

/// Parse failure: nothing matched, or input was left over. Reported at
/// the furthest position any production attempt reached.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("syntax error at offset {position}: {message}")]
pub struct SyntaxError {
    /// Character offset of the furthest-reached failure.
    pub position: usize,
    pub message: String,
}

/// One element of a match result, in production order.
pub enum Part<V> {
    /// Consumed text of a literal terminal.
    Terminal(&'static str),
    /// Reduction value of a nonterminal sub-match.
    Value(V),
}

/// A backend: one reduction per reachable (nonterminal, production)
/// pair, plus the three literal leaves.
pub trait Reducer {
    type Value: Clone;

    fn reduce(
        &self,
        nonterminal: Nonterminal,
        production: usize,
        parts: Vec<Part<Self::Value>>,
    ) -> Self::Value;

    fn string_literal(&self, text: &str) -> Self::Value;
    fn number_literal(&self, value: i64) -> Self::Value;
    fn name_literal(&self, name: char) -> Self::Value;
}

/// Parse `source` from the start nonterminal, requiring the whole
/// input to be consumed.
pub fn parse_from<R: Reducer>(
    source: &str,
    grammar: &Grammar,
    reducer: &R,
    start: Nonterminal,
) -> Result<R::Value, SyntaxError> {
    let chars: Vec<char> = source.chars().collect();
    let mut parser = Parser {
        grammar,
        reducer,
        source: &chars,
        furthest: 0,
    };
    trace!(?start, len = chars.len(), "parse");
    match parser.nonterminal(start, 0) {
        Some((value, position)) => {
            let position = parser.skip_whitespace(position);
            if position == chars.len() {
                Ok(value)
            } else {
                Err(SyntaxError {
                    position: parser.furthest.max(position),
                    message: "unconsumed input after a complete parse".into(),
                })
            }
        }
        None => Err(SyntaxError {
            position: parser.furthest,
            message: format!("no production of {start:?} matches"),
        }),
    }
}

struct Parser<'a, R: Reducer> {
    grammar: &'a Grammar,
    reducer: &'a R,
    source: &'a [char],
    furthest: usize,
}

impl<R: Reducer> Parser<'_, R> {
    /// Try each production of `nonterminal` in order from `pos`,
    /// returning the first full match's reduction and end position.
    fn nonterminal(&mut self, nonterminal: Nonterminal, pos: usize) -> Option<(R::Value, usize)> {
        if nonterminal.is_lexical() {
            return self.lexical(nonterminal, pos);
        }
        'productions: for (index, production) in
            self.grammar.productions(nonterminal).iter().enumerate()
        {
            let mut parts = Vec::with_capacity(production.len());
            let mut cursor = pos;
            for symbol in production.iter().copied() {
                match symbol {
                    Symbol::T(text) => {
                        let at = self.skip_whitespace(cursor);
                        if self.literal(at, text) {
                            parts.push(Part::Terminal(text));
                            cursor = at + text.chars().count();
                        } else {
                            self.fail(at);
                            continue 'productions;
                        }
                    }
                    Symbol::N(sub) => {
                        let at = self.skip_whitespace(cursor);
                        match self.nonterminal(sub, at) {
                            Some((value, next)) => {
                                parts.push(Part::Value(value));
                                cursor = next;
                            }
                            None => continue 'productions,
                        }
                    }
                }
            }
            return Some((self.reducer.reduce(nonterminal, index, parts), cursor));
        }
        None
    }

    fn lexical(&mut self, nonterminal: Nonterminal, pos: usize) -> Option<(R::Value, usize)> {
        let symbolic = self.grammar.style == Style::Symbolic;
        let scanned = match nonterminal {
            Nonterminal::String => {
                let scan = if symbolic {
                    scan::symbolic_string(self.source, pos)
                } else {
                    scan::verbose_string(self.source, pos)
                };
                scan.map(|(text, next)| (self.reducer.string_literal(&text), next))
            }
            Nonterminal::Number => {
                let scan = if symbolic {
                    scan::symbolic_number(self.source, pos)
                } else {
                    scan::verbose_number(self.source, pos)
                };
                scan.map(|(value, next)| (self.reducer.number_literal(value), next))
            }
            Nonterminal::Name => {
                let scan = if symbolic {
                    scan::symbolic_name(self.source, pos)
                } else {
                    scan::verbose_name(self.source, pos)
                };
                scan.map(|(name, next)| (self.reducer.name_literal(name), next))
            }
            _ => unreachable!("only String/Number/Name are lexical"),
        };
        if scanned.is_none() {
            self.fail(pos);
        }
        scanned
    }

    fn literal(&self, pos: usize, text: &str) -> bool {
        let mut i = pos;
        for expected in text.chars() {
            if self.source.get(i) != Some(&expected) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn skip_whitespace(&self, mut pos: usize) -> usize {
        if self.grammar.style == Style::Verbose {
            while self
                .source
                .get(pos)
                .is_some_and(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
            {
                pos += 1;
            }
        }
        pos
    }

    fn fail(&mut self, pos: usize) {
        if pos > self.furthest {
            self.furthest = pos;
        }
    }
}
