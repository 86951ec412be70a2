//! The AST backend: inspectable labeled trees.
//!
//! Right-recursive list productions flatten into one ordered child
//! sequence per node (the tail's children are reused with the head
//! prepended); separators contribute nothing. A body that wraps a
//! single command normalizes to that command's node, matching the
//! canonical spelling, so stringify-then-reparse compares equal.

use cinder_grammar::Nonterminal;

use crate::engine::{Part, Reducer};

/// A parse tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// Terminal leaf: operator name or literal.
    Leaf(String),
    Node {
        label: String,
        children: Vec<Ast>,
    },
    /// Separator marker; never appears in assembled children.
    Empty,
}

impl Ast {
    fn node(label: &str, children: Vec<Ast>) -> Ast {
        Ast::Node {
            label: label.into(),
            children,
        }
    }

    fn leaf(label: impl Into<String>) -> Ast {
        Ast::Leaf(label.into())
    }

    /// Children of a node, or empty.
    pub fn children(&self) -> &[Ast] {
        match self {
            Ast::Node { children, .. } => children,
            _ => &[],
        }
    }

    /// Node label or leaf text.
    pub fn label(&self) -> &str {
        match self {
            Ast::Node { label, .. } => label,
            Ast::Leaf(text) => text,
            Ast::Empty => "",
        }
    }

    /// Render as an indented outline, one node per line.
    pub fn outline(&self) -> String {
        fn walk(ast: &Ast, depth: usize, out: &mut String) {
            out.push_str(&"  ".repeat(depth));
            out.push_str(ast.label());
            out.push('\n');
            for child in ast.children() {
                walk(child, depth + 1, out);
            }
        }
        let mut out = String::new();
        walk(self, 0, &mut out);
        out
    }

    /// Reuse the tail's flattened children with `head` prepended.
    fn prepend(head: Ast, tail: Ast, label: &str) -> Ast {
        let mut children = match tail {
            Ast::Node { children, .. } => children,
            Ast::Empty => Vec::new(),
            leaf => vec![leaf],
        };
        children.insert(0, head);
        Ast::node(label, children)
    }
}

/// The AST reducer.
pub struct AstBuilder;

const ARROW_NAMES: [&str; 8] = [
    "Up Left",
    "Up Right",
    "Down Right",
    "Down Left",
    "Left",
    "Up",
    "Right",
    "Down",
];

const NILARY_NAMES: [&str; 5] = ["InputString", "InputNumber", "Random", "PeekAll", "Peek"];

const UNARY_NAMES: [&str; 11] = [
    "Negative",
    "Length",
    "Not",
    "Cast",
    "Random",
    "Evaluate",
    "Pop",
    "Lowercase",
    "Uppercase",
    "Minimum",
    "Maximum",
];

const BINARY_NAMES: [&str; 17] = [
    "Sum",
    "Difference",
    "Product",
    "Quotient",
    "Modulo",
    "Equals",
    "Less",
    "Greater",
    "InclusiveRange",
    "Mold",
    "Exponentiate",
    "AtIndex",
    "Push",
    "Join",
    "Split",
    "FindAll",
    "Find",
];

const COMMAND_NAMES: [&str; 51] = [
    "InputString",
    "InputNumber",
    "Evaluate",
    "Print",
    "Print",
    "Multiprint",
    "Multiprint",
    "PolygonHollow",
    "PolygonHollow",
    "Polygon",
    "Polygon",
    "Rectangle",
    "Box",
    "Move",
    "Move",
    "Move",
    "PivotLeft",
    "PivotLeft",
    "PivotRight",
    "PivotRight",
    "Jump",
    "RotateTransform",
    "ReflectTransform",
    "ReflectTransform",
    "ReflectMirror",
    "ReflectMirror",
    "RotateCopy",
    "ReflectCopy",
    "ReflectCopy",
    "RotateOverlap",
    "ReflectOverlap",
    "ReflectOverlap",
    "Rotate",
    "Reflect",
    "Copy",
    "For",
    "While",
    "If",
    "If",
    "Assign",
    "Fill",
    "SetBackground",
    "Dump",
    "RefreshFor",
    "RefreshWhile",
    "Refresh",
    "Refresh",
    "Trim",
    "Clear",
    "Extend",
    "Extend",
];

/// Nonterminal sub-values of a match, separators dropped.
fn values(parts: Vec<Part<Ast>>) -> Vec<Ast> {
    parts
        .into_iter()
        .filter_map(|part| match part {
            Part::Value(Ast::Empty) => None,
            Part::Value(value) => Some(value),
            Part::Terminal(_) => None,
        })
        .collect()
}

impl Reducer for AstBuilder {
    type Value = Ast;

    fn string_literal(&self, text: &str) -> Ast {
        Ast::leaf(format!("String {text:?}"))
    }

    fn number_literal(&self, value: i64) -> Ast {
        Ast::leaf(format!("Number {value}"))
    }

    fn name_literal(&self, name: char) -> Ast {
        Ast::leaf(format!("Identifier {name}"))
    }

    fn reduce(&self, nonterminal: Nonterminal, production: usize, parts: Vec<Part<Ast>>) -> Ast {
        let mut v = values(parts);
        match nonterminal {
            Nonterminal::Separator => Ast::Empty,
            Nonterminal::Arrow => Ast::leaf(ARROW_NAMES[production]),
            Nonterminal::Nilary => Ast::leaf(NILARY_NAMES[production]),
            Nonterminal::Unary => Ast::leaf(UNARY_NAMES[production]),
            Nonterminal::Binary => Ast::leaf(BINARY_NAMES[production]),
            Nonterminal::LazyBinary => Ast::leaf(if production == 0 { "And" } else { "Or" }),
            Nonterminal::LazyTernary => Ast::leaf("Ternary"),
            Nonterminal::Arrows | Nonterminal::Sides | Nonterminal::Expressions => {
                let label = match nonterminal {
                    Nonterminal::Arrows => "Arrows",
                    Nonterminal::Sides => "Sides",
                    _ => "Expressions",
                };
                match production {
                    0 => {
                        let tail = v.pop().unwrap_or(Ast::Empty);
                        Ast::prepend(v.remove(0), tail, label)
                    }
                    _ => Ast::node(label, v),
                }
            }
            Nonterminal::PairExpressions => {
                let pair = Ast::node("Pair", v.drain(..2).collect());
                match production {
                    0 => Ast::prepend(pair, v.pop().unwrap_or(Ast::Empty), "Pairs"),
                    _ => Ast::node("Pairs", vec![pair]),
                }
            }
            Nonterminal::Multidirectional => match production {
                0 => Ast::node("Multidirectional", v.remove(0).children().to_vec()),
                6 => Ast::node("Multidirectional", Vec::new()),
                _ => {
                    let shorthand = ["+", "X", "*", "|", "-"][production - 1];
                    let tail = v.pop().unwrap_or(Ast::Empty);
                    Ast::prepend(Ast::leaf(shorthand), tail, "Multidirectional")
                }
            },
            Nonterminal::Side => Ast::node("Side", v),
            Nonterminal::List => Ast::node(
                "List",
                v.pop().map(|e| e.children().to_vec()).unwrap_or_default(),
            ),
            Nonterminal::ArrowList => Ast::node(
                "ArrowList",
                v.pop().map(|e| e.children().to_vec()).unwrap_or_default(),
            ),
            Nonterminal::Dictionary => Ast::node(
                "Dictionary",
                v.pop().map(|e| e.children().to_vec()).unwrap_or_default(),
            ),
            Nonterminal::Expression => match production {
                0..=5 | 10 => v.remove(0),
                _ => {
                    let operator = v.remove(0);
                    Ast::node(operator.label(), v)
                }
            },
            Nonterminal::OtherOperator => Ast::node("PeekDirection", v),
            Nonterminal::Program => match production {
                0 => {
                    let tail = v.pop().unwrap_or(Ast::Empty);
                    Ast::prepend(v.remove(0), tail, "Program")
                }
                _ => Ast::node("Program", Vec::new()),
            },
            Nonterminal::Body => {
                let inner = v.remove(0);
                match production {
                    // A one-command block is the command itself, the
                    // same shape the canonical spelling re-parses to.
                    0 if inner.children().len() == 1 => inner.children()[0].clone(),
                    _ => inner,
                }
            }
            Nonterminal::Command => Ast::node(COMMAND_NAMES[production], v),
            Nonterminal::String | Nonterminal::Number | Nonterminal::Name => {
                unreachable!("lexical classes reduce through literal hooks")
            }
        }
    }
}
