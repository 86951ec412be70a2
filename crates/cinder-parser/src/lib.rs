//! Parser and backends for the Cinder language.
//!
//! One grammar-agnostic parsing engine (`engine`) drives three
//! backends over the same grammar tables:
//!
//! - [`parse_ast`] — inspectable labeled trees (`ast`)
//! - [`compile`] — executable closures, parsing fused with execution
//!   (`interp`)
//! - [`canonicalize`] — canonical symbolic re-serialization
//!   (`stringify`)
//!
//! Each call is an independent full parse of the source; backends never
//! share partial state.
//!
//! ```
//! use cinder_grammar::SYMBOLIC;
//! use cinder_runtime::Context;
//!
//! let program = cinder_parser::compile("→abc", &SYMBOLIC).unwrap();
//! let mut ctx = Context::new();
//! program.run(&mut ctx).unwrap();
//! assert_eq!(ctx.snapshot(), "abc");
//! ```

use std::rc::Rc;

use cinder_grammar::{Grammar, Nonterminal, SYMBOLIC};
use cinder_runtime::{Context, Error, Evaluator, Value};
use tracing::debug;

pub mod ast;
pub mod engine;
pub mod interp;
pub mod stringify;

pub use ast::{Ast, AstBuilder};
pub use engine::{parse_from, Part, Reducer, SyntaxError};
pub use interp::{CmdFn, Compiled, ExprFn, Interpreter};
pub use stringify::Stringifier;

/// Parse `source` into a labeled tree.
pub fn parse_ast(source: &str, grammar: &Grammar) -> Result<Ast, SyntaxError> {
    parse_from(source, grammar, &AstBuilder, Nonterminal::Program)
}

/// Re-serialize `source` into its canonical symbolic spelling.
pub fn canonicalize(source: &str, grammar: &Grammar) -> Result<String, SyntaxError> {
    parse_from(source, grammar, &Stringifier, Nonterminal::Program).map(|fragment| fragment.text)
}

/// Compile `source` into a runnable program. The parse *is* the
/// compilation: expression and command closures are built during
/// reduction and nothing walks a tree afterwards.
pub fn compile(source: &str, grammar: &Grammar) -> Result<Program, SyntaxError> {
    debug!(len = source.chars().count(), style = ?grammar.style, "compile");
    let compiled = parse_from(source, grammar, &Interpreter, Nonterminal::Program)?;
    match compiled {
        Compiled::Cmds(commands) => Ok(Program { commands }),
        _ => unreachable!("the Program nonterminal reduces to a command list"),
    }
}

/// A compiled program: the ordered command closures of the top-level
/// Program nonterminal.
pub struct Program {
    commands: Vec<CmdFn>,
}

impl Program {
    /// Run against a context. Installs the nested-evaluation hook so
    /// `Evaluate` can re-enter the parser with the live context.
    pub fn run(&self, ctx: &mut Context) -> Result<(), Error> {
        ctx.install_evaluator(Rc::new(NestedEvaluator));
        interp::run_all(&self.commands, ctx)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Re-entry point for `Evaluate`: nested source is always in the
/// symbolic spelling.
struct NestedEvaluator;

impl Evaluator for NestedEvaluator {
    fn eval_expression(&self, source: &str, ctx: &mut Context) -> Result<Value, Error> {
        let compiled = parse_from(source, &SYMBOLIC, &Interpreter, Nonterminal::Expression)
            .map_err(|err| Error::Eval(err.to_string()))?;
        match compiled {
            Compiled::Expr(expr) => expr(ctx),
            _ => unreachable!("the Expression nonterminal reduces to a closure"),
        }
    }

    fn run_program(&self, source: &str, ctx: &mut Context) -> Result<(), Error> {
        let compiled = parse_from(source, &SYMBOLIC, &Interpreter, Nonterminal::Program)
            .map_err(|err| Error::Eval(err.to_string()))?;
        match compiled {
            Compiled::Cmds(commands) => interp::run_all(&commands, ctx),
            _ => unreachable!("the Program nonterminal reduces to a command list"),
        }
    }
}
