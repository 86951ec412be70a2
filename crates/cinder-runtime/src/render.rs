//! Collaborator hooks: rendering and nested evaluation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::value::Value;
use crate::Context;

/// Consumes canvas snapshots. `Dump` and `Refresh` hand every frame to
/// the installed renderer; the embedding decides what a frame means
/// (write to a terminal, collect for tests, drop).
pub trait Renderer {
    fn frame(&mut self, snapshot: &str);
}

/// Re-entry point into the parser, installed by the embedding so that
/// `Evaluate` can parse and run source text against the live context.
/// Lives behind a trait to keep this crate free of the parser.
pub trait Evaluator {
    /// Parse `source` as an expression and evaluate it.
    fn eval_expression(&self, source: &str, ctx: &mut Context) -> Result<Value>;

    /// Parse `source` as a program and run it for side effect.
    fn run_program(&self, source: &str, ctx: &mut Context) -> Result<()>;
}

/// Renderer that keeps every frame in memory; test harnesses read them
/// back.
#[derive(Clone, Default)]
pub struct CapturingRenderer {
    frames: Rc<RefCell<Vec<String>>>,
}

impl CapturingRenderer {
    pub fn new() -> CapturingRenderer {
        CapturingRenderer::default()
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames.borrow().clone()
    }

    pub fn last_frame(&self) -> Option<String> {
        self.frames.borrow().last().cloned()
    }
}

impl Renderer for CapturingRenderer {
    fn frame(&mut self, snapshot: &str) {
        self.frames.borrow_mut().push(snapshot.to_owned());
    }
}
