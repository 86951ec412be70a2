//! Runtime model for the Cinder interpreter.
//!
//! The interpreter backend in `cinder-parser` compiles programs into
//! closures over a [`Context`]: an unbounded sparse [`Canvas`], a
//! directional cursor, a lexical scope stack, an input queue and an
//! owned RNG. This crate holds that state plus everything that mutates
//! it — the direction algebra, the value domain and its operator
//! semantics, and the drawing/transform primitives.
//!
//! # Design
//!
//! - `direction` — the 8-way compass tables (movement, pivots, line
//!   glyphs, newline wrap)
//! - `value` — the value domain; lists and dictionaries are shared by
//!   reference, deliberately
//! - `ops` — pure-ish operator semantics over values
//! - `canvas` — the sparse cell store and rendering
//! - `context` — cursor, scope, inputs, RNG and the canvas-mutating
//!   primitives commands are built from
//! - `render` — collaborator traits for rendering and nested evaluation

pub mod canvas;
pub mod context;
pub mod direction;
pub mod error;
pub mod ops;
pub mod render;
pub mod value;

pub use canvas::{Bounds, Canvas, Cell};
pub use context::Context;
pub use direction::{Direction, Pivot};
pub use error::{Error, Result};
pub use render::{CapturingRenderer, Evaluator, Renderer};
pub use value::{MapKey, Number, Value};
