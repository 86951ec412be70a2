//! The runtime value domain.
//!
//! Lists and dictionaries are shared by reference: assignment aliases
//! rather than copies, and `Push`/`Pop` mutate in place while also
//! returning the sequence. Code downstream may rely on that aliasing,
//! so it is part of the contract, not an implementation detail.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Num(i64),
    /// Only `Random` produces these; arithmetic promotes on contact.
    Real(f64),
    Text(String),
    List(Rc<RefCell<Vec<Value>>>),
    Map(Rc<RefCell<IndexMap<MapKey, Value>>>),
}

/// Hashable projection of a value used as a dictionary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Num(i64),
    Text(String),
}

impl MapKey {
    /// Coerce a value into key position.
    pub fn from_value(value: &Value) -> Result<MapKey> {
        match value {
            Value::Num(n) => Ok(MapKey::Num(*n)),
            Value::Bool(b) => Ok(MapKey::Num(*b as i64)),
            Value::Text(t) => Ok(MapKey::Text(t.clone())),
            other => Err(Error::type_mismatch("dictionary key", other.type_name())),
        }
    }
}

impl Value {
    /// Build a fresh shared list.
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// Build a fresh shared dictionary.
    pub fn map(entries: IndexMap<MapKey, Value>) -> Value {
        Value::Map(Rc::new(RefCell::new(entries)))
    }

    pub fn text(text: impl Into<String>) -> Value {
        Value::Text(text.into())
    }

    /// Human-facing name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Num(_) => "number",
            Value::Real(_) => "number",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "dictionary",
        }
    }

    /// Truthiness: zero, empty and null are falsy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0,
            Value::Real(f) => *f != 0.0,
            Value::Text(t) => !t.is_empty(),
            Value::List(l) => !l.borrow().is_empty(),
            Value::Map(m) => !m.borrow().is_empty(),
        }
    }

    /// The value's printed text.
    pub fn as_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => if *b { "True" } else { "False" }.into(),
            Value::Num(n) => n.to_string(),
            Value::Real(f) => f.to_string(),
            Value::Text(t) => t.clone(),
            Value::List(l) => {
                let items: Vec<String> = l.borrow().iter().map(Value::as_text).collect();
                items.join("\n")
            }
            Value::Map(m) => {
                let items: Vec<String> = m
                    .borrow()
                    .iter()
                    .map(|(k, v)| {
                        let key = match k {
                            MapKey::Num(n) => n.to_string(),
                            MapKey::Text(t) => t.clone(),
                        };
                        format!("{key}: {}", v.as_text())
                    })
                    .collect();
                items.join("\n")
            }
        }
    }

    /// Integer view, for counts, lengths and coordinates.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Num(n) => Ok(*n),
            Value::Bool(b) => Ok(*b as i64),
            Value::Real(f) => Ok(*f as i64),
            Value::Text(t) => t
                .trim()
                .parse()
                .map_err(|_| Error::type_mismatch("number", format!("text {t:?}"))),
            other => Err(Error::type_mismatch("number", other.type_name())),
        }
    }

    /// Numeric view for arithmetic; `None` when not numeric.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Num(n) => Some(Number::Int(*n)),
            Value::Bool(b) => Some(Number::Int(*b as i64)),
            Value::Real(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }
}

/// Either integer arm of the numeric tower. Arithmetic stays integral
/// until a float operand forces promotion.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn to_value(self) -> Value {
        match self {
            Number::Int(n) => Value::Num(n),
            Number::Float(f) => Value::Real(f),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Value::Map(a), Value::Map(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().all(|(k, v)| b.get(k).is_some_and(|w| v == w))
            }
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(Number::Int(x)), Some(Number::Int(y))) => x == y,
                (Some(x), Some(y)) => x.as_f64() == y.as_f64(),
                _ => false,
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Num(n) => write!(f, "{n}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(t) => write!(f, "{t:?}"),
            Value::List(l) => f.debug_list().entries(l.borrow().iter()).finish(),
            Value::Map(m) => f
                .debug_map()
                .entries(m.borrow().iter().map(|(k, v)| (k, v)))
                .finish(),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Num(n)
    }
}

impl From<&str> for Value {
    fn from(t: &str) -> Value {
        Value::Text(t.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}
