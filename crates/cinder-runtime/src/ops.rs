//! Operator semantics over [`Value`].
//!
//! These are the type-dispatching halves of the expression operators;
//! the parser's interpreter backend wires them into closures. Semantics
//! that need runtime state (Random, Peek, Evaluate) live on `Context`
//! instead.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::value::{MapKey, Number, Value};

/// `Sum`: three-way polymorphism. Exactly one list operand appends or
/// prepends the scalar (a fresh list); any text operand concatenates as
/// text; otherwise numeric addition.
pub fn add(left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        (Value::List(a), scalar) => {
            let mut items = a.borrow().clone();
            items.push(scalar.clone());
            Ok(Value::list(items))
        }
        (scalar, Value::List(b)) => {
            let mut items = vec![scalar.clone()];
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        (Value::Text(_), _) | (_, Value::Text(_)) => {
            Ok(Value::Text(left.as_text() + &right.as_text()))
        }
        _ => numeric(left, right, "Sum", |a, b| a + b, |a, b| a + b),
    }
}

/// `Difference`: numeric.
pub fn subtract(left: &Value, right: &Value) -> Result<Value> {
    numeric(left, right, "Difference", |a, b| a - b, |a, b| a - b)
}

/// `Product`: numeric.
pub fn multiply(left: &Value, right: &Value) -> Result<Value> {
    numeric(left, right, "Product", |a, b| a * b, |a, b| a * b)
}

/// Integer-preserving numeric dispatch: two `Int` operands stay integral
/// via `int_op`; any `Real` operand promotes both to `f64` via `float_op`;
/// a non-numeric operand is a type mismatch.
fn numeric(
    left: &Value,
    right: &Value,
    operation: &'static str,
    int_op: impl Fn(i64, i64) -> i64,
    float_op: impl Fn(f64, f64) -> f64,
) -> Result<Value> {
    match (left.as_number(), right.as_number()) {
        (Some(Number::Int(a)), Some(Number::Int(b))) => Ok(Value::Num(int_op(a, b))),
        (Some(a), Some(b)) => Ok(Value::Real(float_op(a.as_f64(), b.as_f64()))),
        _ => Err(Error::type_mismatch(operation, left.type_name())),
    }
}

/// `Quotient`: on text and lists, the first `len / right` elements; on
/// numbers, truncating division.
pub fn divide(left: &Value, right: &Value) -> Result<Value> {
    match left {
        Value::Text(t) => {
            let n = cut_length(t.chars().count(), right)?;
            Ok(Value::Text(t.chars().take(n).collect()))
        }
        Value::List(items) => {
            let n = cut_length(items.borrow().len(), right)?;
            Ok(Value::list(items.borrow().iter().take(n).cloned().collect()))
        }
        _ => match (left.as_number(), right.as_number()) {
            (Some(Number::Int(a)), Some(Number::Int(b))) => {
                if b == 0 {
                    Err(Error::DivisionByZero)
                } else {
                    Ok(Value::Num(a / b))
                }
            }
            (Some(a), Some(b)) => {
                if b.as_f64() == 0.0 {
                    Err(Error::DivisionByZero)
                } else {
                    Ok(Value::Num((a.as_f64() / b.as_f64()) as i64))
                }
            }
            _ => Err(Error::type_mismatch("Quotient", left.type_name())),
        },
    }
}

fn cut_length(len: usize, right: &Value) -> Result<usize> {
    let divisor = right.as_int()?;
    if divisor == 0 {
        return Err(Error::DivisionByZero);
    }
    Ok((len as i64 / divisor).max(0) as usize)
}

/// `Modulo`: numeric, truncated like the reference interpreter.
pub fn modulo(left: &Value, right: &Value) -> Result<Value> {
    match (left.as_number(), right.as_number()) {
        (Some(Number::Int(a)), Some(Number::Int(b))) => {
            if b == 0 {
                Err(Error::DivisionByZero)
            } else {
                Ok(Value::Num(a % b))
            }
        }
        (Some(a), Some(b)) => {
            if b.as_f64() == 0.0 {
                Err(Error::DivisionByZero)
            } else {
                Ok(Value::Real(a.as_f64() % b.as_f64()))
            }
        }
        _ => Err(Error::type_mismatch("Modulo", left.type_name())),
    }
}

/// `Exponentiate`: numeric power.
pub fn exponentiate(left: &Value, right: &Value) -> Result<Value> {
    match (left.as_number(), right.as_number()) {
        (Some(Number::Int(a)), Some(Number::Int(b))) if b >= 0 => {
            let exp = u32::try_from(b)
                .map_err(|_| Error::type_mismatch("Exponentiate", "oversized exponent"))?;
            a.checked_pow(exp)
                .map(Value::Num)
                .ok_or(Error::type_mismatch("Exponentiate", "overflow"))
        }
        (Some(a), Some(b)) => Ok(Value::Real(a.as_f64().powf(b.as_f64()))),
        _ => Err(Error::type_mismatch("Exponentiate", left.type_name())),
    }
}

/// `Equals`.
pub fn equals(left: &Value, right: &Value) -> Value {
    Value::Bool(left == right)
}

fn compare(left: &Value, right: &Value, operation: &'static str) -> Result<Ordering> {
    match (left, right) {
        (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
        (Value::List(a), Value::List(b)) => {
            let (a, b) = (a.borrow().clone(), b.borrow().clone());
            for (x, y) in a.iter().zip(b.iter()) {
                let ord = compare(x, y, operation)?;
                if ord != Ordering::Equal {
                    return Ok(ord);
                }
            }
            Ok(a.len().cmp(&b.len()))
        }
        _ => match (left.as_number(), right.as_number()) {
            (Some(Number::Int(a)), Some(Number::Int(b))) => Ok(a.cmp(&b)),
            (Some(a), Some(b)) => a
                .as_f64()
                .partial_cmp(&b.as_f64())
                .ok_or(Error::type_mismatch(operation, "NaN")),
            _ => Err(Error::type_mismatch(operation, left.type_name())),
        },
    }
}

/// `Less`.
pub fn less(left: &Value, right: &Value) -> Result<Value> {
    Ok(Value::Bool(compare(left, right, "Less")? == Ordering::Less))
}

/// `Greater`.
pub fn greater(left: &Value, right: &Value) -> Result<Value> {
    Ok(Value::Bool(
        compare(left, right, "Greater")? == Ordering::Greater,
    ))
}

/// `InclusiveRange`: `[left ..= right]` over numbers, or over character
/// codes when both operands are text.
pub fn inclusive_range(left: &Value, right: &Value) -> Result<Value> {
    range_list(left, right, true)
}

/// `Mold`: numeric operands give the exclusive range; a list or text
/// left operand is cycled (or chopped) to length `right`.
pub fn mold(left: &Value, right: &Value) -> Result<Value> {
    match left {
        Value::Text(t) => {
            let length = shape_length(right)?;
            let chars: Vec<char> = t.chars().collect();
            if chars.is_empty() {
                return Err(Error::EmptyReduction);
            }
            Ok(Value::Text(
                (0..length).map(|i| chars[i % chars.len()]).collect(),
            ))
        }
        Value::List(items) => {
            let length = shape_length(right)?;
            let items = items.borrow();
            if items.is_empty() {
                return Err(Error::EmptyReduction);
            }
            Ok(Value::list(
                (0..length).map(|i| items[i % items.len()].clone()).collect(),
            ))
        }
        _ => range_list(left, right, false),
    }
}

fn shape_length(value: &Value) -> Result<usize> {
    let n = value.as_int()?;
    Ok(n.max(0) as usize)
}

fn range_list(left: &Value, right: &Value, inclusive: bool) -> Result<Value> {
    if let (Value::Text(a), Value::Text(b)) = (left, right) {
        let (start, end) = match (a.chars().next(), b.chars().next()) {
            (Some(s), Some(e)) => (s as u32, e as u32),
            _ => return Err(Error::type_mismatch("Range", "empty text")),
        };
        let end = if inclusive { end + 1 } else { end };
        let items = (start..end)
            .filter_map(char::from_u32)
            .map(|c| Value::Text(c.into()))
            .collect();
        return Ok(Value::list(items));
    }
    let start = left.as_int()?;
    let end = right.as_int()? + if inclusive { 1 } else { 0 };
    Ok(Value::list((start..end).map(Value::Num).collect()))
}

/// `AtIndex`: absent (Null) out of range rather than an error; a NUL
/// slot reads as empty text.
pub fn at_index(left: &Value, right: &Value) -> Result<Value> {
    let found = match left {
        Value::Text(t) => {
            let index = right.as_int()?;
            usize::try_from(index)
                .ok()
                .and_then(|i| t.chars().nth(i))
                .map(|c| Value::Text(c.into()))
        }
        Value::List(items) => {
            let index = right.as_int()?;
            usize::try_from(index)
                .ok()
                .and_then(|i| items.borrow().get(i).cloned())
        }
        Value::Map(entries) => entries.borrow().get(&MapKey::from_value(right)?).cloned(),
        other => return Err(Error::type_mismatch("AtIndex", other.type_name())),
    };
    Ok(match found {
        Some(Value::Text(t)) if t == "\0" => Value::text(""),
        Some(value) => value,
        None => Value::Null,
    })
}

/// `Push`: mutate the list in place and return the same list — the
/// aliasing is intentional and observable.
pub fn push(left: &Value, right: &Value) -> Result<Value> {
    match left {
        Value::List(items) => {
            items.borrow_mut().push(right.clone());
            Ok(left.clone())
        }
        other => Err(Error::type_mismatch("Push", other.type_name())),
    }
}

/// `Pop`: remove and return the last element, sharing the mutation
/// with every alias of the list.
pub fn pop(value: &Value) -> Result<Value> {
    match value {
        Value::List(items) => items.borrow_mut().pop().ok_or(Error::EmptyReduction),
        other => Err(Error::type_mismatch("Pop", other.type_name())),
    }
}

/// `Join`: list (or text characters) joined by a separator.
pub fn join(left: &Value, right: &Value) -> Result<Value> {
    let separator = right.as_text();
    match left {
        Value::List(items) => {
            let parts: Vec<String> = items.borrow().iter().map(Value::as_text).collect();
            Ok(Value::Text(parts.join(&separator)))
        }
        Value::Text(t) => {
            let parts: Vec<String> = t.chars().map(String::from).collect();
            Ok(Value::Text(parts.join(&separator)))
        }
        other => Err(Error::type_mismatch("Join", other.type_name())),
    }
}

/// `Split`: text split by a text separator.
pub fn split(left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::Text(t), Value::Text(sep)) if !sep.is_empty() => Ok(Value::list(
            t.split(sep.as_str()).map(Value::text).collect(),
        )),
        (Value::Text(_), other) => Err(Error::type_mismatch("Split", other.type_name())),
        (other, _) => Err(Error::type_mismatch("Split", other.type_name())),
    }
}

/// `Find`: first index, or -1.
pub fn find(left: &Value, right: &Value) -> Result<Value> {
    let indices = match_indices(left, right)?;
    Ok(Value::Num(indices.first().copied().unwrap_or(-1)))
}

/// `FindAll`: every match index, empty list if none.
pub fn find_all(left: &Value, right: &Value) -> Result<Value> {
    let indices = match_indices(left, right)?;
    Ok(Value::list(indices.into_iter().map(Value::Num).collect()))
}

fn match_indices(left: &Value, right: &Value) -> Result<Vec<i64>> {
    match left {
        Value::Text(haystack) => {
            let needle = right.as_text();
            if needle.is_empty() {
                return Ok(vec![]);
            }
            let chars: Vec<char> = haystack.chars().collect();
            let needle: Vec<char> = needle.chars().collect();
            let mut found = Vec::new();
            let mut i = 0;
            while i + needle.len() <= chars.len() {
                if chars[i..i + needle.len()] == needle[..] {
                    found.push(i as i64);
                }
                i += 1;
            }
            Ok(found)
        }
        Value::List(items) => Ok(items
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, item)| *item == right)
            .map(|(i, _)| i as i64)
            .collect()),
        other => Err(Error::type_mismatch("Find", other.type_name())),
    }
}

/// `Length`: size of a sequence, or the digit count of a number's text.
pub fn length(value: &Value) -> Value {
    let n = match value {
        Value::Text(t) => t.chars().count(),
        Value::List(items) => items.borrow().len(),
        Value::Map(entries) => entries.borrow().len(),
        other => other.as_text().chars().count(),
    };
    Value::Num(n as i64)
}

/// `Negative`.
pub fn negative(value: &Value) -> Result<Value> {
    match value.as_number() {
        Some(Number::Int(n)) => Ok(Value::Num(-n)),
        Some(Number::Float(f)) => Ok(Value::Real(-f)),
        None => Err(Error::type_mismatch("Negative", value.type_name())),
    }
}

/// `Not`.
pub fn not(value: &Value) -> Value {
    Value::Bool(!value.truthy())
}

/// `Cast`: number → the character with that code, text → the code of
/// its first character. The direction is auto-detected from the
/// operand type.
pub fn cast(value: &Value) -> Result<Value> {
    match value {
        Value::Num(n) => u32::try_from(*n)
            .ok()
            .and_then(char::from_u32)
            .map(|c| Value::Text(c.into()))
            .ok_or(Error::type_mismatch("Cast", "code out of range")),
        Value::Text(t) => t
            .chars()
            .next()
            .map(|c| Value::Num(c as i64))
            .ok_or(Error::type_mismatch("Cast", "empty text")),
        other => Err(Error::type_mismatch("Cast", other.type_name())),
    }
}

/// `Lowercase`.
pub fn lowercase(value: &Value) -> Value {
    Value::Text(value.as_text().to_lowercase())
}

/// `Uppercase`.
pub fn uppercase(value: &Value) -> Value {
    Value::Text(value.as_text().to_uppercase())
}

/// `Minimum` over a list or text; `EmptyReduction` when empty.
pub fn minimum(value: &Value) -> Result<Value> {
    fold_extreme(value, Ordering::Less, "Minimum")
}

/// `Maximum` over a list or text; `EmptyReduction` when empty.
pub fn maximum(value: &Value) -> Result<Value> {
    fold_extreme(value, Ordering::Greater, "Maximum")
}

fn fold_extreme(value: &Value, keep: Ordering, operation: &'static str) -> Result<Value> {
    let items: Vec<Value> = match value {
        Value::List(items) => items.borrow().clone(),
        Value::Text(t) => t.chars().map(|c| Value::Text(c.into())).collect(),
        other => return Err(Error::type_mismatch(operation, other.type_name())),
    };
    let mut iter = items.into_iter();
    let mut best = iter.next().ok_or(Error::EmptyReduction)?;
    for item in iter {
        if compare(&item, &best, operation)? == keep {
            best = item;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[i64]) -> Value {
        Value::list(items.iter().copied().map(Value::Num).collect())
    }

    #[test]
    fn sum_is_polymorphic() {
        assert_eq!(add(&Value::Num(5), &Value::Num(3)).unwrap(), Value::Num(8));
        assert_eq!(add(&list(&[1, 2]), &Value::Num(3)).unwrap(), list(&[1, 2, 3]));
        assert_eq!(add(&Value::Num(3), &list(&[1, 2])).unwrap(), list(&[3, 1, 2]));
        assert_eq!(
            add(&Value::text("ab"), &Value::Num(3)).unwrap(),
            Value::text("ab3")
        );
    }

    #[test]
    fn sum_does_not_alias_its_list_operand() {
        let original = list(&[1, 2]);
        let extended = add(&original, &Value::Num(3)).unwrap();
        assert_eq!(original, list(&[1, 2]));
        assert_eq!(extended, list(&[1, 2, 3]));
    }

    #[test]
    fn quotient_truncates_sequences_and_numbers() {
        assert_eq!(
            divide(&Value::text("abcdef"), &Value::Num(2)).unwrap(),
            Value::text("abc")
        );
        assert_eq!(
            divide(&Value::Num(7), &Value::Num(2)).unwrap(),
            Value::Num(3)
        );
        assert_eq!(
            divide(&list(&[1, 2, 3, 4]), &Value::Num(2)).unwrap(),
            list(&[1, 2])
        );
        assert!(matches!(
            divide(&Value::Num(1), &Value::Num(0)),
            Err(Error::DivisionByZero)
        ));
    }

    #[test]
    fn find_and_find_all() {
        assert_eq!(
            find_all(&Value::text("abcabc"), &Value::text("a")).unwrap(),
            list(&[0, 3])
        );
        assert_eq!(
            find(&Value::text("abcabc"), &Value::text("z")).unwrap(),
            Value::Num(-1)
        );
        assert_eq!(
            find(&list(&[5, 6, 5]), &Value::Num(5)).unwrap(),
            Value::Num(0)
        );
    }

    #[test]
    fn push_aliases_and_returns_the_same_list() {
        let original = list(&[1]);
        let returned = push(&original, &Value::Num(2)).unwrap();
        assert_eq!(original, list(&[1, 2]));
        match (&original, &returned) {
            (Value::List(a), Value::List(b)) => assert!(std::rc::Rc::ptr_eq(a, b)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn minimum_of_empty_fails() {
        assert!(matches!(
            minimum(&Value::list(vec![])),
            Err(Error::EmptyReduction)
        ));
        assert_eq!(minimum(&list(&[3, 1, 2])).unwrap(), Value::Num(1));
        assert_eq!(maximum(&list(&[3, 1, 2])).unwrap(), Value::Num(3));
    }

    #[test]
    fn mold_cycles_and_ranges() {
        assert_eq!(
            mold(&Value::text("ab"), &Value::Num(5)).unwrap(),
            Value::text("ababa")
        );
        assert_eq!(mold(&Value::Num(1), &Value::Num(4)).unwrap(), list(&[1, 2, 3]));
        assert_eq!(
            inclusive_range(&Value::Num(1), &Value::Num(3)).unwrap(),
            list(&[1, 2, 3])
        );
    }

    #[test]
    fn at_index_yields_null_out_of_range() {
        assert_eq!(
            at_index(&list(&[1, 2]), &Value::Num(5)).unwrap(),
            Value::Null
        );
        assert_eq!(
            at_index(&list(&[1, 2]), &Value::Num(-1)).unwrap(),
            Value::Null
        );
        assert_eq!(
            at_index(&Value::text("abc"), &Value::Num(1)).unwrap(),
            Value::text("b")
        );
    }

    #[test]
    fn cast_converts_both_ways() {
        assert_eq!(cast(&Value::Num(65)).unwrap(), Value::text("A"));
        assert_eq!(cast(&Value::text("Az")).unwrap(), Value::Num(65));
        assert!(cast(&Value::text("")).is_err());
    }
}
