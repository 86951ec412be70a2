//! String literal codec.
//!
//! The stringifier re-serializes string literals in the shortest of two
//! forms: an *escaped* literal (command glyphs prefixed with `´`,
//! newlines as `¶`, carriage returns as `⸿`) or a *compressed* literal
//! `“…”` that packs the text into code-page glyphs, base 255, over a
//! 97-character charset. Text outside that charset always falls back to
//! the escaped form.
//!
//! The `”` glyph closes compressed literals and therefore cannot appear
//! inside one; the digit alphabet is the code page with `”` removed,
//! leaving 255 usable glyphs.

use crate::{glyph, is_command_glyph, ordinal, SHORTHANDS};

/// Charset compressible strings draw from: newline, space, symbols,
/// lowercase, digits, uppercase. Index order is significant — it is the
/// digit value of each character.
const DEFAULT_CHARSET: &str = "\n .!\"#$%&'()*+,-/:;<=>?@[\\]^_`{|}~\r\
abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Ordinal of the closing quote, excised from the digit alphabet.
const GAP: u16 = 4;

/// Escape a string as a plain symbolic literal.
///
/// Empty text has no plain spelling and renders as `””`.
pub fn escaped(text: &str) -> String {
    if text.is_empty() {
        return "””".into();
    }
    let mut out = String::new();
    for (i, ch) in text.chars().enumerate() {
        if is_command_glyph(ch) || (i == 0 && SHORTHANDS.contains(ch)) {
            out.push('´');
            out.push(ch);
        } else {
            match ch {
                '\n' => out.push('¶'),
                '\r' => out.push('⸿'),
                c if (' '..='~').contains(&c) => out.push(c),
                // Anything the plain scanner cannot read gets escaped.
                c => {
                    out.push('´');
                    out.push(c);
                }
            }
        }
    }
    out
}

/// Undo [`escaped`]: interpret `´` escapes and the newline placeholders.
pub fn unescape(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '´' => {
                if let Some(esc) = chars.next() {
                    out.push(esc);
                }
            }
            '¶' => out.push('\n'),
            '⸿' => out.push('\r'),
            _ => out.push(ch),
        }
    }
    out
}

/// Produce the shortest literal token for `text`, delimiters included.
pub fn compress(text: &str) -> String {
    if text.is_empty() {
        return "””".into();
    }
    let escaped = escaped(text);
    let Some(packed) = pack(text) else {
        return escaped;
    };
    if packed.chars().count() < escaped.chars().count() {
        packed
    } else {
        escaped
    }
}

/// Decode a delimited compressed literal. Returns `None` when the token
/// is not a recognized compressed form.
pub fn decompress(token: &str) -> Option<String> {
    if token == "””" {
        return Some(String::new());
    }
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 2 || *chars.last()? != '”' || chars[0] != '“' {
        return None;
    }
    unpack(&chars[1..chars.len() - 1])
}

fn digit_value(ch: char) -> u16 {
    let ord = ordinal(ch).unwrap_or(ch as u16);
    if ord > GAP {
        ord - 1
    } else {
        ord
    }
}

fn digit_glyph(value: u16) -> char {
    // Skip the excised `”` slot.
    if value >= GAP {
        glyph((value + 1) as u8)
    } else {
        glyph(value as u8)
    }
}

fn pack(text: &str) -> Option<String> {
    let ordinals: Vec<u64> = text
        .chars()
        .map(|c| DEFAULT_CHARSET.find(c).map(|i| i as u64))
        .collect::<Option<_>>()?;
    let base = ordinals.iter().max().copied().unwrap_or(0) + 1;
    let mut number = Bignum::one();
    if base == 1 {
        // A run of newlines: only the length matters.
        number = Bignum::from(ordinals.len() as u64);
    } else {
        for ordinal in &ordinals {
            number.mul_add(base, *ordinal);
        }
    }
    let mut out = String::from("“");
    out.push(digit_glyph((base - 1) as u16));
    for digit in number.digits() {
        out.push(digit_glyph(*digit as u16));
    }
    out.push('”');
    Some(out)
}

fn unpack(inner: &[char]) -> Option<String> {
    let first = *inner.first()?;
    let ord = ordinal(first).unwrap_or(first as u16);
    let base = u64::from(if ord + 1 > GAP { ord } else { ord + 1 });
    let mut number = Bignum::zero();
    for ch in &inner[1..] {
        number.mul_add(255, digit_value(*ch) as u64);
    }
    let charset: Vec<char> = DEFAULT_CHARSET.chars().collect();
    if base == 1 {
        return Some("\n".repeat(number.to_small()? as usize));
    }
    let mut out = Vec::new();
    while !number.is_one() {
        if number.is_zero() {
            return None;
        }
        let rem = number.div_small(base);
        out.push(*charset.get(rem as usize)?);
    }
    out.reverse();
    Some(out.into_iter().collect())
}

/// Minimal unsigned big number in base-255 digits, most significant
/// first. Only what the codec needs: multiply-add by a small factor and
/// division by a small divisor.
struct Bignum {
    digits: Vec<u64>,
}

impl Bignum {
    fn zero() -> Self {
        Self { digits: vec![] }
    }

    fn one() -> Self {
        Self { digits: vec![1] }
    }

    fn from(value: u64) -> Self {
        let mut n = Self::zero();
        n.mul_add(1, value);
        n
    }

    fn digits(&self) -> &[u64] {
        &self.digits
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    fn is_one(&self) -> bool {
        self.digits == [1]
    }

    fn to_small(&self) -> Option<u64> {
        let mut value: u64 = 0;
        for digit in &self.digits {
            value = value.checked_mul(255)?.checked_add(*digit)?;
        }
        Some(value)
    }

    fn mul_add(&mut self, factor: u64, addend: u64) {
        let mut carry = addend;
        for digit in self.digits.iter_mut().rev() {
            let value = *digit * factor + carry;
            *digit = value % 255;
            carry = value / 255;
        }
        while carry > 0 {
            self.digits.insert(0, carry % 255);
            carry /= 255;
        }
        while self.digits.first() == Some(&0) && self.digits.len() > 1 {
            self.digits.remove(0);
        }
        if self.digits == [0] {
            self.digits.clear();
        }
    }

    /// Divide in place by `divisor`, returning the remainder.
    fn div_small(&mut self, divisor: u64) -> u64 {
        let mut rem: u64 = 0;
        for digit in self.digits.iter_mut() {
            let value = rem * 255 + *digit;
            *digit = value / divisor;
            rem = value % divisor;
        }
        while self.digits.first() == Some(&0) {
            self.digits.remove(0);
        }
        rem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_round_trip() {
        let text = "a→b\nΓ´x + y";
        assert_eq!(unescape(&escaped(text)), text);
    }

    #[test]
    fn escaped_prefixes_leading_shorthand() {
        assert!(escaped("+abc").starts_with('´'));
        assert!(!escaped("a+bc").starts_with('´'));
    }

    #[test]
    fn empty_string_is_double_quote() {
        assert_eq!(compress(""), "””");
        assert_eq!(decompress("””"), Some(String::new()));
    }

    #[test]
    fn compressed_round_trip() {
        for text in [
            "Hello, World!",
            "the quick brown fox jumps over the lazy dog",
            "aaaaaaaaaaaaaaaaaaaa",
            "line one\nline two",
            "x",
        ] {
            let token = compress(text);
            let decoded = if token.starts_with('“') || token == "””" {
                decompress(&token).expect("compressed form decodes")
            } else {
                unescape(&token)
            };
            assert_eq!(decoded, text, "round trip failed for {text:?}");
        }
    }

    #[test]
    fn long_ascii_compresses_smaller_than_escape() {
        let text = "hello hello hello hello hello";
        let token = compress(text);
        assert!(token.starts_with('“'), "expected compressed form");
        assert!(token.chars().count() < text.chars().count());
    }

    #[test]
    fn non_ascii_falls_back_to_escape() {
        let text = "snowman ☃";
        assert_eq!(compress(text), escaped(text));
    }
}
