//! Lexical boundary scanners.
//!
//! The parser engine matches grammar terminals by exact text, but
//! String/Number/Name literals have no fixed spelling — where they end
//! is decided by the code-page classification rules in this module.
//! Each scanner returns the decoded literal and the position just past
//! it, or `None` when no literal starts at `pos`.

use crate::codec;
use crate::{greek_for_ascii, superscript_value, GREEK};

/// Scan a symbolic string literal: a compressed `“…”`/`””` token or a
/// run of printable ASCII, `¶`, `⸿` and `´`-escapes.
pub fn symbolic_string(src: &[char], pos: usize) -> Option<(String, usize)> {
    match src.get(pos)? {
        '“' | '”' => {
            let close = src[pos + 1..].iter().position(|&c| c == '”')? + pos + 1;
            let token: String = src[pos..=close].iter().collect();
            Some((codec::decompress(&token)?, close + 1))
        }
        _ => {
            let mut out = String::new();
            let mut i = pos;
            while i < src.len() {
                match src[i] {
                    '´' if i + 1 < src.len() => {
                        out.push(src[i + 1]);
                        i += 2;
                    }
                    '¶' => {
                        out.push('\n');
                        i += 1;
                    }
                    '⸿' => {
                        out.push('\r');
                        i += 1;
                    }
                    c if (' '..='~').contains(&c) => {
                        out.push(c);
                        i += 1;
                    }
                    _ => break,
                }
            }
            if i == pos {
                None
            } else {
                Some((out, i))
            }
        }
    }
}

/// Scan a symbolic number literal: a run of superscript digits.
pub fn symbolic_number(src: &[char], pos: usize) -> Option<(i64, usize)> {
    let mut value: i64 = 0;
    let mut i = pos;
    while let Some(digit) = src.get(i).copied().and_then(superscript_value) {
        value = value * 10 + digit;
        i += 1;
    }
    if i == pos {
        None
    } else {
        Some((value, i))
    }
}

/// Scan a symbolic variable name: a single Greek letter.
pub fn symbolic_name(src: &[char], pos: usize) -> Option<(char, usize)> {
    let ch = *src.get(pos)?;
    if GREEK.contains(ch) {
        Some((ch, pos + 1))
    } else {
        None
    }
}

/// Scan a verbose string literal: double-quoted, with `\"`, `\\` and
/// `\n` escapes.
pub fn verbose_string(src: &[char], pos: usize) -> Option<(String, usize)> {
    if *src.get(pos)? != '"' {
        return None;
    }
    let mut out = String::new();
    let mut i = pos + 1;
    while i < src.len() {
        match src[i] {
            '"' => return Some((out, i + 1)),
            '\\' if i + 1 < src.len() => {
                out.push(match src[i + 1] {
                    'n' => '\n',
                    'r' => '\r',
                    other => other,
                });
                i += 2;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    None
}

/// Scan a verbose number literal: a run of ASCII digits.
pub fn verbose_number(src: &[char], pos: usize) -> Option<(i64, usize)> {
    let mut value: i64 = 0;
    let mut i = pos;
    while let Some(c) = src.get(i) {
        let Some(digit) = c.to_digit(10) else { break };
        value = value * 10 + digit as i64;
        i += 1;
    }
    if i == pos {
        None
    } else {
        Some((value, i))
    }
}

/// Scan a verbose variable name: a single ASCII letter with a word
/// boundary after it, canonicalized to its Greek spelling.
///
/// The boundary requirement keeps single letters from swallowing the
/// head of a following keyword.
pub fn verbose_name(src: &[char], pos: usize) -> Option<(char, usize)> {
    let ch = *src.get(pos)?;
    let greek = greek_for_ascii(ch)?;
    if let Some(next) = src.get(pos + 1) {
        if next.is_ascii_alphanumeric() {
            return None;
        }
    }
    Some((greek, pos + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn symbolic_string_stops_at_command_glyphs() {
        let src = chars("abc→def");
        assert_eq!(symbolic_string(&src, 0), Some(("abc".into(), 3)));
    }

    #[test]
    fn symbolic_string_escapes_and_newlines() {
        let src = chars("a´→b¶c");
        assert_eq!(symbolic_string(&src, 0), Some(("a→b\nc".into(), 6)));
    }

    #[test]
    fn symbolic_string_reads_compressed_literals() {
        let token = codec::compress("hello hello hello hello");
        let src = chars(&format!("{token}→"));
        let (text, next) = symbolic_string(&src, 0).expect("compressed literal scans");
        assert_eq!(text, "hello hello hello hello");
        assert_eq!(src[next], '→');
    }

    #[test]
    fn symbolic_number_reads_superscripts() {
        let src = chars("¹⁰⁵a");
        assert_eq!(symbolic_number(&src, 0), Some((105, 3)));
        assert_eq!(symbolic_number(&src, 3), None);
    }

    #[test]
    fn symbolic_name_is_a_single_greek_letter() {
        let src = chars("κλ");
        assert_eq!(symbolic_name(&src, 0), Some(('κ', 1)));
    }

    #[test]
    fn verbose_string_handles_escapes() {
        let src = chars(r#""a\"b\nc" "#);
        assert_eq!(verbose_string(&src, 0), Some(("a\"b\nc".into(), 9)));
    }

    #[test]
    fn verbose_name_requires_word_boundary() {
        let src = chars("k ");
        assert_eq!(verbose_name(&src, 0), Some(('κ', 1)));
        let src = chars("for");
        assert_eq!(verbose_name(&src, 0), None);
    }

    #[test]
    fn verbose_number_reads_digits() {
        let src = chars("42x");
        assert_eq!(verbose_number(&src, 0), Some((42, 2)));
    }
}
