//! Code page and glyph classification for Cinder source text.
//!
//! Cinder programs are written in a 256-glyph code page: every glyph the
//! symbolic syntax uses — fullwidth command letters, superscript digits,
//! Greek variable names, arrows and operator symbols — corresponds to a
//! single byte. This crate owns that mapping and the lexical boundary
//! rules that decide where a command token ends and literal text begins.
//!
//! # Design
//!
//! - Glyph tables are defined once and exposed through lookup functions
//!   (single source of truth for the parser, stringifier and codec)
//! - `ordinal` / `glyph` convert between code-page glyphs and byte values
//! - `scan` holds the boundary scanners for String/Number/Name literals
//!   in both surface syntaxes
//! - `codec` holds the string literal codec used when re-serializing

use std::collections::HashMap;
use std::sync::OnceLock;

pub mod codec;
pub mod scan;

/// Superscript digits, in value order. The symbolic syntax spells
/// number literals with these.
pub const SUPERSCRIPTS: &str = "⁰¹²³⁴⁵⁶⁷⁸⁹";

/// Greek letters usable as variable names, in canonical order.
///
/// ο is deliberately absent (too close to Latin o); both sigmas are
/// included.
pub const GREEK: &str = "αβγδεζηθικλμνξπρσςτυφχψω";

/// ASCII spellings of [`GREEK`], index-aligned. The verbose syntax
/// writes variable names with these letters.
pub const GREEK_ASCII: &str = "abgdezhqiklmnxprsvtufcyw";

/// Fullwidth command letters.
pub const FULLWIDTH: &str = "ＡＢＣＤＥＦＧＨＩＪＫＬＭＮＯＰＱＲＳＴＵＶＷＸＹＺ";

/// Non-letter glyphs that begin or continue a symbolic token.
///
/// Any of these occurring inside a string literal must be escaped with
/// `´` when the literal is re-serialized.
const SYMBOL_GLYPHS: &str = "⟦⟧⦃⦄«»⁺⁻×÷﹪∧∨¬⁼‹›←↑→↓↖↗↘↙↶↷⟲¿‽‖´·¤¦“”⎚…§⎇⊞⪫⪪⌕Ｘ↧↥⌊⌈⊟";

/// Multidirectional shorthand characters.
///
/// These are plain ASCII, so a string literal *starting* with one of
/// them is ambiguous after a multidirectional slot and gets a leading
/// `´` escape from the codec.
pub const SHORTHANDS: &str = "+X*|-\\/<>^KLTVY7¬";

/// Check whether a character belongs to the Cinder code page.
pub fn in_codepage(ch: char) -> bool {
    (ch <= '\u{ff}' && ch != '\n')
        || (('α'..='ω').contains(&ch) && ch != 'ο')
        || ('Ａ'..='Ｚ').contains(&ch)
        || SUPERSCRIPTS.contains(ch)
        || SYMBOL_GLYPHS.contains(ch)
}

/// Check whether a character can begin a symbolic command token.
pub fn is_command_glyph(ch: char) -> bool {
    ('Ａ'..='Ｚ').contains(&ch)
        || SUPERSCRIPTS.contains(ch)
        || (('α'..='ω').contains(&ch) && ch != 'ο')
        || SYMBOL_GLYPHS.contains(ch)
}

/// Value of a superscript digit.
pub fn superscript_value(ch: char) -> Option<i64> {
    SUPERSCRIPTS.chars().position(|s| s == ch).map(|v| v as i64)
}

/// Render a non-negative number as superscript digits.
pub fn to_superscript(value: i64) -> String {
    debug_assert!(value >= 0);
    value
        .to_string()
        .chars()
        .map(|d| {
            SUPERSCRIPTS
                .chars()
                .nth(d as usize - '0' as usize)
                .expect("decimal digit")
        })
        .collect()
}

/// Canonical Greek name for a verbose ASCII variable letter.
pub fn greek_for_ascii(ch: char) -> Option<char> {
    GREEK_ASCII
        .chars()
        .position(|a| a == ch)
        .and_then(|i| GREEK.chars().nth(i))
}

/// Verbose ASCII spelling of a Greek variable name.
pub fn ascii_for_greek(ch: char) -> Option<char> {
    GREEK
        .chars()
        .position(|g| g == ch)
        .and_then(|i| GREEK_ASCII.chars().nth(i))
}

struct Tables {
    page: [char; 256],
    ordinals: HashMap<char, u16>,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        let mut page = [' '; 256];
        for (byte, slot) in page.iter_mut().enumerate() {
            *slot = byte as u8 as char;
        }
        // Fullwidth letters at 'A'..'Z' + 0x80.
        for (i, fw) in FULLWIDTH.chars().enumerate() {
            page[0xc1 + i] = fw;
        }
        // Superscript digits at '0'..'9' + 0x80.
        for (i, sup) in SUPERSCRIPTS.chars().enumerate() {
            page[0xb0 + i] = sup;
        }
        // Greek names at their ASCII spelling + 0x80.
        for (ascii, greek) in GREEK_ASCII.chars().zip(GREEK.chars()) {
            page[ascii as usize + 0x80] = greek;
        }
        for (bracket, double) in "[]{}()".chars().zip("⟦⟧⦃⦄«»".chars()) {
            page[bracket as usize + 0x80] = double;
        }
        for (op, symbol) in "+-*/%!=<>".chars().zip("⁺⁻×÷﹪¬⁼‹›".chars()) {
            page[op as usize + 0x80] = symbol;
        }
        // Arrows and pivots live on the device-control bytes.
        for (byte, arrow) in [
            0x11usize, 0x12, 0x13, 0x14, 0x1c, 0x1d, 0x1e, 0x1f, 0x0e, 0x0f, 0x10,
        ]
        .into_iter()
        .zip("←↑→↓↖↗↘↙↶↷⟲".chars())
        {
            page[byte] = arrow;
        }
        for (ascii, other) in "?;`.o: _$,&'".chars().zip("¿‖´·¤¦⎚…§⎆⎈⌀".chars()) {
            page[ascii as usize + 0x80] = other;
        }
        for (byte, replacement) in [0x0ausize, 0x15, 0x16, 0x01, 0x02, 0x03, 0x04]
            .into_iter()
            .zip("¶⎇‽∧∨“”".chars())
        {
            page[byte] = replacement;
        }

        let mut ordinals = HashMap::new();
        for (byte, ch) in page.iter().enumerate() {
            ordinals.entry(*ch).or_insert(byte as u16);
        }
        Tables { page, ordinals }
    })
}

/// Byte value of a code-page glyph, if it has one.
pub fn ordinal(ch: char) -> Option<u16> {
    tables().ordinals.get(&ch).copied()
}

/// Glyph for a byte value.
pub fn glyph(byte: u8) -> char {
    tables().page[byte as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_ordinals_are_inverse() {
        for byte in 0..=255u8 {
            let ch = glyph(byte);
            assert_eq!(
                ordinal(ch),
                Some(byte as u16),
                "glyph {ch:?} at byte {byte:#04x} does not round-trip"
            );
        }
    }

    #[test]
    fn command_letters_have_high_ordinals() {
        assert_eq!(ordinal('Ａ'), Some(0xc1));
        assert_eq!(ordinal('Ｚ'), Some(0xda));
        assert_eq!(ordinal('⁰'), Some(0xb0));
        assert_eq!(ordinal('α'), Some(0xe1));
    }

    #[test]
    fn classification_accepts_the_symbolic_alphabet() {
        for ch in "←↑→↓↖↗↘↙«»⟦⟧ＰＧ⁴αψ¶".chars() {
            assert!(in_codepage(ch), "{ch:?} should be in the code page");
        }
        assert!(!in_codepage('\n'));
        assert!(!in_codepage('你'));
    }

    #[test]
    fn greek_ascii_mapping_is_bijective() {
        for greek in GREEK.chars() {
            let ascii = ascii_for_greek(greek).expect("ascii spelling");
            assert_eq!(greek_for_ascii(ascii), Some(greek));
        }
    }

    #[test]
    fn superscript_round_trip() {
        assert_eq!(to_superscript(502), "⁵⁰²");
        assert_eq!(superscript_value('⁷'), Some(7));
        assert_eq!(superscript_value('7'), None);
    }
}
