//! Code 93.
//!
//! Each symbol character is nine modules wide with three bars and three spaces. Characters
//! outside the 43-character native set are carried as a shift character followed by a letter
//! (full ASCII mode). Two check characters, C and K, follow the data.

use super::{push_bits, Extent, Module, SymbologyKind};
use crate::error::{Error, Result};

/// Native characters in value order (value = index).
pub const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

pub const SHIFT_DOLLAR: u8 = 43;
pub const SHIFT_PERCENT: u8 = 44;
pub const SHIFT_SLASH: u8 = 45;
pub const SHIFT_PLUS: u8 = 46;

/// Module patterns for values 0..=46, most significant bit first.
pub const PATTERNS: [u16; 47] = [
    0x114, 0x148, 0x144, 0x142, 0x128, 0x124, 0x122, 0x150, 0x112, 0x10A, // 0-9
    0x1A8, 0x1A4, 0x1A2, 0x194, 0x192, 0x18A, 0x168, 0x164, 0x162, 0x134, // A-J
    0x11A, 0x158, 0x14C, 0x146, 0x12C, 0x116, 0x1B4, 0x1B2, 0x1AC, 0x1A6, // K-T
    0x196, 0x19A, 0x16C, 0x166, 0x136, 0x13A, // U-Z
    0x12E, 0x1D4, 0x1D2, 0x1CA, 0x16E, 0x176, 0x1AE, // - . space $ / + %
    0x126, 0x1DA, 0x1D6, 0x132, // ($) (%) (/) (+)
];

pub const START_STOP: u16 = 0x15E;

fn letter(c: u8) -> u8 {
    10 + (c - b'A')
}

/// Maps one ASCII byte to its Code 93 values: an optional shift followed by a value.
pub fn full_ascii(c: u8) -> Option<(Option<u8>, u8)> {
    let native = |v: u8| Some((None, v));
    let shifted = |shift: u8, l: u8| Some((Some(shift), letter(l)));
    match c {
        b'0'..=b'9' => native(c - b'0'),
        b'A'..=b'Z' => native(letter(c)),
        b'-' => native(36),
        b'.' => native(37),
        b' ' => native(38),
        b'$' => native(39),
        b'/' => native(40),
        b'+' => native(41),
        b'%' => native(42),
        0 => shifted(SHIFT_PERCENT, b'U'),
        1..=26 => shifted(SHIFT_DOLLAR, b'A' + c - 1),
        27..=31 => shifted(SHIFT_PERCENT, b'A' + c - 27),
        b'!'..=b',' => shifted(SHIFT_SLASH, b'A' + c - b'!'),
        b':' => shifted(SHIFT_SLASH, b'Z'),
        b';'..=b'?' => shifted(SHIFT_PERCENT, b'F' + c - b';'),
        b'@' => shifted(SHIFT_PERCENT, b'V'),
        b'['..=b'_' => shifted(SHIFT_PERCENT, b'K' + c - b'['),
        b'`' => shifted(SHIFT_PERCENT, b'W'),
        b'a'..=b'z' => shifted(SHIFT_PLUS, b'A' + c - b'a'),
        b'{'..=b'~' => shifted(SHIFT_PERCENT, b'P' + c - b'{'),
        127 => shifted(SHIFT_PERCENT, b'T'),
        _ => None,
    }
}

/// Weighted mod-47 check value. Weights run 1..=`max_weight` from the rightmost value.
pub fn check_value(values: &[u8], max_weight: usize) -> u8 {
    let sum: usize = values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| (i % max_weight + 1) * usize::from(v))
        .sum();
    (sum % 47) as u8
}

/// Encodes `text` as Code 93 with both check characters.
pub fn encode(text: &str) -> Result<Vec<Module>> {
    let mut values: Vec<u8> = Vec::with_capacity(text.len() * 2 + 2);
    for (position, character) in text.chars().enumerate() {
        let mapped = u8::try_from(u32::from(character))
            .ok()
            .and_then(full_ascii)
            .ok_or(Error::InvalidCharacter {
                kind: SymbologyKind::Code93,
                character,
                position,
            })?;
        if let (Some(shift), _) = mapped {
            values.push(shift);
        }
        values.push(mapped.1);
    }

    let c = check_value(&values, 20);
    values.push(c);
    let k = check_value(&values, 15);
    values.push(k);

    let mut out = Vec::with_capacity((values.len() + 2) * 9 + 1);
    push_bits(&mut out, START_STOP, 9, Extent::Regular);
    for &v in &values {
        push_bits(&mut out, PATTERNS[usize::from(v)], 9, Extent::Regular);
    }
    push_bits(&mut out, START_STOP, 9, Extent::Regular);
    // Termination bar.
    out.push(Module::bar());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_have_three_bars() {
        for (i, &p) in PATTERNS.iter().enumerate() {
            let mut runs = 0;
            let mut prev = false;
            for bit in (0..9).rev().map(|b| (p >> b) & 1 == 1) {
                if bit && !prev {
                    runs += 1;
                }
                prev = bit;
            }
            assert_eq!(runs, 3, "value {}", i);
            assert_eq!(p >> 8, 1, "value {} must start with a bar", i);
            assert_eq!(p & 1, 0, "value {} must end with a space", i);
        }
    }

    #[test]
    fn test_check_characters_for_test93() {
        // Reference example from the Code 93 specification: "TEST93" -> C = '+', K = '6'
        let values: Vec<u8> = b"TEST93".iter().filter_map(|&c| full_ascii(c)).map(|m| m.1).collect();
        let c = check_value(&values, 20);
        assert_eq!(ALPHABET.as_bytes()[usize::from(c)], b'+');
        let mut with_c = values.clone();
        with_c.push(c);
        let k = check_value(&with_c, 15);
        assert_eq!(ALPHABET.as_bytes()[usize::from(k)], b'6');
    }

    #[test]
    fn test_full_ascii_shifts() {
        assert_eq!(full_ascii(b'a'), Some((Some(SHIFT_PLUS), 10)));
        assert_eq!(full_ascii(b'!'), Some((Some(SHIFT_SLASH), 10)));
        assert_eq!(full_ascii(b'@'), Some((Some(SHIFT_PERCENT), letter(b'V'))));
        assert_eq!(full_ascii(b'~'), Some((Some(SHIFT_PERCENT), letter(b'S'))));
        assert_eq!(full_ascii(b'\n'), Some((Some(SHIFT_DOLLAR), letter(b'J'))));
        assert_eq!(full_ascii(b'$'), Some((None, 39)));
        assert_eq!(full_ascii(200), None);
    }

    #[test]
    fn test_module_count() {
        // start + 2 data + C + K + stop + termination bar
        assert_eq!(encode("AB").unwrap().len(), 6 * 9 + 1);
        // lowercase letters take a shift each
        assert_eq!(encode("ab").unwrap().len(), 8 * 9 + 1);
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!(matches!(
            encode("AB\u{e9}"),
            Err(Error::InvalidCharacter { character: '\u{e9}', position: 2, .. })
        ));
    }
}
