//! EAN-13 and EAN-8.
//!
//! Both symbologies carry a fixed number of digits plus a mod-10 check digit. The left half
//! uses L (odd parity) codes, and for EAN-13 a mix of L and G (even parity) codes whose pattern
//! encodes the leading digit. The right half uses R codes. Start, center and end guards are
//! marked [`Extent::Extended`].

use super::{push_bits, Extent, Module, SymbologyKind};
use crate::error::{Error, Result};

/// L-code (left half, odd parity) patterns, seven modules each.
pub const L_CODES: [u16; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011,
    0b0110001, 0b0101111, 0b0111011, 0b0110111, 0b0001011,
];

/// G-code (left half, even parity) patterns.
pub const G_CODES: [u16; 10] = [
    0b0100111, 0b0110011, 0b0011011, 0b0100001, 0b0011101,
    0b0111001, 0b0000101, 0b0010001, 0b0001001, 0b0010111,
];

/// EAN-13 parity of left-half digits 2..=7 for each leading digit, most significant first
/// (1 = G code).
pub const PARITY: [u8; 10] = [
    0b000000, 0b001011, 0b001101, 0b001110, 0b010011,
    0b011001, 0b011100, 0b010101, 0b010110, 0b011010,
];

const SIDE_GUARD: u16 = 0b101;
const CENTER_GUARD: u16 = 0b01010;

/// R-code patterns are the bitwise complement of the L codes.
fn r_code(digit: u8) -> u16 {
    !L_CODES[usize::from(digit)] & 0x7F
}

/// Computes the mod-10 check digit for `digits` (data only, without a check digit).
///
/// Weights alternate 3, 1, 3, ... starting from the rightmost data digit.
pub fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Validates `text` and returns its digits with the check digit in place.
///
/// `data_len` digits are completed with a computed check digit; `data_len + 1` digits have
/// their last digit verified.
fn complete_digits(text: &str, kind: SymbologyKind, data_len: usize) -> Result<Vec<u8>> {
    let mut digits = text
        .chars()
        .enumerate()
        .map(|(position, character)| {
            character
                .to_digit(10)
                .map(|d| d as u8)
                .ok_or(Error::InvalidCharacter {
                    kind,
                    character,
                    position,
                })
        })
        .collect::<Result<Vec<u8>>>()?;

    if digits.len() == data_len {
        let check = check_digit(&digits);
        digits.push(check);
    } else if digits.len() == data_len + 1 {
        let expected = check_digit(&digits[..data_len]);
        if digits[data_len] != expected {
            return Err(Error::structural(
                kind,
                text,
                format!(
                    "check digit {} does not match computed {}",
                    digits[data_len], expected
                ),
            ));
        }
    } else {
        return Err(Error::structural(
            kind,
            text,
            format!("expected {} or {} digits, got {}", data_len, data_len + 1, digits.len()),
        ));
    }
    Ok(digits)
}

fn push_guard(out: &mut Vec<Module>, pattern: u16, len: u8) {
    push_bits(out, pattern, len, Extent::Extended);
}

/// Encodes `text` (12 digits, or 13 with a valid check digit) as EAN-13.
pub fn encode_ean13(text: &str) -> Result<Vec<Module>> {
    let digits = complete_digits(text, SymbologyKind::Ean13, 12)?;
    let parity = PARITY[usize::from(digits[0])];

    let mut out = Vec::with_capacity(95);
    push_guard(&mut out, SIDE_GUARD, 3);
    for (i, &d) in digits[1..7].iter().enumerate() {
        let even = (parity >> (5 - i)) & 1 == 1;
        let code = if even { G_CODES[usize::from(d)] } else { L_CODES[usize::from(d)] };
        push_bits(&mut out, code, 7, Extent::Regular);
    }
    push_guard(&mut out, CENTER_GUARD, 5);
    for &d in &digits[7..] {
        push_bits(&mut out, r_code(d), 7, Extent::Regular);
    }
    push_guard(&mut out, SIDE_GUARD, 3);
    Ok(out)
}

/// Encodes `text` (7 digits, or 8 with a valid check digit) as EAN-8.
pub fn encode_ean8(text: &str) -> Result<Vec<Module>> {
    let digits = complete_digits(text, SymbologyKind::Ean8, 7)?;

    let mut out = Vec::with_capacity(67);
    push_guard(&mut out, SIDE_GUARD, 3);
    for &d in &digits[..4] {
        push_bits(&mut out, L_CODES[usize::from(d)], 7, Extent::Regular);
    }
    push_guard(&mut out, CENTER_GUARD, 5);
    for &d in &digits[4..] {
        push_bits(&mut out, r_code(d), 7, Extent::Regular);
    }
    push_guard(&mut out, SIDE_GUARD, 3);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(modules: &[Module]) -> String {
        modules.iter().map(|m| if m.bar { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_check_digits() {
        assert_eq!(check_digit(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2]), 8);
        assert_eq!(check_digit(&[4, 0, 0, 6, 3, 8, 1, 3, 3, 3, 9, 3]), 1);
        assert_eq!(check_digit(&[1, 2, 3, 4, 5, 6, 7]), 0);
    }

    #[test]
    fn test_ean13_layout() {
        let modules = encode_ean13("123456789012").unwrap();
        assert_eq!(modules.len(), 95);
        assert!(modules[..3].iter().all(Module::is_extended));
        assert!(modules[45..50].iter().all(Module::is_extended));
        assert!(modules[92..].iter().all(Module::is_extended));
        assert_eq!(modules.iter().filter(|m| m.is_extended()).count(), 11);
        assert_eq!(bits(&modules[45..50]), "01010");
        // Last data digit is the computed check digit 8.
        assert_eq!(bits(&modules[85..92]), "1001000");
    }

    #[test]
    fn test_ean13_known_pattern() {
        // 5901234123457: leading 5 selects LGGLLG.
        let modules = encode_ean13("5901234123457").unwrap();
        assert_eq!(bits(&modules[3..10]), "0001011"); // 9, L
        assert_eq!(bits(&modules[10..17]), "0100111"); // 0, G
    }

    #[test]
    fn test_ean13_rejects_wrong_check_digit() {
        assert!(matches!(
            encode_ean13("1234567890123"),
            Err(Error::StructuralConstraint { kind: SymbologyKind::Ean13, .. })
        ));
        assert!(encode_ean13("1234567890128").is_ok());
    }

    #[test]
    fn test_ean_rejects_wrong_length() {
        assert!(matches!(
            encode_ean13("12345"),
            Err(Error::StructuralConstraint { .. })
        ));
        assert!(matches!(
            encode_ean8("123456789"),
            Err(Error::StructuralConstraint { kind: SymbologyKind::Ean8, .. })
        ));
    }

    #[test]
    fn test_ean_rejects_letters_before_length() {
        assert!(matches!(
            encode_ean8("12A"),
            Err(Error::InvalidCharacter { character: 'A', position: 2, .. })
        ));
    }

    #[test]
    fn test_ean8_layout() {
        let modules = encode_ean8("1234567").unwrap();
        assert_eq!(modules.len(), 67);
        assert_eq!(bits(&modules[31..36]), "01010");
        assert_eq!(bits(&modules[3..10]), "0011001"); // 1, L
        assert_eq!(bits(&modules[57..64]), "1110010"); // check digit 0, R
    }
}
