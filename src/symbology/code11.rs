//! Code 11 (USD-8).
//!
//! Digits and the `-` separator, each five elements wide. A mod-11 "C" check digit is always
//! appended; a second "K" check digit follows when the data is longer than
//! [`K_THRESHOLD`] characters.

use super::{push_widths, Module, SymbologyKind};
use crate::error::{Error, Result};

/// Data length above which the K check digit is added.
pub const K_THRESHOLD: usize = 10;

/// Element widths (bar, space, bar, space, bar) for values 0..=10, where 10 is `-`.
pub const WIDTHS: [[u8; 5]; 11] = [
    [1, 1, 1, 1, 2], // 0
    [2, 1, 1, 1, 2], // 1
    [1, 2, 1, 1, 2], // 2
    [2, 2, 1, 1, 1], // 3
    [1, 1, 2, 1, 2], // 4
    [2, 1, 2, 1, 1], // 5
    [1, 2, 2, 1, 1], // 6
    [1, 1, 1, 2, 2], // 7
    [2, 1, 1, 2, 1], // 8
    [2, 1, 1, 1, 1], // 9
    [1, 1, 2, 1, 1], // -
];

pub const START_STOP: [u8; 5] = [1, 1, 2, 2, 1];

pub fn value_of(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        '-' => Some(10),
        _ => None,
    }
}

/// Weighted mod-11 check value. Weights run 1..=`max_weight` from the rightmost value.
pub fn check_value(values: &[u8], max_weight: usize) -> u8 {
    let sum: usize = values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| (i % max_weight + 1) * usize::from(v))
        .sum();
    (sum % 11) as u8
}

/// Encodes `text` as Code 11 with its check digit(s).
pub fn encode(text: &str) -> Result<Vec<Module>> {
    let mut values = text
        .chars()
        .enumerate()
        .map(|(position, character)| {
            value_of(character).ok_or(Error::InvalidCharacter {
                kind: SymbologyKind::Code11,
                character,
                position,
            })
        })
        .collect::<Result<Vec<u8>>>()?;

    let data_len = values.len();
    let c = check_value(&values, 10);
    values.push(c);
    if data_len > K_THRESHOLD {
        let k = check_value(&values, 9);
        values.push(k);
    }

    let mut out = Vec::with_capacity((values.len() + 2) * 8);
    push_widths(&mut out, &START_STOP);
    for &v in &values {
        out.push(Module::space());
        push_widths(&mut out, &WIDTHS[usize::from(v)]);
    }
    out.push(Module::space());
    push_widths(&mut out, &START_STOP);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_check_digit() {
        // 1*4 + 2*3 + 3*2 + 4*1 = 20, 20 % 11 = 9
        let values: Vec<u8> = "1234".chars().filter_map(value_of).collect();
        assert_eq!(check_value(&values, 10), 9);
    }

    #[test]
    fn test_separator_check_value() {
        // "123-45": 1*6 + 2*5 + 3*4 + 10*3 + 4*2 + 5*1 = 71, 71 % 11 = 5
        let values: Vec<u8> = "123-45".chars().filter_map(value_of).collect();
        assert_eq!(check_value(&values, 10), 5);
    }

    #[test]
    fn test_k_digit_only_above_threshold() {
        let short = encode("0123456789").unwrap();
        let long = encode("01234567890").unwrap();
        // The longer input carries one more data character and the K digit.
        assert!(long.len() > short.len() + 6);
        let start: String = short[..7].iter().map(|m| if m.bar { '1' } else { '0' }).collect();
        assert_eq!(start, "1011001");
    }

    #[test]
    fn test_rejects_letters() {
        assert!(matches!(
            encode("12A4"),
            Err(Error::InvalidCharacter { character: 'A', position: 2, .. })
        ));
    }
}
