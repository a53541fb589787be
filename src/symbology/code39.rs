//! Code 39 (USS Code 3 of 9).
//!
//! Every character is nine elements, bar first, three of which are wide. The `*` start/stop
//! character is added by the encoder and is not accepted in the input.

use super::{push_widths, Module, SymbologyKind};
use crate::error::{Error, Result};

/// Characters in check-value order (value = index). `*` is the start/stop sentinel.
pub const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

/// Wide element width in modules. Narrow elements are one module.
pub const WIDE: u8 = 3;

/// Nine-element wide/narrow patterns, most significant bit first (1 = wide), indexed like
/// [`ALPHABET`].
pub const PATTERNS: [u16; 43] = [
    0x034, 0x121, 0x061, 0x160, 0x031, 0x130, 0x070, 0x025, 0x124, 0x064, // 0-9
    0x109, 0x049, 0x148, 0x019, 0x118, 0x058, 0x00D, 0x10C, 0x04C, 0x01C, // A-J
    0x103, 0x043, 0x142, 0x013, 0x112, 0x052, 0x007, 0x106, 0x046, 0x016, // K-T
    0x181, 0x0C1, 0x1C0, 0x091, 0x190, 0x0D0, // U-Z
    0x085, 0x184, 0x0C4, 0x0A8, 0x0A2, 0x08A, 0x02A, // - . space $ / + %
];

pub const START_STOP: u16 = 0x094;

/// Returns the check value of `c`, or `None` if `c` is not in the Code 39 alphabet.
pub fn value_of(c: char) -> Option<usize> {
    ALPHABET.find(c)
}

/// Computes the mod-43 check value over `values`.
pub fn checksum(values: &[usize]) -> usize {
    values.iter().sum::<usize>() % 43
}

/// Encodes `text` as Code 39, optionally with the mod-43 check character.
pub fn encode(text: &str, with_checksum: bool) -> Result<Vec<Module>> {
    let values = text
        .chars()
        .enumerate()
        .map(|(position, character)| {
            value_of(character).ok_or(Error::InvalidCharacter {
                kind: SymbologyKind::Code39,
                character,
                position,
            })
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut patterns: Vec<u16> = Vec::with_capacity(values.len() + 3);
    patterns.push(START_STOP);
    patterns.extend(values.iter().map(|&v| PATTERNS[v]));
    if with_checksum {
        patterns.push(PATTERNS[checksum(&values)]);
    }
    patterns.push(START_STOP);

    let mut out = Vec::with_capacity(patterns.len() * 16);
    for (i, &pattern) in patterns.iter().enumerate() {
        if i > 0 {
            // Narrow inter-character gap.
            out.push(Module::space());
        }
        push_widths(&mut out, &widths(pattern));
    }
    Ok(out)
}

fn widths(pattern: u16) -> [u8; 9] {
    let mut widths = [1u8; 9];
    for (i, w) in widths.iter_mut().enumerate() {
        if (pattern >> (8 - i)) & 1 == 1 {
            *w = WIDE;
        }
    }
    widths
}
