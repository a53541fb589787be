//! Code 128.
//!
//! Code 128 has three code sets: A (control characters and upper case), B (printable ASCII) and
//! C (digit pairs). The encoder chooses the start code, code set switches and single-character
//! shifts that give the fewest symbol characters, which also gives the fewest modules since every
//! symbol character is 11 modules wide. When two choices cost the same the encoder stays in the
//! current code set. A tie between start codes goes to C, then B, then A, so input that opens
//! with two or more digits starts in C.
//!
//! Latin-1 characters 128..=255 are carried as FNC4 followed by the character's low seven bits.

use super::{push_widths, Module, SymbologyKind};
use crate::error::{Error, Result};

/// Bar/space widths for symbol values 0..=105. Every pattern is 11 modules wide.
pub const PATTERNS: [[u8; 6]; 106] = [
    [2, 1, 2, 2, 2, 2], [2, 2, 2, 1, 2, 2], [2, 2, 2, 2, 2, 1], [1, 2, 1, 2, 2, 3],
    [1, 2, 1, 3, 2, 2], [1, 3, 1, 2, 2, 2], [1, 2, 2, 2, 1, 3], [1, 2, 2, 3, 1, 2],
    [1, 3, 2, 2, 1, 2], [2, 2, 1, 2, 1, 3], [2, 2, 1, 3, 1, 2], [2, 3, 1, 2, 1, 2],
    [1, 1, 2, 2, 3, 2], [1, 2, 2, 1, 3, 2], [1, 2, 2, 2, 3, 1], [1, 1, 3, 2, 2, 2],
    [1, 2, 3, 1, 2, 2], [1, 2, 3, 2, 2, 1], [2, 2, 3, 2, 1, 1], [2, 2, 1, 1, 3, 2],
    [2, 2, 1, 2, 3, 1], [2, 1, 3, 2, 1, 2], [2, 2, 3, 1, 1, 2], [3, 1, 2, 1, 3, 1],
    [3, 1, 1, 2, 2, 2], [3, 2, 1, 1, 2, 2], [3, 2, 1, 2, 2, 1], [3, 1, 2, 2, 1, 2],
    [3, 2, 2, 1, 1, 2], [3, 2, 2, 2, 1, 1], [2, 1, 2, 1, 2, 3], [2, 1, 2, 3, 2, 1],
    [2, 3, 2, 1, 2, 1], [1, 1, 1, 3, 2, 3], [1, 3, 1, 1, 2, 3], [1, 3, 1, 3, 2, 1],
    [1, 1, 2, 3, 1, 3], [1, 3, 2, 1, 1, 3], [1, 3, 2, 3, 1, 1], [2, 1, 1, 3, 1, 3],
    [2, 3, 1, 1, 1, 3], [2, 3, 1, 3, 1, 1], [1, 1, 2, 1, 3, 3], [1, 1, 2, 3, 3, 1],
    [1, 3, 2, 1, 3, 1], [1, 1, 3, 1, 2, 3], [1, 1, 3, 3, 2, 1], [1, 3, 3, 1, 2, 1],
    [3, 1, 3, 1, 2, 1], [2, 1, 1, 3, 3, 1], [2, 3, 1, 1, 3, 1], [2, 1, 3, 1, 1, 3],
    [2, 1, 3, 3, 1, 1], [2, 1, 3, 1, 3, 1], [3, 1, 1, 1, 2, 3], [3, 1, 1, 3, 2, 1],
    [3, 3, 1, 1, 2, 1], [3, 1, 2, 1, 1, 3], [3, 1, 2, 3, 1, 1], [3, 3, 2, 1, 1, 1],
    [3, 1, 4, 1, 1, 1], [2, 2, 1, 4, 1, 1], [4, 3, 1, 1, 1, 1], [1, 1, 1, 2, 2, 4],
    [1, 1, 1, 4, 2, 2], [1, 2, 1, 1, 2, 4], [1, 2, 1, 4, 2, 1], [1, 4, 1, 1, 2, 2],
    [1, 4, 1, 2, 2, 1], [1, 1, 2, 2, 1, 4], [1, 1, 2, 4, 1, 2], [1, 2, 2, 1, 1, 4],
    [1, 2, 2, 4, 1, 1], [1, 4, 2, 1, 1, 2], [1, 4, 2, 2, 1, 1], [2, 4, 1, 2, 1, 1],
    [2, 2, 1, 1, 1, 4], [4, 1, 3, 1, 1, 1], [2, 4, 1, 1, 1, 2], [1, 3, 4, 1, 1, 1],
    [1, 1, 1, 2, 4, 2], [1, 2, 1, 1, 4, 2], [1, 2, 1, 2, 4, 1], [1, 1, 4, 2, 1, 2],
    [1, 2, 4, 1, 1, 2], [1, 2, 4, 2, 1, 1], [4, 1, 1, 2, 1, 2], [4, 2, 1, 1, 1, 2],
    [4, 2, 1, 2, 1, 1], [2, 1, 2, 1, 4, 1], [2, 1, 4, 1, 2, 1], [4, 1, 2, 1, 2, 1],
    [1, 1, 1, 1, 4, 3], [1, 1, 1, 3, 4, 1], [1, 3, 1, 1, 4, 1], [1, 1, 4, 1, 1, 3],
    [1, 1, 4, 3, 1, 1], [4, 1, 1, 1, 1, 3], [4, 1, 1, 3, 1, 1], [1, 1, 3, 1, 4, 1],
    [1, 1, 4, 1, 3, 1], [3, 1, 1, 1, 4, 1], [4, 1, 1, 1, 3, 1], [2, 1, 1, 4, 1, 2],
    [2, 1, 1, 2, 1, 4], [2, 1, 1, 2, 3, 2],
];

/// Stop pattern including the two-module termination bar.
pub const STOP: [u8; 7] = [2, 3, 3, 1, 1, 1, 2];

pub const SHIFT: u8 = 98;
pub const CODE_C: u8 = 99;
pub const CODE_B: u8 = 100;
pub const CODE_A: u8 = 101;
pub const START_A: u8 = 103;
pub const START_B: u8 = 104;
pub const START_C: u8 = 105;

/// A Code 128 code set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSet {
    A,
    B,
    C,
}

impl CodeSet {
    const ALL: [CodeSet; 3] = [CodeSet::A, CodeSet::B, CodeSet::C];

    fn index(self) -> usize {
        match self {
            CodeSet::A => 0,
            CodeSet::B => 1,
            CodeSet::C => 2,
        }
    }

    fn start_code(self) -> u8 {
        match self {
            CodeSet::A => START_A,
            CodeSet::B => START_B,
            CodeSet::C => START_C,
        }
    }

    /// The value that switches into `self` from another set.
    fn switch_code(self) -> u8 {
        match self {
            CodeSet::A => CODE_A,
            CodeSet::B => CODE_B,
            CodeSet::C => CODE_C,
        }
    }

    /// FNC4 shares its value with the switch code of the opposite alphabetic set.
    fn fnc4(self) -> u8 {
        match self {
            CodeSet::A => CODE_A,
            _ => CODE_B,
        }
    }

    /// Value of a 7-bit character in this set, if it has one.
    fn value(self, low: u8) -> Option<u8> {
        match self {
            CodeSet::A if low < 32 => Some(low + 64),
            CodeSet::A if low < 96 => Some(low - 32),
            CodeSet::B if (32..128).contains(&low) => Some(low - 32),
            _ => None,
        }
    }

    /// The other alphabetic set, used for single-character shifts.
    fn shifted(self) -> Option<CodeSet> {
        match self {
            CodeSet::A => Some(CodeSet::B),
            CodeSet::B => Some(CodeSet::A),
            CodeSet::C => None,
        }
    }
}

/// How one character (or digit pair) is consumed from a code set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Direct,
    Shift,
    Pair,
}

const UNREACHABLE: usize = usize::MAX / 4;

fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Symbol characters needed to carry `c` in `set` without a shift, if possible.
fn direct_cost(set: CodeSet, c: u8) -> Option<usize> {
    let (fnc4, low) = if c >= 128 { (1, c - 128) } else { (0, c) };
    set.value(low).map(|_| 1 + fnc4)
}

/// Picks code sets for `bytes` with the fewest symbol characters.
struct Planner<'a> {
    bytes: &'a [u8],
    /// Cheapest cost from position `i` in set `s` when the next thing is a character, not a switch.
    stay: Vec<[usize; 3]>,
    stay_step: Vec<[Step; 3]>,
    /// Cheapest cost from position `i` in set `s`, allowing one leading switch.
    best: Vec<[usize; 3]>,
    best_set: Vec<[CodeSet; 3]>,
}

impl<'a> Planner<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        let n = bytes.len();
        let mut planner = Planner {
            bytes,
            stay: vec![[0; 3]; n + 1],
            stay_step: vec![[Step::Direct; 3]; n + 1],
            best: vec![[0; 3]; n + 1],
            best_set: vec![CodeSet::ALL; n + 1],
        };
        for i in (0..n).rev() {
            planner.fill(i);
        }
        planner
    }

    fn fill(&mut self, i: usize) {
        let c = self.bytes[i];
        for set in CodeSet::ALL {
            let s = set.index();
            let (cost, step) = match set {
                CodeSet::C => {
                    if i + 1 < self.bytes.len() && is_digit(c) && is_digit(self.bytes[i + 1]) {
                        (1 + self.best[i + 2][s], Step::Pair)
                    } else {
                        (UNREACHABLE, Step::Pair)
                    }
                }
                _ => {
                    let next = self.best[i + 1][s];
                    let direct = direct_cost(set, c).map(|k| k + next);
                    let shift = set
                        .shifted()
                        .filter(|_| c < 128)
                        .and_then(|other| direct_cost(other, c))
                        .map(|k| 1 + k + next);
                    match (direct, shift) {
                        (Some(d), Some(sh)) if sh < d => (sh, Step::Shift),
                        (Some(d), _) => (d, Step::Direct),
                        (None, Some(sh)) => (sh, Step::Shift),
                        (None, None) => (UNREACHABLE, Step::Direct),
                    }
                }
            };
            self.stay[i][s] = cost;
            self.stay_step[i][s] = step;
        }
        for set in CodeSet::ALL {
            let s = set.index();
            let mut best = self.stay[i][s];
            let mut best_set = set;
            // Switch only when strictly cheaper; C is tried before B before A.
            for other in [CodeSet::C, CodeSet::B, CodeSet::A] {
                if other != set && 1 + self.stay[i][other.index()] < best {
                    best = 1 + self.stay[i][other.index()];
                    best_set = other;
                }
            }
            self.best[i][s] = best;
            self.best_set[i][s] = best_set;
        }
    }

    fn start_set(&self) -> CodeSet {
        let mut start = CodeSet::C;
        for set in [CodeSet::B, CodeSet::A] {
            if self.stay[0][set.index()] < self.stay[0][start.index()] {
                start = set;
            }
        }
        start
    }

    /// Emits the symbol values, starting with the start code and excluding the check value.
    fn values(&self) -> Vec<u8> {
        let mut set = self.start_set();
        let mut out = vec![set.start_code()];
        let mut i = 0;
        while i < self.bytes.len() {
            if i > 0 {
                let next = self.best_set[i][set.index()];
                if next != set {
                    tracing::trace!(position = i, from = ?set, to = ?next, "code set switch");
                    out.push(next.switch_code());
                    set = next;
                }
            }
            let c = self.bytes[i];
            match self.stay_step[i][set.index()] {
                Step::Pair => {
                    out.push((c - b'0') * 10 + (self.bytes[i + 1] - b'0'));
                    i += 2;
                }
                Step::Direct => {
                    push_char(&mut out, set, c);
                    i += 1;
                }
                Step::Shift => {
                    out.push(SHIFT);
                    if let Some(other) = set.shifted() {
                        push_char(&mut out, other, c);
                    }
                    i += 1;
                }
            }
        }
        out
    }
}

fn push_char(out: &mut Vec<u8>, set: CodeSet, c: u8) {
    let low = if c >= 128 {
        out.push(set.fnc4());
        c - 128
    } else {
        c
    };
    if let Some(v) = set.value(low) {
        out.push(v);
    }
}

/// Computes the mod-103 check value over `values`, which begin with the start code.
pub fn checksum(values: &[u8]) -> u8 {
    let sum: usize = values
        .iter()
        .enumerate()
        .map(|(i, &v)| i.max(1) * usize::from(v))
        .sum();
    (sum % 103) as u8
}

/// Returns the symbol values for `text`: start code, data, switches and the check value,
/// without the stop pattern.
pub fn symbol_values(text: &str) -> Result<Vec<u8>> {
    let bytes = text
        .chars()
        .enumerate()
        .map(|(position, character)| {
            u8::try_from(u32::from(character)).map_err(|_| Error::InvalidCharacter {
                kind: SymbologyKind::Code128,
                character,
                position,
            })
        })
        .collect::<Result<Vec<u8>>>()?;

    let mut values = Planner::new(&bytes).values();
    let check = checksum(&values);
    values.push(check);
    Ok(values)
}

/// Encodes `text` as Code 128.
pub fn encode(text: &str) -> Result<Vec<Module>> {
    let values = symbol_values(text)?;
    let mut out = Vec::with_capacity(values.len() * 11 + 13);
    for &v in &values {
        push_widths(&mut out, &PATTERNS[usize::from(v)]);
    }
    push_widths(&mut out, &STOP);
    Ok(out)
}
