//! Linear symbology encoding.
//!
//! This module maps input text to the ordered sequence of black and white modules that make up a
//! linear barcode. Each supported symbology lives in its own submodule and exposes a pure
//! `encode` function; [`Symbol::encode`] dispatches to them by [`SymbologyKind`].

use crate::error::{Error, Result};
use core::fmt;
use core::str::FromStr;

pub mod code11;
pub mod code128;
pub mod code39;
pub mod code93;
pub mod ean;

/// Vertical extent of a module.
///
/// Only EAN guard patterns are marked [`Extent::Extended`]; the renderer draws them taller than
/// the data bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Extent {
    #[default]
    Regular,
    Extended,
}

/// The smallest unit of a linear barcode: one module-wide bar or space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Module {
    /// `true` for a bar (dark), `false` for a space (light).
    pub bar: bool,
    pub extent: Extent,
}

impl Module {
    pub const fn bar() -> Self {
        Module { bar: true, extent: Extent::Regular }
    }

    pub const fn space() -> Self {
        Module { bar: false, extent: Extent::Regular }
    }

    pub const fn new(bar: bool, extent: Extent) -> Self {
        Module { bar, extent }
    }

    /// Returns `true` if this module belongs to a guard pattern.
    pub fn is_extended(&self) -> bool {
        self.extent == Extent::Extended
    }
}

/// The supported linear symbologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SymbologyKind {
    Code11,
    #[default]
    Code128,
    Code39,
    Code93,
    Ean8,
    Ean13,
}

impl SymbologyKind {
    /// All supported symbologies, in declaration order.
    pub const ALL: [SymbologyKind; 6] = [
        SymbologyKind::Code11,
        SymbologyKind::Code128,
        SymbologyKind::Code39,
        SymbologyKind::Code93,
        SymbologyKind::Ean8,
        SymbologyKind::Ean13,
    ];

    fn name(self) -> &'static str {
        match self {
            SymbologyKind::Code11 => "Code11",
            SymbologyKind::Code128 => "Code128",
            SymbologyKind::Code39 => "Code39",
            SymbologyKind::Code93 => "Code93",
            SymbologyKind::Ean8 => "EAN8",
            SymbologyKind::Ean13 => "EAN13",
        }
    }
}

impl fmt::Display for SymbologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymbologyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace(['-', '_', ' '], "");
        SymbologyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::UnknownSymbology(s.to_string()))
    }
}

/// Symbology-specific encoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncodeOptions {
    /// Append the optional mod-43 check character to Code 39 symbols.
    pub code39_checksum: bool,
}

/// An encoded barcode: the source text and the modules that represent it.
///
/// Instances are immutable after creation. Encoding new text produces a new `Symbol`.
///
/// # Example
///
/// ```rust
/// use linebar::symbology::{Symbol, SymbologyKind};
///
/// let symbol = Symbol::encode("HELLO", SymbologyKind::Code39).unwrap();
/// assert_eq!(symbol.text(), "HELLO");
/// assert!(symbol.module_count() > 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    text: String,
    kind: SymbologyKind,
    modules: Vec<Module>,
}

impl Symbol {
    /// Encodes `text` with the default [`EncodeOptions`].
    pub fn encode(text: &str, kind: SymbologyKind) -> Result<Symbol> {
        Self::encode_with(text, kind, &EncodeOptions::default())
    }

    /// Encodes `text` as `kind`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `text` is empty.
    /// - [`Error::InvalidCharacter`] if `text` contains a character the symbology cannot carry.
    /// - [`Error::StructuralConstraint`] if `text` breaks a length or checksum rule.
    pub fn encode_with(text: &str, kind: SymbologyKind, options: &EncodeOptions) -> Result<Symbol> {
        if text.is_empty() {
            return Err(Error::EmptyInput { kind });
        }
        let modules = match kind {
            SymbologyKind::Code11 => code11::encode(text)?,
            SymbologyKind::Code128 => code128::encode(text)?,
            SymbologyKind::Code39 => code39::encode(text, options.code39_checksum)?,
            SymbologyKind::Code93 => code93::encode(text)?,
            SymbologyKind::Ean8 => ean::encode_ean8(text)?,
            SymbologyKind::Ean13 => ean::encode_ean13(text)?,
        };
        debug_assert!(!modules.is_empty());
        tracing::debug!(%kind, modules = modules.len(), "encoded symbol");
        Ok(Symbol {
            text: text.to_string(),
            kind,
            modules,
        })
    }

    /// The text this symbol was encoded from.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SymbologyKind {
        self.kind
    }

    /// The modules of this symbol, left to right.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if any module is marked [`Extent::Extended`].
    pub fn has_guards(&self) -> bool {
        self.modules.iter().any(Module::is_extended)
    }

    /// Returns the modules as a string of `1` (bar) and `0` (space).
    pub fn to_bit_string(&self) -> String {
        self.modules
            .iter()
            .map(|m| if m.bar { '1' } else { '0' })
            .collect()
    }
}

/*---- Shared pattern helpers ----*/

/// Appends alternating bar/space runs, starting with a bar. Each entry is a run width in modules.
pub(crate) fn push_widths(out: &mut Vec<Module>, widths: &[u8]) {
    for (i, &w) in widths.iter().enumerate() {
        let bar = i % 2 == 0;
        out.extend(core::iter::repeat(Module::new(bar, Extent::Regular)).take(usize::from(w)));
    }
}

/// Appends modules from the low `len` bits of `bits`, most significant first.
pub(crate) fn push_bits(out: &mut Vec<Module>, bits: u16, len: u8, extent: Extent) {
    for i in (0..len).rev() {
        out.push(Module::new((bits >> i) & 1 == 1, extent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_widths_alternates() {
        let mut out = Vec::new();
        push_widths(&mut out, &[2, 1, 3]);
        let bits: String = out.iter().map(|m| if m.bar { '1' } else { '0' }).collect();
        assert_eq!(bits, "110111");
    }

    #[test]
    fn test_push_bits_msb_first() {
        let mut out = Vec::new();
        push_bits(&mut out, 0b101, 3, Extent::Extended);
        assert_eq!(out.len(), 3);
        assert!(out[0].bar && !out[1].bar && out[2].bar);
        assert!(out.iter().all(Module::is_extended));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("code128".parse::<SymbologyKind>().unwrap(), SymbologyKind::Code128);
        assert_eq!("EAN-13".parse::<SymbologyKind>().unwrap(), SymbologyKind::Ean13);
        assert_eq!("ean_8".parse::<SymbologyKind>().unwrap(), SymbologyKind::Ean8);
        assert!(matches!(
            "qr".parse::<SymbologyKind>(),
            Err(Error::UnknownSymbology(_))
        ));
    }

    #[test]
    fn test_empty_input_rejected_for_every_kind() {
        for kind in SymbologyKind::ALL {
            assert!(matches!(
                Symbol::encode("", kind),
                Err(Error::EmptyInput { kind: k }) if k == kind
            ));
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let a = Symbol::encode("ABC-123", SymbologyKind::Code93).unwrap();
        let b = Symbol::encode("ABC-123", SymbologyKind::Code93).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_bit_string(), b.to_bit_string());
    }

    #[test]
    fn test_has_guards_only_for_ean() {
        assert!(Symbol::encode("1234567", SymbologyKind::Ean8).unwrap().has_guards());
        assert!(!Symbol::encode("1234567", SymbologyKind::Code128).unwrap().has_guards());
    }
}
