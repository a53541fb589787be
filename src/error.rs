//! Error types for the linebar library.

use crate::symbology::SymbologyKind;
use thiserror::Error;

/// Result type alias for linebar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding, rendering or exporting a barcode.
///
/// Every variant is fatal to the request that produced it. Encoding errors carry the
/// symbology and the offending input so the caller can report or correct it.
#[derive(Debug, Error)]
pub enum Error {
    /// The input contains a character outside the symbology's alphabet.
    #[error("{kind} cannot encode {character:?} at position {position}")]
    InvalidCharacter {
        /// Symbology that rejected the input.
        kind: SymbologyKind,
        /// The rejected character.
        character: char,
        /// Character index (not byte index) in the input.
        position: usize,
    },

    /// The input text is empty.
    #[error("{kind} cannot encode empty input")]
    EmptyInput {
        /// Symbology that rejected the input.
        kind: SymbologyKind,
    },

    /// The input violates a length or format rule of the symbology.
    #[error("{kind} rejected {input:?}: {reason}")]
    StructuralConstraint {
        /// Symbology that rejected the input.
        kind: SymbologyKind,
        /// The rejected input.
        input: String,
        /// Human readable description of the violated rule.
        reason: String,
    },

    /// The requested image is too small to draw every module.
    #[error("{kind} image {width}x{height} cannot hold {modules} modules: {reason}")]
    Geometry {
        /// Symbology of the symbol being laid out.
        kind: SymbologyKind,
        /// Requested image width in pixels.
        width: u32,
        /// Requested image height in pixels.
        height: u32,
        /// Number of modules in the symbol.
        modules: usize,
        /// Which constraint failed.
        reason: &'static str,
    },

    /// The label band could not be composited, usually because the font is unusable.
    #[error("label rendering failed{}: {message}", format_kind(.kind))]
    LabelRender {
        /// Symbology of the labelled symbol, `None` when raised while loading a font.
        kind: Option<SymbologyKind>,
        message: String,
    },

    /// A symbology name did not match any supported symbology.
    #[error("unknown symbology {0:?}")]
    UnknownSymbology(String),

    /// The image container could not be encoded or written.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Filesystem error while saving an image.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_kind(kind: &Option<SymbologyKind>) -> String {
    kind.map_or(String::new(), |k| format!(" ({k})"))
}

impl Error {
    pub(crate) fn label(message: impl Into<String>) -> Self {
        Error::LabelRender {
            kind: None,
            message: message.into(),
        }
    }

    /// Attaches `kind` to a label error that was raised without one.
    pub(crate) fn for_kind(self, kind: SymbologyKind) -> Self {
        match self {
            Error::LabelRender { kind: None, message } => Error::LabelRender {
                kind: Some(kind),
                message,
            },
            other => other,
        }
    }

    pub(crate) fn structural(
        kind: SymbologyKind,
        input: &str,
        reason: impl Into<String>,
    ) -> Self {
        Error::StructuralConstraint {
            kind,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
