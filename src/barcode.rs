//! The `Barcode` facade: encode once, render on demand.

use crate::error::Result;
use crate::graphics::{layout, renderer, RenderConfig};
use crate::helper;
use crate::symbology::{EncodeOptions, Symbol, SymbologyKind};
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// An encoded barcode together with the configuration used to render it.
///
/// Construction runs the encoder; a `Barcode` only exists if encoding succeeded. Every render
/// request lays out and paints a fresh image, nothing is cached.
///
/// # Example
///
/// ```rust
/// use linebar::{Barcode, RenderConfig, SymbologyKind};
///
/// let barcode = Barcode::new("HELLO", SymbologyKind::Code39, RenderConfig::default()).unwrap();
/// let img = barcode.generate_image().unwrap();
/// assert_eq!(img.width(), 2 * barcode.symbol().module_count() as u32);
/// ```
#[derive(Debug, Clone)]
pub struct Barcode {
    symbol: Symbol,
    config: RenderConfig,
}

impl Barcode {
    /// Encodes `text` as `kind` with default encode options.
    ///
    /// # Errors
    ///
    /// Propagates any encoding error; see [`Symbol::encode_with`].
    pub fn new(text: &str, kind: SymbologyKind, config: RenderConfig) -> Result<Self> {
        Self::with_options(text, kind, &EncodeOptions::default(), config)
    }

    pub fn with_options(
        text: &str,
        kind: SymbologyKind,
        options: &EncodeOptions,
        config: RenderConfig,
    ) -> Result<Self> {
        let symbol = Symbol::encode_with(text, kind, options)?;
        Ok(Barcode { symbol, config })
    }

    /// Encodes new text with the same render configuration. `self` is left unchanged.
    pub fn reencode(&self, text: &str, kind: SymbologyKind) -> Result<Self> {
        Self::new(text, kind, self.config.clone())
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders the barcode into a new RGBA image.
    ///
    /// # Errors
    ///
    /// [`Error::Geometry`](crate::Error::Geometry) if the configured size is too small, or
    /// [`Error::LabelRender`](crate::Error::LabelRender) if the label cannot be drawn.
    pub fn generate_image(&self) -> Result<RgbaImage> {
        let geometry = layout::compute(&self.symbol, &self.config)?;
        tracing::debug!(
            kind = %self.symbol.kind(),
            width = geometry.pixel_width,
            height = geometry.pixel_height,
            module_px = geometry.module_width_px,
            "rendering barcode"
        );
        renderer::render(&self.symbol, &geometry, &self.config)
    }

    /// Renders and encodes the image in `format`.
    pub fn to_bytes(&self, format: ImageFormat) -> Result<Vec<u8>> {
        helper::encode_image(&self.generate_image()?, format)
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes(ImageFormat::Png)
    }

    /// Renders the image as a Base64 encoded PNG.
    pub fn to_base64(&self) -> Result<String> {
        helper::to_base64(&self.generate_image()?, ImageFormat::Png)
    }

    /// Renders the image and writes it to `path` in `format`.
    pub fn save(&self, path: impl AsRef<Path>, format: ImageFormat) -> Result<()> {
        helper::save_image_to(&self.generate_image()?, path.as_ref(), format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::graphics::LabelPosition;

    #[test]
    fn test_encoding_failure_leaves_no_barcode() {
        let result = Barcode::new("hello", SymbologyKind::Code39, RenderConfig::default());
        assert!(matches!(
            result,
            Err(Error::InvalidCharacter { kind: SymbologyKind::Code39, character: 'h', .. })
        ));
    }

    #[test]
    fn test_renders_are_independent() {
        let barcode = Barcode::new("12345670", SymbologyKind::Ean8, RenderConfig::default()).unwrap();
        let a = barcode.generate_image().unwrap();
        let b = barcode.generate_image().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reencode_keeps_config() {
        let config = RenderConfig::default().with_label(LabelPosition::TopRight);
        let first = Barcode::new("ABC", SymbologyKind::Code128, config.clone()).unwrap();
        let second = first.reencode("123456", SymbologyKind::Code128).unwrap();
        assert_eq!(first.symbol().text(), "ABC");
        assert_eq!(second.symbol().text(), "123456");
        assert_eq!(second.config(), &config);
    }

    #[test]
    fn test_png_export() {
        let barcode = Barcode::new("TEST93", SymbologyKind::Code93, RenderConfig::default()).unwrap();
        let bytes = barcode.to_png_bytes().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 2 * barcode.symbol().module_count() as u32);
    }

    #[test]
    fn test_geometry_error_surfaces_from_every_export() {
        let config = RenderConfig::default().with_size(5, 50);
        let barcode = Barcode::new("HELLO", SymbologyKind::Code39, config).unwrap();
        assert!(matches!(barcode.generate_image(), Err(Error::Geometry { .. })));
        assert!(matches!(barcode.to_png_bytes(), Err(Error::Geometry { .. })));
        assert!(matches!(barcode.to_base64(), Err(Error::Geometry { .. })));
    }
}
