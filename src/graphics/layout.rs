//! Pixel geometry for a symbol.

use super::{Alignment, RenderConfig};
use crate::error::{Error, Result};
use crate::symbology::Symbol;

/// Module width in pixels used when autosizing.
pub const AUTOSIZE_MODULE_PX: u32 = 2;

/// Width to height ratio used when autosizing.
pub const AUTOSIZE_ASPECT_RATIO: u32 = 2;

/// Computed pixel layout for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Width of one module in pixels, at least 1.
    pub module_width_px: u32,
    /// Pixels left of the first module.
    pub alignment_offset_px: u32,
    /// Height of the label band, 0 when no label is shown.
    pub label_band_height_px: u32,
    pub label_band_at_top: bool,
    /// First row of the bar region.
    pub bar_top_px: u32,
    pub bar_height_px: u32,
    /// How much shorter data bars are than guard bars. 0 for symbols without guards.
    pub guard_extension_px: u32,
}

impl Geometry {
    /// Row span `[top, bottom)` of a bar, depending on whether it belongs to a guard.
    pub fn bar_rows(&self, extended: bool) -> (u32, u32) {
        let bottom = self.bar_top_px + self.bar_height_px;
        if extended {
            (self.bar_top_px, bottom)
        } else {
            (self.bar_top_px, bottom - self.guard_extension_px)
        }
    }

    /// First row of the label band.
    pub fn label_top_px(&self) -> u32 {
        if self.label_band_at_top {
            0
        } else {
            self.pixel_height - self.label_band_height_px
        }
    }
}

/// Leftover pixels placed left of the bars for `alignment`.
pub fn alignment_offset(alignment: Alignment, slack: u32) -> u32 {
    match alignment {
        Alignment::Left => 0,
        Alignment::Center => slack / 2,
        Alignment::Right => slack,
    }
}

/// Computes the pixel geometry of `symbol` under `config`.
///
/// # Errors
///
/// - [`Error::Geometry`] if a fixed size leaves less than one pixel per module or no room for
///   the bars.
/// - [`Error::LabelRender`] if the label font is unusable.
pub fn compute(symbol: &Symbol, config: &RenderConfig) -> Result<Geometry> {
    let modules = symbol.module_count();
    let count = u32::try_from(modules).unwrap_or(u32::MAX);

    let (width, height) = if config.autosize {
        let width = count.saturating_mul(AUTOSIZE_MODULE_PX);
        (width, width / AUTOSIZE_ASPECT_RATIO)
    } else {
        (config.width, config.height)
    };
    let kind = symbol.kind();
    let fail = |reason| Error::Geometry {
        kind,
        width,
        height,
        modules,
        reason,
    };

    if width == 0 || height == 0 {
        return Err(fail("image dimensions must be positive"));
    }
    let module_width_px = width / count.max(1);
    if module_width_px < 1 {
        return Err(fail("module width would be less than one pixel"));
    }
    let alignment_offset_px = alignment_offset(config.alignment, width % count.max(1));

    let label_band_height_px = if config.show_label {
        config
            .label_font
            .line_height()
            .map_err(|e| e.for_kind(kind))?
    } else {
        0
    };
    let label_band_at_top = config.show_label && config.label_position.is_top();
    if label_band_height_px >= height {
        return Err(fail("label band leaves no room for bars"));
    }
    let bar_height_px = height - label_band_height_px;
    let bar_top_px = if label_band_at_top { label_band_height_px } else { 0 };

    let guard_extension_px = if symbol.has_guards() && bar_height_px > 1 {
        (bar_height_px / 12).max(1)
    } else {
        0
    };

    Ok(Geometry {
        pixel_width: width,
        pixel_height: height,
        module_width_px,
        alignment_offset_px,
        label_band_height_px,
        label_band_at_top,
        bar_top_px,
        bar_height_px,
        guard_extension_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{LabelFont, LabelPosition};
    use crate::symbology::SymbologyKind;

    fn code39() -> Symbol {
        Symbol::encode("HELLO", SymbologyKind::Code39).unwrap()
    }

    #[test]
    fn test_autosize() {
        let symbol = code39();
        let g = compute(&symbol, &RenderConfig::default()).unwrap();
        let n = symbol.module_count() as u32;
        assert_eq!(g.pixel_width, 2 * n);
        assert_eq!(g.pixel_height, n);
        assert_eq!(g.module_width_px, 2);
        assert_eq!(g.alignment_offset_px, 0);
        assert_eq!(g.bar_height_px, g.pixel_height);
        assert_eq!(g.guard_extension_px, 0);
    }

    #[test]
    fn test_autosize_height_ignores_label() {
        let symbol = code39();
        let plain = compute(&symbol, &RenderConfig::default()).unwrap();
        let labelled = compute(
            &symbol,
            &RenderConfig::default().with_label(LabelPosition::BottomCenter),
        )
        .unwrap();
        assert_eq!(plain.pixel_height, labelled.pixel_height);
        assert_eq!(labelled.bar_height_px, labelled.pixel_height - 16);
        assert_eq!(labelled.bar_top_px, 0);
        assert_eq!(labelled.label_top_px(), labelled.pixel_height - 16);
    }

    #[test]
    fn test_top_label_shifts_bars_down() {
        let symbol = code39();
        let g = compute(&symbol, &RenderConfig::default().with_label(LabelPosition::TopLeft)).unwrap();
        assert!(g.label_band_at_top);
        assert_eq!(g.bar_top_px, g.label_band_height_px);
        assert_eq!(g.label_top_px(), 0);
        assert_eq!(g.bar_top_px + g.bar_height_px, g.pixel_height);
    }

    #[test]
    fn test_alignment_offsets() {
        let symbol = code39();
        let n = symbol.module_count() as u32;
        let width = 3 * n + 7;
        for (alignment, expected) in [
            (Alignment::Left, 0),
            (Alignment::Center, 3),
            (Alignment::Right, 7),
        ] {
            let config = RenderConfig::default()
                .with_size(width, 100)
                .with_alignment(alignment);
            let g = compute(&symbol, &config).unwrap();
            assert_eq!(g.module_width_px, 3);
            assert_eq!(g.alignment_offset_px, expected);
        }
    }

    #[test]
    fn test_too_narrow_is_geometry_error() {
        let symbol = code39();
        let config = RenderConfig::default().with_size(5, 100);
        assert!(matches!(
            compute(&symbol, &config),
            Err(Error::Geometry { kind: SymbologyKind::Code39, width: 5, .. })
        ));
        let config = RenderConfig::default().with_size(500, 0);
        assert!(matches!(compute(&symbol, &config), Err(Error::Geometry { .. })));
    }

    #[test]
    fn test_label_taller_than_image_is_geometry_error() {
        let symbol = code39();
        let config = RenderConfig::default()
            .with_size(1000, 10)
            .with_label(LabelPosition::BottomLeft);
        assert!(matches!(compute(&symbol, &config), Err(Error::Geometry { .. })));
    }

    #[test]
    fn test_unusable_font_is_label_error() {
        let symbol = code39();
        let config = RenderConfig::default()
            .with_label(LabelPosition::BottomLeft)
            .with_label_font(LabelFont::builtin(-1.0, false));
        assert!(matches!(
            compute(&symbol, &config),
            Err(Error::LabelRender { kind: Some(SymbologyKind::Code39), .. })
        ));
    }

    #[test]
    fn test_oversized_font_is_label_error() {
        let symbol = code39();
        let config = RenderConfig::default()
            .with_label(LabelPosition::BottomCenter)
            .with_label_font(LabelFont::builtin(1.0e10, true));
        assert!(matches!(
            compute(&symbol, &config),
            Err(Error::LabelRender { kind: Some(SymbologyKind::Code39), .. })
        ));
    }

    #[test]
    fn test_guard_extension_for_ean() {
        let symbol = Symbol::encode("123456789012", SymbologyKind::Ean13).unwrap();
        let g = compute(&symbol, &RenderConfig::default()).unwrap();
        assert_eq!(g.pixel_height, 95);
        assert_eq!(g.guard_extension_px, 95 / 12);
        assert_eq!(g.bar_rows(true), (0, 95));
        assert_eq!(g.bar_rows(false), (0, 95 - 95 / 12));
    }
}
