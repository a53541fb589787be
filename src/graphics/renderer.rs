//! Paints a symbol into an RGBA pixel buffer.

use super::layout::Geometry;
use super::{Alignment, Color, RenderConfig};
use crate::error::Result;
use crate::symbology::Symbol;
use image::{Rgba, RgbaImage};

/// Renders `symbol` into a new image laid out by `geometry`.
///
/// The whole image is filled with the background, every bar module is painted as a
/// `module_width_px` wide column, and the label band (if any) is cleared and the symbol text
/// drawn into it.
pub fn render(symbol: &Symbol, geometry: &Geometry, config: &RenderConfig) -> Result<RgbaImage> {
    let background: Rgba<u8> = config.background.into();
    let foreground: Rgba<u8> = config.foreground.into();
    let mut img = RgbaImage::from_pixel(geometry.pixel_width, geometry.pixel_height, background);

    for (i, module) in symbol.modules().iter().enumerate() {
        if !module.bar {
            continue;
        }
        let left = i as u32 * geometry.module_width_px + geometry.alignment_offset_px;
        let right = (left + geometry.module_width_px).min(geometry.pixel_width);
        let (top, bottom) = geometry.bar_rows(module.is_extended());
        for y in top..bottom {
            for x in left..right {
                img.put_pixel(x, y, foreground);
            }
        }
    }

    if config.show_label {
        draw_label(&mut img, symbol.text(), geometry, config)
            .map_err(|e| e.for_kind(symbol.kind()))?;
    }
    Ok(img)
}

fn draw_label(
    img: &mut RgbaImage,
    text: &str,
    geometry: &Geometry,
    config: &RenderConfig,
) -> Result<()> {
    let band_top = geometry.label_top_px();
    let band_bottom = band_top + geometry.label_band_height_px;
    let background: Rgba<u8> = config.background.into();
    for y in band_top..band_bottom {
        for x in 0..geometry.pixel_width {
            img.put_pixel(x, y, background);
        }
    }

    let font = &config.label_font;
    let text_width = i64::from(font.text_width(text)?);
    let width = i64::from(geometry.pixel_width);
    let x = match config.label_position.alignment() {
        Alignment::Left => 0,
        Alignment::Center => (width - text_width) / 2,
        Alignment::Right => width - text_width,
    };

    let (band_top, band_bottom) = (i64::from(band_top), i64::from(band_bottom));
    font.draw(text, x, band_top, |px, py, coverage| {
        if px < 0 || px >= width || py < band_top || py >= band_bottom || coverage <= 0.0 {
            return;
        }
        let pixel = img.get_pixel_mut(px as u32, py as u32);
        *pixel = blend(*pixel, config.foreground, coverage);
    })?;
    tracing::trace!(text, x, band_top, "label drawn");
    Ok(())
}

/// Mixes `color` over `under` by `coverage`.
fn blend(under: Rgba<u8>, color: Color, coverage: f32) -> Rgba<u8> {
    let t = coverage.clamp(0.0, 1.0);
    let over: Rgba<u8> = color.into();
    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        let mixed = f32::from(under.0[i]) * (1.0 - t) + f32::from(over.0[i]) * t;
        *channel = mixed.round() as u8;
    }
    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::layout::compute;
    use crate::graphics::LabelPosition;
    use crate::symbology::SymbologyKind;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn render_with(symbol: &Symbol, config: &RenderConfig) -> RgbaImage {
        let geometry = compute(symbol, config).unwrap();
        render(symbol, &geometry, config).unwrap()
    }

    #[test]
    fn test_bars_follow_modules() {
        let symbol = Symbol::encode("AB", SymbologyKind::Code128).unwrap();
        let img = render_with(&symbol, &RenderConfig::default());
        assert_eq!(img.dimensions(), (symbol.module_count() as u32 * 2, symbol.module_count() as u32));
        for (i, module) in symbol.modules().iter().enumerate() {
            let expected = if module.bar { BLACK } else { WHITE };
            let x = i as u32 * 2;
            assert_eq!(*img.get_pixel(x, 0), expected, "module {}", i);
            assert_eq!(*img.get_pixel(x + 1, img.height() - 1), expected, "module {}", i);
        }
    }

    #[test]
    fn test_right_alignment_leaves_left_slack() {
        let symbol = Symbol::encode("AB", SymbologyKind::Code128).unwrap();
        let n = symbol.module_count() as u32;
        let config = RenderConfig::default()
            .with_size(n + 9, 20)
            .with_alignment(Alignment::Right);
        let img = render_with(&symbol, &config);
        for x in 0..9 {
            assert_eq!(*img.get_pixel(x, 10), WHITE);
        }
        // Code 128 always starts with a bar.
        assert_eq!(*img.get_pixel(9, 10), BLACK);
    }

    #[test]
    fn test_guards_are_taller() {
        let symbol = Symbol::encode("1234567", SymbologyKind::Ean8).unwrap();
        let img = render_with(&symbol, &RenderConfig::default());
        let bottom = img.height() - 1;
        // First module is a guard bar, module 3 onwards is data.
        assert_eq!(*img.get_pixel(0, bottom), BLACK);
        let data_bar = symbol.modules()[3..31].iter().position(|m| m.bar).unwrap() + 3;
        assert_eq!(*img.get_pixel(data_bar as u32 * 2, bottom), WHITE);
        assert_eq!(*img.get_pixel(data_bar as u32 * 2, 0), BLACK);
    }

    #[test]
    fn test_label_band_is_painted() {
        let symbol = Symbol::encode("12345", SymbologyKind::Code39).unwrap();
        let config = RenderConfig::default().with_label(LabelPosition::BottomCenter);
        let geometry = compute(&symbol, &config).unwrap();
        let img = render(&symbol, &geometry, &config).unwrap();
        let band = geometry.label_top_px()..geometry.pixel_height;
        let mut ink = 0;
        for y in band.clone() {
            for x in 0..geometry.pixel_width {
                if *img.get_pixel(x, y) == BLACK {
                    ink += 1;
                }
            }
        }
        assert!(ink > 0);
        // Ink is centered: the first and last columns of the band stay clear.
        for y in band {
            assert_eq!(*img.get_pixel(0, y), WHITE);
            assert_eq!(*img.get_pixel(geometry.pixel_width - 1, y), WHITE);
        }
    }

    #[test]
    fn test_custom_colors() {
        let symbol = Symbol::encode("A", SymbologyKind::Code39).unwrap();
        let config = RenderConfig::default().with_colors(Color::rgb(200, 0, 0), Color::rgb(0, 0, 80));
        let img = render_with(&symbol, &config);
        assert_eq!(*img.get_pixel(0, 0), Rgba([200, 0, 0, 255]));
        assert_eq!(*img.get_pixel(2, 0), Rgba([0, 0, 80, 255]));
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend(WHITE, Color::BLACK, 1.0), BLACK);
        assert_eq!(blend(WHITE, Color::BLACK, 0.0), WHITE);
        assert_eq!(blend(WHITE, Color::BLACK, 0.5), Rgba([128, 128, 128, 255]));
    }
}
