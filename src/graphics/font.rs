//! Label fonts.
//!
//! A [`LabelFont`] is either the built-in 5x8 bitmap face (printable ASCII, scaled by whole
//! pixels) or a TrueType face parsed with `rusttype` from caller-supplied bytes. Loading font
//! files from disk is left to the caller.

use crate::error::{Error, Result};
use core::fmt;
use rusttype::{point, Font, Scale};
use std::sync::Arc;

/// Screen resolution used to turn point sizes into pixels.
const DPI: f32 = 96.0;

/// Largest supported label line, in pixels.
pub const MAX_PIXEL_SIZE: f32 = 4096.0;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 8;

/// Column-major 5x8 glyphs for ASCII 0x20..=0x7E. Bit 0 is the top row.
const GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], [0x00, 0x00, 0x5F, 0x00, 0x00], // space !
    [0x00, 0x07, 0x00, 0x07, 0x00], [0x14, 0x7F, 0x14, 0x7F, 0x14], // " #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], [0x23, 0x13, 0x08, 0x64, 0x62], // $ %
    [0x36, 0x49, 0x56, 0x20, 0x50], [0x00, 0x08, 0x07, 0x03, 0x00], // & '
    [0x00, 0x1C, 0x22, 0x41, 0x00], [0x00, 0x41, 0x22, 0x1C, 0x00], // ( )
    [0x2A, 0x1C, 0x7F, 0x1C, 0x2A], [0x08, 0x08, 0x3E, 0x08, 0x08], // * +
    [0x00, 0x80, 0x70, 0x30, 0x00], [0x08, 0x08, 0x08, 0x08, 0x08], // , -
    [0x00, 0x00, 0x60, 0x60, 0x00], [0x20, 0x10, 0x08, 0x04, 0x02], // . /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], [0x00, 0x42, 0x7F, 0x40, 0x00], // 0 1
    [0x72, 0x49, 0x49, 0x49, 0x46], [0x21, 0x41, 0x49, 0x4D, 0x33], // 2 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], [0x27, 0x45, 0x45, 0x45, 0x39], // 4 5
    [0x3C, 0x4A, 0x49, 0x49, 0x31], [0x41, 0x21, 0x11, 0x09, 0x07], // 6 7
    [0x36, 0x49, 0x49, 0x49, 0x36], [0x46, 0x49, 0x49, 0x29, 0x1E], // 8 9
    [0x00, 0x00, 0x14, 0x00, 0x00], [0x00, 0x40, 0x34, 0x00, 0x00], // : ;
    [0x00, 0x08, 0x14, 0x22, 0x41], [0x14, 0x14, 0x14, 0x14, 0x14], // < =
    [0x00, 0x41, 0x22, 0x14, 0x08], [0x02, 0x01, 0x59, 0x09, 0x06], // > ?
    [0x3E, 0x41, 0x5D, 0x59, 0x4E], [0x7C, 0x12, 0x11, 0x12, 0x7C], // @ A
    [0x7F, 0x49, 0x49, 0x49, 0x36], [0x3E, 0x41, 0x41, 0x41, 0x22], // B C
    [0x7F, 0x41, 0x41, 0x41, 0x3E], [0x7F, 0x49, 0x49, 0x49, 0x41], // D E
    [0x7F, 0x09, 0x09, 0x09, 0x01], [0x3E, 0x41, 0x41, 0x51, 0x73], // F G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], [0x00, 0x41, 0x7F, 0x41, 0x00], // H I
    [0x20, 0x40, 0x41, 0x3F, 0x01], [0x7F, 0x08, 0x14, 0x22, 0x41], // J K
    [0x7F, 0x40, 0x40, 0x40, 0x40], [0x7F, 0x02, 0x1C, 0x02, 0x7F], // L M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], [0x3E, 0x41, 0x41, 0x41, 0x3E], // N O
    [0x7F, 0x09, 0x09, 0x09, 0x06], [0x3E, 0x41, 0x51, 0x21, 0x5E], // P Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], [0x26, 0x49, 0x49, 0x49, 0x32], // R S
    [0x03, 0x01, 0x7F, 0x01, 0x03], [0x3F, 0x40, 0x40, 0x40, 0x3F], // T U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], [0x3F, 0x40, 0x38, 0x40, 0x3F], // V W
    [0x63, 0x14, 0x08, 0x14, 0x63], [0x03, 0x04, 0x78, 0x04, 0x03], // X Y
    [0x61, 0x59, 0x49, 0x4D, 0x43], [0x00, 0x7F, 0x41, 0x41, 0x41], // Z [
    [0x02, 0x04, 0x08, 0x10, 0x20], [0x00, 0x41, 0x41, 0x41, 0x7F], // \ ]
    [0x04, 0x02, 0x01, 0x02, 0x04], [0x40, 0x40, 0x40, 0x40, 0x40], // ^ _
    [0x00, 0x03, 0x07, 0x08, 0x00], [0x20, 0x54, 0x54, 0x78, 0x40], // ` a
    [0x7F, 0x28, 0x44, 0x44, 0x38], [0x38, 0x44, 0x44, 0x44, 0x28], // b c
    [0x38, 0x44, 0x44, 0x28, 0x7F], [0x38, 0x54, 0x54, 0x54, 0x18], // d e
    [0x00, 0x08, 0x7E, 0x09, 0x02], [0x18, 0xA4, 0xA4, 0x9C, 0x78], // f g
    [0x7F, 0x08, 0x04, 0x04, 0x78], [0x00, 0x44, 0x7D, 0x40, 0x00], // h i
    [0x20, 0x40, 0x40, 0x3D, 0x00], [0x7F, 0x10, 0x28, 0x44, 0x00], // j k
    [0x00, 0x41, 0x7F, 0x40, 0x00], [0x7C, 0x04, 0x78, 0x04, 0x78], // l m
    [0x7C, 0x08, 0x04, 0x04, 0x78], [0x38, 0x44, 0x44, 0x44, 0x38], // n o
    [0xFC, 0x18, 0x24, 0x24, 0x18], [0x18, 0x24, 0x24, 0x18, 0xFC], // p q
    [0x7C, 0x08, 0x04, 0x04, 0x08], [0x48, 0x54, 0x54, 0x54, 0x24], // r s
    [0x04, 0x04, 0x3F, 0x44, 0x24], [0x3C, 0x40, 0x40, 0x20, 0x7C], // t u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], [0x3C, 0x40, 0x30, 0x40, 0x3C], // v w
    [0x44, 0x28, 0x10, 0x28, 0x44], [0x4C, 0x90, 0x90, 0x90, 0x7C], // x y
    [0x44, 0x64, 0x54, 0x4C, 0x44], [0x00, 0x08, 0x36, 0x41, 0x00], // z {
    [0x00, 0x00, 0x77, 0x00, 0x00], [0x00, 0x41, 0x36, 0x08, 0x00], // | }
    [0x02, 0x01, 0x02, 0x04, 0x02], // ~
];

fn glyph(c: char) -> &'static [u8; 5] {
    let index = match c {
        ' '..='~' => c as usize - 0x20,
        _ => '?' as usize - 0x20,
    };
    &GLYPHS[index]
}

#[derive(Clone)]
enum Face {
    Builtin,
    TrueType(Arc<Font<'static>>),
}

/// A font descriptor for the text label.
///
/// The default is the built-in face at size 10, bold.
#[derive(Clone)]
pub struct LabelFont {
    face: Face,
    size: f32,
    bold: bool,
}

impl Default for LabelFont {
    fn default() -> Self {
        LabelFont::builtin(10.0, true)
    }
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = match self.face {
            Face::Builtin => "builtin",
            Face::TrueType(_) => "truetype",
        };
        f.debug_struct("LabelFont")
            .field("face", &face)
            .field("size", &self.size)
            .field("bold", &self.bold)
            .finish()
    }
}

impl PartialEq for LabelFont {
    fn eq(&self, other: &Self) -> bool {
        let same_face = match (&self.face, &other.face) {
            (Face::Builtin, Face::Builtin) => true,
            (Face::TrueType(a), Face::TrueType(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_face && self.size == other.size && self.bold == other.bold
    }
}

impl LabelFont {
    /// The built-in bitmap face at `size` points.
    pub fn builtin(size: f32, bold: bool) -> Self {
        LabelFont {
            face: Face::Builtin,
            size,
            bold,
        }
    }

    /// Parses a TrueType or OpenType face from `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LabelRender`] if the data is not a usable font.
    pub fn from_truetype(data: Vec<u8>, size: f32, bold: bool) -> Result<Self> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| Error::label("unable to parse font data"))?;
        Ok(LabelFont {
            face: Face::TrueType(Arc::new(font)),
            size,
            bold,
        })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    fn pixel_size(&self) -> Result<f32> {
        let px = self.size * DPI / 72.0;
        if !px.is_finite() || px <= 0.0 || px > MAX_PIXEL_SIZE {
            return Err(Error::label(format!("unusable font size {}", self.size)));
        }
        Ok(px)
    }

    fn builtin_scale(&self) -> Result<u32> {
        // Bounded by MAX_PIXEL_SIZE / GLYPH_HEIGHT.
        Ok(((self.pixel_size()? / GLYPH_HEIGHT as f32).round() as u32).max(1))
    }

    /// Height of one line of label text in pixels.
    pub fn line_height(&self) -> Result<u32> {
        match &self.face {
            Face::Builtin => GLYPH_HEIGHT
                .checked_mul(self.builtin_scale()?)
                .ok_or_else(|| Error::label("label line height overflows")),
            Face::TrueType(font) => {
                let v = font.v_metrics(Scale::uniform(self.pixel_size()?));
                Ok((v.ascent - v.descent + v.line_gap).ceil().max(1.0) as u32)
            }
        }
    }

    /// Width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> Result<u32> {
        let extra = u32::from(self.bold);
        match &self.face {
            Face::Builtin => {
                let scale = self.builtin_scale()?;
                let advance = (GLYPH_WIDTH + 1) * scale;
                u32::try_from(text.chars().count())
                    .ok()
                    .and_then(|n| n.checked_mul(advance))
                    .and_then(|w| w.checked_add(extra))
                    .map(|w| w.saturating_sub(scale))
                    .ok_or_else(|| Error::label("label text too wide"))
            }
            Face::TrueType(font) => {
                let scale = Scale::uniform(self.pixel_size()?);
                let width = font
                    .layout(text, scale, point(0.0, 0.0))
                    .last()
                    .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                    .unwrap_or(0.0);
                Ok(width.ceil().max(0.0) as u32 + extra)
            }
        }
    }

    /// Rasterizes `text` with its top-left corner at (`x`, `y`).
    ///
    /// `plot` receives pixel coordinates, which may lie outside the target, and a coverage value
    /// in `0.0..=1.0`.
    pub fn draw(&self, text: &str, x: i64, y: i64, mut plot: impl FnMut(i64, i64, f32)) -> Result<()> {
        let passes: i64 = if self.bold { 2 } else { 1 };
        match &self.face {
            Face::Builtin => {
                let scale = i64::from(self.builtin_scale()?);
                let advance = i64::from(GLYPH_WIDTH + 1) * scale;
                for (n, c) in text.chars().enumerate() {
                    let left = x + n as i64 * advance;
                    for (col, bits) in glyph(c).iter().enumerate() {
                        for row in 0..GLYPH_HEIGHT as i64 {
                            if (bits >> row) & 1 == 0 {
                                continue;
                            }
                            for dx in 0..scale + passes - 1 {
                                for dy in 0..scale {
                                    plot(left + col as i64 * scale + dx, y + row * scale + dy, 1.0);
                                }
                            }
                        }
                    }
                }
            }
            Face::TrueType(font) => {
                let scale = Scale::uniform(self.pixel_size()?);
                let ascent = font.v_metrics(scale).ascent;
                for pass in 0..passes {
                    let origin = point(x as f32 + pass as f32, y as f32 + ascent);
                    for g in font.layout(text, scale, origin) {
                        if let Some(bb) = g.pixel_bounding_box() {
                            g.draw(|gx, gy, v| {
                                plot(i64::from(bb.min.x) + i64::from(gx), i64::from(bb.min.y) + i64::from(gy), v)
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
