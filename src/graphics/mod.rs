//! Raster composition: render configuration, layout and pixel painting.
//!
//! Rendering is a pure function of a [`Symbol`](crate::symbology::Symbol) and a
//! [`RenderConfig`]. [`layout::compute`] turns the two into a [`layout::Geometry`] and
//! [`renderer::render`] paints it into a fresh `RgbaImage`.

use image::Rgba;

pub mod font;
pub mod layout;
pub mod renderer;

pub use font::LabelFont;
pub use layout::Geometry;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Color::rgb(rgb[0], rgb[1], rgb[2])
    }
}

/// Horizontal placement of the bars when the image width is not a multiple of the module count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Where the text label is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

impl LabelPosition {
    pub fn is_top(self) -> bool {
        matches!(
            self,
            LabelPosition::TopLeft | LabelPosition::TopCenter | LabelPosition::TopRight
        )
    }

    /// Horizontal alignment of the label text within its band.
    pub fn alignment(self) -> Alignment {
        match self {
            LabelPosition::TopLeft | LabelPosition::BottomLeft => Alignment::Left,
            LabelPosition::TopCenter | LabelPosition::BottomCenter => Alignment::Center,
            LabelPosition::TopRight | LabelPosition::BottomRight => Alignment::Right,
        }
    }
}

/// Options for one render call.
///
/// The defaults are: autosize on, 300x150 when autosize is off, no label, label at the bottom
/// center, centered bars, black on white, and the built-in bold label font at size 10.
///
/// # Example
///
/// ```rust
/// use linebar::graphics::{Alignment, LabelPosition, RenderConfig};
///
/// let config = RenderConfig::default()
///     .with_size(400, 120)
///     .with_label(LabelPosition::TopLeft)
///     .with_alignment(Alignment::Left);
/// assert!(!config.autosize);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    /// Derive the image size from the module count (2 px per module, 2:1 aspect ratio).
    pub autosize: bool,
    /// Image width in pixels when `autosize` is off.
    pub width: u32,
    /// Image height in pixels when `autosize` is off.
    pub height: u32,
    pub show_label: bool,
    pub label_position: LabelPosition,
    pub alignment: Alignment,
    pub foreground: Color,
    pub background: Color,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub label_font: LabelFont,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            autosize: true,
            width: 300,
            height: 150,
            show_label: false,
            label_position: LabelPosition::BottomCenter,
            alignment: Alignment::Center,
            foreground: Color::BLACK,
            background: Color::WHITE,
            label_font: LabelFont::default(),
        }
    }
}

impl RenderConfig {
    /// Turns autosize off and uses a fixed image size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.autosize = false;
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_autosize(mut self) -> Self {
        self.autosize = true;
        self
    }

    /// Shows the label at `position`.
    pub fn with_label(mut self, position: LabelPosition) -> Self {
        self.show_label = true;
        self.label_position = position;
        self
    }

    pub fn with_label_font(mut self, font: LabelFont) -> Self {
        self.label_font = font;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }
}
