//! # linebar
//!
//! A Rust library for generating linear barcodes and rendering them as raster images.
//!
//! `linebar` encodes text into the bar/space modules of six standard symbologies and paints the
//! result into an RGBA image buffer with optional text labels. Rendering is a pure function of the
//! encoded symbol and a [`RenderConfig`], so barcodes can be rendered concurrently without locking.
//!
//! ## Features
//!
//! - Code 11, Code 39, Code 93 (full ASCII), Code 128 (automatic A/B/C code set selection),
//!   EAN-8 and EAN-13.
//! - Check characters computed (or, for EAN, verified) automatically.
//! - Autosizing or fixed-size images with left, center or right alignment.
//! - Text labels above or below the bars with a built-in bitmap font or a TrueType face.
//! - Export to PNG/JPEG/BMP bytes, Base64 text, files, or SVG.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! linebar = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Generate a Code 128 barcode with a label and export it as PNG:
//!
//! ```rust
//! use linebar::{Barcode, LabelPosition, RenderConfig, SymbologyKind};
//!
//! let config = RenderConfig::default().with_label(LabelPosition::BottomCenter);
//! let barcode = Barcode::new("ABC-1234567", SymbologyKind::Code128, config).unwrap();
//! let png = barcode.to_png_bytes().unwrap();
//! assert!(!png.is_empty());
//! ```
//!
//! Encode without rendering:
//!
//! ```rust
//! use linebar::{Symbol, SymbologyKind};
//!
//! let symbol = Symbol::encode("123456789012", SymbologyKind::Ean13).unwrap();
//! assert_eq!(symbol.module_count(), 95);
//! ```
//!
//! ## Modules
//!
//! - [`symbology`]: Symbol encoding for each supported symbology.
//! - [`graphics`]: Render configuration, layout and rasterization.
//! - [`barcode`]: The [`Barcode`] facade tying encoding and rendering together.
//! - [`helper`]: Utilities for exporting rendered barcodes in various formats.

#![forbid(unsafe_code)]

pub mod barcode;
pub mod error;
pub mod graphics;
pub mod helper;
pub mod symbology;

pub use barcode::Barcode;
pub use error::{Error, Result};
pub use graphics::{Alignment, Color, LabelFont, LabelPosition, RenderConfig};
pub use symbology::{EncodeOptions, Extent, Module, Symbol, SymbologyKind};
