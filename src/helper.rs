use crate::error::Result;
use crate::graphics::layout::AUTOSIZE_ASPECT_RATIO;
use crate::symbology::Symbol;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/*---- Utilities ----*/

// Returns a string of SVG code for an image depicting the given symbol,
// one user unit per module, with `quiet_zone` blank modules on each side.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(symbol: &Symbol, quiet_zone: u32) -> String {
	let modules = symbol.module_count() as u32;
	let width = modules + 2 * quiet_zone;
	let height = (modules / AUTOSIZE_ASPECT_RATIO).max(1);
	let guard_extension = if symbol.has_guards() { (height / 12).max(1) } else { 0 };

	let mut result = String::new();
	result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
	result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
	result += &format!(
		"<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {} {}\" stroke=\"none\">\n", width, height);
	result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
	result += "\t<path d=\"";
	let mut first = true;
	for (i, module) in symbol.modules().iter().enumerate() {
		if !module.bar {
			continue;
		}
		if !first {
			result += " ";
		}
		first = false;
		let bar_height = if module.is_extended() { height } else { height - guard_extension };
		result += &format!("M{},0h1v{}h-1z", i as u32 + quiet_zone, bar_height);
	}
	result += "\" fill=\"#000000\"/>\n";
	result += "</svg>\n";
	result
}

/// Encodes an image into the container `format` and returns the bytes.
///
/// JPEG has no alpha channel, so the image is flattened to RGB first.
///
/// # Errors
///
/// Returns [`Error::Image`](crate::Error::Image) if the encoder fails.
pub fn encode_image(img: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>> {
	let mut cursor = Cursor::new(Vec::new());
	match format {
		ImageFormat::Jpeg => DynamicImage::ImageRgba8(img.clone())
			.to_rgb8()
			.write_to(&mut cursor, format)?,
		_ => img.write_to(&mut cursor, format)?,
	}
	Ok(cursor.into_inner())
}

/// Encodes an image into `format` and returns it as standard, padded Base64 text.
pub fn to_base64(img: &RgbaImage, format: ImageFormat) -> Result<String> {
	Ok(STANDARD.encode(encode_image(img, format)?))
}

/// Writes an image to exactly `path` in the given `format`.
///
/// Parent directories are created when missing.
pub fn save_image_to(img: &RgbaImage, path: &Path, format: ImageFormat) -> Result<()> {
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() && !parent.exists() {
			fs::create_dir_all(parent)?;
		}
	}
	fs::write(path, encode_image(img, format)?)?;
	Ok(())
}

/// Saves an image into a directory and returns the written path.
///
/// # Arguments
///
/// * `img` - The rendered barcode.
/// * `directory_path` - Optional. The directory path where the image will be saved. If not provided, the default directory is "generated".
/// * `filename` - Optional. The file name without extension. If not provided, a timestamp-based filename will be used.
/// * `format` - The image container; its primary extension is appended to the file name.
///
/// # Example
///
/// ```rust,no_run
/// use linebar::{helper::save_image, Barcode, RenderConfig, SymbologyKind};
/// use image::ImageFormat;
///
/// let barcode = Barcode::new("HELLO", SymbologyKind::Code39, RenderConfig::default()).unwrap();
/// let img = barcode.generate_image().unwrap();
/// save_image(&img, Some("images"), Some("hello"), ImageFormat::Png).unwrap();
/// ```
pub fn save_image(
	img: &RgbaImage,
	directory_path: Option<&str>,
	filename: Option<&str>,
	format: ImageFormat,
) -> Result<PathBuf> {
	let directory_path = directory_path.unwrap_or("generated");
	let filename = match filename {
		Some(name) => name.to_string(),
		None => {
			let since_the_epoch = SystemTime::now()
				.duration_since(UNIX_EPOCH)
				.unwrap_or_default();
			format!("{}", since_the_epoch.as_millis())
		},
	};
	let extension = format.extensions_str().first().copied().unwrap_or("img");

	let file_path = Path::new(directory_path).join(format!("{}.{}", filename, extension));
	save_image_to(img, &file_path, format)?;
	Ok(file_path)
}
