//! Disk I/O for gray images and JSON reports.
//!
//! Images are read through the `image` crate in any enabled format
//! (PNG, JPEG, PNM) and always written back as 8-bit PNG.
use super::{GrayImageU8, ImageF64};
use image::ExtendedColorType;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let luma = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let (w, h) = luma.dimensions();
    Ok(GrayImageU8::new(w as usize, h as usize, luma.into_raw()))
}

/// Load an image as `f64` gray levels in `[0, 255]`.
pub fn load_grayscale_f64(path: &Path) -> Result<ImageF64, String> {
    let gray = load_grayscale_image(path)?;
    if gray.width() == 0 || gray.height() == 0 {
        return Err(format!("{} has no pixels", path.display()));
    }
    Ok(ImageF64::from_u8(gray.as_view()))
}

/// Save a float image to a grayscale PNG, rounding and clamping to [0, 255].
pub fn save_grayscale_f64(image: &ImageF64, path: &Path) -> Result<(), String> {
    save_grayscale_u8(&image.to_gray_u8(), path)
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<(), String> {
    let (w, h) = (buffer.width(), buffer.height());
    if buffer.data().len() != w * h {
        return Err(format!(
            "{}: buffer holds {} bytes, expected {w}x{h}",
            path.display(),
            buffer.data().len()
        ));
    }
    create_parent(path)?;
    image::save_buffer(path, buffer.data(), w as u32, h as u32, ExtendedColorType::L8)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    create_parent(path)?;
    let file = File::create(path).map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn create_parent(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create {}: {e}", dir.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_round_trip_keeps_levels() {
        let dir = std::env::temp_dir().join(format!("spectral-image-io-{}", std::process::id()));
        let path = dir.join("nested").join("ramp.png");
        let ramp = ImageF64::from_fn(5, 3, |x, y| (x * 50 + y) as f64);
        save_grayscale_f64(&ramp, &path).unwrap();
        let back = load_grayscale_f64(&path).unwrap();
        assert_eq!((back.w, back.h), (5, 3));
        assert_eq!(back.get(4, 2), 202.0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_grayscale_image(Path::new("/nonexistent/input.png")).unwrap_err();
        assert!(err.contains("Failed to open"));
    }
}
