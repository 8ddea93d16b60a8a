//! Bitmap rendering of fields and press grids

use crate::bits::BitMatrix;
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Pixel colour of a set cell
pub const ON_COLOR: Rgba<u8> = Rgba([50, 99, 183, 255]);

/// Pixel colour of a clear cell
pub const OFF_COLOR: Rgba<u8> = Rgba([226, 224, 233, 255]);

/// One pixel per cell, row `r` mapped to image row `y = r`
pub fn render_image(matrix: &BitMatrix) -> RgbaImage {
    RgbaImage::from_fn(matrix.n_cols() as u32, matrix.n_rows() as u32, |x, y| {
        if matrix.get(y as usize, x as usize) {
            ON_COLOR
        } else {
            OFF_COLOR
        }
    })
}

/// `lightsoff_{rows}x{cols}.png`
pub fn image_file_name(n_rows: usize, n_cols: usize) -> String {
    format!("lightsoff_{n_rows}x{n_cols}.png")
}

/// Render `matrix` and save it as a PNG in `output_dir`, returning the path written
pub fn save_image<P: AsRef<Path>>(matrix: &BitMatrix, output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let path = output_dir.join(image_file_name(matrix.n_rows(), matrix.n_cols()));
    render_image(matrix)
        .save(&path)
        .with_context(|| format!("Unable to save image: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "saved image");
    Ok(path)
}
