//! PNG export of rendered grids

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::pixel::Pixel;
use image::{ImageBuffer, Rgba};
use ndarray::Array2;
use std::path::Path;

/// Convert a rendered grid (indexed `[y, x]`) into an RGBA image
///
/// Each cell becomes a `scale x scale` block of pixels.
pub fn grid_to_image(rendered: &Array2<Pixel>, scale: u32) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let scale = scale.max(1);
    let (rows, cols) = rendered.dim();
    let mut img = ImageBuffer::new(cols as u32 * scale, rows as u32 * scale);

    for ((row, col), pixel) in rendered.indexed_iter() {
        let color = Rgba(pixel.to_rgba());
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(col as u32 * scale + dx, row as u32 * scale + dy, color);
            }
        }
    }

    img
}

/// Export a rendered grid as a PNG image, one pixel per cell
///
/// # Errors
///
/// Returns an error if:
/// - The grid has no cells
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(rendered: &Array2<Pixel>, output_path: &Path) -> Result<()> {
    if rendered.is_empty() {
        return Err(AlgorithmError::InvalidParameter {
            parameter: "grid",
            value: format!("{}x{}", rendered.ncols(), rendered.nrows()),
            reason: "No cells to export".to_string(),
        });
    }

    let img = grid_to_image(rendered, 1);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
