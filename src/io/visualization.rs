//! Frame capture and GIF generation for solver visualization

use crate::io::configuration::{VIEWER_MIN_FRAME_DELAY_MS, VISUALIZATION_SCALE};
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::grid_to_image;
use crate::spatial::pixel::Pixel;
use image::{Delay, Frame};
use ndarray::Array2;
use std::path::Path;

/// A rendered grid captured after a solver step
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Solver step count when the frame was taken
    pub step: usize,
    /// Representative cell colors, indexed `[y, x]`
    pub pixels: Array2<Pixel>,
}

/// Captures rendered grid states for animation
///
/// Frames are recorded by the driver (typically after each collapse) and
/// turned into an animated GIF once solving stops.
pub struct VisualizationCapture {
    frames: Vec<CapturedFrame>,
    dimensions: (usize, usize),
}

impl VisualizationCapture {
    /// Create an empty capture for a `width x height` grid
    pub fn new(width: usize, height: usize, expected_frames: usize) -> Self {
        Self {
            frames: Vec::with_capacity(expected_frames),
            dimensions: (height, width),
        }
    }

    /// Record a rendered grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the frame does not match the capture size
    pub fn record_frame(&mut self, step: usize, pixels: Array2<Pixel>) -> Result<()> {
        if pixels.dim() != self.dimensions {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "frame",
                value: format!("{}x{}", pixels.ncols(), pixels.nrows()),
                reason: format!(
                    "capture expects {}x{} frames",
                    self.dimensions.1, self.dimensions.0
                ),
            });
        }

        self.frames.push(CapturedFrame { step, pixels });
        Ok(())
    }

    /// Recorded frames in capture order
    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    /// Returns the total number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// If `frame_delay_ms` is below what viewers support, frames are skipped so
    /// the animation keeps its apparent speed. The last frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "visualization",
                value: "0 frames".to_string(),
                reason: "No frames captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let delay = Delay::from_numer_denom_ms(delay_ms, 1);
        let last_index = self.frames.len().saturating_sub(1);

        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .enumerate()
            .filter(|(index, _)| index % skip_factor == 0 || *index == last_index)
            .map(|(_, captured)| {
                Frame::from_parts(
                    grid_to_image(&captured.pixels, VISUALIZATION_SCALE),
                    0,
                    0,
                    delay,
                )
            })
            .collect();

        // Final frame displays longer for better visibility
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        frames
    }
}
