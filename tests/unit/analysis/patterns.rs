//! Tests for loading source images into RGBA buffers

#[cfg(test)]
mod tests {
    use crate::{WHITE, checkerboard};
    use image::{ImageBuffer, Rgba};
    use wfc_tiles::AlgorithmError;
    use wfc_tiles::analysis::extraction::{ExtractionSettings, SilentObserver};
    use wfc_tiles::analysis::patterns::ImageProcessor;

    // Tests PNG files decode to row-major RGBA
    // Verified by reading the buffer column-major
    #[test]
    fn test_from_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");

        let mut img = ImageBuffer::from_pixel(3, 2, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 0, Rgba(WHITE.to_rgba()));
        img.save(&path).unwrap();

        let processor = ImageProcessor::from_png_file(&path).unwrap();
        assert_eq!((processor.width(), processor.height()), (3, 2));
        assert_eq!(processor.buffer().len(), 24);
        assert_eq!(processor.buffer().get(8..12), Some(&[255, 255, 255, 255][..]));
        assert_eq!(processor.buffer().get(12..16), Some(&[0, 0, 0, 255][..]));
    }

    // Tests missing files report the path
    // Verified by mapping load failures to FileSystem errors
    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        match ImageProcessor::from_png_file(&path) {
            Err(AlgorithmError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => unreachable!("expected ImageLoad, got {:?}", other.err()),
        }
    }

    // Tests raw buffers must match their dimensions
    // Verified by accepting any buffer length
    #[test]
    fn test_from_raw_image() {
        assert!(ImageProcessor::from_raw_image(checkerboard(2, 2), 2, 2).is_ok());
        assert!(matches!(
            ImageProcessor::from_raw_image(vec![0; 15], 2, 2),
            Err(AlgorithmError::InvalidImageData {
                expected: 16,
                actual: 15,
                ..
            })
        ));
    }

    // Tests extraction runs over the wrapped buffer
    // Verified by swapping width and height when extracting
    #[test]
    fn test_extract_tiles() {
        let processor = ImageProcessor::from_raw_image(checkerboard(4, 2), 4, 2).unwrap();
        let settings = ExtractionSettings {
            tile_size: 1,
            loop_edges: false,
            include_flipped: false,
            include_rotated: false,
        };

        let tiles = processor
            .extract_tiles(settings, &mut SilentObserver)
            .unwrap();
        assert_eq!(tiles.len(), 2);
    }
}
