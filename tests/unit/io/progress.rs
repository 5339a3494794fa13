//! Tests for extraction and solve progress reporting

#[cfg(test)]
mod tests {
    use crate::distinct_pixels;
    use wfc_tiles::analysis::extraction::ExtractionObserver;
    use wfc_tiles::io::progress::ProgressManager;
    use wfc_tiles::{ExtractionSettings, TileExtractor};

    // Tests ProgressManager lifecycle without a started bar
    // Verified by unwrapping the solve bar in update_solving
    #[test]
    fn test_progress_manager_new() {
        let pm = ProgressManager::default();
        pm.update_solving(1, 2);
        pm.finish_solving("done".to_string());
        pm.finish();
    }

    // Tests extraction callbacks drive both bars
    // Verified by creating the adjacency bar on every callback
    #[test]
    fn test_extraction_observer() {
        let mut pm = ProgressManager::new();
        pm.extraction_started(2);
        pm.row_processed(0, 3);
        pm.row_processed(1, 5);
        for index in 0..5 {
            pm.tile_processed(index, 5);
        }
        pm.finish();
    }

    // Tests the manager works as a real extraction observer
    // Verified by having extraction skip observer callbacks
    #[test]
    fn test_observed_extraction() {
        let mut pm = ProgressManager::new();
        let settings = ExtractionSettings {
            tile_size: 2,
            loop_edges: true,
            include_flipped: true,
            include_rotated: false,
        };
        let tiles =
            TileExtractor::extract_tiles_observed(&distinct_pixels(3, 3), 3, 3, settings, &mut pm)
                .unwrap();
        assert!(!tiles.is_empty());

        pm.start_solving(9);
        pm.update_solving(4, 100);
        pm.finish_solving("solved".to_string());
        pm.finish();
    }
}
