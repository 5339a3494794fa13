//! Source image processing and tile extraction

/// Sliding-window tile extraction with symmetry expansion
pub mod extraction;
/// Image loading into raw pixel buffers
pub mod patterns;
