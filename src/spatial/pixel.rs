//! RGB pixel value type

use std::fmt;

/// An immutable RGB color sampled from the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Pixel {
    /// Create a pixel from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Read the pixel at `index` from an RGBA byte buffer
    ///
    /// Alpha is ignored. Returns `None` when the buffer is too short.
    pub fn from_rgba(buffer: &[u8], index: usize) -> Option<Self> {
        let offset = index.checked_mul(4)?;
        let channels = buffer.get(offset..offset + 3)?;
        match *channels {
            [r, g, b] => Some(Self { r, g, b }),
            _ => None,
        }
    }

    /// Component-wise arithmetic mean, rounded to the nearest value
    ///
    /// Returns `None` for an empty iterator.
    pub fn mean<I>(pixels: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let (r, g, b, count) = pixels.into_iter().fold((0u64, 0u64, 0u64, 0u64), |acc, p| {
            (
                acc.0 + u64::from(p.r),
                acc.1 + u64::from(p.g),
                acc.2 + u64::from(p.b),
                acc.3 + 1,
            )
        });

        if count == 0 {
            return None;
        }

        let channel = |sum: u64| ((sum + count / 2) / count) as u8;
        Some(Self::new(channel(r), channel(g), channel(b)))
    }

    /// RGBA bytes with full opacity
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
