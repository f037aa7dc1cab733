//! RGB-encoded elevation rasters.
//!
//! Elevation tile services commonly pack heights into the color
//! channels of an ordinary PNG or WebP image. This crate holds the
//! decoded pixel payload of such a tile and turns pixels back into
//! meters.
//!
//! Decoding the image container itself (PNG, WebP, ...) is left to
//! the caller.
//!
//! # References
//!
//! 1. [Terrain-RGB](https://docs.mapbox.com/data/tilesets/reference/mapbox-terrain-rgb-v1/)
//! 1. [Terrarium](https://github.com/tilezen/joerd/blob/master/docs/formats.md#terrarium)

mod error;
mod parser;

pub use crate::{
    error::RgbDemError,
    parser::{ElevationParser, TerrainRgb, Terrarium},
};

/// A decoded raster tile.
#[derive(Clone, PartialEq, Eq)]
pub struct TileImage {
    /// Interleaved channel bytes, row major, starting at the
    /// northwest corner.
    pixels: Box<[u8]>,

    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Bytes per pixel (3 for RGB, 4 for RGBA).
    channels: usize,
}

impl std::fmt::Debug for TileImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

impl TileImage {
    /// Returns a tile image backed by `pixels`.
    pub fn new(
        pixels: impl Into<Box<[u8]>>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, RgbDemError> {
        let pixels = pixels.into();
        if channels != 3 && channels != 4 {
            return Err(RgbDemError::Channels(channels));
        }
        if width == 0 || height == 0 {
            return Err(RgbDemError::Empty);
        }
        if pixels.len() != width * height * channels {
            return Err(RgbDemError::PixelLen {
                len: pixels.len(),
                width,
                height,
                channels,
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            channels,
        })
    }

    /// Returns a `width` x `height` image where every pixel is
    /// `value`.
    ///
    /// The channel count is taken from the length of `value`.
    pub fn filled(width: usize, height: usize, value: &[u8]) -> Result<Self, RgbDemError> {
        let pixels: Vec<u8> = value
            .iter()
            .copied()
            .cycle()
            .take(width * height * value.len())
            .collect();
        Self::new(pixels, width, height, value.len())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the `[r, g, b, a]` value at column `x`, row `y`.
    ///
    /// Three channel images report an opaque alpha.
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            Some(self.get_unchecked(x, y))
        } else {
            None
        }
    }

    /// Returns the `[r, g, b, a]` value at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside of the image.
    pub fn get_unchecked(&self, x: usize, y: usize) -> [u8; 4] {
        let start = self.xy_to_linear_index((x, y));
        let px = &self.pixels[start..start + self.channels];
        let alpha = if self.channels == 4 { px[3] } else { u8::MAX };
        [px[0], px[1], px[2], alpha]
    }

    /// Returns the elevation at column `x`, row `y`, with both
    /// clamped to the image bounds.
    pub fn elevation<P>(&self, x: usize, y: usize, parser: &P) -> f64
    where
        P: ElevationParser + ?Sized,
    {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let [r, g, b, a] = self.get_unchecked(x, y);
        parser.parse(r, g, b, a)
    }
}

/// Private API
impl TileImage {
    fn xy_to_linear_index(&self, (x, y): (usize, usize)) -> usize {
        (y * self.width + x) * self.channels
    }
}
