//! Elevation encodings.

/// Converts a pixel's channel values into an elevation in meters.
pub trait ElevationParser {
    fn parse(&self, r: u8, g: u8, b: u8, a: u8) -> f64;
}

impl<F> ElevationParser for F
where
    F: Fn(u8, u8, u8, u8) -> f64,
{
    fn parse(&self, r: u8, g: u8, b: u8, a: u8) -> f64 {
        self(r, g, b, a)
    }
}

/// Mapbox/MapTiler Terrain-RGB encoding.
///
/// `elevation = -10000 + (r * 65536 + g * 256 + b) * 0.1`
///
/// Alpha is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerrainRgb;

impl TerrainRgb {
    const BASE: f64 = -10_000.0;
    const INTERVAL: f64 = 0.1;

    /// Encodes `meters` as the closest representable Terrain-RGB
    /// triple.
    ///
    /// Values outside of the encodable range saturate.
    pub fn encode(meters: f64) -> [u8; 3] {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let raw = ((meters - Self::BASE) / Self::INTERVAL)
            .round()
            .clamp(0.0, f64::from(0x00FF_FFFF_u32)) as u32;
        #[allow(clippy::cast_possible_truncation)]
        [(raw >> 16) as u8, (raw >> 8) as u8, raw as u8]
    }
}

impl ElevationParser for TerrainRgb {
    fn parse(&self, r: u8, g: u8, b: u8, _a: u8) -> f64 {
        let raw = f64::from(r) * 65_536.0 + f64::from(g) * 256.0 + f64::from(b);
        Self::BASE + raw * Self::INTERVAL
    }
}

/// Terrarium encoding as served by the AWS open terrain tiles.
///
/// `elevation = (r * 256 + g + b / 256) - 32768`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Terrarium;

impl ElevationParser for Terrarium {
    fn parse(&self, r: u8, g: u8, b: u8, _a: u8) -> f64 {
        f64::from(r) * 256.0 + f64::from(g) + f64::from(b) / 256.0 - 32_768.0
    }
}
