/// Mean earth radius in meters.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// WGS84 equatorial radius in meters.
pub const EQUATORIAL_RADIUS: f64 = 6_378_137.0;

/// Equatorial circumference, the basis of Web Mercator ground
/// resolution.
pub const EARTH_CIRCUMFERENCE: f64 = 2.0 * std::f64::consts::PI * EQUATORIAL_RADIUS;

/// Highest latitude representable in Web Mercator,
/// `atan(sinh(π))` in degrees.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Meters to international feet.
pub const M_TO_FT: f64 = 3.28084;

/// Highest zoom level with unique tile ids.
pub const MAX_ZOOM: u8 = 30;

pub const DEFAULT_ZOOM: u8 = 13;

pub const DEFAULT_TILE_SIZE: u32 = 512;
