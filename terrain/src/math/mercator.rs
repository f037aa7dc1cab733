use super::angle::deg_to_rad;
use crate::constants::{EARTH_CIRCUMFERENCE, MAX_MERCATOR_LAT};
use geo::geometry::Coord;
use std::f64::consts::PI;

/// Returns the ground distance in meters covered by one pixel at
/// `latitude` and `zoom` for tiles `tile_size` pixels wide.
pub fn zoom_level_resolution(latitude: f64, zoom: u8, tile_size: u32) -> f64 {
    deg_to_rad(latitude).cos() * EARTH_CIRCUMFERENCE / world_size(zoom, tile_size)
}

/// Returns the global Web Mercator pixel position of `coord`.
///
/// `(0, 0)` is the northwest corner of the world and
/// `(tile_size * 2^zoom, tile_size * 2^zoom)` the southeast corner.
/// Latitude is clamped to the Mercator limits.
pub fn mercator_pixel(coord: Coord, zoom: u8, tile_size: u32) -> (f64, f64) {
    let world = world_size(zoom, tile_size);
    let lat = coord.y.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (coord.x + 180.0) / 360.0 * world;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * world;
    (x, y)
}

/// Returns the `(x, y)` slippy-map tile containing `coord` at `zoom`.
pub fn mercator_tile(coord: Coord, zoom: u8) -> (u32, u32) {
    let (x, y) = mercator_pixel(coord, zoom, 1);
    let max = world_size(zoom, 1) - 1.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    (
        x.floor().clamp(0.0, max) as u32,
        y.floor().clamp(0.0, max) as u32,
    )
}

fn world_size(zoom: u8, tile_size: u32) -> f64 {
    f64::from(tile_size) * 2_f64.powi(i32::from(zoom))
}
