//! Geodesy and slippy-map tile math.

mod angle;
mod haversine;
mod linspace;
mod mercator;
mod tile_id;

pub use self::{
    angle::{deg_to_rad, rad_to_deg},
    haversine::point_distance,
    mercator::{mercator_pixel, mercator_tile, zoom_level_resolution},
    tile_id::{tile_id_to_xyz, xyz_to_tile_id},
};
pub(crate) use linspace::linspace;

use crate::constants::M_TO_FT;

/// Converts meters to feet.
pub fn m_to_ft(meters: f64) -> f64 {
    meters * M_TO_FT
}
