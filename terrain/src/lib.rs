//! # Terrain
//!
//! `terrain` builds elevation profiles along a path from raster
//! elevation tiles.
//!
//! The path is resampled at the ground resolution of the requested
//! zoom level, every sample is assigned the slippy-map tile covering
//! it, each distinct tile is fetched once through a caller supplied
//! [`TileFetcher`], and the pixel under every sample is decoded into
//! an elevation.

mod aggregator;
mod constants;
mod cover;
mod error;
pub mod math;
mod profile;
mod simplify;
mod tile_source;
mod tiles;

pub use crate::{
    aggregator::{build_output, smooth_elevation, to_feet},
    constants::{DEFAULT_TILE_SIZE, DEFAULT_ZOOM, MAX_ZOOM, MEAN_EARTH_RADIUS, M_TO_FT},
    cover::{tile_cover, Sample, TileCover},
    error::TerrainError,
    profile::{
        elevation_at, profile_line_string, ElevationPoint, ElevationProfile, Metric,
        ProfileBuilder, ProfileOptions,
    },
    simplify::{simplify, simplify_line_string},
    tile_source::{FetchError, TileFetcher},
    tiles::{get_tiles, Tile, TileCache},
};
pub use {geo, rgbdem};
