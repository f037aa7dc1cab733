//! Path resampling and tile coverage.

use crate::{
    math::{linspace, point_distance, zoom_level_resolution},
    tiles::Tile,
};
use geo::geometry::Coord;
use std::collections::HashSet;

/// A point along a resampled path and the tile containing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub coord: Coord,
    pub tile: Tile,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileCover {
    /// Samples in path order.
    pub samples: Vec<Sample>,

    /// Distinct tiles covering `samples`, in order of first use.
    pub tiles: Vec<Tile>,
}

/// Resamples `path` at the ground resolution of `zoom` and returns
/// the samples along with the tiles covering them.
///
/// Ground resolution is computed once, at the latitude of the first
/// coordinate. Paths spanning a wide latitude range are therefore
/// over-sampled toward the equator and under-sampled toward the
/// poles.
///
/// Within a segment, samples are interpolated linearly in
/// longitude/latitude.
pub fn tile_cover(path: &[Coord], zoom: u8, tile_size: u32) -> TileCover {
    let Some(&first) = path.first() else {
        return TileCover::default();
    };
    let resolution = zoom_level_resolution(first.y, zoom, tile_size);

    let mut coords = vec![first];
    for segment in path.windows(2) {
        let (a, b) = (segment[0], segment[1]);
        let distance = point_distance(a, b);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (distance / resolution).ceil() as usize;
        if steps == 0 {
            continue;
        }
        let lons = linspace(a.x, b.x, steps + 1);
        let lats = linspace(a.y, b.y, steps + 1);
        coords.extend(lons.zip(lats).skip(1).map(|(x, y)| Coord { x, y }));
    }

    let mut seen = HashSet::new();
    let mut tiles = Vec::new();
    let samples = coords
        .into_iter()
        .map(|coord| {
            let tile = Tile::containing(coord, zoom);
            if seen.insert(tile.id) {
                tiles.push(tile);
            }
            Sample { coord, tile }
        })
        .collect();

    TileCover { samples, tiles }
}
