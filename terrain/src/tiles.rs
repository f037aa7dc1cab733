//! Per-request tile retrieval.

use crate::{
    math::{mercator_tile, xyz_to_tile_id},
    TerrainError, TileFetcher,
};
use futures::future::join_all;
use geo::geometry::Coord;
use log::{debug, warn};
use rgbdem::TileImage;
use std::collections::{hash_map::Entry, HashMap, HashSet};

/// A slippy-map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub z: u8,

    /// Unique across all zoom levels, see
    /// [`xyz_to_tile_id`](crate::math::xyz_to_tile_id).
    pub id: u64,
}

impl Tile {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self {
            x,
            y,
            z,
            id: xyz_to_tile_id(x, y, z),
        }
    }

    /// Returns the tile containing `coord` at `zoom`.
    pub fn containing(coord: Coord, zoom: u8) -> Self {
        let (x, y) = mercator_tile(coord, zoom);
        Self::new(x, y, zoom)
    }
}

/// Tiles fetched for a single profile, keyed by tile id.
#[derive(Debug, Default)]
pub struct TileCache {
    tiles: HashMap<u64, TileImage>,
}

impl TileCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tiles: HashMap::with_capacity(capacity),
        }
    }

    /// Records `image` for `tile`.
    ///
    /// Entries are write-once; returns `false` and leaves the cache
    /// untouched if `tile` is already present.
    pub fn insert(&mut self, tile: &Tile, image: TileImage) -> bool {
        match self.tiles.entry(tile.id) {
            Entry::Vacant(e) => {
                e.insert(image);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns the image for `tile`.
    pub fn get(&self, tile: &Tile) -> Result<&TileImage, TerrainError> {
        self.tiles.get(&tile.id).ok_or(TerrainError::MissingTile {
            id: tile.id,
            x: tile.x,
            y: tile.y,
            z: tile.z,
        })
    }

    pub fn contains(&self, tile: &Tile) -> bool {
        self.tiles.contains_key(&tile.id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Fetches every distinct tile in `tiles` concurrently and waits for
/// all of them to settle.
///
/// A failed fetch is logged and the tile is left out of the returned
/// cache; it does not affect the other fetches.
pub async fn get_tiles<F>(tiles: &[Tile], fetcher: &F) -> TileCache
where
    F: TileFetcher + ?Sized,
{
    let mut requested = HashSet::with_capacity(tiles.len());
    let fetches = tiles
        .iter()
        .filter(|tile| requested.insert(tile.id))
        .map(|tile| async move { (tile, fetcher.fetch(tile.x, tile.y, tile.z).await) });
    let results = join_all(fetches).await;

    let mut cache = TileCache::with_capacity(results.len());
    for (tile, result) in results {
        match result {
            Ok(image) => {
                cache.insert(tile, image);
            }
            Err(e) => warn!(
                "failed to fetch tile; id: {}, x: {}, y: {}, z: {}, err: {e}",
                tile.id, tile.x, tile.y, tile.z
            ),
        }
    }
    debug!("fetched {} of {} tiles", cache.len(), requested.len());
    cache
}
