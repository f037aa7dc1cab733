use crate::{
    aggregator::{build_output, smooth_elevation, to_feet},
    constants::{DEFAULT_TILE_SIZE, DEFAULT_ZOOM, MAX_ZOOM},
    cover::{tile_cover, Sample, TileCover},
    math::{mercator_pixel, point_distance},
    tiles::{get_tiles, Tile},
    TerrainError, TileFetcher,
};
use geo::geometry::{Coord, LineString};
use log::debug;
use rgbdem::{ElevationParser, TerrainRgb, TileImage};
use std::{fmt, str::FromStr, time::Instant};

/// Elevation at one sample along a path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevationPoint {
    /// Distance along the path from its start.
    pub distance: f64,

    pub elevation: f64,

    pub coord: Coord,

    /// Tile the elevation was read from.
    pub tile: Tile,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevationProfile {
    /// Total distance from the first to the last point.
    pub distance: f64,

    pub min_elevation: f64,

    pub max_elevation: f64,

    /// Mean of all point elevations.
    pub avg_elevation: f64,

    pub start_elevation: f64,

    pub end_elevation: f64,

    /// Every sample along the path, in path order.
    pub points: Vec<ElevationPoint>,
}

impl ElevationProfile {
    pub fn builder<'a>() -> ProfileBuilder<'a> {
        ProfileBuilder {
            zoom: DEFAULT_ZOOM,
            tile_size: DEFAULT_TILE_SIZE,
            smooth: false,
            metric: Metric::Meters,
            tile_fetcher: None,
            elevation_parser: None,
        }
    }
}

/// Unit of every distance and elevation in an [`ElevationProfile`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    #[default]
    Meters,
    Feet,
}

impl FromStr for Metric {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(Self::Meters),
            "ft" => Ok(Self::Feet),
            other => Err(TerrainError::Metric(other.to_owned())),
        }
    }
}

/// Options for [`profile_line_string`].
pub type ProfileOptions<'a> = ProfileBuilder<'a>;

pub struct ProfileBuilder<'a> {
    /// Zoom level of the elevation tiles (defaults to 13).
    zoom: u8,

    /// Tile width and height in pixels (defaults to 512).
    tile_size: u32,

    /// Apply a 3-tap moving average to elevations (defaults to
    /// false).
    smooth: bool,

    /// Output units (defaults to meters).
    metric: Metric,

    /// Source of decoded tiles (required).
    tile_fetcher: Option<Box<dyn TileFetcher + 'a>>,

    /// Pixel to elevation decoding (defaults to Terrain-RGB).
    elevation_parser: Option<Box<dyn ElevationParser + Send + Sync + 'a>>,
}

impl<'a> Default for ProfileBuilder<'a> {
    fn default() -> Self {
        ElevationProfile::builder()
    }
}

impl<'a> fmt::Debug for ProfileBuilder<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileBuilder")
            .field("zoom", &self.zoom)
            .field("tile_size", &self.tile_size)
            .field("smooth", &self.smooth)
            .field("metric", &self.metric)
            .field("tile_fetcher", &self.tile_fetcher.is_some())
            .field("elevation_parser", &self.elevation_parser.is_some())
            .finish()
    }
}

impl<'a> ProfileBuilder<'a> {
    #[must_use]
    pub fn zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn tile_size(mut self, pixels: u32) -> Self {
        self.tile_size = pixels;
        self
    }

    #[must_use]
    pub fn smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    #[must_use]
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Source of decoded tiles (required).
    #[must_use]
    pub fn tile_fetcher(mut self, fetcher: impl TileFetcher + 'a) -> Self {
        self.tile_fetcher = Some(Box::new(fetcher));
        self
    }

    /// Replaces the default Terrain-RGB decoding.
    #[must_use]
    pub fn elevation_parser(mut self, parser: impl ElevationParser + Send + Sync + 'a) -> Self {
        self.elevation_parser = Some(Box::new(parser));
        self
    }

    /// Builds the elevation profile along `path`.
    ///
    /// All tiles are fetched before any elevation is decoded. Tiles
    /// which fail to fetch only fail the profile if a sample needs
    /// them.
    pub async fn build(&self, path: &[Coord]) -> Result<ElevationProfile, TerrainError> {
        let fetcher = self
            .tile_fetcher
            .as_deref()
            .ok_or(TerrainError::Builder("tile_fetcher"))?;
        if path.len() < 2 {
            return Err(TerrainError::PathTooShort(path.len()));
        }
        if self.zoom > MAX_ZOOM {
            return Err(TerrainError::Zoom(self.zoom));
        }
        if self.tile_size == 0 {
            return Err(TerrainError::TileSize);
        }

        let (TileCover { samples, tiles }, cover_runtime) = {
            let now = Instant::now();
            let cover = tile_cover(path, self.zoom, self.tile_size);
            (cover, now.elapsed())
        };

        let (cache, fetch_runtime) = {
            let now = Instant::now();
            let cache = get_tiles(&tiles, fetcher).await;
            (cache, now.elapsed())
        };

        let (mut points, decode_runtime) = {
            let now = Instant::now();
            let parser: &dyn ElevationParser = match self.elevation_parser.as_deref() {
                Some(parser) => parser,
                None => &TerrainRgb,
            };
            let mut points = Vec::with_capacity(samples.len());
            let mut distance = 0.0;
            let mut prev: Option<Coord> = None;
            for Sample { coord, tile } in samples {
                let image = cache.get(&tile)?;
                if let Some(prev) = prev {
                    distance += point_distance(prev, coord);
                }
                prev = Some(coord);
                points.push(ElevationPoint {
                    distance,
                    elevation: elevation_at(coord, &tile, self.tile_size, image, parser),
                    coord,
                    tile,
                });
            }
            (points, now.elapsed())
        };

        if self.smooth {
            smooth_elevation(&mut points);
        }

        debug!(
            "profile; len: {}, tiles: {}, cover_exec: {:?}, fetch_exec: {:?}, decode_exec: {:?}",
            points.len(),
            tiles.len(),
            cover_runtime,
            fetch_runtime,
            decode_runtime
        );

        let profile = build_output(points)?;
        Ok(match self.metric {
            Metric::Meters => profile,
            Metric::Feet => to_feet(profile),
        })
    }
}

/// Returns the elevation profile along `path`.
pub async fn profile_line_string(
    path: &LineString,
    options: &ProfileOptions<'_>,
) -> Result<ElevationProfile, TerrainError> {
    options.build(&path.0).await
}

/// Decodes the elevation under `coord` from `image`, the raster of
/// `tile`.
///
/// `coord` is projected into the tile's pixel grid at `tile_size`
/// and scaled to the image's actual dimensions. The pixel position is
/// clamped to the image.
pub fn elevation_at<P>(
    coord: Coord,
    tile: &Tile,
    tile_size: u32,
    image: &TileImage,
    parser: &P,
) -> f64
where
    P: ElevationParser + ?Sized,
{
    let (px, py) = mercator_pixel(coord, tile.z, tile_size);
    let size = f64::from(tile_size);
    let col = pixel_index(px - f64::from(tile.x) * size, size, image.width());
    let row = pixel_index(py - f64::from(tile.y) * size, size, image.height());
    image.elevation(col, row, parser)
}

/// Maps a pixel offset within a `tile_size` tile onto `[0, extent)`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn pixel_index(offset: f64, tile_size: f64, extent: usize) -> usize {
    let max = extent.saturating_sub(1) as f64;
    (offset * extent as f64 / tile_size).floor().clamp(0.0, max) as usize
}
