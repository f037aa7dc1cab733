//! Elevation profiles from the hosted Terrain-RGB tileset.
//!
//! Image decoding is not included: callers supply an [`ImageDecoder`]
//! turning the fetched tile bytes into a [`TileImage`].

use crate::ClientConfig;
use async_trait::async_trait;
use terrain::{rgbdem::TileImage, ElevationProfile, FetchError, ProfileBuilder, TileFetcher};

/// Tileset holding Terrain-RGB encoded elevation.
pub const TERRAIN_TILESET: &str = "terrain-rgb-v2";

/// Edge length of [`TERRAIN_TILESET`] tiles in pixels.
pub const TERRAIN_TILE_SIZE: u32 = 512;

/// Decodes raw image bytes into pixels.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<TileImage, FetchError>;
}

impl<F> ImageDecoder for F
where
    F: Fn(&[u8]) -> Result<TileImage, FetchError> + Send + Sync,
{
    fn decode(&self, bytes: &[u8]) -> Result<TileImage, FetchError> {
        self(bytes)
    }
}

/// [`TileFetcher`] over the client's HTTP capability.
pub struct TerrainTiles<D> {
    config: ClientConfig,
    decoder: D,
    format: &'static str,
}

impl<D: ImageDecoder> TerrainTiles<D> {
    pub fn new(config: ClientConfig, decoder: D) -> Self {
        Self {
            config,
            decoder,
            format: "webp",
        }
    }

    /// Requests tiles with extension `format` instead of `webp`.
    #[must_use]
    pub fn format(mut self, format: &'static str) -> Self {
        self.format = format;
        self
    }
}

#[async_trait]
impl<D: ImageDecoder> TileFetcher for TerrainTiles<D> {
    async fn fetch(&self, x: u32, y: u32, z: u8) -> Result<TileImage, FetchError> {
        let (z, x, file) = (z.to_string(), x.to_string(), format!("{y}.{}", self.format));
        let url = self
            .config
            .endpoint(&["tiles", TERRAIN_TILESET, z.as_str(), x.as_str(), file.as_str()])?;
        let bytes = self.config.get_bytes(&url).await?;
        self.decoder.decode(&bytes)
    }
}

/// Returns a profile builder reading [`TERRAIN_TILESET`] through
/// `config`.
pub fn profile_builder<'a>(
    config: &ClientConfig,
    decoder: impl ImageDecoder + 'a,
) -> ProfileBuilder<'a> {
    ElevationProfile::builder()
        .tile_size(TERRAIN_TILE_SIZE)
        .tile_fetcher(TerrainTiles::new(config.clone(), decoder))
}

#[cfg(test)]
mod tests {
    use super::{profile_builder, TerrainTiles};
    use crate::{mock, ClientConfig, ClientError, HttpResponse};
    use approx::assert_relative_eq;
    use terrain::{
        geo::Coord, rgbdem::TileImage, FetchError, Metric, TerrainError, Tile, TileFetcher,
    };
    use url::Url;

    const START: Coord = Coord {
        x: -71.30830716441369,
        y: 44.28309806603165,
    };

    const END: Coord = Coord {
        x: -71.2972073283768,
        y: 44.25628098424278,
    };

    fn flat(bytes: &[u8]) -> Result<TileImage, FetchError> {
        assert_eq!(bytes, b"tile");
        Ok(TileImage::filled(4, 4, &[39, 16, 0])?)
    }

    #[tokio::test]
    async fn test_fetch_url() {
        let (config, requests) = mock::config(200, "tile");
        let tiles = TerrainTiles::new(config, flat).format("png");
        let image = tiles.fetch(2473, 2969, 13).await.unwrap();
        assert_eq!(image.width(), 4);
        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].path(), "/tiles/terrain-rgb-v2/13/2473/2969.png");
        assert_eq!(mock::query(&requests[0], "key").as_deref(), Some("test-key"));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let (config, _) = mock::config(404, "");
        let tiles = TerrainTiles::new(config, flat);
        let err = tiles.fetch(0, 0, 0).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_profile() {
        let (config, requests) = mock::config(200, "tile");
        let profile = profile_builder(&config, flat)
            .metric(Metric::Feet)
            .build(&[START, END])
            .await
            .unwrap();
        assert_eq!(profile.min_elevation, profile.max_elevation);
        assert_relative_eq!(profile.start_elevation, 246_000.0 * terrain::M_TO_FT);

        let mut paths: Vec<String> = requests
            .lock()
            .unwrap()
            .iter()
            .map(|url| url.path().to_string())
            .collect();
        paths.sort();
        assert_eq!(
            paths,
            [
                "/tiles/terrain-rgb-v2/13/2473/2969.webp",
                "/tiles/terrain-rgb-v2/13/2473/2970.webp",
            ]
        );
    }

    #[tokio::test]
    async fn test_profile_missing_tile() {
        let fetch = |url: Url| async move {
            let status = if url.path().ends_with("2969.webp") { 500 } else { 200 };
            Ok::<_, FetchError>(HttpResponse {
                status,
                body: b"tile".to_vec(),
            })
        };
        let config = ClientConfig::builder()
            .api_key("k")
            .fetch(fetch)
            .build()
            .unwrap();
        let err = profile_builder(&config, flat)
            .build(&[START, END])
            .await
            .unwrap_err();
        let expected = Tile::containing(START, 13);
        assert!(matches!(
            err,
            TerrainError::MissingTile { id, x: 2473, y: 2969, z: 13 } if id == expected.id
        ));
    }
}
