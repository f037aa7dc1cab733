//! Tile fetching capability.

use async_trait::async_trait;
use rgbdem::TileImage;
use std::future::Future;

/// Error reported by a [`TileFetcher`].
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Something which can retrieve and decode slippy-map tiles.
///
/// Transport, image decoding, retries and timeouts are all the
/// implementor's concern.
///
/// Any `Fn(x, y, z) -> impl Future<Output = Result<TileImage, FetchError>>`
/// is a `TileFetcher`.
#[async_trait]
pub trait TileFetcher: Send + Sync {
    async fn fetch(&self, x: u32, y: u32, z: u8) -> Result<TileImage, FetchError>;
}

#[async_trait]
impl<F, Fut> TileFetcher for F
where
    F: Fn(u32, u32, u8) -> Fut + Send + Sync,
    Fut: Future<Output = Result<TileImage, FetchError>> + Send + 'static,
{
    async fn fetch(&self, x: u32, y: u32, z: u8) -> Result<TileImage, FetchError> {
        self(x, y, z).await
    }
}
