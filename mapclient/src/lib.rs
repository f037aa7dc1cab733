//! # Map client
//!
//! Typed wrappers around a map tile and geospatial web API:
//! geocoding, IP geolocation, coordinate reference system search and
//! transformation, user data, map styles, static map URLs, and
//! elevation profiles backed by Terrain-RGB tiles.
//!
//! HTTP transport is not included. Every request goes through the
//! [`HttpFetch`] capability supplied in [`ClientConfig`].

mod config;
pub mod coordinates;
pub mod data;
pub mod elevation;
mod error;
pub mod geocoding;
pub mod geolocation;
mod request;
pub mod static_maps;
pub mod styles;

pub use crate::{
    config::{ClientConfig, ConfigBuilder, HttpFetch, HttpResponse, DEFAULT_API_BASE},
    error::ClientError,
};
pub use {geo, terrain};

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory [`HttpFetch`] for tests.

    use crate::{ClientConfig, HttpResponse};
    use std::sync::{Arc, Mutex};
    use terrain::FetchError;
    use url::Url;

    /// Returns a config whose fetch capability answers every request
    /// with `status` and `body`, along with the log of requested URLs.
    pub fn config(status: u16, body: &str) -> (ClientConfig, Arc<Mutex<Vec<Url>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let body = body.as_bytes().to_vec();
        let fetch = {
            let requests = requests.clone();
            move |url: Url| {
                requests.lock().unwrap().push(url);
                let body = body.clone();
                async move { Ok::<_, FetchError>(HttpResponse { status, body }) }
            }
        };
        let config = ClientConfig::builder()
            .api_key("test-key")
            .fetch(fetch)
            .build()
            .unwrap();
        (config, requests)
    }

    /// Returns the value of query parameter `name` in `url`.
    pub fn query(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}
