use crate::ClientError;
use async_trait::async_trait;
use std::{env, fmt, future::Future, sync::Arc};
use terrain::FetchError;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.maptiler.com/";

const API_KEY_VAR: &str = "MAPCLIENT_API_KEY";
const API_BASE_VAR: &str = "MAPCLIENT_API_BASE";

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// HTTP GET capability.
///
/// Any `Fn(Url) -> impl Future<Output = Result<HttpResponse, FetchError>>`
/// is an `HttpFetch`.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError>;
}

#[async_trait]
impl<F, Fut> HttpFetch for F
where
    F: Fn(Url) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, FetchError>> + Send + 'static,
{
    async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
        self(url.clone()).await
    }
}

/// Settings shared by every request.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) api_key: String,
    pub(crate) api_base: Url,
    pub(crate) fetch: Option<Arc<dyn HttpFetch>>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base.as_str())
            .field("fetch", &self.fetch.is_some())
            .finish()
    }
}

impl ClientConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            api_key: None,
            api_base: None,
            fetch: None,
        }
    }

    /// Returns a builder populated from `MAPCLIENT_API_KEY` and,
    /// if set, `MAPCLIENT_API_BASE`.
    pub fn from_env() -> Result<ConfigBuilder, ClientError> {
        let mut builder = Self::builder();
        if let Ok(key) = env::var(API_KEY_VAR) {
            builder = builder.api_key(key);
        }
        if let Ok(base) = env::var(API_BASE_VAR) {
            builder = builder.api_base(Url::parse(&base)?);
        }
        Ok(builder)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }
}

pub struct ConfigBuilder {
    /// API key sent with every request (required).
    api_key: Option<String>,

    /// Root of all endpoints (defaults to [`DEFAULT_API_BASE`]).
    api_base: Option<Url>,

    /// HTTP transport (required before the first request).
    fetch: Option<Arc<dyn HttpFetch>>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn api_base(mut self, base: Url) -> Self {
        self.api_base = Some(base);
        self
    }

    #[must_use]
    pub fn fetch(mut self, fetch: impl HttpFetch + 'static) -> Self {
        self.fetch = Some(Arc::new(fetch));
        self
    }

    pub fn build(self) -> Result<ClientConfig, ClientError> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or(ClientError::Config("api_key"))?;
        let api_base = match self.api_base {
            Some(base) => base,
            None => Url::parse(DEFAULT_API_BASE)?,
        };
        if api_base.cannot_be_a_base() {
            return Err(ClientError::Invalid(format!("api base {api_base}")));
        }
        Ok(ClientConfig {
            api_key,
            api_base,
            fetch: self.fetch,
        })
    }
}
