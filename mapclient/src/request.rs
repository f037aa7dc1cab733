use crate::{ClientConfig, ClientError, HttpResponse};
use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

impl ClientConfig {
    /// Returns `api_base/{segments...}?key=...`.
    ///
    /// Each segment is percent-encoded as a single path segment, so
    /// user supplied queries may contain `/`, `?` or spaces.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Invalid(format!("api base {}", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Performs a GET and returns the body of a successful response.
    pub(crate) async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>, ClientError> {
        let fetch = self.fetch.as_deref().ok_or(ClientError::Config("fetch"))?;
        debug!("GET {}", url.path());
        let HttpResponse { status, body } = fetch.get(url).await.map_err(ClientError::Fetch)?;
        check_status(status)?;
        Ok(body)
    }

    /// Performs a GET and deserializes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ClientError> {
        let body = self.get_bytes(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn check_status(status: u16) -> Result<(), ClientError> {
    let message = match status {
        200..=299 => return Ok(()),
        400 => "query too long or has invalid parameters",
        403 => "key is missing, invalid or restricted",
        404 => "not found",
        _ => "unexpected status",
    };
    Err(ClientError::Status { status, message })
}

/// Formats a number with at most six decimals and no trailing zeros.
pub(crate) fn fmt_num(value: f64) -> String {
    let s = format!("{value:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" => "0".to_string(),
        s => s.to_string(),
    }
}

/// Formats a coordinate as `lon,lat`.
pub(crate) fn fmt_coord(coord: geo::Coord<f64>) -> String {
    format!("{},{}", fmt_num(coord.x), fmt_num(coord.y))
}

#[cfg(test)]
mod tests {
    use super::{check_status, fmt_coord, fmt_num};
    use crate::{mock, ClientConfig, ClientError};
    use geo::coord;
    use serde_json::Value;
    use url::Url;

    #[test]
    fn test_endpoint_encodes_segments() {
        let config = ClientConfig::builder().api_key("k").build().unwrap();
        let url = config.endpoint(&["geocoding", "a b/c?.json"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.maptiler.com/geocoding/a%20b%2Fc%3F.json?key=k"
        );
    }

    #[test]
    fn test_endpoint_with_base_path() {
        let config = ClientConfig::builder()
            .api_key("k")
            .api_base(Url::parse("http://localhost:8080/proxy/").unwrap())
            .build()
            .unwrap();
        let url = config.endpoint(&["data", "x", "features.json"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/proxy/data/x/features.json?key=k"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(check_status(200).is_ok());
        assert!(check_status(204).is_ok());
        for (status, fragment) in [
            (400, "invalid parameters"),
            (403, "restricted"),
            (404, "not found"),
            (500, "unexpected"),
        ] {
            match check_status(status) {
                Err(ClientError::Status { status: s, message }) => {
                    assert_eq!(s, status);
                    assert!(message.contains(fragment));
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(-71.303_246), "-71.303246");
        assert_eq!(fmt_num(0.1234567), "0.123457");
        assert_eq!(fmt_num(-0.0000001), "0");
        assert_eq!(fmt_coord(coord! { x: 8.5, y: 47.25 }), "8.5,47.25");
    }

    #[tokio::test]
    async fn test_missing_fetch() {
        let config = ClientConfig::builder().api_key("k").build().unwrap();
        let url = config.endpoint(&["x.json"]).unwrap();
        assert!(matches!(
            config.get_json::<Value>(&url).await,
            Err(ClientError::Config("fetch"))
        ));
    }

    #[tokio::test]
    async fn test_error_status() {
        let (config, requests) = mock::config(403, "{}");
        let url = config.endpoint(&["x.json"]).unwrap();
        assert!(matches!(
            config.get_json::<Value>(&url).await,
            Err(ClientError::Status { status: 403, .. })
        ));
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bad_json() {
        let (config, _) = mock::config(200, "not json");
        let url = config.endpoint(&["x.json"]).unwrap();
        assert!(matches!(
            config.get_json::<Value>(&url).await,
            Err(ClientError::Json(_))
        ));
    }
}
