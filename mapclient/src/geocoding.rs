//! Forward, reverse, and batch geocoding.

use crate::{
    request::{fmt_coord, fmt_num},
    ClientConfig, ClientError,
};
use geo::Coord;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Query options shared by all geocoding calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodingOptions {
    /// Preferred result languages, most preferred first.
    pub language: Vec<String>,
    /// Maximum number of results.
    pub limit: Option<u8>,
    /// `[west, south, east, north]` search area.
    pub bbox: Option<[f64; 4]>,
    /// Rank results near this location higher.
    pub proximity: Option<Coord>,
    /// Restrict to these place types (`country`, `municipality`, ...).
    pub types: Vec<String>,
    /// Restrict to these ISO 3166 alpha-2 country codes.
    pub country: Vec<String>,
    pub fuzzy_match: Option<bool>,
    pub autocomplete: Option<bool>,
}

impl GeocodingOptions {
    fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        if !self.language.is_empty() {
            pairs.append_pair("language", &self.language.join(","));
        }
        if let Some(limit) = self.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if let Some(bbox) = self.bbox {
            let bbox: Vec<String> = bbox.iter().copied().map(fmt_num).collect();
            pairs.append_pair("bbox", &bbox.join(","));
        }
        if let Some(proximity) = self.proximity {
            pairs.append_pair("proximity", &fmt_coord(proximity));
        }
        if !self.types.is_empty() {
            pairs.append_pair("types", &self.types.join(","));
        }
        if !self.country.is_empty() {
            pairs.append_pair("country", &self.country.join(","));
        }
        if let Some(fuzzy_match) = self.fuzzy_match {
            pairs.append_pair("fuzzyMatch", &fuzzy_match.to_string());
        }
        if let Some(autocomplete) = self.autocomplete {
            pairs.append_pair("autocomplete", &autocomplete.to_string());
        }
    }
}

/// A GeoJSON `FeatureCollection` of geocoding matches.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeocodingResult {
    #[serde(default)]
    pub features: Vec<GeocodingFeature>,
    /// Query tokens as understood by the service.
    #[serde(default)]
    pub query: Vec<Value>,
    #[serde(default)]
    pub attribution: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodingFeature {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub place_name: String,
    #[serde(default)]
    pub place_type: Vec<String>,
    #[serde(default)]
    pub relevance: f64,
    #[serde(default)]
    pub center: Option<[f64; 2]>,
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
    #[serde(default)]
    pub geometry: Option<Value>,
    #[serde(default)]
    pub properties: Value,
    #[serde(default)]
    pub context: Vec<Value>,
}

impl GeocodingFeature {
    pub fn center_coord(&self) -> Option<Coord> {
        self.center.map(|[x, y]| Coord { x, y })
    }
}

/// Looks up places matching free-form `query`.
pub async fn forward(
    config: &ClientConfig,
    query: &str,
    options: &GeocodingOptions,
) -> Result<GeocodingResult, ClientError> {
    let query = non_empty(query)?;
    get(config, &format!("{query}.json"), options).await
}

/// Looks up places at `position`.
pub async fn reverse(
    config: &ClientConfig,
    position: Coord,
    options: &GeocodingOptions,
) -> Result<GeocodingResult, ClientError> {
    get(config, &format!("{}.json", fmt_coord(position)), options).await
}

/// Looks up a feature by the `id` of an earlier result.
pub async fn by_id(
    config: &ClientConfig,
    id: &str,
    options: &GeocodingOptions,
) -> Result<GeocodingResult, ClientError> {
    let id = non_empty(id)?;
    get(config, &format!("{id}.json"), options).await
}

/// Runs several forward queries in one request and returns one
/// result per query, in order.
pub async fn batch<S: AsRef<str>>(
    config: &ClientConfig,
    queries: &[S],
    options: &GeocodingOptions,
) -> Result<Vec<GeocodingResult>, ClientError> {
    let queries = queries
        .iter()
        .map(|q| non_empty(q.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    if queries.is_empty() {
        return Err(ClientError::Invalid("empty batch".to_string()));
    }
    let url = build_url(config, &format!("{}.json", queries.join(";")), options)?;
    // A batch of one comes back as a single collection.
    if queries.len() == 1 {
        Ok(vec![config.get_json(&url).await?])
    } else {
        config.get_json(&url).await
    }
}

fn non_empty(query: &str) -> Result<&str, ClientError> {
    match query.trim() {
        "" => Err(ClientError::Invalid("empty query".to_string())),
        q => Ok(q),
    }
}

fn build_url(
    config: &ClientConfig,
    segment: &str,
    options: &GeocodingOptions,
) -> Result<Url, ClientError> {
    let mut url = config.endpoint(&["geocoding", segment])?;
    options.apply(&mut url);
    Ok(url)
}

async fn get(
    config: &ClientConfig,
    segment: &str,
    options: &GeocodingOptions,
) -> Result<GeocodingResult, ClientError> {
    let url = build_url(config, segment, options)?;
    config.get_json(&url).await
}

#[cfg(test)]
mod tests {
    use super::{batch, by_id, forward, reverse, GeocodingOptions};
    use crate::{mock, ClientError};
    use geo::coord;

    const ZURICH: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "id": "municipality.46425",
            "type": "Feature",
            "text": "Zurich",
            "place_name": "Zurich, Switzerland",
            "place_type": ["municipality"],
            "relevance": 1,
            "center": [8.54, 47.37],
            "bbox": [8.44, 47.32, 8.62, 47.43],
            "properties": {"ref": "osm:r1682248"},
            "geometry": {"type": "Point", "coordinates": [8.54, 47.37]}
        }],
        "query": ["zurich"],
        "attribution": "© OpenStreetMap contributors"
    }"#;

    #[tokio::test]
    async fn test_forward() {
        let (config, requests) = mock::config(200, ZURICH);
        let options = GeocodingOptions {
            language: vec!["de".into(), "en".into()],
            limit: Some(3),
            proximity: Some(coord! { x: 8.5, y: 47.4 }),
            fuzzy_match: Some(false),
            ..Default::default()
        };
        let result = forward(&config, "Zurich", &options).await.unwrap();

        assert_eq!(result.features.len(), 1);
        let feature = &result.features[0];
        assert_eq!(feature.place_name, "Zurich, Switzerland");
        assert_eq!(feature.center_coord(), Some(coord! { x: 8.54, y: 47.37 }));
        assert_eq!(feature.properties["ref"], "osm:r1682248");

        let requests = requests.lock().unwrap();
        let url = &requests[0];
        assert_eq!(url.path(), "/geocoding/Zurich.json");
        assert_eq!(mock::query(url, "key").as_deref(), Some("test-key"));
        assert_eq!(mock::query(url, "language").as_deref(), Some("de,en"));
        assert_eq!(mock::query(url, "limit").as_deref(), Some("3"));
        assert_eq!(mock::query(url, "proximity").as_deref(), Some("8.5,47.4"));
        assert_eq!(mock::query(url, "fuzzyMatch").as_deref(), Some("false"));
        assert_eq!(mock::query(url, "bbox"), None);
    }

    #[tokio::test]
    async fn test_reverse_and_by_id_paths() {
        let (config, requests) = mock::config(200, ZURICH);
        let options = GeocodingOptions {
            bbox: Some([8.0, 47.0, 9.0, 48.5]),
            types: vec!["municipality".into()],
            ..Default::default()
        };
        reverse(&config, coord! { x: 8.54, y: 47.37 }, &options)
            .await
            .unwrap();
        by_id(&config, "municipality.46425", &GeocodingOptions::default())
            .await
            .unwrap();

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].path(), "/geocoding/8.54,47.37.json");
        assert_eq!(mock::query(&requests[0], "bbox").as_deref(), Some("8,47,9,48.5"));
        assert_eq!(
            mock::query(&requests[0], "types").as_deref(),
            Some("municipality")
        );
        assert_eq!(requests[1].path(), "/geocoding/municipality.46425.json");
    }

    #[tokio::test]
    async fn test_batch() {
        let body = format!("[{ZURICH},{ZURICH}]");
        let (config, requests) = mock::config(200, &body);
        let results = batch(&config, &["Zurich", "Bern"], &GeocodingOptions::default())
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(requests.lock().unwrap()[0].path(), "/geocoding/Zurich;Bern.json");

        let (config, _) = mock::config(200, ZURICH);
        let results = batch(&config, &["Zurich"], &GeocodingOptions::default())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_queries() {
        let (config, requests) = mock::config(200, ZURICH);
        let options = GeocodingOptions::default();
        assert!(matches!(
            forward(&config, "  ", &options).await,
            Err(ClientError::Invalid(_))
        ));
        assert!(matches!(
            batch::<&str>(&config, &[], &options).await,
            Err(ClientError::Invalid(_))
        ));
        assert!(matches!(
            batch(&config, &["a", ""], &options).await,
            Err(ClientError::Invalid(_))
        ));
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_not_found() {
        let (config, _) = mock::config(404, "");
        assert!(matches!(
            by_id(&config, "nope", &GeocodingOptions::default()).await,
            Err(ClientError::Status { status: 404, .. })
        ));
    }
}
