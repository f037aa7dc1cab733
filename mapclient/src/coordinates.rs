//! Coordinate reference system search and transformation.

use crate::{request::fmt_num, ClientConfig, ClientError};
use geo::Coord;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results.
    pub limit: Option<u8>,
    /// Include the available transformations of each system.
    pub transformations: bool,
    /// Include WKT and Proj4 exports of each system.
    pub exports: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub results: Vec<CoordinateSystem>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoordinateSystem {
    pub id: CoordinateId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub exports: Option<Exports>,
    #[serde(default)]
    pub transformations: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoordinateId {
    pub authority: String,
    pub code: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Exports {
    pub proj4: Option<String>,
    pub wkt: Option<String>,
}

/// Finds coordinate systems matching `query`, e.g. `"EPSG:2056"` or
/// `"switzerland"`.
pub async fn search(
    config: &ClientConfig,
    query: &str,
    options: &SearchOptions,
) -> Result<SearchResult, ClientError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ClientError::Invalid("empty query".to_string()));
    }
    let segment = format!("{query}.json");
    let mut url = config.endpoint(&["coordinates", "search", segment.as_str()])?;
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(limit) = options.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if options.transformations {
            pairs.append_pair("transformations", "true");
        }
        if options.exports {
            pairs.append_pair("exports", "true");
        }
    }
    config.get_json(&url).await
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Source EPSG code; the service assumes WGS84 when unset.
    pub source_crs: Option<u32>,
    /// Target EPSG code; the service assumes WGS84 when unset.
    pub target_crs: Option<u32>,
    /// Explicit transformation operations, applied in order.
    pub operations: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransformResult {
    #[serde(default)]
    pub results: Vec<TransformedCoord>,
    #[serde(default)]
    pub transformer_selection_strategy: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TransformedCoord {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: Option<f64>,
}

impl TransformedCoord {
    pub fn coord(&self) -> Coord {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

/// Transforms `coords` between coordinate systems.
pub async fn transform(
    config: &ClientConfig,
    coords: &[Coord],
    options: &TransformOptions,
) -> Result<TransformResult, ClientError> {
    if coords.is_empty() {
        return Err(ClientError::Invalid("no coordinates".to_string()));
    }
    let coords: Vec<String> = coords
        .iter()
        .map(|c| format!("{},{}", fmt_num(c.x), fmt_num(c.y)))
        .collect();
    let segment = format!("{}.json", coords.join(";"));
    let mut url = config.endpoint(&["coordinates", "transform", segment.as_str()])?;
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(crs) = options.source_crs {
            pairs.append_pair("s_srs", &crs.to_string());
        }
        if let Some(crs) = options.target_crs {
            pairs.append_pair("t_srs", &crs.to_string());
        }
        if !options.operations.is_empty() {
            let ops: Vec<String> = options.operations.iter().map(u32::to_string).collect();
            pairs.append_pair("ops", &ops.join("|"));
        }
    }
    config.get_json(&url).await
}
