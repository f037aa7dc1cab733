//! Location of the caller's IP address.

use crate::{ClientConfig, ClientError};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeolocationResult {
    pub country: Option<String>,
    pub country_code: Option<String>,
    #[serde(default)]
    pub country_languages: Vec<String>,
    pub continent: Option<String>,
    pub continent_code: Option<String>,
    pub region: Option<String>,
    pub region_code: Option<String>,
    pub city: Option<String>,
    pub postal: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    pub timezone: Option<String>,
    /// Whether the country is a member of the European Union.
    #[serde(default)]
    pub eu: bool,
}

impl GeolocationResult {
    pub fn coord(&self) -> Option<geo::Coord> {
        Some(geo::Coord {
            x: self.longitude?,
            y: self.latitude?,
        })
    }
}

/// Returns the geolocation of the requesting IP address.
pub async fn info(config: &ClientConfig) -> Result<GeolocationResult, ClientError> {
    let url = config.endpoint(&["geolocation", "ip.json"])?;
    config.get_json(&url).await
}
