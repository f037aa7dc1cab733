//! User uploaded datasets.

use crate::{ClientConfig, ClientError};
use serde_json::Value;

/// Fetches dataset `data_id` as a GeoJSON value.
pub async fn get(config: &ClientConfig, data_id: &str) -> Result<Value, ClientError> {
    let data_id = data_id.trim();
    if data_id.is_empty() {
        return Err(ClientError::Invalid("empty data id".to_string()));
    }
    let url = config.endpoint(&["data", data_id, "features.json"])?;
    config.get_json(&url).await
}
