use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("path needs at least 2 coordinates, got {0}")]
    PathTooShort(usize),

    #[error("zoom {0} exceeds maximum of {max}", max = crate::MAX_ZOOM)]
    Zoom(u8),

    #[error("tile size must be greater than 0")]
    TileSize,

    #[error("unknown metric '{0}', expected 'm' or 'ft'")]
    Metric(String),

    #[error("missing tile {id} (x: {x}, y: {y}, z: {z})")]
    MissingTile { id: u64, x: u32, y: u32, z: u8 },

    #[error("no elevation points to aggregate")]
    EmptyProfile,
}
