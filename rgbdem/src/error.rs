use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RgbDemError {
    #[error("unsupported channel count {0}, expected 3 or 4")]
    Channels(usize),

    #[error("invalid pixel buffer len {len} for {width}x{height}x{channels}")]
    PixelLen {
        len: usize,
        width: usize,
        height: usize,
        channels: usize,
    },

    #[error("empty tile image")]
    Empty,
}
