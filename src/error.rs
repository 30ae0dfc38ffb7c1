use std::path::PathBuf;

/// Everything that can go wrong while loading, partitioning or previewing the shapes dataset.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // Decoding a drawing or encoding a saved preview
    #[error("image error for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),

    /// Split points must be fractions with 0 <= first <= second <= 1.
    #[error("invalid split points [{first}, {second}]")]
    InvalidSplits { first: f64, second: f64 },

    #[error("preview scale {scale} is too large for a {width}x{height} image")]
    ScaleTooLarge { scale: u32, width: u32, height: u32 },

    #[error("index {index} out of range for set of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("manifest error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed manifest row {row}: {reason}")]
    Manifest { row: usize, reason: String },

    #[error("unknown shape label {0:?}")]
    UnknownLabel(String),

    #[error("unknown split {0:?}, expected train, dev or test")]
    UnknownSplit(String),
}

pub type Result<T> = std::result::Result<T, Error>;
