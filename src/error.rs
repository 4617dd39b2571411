use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write delimited rows to {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// A `fill` or `stroke` points at `url(#id)` but no gradient with that id exists.
    #[error("{attribute}=\"url(#{id})\" has no matching gradient definition")]
    UnresolvedGradient { id: String, attribute: String },

    #[error("failed to format delimited rows: {0}")]
    Delimited(#[from] csv::Error),

    #[error("sensor interval must be at least one minute")]
    ZeroInterval,

    /// Reading `index` would land past the last representable timestamp.
    #[error("timestamp of reading {index} is out of range ({interval_minutes} min interval)")]
    TimestampOutOfRange { index: usize, interval_minutes: u32 },

    #[error("canvas must have positive dimensions, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[cfg(feature = "png")]
    #[error("failed to rasterize svg: {0}")]
    Raster(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
