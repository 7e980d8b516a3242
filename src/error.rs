/// Error types shared across the crate
use std::path::PathBuf;
use thiserror::Error;

/// A computed candidate path did not resolve to a decodable image.
///
/// This is the load-failure signal the rendering layer hands back to a
/// [`Resolver`](crate::resolve::Resolver). It is `Clone` so it can travel
/// inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("image variant unavailable: {path} ({reason})")]
pub struct VariantUnavailable {
    /// The logical path that was requested
    pub path: String,
    /// Why the load failed (missing file, decode error, ...)
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("asset reference must not be empty")]
    EmptyReference,

    #[error("invalid width-selection policy `{policy}`: {reason}")]
    InvalidSizes { policy: String, reason: String },

    #[error(transparent)]
    VariantUnavailable(#[from] VariantUnavailable),

    #[error("unsupported variant encoding `{0}`")]
    UnsupportedEncoding(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write variant {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("content manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
