//! Error types for tile set negotiation.

use thiserror::Error;
use tiles_common::TilesError;

use crate::transport::TransportError;

/// Result type alias using TileError.
pub type Result<T> = std::result::Result<T, TileError>;

/// Errors that can occur while resolving a tile set.
#[derive(Debug, Error)]
pub enum TileError {
    /// No link qualified under any selection rule.
    #[error("{0}")]
    NotFound(String),

    /// The CRS descriptor has no resolvable URI form, or names an unknown CRS.
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    /// Fetching a document failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The tileset `dataType` is neither `map` nor `vector`.
    #[error("Expected tileset data type to be \"map\" or \"vector\", got {0}")]
    UnsupportedDataType(String),

    /// The tileset neither embeds a tile matrix set nor links to one.
    #[error("Expected http://www.opengis.net/def/rel/ogc/1.0/tiling-scheme link or tileMatrixSet")]
    MissingTilingScheme,

    /// A fetched document did not have the expected shape.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A URL could not be parsed or resolved.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Shared type failure (CRS identifier, bounding box).
    #[error(transparent)]
    Common(#[from] TilesError),
}

impl TileError {
    /// The `NotFound` error raised when no `item` link qualifies.
    pub fn item_link_not_found() -> Self {
        Self::NotFound("Could not find \"item\" link".to_string())
    }

    /// Create an InvalidDocument error.
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Whether retrying the same call could succeed.
    ///
    /// Only transport failures qualify; every other error is a property of
    /// the documents themselves.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TileError::Transport(e) if e.is_retryable())
    }
}
