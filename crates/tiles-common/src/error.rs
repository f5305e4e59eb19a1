//! Error types for the shared tile types.

use thiserror::Error;

/// Result type alias using TilesError.
pub type TilesResult<T> = Result<T, TilesError>;

/// Errors raised while parsing or validating shared tile types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TilesError {
    #[error("Invalid CRS identifier: {0}")]
    InvalidCrs(String),

    #[error("Invalid tile coordinate: {0}")]
    InvalidTileCoord(String),

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),
}
