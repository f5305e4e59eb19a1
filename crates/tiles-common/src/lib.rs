//! Common types and utilities shared across the OGC tiles client crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod tile;

pub use bbox::BoundingBox;
pub use crs::{AxisOrder, CrsIdentifier, Units};
pub use error::{TilesError, TilesResult};
pub use tile::TileCoord;
