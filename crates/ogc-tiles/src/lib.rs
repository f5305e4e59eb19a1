//! OGC API - Tiles client negotiation
//!
//! Given the URL of a tileset document, this crate works out everything a
//! renderer needs to request tiles from it:
//!
//! - which tile encoding to use (media-type negotiation over `item` links),
//! - the projection of the tile matrix set,
//! - the tiling grid (resolutions, origins, tile sizes, extent),
//! - a function mapping tile coordinates to absolute tile URLs.
//!
//! # Example
//!
//! ```rust,no_run
//! use ogc_tiles::{ReqwestTransport, SourceInfo, TileInfoClient, TransportConfig};
//! use tiles_common::TileCoord;
//!
//! # async fn run() -> ogc_tiles::Result<()> {
//! let transport = ReqwestTransport::new(&TransportConfig::default())?;
//! let client = TileInfoClient::new(transport);
//!
//! let source = SourceInfo::new(
//!     "https://maps.example.com/ogcapi/collections/roads/tiles/WorldCRS84Quad?f=json",
//! )
//! .with_media_type("application/vnd.mapbox-vector-tile");
//!
//! let info = client.get_tile_set_info(&source).await?;
//! println!("{:?}", info.url_function.url(TileCoord::new(0, 0, 0)));
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod grid;
pub mod link;
pub mod projection;
pub mod template;
pub mod tileset;
pub mod transport;

// Re-export commonly used types
pub use document::{
    CornerOfOrigin, CrsDescriptor, TileDataType, TileMatrix, TileMatrixSet, TileMatrixSetLimits,
    TileSetDocument,
};
pub use error::{Result, TileError};
pub use grid::{build_grid, GridLevel, TilingGrid};
pub use link::{resolve_link, resolve_link_with_fallback, Link};
pub use projection::{
    resolve_axis_order, resolve_projection, resolve_projection_uri, Projection, ProjectionRegistry,
};
pub use template::{
    append_collections_query_param, get_map_tile_url_template, get_vector_tile_url_template,
};
pub use tileset::{get_tile_set_info, SourceInfo, TileInfoClient, TileSetInfo, TileUrlFunction};
pub use transport::{HttpTransport, ReqwestTransport, TransportConfig, TransportError};

/// Link relation types
pub mod rel {
    /// A tile (or tile template) of the tileset
    pub const ITEM: &str = "item";
    /// The document itself
    pub const SELF: &str = "self";
    /// The tile matrix set the tileset is based on
    pub const TILING_SCHEME: &str = "http://www.opengis.net/def/rel/ogc/1.0/tiling-scheme";
}

/// Media types of tile encodings
pub mod media_types {
    /// Mapbox vector tiles
    pub const MVT: &str = "application/vnd.mapbox-vector-tile";
    /// GeoJSON media type
    pub const GEO_JSON: &str = "application/geo+json";
    /// JSON media type
    pub const JSON: &str = "application/json";
    /// PNG image tiles
    pub const PNG: &str = "image/png";
    /// JPEG image tiles
    pub const JPEG: &str = "image/jpeg";
    /// GIF image tiles
    pub const GIF: &str = "image/gif";
    /// WebP image tiles
    pub const WEBP: &str = "image/webp";

    /// Image types accepted as map tile fallbacks
    pub const KNOWN_MAP: &[&str] = &[PNG, JPEG, GIF, WEBP];
    /// Types accepted as vector tile fallbacks
    pub const KNOWN_VECTOR: &[&str] = &[MVT, GEO_JSON];
}
