//! OGC API - Tiles document models.
//!
//! Only the members the client acts on are modelled; everything else in the
//! documents is ignored during deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TileError};
use crate::link::Link;

/// Kind of tiles a tileset publishes, decided once when the document is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileDataType {
    /// Rendered map tiles (images)
    Map,
    /// Vector tiles (MVT, GeoJSON)
    Vector,
    /// Anything else, e.g. `coverage`
    #[serde(other)]
    Unsupported,
}

/// A CRS as it appears in a tile matrix set or tileset.
///
/// Either a URI string, an object carrying a `uri`, or some other object
/// (typically an embedded `wkt` definition) that is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CrsDescriptor {
    Uri(String),
    Reference { uri: String },
    Other(Value),
}

impl CrsDescriptor {
    /// The URI form, if the descriptor has one.
    pub fn uri(&self) -> Option<&str> {
        match self {
            CrsDescriptor::Uri(uri) | CrsDescriptor::Reference { uri } => Some(uri),
            CrsDescriptor::Other(_) => None,
        }
    }

    /// The descriptor serialized back to compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<&str> for CrsDescriptor {
    fn from(uri: &str) -> Self {
        CrsDescriptor::Uri(uri.to_string())
    }
}

/// Corner of the matrix from which rows are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CornerOfOrigin {
    #[default]
    TopLeft,
    BottomLeft,
}

/// A single tile matrix (zoom level) definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrix {
    /// Identifier used in tile URLs (`{tileMatrix}`)
    pub id: String,

    /// Scale denominator
    pub scale_denominator: f64,

    /// Cell size in CRS units, when published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<f64>,

    /// Corner the rows are counted from
    #[serde(default)]
    pub corner_of_origin: CornerOfOrigin,

    /// Origin coordinates, in CRS axis order
    pub point_of_origin: [f64; 2],

    /// Tile width in pixels
    pub tile_width: u32,

    /// Tile height in pixels
    pub tile_height: u32,

    /// Number of tile columns
    pub matrix_width: u32,

    /// Number of tile rows
    pub matrix_height: u32,
}

/// Explicit bounding box of a tile matrix set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrixSetBoundingBox {
    pub lower_left: [f64; 2],
    pub upper_right: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<CrsDescriptor>,
}

/// A tile matrix set definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrixSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<CrsDescriptor>,

    /// Axis names in CRS order, e.g. `["Lat", "Lon"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_axes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<TileMatrixSetBoundingBox>,

    /// Individual tile matrices (zoom levels), coarsest first
    pub tile_matrices: Vec<TileMatrix>,
}

impl TileMatrixSet {
    /// Parse a fetched tile matrix set document.
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| TileError::invalid_document(format!("tile matrix set: {}", e)))
    }

    /// Get a tile matrix by identifier.
    pub fn get_matrix(&self, id: &str) -> Option<&TileMatrix> {
        self.tile_matrices.iter().find(|m| m.id == id)
    }
}

/// Range of tiles a tileset actually publishes at one tile matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrixSetLimits {
    pub tile_matrix: String,
    pub min_tile_row: i64,
    pub max_tile_row: i64,
    pub min_tile_col: i64,
    pub max_tile_col: i64,
}

impl TileMatrixSetLimits {
    /// Whether a document row/column pair lies inside the limits.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= self.min_tile_row
            && row <= self.max_tile_row
            && col >= self.min_tile_col
            && col <= self.max_tile_col
    }
}

/// A tileset description (collection-scoped or dataset-wide).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSetDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub data_type: TileDataType,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<CrsDescriptor>,

    #[serde(
        rename = "tileMatrixSetURI",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tile_matrix_set_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_matrix_set_limits: Option<Vec<TileMatrixSetLimits>>,

    /// Inline tile matrix set, used instead of following the tiling-scheme link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_matrix_set: Option<TileMatrixSet>,
}

impl TileSetDocument {
    /// Parse a fetched tileset document.
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| TileError::invalid_document(format!("tileset: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_type() {
        let doc = TileSetDocument::from_json(json!({"dataType": "vector", "links": []})).unwrap();
        assert_eq!(doc.data_type, TileDataType::Vector);

        let doc = TileSetDocument::from_json(json!({"dataType": "map"})).unwrap();
        assert_eq!(doc.data_type, TileDataType::Map);
        assert!(doc.links.is_empty());

        let doc = TileSetDocument::from_json(json!({"dataType": "coverage"})).unwrap();
        assert_eq!(doc.data_type, TileDataType::Unsupported);
    }

    #[test]
    fn test_missing_data_type_is_invalid() {
        let err = TileSetDocument::from_json(json!({"links": []})).unwrap_err();
        assert!(matches!(err, TileError::InvalidDocument(_)));
    }

    #[test]
    fn test_crs_descriptor_forms() {
        let crs: CrsDescriptor =
            serde_json::from_value(json!("http://www.opengis.net/def/crs/EPSG/0/3857")).unwrap();
        assert_eq!(crs.uri(), Some("http://www.opengis.net/def/crs/EPSG/0/3857"));

        let crs: CrsDescriptor =
            serde_json::from_value(json!({"uri": "http://www.opengis.net/def/crs/OGC/1.3/CRS84"}))
                .unwrap();
        assert_eq!(crs.uri(), Some("http://www.opengis.net/def/crs/OGC/1.3/CRS84"));

        let crs: CrsDescriptor =
            serde_json::from_value(json!({"wkt": {"supported": false}})).unwrap();
        assert_eq!(crs.uri(), None);
        assert_eq!(crs.to_json(), r#"{"wkt":{"supported":false}}"#);
    }

    #[test]
    fn test_tile_matrix_defaults() {
        let tms = TileMatrixSet::from_json(json!({
            "crs": "http://www.opengis.net/def/crs/EPSG/0/3857",
            "tileMatrices": [{
                "id": "0",
                "scaleDenominator": 559082264.0287178,
                "pointOfOrigin": [-20037508.3427892, 20037508.3427892],
                "tileWidth": 256,
                "tileHeight": 256,
                "matrixWidth": 1,
                "matrixHeight": 1
            }]
        }))
        .unwrap();

        let matrix = tms.get_matrix("0").unwrap();
        assert_eq!(matrix.corner_of_origin, CornerOfOrigin::TopLeft);
        assert_eq!(matrix.cell_size, None);
        assert!(tms.get_matrix("1").is_none());
    }

    #[test]
    fn test_limits_contains() {
        let limits = TileMatrixSetLimits {
            tile_matrix: "2".to_string(),
            min_tile_row: 1,
            max_tile_row: 2,
            min_tile_col: 0,
            max_tile_col: 3,
        };
        assert!(limits.contains(1, 0));
        assert!(limits.contains(2, 3));
        assert!(!limits.contains(0, 0));
        assert!(!limits.contains(1, 4));
    }
}
