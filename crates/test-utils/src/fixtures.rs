//! Common test fixtures for OGC tiles tests.
//!
//! JSON documents are loaded from the testdata directories; the constants
//! describe the well-known tile matrix sets those documents use.

use serde_json::Value;

use crate::paths::find_test_file;

/// Load and parse a JSON fixture located with [`find_test_file`].
///
/// Panics with the fixture name when it is missing or malformed.
pub fn load_json_fixture(name: &str) -> Value {
    let path = find_test_file(name)
        .unwrap_or_else(|| panic!("Fixture '{}' not found. Set TEST_DATA_DIR?", name));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Invalid JSON in {:?}: {}", path, e))
}

/// Common bounding box definitions for testing, as `[min_x, min_y, max_x, max_y]`.
pub mod bbox {
    /// Whole world in degrees
    pub const GLOBAL: [f64; 4] = [-180.0, -90.0, 180.0, 90.0];

    /// Web Mercator square in meters
    pub const WEB_MERCATOR: [f64; 4] = [
        -20037508.342789244,
        -20037508.342789244,
        20037508.342789244,
        20037508.342789244,
    ];
}

/// Well-known tile matrix sets used by the fixtures.
pub mod tms {
    /// Cell size of WorldCRS84Quad level 0, in degrees
    pub const WORLD_CRS84_QUAD_CELL_SIZE: f64 = 0.703125;

    /// Scale denominator of WebMercatorQuad level 0
    pub const WEB_MERCATOR_QUAD_SCALE: f64 = 559082264.0287178;

    /// Resolution of WebMercatorQuad level 0, in meters
    pub const WEB_MERCATOR_QUAD_RESOLUTION: f64 = 156543.03392804097;
}

/// Fixture file names.
pub mod files {
    pub const TILESET_VECTOR_WORLD_CRS84_QUAD: &str = "tileset_vector_worldcrs84quad.json";
    pub const TMS_WORLD_CRS84_QUAD: &str = "tms_worldcrs84quad.json";
    pub const TILESET_MAP_WEB_MERCATOR_QUAD: &str = "tileset_map_webmercatorquad.json";
    pub const TMS_WEB_MERCATOR_QUAD: &str = "tms_webmercatorquad.json";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_fixture() {
        let tms = load_json_fixture(files::TMS_WORLD_CRS84_QUAD);
        assert_eq!(tms["id"], "WorldCRS84Quad");
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn test_load_missing_fixture() {
        load_json_fixture("missing.json");
    }

    #[test]
    fn test_web_mercator_resolution() {
        let res = tms::WEB_MERCATOR_QUAD_SCALE * 0.00028;
        assert!((res - tms::WEB_MERCATOR_QUAD_RESOLUTION).abs() < 1e-6);
    }
}
