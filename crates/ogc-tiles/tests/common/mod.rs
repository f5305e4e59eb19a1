//! Common test utilities for ogc-tiles tests
//!
//! Provides an in-memory `HttpTransport` serving canned JSON documents and
//! recording the URLs it was asked for.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ogc_tiles::{HttpTransport, TransportError};
use serde_json::Value;
use url::Url;

/// URL of the vector tileset fixture.
pub const VECTOR_TILESET_URL: &str = "http://localhost:8080/ogcapi/collections/NaturalEarth:cultural:ne_10m_admin_0_countries/tiles/WorldCRS84Quad?f=json";
/// URL the vector tileset's tiling-scheme link resolves to.
pub const WORLD_CRS84_QUAD_URL: &str = "http://localhost:8080/ogcapi/tileMatrixSets/WorldCRS84Quad?f=json";
/// URL of the map tileset fixture.
pub const MAP_TILESET_URL: &str = "https://maps.example.com/ogcapi/map/tiles/WebMercatorQuad?f=json";
/// URL the map tileset's tiling-scheme link points to.
pub const WEB_MERCATOR_QUAD_URL: &str = "https://maps.example.com/ogcapi/tileMatrixSets/WebMercatorQuad";

fn normalize(url: &str) -> String {
    Url::parse(url).map(String::from).unwrap_or_else(|_| url.to_string())
}

/// Serves JSON documents from memory.
#[derive(Default)]
pub struct MockTransport {
    documents: HashMap<String, Value>,
    statuses: HashMap<String, u16>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` at `url`.
    pub fn with_document(mut self, url: &str, document: Value) -> Self {
        self.documents.insert(normalize(url), document);
        self
    }

    /// Answer requests for `url` with an HTTP error status.
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(normalize(url), status);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get_json(&self, url: &Url) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());

        if let Some(status) = self.statuses.get(url.as_str()) {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: *status,
            });
        }

        self.documents
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Transport serving the vector tileset fixture and its tile matrix set.
pub fn vector_fixture_transport() -> MockTransport {
    MockTransport::new()
        .with_document(
            VECTOR_TILESET_URL,
            test_utils::load_json_fixture(test_utils::files::TILESET_VECTOR_WORLD_CRS84_QUAD),
        )
        .with_document(
            WORLD_CRS84_QUAD_URL,
            test_utils::load_json_fixture(test_utils::files::TMS_WORLD_CRS84_QUAD),
        )
}

/// Transport serving the map tileset fixture and its tile matrix set.
pub fn map_fixture_transport() -> MockTransport {
    MockTransport::new()
        .with_document(
            MAP_TILESET_URL,
            test_utils::load_json_fixture(test_utils::files::TILESET_MAP_WEB_MERCATOR_QUAD),
        )
        .with_document(
            WEB_MERCATOR_QUAD_URL,
            test_utils::load_json_fixture(test_utils::files::TMS_WEB_MERCATOR_QUAD),
        )
}
