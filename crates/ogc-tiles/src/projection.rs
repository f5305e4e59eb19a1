//! Projection registry and CRS resolution.
//!
//! The registry is an explicit object handed to the resolver rather than a
//! process-wide table. Registration is idempotent: registering a code that is
//! already known returns the existing handle.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tiles_common::{AxisOrder, BoundingBox, CrsIdentifier, Units};
use tracing::debug;

use crate::document::CrsDescriptor;
use crate::error::{Result, TileError};

/// Web Mercator half-width in meters.
const WEB_MERCATOR_EXTENT: f64 = 20037508.342789244;

/// A projection handle: code, units, natural axis order and validity extent.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    code: String,
    units: Units,
    axis_order: AxisOrder,
    extent: Option<BoundingBox>,
}

impl Projection {
    /// Create a projection with east/north axis order and no extent.
    pub fn new(code: impl Into<String>, units: Units) -> Self {
        Self {
            code: code.into(),
            units,
            axis_order: AxisOrder::XY,
            extent: None,
        }
    }

    pub fn with_axis_order(mut self, axis_order: AxisOrder) -> Self {
        self.axis_order = axis_order;
        self
    }

    pub fn with_extent(mut self, extent: BoundingBox) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Same definition registered under another code.
    fn alias(&self, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..self.clone()
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    pub fn extent(&self) -> Option<BoundingBox> {
        self.extent
    }

    pub fn meters_per_unit(&self) -> f64 {
        self.units.meters_per_unit()
    }
}

/// Registry of known projections keyed by code.
#[derive(Debug, Default)]
pub struct ProjectionRegistry {
    projections: RwLock<HashMap<String, Arc<Projection>>>,
}

impl ProjectionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the geographic and Web Mercator definitions
    /// used by the common tile matrix sets.
    pub fn with_defaults() -> Self {
        let registry = Self::new();

        let world = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
        let wgs84 = Projection::new("EPSG:4326", Units::Degrees)
            .with_axis_order(AxisOrder::LatLon)
            .with_extent(world);
        let crs84 = Projection::new("CRS:84", Units::Degrees).with_extent(world);
        let nad83 = Projection::new("EPSG:4269", Units::Degrees)
            .with_axis_order(AxisOrder::LatLon)
            .with_extent(world);
        let web_mercator = Projection::new("EPSG:3857", Units::Meters).with_extent(BoundingBox::new(
            -WEB_MERCATOR_EXTENT,
            -WEB_MERCATOR_EXTENT,
            WEB_MERCATOR_EXTENT,
            WEB_MERCATOR_EXTENT,
        ));

        for alias in ["EPSG:900913", "EPSG:102100", "EPSG:102113", "EPSG:3785"] {
            registry.register(web_mercator.alias(alias));
        }
        registry.register(web_mercator);
        registry.register(wgs84);
        registry.register(crs84);
        registry.register(nad83);

        registry
    }

    /// Look up a projection by its exact code.
    pub fn lookup(&self, code: &str) -> Option<Arc<Projection>> {
        self.projections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
    }

    /// Register a projection under its code.
    ///
    /// When the code is already registered the existing handle is returned
    /// and `projection` is dropped.
    pub fn register(&self, projection: Projection) -> Arc<Projection> {
        let mut projections = self
            .projections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        projections
            .entry(projection.code.clone())
            .or_insert_with(|| Arc::new(projection))
            .clone()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.projections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve a CRS descriptor to a projection handle.
///
/// Objects without a `uri` (embedded WKT and the like) are rejected with the
/// descriptor echoed verbatim in the error.
pub fn resolve_projection(
    registry: &ProjectionRegistry,
    crs: &CrsDescriptor,
) -> Result<Arc<Projection>> {
    match crs.uri() {
        Some(uri) => resolve_projection_uri(registry, uri)
            .ok_or_else(|| TileError::UnsupportedCrs(crs.to_json())),
        None => Err(TileError::UnsupportedCrs(crs.to_json())),
    }
}

/// Resolve a CRS URI (or short code) to a projection handle.
///
/// The returned projection's code is the string exactly as given. Unknown
/// strings are registered as aliases of the matching canonical definition.
pub fn resolve_projection_uri(registry: &ProjectionRegistry, uri: &str) -> Option<Arc<Projection>> {
    if let Some(projection) = registry.lookup(uri) {
        return Some(projection);
    }

    let identifier = CrsIdentifier::parse(uri).ok()?;
    let canonical = registry.lookup(&identifier.canonical())?;
    debug!(uri = uri, canonical = %identifier, "Registering CRS alias");
    Some(registry.register(canonical.alias(uri)))
}

/// Pick the axis order for a tile matrix set.
///
/// Priority: caller override, then the document's `orderedAxes`, then the
/// projection's own axis order.
pub fn resolve_axis_order(
    projection: &Projection,
    ordered_axes: Option<&[String]>,
    axis_override: Option<&[String]>,
) -> AxisOrder {
    axis_override
        .and_then(|axes| AxisOrder::from_ordered_axes(axes))
        .or_else(|| ordered_axes.and_then(|axes| AxisOrder::from_ordered_axes(axes)))
        .unwrap_or_else(|| projection.axis_order())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(value: serde_json::Value) -> CrsDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_resolve_uri_keeps_code() {
        let registry = ProjectionRegistry::with_defaults();
        let uri = "http://www.opengis.net/def/crs/EPSG/0/3857";
        let projection = resolve_projection(&registry, &descriptor(json!(uri))).unwrap();
        assert_eq!(projection.code(), uri);
        assert_eq!(projection.units(), Units::Meters);
        assert!(registry.contains(uri));
    }

    #[test]
    fn test_resolve_uri_object() {
        let registry = ProjectionRegistry::with_defaults();
        let projection = resolve_projection(
            &registry,
            &descriptor(json!({"uri": "http://www.opengis.net/def/crs/OGC/1.3/CRS84"})),
        )
        .unwrap();
        assert_eq!(projection.units(), Units::Degrees);
        assert_eq!(projection.axis_order(), AxisOrder::XY);
    }

    #[test]
    fn test_resolve_epsg_4326_is_lat_lon() {
        let registry = ProjectionRegistry::with_defaults();
        let projection =
            resolve_projection(&registry, &"urn:ogc:def:crs:EPSG::4326".into()).unwrap();
        assert_eq!(projection.axis_order(), AxisOrder::LatLon);
    }

    #[test]
    fn test_resolve_wkt_is_unsupported() {
        let registry = ProjectionRegistry::with_defaults();
        let err = resolve_projection(&registry, &descriptor(json!({"wkt": {"supported": false}})))
            .unwrap_err();
        assert_eq!(err.to_string(), r#"Unsupported CRS: {"wkt":{"supported":false}}"#);
    }

    #[test]
    fn test_unsupported_crs_echoes_descriptor_key_order() {
        let registry = ProjectionRegistry::with_defaults();
        let text = r#"{"wkt":{"type":"GeographicCRS","name":"x","datum":{"id":6326}},"name":"custom"}"#;
        let crs: CrsDescriptor = serde_json::from_str(text).unwrap();
        let err = resolve_projection(&registry, &crs).unwrap_err();
        assert_eq!(err.to_string(), format!("Unsupported CRS: {}", text));
    }

    #[test]
    fn test_resolve_unknown_code_is_unsupported() {
        let registry = ProjectionRegistry::with_defaults();
        let err = resolve_projection(
            &registry,
            &"http://www.opengis.net/def/crs/EPSG/0/27700".into(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Unsupported CRS: "http://www.opengis.net/def/crs/EPSG/0/27700""#
        );
    }

    #[test]
    fn test_custom_registration() {
        let registry = ProjectionRegistry::with_defaults();
        registry.register(Projection::new("EPSG:27700", Units::Meters));
        let projection = resolve_projection(
            &registry,
            &"http://www.opengis.net/def/crs/EPSG/0/27700".into(),
        )
        .unwrap();
        assert_eq!(projection.code(), "http://www.opengis.net/def/crs/EPSG/0/27700");
    }

    #[test]
    fn test_register_is_idempotent() {
        let registry = ProjectionRegistry::new();
        let first = registry.register(Projection::new("EPSG:3857", Units::Meters));
        let second = registry.register(Projection::new("EPSG:3857", Units::Feet));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.units(), Units::Meters);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(ProjectionRegistry::with_defaults());
        let uri = "http://www.opengis.net/def/crs/EPSG/0/3857";

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || resolve_projection_uri(&registry, uri).unwrap())
            })
            .collect();

        let resolved: Vec<Arc<Projection>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(resolved.iter().all(|p| Arc::ptr_eq(p, &resolved[0])));
    }

    #[test]
    fn test_axis_order_priority() {
        let projection = Projection::new("EPSG:4326", Units::Degrees).with_axis_order(AxisOrder::LatLon);
        let lon_lat = vec!["Lon".to_string(), "Lat".to_string()];
        let lat_lon = vec!["Lat".to_string(), "Lon".to_string()];

        assert_eq!(resolve_axis_order(&projection, None, None), AxisOrder::LatLon);
        assert_eq!(
            resolve_axis_order(&projection, Some(lon_lat.as_slice()), None),
            AxisOrder::XY
        );
        assert_eq!(
            resolve_axis_order(&projection, Some(lon_lat.as_slice()), Some(lat_lon.as_slice())),
            AxisOrder::LatLon
        );
    }
}
