//! Coordinate Reference System identifiers, units and axis order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TilesError, TilesResult};

/// Meters per degree on the sphere used by web map clients.
const METERS_PER_DEGREE: f64 = 2.0 * std::f64::consts::PI * 6_370_997.0 / 360.0;

/// Units of a coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Units {
    Degrees,
    Meters,
    Feet,
    UsFeet,
}

impl Units {
    /// Conversion factor from one unit to meters.
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            Units::Degrees => METERS_PER_DEGREE,
            Units::Meters => 1.0,
            Units::Feet => 0.3048,
            Units::UsFeet => 1200.0 / 3937.0,
        }
    }
}

/// Axis order for coordinate interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisOrder {
    /// X (longitude/easting), Y (latitude/northing)
    XY,
    /// Y (latitude/northing), X (longitude/easting)
    LatLon,
}

impl AxisOrder {
    /// Derive the axis order from an `orderedAxes` list such as `["Lat", "Lon"]`.
    ///
    /// Only the first two axes are considered. Returns `None` when they do not
    /// describe one east-like and one north-like axis.
    pub fn from_ordered_axes<S: AsRef<str>>(axes: &[S]) -> Option<Self> {
        if axes.len() < 2 {
            return None;
        }
        match (axis_direction(axes[0].as_ref())?, axis_direction(axes[1].as_ref())?) {
            ('e', 'n') => Some(AxisOrder::XY),
            ('n', 'e') => Some(AxisOrder::LatLon),
            _ => None,
        }
    }

    /// Parse an axis orientation string such as `enu` or `neu`.
    pub fn from_orientation(orientation: &str) -> Option<Self> {
        let lower = orientation.to_ascii_lowercase();
        if lower.starts_with("en") {
            Some(AxisOrder::XY)
        } else if lower.starts_with("ne") {
            Some(AxisOrder::LatLon)
        } else {
            None
        }
    }

    /// The orientation string (`enu` / `neu`).
    pub fn orientation(&self) -> &'static str {
        match self {
            AxisOrder::XY => "enu",
            AxisOrder::LatLon => "neu",
        }
    }

    /// Whether the first axis is the east/x axis.
    pub fn is_east_north(&self) -> bool {
        matches!(self, AxisOrder::XY)
    }
}

fn axis_direction(name: &str) -> Option<char> {
    let lower = name.trim().to_ascii_lowercase();
    if lower.starts_with("lon") || lower.starts_with('e') || lower.starts_with('x') {
        Some('e')
    } else if lower.starts_with("lat") || lower.starts_with('n') || lower.starts_with('y') {
        Some('n')
    } else {
        None
    }
}

/// A parsed CRS identifier: authority, optional version, and code.
///
/// Accepts the encodings found in OGC API documents:
/// - `http://www.opengis.net/def/crs/EPSG/0/3857`
/// - `urn:ogc:def:crs:EPSG::4326`
/// - `EPSG:4326`, `CRS:84`
/// - `[EPSG:4326]` (safe CURIE)
/// - `http://www.opengis.net/gml/srs/epsg.xml#4326`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrsIdentifier {
    pub authority: String,
    pub version: Option<String>,
    pub code: String,
}

impl CrsIdentifier {
    pub fn new(authority: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            authority: authority.into().to_ascii_uppercase(),
            version: None,
            code: code.into().to_ascii_uppercase(),
        }
    }

    /// Parse any of the supported CRS encodings.
    pub fn parse(s: &str) -> TilesResult<Self> {
        let trimmed = s.trim();
        let invalid = || TilesError::InvalidCrs(s.to_string());

        if let Some(rest) = trimmed
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
        {
            return Self::parse(rest);
        }

        let lower = trimmed.to_ascii_lowercase();

        if let Some(idx) = lower.find("/gml/srs/epsg.xml#") {
            let code = &trimmed[idx + "/gml/srs/epsg.xml#".len()..];
            return non_empty(code)
                .map(|c| Self::new("EPSG", c))
                .ok_or_else(invalid);
        }

        if let Some(idx) = lower.find("/def/crs/") {
            let path = &trimmed[idx + "/def/crs/".len()..];
            let parts: Vec<&str> = path.trim_end_matches('/').split('/').collect();
            if parts.len() != 3 {
                return Err(invalid());
            }
            let authority = non_empty(parts[0]).ok_or_else(invalid)?;
            let code = non_empty(parts[2]).ok_or_else(invalid)?;
            let mut id = Self::new(authority, code);
            id.version = non_empty(parts[1]).map(str::to_string);
            return Ok(id);
        }

        if lower.starts_with("urn:ogc:def:crs:") {
            let parts: Vec<&str> = trimmed["urn:ogc:def:crs:".len()..].split(':').collect();
            let (authority, version, code) = match parts.as_slice() {
                [authority, version, code] => (*authority, non_empty(version), *code),
                [authority, code] => (*authority, None, *code),
                _ => return Err(invalid()),
            };
            let mut id = Self::new(
                non_empty(authority).ok_or_else(invalid)?,
                non_empty(code).ok_or_else(invalid)?,
            );
            id.version = version.map(str::to_string);
            return Ok(id);
        }

        match trimmed.split_once(':') {
            Some((authority, code)) if !authority.contains('/') && !code.contains('/') => Ok(Self::new(
                non_empty(authority).ok_or_else(invalid)?,
                non_empty(code).ok_or_else(invalid)?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Short `AUTHORITY:CODE` form used as the registry key.
    ///
    /// `OGC:CRS84` is folded into the conventional `CRS:84`.
    pub fn canonical(&self) -> String {
        if self.authority == "OGC" && self.code == "CRS84" {
            return "CRS:84".to_string();
        }
        format!("{}:{}", self.authority, self.code)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl fmt::Display for CrsIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}
