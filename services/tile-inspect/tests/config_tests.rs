//! Tests for loading inspection configs from YAML.

use std::io::Write;

use tempfile::NamedTempFile;
use tile_inspect::{load_inspect_config, InspectConfig};

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
media_type: application/vnd.mapbox-vector-tile
supported_media_types:
  - application/geo+json
collections:
  - roads
  - "rivers,lakes"
projection: http://www.opengis.net/def/crs/EPSG/0/3857
ordered_axes: [E, N]
context:
  datetime: "2024-01-15"
timeout_secs: 10
"#,
    );

    let config = load_inspect_config(file.path()).unwrap();
    assert_eq!(config.media_type.as_deref(), Some("application/vnd.mapbox-vector-tile"));
    assert_eq!(config.collections, vec!["roads", "rivers,lakes"]);
    assert_eq!(config.ordered_axes, vec!["E", "N"]);
    assert_eq!(config.context["datetime"], "2024-01-15");
    assert_eq!(config.timeout_secs, Some(10));

    let source = config.source_info("https://example.com/tiles");
    assert_eq!(
        source.collections,
        Some(vec!["roads".to_string(), "rivers,lakes".to_string()])
    );
}

#[test]
fn test_load_empty_config() {
    let file = write_config("{}\n");
    let config = load_inspect_config(file.path()).unwrap();
    assert_eq!(config, InspectConfig::default());
}

#[test]
fn test_unknown_field_rejected() {
    let file = write_config("media_types: image/png\n");
    let err = load_inspect_config(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse inspect config"));
}

#[test]
fn test_missing_file() {
    let dir = test_utils::temp_test_dir();
    let err = load_inspect_config(dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read inspect config"));
}
