//! JSON report of a negotiated tileset.

use serde::Serialize;
use std::collections::BTreeMap;

use ogc_tiles::{TileDataType, TileSetInfo};
use tiles_common::TileCoord;

/// One level of the tiling grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelReport {
    pub matrix_id: String,
    pub resolution: f64,
    pub origin: [f64; 2],
    pub tile_size: [u32; 2],
    pub matrix_size: [u32; 2],
}

/// Summary of a negotiated tileset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSetReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub data_type: TileDataType,
    pub url_template: String,
    pub crs: String,
    pub axis_orientation: &'static str,
    pub extent: [f64; 4],
    pub levels: Vec<LevelReport>,

    /// Requested tiles keyed by `z/x/y`; `null` for tiles outside the grid
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tiles: BTreeMap<String, Option<String>>,
}

impl TileSetReport {
    /// Summarize `info`, resolving the URL of each tile in `tiles`.
    pub fn new(info: &TileSetInfo, tiles: &[TileCoord]) -> Self {
        let levels = info
            .grid
            .levels()
            .iter()
            .map(|level| LevelReport {
                matrix_id: level.matrix_id.clone(),
                resolution: level.resolution,
                origin: level.origin,
                tile_size: level.tile_size,
                matrix_size: level.matrix_size,
            })
            .collect();

        let tiles = tiles
            .iter()
            .map(|coord| (coord.to_string(), info.url_function.url(*coord)))
            .collect();

        Self {
            title: info.title.clone(),
            data_type: info.data_type,
            url_template: info.url_template.clone(),
            crs: info.projection.code().to_string(),
            axis_orientation: info.grid.axis_order().orientation(),
            extent: info.grid.extent().to_array(),
            levels,
            tiles,
        }
    }
}
