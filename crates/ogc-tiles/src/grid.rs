//! Tiling grid built from a tile matrix set.
//!
//! Grid coordinates are always east/north with rows counted from the top of
//! the matrix, like XYZ tiles. Matrices whose `cornerOfOrigin` is
//! `bottomLeft` are mapped through [`TilingGrid::document_row`] when talking
//! to the server.

use tiles_common::{AxisOrder, BoundingBox, TileCoord};
use tracing::debug;

use crate::document::{CornerOfOrigin, TileMatrix, TileMatrixSet, TileMatrixSetLimits};
use crate::error::{Result, TileError};
use crate::projection::Projection;

/// Standard rendering pixel size in meters (0.28mm).
pub const STANDARD_PIXEL_SIZE: f64 = 0.00028;

/// One zoom level of a tiling grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLevel {
    /// Tile matrix identifier used for `{tileMatrix}`
    pub matrix_id: String,

    /// CRS units per pixel
    pub resolution: f64,

    /// Origin as (east, north)
    pub origin: [f64; 2],

    /// Tile size in pixels as (width, height)
    pub tile_size: [u32; 2],

    /// Matrix size in tiles as (columns, rows)
    pub matrix_size: [u32; 2],

    pub corner_of_origin: CornerOfOrigin,

    /// Published tile range, in document rows
    pub limits: Option<TileMatrixSetLimits>,
}

impl GridLevel {
    fn from_matrix(matrix: &TileMatrix, meters_per_unit: f64, axis_order: AxisOrder) -> Self {
        let resolution = matrix
            .cell_size
            .unwrap_or(matrix.scale_denominator * STANDARD_PIXEL_SIZE / meters_per_unit);

        let [a, b] = matrix.point_of_origin;
        let origin = if axis_order.is_east_north() { [a, b] } else { [b, a] };

        Self {
            matrix_id: matrix.id.clone(),
            resolution,
            origin,
            tile_size: [matrix.tile_width, matrix.tile_height],
            matrix_size: [matrix.matrix_width, matrix.matrix_height],
            corner_of_origin: matrix.corner_of_origin,
            limits: None,
        }
    }

    /// Ground span of one tile as (width, height).
    pub fn tile_span(&self) -> (f64, f64) {
        (
            self.resolution * self.tile_size[0] as f64,
            self.resolution * self.tile_size[1] as f64,
        )
    }

    /// Area covered by the column range `cols` and document row range `rows`.
    fn span(&self, cols: (i64, i64), rows: (i64, i64)) -> BoundingBox {
        let (span_x, span_y) = self.tile_span();
        let [ox, oy] = self.origin;

        let min_x = ox + cols.0 as f64 * span_x;
        let max_x = ox + (cols.1 + 1) as f64 * span_x;

        match self.corner_of_origin {
            CornerOfOrigin::TopLeft => BoundingBox::new(
                min_x,
                oy - (rows.1 + 1) as f64 * span_y,
                max_x,
                oy - rows.0 as f64 * span_y,
            ),
            CornerOfOrigin::BottomLeft => BoundingBox::new(
                min_x,
                oy + rows.0 as f64 * span_y,
                max_x,
                oy + (rows.1 + 1) as f64 * span_y,
            ),
        }
    }

    /// Area covered by the full matrix.
    pub fn matrix_extent(&self) -> BoundingBox {
        self.span(
            (0, self.matrix_size[0] as i64 - 1),
            (0, self.matrix_size[1] as i64 - 1),
        )
    }

    /// Area covered by the published tiles, if the level is limited.
    pub fn limits_extent(&self) -> Option<BoundingBox> {
        self.limits.as_ref().map(|l| {
            self.span(
                (l.min_tile_col, l.max_tile_col),
                (l.min_tile_row, l.max_tile_row),
            )
        })
    }

    /// Row as the server counts it.
    pub fn document_row(&self, row: i64) -> i64 {
        match self.corner_of_origin {
            CornerOfOrigin::TopLeft => row,
            CornerOfOrigin::BottomLeft => self.matrix_size[1] as i64 - 1 - row,
        }
    }

    /// Whether the grid cell (col, row) exists and is published.
    pub fn is_valid(&self, row: i64, col: i64) -> bool {
        if col < 0 || col >= self.matrix_size[0] as i64 {
            return false;
        }
        if row < 0 || row >= self.matrix_size[1] as i64 {
            return false;
        }
        match &self.limits {
            Some(limits) => limits.contains(self.document_row(row), col),
            None => true,
        }
    }

    /// Bounding box of the grid cell (col, row).
    pub fn tile_bbox(&self, col: i64, row: i64) -> BoundingBox {
        let doc_row = self.document_row(row);
        self.span((col, col), (doc_row, doc_row))
    }
}

/// The tiling grid of a tileset: levels plus overall extent.
#[derive(Debug, Clone, PartialEq)]
pub struct TilingGrid {
    levels: Vec<GridLevel>,
    extent: BoundingBox,
    axis_order: AxisOrder,
}

impl TilingGrid {
    pub fn levels(&self) -> &[GridLevel] {
        &self.levels
    }

    pub fn level(&self, z: u32) -> Option<&GridLevel> {
        self.levels.get(z as usize)
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Resolutions, coarsest first.
    pub fn resolutions(&self) -> Vec<f64> {
        self.levels.iter().map(|l| l.resolution).collect()
    }

    /// Extent as (min_x, min_y, max_x, max_y), east/north order.
    pub fn extent(&self) -> BoundingBox {
        self.extent
    }

    /// Axis order the tile matrix set was read with.
    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    pub fn origin(&self, z: u32) -> Option<[f64; 2]> {
        self.level(z).map(|l| l.origin)
    }

    pub fn tile_size(&self, z: u32) -> Option<[u32; 2]> {
        self.level(z).map(|l| l.tile_size)
    }

    pub fn matrix_size(&self, z: u32) -> Option<[u32; 2]> {
        self.level(z).map(|l| l.matrix_size)
    }

    pub fn matrix_id(&self, z: u32) -> Option<&str> {
        self.level(z).map(|l| l.matrix_id.as_str())
    }

    /// Whether the tile at zoom `z`, grid row and column exists.
    ///
    /// Each axis is checked independently; there is no wrapping.
    pub fn is_valid(&self, z: u32, row: i64, col: i64) -> bool {
        self.level(z).is_some_and(|l| l.is_valid(row, col))
    }

    /// Row as the server counts it at zoom `z`.
    pub fn document_row(&self, z: u32, row: i64) -> Option<i64> {
        self.level(z).map(|l| l.document_row(row))
    }

    /// Bounding box of a tile, `None` when the tile is not in the grid.
    pub fn tile_bbox(&self, coord: &TileCoord) -> Option<BoundingBox> {
        if !self.is_valid(coord.z, coord.y, coord.x) {
            return None;
        }
        self.level(coord.z).map(|l| l.tile_bbox(coord.x, coord.y))
    }
}

/// Interpret a tile matrix set as a tiling grid.
///
/// With `limits`, the grid's levels are the limited matrices in limit order
/// and the extent is clipped to the published tiles.
pub fn build_grid(
    tile_matrix_set: &TileMatrixSet,
    projection: &Projection,
    axis_order: AxisOrder,
    limits: Option<&[TileMatrixSetLimits]>,
) -> Result<TilingGrid> {
    if tile_matrix_set.tile_matrices.is_empty() {
        return Err(TileError::invalid_document(
            "tile matrix set has no tile matrices",
        ));
    }

    let meters_per_unit = projection.meters_per_unit();
    let level_for =
        |matrix: &TileMatrix| GridLevel::from_matrix(matrix, meters_per_unit, axis_order);

    let levels: Vec<GridLevel> = match limits {
        Some(limits) if !limits.is_empty() => limits
            .iter()
            .map(|limit| {
                let matrix = tile_matrix_set.get_matrix(&limit.tile_matrix).ok_or_else(|| {
                    TileError::invalid_document(format!(
                        "limits reference unknown tile matrix '{}'",
                        limit.tile_matrix
                    ))
                })?;
                let mut level = level_for(matrix);
                level.limits = Some(limit.clone());
                Ok(level)
            })
            .collect::<Result<_>>()?,
        _ => tile_matrix_set.tile_matrices.iter().map(level_for).collect(),
    };

    let mut extent = match &tile_matrix_set.bounding_box {
        Some(bbox) => {
            let extent = BoundingBox::from_corners(bbox.lower_left, bbox.upper_right)?;
            if axis_order.is_east_north() {
                extent
            } else {
                extent.swap_axes()
            }
        }
        None => tile_matrix_set
            .tile_matrices
            .iter()
            .map(|m| level_for(m).matrix_extent())
            .reduce(|a, b| a.union(&b))
            .ok_or_else(|| TileError::invalid_document("tile matrix set has no tile matrices"))?,
    };

    if let Some(published) = levels
        .iter()
        .filter_map(GridLevel::limits_extent)
        .reduce(|a, b| a.union(&b))
    {
        extent = extent.intersection(&published).ok_or_else(|| {
            TileError::invalid_document("tile matrix set limits lie outside the tile matrix set")
        })?;
    }

    debug!(
        levels = levels.len(),
        extent = ?extent.to_array(),
        axis_order = axis_order.orientation(),
        "Built tiling grid"
    );

    Ok(TilingGrid {
        levels,
        extent,
        axis_order,
    })
}
