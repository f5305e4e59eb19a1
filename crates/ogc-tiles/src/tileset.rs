//! Tileset negotiation: from a tileset URL to a tiling grid and tile URLs.

use std::collections::HashMap;
use std::sync::Arc;

use tiles_common::TileCoord;
use tracing::{debug, info, instrument};
use url::Url;

use crate::document::{CrsDescriptor, TileDataType, TileMatrixSet, TileSetDocument};
use crate::error::{Result, TileError};
use crate::grid::{build_grid, TilingGrid};
use crate::link::find_rel;
use crate::projection::{
    resolve_axis_order, resolve_projection, resolve_projection_uri, Projection,
    ProjectionRegistry,
};
use crate::rel;
use crate::template::{
    expand_template, get_map_tile_url_template, get_vector_tile_url_template, TILE_COL,
    TILE_MATRIX, TILE_ROW,
};
use crate::transport::HttpTransport;

/// Caller-supplied description of a tileset to negotiate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceInfo {
    /// URL of the tileset document
    pub url: String,

    /// CRS code overriding the tile matrix set's own CRS
    pub projection: Option<String>,

    /// Preferred tile media type
    pub media_type: Option<String>,

    /// Acceptable tile media types, most preferred first
    pub supported_media_types: Option<Vec<String>>,

    /// Collections to request from a multi-collection vector tileset
    pub collections: Option<Vec<String>>,

    /// Axis order override, e.g. `["Lat", "Lon"]`
    pub ordered_axes: Option<Vec<String>>,

    /// Extra template variables
    pub context: HashMap<String, String>,
}

impl SourceInfo {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = Some(projection.into());
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_supported_media_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_media_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = Some(collections.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_ordered_axes<I, S>(mut self, axes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ordered_axes = Some(axes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Maps tile coordinates to absolute tile URLs.
///
/// Pure and cheap to clone; the grid is shared.
#[derive(Debug, Clone)]
pub struct TileUrlFunction {
    template: String,
    base: Url,
    grid: Arc<TilingGrid>,
    context: HashMap<String, String>,
}

impl TileUrlFunction {
    /// URL of the tile at `coord`, where `x` is the column and `y` the row
    /// counted from the top. `None` when the tile is outside the grid.
    pub fn url(&self, coord: TileCoord) -> Option<String> {
        if !self.grid.is_valid(coord.z, coord.y, coord.x) {
            return None;
        }
        let level = self.grid.level(coord.z)?;
        let row = level.document_row(coord.y);

        let expanded = expand_template(&self.template, |name| match name {
            TILE_MATRIX => Some(level.matrix_id.clone()),
            TILE_ROW => Some(row.to_string()),
            TILE_COL => Some(coord.x.to_string()),
            other => self.context.get(other).cloned(),
        });

        self.base.join(&expanded).ok().map(String::from)
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

/// Result of negotiating a tileset.
#[derive(Debug, Clone)]
pub struct TileSetInfo {
    /// Selected template, as written in the tileset document
    pub url_template: String,
    pub url_function: TileUrlFunction,
    pub projection: Arc<Projection>,
    pub grid: Arc<TilingGrid>,
    pub data_type: TileDataType,
    pub title: Option<String>,
}

/// Negotiates tilesets over a transport, sharing one projection registry.
pub struct TileInfoClient<T> {
    transport: T,
    registry: Arc<ProjectionRegistry>,
}

impl<T: HttpTransport> TileInfoClient<T> {
    /// Client with the default projection registry.
    pub fn new(transport: T) -> Self {
        Self::with_registry(transport, Arc::new(ProjectionRegistry::with_defaults()))
    }

    pub fn with_registry(transport: T, registry: Arc<ProjectionRegistry>) -> Self {
        Self {
            transport,
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<ProjectionRegistry> {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get_tile_set_info(&self, source: &SourceInfo) -> Result<TileSetInfo> {
        get_tile_set_info(&self.transport, &self.registry, source).await
    }
}

/// Fetch a tileset document and everything needed to request its tiles.
///
/// The tile matrix set, when not inlined, is fetched after the tileset
/// document. Transport errors are returned unchanged.
#[instrument(skip(transport, registry, source), fields(url = %source.url))]
pub async fn get_tile_set_info<T>(
    transport: &T,
    registry: &ProjectionRegistry,
    source: &SourceInfo,
) -> Result<TileSetInfo>
where
    T: HttpTransport + ?Sized,
{
    let base = parse_url(&source.url)?;

    let value = transport.get_json(&base).await?;
    let data_type_name = value
        .get("dataType")
        .map(|v| v.to_string())
        .unwrap_or_else(|| "nothing".to_string());
    let mut document = TileSetDocument::from_json(value)?;

    let url_template = match document.data_type {
        TileDataType::Map => {
            get_map_tile_url_template(&document.links, source.media_type.as_deref())?
        }
        TileDataType::Vector => get_vector_tile_url_template(
            &document.links,
            source.media_type.as_deref(),
            source.supported_media_types.as_deref(),
            source.collections.as_deref(),
        )?,
        TileDataType::Unsupported => return Err(TileError::UnsupportedDataType(data_type_name)),
    };

    let tile_matrix_set = match document.tile_matrix_set.take() {
        Some(tms) => {
            debug!("Using inline tile matrix set");
            tms
        }
        None => {
            let link = find_rel(&document.links, rel::TILING_SCHEME)
                .ok_or(TileError::MissingTilingScheme)?;
            let tms_url = join_url(&base, &link.href)?;
            debug!(tms_url = %tms_url, "Fetching tile matrix set");
            TileMatrixSet::from_json(transport.get_json(&tms_url).await?)?
        }
    };

    let projection = match &source.projection {
        Some(code) => resolve_projection_uri(registry, code).ok_or_else(|| {
            TileError::UnsupportedCrs(CrsDescriptor::from(code.as_str()).to_json())
        })?,
        None => {
            let crs = tile_matrix_set
                .crs
                .as_ref()
                .or(document.crs.as_ref())
                .ok_or_else(|| TileError::invalid_document("tile matrix set has no crs"))?;
            resolve_projection(registry, crs)?
        }
    };

    let axis_order = resolve_axis_order(
        &projection,
        tile_matrix_set.ordered_axes.as_deref(),
        source.ordered_axes.as_deref(),
    );
    debug!(
        crs = projection.code(),
        axis_order = axis_order.orientation(),
        "Resolved projection"
    );

    let grid = Arc::new(build_grid(
        &tile_matrix_set,
        &projection,
        axis_order,
        document.tile_matrix_set_limits.as_deref(),
    )?);

    // Fails early on templates that cannot be resolved against the source.
    join_url(&base, &url_template)?;

    info!(
        data_type = ?document.data_type,
        template = %url_template,
        crs = projection.code(),
        levels = grid.num_levels(),
        "Resolved tileset"
    );

    let url_function = TileUrlFunction {
        template: url_template.clone(),
        base,
        grid: Arc::clone(&grid),
        context: source.context.clone(),
    };

    Ok(TileSetInfo {
        url_template,
        url_function,
        projection,
        grid,
        data_type: document.data_type,
        title: document.title,
    })
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| TileError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn join_url(base: &Url, href: &str) -> Result<Url> {
    base.join(href).map_err(|e| TileError::InvalidUrl {
        url: href.to_string(),
        message: e.to_string(),
    })
}
