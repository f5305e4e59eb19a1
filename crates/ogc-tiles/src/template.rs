//! Tile URL templates.
//!
//! Templates are kept as plain strings until a concrete tile is requested:
//! parsing them with `url::Url` would percent-encode the `{}` placeholders.

use tracing::{debug, warn};

use crate::error::{Result, TileError};
use crate::link::{resolve_link_with_fallback, Link};
use crate::media_types;

/// Placeholder for the tile matrix identifier.
pub const TILE_MATRIX: &str = "tileMatrix";
/// Placeholder for the tile row.
pub const TILE_ROW: &str = "tileRow";
/// Placeholder for the tile column.
pub const TILE_COL: &str = "tileCol";

/// Select the URL template for map (image) tiles.
///
/// Without a matching preferred type, the last item link with a well-known
/// image type wins, then the first item link with any `image/*` type.
pub fn get_map_tile_url_template(links: &[Link], media_type: Option<&str>) -> Result<String> {
    let resolved = resolve_link_with_fallback(links, media_type, None, |l| {
        media_types::KNOWN_MAP.contains(&l.media_type())
    });

    let link = match resolved {
        Ok(link) => link,
        Err(TileError::NotFound(_)) => links
            .iter()
            .filter(|l| l.is_item())
            .find(|l| l.media_type().starts_with("image/"))
            .ok_or_else(TileError::item_link_not_found)?,
        Err(e) => return Err(e),
    };

    debug!(media_type = link.media_type(), href = %link.href, "Map tile template");
    Ok(link.href.clone())
}

/// Select the URL template for vector tiles and scope it to `collections`.
pub fn get_vector_tile_url_template(
    links: &[Link],
    media_type: Option<&str>,
    supported_types: Option<&[String]>,
    collections: Option<&[String]>,
) -> Result<String> {
    let link = resolve_link_with_fallback(links, media_type, supported_types, |l| {
        media_types::KNOWN_VECTOR.contains(&l.media_type())
    })?;

    debug!(media_type = link.media_type(), href = %link.href, "Vector tile template");
    Ok(match collections {
        Some(collections) => append_collections_query_param(&link.href, collections),
        None => link.href.clone(),
    })
}

/// Add a `collections` query parameter to a multi-collection tiles URL.
///
/// Each identifier is percent-encoded on its own and the identifiers are
/// joined with literal commas, so `["foo,bar", "baz"]` becomes
/// `collections=foo%2Cbar,baz`. URLs already scoped to a single collection
/// (`/collections/<id>/...`) are returned unchanged, as is any URL when
/// `collections` is empty.
pub fn append_collections_query_param(url: &str, collections: &[String]) -> String {
    if collections.is_empty() {
        return url.to_string();
    }

    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let (path, query) = match base.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (base, None),
    };

    if is_single_collection_path(path) {
        warn!(url = url, "URL is scoped to a single collection, not adding collections");
        return url.to_string();
    }

    let value = collections
        .iter()
        .map(|id| urlencoding::encode(id))
        .collect::<Vec<_>>()
        .join(",");

    let collections_param = format!("collections={}", value);
    let mut params: Vec<&str> = query
        .into_iter()
        .flat_map(|q| q.split('&'))
        .filter(|p| !p.is_empty() && param_name(p) != "collections")
        .collect();
    params.push(&collections_param);

    let mut result = format!("{}?{}", path, params.join("&"));
    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }
    result
}

fn param_name(param: &str) -> &str {
    param.split_once('=').map_or(param, |(name, _)| name)
}

fn is_single_collection_path(path: &str) -> bool {
    path.split("/collections/")
        .skip(1)
        .any(|rest| matches!(rest.split_once('/'), Some((id, _)) if !id.is_empty()))
}

/// Replace `{name}` placeholders using `lookup`.
///
/// Placeholders `lookup` does not know are left as they are.
pub fn expand_template<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => result.push_str(&value),
                    None => {
                        result.push('{');
                        result.push_str(name);
                        result.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}
