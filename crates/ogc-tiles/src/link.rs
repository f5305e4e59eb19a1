//! Links and media-type selection.
//!
//! A tileset lists one `item` link per available tile encoding. Selection
//! runs through three rules in order:
//!
//! 1. the caller's preferred media type (exact match),
//! 2. the caller's ordered list of supported media types, earliest entry wins,
//! 3. the last `item` link in document order that qualifies as a fallback.
//!
//! Rule 2 only applies when rule 1 is not requested or finds nothing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TileError};
use crate::rel;

/// A hyperlink to a related resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// The URI (or URI template) of the linked resource.
    pub href: String,

    /// The relationship type (e.g., "self", "item").
    pub rel: String,

    /// The media type of the linked resource.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// A human-readable title for the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Whether the link is a URI template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
}

impl Link {
    /// Create a new link with required fields.
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            type_: None,
            title: None,
            templated: None,
        }
    }

    /// Set the media type.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// The media type, or an empty string when the link has none.
    pub fn media_type(&self) -> &str {
        self.type_.as_deref().unwrap_or("")
    }

    /// Whether this is an `item` link.
    pub fn is_item(&self) -> bool {
        self.rel == rel::ITEM
    }
}

/// Pick the best `item` link, accepting any item link as the fallback.
pub fn resolve_link<'a>(
    links: &'a [Link],
    preferred_type: Option<&str>,
    supported_types: Option<&[String]>,
) -> Result<&'a Link> {
    resolve_link_with_fallback(links, preferred_type, supported_types, |_| true)
}

/// Pick the best `item` link, restricting the last-resort fallback to links
/// accepted by `is_fallback`.
pub fn resolve_link_with_fallback<'a, F>(
    links: &'a [Link],
    preferred_type: Option<&str>,
    supported_types: Option<&[String]>,
    is_fallback: F,
) -> Result<&'a Link>
where
    F: Fn(&Link) -> bool,
{
    let items: Vec<&Link> = links.iter().filter(|l| l.is_item()).collect();

    if let Some(preferred) = preferred_type {
        if let Some(link) = items.iter().copied().find(|l| l.media_type() == preferred) {
            debug!(media_type = preferred, href = %link.href, "Selected preferred media type");
            return Ok(link);
        }
        debug!(media_type = preferred, "Preferred media type not offered");
    }

    if let Some(supported) = supported_types {
        for media_type in supported {
            if let Some(link) = items.iter().copied().find(|l| l.media_type() == media_type) {
                debug!(media_type = %media_type, href = %link.href, "Selected supported media type");
                return Ok(link);
            }
        }
    }

    items
        .iter()
        .rev()
        .copied()
        .find(|l| is_fallback(l))
        .ok_or_else(TileError::item_link_not_found)
}

/// Find the first link with the given relation.
pub fn find_rel<'a>(links: &'a [Link], relation: &str) -> Option<&'a Link> {
    links.iter().find(|l| l.rel == relation)
}
