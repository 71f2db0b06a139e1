//! Store trait and record types.
//!
//! Provides the core [`MenuStore`] trait for abstracting stored-menu lookups,
//! along with the flat [`StoredMenuItem`] record consumed by the tree builder.
//!
//! # Record Convention
//!
//! Stored items form a flat, parent-referencing list:
//! - `parent_id == 0` marks a root item
//! - `order_key` determines sibling order (ties broken by `id` ascending)
//! - `raw_url` is the raw link fragment exactly as entered (`""`, `"/"`,
//!   `"#people"`, `"/foo"`, or a full URL); resolution happens downstream
//!
//! Backends map these records from their native storage format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single stored menu item, as read from the backing store.
///
/// Records are flat: hierarchy is expressed only through `parent_id` and is
/// materialized by the consumer. The `is_current`/`is_current_ancestor`
/// flags reflect navigation state computed by the routing layer for the
/// active request; they default to `false` for stores that don't track it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredMenuItem {
    /// Unique item id.
    pub id: u64,
    /// Parent item id, 0 for root items.
    pub parent_id: u64,
    /// Declared sibling ordering key (not necessarily insertion order).
    pub order_key: i64,
    /// Raw URL fragment exactly as entered. Empty for object-backed items
    /// whose link the store resolved into `raw_url` beforehand.
    pub raw_url: String,
    /// Referenced entity kind (e.g. "page", "custom").
    pub object_type: String,
    /// Referenced entity id (page id, attachment owner, ...).
    pub object_id: u64,
    /// Link target attribute: `""`, `"_blank"`, or `"_self"`.
    pub target: String,
    /// Display title.
    pub title: String,
    /// URL slug of the referenced entity.
    pub slug: String,
    /// True if this item is the currently requested page.
    pub is_current: bool,
    /// True if this item is an ancestor of the currently requested page.
    pub is_current_ancestor: bool,
    /// Arbitrary per-item metadata.
    pub metadata: BTreeMap<String, String>,
}

/// A resolved stored menu (id plus naming).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuHandle {
    /// Menu term id.
    pub id: u64,
    /// Human-readable menu name (e.g. "Main Menu").
    pub name: String,
    /// URL-safe menu slug (e.g. "main-menu").
    pub slug: String,
}

/// Permalink style configured for the site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermalinkStyle {
    /// Query-style permalinks; the site home link is the bare base URL.
    Plain,
    /// Path-style permalinks; the site home link carries a trailing slash.
    #[default]
    Pretty,
}

/// Site identity used for link resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Site host (e.g. "example.org").
    pub host: String,
    /// Scheme + host with no trailing slash (e.g. "http://example.org").
    pub base_url: String,
    /// Configured permalink style.
    pub permalink_style: PermalinkStyle,
}

impl SiteInfo {
    /// Create site info, deriving the host from the base URL.
    ///
    /// The base URL is stored without a trailing slash.
    #[must_use]
    pub fn new(base_url: impl Into<String>, permalink_style: PermalinkStyle) -> Self {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_owned();
        let host = base_url
            .split_once("://")
            .map_or(base_url.as_str(), |(_, rest)| rest)
            .split('/')
            .next()
            .unwrap_or_default()
            .to_owned();
        Self {
            host,
            base_url,
            permalink_style,
        }
    }
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self::new("http://example.org", PermalinkStyle::Pretty)
    }
}

/// Store error with semantic categories.
///
/// Menu construction treats every store error as "no items" (menus degrade
/// to empty rather than failing); the type exists so real backends can
/// report what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Referenced menu does not exist.
    #[error("menu not found: {0}")]
    MenuNotFound(u64),
    /// A record could not be mapped into [`StoredMenuItem`] shape.
    #[error("malformed record: {detail}")]
    Malformed {
        /// Backend-specific description of the bad record.
        detail: String,
    },
    /// Backend is temporarily unreachable.
    #[error("store unavailable: {detail}")]
    Unavailable {
        /// Backend-specific description of the outage.
        detail: String,
    },
}

/// Store abstraction for menu resolution and item listing.
///
/// Provides a unified read interface regardless of backend. All lookups are
/// misses-as-`None`/empty rather than errors; [`StoreError`] is reserved for
/// backend failures (unreachable store, unmappable records).
pub trait MenuStore: Send + Sync {
    /// Look up a stored menu by its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be queried.
    fn menu_by_id(&self, id: u64) -> Result<Option<MenuHandle>, StoreError>;

    /// Look up a stored menu by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be queried.
    fn menu_by_name(&self, name: &str) -> Result<Option<MenuHandle>, StoreError>;

    /// Look up a stored menu by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be queried.
    fn menu_by_slug(&self, slug: &str) -> Result<Option<MenuHandle>, StoreError>;

    /// Get the menu id assigned to a registered navigation location.
    ///
    /// Returns 0 when the location is unregistered or has no assignment.
    fn location_menu_id(&self, location: &str) -> u64;

    /// List registered navigation locations with their assigned menu ids,
    /// in registration order. Unassigned locations carry id 0.
    fn registered_locations(&self) -> Vec<(String, u64)>;

    /// List the flat item records of a stored menu.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be queried.
    fn menu_items(&self, menu_id: u64) -> Result<Vec<StoredMenuItem>, StoreError>;

    /// List site pages as item records for the page-listing fallback.
    ///
    /// Records come back parent-flat with their page ordering key; the
    /// consumer normalizes tie ordering.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be queried.
    fn fallback_pages(&self) -> Result<Vec<StoredMenuItem>, StoreError>;

    /// Read a single metadata value for an item.
    fn metadata(&self, item_id: u64, key: &str) -> Option<String>;

    /// Site identity for link resolution.
    fn site(&self) -> SiteInfo;

    /// Thumbnail URL for a referenced entity, if one is attached.
    ///
    /// Default implementation reports no thumbnail; stores without an
    /// attachment subsystem don't need to implement this.
    fn thumbnail_url(&self, object_id: u64) -> Option<String> {
        let _ = object_id;
        None
    }
}
