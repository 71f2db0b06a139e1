//! Menu item nodes.
//!
//! A [`MenuItem`] is one node of a built menu tree: the stored record
//! decorated with its resolved link, computed CSS classes, nesting level,
//! and owned children. Fields are public data; the `is_current` /
//! `is_current_ancestor` flags stay plain mutable bools so the navigation
//! layer (or a test) can inject request state after construction.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A single node of a built menu tree.
///
/// Constructed by the tree builder; not intended to be assembled by hand
/// outside of tests. `children` is `None` when the configured depth limit
/// cut the tree off at this level, and `Some` (possibly empty) otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Stored item id.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Resolved absolute (or verbatim) link.
    pub url: String,
    /// Site-relative path; empty when no meaningful path exists.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// True when the link points off-site.
    pub external: bool,
    /// Parent item id, 0 for roots.
    pub parent_id: u64,
    /// Declared sibling ordering key.
    pub order: i64,
    /// Raw target attribute as stored (`""`, `"_blank"`, `"_self"`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub target: String,
    /// Referenced entity kind (e.g. "page", "custom").
    #[serde(skip_serializing_if = "String::is_empty")]
    pub object_type: String,
    /// Referenced entity id.
    pub object_id: u64,
    /// URL slug of the referenced entity.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slug: String,
    /// Computed CSS classes, ordered and deduplicated.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Arbitrary per-item metadata.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
    /// Thumbnail URL of the referenced entity, when one is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Child nodes. `None` when the depth limit cut the tree here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuItem>>,
    /// Distance from the root level (roots are 0).
    pub level: usize,
    /// True when this item is the currently requested page.
    pub is_current: bool,
    /// True when this item is an ancestor of the currently requested page.
    pub is_current_ancestor: bool,
}

impl MenuItem {
    /// The resolved link, for rendering into `href`.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.url
    }

    /// The site-relative path, empty when none is meaningful.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The URL slug of the referenced entity.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// True when the link points at a host other than the site's own.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.external
    }

    /// The effective target attribute: the stored value, or `"_self"` when
    /// nothing meaningful was stored.
    #[must_use]
    pub fn target(&self) -> &str {
        let stored = self.target.trim();
        if stored.is_empty() { "_self" } else { stored }
    }

    /// True when the item opens in a new tab.
    #[must_use]
    pub fn is_target_blank(&self) -> bool {
        self.target() == "_blank"
    }

    /// Read a single metadata value.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// Child nodes as a slice; empty when children are absent or cut off.
    #[must_use]
    pub fn children(&self) -> &[MenuItem] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Mutable child nodes; empty when children are absent or cut off.
    pub fn children_mut(&mut self) -> &mut [MenuItem] {
        self.children.as_deref_mut().unwrap_or_default()
    }

    /// True when the node has at least one materialized child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}

/// Template engines stringify an item directly; that renders the title.
impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// `for child in &item` iterates the materialized children.
impl<'a> IntoIterator for &'a MenuItem {
    type Item = &'a MenuItem;
    type IntoIter = std::slice::Iter<'a, MenuItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.children().iter()
    }
}
