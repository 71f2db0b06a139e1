//! Mock store implementation for testing.
//!
//! Provides [`MockStore`] for unit testing without a content platform.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::store::{MenuHandle, MenuStore, SiteInfo, StoreError, StoredMenuItem};

/// Mock menu store for testing.
///
/// Stores menus, items, and pages in memory. Use the builder methods to
/// configure the mock with test data. Lookups never error.
///
/// # Example
///
/// ```ignore
/// use arbor_store::{MenuStore, MockStore, StoredMenuItem};
///
/// let store = MockStore::new()
///     .with_menu(3, "Main Menu", "main-menu")
///     .with_item(3, StoredMenuItem { id: 10, title: "Home".into(), ..Default::default() });
///
/// let items = store.menu_items(3).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    menus: RwLock<Vec<MenuHandle>>,
    items: RwLock<HashMap<u64, Vec<StoredMenuItem>>>,
    pages: RwLock<Vec<StoredMenuItem>>,
    locations: RwLock<Vec<(String, u64)>>,
    thumbnails: RwLock<HashMap<u64, String>>,
    site: RwLock<SiteInfo>,
}

impl MockStore {
    /// Create a new empty mock store with the default site identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stored menu.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_menu(self, id: u64, name: impl Into<String>, slug: impl Into<String>) -> Self {
        self.menus.write().unwrap().push(MenuHandle {
            id,
            name: name.into(),
            slug: slug.into(),
        });
        self
    }

    /// Add an item record to a menu.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_item(self, menu_id: u64, item: StoredMenuItem) -> Self {
        self.items.write().unwrap().entry(menu_id).or_default().push(item);
        self
    }

    /// Add a page record for the page-listing fallback.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, page: StoredMenuItem) -> Self {
        self.pages.write().unwrap().push(page);
        self
    }

    /// Register a navigation location with an assigned menu id (0 = none).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_location(self, key: impl Into<String>, menu_id: u64) -> Self {
        self.locations.write().unwrap().push((key.into(), menu_id));
        self
    }

    /// Attach a thumbnail URL to an entity id.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_thumbnail(self, object_id: u64, url: impl Into<String>) -> Self {
        self.thumbnails.write().unwrap().insert(object_id, url.into());
        self
    }

    /// Replace the site identity.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_site(self, site: SiteInfo) -> Self {
        *self.site.write().unwrap() = site;
        self
    }
}

impl MenuStore for MockStore {
    fn menu_by_id(&self, id: u64) -> Result<Option<MenuHandle>, StoreError> {
        Ok(self
            .menus
            .read()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    fn menu_by_name(&self, name: &str) -> Result<Option<MenuHandle>, StoreError> {
        Ok(self
            .menus
            .read()
            .unwrap()
            .iter()
            .find(|m| m.name == name)
            .cloned())
    }

    fn menu_by_slug(&self, slug: &str) -> Result<Option<MenuHandle>, StoreError> {
        Ok(self
            .menus
            .read()
            .unwrap()
            .iter()
            .find(|m| m.slug == slug)
            .cloned())
    }

    fn location_menu_id(&self, location: &str) -> u64 {
        self.locations
            .read()
            .unwrap()
            .iter()
            .find(|(key, _)| key == location)
            .map_or(0, |&(_, id)| id)
    }

    fn registered_locations(&self) -> Vec<(String, u64)> {
        self.locations.read().unwrap().clone()
    }

    fn menu_items(&self, menu_id: u64) -> Result<Vec<StoredMenuItem>, StoreError> {
        Ok(self
            .items
            .read()
            .unwrap()
            .get(&menu_id)
            .cloned()
            .unwrap_or_default())
    }

    fn fallback_pages(&self) -> Result<Vec<StoredMenuItem>, StoreError> {
        Ok(self.pages.read().unwrap().clone())
    }

    fn metadata(&self, item_id: u64, key: &str) -> Option<String> {
        let find = |records: &[StoredMenuItem]| {
            records
                .iter()
                .find(|r| r.id == item_id)
                .and_then(|r| r.metadata.get(key).cloned())
        };
        self.items
            .read()
            .unwrap()
            .values()
            .find_map(|records| find(records))
            .or_else(|| find(&self.pages.read().unwrap()))
    }

    fn site(&self) -> SiteInfo {
        self.site.read().unwrap().clone()
    }

    fn thumbnail_url(&self, object_id: u64) -> Option<String> {
        self.thumbnails.read().unwrap().get(&object_id).cloned()
    }
}
