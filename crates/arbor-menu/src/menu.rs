//! Menu resolution and current-item queries.
//!
//! [`Menu`] resolves which stored menu to use for a given source descriptor
//! (id, name/slug/location key, or nothing), builds the full item tree
//! eagerly at construction, and answers current-item queries against it.
//!
//! Resolution never fails: unresolved names and locations degrade to the
//! page-listing fallback, an unresolved explicit id degrades to an empty
//! menu, and store errors are logged and treated as misses.

use std::collections::HashMap;
use std::sync::Mutex;

use arbor_store::{MenuHandle, MenuStore, StoreError, StoredMenuItem};
use serde_json::{Map, Value};

use crate::item::MenuItem;
use crate::tree::{self, ClassFilterFn};

/// Cache key reserved for "no depth argument".
const UNLIMITED_KEY: i64 = -1;

/// What a menu should be built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuSource {
    /// No descriptor: first registered location with an assigned menu,
    /// else the page-listing fallback.
    #[default]
    Default,
    /// Explicit menu id. A miss yields an empty menu, never the fallback.
    Id(u64),
    /// String key, tried as location, then exact name, then slug.
    Key(String),
}

impl From<u64> for MenuSource {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for MenuSource {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for MenuSource {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

/// Menu construction options.
///
/// `depth` limits tree nesting: positive values cap the number of levels,
/// zero and negative values mean unlimited. The raw option map is kept
/// verbatim for callers that want to inspect what was passed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuOptions {
    /// Coerced depth limit. Defaults to -1 (no option given).
    pub depth: i64,
    /// Raw options exactly as supplied.
    pub raw: Map<String, Value>,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            depth: -1,
            raw: Map::new(),
        }
    }
}

impl MenuOptions {
    /// Options with an explicit depth limit.
    #[must_use]
    pub fn with_depth(depth: i64) -> Self {
        let mut raw = Map::new();
        raw.insert("depth".to_owned(), Value::from(depth));
        Self { depth, raw }
    }

    /// Build options from a raw map, coercing `depth`.
    ///
    /// An absent depth stays -1 (unlimited); integers pass through;
    /// integer-shaped strings parse; anything else coerces to 0.
    #[must_use]
    pub fn from_value(raw: Map<String, Value>) -> Self {
        let depth = raw.get("depth").map_or(-1, coerce_depth);
        Self { depth, raw }
    }
}

/// Lossy integer coercion for the depth option. Unparseable input becomes
/// 0, deliberately distinct from the -1 "not given" default.
fn coerce_depth(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// How a source descriptor resolved against the store.
enum Resolved {
    /// A stored menu with its flat records.
    Stored(MenuHandle, Vec<StoredMenuItem>),
    /// The page-listing fallback, order-normalized and flattened.
    Fallback(Vec<StoredMenuItem>),
    /// Nothing resolved (hard miss or no pages).
    Empty,
}

/// A resolved menu: the ordered root items plus current-item queries.
///
/// Built once, eagerly, at construction. `items` is public so navigation
/// state (`is_current` / `is_current_ancestor`) can be injected afterwards;
/// set flags before the first current-item query, results are cached per
/// requested depth.
#[derive(Debug)]
pub struct Menu {
    /// Resolved menu id, 0 for fallback and empty menus.
    pub id: u64,
    /// Resolved menu name, empty for fallback and empty menus.
    pub name: String,
    /// Coerced depth option the tree was built with.
    pub depth: i64,
    /// Raw options exactly as supplied.
    pub raw_options: Map<String, Value>,
    /// Ordered root items.
    pub items: Vec<MenuItem>,
    /// Current-item trails, one slot per requested depth value.
    current_cache: Mutex<HashMap<i64, Option<Vec<usize>>>>,
}

impl Menu {
    /// Resolve a source and build the menu tree.
    pub fn build(
        store: &dyn MenuStore,
        source: impl Into<MenuSource>,
        options: MenuOptions,
    ) -> Self {
        Self::build_inner(store, source.into(), options, None)
    }

    /// Like [`Menu::build`], with an injectable CSS-class hook applied to
    /// every item during construction.
    pub fn build_with_class_filter(
        store: &dyn MenuStore,
        source: impl Into<MenuSource>,
        options: MenuOptions,
        class_filter: &ClassFilterFn,
    ) -> Self {
        Self::build_inner(store, source.into(), options, Some(class_filter))
    }

    fn build_inner(
        store: &dyn MenuStore,
        source: MenuSource,
        options: MenuOptions,
        class_filter: Option<&ClassFilterFn>,
    ) -> Self {
        let site = store.site();
        let build = |records: &[StoredMenuItem]| {
            tree::build_tree(records, options.depth, &site, store, class_filter)
        };

        let (id, name, items) = match resolve_source(store, &source) {
            Resolved::Stored(handle, records) => (handle.id, handle.name, build(&records)),
            Resolved::Fallback(pages) => (0, String::new(), build(&pages)),
            Resolved::Empty => (0, String::new(), Vec::new()),
        };

        tracing::debug!(menu = %name, id, items = items.len(), "menu built");

        Self {
            id,
            name,
            depth: options.depth,
            raw_options: options.raw,
            items,
            current_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Ordered root items.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// True when nothing resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the active navigation item.
    ///
    /// Pre-order walk for the first `is_current` node, else the deepest
    /// node along an `is_current_ancestor`-flagged chain. `depth` caps how
    /// many levels the walk may descend (1 = roots only). Results are
    /// cached per distinct depth value; a call with one depth never reads
    /// another depth's slot.
    ///
    /// Returns `None` when no item is flagged, including for empty menus.
    ///
    /// # Panics
    ///
    /// Panics if the internal cache lock is poisoned.
    #[must_use]
    pub fn current_item(&self, depth: Option<usize>) -> Option<&MenuItem> {
        let key = depth.map_or(UNLIMITED_KEY, |d| i64::try_from(d).unwrap_or(i64::MAX));
        let trail = {
            let mut cache = self.current_cache.lock().unwrap();
            cache
                .entry(key)
                .or_insert_with(|| find_current_trail(&self.items, depth))
                .clone()
        }?;
        self.resolve_trail(&trail)
    }

    /// The root-level ancestor of whatever [`Menu::current_item`] resolves
    /// to, or `None` when nothing is flagged.
    ///
    /// # Panics
    ///
    /// Panics if the internal cache lock is poisoned.
    #[must_use]
    pub fn current_top_level_item(&self) -> Option<&MenuItem> {
        let trail = {
            let mut cache = self.current_cache.lock().unwrap();
            cache
                .entry(UNLIMITED_KEY)
                .or_insert_with(|| find_current_trail(&self.items, None))
                .clone()
        }?;
        self.items.get(*trail.first()?)
    }

    /// Walk a child-index trail back to a node reference.
    fn resolve_trail(&self, trail: &[usize]) -> Option<&MenuItem> {
        let (&first, rest) = trail.split_first()?;
        let mut node = self.items.get(first)?;
        for &idx in rest {
            node = node.children().get(idx)?;
        }
        Some(node)
    }
}

/// `for item in &menu` iterates the root items.
impl<'a> IntoIterator for &'a Menu {
    type Item = &'a MenuItem;
    type IntoIter = std::slice::Iter<'a, MenuItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Resolve a source descriptor against the store, first match wins.
fn resolve_source(store: &dyn MenuStore, source: &MenuSource) -> Resolved {
    match source {
        MenuSource::Id(id) => match lookup(store.menu_by_id(*id)) {
            Some(handle) => stored_menu(store, handle),
            // Explicit ids fail closed: no fallback.
            None => Resolved::Empty,
        },
        MenuSource::Key(key) => {
            let by_location = match store.location_menu_id(key) {
                0 => None,
                id => lookup(store.menu_by_id(id)),
            };
            let handle = by_location
                .or_else(|| lookup(store.menu_by_name(key)))
                .or_else(|| lookup(store.menu_by_slug(key)));
            match handle {
                Some(handle) => stored_menu(store, handle),
                None => page_fallback(store),
            }
        }
        MenuSource::Default => {
            let assigned = store
                .registered_locations()
                .into_iter()
                .find(|&(_, id)| id != 0);
            match assigned.and_then(|(_, id)| lookup(store.menu_by_id(id))) {
                Some(handle) => stored_menu(store, handle),
                None => page_fallback(store),
            }
        }
    }
}

/// Unwrap a store lookup, logging and treating errors as misses.
fn lookup(result: Result<Option<MenuHandle>, StoreError>) -> Option<MenuHandle> {
    match result {
        Ok(handle) => handle,
        Err(error) => {
            tracing::warn!(error = %error, "menu lookup failed");
            None
        }
    }
}

fn stored_menu(store: &dyn MenuStore, handle: MenuHandle) -> Resolved {
    match store.menu_items(handle.id) {
        Ok(records) => Resolved::Stored(handle, records),
        Err(error) => {
            tracing::warn!(error = %error, menu = handle.id, "failed to read menu items");
            Resolved::Stored(handle, Vec::new())
        }
    }
}

fn page_fallback(store: &dyn MenuStore) -> Resolved {
    match store.fallback_pages() {
        Ok(pages) if pages.is_empty() => Resolved::Empty,
        Ok(pages) => Resolved::Fallback(normalize_fallback(pages)),
        Err(error) => {
            tracing::warn!(error = %error, "failed to read fallback pages");
            Resolved::Empty
        }
    }
}

/// Normalize page-fallback records: flat (no nesting), ordered by page
/// ordering key with zero-key ties resolved alphabetically by title, then
/// by id. Order keys are re-indexed so downstream `(order_key, id)` sibling
/// sorting can never disturb the tie resolution.
fn normalize_fallback(mut pages: Vec<StoredMenuItem>) -> Vec<StoredMenuItem> {
    pages.sort_by(|a, b| {
        a.order_key
            .cmp(&b.order_key)
            .then_with(|| {
                if a.order_key == 0 {
                    a.title.to_lowercase().cmp(&b.title.to_lowercase())
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .then_with(|| a.id.cmp(&b.id))
    });
    for (position, page) in pages.iter_mut().enumerate() {
        page.order_key = i64::try_from(position).unwrap_or(i64::MAX);
        page.parent_id = 0;
    }
    pages
}

/// Locate the active item as a child-index trail.
///
/// Phase one is a depth-capped pre-order scan for the first `is_current`
/// node. Phase two follows the ancestor-flag chain from the first flagged
/// root downward, stopping at an `is_current` node, the depth cap, or the
/// last node with no flagged child.
fn find_current_trail(items: &[MenuItem], depth: Option<usize>) -> Option<Vec<usize>> {
    fn preorder(nodes: &[MenuItem], depth: Option<usize>, trail: &mut Vec<usize>) -> bool {
        if depth.is_some_and(|limit| trail.len() >= limit) {
            return false;
        }
        for (idx, node) in nodes.iter().enumerate() {
            trail.push(idx);
            if node.is_current {
                return true;
            }
            if preorder(node.children(), depth, trail) {
                return true;
            }
            trail.pop();
        }
        false
    }

    let flagged = |node: &MenuItem| node.is_current || node.is_current_ancestor;

    let mut trail = Vec::new();
    if preorder(items, depth, &mut trail) {
        return Some(trail);
    }

    let mut trail = Vec::new();
    let mut nodes = items;
    loop {
        let Some(idx) = nodes.iter().position(|n| flagged(n)) else {
            return if trail.is_empty() { None } else { Some(trail) };
        };
        trail.push(idx);
        let node = &nodes[idx];
        if node.is_current || depth.is_some_and(|limit| trail.len() >= limit) {
            return Some(trail);
        }
        if node.children().iter().any(|c| flagged(c)) {
            nodes = node.children();
        } else {
            return Some(trail);
        }
    }
}

#[cfg(test)]
mod tests {
    use arbor_store::{MockStore, PermalinkStyle, SiteInfo};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    static_assertions::assert_impl_all!(Menu: Send, Sync);

    const MENU_ID: u64 = 3;
    const MENU_NAME: &str = "Menu One";

    fn record(id: u64, parent_id: u64, order_key: i64, title: &str) -> StoredMenuItem {
        StoredMenuItem {
            id,
            parent_id,
            order_key,
            title: title.to_owned(),
            ..Default::default()
        }
    }

    fn page_record(id: u64, order_key: i64, title: &str, slug: &str, raw_url: &str) -> StoredMenuItem {
        StoredMenuItem {
            object_type: "page".to_owned(),
            object_id: id,
            slug: slug.to_owned(),
            raw_url: raw_url.to_owned(),
            ..record(id, 0, order_key, title)
        }
    }

    fn link_record(id: u64, order_key: i64, title: &str, raw_url: &str) -> StoredMenuItem {
        StoredMenuItem {
            object_type: "custom".to_owned(),
            object_id: id,
            raw_url: raw_url.to_owned(),
            ..record(id, 0, order_key, title)
        }
    }

    /// The standard fixture: a nested menu with page, external, root,
    /// fragment, and same-host absolute items.
    fn test_menu_store() -> MockStore {
        let mut home = page_record(1, 1, "Home", "home", "/home/");
        home.metadata
            .insert("tobias".to_owned(), "funke".to_owned());
        let mut upstatement = link_record(2, 2, "Upstatement", "http://upstatement.com");
        upstatement.target = "_blank".to_owned();
        let mut child = page_record(3, 3, "Child Page", "child-page", "/child-page/");
        child.parent_id = 1;
        let mut grandchild = page_record(4, 100, "Grandchild Page", "grandchild-page", "/grandchild-page/");
        grandchild.parent_id = 3;
        let mut other_grandchild =
            page_record(5, 101, "Other Grandchild Page", "other-grandchild-page", "/other-grandchild-page/");
        other_grandchild.parent_id = 3;
        let mut root_home = link_record(6, 4, "Root Home", "/");
        root_home.target = String::new();
        let people = link_record(7, 6, "People", "#people");
        let more_people = link_record(8, 7, "More People", "http://example.org/#people");
        let mut manual_home = link_record(9, 8, "Manual Home", "http://example.org");
        manual_home.target = " ".to_owned();

        MockStore::new()
            .with_site(SiteInfo::new("http://example.org", PermalinkStyle::Pretty))
            .with_menu(MENU_ID, MENU_NAME, "menu-one")
            .with_item(MENU_ID, home)
            .with_item(MENU_ID, upstatement)
            .with_item(MENU_ID, child)
            .with_item(MENU_ID, grandchild)
            .with_item(MENU_ID, other_grandchild)
            .with_item(MENU_ID, root_home)
            .with_item(MENU_ID, people)
            .with_item(MENU_ID, more_people)
            .with_item(MENU_ID, manual_home)
    }

    fn built(store: &MockStore) -> Menu {
        Menu::build(store, MENU_NAME, MenuOptions::default())
    }

    // Source resolution

    #[test]
    fn test_build_by_name() {
        let store = test_menu_store();

        let menu = built(&store);

        assert_eq!(menu.name, MENU_NAME);
        assert_eq!(menu.id, MENU_ID);
        assert_eq!(menu.items().len(), 6);
    }

    #[test]
    fn test_build_by_slug() {
        let store = test_menu_store();

        let menu = Menu::build(&store, "menu-one", MenuOptions::default());

        assert_eq!(menu.name, MENU_NAME);
        assert_eq!(menu.items().len(), 6);
    }

    #[test]
    fn test_build_by_id() {
        let store = test_menu_store();

        let menu = Menu::build(&store, MENU_ID, MenuOptions::default());

        assert_eq!(menu.name, MENU_NAME);
        assert_eq!(menu.items().len(), 6);
    }

    #[test]
    fn test_build_by_location_key() {
        let store = MockStore::new()
            .with_menu(4, "Froggy", "froggy")
            .with_menu(5, "Ziggy", "ziggy")
            .with_menu(6, "Zappy", "zappy")
            .with_item(5, link_record(50, 1, "A", "/"))
            .with_location("header-menu", 0)
            .with_location("extra-menu", 5)
            .with_location("bonus", 0);

        let menu = Menu::build(&store, "extra-menu", MenuOptions::default());

        assert_eq!(menu.name, "Ziggy");
        assert_eq!(menu.items().len(), 1);
    }

    #[test]
    fn test_sourceless_uses_first_assigned_location() {
        let store = MockStore::new()
            .with_menu(5, "Ziggy", "ziggy")
            .with_item(5, link_record(50, 1, "A", "/"))
            .with_location("header-menu", 0)
            .with_location("extra-menu", 5);

        let menu = Menu::build(&store, MenuSource::Default, MenuOptions::default());

        assert_eq!(menu.name, "Ziggy");
    }

    #[test]
    fn test_sourceless_without_assignment_falls_back_to_pages() {
        let store = MockStore::new()
            .with_location("header-menu", 0)
            .with_page(page_record(21, 10, "Foo Page", "foo-page", "/foo-page/"))
            .with_page(page_record(22, 1, "Bar Page", "bar-page", "/bar-page/"));

        let menu = Menu::build(&store, MenuSource::Default, MenuOptions::default());

        assert_eq!(menu.items().len(), 2);
        assert_eq!(menu.items()[0].title, "Bar Page");
        assert_eq!(menu.items()[1].title, "Foo Page");
    }

    #[test]
    fn test_missing_id_yields_empty_menu_despite_fallback() {
        let store = MockStore::new()
            .with_page(page_record(21, 10, "Foo Page", "foo-page", "/foo-page/"))
            .with_page(page_record(22, 1, "Bar Page", "bar-page", "/bar-page/"));

        let menu = Menu::build(&store, 14u64, MenuOptions::default());

        assert!(menu.is_empty());
        assert_eq!(menu.id, 0);
    }

    #[test]
    fn test_unknown_key_falls_back_to_pages() {
        let store = MockStore::new().with_page(page_record(21, 1, "Bar Page", "bar-page", "/bar-page/"));

        let menu = Menu::build(&store, "no-such-menu", MenuOptions::default());

        assert_eq!(menu.items().len(), 1);
        assert_eq!(menu.id, 0);
        assert_eq!(menu.name, "");
    }

    #[test]
    fn test_empty_store_yields_empty_menu() {
        let store = MockStore::new();

        let menu = Menu::build(&store, MenuSource::Default, MenuOptions::default());

        assert!(menu.is_empty());
    }

    #[test]
    fn test_pages_fallback_zero_order_sorts_by_title() {
        let store = MockStore::new()
            .with_page(page_record(21, 0, "Foo Page", "foo-page", "/foo-page/"))
            .with_page(page_record(22, 0, "Bar Page", "bar-page", "/bar-page/"));

        let menu = Menu::build(&store, MenuSource::Default, MenuOptions::default());

        assert_eq!(menu.items()[0].title, "Bar Page");
        assert_eq!(menu.items()[1].title, "Foo Page");
    }

    #[test]
    fn test_pages_fallback_is_flat() {
        // Page hierarchies don't nest in the fallback listing.
        let mut sub = page_record(22, 2, "Sub Page", "sub-page", "/sub-page/");
        sub.parent_id = 21;
        let store = MockStore::new()
            .with_page(page_record(21, 1, "Top Page", "top-page", "/top-page/"))
            .with_page(sub);

        let menu = Menu::build(&store, MenuSource::Default, MenuOptions::default());

        assert_eq!(menu.items().len(), 2);
        assert_eq!(menu.items()[1].level, 0);
    }

    // Item fields against the standard fixture

    #[test]
    fn test_home_item_link_and_path() {
        let store = test_menu_store();
        let menu = built(&store);

        let home = &menu.items()[0];
        assert_eq!(home.slug(), "home");
        assert!(!home.is_external());
        assert_eq!(home.link(), "http://example.org/home/");
        assert_eq!(home.path(), "/home/");
    }

    #[test]
    fn test_external_item() {
        let store = test_menu_store();
        let menu = built(&store);

        let upstatement = &menu.items()[1];
        assert!(upstatement.is_external());
        assert_eq!(upstatement.url, "http://upstatement.com");
        assert_eq!(upstatement.link(), "http://upstatement.com");
    }

    #[test]
    fn test_root_home_item() {
        let store = test_menu_store();
        let menu = built(&store);

        let root_home = &menu.items()[2];
        assert_eq!(root_home.link(), "http://example.org/");
        assert_eq!(root_home.path(), "/");
    }

    #[test]
    fn test_fragment_items() {
        let store = test_menu_store();
        let menu = built(&store);

        assert_eq!(menu.items()[3].link(), "#people");
        assert_eq!(menu.items()[4].link(), "http://example.org/#people");
        assert_eq!(menu.items()[4].path(), "/#people");
    }

    #[test]
    fn test_manual_home_item() {
        let store = test_menu_store();
        let menu = built(&store);

        let manual = &menu.items()[5];
        assert_eq!(manual.link(), "http://example.org");
        assert!(!manual.is_external());
    }

    #[test]
    fn test_item_targets() {
        let store = test_menu_store();
        let menu = built(&store);

        assert_eq!(menu.items()[0].target(), "_self");
        assert!(!menu.items()[0].is_target_blank());
        assert_eq!(menu.items()[1].target(), "_blank");
        assert!(menu.items()[1].is_target_blank());
        assert_eq!(menu.items()[2].target(), "_self");
        assert!(!menu.items()[2].is_target_blank());
    }

    #[test]
    fn test_item_metadata() {
        let store = test_menu_store();
        let menu = built(&store);

        assert_eq!(menu.items()[0].meta("tobias"), Some("funke"));
        assert!(menu.items()[0].id > 0);
    }

    #[test]
    fn test_item_thumbnail() {
        let store = test_menu_store().with_thumbnail(1, "http://example.org/uploads/arch.jpg");
        let menu = built(&store);

        assert_eq!(
            menu.items()[0].thumbnail.as_deref(),
            Some("http://example.org/uploads/arch.jpg")
        );
        assert!(menu.items()[1].thumbnail.is_none());
    }

    #[test]
    fn test_menu_levels() {
        let store = test_menu_store();
        let menu = built(&store);

        let parent = &menu.items()[0];
        assert_eq!(parent.level, 0);
        let child = &parent.children()[0];
        assert_eq!(child.level, 1);
        let older = &child.children()[0];
        assert_eq!(older.title, "Grandchild Page");
        assert_eq!(older.level, 2);
        let younger = &child.children()[1];
        assert_eq!(younger.title, "Other Grandchild Page");
        assert_eq!(younger.level, 2);
    }

    #[test]
    fn test_menu_iteration() {
        let store = test_menu_store();
        let menu = built(&store);

        let titles: Vec<_> = (&menu).into_iter().map(|i| i.title.as_str()).collect();

        assert_eq!(titles[0], "Home");
        assert_eq!(titles.len(), 6);
    }

    // Options

    #[test]
    fn test_default_depth_is_unlimited() {
        let store = test_menu_store();
        let menu = built(&store);

        assert_eq!(menu.depth, -1);
        assert!(menu.raw_options.is_empty());
        let child = &menu.items()[0].children()[0];
        assert_eq!(child.children().len(), 2);
    }

    #[test]
    fn test_depth_one_yields_no_children() {
        let store = test_menu_store();

        let menu = Menu::build(&store, MENU_NAME, MenuOptions::with_depth(1));

        assert_eq!(menu.depth, 1);
        for item in &menu {
            assert_eq!(item.children, None);
        }
    }

    #[test]
    fn test_depth_two_truncates_grandchildren() {
        let store = test_menu_store();

        let menu = Menu::build(&store, MENU_NAME, MenuOptions::with_depth(2));

        for item in &menu {
            for child in item.children() {
                assert_eq!(child.children, None);
            }
        }
    }

    #[test]
    fn test_options_from_value_valid_depth() {
        let raw = json!({ "depth": 1 });

        let options = MenuOptions::from_value(raw.as_object().unwrap().clone());

        assert_eq!(options.depth, 1);
        assert_eq!(options.raw.get("depth"), Some(&json!(1)));
    }

    #[test]
    fn test_options_from_value_invalid_depth_coerces_to_zero() {
        let raw = json!({ "depth": "boogie" });

        let options = MenuOptions::from_value(raw.as_object().unwrap().clone());

        assert_eq!(options.depth, 0);
    }

    #[test]
    fn test_options_from_value_numeric_string_parses() {
        let raw = json!({ "depth": "2" });

        let options = MenuOptions::from_value(raw.as_object().unwrap().clone());

        assert_eq!(options.depth, 2);
    }

    #[test]
    fn test_coerced_zero_depth_still_builds_unlimited() {
        let store = test_menu_store();
        let raw = json!({ "depth": "boogie" });

        let menu = Menu::build(
            &store,
            MENU_NAME,
            MenuOptions::from_value(raw.as_object().unwrap().clone()),
        );

        assert_eq!(menu.depth, 0);
        assert!(menu.items()[0].has_children());
    }

    // Current-item resolution

    #[test]
    fn test_current_item_prefers_current_over_sibling_ancestor() {
        let store = MockStore::new()
            .with_menu(7, "Zazzy", "zazzy")
            .with_item(7, link_record(70, 0, "Root", "/"))
            .with_item(7, link_record(71, 1, "Zazzy", "/zazzy"))
            .with_item(7, link_record(72, 2, "Stuffy", "/stuffy"));
        let mut menu = Menu::build(&store, "Zazzy", MenuOptions::default());

        menu.items[0].is_current_ancestor = true;
        menu.items[1].is_current = true;

        assert_eq!(menu.current_item(None).unwrap().path(), "/zazzy");
    }

    #[test]
    fn test_current_item_settles_on_bare_ancestor() {
        let store = MockStore::new()
            .with_menu(7, "Ancestry", "ancestry")
            .with_item(7, link_record(70, 0, "Root", "/"))
            .with_item(7, link_record(71, 1, "Grandpa", "/grandpa"))
            .with_item(7, link_record(72, 2, "Joe Shmoe", "/joe-shmoe"));
        let mut menu = Menu::build(&store, "Ancestry", MenuOptions::default());

        menu.items[1].is_current_ancestor = true;

        assert_eq!(menu.current_item(None).unwrap().path(), "/grandpa");
    }

    #[test]
    fn test_current_item_follows_ancestor_chain() {
        let store = test_menu_store();
        let mut menu = built(&store);

        menu.items[0].is_current_ancestor = true;
        let child = &mut menu.items[0].children_mut()[0];
        child.is_current_ancestor = true;
        child.children_mut()[1].is_current = true;

        let current = menu.current_item(None).unwrap();
        assert_eq!(current.title, "Other Grandchild Page");
    }

    #[test]
    fn test_current_item_depth_limited() {
        let store = test_menu_store();
        let mut menu = built(&store);

        menu.items[0].is_current_ancestor = true;
        let child = &mut menu.items[0].children_mut()[0];
        child.is_current_ancestor = true;
        child.children_mut()[1].is_current = true;

        let current = menu.current_item(Some(2)).unwrap();
        assert_eq!(current.title, "Child Page");
    }

    #[test]
    fn test_current_item_depth_slots_are_independent() {
        let store = test_menu_store();
        let mut menu = built(&store);

        menu.items[0].is_current_ancestor = true;
        menu.items[0].children_mut()[0].is_current = true;

        // Depth-limited first, unlimited after: the second call must not
        // read the first call's cache slot.
        assert_eq!(menu.current_item(Some(1)).unwrap().title, "Home");
        assert_eq!(menu.current_item(None).unwrap().title, "Child Page");
    }

    #[test]
    fn test_current_item_is_cached_per_depth() {
        let store = test_menu_store();
        let mut menu = built(&store);

        menu.items[0].is_current = true;
        assert_eq!(menu.current_item(None).unwrap().title, "Home");

        // Flag changes after the first query don't disturb the cached slot.
        menu.items[1].is_current = true;
        assert_eq!(menu.current_item(None).unwrap().title, "Home");
    }

    #[test]
    fn test_current_item_without_flags_is_none() {
        let store = test_menu_store();
        let menu = built(&store);

        assert!(menu.current_item(None).is_none());
    }

    #[test]
    fn test_current_item_on_empty_menu_is_none() {
        let store = MockStore::new();
        let menu = Menu::build(&store, MenuSource::Default, MenuOptions::default());

        assert!(menu.current_item(None).is_none());
        assert!(menu.current_top_level_item().is_none());
    }

    #[test]
    fn test_current_top_level_item() {
        let store = test_menu_store();
        let mut menu = built(&store);

        menu.items[0].is_current_ancestor = true;
        menu.items[0].children_mut()[0].is_current = true;

        let top = menu.current_top_level_item().unwrap();
        assert_eq!(top.title, "Home");
    }

    // Class filter wiring

    #[test]
    fn test_build_with_class_filter() {
        let store = test_menu_store();
        let filter = |mut classes: Vec<String>, item: &MenuItem| {
            if item.link() == "http://example.org/home/" {
                classes.push("current-page-item".to_owned());
            }
            classes
        };

        let menu = Menu::build_with_class_filter(&store, MENU_NAME, MenuOptions::default(), &filter);

        assert!(menu.items()[0].classes.iter().any(|c| c == "current-page-item"));
        assert!(!menu.items()[1].classes.iter().any(|c| c == "current-page-item"));
    }

    #[test]
    fn test_fixture_classes() {
        let store = test_menu_store();
        let menu = built(&store);

        assert!(menu.items()[0].classes.iter().any(|c| c == "has-children"));
        assert!(menu.items()[0].classes.iter().any(|c| c == "menu-item-object-page"));
        assert!(menu.items()[1].classes.iter().any(|c| c == "no-children"));
    }
}
