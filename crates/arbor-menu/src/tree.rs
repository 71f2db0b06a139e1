//! Tree construction from flat item records.
//!
//! Converts the store's flat, parent-referencing record list into an
//! ordered, depth-limited tree of [`MenuItem`] nodes: one O(n) grouping pass
//! builds a parent → children index, then each root is materialized
//! recursively in `(order_key, id)` sibling order, resolving links and
//! computing CSS classes on the way down.

use std::collections::{HashMap, HashSet};

use arbor_store::{MenuStore, SiteInfo, StoredMenuItem};

use crate::item::MenuItem;
use crate::link;

/// Injectable CSS-class hook, applied per item after system classes are
/// computed. May add or remove entries.
pub type ClassFilterFn = dyn Fn(Vec<String>, &MenuItem) -> Vec<String> + Send + Sync;

/// Build an ordered tree of menu items from flat records.
///
/// A record whose `parent_id` references no other record is attached as a
/// root rather than rejected. `depth_limit > 0` stops populating `children`
/// on nodes at level `depth_limit - 1`; zero or negative means unlimited.
#[must_use]
pub fn build_tree(
    records: &[StoredMenuItem],
    depth_limit: i64,
    site: &SiteInfo,
    store: &dyn MenuStore,
    class_filter: Option<&ClassFilterFn>,
) -> Vec<MenuItem> {
    let ids: HashSet<u64> = records.iter().map(|r| r.id).collect();

    let mut roots: Vec<usize> = Vec::new();
    let mut by_parent: HashMap<u64, Vec<usize>> = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        let orphan = record.parent_id == 0
            || record.parent_id == record.id
            || !ids.contains(&record.parent_id);
        if orphan {
            roots.push(i);
        } else {
            by_parent.entry(record.parent_id).or_default().push(i);
        }
    }

    let sibling_order =
        |&a: &usize, &b: &usize| (records[a].order_key, records[a].id).cmp(&(records[b].order_key, records[b].id));
    roots.sort_by(sibling_order);
    for bucket in by_parent.values_mut() {
        bucket.sort_by(sibling_order);
    }

    let limit = usize::try_from(depth_limit).ok().filter(|&l| l > 0);
    let ctx = BuildContext {
        records,
        by_parent: &by_parent,
        limit,
        site,
        store,
        class_filter,
    };

    let tree: Vec<MenuItem> = roots.iter().map(|&i| ctx.materialize(i, 0)).collect();

    let built = count_nodes(&tree);
    if built < records.len() {
        tracing::warn!(
            dropped = records.len() - built,
            "menu records unreachable from any root (parent cycle?)"
        );
    }

    tree
}

struct BuildContext<'a> {
    records: &'a [StoredMenuItem],
    by_parent: &'a HashMap<u64, Vec<usize>>,
    limit: Option<usize>,
    site: &'a SiteInfo,
    store: &'a dyn MenuStore,
    class_filter: Option<&'a ClassFilterFn>,
}

impl BuildContext<'_> {
    /// Materialize one record (and its subtree) at the given level.
    fn materialize(&self, idx: usize, level: usize) -> MenuItem {
        let record = &self.records[idx];
        let resolved = link::resolve(&record.raw_url, self.site);

        // The level below this one is cut off once the limit is reached.
        let children = if self.limit.is_some_and(|l| level + 1 >= l) {
            None
        } else {
            Some(
                self.by_parent
                    .get(&record.id)
                    .map(|bucket| {
                        bucket
                            .iter()
                            .map(|&child| self.materialize(child, level + 1))
                            .collect()
                    })
                    .unwrap_or_default(),
            )
        };

        let mut node = MenuItem {
            id: record.id,
            title: record.title.clone(),
            url: resolved.link,
            path: resolved.path,
            external: resolved.external,
            parent_id: record.parent_id,
            order: record.order_key,
            target: record.target.clone(),
            object_type: record.object_type.clone(),
            object_id: record.object_id,
            slug: record.slug.clone(),
            classes: Vec::new(),
            meta: record.metadata.clone(),
            thumbnail: self.store.thumbnail_url(record.object_id),
            children,
            level,
            is_current: record.is_current,
            is_current_ancestor: record.is_current_ancestor,
        };

        let mut classes = system_classes(&node);
        if let Some(filter) = self.class_filter {
            classes = filter(classes, &node);
        }
        node.classes = dedupe(classes);
        node
    }
}

/// System-derived CSS classes for a fully materialized node.
fn system_classes(node: &MenuItem) -> Vec<String> {
    let mut classes = Vec::new();
    if node.has_children() {
        classes.push("has-children".to_owned());
    } else {
        classes.push("no-children".to_owned());
    }
    if !node.object_type.is_empty() {
        classes.push(format!("menu-item-object-{}", node.object_type));
    }
    if node.is_current {
        classes.push("current-menu-item".to_owned());
        classes.push("current_page_item".to_owned());
    }
    if node.is_current_ancestor {
        classes.push("current-menu-ancestor".to_owned());
    }
    classes
}

/// Deduplicate classes, keeping first-occurrence order.
fn dedupe(classes: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    classes
        .into_iter()
        .filter(|class| seen.insert(class.clone()))
        .collect()
}

fn count_nodes(items: &[MenuItem]) -> usize {
    items
        .iter()
        .map(|item| 1 + count_nodes(item.children()))
        .sum()
}
