//! Navigation menu trees for Arbor.
//!
//! This crate provides:
//! - [`Menu`]: Source resolution, tree building, and current-item queries
//! - [`MenuItem`]: A rendered navigation node with link, classes, and children
//! - [`resolve`]: Stored-URL to link/path resolution against the site config
//!
//! # Quick Start
//!
//! ```no_run
//! use arbor_menu::{Menu, MenuOptions};
//! use arbor_store::MenuStore;
//!
//! fn nav(store: &dyn MenuStore) {
//!     // Resolve by name, slug, or location key; unlimited depth.
//!     let menu = Menu::build(store, "primary", MenuOptions::default());
//!
//!     for item in &menu {
//!         println!("{} -> {}", item.title, item.link());
//!     }
//! }
//! ```

pub(crate) mod item;
pub(crate) mod link;
pub(crate) mod menu;
pub(crate) mod tree;

pub use item::MenuItem;
pub use link::{ResolvedLink, resolve};
pub use menu::{Menu, MenuOptions, MenuSource};
pub use tree::{ClassFilterFn, build_tree};
