//! Menu item store abstraction for arbor.
//!
//! This crate provides a [`MenuStore`] trait for abstracting stored-menu and
//! page lookups from the underlying content platform. This enables:
//!
//! - **Unit testing** without a running content store
//! - **Backend flexibility** (SQL-backed CMS tables, flat files, fixtures)
//! - **Clean separation** between menu-tree logic and store I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`MenuStore`] trait with menu resolution, item listing, and site queries
//! - [`StoredMenuItem`] flat records (parent-referencing, order-keyed)
//! - [`MockStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use arbor_store::{MenuStore, MockStore};
//!
//! let store = MockStore::new().with_menu(3, "Main Menu", "main-menu");
//! let handle = store.menu_by_slug("main-menu")?.unwrap();
//! let items = store.menu_items(handle.id)?;
//! ```

#[cfg(feature = "mock")]
mod mock;
mod store;

#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use store::{MenuHandle, MenuStore, PermalinkStyle, SiteInfo, StoreError, StoredMenuItem};
