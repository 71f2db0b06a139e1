//! URL and path resolution for menu items.
//!
//! Derives the absolute link and site-relative path from a raw URL fragment
//! as entered in the store, classifying items as internal or external along
//! the way.
//!
//! # Raw URL Forms
//!
//! - `""` / `"/"` — the site home; link follows the permalink style
//! - `"#people"` — fragment-only; left untouched, no meaningful path
//! - `"/foo"` / `"/bar/"` — root-relative; trailing slash preserved verbatim
//! - `"http://..."` — absolute; same-host URLs yield their path component,
//!   differing hosts mark the item external

use arbor_store::{PermalinkStyle, SiteInfo};
use url::Url;

/// Resolved link data for a single raw URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Absolute (or verbatim) link for rendering into `href`.
    pub link: String,
    /// Site-relative path. Empty when the item has no meaningful path
    /// (fragment-only links, external hosts).
    pub path: String,
    /// True when the link points at a host other than the site's own.
    pub external: bool,
}

/// Resolve a raw URL fragment against the site identity.
///
/// Pure function of its inputs; no normalization is applied to paths beyond
/// what the rules below require, so `/`, `/foo`, and `/bar/` all round-trip
/// unchanged through `path`.
#[must_use]
pub fn resolve(raw_url: &str, site: &SiteInfo) -> ResolvedLink {
    if raw_url.is_empty() || raw_url == "/" {
        return ResolvedLink {
            link: home_link(site),
            path: "/".to_owned(),
            external: false,
        };
    }

    if raw_url.starts_with('#') {
        // Fragment-only links resolve relative to wherever they render.
        return ResolvedLink {
            link: raw_url.to_owned(),
            path: String::new(),
            external: false,
        };
    }

    if let Ok(parsed) = Url::parse(raw_url) {
        if parsed.has_host() {
            return resolve_absolute(raw_url, &parsed, site);
        }
    }

    if raw_url.starts_with('/') {
        return ResolvedLink {
            link: format!("{}{raw_url}", site.base_url),
            path: raw_url.to_owned(),
            external: false,
        };
    }

    // Unclassifiable fragment (relative path, scheme-less host). Leave it
    // byte-identical rather than guess at normalization.
    ResolvedLink {
        link: raw_url.to_owned(),
        path: raw_url.to_owned(),
        external: false,
    }
}

/// Site home link: the base URL, with a trailing slash under path-style
/// permalinks.
fn home_link(site: &SiteInfo) -> String {
    match site.permalink_style {
        PermalinkStyle::Pretty => format!("{}/", site.base_url),
        PermalinkStyle::Plain => site.base_url.clone(),
    }
}

/// Resolve an already-absolute URL: keep the link verbatim, derive the path
/// only when the host matches the site's own.
fn resolve_absolute(raw_url: &str, parsed: &Url, site: &SiteInfo) -> ResolvedLink {
    let external = parsed.host_str() != Some(site.host.as_str());
    let path = if external {
        String::new()
    } else {
        let mut path = parsed.path().to_owned();
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }
        if let Some(fragment) = parsed.fragment() {
            path.push('#');
            path.push_str(fragment);
        }
        path
    };

    ResolvedLink {
        link: raw_url.to_owned(),
        path,
        external,
    }
}
