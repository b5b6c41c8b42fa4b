// src/catalog/mod.rs
// =============================================================================
// The site catalog: every website we know how to probe.
//
// Each entry maps a site name (e.g. "GitHub") to a URL template containing
// the `{account}` placeholder, e.g. "https://github.com/{account}".
//
// The catalog is read-only once loaded. Its iteration order is the order of
// the entries in sites.json, which is treated as a popularity ranking: when no
// explicit site list is given, the first N entries are checked.
//
// Submodules:
// - load: reads the catalog from a sites.json file
// =============================================================================

mod load;

pub use load::load_catalog;

use indexmap::IndexMap;

/// Placeholder in URL templates that gets replaced by the username
pub const ACCOUNT_PLACEHOLDER: &str = "{account}";

/// One website that can be probed for a username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDescriptor {
    /// Unique site name, the key in the catalog
    pub name: String,
    /// URL with a single `{account}` placeholder
    pub url_template: String,
}

impl SiteDescriptor {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    /// Builds the profile URL for a username.
    ///
    /// The username is percent-encoded first so characters like `/`, `?` or
    /// spaces cannot change the shape of the URL.
    ///
    /// Example:
    ///   template = "https://example.com/u/{account}"
    ///   username = "john doe"
    ///   result   = "https://example.com/u/john%20doe"
    pub fn profile_url(&self, username: &str) -> String {
        let encoded = urlencoding::encode(username);
        self.url_template.replace(ACCOUNT_PLACEHOLDER, &encoded)
    }
}

/// Ordered collection of sites, keyed by name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sites: IndexMap<String, SiteDescriptor>,
}

impl Catalog {
    /// Builds a catalog from (name, url_template) pairs, keeping their order.
    /// A repeated name keeps its first position and takes the last template.
    pub fn from_entries<I, N, U>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, U)>,
        N: Into<String>,
        U: Into<String>,
    {
        let sites = entries
            .into_iter()
            .map(|(name, url)| {
                let site = SiteDescriptor::new(name, url);
                (site.name.clone(), site)
            })
            .collect();

        Self { sites }
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SiteDescriptor> {
        self.sites.get(name)
    }

    /// Iterates sites in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &SiteDescriptor> {
        self.sites.values()
    }
}
