// src/catalog/load.rs
// =============================================================================
// Loads the site catalog from a sites.json file.
//
// File format:
//   {
//     "GitHub": { "url": "https://github.com/{account}", ... },
//     "Reddit": { "url": "https://www.reddit.com/user/{account}", ... }
//   }
//
// Only the `url` field is required; any other fields are ignored.
// Key order in the file is kept (see catalog/mod.rs).
//
// Loading is lenient: a missing or unreadable file gives an empty catalog,
// so the investigation simply checks zero sites.
// =============================================================================

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

use super::Catalog;

/// Loads the catalog at `path`, falling back to an empty catalog.
///
/// Returns: the parsed catalog, or an empty one if the file is missing or
/// cannot be parsed (a warning is logged in that case)
pub fn load_catalog(path: &Path) -> Catalog {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Site catalog not found, using empty catalog");
        return Catalog::default();
    }

    match read_catalog(path) {
        Ok(catalog) => {
            tracing::debug!(path = %path.display(), sites = catalog.len(), "Loaded site catalog");
            catalog
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to load site catalog: {:#}", e);
            Catalog::default()
        }
    }
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_catalog(&content)
}

/// Parses sites.json content.
///
/// Entries without a string `url` field are skipped with a warning.
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    // IndexMap keeps the key order of the JSON object
    let raw: IndexMap<String, Value> =
        serde_json::from_str(content).context("Site catalog is not a JSON object")?;

    let entries = raw.into_iter().filter_map(|(name, info)| {
        match info.get("url").and_then(Value::as_str) {
            Some(url) => Some((name, url.to_string())),
            None => {
                tracing::warn!(site = %name, "Skipping catalog entry without a url");
                None
            }
        }
    });

    Ok(Catalog::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_keeps_file_order() {
        let json = r#"{
            "Zeta": { "url": "https://z.example/{account}", "category": "social" },
            "Alpha": { "url": "https://a.example/{account}" }
        }"#;
        let catalog = parse_catalog(json).unwrap();
        let names: Vec<_> = catalog.iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(
            catalog.get("Alpha").unwrap().url_template,
            "https://a.example/{account}"
        );
    }

    #[test]
    fn test_parse_skips_entries_without_url() {
        let json = r#"{
            "Good": { "url": "https://g.example/{account}" },
            "NoUrl": { "name": "nothing here" },
            "BadUrl": { "url": 42 }
        }"#;
        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("Good").is_some());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_catalog("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_missing_file_gives_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_catalog(&dir.path().join("sites.json"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_invalid_file_gives_empty_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let catalog = load_catalog(file.path());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"siteA": {{"url": "https://a.example/{{account}}"}}}}"#).unwrap();
        let catalog = load_catalog(file.path());
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get("siteA").unwrap().profile_url("alice"),
            "https://a.example/alice"
        );
    }
}
