// src/probe/coordinator.rs
// =============================================================================
// The concurrency coordinator: runs every probe of an investigation.
//
// How it works:
// 1. Pick the working set of sites (explicit list, or the first N in the
//    catalog)
// 2. Start a probe per site, at most `max_connections` at once and at most
//    `max_connections_per_host` against the same host
// 3. Fold each outcome into the result map as it completes
// 4. Hand the map to the aggregator
//
// Every selected site ends up with exactly one outcome. A probe cannot fail:
// network errors come back from the fetcher as values and are recorded as
// "not found" with an error description.
//
// Rust concepts:
// - FuturesUnordered: polls many futures at once, yielding as they finish
// - Semaphore: a counter of free slots, one for the whole batch and one per
//   destination host
// - Generics: Prober works with any Fetcher
// =============================================================================

use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tokio::sync::{Semaphore, SemaphorePermit};
use url::Url;

use super::classify::Classifier;
use super::http::{Fetcher, HttpFetcher};
use super::summary::{summarize, InvestigationSummary};
use super::ProbeOutcome;
use crate::catalog::{Catalog, SiteDescriptor};
use crate::config::ProbeConfig;

/// Runs one investigation with a fresh HTTP connection pool.
///
/// The pool lives only for this call, so several investigations can run side
/// by side without sharing connections or limits.
pub async fn investigate(
    catalog: &Catalog,
    username: &str,
    sites: Option<&[String]>,
    config: ProbeConfig,
) -> Result<InvestigationSummary> {
    let fetcher = HttpFetcher::new(&config).context("Failed to create HTTP client")?;
    let prober = Prober::new(fetcher, config);
    Ok(prober.investigate(catalog, username, sites).await)
}

/// Picks the sites to probe.
///
/// - With a non-empty `names` list: the catalog entries with those names, in
///   catalog order. Unknown names are ignored.
/// - Otherwise: the first `limit` entries of the catalog.
pub fn select_sites<'a>(
    catalog: &'a Catalog,
    names: Option<&[String]>,
    limit: usize,
) -> Vec<&'a SiteDescriptor> {
    match names {
        Some(names) if !names.is_empty() => {
            for name in names.iter().filter(|name| catalog.get(name).is_none()) {
                tracing::debug!(site = %name, "Ignoring site not in catalog");
            }
            let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
            catalog
                .iter()
                .filter(|site| wanted.contains(site.name.as_str()))
                .collect()
        }
        _ => catalog.iter().take(limit).collect(),
    }
}

/// Probes sites through a Fetcher and classifies what comes back
pub struct Prober<F> {
    fetcher: F,
    classifier: Classifier,
    config: ProbeConfig,
}

impl<F: Fetcher> Prober<F> {
    pub fn new(fetcher: F, config: ProbeConfig) -> Self {
        Self::with_classifier(fetcher, Classifier::default(), config)
    }

    pub fn with_classifier(fetcher: F, classifier: Classifier, config: ProbeConfig) -> Self {
        Self {
            fetcher,
            classifier,
            config,
        }
    }

    /// Probes `username` on the selected sites and summarizes the results
    pub async fn investigate(
        &self,
        catalog: &Catalog,
        username: &str,
        sites: Option<&[String]>,
    ) -> InvestigationSummary {
        let selected = select_sites(catalog, sites, self.config.selection_limit);

        tracing::info!("Starting investigation for username: {}", username);
        tracing::info!("Checking {} sites...", selected.len());

        let results = self.probe_all(&selected, username).await;
        summarize(username, results)
    }

    // Runs all probes and returns one outcome per site, in selection order
    async fn probe_all(
        &self,
        selected: &[&SiteDescriptor],
        username: &str,
    ) -> IndexMap<String, ProbeOutcome> {
        let admission = Admission::new(selected, username, &self.config);

        let mut completed: FuturesUnordered<_> = selected
            .iter()
            .enumerate()
            .map(|(index, site)| {
                let admission = &admission;
                async move {
                    let outcome = self.probe_site(site, username, admission).await;
                    (index, *site, outcome)
                }
            })
            .collect();

        let mut resolved = Vec::with_capacity(selected.len());
        while let Some((index, site, outcome)) = completed.next().await {
            if outcome.exists {
                tracing::info!("✅ Found: {} on {}", username, site.name);
            } else {
                tracing::debug!(
                    error = outcome.error_kind.as_deref().unwrap_or(""),
                    "❌ Not found: {} on {}",
                    username,
                    site.name
                );
            }
            resolved.push((index, site.name.clone(), outcome));
        }

        resolved.sort_by_key(|(index, _, _)| *index);
        resolved
            .into_iter()
            .map(|(_, name, outcome)| (name, outcome))
            .collect()
    }

    async fn probe_site(
        &self,
        site: &SiteDescriptor,
        username: &str,
        admission: &Admission,
    ) -> ProbeOutcome {
        let url = site.profile_url(username);

        let fetched = {
            let _permits = admission.acquire(&url).await;
            self.fetcher.fetch(&url).await
        };

        let status = fetched.as_ref().ok().map(|response| response.status);
        let verdict = self.classifier.classify(&fetched);
        ProbeOutcome::new(url, status, &verdict)
    }
}

// Connection slots for one batch: a total ceiling plus one semaphore per
// destination host, all created up front
struct Admission {
    total: Semaphore,
    by_host: HashMap<String, Semaphore>,
}

// Held for the duration of one fetch; dropping it frees both slots
struct Permits<'a> {
    _host: Option<SemaphorePermit<'a>>,
    _total: Option<SemaphorePermit<'a>>,
}

impl Admission {
    // max(1): a zero limit would never admit anything
    fn new(sites: &[&SiteDescriptor], username: &str, config: &ProbeConfig) -> Self {
        let per_host = config.max_connections_per_host.max(1);
        let mut by_host = HashMap::new();
        for site in sites {
            if let Some(host) = host_of(&site.profile_url(username)) {
                by_host
                    .entry(host)
                    .or_insert_with(|| Semaphore::new(per_host));
            }
        }
        Self {
            total: Semaphore::new(config.max_connections.max(1)),
            by_host,
        }
    }

    // Host slot first, so a probe queued behind a busy host does not sit on
    // a total slot. URLs without a host only take a total slot.
    async fn acquire(&self, url: &str) -> Permits<'_> {
        let host = match host_of(url).and_then(|host| self.by_host.get(&host)) {
            Some(semaphore) => semaphore.acquire().await.ok(),
            None => None,
        };
        let total = self.total.acquire().await.ok();
        Permits {
            _host: host,
            _total: total,
        }
    }
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_string)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not tokio::spawn for every site?
//    - Spawned tasks must own their data ('static), so every probe would need
//      its own copy of the username and catalog entry
//    - FuturesUnordered polls all probes from this one task instead, so they
//      can borrow from the caller
//
// 2. What does a Semaphore do?
//    - It holds N permits; acquire() waits until one is free
//    - Permits are released when they are dropped (end of the block)
//    - Waiters are served in the order they asked
//
// 3. Why sort at the end?
//    - Probes finish in any order; sorting by the original index makes the
//      report list sites in catalog order
// -----------------------------------------------------------------------------
