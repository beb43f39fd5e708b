use std::collections::HashMap;

use tracing::debug;

use dex_core::{CatalogEntry, DetailRecord};
use dex_integration::CatalogSource;

/// Cached outcome of a detail fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEntry {
    /// Detail record received
    Ready(Box<DetailRecord>),
    /// Fetch failed; the item is skipped from cards and sorts last
    Unavailable,
}

impl DetailEntry {
    pub fn record(&self) -> Option<&DetailRecord> {
        match self {
            Self::Ready(record) => Some(record.as_ref()),
            Self::Unavailable => None,
        }
    }
}

/// Detail records keyed by entry name. Lives for the whole session and never
/// evicts; the catalog index bounds its size.
#[derive(Debug, Default)]
pub struct DetailCache {
    entries: HashMap<String, DetailEntry>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&DetailEntry> {
        self.entries.get(name)
    }

    /// The cached record, if it resolved
    pub fn record(&self, name: &str) -> Option<&DetailRecord> {
        self.get(name).and_then(DetailEntry::record)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Store a fetch outcome. Last write wins.
    pub fn store(&mut self, name: impl Into<String>, detail: Option<DetailRecord>) {
        let entry = match detail {
            Some(record) => DetailEntry::Ready(Box::new(record)),
            None => DetailEntry::Unavailable,
        };
        self.entries.insert(name.into(), entry);
    }

    /// Drop a cached outcome so the next `resolve` fetches again
    pub fn forget(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Return the cached outcome for `entry`, fetching and storing it first if absent.
    pub async fn resolve<S>(&mut self, source: &S, entry: &CatalogEntry) -> &DetailEntry
    where
        S: CatalogSource + ?Sized,
    {
        if !self.entries.contains_key(&entry.name) {
            debug!("Fetching detail for {}", entry.name);
            let detail = source.fetch_detail(&entry.reference).await;
            self.store(entry.name.clone(), detail);
        }
        &self.entries[&entry.name]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
