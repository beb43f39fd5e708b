//! Query pipeline: filter, enrich, sort, paginate
//!
//! Turns a [`QueryState`] into the visible [`Page`]. Only the height/weight sorts
//! need network access before sorting; every other step works on the in-memory
//! index and whatever the detail cache already holds.

use std::cmp::Ordering;

use deunicode::deunicode;
use futures::future::join_all;
use tracing::debug;

use dex_core::{CatalogEntry, QueryState, SortDirection, SortField, SortKey, PAGE_SIZE};
use dex_integration::CatalogSource;

use crate::cache::DetailCache;
use crate::index::CatalogIndex;

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Entries on this page, in sorted order
    pub entries: Vec<CatalogEntry>,
    /// Number of entries matching the filters, across all pages
    pub total_matches: usize,
    /// 1-based page number this page was computed for
    pub page_number: usize,
    pub page_size: usize,
}

impl Page {
    /// Number of pages needed for all matches (0 when nothing matches)
    pub fn page_count(&self) -> usize {
        self.total_matches.div_ceil(self.page_size.max(1))
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.page_count()
    }

    /// "Page X of Y"
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page_number, self.page_count())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stateless pipeline; the index, cache and source are passed in on each run.
#[derive(Debug, Clone, Copy)]
pub struct QueryPipeline {
    page_size: usize,
}

impl Default for QueryPipeline {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl QueryPipeline {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Entries passing every filter, in index order.
    pub fn filter<'a>(&self, index: &'a CatalogIndex, state: &QueryState) -> Vec<&'a CatalogEntry> {
        let needle = state.search.to_lowercase();
        index
            .entries()
            .iter()
            .filter(|entry| matches(index, entry, state, &needle))
            .collect()
    }

    /// Compute the visible page for `state`.
    ///
    /// Detail records fetched along the way land in `cache`, including failures.
    pub async fn recompute<S>(
        &self,
        index: &CatalogIndex,
        cache: &mut DetailCache,
        source: &S,
        state: &QueryState,
    ) -> Page
    where
        S: CatalogSource + ?Sized,
    {
        let mut filtered = self.filter(index, state);
        let total_matches = filtered.len();

        if state.sort.field.needs_detail() {
            enrich_all(cache, source, &filtered).await;
        }

        sort_entries(&mut filtered, state.sort, cache);

        let start = state.page.saturating_sub(1).saturating_mul(self.page_size);
        let entries: Vec<CatalogEntry> = filtered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();

        // Sequential on purpose: at most one page worth of fetches
        for entry in &entries {
            if !cache.contains(&entry.name) {
                cache.resolve(source, entry).await;
            }
        }

        debug!(
            "Query {:?} matched {} entries, page {} holds {}",
            state.search,
            total_matches,
            state.page,
            entries.len()
        );

        Page {
            entries,
            total_matches,
            page_number: state.page,
            page_size: self.page_size,
        }
    }
}

/// Search AND category AND group. `needle` is the lowercased search text.
fn matches(index: &CatalogIndex, entry: &CatalogEntry, state: &QueryState, needle: &str) -> bool {
    if !needle.is_empty() && !entry.name.to_lowercase().contains(needle) {
        return false;
    }
    if !state.categories.is_empty() && !index.categories().intersects(&entry.name, &state.categories) {
        return false;
    }
    if let Some(group) = state.group {
        if index.group_of(&entry.name) != Some(group) {
            return false;
        }
    }
    true
}

/// Fetch every missing detail at once and wait for the whole batch.
async fn enrich_all<S>(cache: &mut DetailCache, source: &S, entries: &[&CatalogEntry])
where
    S: CatalogSource + ?Sized,
{
    let missing: Vec<&CatalogEntry> = entries
        .iter()
        .copied()
        .filter(|entry| !cache.contains(&entry.name))
        .collect();
    if missing.is_empty() {
        return;
    }

    debug!("Fetching {} detail records before sorting", missing.len());
    let fetches = missing.iter().map(|entry| async move {
        let detail = source.fetch_detail(&entry.reference).await;
        (entry.name.clone(), detail)
    });

    for (name, detail) in join_all(fetches).await {
        cache.store(name, detail);
    }
}

/// Stable sort by `key`. Entries without a resolved detail sort last in both
/// directions when the key needs one.
fn sort_entries(entries: &mut Vec<&CatalogEntry>, key: SortKey, cache: &DetailCache) {
    let direction = key.direction;
    match key.field {
        SortField::Id => entries.sort_by(|a, b| directed(a.id.cmp(&b.id), direction)),
        SortField::Name => {
            let mut keyed: Vec<(String, &CatalogEntry)> = entries
                .drain(..)
                .map(|entry| (collation_key(&entry.name), entry))
                .collect();
            keyed.sort_by(|(ka, a), (kb, b)| {
                directed(ka.cmp(kb).then_with(|| a.name.cmp(&b.name)), direction)
            });
            entries.extend(keyed.into_iter().map(|(_, entry)| entry));
        }
        SortField::Height => entries.sort_by(|a, b| {
            let ha = cache.record(&a.name).map(|d| d.height);
            let hb = cache.record(&b.name).map(|d| d.height);
            compare_detail(ha, hb, direction)
        }),
        SortField::Weight => entries.sort_by(|a, b| {
            let wa = cache.record(&a.name).map(|d| d.weight);
            let wb = cache.record(&b.name).map(|d| d.weight);
            compare_detail(wa, wb, direction)
        }),
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn compare_detail(a: Option<u32>, b: Option<u32>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Key for locale-style name ordering: transliterated to Latin, case-folded.
pub fn collation_key(name: &str) -> String {
    deunicode(name).to_lowercase()
}

/// Compare two names the way the name sort does.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
