//! The single owner of catalog state
//!
//! All mutation of the detail cache and the query goes through [`Browser`]. Since
//! [`Browser::run`] borrows it mutably across every await, no submit can land while
//! a recompute is in flight; serializing the owner is what rules out a late result
//! overwriting a newer one. Each ticket still carries a generation number, so a caller
//! that runs an older ticket after a newer submit gets [`Delivery::Stale`] instead
//! of a page.

use tracing::{debug, info};

use dex_core::{DetailRecord, QueryState};
use dex_integration::CatalogSource;

use crate::cache::{DetailCache, DetailEntry};
use crate::error::CatalogError;
use crate::index::CatalogIndex;
use crate::intent::{reduce, Intent};
use crate::pipeline::{Page, QueryPipeline};
use crate::startup::{InitState, Startup};

/// A query snapshot waiting to be computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    state: QueryState,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }
}

/// Outcome of running a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Result of the most recent submit; hand it to the view
    Fresh(Page),
    /// A newer submit happened while this one was computing; drop it
    Stale { generation: u64, latest: u64 },
}

impl Delivery {
    pub fn into_page(self) -> Option<Page> {
        match self {
            Self::Fresh(page) => Some(page),
            Self::Stale { .. } => None,
        }
    }
}

pub struct Browser<S: CatalogSource> {
    source: S,
    index: CatalogIndex,
    cache: DetailCache,
    pipeline: QueryPipeline,
    query: QueryState,
    generation: u64,
    last_page: Option<Page>,
}

impl<S: CatalogSource> Browser<S> {
    /// Wrap an already built index.
    pub fn new(source: S, index: CatalogIndex, page_size: usize) -> Self {
        Self {
            source,
            index,
            cache: DetailCache::new(),
            pipeline: QueryPipeline::new(page_size),
            query: QueryState::default(),
            generation: 0,
            last_page: None,
        }
    }

    /// Run startup against `source` and wrap the resulting index.
    /// `on_state` sees every startup state entered, for a loading indicator.
    pub async fn start<F>(source: S, page_size: usize, on_state: F) -> Result<Self, CatalogError>
    where
        F: FnMut(&InitState),
    {
        let mut startup = Startup::new();
        let index = startup.run_with(&source, on_state).await?;
        info!(
            "Browser ready: {} entries, {} categories, {} groups",
            index.len(),
            index.category_names().len(),
            index.group_count()
        );
        Ok(Self::new(source, index, page_size))
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn cache(&self) -> &DetailCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generation of the latest submit
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The last page delivered fresh to the view
    pub fn last_page(&self) -> Option<&Page> {
        self.last_page.as_ref()
    }

    /// Apply `intent` to the current query and stamp the result.
    ///
    /// Returns `None` when the intent cannot move anywhere: previous on page 1,
    /// or next on the last delivered page.
    pub fn submit(&mut self, intent: Intent) -> Option<Ticket> {
        match (&intent, &self.last_page) {
            (Intent::PreviousPage, _) if self.query.page <= 1 => return None,
            (Intent::NextPage, Some(page)) if !page.has_next() => return None,
            _ => {}
        }

        self.query = reduce(&self.query, intent);
        self.generation += 1;
        debug!("Submitted generation {}: {:?}", self.generation, self.query);

        Some(Ticket {
            generation: self.generation,
            state: self.query.clone(),
        })
    }

    /// Ticket for the current query without changing it, e.g. for the first render.
    pub fn refresh(&mut self) -> Ticket {
        self.generation += 1;
        Ticket {
            generation: self.generation,
            state: self.query.clone(),
        }
    }

    /// Compute the page for `ticket`.
    pub async fn run(&mut self, ticket: Ticket) -> Delivery {
        let page = self
            .pipeline
            .recompute(&self.index, &mut self.cache, &self.source, &ticket.state)
            .await;

        if ticket.generation != self.generation {
            debug!(
                "Dropping stale generation {} (latest {})",
                ticket.generation, self.generation
            );
            return Delivery::Stale {
                generation: ticket.generation,
                latest: self.generation,
            };
        }

        self.last_page = Some(page.clone());
        Delivery::Fresh(page)
    }

    /// Submit and run in one step.
    pub async fn dispatch(&mut self, intent: Intent) -> Option<Page> {
        let ticket = self.submit(intent)?;
        self.run(ticket).await.into_page()
    }

    /// Resolved detail records for the cards of `page`, skipping unavailable ones.
    pub fn cards(&self, page: &Page) -> Vec<&DetailRecord> {
        page.entries
            .iter()
            .filter_map(|entry| self.cache.record(&entry.name))
            .collect()
    }

    /// Detail record for the panel of entry `id`.
    ///
    /// An entry previously cached as unavailable is fetched again, since opening
    /// the panel is an explicit user request.
    pub async fn detail(&mut self, id: u32) -> Result<&DetailRecord, CatalogError> {
        let entry = self
            .index
            .find_by_id(id)
            .cloned()
            .ok_or(CatalogError::UnknownItem(id))?;

        if matches!(self.cache.get(&entry.name), Some(DetailEntry::Unavailable)) {
            self.cache.forget(&entry.name);
        }

        match self.cache.resolve(&self.source, &entry).await {
            DetailEntry::Ready(record) => Ok(record.as_ref()),
            DetailEntry::Unavailable => Err(CatalogError::Unavailable(entry.name)),
        }
    }
}
