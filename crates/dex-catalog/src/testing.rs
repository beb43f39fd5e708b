//! In-memory catalog source shared by the unit tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use dex_core::{CatalogEntry, CategoryIndex, DetailRecord, GroupIndex, Stat};
use dex_integration::{CatalogSource, IntegrationError};

use crate::index::CatalogIndex;

pub(crate) fn reference(id: u32) -> String {
    format!("https://pokeapi.co/api/v2/pokemon/{}/", id)
}

pub(crate) fn entry(id: u32, name: &str) -> CatalogEntry {
    CatalogEntry::new(id, name, reference(id))
}

pub(crate) fn detail(id: u32, name: &str, height: u32, weight: u32) -> DetailRecord {
    DetailRecord {
        id,
        name: name.to_string(),
        height,
        weight,
        categories: Vec::new(),
        abilities: vec!["run-away".to_string()],
        stats: vec![Stat { name: "hp".to_string(), value: 40 }],
        sprite: None,
    }
}

/// Which startup call should fail, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailAt {
    Index,
    Categories,
    Groups,
}

#[derive(Default)]
pub(crate) struct FakeSource {
    pub entries: Vec<CatalogEntry>,
    pub categories: CategoryIndex,
    pub groups: GroupIndex,
    /// Detail records keyed by reference
    pub details: HashMap<String, DetailRecord>,
    /// References whose detail fetch fails
    pub broken: HashSet<String>,
    pub fail_at: Option<FailAt>,
    pub detail_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_detail(mut self, detail: DetailRecord) -> Self {
        self.details.insert(reference(detail.id), detail);
        self
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn index(&self) -> CatalogIndex {
        CatalogIndex::new(self.entries.clone(), self.categories.clone(), self.groups.clone())
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn fetch_index(&self) -> Result<Vec<CatalogEntry>, IntegrationError> {
        if self.fail_at == Some(FailAt::Index) {
            return Err(IntegrationError::Offline);
        }
        Ok(self.entries.clone())
    }

    async fn fetch_category_memberships(&self) -> Result<CategoryIndex, IntegrationError> {
        if self.fail_at == Some(FailAt::Categories) {
            return Err(IntegrationError::ServerError { status: 500, message: "boom".into() });
        }
        Ok(self.categories.clone())
    }

    async fn fetch_group_memberships(&self) -> Result<GroupIndex, IntegrationError> {
        if self.fail_at == Some(FailAt::Groups) {
            return Err(IntegrationError::Format("bad group".into()));
        }
        Ok(self.groups.clone())
    }

    async fn fetch_detail(&self, reference: &str) -> Option<DetailRecord> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken.contains(reference) {
            return None;
        }
        self.details.get(reference).cloned()
    }
}

/// bulbasaur (grass, poison), charmander (fire), squirtle (water), all in group 1
pub(crate) fn starter_source() -> FakeSource {
    let mut categories = CategoryIndex::default();
    categories.insert("bulbasaur", "grass");
    categories.insert("bulbasaur", "poison");
    categories.insert("charmander", "fire");
    categories.insert("squirtle", "water");

    let mut groups = GroupIndex::default();
    groups.insert("bulbasaur", 1);
    groups.insert("charmander", 1);
    groups.insert("squirtle", 1);

    FakeSource {
        entries: vec![entry(1, "bulbasaur"), entry(4, "charmander"), entry(7, "squirtle")],
        categories,
        groups,
        ..FakeSource::default()
    }
    .with_detail(detail(1, "bulbasaur", 7, 69))
    .with_detail(detail(4, "charmander", 6, 85))
    .with_detail(detail(7, "squirtle", 5, 90))
}

pub(crate) fn starter_index() -> CatalogIndex {
    starter_source().index()
}

/// `count` entries named `mon-001`.. spread over three groups, every third one "fire"
pub(crate) fn numbered_source(count: u32) -> FakeSource {
    let mut source = FakeSource::default();
    for id in 1..=count {
        let name = format!("mon-{:03}", id);
        source.entries.push(entry(id, &name));
        source.groups.insert(name.clone(), (id - 1) % 3 + 1);
        if id % 3 == 0 {
            source.categories.insert(name.clone(), "fire");
        } else {
            source.categories.insert(name.clone(), "normal");
        }
        // heights repeat so the sort has ties to keep stable
        source.details.insert(reference(id), detail(id, &name, id % 4, 100 - id % 7));
    }
    source
}
