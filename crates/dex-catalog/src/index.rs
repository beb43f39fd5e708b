//! Catalog index: every browsable entry plus its category and group lookups

use std::collections::{BTreeSet, HashMap};

use dex_core::{CatalogEntry, CategoryIndex, GroupIndex};

/// The full list of entries loaded at startup. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: Vec<CatalogEntry>,
    /// Entry id -> position in `entries`
    by_id: HashMap<u32, usize>,
    categories: CategoryIndex,
    groups: GroupIndex,
}

impl CatalogIndex {
    /// Build an index from the three startup fetches.
    /// Entries keep the order the source listed them in.
    pub fn new(entries: Vec<CatalogEntry>, categories: CategoryIndex, groups: GroupIndex) -> Self {
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.id, pos))
            .collect();

        Self {
            entries,
            by_id,
            categories,
            groups,
        }
    }

    /// All entries, in source order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn find_by_id(&self, id: u32) -> Option<&CatalogEntry> {
        self.by_id.get(&id).and_then(|&pos| self.entries.get(pos))
    }

    pub fn categories_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.categories.categories_of(name)
    }

    pub fn group_of(&self, name: &str) -> Option<u32> {
        self.groups.group_of(name)
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    /// Category names for the filter buttons, lexicographic.
    pub fn category_names(&self) -> &[String] {
        self.categories.names()
    }

    /// Number of groups; valid selections are `1..=group_count()`.
    pub fn group_count(&self) -> u32 {
        self.groups.count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::starter_index;

    #[test]
    fn test_lookups() {
        let index = starter_index();
        assert_eq!(index.len(), 3);
        assert_eq!(index.find_by_id(4).map(|e| e.name.as_str()), Some("charmander"));
        assert!(index.find_by_id(25).is_none());
        assert_eq!(index.group_of("squirtle"), Some(1));
        assert!(index.categories_of("bulbasaur").unwrap().contains("poison"));
        assert_eq!(index.category_names(), &["fire", "grass", "poison", "water"]);
        assert_eq!(index.group_count(), 1);
    }

    #[test]
    fn test_empty_index() {
        let index = CatalogIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.group_count(), 0);
        assert!(index.category_names().is_empty());
    }
}
