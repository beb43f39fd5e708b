//! Catalog types shared between the remote client and the query pipeline

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Stat value at which a stat bar is drawn full
const STAT_BAR_MAX: f32 = 200.0;

/// One browsable item from the catalog index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable id assigned by the remote source
    pub id: u32,
    /// Unique, case-sensitive key
    pub name: String,
    /// Locator used to fetch the full detail record
    pub reference: String,
}

impl CatalogEntry {
    pub fn new(id: u32, name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            reference: reference.into(),
        }
    }
}

/// A single base stat, e.g. `hp = 45`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

impl Stat {
    /// Fill fraction for a stat bar, capped at 1.0
    pub fn bar_fraction(&self) -> f32 {
        (self.value as f32 / STAT_BAR_MAX).min(1.0)
    }
}

/// Full per-item payload, needed for display and for height/weight sorting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: u32,
    pub name: String,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    pub categories: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<Stat>,
    /// Front sprite URL; upstream leaves it null for some forms
    pub sprite: Option<String>,
}

impl DetailRecord {
    /// Height in metres
    pub fn height_meters(&self) -> f32 {
        self.height as f32 / 10.0
    }

    /// Weight in kilograms
    pub fn weight_kilograms(&self) -> f32 {
        self.weight as f32 / 10.0
    }
}

/// Item name -> category membership, plus the sorted list of all category names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryIndex {
    memberships: HashMap<String, BTreeSet<String>>,
    names: Vec<String>,
}

impl CategoryIndex {
    /// Build from explicit memberships. Category names are sorted lexicographically.
    pub fn new(memberships: HashMap<String, BTreeSet<String>>, mut names: Vec<String>) -> Self {
        names.sort();
        names.dedup();
        Self { memberships, names }
    }

    /// Add `item` to `category`, registering the category name if it is new
    pub fn insert(&mut self, item: impl Into<String>, category: impl Into<String>) {
        let category = category.into();
        if let Err(pos) = self.names.binary_search(&category) {
            self.names.insert(pos, category.clone());
        }
        self.memberships.entry(item.into()).or_default().insert(category);
    }

    /// Register a category that may have no members
    pub fn register(&mut self, category: impl Into<String>) {
        let category = category.into();
        if let Err(pos) = self.names.binary_search(&category) {
            self.names.insert(pos, category);
        }
    }

    /// Categories of an item, `None` when the item belongs to none
    pub fn categories_of(&self, item: &str) -> Option<&BTreeSet<String>> {
        self.memberships.get(item)
    }

    /// Whether the item belongs to at least one of `selected`
    pub fn intersects(&self, item: &str, selected: &BTreeSet<String>) -> bool {
        self.categories_of(item)
            .map(|cats| !cats.is_disjoint(selected))
            .unwrap_or(false)
    }

    /// All category names, lexicographic
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Item name -> 1-based group id, plus the number of groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupIndex {
    memberships: HashMap<String, u32>,
    count: u32,
}

impl GroupIndex {
    pub fn new(memberships: HashMap<String, u32>, count: u32) -> Self {
        Self { memberships, count }
    }

    /// Assign `item` to `group`, growing the group count when needed
    pub fn insert(&mut self, item: impl Into<String>, group: u32) {
        self.count = self.count.max(group);
        self.memberships.insert(item.into(), group);
    }

    /// Count `group` as existing even if it ends up with no members
    pub fn reserve(&mut self, group: u32) {
        self.count = self.count.max(group);
    }

    pub fn group_of(&self, item: &str) -> Option<u32> {
        self.memberships.get(item).copied()
    }

    /// Number of groups; valid ids are `1..=count`
    pub fn count(&self) -> u32 {
        self.count
    }
}
