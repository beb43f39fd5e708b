//! Dex Core - Shared types for the dex catalog browser
//!
//! This crate provides the vocabulary used by every other crate:
//! - Catalog entries and the category/group lookup tables built at startup
//! - Detail records fetched lazily per entry
//! - Query state and sort keys driving the visible page

pub mod query;
pub mod types;

pub use query::{ParseSortKeyError, QueryState, SortDirection, SortField, SortKey, PAGE_SIZE};
pub use types::{CatalogEntry, CategoryIndex, DetailRecord, GroupIndex, Stat};
