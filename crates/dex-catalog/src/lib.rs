//! Dex Catalog - the in-memory catalog and the query pipeline over it
//!
//! Startup builds a [`CatalogIndex`] from the remote source; afterwards a
//! [`Browser`] owns the index, the detail cache and the current query, and turns
//! user intents into pages.

pub mod error;
pub mod index;
pub mod startup;
pub mod cache;
pub mod pipeline;
pub mod intent;
pub mod browser;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::{Browser, Delivery, Ticket};
pub use cache::{DetailCache, DetailEntry};
pub use error::CatalogError;
pub use index::CatalogIndex;
pub use intent::{reduce, Intent};
pub use pipeline::{Page, QueryPipeline};
pub use startup::{InitState, Startup};
