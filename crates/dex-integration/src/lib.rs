//! Dex Integration - PokeAPI client
//!
//! Fetches the catalog index, category (type) and group (generation) memberships,
//! and per-item detail records.

pub mod error;
pub mod config;
pub mod types;
pub mod source;
pub mod pokemon;
pub mod category;
pub mod generation;
pub mod client;

pub use client::CatalogClient;
pub use config::ApiConfig;
pub use error::IntegrationError;
pub use source::CatalogSource;
