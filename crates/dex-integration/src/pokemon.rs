//! Index listing and per-item detail

use reqwest::Client;
use tracing::debug;

use dex_core::{CatalogEntry, DetailRecord};

use crate::client::handle_response;
use crate::config::ApiConfig;
use crate::error::IntegrationError;
use crate::types::{NamedResource, PokemonResponse, ResourceList};

/// API client for the `/pokemon` resource
pub struct PokemonApi {
    client: Client,
    config: ApiConfig,
}

impl PokemonApi {
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// Fetch up to `index_limit` index records in one call
    pub async fn list(&self) -> Result<Vec<CatalogEntry>, IntegrationError> {
        let url = self
            .config
            .endpoint(&format!("pokemon?limit={}", self.config.index_limit));
        let response = self.client.get(&url).send().await?;

        let list: ResourceList = handle_response(response).await?;
        debug!("Index listed {} of {} records", list.results.len(), list.count);

        list.results
            .into_iter()
            .map(NamedResource::into_entry)
            .collect()
    }

    /// Fetch one item's full record from its reference URL
    pub async fn get(&self, reference: &str) -> Result<DetailRecord, IntegrationError> {
        let response = self.client.get(reference).send().await?;
        let pokemon: PokemonResponse = handle_response(response).await?;
        Ok(pokemon.into())
    }
}
