//! Category (type) listing and membership

use reqwest::Client;
use tracing::debug;

use dex_core::CategoryIndex;

use crate::client::handle_response;
use crate::config::ApiConfig;
use crate::error::IntegrationError;
use crate::types::{ResourceList, TypeResponse};

/// API client for the `/type` resource
pub struct CategoryApi {
    client: Client,
    config: ApiConfig,
}

impl CategoryApi {
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// List categories, then fetch each membership list in turn
    pub async fn memberships(&self) -> Result<CategoryIndex, IntegrationError> {
        let url = self
            .config
            .endpoint(&format!("type?limit={}", self.config.category_limit));
        let response = self.client.get(&url).send().await?;
        let list: ResourceList = handle_response(response).await?;

        let mut index = CategoryIndex::default();
        for category in list.results {
            let response = self.client.get(&category.url).send().await?;
            let detail: TypeResponse = handle_response(response).await?;

            index.register(detail.name.clone());
            debug!("Category {} has {} members", detail.name, detail.pokemon.len());
            for member in detail.pokemon {
                index.insert(member.pokemon.name, detail.name.clone());
            }
        }

        Ok(index)
    }
}
