//! Group (generation) listing and membership

use reqwest::Client;
use tracing::debug;

use dex_core::GroupIndex;

use crate::client::handle_response;
use crate::config::ApiConfig;
use crate::error::IntegrationError;
use crate::types::{GenerationResponse, ResourceList};

/// API client for the `/generation` resource
pub struct GenerationApi {
    client: Client,
    config: ApiConfig,
}

impl GenerationApi {
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// List groups in declared order and number them from 1
    pub async fn memberships(&self) -> Result<GroupIndex, IntegrationError> {
        let url = self.config.endpoint("generation");
        let response = self.client.get(&url).send().await?;
        let list: ResourceList = handle_response(response).await?;

        let mut index = GroupIndex::default();
        for (position, group) in list.results.into_iter().enumerate() {
            let group_id = position as u32 + 1;
            let response = self.client.get(&group.url).send().await?;
            let detail: GenerationResponse = handle_response(response).await?;

            index.reserve(group_id);

            debug!("Group {} ({}) has {} species", group_id, detail.name, detail.pokemon_species.len());
            for species in detail.pokemon_species {
                index.insert(species.name, group_id);
            }
        }

        Ok(index)
    }
}
