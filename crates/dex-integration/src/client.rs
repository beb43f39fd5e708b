use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use dex_core::{CatalogEntry, CategoryIndex, DetailRecord, GroupIndex};

use crate::category::CategoryApi;
use crate::config::ApiConfig;
use crate::error::IntegrationError;
use crate::generation::GenerationApi;
use crate::pokemon::PokemonApi;
use crate::source::CatalogSource;

/// Facade for all remote catalog interactions.
/// Shares one HTTP client between the per-resource APIs.
pub struct CatalogClient {
    pokemon_api: PokemonApi,
    category_api: CategoryApi,
    generation_api: GenerationApi,
    online: AtomicBool,
}

impl CatalogClient {
    /// Create a client for the given API configuration.
    pub fn new(config: ApiConfig) -> Result<Self, IntegrationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| IntegrationError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            pokemon_api: PokemonApi::new(client.clone(), config.clone()),
            category_api: CategoryApi::new(client.clone(), config.clone()),
            generation_api: GenerationApi::new(client, config),
            online: AtomicBool::new(false),
        })
    }

    /// Fetch one item's full record, surfacing the failure reason.
    pub async fn try_fetch_detail(&self, reference: &str) -> Result<DetailRecord, IntegrationError> {
        self.track(self.pokemon_api.get(reference).await)
    }

    /// Whether the server appears to be online (based on last request result).
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    fn track<T>(&self, result: Result<T, IntegrationError>) -> Result<T, IntegrationError> {
        match &result {
            Ok(_) => self.online.store(true, Ordering::Relaxed),
            Err(IntegrationError::Offline) => self.online.store(false, Ordering::Relaxed),
            _ => {}
        }
        result
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_index(&self) -> Result<Vec<CatalogEntry>, IntegrationError> {
        self.track(self.pokemon_api.list().await)
    }

    async fn fetch_category_memberships(&self) -> Result<CategoryIndex, IntegrationError> {
        self.track(self.category_api.memberships().await)
    }

    async fn fetch_group_memberships(&self) -> Result<GroupIndex, IntegrationError> {
        self.track(self.generation_api.memberships().await)
    }

    async fn fetch_detail(&self, reference: &str) -> Option<DetailRecord> {
        match self.try_fetch_detail(reference).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!("Detail unavailable for {}: {}", reference, e);
                None
            }
        }
    }
}

pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, IntegrationError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(IntegrationError::ServerError {
            status: status.as_u16(),
            message: text,
        });
    }
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve canned `(path prefix, status, body)` responses on a local port, one per connection.
    /// Routes are built from the server's own base URL so bodies can link back to it.
    async fn serve<F>(routes: F) -> String
    where
        F: FnOnce(&str) -> Vec<(String, u16, String)>,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let routes = routes(&base);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else { break };
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, body) = routes
                    .iter()
                    .find(|(prefix, _, _)| path.starts_with(prefix.as_str()))
                    .map(|(_, status, body)| (*status, body.clone()))
                    .unwrap_or((404, "{}".to_string()));

                let reply = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        base
    }

    fn route(path: &str, status: u16, body: impl Into<String>) -> (String, u16, String) {
        (path.to_string(), status, body.into())
    }

    fn client_for(base_url: String) -> CatalogClient {
        CatalogClient::new(ApiConfig {
            base_url,
            timeout_secs: 5,
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_index_parses_ids() {
        let body = r#"{"count": 2, "results": [
            {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
            {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"}
        ]}"#;
        let base = serve(|_| vec![route("/pokemon?limit=2000", 200, body)]).await;
        let client = client_for(base);

        let entries = client.fetch_index().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].id, 4);
        assert!(client.is_online());
    }

    #[tokio::test]
    async fn test_fetch_index_bad_id_is_format_error() {
        let body = r#"{"results": [{"name": "glitch", "url": "https://pokeapi.co/api/v2/pokemon/glitch/"}]}"#;
        let base = serve(|_| vec![route("/pokemon", 200, body)]).await;

        let err = client_for(base).fetch_index().await.unwrap_err();
        assert!(matches!(err, IntegrationError::Format(_)));
        assert!(!err.is_network());
    }

    #[tokio::test]
    async fn test_fetch_index_server_error() {
        let base = serve(|_| vec![route("/pokemon", 503, "down")]).await;

        let err = client_for(base).fetch_index().await.unwrap_err();
        assert!(matches!(err, IntegrationError::ServerError { status: 503, .. }));
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_category_and_group_memberships() {
        let base = serve(|b| {
            vec![
                route(
                    "/type?limit=20",
                    200,
                    format!(
                        r#"{{"results": [{{"name": "water", "url": "{b}/type/11/"}}, {{"name": "fire", "url": "{b}/type/10/"}}]}}"#
                    ),
                ),
                route(
                    "/type/11/",
                    200,
                    r#"{"name": "water", "pokemon": [{"pokemon": {"name": "squirtle", "url": "x/7/"}, "slot": 1}]}"#,
                ),
                route(
                    "/type/10/",
                    200,
                    r#"{"name": "fire", "pokemon": [{"pokemon": {"name": "charmander", "url": "x/4/"}, "slot": 1}]}"#,
                ),
                route(
                    "/generation/1/",
                    200,
                    r#"{"name": "generation-i", "pokemon_species": [{"name": "charmander", "url": "x/4/"}]}"#,
                ),
                route(
                    "/generation/2/",
                    200,
                    r#"{"name": "generation-ii", "pokemon_species": [{"name": "chikorita", "url": "x/152/"}]}"#,
                ),
                route(
                    "/generation",
                    200,
                    format!(
                        r#"{{"results": [{{"name": "generation-i", "url": "{b}/generation/1/"}}, {{"name": "generation-ii", "url": "{b}/generation/2/"}}]}}"#
                    ),
                ),
            ]
        })
        .await;
        let client = client_for(base);

        let categories = client.fetch_category_memberships().await.unwrap();
        assert_eq!(categories.names(), &["fire", "water"]);
        assert!(categories.categories_of("charmander").unwrap().contains("fire"));
        assert!(categories.categories_of("squirtle").unwrap().contains("water"));

        let groups = client.fetch_group_memberships().await.unwrap();
        assert_eq!(groups.count(), 2);
        assert_eq!(groups.group_of("charmander"), Some(1));
        assert_eq!(groups.group_of("chikorita"), Some(2));
    }

    #[tokio::test]
    async fn test_fetch_detail_absorbs_failure() {
        let base = serve(|_| vec![route("/pokemon/1/", 404, "Not Found")]).await;
        let client = client_for(base.clone());
        let reference = format!("{}/pokemon/1/", base);

        assert!(client.fetch_detail(&reference).await.is_none());
        let err = client.try_fetch_detail(&reference).await.unwrap_err();
        assert!(matches!(err, IntegrationError::ServerError { status: 404, .. }));
    }

    #[test]
    fn test_error_type_mapping() {
        let offline = IntegrationError::Offline;
        assert!(offline.to_string().contains("offline"));

        let server = IntegrationError::ServerError { status: 500, message: "Internal".into() };
        assert!(server.to_string().contains("500"));

        let timeout = IntegrationError::Timeout;
        assert!(timeout.to_string().contains("timed out"));

        let format = IntegrationError::Format("bad id".into());
        assert!(format.to_string().contains("bad id"));
    }
}
