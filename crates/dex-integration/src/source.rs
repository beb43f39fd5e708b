use async_trait::async_trait;

use dex_core::{CatalogEntry, CategoryIndex, DetailRecord, GroupIndex};

use crate::error::IntegrationError;

/// Read-only access to the remote catalog.
///
/// Every call is an idempotent GET against the upstream service. `fetch_detail`
/// is the one call that never fails: an unreachable or malformed item comes back
/// as `None` so a batch of detail fetches can carry on without it.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All index entries, ids parsed from their reference URLs
    async fn fetch_index(&self) -> Result<Vec<CatalogEntry>, IntegrationError>;

    /// Item -> category memberships, one round-trip per category
    async fn fetch_category_memberships(&self) -> Result<CategoryIndex, IntegrationError>;

    /// Item -> group id, ids assigned by declaration order of the groups
    async fn fetch_group_memberships(&self) -> Result<GroupIndex, IntegrationError>;

    /// One item's full record, `None` when it cannot be resolved
    async fn fetch_detail(&self, reference: &str) -> Option<DetailRecord>;
}
