use async_trait::async_trait;
use kubeline_types::{NamespaceScope, ResourceKind, Suggestion};

use super::fetch::{FetchError, ResourceFetcher};

/// Fetcher with no data; every listing is empty.
pub struct NullFetcher;

#[async_trait]
impl ResourceFetcher for NullFetcher {
    async fn fetch(&self, _kind: ResourceKind, _scope: Option<&NamespaceScope>) -> Result<Vec<Suggestion>, FetchError> {
        Ok(Vec::new())
    }
}
