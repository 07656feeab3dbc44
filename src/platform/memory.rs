//! In-memory platform adapter for testing and local development.
//!
//! Behaves like a hosting platform whose environment-variable store lives in
//! process memory: writes are idempotent upserts, reads return the first of
//! possibly several stored values, and absent keys are
//! [`PlatformError::NotFound`]. Write failures can be injected per key so
//! settlement behavior is testable without a network.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::bundle::AccountScope;
use super::client::PlatformClient;
use super::error::{PlatformError, Result};
use super::types::{Account, Site};

fn storage_key(scope: &AccountScope, key: &str) -> String {
    format!("{}/{}:{}", scope.account_id, scope.site_id, key)
}

/// In-memory [`PlatformClient`]. Secrets are not persisted across restarts.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlatformClient {
    data: Arc<RwLock<HashMap<String, Vec<String>>>>,
    writes_attempted: Arc<AtomicUsize>,
    failing_keys: HashSet<String>,
    authorized: bool,
    sites: Vec<Site>,
    accounts: Vec<Account>,
}

impl MemoryPlatformClient {
    pub fn new() -> Self {
        Self { authorized: true, ..Self::default() }
    }

    /// Make every write to `key` fail with a transport error.
    pub fn fail_writes_for(mut self, key: impl Into<String>) -> Self {
        self.failing_keys.insert(key.into());
        self
    }

    /// Make `verify_api_key` report the credential as rejected.
    pub fn with_revoked_credentials(mut self) -> Self {
        self.authorized = false;
        self
    }

    /// Add a site to the listing fixture.
    pub fn with_site(mut self, site: Site) -> Self {
        self.sites.push(site);
        self
    }

    /// Add an account to the listing fixture.
    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.push(account);
        self
    }

    /// Append an extra value for a key without replacing existing ones,
    /// mimicking a remote store that holds several values per key.
    pub async fn push_value(&self, key: &str, value: &str, scope: &AccountScope) {
        let mut data = self.data.write().await;
        data.entry(storage_key(scope, key)).or_default().push(value.to_owned());
    }

    /// Number of `store_secret` calls attempted, failed ones included.
    pub fn write_count(&self) -> usize {
        self.writes_attempted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlatformClient for MemoryPlatformClient {
    async fn verify_api_key(&self) -> Result<bool> {
        Ok(self.authorized)
    }

    async fn list_sites(&self) -> Result<Vec<Site>> {
        Ok(self.sites.clone())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    async fn store_secret(&self, key: &str, value: &str, scope: &AccountScope) -> Result<()> {
        self.writes_attempted.fetch_add(1, Ordering::SeqCst);

        if self.failing_keys.contains(key) {
            return Err(PlatformError::transport(format!("injected write failure for {}", key)));
        }

        let mut data = self.data.write().await;
        data.insert(storage_key(scope, key), vec![value.to_owned()]);
        Ok(())
    }

    async fn get_secret(&self, key: &str, scope: &AccountScope) -> Result<String> {
        let data = self.data.read().await;

        data.get(&storage_key(scope, key))
            .and_then(|values| values.first())
            .cloned()
            .ok_or_else(|| PlatformError::not_found(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_is_idempotent_upsert() {
        let client = MemoryPlatformClient::new();
        let scope = AccountScope::new("A1", "S1");

        client.store_secret("KEY", "first", &scope).await.unwrap();
        client.store_secret("KEY", "second", &scope).await.unwrap();

        assert_eq!(client.get_secret("KEY", &scope).await.unwrap(), "second");
        assert_eq!(client.write_count(), 2);
    }

    #[tokio::test]
    async fn test_get_missing_key_is_not_found() {
        let client = MemoryPlatformClient::new();
        let scope = AccountScope::new("A1", "S1");

        let err = client.get_secret("ABSENT", &scope).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_multi_value_read_is_deterministic() {
        let client = MemoryPlatformClient::new();
        let scope = AccountScope::new("A1", "S1");

        client.push_value("KEY", "v1", &scope).await;
        client.push_value("KEY", "v2", &scope).await;

        // Repeated reads always return the first stored value.
        assert_eq!(client.get_secret("KEY", &scope).await.unwrap(), "v1");
        assert_eq!(client.get_secret("KEY", &scope).await.unwrap(), "v1");
    }

    #[tokio::test]
    async fn test_injected_failure_still_counts_as_attempt() {
        let client = MemoryPlatformClient::new().fail_writes_for("KEY");
        let scope = AccountScope::new("A1", "S1");

        let err = client.store_secret("KEY", "v", &scope).await.unwrap_err();
        assert!(matches!(err, PlatformError::Transport { .. }));
        assert_eq!(client.write_count(), 1);
    }

    #[tokio::test]
    async fn test_revoked_credentials() {
        let client = MemoryPlatformClient::new().with_revoked_credentials();
        assert!(!client.verify_api_key().await.unwrap());
    }

    #[tokio::test]
    async fn test_listing_fixtures() {
        let client = MemoryPlatformClient::new()
            .with_site(Site {
                id: "s1".into(),
                name: "demo".into(),
                url: None,
                account_slug: None,
            })
            .with_account(Account { id: "a1".into(), name: "team".into(), slug: None });

        assert_eq!(client.list_sites().await.unwrap().len(), 1);
        assert_eq!(client.list_accounts().await.unwrap()[0].id, "a1");
    }
}
