//! Netlify platform adapter.
//!
//! Implements [`PlatformClient`] against Netlify's account and
//! environment-variable API. Secrets live in the env-var store of a site
//! within an account; every store/get call carries the account id in the
//! path and the site id as a query parameter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::bundle::{component_violation, AccountScope};
use super::client::PlatformClient;
use super::error::{PlatformError, Result};
use super::http::RestClient;
use super::types::{Account, EnvVar, EnvVarUpsert, SecretString, Site, User};

/// Default Netlify API base URL.
const DEFAULT_BASE_URL: &str = "https://api.netlify.com/api/v1";

const USER_PATH: &str = "/user";
const SITES_PATH: &str = "/sites";
const ACCOUNTS_PATH: &str = "/accounts/";

/// Configuration for the Netlify adapter.
///
/// The bearer token is supplied explicitly at construction; nothing in this
/// module reads the process environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetlifyConfig {
    /// API base URL. Overridable for tests and proxies.
    pub base_url: String,

    /// Personal access token used as the bearer credential.
    pub token: SecretString,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// Deadline in seconds for each write dispatched during bundle
    /// provisioning. Bounds the whole batch, since all writes start
    /// together.
    pub provision_deadline_seconds: u64,
}

impl Default for NetlifyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: SecretString::default(),
            timeout_seconds: 30,
            provision_deadline_seconds: 60,
        }
    }
}

impl NetlifyConfig {
    /// Configuration with the default API endpoint and the given token.
    pub fn new(token: SecretString) -> Self {
        Self { token, ..Self::default() }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Provisioning write deadline as a `Duration`.
    pub fn provision_deadline(&self) -> Duration {
        Duration::from_secs(self.provision_deadline_seconds)
    }
}

/// Netlify implementation of the platform capability contract.
#[derive(Debug, Clone)]
pub struct NetlifyClient {
    rest: RestClient,
    provision_deadline: Duration,
}

impl NetlifyClient {
    pub fn new(config: NetlifyConfig) -> Result<Self> {
        let rest = RestClient::new(&config.base_url, config.token.clone(), config.timeout())?;
        Ok(Self { rest, provision_deadline: config.provision_deadline() })
    }

    fn env_path(scope: &AccountScope) -> String {
        format!("{}{}/env?site_id={}", ACCOUNTS_PATH, scope.account_id, scope.site_id)
    }

    fn env_key_path(scope: &AccountScope, key: &str) -> String {
        format!("{}{}/env/{}?site_id={}", ACCOUNTS_PATH, scope.account_id, key, scope.site_id)
    }

    fn validate_key(key: &str) -> Result<()> {
        match component_violation(key) {
            Some(reason) => Err(PlatformError::invalid_key(key, reason)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PlatformClient for NetlifyClient {
    async fn verify_api_key(&self) -> Result<bool> {
        match self.rest.get_json::<User>(USER_PATH).await {
            // A user payload without an id means the credential did not
            // resolve to anyone.
            Ok(user) => Ok(user.id.is_some()),
            Err(err) if err.is_auth() => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn list_sites(&self) -> Result<Vec<Site>> {
        self.rest.get_json(SITES_PATH).await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.rest.get_json(ACCOUNTS_PATH).await
    }

    async fn store_secret(&self, key: &str, value: &str, scope: &AccountScope) -> Result<()> {
        Self::validate_key(key)?;
        scope.validate()?;

        let body = vec![EnvVarUpsert::single(key, value)];
        self.rest.post_json(&Self::env_path(scope), &body).await?;

        debug!(key, scope = %scope, "Stored platform secret");
        Ok(())
    }

    async fn get_secret(&self, key: &str, scope: &AccountScope) -> Result<String> {
        Self::validate_key(key)?;
        scope.validate()?;

        let env: EnvVar = match self.rest.get_json(&Self::env_key_path(scope, key)).await {
            Ok(env) => env,
            // The platform answers 404 for a key it has never seen; that is
            // the same condition as a key with zero values.
            Err(PlatformError::Transport { status: Some(404), .. }) => {
                return Err(PlatformError::not_found(key))
            }
            Err(err) => return Err(err),
        };

        // The remote store may hold several values per key; the first is
        // the deterministic choice.
        env.values
            .first()
            .map(|v| v.value.clone())
            .ok_or_else(|| PlatformError::not_found(key))
    }

    fn provision_deadline(&self) -> Duration {
        self.provision_deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = NetlifyConfig::default();
        assert_eq!(config.base_url, "https://api.netlify.com/api/v1");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.provision_deadline_seconds, 60);
        assert!(config.token.is_empty());
    }

    #[test]
    fn test_client_requires_token() {
        let result = NetlifyClient::new(NetlifyConfig::default());
        assert!(matches!(result.unwrap_err(), PlatformError::Config { .. }));
    }

    #[test]
    fn test_env_paths() {
        let scope = AccountScope::new("A1", "S1");
        assert_eq!(NetlifyClient::env_path(&scope), "/accounts/A1/env?site_id=S1");
        assert_eq!(
            NetlifyClient::env_key_path(&scope, "GITHUB_TOKEN"),
            "/accounts/A1/env/GITHUB_TOKEN?site_id=S1"
        );
    }

    #[tokio::test]
    async fn test_malformed_key_rejected_before_dispatch() {
        let config = NetlifyConfig::new(SecretString::new("tok"));
        let client = NetlifyClient::new(config).unwrap();
        let scope = AccountScope::new("A1", "S1");

        // No server is running; an error other than InvalidKey would mean
        // the request went out.
        let err = client.get_secret("bad/key", &scope).await.unwrap_err();
        assert!(matches!(err, PlatformError::InvalidKey { .. }));

        let err = client.store_secret("a key", "v", &scope).await.unwrap_err();
        assert!(matches!(err, PlatformError::InvalidKey { .. }));
    }
}
