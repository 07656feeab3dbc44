//! The capability contract every hosting platform adapter implements.

use async_trait::async_trait;
use futures::future;
use rand::rngs::OsRng;
use rand::RngCore;
use std::time::Duration;
use tracing::{info, warn};

use super::bundle::{AccountScope, PresenceReport, SecretKind, Settlement, SystemSecrets};
use super::error::{PlatformError, Result};
use super::types::{Account, Site};

/// Length of the generated signing secret, in raw bytes (64 hex characters).
const SIGNING_SECRET_BYTES: usize = 32;

/// Mint a fresh signing secret from the OS CSPRNG.
///
/// The value never comes from the input bundle, so every provisioning run
/// rotates it.
pub fn generate_signing_secret() -> String {
    let mut bytes = [0u8; SIGNING_SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Operations a hosting platform must support so deployments can be
/// provisioned onto it.
///
/// One implementation exists per platform; shared logic never branches on a
/// platform name. The bundle-level operations
/// ([`create_system_secrets`](PlatformClient::create_system_secrets) and
/// [`verify_system_secrets`](PlatformClient::verify_system_secrets)) are
/// provided methods built on the per-secret primitives, so every adapter
/// gets identical settlement semantics.
///
/// # Errors
///
/// Implementations must keep the [`PlatformError`] taxonomy intact: a
/// rejected credential is [`PlatformError::Auth`], an absent key is
/// [`PlatformError::NotFound`], and anything network-shaped is
/// [`PlatformError::Transport`]. Nothing is retried at this layer.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Confirm the held credential authenticates against the platform.
    ///
    /// Returns `Ok(false)` when the platform understood the request but did
    /// not recognize the credential; a transport failure or malformed
    /// response is an error, so callers can tell "bad token" from
    /// "platform unreachable".
    async fn verify_api_key(&self) -> Result<bool>;

    /// Enumerate sites visible to the credential. Read-only.
    async fn list_sites(&self) -> Result<Vec<Site>>;

    /// Enumerate accounts visible to the credential. Read-only.
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Idempotent upsert of one named secret at one scope. Either the
    /// remote call succeeds entirely or this returns an error.
    async fn store_secret(&self, key: &str, value: &str, scope: &AccountScope) -> Result<()>;

    /// Read one named secret at one scope.
    ///
    /// Fails with [`PlatformError::NotFound`] when the remote store holds
    /// zero values for the key; when several values exist, the first is
    /// returned deterministically.
    async fn get_secret(&self, key: &str, scope: &AccountScope) -> Result<String>;

    /// Deadline applied to each individual write dispatched by
    /// [`create_system_secrets`](PlatformClient::create_system_secrets).
    /// All writes start together, so this also bounds the whole batch.
    fn provision_deadline(&self) -> Duration {
        Duration::from_secs(30)
    }

    /// Provision the full system secret bundle at the bundle's scope.
    ///
    /// All six writes are dispatched concurrently and joined
    /// unconditionally: a failing write never cancels or skips a sibling.
    /// The returned settlements follow submission order
    /// ([`SecretKind::ALL`]), one per secret, and the call itself only
    /// fails for setup problems detected before any write is dispatched
    /// (malformed scope, meta serialization). The caller decides whether a
    /// partial result is acceptable.
    async fn create_system_secrets(&self, secrets: &SystemSecrets) -> Result<Vec<Settlement>> {
        let scope = secrets.platform_site_meta.clone();
        scope.validate()?;

        // Both derived values are produced before dispatch so a failure
        // here leaves the remote store untouched.
        let platform_meta = serde_json::to_string(&scope)?;
        let signing_secret = generate_signing_secret();

        let writes: Vec<(SecretKind, String)> = vec![
            (SecretKind::GithubToken, secrets.github_token.expose_secret().to_owned()),
            (SecretKind::AirtableToken, secrets.airtable_token.expose_secret().to_owned()),
            (SecretKind::PlatformToken, secrets.platform_token.expose_secret().to_owned()),
            (SecretKind::PlatformMeta, platform_meta),
            (SecretKind::SigningSecret, signing_secret),
            (SecretKind::WebflowTokens, secrets.webflow_tokens.expose_secret().to_owned()),
        ];

        let deadline = self.provision_deadline();
        let settlements = future::join_all(writes.into_iter().map(|(kind, value)| {
            let scope = scope.clone();
            async move {
                let write = self.store_secret(kind.remote_key(), &value, &scope);
                match tokio::time::timeout(deadline, write).await {
                    Ok(Ok(())) => Settlement::fulfilled(kind),
                    Ok(Err(error)) => Settlement::rejected(kind, error),
                    Err(_) => Settlement::rejected(
                        kind,
                        PlatformError::timeout(
                            format!("store {}", kind.remote_key()),
                            deadline.as_millis() as u64,
                        ),
                    ),
                }
            }
        }))
        .await;

        let rejected = settlements.iter().filter(|s| !s.is_fulfilled()).count();
        if rejected > 0 {
            warn!(
                account_id = %scope.account_id,
                site_id = %scope.site_id,
                rejected,
                total = settlements.len(),
                "System secret provisioning completed with rejected writes"
            );
        } else {
            info!(
                account_id = %scope.account_id,
                site_id = %scope.site_id,
                total = settlements.len(),
                "System secrets provisioned"
            );
        }

        Ok(settlements)
    }

    /// Report which required secrets exist at `scope` and which are absent.
    ///
    /// A key whose read fails with [`PlatformError::NotFound`] counts as
    /// missing; any other failure aborts the whole check, so an unreachable
    /// platform is never reported as "not yet provisioned".
    async fn verify_system_secrets(&self, scope: &AccountScope) -> Result<PresenceReport> {
        scope.validate()?;

        let probes = future::join_all(SecretKind::ALL.into_iter().map(|kind| async move {
            (kind, self.get_secret(kind.remote_key(), scope).await)
        }))
        .await;

        let mut present = Vec::new();
        let mut missing = Vec::new();
        for (kind, outcome) in probes {
            match outcome {
                Ok(_) => present.push(kind),
                Err(err) if err.is_not_found() => missing.push(kind),
                Err(err) => return Err(err),
            }
        }

        Ok(PresenceReport { present, missing })
    }
}
