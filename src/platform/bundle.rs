//! The system secret bundle: the fixed set of named secrets a deployment
//! needs, the account/site coordinate they are written at, and the per-write
//! settlement outcomes of a provisioning run.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{PlatformError, Result};
use super::types::SecretString;

/// The named secrets that make up one system bundle.
///
/// Using an enum instead of bare strings means a typo cannot silently create
/// a wrong key in the remote store. The serde representation matches the
/// remote key exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecretKind {
    GithubToken,
    AirtableToken,
    PlatformToken,
    /// The serialized account/site coordinate, stored so the deployed
    /// application can recover its own platform location at runtime.
    PlatformMeta,
    /// Minted fresh on every provisioning run; never taken from the input
    /// bundle, so re-provisioning rotates it.
    SigningSecret,
    WebflowTokens,
}

impl SecretKind {
    /// All kinds, in the order they are submitted during provisioning.
    pub const ALL: [SecretKind; 6] = [
        SecretKind::GithubToken,
        SecretKind::AirtableToken,
        SecretKind::PlatformToken,
        SecretKind::PlatformMeta,
        SecretKind::SigningSecret,
        SecretKind::WebflowTokens,
    ];

    /// The key under which this secret is stored remotely.
    pub fn remote_key(self) -> &'static str {
        match self {
            SecretKind::GithubToken => "GITHUB_TOKEN",
            SecretKind::AirtableToken => "AIRTABLE_TOKEN",
            SecretKind::PlatformToken => "PLATFORM_TOKEN",
            SecretKind::PlatformMeta => "PLATFORM_META",
            SecretKind::SigningSecret => "SIGNING_SECRET",
            SecretKind::WebflowTokens => "WEBFLOW_TOKENS",
        }
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.remote_key())
    }
}

/// The coordinate at which secrets are written or read on the platform:
/// a site belonging to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountScope {
    pub account_id: String,
    pub site_id: String,
}

impl AccountScope {
    pub fn new(account_id: impl Into<String>, site_id: impl Into<String>) -> Self {
        Self { account_id: account_id.into(), site_id: site_id.into() }
    }

    /// Reject malformed coordinates before they reach a request path or
    /// query string. Called before any provisioning write is dispatched.
    pub fn validate(&self) -> Result<()> {
        if let Some(reason) = component_violation(&self.account_id) {
            return Err(PlatformError::invalid_scope(format!("account_id {}", reason)));
        }
        if let Some(reason) = component_violation(&self.site_id) {
            return Err(PlatformError::invalid_scope(format!("site_id {}", reason)));
        }
        Ok(())
    }
}

impl fmt::Display for AccountScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.account_id, self.site_id)
    }
}

/// Checks one identifier destined for a URL path or query component.
/// Returns the violation, or `None` when the component is acceptable.
pub(crate) fn component_violation(component: &str) -> Option<&'static str> {
    if component.is_empty() {
        return Some("cannot be empty");
    }
    if component.len() > 128 {
        return Some("exceeds maximum length of 128 characters");
    }
    if component.contains('/') {
        return Some("cannot contain '/'");
    }
    if component.contains(['?', '&', '#', '=']) {
        return Some("cannot contain URL query characters");
    }
    if component.contains(char::is_whitespace) {
        return Some("cannot contain whitespace");
    }
    if component.contains("..") {
        return Some("cannot contain '..'");
    }
    None
}

/// The input bundle for one provisioning run. Constructed by the caller per
/// request and discarded after use; never persisted locally.
///
/// The serde field names match the camelCase payload produced by the RPC
/// collaborator that fronts this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSecrets {
    pub github_token: SecretString,
    pub airtable_token: SecretString,
    pub platform_token: SecretString,
    /// The account/site the bundle is provisioned to.
    pub platform_site_meta: AccountScope,
    pub webflow_tokens: SecretString,
}

/// The independent outcome of one secret write within a provisioning run.
#[derive(Debug)]
pub struct Settlement {
    pub kind: SecretKind,
    pub outcome: std::result::Result<(), PlatformError>,
}

impl Settlement {
    pub fn fulfilled(kind: SecretKind) -> Self {
        Self { kind, outcome: Ok(()) }
    }

    pub fn rejected(kind: SecretKind, error: PlatformError) -> Self {
        Self { kind, outcome: Err(error) }
    }

    pub fn is_fulfilled(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The rejection error, if any.
    pub fn error(&self) -> Option<&PlatformError> {
        self.outcome.as_ref().err()
    }
}

/// Which required secrets exist at a scope, and which are absent.
///
/// A presence check runs before an operation that assumes a fully
/// provisioned site, so a redeploy does not silently overwrite a live
/// signing secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceReport {
    pub present: Vec<SecretKind>,
    pub missing: Vec<SecretKind>,
}

impl PresenceReport {
    /// True when every required secret exists at the scope.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
