//! Platform-secrets abstraction.
//!
//! This module is the core of the crate: a capability contract implemented
//! per hosting platform, plus the bulk-provisioning workflow that writes the
//! fixed [`SystemSecrets`] bundle to a target account/site and reports one
//! independent [`Settlement`] per secret.
//!
//! # Architecture
//!
//! The [`PlatformClient`] trait defines the per-secret primitives each
//! platform adapter supplies (`verify_api_key`, `list_sites`,
//! `list_accounts`, `store_secret`, `get_secret`) and provides the
//! bundle-level operations on top of them:
//! - **create_system_secrets**: fan all six writes out concurrently, join
//!   them unconditionally, and return per-write settlements in submission
//!   order.
//! - **verify_system_secrets**: probe every required key at a scope and
//!   report which are missing.
//!
//! Adding support for another hosting platform means adding another
//! implementation of the trait; shared logic never branches on a platform
//! name.
//!
//! # Example
//!
//! ```rust,no_run
//! use sitevault::platform::{
//!     AccountScope, NetlifyClient, NetlifyConfig, PlatformClient, SecretString, SystemSecrets,
//! };
//!
//! # async fn provision() -> sitevault::platform::Result<()> {
//! let config = NetlifyConfig::new(SecretString::new("netlify-token"));
//! let client = NetlifyClient::new(config)?;
//!
//! let secrets = SystemSecrets {
//!     github_token: SecretString::new("gh-token"),
//!     airtable_token: SecretString::new("airtable-token"),
//!     platform_token: SecretString::new("platform-token"),
//!     platform_site_meta: AccountScope::new("account-id", "site-id"),
//!     webflow_tokens: SecretString::new("webflow-tokens"),
//! };
//!
//! let settlements = client.create_system_secrets(&secrets).await?;
//! for settlement in &settlements {
//!     if let Some(error) = settlement.error() {
//!         eprintln!("{} failed: {}", settlement.kind, error);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Secret values travel as [`SecretString`] and never appear in logs or
//! serialized output; adapters log key names and scopes only.

pub mod bundle;
pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod netlify;
pub mod types;

pub use bundle::{AccountScope, PresenceReport, SecretKind, Settlement, SystemSecrets};
pub use client::{generate_signing_secret, PlatformClient};
pub use error::{PlatformError, Result};
pub use http::RestClient;
pub use memory::MemoryPlatformClient;
pub use netlify::{NetlifyClient, NetlifyConfig};
pub use types::{Account, EnvVar, EnvVarUpsert, EnvVarValue, SecretString, Site, User};
