//! # Sitevault
//!
//! Sitevault provisions, verifies, and retrieves the secrets an application
//! deployed on a third-party hosting platform needs, by driving that
//! platform's account/environment-variable API on the caller's behalf.
//!
//! ## Architecture
//!
//! ```text
//! CLI / RPC collaborator → PlatformClient contract → Hosting platform API
//!            ↓                      ↓
//!      Configuration        Settlement results
//! ```
//!
//! ## Core Components
//!
//! - **[`platform`]**: the capability contract ([`platform::PlatformClient`])
//!   with one concrete adapter per hosting platform, the authenticated REST
//!   client, and the bundle provisioner that writes the fixed
//!   [`platform::SystemSecrets`] set and settles each write independently
//! - **[`config`]**: environment-driven configuration with validation
//! - **[`observability`]**: structured logging via the tracing ecosystem
//! - **[`cli`]**: operator commands for verification, listing, single-secret
//!   access, provisioning, and presence checks

pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod platform;

// Re-export commonly used types and traits
pub use config::AppConfig;
pub use errors::{Error, Result};
pub use observability::init_logging;
pub use platform::{NetlifyClient, NetlifyConfig, PlatformClient, SystemSecrets};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_available() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "sitevault");
    }
}
