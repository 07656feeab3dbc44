//! # Configuration Management
//!
//! Application configuration loaded from `SITEVAULT_`-prefixed environment
//! variables, with defaults suitable for local use.

mod settings;

pub use settings::{AppConfig, ObservabilityConfig, PlatformConfig};
