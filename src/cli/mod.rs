//! # Command Line Interface
//!
//! Operator surface for the platform secrets core: credential verification,
//! site/account listing, single-secret reads and writes, full bundle
//! provisioning, and the presence check.

pub mod output;
pub mod platform;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::platform::{AccountScope, NetlifyClient, NetlifyConfig, SecretString};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "sitevault")]
#[command(about = "Platform secrets provisioning tooling")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Platform bearer token (overrides SITEVAULT_NETLIFY_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Base URL for the platform API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format: json or table
    #[arg(long, global = true, default_value = "table")]
    pub output: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify the platform credential authenticates
    Verify,

    /// List sites visible to the credential
    Sites,

    /// List accounts visible to the credential
    Accounts,

    /// Read one secret at an account/site scope
    Get {
        /// Secret key to read
        key: String,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Store one secret at an account/site scope
    Set {
        /// Secret key to write
        key: String,

        /// Secret value
        value: String,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Provision the full system secret bundle at a scope
    Provision(ProvisionArgs),

    /// Report which system secrets are missing at a scope
    Check {
        #[command(flatten)]
        scope: ScopeArgs,
    },
}

/// Account/site coordinate shared by the scoped commands.
#[derive(Args, Debug, Clone)]
pub struct ScopeArgs {
    /// Account the site belongs to
    #[arg(long)]
    pub account_id: String,

    /// Site within the account
    #[arg(long)]
    pub site_id: String,
}

impl ScopeArgs {
    pub fn scope(&self) -> AccountScope {
        AccountScope::new(self.account_id.clone(), self.site_id.clone())
    }
}

/// Inputs for a full bundle provisioning run. Token values fall back to
/// environment variables so they stay out of shell history.
#[derive(Args, Debug)]
pub struct ProvisionArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// GitHub token to provision
    #[arg(long, env = "SITEVAULT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Airtable token to provision
    #[arg(long, env = "SITEVAULT_AIRTABLE_TOKEN", hide_env_values = true)]
    pub airtable_token: String,

    /// Platform token to provision
    #[arg(long, env = "SITEVAULT_PLATFORM_TOKEN", hide_env_values = true)]
    pub platform_token: String,

    /// Webflow token set to provision
    #[arg(long, env = "SITEVAULT_WEBFLOW_TOKENS", hide_env_values = true)]
    pub webflow_tokens: String,
}

/// Execute the parsed CLI against a Netlify adapter built from the
/// environment plus command-line overrides.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().context("Failed to load configuration")?;

    if let Some(token) = cli.token {
        config.platform.token = SecretString::new(token);
    }
    if let Some(base_url) = cli.base_url {
        config.platform.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout {
        config.platform.timeout_seconds = timeout;
    }
    config.validate()?;

    let client = NetlifyClient::new(NetlifyConfig::from(&config.platform))?;
    let format = OutputFormat::from_str(&cli.output)?;

    match cli.command {
        Commands::Verify => platform::verify(&client, format).await,
        Commands::Sites => platform::sites(&client, format).await,
        Commands::Accounts => platform::accounts(&client, format).await,
        Commands::Get { key, scope } => platform::get(&client, &key, &scope.scope()).await,
        Commands::Set { key, value, scope } => {
            platform::set(&client, &key, &value, &scope.scope()).await
        }
        Commands::Provision(args) => platform::provision(&client, args, format).await,
        Commands::Check { scope } => platform::check(&client, &scope.scope(), format).await,
    }
}
