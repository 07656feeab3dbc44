//! Platform command handlers.

use anyhow::Result;
use serde::Serialize;

use crate::platform::{
    AccountScope, NetlifyClient, PlatformClient, SecretString, Settlement, SystemSecrets,
};

use super::output::{print_json, print_table_header, truncate, OutputFormat};
use super::ProvisionArgs;

pub async fn verify(client: &NetlifyClient, format: OutputFormat) -> Result<()> {
    let authenticated = client.verify_api_key().await?;

    match format {
        OutputFormat::Json => {
            print_json(&serde_json::json!({ "authenticated": authenticated }))?
        }
        OutputFormat::Table => {
            if authenticated {
                println!("Credential accepted by the platform");
            } else {
                println!("Credential rejected by the platform");
            }
        }
    }

    if !authenticated {
        anyhow::bail!("credential rejected by the platform");
    }
    Ok(())
}

pub async fn sites(client: &NetlifyClient, format: OutputFormat) -> Result<()> {
    let sites = client.list_sites().await?;

    match format {
        OutputFormat::Json => print_json(&sites)?,
        OutputFormat::Table => {
            print_table_header(&[("ID", 38), ("NAME", 24), ("URL", 40)]);
            for site in &sites {
                println!(
                    "{:<38} {:<24} {}",
                    truncate(&site.id, 38),
                    truncate(&site.name, 24),
                    site.url.as_deref().unwrap_or("-")
                );
            }
            println!("\n{} site(s)", sites.len());
        }
    }
    Ok(())
}

pub async fn accounts(client: &NetlifyClient, format: OutputFormat) -> Result<()> {
    let accounts = client.list_accounts().await?;

    match format {
        OutputFormat::Json => print_json(&accounts)?,
        OutputFormat::Table => {
            print_table_header(&[("ID", 38), ("NAME", 24), ("SLUG", 24)]);
            for account in &accounts {
                println!(
                    "{:<38} {:<24} {}",
                    truncate(&account.id, 38),
                    truncate(&account.name, 24),
                    account.slug.as_deref().unwrap_or("-")
                );
            }
            println!("\n{} account(s)", accounts.len());
        }
    }
    Ok(())
}

pub async fn get(client: &NetlifyClient, key: &str, scope: &AccountScope) -> Result<()> {
    let value = client.get_secret(key, scope).await?;
    // The whole point of the command is to print the value; keep it bare so
    // it can be piped.
    println!("{}", value);
    Ok(())
}

pub async fn set(
    client: &NetlifyClient,
    key: &str,
    value: &str,
    scope: &AccountScope,
) -> Result<()> {
    client.store_secret(key, value, scope).await?;
    println!("Stored {} at {}", key, scope);
    Ok(())
}

/// One settlement as rendered to the operator.
#[derive(Serialize)]
struct SettlementRow {
    key: &'static str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&Settlement> for SettlementRow {
    fn from(settlement: &Settlement) -> Self {
        Self {
            key: settlement.kind.remote_key(),
            status: if settlement.is_fulfilled() { "fulfilled" } else { "rejected" },
            error: settlement.error().map(|e| e.to_string()),
        }
    }
}

pub async fn provision(
    client: &NetlifyClient,
    args: ProvisionArgs,
    format: OutputFormat,
) -> Result<()> {
    let secrets = SystemSecrets {
        github_token: SecretString::new(args.github_token),
        airtable_token: SecretString::new(args.airtable_token),
        platform_token: SecretString::new(args.platform_token),
        platform_site_meta: args.scope.scope(),
        webflow_tokens: SecretString::new(args.webflow_tokens),
    };

    let settlements = client.create_system_secrets(&secrets).await?;
    let rows: Vec<SettlementRow> = settlements.iter().map(SettlementRow::from).collect();

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Table => {
            print_table_header(&[("KEY", 18), ("STATUS", 10), ("ERROR", 48)]);
            for row in &rows {
                println!(
                    "{:<18} {:<10} {}",
                    row.key,
                    row.status,
                    row.error.as_deref().map(|e| truncate(e, 48)).unwrap_or_default()
                );
            }
        }
    }

    let rejected = settlements.iter().filter(|s| !s.is_fulfilled()).count();
    if rejected > 0 {
        anyhow::bail!("provisioning completed with {} of {} writes rejected", rejected, settlements.len());
    }
    Ok(())
}

pub async fn check(
    client: &NetlifyClient,
    scope: &AccountScope,
    format: OutputFormat,
) -> Result<()> {
    let report = client.verify_system_secrets(scope).await?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            print_table_header(&[("KEY", 18), ("PRESENT", 8)]);
            for kind in &report.present {
                println!("{:<18} yes", kind.remote_key());
            }
            for kind in &report.missing {
                println!("{:<18} no", kind.remote_key());
            }
            if report.is_complete() {
                println!("\nAll system secrets present at {}", scope);
            } else {
                println!("\n{} secret(s) missing at {}", report.missing.len(), scope);
            }
        }
    }
    Ok(())
}
