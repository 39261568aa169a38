//! Role Definitions Checker - Main Entry Point
//!
//! Loads the configured role catalog, validates it and prints every role's
//! resolved capabilities as JSON. Exits non-zero if validation fails.

use anyhow::{Context, Result};
use tracing::info;

use ag_authz::{config, report, RoleGraph};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ag_authz=info".into()),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        definitions = ?config.definitions_path,
        validate_inviters = config.validate_inviters,
        "Checking role definitions"
    );

    let catalog = config
        .load_catalog()
        .context("Failed to read role definitions")?;
    let graph = RoleGraph::load_with(catalog, config.load_options())
        .context("Role definitions failed validation")?;

    let report = report::build(&graph)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!(roles = graph.role_count(), "Role definitions valid");

    Ok(())
}
