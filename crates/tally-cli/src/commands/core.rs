//! Shared command utilities
//!
//! This module contains:
//! - `open_store` - Load the JSON snapshot into a store
//! - `resolve_user` - Pick the user whose records are analysed
//! - `resolve_month` - Parse --month, defaulting to the current local month
//! - `load_advisor` - Build the advisor from the resolved config

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tally_core::{Advisor, AdvisorConfig, MemoryStore, Snapshot, YearMonth};

/// Load and validate the transaction snapshot
pub fn open_store(path: &Path) -> Result<MemoryStore> {
    let snapshot = Snapshot::load(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    MemoryStore::from_snapshot(snapshot)
        .with_context(|| format!("Invalid record in {}", path.display()))
}

/// Use the requested user, or the only user present in the snapshot
pub fn resolve_user(store: &MemoryStore, requested: Option<&str>) -> Result<String> {
    if let Some(user) = requested {
        return Ok(user.to_string());
    }

    let users = store.users();
    match users.as_slice() {
        // An empty snapshot reads as empty for any id
        [] => Ok(String::new()),
        [only] => Ok(only.to_string()),
        many => anyhow::bail!(
            "Snapshot holds records for {} users ({}). Pass --user.",
            many.len(),
            many.join(", ")
        ),
    }
}

/// Parse a YYYY-MM month, or fall back to the current local month
pub fn resolve_month(month: Option<&str>) -> Result<YearMonth> {
    match month {
        Some(m) => m
            .parse::<YearMonth>()
            .with_context(|| format!("Invalid --month {} (use YYYY-MM)", m)),
        None => Ok(YearMonth::from_date(Local::now().date_naive())),
    }
}

/// Advisor with thresholds, currency and disabled rules from the config
pub fn load_advisor(path: Option<&Path>) -> Result<Advisor> {
    let config = AdvisorConfig::load(path).context("Failed to load advisor config")?;
    Ok(Advisor::with_config(config))
}
