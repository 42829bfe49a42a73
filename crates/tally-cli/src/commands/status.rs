//! Snapshot validation (check)

use std::path::Path;

use anyhow::Result;
use tally_core::TransactionStore;

use super::open_store;

pub fn cmd_check(data_path: &Path) -> Result<()> {
    println!();
    println!("🔍 Checking {}", data_path.display());
    println!("   ─────────────────────────────────────────────");

    if !data_path.exists() {
        anyhow::bail!("Snapshot not found: {}", data_path.display());
    }

    let store = open_store(data_path)?;
    let users = store.users();

    if users.is_empty() {
        println!("   Snapshot is empty.");
        return Ok(());
    }

    println!("   {:24} │ {:>8} │ {:>8}", "User", "Incomes", "Expenses");
    println!("   ─────────────────────────┼──────────┼─────────");
    for user in &users {
        println!(
            "   {:24} │ {:>8} │ {:>8}",
            user,
            store.incomes(user)?.len(),
            store.expenses(user)?.len()
        );
    }

    println!();
    println!("✅ All records valid ({} users)", users.len());

    Ok(())
}
