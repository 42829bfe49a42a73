//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_store, resolve_user, resolve_month, load_advisor)
//! - `reports` - Summary, tips and trend reports
//! - `status` - Snapshot validation (check)

pub mod core;
pub mod reports;
pub mod status;

// Re-export command functions for main.rs
pub use core::*;
pub use reports::*;
pub use status::*;

use rust_decimal::Decimal;
use tally_core::money::format_amount;

/// Amount with currency symbol and thousands grouping
pub fn money(symbol: &str, amount: Decimal) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{}{}", symbol, format_amount(amount.abs()))
    } else {
        format!("{}{}", symbol, format_amount(amount))
    }
}
