//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Income/expense records and the closed expense category set
//! - Monthly aggregation (totals, category breakdown, savings, trends)
//! - Rule-based saving tips computed from one month's analytics
//! - Transaction store collaborator with an in-memory implementation
//! - Layered TOML configuration for the advisor thresholds
//!
//! The aggregator and advisor are pure: they read the records they are
//! handed and allocate fresh output, so they can be called from any thread
//! without coordination.

pub mod advisor;
pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod money;
pub mod store;

pub use advisor::{generate_saving_tips, Advisor, SavingTip, TipKind, TipRule};
pub use analytics::{
    compute_monthly_analytics, trailing_months, CategoryBreakdown, MonthlyAnalytics, YearMonth,
};
pub use config::AdvisorConfig;
pub use dashboard::{Dashboard, Overview};
pub use error::{Error, Result};
pub use models::{Category, Expense, Income, NewExpense, NewIncome};
pub use store::{MemoryStore, Snapshot, TransactionStore};
