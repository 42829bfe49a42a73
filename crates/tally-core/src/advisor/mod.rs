//! Advisor - rule-based saving tips
//!
//! Turns one month's [`MonthlyAnalytics`](crate::analytics::MonthlyAnalytics)
//! into an ordered list of saving tips. The advisor never looks at the clock or
//! at other months: the caller picks the month and passes its analytics in.
//!
//! ## Rules (evaluation order)
//!
//! - **overspending** - expenses exceed a positive income
//! - **food-high** - food above 40% of expenses
//! - **shopping-high** - shopping above 30% of expenses
//! - **good-savings** / **improve-savings** - savings rate at/above or below 20%
//! - **suggested-savings** - 20% of income as a monthly target
//!
//! Thresholds come from [`AdvisorConfig`](crate::config::AdvisorConfig).
//!
//! ## Usage
//!
//! ```rust
//! use tally_core::{compute_monthly_analytics, generate_saving_tips};
//!
//! let analytics = compute_monthly_analytics(&[], &[], 0, 2024).unwrap();
//! assert!(generate_saving_tips(&analytics).is_empty());
//! ```

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{generate_saving_tips, Advisor};
pub use rules::{TipContext, TipRule};
pub use types::{SavingTip, TipKind};
