//! Saving tip rules
//!
//! Each rule is a tagged variant carrying its own predicate and tip template.
//! Rules are independent: each one looks at the same [`TipContext`] and
//! contributes zero or one tip. The good/improve savings pair is mutually
//! exclusive by construction of their predicates.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::MonthlyAnalytics;
use crate::config::AdvisorConfig;
use crate::error::Error;
use crate::models::Category;
use crate::money::{format_amount, format_percent, format_plain};

use super::types::{SavingTip, TipKind};

/// Everything a rule needs, with the ratios computed once per advice run
pub struct TipContext<'a> {
    pub analytics: &'a MonthlyAnalytics,
    pub config: &'a AdvisorConfig,
    /// Food spending as a percentage of total expenses
    pub food_share: Decimal,
    /// Shopping spending as a percentage of total expenses
    pub shopping_share: Decimal,
    /// Savings as a percentage of income
    pub savings_rate: Decimal,
}

impl<'a> TipContext<'a> {
    pub fn new(analytics: &'a MonthlyAnalytics, config: &'a AdvisorConfig) -> Self {
        Self {
            analytics,
            config,
            food_share: analytics.category_share(Category::Food),
            shopping_share: analytics.category_share(Category::Shopping),
            savings_rate: analytics.savings_rate(),
        }
    }

    /// Monthly savings target derived from income
    pub fn suggested_savings(&self) -> Decimal {
        self.analytics
            .total_income
            .saturating_mul(self.config.recommended_savings_fraction)
    }

    fn money(&self, amount: Decimal) -> String {
        format!("{}{}", self.config.currency_symbol, format_amount(amount))
    }
}

/// A saving tip rule; the variant doubles as the tip's stable id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TipRule {
    /// Expenses exceed a positive income
    Overspending,
    /// Food dominates spending
    FoodHigh,
    /// Shopping takes a large share of spending
    ShoppingHigh,
    /// Savings rate at or above target
    GoodSavings,
    /// Positive savings rate below target
    ImproveSavings,
    /// Recommended monthly savings amount
    SuggestedSavings,
}

impl TipRule {
    /// Every rule in evaluation order
    pub const ALL: [TipRule; 6] = [
        TipRule::Overspending,
        TipRule::FoodHigh,
        TipRule::ShoppingHigh,
        TipRule::GoodSavings,
        TipRule::ImproveSavings,
        TipRule::SuggestedSavings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TipRule::Overspending => "overspending",
            TipRule::FoodHigh => "food-high",
            TipRule::ShoppingHigh => "shopping-high",
            TipRule::GoodSavings => "good-savings",
            TipRule::ImproveSavings => "improve-savings",
            TipRule::SuggestedSavings => "suggested-savings",
        }
    }

    pub fn kind(&self) -> TipKind {
        match self {
            TipRule::Overspending | TipRule::FoodHigh => TipKind::Warning,
            TipRule::GoodSavings => TipKind::Success,
            TipRule::ShoppingHigh | TipRule::ImproveSavings | TipRule::SuggestedSavings => {
                TipKind::Info
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TipRule::Overspending => "Overspending Alert!",
            TipRule::FoodHigh => "High Food Expenses",
            TipRule::ShoppingHigh => "Shopping Tip",
            TipRule::GoodSavings => "Great Savings Rate!",
            TipRule::ImproveSavings => "Savings Goal",
            TipRule::SuggestedSavings => "Recommended Savings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TipRule::Overspending => "⚠️",
            TipRule::FoodHigh => "🍔",
            TipRule::ShoppingHigh => "🛍️",
            TipRule::GoodSavings => "🎉",
            TipRule::ImproveSavings => "💡",
            TipRule::SuggestedSavings => "📊",
        }
    }

    /// Whether the rule fires for this month
    pub fn applies(&self, ctx: &TipContext<'_>) -> bool {
        let a = ctx.analytics;
        let cfg = ctx.config;
        match self {
            TipRule::Overspending => {
                a.total_expenses > a.total_income && a.total_income > Decimal::ZERO
            }
            TipRule::FoodHigh => ctx.food_share > cfg.food_share,
            TipRule::ShoppingHigh => ctx.shopping_share > cfg.shopping_share,
            TipRule::GoodSavings => ctx.savings_rate >= cfg.target_savings_rate,
            TipRule::ImproveSavings => {
                ctx.savings_rate > Decimal::ZERO && ctx.savings_rate < cfg.target_savings_rate
            }
            TipRule::SuggestedSavings => a.total_income > Decimal::ZERO,
        }
    }

    /// Tip text with the month's figures interpolated
    pub fn message(&self, ctx: &TipContext<'_>) -> String {
        let a = ctx.analytics;
        match self {
            TipRule::Overspending => format!(
                "Your expenses ({}) exceed your income ({}). Consider cutting back on non-essential expenses.",
                ctx.money(a.total_expenses),
                ctx.money(a.total_income)
            ),
            TipRule::FoodHigh => format!(
                "Food expenses are {}% of your total spending. Try meal prepping or cooking at home more often to save money.",
                format_percent(ctx.food_share)
            ),
            TipRule::ShoppingHigh => format!(
                "Shopping is {}% of expenses. Consider waiting 24 hours before non-essential purchases.",
                format_percent(ctx.shopping_share)
            ),
            TipRule::GoodSavings => format!(
                "You're saving {}% of your income. Keep up the great work!",
                format_percent(ctx.savings_rate)
            ),
            TipRule::ImproveSavings => format!(
                "You're saving {}%. Aim for {}% savings rate for financial security.",
                format_percent(ctx.savings_rate),
                format_plain(ctx.config.target_savings_rate)
            ),
            TipRule::SuggestedSavings => format!(
                "Based on your income, aim to save {} per month ({}% rule).",
                ctx.money(ctx.suggested_savings()),
                format_plain(ctx.config.recommended_savings_fraction * Decimal::ONE_HUNDRED)
            ),
        }
    }

    /// The tip this rule contributes, if it fires
    pub fn evaluate(&self, ctx: &TipContext<'_>) -> Option<SavingTip> {
        if !self.applies(ctx) {
            return None;
        }
        Some(SavingTip {
            id: *self,
            kind: self.kind(),
            title: self.title().to_string(),
            message: self.message(ctx),
            icon: self.icon().to_string(),
        })
    }
}

impl fmt::Display for TipRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TipRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TipRule::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown tip rule: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::CategoryBreakdown;

    fn analytics(income: i64, expenses: i64, food: i64, shopping: i64) -> MonthlyAnalytics {
        let breakdown = CategoryBreakdown {
            food: Decimal::from(food),
            shopping: Decimal::from(shopping),
            other: Decimal::from(expenses - food - shopping),
            ..Default::default()
        };
        MonthlyAnalytics {
            month: "January".to_string(),
            year: 2024,
            total_income: Decimal::from(income),
            total_expenses: Decimal::from(expenses),
            savings: Decimal::from(income - expenses),
            category_breakdown: breakdown,
        }
    }

    #[test]
    fn test_rule_slugs_parse() {
        for rule in TipRule::ALL {
            assert_eq!(rule.as_str().parse::<TipRule>().unwrap(), rule);
        }
        assert!("food_high".parse::<TipRule>().is_err());
    }

    #[test]
    fn test_overspending_requires_income() {
        let config = AdvisorConfig::default();

        let a = analytics(1000, 1200, 0, 0);
        assert!(TipRule::Overspending.applies(&TipContext::new(&a, &config)));

        let a = analytics(0, 1200, 0, 0);
        assert!(!TipRule::Overspending.applies(&TipContext::new(&a, &config)));
    }

    #[test]
    fn test_overspending_message_groups_amounts() {
        let config = AdvisorConfig::default();
        let a = analytics(1000, 1200, 0, 0);
        let tip = TipRule::Overspending
            .evaluate(&TipContext::new(&a, &config))
            .unwrap();
        assert_eq!(
            tip.message,
            "Your expenses (₹1,200) exceed your income (₹1,000). Consider cutting back on non-essential expenses."
        );
        assert_eq!(tip.kind, TipKind::Warning);
        assert_eq!(tip.icon, "⚠️");
    }

    #[test]
    fn test_suggested_savings_keeps_three_fraction_digits() {
        let config = AdvisorConfig::default();
        let mut a = analytics(0, 0, 0, 0);
        a.total_income = Decimal::new(100001, 2);
        a.savings = a.total_income;

        let tip = TipRule::SuggestedSavings
            .evaluate(&TipContext::new(&a, &config))
            .unwrap();
        assert_eq!(
            tip.message,
            "Based on your income, aim to save ₹200.002 per month (20% rule)."
        );
    }

    #[test]
    fn test_food_share_threshold_is_strict() {
        let config = AdvisorConfig::default();

        let at = analytics(1000, 1000, 400, 0);
        assert!(!TipRule::FoodHigh.applies(&TipContext::new(&at, &config)));

        let over = analytics(1000, 1000, 401, 0);
        let tip = TipRule::FoodHigh
            .evaluate(&TipContext::new(&over, &config))
            .unwrap();
        assert!(tip.message.starts_with("Food expenses are 40.1% of your total spending."));
    }

    #[test]
    fn test_shopping_share_message() {
        let config = AdvisorConfig::default();
        let a = analytics(0, 300, 0, 100);
        let ctx = TipContext::new(&a, &config);
        let tip = TipRule::ShoppingHigh.evaluate(&ctx).unwrap();
        assert_eq!(tip.kind, TipKind::Info);
        assert!(tip.message.starts_with("Shopping is 33.3% of expenses."));
    }

    #[test]
    fn test_savings_pair_is_exclusive() {
        let config = AdvisorConfig::default();
        for (income, expenses) in [(1000, 800), (1000, 900), (1000, 1000), (1000, 1100), (0, 0)] {
            let a = analytics(income, expenses, 0, 0);
            let ctx = TipContext::new(&a, &config);
            assert!(
                !(TipRule::GoodSavings.applies(&ctx) && TipRule::ImproveSavings.applies(&ctx)),
                "both savings rules fired for {}/{}",
                income,
                expenses
            );
        }
    }

    #[test]
    fn test_savings_rate_boundary_is_inclusive() {
        let config = AdvisorConfig::default();
        let a = analytics(1000, 800, 0, 0);
        let ctx = TipContext::new(&a, &config);
        assert!(TipRule::GoodSavings.applies(&ctx));
        assert!(!TipRule::ImproveSavings.applies(&ctx));
    }

    #[test]
    fn test_improve_savings_message() {
        let config = AdvisorConfig::default();
        let a = analytics(1000, 900, 0, 0);
        let tip = TipRule::ImproveSavings
            .evaluate(&TipContext::new(&a, &config))
            .unwrap();
        assert_eq!(
            tip.message,
            "You're saving 10.0%. Aim for 20% savings rate for financial security."
        );
    }

    #[test]
    fn test_suggested_savings_uses_config() {
        let config = AdvisorConfig {
            currency_symbol: "$".to_string(),
            recommended_savings_fraction: Decimal::new(15, 2),
            ..Default::default()
        };
        let a = analytics(12000, 0, 0, 0);
        let tip = TipRule::SuggestedSavings
            .evaluate(&TipContext::new(&a, &config))
            .unwrap();
        assert_eq!(
            tip.message,
            "Based on your income, aim to save $1,800 per month (15% rule)."
        );
    }
}
