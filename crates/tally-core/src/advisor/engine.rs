//! Advisor - runs the tip rules against one month's analytics

use crate::analytics::MonthlyAnalytics;
use crate::config::AdvisorConfig;

use super::rules::{TipContext, TipRule};
use super::types::SavingTip;

/// Ordered rule list plus the settings the rules read
#[derive(Debug, Clone)]
pub struct Advisor {
    rules: Vec<TipRule>,
    config: AdvisorConfig,
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Advisor {
    /// Create an advisor with the built-in rules and default settings
    pub fn new() -> Self {
        Self::with_config(AdvisorConfig::default())
    }

    /// Create an advisor with the built-in rules, minus any the config disables
    pub fn with_config(config: AdvisorConfig) -> Self {
        let mut advisor = Self {
            rules: vec![],
            config,
        };

        for rule in TipRule::ALL {
            if advisor.config.is_enabled(rule) {
                advisor.register(rule);
            }
        }

        advisor
    }

    /// Append a rule; rules run in registration order
    pub fn register(&mut self, rule: TipRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[TipRule] {
        &self.rules
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Evaluate every rule in order against one month's analytics.
    ///
    /// The order of the returned tips is the rule order and is meaningful to
    /// consumers; it is never re-sorted.
    pub fn advise(&self, analytics: &MonthlyAnalytics) -> Vec<SavingTip> {
        let ctx = TipContext::new(analytics, &self.config);

        let tips: Vec<SavingTip> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(&ctx))
            .collect();

        tracing::debug!(
            month = %analytics.month,
            year = analytics.year,
            count = tips.len(),
            "Generated saving tips"
        );

        tips
    }
}

/// Saving tips for one month's analytics with the default rules and settings
pub fn generate_saving_tips(analytics: &MonthlyAnalytics) -> Vec<SavingTip> {
    Advisor::new().advise(analytics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::CategoryBreakdown;
    use rust_decimal::Decimal;

    fn analytics(income: i64, expenses: i64, food: i64) -> MonthlyAnalytics {
        MonthlyAnalytics {
            month: "March".to_string(),
            year: 2024,
            total_income: Decimal::from(income),
            total_expenses: Decimal::from(expenses),
            savings: Decimal::from(income - expenses),
            category_breakdown: CategoryBreakdown {
                food: Decimal::from(food),
                bills: Decimal::from(expenses - food),
                ..Default::default()
            },
        }
    }

    fn ids(tips: &[SavingTip]) -> Vec<&'static str> {
        tips.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_advisor_creation() {
        let advisor = Advisor::new();
        assert_eq!(advisor.rules(), &TipRule::ALL);
    }

    #[test]
    fn test_empty_month_has_no_tips() {
        assert!(generate_saving_tips(&analytics(0, 0, 0)).is_empty());
    }

    #[test]
    fn test_tip_order_follows_rule_order() {
        // overspending + food-high + suggested-savings
        let tips = generate_saving_tips(&analytics(1000, 1200, 600));
        assert_eq!(ids(&tips), vec!["overspending", "food-high", "suggested-savings"]);
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let advisor = Advisor::with_config(AdvisorConfig {
            disabled_rules: vec![TipRule::SuggestedSavings],
            ..Default::default()
        });
        let tips = advisor.advise(&analytics(2000, 1000, 0));
        assert_eq!(ids(&tips), vec!["good-savings"]);
    }

    #[test]
    fn test_advise_is_idempotent() {
        let advisor = Advisor::new();
        let a = analytics(1500, 1300, 700);
        assert_eq!(advisor.advise(&a), advisor.advise(&a));
    }
}
