//! Monthly analytics
//!
//! Buckets income and expense records into calendar months and reduces them
//! to totals, savings and a per-category breakdown. Everything here is a pure
//! function of its arguments: nothing is cached, so the result always reflects
//! the records handed in at call time.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Category, Entry, Expense, Income};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month in a given year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    /// Zero-based month (0 = January)
    month0: u32,
}

impl YearMonth {
    /// Create from a zero-based month index; fails outside 0..=11
    pub fn new(year: i32, month0: u32) -> Result<Self> {
        if month0 > 11 {
            return Err(Error::InvalidArgument(format!(
                "month must be in 0..=11, got {}",
                month0
            )));
        }
        Ok(Self { year, month0 })
    }

    /// The month a calendar date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// Full English month name ("January")
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }

    /// Three-letter month name ("Jan")
    pub fn short_name(&self) -> &'static str {
        &self.name()[..3]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month0() == self.month0 && date.year() == self.year
    }

    /// The preceding month, wrapping into the previous year after January
    pub fn pred(&self) -> Self {
        if self.month0 == 0 {
            Self {
                year: self.year - 1,
                month0: 11,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 - 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month0 + 1)
    }
}

/// Parses `YYYY-MM` (one-based month, as written by people)
impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument(format!("Invalid month: {} (use YYYY-MM)", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if month == 0 {
            return Err(invalid());
        }
        Self::new(year, month - 1)
    }
}

/// Expense totals for each of the five categories
///
/// Every category is always present, even when nothing was spent in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub food: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub travel: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shopping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub bills: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub other: Decimal,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> Decimal {
        match category {
            Category::Food => self.food,
            Category::Travel => self.travel,
            Category::Shopping => self.shopping,
            Category::Bills => self.bills,
            Category::Other => self.other,
        }
    }

    pub fn add(&mut self, category: Category, amount: Decimal) {
        let slot = match category {
            Category::Food => &mut self.food,
            Category::Travel => &mut self.travel,
            Category::Shopping => &mut self.shopping,
            Category::Bills => &mut self.bills,
            Category::Other => &mut self.other,
        };
        *slot = slot.saturating_add(amount);
    }

    /// (category, total) pairs in the fixed category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn total(&self) -> Decimal {
        self.iter()
            .map(|(_, amount)| amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// Summary of all transactions within one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAnalytics {
    pub month: String,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub savings: Decimal,
    pub category_breakdown: CategoryBreakdown,
}

impl MonthlyAnalytics {
    /// Aggregate the records that fall within `period`
    pub fn for_period(incomes: &[Income], expenses: &[Expense], period: YearMonth) -> Self {
        let total_income = sum_within(incomes, period);

        let mut category_breakdown = CategoryBreakdown::default();
        let mut total_expenses = Decimal::ZERO;
        for expense in expenses.iter().filter(|e| period.contains(e.date)) {
            total_expenses = total_expenses.saturating_add(expense.amount);
            category_breakdown.add(expense.category, expense.amount);
        }

        tracing::debug!(
            period = %period,
            total_income = %total_income,
            total_expenses = %total_expenses,
            "Computed monthly analytics"
        );

        Self {
            month: period.name().to_string(),
            year: period.year(),
            total_income,
            total_expenses,
            savings: total_income.saturating_sub(total_expenses),
            category_breakdown,
        }
    }

    /// Share of total expenses spent in `category`, as a percentage (0 when nothing was spent)
    pub fn category_share(&self, category: Category) -> Decimal {
        percentage(self.category_breakdown.get(category), self.total_expenses)
    }

    /// Savings as a percentage of income (0 when there is no income)
    pub fn savings_rate(&self) -> Decimal {
        percentage(self.savings, self.total_income)
    }
}

/// Compute analytics for a zero-based `month` (0-11) and `year`.
///
/// Fails with [`Error::InvalidArgument`] when `month` is out of range.
pub fn compute_monthly_analytics(
    incomes: &[Income],
    expenses: &[Expense],
    month: u32,
    year: i32,
) -> Result<MonthlyAnalytics> {
    let period = YearMonth::new(year, month)?;
    Ok(MonthlyAnalytics::for_period(incomes, expenses, period))
}

/// Analytics for the `count` months ending at `reference`, oldest first
pub fn trailing_months(
    incomes: &[Income],
    expenses: &[Expense],
    reference: YearMonth,
    count: usize,
) -> Vec<MonthlyAnalytics> {
    let mut periods = Vec::with_capacity(count);
    let mut period = reference;
    for _ in 0..count {
        periods.push(period);
        period = period.pred();
    }

    periods
        .into_iter()
        .rev()
        .map(|p| MonthlyAnalytics::for_period(incomes, expenses, p))
        .collect()
}

fn sum_within<T: Entry>(entries: &[T], period: YearMonth) -> Decimal {
    entries
        .iter()
        .filter(|e| period.contains(e.date()))
        .map(Entry::amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `part` as a percentage of `whole`; 0 for an empty whole, clamped to the
/// representable range when the ratio overflows
fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            tracing::debug!(part = %part, whole = %whole, "Percentage overflowed, clamping");
            if part.is_sign_negative() == whole.is_sign_negative() {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn income(amount: i64, date: NaiveDate) -> Income {
        Income {
            id: Uuid::new_v4(),
            user_id: "u1".to_string(),
            amount: Decimal::from(amount),
            source: "Salary".to_string(),
            date,
            created_at: Utc::now(),
        }
    }

    fn expense(amount: i64, category: Category, date: NaiveDate) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            user_id: "u1".to_string(),
            amount: Decimal::from(amount),
            category,
            description: "Test".to_string(),
            date,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_january_example() {
        let incomes = vec![income(500, date(2024, 1, 5))];
        let expenses = vec![
            expense(300, Category::Food, date(2024, 1, 10)),
            expense(100, Category::Travel, date(2024, 1, 20)),
        ];

        let a = compute_monthly_analytics(&incomes, &expenses, 0, 2024).unwrap();

        assert_eq!(a.month, "January");
        assert_eq!(a.year, 2024);
        assert_eq!(a.total_income, Decimal::from(500));
        assert_eq!(a.total_expenses, Decimal::from(400));
        assert_eq!(a.savings, Decimal::from(100));
        assert_eq!(a.category_breakdown.food, Decimal::from(300));
        assert_eq!(a.category_breakdown.travel, Decimal::from(100));
        assert_eq!(a.category_breakdown.shopping, Decimal::ZERO);
        assert_eq!(a.category_breakdown.bills, Decimal::ZERO);
        assert_eq!(a.category_breakdown.other, Decimal::ZERO);
    }

    #[test]
    fn test_filters_other_months_and_years() {
        let incomes = vec![
            income(500, date(2024, 1, 31)),
            income(700, date(2024, 2, 1)),
            income(900, date(2023, 1, 15)),
        ];
        let expenses = vec![
            expense(50, Category::Bills, date(2023, 12, 31)),
            expense(20, Category::Bills, date(2024, 1, 1)),
        ];

        let a = compute_monthly_analytics(&incomes, &expenses, 0, 2024).unwrap();
        assert_eq!(a.total_income, Decimal::from(500));
        assert_eq!(a.total_expenses, Decimal::from(20));
        assert_eq!(a.category_breakdown.bills, Decimal::from(20));
    }

    #[test]
    fn test_empty_month_is_all_zero() {
        let a = compute_monthly_analytics(&[], &[], 5, 2030).unwrap();
        assert_eq!(a.month, "June");
        assert_eq!(a.total_income, Decimal::ZERO);
        assert_eq!(a.total_expenses, Decimal::ZERO);
        assert_eq!(a.savings, Decimal::ZERO);
        assert_eq!(a.category_breakdown, CategoryBreakdown::default());
    }

    #[test]
    fn test_month_out_of_range() {
        let err = compute_monthly_analytics(&[], &[], 12, 2024).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_negative_savings() {
        let incomes = vec![income(1000, date(2024, 3, 1))];
        let expenses = vec![expense(1200, Category::Shopping, date(2024, 3, 2))];
        let a = compute_monthly_analytics(&incomes, &expenses, 2, 2024).unwrap();
        assert_eq!(a.savings, Decimal::from(-200));
        assert_eq!(a.savings_rate(), Decimal::from(-20));
    }

    #[test]
    fn test_breakdown_sums_to_total_with_fractions() {
        let day = date(2024, 4, 3);
        let amounts = ["0.1", "0.2", "19.99", "1000.01", "3.33"];
        let expenses: Vec<Expense> = amounts
            .iter()
            .zip(Category::ALL.iter().cycle())
            .map(|(a, c)| Expense {
                amount: a.parse().unwrap(),
                ..expense(1, *c, day)
            })
            .collect();

        let a = compute_monthly_analytics(&[], &expenses, 3, 2024).unwrap();
        assert_eq!(a.category_breakdown.total(), a.total_expenses);
        assert_eq!(a.total_expenses, "1023.63".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_ratios_guard_zero_denominators() {
        let a = compute_monthly_analytics(&[], &[], 0, 2024).unwrap();
        assert_eq!(a.category_share(Category::Food), Decimal::ZERO);
        assert_eq!(a.savings_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_savings_rate_clamps_instead_of_overflowing() {
        let mut tiny = income(1, date(2024, 1, 5));
        tiny.amount = Decimal::new(1, 7);
        let mut huge = expense(1, Category::Food, date(2024, 1, 9));
        huge.amount = Decimal::from_i128_with_scale(10_i128.pow(22), 0);

        let a = compute_monthly_analytics(&[tiny], &[huge], 0, 2024).unwrap();
        assert_eq!(a.savings_rate(), Decimal::MIN);
        assert_eq!(a.category_share(Category::Food), Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_totals_saturate_at_decimal_max() {
        let mut first = expense(1, Category::Bills, date(2024, 6, 1));
        first.amount = Decimal::MAX;
        let second = first.clone();

        let a = compute_monthly_analytics(&[], &[first, second], 5, 2024).unwrap();
        assert_eq!(a.total_expenses, Decimal::MAX);
        assert_eq!(a.category_breakdown.bills, Decimal::MAX);
        assert_eq!(a.category_breakdown.total(), Decimal::MAX);
        assert_eq!(a.savings, -Decimal::MAX);
    }

    #[test]
    fn test_analytics_json_amounts_are_numbers() {
        let incomes = vec![income(500, date(2024, 1, 5))];
        let expenses = vec![expense(120, Category::Travel, date(2024, 1, 7))];
        let a = compute_monthly_analytics(&incomes, &expenses, 0, 2024).unwrap();

        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["totalIncome"].as_f64(), Some(500.0));
        assert_eq!(json["savings"].as_f64(), Some(380.0));
        assert_eq!(json["categoryBreakdown"]["travel"].as_f64(), Some(120.0));
        assert_eq!(json["categoryBreakdown"]["food"].as_f64(), Some(0.0));
    }

    #[test]
    fn test_year_month_pred_wraps() {
        let jan = YearMonth::new(2024, 0).unwrap();
        assert_eq!(jan.pred(), YearMonth::new(2023, 11).unwrap());
        assert_eq!(jan.pred().name(), "December");
        assert_eq!(jan.short_name(), "Jan");
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let ym: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(ym.month0(), 2);
        assert_eq!(ym.to_string(), "2024-03");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-00".parse::<YearMonth>().is_err());
        assert!("March".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_trailing_months_oldest_first() {
        let incomes = vec![
            income(100, date(2023, 11, 10)),
            income(200, date(2024, 1, 10)),
            income(300, date(2024, 2, 10)),
        ];

        let trend = trailing_months(&incomes, &[], YearMonth::new(2024, 1).unwrap(), 4);
        let labels: Vec<(&str, i32)> = trend.iter().map(|a| (a.month.as_str(), a.year)).collect();
        assert_eq!(
            labels,
            vec![
                ("November", 2023),
                ("December", 2023),
                ("January", 2024),
                ("February", 2024)
            ]
        );
        let totals: Vec<Decimal> = trend.iter().map(|a| a.total_income).collect();
        assert_eq!(
            totals,
            vec![
                Decimal::from(100),
                Decimal::ZERO,
                Decimal::from(200),
                Decimal::from(300)
            ]
        );

        assert!(trailing_months(&incomes, &[], YearMonth::new(2024, 1).unwrap(), 0).is_empty());
    }
}
