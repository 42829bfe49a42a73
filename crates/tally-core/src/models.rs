//! Domain models for Tally

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Expense category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Bills,
    Other,
}

impl Category {
    /// Every category, in breakdown order
    pub const ALL: [Category; 5] = [
        Self::Food,
        Self::Travel,
        Self::Shopping,
        Self::Bills,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Travel => "travel",
            Self::Shopping => "shopping",
            Self::Bills => "bills",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food & Dining",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills & Utilities",
            Self::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Travel => "✈️",
            Self::Shopping => "🛍️",
            Self::Bills => "📄",
            Self::Other => "📦",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "travel" => Ok(Self::Travel),
            "shopping" => Ok(Self::Shopping),
            "bills" => Ok(Self::Bills),
            "other" => Ok(Self::Other),
            _ => Err(Error::InvalidArgument(format!(
                "Unknown category: {} (valid: food, travel, shopping, bills, other)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Anything with a dated amount that can be bucketed into a calendar month
pub trait Entry {
    fn amount(&self) -> Decimal;
    fn date(&self) -> NaiveDate;
}

/// A recorded income
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: Uuid,
    pub user_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub source: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Income {
    /// Check the record against the same rules as a fresh submission
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_text("source", &self.source)
    }
}

impl Entry for Income {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub user_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Check the record against the same rules as a fresh submission
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_text("description", &self.description)
    }
}

impl Entry for Expense {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Income as submitted (for insert or update)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIncome {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub source: String,
    pub date: NaiveDate,
}

impl NewIncome {
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_text("source", &self.source)
    }
}

/// Expense as submitted (for insert or update)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_text("description", &self.description)
    }
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidArgument(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}

fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{} must not be empty", field)));
    }
    Ok(())
}
