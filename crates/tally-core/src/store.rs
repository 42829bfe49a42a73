//! Transaction store
//!
//! The aggregator and advisor never own transaction data; a [`TransactionStore`]
//! is handed to whatever needs records for a user. [`MemoryStore`] is the
//! in-process implementation, seeded from and exported to a JSON [`Snapshot`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Expense, Income, NewExpense, NewIncome};

/// Read access to a user's transactions
pub trait TransactionStore {
    fn incomes(&self, user_id: &str) -> Result<Vec<Income>>;
    fn expenses(&self, user_id: &str) -> Result<Vec<Expense>>;
}

/// Serialized form of a set of records (any number of users)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Snapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Default)]
struct UserLedger {
    incomes: Vec<Income>,
    expenses: Vec<Expense>,
}

/// In-memory store keyed by user id
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    ledgers: BTreeMap<String, UserLedger>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot, rejecting the first invalid record
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut store = Self::new();

        for income in snapshot.incomes {
            income.validate().map_err(|e| {
                tracing::warn!(id = %income.id, error = %e, "Rejected income record");
                e
            })?;
            store.ledger_mut(&income.user_id).incomes.push(income);
        }

        for expense in snapshot.expenses {
            expense.validate().map_err(|e| {
                tracing::warn!(id = %expense.id, error = %e, "Rejected expense record");
                e
            })?;
            store.ledger_mut(&expense.user_id).expenses.push(expense);
        }

        tracing::info!(users = store.ledgers.len(), "Loaded transaction snapshot");
        Ok(store)
    }

    /// Export every user's records
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for ledger in self.ledgers.values() {
            snapshot.incomes.extend(ledger.incomes.iter().cloned());
            snapshot.expenses.extend(ledger.expenses.iter().cloned());
        }
        snapshot
    }

    /// User ids with at least one record, sorted
    pub fn users(&self) -> Vec<&str> {
        self.ledgers.keys().map(String::as_str).collect()
    }

    pub fn add_income(&mut self, user_id: &str, new: NewIncome) -> Result<Income> {
        new.validate()?;
        let income = Income {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            amount: new.amount,
            source: new.source,
            date: new.date,
            created_at: Utc::now(),
        };
        self.ledger_mut(user_id).incomes.push(income.clone());
        tracing::debug!(user = user_id, id = %income.id, "Added income");
        Ok(income)
    }

    /// Replace amount, source and date; id, owner and creation time are kept
    pub fn update_income(&mut self, user_id: &str, id: Uuid, new: NewIncome) -> Result<Income> {
        new.validate()?;
        let income = self
            .ledgers
            .get_mut(user_id)
            .and_then(|l| l.incomes.iter_mut().find(|i| i.id == id))
            .ok_or_else(|| Error::NotFound(format!("income {}", id)))?;

        income.amount = new.amount;
        income.source = new.source;
        income.date = new.date;
        Ok(income.clone())
    }

    pub fn delete_income(&mut self, user_id: &str, id: Uuid) -> Result<()> {
        let incomes = &mut self
            .ledgers
            .get_mut(user_id)
            .ok_or_else(|| Error::NotFound(format!("income {}", id)))?
            .incomes;

        let before = incomes.len();
        incomes.retain(|i| i.id != id);
        if incomes.len() == before {
            return Err(Error::NotFound(format!("income {}", id)));
        }
        Ok(())
    }

    pub fn add_expense(&mut self, user_id: &str, new: NewExpense) -> Result<Expense> {
        new.validate()?;
        let expense = Expense {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            amount: new.amount,
            category: new.category,
            description: new.description,
            date: new.date,
            created_at: Utc::now(),
        };
        self.ledger_mut(user_id).expenses.push(expense.clone());
        tracing::debug!(user = user_id, id = %expense.id, "Added expense");
        Ok(expense)
    }

    /// Replace amount, category, description and date
    pub fn update_expense(&mut self, user_id: &str, id: Uuid, new: NewExpense) -> Result<Expense> {
        new.validate()?;
        let expense = self
            .ledgers
            .get_mut(user_id)
            .and_then(|l| l.expenses.iter_mut().find(|e| e.id == id))
            .ok_or_else(|| Error::NotFound(format!("expense {}", id)))?;

        expense.amount = new.amount;
        expense.category = new.category;
        expense.description = new.description;
        expense.date = new.date;
        Ok(expense.clone())
    }

    pub fn delete_expense(&mut self, user_id: &str, id: Uuid) -> Result<()> {
        let expenses = &mut self
            .ledgers
            .get_mut(user_id)
            .ok_or_else(|| Error::NotFound(format!("expense {}", id)))?
            .expenses;

        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() == before {
            return Err(Error::NotFound(format!("expense {}", id)));
        }
        Ok(())
    }

    fn ledger_mut(&mut self, user_id: &str) -> &mut UserLedger {
        self.ledgers.entry(user_id.to_string()).or_default()
    }
}

impl TransactionStore for MemoryStore {
    fn incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        Ok(self
            .ledgers
            .get(user_id)
            .map(|l| l.incomes.clone())
            .unwrap_or_default())
    }

    fn expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        Ok(self
            .ledgers
            .get(user_id)
            .map(|l| l.expenses.clone())
            .unwrap_or_default())
    }
}
