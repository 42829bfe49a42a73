//! Dashboard service
//!
//! Combines a transaction store, the aggregator and the advisor into the
//! views a front end shows for one user: a month's analytics, its tips and
//! the trailing trend. The reference month is always supplied by the caller.

use serde::Serialize;

use crate::advisor::{Advisor, SavingTip};
use crate::analytics::{trailing_months, MonthlyAnalytics, YearMonth};
use crate::error::Result;
use crate::store::TransactionStore;

/// Everything shown for a reference month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub analytics: MonthlyAnalytics,
    pub tips: Vec<SavingTip>,
    /// Trailing months ending at the reference month, oldest first
    pub trend: Vec<MonthlyAnalytics>,
}

pub struct Dashboard<'a, S: TransactionStore + ?Sized> {
    store: &'a S,
    advisor: &'a Advisor,
}

impl<'a, S: TransactionStore + ?Sized> Dashboard<'a, S> {
    pub fn new(store: &'a S, advisor: &'a Advisor) -> Self {
        Self { store, advisor }
    }

    pub fn monthly(&self, user_id: &str, period: YearMonth) -> Result<MonthlyAnalytics> {
        let incomes = self.store.incomes(user_id)?;
        let expenses = self.store.expenses(user_id)?;
        Ok(MonthlyAnalytics::for_period(&incomes, &expenses, period))
    }

    pub fn tips(&self, user_id: &str, period: YearMonth) -> Result<Vec<SavingTip>> {
        let analytics = self.monthly(user_id, period)?;
        Ok(self.advisor.advise(&analytics))
    }

    pub fn trend(
        &self,
        user_id: &str,
        period: YearMonth,
        months: usize,
    ) -> Result<Vec<MonthlyAnalytics>> {
        let incomes = self.store.incomes(user_id)?;
        let expenses = self.store.expenses(user_id)?;
        Ok(trailing_months(&incomes, &expenses, period, months))
    }

    /// Analytics, tips and trend from a single read of the store
    pub fn overview(&self, user_id: &str, period: YearMonth, trailing: usize) -> Result<Overview> {
        let incomes = self.store.incomes(user_id)?;
        let expenses = self.store.expenses(user_id)?;

        let analytics = MonthlyAnalytics::for_period(&incomes, &expenses, period);
        let tips = self.advisor.advise(&analytics);
        let trend = trailing_months(&incomes, &expenses, period, trailing);

        Ok(Overview {
            analytics,
            tips,
            trend,
        })
    }
}
