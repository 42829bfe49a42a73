//! Report command implementations
//!
//! Reports render to any writer; `main` passes stdout.

use std::io::Write;

use anyhow::Result;
use tally_core::money::format_percent;
use tally_core::{
    Advisor, Category, CategoryBreakdown, Dashboard, MemoryStore, TipKind, YearMonth,
};

use super::money;

pub fn cmd_summary(
    out: &mut impl Write,
    store: &MemoryStore,
    user: &str,
    period: YearMonth,
    advisor: &Advisor,
    json: bool,
) -> Result<()> {
    let analytics = Dashboard::new(store, advisor).monthly(user, period)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&analytics)?)?;
        return Ok(());
    }

    let symbol = advisor.config().currency_symbol.as_str();

    writeln!(out)?;
    writeln!(out, "📊 {} {} Overview", analytics.month, analytics.year)?;
    writeln!(out, "   ─────────────────────────────────────────────")?;
    writeln!(out, "   Total income:    {}", money(symbol, analytics.total_income))?;
    writeln!(out, "   Total expenses:  {}", money(symbol, analytics.total_expenses))?;
    writeln!(out, "   Net savings:     {}", money(symbol, analytics.savings))?;
    writeln!(
        out,
        "   Savings rate:    {}%",
        format_percent(analytics.savings_rate())
    )?;

    if analytics.total_expenses.is_zero() {
        writeln!(out)?;
        writeln!(out, "   No expenses recorded this month.")?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "   {:20} │ {:>12} │ {:>6}", "Category", "Amount", "%")?;
    writeln!(out, "   ─────────────────────┼──────────────┼───────")?;
    for (category, amount) in analytics.category_breakdown.iter() {
        writeln!(
            out,
            "   {:20} │ {:>12} │ {:>5}%",
            format!("{} {}", category.icon(), category.label()),
            money(symbol, amount),
            format_percent(analytics.category_share(category))
        )?;
    }

    Ok(())
}

pub fn cmd_tips(
    out: &mut impl Write,
    store: &MemoryStore,
    user: &str,
    period: YearMonth,
    advisor: &Advisor,
    json: bool,
) -> Result<()> {
    let tips = Dashboard::new(store, advisor).tips(user, period)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&tips)?)?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "💡 Saving Tips for {} {}", period.name(), period.year())?;
    writeln!(out, "   ─────────────────────────────────────────────")?;

    if tips.is_empty() {
        writeln!(out, "   Nothing to report. Add income and expenses to get tips.")?;
        return Ok(());
    }

    for tip in &tips {
        let marker = match tip.kind {
            TipKind::Warning => "⚠️ ",
            TipKind::Info => "ℹ️ ",
            TipKind::Success => "✅",
        };
        writeln!(out)?;
        writeln!(out, "   {} {} {}", marker, tip.icon, tip.title)?;
        writeln!(out, "      {}", tip.message)?;
    }

    Ok(())
}

pub fn cmd_trend(
    out: &mut impl Write,
    store: &MemoryStore,
    user: &str,
    period: YearMonth,
    months: usize,
    advisor: &Advisor,
    json: bool,
) -> Result<()> {
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }

    let trend = Dashboard::new(store, advisor).trend(user, period, months)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&trend)?)?;
        return Ok(());
    }

    let symbol = advisor.config().currency_symbol.as_str();

    writeln!(out)?;
    writeln!(out, "📈 Income vs Expenses (last {} months)", months)?;
    writeln!(out, "   ─────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "   {:8} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Income", "Expenses", "Savings"
    )?;
    writeln!(out, "   ─────────┼──────────────┼──────────────┼─────────────")?;
    for month in &trend {
        let label = format!("{} {}", &month.month[..3], month.year);
        writeln!(
            out,
            "   {:8} │ {:>12} │ {:>12} │ {:>12}",
            label,
            money(symbol, month.total_income),
            money(symbol, month.total_expenses),
            money(symbol, month.savings)
        )?;
    }

    let combined = trend
        .iter()
        .flat_map(|m| m.category_breakdown.iter())
        .fold(CategoryBreakdown::default(), |mut acc, (category, amount)| {
            acc.add(category, amount);
            acc
        });
    if let Some((category, amount)) = Category::ALL
        .iter()
        .map(|c| (*c, combined.get(*c)))
        .filter(|(_, a)| !a.is_zero())
        .max_by_key(|(_, a)| *a)
    {
        writeln!(out)?;
        writeln!(
            out,
            "   Top category: {} {} ({})",
            category.icon(),
            category.label(),
            money(symbol, amount)
        )?;
    }

    Ok(())
}
