//! Advisor configuration
//!
//! Thresholds, the currency symbol and the set of disabled tip rules.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a layered resolution:
//! 1. An explicit path, when the caller passes one (must exist)
//! 2. The override in the data dir (~/.local/share/tally/config/advisor.toml)
//! 3. The embedded defaults (compiled into the binary)
//!
//! Keys missing from a file keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::advisor::TipRule;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/advisor.toml");

/// Settings consumed by the advisor rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    /// Symbol prefixed to amounts in tip messages
    pub currency_symbol: String,
    /// Food share of expenses (percent) above which the food warning fires
    pub food_share: Decimal,
    /// Shopping share of expenses (percent) above which the shopping tip fires
    pub shopping_share: Decimal,
    /// Savings rate (percent) at or above which savings are called healthy
    pub target_savings_rate: Decimal,
    /// Fraction of income recommended as monthly savings
    pub recommended_savings_fraction: Decimal,
    /// Rules that never fire
    pub disabled_rules: Vec<TipRule>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            food_share: Decimal::from(40),
            shopping_share: Decimal::from(30),
            target_savings_rate: Decimal::from(20),
            recommended_savings_fraction: Decimal::new(2, 1),
            disabled_rules: Vec::new(),
        }
    }
}

impl AdvisorConfig {
    /// Load configuration (explicit path, then override location, then embedded default)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => read_config(path)?,
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => read_config(&default_path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    pub fn is_enabled(&self, rule: TipRule) -> bool {
        !self.disabled_rules.contains(&rule)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("advisor.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "Reading advisor config");
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    currency_symbol: Option<String>,
    thresholds: Option<RawThresholds>,
    rules: Option<RawRules>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    food_share: Option<Decimal>,
    shopping_share: Option<Decimal>,
    target_savings_rate: Option<Decimal>,
    recommended_savings_fraction: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawRules {
    disabled: Option<Vec<String>>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AdvisorConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AdvisorConfig::default();

    if let Some(symbol) = raw.currency_symbol {
        config.currency_symbol = symbol;
    }

    if let Some(thresholds) = raw.thresholds {
        if let Some(food) = thresholds.food_share {
            config.food_share = food;
        }
        if let Some(shopping) = thresholds.shopping_share {
            config.shopping_share = shopping;
        }
        if let Some(rate) = thresholds.target_savings_rate {
            if rate <= Decimal::ZERO {
                return Err(Error::Config(format!(
                    "target_savings_rate must be positive, got {}",
                    rate
                )));
            }
            config.target_savings_rate = rate;
        }
        if let Some(fraction) = thresholds.recommended_savings_fraction {
            if fraction <= Decimal::ZERO || fraction > Decimal::ONE {
                return Err(Error::Config(format!(
                    "recommended_savings_fraction must be in (0, 1], got {}",
                    fraction
                )));
            }
            config.recommended_savings_fraction = fraction;
        }
    }

    if let Some(rules) = raw.rules {
        for name in rules.disabled.unwrap_or_default() {
            match name.parse::<TipRule>() {
                Ok(rule) => config.disabled_rules.push(rule),
                Err(_) => {
                    tracing::warn!(rule = %name, "Skipping unknown rule in config");
                }
            }
        }
    }

    Ok(config)
}
