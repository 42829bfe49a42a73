//! Core types for the advisor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

use super::rules::TipRule;

/// Tone of a saving tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipKind {
    /// Something worth a closer look
    Warning,
    /// General advice
    Info,
    /// Positive reinforcement
    Success,
}

impl TipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipKind::Warning => "warning",
            TipKind::Info => "info",
            TipKind::Success => "success",
        }
    }
}

impl fmt::Display for TipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TipKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(TipKind::Warning),
            "info" => Ok(TipKind::Info),
            "success" => Ok(TipKind::Success),
            _ => Err(Error::InvalidArgument(format!("Unknown tip kind: {}", s))),
        }
    }
}

/// A piece of advice produced by one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingTip {
    /// Rule that produced the tip; serialized as its stable slug (e.g. "food-high")
    pub id: TipRule,
    pub kind: TipKind,
    pub title: String,
    pub message: String,
    pub icon: String,
}
