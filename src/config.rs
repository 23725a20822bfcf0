//! Startup settings: built-in defaults, overridden by environment variables.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::{BudgetConfig, SavingsGoals};

pub(crate) const MONTHLY_GOAL_VAR: &str = "FINDASH_MONTHLY_GOAL";
pub(crate) const ANNUAL_GOAL_VAR: &str = "FINDASH_ANNUAL_GOAL";
pub(crate) const EXPORT_DIR_VAR: &str = "FINDASH_EXPORT_DIR";

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) budgets: BudgetConfig,
    pub(crate) goals: SavingsGoals,
    pub(crate) export_dir: PathBuf,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut goals = SavingsGoals::default();
        if let Some(raw) = lookup(MONTHLY_GOAL_VAR) {
            goals
                .set_monthly(parse_amount(MONTHLY_GOAL_VAR, &raw)?)
                .with_context(|| format!("Invalid {MONTHLY_GOAL_VAR}"))?;
        }
        if let Some(raw) = lookup(ANNUAL_GOAL_VAR) {
            goals
                .set_annual(parse_amount(ANNUAL_GOAL_VAR, &raw)?)
                .with_context(|| format!("Invalid {ANNUAL_GOAL_VAR}"))?;
        }

        let export_dir = lookup(EXPORT_DIR_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(|s| PathBuf::from(crate::run::shellexpand(s.trim())))
            .unwrap_or_else(default_export_dir);

        Ok(Self {
            budgets: BudgetConfig::default(),
            goals,
            export_dir,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            budgets: BudgetConfig::default(),
            goals: SavingsGoals::default(),
            export_dir: default_export_dir(),
        }
    }
}

fn parse_amount(var: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim()).with_context(|| format!("{var} is not a number: '{raw}'"))
}

fn default_export_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Directory for the TUI log file, created on demand.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "findash", "FinDash")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
