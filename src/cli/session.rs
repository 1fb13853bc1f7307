//! Collaborator-side session state: accumulating asset entries until a
//! `Portfolio` can be built. The builder is the only mutable piece of the
//! interactive flow; the core only ever sees the finished portfolio.

use super::prompt::Prompter;
use crate::core::config::AppConfig;
use crate::core::portfolio::Portfolio;
use anyhow::Result;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Target percentages may be entered on any scale; they are accepted as-is
/// when they sum to 100% within this tolerance and rescaled otherwise.
const TARGET_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone)]
struct AssetEntry {
    name: String,
    value: f64,
    target_pct: f64,
}

/// Accumulates per-asset input and normalizes targets on build.
#[derive(Debug, Default)]
pub struct PortfolioBuilder {
    entries: Vec<AssetEntry>,
}

/// A finished portfolio, plus whether the target weights had to be rescaled
/// to sum to one (the caller should tell the user when they were).
#[derive(Debug)]
pub struct BuiltPortfolio {
    pub portfolio: Portfolio,
    pub was_normalized: bool,
}

impl PortfolioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut builder = Self::new();
        for asset in &config.assets {
            builder.add_asset(&asset.name, asset.value, asset.target);
        }
        builder
    }

    pub fn add_asset(&mut self, name: &str, value: f64, target_pct: f64) {
        self.entries.push(AssetEntry {
            name: name.to_string(),
            value,
            target_pct,
        });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub fn build(self) -> BuiltPortfolio {
        let mut holdings = BTreeMap::new();
        let mut targets = BTreeMap::new();
        for entry in &self.entries {
            holdings.insert(entry.name.clone(), entry.value);
            targets.insert(entry.name.clone(), entry.target_pct / 100.0);
        }

        let target_sum: f64 = targets.values().sum();
        let was_normalized = target_sum > 0.0 && (target_sum - 1.0).abs() > TARGET_SUM_TOLERANCE;
        if was_normalized {
            for weight in targets.values_mut() {
                *weight /= target_sum;
            }
        }

        BuiltPortfolio {
            portfolio: Portfolio::new(holdings, targets),
            was_normalized,
        }
    }
}

/// Produces the session's portfolio: from the config file when one is
/// loaded, otherwise by walking the user through entering each asset.
/// Returns the portfolio together with the display currency.
pub fn obtain_portfolio<R: BufRead, W: Write>(
    config: Option<&AppConfig>,
    prompter: &mut Prompter<R, W>,
) -> Result<(Portfolio, String)> {
    let (built, currency) = match config {
        Some(config) => (
            PortfolioBuilder::from_config(config).build(),
            config.currency.clone(),
        ),
        None => (prompt_portfolio(prompter)?, "€".to_string()),
    };

    if built.was_normalized {
        prompter.say("Note: the target percentages did not sum to 100% and were rescaled.")?;
    }
    Ok((built.portfolio, currency))
}

fn prompt_portfolio<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<BuiltPortfolio> {
    let count = prompter.ask_positive_int("How many assets does the portfolio have?")?;

    let mut builder = PortfolioBuilder::new();
    for i in 1..=count {
        let name =
            prompter.ask_unique_name(&format!("Name of asset #{i}:"), |name| {
                builder.contains(name)
            })?;
        let value = prompter.ask_number(&format!("Current value invested in '{name}':"), 0.0)?;
        let target = prompter.ask_number(&format!("Target percentage for '{name}':"), 0.0)?;
        builder.add_asset(&name, value, target);
    }
    Ok(builder.build())
}
