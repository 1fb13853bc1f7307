//! Splits a monthly contribution across assets to close target-weight gaps.

use crate::core::error::{InvalidInputError, PlanResult};
use crate::core::portfolio::Portfolio;
use std::collections::BTreeMap;
use tracing::debug;

/// How much to invest into each asset this month, in whole currency units.
///
/// The amounts always sum to the rounded monthly contribution; fractional
/// precision is reconciled into the largest position (first by asset name
/// among equals) so nothing is lost to rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionPlan {
    pub amounts: BTreeMap<String, i64>,
}

impl ContributionPlan {
    /// Total of all planned amounts.
    pub fn total(&self) -> i64 {
        self.amounts.values().sum()
    }
}

/// Computes this month's contribution split for a portfolio.
///
/// Each asset below its target value (at the post-contribution total)
/// receives a share proportional to its shortfall. Contributions only ever
/// add to positions; an asset at or above target gets nothing. When no
/// asset is short, the contribution is split by target weight instead so a
/// caught-up portfolio still invests.
///
/// Fails when `holdings` and `targets` do not cover the same assets.
// TODO: make `rebalance_threshold` gate assets whose weight deviation is
// inside the band; it is accepted and logged but does not yet change the
// split.
pub fn compute_contribution_plan(
    portfolio: &Portfolio,
    monthly_contribution: f64,
    rebalance_threshold: f64,
) -> PlanResult<ContributionPlan> {
    validate_asset_keys(portfolio)?;
    debug!(
        monthly_contribution,
        rebalance_threshold, "computing contribution plan"
    );

    let total_after = portfolio.total_value() + monthly_contribution;

    let needed: BTreeMap<&str, f64> = portfolio
        .targets
        .iter()
        .map(|(asset, target_weight)| {
            let target_value = target_weight * total_after;
            let current_value = portfolio.holdings[asset];
            (asset.as_str(), (target_value - current_value).max(0.0))
        })
        .collect();
    let total_needed: f64 = needed.values().sum();

    let shares: BTreeMap<&str, f64> = if total_needed == 0.0 {
        // Nothing is short of target: fall back to a straight split by
        // target weight instead of investing nothing.
        debug!("no shortfall against targets, splitting by target weight");
        portfolio
            .targets
            .iter()
            .map(|(asset, target_weight)| (asset.as_str(), monthly_contribution * target_weight))
            .collect()
    } else {
        needed
            .into_iter()
            .map(|(asset, need)| (asset, need / total_needed * monthly_contribution))
            .collect()
    };

    let mut amounts: BTreeMap<String, i64> = shares
        .into_iter()
        .map(|(asset, share)| (asset.to_string(), share.round() as i64))
        .collect();

    // Independent rounding can drift off the requested total; hand the whole
    // residual to the largest planned amount (first by name among equals).
    let residual = monthly_contribution.round() as i64 - amounts.values().sum::<i64>();
    if residual != 0 {
        let largest = amounts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(asset, _)| asset.clone());
        if let Some(asset) = largest {
            debug!(residual, %asset, "reconciling rounding residual");
            if let Some(amount) = amounts.get_mut(&asset) {
                *amount += residual;
            }
        }
    }

    Ok(ContributionPlan { amounts })
}

fn validate_asset_keys(portfolio: &Portfolio) -> PlanResult<()> {
    let missing_targets: Vec<String> = portfolio
        .holdings
        .keys()
        .filter(|asset| !portfolio.targets.contains_key(*asset))
        .cloned()
        .collect();
    let missing_holdings: Vec<String> = portfolio
        .targets
        .keys()
        .filter(|asset| !portfolio.holdings.contains_key(*asset))
        .cloned()
        .collect();

    if missing_targets.is_empty() && missing_holdings.is_empty() {
        Ok(())
    } else {
        Err(InvalidInputError::MismatchedAssets {
            missing_targets,
            missing_holdings,
        })
    }
}
