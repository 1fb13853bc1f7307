//! Bisection solvers that invert the projections: given a future net-worth
//! goal, find the contribution schedule that reaches it.
//!
//! Both solvers bisect a scalar over a monotonically increasing "net final
//! value" objective: the simulated ending value minus a flat capital-gains
//! tax on growth. Iteration counts are fixed, so precision is bounded by
//! `initial_bound / 2^iterations`; results are reported in whole currency
//! units, which that comfortably covers.

use crate::core::error::{InvalidInputError, PlanResult};
use crate::core::projection::{ramp_contribution, simulate_constant_plan, simulate_dca_ramp};
use tracing::debug;

const CONSTANT_SOLVER_ITERATIONS: u32 = 40;
const RAMP_SOLVER_ITERATIONS: u32 = 30;
/// The search ceiling never drops below this, so small goals still get a
/// bracket wide enough to contain the answer.
const MIN_SEARCH_CEILING: f64 = 5_000.0;

/// Validated parameters shared by both goal solvers.
#[derive(Debug, Clone, Copy)]
pub struct GoalInputs {
    /// Current portfolio value.
    pub current_total: f64,
    /// Net worth to reach at the end of the horizon.
    pub target_value: f64,
    /// Horizon in years.
    pub years: u32,
    /// Assumed nominal annual return, as a fraction.
    pub annual_return: f64,
    /// Additional savings available today, added to the starting value.
    pub extra_savings: f64,
    /// Flat tax rate on end-of-period gains, in `[0, 1]`.
    pub tax_rate: f64,
}

impl GoalInputs {
    pub fn months(&self) -> u32 {
        self.years * 12
    }

    /// Checks the shared solver preconditions; callers that bypass the
    /// solvers (the closed-form path) validate through this too.
    pub fn validate(&self) -> PlanResult<()> {
        if self.years == 0 {
            return Err(InvalidInputError::NonPositiveYears);
        }
        if self.annual_return < 0.0 {
            return Err(InvalidInputError::NegativeReturn {
                rate: self.annual_return,
            });
        }
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(InvalidInputError::TaxRateOutOfRange {
                rate: self.tax_rate,
            });
        }
        Ok(())
    }

    /// Ending value net of the flat tax on whatever exceeds the principal
    /// paid in.
    fn net_of_tax(&self, final_value: f64, principal: f64) -> f64 {
        let gain = (final_value - principal).max(0.0);
        final_value - self.tax_rate * gain
    }
}

/// Per-year view of a linear contribution ramp, all amounts in whole
/// currency units per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyContribution {
    /// 1-based year index.
    pub year: u32,
    pub start: i64,
    pub end: i64,
    pub avg: i64,
}

/// A solved growing-contribution schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RampSolution {
    /// Monthly contribution reached at the end of the horizon.
    pub final_monthly: i64,
    pub schedule: Vec<YearlyContribution>,
}

/// Finds the constant monthly contribution needed to reach the goal.
///
/// Returns 0 outright when the goal is already met without contributing.
/// Candidates are rounded to whole units before each trial, matching how
/// the plan would actually be executed.
pub fn required_constant_monthly_for_goal(inputs: &GoalInputs) -> PlanResult<i64> {
    inputs.validate()?;
    let months = inputs.months();

    if net_final_with_constant(inputs, 0.0)? >= inputs.target_value {
        return Ok(0);
    }

    let mut low = 0.0_f64;
    let mut high = (inputs.target_value / months as f64 * 2.0).max(MIN_SEARCH_CEILING);
    debug!(high, months, "bisecting constant monthly contribution");

    for _ in 0..CONSTANT_SOLVER_ITERATIONS {
        let mid = (low + high) / 2.0;
        if net_final_with_constant(inputs, mid)? < inputs.target_value {
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(high.round() as i64)
}

/// Finds the ending monthly amount of a linear ramp that starts at
/// `initial_monthly` and reaches the goal, plus its per-year breakdown.
pub fn required_growing_monthlies_for_goal(
    inputs: &GoalInputs,
    initial_monthly: i64,
) -> PlanResult<RampSolution> {
    inputs.validate()?;

    let mut low = 0.0_f64;
    let mut high = (initial_monthly as f64 * 10.0).max(MIN_SEARCH_CEILING);
    debug!(high, initial_monthly, "bisecting final monthly contribution");

    for _ in 0..RAMP_SOLVER_ITERATIONS {
        let mid = (low + high) / 2.0;
        if net_final_with_ramp(inputs, initial_monthly as f64, mid)? < inputs.target_value {
            low = mid;
        } else {
            high = mid;
        }
    }

    let final_monthly = ((low + high) / 2.0).round() as i64;
    Ok(RampSolution {
        final_monthly,
        schedule: annual_schedule(initial_monthly, final_monthly, inputs.years),
    })
}

/// Per-year start/end/average contributions of a linear ramp.
pub fn annual_schedule(
    initial_monthly: i64,
    final_monthly: i64,
    years: u32,
) -> Vec<YearlyContribution> {
    let months_total = years * 12;
    (1..=years)
        .map(|year| {
            let first_month = (year - 1) * 12;
            let last_month = (year * 12 - 1).min(months_total.saturating_sub(1));
            let start = ramp_contribution(
                initial_monthly as f64,
                final_monthly as f64,
                first_month,
                months_total,
            )
            .round() as i64;
            let end = ramp_contribution(
                initial_monthly as f64,
                final_monthly as f64,
                last_month,
                months_total,
            )
            .round() as i64;
            YearlyContribution {
                year,
                start,
                end,
                avg: ((start + end) as f64 / 2.0).round() as i64,
            }
        })
        .collect()
}

fn net_final_with_constant(inputs: &GoalInputs, candidate: f64) -> PlanResult<f64> {
    let monthly = (candidate.round() as i64).max(0);
    let projection = simulate_constant_plan(
        inputs.current_total,
        monthly,
        inputs.years,
        inputs.annual_return,
        inputs.extra_savings,
    )?;
    let principal =
        inputs.current_total + inputs.extra_savings + (monthly * inputs.months() as i64) as f64;
    Ok(inputs.net_of_tax(projection.final_value, principal))
}

fn net_final_with_ramp(
    inputs: &GoalInputs,
    initial_monthly: f64,
    final_monthly: f64,
) -> PlanResult<f64> {
    let projection = simulate_dca_ramp(
        initial_monthly,
        final_monthly,
        inputs.years,
        inputs.annual_return,
        inputs.current_total + inputs.extra_savings,
    )?;
    // Total paid into a linear ramp is its arithmetic mean times the number
    // of months, exact for this schedule.
    let contributed = inputs.months() as f64 * (initial_monthly + final_monthly) / 2.0;
    let principal = inputs.current_total + inputs.extra_savings + contributed;
    Ok(inputs.net_of_tax(projection.final_value, principal))
}
