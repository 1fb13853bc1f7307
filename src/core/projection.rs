//! Compounding projections of monthly contribution plans.
//!
//! Both simulators step one month at a time: the contribution lands first,
//! then the month's growth applies to the whole balance. The ordering is
//! part of the contract; the goal solvers bisect over these exact curves.

use crate::core::error::{InvalidInputError, PlanResult};

/// Result of projecting a contribution plan forward.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Portfolio value after the last month.
    pub final_value: f64,
    /// Post-contribution, post-growth value for every elapsed month.
    pub monthly_values: Vec<f64>,
}

/// Monthly-equivalent rate of a nominal annual return.
pub fn monthly_rate(annual_return: f64) -> f64 {
    (1.0 + annual_return).powf(1.0 / 12.0) - 1.0
}

/// Contribution for month `month` (0-based) of a linear ramp over
/// `months_total` months. A single-month schedule contributes the final
/// amount outright, keeping the interpolation denominator away from zero.
pub(crate) fn ramp_contribution(
    initial_monthly: f64,
    final_monthly: f64,
    month: u32,
    months_total: u32,
) -> f64 {
    if months_total <= 1 {
        final_monthly
    } else {
        initial_monthly
            + (final_monthly - initial_monthly) * (month as f64 / (months_total - 1) as f64)
    }
}

/// Projects a constant monthly contribution over `years` at a fixed annual
/// return, starting from `current_total + extra_savings`.
pub fn simulate_constant_plan(
    current_total: f64,
    monthly_contribution: i64,
    years: u32,
    annual_return: f64,
    extra_savings: f64,
) -> PlanResult<Projection> {
    if years == 0 {
        return Err(InvalidInputError::NonPositiveYears);
    }
    let months = years * 12;
    let r_m = monthly_rate(annual_return);

    let mut value = current_total + extra_savings;
    let mut monthly_values = Vec::with_capacity(months as usize);
    for _ in 0..months {
        value += monthly_contribution as f64;
        value *= 1.0 + r_m;
        monthly_values.push(value);
    }

    Ok(Projection {
        final_value: value,
        monthly_values,
    })
}

/// Projects a contribution that climbs linearly from `initial_monthly` to
/// `final_monthly` over `years` at a fixed annual return.
pub fn simulate_dca_ramp(
    initial_monthly: f64,
    final_monthly: f64,
    years: u32,
    annual_return: f64,
    initial_value: f64,
) -> PlanResult<Projection> {
    if years == 0 {
        return Err(InvalidInputError::NonPositiveYears);
    }
    let months = years * 12;
    let r_m = monthly_rate(annual_return);

    let mut value = initial_value;
    let mut monthly_values = Vec::with_capacity(months as usize);
    for month in 0..months {
        value += ramp_contribution(initial_monthly, final_monthly, month, months);
        value *= 1.0 + r_m;
        monthly_values.push(value);
    }

    Ok(Projection {
        final_value: value,
        monthly_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn zero_return_constant_plan_accumulates_contributions() {
        let projection = simulate_constant_plan(0.0, 100, 1, 0.0, 0.0).unwrap();
        assert_eq!(projection.monthly_values.len(), 12);
        assert_eq!(projection.final_value, 1200.0);
        assert_eq!(*projection.monthly_values.last().unwrap(), 1200.0);
    }

    #[test]
    fn trace_length_is_twelve_per_year() {
        let constant = simulate_constant_plan(1000.0, 50, 3, 0.05, 0.0).unwrap();
        assert_eq!(constant.monthly_values.len(), 36);

        let ramp = simulate_dca_ramp(50.0, 250.0, 3, 0.05, 1000.0).unwrap();
        assert_eq!(ramp.monthly_values.len(), 36);
    }

    #[test]
    fn zero_years_is_rejected() {
        assert_eq!(
            simulate_constant_plan(0.0, 100, 0, 0.05, 0.0).unwrap_err(),
            InvalidInputError::NonPositiveYears
        );
        assert_eq!(
            simulate_dca_ramp(100.0, 200.0, 0, 0.05, 0.0).unwrap_err(),
            InvalidInputError::NonPositiveYears
        );
    }

    #[test]
    fn contribution_lands_before_growth() {
        // One month at ~12.68% annual: (0 + 100) * (1 + r_m).
        let projection = simulate_constant_plan(0.0, 100, 1, 0.1268250301319698, 0.0).unwrap();
        let r_m = monthly_rate(0.1268250301319698);
        assert!((projection.monthly_values[0] - 100.0 * (1.0 + r_m)).abs() < 1e-9);
    }

    #[test]
    fn ramp_interpolates_between_endpoints() {
        let months = 24;
        assert_eq!(ramp_contribution(100.0, 200.0, 0, months), 100.0);
        assert_eq!(ramp_contribution(100.0, 200.0, months - 1, months), 200.0);
        let mid = ramp_contribution(100.0, 300.0, 10, months);
        assert!((mid - (100.0 + 200.0 * 10.0 / 23.0)).abs() < 1e-9);
    }

    #[test]
    fn single_month_ramp_pins_to_final_amount() {
        assert_eq!(ramp_contribution(100.0, 500.0, 0, 1), 500.0);
    }

    #[test]
    fn flat_ramp_matches_constant_plan() {
        let ramp = simulate_dca_ramp(150.0, 150.0, 5, 0.07, 2000.0).unwrap();
        let constant = simulate_constant_plan(2000.0, 150, 5, 0.07, 0.0).unwrap();
        assert!((ramp.final_value - constant.final_value).abs() < 1e-6);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_final_value_is_monotonic_in_contribution(
            start in 0u32..1_000_000,
            contribution in 0u32..50_000,
            bump in 1u32..5_000,
            years in 1u32..40,
            return_bp in 0u32..1_500
        ) {
            let annual_return = return_bp as f64 / 10_000.0;
            let lower = simulate_constant_plan(
                start as f64,
                contribution as i64,
                years,
                annual_return,
                0.0,
            )
            .unwrap();
            let higher = simulate_constant_plan(
                start as f64,
                (contribution + bump) as i64,
                years,
                annual_return,
                0.0,
            )
            .unwrap();
            prop_assert!(higher.final_value >= lower.final_value);
        }

        #[test]
        fn prop_trace_is_non_decreasing_without_negative_flows(
            start in 0u32..100_000,
            contribution in 0u32..10_000,
            years in 1u32..30,
            return_bp in 0u32..1_500
        ) {
            let projection = simulate_constant_plan(
                start as f64,
                contribution as i64,
                years,
                return_bp as f64 / 10_000.0,
                0.0,
            )
            .unwrap();
            let mut previous = 0.0;
            for value in &projection.monthly_values {
                prop_assert!(*value >= previous);
                previous = *value;
            }
        }
    }
}
