//! Core planning logic: pure transformations from immutable inputs to
//! fresh results. No I/O happens below this module.

pub mod allocation;
pub mod config;
pub mod error;
pub mod log;
pub mod portfolio;
pub mod projection;
pub mod solver;

// Re-export main types for cleaner imports
pub use allocation::{ContributionPlan, compute_contribution_plan};
pub use error::{InvalidInputError, PlanResult};
pub use portfolio::Portfolio;
pub use projection::{Projection, monthly_rate, simulate_constant_plan, simulate_dca_ramp};
pub use solver::{
    GoalInputs, RampSolution, YearlyContribution, annual_schedule,
    required_constant_monthly_for_goal, required_growing_monthlies_for_goal,
};
