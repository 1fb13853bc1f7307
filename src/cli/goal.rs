//! The `goal` command: how much to contribute each month to reach a future
//! net-worth target.
//!
//! Constant mode inverts the future-value-of-annuity formula directly;
//! the bisection solver only steps in when taxes or extra savings make the
//! closed form inapplicable. Growing mode always solves the ramp's final
//! amount numerically.

use super::prompt::Prompter;
use super::session;
use super::ui;
use crate::core::config::AppConfig;
use crate::core::projection::{monthly_rate, simulate_constant_plan, simulate_dca_ramp};
use crate::core::solver::{
    GoalInputs, YearlyContribution, annual_schedule, required_constant_monthly_for_goal,
    required_growing_monthlies_for_goal,
};
use anyhow::Result;
use comfy_table::Cell;
use std::io::{BufRead, Write};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalMode {
    Constant,
    Growing,
}

/// Parameters the user may supply up front; anything missing is prompted.
#[derive(Debug, Default, Clone)]
pub struct GoalOptions {
    /// Future net worth to reach.
    pub target: Option<f64>,
    /// Horizon in years.
    pub years: Option<u32>,
    /// Assumed annual return, in percent.
    pub annual_return_pct: Option<f64>,
    pub mode: Option<GoalMode>,
    /// Starting monthly amount for the growing schedule.
    pub initial_monthly: Option<i64>,
    /// Extra savings added to the starting value.
    pub extra_savings: f64,
    /// Flat capital-gains tax rate applied at the end, in percent.
    pub tax_rate_pct: f64,
}

pub fn run<R: BufRead, W: Write>(
    config: Option<&AppConfig>,
    options: &GoalOptions,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    info!("Solving contributions for a future goal");

    let (portfolio, currency) = session::obtain_portfolio(config, prompter)?;

    let target = match options.target {
        Some(target) => target,
        None => prompter.ask_number(
            "How much would you like the portfolio to be worth in the future?",
            0.0,
        )?,
    };
    let years = match options.years {
        Some(years) => years,
        None => prompter.ask_positive_int("In how many years?")?,
    };
    let annual_return_pct = match options.annual_return_pct {
        Some(pct) => pct,
        None => prompter.ask_number(
            "What annual return do you want to assume, in percent? (example: 6):",
            0.0,
        )?,
    };

    let inputs = GoalInputs {
        current_total: portfolio.total_value(),
        target_value: target,
        years,
        annual_return: annual_return_pct / 100.0,
        extra_savings: options.extra_savings,
        tax_rate: options.tax_rate_pct / 100.0,
    };
    inputs.validate()?;
    debug!(?inputs, "goal parameters gathered");

    let mode = match options.mode {
        Some(mode) => mode,
        None => {
            match prompter.ask_choice(
                "Constant contributions (c) or growing every year (g)?",
                &['c', 'g'],
            )? {
                'c' => GoalMode::Constant,
                _ => GoalMode::Growing,
            }
        }
    };

    match mode {
        GoalMode::Constant => run_constant(&inputs, &currency, prompter),
        GoalMode::Growing => {
            let initial_monthly = match options.initial_monthly {
                Some(initial) => initial,
                None => prompter
                    .ask_number(
                        "How much would you like to start contributing each month?",
                        0.0,
                    )?
                    .round() as i64,
            };
            run_growing(&inputs, initial_monthly, &currency, prompter)
        }
    }
}

fn run_constant<R: BufRead, W: Write>(
    inputs: &GoalInputs,
    currency: &str,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let monthly = if inputs.tax_rate == 0.0 && inputs.extra_savings == 0.0 {
        constant_monthly_from_annuity(inputs)
    } else {
        // Taxes and extra starting savings break the closed form.
        required_constant_monthly_for_goal(inputs)?
    };

    if monthly == 0 {
        prompter.say(
            "What you already hold covers the goal at that return; no monthly contribution is needed.",
        )?;
        return Ok(());
    }

    println!(
        "\nTo reach {:.2} {currency} in {} years at {:.2}% a year,",
        inputs.target_value,
        inputs.years,
        inputs.annual_return * 100.0,
    );
    println!(
        "contribute about {} every month.",
        ui::style_text(
            &format!("{monthly} {currency}"),
            ui::StyleType::TotalValue
        )
    );
    display_schedule(&annual_schedule(monthly, monthly, inputs.years), currency);

    let projection = simulate_constant_plan(
        inputs.current_total,
        monthly,
        inputs.years,
        inputs.annual_return,
        inputs.extra_savings,
    )?;
    println!(
        "\n{}",
        ui::style_text(
            &format!("Projected final value: {:.2} {currency}", projection.final_value),
            ui::StyleType::Subtle,
        )
    );
    ui::print_separator();
    Ok(())
}

fn run_growing<R: BufRead, W: Write>(
    inputs: &GoalInputs,
    initial_monthly: i64,
    currency: &str,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let solution = required_growing_monthlies_for_goal(inputs, initial_monthly)?;

    if solution.final_monthly <= initial_monthly {
        prompter.say(
            "The starting contribution alone already covers the goal; no yearly increase is needed.",
        )?;
    }

    println!(
        "\nTo reach about {:.2} {currency} in {} years at {:.2}% a year with growing contributions,",
        inputs.target_value,
        inputs.years,
        inputs.annual_return * 100.0,
    );
    println!(
        "start at {} and finish at {} per month.",
        ui::style_text(
            &format!("{initial_monthly} {currency}"),
            ui::StyleType::TotalLabel
        ),
        ui::style_text(
            &format!("{} {currency}", solution.final_monthly),
            ui::StyleType::TotalValue
        ),
    );
    display_schedule(&solution.schedule, currency);

    let projection = simulate_dca_ramp(
        initial_monthly as f64,
        solution.final_monthly as f64,
        inputs.years,
        inputs.annual_return,
        inputs.current_total + inputs.extra_savings,
    )?;
    println!(
        "\n{}",
        ui::style_text(
            &format!("Projected final value: {:.2} {currency}", projection.final_value),
            ui::StyleType::Subtle,
        )
    );
    ui::print_separator();
    Ok(())
}

fn display_schedule(schedule: &[YearlyContribution], currency: &str) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Year"),
        ui::header_cell(&format!("Start ({currency}/mo)")),
        ui::header_cell(&format!("End ({currency}/mo)")),
        ui::header_cell(&format!("Average ({currency}/mo)")),
    ]);
    for entry in schedule {
        table.add_row(vec![
            Cell::new(entry.year),
            ui::amount_cell(entry.start, currency),
            ui::amount_cell(entry.end, currency),
            ui::amount_cell(entry.avg, currency),
        ]);
    }

    println!(
        "\n{}\n",
        ui::style_text("Contributions by year", ui::StyleType::Title)
    );
    println!("{table}");
}

/// Constant monthly amount from the future-value-of-annuity formula: grow
/// the current total to the horizon, then spread the remaining gap over an
/// ordinary annuity at the monthly rate. Zero return degenerates to an
/// even split of the gap.
fn constant_monthly_from_annuity(inputs: &GoalInputs) -> i64 {
    let months = inputs.months();
    let r_m = monthly_rate(inputs.annual_return);
    let grown_current = inputs.current_total * (1.0 + r_m).powi(months as i32);

    let gap = inputs.target_value - grown_current;
    if gap <= 0.0 {
        return 0;
    }

    let monthly = if r_m == 0.0 {
        gap / months as f64
    } else {
        gap * r_m / ((1.0 + r_m).powi(months as i32) - 1.0)
    };
    monthly.round() as i64
}
