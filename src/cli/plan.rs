//! The `plan` command: split next month's contribution across the
//! portfolio so it drifts toward its target weights.

use super::prompt::Prompter;
use super::session;
use super::ui;
use crate::core::allocation::{ContributionPlan, compute_contribution_plan};
use crate::core::config::AppConfig;
use crate::core::portfolio::Portfolio;
use anyhow::Result;
use comfy_table::Cell;
use std::io::{BufRead, Write};
use tracing::info;

/// Parameters the user may supply up front; anything missing is prompted.
#[derive(Debug, Default, Clone)]
pub struct PlanOptions {
    /// Monthly contribution amount.
    pub amount: Option<f64>,
    /// Rebalance threshold in percentage points.
    pub threshold: Option<f64>,
}

pub fn run<R: BufRead, W: Write>(
    config: Option<&AppConfig>,
    options: &PlanOptions,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    info!("Planning next month's contribution");

    let (portfolio, currency) = session::obtain_portfolio(config, prompter)?;

    let amount = match options.amount {
        Some(amount) => amount,
        None => prompter.ask_number("How much do you want to contribute next month?", 0.0)?,
    };
    let threshold_pct = match options.threshold {
        Some(threshold) => threshold,
        None => prompter.ask_number(
            "Rebalance threshold in percentage points? (0 to disable):",
            0.0,
        )?,
    };

    let plan = compute_contribution_plan(&portfolio, amount, threshold_pct / 100.0)?;

    display_portfolio_summary(&portfolio, &currency);
    display_plan(&plan, &currency);
    Ok(())
}

fn display_portfolio_summary(portfolio: &Portfolio, currency: &str) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset"),
        ui::header_cell(&format!("Value ({currency})")),
        ui::header_cell("Current"),
        ui::header_cell("Target"),
    ]);

    let current_weights = portfolio.current_weights();
    for (asset, value) in &portfolio.holdings {
        table.add_row(vec![
            Cell::new(asset),
            ui::value_cell(*value, currency),
            ui::percent_cell(current_weights[asset] * 100.0),
            ui::percent_cell(portfolio.targets[asset] * 100.0),
        ]);
    }

    println!(
        "\n{}\n",
        ui::style_text("Current portfolio", ui::StyleType::Title)
    );
    println!("{table}");
    println!(
        "\nTotal value: {}",
        ui::style_text(
            &format!("{:.2} {}", portfolio.total_value(), currency),
            ui::StyleType::TotalValue,
        )
    );
}

fn display_plan(plan: &ContributionPlan, currency: &str) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset"),
        ui::header_cell("Invest this month"),
    ]);
    for (asset, amount) in &plan.amounts {
        table.add_row(vec![Cell::new(asset), ui::amount_cell(*amount, currency)]);
    }

    println!(
        "\n{}\n",
        ui::style_text("Contribution plan", ui::StyleType::Title)
    );
    println!("{table}");
    println!(
        "\nTotal to invest: {}",
        ui::style_text(
            &format!("{} {}", plan.total(), currency),
            ui::StyleType::TotalValue,
        )
    );
    ui::print_separator();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AssetConfig;
    use std::io::Cursor;

    fn config(entries: &[(&str, f64, f64)]) -> AppConfig {
        AppConfig {
            assets: entries
                .iter()
                .map(|(name, value, target)| AssetConfig {
                    name: name.to_string(),
                    value: *value,
                    target: *target,
                })
                .collect(),
            currency: "€".to_string(),
        }
    }

    #[test]
    fn test_plan_command_with_config_and_flags() {
        let config = config(&[("A", 900.0, 50.0), ("B", 100.0, 50.0)]);
        let options = PlanOptions {
            amount: Some(200.0),
            threshold: Some(0.0),
        };
        let mut prompter = Prompter::new(Cursor::new(Vec::new()), Vec::new());

        let result = run(Some(&config), &options, &mut prompter);
        assert!(result.is_ok());
    }

    #[test]
    fn test_plan_command_prompts_for_missing_amount() {
        let config = config(&[("A", 500.0, 50.0), ("B", 500.0, 50.0)]);
        let mut prompter = Prompter::new(Cursor::new(b"100\n0\n".to_vec()), Vec::new());

        let result = run(Some(&config), &PlanOptions::default(), &mut prompter);
        assert!(result.is_ok());
    }

    #[test]
    fn test_fully_interactive_plan_session() {
        let script = "2\nWorld\n800\n80\nBonds\n200\n20\n150\n0\n";
        let mut prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());

        let result = run(None, &PlanOptions::default(), &mut prompter);
        assert!(result.is_ok());
    }
}
