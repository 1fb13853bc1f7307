use anyhow::Result;
use aporta::cli::goal::{GoalMode, GoalOptions};
use aporta::cli::plan::PlanOptions;
use aporta::core::log::init_logging;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Split a monthly contribution across the portfolio
    Plan(PlanArgs),
    /// Solve the contributions needed to reach a future goal
    Goal(GoalArgs),
}

#[derive(Args)]
struct PlanArgs {
    /// Monthly contribution amount
    #[arg(short, long)]
    amount: Option<f64>,

    /// Rebalance threshold in percentage points
    #[arg(short, long)]
    threshold: Option<f64>,
}

#[derive(Args)]
struct GoalArgs {
    /// Future net worth to reach
    #[arg(short, long)]
    target: Option<f64>,

    /// Horizon in years
    #[arg(short, long)]
    years: Option<u32>,

    /// Assumed annual return in percent
    #[arg(short = 'r', long)]
    annual_return: Option<f64>,

    /// Shape of the contribution schedule
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Starting monthly amount for the growing schedule
    #[arg(short, long)]
    initial_monthly: Option<i64>,

    /// Extra savings added to the starting value
    #[arg(long, default_value_t = 0.0)]
    extra_savings: f64,

    /// Capital gains tax rate in percent, applied on end-of-period gains
    #[arg(long, default_value_t = 0.0)]
    tax_rate: f64,
}

#[derive(Copy, Clone, ValueEnum)]
enum ModeArg {
    Constant,
    Growing,
}

impl From<PlanArgs> for PlanOptions {
    fn from(args: PlanArgs) -> PlanOptions {
        PlanOptions {
            amount: args.amount,
            threshold: args.threshold,
        }
    }
}

impl From<GoalArgs> for GoalOptions {
    fn from(args: GoalArgs) -> GoalOptions {
        GoalOptions {
            target: args.target,
            years: args.years,
            annual_return_pct: args.annual_return,
            mode: args.mode.map(|mode| match mode {
                ModeArg::Constant => GoalMode::Constant,
                ModeArg::Growing => GoalMode::Growing,
            }),
            initial_monthly: args.initial_monthly,
            extra_savings: args.extra_savings,
            tax_rate_pct: args.tax_rate,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => aporta::cli::setup::setup(),
        Some(Commands::Plan(args)) => aporta::run_command(
            aporta::AppCommand::Plan(args.into()),
            cli.config_path.as_deref(),
        ),
        Some(Commands::Goal(args)) => aporta::run_command(
            aporta::AppCommand::Goal(args.into()),
            cli.config_path.as_deref(),
        ),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
