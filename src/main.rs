//! Savings Planner CLI
//!
//! Command-line interface for running savings projections

use anyhow::Context;
use clap::{Parser, Subcommand};
use savings_planner::{
    plan::{SavingsGoal, SavingsPlan},
    projection::{ProjectionConfig, ProjectionEngine, ProjectionResult},
    scenario::ScenarioRunner,
};
use std::fs::File;
use std::io::Write;

#[derive(Parser)]
#[command(name = "savings_planner", version, about = "Savings and investment projection engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project the growth of a savings plan
    Project {
        /// Initial lump-sum investment
        #[arg(long, default_value_t = 10_000.0)]
        principal: f64,

        /// Amount added at the end of each month
        #[arg(long, default_value_t = 1_000.0)]
        monthly_contribution: f64,

        /// Nominal annual interest rate, in percent
        #[arg(long, default_value_t = 7.0)]
        annual_rate: f64,

        /// Investment horizon in whole years
        #[arg(long, default_value_t = 10)]
        years: u32,

        /// Write per-year rows to this CSV file
        #[arg(long)]
        csv: Option<String>,
    },

    /// Solve the monthly contribution required to reach a target amount
    Goal {
        /// Balance to reach at the end of the horizon
        #[arg(long, default_value_t = 200_000.0)]
        target_amount: f64,

        /// Initial lump-sum investment
        #[arg(long, default_value_t = 10_000.0)]
        principal: f64,

        /// Nominal annual interest rate, in percent
        #[arg(long, default_value_t = 7.0)]
        annual_rate: f64,

        /// Investment horizon in whole years
        #[arg(long, default_value_t = 10)]
        years: u32,
    },

    /// Compare two plans over the same horizon
    Compare {
        #[arg(long, default_value_t = 10_000.0)]
        principal_a: f64,

        #[arg(long, default_value_t = 1_000.0)]
        monthly_contribution_a: f64,

        #[arg(long, default_value_t = 7.0)]
        annual_rate_a: f64,

        #[arg(long, default_value_t = 10_000.0)]
        principal_b: f64,

        #[arg(long, default_value_t = 1_000.0)]
        monthly_contribution_b: f64,

        #[arg(long, default_value_t = 9.0)]
        annual_rate_b: f64,

        /// Shared horizon in whole years
        #[arg(long, default_value_t = 10)]
        years: u32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Project {
            principal,
            monthly_contribution,
            annual_rate,
            years,
            csv,
        } => {
            let plan = SavingsPlan::new(1, principal, monthly_contribution, annual_rate, years);
            let engine = ProjectionEngine::new(ProjectionConfig::default());
            let result = engine.project_plan(&plan)?;

            println!("Savings Projection ({} years at {:.2}%)", years, annual_rate);
            print_year_table(&result);
            print_summary(&result);

            if let Some(path) = csv {
                write_year_csv(&path, &result)
                    .with_context(|| format!("Unable to write {}", path))?;
                println!("\nFull results written to: {}", path);
            }
        }

        Command::Goal {
            target_amount,
            principal,
            annual_rate,
            years,
        } => {
            let goal = SavingsGoal::new(1, target_amount, principal, annual_rate, years);
            let engine = ProjectionEngine::new(ProjectionConfig::default());
            let solved = engine.solve_goal(&goal)?;

            println!("Goal: ${:.2} in {} years at {:.2}%", target_amount, years, annual_rate);
            println!(
                "Required monthly contribution: ${:.2}\n",
                solved.required_monthly_contribution
            );

            print_year_table(&solved.projection);
            print_summary(&solved.projection);
        }

        Command::Compare {
            principal_a,
            monthly_contribution_a,
            annual_rate_a,
            principal_b,
            monthly_contribution_b,
            annual_rate_b,
            years,
        } => {
            let plan_a = SavingsPlan::new(1, principal_a, monthly_contribution_a, annual_rate_a, years);
            let plan_b = SavingsPlan::new(2, principal_b, monthly_contribution_b, annual_rate_b, years);

            let runner = ScenarioRunner::new();
            let comparison = runner.compare(&plan_a, &plan_b)?;

            println!("Plan Comparison ({} years)", years);
            println!("{:>5} {:>16} {:>16}", "Year", "Plan A", "Plan B");
            println!("{}", "-".repeat(40));
            for (i, (a, b)) in comparison
                .plan_a
                .balance_history
                .iter()
                .zip(&comparison.plan_b.balance_history)
                .enumerate()
            {
                println!("{:>5} {:>16.2} {:>16.2}", i, a, b);
            }

            println!("\nSummary:");
            println!("  Plan A Final Balance: ${:.2}", comparison.plan_a.final_balance);
            println!("  Plan B Final Balance: ${:.2}", comparison.plan_b.final_balance);
            println!("  Difference (B - A):   ${:.2}", comparison.difference);
            println!("  Difference:           {:.2}%", comparison.percentage_diff);
        }
    }

    Ok(())
}

fn print_year_table(result: &ProjectionResult) {
    println!(
        "{:>5} {:>16} {:>14} {:>14} {:>16}",
        "Year", "BOP Balance", "Contributions", "Interest", "EOP Balance"
    );
    println!("{}", "-".repeat(70));

    for row in &result.year_rows {
        println!(
            "{:>5} {:>16.2} {:>14.2} {:>14.2} {:>16.2}",
            row.year, row.bop_balance, row.contributions, row.interest, row.eop_balance
        );
    }
}

fn print_summary(result: &ProjectionResult) {
    println!("\nSummary:");
    println!("  Final Balance:       ${:.2}", result.final_balance);
    println!("  Total Contributions: ${:.2}", result.total_contributions);
    println!("  Total Interest:      ${:.2}", result.total_interest);
}

fn write_year_csv(path: &str, result: &ProjectionResult) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "Year,BOP_Balance,Contributions,Interest,EOP_Balance")?;
    for row in &result.year_rows {
        writeln!(
            file,
            "{},{:.8},{:.8},{:.8},{:.8}",
            row.year, row.bop_balance, row.contributions, row.interest, row.eop_balance
        )?;
    }

    Ok(())
}
