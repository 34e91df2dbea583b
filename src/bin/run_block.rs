//! Run projections for an entire block of plans from a CSV file
//!
//! Outputs yearly aggregated balances across all plans
//!
//! Usage: cargo run --bin run_block [plans.csv]

use rayon::prelude::*;
use savings_planner::{
    plan::load_plans,
    projection::{ProjectionConfig, ProjectionEngine, ProjectionResult},
};
use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

/// Aggregated yearly results across all plans
#[derive(Debug, Clone, Default)]
struct AggregatedRow {
    year: u32,
    plans_active: u32,
    total_bop_balance: f64,
    total_contributions: f64,
    total_interest: f64,
    total_eop_balance: f64,
}

fn main() {
    env_logger::init();

    let start = Instant::now();
    let path = env::args().nth(1).unwrap_or_else(|| "data/sample_plans.csv".to_string());

    println!("Loading plans from {}...", path);
    let plans = load_plans(&path).expect("Failed to load plans");
    println!("Loaded {} plans in {:?}", plans.len(), start.elapsed());

    let config = ProjectionConfig {
        detailed_output: true,
    };

    println!("Running projections...");
    let proj_start = Instant::now();

    // Run projections in parallel
    let results: Vec<ProjectionResult> = plans
        .par_iter()
        .map(|plan| {
            let engine = ProjectionEngine::new(config.clone());
            engine.project_plan(plan).expect("Plan failed validation")
        })
        .collect();

    println!("Projections complete in {:?}", proj_start.elapsed());

    // Aggregate results by year
    println!("Aggregating results...");
    let max_years = plans.iter().map(|p| p.years).max().unwrap_or(0);
    let mut aggregated: Vec<AggregatedRow> = (1..=max_years)
        .map(|y| AggregatedRow { year: y, ..Default::default() })
        .collect();

    for result in &results {
        for row in &result.year_rows {
            let idx = (row.year - 1) as usize;
            if idx < aggregated.len() {
                let agg = &mut aggregated[idx];
                agg.plans_active += 1;
                agg.total_bop_balance += row.bop_balance;
                agg.total_contributions += row.contributions;
                agg.total_interest += row.interest;
                agg.total_eop_balance += row.eop_balance;
            }
        }
    }

    // Write output
    let output_path = "block_projection_output.csv";
    let mut file = File::create(output_path).expect("Failed to create output file");

    writeln!(file, "Year,PlansActive,BOP_Balance,Contributions,Interest,EOP_Balance").unwrap();

    for row in &aggregated {
        writeln!(
            file,
            "{},{},{:.2},{:.2},{:.2},{:.2}",
            row.year,
            row.plans_active,
            row.total_bop_balance,
            row.total_contributions,
            row.total_interest,
            row.total_eop_balance,
        )
        .unwrap();
    }

    println!("Output written to {}", output_path);

    // Print summary stats
    let total_final: f64 = results.iter().map(|r| r.final_balance).sum();
    let total_contributed: f64 = results.iter().map(|r| r.total_contributions).sum();
    let total_interest: f64 = results.iter().map(|r| r.total_interest).sum();

    println!("\nBlock Summary:");
    if let Some(first) = aggregated.first() {
        println!(
            "  Year 1:  {} plans, EOP Balance=${:.0}",
            first.plans_active, first.total_eop_balance
        );
    }
    if let Some(last) = aggregated.last() {
        println!(
            "  Year {}: {} plans, EOP Balance=${:.0}",
            last.year, last.plans_active, last.total_eop_balance
        );
    }
    println!("  Total Final Balance:       ${:.2}", total_final);
    println!("  Total Contributions:       ${:.2}", total_contributed);
    println!("  Total Interest:            ${:.2}", total_interest);

    println!("\nTotal time: {:?}", start.elapsed());
}
