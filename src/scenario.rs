//! Scenario runner for batch projections and plan comparisons
//!
//! Holds one projection configuration, then allows running many plans,
//! goals, and side-by-side comparisons against it.

use crate::plan::{SavingsGoal, SavingsPlan};
use crate::projection::{
    EngineError, GoalResult, ProjectionConfig, ProjectionEngine, ProjectionResult,
};
use serde::{Deserialize, Serialize};

/// Side-by-side comparison of two plans over the same horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Projection of the first plan
    pub plan_a: ProjectionResult,

    /// Projection of the second plan
    pub plan_b: ProjectionResult,

    /// Final balance of plan B minus plan A
    pub difference: f64,

    /// Difference as a percentage of plan A's final balance
    pub percentage_diff: f64,
}

/// Pre-configured runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// for rate in [5.0, 7.0, 9.0] {
///     let plan = SavingsPlan::new(1, 10_000.0, 1_000.0, rate, 10);
///     let result = runner.run(&plan)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create a runner with the default configuration
    pub fn new() -> Self {
        Self {
            config: ProjectionConfig::default(),
        }
    }

    /// Create a runner with a specific configuration
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project a single plan
    pub fn run(&self, plan: &SavingsPlan) -> Result<ProjectionResult, EngineError> {
        let engine = ProjectionEngine::new(self.config.clone());
        engine.project_plan(plan)
    }

    /// Project multiple plans with the same configuration
    pub fn run_batch(&self, plans: &[SavingsPlan]) -> Result<Vec<ProjectionResult>, EngineError> {
        let engine = ProjectionEngine::new(self.config.clone());
        plans.iter().map(|p| engine.project_plan(p)).collect()
    }

    /// Solve a savings goal
    pub fn solve_goal(&self, goal: &SavingsGoal) -> Result<GoalResult, EngineError> {
        let engine = ProjectionEngine::new(self.config.clone());
        engine.solve_goal(goal)
    }

    /// Compare two plans over a shared horizon
    ///
    /// The horizons must match; comparing curves of different lengths is
    /// rejected rather than silently truncated.
    pub fn compare(
        &self,
        plan_a: &SavingsPlan,
        plan_b: &SavingsPlan,
    ) -> Result<ComparisonResult, EngineError> {
        if plan_a.years != plan_b.years {
            return Err(EngineError::invalid_input(
                "years",
                format!(
                    "comparison requires matching horizons ({} vs {})",
                    plan_a.years, plan_b.years
                ),
            ));
        }

        let a = self.run(plan_a)?;
        let b = self.run(plan_b)?;

        let difference = b.final_balance - a.final_balance;
        let percentage_diff = if a.final_balance > 0.0 {
            difference / a.final_balance * 100.0
        } else {
            0.0
        };

        Ok(ComparisonResult {
            plan_a: a,
            plan_b: b,
            difference,
            percentage_diff,
        })
    }

    /// Get reference to the configuration for inspection
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Get mutable reference to the configuration for customization
    pub fn config_mut(&mut self) -> &mut ProjectionConfig {
        &mut self.config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_run_batch() {
        let runner = ScenarioRunner::new();

        let plans: Vec<_> = [3.0, 4.0, 5.0]
            .iter()
            .enumerate()
            .map(|(i, &rate)| SavingsPlan::new(i as u32 + 1, 10_000.0, 500.0, rate, 10))
            .collect();

        let results = runner.run_batch(&plans).unwrap();
        assert_eq!(results.len(), 3);

        // Higher rate should result in a higher final balance
        assert!(results[2].final_balance > results[0].final_balance);
    }

    #[test]
    fn test_compare_higher_rate_wins() {
        let runner = ScenarioRunner::new();
        let plan_a = SavingsPlan::new(1, 10_000.0, 1_000.0, 7.0, 10);
        let plan_b = SavingsPlan::new(2, 10_000.0, 1_000.0, 9.0, 10);

        let comparison = runner.compare(&plan_a, &plan_b).unwrap();

        assert!(comparison.difference > 0.0);
        assert!(comparison.percentage_diff > 0.0);
        assert_relative_eq!(
            comparison.difference,
            comparison.plan_b.final_balance - comparison.plan_a.final_balance,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_compare_identical_plans() {
        let runner = ScenarioRunner::new();
        let plan = SavingsPlan::new(1, 10_000.0, 1_000.0, 7.0, 10);

        let comparison = runner.compare(&plan, &plan).unwrap();

        assert_eq!(comparison.difference, 0.0);
        assert_eq!(comparison.percentage_diff, 0.0);
    }

    #[test]
    fn test_compare_mismatched_horizons_rejected() {
        let runner = ScenarioRunner::new();
        let plan_a = SavingsPlan::new(1, 10_000.0, 1_000.0, 7.0, 10);
        let plan_b = SavingsPlan::new(2, 10_000.0, 1_000.0, 7.0, 15);

        assert!(matches!(
            runner.compare(&plan_a, &plan_b),
            Err(EngineError::InvalidInput { field: "years", .. })
        ));
    }

    #[test]
    fn test_solve_goal_through_runner() {
        let runner = ScenarioRunner::new();
        let goal = SavingsGoal::new(1, 200_000.0, 10_000.0, 7.0, 10);

        let solved = runner.solve_goal(&goal).unwrap();
        assert!(solved.required_monthly_contribution > 0.0);
    }
}
