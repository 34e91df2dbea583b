//! Core projection engine for monthly compound-growth simulations

use super::result::{GoalResult, ProjectionResult, YearRow};
use crate::plan::{SavingsGoal, SavingsPlan, MONTHS_PER_YEAR};
use thiserror::Error;

/// Longest horizon the engine accepts, in years
pub const MAX_PROJECTION_YEARS: u32 = 200;

/// Error raised when an operation receives out-of-contract input
///
/// Every operation validates before computing, so in-range input never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid input '{field}': {message}")]
    InvalidInput { field: &'static str, message: String },
}

impl EngineError {
    pub(crate) fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Whether to build per-year detail rows alongside the balance history
    pub detailed_output: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            detailed_output: true,
        }
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project the growth of a single savings plan
    pub fn project_plan(&self, plan: &SavingsPlan) -> Result<ProjectionResult, EngineError> {
        validate_amounts(
            plan.principal,
            plan.monthly_contribution,
            plan.annual_rate_pct,
            plan.years,
        )?;

        let history = run_simulation(
            plan.principal,
            plan.monthly_contribution,
            plan.annual_rate_pct,
            plan.years,
        );

        Ok(self.build_result(plan.plan_id, plan.principal, plan.monthly_contribution, plan.years, history))
    }

    /// Solve for the level monthly contribution that grows the goal's
    /// principal to its target amount, then project the solved plan.
    ///
    /// Uses the future-value-of-annuity inversion
    /// `PMT = (FV - PV*(1+r)^n) / (((1+r)^n - 1)/r)`,
    /// clamped at zero when the principal's own growth already covers the
    /// target. At zero rate the annuity factor degenerates to `n`.
    pub fn solve_goal(&self, goal: &SavingsGoal) -> Result<GoalResult, EngineError> {
        validate_amounts(goal.principal, 0.0, goal.annual_rate_pct, goal.years)?;
        ensure_finite("target_amount", goal.target_amount)?;
        if goal.target_amount <= 0.0 {
            return Err(EngineError::invalid_input("target_amount", "must be positive"));
        }

        let monthly_rate = goal.monthly_rate();
        let months = goal.months();
        let growth = (1.0 + monthly_rate).powi(months as i32);

        let future_value_of_principal = goal.principal * growth;
        let annuity_factor = if monthly_rate == 0.0 {
            months as f64
        } else {
            (growth - 1.0) / monthly_rate
        };

        let required = ((goal.target_amount - future_value_of_principal) / annuity_factor).max(0.0);

        // The displayed growth curve must agree with the solved figure, so
        // re-run the shared simulation rather than reusing closed forms.
        let history = run_simulation(goal.principal, required, goal.annual_rate_pct, goal.years);
        let projection = self.build_result(goal.goal_id, goal.principal, required, goal.years, history);

        Ok(GoalResult {
            required_monthly_contribution: required,
            projection,
        })
    }

    /// Assemble a result from a completed simulation
    fn build_result(
        &self,
        plan_id: u32,
        principal: f64,
        monthly_contribution: f64,
        years: u32,
        balance_history: Vec<f64>,
    ) -> ProjectionResult {
        let final_balance = balance_history.last().copied().unwrap_or(principal);
        let total_contributions =
            principal + monthly_contribution * (years * MONTHS_PER_YEAR) as f64;
        let total_interest = final_balance - total_contributions;

        let year_rows = if self.config.detailed_output {
            let yearly_contributions = monthly_contribution * MONTHS_PER_YEAR as f64;
            balance_history
                .windows(2)
                .enumerate()
                .map(|(i, pair)| YearRow {
                    year: (i + 1) as u32,
                    bop_balance: pair[0],
                    contributions: yearly_contributions,
                    interest: pair[1] - pair[0] - yearly_contributions,
                    eop_balance: pair[1],
                })
                .collect()
        } else {
            Vec::new()
        };

        ProjectionResult {
            plan_id,
            final_balance,
            total_contributions,
            total_interest,
            balance_history,
            year_rows,
        }
    }
}

/// Simulate monthly compounding and return balances sampled at year
/// boundaries: index 0 is the principal, length is `years + 1`.
///
/// This is the shared primitive behind both projection and goal solving;
/// it is deterministic and side-effect-free.
pub fn simulate_yearly_balances(
    principal: f64,
    monthly_contribution: f64,
    annual_rate_pct: f64,
    years: u32,
) -> Result<Vec<f64>, EngineError> {
    validate_amounts(principal, monthly_contribution, annual_rate_pct, years)?;
    Ok(run_simulation(principal, monthly_contribution, annual_rate_pct, years))
}

/// The simulation loop itself, for inputs already validated.
///
/// The per-month update is multiply-then-add in this exact order so that
/// accumulated floating-point error is reproducible across runs.
fn run_simulation(
    principal: f64,
    monthly_contribution: f64,
    annual_rate_pct: f64,
    years: u32,
) -> Vec<f64> {
    let monthly_rate = annual_rate_pct / 100.0 / MONTHS_PER_YEAR as f64;
    let months = years * MONTHS_PER_YEAR;

    let mut balance = principal;
    let mut history = Vec::with_capacity(years as usize + 1);
    history.push(balance);

    for month in 1..=months {
        balance = balance * (1.0 + monthly_rate) + monthly_contribution;
        if month % MONTHS_PER_YEAR == 0 {
            history.push(balance);
        }
    }

    history
}

fn validate_amounts(
    principal: f64,
    monthly_contribution: f64,
    annual_rate_pct: f64,
    years: u32,
) -> Result<(), EngineError> {
    ensure_finite("principal", principal)?;
    ensure_finite("monthly_contribution", monthly_contribution)?;
    ensure_finite("annual_rate_pct", annual_rate_pct)?;

    if principal < 0.0 {
        return Err(EngineError::invalid_input("principal", "must be non-negative"));
    }
    if monthly_contribution < 0.0 {
        return Err(EngineError::invalid_input("monthly_contribution", "must be non-negative"));
    }
    if annual_rate_pct < 0.0 {
        return Err(EngineError::invalid_input("annual_rate_pct", "must be non-negative"));
    }
    if years == 0 {
        return Err(EngineError::invalid_input("years", "must be positive"));
    }
    if years > MAX_PROJECTION_YEARS {
        return Err(EngineError::invalid_input(
            "years",
            format!("must be at most {}", MAX_PROJECTION_YEARS),
        ));
    }

    Ok(())
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid_input(field, "must be a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig::default())
    }

    fn reference_plan() -> SavingsPlan {
        SavingsPlan::new(1, 10_000.0, 1_000.0, 7.0, 10)
    }

    /// Closed-form future value of the same recurrence, used as an
    /// independent check on the simulation loop.
    fn closed_form_fv(principal: f64, monthly_contribution: f64, annual_rate_pct: f64, years: u32) -> f64 {
        let r = annual_rate_pct / 100.0 / 12.0;
        let n = (years * 12) as i32;
        let growth = (1.0 + r).powi(n);
        let annuity = if r == 0.0 { n as f64 } else { (growth - 1.0) / r };
        principal * growth + monthly_contribution * annuity
    }

    #[test]
    fn test_projection_runs() {
        let result = engine().project_plan(&reference_plan()).unwrap();

        assert_eq!(result.balance_history.len(), 11);
        assert_eq!(result.balance_history[0], 10_000.0);
        assert_eq!(result.year_rows.len(), 10);
    }

    #[test]
    fn test_zero_rate_accumulation() {
        let plan = SavingsPlan::new(2, 1_000.0, 100.0, 0.0, 2);
        let result = engine().project_plan(&plan).unwrap();

        assert_relative_eq!(result.final_balance, 3_400.0, epsilon = 1e-9);
        assert_relative_eq!(result.total_contributions, 3_400.0, epsilon = 1e-9);
        assert_relative_eq!(result.total_interest, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reference_case_matches_direct_recomputation() {
        let plan = reference_plan();
        let result = engine().project_plan(&plan).unwrap();

        // Independent month-by-month loop
        let mut balance = plan.principal;
        for _ in 0..plan.months() {
            balance = balance * (1.0 + plan.monthly_rate()) + plan.monthly_contribution;
        }
        assert_relative_eq!(result.final_balance, balance, max_relative = 1e-12);

        // And the closed-form future value of the same recurrence
        let fv = closed_form_fv(plan.principal, plan.monthly_contribution, plan.annual_rate_pct, plan.years);
        assert_relative_eq!(result.final_balance, fv, max_relative = 1e-9);
    }

    #[test]
    fn test_contributions_plus_interest_equals_balance() {
        for plan in [
            reference_plan(),
            SavingsPlan::new(2, 0.0, 250.0, 8.0, 20),
            SavingsPlan::new(3, 25_000.0, 0.0, 5.0, 10),
            SavingsPlan::new(4, 1_500.0, 150.0, 4.25, 5),
        ] {
            let result = engine().project_plan(&plan).unwrap();
            assert_relative_eq!(
                result.total_contributions + result.total_interest,
                result.final_balance,
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn test_history_non_decreasing() {
        let result = engine().project_plan(&reference_plan()).unwrap();

        for pair in result.balance_history.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_year_rows_consistent_with_history() {
        let result = engine().project_plan(&reference_plan()).unwrap();

        assert_eq!(result.year_rows[0].bop_balance, result.balance_history[0]);
        assert_eq!(
            result.year_rows.last().unwrap().eop_balance,
            result.final_balance
        );

        for row in &result.year_rows {
            assert_relative_eq!(
                row.bop_balance + row.contributions + row.interest,
                row.eop_balance,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_detailed_output_disabled() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            detailed_output: false,
        });
        let result = engine.project_plan(&reference_plan()).unwrap();

        assert!(result.year_rows.is_empty());
        assert_eq!(result.balance_history.len(), 11);
    }

    #[test]
    fn test_simulate_yearly_balances() {
        let history = simulate_yearly_balances(1_000.0, 100.0, 0.0, 2).unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history[0], 1_000.0);
        assert_relative_eq!(history[1], 2_200.0, epsilon = 1e-9);
        assert_relative_eq!(history[2], 3_400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_goal_round_trip() {
        let goal = SavingsGoal::new(1, 200_000.0, 10_000.0, 7.0, 10);
        let solved = engine().solve_goal(&goal).unwrap();

        assert!(solved.required_monthly_contribution > 0.0);
        assert_relative_eq!(
            solved.projection.final_balance,
            goal.target_amount,
            max_relative = 1e-4
        );

        // Projecting a plan with the solved contribution must land on the
        // same curve
        let plan = SavingsPlan::new(
            1,
            goal.principal,
            solved.required_monthly_contribution,
            goal.annual_rate_pct,
            goal.years,
        );
        let reprojected = engine().project_plan(&plan).unwrap();
        assert_relative_eq!(
            reprojected.final_balance,
            solved.projection.final_balance,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_goal_zero_rate() {
        let goal = SavingsGoal::new(2, 3_400.0, 1_000.0, 0.0, 2);
        let solved = engine().solve_goal(&goal).unwrap();

        // (3400 - 1000) / 24
        assert_relative_eq!(solved.required_monthly_contribution, 100.0, epsilon = 1e-9);
        assert_relative_eq!(solved.projection.final_balance, 3_400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_goal_clamped_to_zero() {
        // Principal alone more than covers the target
        let goal = SavingsGoal::new(3, 10_000.0, 10_000.0, 7.0, 10);
        let solved = engine().solve_goal(&goal).unwrap();

        assert_eq!(solved.required_monthly_contribution, 0.0);
        assert!(solved.projection.final_balance > goal.target_amount);
    }

    #[test]
    fn test_goal_history_length() {
        let goal = SavingsGoal::new(4, 50_000.0, 0.0, 6.0, 15);
        let solved = engine().solve_goal(&goal).unwrap();

        assert_eq!(solved.projection.balance_history.len(), 16);
        assert_eq!(solved.projection.balance_history[0], 0.0);
    }

    #[test]
    fn test_rejects_out_of_contract_input() {
        let e = engine();

        let negative_principal = SavingsPlan::new(1, -1.0, 100.0, 5.0, 10);
        assert!(matches!(
            e.project_plan(&negative_principal),
            Err(EngineError::InvalidInput { field: "principal", .. })
        ));

        let negative_rate = SavingsPlan::new(1, 100.0, 100.0, -5.0, 10);
        assert!(matches!(
            e.project_plan(&negative_rate),
            Err(EngineError::InvalidInput { field: "annual_rate_pct", .. })
        ));

        let zero_years = SavingsPlan::new(1, 100.0, 100.0, 5.0, 0);
        assert!(matches!(
            e.project_plan(&zero_years),
            Err(EngineError::InvalidInput { field: "years", .. })
        ));

        let nan_contribution = SavingsPlan::new(1, 100.0, f64::NAN, 5.0, 10);
        assert!(e.project_plan(&nan_contribution).is_err());

        let horizon_too_long = SavingsPlan::new(1, 100.0, 100.0, 5.0, MAX_PROJECTION_YEARS + 1);
        assert!(e.project_plan(&horizon_too_long).is_err());

        // Same contract for the goal solver and the simulation primitive
        let bad_target = SavingsGoal::new(1, 0.0, 100.0, 5.0, 10);
        assert!(matches!(
            e.solve_goal(&bad_target),
            Err(EngineError::InvalidInput { field: "target_amount", .. })
        ));

        assert!(simulate_yearly_balances(-1.0, 0.0, 5.0, 10).is_err());
        assert!(simulate_yearly_balances(100.0, 0.0, f64::INFINITY, 10).is_err());
    }
}
