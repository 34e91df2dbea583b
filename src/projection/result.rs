//! Projection output structures

use serde::{Deserialize, Serialize};

/// A single row of projection output for one year of the horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRow {
    /// Year of the horizon (1-indexed)
    pub year: u32,

    /// Balance at the start of the year
    pub bop_balance: f64,

    /// Contributions deposited during the year
    pub contributions: f64,

    /// Interest earned during the year
    pub interest: f64,

    /// Balance at the end of the year
    pub eop_balance: f64,
}

/// Complete projection result for a single plan
///
/// `total_interest` is always derived as `final_balance - total_contributions`
/// so the three figures stay consistent by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Plan identifier
    pub plan_id: u32,

    /// Balance at the end of the horizon
    pub final_balance: f64,

    /// Principal plus all monthly contributions
    pub total_contributions: f64,

    /// Interest earned over the horizon
    pub total_interest: f64,

    /// Balances sampled at year boundaries; index 0 is the principal,
    /// length is years + 1
    pub balance_history: Vec<f64>,

    /// Per-year detail rows (empty unless detailed output was requested)
    pub year_rows: Vec<YearRow>,
}

/// Result of solving a savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalResult {
    /// Level monthly contribution that reaches the target (0 when the
    /// principal's own growth already covers it)
    pub required_monthly_contribution: f64,

    /// Projection of the goal's plan using the solved contribution
    pub projection: ProjectionResult,
}
