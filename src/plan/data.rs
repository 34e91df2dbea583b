//! Savings plan data structures matching the plan block format

use serde::{Deserialize, Serialize};

/// Number of compounding steps per year
pub const MONTHS_PER_YEAR: u32 = 12;

/// A single savings plan: a lump-sum principal plus level monthly
/// contributions, compounding monthly at a nominal annual rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsPlan {
    /// Unique plan identifier
    pub plan_id: u32,

    /// Initial lump-sum investment
    pub principal: f64,

    /// Fixed amount added at the end of each monthly compounding step
    pub monthly_contribution: f64,

    /// Nominal annual interest rate, in percent (7.0 = 7%)
    pub annual_rate_pct: f64,

    /// Investment horizon in whole years
    pub years: u32,
}

impl SavingsPlan {
    /// Create a new plan with required fields
    pub fn new(
        plan_id: u32,
        principal: f64,
        monthly_contribution: f64,
        annual_rate_pct: f64,
        years: u32,
    ) -> Self {
        Self {
            plan_id,
            principal,
            monthly_contribution,
            annual_rate_pct,
            years,
        }
    }

    /// Monthly compounding rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_pct / 100.0 / MONTHS_PER_YEAR as f64
    }

    /// Total number of compounding steps over the horizon
    pub fn months(&self) -> u32 {
        self.years * MONTHS_PER_YEAR
    }
}

/// A savings target: solve for the level monthly contribution that grows
/// `principal` to `target_amount` over `years`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// Unique goal identifier
    pub goal_id: u32,

    /// Balance to reach at the end of the horizon
    pub target_amount: f64,

    /// Initial lump-sum investment
    pub principal: f64,

    /// Nominal annual interest rate, in percent
    pub annual_rate_pct: f64,

    /// Investment horizon in whole years
    pub years: u32,
}

impl SavingsGoal {
    /// Create a new goal with required fields
    pub fn new(
        goal_id: u32,
        target_amount: f64,
        principal: f64,
        annual_rate_pct: f64,
        years: u32,
    ) -> Self {
        Self {
            goal_id,
            target_amount,
            principal,
            annual_rate_pct,
            years,
        }
    }

    /// Monthly compounding rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_pct / 100.0 / MONTHS_PER_YEAR as f64
    }

    /// Total number of compounding steps over the horizon
    pub fn months(&self) -> u32 {
        self.years * MONTHS_PER_YEAR
    }
}
