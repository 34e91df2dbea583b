//! Load savings plans from a plan block CSV

use super::SavingsPlan;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the plan block columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PlanID")]
    plan_id: u32,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "AnnualRatePct")]
    annual_rate_pct: f64,
    #[serde(rename = "Years")]
    years: u32,
}

impl CsvRow {
    fn to_plan(self) -> Result<SavingsPlan, Box<dyn Error>> {
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(format!("Plan {}: bad Principal {}", self.plan_id, self.principal).into());
        }

        if !self.monthly_contribution.is_finite() || self.monthly_contribution < 0.0 {
            return Err(format!(
                "Plan {}: bad MonthlyContribution {}",
                self.plan_id, self.monthly_contribution
            )
            .into());
        }

        if !self.annual_rate_pct.is_finite() || self.annual_rate_pct < 0.0 {
            return Err(format!(
                "Plan {}: bad AnnualRatePct {}",
                self.plan_id, self.annual_rate_pct
            )
            .into());
        }

        if self.years == 0 {
            return Err(format!("Plan {}: Years must be positive", self.plan_id).into());
        }

        Ok(SavingsPlan {
            plan_id: self.plan_id,
            principal: self.principal,
            monthly_contribution: self.monthly_contribution,
            annual_rate_pct: self.annual_rate_pct,
            years: self.years,
        })
    }
}

/// Load all plans from a CSV file
pub fn load_plans<P: AsRef<Path>>(path: P) -> Result<Vec<SavingsPlan>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut plans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let plan = row.to_plan()?;
        plans.push(plan);
    }

    log::debug!("loaded {} plans", plans.len());
    Ok(plans)
}

/// Load plans from any reader (e.g., string buffer, network stream)
pub fn load_plans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<SavingsPlan>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut plans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let plan = row.to_plan()?;
        plans.push(plan);
    }

    Ok(plans)
}

/// Load plans from the default sample_plans.csv location
pub fn load_default_plans() -> Result<Vec<SavingsPlan>, Box<dyn Error>> {
    load_plans("data/sample_plans.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
PlanID,Principal,MonthlyContribution,AnnualRatePct,Years
1,10000,1000,7.0,10
2,5000,500,6.5,15
3,0,250,8.0,20
";

    #[test]
    fn test_load_plans_from_reader() {
        let plans = load_plans_from_reader(SAMPLE.as_bytes()).expect("Failed to parse plans");
        assert_eq!(plans.len(), 3);

        let p1 = &plans[0];
        assert_eq!(p1.plan_id, 1);
        assert_eq!(p1.principal, 10_000.0);
        assert_eq!(p1.years, 10);

        let p3 = &plans[2];
        assert_eq!(p3.principal, 0.0);
        assert_eq!(p3.annual_rate_pct, 8.0);
    }

    #[test]
    fn test_rejects_zero_years() {
        let bad = "\
PlanID,Principal,MonthlyContribution,AnnualRatePct,Years
1,10000,1000,7.0,0
";
        assert!(load_plans_from_reader(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_negative_contribution() {
        let bad = "\
PlanID,Principal,MonthlyContribution,AnnualRatePct,Years
1,10000,-50,7.0,10
";
        assert!(load_plans_from_reader(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_load_default_plans() {
        let plans = load_default_plans().expect("Failed to load plans");
        assert_eq!(plans.len(), 8);

        let p1 = &plans[0];
        assert_eq!(p1.plan_id, 1);
        assert_eq!(p1.years, 10);
    }
}
