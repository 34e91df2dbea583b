//! AWS Lambda handler for running savings projections
//!
//! This Lambda function accepts calculator inputs as JSON and returns the
//! projection, or the required monthly contribution when a target amount is
//! supplied.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use savings_planner::{
    plan::{SavingsGoal, SavingsPlan},
    projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, YearRow},
};
use serde::{Deserialize, Serialize};

/// Input for a projection or goal solve
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Initial lump-sum investment (default: 10,000)
    #[serde(default = "default_principal")]
    pub principal: f64,

    /// Amount added at the end of each month (default: 1,000; ignored when
    /// target_amount is supplied)
    #[serde(default = "default_monthly_contribution")]
    pub monthly_contribution: f64,

    /// Nominal annual interest rate in percent (default: 7.0)
    #[serde(default = "default_annual_rate")]
    pub annual_rate_pct: f64,

    /// Investment horizon in whole years (default: 10)
    #[serde(default = "default_years")]
    pub years: u32,

    /// When present, solve for the contribution required to reach this
    /// balance instead of projecting the given contribution
    #[serde(default)]
    pub target_amount: Option<f64>,

    /// Whether to include per-year detail rows (default: true)
    #[serde(default = "default_detailed_output")]
    pub detailed_output: bool,
}

fn default_principal() -> f64 { 10_000.0 }
fn default_monthly_contribution() -> f64 { 1_000.0 }
fn default_annual_rate() -> f64 { 7.0 }
fn default_years() -> u32 { 10 }
fn default_detailed_output() -> bool { true }

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_monthly_contribution: Option<f64>,
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub balance_history: Vec<f64>,
    pub year_rows: Vec<YearRow>,
    pub execution_time_ms: u64,
}

impl ProjectionResponse {
    fn from_projection(
        projection: ProjectionResult,
        required_monthly_contribution: Option<f64>,
        execution_time_ms: u64,
    ) -> Self {
        Self {
            required_monthly_contribution,
            final_balance: projection.final_balance,
            total_contributions: projection.total_contributions,
            total_interest: projection.total_interest,
            balance_history: projection.balance_history,
            year_rows: projection.year_rows,
            execution_time_ms,
        }
    }
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(r#"{{"error":"{}"}}"#, message)))
        .unwrap()
}

fn json_response(body: &ProjectionResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body = event.body();
    let body_str = match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let engine = ProjectionEngine::new(ProjectionConfig {
        detailed_output: request.detailed_output,
    });

    let response = match request.target_amount {
        Some(target_amount) => {
            let goal = SavingsGoal::new(
                1,
                target_amount,
                request.principal,
                request.annual_rate_pct,
                request.years,
            );
            match engine.solve_goal(&goal) {
                Ok(solved) => ProjectionResponse::from_projection(
                    solved.projection,
                    Some(solved.required_monthly_contribution),
                    start.elapsed().as_millis() as u64,
                ),
                Err(e) => {
                    return Ok(error_response(400, &e.to_string()));
                }
            }
        }
        None => {
            let plan = SavingsPlan::new(
                1,
                request.principal,
                request.monthly_contribution,
                request.annual_rate_pct,
                request.years,
            );
            match engine.project_plan(&plan) {
                Ok(projection) => ProjectionResponse::from_projection(
                    projection,
                    None,
                    start.elapsed().as_millis() as u64,
                ),
                Err(e) => {
                    return Ok(error_response(400, &e.to_string()));
                }
            }
        }
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
