use axum::{
    Router,
    extract::{Json, Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    AssumptionError, BudgetItem, CashflowSummary, ClampPolicy, LifestyleSpend,
    PlannerAssumptions, PresetProfile, RateBound, RawAssumptions, calculate_cashflow_with,
    current_lifestyle_monthly, find_preset_profile, get_preset_profile, normalize_assumptions,
    planned_lifestyle_monthly, preset_profiles, validate_assumptions_with, validate_budget,
    validate_planned_spend,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliRateBound {
    Full,
    Capped,
}

impl From<CliRateBound> for RateBound {
    fn from(value: CliRateBound) -> Self {
        match value {
            CliRateBound::Full => RateBound::Full,
            CliRateBound::Capped => RateBound::Capped,
        }
    }
}

impl From<CliRateBound> for ClampPolicy {
    fn from(value: CliRateBound) -> Self {
        RateBound::from(value).into()
    }
}

impl From<RateBound> for CliRateBound {
    fn from(value: RateBound) -> Self {
        match value {
            RateBound::Full => CliRateBound::Full,
            RateBound::Capped => CliRateBound::Capped,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "cashflow",
    about = "Monthly cashflow planner (tax, savings rate, budget, surplus)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute one monthly summary and print it as JSON
    Summary(SummaryArgs),
    /// Serve the JSON API
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[arg(long, help = "Annual gross income before tax")]
    pub gross_yearly: Option<f64>,
    #[arg(long, help = "Effective tax rate as a fraction, e.g. 0.28")]
    pub tax_rate: Option<f64>,
    #[arg(long, help = "Share of net income invested, as a fraction")]
    pub savings_rate: Option<f64>,
    #[arg(long, help = "Expected annual return; carried through, not used")]
    pub return_rate: Option<f64>,
    #[arg(long, help = "Starting net worth; carried through, not used")]
    pub starting_net_worth: Option<f64>,
    #[arg(
        long,
        help = "Preset profile supplying default rates: conservative, standard, aggressive"
    )]
    pub profile: Option<String>,
    #[arg(
        long,
        help = "Planned monthly lifestyle spend; takes precedence over --item"
    )]
    pub planned: Option<f64>,
    #[arg(
        long = "item",
        value_parser = parse_budget_item,
        help = "Budget line as CATEGORY=PLANNED or CATEGORY=CURRENT:PLANNED (repeatable)"
    )]
    pub items: Vec<BudgetItem>,
    #[arg(long, value_enum, help = "Rate ceiling: full (1.0) or capped (0.9)")]
    pub rate_bound: Option<CliRateBound>,
    #[arg(
        long,
        default_value_t = false,
        help = "Reject non-finite, negative or above-ceiling input instead of clamping"
    )]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(
        long,
        value_enum,
        default_value_t = CliRateBound::Full,
        help = "Rate ceiling applied when a request does not name one"
    )]
    pub rate_bound: CliRateBound,
}

fn parse_budget_item(raw: &str) -> Result<BudgetItem, String> {
    let (category, amounts) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=AMOUNT, got '{raw}'"))?;
    let category = category.trim();
    if category.is_empty() {
        return Err(format!("missing category in '{raw}'"));
    }
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid amount '{s}' in '{raw}': {e}"))
    };
    let (current, planned) = match amounts.split_once(':') {
        Some((current, planned)) => (parse(current)?, parse(planned)?),
        None => (0.0, parse(amounts)?),
    };
    Ok(BudgetItem::new(category, current, planned))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CashflowPayload {
    gross_yearly: Option<f64>,
    tax_rate: Option<f64>,
    savings_rate: Option<f64>,
    return_rate: Option<f64>,
    starting_net_worth: Option<f64>,
    profile: Option<String>,
    planned_lifestyle_monthly: Option<f64>,
    budget_items: Option<Vec<BudgetItem>>,
    rate_bound: Option<RateBound>,
    strict: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
enum SpendInput {
    Scalar(f64),
    Items(Vec<BudgetItem>),
}

#[derive(Debug)]
struct CashflowRequest {
    assumptions: RawAssumptions,
    spend: SpendInput,
    policy: ClampPolicy,
    profile: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetTotals {
    current_lifestyle_monthly: f64,
    planned_lifestyle_monthly: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CashflowResponse {
    profile: Option<&'static str>,
    rate_ceiling: f64,
    assumptions: PlannerAssumptions,
    budget: BudgetTotals,
    summary: CashflowSummary,
}

#[derive(Debug, Serialize)]
struct ProfilesResponse {
    profiles: &'static [PresetProfile],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone, Copy)]
struct AppState {
    default_policy: ClampPolicy,
}

pub async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Summary(args) => {
            let request = build_request(args, ClampPolicy::default()).map_err(|e| e.to_string())?;
            let response = compute_response(&request);
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| format!("Failed to render summary: {e}"))?;
            println!("{json}");
            Ok(())
        }
        Command::Serve(args) => run_http_server(args.port, args.rate_bound.into())
            .await
            .map_err(|e| format!("Server error: {e}")),
    }
}

fn build_request(
    args: SummaryArgs,
    default_policy: ClampPolicy,
) -> Result<CashflowRequest, AssumptionError> {
    let explicit = RawAssumptions {
        gross_yearly: args.gross_yearly,
        tax_rate: args.tax_rate,
        savings_rate: args.savings_rate,
        return_rate: args.return_rate,
        starting_net_worth: args.starting_net_worth,
    };

    let profile = match args.profile.as_deref() {
        Some(name) => Some(
            find_preset_profile(name)
                .ok_or_else(|| AssumptionError::UnknownProfile(name.to_string()))?,
        ),
        None => None,
    };
    let assumptions = match profile {
        Some(p) => explicit.or(p.assumptions()),
        None => explicit,
    };

    let spend = match args.planned {
        Some(v) => SpendInput::Scalar(v),
        None => SpendInput::Items(args.items),
    };

    let policy = args.rate_bound.map(ClampPolicy::from).unwrap_or(default_policy);

    if args.strict {
        validate_assumptions_with(&assumptions, policy)?;
        match &spend {
            SpendInput::Scalar(v) => validate_planned_spend(*v)?,
            SpendInput::Items(items) => validate_budget(items)?,
        }
    }

    Ok(CashflowRequest {
        assumptions,
        spend,
        policy,
        profile: profile.map(|p| p.name),
    })
}

fn compute_response(request: &CashflowRequest) -> CashflowResponse {
    let (summary, budget) = match &request.spend {
        SpendInput::Scalar(planned) => (
            calculate_cashflow_with(&request.assumptions, planned, request.policy),
            BudgetTotals {
                current_lifestyle_monthly: 0.0,
                planned_lifestyle_monthly: planned.planned_lifestyle_monthly(),
            },
        ),
        SpendInput::Items(items) => (
            calculate_cashflow_with(&request.assumptions, items, request.policy),
            BudgetTotals {
                current_lifestyle_monthly: current_lifestyle_monthly(items),
                planned_lifestyle_monthly: planned_lifestyle_monthly(items),
            },
        ),
    };

    CashflowResponse {
        profile: request.profile,
        rate_ceiling: request.policy.rate_ceiling,
        assumptions: normalize_assumptions(&request.assumptions, request.policy),
        budget,
        summary,
    }
}

fn api_request_from_payload(
    payload: CashflowPayload,
    default_policy: ClampPolicy,
) -> Result<CashflowRequest, AssumptionError> {
    let args = SummaryArgs {
        gross_yearly: payload.gross_yearly,
        tax_rate: payload.tax_rate,
        savings_rate: payload.savings_rate,
        return_rate: payload.return_rate,
        starting_net_worth: payload.starting_net_worth,
        profile: payload.profile,
        planned: payload.planned_lifestyle_monthly,
        items: payload.budget_items.unwrap_or_default(),
        rate_bound: payload.rate_bound.map(CliRateBound::from),
        strict: payload.strict.unwrap_or(false),
    };
    build_request(args, default_policy)
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<CashflowRequest, String> {
    let payload = serde_json::from_str::<CashflowPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload, ClampPolicy::default()).map_err(|e| e.to_string())
}

pub fn router(default_policy: ClampPolicy) -> Router {
    Router::new()
        .route(
            "/api/cashflow",
            get(cashflow_get_handler).post(cashflow_post_handler),
        )
        .route("/api/profiles", get(profiles_handler))
        .route("/api/profiles/:name", get(profile_handler))
        .fallback(not_found_handler)
        .with_state(AppState { default_policy })
}

pub async fn run_http_server(port: u16, default_policy: ClampPolicy) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(default_policy);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        rate_ceiling = default_policy.rate_ceiling,
        "cashflow HTTP API listening"
    );

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn cashflow_get_handler(
    State(state): State<AppState>,
    Query(payload): Query<CashflowPayload>,
) -> Response {
    cashflow_handler_impl(state, payload)
}

async fn cashflow_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<CashflowPayload>,
) -> Response {
    cashflow_handler_impl(state, payload)
}

fn cashflow_handler_impl(state: AppState, payload: CashflowPayload) -> Response {
    let request = match api_request_from_payload(payload, state.default_policy) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, "rejected cashflow request");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };
    json_response(StatusCode::OK, compute_response(&request))
}

async fn profiles_handler() -> Response {
    json_response(
        StatusCode::OK,
        ProfilesResponse {
            profiles: preset_profiles(),
        },
    )
}

async fn profile_handler(Path(name): Path<String>) -> Response {
    match get_preset_profile(&name) {
        Some(assumptions) => json_response(StatusCode::OK, assumptions),
        None => error_response(
            StatusCode::NOT_FOUND,
            &AssumptionError::UnknownProfile(name).to_string(),
        ),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
