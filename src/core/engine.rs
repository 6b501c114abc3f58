use super::budget::LifestyleSpend;
use super::normalize::normalize_assumptions;
use super::types::{CashflowSummary, ClampPolicy, PlannerAssumptions, RawAssumptions};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Monthly cashflow from already-normalized assumptions.
///
/// A negative `planned_lifestyle_monthly` is not rejected; it flows through
/// the arithmetic like any other value.
pub fn summarize(
    assumptions: &PlannerAssumptions,
    planned_lifestyle_monthly: f64,
) -> CashflowSummary {
    let gross_monthly = assumptions.gross_yearly / MONTHS_PER_YEAR;
    let tax_monthly = gross_monthly * assumptions.tax_rate;
    let net_monthly = gross_monthly - tax_monthly;
    let invest_monthly = net_monthly * assumptions.savings_rate;
    let surplus_monthly = net_monthly - invest_monthly - planned_lifestyle_monthly;
    // A deficit never eats into the rate-implied investment.
    let contribution_monthly = invest_monthly + surplus_monthly.max(0.0);

    CashflowSummary {
        gross_monthly,
        tax_monthly,
        net_monthly,
        invest_monthly,
        planned_lifestyle_monthly,
        surplus_monthly,
        contribution_monthly,
    }
}

/// Normalizes `raw` with the default clamp policy and summarizes it against
/// `spend`, which is either a precomputed scalar or a list of budget items.
pub fn calculate_cashflow<S>(raw: &RawAssumptions, spend: &S) -> CashflowSummary
where
    S: LifestyleSpend + ?Sized,
{
    calculate_cashflow_with(raw, spend, ClampPolicy::default())
}

pub fn calculate_cashflow_with<S>(
    raw: &RawAssumptions,
    spend: &S,
    policy: ClampPolicy,
) -> CashflowSummary
where
    S: LifestyleSpend + ?Sized,
{
    let assumptions = normalize_assumptions(raw, policy);
    let summary = summarize(&assumptions, spend.planned_lifestyle_monthly());
    tracing::debug!(
        gross_yearly = assumptions.gross_yearly,
        tax_rate = assumptions.tax_rate,
        savings_rate = assumptions.savings_rate,
        rate_ceiling = policy.rate_ceiling,
        surplus_monthly = summary.surplus_monthly,
        "computed cashflow summary"
    );
    summary
}
