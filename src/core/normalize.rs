use super::types::{ClampPolicy, PlannerAssumptions, RawAssumptions};

/// Clamps raw caller assumptions into the domain the calculator expects.
///
/// Nothing here fails: missing or non-finite numbers become `0`, negative
/// amounts become `0`, and both rates are squeezed into
/// `[0, policy.rate_ceiling]`.
pub fn normalize_assumptions(raw: &RawAssumptions, policy: ClampPolicy) -> PlannerAssumptions {
    let ceiling = ClampPolicy::new(policy.rate_ceiling).rate_ceiling;
    PlannerAssumptions {
        gross_yearly: finite_or_zero(raw.gross_yearly).max(0.0),
        tax_rate: clamp_rate(raw.tax_rate, ceiling),
        savings_rate: clamp_rate(raw.savings_rate, ceiling),
        return_rate: raw.return_rate,
        starting_net_worth: raw.starting_net_worth,
    }
}

fn clamp_rate(value: Option<f64>, ceiling: f64) -> f64 {
    finite_or_zero(value).clamp(0.0, ceiling)
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
