use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound applied to tax and savings rates by the normalizer.
///
/// Two ceilings are in use: `FULL` keeps the conceptual `[0, 1]` range,
/// `CAPPED` stops at `0.9` so a plan always leaves some net income behind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClampPolicy {
    pub rate_ceiling: f64,
}

impl ClampPolicy {
    pub const FULL: ClampPolicy = ClampPolicy { rate_ceiling: 1.0 };
    pub const CAPPED: ClampPolicy = ClampPolicy { rate_ceiling: 0.9 };

    /// Builds a policy from an arbitrary ceiling, forced into `[0, 1]`.
    pub fn new(rate_ceiling: f64) -> Self {
        if !rate_ceiling.is_finite() {
            return Self::default();
        }
        Self {
            rate_ceiling: rate_ceiling.clamp(0.0, 1.0),
        }
    }
}

impl Default for ClampPolicy {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateBound {
    #[serde(alias = "uncapped")]
    Full,
    #[serde(alias = "ninety")]
    Capped,
}

impl From<RateBound> for ClampPolicy {
    fn from(value: RateBound) -> Self {
        match value {
            RateBound::Full => ClampPolicy::FULL,
            RateBound::Capped => ClampPolicy::CAPPED,
        }
    }
}

/// Assumptions exactly as a caller supplied them. Any field may be missing,
/// negative or out of range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAssumptions {
    pub gross_yearly: Option<f64>,
    pub tax_rate: Option<f64>,
    pub savings_rate: Option<f64>,
    pub return_rate: Option<f64>,
    pub starting_net_worth: Option<f64>,
}

impl RawAssumptions {
    /// Field-wise merge: values present on `self` win, gaps are filled from
    /// `fallback`.
    pub fn or(self, fallback: RawAssumptions) -> RawAssumptions {
        RawAssumptions {
            gross_yearly: self.gross_yearly.or(fallback.gross_yearly),
            tax_rate: self.tax_rate.or(fallback.tax_rate),
            savings_rate: self.savings_rate.or(fallback.savings_rate),
            return_rate: self.return_rate.or(fallback.return_rate),
            starting_net_worth: self.starting_net_worth.or(fallback.starting_net_worth),
        }
    }
}

/// Assumptions after normalization. `return_rate` and `starting_net_worth`
/// ride along untouched; the monthly summary never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerAssumptions {
    pub gross_yearly: f64,
    pub tax_rate: f64,
    pub savings_rate: f64,
    pub return_rate: Option<f64>,
    pub starting_net_worth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub category: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub current: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub planned: f64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl BudgetItem {
    pub fn new(category: impl Into<String>, current: f64, planned: f64) -> Self {
        Self {
            category: category.into(),
            current,
            planned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowSummary {
    pub gross_monthly: f64,
    pub tax_monthly: f64,
    pub net_monthly: f64,
    pub invest_monthly: f64,
    pub planned_lifestyle_monthly: f64,
    pub surplus_monthly: f64,
    pub contribution_monthly: f64,
}

impl CashflowSummary {
    pub fn is_deficit(&self) -> bool {
        self.surplus_monthly < 0.0
    }
}
