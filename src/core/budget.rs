use super::types::BudgetItem;

/// Sum of `planned` over every item. Non-finite amounts count as `0`; the
/// category is not inspected, so duplicate categories simply add up.
pub fn planned_lifestyle_monthly(items: &[BudgetItem]) -> f64 {
    items.iter().map(|item| finite_or_zero(item.planned)).sum()
}

/// Same reduction over `current`. Informational only.
pub fn current_lifestyle_monthly(items: &[BudgetItem]) -> f64 {
    items.iter().map(|item| finite_or_zero(item.current)).sum()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Anything that can stand in for the monthly planned lifestyle spend: a
/// precomputed scalar or a list of budget items. Both shapes count a
/// non-finite amount as `0`.
pub trait LifestyleSpend {
    fn planned_lifestyle_monthly(&self) -> f64;
}

impl LifestyleSpend for f64 {
    fn planned_lifestyle_monthly(&self) -> f64 {
        finite_or_zero(*self)
    }
}

impl LifestyleSpend for [BudgetItem] {
    fn planned_lifestyle_monthly(&self) -> f64 {
        planned_lifestyle_monthly(self)
    }
}

impl LifestyleSpend for Vec<BudgetItem> {
    fn planned_lifestyle_monthly(&self) -> f64 {
        planned_lifestyle_monthly(self)
    }
}
