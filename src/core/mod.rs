mod budget;
mod engine;
mod normalize;
mod profiles;
mod types;
mod validate;

pub use budget::{LifestyleSpend, current_lifestyle_monthly, planned_lifestyle_monthly};
pub use engine::{calculate_cashflow, calculate_cashflow_with, summarize};
pub use normalize::normalize_assumptions;
pub use profiles::{PresetProfile, find_preset_profile, get_preset_profile, preset_profiles};
pub use types::{
    BudgetItem, CashflowSummary, ClampPolicy, PlannerAssumptions, RateBound, RawAssumptions,
};
pub use validate::{
    AssumptionError, validate_assumptions, validate_assumptions_with, validate_budget,
    validate_planned_spend,
};
