//! Opt-in strict checks. The permissive normalizer never calls these; a
//! caller that wants rejection instead of clamping runs them first.

use thiserror::Error;

use super::types::{BudgetItem, ClampPolicy, RawAssumptions};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssumptionError {
    #[error("{field} must be a finite number")]
    NonFinite { field: String },

    #[error("{field} must be >= 0, got {value}")]
    Negative { field: String, value: f64 },

    #[error("{field} must be between 0 and {ceiling}, got {value}")]
    RateOutOfRange {
        field: String,
        value: f64,
        ceiling: f64,
    },

    #[error("unknown profile: {0}")]
    UnknownProfile(String),
}

pub fn validate_assumptions(raw: &RawAssumptions) -> Result<(), AssumptionError> {
    validate_assumptions_with(raw, ClampPolicy::default())
}

/// Strict check against the ceiling the normalizer would clamp to, so
/// nothing that passes here gets clamped later.
pub fn validate_assumptions_with(
    raw: &RawAssumptions,
    policy: ClampPolicy,
) -> Result<(), AssumptionError> {
    let ceiling = ClampPolicy::new(policy.rate_ceiling).rate_ceiling;
    check_amount("grossYearly", raw.gross_yearly)?;
    check_rate("taxRate", raw.tax_rate, ceiling)?;
    check_rate("savingsRate", raw.savings_rate, ceiling)?;
    if let Some(v) = raw.return_rate {
        check_finite("returnRate", v)?;
    }
    if let Some(v) = raw.starting_net_worth {
        check_finite("startingNetWorth", v)?;
    }
    Ok(())
}

pub fn validate_budget(items: &[BudgetItem]) -> Result<(), AssumptionError> {
    for item in items {
        check_amount(&format!("budget[{}].current", item.category), Some(item.current))?;
        check_amount(&format!("budget[{}].planned", item.category), Some(item.planned))?;
    }
    Ok(())
}

pub fn validate_planned_spend(planned_lifestyle_monthly: f64) -> Result<(), AssumptionError> {
    check_amount("plannedLifestyleMonthly", Some(planned_lifestyle_monthly))
}

fn check_finite(field: &str, value: f64) -> Result<(), AssumptionError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AssumptionError::NonFinite {
            field: field.to_string(),
        })
    }
}

fn check_amount(field: &str, value: Option<f64>) -> Result<(), AssumptionError> {
    let Some(value) = value else {
        return Ok(());
    };
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(AssumptionError::Negative {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_rate(field: &str, value: Option<f64>, ceiling: f64) -> Result<(), AssumptionError> {
    let Some(value) = value else {
        return Ok(());
    };
    check_finite(field, value)?;
    if !(0.0..=ceiling).contains(&value) {
        return Err(AssumptionError::RateOutOfRange {
            field: field.to_string(),
            value,
            ceiling,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_accepted() {
        assert_eq!(validate_assumptions(&RawAssumptions::default()), Ok(()));
    }

    #[test]
    fn in_range_values_are_accepted() {
        let raw = RawAssumptions {
            gross_yearly: Some(120_000.0),
            tax_rate: Some(0.28),
            savings_rate: Some(1.0),
            return_rate: Some(-0.02),
            starting_net_worth: Some(-5_000.0),
        };
        assert_eq!(validate_assumptions(&raw), Ok(()));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let raw = RawAssumptions {
            gross_yearly: Some(f64::INFINITY),
            ..RawAssumptions::default()
        };
        assert_eq!(
            validate_assumptions(&raw),
            Err(AssumptionError::NonFinite {
                field: "grossYearly".to_string()
            })
        );

        let raw = RawAssumptions {
            return_rate: Some(f64::NAN),
            ..RawAssumptions::default()
        };
        assert!(matches!(
            validate_assumptions(&raw),
            Err(AssumptionError::NonFinite { .. })
        ));
    }

    #[test]
    fn negative_income_is_rejected() {
        let raw = RawAssumptions {
            gross_yearly: Some(-1.0),
            ..RawAssumptions::default()
        };
        let err = validate_assumptions(&raw).expect_err("negative income");
        assert_eq!(err.to_string(), "grossYearly must be >= 0, got -1");
    }

    #[test]
    fn rates_outside_unit_interval_are_rejected() {
        let raw = RawAssumptions {
            tax_rate: Some(1.5),
            ..RawAssumptions::default()
        };
        assert_eq!(
            validate_assumptions(&raw),
            Err(AssumptionError::RateOutOfRange {
                field: "taxRate".to_string(),
                value: 1.5,
                ceiling: 1.0
            })
        );
    }

    #[test]
    fn budget_items_are_checked() {
        let items = vec![
            BudgetItem::new("rent", 1_500.0, 1_400.0),
            BudgetItem::new("food", 500.0, f64::NAN),
        ];
        let err = validate_budget(&items).expect_err("nan planned");
        assert_eq!(err.to_string(), "budget[food].planned must be a finite number");
        assert_eq!(validate_budget(&items[..1]), Ok(()));
    }

    #[test]
    fn rates_are_checked_against_the_policy_ceiling() {
        let raw = RawAssumptions {
            savings_rate: Some(0.95),
            ..RawAssumptions::default()
        };
        assert_eq!(validate_assumptions_with(&raw, ClampPolicy::FULL), Ok(()));
        let err = validate_assumptions_with(&raw, ClampPolicy::CAPPED)
            .expect_err("above capped ceiling");
        assert_eq!(err.to_string(), "savingsRate must be between 0 and 0.9, got 0.95");
    }

    #[test]
    fn planned_spend_scalar_uses_its_own_field_name() {
        assert_eq!(validate_planned_spend(3_500.0), Ok(()));
        let err = validate_planned_spend(-10.0).expect_err("negative spend");
        assert_eq!(err.to_string(), "plannedLifestyleMonthly must be >= 0, got -10");
        assert_eq!(
            validate_planned_spend(f64::NAN),
            Err(AssumptionError::NonFinite {
                field: "plannedLifestyleMonthly".to_string()
            })
        );
    }
}
