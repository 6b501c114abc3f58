use serde::Serialize;

use super::types::RawAssumptions;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetProfile {
    pub name: &'static str,
    pub tax_rate: f64,
    pub savings_rate: f64,
    pub return_rate: f64,
}

impl PresetProfile {
    /// The profile as a partial assumptions record; income and net worth
    /// are left for the caller.
    pub fn assumptions(&self) -> RawAssumptions {
        RawAssumptions {
            tax_rate: Some(self.tax_rate),
            savings_rate: Some(self.savings_rate),
            return_rate: Some(self.return_rate),
            ..RawAssumptions::default()
        }
    }
}

const PRESET_PROFILES: [PresetProfile; 3] = [
    PresetProfile {
        name: "conservative",
        tax_rate: 0.30,
        savings_rate: 0.10,
        return_rate: 0.04,
    },
    PresetProfile {
        name: "standard",
        tax_rate: 0.25,
        savings_rate: 0.20,
        return_rate: 0.06,
    },
    PresetProfile {
        name: "aggressive",
        tax_rate: 0.22,
        savings_rate: 0.35,
        return_rate: 0.08,
    },
];

pub fn preset_profiles() -> &'static [PresetProfile] {
    &PRESET_PROFILES
}

pub fn find_preset_profile(name: &str) -> Option<&'static PresetProfile> {
    let name = name.trim();
    PRESET_PROFILES
        .iter()
        .find(|profile| profile.name.eq_ignore_ascii_case(name))
}

/// Looks up a named bundle of rates. Matching ignores ASCII case and
/// surrounding whitespace.
pub fn get_preset_profile(name: &str) -> Option<RawAssumptions> {
    find_preset_profile(name).map(PresetProfile::assumptions)
}
