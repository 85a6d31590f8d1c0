use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::models::OnboardingFieldConfiguration;
use crate::onboarding::fields::is_filled;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub required_fields: i32,
    pub completed_fields: i32,
    pub completion_percentage: f64,
    pub is_complete: bool,
}

/// Score a member's stored values against the enabled, required fields.
/// With no required fields the profile counts as complete.
pub fn compute(
    fields: &[OnboardingFieldConfiguration],
    values: &HashMap<String, Value>,
) -> Completion {
    let required: Vec<&OnboardingFieldConfiguration> = fields
        .iter()
        .filter(|f| f.is_enabled && f.is_required)
        .collect();

    let completed = required
        .iter()
        .filter(|f| values.get(&f.field_key).is_some_and(is_filled))
        .count();

    let total = required.len();
    let percentage = if total == 0 {
        100.0
    } else {
        ((completed as f64 / total as f64) * 10_000.0).round() / 100.0
    };

    Completion {
        required_fields: total as i32,
        completed_fields: completed as i32,
        completion_percentage: percentage,
        is_complete: completed == total,
    }
}
