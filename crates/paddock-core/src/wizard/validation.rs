//! Required-field rules and the step each one sends the user back to.

use serde::Serialize;

use super::steps::StepRegistry;
use crate::models::{ListingData, ListingField};

/// A required field and the step owning it.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRule {
    pub field: ListingField,
    pub step_id: u32,
    pub display_name: &'static str,
}

impl ValidationRule {
    pub const fn new(field: ListingField, step_id: u32, display_name: &'static str) -> Self {
        Self {
            field,
            step_id,
            display_name,
        }
    }

    pub fn is_missing(&self, data: &ListingData) -> bool {
        !self.field.is_present(data)
    }
}

/// Rules checked before a listing can be published.
pub const DEFAULT_RULES: [ValidationRule; 3] = [
    ValidationRule::new(ListingField::HorseName, 4, "Horse Name"),
    ValidationRule::new(ListingField::Sex, 4, "Sex"),
    ValidationRule::new(ListingField::Location, 4, "Location"),
];

/// One missing required field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub field: ListingField,
    pub step_id: u32,
    pub step_title: String,
    pub display_name: String,
}

/// Evaluates every rule and reports each missing field.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Vec<ValidationRule>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
        }
    }
}

impl Validator {
    pub fn new(rules: Vec<ValidationRule>) -> Self {
        Self { rules }
    }

    /// Adds a rule; rules are evaluated in insertion order.
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn validate(&self, data: &ListingData, registry: &StepRegistry) -> Vec<ValidationResult> {
        self.rules
            .iter()
            .filter(|rule| rule.is_missing(data))
            .map(|rule| ValidationResult {
                field: rule.field,
                step_id: rule.step_id,
                step_title: registry.title_for(rule.step_id),
                display_name: rule.display_name.to_string(),
            })
            .collect()
    }
}

/// Validates `data` with the default rules.
pub fn validate_listing_with_steps(data: &ListingData, registry: &StepRegistry) -> Vec<ValidationResult> {
    Validator::default().validate(data, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::config::StepFlow;

    #[test]
    fn test_empty_data_reports_all_rules() {
        for flow in [StepFlow::Legacy, StepFlow::Consolidated] {
            let results = validate_listing_with_steps(&ListingData::default(), &StepRegistry::new(flow));
            let fields: Vec<ListingField> = results.iter().map(|r| r.field).collect();
            assert_eq!(
                fields,
                vec![ListingField::HorseName, ListingField::Sex, ListingField::Location]
            );
            assert!(results.iter().all(|r| r.step_id == 4 && r.step_title == "Basic Info"));
        }
    }

    #[test]
    fn test_complete_identity_validates_clean() {
        let mut data = ListingData::default();
        data.set(ListingField::HorseName, "Star").unwrap();
        data.set(ListingField::Sex, "mare").unwrap();
        data.set(ListingField::Location, "Ohio").unwrap();
        assert!(validate_listing_with_steps(&data, &StepRegistry::default()).is_empty());
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let data = ListingData {
            horse_name: Some("   ".to_string()),
            ..Default::default()
        };
        let results = validate_listing_with_steps(&data, &StepRegistry::default());
        assert_eq!(results[0].display_name, "Horse Name");
    }

    #[test]
    fn test_unknown_step_title_falls_back() {
        let validator = Validator::new(vec![ValidationRule::new(ListingField::Price, 30, "Price")]);
        let results = validator.validate(&ListingData::default(), &StepRegistry::default());
        assert_eq!(results[0].step_title, "Step 30");
    }
}
