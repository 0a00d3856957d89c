//! The ordered step definitions of the listing wizard.

use super::config::StepFlow;
use crate::models::{ListingData, ListingField, UserRole};

/// Id of the step that only agents see.
pub const AGENT_INFO_STEP: u32 = 3;

/// One wizard step.
#[derive(Debug, Clone, Copy)]
pub struct StepDefinition {
    /// Stable 1-based position
    pub id: u32,
    pub title: &'static str,
    /// Key of the input component rendering the step
    pub component: &'static str,
    /// Fields edited on this step
    pub fields: &'static [ListingField],
    visible: fn(&ListingData) -> bool,
}

impl StepDefinition {
    pub fn is_visible(&self, data: &ListingData) -> bool {
        (self.visible)(data)
    }
}

fn always(_: &ListingData) -> bool {
    true
}

fn agents_only(data: &ListingData) -> bool {
    data.role() == UserRole::Agent
}

const fn step(
    id: u32,
    title: &'static str,
    component: &'static str,
    fields: &'static [ListingField],
) -> StepDefinition {
    StepDefinition {
        id,
        title,
        component,
        fields,
        visible: always,
    }
}

const LISTING_TYPE: StepDefinition = step(1, "Listing Type", "listing-type", &[ListingField::ListingType]);
const YOUR_ROLE: StepDefinition = step(2, "Your Role", "your-role", &[ListingField::UserRole]);
const AGENT_INFO: StepDefinition = StepDefinition {
    visible: agents_only,
    ..step(
        AGENT_INFO_STEP,
        "Agent Info",
        "agent-info",
        &[
            ListingField::AgentName,
            ListingField::AgencyName,
            ListingField::AgentPhone,
            ListingField::AgentEmail,
        ],
    )
};
const BASIC_INFO: StepDefinition = step(
    4,
    "Basic Info",
    "basic-info",
    &[
        ListingField::HorseName,
        ListingField::Breed,
        ListingField::Age,
        ListingField::Sex,
        ListingField::Location,
    ],
);

const LEGACY_STEPS: [StepDefinition; 12] = [
    LISTING_TYPE,
    YOUR_ROLE,
    AGENT_INFO,
    BASIC_INFO,
    step(5, "Physical Details", "physical-details", &[ListingField::Height, ListingField::Color]),
    step(
        6,
        "Training & Disciplines",
        "training",
        &[ListingField::Disciplines, ListingField::ExperienceLevel],
    ),
    step(
        7,
        "Temperament & Strengths",
        "temperament",
        &[
            ListingField::Temperament,
            ListingField::Strengths,
            ListingField::BestFor,
            ListingField::Description,
            ListingField::Tagline,
        ],
    ),
    step(
        8,
        "Health & History",
        "health",
        &[
            ListingField::HealthNotes,
            ListingField::Registered,
            ListingField::VetCheckAvailable,
        ],
    ),
    step(9, "Photos & Videos", "media", &[ListingField::Photos, ListingField::Videos]),
    step(
        10,
        "Pricing",
        "pricing",
        &[
            ListingField::Price,
            ListingField::PriceNegotiable,
            ListingField::PriceVisibility,
        ],
    ),
    step(
        11,
        "Contact & Visibility",
        "contact",
        &[
            ListingField::ContactName,
            ListingField::ContactEmail,
            ListingField::ContactPhone,
            ListingField::ContactVisibility,
        ],
    ),
    step(12, "Review & Publish", "review", &[]),
];

const CONSOLIDATED_STEPS: [StepDefinition; 8] = [
    LISTING_TYPE,
    YOUR_ROLE,
    AGENT_INFO,
    BASIC_INFO,
    step(
        5,
        "Details & Training",
        "details-training",
        &[
            ListingField::Height,
            ListingField::Color,
            ListingField::Disciplines,
            ListingField::ExperienceLevel,
            ListingField::HealthNotes,
            ListingField::Registered,
            ListingField::VetCheckAvailable,
        ],
    ),
    step(
        6,
        "Story & Personality",
        "story",
        &[
            ListingField::Temperament,
            ListingField::Strengths,
            ListingField::BestFor,
            ListingField::Description,
            ListingField::Tagline,
        ],
    ),
    step(
        7,
        "Media & Pricing",
        "media-pricing",
        &[
            ListingField::Photos,
            ListingField::Videos,
            ListingField::Price,
            ListingField::PriceNegotiable,
            ListingField::PriceVisibility,
            ListingField::ContactName,
            ListingField::ContactEmail,
            ListingField::ContactPhone,
            ListingField::ContactVisibility,
        ],
    ),
    step(8, "Review & Publish", "review", &[]),
];

/// Fixed, ordered list of steps for one flow.
#[derive(Debug, Clone, Copy)]
pub struct StepRegistry {
    flow: StepFlow,
    steps: &'static [StepDefinition],
}

impl StepRegistry {
    pub fn new(flow: StepFlow) -> Self {
        let steps: &'static [StepDefinition] = match flow {
            StepFlow::Legacy => &LEGACY_STEPS,
            StepFlow::Consolidated => &CONSOLIDATED_STEPS,
        };
        Self { flow, steps }
    }

    pub fn flow(&self) -> StepFlow {
        self.flow
    }

    /// Number of registered steps, visible or not.
    pub fn len(&self) -> u32 {
        self.steps.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// Title of a step, or `Step N` for unknown ids.
    pub fn title_for(&self, id: u32) -> String {
        self.get(id)
            .map(|step| step.title.to_string())
            .unwrap_or_else(|| format!("Step {id}"))
    }

    pub fn steps(&self) -> &'static [StepDefinition] {
        self.steps
    }

    /// Steps shown for the given data, in order.
    pub fn visible_steps<'a>(
        &'a self,
        data: &'a ListingData,
    ) -> impl Iterator<Item = &'static StepDefinition> + 'a {
        self.steps.iter().filter(move |step| step.is_visible(data))
    }

    /// Step on which a field is edited.
    pub fn step_for_field(&self, field: ListingField) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.fields.contains(&field))
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new(StepFlow::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_contiguous() {
        for flow in [StepFlow::Legacy, StepFlow::Consolidated] {
            let registry = StepRegistry::new(flow);
            for (index, step) in registry.steps().iter().enumerate() {
                assert_eq!(step.id, index as u32 + 1);
            }
        }
        assert_eq!(StepRegistry::new(StepFlow::Legacy).len(), 12);
        assert_eq!(StepRegistry::new(StepFlow::Consolidated).len(), 8);
    }

    #[test]
    fn test_every_editable_field_has_one_step() {
        for flow in [StepFlow::Legacy, StepFlow::Consolidated] {
            let registry = StepRegistry::new(flow);
            for field in ListingField::ALL {
                let owners = registry
                    .steps()
                    .iter()
                    .filter(|step| step.fields.contains(&field))
                    .count();
                assert_eq!(owners, 1, "{field} in {flow}");
            }
        }
    }

    #[test]
    fn test_agent_step_visibility() {
        let registry = StepRegistry::new(StepFlow::Legacy);
        let mut data = ListingData::default();
        assert!(!registry.get(AGENT_INFO_STEP).unwrap().is_visible(&data));
        assert_eq!(registry.visible_steps(&data).count(), 11);

        data.user_role = Some(UserRole::Agent);
        assert!(registry.get(AGENT_INFO_STEP).unwrap().is_visible(&data));
        assert_eq!(registry.visible_steps(&data).count(), 12);
    }

    #[test]
    fn test_title_fallback() {
        let registry = StepRegistry::default();
        assert_eq!(registry.title_for(4), "Basic Info");
        assert_eq!(registry.title_for(42), "Step 42");
    }
}
