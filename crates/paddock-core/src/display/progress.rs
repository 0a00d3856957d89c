//! Wizard progress, validation checklists and completion reports.

use std::fmt;

use serde::Serialize;

use crate::{
    models::{ListingData, ListingField},
    wizard::{CompletionReport, StepNavigator, ValidationResult},
};

/// Validation results rendered as a checklist.
pub struct MissingFields(pub Vec<ValidationResult>);

impl MissingFields {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "All required fields are complete. Ready to publish.");
        }

        writeln!(f, "Missing required fields:")?;
        writeln!(f)?;
        for result in &self.0 {
            writeln!(
                f,
                "- [ ] {} (step {}: {})",
                result.display_name, result.step_id, result.step_title
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for CompletionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |fields: &[ListingField]| {
            fields
                .iter()
                .map(|field| field.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        };

        writeln!(f, "# Listing {}% complete", self.percentage)?;
        writeln!(f)?;
        writeln!(f, "**Next:** {}", self.next_action)?;
        writeln!(f)?;
        if !self.sections.is_empty() {
            writeln!(f, "- Started sections: {}", self.sections.join(", "))?;
        }
        if !self.missing_required.is_empty() {
            writeln!(f, "- Missing required: {}", names(&self.missing_required))?;
        }
        if !self.missing_optional.is_empty() {
            writeln!(f, "- Missing optional: {}", names(&self.missing_optional))?;
        }
        Ok(())
    }
}

/// Where a step stands relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Done,
    Current,
    Upcoming,
    Skipped,
}

/// One line of the step overview.
#[derive(Debug, Clone, Serialize)]
pub struct StepLine {
    pub id: u32,
    pub title: &'static str,
    pub state: StepState,
}

/// The step overview of a listing plus the fields of its current step.
#[derive(Debug, Clone, Serialize)]
pub struct StepProgress {
    pub listing_id: Option<u64>,
    pub current: u32,
    pub title: String,
    /// 1-based position among visible steps
    pub position: usize,
    pub visible_count: usize,
    pub steps: Vec<StepLine>,
    /// Fields of the current step with their values
    pub fields: Vec<(ListingField, Option<String>)>,
}

impl StepProgress {
    pub fn new(navigator: &StepNavigator, data: &ListingData, listing_id: Option<u64>) -> Self {
        let registry = navigator.registry();
        let current = navigator.current();
        let (position, visible_count) = navigator.position(data);

        let steps = registry
            .steps()
            .iter()
            .map(|step| StepLine {
                id: step.id,
                title: step.title,
                state: if !step.is_visible(data) {
                    StepState::Skipped
                } else if step.id < current {
                    StepState::Done
                } else if step.id == current {
                    StepState::Current
                } else {
                    StepState::Upcoming
                },
            })
            .collect();

        let fields = registry
            .get(current)
            .map(|step| {
                step.fields
                    .iter()
                    .map(|&field| (field, data.display_value(field)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            listing_id,
            current,
            title: registry.title_for(current),
            position,
            visible_count,
            steps,
            fields,
        }
    }
}

impl fmt::Display for StepProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = self.listing_id {
            writeln!(f, "Listing {id}")?;
            writeln!(f)?;
        }
        writeln!(
            f,
            "# Step {} of {}: {}",
            self.position, self.visible_count, self.title
        )?;
        writeln!(f)?;

        for line in &self.steps {
            let (mark, suffix) = match line.state {
                StepState::Done => ("[x]", ""),
                StepState::Current => ("[>]", ""),
                StepState::Upcoming => ("[ ]", ""),
                StepState::Skipped => ("[-]", " (skipped)"),
            };
            writeln!(f, "- {mark} {}. {}{suffix}", line.id, line.title)?;
        }

        if !self.fields.is_empty() {
            writeln!(f)?;
            writeln!(f, "## {}", self.title)?;
            writeln!(f)?;
            for (field, value) in &self.fields {
                writeln!(
                    f,
                    "- {} (`{}`): {}",
                    field.display_name(),
                    field.key(),
                    value.as_deref().unwrap_or("not set")
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{StepRegistry, estimate_completion, validate_listing_with_steps};

    #[test]
    fn test_missing_fields_checklist() {
        let results = validate_listing_with_steps(&ListingData::default(), &StepRegistry::default());
        let output = MissingFields(results).to_string();
        assert!(output.contains("- [ ] Horse Name (step 4: Basic Info)"));
        assert!(output.contains("- [ ] Location (step 4: Basic Info)"));
        assert!(MissingFields(vec![]).to_string().contains("Ready to publish"));
    }

    #[test]
    fn test_completion_report_display() {
        let output = estimate_completion(&ListingData::default()).to_string();
        assert!(output.starts_with("# Listing 0% complete"));
        assert!(output.contains("**Next:** Complete 7 required fields"));
    }

    #[test]
    fn test_step_progress_marks_skipped_agent_step() {
        let mut data = ListingData::default();
        data.set(ListingField::HorseName, "Star").unwrap();
        let navigator = StepNavigator::starting_at(StepRegistry::default(), 4);

        let progress = StepProgress::new(&navigator, &data, Some(9));
        assert_eq!(progress.position, 3);
        assert_eq!(progress.steps[2].state, StepState::Skipped);

        let output = progress.to_string();
        assert!(output.contains("# Step 3 of 7: Basic Info"));
        assert!(output.contains("- [-] 3. Agent Info (skipped)"));
        assert!(output.contains("- [>] 4. Basic Info"));
        assert!(output.contains("- Horse Name (`horseName`): Star"));
        assert!(output.contains("- Breed (`breed`): not set"));
    }
}
