//! Coarse progress estimate for a listing. Advisory only; nothing is gated on it.

use serde::Serialize;

use crate::models::{ListingData, ListingField};

/// Fields every good listing has.
pub const REQUIRED_FIELDS: [ListingField; 7] = [
    ListingField::HorseName,
    ListingField::Breed,
    ListingField::Age,
    ListingField::Sex,
    ListingField::Location,
    ListingField::Price,
    ListingField::Description,
];

/// Fields that make a listing stand out.
pub const OPTIONAL_FIELDS: [ListingField; 8] = [
    ListingField::Disciplines,
    ListingField::Temperament,
    ListingField::Strengths,
    ListingField::BestFor,
    ListingField::Height,
    ListingField::Color,
    ListingField::Photos,
    ListingField::Videos,
];

const MEDIA_ACTION: &str = "Add photos and videos to make your listing stand out";

fn section_of(field: ListingField) -> &'static str {
    match field {
        ListingField::HorseName
        | ListingField::Breed
        | ListingField::Age
        | ListingField::Sex
        | ListingField::Location => "Basic Info",
        ListingField::Price => "Pricing",
        ListingField::Description
        | ListingField::Temperament
        | ListingField::Strengths
        | ListingField::BestFor => "Story & Personality",
        ListingField::Disciplines | ListingField::Height | ListingField::Color => {
            "Details & Training"
        }
        ListingField::Photos | ListingField::Videos => "Media",
        _ => "Other",
    }
}

/// Completion estimate of one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    pub completed: Vec<ListingField>,
    pub missing_required: Vec<ListingField>,
    pub missing_optional: Vec<ListingField>,
    /// Rounded share of counted fields that are present, 0-100
    pub percentage: u8,
    /// Sections with at least one present field, in order of first appearance
    pub sections: Vec<&'static str>,
    pub next_action: String,
}

impl CompletionReport {
    pub fn is_ready(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// Estimates how complete `data` is.
pub fn estimate_completion(data: &ListingData) -> CompletionReport {
    let (completed, missing_required): (Vec<_>, Vec<_>) =
        REQUIRED_FIELDS.into_iter().partition(|field| field.is_present(data));
    let (completed_optional, missing_optional): (Vec<_>, Vec<_>) =
        OPTIONAL_FIELDS.into_iter().partition(|field| field.is_present(data));

    let completed: Vec<ListingField> = completed.into_iter().chain(completed_optional).collect();

    let total = REQUIRED_FIELDS.len() + OPTIONAL_FIELDS.len();
    let percentage = ((completed.len() as f64 / total as f64) * 100.0).round() as u8;

    let mut sections: Vec<&'static str> = Vec::new();
    for section in completed.iter().map(|&field| section_of(field)) {
        if !sections.contains(&section) {
            sections.push(section);
        }
    }

    let next_action = match missing_required.as_slice() {
        [] => MEDIA_ACTION.to_string(),
        [field] => format!("Add {}", field.display_name()),
        more => format!("Complete {} required fields", more.len()),
    };

    CompletionReport {
        completed,
        missing_required,
        missing_optional,
        percentage,
        sections,
        next_action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing() {
        let report = estimate_completion(&ListingData::default());
        assert_eq!(report.percentage, 0);
        assert_eq!(report.missing_required.len(), 7);
        assert_eq!(report.missing_optional.len(), 8);
        assert!(report.sections.is_empty());
        assert_eq!(report.next_action, "Complete 7 required fields");
    }

    #[test]
    fn test_single_missing_field_is_named() {
        let mut data = ListingData::default();
        for (field, value) in [
            (ListingField::HorseName, "Star"),
            (ListingField::Breed, "Morgan"),
            (ListingField::Age, "9"),
            (ListingField::Sex, "mare"),
            (ListingField::Location, "Ohio"),
            (ListingField::Price, "8500"),
        ] {
            data.set(field, value).unwrap();
        }

        let report = estimate_completion(&data);
        assert_eq!(report.next_action, "Add Description");
        assert_eq!(report.percentage, 40);
        assert_eq!(report.sections, vec!["Basic Info", "Pricing"]);
    }

    #[test]
    fn test_all_required_suggests_media() {
        let mut data = ListingData::default();
        for field in REQUIRED_FIELDS {
            let value = match field {
                ListingField::Age | ListingField::Price => "5",
                ListingField::Sex => "gelding",
                _ => "x",
            };
            data.set(field, value).unwrap();
        }
        let report = estimate_completion(&data);
        assert!(report.is_ready());
        assert_eq!(report.next_action, MEDIA_ACTION);
        assert_eq!(report.percentage, 47);
    }

    #[test]
    fn test_percentage_never_decreases_while_filling() {
        let values = [
            (ListingField::Photos, "a.jpg"),
            (ListingField::HorseName, "Star"),
            (ListingField::Disciplines, "trail"),
            (ListingField::Age, "7"),
            (ListingField::Height, "15.2"),
            (ListingField::Description, "Sweet mare"),
            (ListingField::Color, "bay"),
            (ListingField::Price, "1200"),
            (ListingField::BestFor, "kids"),
            (ListingField::Sex, "mare"),
            (ListingField::Strengths, "calm"),
            (ListingField::Breed, "Quarter Horse"),
            (ListingField::Temperament, "quiet"),
            (ListingField::Location, "Ohio"),
            (ListingField::Videos, "b.mp4"),
        ];

        let mut data = ListingData::default();
        let mut previous = 0;
        for (field, value) in values {
            data.set(field, value).unwrap();
            let percentage = estimate_completion(&data).percentage;
            assert!(percentage >= previous);
            previous = percentage;
        }
        assert_eq!(previous, 100);
    }
}
