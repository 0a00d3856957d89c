//! Listing copy: parsing generated text and deterministic fallbacks.
//!
//! Calling a text generation service is left to the caller. Its raw response
//! goes through [`parse_generation_response`]; when there is no response or
//! it cannot be used, [`fallback_tagline`] and [`fallback_description`]
//! produce copy from the listing data alone.

use std::fmt;

use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{ListingError, Result},
    models::{ListingData, ListingType},
};

const GENERIC_TAGLINE: &str = "A wonderful horse looking for the right partner";
const NO_DETAILS_DESCRIPTION: &str = "Contact the seller for more details about this horse.";

/// Description keywords and the tagline each one selects, in priority order.
const KEYWORD_TAGLINES: [(&str, &str); 5] = [
    ("champion", "Proven champion ready for the next win"),
    ("kid", "Safe, gentle mount for young riders"),
    ("trail", "Trail-ready partner for weekend adventures"),
    ("show", "Show-ring ready with polish to spare"),
    ("quiet", "Quiet, dependable partner for any rider"),
];

/// Usable content of a generation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResponse {
    /// A JSON array of tagline suggestions
    Taglines(Vec<String>),
    /// A description paragraph
    Paragraph(String),
}

/// Interprets a raw generation response.
///
/// A JSON array of strings yields taglines; plain text or a JSON string
/// yields a paragraph. Anything else is rejected as malformed.
pub fn parse_generation_response(raw: &str) -> Result<GenerationResponse> {
    let malformed = |reason: &str| ListingError::invalid_input("response").with_reason(reason);

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(malformed("response is empty"));
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => {
            let taglines = items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => Ok(text.trim().to_string()),
                    _ => Err(malformed("tagline list must contain only strings")),
                })
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>();
            if taglines.is_empty() {
                return Err(malformed("tagline list is empty"));
            }
            Ok(GenerationResponse::Taglines(taglines))
        }
        Ok(Value::String(text)) if !text.trim().is_empty() => {
            Ok(GenerationResponse::Paragraph(text.trim().to_string()))
        }
        Ok(_) => Err(malformed("expected a list of taglines or a paragraph")),
        Err(_) if trimmed.starts_with('[') || trimmed.starts_with('{') => {
            Err(malformed("response looks like JSON but does not parse"))
        }
        Err(_) => Ok(GenerationResponse::Paragraph(trimmed.to_string())),
    }
}

fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Picks a tagline from the first matching template.
pub fn fallback_tagline(data: &ListingData) -> String {
    let breed = text(&data.breed);
    let discipline = data.disciplines.iter().map(|d| d.trim()).find(|d| !d.is_empty());

    if let (Some(breed), Some(discipline)) = (breed, discipline) {
        return format!("Talented {breed} ready for {}", discipline.to_lowercase());
    }

    if let (Some(temperament), Some(level)) = (text(&data.temperament), text(&data.experience_level)) {
        return format!(
            "{} partner for {} riders",
            capitalize(&temperament.to_lowercase()),
            level.to_lowercase()
        );
    }

    if let Some(description) = text(&data.description) {
        let description = description.to_lowercase();
        if let Some((_, tagline)) = KEYWORD_TAGLINES
            .iter()
            .find(|(keyword, _)| description.contains(keyword))
        {
            return (*tagline).to_string();
        }
    }

    if let Some(breed) = breed {
        return format!("Beautiful {breed} looking for a new home");
    }

    GENERIC_TAGLINE.to_string()
}

/// Writes a plain description from whatever fields are filled in.
pub fn fallback_description(data: &ListingData) -> String {
    let mut sentences = Vec::new();

    let mut subject = Vec::new();
    if let Some(age) = data.age {
        subject.push(format!("{age}-year-old"));
    }
    if let Some(color) = text(&data.color) {
        subject.push(color.to_lowercase());
    }
    if let Some(breed) = text(&data.breed) {
        subject.push(breed.to_string());
    }
    if let Some(sex) = data.sex {
        subject.push(sex.as_str().to_string());
    }

    let name = text(&data.horse_name);
    if let Some(first) = subject.first() {
        let article = if first.starts_with(['a', 'e', 'i', 'o', 'u', '8']) {
            "an"
        } else {
            "a"
        };
        if data.sex.is_none() {
            subject.push("horse".to_string());
        }
        sentences.push(format!(
            "{} is {article} {}.",
            name.unwrap_or("This horse"),
            subject.join(" ")
        ));
    } else if let Some(name) = name {
        sentences.push(format!("Meet {name}."));
    }

    if let Some(height) = data.height {
        sentences.push(format!("Stands {height} hands."));
    }
    if !data.disciplines.is_empty() {
        sentences.push(format!("Experienced in {}.", data.disciplines.join(", ")));
    }
    if let Some(temperament) = text(&data.temperament) {
        sentences.push(format!("Temperament: {temperament}."));
    }
    if !data.best_for.is_empty() {
        sentences.push(format!("Best suited for {}.", data.best_for.join(", ")));
    }
    if let Some(location) = text(&data.location) {
        sentences.push(format!("Located in {location}."));
    }
    match (data.listing_type, data.price) {
        (Some(ListingType::Lease), Some(price)) => sentences.push(format!("Available for lease at ${price}.")),
        (Some(ListingType::Lease), None) => sentences.push("Available for lease.".to_string()),
        (_, Some(price)) => sentences.push(format!("Offered at ${price}.")),
        _ => {}
    }

    if sentences.is_empty() {
        return NO_DETAILS_DESCRIPTION.to_string();
    }
    sentences.join(" ")
}

/// Taglines and description for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedCopy {
    pub taglines: Vec<String>,
    pub description: String,
    /// True when no usable generation response was given
    pub used_fallback: bool,
}

impl fmt::Display for GeneratedCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Taglines")?;
        writeln!(f)?;
        for tagline in &self.taglines {
            writeln!(f, "- {tagline}")?;
        }
        writeln!(f)?;
        writeln!(f, "## Description")?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        if self.used_fallback {
            writeln!(f)?;
            writeln!(f, "_Generated from listing details._")?;
        }
        Ok(())
    }
}

/// Builds listing copy from an optional generation response, falling back
/// to the deterministic generators for whatever the response lacks.
pub fn generate_copy(data: &ListingData, response: Option<&str>) -> GeneratedCopy {
    let parsed = response.and_then(|raw| match parse_generation_response(raw) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("Ignoring generated copy: {e}");
            None
        }
    });

    match parsed {
        Some(GenerationResponse::Taglines(taglines)) => GeneratedCopy {
            taglines,
            description: fallback_description(data),
            used_fallback: false,
        },
        Some(GenerationResponse::Paragraph(description)) => GeneratedCopy {
            taglines: vec![fallback_tagline(data)],
            description,
            used_fallback: false,
        },
        None => GeneratedCopy {
            taglines: vec![fallback_tagline(data)],
            description: fallback_description(data),
            used_fallback: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingField;

    fn listing(fields: &[(ListingField, &str)]) -> ListingData {
        let mut data = ListingData::default();
        for (field, value) in fields {
            data.set(*field, value).unwrap();
        }
        data
    }

    #[test]
    fn test_parse_tagline_array() {
        let parsed = parse_generation_response(r#"[" Bold mover ", "Kid safe", ""]"#).unwrap();
        assert_eq!(
            parsed,
            GenerationResponse::Taglines(vec!["Bold mover".to_string(), "Kid safe".to_string()])
        );
    }

    #[test]
    fn test_parse_paragraphs() {
        assert_eq!(
            parse_generation_response("A lovely mare.").unwrap(),
            GenerationResponse::Paragraph("A lovely mare.".to_string())
        );
        assert_eq!(
            parse_generation_response(r#""Quoted text""#).unwrap(),
            GenerationResponse::Paragraph("Quoted text".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "   ", "[1, 2]", "{\"a\": 1}", "[\"unterminated", "42", "[]"] {
            assert!(parse_generation_response(raw).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn test_tagline_template_priority() {
        let both = listing(&[
            (ListingField::Breed, "Arabian"),
            (ListingField::Disciplines, "Endurance"),
            (ListingField::Temperament, "calm"),
            (ListingField::ExperienceLevel, "beginner"),
        ]);
        assert_eq!(fallback_tagline(&both), "Talented Arabian ready for endurance");

        let temperament = listing(&[
            (ListingField::Temperament, "calm"),
            (ListingField::ExperienceLevel, "Beginner"),
        ]);
        assert_eq!(fallback_tagline(&temperament), "Calm partner for beginner riders");

        let keyword = listing(&[(ListingField::Description, "Great with KIDS and on the trail")]);
        assert_eq!(fallback_tagline(&keyword), "Safe, gentle mount for young riders");

        let breed = listing(&[(ListingField::Breed, "Morgan")]);
        assert_eq!(fallback_tagline(&breed), "Beautiful Morgan looking for a new home");

        assert_eq!(fallback_tagline(&ListingData::default()), GENERIC_TAGLINE);
    }

    #[test]
    fn test_fallback_description() {
        let data = listing(&[
            (ListingField::HorseName, "Star"),
            (ListingField::Age, "8"),
            (ListingField::Breed, "Morgan"),
            (ListingField::Sex, "mare"),
            (ListingField::Location, "Ohio"),
            (ListingField::Price, "8500"),
        ]);
        assert_eq!(
            fallback_description(&data),
            "Star is an 8-year-old Morgan mare. Located in Ohio. Offered at $8500."
        );
        assert_eq!(fallback_description(&ListingData::default()), NO_DETAILS_DESCRIPTION);

        let named = listing(&[(ListingField::HorseName, "Star"), (ListingField::Color, "Bay")]);
        assert_eq!(fallback_description(&named), "Star is a bay horse.");
    }

    #[test]
    fn test_generate_copy_uses_response() {
        let data = listing(&[(ListingField::Breed, "Morgan")]);
        let copy = generate_copy(&data, Some(r#"["Sweet Morgan"]"#));
        assert_eq!(copy.taglines, vec!["Sweet Morgan"]);
        assert!(!copy.used_fallback);

        let copy = generate_copy(&data, Some("{broken"));
        assert_eq!(copy.taglines, vec!["Beautiful Morgan looking for a new home"]);
        assert!(copy.used_fallback);
    }
}
