//! Field names of [`ListingData`] and the single update path for them.

use std::{fmt, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ListingData;
use crate::error::{ListingError, Result};

/// Every known listing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ListingField {
    ListingType,
    UserRole,
    AgentName,
    AgencyName,
    AgentPhone,
    AgentEmail,
    HorseName,
    Breed,
    Age,
    Sex,
    Location,
    Height,
    Color,
    Disciplines,
    ExperienceLevel,
    Temperament,
    Strengths,
    BestFor,
    Description,
    Tagline,
    HealthNotes,
    Registered,
    VetCheckAvailable,
    Photos,
    Videos,
    Price,
    PriceNegotiable,
    PriceVisibility,
    ContactVisibility,
    ContactName,
    ContactEmail,
    ContactPhone,
}

fn text_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl ListingField {
    pub const ALL: [ListingField; 32] = [
        ListingField::ListingType,
        ListingField::UserRole,
        ListingField::AgentName,
        ListingField::AgencyName,
        ListingField::AgentPhone,
        ListingField::AgentEmail,
        ListingField::HorseName,
        ListingField::Breed,
        ListingField::Age,
        ListingField::Sex,
        ListingField::Location,
        ListingField::Height,
        ListingField::Color,
        ListingField::Disciplines,
        ListingField::ExperienceLevel,
        ListingField::Temperament,
        ListingField::Strengths,
        ListingField::BestFor,
        ListingField::Description,
        ListingField::Tagline,
        ListingField::HealthNotes,
        ListingField::Registered,
        ListingField::VetCheckAvailable,
        ListingField::Photos,
        ListingField::Videos,
        ListingField::Price,
        ListingField::PriceNegotiable,
        ListingField::PriceVisibility,
        ListingField::ContactVisibility,
        ListingField::ContactName,
        ListingField::ContactEmail,
        ListingField::ContactPhone,
    ];

    /// The serialized key, as it appears in stored listing data.
    pub fn key(&self) -> &'static str {
        match self {
            ListingField::ListingType => "listingType",
            ListingField::UserRole => "userRole",
            ListingField::AgentName => "agentName",
            ListingField::AgencyName => "agencyName",
            ListingField::AgentPhone => "agentPhone",
            ListingField::AgentEmail => "agentEmail",
            ListingField::HorseName => "horseName",
            ListingField::Breed => "breed",
            ListingField::Age => "age",
            ListingField::Sex => "sex",
            ListingField::Location => "location",
            ListingField::Height => "height",
            ListingField::Color => "color",
            ListingField::Disciplines => "disciplines",
            ListingField::ExperienceLevel => "experienceLevel",
            ListingField::Temperament => "temperament",
            ListingField::Strengths => "strengths",
            ListingField::BestFor => "bestFor",
            ListingField::Description => "description",
            ListingField::Tagline => "tagline",
            ListingField::HealthNotes => "healthNotes",
            ListingField::Registered => "registered",
            ListingField::VetCheckAvailable => "vetCheckAvailable",
            ListingField::Photos => "photos",
            ListingField::Videos => "videos",
            ListingField::Price => "price",
            ListingField::PriceNegotiable => "priceNegotiable",
            ListingField::PriceVisibility => "priceVisibility",
            ListingField::ContactVisibility => "contactVisibility",
            ListingField::ContactName => "contactName",
            ListingField::ContactEmail => "contactEmail",
            ListingField::ContactPhone => "contactPhone",
        }
    }

    /// Human-readable name used in checklists and prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            ListingField::ListingType => "Listing Type",
            ListingField::UserRole => "Your Role",
            ListingField::AgentName => "Agent Name",
            ListingField::AgencyName => "Agency Name",
            ListingField::AgentPhone => "Agent Phone",
            ListingField::AgentEmail => "Agent Email",
            ListingField::HorseName => "Horse Name",
            ListingField::Breed => "Breed",
            ListingField::Age => "Age",
            ListingField::Sex => "Sex",
            ListingField::Location => "Location",
            ListingField::Height => "Height",
            ListingField::Color => "Color",
            ListingField::Disciplines => "Disciplines",
            ListingField::ExperienceLevel => "Experience Level",
            ListingField::Temperament => "Temperament",
            ListingField::Strengths => "Strengths",
            ListingField::BestFor => "Best For",
            ListingField::Description => "Description",
            ListingField::Tagline => "Tagline",
            ListingField::HealthNotes => "Health Notes",
            ListingField::Registered => "Registered",
            ListingField::VetCheckAvailable => "Vet Check Available",
            ListingField::Photos => "Photos",
            ListingField::Videos => "Videos",
            ListingField::Price => "Price",
            ListingField::PriceNegotiable => "Price Negotiable",
            ListingField::PriceVisibility => "Price Visibility",
            ListingField::ContactVisibility => "Contact Visibility",
            ListingField::ContactName => "Contact Name",
            ListingField::ContactEmail => "Contact Email",
            ListingField::ContactPhone => "Contact Phone",
        }
    }

    /// Whether `data` holds a value for this field.
    ///
    /// Strings must be non-empty after trimming and lists non-empty; any other
    /// value counts once it is set.
    pub fn is_present(&self, data: &ListingData) -> bool {
        match self {
            ListingField::ListingType => data.listing_type.is_some(),
            ListingField::UserRole => data.user_role.is_some(),
            ListingField::AgentName => text_present(&data.agent_name),
            ListingField::AgencyName => text_present(&data.agency_name),
            ListingField::AgentPhone => text_present(&data.agent_phone),
            ListingField::AgentEmail => text_present(&data.agent_email),
            ListingField::HorseName => text_present(&data.horse_name),
            ListingField::Breed => text_present(&data.breed),
            ListingField::Age => data.age.is_some(),
            ListingField::Sex => data.sex.is_some(),
            ListingField::Location => text_present(&data.location),
            ListingField::Height => data.height.is_some(),
            ListingField::Color => text_present(&data.color),
            ListingField::Disciplines => !data.disciplines.is_empty(),
            ListingField::ExperienceLevel => text_present(&data.experience_level),
            ListingField::Temperament => text_present(&data.temperament),
            ListingField::Strengths => !data.strengths.is_empty(),
            ListingField::BestFor => !data.best_for.is_empty(),
            ListingField::Description => text_present(&data.description),
            ListingField::Tagline => text_present(&data.tagline),
            ListingField::HealthNotes => text_present(&data.health_notes),
            ListingField::Registered => data.registered.is_some(),
            ListingField::VetCheckAvailable => data.vet_check_available.is_some(),
            ListingField::Photos => !data.photos.is_empty(),
            ListingField::Videos => !data.videos.is_empty(),
            ListingField::Price => data.price.is_some(),
            ListingField::PriceNegotiable => data.price_negotiable.is_some(),
            ListingField::PriceVisibility => data.price_visibility.is_some(),
            ListingField::ContactVisibility => data.contact_visibility.is_some(),
            ListingField::ContactName => text_present(&data.contact_name),
            ListingField::ContactEmail => text_present(&data.contact_email),
            ListingField::ContactPhone => text_present(&data.contact_phone),
        }
    }
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ListingField {
    type Err = ListingError;

    /// Accepts the camelCase key as well as snake_case or kebab-case spellings.
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        ListingField::ALL
            .iter()
            .copied()
            .find(|field| field.key().to_lowercase() == wanted)
            .ok_or_else(|| ListingError::invalid_input(s).with_reason("Unknown listing field"))
    }
}

fn parse_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn parse_enum<T: FromStr<Err = String>>(field: ListingField, raw: &str) -> Result<Option<T>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|reason| ListingError::invalid_input(field.key()).with_reason(reason))
}

fn parse_number<T: FromStr>(field: ListingField, raw: &str) -> Result<Option<T>> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$' && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned.parse::<T>().map(Some).map_err(|_| {
        ListingError::invalid_input(field.key()).with_reason(format!("'{raw}' is not a valid number"))
    })
}

fn parse_flag(field: ListingField, raw: &str) -> Result<Option<bool>> {
    match raw.trim().to_lowercase().as_str() {
        "" => Ok(None),
        "true" | "yes" | "y" | "1" => Ok(Some(true)),
        "false" | "no" | "n" | "0" => Ok(Some(false)),
        _ => Err(ListingError::invalid_input(field.key())
            .with_reason(format!("'{raw}' is not yes/no"))),
    }
}

impl ListingData {
    /// Sets `field` from its textual form.
    ///
    /// List fields take a comma-separated value. An empty value clears the
    /// field. Unparsable numbers, flags and enum values are rejected with
    /// [`ListingError::InvalidInput`] and leave the data unchanged.
    pub fn set(&mut self, field: ListingField, raw: &str) -> Result<()> {
        match field {
            ListingField::ListingType => self.listing_type = parse_enum(field, raw)?,
            ListingField::UserRole => self.user_role = parse_enum(field, raw)?,
            ListingField::AgentName => self.agent_name = parse_text(raw),
            ListingField::AgencyName => self.agency_name = parse_text(raw),
            ListingField::AgentPhone => self.agent_phone = parse_text(raw),
            ListingField::AgentEmail => self.agent_email = parse_text(raw),
            ListingField::HorseName => self.horse_name = parse_text(raw),
            ListingField::Breed => self.breed = parse_text(raw),
            ListingField::Age => self.age = parse_number(field, raw)?,
            ListingField::Sex => self.sex = parse_enum(field, raw)?,
            ListingField::Location => self.location = parse_text(raw),
            ListingField::Height => {
                let height: Option<f64> = parse_number(field, raw)?;
                if height.is_some_and(|h| !h.is_finite() || h <= 0.0) {
                    return Err(ListingError::invalid_input(field.key())
                        .with_reason("Height must be a positive number of hands"));
                }
                self.height = height;
            }
            ListingField::Color => self.color = parse_text(raw),
            ListingField::Disciplines => self.disciplines = parse_list(raw),
            ListingField::ExperienceLevel => self.experience_level = parse_text(raw),
            ListingField::Temperament => self.temperament = parse_text(raw),
            ListingField::Strengths => self.strengths = parse_list(raw),
            ListingField::BestFor => self.best_for = parse_list(raw),
            ListingField::Description => self.description = parse_text(raw),
            ListingField::Tagline => self.tagline = parse_text(raw),
            ListingField::HealthNotes => self.health_notes = parse_text(raw),
            ListingField::Registered => self.registered = parse_flag(field, raw)?,
            ListingField::VetCheckAvailable => self.vet_check_available = parse_flag(field, raw)?,
            ListingField::Photos => self.photos = parse_list(raw),
            ListingField::Videos => self.videos = parse_list(raw),
            ListingField::Price => self.price = parse_number(field, raw)?,
            ListingField::PriceNegotiable => self.price_negotiable = parse_flag(field, raw)?,
            ListingField::PriceVisibility => self.price_visibility = parse_enum(field, raw)?,
            ListingField::ContactVisibility => self.contact_visibility = parse_enum(field, raw)?,
            ListingField::ContactName => self.contact_name = parse_text(raw),
            ListingField::ContactEmail => self.contact_email = parse_text(raw),
            ListingField::ContactPhone => self.contact_phone = parse_text(raw),
        }
        Ok(())
    }

    /// Removes any value held for `field`.
    pub fn clear(&mut self, field: ListingField) {
        // Setting an empty value never fails for any field kind.
        let _ = self.set(field, "");
    }
}
