//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the data structures stay free of
//! presentation. All output is markdown for rich terminal display.

use std::fmt;

use super::datetime::{LocalDate, LocalDateTime};
use crate::{
    autosave::BackupEntry,
    models::{
        HorseSex, Listing, ListingData, ListingField, ListingStatus, ListingSummary, ListingType,
        Profile, UserRole, Visibility,
    },
};

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )+
    };
}

display_as_str!(ListingStatus, UserRole, ListingType, HorseSex, Visibility);

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

impl ListingData {
    /// Human-readable value of a field, or None when it is not provided.
    pub fn display_value(&self, field: ListingField) -> Option<String> {
        if !field.is_present(self) {
            return None;
        }

        let text = |value: &Option<String>| value.as_deref().map(|s| s.trim().to_string());
        match field {
            ListingField::ListingType => self.listing_type.map(|v| v.to_string()),
            ListingField::UserRole => self.user_role.map(|v| v.to_string()),
            ListingField::AgentName => text(&self.agent_name),
            ListingField::AgencyName => text(&self.agency_name),
            ListingField::AgentPhone => text(&self.agent_phone),
            ListingField::AgentEmail => text(&self.agent_email),
            ListingField::HorseName => text(&self.horse_name),
            ListingField::Breed => text(&self.breed),
            ListingField::Age => self.age.map(|age| format!("{age} years")),
            ListingField::Sex => self.sex.map(|v| v.to_string()),
            ListingField::Location => text(&self.location),
            ListingField::Height => self.height.map(|h| format!("{h} hh")),
            ListingField::Color => text(&self.color),
            ListingField::Disciplines => Some(self.disciplines.join(", ")),
            ListingField::ExperienceLevel => text(&self.experience_level),
            ListingField::Temperament => text(&self.temperament),
            ListingField::Strengths => Some(self.strengths.join(", ")),
            ListingField::BestFor => Some(self.best_for.join(", ")),
            ListingField::Description => text(&self.description),
            ListingField::Tagline => text(&self.tagline),
            ListingField::HealthNotes => text(&self.health_notes),
            ListingField::Registered => self.registered.map(|v| yes_no(v).to_string()),
            ListingField::VetCheckAvailable => self.vet_check_available.map(|v| yes_no(v).to_string()),
            ListingField::Photos => Some(format!("{} photo(s)", self.photos.len())),
            ListingField::Videos => Some(format!("{} video(s)", self.videos.len())),
            ListingField::Price => self.price.map(|p| format!("${p}")),
            ListingField::PriceNegotiable => self.price_negotiable.map(|v| yes_no(v).to_string()),
            ListingField::PriceVisibility => self.price_visibility.map(|v| v.to_string()),
            ListingField::ContactVisibility => self.contact_visibility.map(|v| v.to_string()),
            ListingField::ContactName => text(&self.contact_name),
            ListingField::ContactEmail => text(&self.contact_email),
            ListingField::ContactPhone => text(&self.contact_phone),
        }
    }
}

/// Fields rendered as prose rather than as a metadata line.
const PROSE_FIELDS: [ListingField; 3] = [
    ListingField::Tagline,
    ListingField::Description,
    ListingField::HealthNotes,
];

impl fmt::Display for ListingData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut any = false;
        for field in ListingField::ALL {
            if PROSE_FIELDS.contains(&field) || field == ListingField::HorseName {
                continue;
            }
            if let Some(value) = self.display_value(field) {
                writeln!(f, "- {}: {value}", field.display_name())?;
                any = true;
            }
        }
        if !any {
            writeln!(f, "No details provided yet.")?;
        }

        if let Some(tagline) = self.display_value(ListingField::Tagline) {
            writeln!(f)?;
            writeln!(f, "_{tagline}_")?;
        }
        if let Some(description) = self.display_value(ListingField::Description) {
            writeln!(f)?;
            writeln!(f, "{description}")?;
        }
        if let Some(notes) = self.display_value(ListingField::HealthNotes) {
            writeln!(f)?;
            writeln!(f, "## Health")?;
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.data.display_title())?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status)?;
        if self.status == ListingStatus::Draft {
            writeln!(f, "- Step: {}", self.current_step)?;
        }
        if let Some(owner) = &self.owner_id {
            writeln!(f, "- Owner: {owner}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        if let Some(published_at) = &self.published_at {
            writeln!(f, "- Published: {}", LocalDateTime(published_at))?;
        }

        writeln!(f, "\n## Details")?;
        writeln!(f)?;
        write!(f, "{}", self.data)
    }
}

impl fmt::Display for ListingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let draft = if self.status == ListingStatus::Draft {
            format!(" [draft, step {}]", self.current_step)
        } else {
            String::new()
        };
        writeln!(f, "## {} (ID: {}){draft}", self.title, self.id)?;
        writeln!(f)?;

        let mut facts = Vec::new();
        if let Some(breed) = &self.breed {
            facts.push(breed.clone());
        }
        if let Some(sex) = self.sex {
            facts.push(sex.to_string());
        }
        if let Some(age) = self.age {
            facts.push(format!("{age} yrs"));
        }
        if !facts.is_empty() {
            writeln!(f, "- **Horse**: {}", facts.join(", "))?;
        }
        if let Some(location) = &self.location {
            writeln!(f, "- **Location**: {location}")?;
        }
        match self.price {
            Some(price) => writeln!(f, "- **Price**: ${price}")?,
            None => writeln!(f, "- **Price**: contact seller")?,
        }
        writeln!(f, "- **Updated**: {}", LocalDate(&self.updated_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.display_name)?;
        writeln!(f)?;
        writeln!(f, "- User: {}", self.user_id)?;
        writeln!(f, "- Role: {}", self.role)?;
        if let Some(phone) = &self.phone {
            writeln!(f, "- Phone: {phone}")?;
        }
        writeln!(f, "- Member since: {}", LocalDate(&self.created_at))?;
        Ok(())
    }
}

impl fmt::Display for BackupEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Local backup: {}", self.data.display_title())?;
        writeln!(f)?;
        if let Some(metadata) = &self.metadata {
            writeln!(f, "- Saved: {}", LocalDateTime(&metadata.saved_at))?;
            match metadata.draft_id {
                Some(id) => writeln!(f, "- Draft: {id}")?,
                None => writeln!(f, "- Draft: not saved remotely")?,
            }
            writeln!(f)?;
        }
        write!(f, "{}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn listing() -> Listing {
        let mut data = ListingData::default();
        data.set(ListingField::HorseName, "Star").unwrap();
        data.set(ListingField::Breed, "Morgan").unwrap();
        data.set(ListingField::Price, "8500").unwrap();
        data.set(ListingField::PriceVisibility, "on_request").unwrap();
        data.set(ListingField::Description, "Sweet and willing.").unwrap();
        Listing {
            id: 3,
            status: ListingStatus::Draft,
            owner_id: Some("u1".to_string()),
            current_step: 4,
            data,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
            published_at: None,
        }
    }

    #[test]
    fn test_listing_display() {
        let output = listing().to_string();
        assert!(output.starts_with("# 3. Star"));
        assert!(output.contains("- Status: draft"));
        assert!(output.contains("- Step: 4"));
        assert!(output.contains("- Breed: Morgan"));
        assert!(output.contains("- Price: $8500"));
        assert!(output.contains("Sweet and willing."));
    }

    #[test]
    fn test_summary_hides_private_price() {
        let summary = ListingSummary::from(&listing());
        let output = summary.to_string();
        assert!(output.contains("## Star (ID: 3) [draft, step 4]"));
        assert!(output.contains("- **Price**: contact seller"));
    }

    #[test]
    fn test_empty_data_display() {
        assert_eq!(ListingData::default().to_string(), "No details provided yet.\n");
    }
}
