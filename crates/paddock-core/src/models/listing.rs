//! Listing data and listing record definitions.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{HorseSex, ListingField, ListingStatus, ListingType, UserRole, Visibility};

/// The editable content of one horse listing.
///
/// Every field is optional; an absent field means "not yet provided". Keys
/// serialize in camelCase and absent fields are omitted, so an empty listing
/// serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ListingData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horse_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<HorseSex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Height in hands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disciplines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperament: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub best_for: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vet_check_available: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<String>,

    /// Asking price in whole currency units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_negotiable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_visibility: Option<Visibility>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl ListingData {
    /// Fields whose presence makes a draft worth saving remotely.
    pub const IDENTITY_FIELDS: [ListingField; 5] = [
        ListingField::HorseName,
        ListingField::Breed,
        ListingField::Age,
        ListingField::Sex,
        ListingField::Location,
    ];

    /// True when no field has been provided.
    pub fn is_empty(&self) -> bool {
        ListingField::ALL.iter().all(|field| !field.is_present(self))
    }

    /// True when at least one identity-bearing field is present.
    pub fn has_identity(&self) -> bool {
        Self::IDENTITY_FIELDS
            .iter()
            .any(|field| field.is_present(self))
    }

    /// The declared role, defaulting to owner when unset.
    pub fn role(&self) -> UserRole {
        self.user_role.unwrap_or_default()
    }

    /// Name to show in lists and headers.
    pub fn display_title(&self) -> &str {
        self.horse_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Untitled listing")
    }

    /// The fields that currently hold a value, in declaration order.
    pub fn present_fields(&self) -> Vec<ListingField> {
        ListingField::ALL
            .iter()
            .copied()
            .filter(|field| field.is_present(self))
            .collect()
    }
}

/// A listing as stored by the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// Unique identifier for the listing
    pub id: u64,

    /// Draft or published
    #[serde(default)]
    pub status: ListingStatus,

    /// User that owns the listing, when known
    pub owner_id: Option<String>,

    /// Wizard step the owner was last on (1-based)
    pub current_step: u32,

    /// Listing content
    pub data: ListingData,

    /// Timestamp when the listing was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the listing was last modified (UTC)
    pub updated_at: Timestamp,

    /// Timestamp when the listing went live (UTC)
    pub published_at: Option<Timestamp>,
}
