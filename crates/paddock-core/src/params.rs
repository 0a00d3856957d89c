//! Parameter structures for Paddock operations
//!
//! This module contains shared parameter structures used across the CLI and
//! the MCP server without framework-specific derives. Interface layers wrap
//! them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! CLI argument structs convert into these types with `From`, and the MCP
//! layer deserializes them through a transparent wrapper. JSON schema
//! generation is only compiled in with the `schema` feature.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{HorseSex, ListingData, ListingType, UserRole};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the listing to operate on
    pub id: u64,
}

/// Parameters for starting a new draft listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateDraft {
    /// User creating the listing
    pub owner_id: Option<String>,
    /// Whether the seller is the owner or an agent (defaults to owner)
    pub role: Option<UserRole>,
    /// Sale, lease or either
    pub listing_type: Option<ListingType>,
}

/// Parameters for persisting draft content.
///
/// Without an `id` a new draft is created; otherwise the draft is
/// overwritten. `current_step` is only stored when provided.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SaveDraft {
    /// Draft to overwrite, or none to create one
    pub id: Option<u64>,
    /// User owning the draft (used on creation only)
    pub owner_id: Option<String>,
    /// Complete listing content
    pub data: ListingData,
    /// Wizard step to record
    pub current_step: Option<u32>,
}

/// Parameters for changing a single field of a listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateField {
    /// ID of the listing to update
    pub id: u64,
    /// Field key, e.g. `horseName` or `horse_name`
    pub field: String,
    /// New value in textual form; list fields take comma-separated values and
    /// an empty value clears the field
    #[serde(default)]
    pub value: String,
}

/// Parameters for moving a stored listing to a specific wizard step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GoToStep {
    /// ID of the listing
    pub id: u64,
    /// Target step number (1-based)
    pub step: u32,
}

/// Parameters for listing drafts or published listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListListings {
    /// Show drafts instead of published listings
    #[serde(default)]
    pub drafts: bool,
}

/// Parameters for searching listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SearchListings {
    /// Breed (case-insensitive exact match)
    pub breed: Option<String>,
    /// Sex of the horse
    pub sex: Option<HorseSex>,
    /// Sale, lease or either
    pub listing_type: Option<ListingType>,
    /// Minimum asking price
    pub price_min: Option<u64>,
    /// Maximum asking price
    pub price_max: Option<u64>,
    /// Minimum age in years
    pub age_min: Option<u32>,
    /// Maximum age in years
    pub age_max: Option<u32>,
    /// Part of the horse name
    pub name: Option<String>,
    /// Part of the location
    pub location: Option<String>,
    /// Disciplines; a listing matches when it offers any of them
    #[serde(default)]
    pub disciplines: Vec<String>,
    /// Search drafts instead of published listings
    #[serde(default)]
    pub drafts: bool,
}

/// Parameters for discarding a draft or removing a listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DiscardListing {
    /// The ID of the listing to delete
    pub id: u64,
    /// Confirmation flag, must be true to delete
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for creating or updating a user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SaveProfile {
    /// User the profile belongs to
    pub user_id: String,
    /// Name shown on listings
    pub display_name: String,
    /// Default role for new listings
    pub role: Option<UserRole>,
    /// Contact phone
    pub phone: Option<String>,
}

/// Parameters for generating listing copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateCopy {
    /// ID of the listing to write copy for
    pub id: u64,
    /// Raw response from a text generation service, if one was called
    pub response: Option<String>,
}
