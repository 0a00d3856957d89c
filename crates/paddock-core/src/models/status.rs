//! Enumerations used by listings and profiles.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Type-safe enumeration of listing lifecycle states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Listing is still being edited and only visible to its owner
    #[default]
    Draft,

    /// Listing is live in the marketplace
    Published,
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(ListingStatus::Draft),
            "published" => Ok(ListingStatus::Published),
            _ => Err(format!("Invalid listing status: {s}")),
        }
    }
}

impl ListingStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Draft => "draft",
            ListingStatus::Published => "published",
        }
    }
}

/// Who is creating the listing.
///
/// An unset role is treated as [`UserRole::Owner`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Owner,
    Agent,
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(UserRole::Owner),
            "agent" => Ok(UserRole::Agent),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Owner => "owner",
            UserRole::Agent => "agent",
        }
    }
}

/// Commercial terms offered by a listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    Sale,
    Lease,
    SaleOrLease,
}

impl FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "sale" => Ok(ListingType::Sale),
            "lease" => Ok(ListingType::Lease),
            "sale_or_lease" => Ok(ListingType::SaleOrLease),
            _ => Err(format!("Invalid listing type: {s}")),
        }
    }
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Sale => "sale",
            ListingType::Lease => "lease",
            ListingType::SaleOrLease => "sale_or_lease",
        }
    }
}

/// Sex of the horse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum HorseSex {
    Mare,
    Gelding,
    Stallion,
    Colt,
    Filly,
}

impl FromStr for HorseSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mare" => Ok(HorseSex::Mare),
            "gelding" => Ok(HorseSex::Gelding),
            "stallion" => Ok(HorseSex::Stallion),
            "colt" => Ok(HorseSex::Colt),
            "filly" => Ok(HorseSex::Filly),
            _ => Err(format!("Invalid sex: {s}")),
        }
    }
}

impl HorseSex {
    pub fn as_str(&self) -> &'static str {
        match self {
            HorseSex::Mare => "mare",
            HorseSex::Gelding => "gelding",
            HorseSex::Stallion => "stallion",
            HorseSex::Colt => "colt",
            HorseSex::Filly => "filly",
        }
    }
}

/// Audience allowed to see a piece of listing information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Anyone browsing the marketplace
    #[default]
    Public,
    /// Signed-in members only
    Members,
    /// Shared by the seller on request
    OnRequest,
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "public" => Ok(Visibility::Public),
            "members" => Ok(Visibility::Members),
            "on_request" => Ok(Visibility::OnRequest),
            _ => Err(format!("Invalid visibility: {s}")),
        }
    }
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Members => "members",
            Visibility::OnRequest => "on_request",
        }
    }
}
