//! Filter types for querying listings.

use super::{HorseSex, ListingStatus, ListingType};

/// Filter options for querying listings.
///
/// Every populated field narrows the result; an empty filter returns all
/// published listings.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    /// Filter by lifecycle state. If None, only published listings are shown
    pub status: Option<ListingStatus>,

    /// Show drafts and published listings alike
    pub include_drafts: bool,

    /// Filter by owner (exact match)
    pub owner_id: Option<String>,

    /// Filter by breed (case-insensitive exact match)
    pub breed: Option<String>,

    /// Filter by sex
    pub sex: Option<HorseSex>,

    /// Filter by listing type
    pub listing_type: Option<ListingType>,

    /// Filter by asking price range (inclusive)
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,

    /// Filter by age range in years (inclusive)
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,

    /// Filter by horse name (case-insensitive partial match)
    pub name_contains: Option<String>,

    /// Filter by location (case-insensitive partial match)
    pub location_contains: Option<String>,

    /// Listings offering at least one of these disciplines
    pub disciplines_any: Vec<String>,
}

impl ListingFilter {
    /// Filter matching every listing owned by `owner_id`, drafts included.
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
            include_drafts: true,
            ..Default::default()
        }
    }
}

impl From<&crate::params::ListListings> for ListingFilter {
    fn from(params: &crate::params::ListListings) -> Self {
        if params.drafts {
            Self {
                status: Some(ListingStatus::Draft),
                include_drafts: true,
                ..Default::default()
            }
        } else {
            Self {
                status: Some(ListingStatus::Published),
                ..Default::default()
            }
        }
    }
}

impl From<&crate::params::SearchListings> for ListingFilter {
    fn from(params: &crate::params::SearchListings) -> Self {
        Self {
            status: Some(if params.drafts {
                ListingStatus::Draft
            } else {
                ListingStatus::Published
            }),
            include_drafts: params.drafts,
            owner_id: None,
            breed: params.breed.clone(),
            sex: params.sex,
            listing_type: params.listing_type,
            price_min: params.price_min,
            price_max: params.price_max,
            age_min: params.age_min,
            age_max: params.age_max,
            name_contains: params.name.clone(),
            location_contains: params.location.clone(),
            disciplines_any: params.disciplines.clone(),
        }
    }
}
