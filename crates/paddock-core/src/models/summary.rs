//! Listing summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{HorseSex, Listing, ListingStatus, Visibility};

/// Compact listing information for browse and search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSummary {
    /// Listing ID
    pub id: u64,
    /// Lifecycle state
    pub status: ListingStatus,
    /// Horse name, or a placeholder for untitled drafts
    pub title: String,
    pub breed: Option<String>,
    pub sex: Option<HorseSex>,
    pub age: Option<u32>,
    pub location: Option<String>,
    /// Price, only when the seller shows it publicly
    pub price: Option<u64>,
    /// Wizard step the listing was last on
    pub current_step: u32,
    /// Last update timestamp
    pub updated_at: Timestamp,
}

impl From<&Listing> for ListingSummary {
    fn from(listing: &Listing) -> Self {
        let data = &listing.data;
        let price = match data.price_visibility.unwrap_or_default() {
            Visibility::Public => data.price,
            Visibility::Members | Visibility::OnRequest => None,
        };

        Self {
            id: listing.id,
            status: listing.status,
            title: data.display_title().to_string(),
            breed: data.breed.clone(),
            sex: data.sex,
            age: data.age,
            location: data.location.clone(),
            price,
            current_step: listing.current_step,
            updated_at: listing.updated_at,
        }
    }
}
