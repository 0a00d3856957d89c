//! Collection wrapper types for displaying groups of listings.

use std::fmt;

use crate::models::ListingSummary;

/// Browse and search results, most recently updated first.
///
/// # Examples
///
/// ```rust
/// use paddock_core::{
///     display::ListingSummaries,
///     models::{ListingStatus, ListingSummary},
/// };
/// use jiff::Timestamp;
///
/// let summary = ListingSummary {
///     id: 1,
///     status: ListingStatus::Published,
///     title: "Star".to_string(),
///     breed: Some("Morgan".to_string()),
///     sex: None,
///     age: Some(8),
///     location: Some("Ohio".to_string()),
///     price: Some(8500),
///     current_step: 8,
///     updated_at: Timestamp::now(),
/// };
///
/// let output = ListingSummaries(vec![summary]).to_string();
/// assert!(output.contains("## Star (ID: 1)"));
/// assert!(ListingSummaries(vec![]).to_string().contains("No listings found."));
/// ```
pub struct ListingSummaries(pub Vec<ListingSummary>);

impl ListingSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ListingSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No listings found.");
        }
        self.0.iter().try_for_each(|listing| write!(f, "{listing}"))
    }
}

/// Formats listing summaries under a heading naming what is shown, the same
/// way for every interface.
///
/// ```rust
/// use paddock_core::display::{ListingSummaries, format_listing_list};
///
/// let output = format_listing_list(&ListingSummaries(vec![]), true);
/// assert_eq!(output, "# Draft Listings\n\nNo listings found.\n");
/// ```
pub fn format_listing_list(listings: &ListingSummaries, drafts: bool) -> String {
    let title = if drafts { "Draft Listings" } else { "Published Listings" };
    format!("# {title}\n\n{listings}")
}
