//! Headlines for create, update and delete outcomes.

use std::fmt;

use crate::models::{Listing, Profile};

/// A resource that can announce what just happened to it.
pub trait Headline: fmt::Display {
    fn created(&self) -> String;
    fn updated(&self) -> String;
}

impl Headline for Listing {
    fn created(&self) -> String {
        format!("Created draft listing with ID: {}", self.id)
    }

    fn updated(&self) -> String {
        format!("Updated listing with ID: {}", self.id)
    }
}

impl Headline for Profile {
    fn created(&self) -> String {
        format!("Created profile for user '{}'", self.user_id)
    }

    fn updated(&self) -> String {
        format!("Updated profile for user '{}'", self.user_id)
    }
}

/// A freshly created resource, rendered below its headline.
///
/// ```rust
/// use paddock_core::{
///     display::CreateResult,
///     models::{Listing, ListingData, ListingStatus},
/// };
/// use jiff::Timestamp;
///
/// let now = Timestamp::now();
/// let listing = Listing {
///     id: 1,
///     status: ListingStatus::Draft,
///     owner_id: None,
///     current_step: 1,
///     data: ListingData::default(),
///     created_at: now,
///     updated_at: now,
///     published_at: None,
/// };
///
/// assert!(CreateResult::new(listing).to_string().starts_with("Created draft listing with ID: 1\n"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T: Headline> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Headline> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", self.resource.created())?;
        write!(f, "{}", self.resource)
    }
}

/// An updated resource with one line per changed value.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T: Headline> UpdateResult<T> {
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Headline> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.resource.updated())?;
        if !self.changes.is_empty() {
            writeln!(f, "\nChanges made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// A listing that has been discarded for good.
pub struct DeleteResult {
    pub listing: Listing,
}

impl DeleteResult {
    pub fn new(listing: Listing) -> Self {
        Self { listing }
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Listing { id, status, data, .. } = &self.listing;
        writeln!(f, "Deleted {status} listing '{}' (ID: {id})", data.display_title())
    }
}
