//! Listing operations for the Marketplace.

use tokio::task;

use super::Marketplace;
use crate::{
    db::Database,
    error::{ListingError, Result},
    models::{Listing, ListingData, ListingFilter},
    params::{Id, SaveDraft},
};

impl Marketplace {
    /// Creates a draft listing starting at step 1.
    pub async fn create_listing(&self, owner_id: Option<String>, data: ListingData) -> Result<Listing> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_listing(owner_id.as_deref(), &data, 1)
        })
        .await
        .map_err(ListingError::join)?
    }

    /// Retrieves a listing by its ID.
    pub async fn get_listing(&self, params: &Id) -> Result<Option<Listing>> {
        let db_path = self.db_path.clone();
        let listing_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_listing(listing_id)
        })
        .await
        .map_err(ListingError::join)?
    }

    /// Retrieves a listing, failing with `ListingNotFound` when it is missing.
    pub(crate) async fn require_listing(&self, id: u64) -> Result<Listing> {
        self.get_listing(&Id { id })
            .await?
            .ok_or(ListingError::ListingNotFound { id })
    }

    /// Writes draft content: creates the draft when `params.id` is none,
    /// otherwise overwrites the stored data of that listing.
    pub async fn persist_draft(&self, params: &SaveDraft) -> Result<Listing> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            match params.id {
                Some(id) => db.save_listing(id, &params.data, params.current_step),
                None => db.create_listing(
                    params.owner_id.as_deref(),
                    &params.data,
                    params.current_step.unwrap_or(1),
                ),
            }
        })
        .await
        .map_err(ListingError::join)?
    }

    /// Lists listings with optional filtering, most recently updated first.
    pub async fn list_listings(&self, filter: Option<ListingFilter>) -> Result<Vec<Listing>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_listings(filter.as_ref())
        })
        .await
        .map_err(ListingError::join)?
    }

    /// Records the wizard step a listing is on.
    pub async fn set_current_step(&self, id: u64, step: u32) -> Result<Option<Listing>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_current_step(id, step)
        })
        .await
        .map_err(ListingError::join)?
    }

    /// Marks a listing as published without checking its content.
    pub async fn mark_published(&self, params: &Id) -> Result<Option<Listing>> {
        let db_path = self.db_path.clone();
        let listing_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.publish_listing(listing_id)
        })
        .await
        .map_err(ListingError::join)?
    }

    /// Permanently deletes a listing.
    pub async fn delete_listing_by_id(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let listing_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_listing(listing_id)
        })
        .await
        .map_err(ListingError::join)?
    }
}
