//! Listing handler operations that return formatted wrapper types for the
//! Marketplace.

use log::{debug, info};

use super::Marketplace;
use crate::{
    autosave::DraftSaver,
    display::{ListingSummaries, MissingFields, StepProgress, UpdateResult},
    error::{ListingError, Result},
    models::{Listing, ListingData, ListingField, ListingFilter, ListingSummary},
    params::{
        CreateDraft, DiscardListing, GenerateCopy, GoToStep, Id, ListListings, SaveDraft,
        SearchListings, UpdateField,
    },
    tagline::{GeneratedCopy, generate_copy},
    wizard::{CompletionReport, StepNavigator, StepRegistry, estimate_completion, validate_listing_with_steps},
};

impl Marketplace {
    /// Handle starting a new draft listing.
    ///
    /// When no role is given and the owner has a profile, the profile's
    /// default role is used.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use paddock_core::{params::CreateDraft, MarketplaceBuilder};
    /// # async {
    /// let marketplace = MarketplaceBuilder::new().build().await?;
    /// let draft = marketplace.create_draft(&CreateDraft::default()).await?;
    /// assert_eq!(draft.current_step, 1);
    /// # Result::<(), paddock_core::ListingError>::Ok(())
    /// # };
    /// ```
    pub async fn create_draft(&self, params: &CreateDraft) -> Result<Listing> {
        let role = match (params.role, params.owner_id.as_deref()) {
            (Some(role), _) => Some(role),
            (None, Some(owner_id)) => self.get_profile(owner_id).await?.map(|p| p.role),
            (None, None) => None,
        };

        let data = ListingData {
            user_role: role,
            listing_type: params.listing_type,
            ..Default::default()
        };
        let listing = self.create_listing(params.owner_id.clone(), data).await?;
        info!("Created draft listing {}", listing.id);
        Ok(listing)
    }

    /// Handle persisting draft content, creating the draft when it has no ID.
    pub async fn save_draft(&self, params: &SaveDraft) -> Result<Listing> {
        debug!("Saving draft {:?} at step {:?}", params.id, params.current_step);
        self.persist_draft(params).await
    }

    /// Handle showing a complete listing.
    pub async fn show_listing(&self, params: &Id) -> Result<Option<Listing>> {
        self.get_listing(params).await
    }

    /// Handle listing published listings, or drafts when requested.
    pub async fn list_listings_summary(&self, params: &ListListings) -> Result<ListingSummaries> {
        let listings = self.list_listings(Some(ListingFilter::from(params))).await?;
        let summaries: Vec<ListingSummary> = listings.iter().map(Into::into).collect();
        Ok(ListingSummaries(summaries))
    }

    /// Handle searching listings by breed, sex, type, price, age, name,
    /// location and disciplines.
    pub async fn search_listings_summary(&self, params: &SearchListings) -> Result<ListingSummaries> {
        if let (Some(min), Some(max)) = (params.price_min, params.price_max)
            && min > max
        {
            return Err(ListingError::invalid_input("price_min")
                .with_reason("Minimum price cannot exceed maximum price"));
        }
        if let (Some(min), Some(max)) = (params.age_min, params.age_max)
            && min > max
        {
            return Err(ListingError::invalid_input("age_min")
                .with_reason("Minimum age cannot exceed maximum age"));
        }

        let listings = self.list_listings(Some(ListingFilter::from(params))).await?;
        let summaries: Vec<ListingSummary> = listings.iter().map(Into::into).collect();
        Ok(ListingSummaries(summaries))
    }

    /// Handle changing a single field of a stored listing.
    ///
    /// An empty value clears the field. Returns the updated listing with a
    /// description of the change.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::InvalidInput` for unknown fields or values that
    /// do not parse, `ListingError::ListingNotFound` for unknown listings
    pub async fn update_listing_field(&self, params: &UpdateField) -> Result<UpdateResult<Listing>> {
        let field: ListingField = params.field.parse()?;
        let mut listing = self.require_listing(params.id).await?;

        let value = params.value.trim();
        let change = if value.is_empty() {
            listing.data.clear(field);
            format!("{} cleared", field.display_name())
        } else {
            listing.data.set(field, value)?;
            format!(
                "{}: {}",
                field.display_name(),
                listing.data.display_value(field).unwrap_or_default()
            )
        };

        let listing = self
            .persist_draft(&SaveDraft {
                id: Some(listing.id),
                owner_id: None,
                data: listing.data,
                current_step: None,
            })
            .await?;
        Ok(UpdateResult::with_changes(listing, vec![change]))
    }

    /// Handle checking a listing for missing required fields.
    pub async fn validate_listing(&self, params: &Id, registry: &StepRegistry) -> Result<MissingFields> {
        let listing = self.require_listing(params.id).await?;
        Ok(MissingFields(validate_listing_with_steps(&listing.data, registry)))
    }

    /// Handle estimating how complete a listing is.
    pub async fn listing_progress(&self, params: &Id) -> Result<CompletionReport> {
        let listing = self.require_listing(params.id).await?;
        Ok(estimate_completion(&listing.data))
    }

    /// Handle showing the wizard position of a listing.
    pub async fn step_progress(&self, params: &Id, registry: &StepRegistry) -> Result<StepProgress> {
        let listing = self.require_listing(params.id).await?;
        let navigator = StepNavigator::starting_at(*registry, listing.current_step);
        Ok(StepProgress::new(&navigator, &listing.data, Some(listing.id)))
    }

    /// Handle advancing a stored listing to its next visible step.
    pub async fn next_step(&self, params: &Id, registry: &StepRegistry) -> Result<StepProgress> {
        self.move_step(params.id, registry, |navigator, data| {
            navigator.next_step(data);
            Ok(())
        })
        .await
    }

    /// Handle moving a stored listing back to its previous visible step.
    pub async fn prev_step(&self, params: &Id, registry: &StepRegistry) -> Result<StepProgress> {
        self.move_step(params.id, registry, |navigator, data| {
            navigator.prev_step(data);
            Ok(())
        })
        .await
    }

    /// Handle moving a stored listing to a specific step.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::InvalidInput` when the step does not exist or
    /// is skipped for this listing
    pub async fn go_to_step(&self, params: &GoToStep, registry: &StepRegistry) -> Result<StepProgress> {
        let step = params.step;
        self.move_step(params.id, registry, move |navigator, data| {
            navigator.go_to(step, data).map(|_| ())
        })
        .await
    }

    async fn move_step<F>(&self, id: u64, registry: &StepRegistry, movement: F) -> Result<StepProgress>
    where
        F: FnOnce(&mut StepNavigator, &ListingData) -> Result<()>,
    {
        let listing = self.require_listing(id).await?;
        let mut navigator = StepNavigator::starting_at(*registry, listing.current_step);
        movement(&mut navigator, &listing.data)?;

        let listing = if navigator.current() != listing.current_step {
            self.set_current_step(id, navigator.current())
                .await?
                .ok_or(ListingError::ListingNotFound { id })?
        } else {
            listing
        };
        Ok(StepProgress::new(&navigator, &listing.data, Some(listing.id)))
    }

    /// Handle publishing a listing after checking its required fields.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::Incomplete` naming the missing fields
    pub async fn publish_listing(&self, params: &Id, registry: &StepRegistry) -> Result<Listing> {
        let listing = self.require_listing(params.id).await?;

        let missing = validate_listing_with_steps(&listing.data, registry);
        if !missing.is_empty() {
            return Err(ListingError::Incomplete {
                missing: missing.into_iter().map(|r| r.display_name).collect(),
            });
        }

        let published = self
            .mark_published(params)
            .await?
            .ok_or(ListingError::ListingNotFound { id: params.id })?;
        info!("Published listing {}", published.id);
        Ok(published)
    }

    /// Handle permanently discarding a listing with confirmation.
    ///
    /// Returns the listing that was deleted, or None if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::InvalidInput` if `confirmed` is false
    pub async fn discard_listing(&self, params: &DiscardListing) -> Result<Option<Listing>> {
        if !params.confirmed {
            return Err(ListingError::invalid_input("confirmed").with_reason(
                "Discarding a listing requires explicit confirmation. Set 'confirmed' to true to delete it permanently.",
            ));
        }

        let id_params = Id { id: params.id };
        let listing = self.get_listing(&id_params).await?;
        if listing.is_some() {
            self.delete_listing_by_id(&id_params).await?;
        }
        Ok(listing)
    }

    /// Handle writing taglines and a description for a listing.
    pub async fn generate_copy(&self, params: &GenerateCopy) -> Result<GeneratedCopy> {
        let listing = self.require_listing(params.id).await?;
        Ok(generate_copy(&listing.data, params.response.as_deref()))
    }
}

impl DraftSaver for Marketplace {
    async fn save_draft(&self, params: SaveDraft) -> Result<u64> {
        Marketplace::save_draft(self, &params).await.map(|listing| listing.id)
    }

    async fn delete_draft(&self, id: u64) -> Result<()> {
        self.delete_listing_by_id(&Id { id }).await
    }

    async fn publish_draft(&self, id: u64) -> Result<()> {
        self.mark_published(&Id { id })
            .await?
            .map(|_| ())
            .ok_or(ListingError::ListingNotFound { id })
    }
}
