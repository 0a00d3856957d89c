//! Profile operations for the Marketplace.

use log::debug;
use tokio::task;

use super::Marketplace;
use crate::{
    db::Database,
    display::{CreateResult, UpdateResult},
    error::{ListingError, Result},
    models::Profile,
    params::SaveProfile,
};

/// Outcome of [`Marketplace::save_profile`].
pub enum ProfileSaved {
    Created(CreateResult<Profile>),
    Updated(UpdateResult<Profile>),
}

impl std::fmt::Display for ProfileSaved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileSaved::Created(result) => write!(f, "{result}"),
            ProfileSaved::Updated(result) => write!(f, "{result}"),
        }
    }
}

impl Marketplace {
    /// Creates the profile of a user. A user has at most one profile.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::DuplicateProfile` if the user already has one
    pub async fn create_profile(&self, params: &SaveProfile) -> Result<Profile> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_profile(&params)
        })
        .await
        .map_err(ListingError::join)?
    }

    /// Retrieves the profile of a user.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let db_path = self.db_path.clone();
        let user_id = user_id.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_profile(&user_id)
        })
        .await
        .map_err(ListingError::join)?
    }

    /// Updates the profile of a user. Role and phone are kept when not given.
    pub async fn update_profile(&self, params: &SaveProfile) -> Result<Option<Profile>> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_profile(&params)
        })
        .await
        .map_err(ListingError::join)?
    }

    /// Creates the profile, or updates it when the user already has one.
    pub async fn save_profile(&self, params: &SaveProfile) -> Result<ProfileSaved> {
        if params.user_id.trim().is_empty() {
            return Err(ListingError::invalid_input("user_id").with_reason("User ID cannot be empty"));
        }
        if params.display_name.trim().is_empty() {
            return Err(ListingError::invalid_input("display_name")
                .with_reason("Display name cannot be empty"));
        }

        let Some(existing) = self.get_profile(&params.user_id).await? else {
            debug!("Creating profile for {}", params.user_id);
            let profile = self.create_profile(params).await?;
            return Ok(ProfileSaved::Created(CreateResult::new(profile)));
        };

        let mut changes = Vec::new();
        if existing.display_name != params.display_name {
            changes.push(format!("Display name: {}", params.display_name));
        }
        if let Some(role) = params.role
            && role != existing.role
        {
            changes.push(format!("Role: {role}"));
        }
        if params.phone.is_some() && params.phone != existing.phone {
            changes.push("Phone updated".to_string());
        }

        let profile = self
            .update_profile(params)
            .await?
            .ok_or_else(|| ListingError::ProfileNotFound {
                user_id: params.user_id.clone(),
            })?;
        Ok(ProfileSaved::Updated(UpdateResult::with_changes(profile, changes)))
    }
}
