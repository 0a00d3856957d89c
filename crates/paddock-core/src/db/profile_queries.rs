//! Profile CRUD operations.

use jiff::Timestamp;
use rusqlite::{ErrorCode, OptionalExtension, params};

use super::utils::{enum_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, ListingError, Result},
    models::{Profile, UserRole},
    params::SaveProfile,
};

const PROFILE_COLUMNS: &str = "id, user_id, display_name, role, phone, created_at, updated_at";
const INSERT_PROFILE_SQL: &str = "INSERT INTO profiles (user_id, display_name, role, phone, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_PROFILE_SQL: &str = "UPDATE profiles SET display_name = ?1, role = COALESCE(?2, role), phone = COALESCE(?3, phone), updated_at = ?4 WHERE user_id = ?5";

impl super::Database {
    fn build_profile_from_row(row: &rusqlite::Row) -> rusqlite::Result<Profile> {
        Ok(Profile {
            id: row.get::<_, i64>(0)? as u64,
            user_id: row.get(1)?,
            display_name: row.get(2)?,
            role: enum_column::<UserRole>(row, 3)?,
            phone: row.get(4)?,
            created_at: timestamp_column(row, 5)?,
            updated_at: timestamp_column(row, 6)?,
        })
    }

    /// Creates the profile for a user.
    ///
    /// A user can hold only one profile; a second attempt fails with
    /// [`ListingError::DuplicateProfile`].
    pub fn create_profile(&mut self, params: &SaveProfile) -> Result<Profile> {
        let now = Timestamp::now();
        let now_str = now.to_string();
        let role = params.role.unwrap_or_default();

        self.connection
            .execute(
                INSERT_PROFILE_SQL,
                params![
                    &params.user_id,
                    &params.display_name,
                    role.as_str(),
                    &params.phone,
                    &now_str,
                    &now_str
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(ref failure, _)
                    if failure.code == ErrorCode::ConstraintViolation =>
                {
                    ListingError::DuplicateProfile {
                        user_id: params.user_id.clone(),
                    }
                }
                other => ListingError::database("Failed to insert profile").with_source(other),
            })?;

        Ok(Profile {
            id: self.connection.last_insert_rowid() as u64,
            user_id: params.user_id.clone(),
            display_name: params.display_name.clone(),
            role,
            phone: params.phone.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves the profile of a user.
    pub fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        self.connection
            .query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ?1"),
                params![user_id],
                Self::build_profile_from_row,
            )
            .optional()
            .db_context("Failed to query profile")
    }

    /// Updates an existing profile. Role and phone are kept when not given.
    /// Returns None if the user has no profile.
    pub fn update_profile(&mut self, params: &SaveProfile) -> Result<Option<Profile>> {
        let now = Timestamp::now().to_string();
        let rows_affected = self
            .connection
            .execute(
                UPDATE_PROFILE_SQL,
                params![
                    &params.display_name,
                    params.role.map(|r| r.as_str()),
                    &params.phone,
                    &now,
                    &params.user_id
                ],
            )
            .db_context("Failed to update profile")?;

        if rows_affected == 0 {
            return Ok(None);
        }

        self.get_profile(&params.user_id)
    }
}
