//! Listing CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, Transaction, params};

use super::utils::{enum_column, json_column, optional_timestamp_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, ListingError, Result},
    models::{Listing, ListingData, ListingFilter, ListingStatus},
};

const LISTING_COLUMNS: &str =
    "id, status, owner_id, current_step, data, created_at, updated_at, published_at";
const INSERT_LISTING_SQL: &str = "INSERT INTO listings (status, owner_id, current_step, horse_name, breed, sex, age, location, listing_type, price, data, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const UPDATE_LISTING_SQL: &str = "UPDATE listings SET horse_name = ?1, breed = ?2, sex = ?3, age = ?4, location = ?5, listing_type = ?6, price = ?7, data = ?8, current_step = COALESCE(?9, current_step), updated_at = ?10 WHERE id = ?11";
const UPDATE_CURRENT_STEP_SQL: &str =
    "UPDATE listings SET current_step = ?1, updated_at = ?2 WHERE id = ?3";
const PUBLISH_LISTING_SQL: &str =
    "UPDATE listings SET status = ?1, published_at = COALESCE(published_at, ?2), updated_at = ?2 WHERE id = ?3";
const CHECK_LISTING_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM listings WHERE id = ?1)";
const DELETE_LISTING_SQL: &str = "DELETE FROM listings WHERE id = ?1";

/// Searchable attributes mirrored out of the JSON data column.
struct IndexedColumns {
    horse_name: Option<String>,
    breed: Option<String>,
    sex: Option<&'static str>,
    age: Option<i64>,
    location: Option<String>,
    listing_type: Option<&'static str>,
    price: Option<i64>,
}

impl From<&ListingData> for IndexedColumns {
    fn from(data: &ListingData) -> Self {
        Self {
            horse_name: data.horse_name.clone(),
            breed: data.breed.clone(),
            sex: data.sex.map(|s| s.as_str()),
            age: data.age.map(i64::from),
            location: data.location.clone(),
            listing_type: data.listing_type.map(|t| t.as_str()),
            price: data.price.and_then(|p| i64::try_from(p).ok()),
        }
    }
}

impl super::Database {
    /// Helper function to construct a Listing from a database row
    fn build_listing_from_row(row: &rusqlite::Row) -> rusqlite::Result<Listing> {
        Ok(Listing {
            id: row.get::<_, i64>(0)? as u64,
            status: enum_column::<ListingStatus>(row, 1)?,
            owner_id: row.get(2)?,
            current_step: row.get::<_, i64>(3)? as u32,
            data: json_column::<ListingData>(row, 4)?,
            created_at: timestamp_column(row, 5)?,
            updated_at: timestamp_column(row, 6)?,
            published_at: optional_timestamp_column(row, 7)?,
        })
    }

    fn select_listing(tx: &Transaction<'_>, id: u64) -> Result<Option<Listing>> {
        tx.query_row(
            &format!("SELECT {LISTING_COLUMNS} FROM listings WHERE id = ?1"),
            params![id as i64],
            Self::build_listing_from_row,
        )
        .optional()
        .db_context("Failed to query listing")
    }

    /// Creates a new draft listing.
    pub fn create_listing(
        &mut self,
        owner_id: Option<&str>,
        data: &ListingData,
        current_step: u32,
    ) -> Result<Listing> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let json = serde_json::to_string(data)?;
        let columns = IndexedColumns::from(data);

        tx.execute(
            INSERT_LISTING_SQL,
            params![
                ListingStatus::Draft.as_str(),
                owner_id,
                i64::from(current_step.max(1)),
                columns.horse_name,
                columns.breed,
                columns.sex,
                columns.age,
                columns.location,
                columns.listing_type,
                columns.price,
                json,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert listing")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Listing {
            id,
            status: ListingStatus::Draft,
            owner_id: owner_id.map(String::from),
            current_step: current_step.max(1),
            data: data.clone(),
            created_at: now,
            updated_at: now,
            published_at: None,
        })
    }

    /// Retrieves a listing by its ID.
    pub fn get_listing(&self, id: u64) -> Result<Option<Listing>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {LISTING_COLUMNS} FROM listings WHERE id = ?1"))
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], Self::build_listing_from_row)
            .optional()
            .db_context("Failed to query listing")
    }

    /// Overwrites the content of an existing listing. The stored step is only
    /// changed when `current_step` is provided.
    pub fn save_listing(
        &mut self,
        id: u64,
        data: &ListingData,
        current_step: Option<u32>,
    ) -> Result<Listing> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let json = serde_json::to_string(data)?;
        let columns = IndexedColumns::from(data);

        let rows_affected = tx
            .execute(
                UPDATE_LISTING_SQL,
                params![
                    columns.horse_name,
                    columns.breed,
                    columns.sex,
                    columns.age,
                    columns.location,
                    columns.listing_type,
                    columns.price,
                    json,
                    current_step.map(|step| i64::from(step.max(1))),
                    &now,
                    id as i64
                ],
            )
            .db_context("Failed to update listing")?;

        if rows_affected == 0 {
            return Err(ListingError::ListingNotFound { id });
        }

        let listing = Self::select_listing(&tx, id)?.ok_or(ListingError::ListingNotFound { id })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(listing)
    }

    /// Records the wizard step a listing is on.
    /// Returns None if the listing doesn't exist.
    pub fn set_current_step(&mut self, id: u64, step: u32) -> Result<Option<Listing>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(
                UPDATE_CURRENT_STEP_SQL,
                params![i64::from(step.max(1)), &now, id as i64],
            )
            .db_context("Failed to update current step")?;

        if rows_affected == 0 {
            return Ok(None);
        }

        let listing = Self::select_listing(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(listing)
    }

    /// Marks a listing as published. Publishing twice keeps the first
    /// publication time. Returns None if the listing doesn't exist.
    pub fn publish_listing(&mut self, id: u64) -> Result<Option<Listing>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(
                PUBLISH_LISTING_SQL,
                params![ListingStatus::Published.as_str(), &now, id as i64],
            )
            .db_context("Failed to publish listing")?;

        if rows_affected == 0 {
            return Ok(None);
        }

        let listing = Self::select_listing(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(listing)
    }

    /// Permanently deletes a listing. This operation cannot be undone.
    pub fn delete_listing(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_LISTING_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check listing existence")?;

        if !exists {
            return Err(ListingError::ListingNotFound { id });
        }

        tx.execute(DELETE_LISTING_SQL, params![id as i64])
            .db_context("Failed to delete listing")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Lists listings matching the filter, most recently updated first.
    pub fn list_listings(&self, filter: Option<&ListingFilter>) -> Result<Vec<Listing>> {
        let mut query = format!("SELECT {LISTING_COLUMNS} FROM listings");

        let mut conditions: Vec<String> = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        let default_filter = ListingFilter::default();
        let f = filter.unwrap_or(&default_filter);

        match f.status {
            Some(status) => {
                conditions.push("status = ?".to_string());
                params_vec.push(Box::new(status.as_str().to_string()));
            }
            None if !f.include_drafts => {
                conditions.push("status = ?".to_string());
                params_vec.push(Box::new(ListingStatus::Published.as_str().to_string()));
            }
            None => {}
        }

        if let Some(ref owner) = f.owner_id {
            conditions.push("owner_id = ?".to_string());
            params_vec.push(Box::new(owner.clone()));
        }

        if let Some(ref breed) = f.breed {
            conditions.push("breed = ? COLLATE NOCASE".to_string());
            params_vec.push(Box::new(breed.trim().to_string()));
        }

        if let Some(sex) = f.sex {
            conditions.push("sex = ?".to_string());
            params_vec.push(Box::new(sex.as_str().to_string()));
        }

        if let Some(listing_type) = f.listing_type {
            conditions.push("listing_type = ?".to_string());
            params_vec.push(Box::new(listing_type.as_str().to_string()));
        }

        if let Some(min) = f.price_min {
            conditions.push("price >= ?".to_string());
            params_vec.push(Box::new(i64::try_from(min).unwrap_or(i64::MAX)));
        }

        if let Some(max) = f.price_max {
            conditions.push("price <= ?".to_string());
            params_vec.push(Box::new(i64::try_from(max).unwrap_or(i64::MAX)));
        }

        if let Some(min) = f.age_min {
            conditions.push("age >= ?".to_string());
            params_vec.push(Box::new(i64::from(min)));
        }

        if let Some(max) = f.age_max {
            conditions.push("age <= ?".to_string());
            params_vec.push(Box::new(i64::from(max)));
        }

        // SQLite LIKE is case-insensitive for ASCII
        if let Some(ref name) = f.name_contains {
            conditions.push("horse_name LIKE ?".to_string());
            params_vec.push(Box::new(format!("%{}%", name.trim())));
        }

        if let Some(ref location) = f.location_contains {
            conditions.push("location LIKE ?".to_string());
            params_vec.push(Box::new(format!("%{}%", location.trim())));
        }

        let wanted: Vec<String> = f
            .disciplines_any
            .iter()
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        if !wanted.is_empty() {
            let placeholders = vec!["?"; wanted.len()].join(", ");
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM json_each(listings.data, '$.disciplines') WHERE lower(json_each.value) IN ({placeholders}))"
            ));
            for discipline in wanted {
                params_vec.push(Box::new(discipline));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY updated_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        stmt.query_map(&params_refs[..], Self::build_listing_from_row)
            .db_context("Failed to query listings")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch listings")
    }
}
