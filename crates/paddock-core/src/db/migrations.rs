//! Schema setup and versioning.
//!
//! The schema version lives in SQLite's `user_version` pragma. A store written
//! by a newer build is refused rather than silently misread.

use log::debug;

use crate::error::{DatabaseResultExt, ListingError, Result};

/// Version of the schema in `assets/schema.sql`.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Creates missing tables and records the schema version.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .pragma_update(None, "foreign_keys", "ON")
            .db_context("Failed to enable foreign keys")?;

        let version = self.schema_version()?;
        if version > SCHEMA_VERSION {
            return Err(ListingError::configuration(format!(
                "database schema version {version} is newer than supported version {SCHEMA_VERSION}"
            )));
        }

        self.connection
            .execute_batch(include_str!("../../assets/schema.sql"))
            .db_context("Failed to initialize database schema")?;

        if version < SCHEMA_VERSION {
            debug!("Upgrading listing store schema from version {version} to {SCHEMA_VERSION}");
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .db_context("Failed to record schema version")?;
        }
        Ok(())
    }

    /// Schema version recorded in the database file, 0 for a new file.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .db_context("Failed to read schema version")
    }
}
