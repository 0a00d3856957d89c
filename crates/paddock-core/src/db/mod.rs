//! Database operations and SQLite management for listings and profiles.
//!
//! This module stands in for the hosted listing store. It handles SQLite
//! connections, schema management, and provides specialized query
//! interfaces for listings and profiles.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod listing_queries;
pub mod migrations;
pub mod profile_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
