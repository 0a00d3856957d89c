//! Builder for creating and configuring Marketplace instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Marketplace;
use crate::{
    db::Database,
    error::{ListingError, Result},
};

/// Builder for creating and configuring Marketplace instances.
#[derive(Debug, Clone, Default)]
pub struct MarketplaceBuilder {
    database_path: Option<PathBuf>,
}

impl MarketplaceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/paddock/paddock.db` or `~/.local/share/paddock/paddock.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the marketplace, creating the database file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::FileSystem` if the database directory cannot be created
    /// Returns `ListingError::Database` if database initialization fails
    pub async fn build(self) -> Result<Marketplace> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ListingError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening listing store at {}", db_path.display());
        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(|_| ()))
            .await
            .map_err(ListingError::join)??;

        Ok(Marketplace::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("paddock")
            .place_data_file("paddock.db")
            .map_err(|e| ListingError::XdgDirectory(e.to_string()))
    }
}
