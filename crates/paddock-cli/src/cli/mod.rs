//! Command handlers of the `paddock` binary.
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! [`Marketplace`] and renders the core `Display` output, so the terminal
//! shows the same markdown the MCP server returns.

use std::path::PathBuf;

use anyhow::{Context, Result};
use paddock_core::{
    Marketplace, SqliteStorage, StepFlow, StepRegistry, WizardConfig,
    display::format_listing_list, params::ListListings,
};

use crate::renderer::TerminalRenderer;

mod handlers;
pub mod interactive;

/// Name of the local backup file kept next to a custom database.
const STORAGE_FILE_NAME: &str = "local_storage.db";

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_file: Option<PathBuf>,
    pub storage_file: Option<PathBuf>,
    pub flow: StepFlow,
    pub autosave: bool,
}

impl Settings {
    /// Where the local backup lives: `--storage-file`, else next to
    /// `--database-file`, else the XDG default.
    pub fn storage_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage_file {
            return Ok(path.clone());
        }
        if let Some(database) = &self.database_file {
            return Ok(database.with_file_name(STORAGE_FILE_NAME));
        }
        SqliteStorage::default_path().context("Failed to locate local storage")
    }

    pub fn wizard_config(&self) -> WizardConfig {
        WizardConfig::default()
            .with_flow(self.flow)
            .with_autosave(self.autosave)
    }
}

/// Runs CLI commands against one marketplace.
pub struct Cli {
    marketplace: Marketplace,
    renderer: TerminalRenderer,
    settings: Settings,
}

impl Cli {
    pub fn new(marketplace: Marketplace, renderer: TerminalRenderer, settings: Settings) -> Self {
        Self {
            marketplace,
            renderer,
            settings,
        }
    }

    fn registry(&self) -> StepRegistry {
        StepRegistry::new(self.settings.flow)
    }

    fn open_storage(&self) -> Result<SqliteStorage> {
        let path = self.settings.storage_path()?;
        SqliteStorage::open(&path)
            .with_context(|| format!("Failed to open local storage at {}", path.display()))
    }

    fn render(&self, output: impl ToString) -> Result<()> {
        self.renderer.render(&output.to_string())
    }

    /// Lists published listings, or drafts.
    pub async fn list_listings(&self, params: &ListListings) -> Result<()> {
        let listings = self
            .marketplace
            .list_listings_summary(params)
            .await
            .context("Failed to list listings")?;
        self.render(format_listing_list(&listings, params.drafts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(database_file: Option<&str>, storage_file: Option<&str>) -> Settings {
        Settings {
            database_file: database_file.map(PathBuf::from),
            storage_file: storage_file.map(PathBuf::from),
            flow: StepFlow::default(),
            autosave: true,
        }
    }

    #[test]
    fn test_storage_next_to_custom_database() {
        let settings = settings(Some("/tmp/market/paddock.db"), None);
        assert_eq!(
            settings.storage_path().unwrap(),
            PathBuf::from("/tmp/market/local_storage.db")
        );
    }

    #[test]
    fn test_explicit_storage_file_wins() {
        let settings = settings(Some("/tmp/market/paddock.db"), Some("/tmp/backup.db"));
        assert_eq!(settings.storage_path().unwrap(), PathBuf::from("/tmp/backup.db"));
    }

    #[test]
    fn test_wizard_config_follows_flags() {
        let mut settings = settings(None, None);
        settings.flow = StepFlow::Legacy;
        settings.autosave = false;
        let config = settings.wizard_config();
        assert_eq!(config.flow, StepFlow::Legacy);
        assert!(!config.autosave_enabled);
    }
}
