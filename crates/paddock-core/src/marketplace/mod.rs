//! High-level marketplace API over the listing store.
//!
//! [`Marketplace`] is the entry point for everything that touches stored
//! listings and profiles: the CLI, the MCP server and wizard sessions (through
//! its [`DraftSaver`](crate::autosave::DraftSaver) implementation) all go
//! through it.
//!
//! ```text
//! ┌──────────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │      Handlers        │    │   Operations    │    │    Database     │
//! │ (listing_handlers)   │───▶│ (listing_ops,   │───▶│   (via db/)     │
//! │                      │    │  profile_ops)   │    │                 │
//! └──────────────────────┘    └─────────────────┘    └─────────────────┘
//!     Validation, wrappers       spawn_blocking         SQLite queries
//! ```
//!
//! Every operation opens its own connection on a blocking thread, so a
//! `Marketplace` is cheap to clone and share.
//!
//! # Examples
//!
//! ```rust,no_run
//! use paddock_core::{MarketplaceBuilder, models::ListingField, params::{CreateDraft, UpdateField}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let marketplace = MarketplaceBuilder::new()
//!     .with_database_path(Some("/tmp/paddock.db"))
//!     .build()
//!     .await?;
//!
//! let draft = marketplace.create_draft(&CreateDraft::default()).await?;
//! marketplace
//!     .update_listing_field(&UpdateField {
//!         id: draft.id,
//!         field: ListingField::HorseName.key().to_string(),
//!         value: "Star".to_string(),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

pub mod builder;
pub mod listing_handlers;
pub mod listing_ops;
pub mod profile_ops;


pub use builder::MarketplaceBuilder;
pub use profile_ops::ProfileSaved;

/// Handle to the listing store.
#[derive(Debug, Clone)]
pub struct Marketplace {
    pub(crate) db_path: PathBuf,
}

impl Marketplace {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Location of the SQLite database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }
}
