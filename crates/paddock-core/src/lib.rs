//! Core library for the Paddock horse listing marketplace.
//!
//! This crate holds the business logic behind the "create listing" wizard:
//! the listing data model and its SQLite store, the step flow with its
//! conditional agent step, validation and completion estimates, and the two
//! independent persistence paths (a fast local backup and a slower remote
//! autosave) that keep in-progress drafts from being lost.
//!
//! # Layout
//!
//! - [`models`]: listing data, listing records, profiles and filters
//! - [`db`]: SQLite persistence standing in for the hosted store
//! - [`marketplace`]: async API over the store ([`Marketplace`])
//! - [`wizard`]: steps, navigation, guard, validation, completion and the
//!   [`WizardSession`] that ties them together
//! - [`autosave`]: debouncing, local backups and the autosave coordinator
//! - [`tagline`]: listing copy from generated text or fallbacks
//! - [`display`]: markdown formatting for every output
//!
//! # Quick Start
//!
//! ```rust
//! use paddock_core::{
//!     MarketplaceBuilder,
//!     params::{Id, ListListings, UpdateField},
//!     wizard::StepRegistry,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let marketplace = MarketplaceBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let draft = marketplace.create_draft(&Default::default()).await?;
//! for (field, value) in [("horseName", "Star"), ("sex", "mare"), ("location", "Ohio")] {
//!     marketplace
//!         .update_listing_field(&UpdateField {
//!             id: draft.id,
//!             field: field.to_string(),
//!             value: value.to_string(),
//!         })
//!         .await?;
//! }
//!
//! let listing = marketplace
//!     .publish_listing(&Id { id: draft.id }, &StepRegistry::default())
//!     .await?;
//! println!("{listing}");
//!
//! let published = marketplace.list_listings_summary(&ListListings::default()).await?;
//! println!("{published}");
//! # Ok(())
//! # }
//! ```

pub mod autosave;
pub mod db;
pub mod display;
pub mod error;
pub mod marketplace;
pub mod models;
pub mod params;
pub mod tagline;
pub mod wizard;

// Re-export commonly used types
pub use autosave::{DraftSaver, KeyValueStorage, MemoryStorage, SqliteStorage};
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, ListingSummaries, MissingFields, OperationStatus, StepProgress,
    UpdateResult,
};
pub use error::{ListingError, Result};
pub use marketplace::{Marketplace, MarketplaceBuilder, ProfileSaved};
pub use models::{
    HorseSex, Listing, ListingData, ListingField, ListingFilter, ListingStatus, ListingSummary,
    ListingType, Profile, UserRole, Visibility,
};
pub use tagline::{GeneratedCopy, generate_copy};
pub use wizard::{StepFlow, StepRegistry, WizardConfig, WizardSession};
