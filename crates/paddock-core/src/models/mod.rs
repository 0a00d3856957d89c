//! Data models for listings and profiles.
//!
//! This module contains the core domain models of the marketplace. Display
//! implementations for these models are located in [`crate::display::models`]
//! to keep data structures apart from presentation.
//!
//! The central type is [`ListingData`]: a struct of optional, typed fields
//! describing one horse. [`ListingField`] names each of those fields and is
//! the only way the wizard reads presence or writes values, which keeps
//! validation and completion checks exhaustive.
//!
//! # Examples
//!
//! ```rust
//! use paddock_core::models::{ListingData, ListingField};
//!
//! let mut data = ListingData::default();
//! assert!(data.is_empty());
//!
//! data.set(ListingField::HorseName, "Star").unwrap();
//! data.set(ListingField::Sex, "mare").unwrap();
//! data.set(ListingField::Disciplines, "dressage, trail").unwrap();
//!
//! assert!(data.has_identity());
//! assert_eq!(data.disciplines, vec!["dressage", "trail"]);
//! ```

pub mod field;
pub mod filters;
pub mod listing;
pub mod profile;
pub mod status;
pub mod summary;


pub use field::ListingField;
pub use filters::ListingFilter;
pub use listing::{Listing, ListingData};
pub use profile::Profile;
pub use status::{HorseSex, ListingStatus, ListingType, UserRole, Visibility};
pub use summary::ListingSummary;
