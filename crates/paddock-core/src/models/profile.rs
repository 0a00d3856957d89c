//! Seller profile model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::UserRole;

/// Public profile of a marketplace user. Each user has at most one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Unique identifier for the profile
    pub id: u64,

    /// Identifier of the user owning the profile (unique)
    pub user_id: String,

    /// Name shown on listings
    pub display_name: String,

    /// Default role used for new listings
    #[serde(default)]
    pub role: UserRole,

    /// Contact phone
    pub phone: Option<String>,

    /// Timestamp when the profile was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the profile was last modified (UTC)
    pub updated_at: Timestamp,
}
