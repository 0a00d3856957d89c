//! Display formatting for listings, profiles and wizard state.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes are wrapped in newtypes so each context gets its
//! own formatting. Everything renders as markdown, which the CLI feeds to a
//! terminal skin and the MCP server returns verbatim.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │ (Listing, ...)  │───▶│ Result Types    │───▶│ (Terminal/MCP)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: [`ListingSummaries`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`]
//! - [`progress`]: [`StepProgress`], [`MissingFields`] and the completion report
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`], [`LocalDate`]
//!
//! ```rust
//! use paddock_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Backup cleared");
//! assert_eq!(status.to_string(), "Success: Backup cleared\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod progress;
pub mod results;
pub mod status;

pub use collections::{ListingSummaries, format_listing_list};
pub use datetime::{LocalDate, LocalDateTime};
pub use progress::{MissingFields, StepLine, StepProgress, StepState};
pub use results::{CreateResult, DeleteResult, Headline, UpdateResult};
pub use status::OperationStatus;
