//! Debounced persistence of in-progress listings.
//!
//! Two independent sinks receive every settled snapshot of the listing data:
//!
//! ```text
//!                      ┌──────────────┐    ┌──────────────┐
//!                 ┌───▶│ 1 s debounce │───▶│ LocalBackup  │  (always)
//! ┌─────────────┐ │    └──────────────┘    └──────────────┘
//! │ ListingData │─┤
//! └─────────────┘ │    ┌──────────────┐    ┌──────────────┐    ┌────────────┐
//!                 └───▶│ 5 s debounce │───▶│ AutoSave     │───▶│ DraftSaver │
//!                      └──────────────┘    │ Coordinator  │    └────────────┘
//!                                          └──────────────┘   (if significant)
//! ```
//!
//! There is no ordering between the sinks and each keeps its own last
//! writer. The wiring lives in [`crate::wizard::WizardSession`].

pub mod backup;
pub mod coordinator;
pub mod debounce;
pub mod retry;
pub mod storage;

pub use backup::{BackupEntry, BackupMetadata, BackupStatus, LocalBackup};
pub use coordinator::{AutoSaveCoordinator, AutoSaveOutcome, DraftSaver};
pub use debounce::{AbortOnDrop, Debouncer};
pub use retry::{RetryPolicy, retry_with_backoff};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage};
