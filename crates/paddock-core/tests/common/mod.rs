#![allow(dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use paddock_core::{
    DraftSaver, ListingData, ListingError, ListingField, Marketplace, MarketplaceBuilder, Result,
    params::SaveDraft,
};
use tempfile::TempDir;

/// Helper function to create a test marketplace
pub async fn create_test_marketplace() -> (TempDir, Marketplace) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let marketplace = MarketplaceBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create marketplace");
    (temp_dir, marketplace)
}

/// Listing data with every field publishing requires.
pub fn publishable_data() -> ListingData {
    let mut data = ListingData::default();
    data.set(ListingField::HorseName, "Star").unwrap();
    data.set(ListingField::Sex, "mare").unwrap();
    data.set(ListingField::Location, "Ohio").unwrap();
    data
}

/// Saver that counts calls and can be told to fail or to answer slowly.
#[derive(Clone, Default)]
pub struct CountingSaver {
    pub saves: Arc<AtomicUsize>,
    /// Saves that created a new draft
    pub creates: Arc<AtomicUsize>,
    pub deletes: Arc<AtomicUsize>,
    pub publishes: Arc<AtomicUsize>,
    pub failing: Arc<AtomicBool>,
    /// Delete and publish take half a second
    pub slow: Arc<AtomicBool>,
}

impl CountingSaver {
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_slow(&self, slow: bool) {
        self.slow.store(slow, Ordering::SeqCst);
    }

    async fn pause(&self) {
        if self.slow.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }
}

impl DraftSaver for CountingSaver {
    async fn save_draft(&self, params: SaveDraft) -> Result<u64> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ListingError::Save {
                message: "store unavailable".to_string(),
            });
        }
        if params.id.is_none() {
            self.creates.fetch_add(1, Ordering::SeqCst);
        }
        Ok(params.id.unwrap_or(42))
    }

    async fn delete_draft(&self, _id: u64) -> Result<()> {
        self.pause().await;
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn publish_draft(&self, _id: u64) -> Result<()> {
        self.pause().await;
        self.publishes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
