//! Decides when debounced listing data is worth saving remotely.

use std::{fmt, future::Future};

use jiff::Timestamp;
use log::{debug, info, warn};
use tokio::sync::watch;

use super::retry::{RetryPolicy, retry_with_backoff};
use crate::{error::Result, models::ListingData, params::SaveDraft};

/// The remote side of a wizard session.
///
/// Saving without an id creates a draft and returns its id; later saves
/// overwrite it.
pub trait DraftSaver: Send + Sync {
    fn save_draft(&self, params: SaveDraft) -> impl Future<Output = Result<u64>> + Send;

    /// Deletes a draft for good.
    fn delete_draft(&self, id: u64) -> impl Future<Output = Result<()>> + Send;

    /// Makes a saved draft public.
    fn publish_draft(&self, id: u64) -> impl Future<Output = Result<()>> + Send;
}

/// Result of one automatic save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoSaveOutcome {
    /// Automatic saving is switched off
    Disabled,
    /// Nothing significant changed since the last save
    Skipped,
    /// The draft was saved under this id
    Saved(u64),
    /// The saver failed; the baseline is unchanged so the next tick retries
    Failed(String),
}

impl fmt::Display for AutoSaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoSaveOutcome::Disabled => write!(f, "autosave disabled"),
            AutoSaveOutcome::Skipped => write!(f, "no changes to save"),
            AutoSaveOutcome::Saved(id) => write!(f, "saved draft {id}"),
            AutoSaveOutcome::Failed(message) => write!(f, "save failed: {message}"),
        }
    }
}

/// Tracks the last saved snapshot and triggers saves through a [`DraftSaver`].
pub struct AutoSaveCoordinator<S> {
    saver: S,
    enabled: bool,
    owner_id: Option<String>,
    retry: RetryPolicy,
    last_saved: Option<ListingData>,
    last_saved_step: Option<u32>,
    last_saved_at: Option<Timestamp>,
    draft_id: watch::Sender<Option<u64>>,
    /// Bumped by every reset; snapshots taken before a reset are stale
    epoch: watch::Sender<u64>,
}

impl<S: DraftSaver> AutoSaveCoordinator<S> {
    pub fn new(saver: S) -> Self {
        let (draft_id, _) = watch::channel(None);
        let (epoch, _) = watch::channel(0);
        Self {
            saver,
            enabled: true,
            owner_id: None,
            retry: RetryPolicy::default(),
            last_saved: None,
            last_saved_step: None,
            last_saved_at: None,
            draft_id,
            epoch,
        }
    }

    pub fn with_owner(mut self, owner_id: Option<String>) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Resumes an existing draft: `saved` becomes the baseline.
    pub fn with_draft(self, draft_id: u64, saved: ListingData, step: u32) -> Self {
        self.draft_id.send_replace(Some(draft_id));
        Self {
            last_saved: Some(saved),
            last_saved_step: Some(step),
            ..self
        }
    }

    /// True when `current` carries identity and differs from the baseline.
    pub fn has_significant_changes(current: &ListingData, last_saved: Option<&ListingData>) -> bool {
        current.has_identity() && last_saved != Some(current)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switches automatic saving on or off. Explicit saves are unaffected.
    pub fn set_enabled(&mut self, enabled: bool) {
        info!("Autosave {}", if enabled { "enabled" } else { "disabled" });
        self.enabled = enabled;
    }

    pub fn draft_id(&self) -> Option<u64> {
        *self.draft_id.borrow()
    }

    /// Receiver following the draft id as it becomes known.
    pub fn watch_draft_id(&self) -> watch::Receiver<Option<u64>> {
        self.draft_id.subscribe()
    }

    /// Number of resets so far.
    pub fn epoch(&self) -> u64 {
        *self.epoch.borrow()
    }

    /// Receiver following the epoch across resets.
    pub fn watch_epoch(&self) -> watch::Receiver<u64> {
        self.epoch.subscribe()
    }

    pub fn last_saved(&self) -> Option<&ListingData> {
        self.last_saved.as_ref()
    }

    pub fn last_saved_at(&self) -> Option<Timestamp> {
        self.last_saved_at
    }

    /// True when `current` differs from what was last saved.
    pub fn is_dirty(&self, current: &ListingData) -> bool {
        match &self.last_saved {
            Some(saved) => saved != current,
            None => !current.is_empty(),
        }
    }

    /// Forgets the draft and baseline, e.g. after the draft was discarded.
    pub fn reset(&mut self) {
        self.epoch.send_modify(|epoch| *epoch += 1);
        self.draft_id.send_replace(None);
        self.last_saved = None;
        self.last_saved_step = None;
        self.last_saved_at = None;
    }

    fn params_for(&self, snapshot: &ListingData, current_step: Option<u32>) -> SaveDraft {
        SaveDraft {
            id: self.draft_id(),
            owner_id: self.owner_id.clone(),
            data: snapshot.clone(),
            current_step,
        }
    }

    fn record_saved(&mut self, id: u64, snapshot: &ListingData, current_step: Option<u32>) {
        self.draft_id.send_replace(Some(id));
        self.last_saved = Some(snapshot.clone());
        if current_step.is_some() {
            self.last_saved_step = current_step;
        }
        self.last_saved_at = Some(Timestamp::now());
    }

    /// Saves `snapshot` if autosave is on and the change is significant.
    pub async fn perform_auto_save(&mut self, snapshot: &ListingData) -> AutoSaveOutcome {
        if !self.enabled {
            return AutoSaveOutcome::Disabled;
        }

        if !Self::has_significant_changes(snapshot, self.last_saved.as_ref()) {
            debug!("Autosave skipped, no significant changes");
            return AutoSaveOutcome::Skipped;
        }

        let params = self.params_for(snapshot, None);
        match self.saver.save_draft(params).await {
            Ok(id) => {
                debug!("Autosaved draft {id}");
                self.record_saved(id, snapshot, None);
                AutoSaveOutcome::Saved(id)
            }
            Err(e) => {
                warn!("Autosave failed: {e}");
                AutoSaveOutcome::Failed(e.to_string())
            }
        }
    }

    /// Like [`perform_auto_save`](Self::perform_auto_save) for a snapshot
    /// taken during `epoch`. Snapshots from before the last reset are skipped
    /// so a discarded or published listing is never saved again.
    pub async fn perform_auto_save_at(
        &mut self,
        epoch: u64,
        snapshot: &ListingData,
    ) -> AutoSaveOutcome {
        if epoch != self.epoch() {
            debug!("Autosave skipped, snapshot predates reset");
            return AutoSaveOutcome::Skipped;
        }
        self.perform_auto_save(snapshot).await
    }

    /// Explicit save. Skips the saver only when neither the data nor the step
    /// changed since the last save of an existing draft. Transient failures
    /// are retried according to the retry policy.
    pub async fn save_now(&mut self, snapshot: &ListingData, current_step: Option<u32>) -> Result<u64> {
        if let Some(id) = self.draft_id()
            && self.last_saved.as_ref() == Some(snapshot)
            && (current_step.is_none() || current_step == self.last_saved_step)
        {
            debug!("Draft {id} already up to date");
            return Ok(id);
        }

        let params = self.params_for(snapshot, current_step);
        let saver = &self.saver;
        let id = retry_with_backoff(&self.retry, || saver.save_draft(params.clone())).await?;

        info!("Saved draft {id}");
        self.record_saved(id, snapshot, current_step);
        Ok(id)
    }

    /// Saves pending changes, then publishes the draft.
    pub async fn publish(&mut self, snapshot: &ListingData, current_step: u32) -> Result<u64> {
        let id = self.save_now(snapshot, Some(current_step)).await?;
        self.saver.publish_draft(id).await?;
        self.reset();
        Ok(id)
    }

    /// Deletes the remote draft, if one was created, and forgets it.
    pub async fn discard(&mut self) -> Result<()> {
        if let Some(id) = self.draft_id() {
            self.saver.delete_draft(id).await?;
            info!("Deleted draft {id}");
        }
        self.reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{error::ListingError, models::ListingField};

    #[derive(Clone, Default)]
    struct CountingSaver {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl DraftSaver for CountingSaver {
        async fn save_draft(&self, params: SaveDraft) -> Result<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ListingError::ListingNotFound { id: 0 });
            }
            Ok(params.id.unwrap_or(11))
        }

        async fn delete_draft(&self, _id: u64) -> Result<()> {
            Ok(())
        }

        async fn publish_draft(&self, _id: u64) -> Result<()> {
            Ok(())
        }
    }

    fn named(name: &str) -> ListingData {
        let mut data = ListingData::default();
        data.set(ListingField::HorseName, name).unwrap();
        data
    }

    #[test]
    fn test_significance_requires_identity() {
        let mut data = ListingData::default();
        data.set(ListingField::Color, "bay").unwrap();
        data.set(ListingField::Price, "5000").unwrap();
        assert!(!AutoSaveCoordinator::<CountingSaver>::has_significant_changes(&data, None));

        data.set(ListingField::Breed, "Arabian").unwrap();
        assert!(AutoSaveCoordinator::<CountingSaver>::has_significant_changes(&data, None));
        assert!(!AutoSaveCoordinator::<CountingSaver>::has_significant_changes(
            &data,
            Some(&data.clone())
        ));
    }

    #[tokio::test]
    async fn test_disabled_never_calls_saver() {
        let saver = CountingSaver::default();
        let mut coordinator = AutoSaveCoordinator::new(saver.clone());
        coordinator.set_enabled(false);

        assert_eq!(coordinator.perform_auto_save(&named("Star")).await, AutoSaveOutcome::Disabled);
        assert_eq!(saver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_saves_once_per_distinct_snapshot() {
        let saver = CountingSaver::default();
        let mut coordinator = AutoSaveCoordinator::new(saver.clone());

        let data = named("Star");
        assert_eq!(coordinator.perform_auto_save(&data).await, AutoSaveOutcome::Saved(11));
        assert_eq!(coordinator.perform_auto_save(&data).await, AutoSaveOutcome::Skipped);
        assert_eq!(coordinator.draft_id(), Some(11));
        assert_eq!(saver.calls.load(Ordering::SeqCst), 1);

        assert_eq!(
            coordinator.perform_auto_save(&named("Starlight")).await,
            AutoSaveOutcome::Saved(11)
        );
        assert_eq!(saver.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_baseline() {
        let saver = CountingSaver {
            fail: true,
            ..Default::default()
        };
        let mut coordinator = AutoSaveCoordinator::new(saver.clone());

        let data = named("Star");
        assert!(matches!(
            coordinator.perform_auto_save(&data).await,
            AutoSaveOutcome::Failed(_)
        ));
        assert!(coordinator.last_saved().is_none());
        assert!(matches!(
            coordinator.perform_auto_save(&data).await,
            AutoSaveOutcome::Failed(_)
        ));
        assert_eq!(saver.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_save_now_skips_unchanged_draft() {
        let saver = CountingSaver::default();
        let mut coordinator = AutoSaveCoordinator::new(saver.clone());

        let data = named("Star");
        assert_eq!(coordinator.save_now(&data, Some(4)).await.unwrap(), 11);
        assert_eq!(coordinator.save_now(&data, Some(4)).await.unwrap(), 11);
        assert_eq!(saver.calls.load(Ordering::SeqCst), 1);

        coordinator.save_now(&data, Some(5)).await.unwrap();
        assert_eq!(saver.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_discard_forgets_draft() {
        let mut coordinator = AutoSaveCoordinator::new(CountingSaver::default());
        coordinator.save_now(&named("Star"), None).await.unwrap();
        assert_eq!(coordinator.draft_id(), Some(11));

        coordinator.discard().await.unwrap();
        assert_eq!(coordinator.draft_id(), None);
        assert!(coordinator.last_saved().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_from_before_reset_is_not_saved() {
        let saver = CountingSaver::default();
        let mut coordinator = AutoSaveCoordinator::new(saver.clone());
        coordinator.save_now(&named("Star"), None).await.unwrap();

        let epoch = coordinator.epoch();
        coordinator.discard().await.unwrap();
        assert_eq!(coordinator.epoch(), epoch + 1);

        assert_eq!(
            coordinator.perform_auto_save_at(epoch, &named("Starlight")).await,
            AutoSaveOutcome::Skipped
        );
        assert_eq!(coordinator.draft_id(), None);
        assert_eq!(saver.calls.load(Ordering::SeqCst), 1);

        assert_eq!(
            coordinator.perform_auto_save_at(epoch + 1, &named("Starlight")).await,
            AutoSaveOutcome::Saved(11)
        );
    }

    #[tokio::test]
    async fn test_save_now_ignores_significance() {
        let saver = CountingSaver::default();
        let mut coordinator = AutoSaveCoordinator::new(saver.clone());

        let mut data = ListingData::default();
        data.set(ListingField::Color, "grey").unwrap();
        coordinator.save_now(&data, None).await.unwrap();
        assert_eq!(saver.calls.load(Ordering::SeqCst), 1);
        assert!(!coordinator.is_dirty(&data));
    }
}
