//! The wizard state container.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{Mutex, watch};

use super::{
    completion::{CompletionReport, estimate_completion},
    config::WizardConfig,
    guard::{GuardChoice, GuardResolution, NavigationDecision, NavigationGuard, PendingNavigation, UnloadPrompt},
    navigation::StepNavigator,
    steps::{StepDefinition, StepRegistry},
    validation::{ValidationResult, Validator},
};
use crate::{
    autosave::{
        AbortOnDrop, AutoSaveCoordinator, AutoSaveOutcome, BackupEntry, BackupStatus, Debouncer,
        DraftSaver, KeyValueStorage, LocalBackup,
    },
    error::{ListingError, Result},
    models::{Listing, ListingData, ListingField},
};

/// What happened to the draft while changing steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationSave {
    /// Nothing needed saving
    NotNeeded,
    Saved(u64),
    /// The save failed but the step changed anyway; the local backup still
    /// holds the data
    Failed(String),
}

/// Result of a step change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepChange {
    pub from: u32,
    pub to: u32,
    pub save: NavigationSave,
}

impl StepChange {
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// Listing data tagged with the coordinator epoch it was taken in.
type Snapshot = (u64, ListingData);

/// One user's pass through the listing wizard.
///
/// The session exclusively owns the listing data; every change goes through
/// [`update`](Self::update), [`clear`](Self::clear) or
/// [`replace`](Self::replace), which feed the backup and autosave debouncers.
/// Background tasks belong to the session and stop when it is dropped. An
/// automatic save that is already running at that point is not awaited.
///
/// Construct sessions inside a tokio runtime.
pub struct WizardSession<S, K> {
    config: WizardConfig,
    data: ListingData,
    navigator: StepNavigator,
    guard: NavigationGuard,
    validator: Validator,
    autosave: Arc<Mutex<AutoSaveCoordinator<S>>>,
    backup: Arc<Mutex<LocalBackup<K>>>,
    draft_id: watch::Receiver<Option<u64>>,
    epoch: watch::Receiver<u64>,
    autosave_outcome: watch::Receiver<Option<AutoSaveOutcome>>,
    backup_debouncer: Debouncer<Snapshot>,
    autosave_debouncer: Debouncer<Snapshot>,
    _workers: Vec<AbortOnDrop>,
}

impl<S, K> WizardSession<S, K>
where
    S: DraftSaver + 'static,
    K: KeyValueStorage + 'static,
{
    /// Starts a session for a new, empty listing.
    pub fn new(saver: S, storage: K, config: WizardConfig, owner_id: Option<String>) -> Self {
        let coordinator = AutoSaveCoordinator::new(saver).with_owner(owner_id);
        let navigator = StepNavigator::new(StepRegistry::new(config.flow));
        Self::start(coordinator, storage, config, navigator, ListingData::default())
    }

    /// Continues editing an existing draft.
    pub fn resume(saver: S, storage: K, config: WizardConfig, listing: Listing) -> Self {
        let coordinator = AutoSaveCoordinator::new(saver)
            .with_owner(listing.owner_id.clone())
            .with_draft(listing.id, listing.data.clone(), listing.current_step);
        let navigator = StepNavigator::starting_at(StepRegistry::new(config.flow), listing.current_step);
        info!("Resuming draft {} at step {}", listing.id, navigator.current());
        Self::start(coordinator, storage, config, navigator, listing.data)
    }

    fn start(
        coordinator: AutoSaveCoordinator<S>,
        storage: K,
        config: WizardConfig,
        navigator: StepNavigator,
        data: ListingData,
    ) -> Self {
        let mut coordinator = coordinator.with_retry(config.retry);
        coordinator.set_enabled(config.autosave_enabled);
        let draft_id = coordinator.watch_draft_id();
        let epoch = coordinator.watch_epoch();

        let autosave = Arc::new(Mutex::new(coordinator));
        let backup = Arc::new(Mutex::new(LocalBackup::new(storage)));
        let backup_debouncer: Debouncer<Snapshot> = Debouncer::new(config.backup_interval);
        let autosave_debouncer: Debouncer<Snapshot> = Debouncer::new(config.autosave_interval);
        let (outcome_tx, autosave_outcome) = watch::channel(None);

        let backup_worker = {
            let mut settled = backup_debouncer.subscribe();
            let backup = Arc::clone(&backup);
            let draft_id = draft_id.clone();
            let epoch = epoch.clone();
            tokio::spawn(async move {
                while settled.changed().await.is_ok() {
                    let Some((taken_in, snapshot)) = settled.borrow_and_update().clone() else {
                        continue;
                    };
                    if snapshot.is_empty() {
                        continue;
                    }
                    let mut backup = backup.lock().await;
                    if *epoch.borrow() != taken_in {
                        debug!("Dropping backup of a discarded listing");
                        continue;
                    }
                    let id = *draft_id.borrow();
                    backup.save_backup(&snapshot, id);
                }
            })
        };

        let autosave_worker = {
            let mut settled = autosave_debouncer.subscribe();
            let autosave = Arc::clone(&autosave);
            tokio::spawn(async move {
                while settled.changed().await.is_ok() {
                    let Some((taken_in, snapshot)) = settled.borrow_and_update().clone() else {
                        continue;
                    };
                    let outcome = autosave
                        .lock()
                        .await
                        .perform_auto_save_at(taken_in, &snapshot)
                        .await;
                    debug!("Autosave tick: {outcome}");
                    outcome_tx.send_replace(Some(outcome));
                }
            })
        };

        Self {
            config,
            data,
            navigator,
            guard: NavigationGuard::new(),
            validator: Validator::default(),
            autosave,
            backup,
            draft_id,
            epoch,
            autosave_outcome,
            backup_debouncer,
            autosave_debouncer,
            _workers: vec![AbortOnDrop::new(backup_worker), AbortOnDrop::new(autosave_worker)],
        }
    }

    pub fn data(&self) -> &ListingData {
        &self.data
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn registry(&self) -> &StepRegistry {
        self.navigator.registry()
    }

    pub fn current_step(&self) -> u32 {
        self.navigator.current()
    }

    pub fn current_definition(&self) -> Option<&StepDefinition> {
        self.navigator.registry().get(self.navigator.current())
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    /// Id of the remote draft, once one exists.
    pub fn draft_id(&self) -> Option<u64> {
        *self.draft_id.borrow()
    }

    /// Receiver of automatic save outcomes.
    pub fn autosave_outcomes(&self) -> watch::Receiver<Option<AutoSaveOutcome>> {
        self.autosave_outcome.clone()
    }

    pub fn pending_navigation(&self) -> Option<&PendingNavigation> {
        self.guard.pending()
    }

    /// Sets one field from its textual form.
    pub fn update(&mut self, field: ListingField, raw: &str) -> Result<()> {
        self.data.set(field, raw)?;
        self.data_changed();
        Ok(())
    }

    pub fn clear(&mut self, field: ListingField) {
        self.data.clear(field);
        self.data_changed();
    }

    /// Replaces the whole listing data.
    pub fn replace(&mut self, data: ListingData) {
        self.data = data;
        self.data_changed();
    }

    fn data_changed(&self) {
        let epoch = *self.epoch.borrow();
        self.backup_debouncer.push((epoch, self.data.clone()));
        self.autosave_debouncer.push((epoch, self.data.clone()));
    }

    pub async fn has_unsaved_changes(&self) -> bool {
        self.autosave.lock().await.is_dirty(&self.data)
    }

    pub async fn set_autosave(&mut self, enabled: bool) {
        self.config.autosave_enabled = enabled;
        self.autosave.lock().await.set_enabled(enabled);
    }

    /// Saves the draft now and returns its id.
    pub async fn save_draft(&mut self) -> Result<u64> {
        let step = self.navigator.current();
        self.autosave.lock().await.save_now(&self.data, Some(step)).await
    }

    async fn move_to(&mut self, target: u32) -> StepChange {
        let from = self.navigator.current();
        if target == from {
            return StepChange {
                from,
                to: from,
                save: NavigationSave::NotNeeded,
            };
        }

        let save = {
            let mut autosave = self.autosave.lock().await;
            if autosave.is_dirty(&self.data) || autosave.draft_id().is_some() {
                match autosave.save_now(&self.data, Some(target)).await {
                    Ok(id) => NavigationSave::Saved(id),
                    Err(e) => {
                        warn!("Saving before leaving step {from} failed: {e}");
                        NavigationSave::Failed(e.to_string())
                    }
                }
            } else {
                NavigationSave::NotNeeded
            }
        };

        StepChange { from, to: target, save }
    }

    /// Saves if needed, then advances to the next visible step.
    pub async fn next_step(&mut self) -> StepChange {
        let target = self.navigator.peek_next(&self.data).unwrap_or(self.navigator.current());
        let change = self.move_to(target).await;
        self.navigator.next_step(&self.data);
        change
    }

    /// Saves if needed, then goes back to the previous visible step.
    pub async fn prev_step(&mut self) -> StepChange {
        let target = self.navigator.peek_prev(&self.data).unwrap_or(self.navigator.current());
        let change = self.move_to(target).await;
        self.navigator.prev_step(&self.data);
        change
    }

    /// Saves if needed, then jumps to `id`.
    pub async fn go_to_step(&mut self, id: u32) -> Result<StepChange> {
        let mut probe = self.navigator;
        probe.go_to(id, &self.data)?;

        let change = self.move_to(id).await;
        self.navigator = probe;
        Ok(change)
    }

    /// Checks a route change away from `current_path`.
    pub async fn request_navigation(&mut self, current_path: &str, target_path: &str) -> NavigationDecision {
        let has_unsaved = self.has_unsaved_changes().await;
        self.guard.request(current_path, target_path, has_unsaved)
    }

    /// Applies the user's choice for a blocked navigation. With
    /// [`GuardChoice::Save`] the draft is saved first; a failed save keeps
    /// the user on the page.
    pub async fn resolve_navigation(
        &mut self,
        pending: PendingNavigation,
        choice: GuardChoice,
    ) -> Result<GuardResolution> {
        let resolution = self.guard.resolve(pending, choice);
        if let GuardResolution::SaveThenNavigate(_) = resolution {
            self.save_draft().await?;
        }
        Ok(resolution)
    }

    pub async fn before_unload(&self) -> Option<UnloadPrompt> {
        let has_unsaved = self.has_unsaved_changes().await;
        self.guard.before_unload(has_unsaved)
    }

    pub fn validate(&self) -> Vec<ValidationResult> {
        self.validator.validate(&self.data, self.navigator.registry())
    }

    pub fn completion(&self) -> CompletionReport {
        estimate_completion(&self.data)
    }

    /// Looks for a local backup without loading it.
    pub async fn check_backup(&self) -> BackupStatus {
        self.backup.lock().await.check_existing()
    }

    pub async fn load_backup(&self) -> Option<BackupEntry> {
        self.backup.lock().await.load_entry()
    }

    /// Replaces the listing data with the local backup, if there is one.
    pub async fn restore_backup(&mut self) -> bool {
        let Some(entry) = self.load_backup().await else {
            return false;
        };
        info!("Restored listing data from local backup");
        self.replace(entry.data);
        true
    }

    /// Writes the current data to the local backup immediately.
    pub async fn backup_now(&self) -> bool {
        let id = self.draft_id();
        self.backup.lock().await.save_backup(&self.data, id)
    }

    fn reset(&mut self) {
        self.data = ListingData::default();
        self.navigator = StepNavigator::new(*self.navigator.registry());
        // supersede snapshots still waiting in the debouncers
        self.data_changed();
    }

    /// Throws the listing away: clears the backup and deletes the remote draft.
    pub async fn discard(&mut self) -> Result<()> {
        self.autosave.lock().await.discard().await?;
        self.backup.lock().await.clear_backup();
        self.reset();
        info!("Discarded listing");
        Ok(())
    }

    /// Validates, saves and publishes the listing, then drops it from the
    /// session. Refuses with [`ListingError::Incomplete`] while required fields
    /// are missing.
    pub async fn publish(&mut self) -> Result<u64> {
        let missing = self.validate();
        if !missing.is_empty() {
            return Err(ListingError::Incomplete {
                missing: missing.into_iter().map(|r| r.display_name).collect(),
            });
        }

        let step = self.navigator.current();
        let id = self.autosave.lock().await.publish(&self.data, step).await?;
        self.backup.lock().await.clear_backup();
        self.reset();
        info!("Published listing {id}");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{autosave::MemoryStorage, params::SaveDraft};

    #[derive(Clone, Default)]
    struct RecordingSaver {
        saves: Arc<AtomicUsize>,
        published: Arc<AtomicUsize>,
    }

    impl DraftSaver for RecordingSaver {
        async fn save_draft(&self, params: SaveDraft) -> Result<u64> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(params.id.unwrap_or(1))
        }

        async fn delete_draft(&self, _id: u64) -> Result<()> {
            Ok(())
        }

        async fn publish_draft(&self, _id: u64) -> Result<()> {
            self.published.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn session() -> (RecordingSaver, WizardSession<RecordingSaver, MemoryStorage>) {
        let saver = RecordingSaver::default();
        let session = WizardSession::new(saver.clone(), MemoryStorage::new(), WizardConfig::default(), None);
        (saver, session)
    }

    #[tokio::test]
    async fn test_clean_session_navigates_without_saving() {
        let (saver, mut session) = session();
        let change = session.next_step().await;
        assert_eq!((change.from, change.to), (1, 2));
        assert_eq!(change.save, NavigationSave::NotNeeded);
        assert_eq!(session.next_step().await.to, 4);
        assert_eq!(saver.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dirty_session_saves_before_moving() {
        let (saver, mut session) = session();
        session.update(ListingField::ListingType, "sale").unwrap();
        assert!(session.has_unsaved_changes().await);

        let change = session.next_step().await;
        assert_eq!(change.save, NavigationSave::Saved(1));
        assert_eq!(session.draft_id(), Some(1));
        assert_eq!(saver.saves.load(Ordering::SeqCst), 1);
        assert!(!session.has_unsaved_changes().await);
    }

    #[tokio::test]
    async fn test_publish_requires_basic_info() {
        let (saver, mut session) = session();
        let err = session.publish().await.unwrap_err();
        assert!(matches!(err, ListingError::Incomplete { ref missing } if missing.len() == 3));

        session.update(ListingField::HorseName, "Star").unwrap();
        session.update(ListingField::Sex, "mare").unwrap();
        session.update(ListingField::Location, "Ohio").unwrap();
        assert_eq!(session.publish().await.unwrap(), 1);
        assert_eq!(saver.published.load(Ordering::SeqCst), 1);
        assert!(session.data().is_empty());
        assert_eq!(session.current_step(), 1);
    }

    #[tokio::test]
    async fn test_go_to_hidden_step_is_rejected() {
        let (_saver, mut session) = session();
        assert!(session.go_to_step(3).await.is_err());
        assert_eq!(session.current_step(), 1);

        session.update(ListingField::UserRole, "agent").unwrap();
        assert_eq!(session.go_to_step(3).await.unwrap().to, 3);
    }
}
