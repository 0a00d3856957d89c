mod common;

use common::{CountingSaver, publishable_data};
use paddock_core::{
    ListingData, ListingError, ListingField, MemoryStorage, StepFlow, WizardConfig, WizardSession,
    wizard::{
        GuardChoice, GuardResolution, NavigationDecision, StepNavigator, StepRegistry,
        estimate_completion, guard::UNLOAD_MESSAGE, validate_listing_with_steps,
    },
};

fn agent_data() -> ListingData {
    let mut data = ListingData::default();
    data.set(ListingField::UserRole, "agent").unwrap();
    data
}

#[test]
fn test_owner_skips_agent_info() {
    let data = ListingData::default();
    let mut navigator = StepNavigator::starting_at(StepRegistry::default(), 2);
    assert_eq!(navigator.next_step(&data), 4);
    assert_eq!(navigator.prev_step(&data), 2);
}

#[test]
fn test_agent_visits_agent_info() {
    let data = agent_data();
    let mut navigator = StepNavigator::starting_at(StepRegistry::default(), 2);
    assert_eq!(navigator.next_step(&data), 3);
    assert_eq!(navigator.next_step(&data), 4);
    assert_eq!(navigator.prev_step(&data), 3);
}

#[test]
fn test_round_trip_returns_to_first_step() {
    for flow in [StepFlow::Consolidated, StepFlow::Legacy] {
        for data in [ListingData::default(), agent_data()] {
            let registry = StepRegistry::new(flow);
            let mut navigator = StepNavigator::new(registry);
            let moves = registry.len() as usize + 3;

            for _ in 0..moves {
                navigator.next_step(&data);
            }
            assert_eq!(navigator.current(), registry.len(), "{flow} should stop at the last step");

            for _ in 0..moves {
                navigator.prev_step(&data);
            }
            assert_eq!(navigator.current(), 1, "{flow} should return to step 1");
        }
    }
}

#[test]
fn test_empty_listing_fails_validation_on_basic_info() {
    for flow in [StepFlow::Consolidated, StepFlow::Legacy] {
        let registry = StepRegistry::new(flow);
        let results = validate_listing_with_steps(&ListingData::default(), &registry);

        let fields: Vec<_> = results.iter().map(|r| r.field).collect();
        assert_eq!(
            fields,
            vec![ListingField::HorseName, ListingField::Sex, ListingField::Location]
        );
        for result in &results {
            assert_eq!(result.step_id, 4);
            assert_eq!(result.step_title, registry.title_for(4));
        }
    }
}

#[test]
fn test_basic_info_validates_clean() {
    assert!(validate_listing_with_steps(&publishable_data(), &StepRegistry::default()).is_empty());
}

#[test]
fn test_completion_grows_with_fields() {
    let mut data = ListingData::default();
    let mut previous = estimate_completion(&data).percentage;
    for (field, value) in [
        (ListingField::HorseName, "Star"),
        (ListingField::Tagline, "Sweet mare"),
        (ListingField::Price, "4000"),
        (ListingField::Videos, "ride.mp4"),
        (ListingField::Location, "Ohio"),
    ] {
        data.set(field, value).unwrap();
        let percentage = estimate_completion(&data).percentage;
        assert!(percentage >= previous);
        previous = percentage;
    }
}

#[tokio::test]
async fn test_guard_blocks_until_saved() {
    let saver = CountingSaver::default();
    let config = WizardConfig::default().with_autosave(false);
    let mut session = WizardSession::new(saver.clone(), MemoryStorage::new(), config, None);

    assert_eq!(
        session.request_navigation("/listings/new", "/home").await,
        NavigationDecision::Proceed
    );
    assert!(session.before_unload().await.is_none());

    session.update(ListingField::HorseName, "Star").unwrap();
    let NavigationDecision::Blocked(pending) = session.request_navigation("/listings/new", "/home").await
    else {
        panic!("Navigation with unsaved changes should be blocked");
    };
    assert_eq!(session.pending_navigation(), Some(&pending));
    assert_eq!(
        session.before_unload().await.map(|p| p.return_value),
        Some(UNLOAD_MESSAGE.to_string())
    );

    let resolution = session.resolve_navigation(pending, GuardChoice::Save).await.unwrap();
    assert_eq!(resolution, GuardResolution::SaveThenNavigate("/home".to_string()));
    assert_eq!(saver.save_count(), 1);
    assert!(session.pending_navigation().is_none());
    assert!(session.before_unload().await.is_none());
}

#[tokio::test]
async fn test_guard_cancel_and_discard() {
    let saver = CountingSaver::default();
    let config = WizardConfig::default().with_autosave(false);
    let mut session = WizardSession::new(saver.clone(), MemoryStorage::new(), config, None);
    session.update(ListingField::Breed, "Morgan").unwrap();

    let NavigationDecision::Blocked(pending) = session.request_navigation("/a", "/b").await else {
        panic!("Navigation should be blocked");
    };
    let stay = session.resolve_navigation(pending.clone(), GuardChoice::Cancel).await.unwrap();
    assert_eq!(stay, GuardResolution::Stay);

    let leave = session.resolve_navigation(pending, GuardChoice::Discard).await.unwrap();
    assert_eq!(leave, GuardResolution::NavigateWithoutSaving("/b".to_string()));
    assert_eq!(saver.save_count(), 0);
}

#[tokio::test]
async fn test_failed_save_still_moves_step() {
    let saver = CountingSaver::default();
    saver.set_failing(true);
    let config = WizardConfig::default()
        .with_autosave(false)
        .with_retry(paddock_core::autosave::RetryPolicy::none());
    let mut session = WizardSession::new(saver.clone(), MemoryStorage::new(), config, None);
    session.update(ListingField::ListingType, "lease").unwrap();

    let change = session.next_step().await;
    assert!(change.moved());
    assert!(matches!(change.save, paddock_core::wizard::NavigationSave::Failed(_)));
    assert_eq!(session.current_step(), 2);
    assert!(session.has_unsaved_changes().await);

    let explicit = session.save_draft().await;
    assert!(matches!(explicit, Err(ListingError::Save { .. })));
}
