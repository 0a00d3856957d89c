mod common;

use common::{create_test_marketplace, publishable_data};
use paddock_core::{
    ListingError, ListingField, ListingStatus, MemoryStorage, WizardConfig, WizardSession,
    params::{CreateDraft, DiscardListing, Id, ListListings, SearchListings},
    wizard::{NavigationSave, StepRegistry},
};

#[tokio::test]
async fn test_complete_listing_workflow() {
    let (_temp_dir, marketplace) = create_test_marketplace().await;
    let config = WizardConfig::default().with_autosave(false);

    let mut session = WizardSession::new(marketplace.clone(), MemoryStorage::new(), config, Some("u1".to_string()));
    session.update(ListingField::ListingType, "sale").unwrap();

    // leaving a dirty step creates the draft at the target step
    let change = session.next_step().await;
    let NavigationSave::Saved(id) = change.save else {
        panic!("Expected a save, got {:?}", change.save);
    };
    let stored = marketplace.show_listing(&Id { id }).await.unwrap().unwrap();
    assert_eq!(stored.current_step, 2);
    assert_eq!(stored.status, ListingStatus::Draft);
    assert_eq!(stored.owner_id.as_deref(), Some("u1"));

    // owners skip the agent step
    assert_eq!(session.next_step().await.to, 4);
    for (field, value) in [
        (ListingField::HorseName, "Star"),
        (ListingField::Sex, "mare"),
        (ListingField::Location, "Ohio"),
        (ListingField::Breed, "Morgan"),
    ] {
        session.update(field, value).unwrap();
    }
    assert!(session.validate().is_empty());

    let published_id = session.publish().await.unwrap();
    assert_eq!(published_id, id);

    let published = marketplace.show_listing(&Id { id }).await.unwrap().unwrap();
    assert_eq!(published.status, ListingStatus::Published);
    assert_eq!(published.data.breed.as_deref(), Some("Morgan"));
    assert_eq!(published.current_step, 4);

    let listed = marketplace
        .search_listings_summary(&SearchListings {
            breed: Some("morgan".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_resumed_session_keeps_draft_and_step() {
    let (_temp_dir, marketplace) = create_test_marketplace().await;
    let registry = StepRegistry::default();

    let draft = marketplace.create_draft(&CreateDraft::default()).await.unwrap();
    marketplace.next_step(&Id { id: draft.id }, &registry).await.unwrap();
    let stored = marketplace.show_listing(&Id { id: draft.id }).await.unwrap().unwrap();

    let config = WizardConfig::default().with_autosave(false);
    let mut session = WizardSession::resume(marketplace.clone(), MemoryStorage::new(), config, stored);
    assert_eq!(session.draft_id(), Some(draft.id));
    assert_eq!(session.current_step(), 2);
    assert!(!session.has_unsaved_changes().await);

    session.update(ListingField::UserRole, "agent").unwrap();
    let change = session.next_step().await;
    assert_eq!(change.to, 3);
    assert_eq!(change.save, NavigationSave::Saved(draft.id));

    let drafts = marketplace
        .list_listings_summary(&ListListings { drafts: true })
        .await
        .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts.0[0].current_step, 3);
}

#[tokio::test]
async fn test_session_discard_deletes_remote_draft() {
    let (_temp_dir, marketplace) = create_test_marketplace().await;
    let config = WizardConfig::default().with_autosave(false);
    let mut session = WizardSession::new(marketplace.clone(), MemoryStorage::new(), config, None);

    session.replace(publishable_data());
    let id = session.save_draft().await.unwrap();
    assert!(marketplace.show_listing(&Id { id }).await.unwrap().is_some());

    session.discard().await.unwrap();
    assert!(session.draft_id().is_none());
    assert!(session.data().is_empty());
    assert!(marketplace.show_listing(&Id { id }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_discard_unknown_listing_returns_none() {
    let (_temp_dir, marketplace) = create_test_marketplace().await;
    let result = marketplace
        .discard_listing(&DiscardListing {
            id: 404,
            confirmed: true,
        })
        .await
        .unwrap();
    assert!(result.is_none());

    let missing = marketplace.listing_progress(&Id { id: 404 }).await;
    assert!(matches!(missing, Err(ListingError::ListingNotFound { id: 404 })));
}
