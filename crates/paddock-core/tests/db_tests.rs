use paddock_core::{
    Database, HorseSex, ListingData, ListingError, ListingField, ListingFilter, ListingStatus,
    UserRole, params::SaveProfile,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn data(fields: &[(ListingField, &str)]) -> ListingData {
    let mut data = ListingData::default();
    for (field, value) in fields {
        data.set(*field, value).expect("Failed to set field");
    }
    data
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());
    assert_eq!(db.schema_version().unwrap(), 1);

    // reopening an initialized store keeps it usable
    let reopened = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(reopened.schema_version().unwrap(), 1);
}

#[test]
fn test_newer_schema_is_refused() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    rusqlite::Connection::open(temp_file.path())
        .and_then(|conn| conn.pragma_update(None, "user_version", 99))
        .expect("Failed to prepare database");

    let err = Database::new(temp_file.path()).err().expect("newer schema must be refused");
    assert!(matches!(err, ListingError::Configuration { .. }));
    assert!(err.to_string().contains("version 99"));
}

#[test]
fn test_create_and_get_listing() {
    let (_temp_file, mut db) = create_test_db();
    let content = data(&[
        (ListingField::HorseName, "Star"),
        (ListingField::Disciplines, "trail, dressage"),
    ]);

    let listing = db
        .create_listing(Some("u1"), &content, 1)
        .expect("Failed to create listing");
    assert!(listing.id > 0);
    assert_eq!(listing.status, ListingStatus::Draft);
    assert!(listing.published_at.is_none());

    let fetched = db
        .get_listing(listing.id)
        .expect("Failed to get listing")
        .expect("Listing should exist");
    assert_eq!(fetched.data, content);
    assert_eq!(fetched.owner_id.as_deref(), Some("u1"));
    assert!(db.get_listing(listing.id + 100).unwrap().is_none());
}

#[test]
fn test_save_listing_keeps_step_when_not_given() {
    let (_temp_file, mut db) = create_test_db();
    let listing = db.create_listing(None, &ListingData::default(), 2).unwrap();

    let updated = db
        .save_listing(listing.id, &data(&[(ListingField::Breed, "Morgan")]), None)
        .unwrap();
    assert_eq!(updated.current_step, 2);
    assert_eq!(updated.data.breed.as_deref(), Some("Morgan"));

    let moved = db.save_listing(listing.id, &updated.data, Some(5)).unwrap();
    assert_eq!(moved.current_step, 5);

    let missing = db.save_listing(9999, &ListingData::default(), None);
    assert!(matches!(missing, Err(ListingError::ListingNotFound { id: 9999 })));
}

#[test]
fn test_publish_keeps_first_publication_time() {
    let (_temp_file, mut db) = create_test_db();
    let listing = db.create_listing(None, &ListingData::default(), 1).unwrap();

    let first = db.publish_listing(listing.id).unwrap().expect("Listing should exist");
    assert_eq!(first.status, ListingStatus::Published);
    let published_at = first.published_at.expect("Publication time should be set");

    let second = db.publish_listing(listing.id).unwrap().unwrap();
    assert_eq!(second.published_at, Some(published_at));

    assert!(db.publish_listing(9999).unwrap().is_none());
}

#[test]
fn test_set_current_step() {
    let (_temp_file, mut db) = create_test_db();
    let listing = db.create_listing(None, &ListingData::default(), 1).unwrap();

    let moved = db.set_current_step(listing.id, 4).unwrap().unwrap();
    assert_eq!(moved.current_step, 4);
    assert!(db.set_current_step(9999, 4).unwrap().is_none());
}

#[test]
fn test_delete_listing() {
    let (_temp_file, mut db) = create_test_db();
    let listing = db.create_listing(None, &ListingData::default(), 1).unwrap();

    db.delete_listing(listing.id).expect("Failed to delete listing");
    assert!(db.get_listing(listing.id).unwrap().is_none());
    assert!(matches!(
        db.delete_listing(listing.id),
        Err(ListingError::ListingNotFound { .. })
    ));
}

#[test]
fn test_list_listings_defaults_to_published() {
    let (_temp_file, mut db) = create_test_db();
    let draft = db.create_listing(None, &data(&[(ListingField::HorseName, "Draft")]), 1).unwrap();
    let public = db.create_listing(None, &data(&[(ListingField::HorseName, "Public")]), 1).unwrap();
    db.publish_listing(public.id).unwrap();

    let published = db.list_listings(None).unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id, public.id);

    let everything = db
        .list_listings(Some(&ListingFilter {
            include_drafts: true,
            ..Default::default()
        }))
        .unwrap();
    assert_eq!(everything.len(), 2);
    // most recently updated first
    assert_eq!(everything[0].id, public.id);
    assert_eq!(everything[1].id, draft.id);
}

#[test]
fn test_list_listings_filters() {
    let (_temp_file, mut db) = create_test_db();
    for fields in [
        [
            (ListingField::HorseName, "Star"),
            (ListingField::Sex, "mare"),
            (ListingField::Age, "8"),
            (ListingField::Disciplines, "Dressage"),
        ],
        [
            (ListingField::HorseName, "Duke"),
            (ListingField::Sex, "gelding"),
            (ListingField::Age, "15"),
            (ListingField::Disciplines, "Trail, Ranch"),
        ],
    ] {
        let listing = db.create_listing(None, &data(&fields), 1).unwrap();
        db.publish_listing(listing.id).unwrap();
    }

    let mares = db
        .list_listings(Some(&ListingFilter {
            sex: Some(HorseSex::Mare),
            ..Default::default()
        }))
        .unwrap();
    assert_eq!(mares.len(), 1);
    assert_eq!(mares[0].data.display_title(), "Star");

    let older = db
        .list_listings(Some(&ListingFilter {
            age_min: Some(10),
            ..Default::default()
        }))
        .unwrap();
    assert_eq!(older.len(), 1);
    assert_eq!(older[0].data.display_title(), "Duke");

    let ranch = db
        .list_listings(Some(&ListingFilter {
            disciplines_any: vec![" ranch ".to_string()],
            ..Default::default()
        }))
        .unwrap();
    assert_eq!(ranch.len(), 1);

    let named = db
        .list_listings(Some(&ListingFilter {
            name_contains: Some("TA".to_string()),
            ..Default::default()
        }))
        .unwrap();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].data.display_title(), "Star");
}

#[test]
fn test_profiles() {
    let (_temp_file, mut db) = create_test_db();
    let params = SaveProfile {
        user_id: "u1".to_string(),
        display_name: "Jo".to_string(),
        role: None,
        phone: None,
    };

    let profile = db.create_profile(&params).expect("Failed to create profile");
    assert_eq!(profile.role, UserRole::Owner);

    assert!(matches!(
        db.create_profile(&params),
        Err(ListingError::DuplicateProfile { ref user_id }) if user_id == "u1"
    ));

    let updated = db
        .update_profile(&SaveProfile {
            role: Some(UserRole::Agent),
            ..params.clone()
        })
        .unwrap()
        .expect("Profile should exist");
    assert_eq!(updated.role, UserRole::Agent);

    assert!(db.get_profile("nobody").unwrap().is_none());
    assert!(
        db.update_profile(&SaveProfile {
            user_id: "nobody".to_string(),
            ..params
        })
        .unwrap()
        .is_none()
    );
}
