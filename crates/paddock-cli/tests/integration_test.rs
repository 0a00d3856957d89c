//! Integration tests comparing CLI output with the core Display impls
//!
//! The MCP server returns the core `Display` output, so matching it here
//! keeps both interfaces in step.

use std::process::Command;

use paddock_core::{
    Marketplace, MarketplaceBuilder, StepFlow, StepRegistry,
    display::{CreateResult, format_listing_list},
    params::{CreateDraft, Id, ListListings, UpdateField},
};
use tempfile::TempDir;

/// Helper function to create a test marketplace with temporary database
async fn create_test_marketplace() -> (Marketplace, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let marketplace = MarketplaceBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create marketplace");

    (marketplace, temp_dir)
}

/// Run a CLI command against the database and capture its output
fn run_cli_command(temp_dir: &TempDir, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_paddock"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(temp_dir.path().join("test.db"))
        .args(args)
        .output()
        .expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

async fn set(marketplace: &Marketplace, id: u64, field: &str, value: &str) {
    marketplace
        .update_listing_field(&UpdateField {
            id,
            field: field.to_string(),
            value: value.to_string(),
        })
        .await
        .expect("Failed to update listing");
}

/// Creating through the CLI prints the same header as `CreateResult`
#[tokio::test]
async fn test_create_display_consistency() {
    let (marketplace, temp_dir) = create_test_marketplace().await;

    let cli_output = run_cli_command(&temp_dir, &["listing", "create", "--type", "lease"]);

    let listing = marketplace
        .create_draft(&CreateDraft {
            listing_type: Some("lease".parse().unwrap()),
            ..Default::default()
        })
        .await
        .expect("Failed to create listing");
    let direct_output = CreateResult::new(listing).to_string();

    assert!(cli_output.contains("Created draft listing with ID: 1"));
    assert!(direct_output.contains("Created draft listing with ID: 2"));
    for expected in ["- Status: draft", "- Step: 1", "- Listing Type: lease", "## Details"] {
        assert!(cli_output.contains(expected), "CLI output lacks {expected:?}");
        assert!(direct_output.contains(expected), "direct output lacks {expected:?}");
    }
}

/// `listing show` prints exactly the listing's Display output
#[tokio::test]
async fn test_show_matches_display() {
    let (marketplace, temp_dir) = create_test_marketplace().await;
    let listing = marketplace
        .create_draft(&CreateDraft::default())
        .await
        .expect("Failed to create listing");
    set(&marketplace, listing.id, "horseName", "Star").await;
    set(&marketplace, listing.id, "disciplines", "trail, dressage").await;
    set(&marketplace, listing.id, "description", "Sweet and willing.").await;

    let cli_output = run_cli_command(&temp_dir, &["listing", "show", &listing.id.to_string()]);
    let direct_output = marketplace
        .show_listing(&Id { id: listing.id })
        .await
        .expect("Failed to load listing")
        .expect("Listing should exist")
        .to_string();

    assert_eq!(cli_output, direct_output);
    assert!(cli_output.contains("- Disciplines: trail, dressage"));
    assert!(cli_output.contains("Sweet and willing."));
}

/// Listing output uses the same heading and summaries as `format_listing_list`
#[tokio::test]
async fn test_list_listings_consistency() {
    let (marketplace, temp_dir) = create_test_marketplace().await;
    for name in ["Star", "Comet"] {
        let listing = marketplace
            .create_draft(&CreateDraft::default())
            .await
            .expect("Failed to create listing");
        set(&marketplace, listing.id, "horseName", name).await;
    }

    let cli_output = run_cli_command(&temp_dir, &["listing", "list", "--drafts"]);
    let params = ListListings { drafts: true };
    let summaries = marketplace
        .list_listings_summary(&params)
        .await
        .expect("Failed to list listings");
    let direct_output = format_listing_list(&summaries, params.drafts);

    assert_eq!(cli_output, direct_output);
    assert!(cli_output.starts_with("# Draft Listings"));
    assert!(cli_output.contains("## Star (ID: 1) [draft, step 1]"));
    assert!(cli_output.contains("## Comet (ID: 2) [draft, step 1]"));
}

/// Wizard output is the `StepProgress` Display of the stored listing
#[tokio::test]
async fn test_wizard_status_consistency() {
    let (marketplace, temp_dir) = create_test_marketplace().await;
    let listing = marketplace
        .create_draft(&CreateDraft::default())
        .await
        .expect("Failed to create listing");
    let registry = StepRegistry::new(StepFlow::Legacy);
    let params = Id { id: listing.id };

    let direct_output = marketplace
        .step_progress(&params, &registry)
        .await
        .expect("Failed to load progress")
        .to_string();
    let cli_output = run_cli_command(
        &temp_dir,
        &["--flow", "legacy", "wizard", "status", &listing.id.to_string()],
    );

    assert_eq!(cli_output, direct_output);
    assert!(cli_output.contains("# Step 1 of 11: Listing Type"));
    assert!(cli_output.contains("- [ ] 12. Review & Publish"));
}

/// Validation output matches between CLI and the core checklist
#[tokio::test]
async fn test_validation_consistency() {
    let (marketplace, temp_dir) = create_test_marketplace().await;
    let listing = marketplace
        .create_draft(&CreateDraft::default())
        .await
        .expect("Failed to create listing");
    set(&marketplace, listing.id, "sex", "gelding").await;

    let registry = StepRegistry::new(StepFlow::default());
    let direct_output = marketplace
        .validate_listing(&Id { id: listing.id }, &registry)
        .await
        .expect("Failed to validate listing")
        .to_string();
    let cli_output = run_cli_command(&temp_dir, &["listing", "validate", &listing.id.to_string()]);

    assert_eq!(cli_output, direct_output);
    assert!(cli_output.contains("Horse Name"));
    assert!(cli_output.contains("Location"));
    assert!(!cli_output.contains("- [ ] Sex"));
}
