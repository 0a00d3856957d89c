use anyhow::{Context, Result, bail};
use log::info;
use paddock_core::{
    ListingError, ListingStatus,
    autosave::LocalBackup,
    display::{CreateResult, DeleteResult, OperationStatus, format_listing_list},
    params::{Id, SaveDraft},
};

use super::{Cli, interactive};
use crate::args::{
    BackupCommands, ListingCommands, ProfileCommands, RestoreBackupArgs, WizardCommands,
};

impl Cli {
    pub async fn handle_listing_command(&self, command: ListingCommands) -> Result<()> {
        match command {
            ListingCommands::Create(args) => {
                let listing = self
                    .marketplace
                    .create_draft(&args.into())
                    .await
                    .context("Failed to create listing")?;
                self.render(CreateResult::new(listing))
            }
            ListingCommands::Show(args) => {
                let params: Id = args.into();
                let listing = self
                    .marketplace
                    .show_listing(&params)
                    .await
                    .context("Failed to load listing")?
                    .ok_or(ListingError::ListingNotFound { id: params.id })?;
                self.render(listing)
            }
            ListingCommands::List(args) => self.list_listings(&args.into()).await,
            ListingCommands::Search(args) => {
                let drafts = args.drafts;
                let listings = self
                    .marketplace
                    .search_listings_summary(&args.into())
                    .await
                    .context("Failed to search listings")?;
                self.render(format_listing_list(&listings, drafts))
            }
            ListingCommands::Set(args) => {
                let result = self
                    .marketplace
                    .update_listing_field(&args.into())
                    .await
                    .context("Failed to update listing")?;
                self.render(result)
            }
            ListingCommands::Unset(args) => {
                let result = self
                    .marketplace
                    .update_listing_field(&args.into())
                    .await
                    .context("Failed to clear field")?;
                self.render(result)
            }
            ListingCommands::Validate(args) => {
                let missing = self
                    .marketplace
                    .validate_listing(&args.into(), &self.registry())
                    .await
                    .context("Failed to validate listing")?;
                self.render(missing)
            }
            ListingCommands::Progress(args) => {
                let report = self
                    .marketplace
                    .listing_progress(&args.into())
                    .await
                    .context("Failed to estimate progress")?;
                self.render(report)
            }
            ListingCommands::Publish(args) => {
                let listing = self
                    .marketplace
                    .publish_listing(&args.into(), &self.registry())
                    .await
                    .context("Failed to publish listing")?;
                self.render(OperationStatus::success(format!(
                    "Published listing '{}' (ID: {})",
                    listing.data.display_title(),
                    listing.id
                )))
            }
            ListingCommands::Discard(args) => {
                let id = args.id;
                let listing = self
                    .marketplace
                    .discard_listing(&args.into())
                    .await
                    .context("Failed to discard listing")?
                    .ok_or(ListingError::ListingNotFound { id })?;
                self.render(DeleteResult::new(listing))
            }
            ListingCommands::Tagline(args) => {
                let copy = self
                    .marketplace
                    .generate_copy(&args.into())
                    .await
                    .context("Failed to generate listing copy")?;
                self.render(copy)
            }
        }
    }

    pub async fn handle_wizard_command(&self, command: WizardCommands) -> Result<()> {
        let registry = self.registry();
        let progress = match command {
            WizardCommands::Status(args) => {
                self.marketplace.step_progress(&args.into(), &registry).await
            }
            WizardCommands::Next(args) => self.marketplace.next_step(&args.into(), &registry).await,
            WizardCommands::Prev(args) => self.marketplace.prev_step(&args.into(), &registry).await,
            WizardCommands::Goto(args) => {
                self.marketplace.go_to_step(&args.into(), &registry).await
            }
            WizardCommands::Edit(args) => return interactive::run(self, args).await,
        }
        .context("Failed to move through the wizard")?;
        self.render(progress)
    }

    pub async fn handle_backup_command(&self, command: BackupCommands) -> Result<()> {
        let mut backup = LocalBackup::new(self.open_storage()?);
        match command {
            BackupCommands::Show => match backup.load_entry() {
                Some(entry) => self.render(entry),
                None => self.render("No local backup found.\n"),
            },
            BackupCommands::Restore(args) => {
                let Some(entry) = backup.load_entry() else {
                    bail!("No local backup to restore");
                };
                let remembered = entry.metadata.as_ref().and_then(|m| m.draft_id);
                let target = self.restore_target(&args, remembered).await?;

                let listing = self
                    .marketplace
                    .save_draft(&SaveDraft {
                        id: target,
                        owner_id: None,
                        data: entry.data,
                        current_step: None,
                    })
                    .await
                    .context("Failed to save backup as a draft")?;
                backup.clear_backup();
                info!("Restored local backup into listing {}", listing.id);

                self.render(OperationStatus::success(format!(
                    "Restored local backup into draft {}",
                    listing.id
                )))?;
                self.render(listing)
            }
            BackupCommands::Clear => {
                backup.clear_backup();
                self.render(OperationStatus::success("Local backup cleared"))
            }
        }
    }

    /// Draft a backup is written back to: the requested listing, else the
    /// draft the backup came from while it is still a draft, else a new one.
    async fn restore_target(
        &self,
        args: &RestoreBackupArgs,
        remembered: Option<u64>,
    ) -> Result<Option<u64>> {
        if let Some(id) = args.id {
            self.marketplace
                .show_listing(&Id { id })
                .await?
                .ok_or(ListingError::ListingNotFound { id })?;
            return Ok(Some(id));
        }

        let Some(id) = remembered else {
            return Ok(None);
        };
        let still_draft = self
            .marketplace
            .show_listing(&Id { id })
            .await?
            .is_some_and(|listing| listing.status == ListingStatus::Draft);
        Ok(still_draft.then_some(id))
    }

    pub async fn handle_profile_command(&self, command: ProfileCommands) -> Result<()> {
        match command {
            ProfileCommands::Save(args) => {
                let saved = self
                    .marketplace
                    .save_profile(&args.into())
                    .await
                    .context("Failed to save profile")?;
                self.render(saved)
            }
            ProfileCommands::Show(args) => {
                let profile = self
                    .marketplace
                    .get_profile(&args.user_id)
                    .await
                    .context("Failed to load profile")?
                    .ok_or(ListingError::ProfileNotFound {
                        user_id: args.user_id,
                    })?;
                self.render(profile)
            }
        }
    }
}
