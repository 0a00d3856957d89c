//! Command-line interface definitions using clap
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types with `From`, so core params stay free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Marketplace
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use paddock_core::{
    HorseSex, ListingType, StepFlow, UserRole,
    params::{
        CreateDraft, DiscardListing, GenerateCopy, GoToStep, Id, ListListings, SaveProfile,
        SearchListings, UpdateField,
    },
};

/// Create and manage horse listings from the terminal
///
/// Listings are built step by step as drafts, kept safe by a local backup and
/// periodic autosave, and published once the basic information is complete.
/// `serve` exposes the same operations to AI assistants over MCP.
#[derive(Parser)]
#[command(version, about, name = "paddock")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/paddock/paddock.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to the local backup storage. Defaults to local_storage.db next to
    /// the database file
    #[arg(long, global = true)]
    pub storage_file: Option<PathBuf>,

    /// Step layout of the listing wizard (legacy or consolidated)
    #[arg(long, global = true, default_value_t = StepFlow::default())]
    pub flow: StepFlow,

    /// Turn off periodic autosave in interactive editing
    #[arg(long, global = true)]
    pub no_autosave: bool,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage listings
    #[command(alias = "l")]
    Listing {
        #[command(subcommand)]
        command: ListingCommands,
    },
    /// Move through the listing wizard
    #[command(alias = "w")]
    Wizard {
        #[command(subcommand)]
        command: WizardCommands,
    },
    /// Inspect or restore the local backup
    #[command(alias = "b")]
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },
    /// Manage seller profiles
    #[command(alias = "p")]
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Start the MCP server
    Serve,
}

/// Identify a listing
#[derive(ClapArgs)]
pub struct ListingIdArgs {
    #[arg(help = "ID of the listing")]
    pub id: u64,
}

impl From<ListingIdArgs> for Id {
    fn from(val: ListingIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Start a new draft listing
#[derive(ClapArgs)]
pub struct CreateListingArgs {
    #[arg(long, help = "User creating the listing")]
    pub owner: Option<String>,
    #[arg(long, help = "Seller role: owner or agent")]
    pub role: Option<UserRole>,
    #[arg(long = "type", help = "Listing type: sale, lease or both")]
    pub listing_type: Option<ListingType>,
}

impl From<CreateListingArgs> for CreateDraft {
    fn from(val: CreateListingArgs) -> Self {
        CreateDraft {
            owner_id: val.owner,
            role: val.role,
            listing_type: val.listing_type,
        }
    }
}

/// List published listings or drafts
#[derive(ClapArgs)]
pub struct ListListingsArgs {
    #[arg(long, help = "Show drafts instead of published listings")]
    pub drafts: bool,
}

impl From<ListListingsArgs> for ListListings {
    fn from(val: ListListingsArgs) -> Self {
        ListListings { drafts: val.drafts }
    }
}

/// Search listings
#[derive(ClapArgs)]
pub struct SearchListingsArgs {
    #[arg(long, help = "Breed, case-insensitive")]
    pub breed: Option<String>,
    #[arg(long, help = "Sex: mare, gelding, stallion, colt or filly")]
    pub sex: Option<HorseSex>,
    #[arg(long = "type", help = "Listing type: sale, lease or both")]
    pub listing_type: Option<ListingType>,
    #[arg(long, help = "Minimum price")]
    pub min_price: Option<u64>,
    #[arg(long, help = "Maximum price")]
    pub max_price: Option<u64>,
    #[arg(long, help = "Minimum age in years")]
    pub min_age: Option<u32>,
    #[arg(long, help = "Maximum age in years")]
    pub max_age: Option<u32>,
    #[arg(long, help = "Part of the horse name")]
    pub name: Option<String>,
    #[arg(long, help = "Part of the location")]
    pub location: Option<String>,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Disciplines as comma-separated list; any match counts"
    )]
    pub disciplines: Vec<String>,
    #[arg(long, help = "Search drafts instead of published listings")]
    pub drafts: bool,
}

impl From<SearchListingsArgs> for SearchListings {
    fn from(val: SearchListingsArgs) -> Self {
        SearchListings {
            breed: val.breed,
            sex: val.sex,
            listing_type: val.listing_type,
            price_min: val.min_price,
            price_max: val.max_price,
            age_min: val.min_age,
            age_max: val.max_age,
            name: val.name,
            location: val.location,
            disciplines: val.disciplines,
            drafts: val.drafts,
        }
    }
}

/// Set one field of a listing
#[derive(ClapArgs)]
pub struct SetFieldArgs {
    #[arg(help = "ID of the listing")]
    pub id: u64,
    #[arg(help = "Field key, e.g. horseName or horse_name")]
    pub field: String,
    #[arg(help = "New value; list fields take comma-separated values")]
    pub value: String,
}

impl From<SetFieldArgs> for UpdateField {
    fn from(val: SetFieldArgs) -> Self {
        UpdateField {
            id: val.id,
            field: val.field,
            value: val.value,
        }
    }
}

/// Clear one field of a listing
#[derive(ClapArgs)]
pub struct UnsetFieldArgs {
    #[arg(help = "ID of the listing")]
    pub id: u64,
    #[arg(help = "Field key, e.g. horseName or horse_name")]
    pub field: String,
}

impl From<UnsetFieldArgs> for UpdateField {
    fn from(val: UnsetFieldArgs) -> Self {
        UpdateField {
            id: val.id,
            field: val.field,
            value: String::new(),
        }
    }
}

/// Permanently delete a listing
#[derive(ClapArgs)]
pub struct DiscardListingArgs {
    #[arg(help = "ID of the listing to delete")]
    pub id: u64,
    #[arg(long, help = "Confirm permanent deletion")]
    pub confirm: bool,
}

impl From<DiscardListingArgs> for DiscardListing {
    fn from(val: DiscardListingArgs) -> Self {
        DiscardListing {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Write taglines and a description
#[derive(ClapArgs)]
pub struct TaglineArgs {
    #[arg(help = "ID of the listing")]
    pub id: u64,
    #[arg(long, help = "Raw text generation response to use instead of the fallback")]
    pub response: Option<String>,
}

impl From<TaglineArgs> for GenerateCopy {
    fn from(val: TaglineArgs) -> Self {
        GenerateCopy {
            id: val.id,
            response: val.response,
        }
    }
}

#[derive(Subcommand)]
pub enum ListingCommands {
    /// Start a new draft listing
    #[command(alias = "c")]
    Create(CreateListingArgs),
    /// Show a listing with all its details
    #[command(alias = "s")]
    Show(ListingIdArgs),
    /// List published listings, or drafts with --drafts
    #[command(aliases = ["l", "ls"])]
    List(ListListingsArgs),
    /// Search listings by breed, sex, price, age, name, location or discipline
    #[command(alias = "f")]
    Search(SearchListingsArgs),
    /// Set a field of a listing
    Set(SetFieldArgs),
    /// Clear a field of a listing
    Unset(UnsetFieldArgs),
    /// Check which required fields are missing
    #[command(alias = "v")]
    Validate(ListingIdArgs),
    /// Estimate how complete a listing is
    Progress(ListingIdArgs),
    /// Publish a complete listing
    Publish(ListingIdArgs),
    /// Permanently delete a listing
    #[command(aliases = ["d", "rm"])]
    Discard(DiscardListingArgs),
    /// Suggest taglines and a description
    Tagline(TaglineArgs),
}

/// Jump to a wizard step
#[derive(ClapArgs)]
pub struct GotoStepArgs {
    #[arg(help = "ID of the listing")]
    pub id: u64,
    #[arg(help = "Step number, starting at 1")]
    pub step: u32,
}

impl From<GotoStepArgs> for GoToStep {
    fn from(val: GotoStepArgs) -> Self {
        GoToStep {
            id: val.id,
            step: val.step,
        }
    }
}

/// Edit a listing interactively
#[derive(ClapArgs)]
pub struct EditArgs {
    #[arg(help = "ID of the draft to continue; starts a new listing when omitted")]
    pub id: Option<u64>,
    #[arg(long, help = "User creating the listing")]
    pub owner: Option<String>,
}

#[derive(Subcommand)]
pub enum WizardCommands {
    /// Show the steps of a listing and where it stands
    #[command(alias = "s")]
    Status(ListingIdArgs),
    /// Advance to the next visible step
    #[command(alias = "n")]
    Next(ListingIdArgs),
    /// Go back to the previous visible step
    #[command(alias = "p")]
    Prev(ListingIdArgs),
    /// Jump to a specific step
    #[command(alias = "g")]
    Goto(GotoStepArgs),
    /// Edit a listing in an interactive session
    #[command(alias = "e")]
    Edit(EditArgs),
}

/// Restore the local backup into the store
#[derive(ClapArgs)]
pub struct RestoreBackupArgs {
    #[arg(
        long,
        help = "Listing to overwrite; defaults to the backup's draft or a new draft"
    )]
    pub id: Option<u64>,
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// Show the local backup
    Show,
    /// Save the local backup as a draft
    Restore(RestoreBackupArgs),
    /// Delete the local backup
    Clear,
}

/// Create or update a profile
#[derive(ClapArgs)]
pub struct SaveProfileArgs {
    #[arg(help = "User the profile belongs to")]
    pub user_id: String,
    #[arg(help = "Name shown on listings")]
    pub display_name: String,
    #[arg(long, help = "Default seller role: owner or agent")]
    pub role: Option<UserRole>,
    #[arg(long, help = "Contact phone")]
    pub phone: Option<String>,
}

impl From<SaveProfileArgs> for SaveProfile {
    fn from(val: SaveProfileArgs) -> Self {
        SaveProfile {
            user_id: val.user_id,
            display_name: val.display_name,
            role: val.role,
            phone: val.phone,
        }
    }
}

/// Show a profile
#[derive(ClapArgs)]
pub struct ShowProfileArgs {
    #[arg(help = "User the profile belongs to")]
    pub user_id: String,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Create or update a profile
    #[command(alias = "s")]
    Save(SaveProfileArgs),
    /// Show a profile
    Show(ShowProfileArgs),
}
