//! Interactive editing session (`paddock wizard edit`).
//!
//! Reads one command per line from stdin and drives a [`WizardSession`], so
//! edits get the same debounced local backup and autosave as any other
//! front end.

use std::{io::Write, str::FromStr};

use anyhow::{Context, Result, bail};
use paddock_core::{
    ListingError, ListingField, ListingStatus, Marketplace, SqliteStorage, WizardSession,
    autosave::AutoSaveOutcome,
    display::{LocalDateTime, MissingFields, OperationStatus, StepProgress},
    params::Id,
    wizard::{NavigationSave, StepChange},
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::watch,
};

use super::Cli;
use crate::args::EditArgs;

type Session = WizardSession<Marketplace, SqliteStorage>;

const HELP: &str = "\
## Commands

- `field=value` set a field, e.g. `horseName=Star` or `disciplines=trail, dressage`
- `unset field` clear a field
- `next` / `prev` move between steps, saving first
- `goto N` jump to step N
- `save` save the draft now
- `status` show the current step
- `check` list missing required fields
- `progress` estimate how complete the listing is
- `restore` load the local backup
- `publish` publish the listing
- `quit` leave (`quit!` leaves even with unsaved changes)
";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Set { field: ListingField, value: String },
    Unset(ListingField),
    Next,
    Prev,
    Goto(u32),
    Save,
    Status,
    Check,
    Progress,
    Restore,
    Publish,
    Help,
    Quit { force: bool },
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some((field, value)) = line.split_once('=') {
        let field = ListingField::from_str(field).map_err(|e| e.to_string())?;
        return Ok(Some(ReplCommand::Set {
            field,
            value: value.trim().to_string(),
        }));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match (word.to_lowercase().as_str(), rest) {
        ("unset", field) if !field.is_empty() => {
            ReplCommand::Unset(ListingField::from_str(field).map_err(|e| e.to_string())?)
        }
        ("goto", step) if !step.is_empty() => ReplCommand::Goto(
            step.parse()
                .map_err(|_| format!("'{step}' is not a step number"))?,
        ),
        ("next" | "n", "") => ReplCommand::Next,
        ("prev" | "p", "") => ReplCommand::Prev,
        ("save", "") => ReplCommand::Save,
        ("status", "") => ReplCommand::Status,
        ("check", "") => ReplCommand::Check,
        ("progress", "") => ReplCommand::Progress,
        ("restore", "") => ReplCommand::Restore,
        ("publish", "") => ReplCommand::Publish,
        ("help" | "?", "") => ReplCommand::Help,
        ("quit" | "exit" | "q", "") => ReplCommand::Quit { force: false },
        ("quit!" | "exit!" | "q!", "") => ReplCommand::Quit { force: true },
        _ => return Err(format!("Unknown command '{line}'. Type `help` for the list.")),
    };
    Ok(Some(command))
}

enum Flow {
    Continue,
    Exit,
}

/// Runs the editing loop until the user quits or stdin closes.
pub async fn run(cli: &Cli, args: EditArgs) -> Result<()> {
    let storage = cli.open_storage()?;
    let config = cli.settings.wizard_config();

    let mut session = match args.id {
        Some(id) => {
            let listing = cli
                .marketplace
                .show_listing(&Id { id })
                .await
                .context("Failed to load listing")?
                .ok_or(ListingError::ListingNotFound { id })?;
            if listing.status != ListingStatus::Draft {
                bail!("Listing {id} is already published");
            }
            Session::resume(cli.marketplace.clone(), storage, config, listing)
        }
        None => Session::new(cli.marketplace.clone(), storage, config, args.owner),
    };

    let backup = session.check_backup().await;
    if backup.exists {
        let saved = backup
            .saved_at
            .map(|at| format!(" from {}", LocalDateTime(&at)))
            .unwrap_or_default();
        cli.render(format!(
            "A local backup{saved} exists. Type `restore` to load it.\n\n"
        ))?;
    }
    render_status(cli, &session)?;

    let mut outcomes = session.autosave_outcomes();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("[step {}] > ", session.current_step());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            if session.has_unsaved_changes().await && session.backup_now().await {
                cli.render("\nUnsaved changes are kept in the local backup.\n")?;
            }
            break;
        };
        report_autosave(cli, &mut outcomes)?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                cli.render(OperationStatus::failure(message))?;
                continue;
            }
        };

        if let Flow::Exit = execute(cli, &mut session, command).await? {
            break;
        }
    }
    Ok(())
}

async fn execute(cli: &Cli, session: &mut Session, command: ReplCommand) -> Result<Flow> {
    match command {
        ReplCommand::Set { field, value } => match session.update(field, &value) {
            Ok(()) => cli.render(OperationStatus::success(format!(
                "{} set",
                field.display_name()
            )))?,
            Err(e) => cli.render(OperationStatus::failure(e.to_string()))?,
        },
        ReplCommand::Unset(field) => {
            session.clear(field);
            cli.render(OperationStatus::success(format!(
                "{} cleared",
                field.display_name()
            )))?;
        }
        ReplCommand::Next => {
            let change = session.next_step().await;
            render_change(cli, session, &change)?;
        }
        ReplCommand::Prev => {
            let change = session.prev_step().await;
            render_change(cli, session, &change)?;
        }
        ReplCommand::Goto(step) => match session.go_to_step(step).await {
            Ok(change) => render_change(cli, session, &change)?,
            Err(e) => cli.render(OperationStatus::failure(e.to_string()))?,
        },
        ReplCommand::Save => match session.save_draft().await {
            Ok(id) => cli.render(OperationStatus::success(format!("Saved draft {id}")))?,
            Err(e) => cli.render(OperationStatus::failure(format!(
                "Could not save draft: {e}"
            )))?,
        },
        ReplCommand::Status => render_status(cli, session)?,
        ReplCommand::Check => cli.render(MissingFields(session.validate()))?,
        ReplCommand::Progress => cli.render(session.completion())?,
        ReplCommand::Restore => {
            if session.restore_backup().await {
                cli.render(OperationStatus::success("Restored listing data from local backup"))?;
                render_status(cli, session)?;
            } else {
                cli.render(OperationStatus::failure("No local backup found"))?;
            }
        }
        ReplCommand::Publish => match session.publish().await {
            Ok(id) => {
                cli.render(OperationStatus::success(format!("Published listing {id}")))?;
                return Ok(Flow::Exit);
            }
            Err(e) => cli.render(OperationStatus::failure(e.to_string()))?,
        },
        ReplCommand::Help => cli.render(HELP)?,
        ReplCommand::Quit { force } => {
            if let Some(prompt) = session.before_unload().await {
                if !force {
                    cli.render(OperationStatus::failure(format!(
                        "{} Type `save` first, or `quit!` to leave anyway.",
                        prompt.return_value
                    )))?;
                    return Ok(Flow::Continue);
                }
                if session.backup_now().await {
                    cli.render("Unsaved changes are kept in the local backup.\n")?;
                }
            }
            return Ok(Flow::Exit);
        }
    }
    Ok(Flow::Continue)
}

fn render_status(cli: &Cli, session: &Session) -> Result<()> {
    cli.render(StepProgress::new(
        session.navigator(),
        session.data(),
        session.draft_id(),
    ))
}

fn render_change(cli: &Cli, session: &Session, change: &StepChange) -> Result<()> {
    match &change.save {
        NavigationSave::NotNeeded => {}
        NavigationSave::Saved(id) => cli.render(OperationStatus::success(format!("Saved draft {id}")))?,
        NavigationSave::Failed(message) => cli.render(OperationStatus::failure(format!(
            "Could not save draft: {message}. Changes are kept in the local backup."
        )))?,
    }
    if !change.moved() {
        cli.render(format!("Staying on step {}.\n", change.to))?;
    }
    render_status(cli, session)
}

fn report_autosave(cli: &Cli, outcomes: &mut watch::Receiver<Option<AutoSaveOutcome>>) -> Result<()> {
    if !outcomes.has_changed().unwrap_or(false) {
        return Ok(());
    }
    let outcome = outcomes.borrow_and_update().clone();
    match outcome {
        Some(AutoSaveOutcome::Saved(id)) => cli.render(format!("_Autosaved draft {id}_\n")),
        Some(AutoSaveOutcome::Failed(message)) => {
            cli.render(OperationStatus::failure(format!("Autosave failed: {message}")))
        }
        _ => Ok(()),
    }
}
