//! Paddock CLI
//!
//! Command-line interface and MCP server for creating horse listings.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::process::ExitCode;

use Commands::*;
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, Settings};
use log::{error, info};
use mcp::{PaddockMcpServer, run_stdio_server};
use paddock_core::{MarketplaceBuilder, StepRegistry, params::ListListings};
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            if cfg!(debug_assertions) {
                eprintln!("{e:?}");
            }
            eprintln!("Please check the input and try again.");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let Args {
        database_file,
        storage_file,
        flow,
        no_autosave,
        no_color,
        command,
    } = args;

    let marketplace = MarketplaceBuilder::new()
        .with_database_path(database_file.as_ref())
        .build()
        .await
        .context("Failed to initialize listing store")?;

    let renderer = TerminalRenderer::new(!no_color);
    let settings = Settings {
        database_file,
        storage_file,
        flow,
        autosave: !no_autosave,
    };

    info!("Paddock started");

    match command {
        Some(Listing { command }) => {
            Cli::new(marketplace, renderer, settings)
                .handle_listing_command(command)
                .await
        }
        Some(Wizard { command }) => {
            Cli::new(marketplace, renderer, settings)
                .handle_wizard_command(command)
                .await
        }
        Some(Backup { command }) => {
            Cli::new(marketplace, renderer, settings)
                .handle_backup_command(command)
                .await
        }
        Some(Profile { command }) => {
            Cli::new(marketplace, renderer, settings)
                .handle_profile_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Paddock MCP server");
            run_stdio_server(PaddockMcpServer::new(marketplace, StepRegistry::new(flow)))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(marketplace, renderer, settings)
                .list_listings(&ListListings { drafts: false })
                .await
        }
    }
}
