//! MCP server implementation for Paddock
//!
//! Exposes the listing workflow to AI assistants over the Model Context
//! Protocol. Tools return the same markdown the CLI prints.

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use paddock_core::{Marketplace, StepRegistry};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use tokio::signal::unix::{SignalKind, signal};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use handlers::{
    CreateDraft, DiscardListing, GenerateCopy, GoToStep, Id, ListListings, McpResult,
    SearchListings, UpdateField,
};

const INSTRUCTIONS: &str = r#"Paddock helps sellers create horse listings for sale or lease through a step-by-step wizard.

## Core Concepts
- **Listings**: a horse offered for sale, lease or both. Listings start as drafts and become visible in searches once published.
- **Steps**: the wizard groups listing fields into ordered steps. The agent information step only applies when the seller's role is agent.
- **Required fields**: horse name, sex and location must be set before a listing can be published.

## Workflow
1. Start a draft with `create_listing`
2. Walk the steps with `next_step`, `prev_step` or `go_to_step`; each shows the fields of the step and their values
3. Set or clear fields with `update_listing` (camelCase keys such as `horseName`, lists as comma-separated values)
4. Check the draft with `validate_listing` and `listing_progress`
5. Suggest copy with `generate_tagline`
6. Publish with `publish_listing`, or throw the draft away with `discard_listing` (requires confirmed=true)

## Finding Listings
- `list_listings` shows published listings, or drafts with drafts=true
- `search_listings` filters by breed, sex, listing type, price and age ranges, name, location and disciplines

## Tool Categories
- **Listings**: create_listing, show_listing, list_listings, search_listings, update_listing, publish_listing, discard_listing
- **Wizard**: next_step, prev_step, go_to_step, validate_listing, listing_progress
- **Copy**: generate_tagline"#;

/// MCP server for Paddock
#[derive(Clone)]
pub struct PaddockMcpServer {
    marketplace: Marketplace,
    registry: StepRegistry,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PaddockMcpServer {
    pub fn new(marketplace: Marketplace, registry: StepRegistry) -> Self {
        Self {
            marketplace,
            registry,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.marketplace.clone(), self.registry)
    }

    #[tool(
        name = "create_listing",
        description = "Start a new draft listing. Optionally pass owner_id (the seller's user id), role ('owner' or 'agent'; defaults to the seller's profile role, else owner) and listing_type ('sale', 'lease' or 'both'). Returns the new listing ID used by every other tool."
    )]
    async fn create_listing(&self, params: Parameters<CreateDraft>) -> McpResult {
        self.handlers().create_listing(params).await
    }

    #[tool(
        name = "show_listing",
        description = "Display a listing with its status, current wizard step, timestamps and every field that has a value."
    )]
    async fn show_listing(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_listing(params).await
    }

    #[tool(
        name = "list_listings",
        description = "List published listings, newest first. Use drafts=true to see unpublished drafts instead."
    )]
    async fn list_listings(&self, params: Parameters<ListListings>) -> McpResult {
        self.handlers().list_listings(params).await
    }

    #[tool(
        name = "search_listings",
        description = "Search listings. All filters are optional and combine: breed (case-insensitive exact), sex, listing_type, price_min/price_max, age_min/age_max, name and location (case-insensitive substring), disciplines (matches listings offering any of them). Searches published listings unless drafts=true."
    )]
    async fn search_listings(&self, params: Parameters<SearchListings>) -> McpResult {
        self.handlers().search_listings(params).await
    }

    #[tool(
        name = "update_listing",
        description = "Set one field of a listing. Provide id, field (camelCase key such as horseName, breed, age, sex, location, price, listingType, disciplines, description, tagline; snake_case also works) and value as text. List fields take comma-separated values; an empty value clears the field. Returns the listing with the change recorded."
    )]
    async fn update_listing(&self, params: Parameters<UpdateField>) -> McpResult {
        self.handlers().update_listing(params).await
    }

    #[tool(
        name = "validate_listing",
        description = "Check a listing for missing required fields. Returns a checklist naming each missing field and the wizard step where it is entered, or confirms the listing is ready to publish."
    )]
    async fn validate_listing(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().validate_listing(params).await
    }

    #[tool(
        name = "listing_progress",
        description = "Estimate how complete a listing is: percentage of key fields filled in, sections started, missing required and optional fields, and a suggested next action."
    )]
    async fn listing_progress(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().listing_progress(params).await
    }

    #[tool(
        name = "next_step",
        description = "Advance a listing to the next wizard step, skipping steps that do not apply (the agent step for owners). Returns the step overview and the fields of the new step."
    )]
    async fn next_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().next_step(params).await
    }

    #[tool(
        name = "prev_step",
        description = "Move a listing back to the previous applicable wizard step. Returns the step overview and the fields of that step."
    )]
    async fn prev_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().prev_step(params).await
    }

    #[tool(
        name = "go_to_step",
        description = "Jump a listing to a specific wizard step (1-based). Fails if the step does not exist or does not apply to this listing."
    )]
    async fn go_to_step(&self, params: Parameters<GoToStep>) -> McpResult {
        self.handlers().go_to_step(params).await
    }

    #[tool(
        name = "publish_listing",
        description = "Publish a draft so it appears in searches. Refuses while horse name, sex or location are missing and names the missing fields."
    )]
    async fn publish_listing(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().publish_listing(params).await
    }

    #[tool(
        name = "discard_listing",
        description = "Permanently delete a listing. This cannot be undone. Requires confirmed=true."
    )]
    async fn discard_listing(&self, params: Parameters<DiscardListing>) -> McpResult {
        self.handlers().discard_listing(params).await
    }

    #[tool(
        name = "generate_tagline",
        description = "Suggest taglines and a description for a listing. Pass response with the raw output of a text generation model (a JSON array of taglines or a paragraph) to use it; without it, or when it cannot be used, copy is written from the listing details."
    )]
    async fn generate_tagline(&self, params: Parameters<GenerateCopy>) -> McpResult {
        self.handlers().generate_tagline(params).await
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for PaddockMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "paddock".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: PaddockMcpServer) -> Result<()> {
    use rmcp::{ServiceExt, transport::stdio};

    info!("Starting Paddock MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
