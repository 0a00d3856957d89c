//! MCP tool handlers implementation

use log::debug;
use paddock_core::{
    Marketplace, StepRegistry,
    display::{CreateResult, DeleteResult, OperationStatus, format_listing_list},
    params as core,
};
use rmcp::{
    ErrorData as McpError, RoleServer,
    handler::server::tool::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{errors::to_mcp_error, prompts::get_prompt_templates};

/// Generic MCP wrapper for core parameter types.
///
/// `#[serde(transparent)]` passes JSON straight through to the wrapped core
/// type, and the schema is the core type's own, so the core params stay free
/// of MCP concerns.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateDraft = McpParams<core::CreateDraft>;
pub type ListListings = McpParams<core::ListListings>;
pub type SearchListings = McpParams<core::SearchListings>;
pub type UpdateField = McpParams<core::UpdateField>;
pub type GoToStep = McpParams<core::GoToStep>;
pub type DiscardListing = McpParams<core::DiscardListing>;
pub type GenerateCopy = McpParams<core::GenerateCopy>;

pub type McpResult = Result<CallToolResult, McpError>;

fn text_result(text: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.to_string())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    marketplace: Marketplace,
    registry: StepRegistry,
}

impl McpHandlers {
    pub fn new(marketplace: Marketplace, registry: StepRegistry) -> Self {
        Self {
            marketplace,
            registry,
        }
    }

    pub async fn create_listing(&self, Parameters(params): Parameters<CreateDraft>) -> McpResult {
        debug!("create_listing: {params:?}");

        let listing = self
            .marketplace
            .create_draft(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create listing", &e))?;

        text_result(CreateResult::new(listing))
    }

    pub async fn show_listing(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_listing: {params:?}");

        let id = params.as_ref().id;
        let listing = self
            .marketplace
            .show_listing(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get listing", &e))?
            .ok_or_else(|| McpError::resource_not_found(format!("Listing with ID {id} not found"), None))?;

        text_result(listing)
    }

    pub async fn list_listings(&self, Parameters(params): Parameters<ListListings>) -> McpResult {
        debug!("list_listings: {params:?}");

        let inner = params.as_ref();
        let listings = self
            .marketplace
            .list_listings_summary(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to list listings", &e))?;

        text_result(format_listing_list(&listings, inner.drafts))
    }

    pub async fn search_listings(&self, Parameters(params): Parameters<SearchListings>) -> McpResult {
        debug!("search_listings: {params:?}");

        let inner = params.as_ref();
        let listings = self
            .marketplace
            .search_listings_summary(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to search listings", &e))?;

        text_result(format_listing_list(&listings, inner.drafts))
    }

    pub async fn update_listing(&self, Parameters(params): Parameters<UpdateField>) -> McpResult {
        debug!("update_listing: {params:?}");

        let result = self
            .marketplace
            .update_listing_field(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update listing", &e))?;

        text_result(result)
    }

    pub async fn validate_listing(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("validate_listing: {params:?}");

        let missing = self
            .marketplace
            .validate_listing(params.as_ref(), &self.registry)
            .await
            .map_err(|e| to_mcp_error("Failed to validate listing", &e))?;

        text_result(missing)
    }

    pub async fn listing_progress(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("listing_progress: {params:?}");

        let report = self
            .marketplace
            .listing_progress(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to estimate progress", &e))?;

        text_result(report)
    }

    pub async fn next_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("next_step: {params:?}");

        let progress = self
            .marketplace
            .next_step(params.as_ref(), &self.registry)
            .await
            .map_err(|e| to_mcp_error("Failed to advance listing", &e))?;

        text_result(progress)
    }

    pub async fn prev_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("prev_step: {params:?}");

        let progress = self
            .marketplace
            .prev_step(params.as_ref(), &self.registry)
            .await
            .map_err(|e| to_mcp_error("Failed to go back", &e))?;

        text_result(progress)
    }

    pub async fn go_to_step(&self, Parameters(params): Parameters<GoToStep>) -> McpResult {
        debug!("go_to_step: {params:?}");

        let progress = self
            .marketplace
            .go_to_step(params.as_ref(), &self.registry)
            .await
            .map_err(|e| to_mcp_error("Failed to change step", &e))?;

        text_result(progress)
    }

    pub async fn publish_listing(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("publish_listing: {params:?}");

        let listing = self
            .marketplace
            .publish_listing(params.as_ref(), &self.registry)
            .await
            .map_err(|e| to_mcp_error("Failed to publish listing", &e))?;

        text_result(OperationStatus::success(format!(
            "Published listing '{}' (ID: {}). It is now visible in searches.",
            listing.data.display_title(),
            listing.id
        )))
    }

    pub async fn discard_listing(&self, Parameters(params): Parameters<DiscardListing>) -> McpResult {
        debug!("discard_listing: {params:?}");

        let id = params.as_ref().id;
        let listing = self
            .marketplace
            .discard_listing(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to discard listing", &e))?
            .ok_or_else(|| McpError::resource_not_found(format!("Listing with ID {id} not found"), None))?;

        text_result(DeleteResult::new(listing))
    }

    pub async fn generate_tagline(&self, Parameters(params): Parameters<GenerateCopy>) -> McpResult {
        debug!("generate_tagline: {params:?}");

        let copy = self
            .marketplace
            .generate_copy(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to generate listing copy", &e))?;

        text_result(copy)
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");

        let prompts = get_prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);

        let template = get_prompt_templates()
            .into_iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| McpError::invalid_params("Prompt not found", None))?;

        let mut prompt_text = template.template.clone();
        for arg_def in &template.arguments {
            let value = request
                .arguments
                .as_ref()
                .and_then(|args| args.get(&arg_def.name));
            match value.map(|v| v.as_str()) {
                Some(Some(text)) => {
                    prompt_text = prompt_text.replace(&format!("{{{}}}", arg_def.name), text);
                }
                Some(None) if arg_def.required => {
                    return Err(McpError::invalid_params(
                        format!("Argument '{}' must be a string", arg_def.name),
                        None,
                    ));
                }
                None if arg_def.required => {
                    return Err(McpError::invalid_params(
                        format!("Required argument '{}' is missing", arg_def.name),
                        None,
                    ));
                }
                _ => {}
            }
        }

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
