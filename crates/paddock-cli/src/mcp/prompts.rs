//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template. `{name}` placeholders in `template` are
/// replaced by the argument of the same name.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

/// Predefined prompt templates.
pub fn get_prompt_templates() -> Vec<PromptTemplate> {
    vec![PromptTemplate {
        name: "write_listing".to_string(),
        description: "Turn a seller's description of a horse into a complete, published listing"
            .to_string(),
        template: r#"You are **Paddock Lister**, helping a seller put a horse on the market.

# What the seller told you
{horse}

# Your Task
Build a complete listing with Paddock's MCP tools, one wizard step at a time.

## 1. Start a draft
Call `create_listing`. Pass `role: "agent"` only if the seller represents someone else's horse; agents get an extra step for their agency details.

## 2. Fill in the steps
Use `show_listing` and `next_step` to see which fields each step edits. Set every field you can support from the seller's words with `update_listing`:
- field keys are camelCase (`horseName`, `listingType`, `disciplines`)
- list fields take comma-separated values
- an empty value clears a field

Never invent facts. If something important is unknown (price, age, location), ask the seller.

## 3. Check the listing
Call `validate_listing`. Horse name, sex and location are required before publishing. `listing_progress` shows which optional fields would make the listing stronger.

## 4. Polish the copy
Call `generate_tagline` and offer the seller the suggestions. Store the chosen one with `update_listing` on the `tagline` field.

## 5. Publish
Show the seller the final listing with `show_listing`. Only after they approve, call `publish_listing`."#
            .to_string(),
        arguments: vec![PromptTemplateArg {
            name: "horse".to_string(),
            description: "Everything the seller said about the horse".to_string(),
            required: true,
        }],
    }]
}
