//! The multi-step "create listing" wizard.
//!
//! ```text
//! ┌──────────────┐  update   ┌───────────────┐  next/prev  ┌───────────────┐
//! │  Step input  │──────────▶│ WizardSession │────────────▶│ StepNavigator │
//! └──────────────┘           └───────────────┘             └───────────────┘
//!                              │    │     │                        │
//!                 debounced    │    │     │ publish                │ visibility
//!                 snapshots    ▼    │     ▼                        ▼
//!                      ┌──────────┐ │  ┌───────────┐       ┌──────────────┐
//!                      │ autosave │ │  │ Validator │──────▶│ StepRegistry │
//!                      └──────────┘ │  └───────────┘ titles└──────────────┘
//!                                   ▼
//!                          ┌─────────────────┐
//!                          │ NavigationGuard │
//!                          └─────────────────┘
//! ```
//!
//! The pure parts ([`steps`], [`navigation`], [`guard`], [`validation`],
//! [`completion`]) need no runtime and can be used on their own. The
//! [`WizardSession`] wires them to the debounced backup and autosave sinks
//! of [`crate::autosave`].

pub mod completion;
pub mod config;
pub mod guard;
pub mod navigation;
pub mod session;
pub mod steps;
pub mod validation;

pub use completion::{CompletionReport, estimate_completion};
pub use config::{StepFlow, WizardConfig};
pub use guard::{
    GuardChoice, GuardResolution, NavigationDecision, NavigationGuard, PendingNavigation, UnloadPrompt,
};
pub use navigation::StepNavigator;
pub use session::{NavigationSave, StepChange, WizardSession};
pub use steps::{StepDefinition, StepRegistry};
pub use validation::{ValidationResult, ValidationRule, Validator, validate_listing_with_steps};
