//! Blocking of route changes and closing while changes are unsaved.

/// Message shown when closing with unsaved changes.
pub const UNLOAD_MESSAGE: &str = "You have unsaved changes. Are you sure you want to leave?";

/// A route change held back until the user decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub from: String,
    pub to: String,
}

/// Answer to a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Blocked(PendingNavigation),
}

/// The user's answer to a blocked navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardChoice {
    Save,
    Discard,
    Cancel,
}

/// What to do once the user answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardResolution {
    SaveThenNavigate(String),
    NavigateWithoutSaving(String),
    Stay,
}

/// Prompt requested from the host before the session closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnloadPrompt {
    pub return_value: String,
}

/// Intercepts navigation away from the wizard.
#[derive(Debug, Clone, Default)]
pub struct NavigationGuard {
    pending: Option<PendingNavigation>,
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a route change. Same-path changes always proceed.
    pub fn request(&mut self, current_path: &str, target_path: &str, has_unsaved: bool) -> NavigationDecision {
        if !has_unsaved || current_path == target_path {
            return NavigationDecision::Proceed;
        }

        let pending = PendingNavigation {
            from: current_path.to_string(),
            to: target_path.to_string(),
        };
        self.pending = Some(pending.clone());
        NavigationDecision::Blocked(pending)
    }

    /// The navigation currently awaiting a decision.
    pub fn pending(&self) -> Option<&PendingNavigation> {
        self.pending.as_ref()
    }

    /// Turns the user's choice into a resolution and clears the pending request.
    pub fn resolve(&mut self, pending: PendingNavigation, choice: GuardChoice) -> GuardResolution {
        self.pending = None;
        match choice {
            GuardChoice::Save => GuardResolution::SaveThenNavigate(pending.to),
            GuardChoice::Discard => GuardResolution::NavigateWithoutSaving(pending.to),
            GuardChoice::Cancel => GuardResolution::Stay,
        }
    }

    /// Best-effort prompt for a close event.
    pub fn before_unload(&self, has_unsaved: bool) -> Option<UnloadPrompt> {
        has_unsaved.then(|| UnloadPrompt {
            return_value: UNLOAD_MESSAGE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_state_proceeds() {
        let mut guard = NavigationGuard::new();
        assert_eq!(guard.request("/create", "/browse", false), NavigationDecision::Proceed);
        assert!(guard.pending().is_none());
    }

    #[test]
    fn test_same_path_proceeds_even_when_dirty() {
        let mut guard = NavigationGuard::new();
        assert_eq!(guard.request("/create", "/create", true), NavigationDecision::Proceed);
    }

    #[test]
    fn test_dirty_state_blocks_and_resolves() {
        let mut guard = NavigationGuard::new();
        let NavigationDecision::Blocked(pending) = guard.request("/create", "/browse", true) else {
            panic!("expected the navigation to be blocked");
        };
        assert_eq!(guard.pending(), Some(&pending));

        assert_eq!(
            guard.resolve(pending.clone(), GuardChoice::Save),
            GuardResolution::SaveThenNavigate("/browse".to_string())
        );
        assert!(guard.pending().is_none());
        assert_eq!(
            guard.resolve(pending.clone(), GuardChoice::Discard),
            GuardResolution::NavigateWithoutSaving("/browse".to_string())
        );
        assert_eq!(guard.resolve(pending, GuardChoice::Cancel), GuardResolution::Stay);
    }

    #[test]
    fn test_before_unload() {
        let guard = NavigationGuard::new();
        assert!(guard.before_unload(false).is_none());
        assert_eq!(guard.before_unload(true).unwrap().return_value, UNLOAD_MESSAGE);
    }
}
