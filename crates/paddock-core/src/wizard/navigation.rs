//! Current-step tracking with the conditional skip rule applied.

use super::steps::StepRegistry;
use crate::{
    error::{ListingError, Result},
    models::ListingData,
};

/// Moves a step pointer through the visible steps of a registry.
///
/// The pointer always stays within `1..=registry.len()`. Moving past either
/// end is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct StepNavigator {
    registry: StepRegistry,
    current: u32,
}

impl StepNavigator {
    pub fn new(registry: StepRegistry) -> Self {
        Self {
            registry,
            current: 1,
        }
    }

    /// Starts at `step`, clamped into the registered range.
    pub fn starting_at(registry: StepRegistry, step: u32) -> Self {
        Self {
            registry,
            current: step.clamp(1, registry.len().max(1)),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    /// True when no visible step follows the current one.
    pub fn is_last(&self, data: &ListingData) -> bool {
        self.peek_next(data).is_none()
    }

    /// The visible step after the current one, without moving.
    pub fn peek_next(&self, data: &ListingData) -> Option<u32> {
        self.registry
            .visible_steps(data)
            .map(|step| step.id)
            .find(|&id| id > self.current)
    }

    /// The visible step before the current one, without moving.
    pub fn peek_prev(&self, data: &ListingData) -> Option<u32> {
        self.registry
            .visible_steps(data)
            .map(|step| step.id)
            .filter(|&id| id < self.current)
            .last()
    }

    /// Advances to the next visible step and returns the new position.
    pub fn next_step(&mut self, data: &ListingData) -> u32 {
        if let Some(next) = self.peek_next(data) {
            self.current = next;
        }
        self.current
    }

    /// Goes back to the previous visible step and returns the new position.
    pub fn prev_step(&mut self, data: &ListingData) -> u32 {
        if let Some(prev) = self.peek_prev(data) {
            self.current = prev;
        }
        self.current
    }

    /// Jumps directly to a visible registered step.
    pub fn go_to(&mut self, id: u32, data: &ListingData) -> Result<u32> {
        let step = self.registry.get(id).ok_or_else(|| {
            ListingError::invalid_input("step").with_reason(format!(
                "step {id} does not exist (1-{})",
                self.registry.len()
            ))
        })?;

        if !step.is_visible(data) {
            return Err(ListingError::invalid_input("step")
                .with_reason(format!("step {id} ({}) is not available", step.title)));
        }

        self.current = id;
        Ok(id)
    }

    /// 1-based position among the visible steps, and their count.
    pub fn position(&self, data: &ListingData) -> (usize, usize) {
        let visible: Vec<u32> = self.registry.visible_steps(data).map(|s| s.id).collect();
        let index = visible
            .iter()
            .position(|&id| id == self.current)
            .map(|i| i + 1)
            .unwrap_or_else(|| visible.iter().filter(|&&id| id < self.current).count());
        (index, visible.len())
    }
}
