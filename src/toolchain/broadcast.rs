//! Ordered, append-only configuration actions.

use std::fmt;

use thiserror::Error;

/// A configuration action applied to a `T`.
pub type Action<T> = Box<dyn Fn(&mut T) -> anyhow::Result<()> + Send + Sync>;

/// An action failed while the broadcast was executing.
#[derive(Debug, Error)]
#[error("configuration action #{index} failed")]
pub struct ActionError {
    /// Registration index of the failing action (0-based)
    pub index: usize,
    #[source]
    pub source: anyhow::Error,
}

/// A list of actions run in registration order against a target value.
///
/// Actions are never removed, reordered or deduplicated. Adding the same
/// action twice runs it twice.
pub struct ActionBroadcast<T> {
    actions: Vec<Action<T>>,
}

impl<T> ActionBroadcast<T> {
    /// Create an empty broadcast.
    pub fn new() -> Self {
        ActionBroadcast {
            actions: Vec::new(),
        }
    }

    /// Append an action.
    pub fn add<F>(&mut self, action: F)
    where
        F: Fn(&mut T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
    }

    /// Run every action against `target`, in order.
    ///
    /// Stops at the first failing action; later actions do not run.
    pub fn execute(&self, target: &mut T) -> Result<(), ActionError> {
        for (index, action) in self.actions.iter().enumerate() {
            action(target).map_err(|source| ActionError { index, source })?;
        }
        Ok(())
    }

    /// Get the number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<T> Default for ActionBroadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ActionBroadcast<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionBroadcast")
            .field("actions", &self.actions.len())
            .finish()
    }
}
