//! Test utilities for Shipwright unit tests.
//!
//! This module provides recording configuration actions and ready-made
//! tool chain configuration projects.
//!
//! # Example
//!
//! ```rust,ignore
//! use shipwright::test_support::Recorder;
//!
//! #[test]
//! fn test_example() {
//!     let recorder = Recorder::new();
//!     toolchain.each_platform(recorder.action("first"));
//!     toolchain.select(&platform)?;
//!     assert_eq!(recorder.calls(), vec!["first"]);
//! }
//! ```

pub mod fixtures;

use std::sync::{Arc, Mutex};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Records the labels of configuration actions as they run.
///
/// Clones share the same log, so actions handed to a tool chain can be
/// inspected from the test afterwards.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Create a recorder with an empty log.
    pub fn new() -> Self {
        Recorder::default()
    }

    /// An action that appends `label` to the log and succeeds.
    pub fn action<T: 'static>(
        &self,
        label: &str,
    ) -> impl Fn(&mut T) -> anyhow::Result<()> + Clone + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        let label = label.to_string();
        move |_: &mut T| {
            calls.lock().unwrap().push(label.clone());
            Ok(())
        }
    }

    /// Labels recorded so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_shares_log() {
        let recorder = Recorder::new();
        let first = recorder.action::<u32>("first");
        let second = recorder.clone().action::<u32>("second");

        let mut value = 0;
        first(&mut value).unwrap();
        second(&mut value).unwrap();
        first(&mut value).unwrap();

        assert_eq!(recorder.calls(), vec!["first", "second", "first"]);
    }
}
