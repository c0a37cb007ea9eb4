//! Shared utilities

pub mod config;
pub mod diagnostic;

pub use config::ToolChainsConfig;
pub use diagnostic::Diagnostic;
