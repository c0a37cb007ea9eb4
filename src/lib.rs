//! Shipwright - A registry of native tool chains for C, C++ and Swift
//!
//! This crate provides the core library functionality for Shipwright,
//! including tool chain declaration, per-platform configuration and
//! artifact naming.

pub mod core;
pub mod toolchain;
pub mod util;

/// Test utilities for Shipwright unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides recording configuration actions and
/// temporary projects with tool chain declarations.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{OperatingSystem, TargetPlatform};
pub use toolchain::{NativeToolChain, PlatformToolChain, ToolChainError, ToolChainRegistry};
pub use util::config::ToolChainsConfig;
