//! Core data structures for Shipwright.
//!
//! This module contains the foundational types the tool chains build on:
//! - Operating system naming policies
//! - Path resolution
//! - Target platforms
//! - Swift language versions

pub mod os;
pub mod path;
pub mod platform;
pub mod swift;

pub use os::{OperatingSystem, OsFamily, OsNaming};
pub use path::{BaseDirResolver, PathResolver};
pub use platform::TargetPlatform;
pub use swift::SwiftVersion;
