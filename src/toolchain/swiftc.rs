//! Swift compiler tool chain kind.

use super::tool::{ToolConfiguration, ToolKind};
use super::ToolChainKind;

/// The `swiftc` tool chain; swiftc also drives linking.
#[derive(Debug, Clone, Default)]
pub struct Swiftc;

impl Swiftc {
    /// Create the Swift compiler kind.
    pub fn new() -> Self {
        Swiftc
    }
}

impl ToolChainKind for Swiftc {
    fn type_name(&self) -> &str {
        "Swift Compiler"
    }

    fn default_tools(&self) -> Vec<ToolConfiguration> {
        vec![
            ToolConfiguration::new(ToolKind::SwiftCompiler, "swiftc"),
            ToolConfiguration::new(ToolKind::Linker, "swiftc"),
        ]
    }
}
