//! A tool chain narrowed to one target platform.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::platform::TargetPlatform;

use super::tool::{CommandSpec, ToolConfiguration, ToolKind};

/// The tools of one tool chain, configured for one target platform.
///
/// Views own a private copy of the tool configurations, so configuring
/// one platform never leaks into another.
#[derive(Debug, Clone)]
pub struct PlatformToolChain {
    toolchain: String,
    platform: TargetPlatform,
    tools: BTreeMap<ToolKind, ToolConfiguration>,
    search_path: Vec<PathBuf>,
}

impl PlatformToolChain {
    pub(crate) fn new(
        toolchain: impl Into<String>,
        platform: TargetPlatform,
        tools: BTreeMap<ToolKind, ToolConfiguration>,
        search_path: Vec<PathBuf>,
    ) -> Self {
        PlatformToolChain {
            toolchain: toolchain.into(),
            platform,
            tools,
            search_path,
        }
    }

    /// Name of the tool chain this view was selected from.
    pub fn toolchain_name(&self) -> &str {
        &self.toolchain
    }

    /// The platform this view targets.
    pub fn platform(&self) -> &TargetPlatform {
        &self.platform
    }

    /// Get a tool by kind.
    pub fn tool(&self, kind: ToolKind) -> Option<&ToolConfiguration> {
        self.tools.get(&kind)
    }

    /// Get a mutable tool by kind.
    pub fn tool_mut(&mut self, kind: ToolKind) -> Option<&mut ToolConfiguration> {
        self.tools.get_mut(&kind)
    }

    /// Get a mutable tool by kind, failing if the tool chain lacks it.
    pub fn require_tool_mut(&mut self, kind: ToolKind) -> Result<&mut ToolConfiguration> {
        let toolchain = &self.toolchain;
        self.tools
            .get_mut(&kind)
            .ok_or_else(|| anyhow!("tool chain `{}` has no {}", toolchain, kind))
    }

    /// Add or replace a tool for this platform only.
    pub fn set_tool(&mut self, tool: ToolConfiguration) {
        self.tools.insert(tool.kind(), tool);
    }

    /// Iterate over the tools in kind order.
    pub fn tools(&self) -> impl Iterator<Item = &ToolConfiguration> + '_ {
        self.tools.values()
    }

    /// Directories searched for tool executables before `PATH`.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Render the command for a tool, if the tool chain has it.
    pub fn command(
        &self,
        kind: ToolKind,
        extra: impl IntoIterator<Item = impl Into<String>>,
    ) -> Option<CommandSpec> {
        self.tool(kind).map(|tool| tool.command(extra))
    }

    /// Locate the executable of a tool on the search path.
    pub fn locate(&self, kind: ToolKind) -> Option<PathBuf> {
        self.tool(kind)
            .and_then(|tool| tool.locate(&self.search_path))
    }
}
