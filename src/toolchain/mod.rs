//! Native tool chains for C, C++ and Swift.
//!
//! A [`NativeToolChain`] separates what a tool chain *is* (its name, kind,
//! target operating system and tools) from how it is *configured* for a
//! particular target platform. Configuration is deferred: actions
//! registered with [`NativeToolChain::each_platform`] run, in order, each
//! time the tool chain is selected for a platform.
//!
//! ```ignore
//! let mut gcc = NativeToolChain::new("gcc", Arc::new(GccCompatible::gcc()), os, resolver)?;
//! gcc.each_platform(|view| {
//!     view.require_tool_mut(ToolKind::CCompiler)?.arg("-Wall");
//!     Ok(())
//! });
//! let x86 = gcc.select(&TargetPlatform::named("x86"))?;
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::os::OsNaming;
use crate::core::path::PathResolver;
use crate::core::platform::TargetPlatform;

mod broadcast;
mod error;
mod gcc;
mod msvc;
pub mod registry;
mod swiftc;
mod targeted;
mod tool;

pub use broadcast::{Action, ActionBroadcast, ActionError};
pub use error::ToolChainError;
pub use gcc::{GccCompatible, GccFamily};
pub use msvc::VisualCpp;
pub use registry::ToolChainRegistry;
pub use swiftc::Swiftc;
pub use targeted::PlatformToolChain;
pub use tool::{CommandSpec, ToolConfiguration, ToolKind};

/// Names accepted by [`kind_for_name`].
pub const KNOWN_KINDS: [&str; 4] = ["gcc", "clang", "visual-cpp", "swiftc"];

/// A family of tool chains.
///
/// Each kind names itself and supplies the tools a fresh tool chain starts
/// with.
pub trait ToolChainKind: Send + Sync + fmt::Debug {
    /// Classification shown in display names (e.g. "GNU GCC").
    fn type_name(&self) -> &str;

    /// Tools installed when a tool chain of this kind is created.
    fn default_tools(&self) -> Vec<ToolConfiguration>;

    /// Name of the file passed to the linker for a shared library.
    ///
    /// Receives the runtime shared library name. `None` means the linker
    /// uses the runtime artifact itself.
    fn link_file_name(&self, _shared_library_name: &str) -> Option<String> {
        None
    }
}

/// Look up a built-in tool chain kind by name.
pub fn kind_for_name(name: &str) -> Result<Arc<dyn ToolChainKind>, ToolChainError> {
    match name {
        "gcc" => Ok(Arc::new(GccCompatible::gcc())),
        "clang" => Ok(Arc::new(GccCompatible::clang())),
        "visual-cpp" | "msvc" => Ok(Arc::new(VisualCpp::new())),
        "swiftc" | "swift" => Ok(Arc::new(Swiftc::new())),
        other => Err(ToolChainError::UnknownKind {
            kind: other.to_string(),
            known: KNOWN_KINDS.iter().map(|k| k.to_string()).collect(),
        }),
    }
}

/// One named tool chain bound to an operating system.
///
/// Identity is fixed at construction. Tools may be added and platform
/// actions registered afterwards; nothing is ever removed.
#[derive(Debug)]
pub struct NativeToolChain {
    name: String,
    kind: Arc<dyn ToolChainKind>,
    operating_system: Arc<dyn OsNaming>,
    resolver: Arc<dyn PathResolver>,
    tools: BTreeMap<ToolKind, ToolConfiguration>,
    search_path: Vec<PathBuf>,
    targets: Vec<String>,
    configure_actions: ActionBroadcast<PlatformToolChain>,
}

impl NativeToolChain {
    /// Create a tool chain with the default tools of `kind`.
    ///
    /// Fails with [`ToolChainError::EmptyName`] for an empty or blank name.
    pub fn new(
        name: impl Into<String>,
        kind: Arc<dyn ToolChainKind>,
        operating_system: Arc<dyn OsNaming>,
        resolver: Arc<dyn PathResolver>,
    ) -> Result<Self, ToolChainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ToolChainError::EmptyName);
        }

        let tools = kind
            .default_tools()
            .into_iter()
            .map(|tool| (tool.kind(), tool))
            .collect();

        tracing::debug!(
            "Declared tool chain `{}` ({}) for {}",
            name,
            kind.type_name(),
            operating_system.name()
        );

        Ok(NativeToolChain {
            name,
            kind,
            operating_system,
            resolver,
            tools,
            search_path: Vec::new(),
            targets: Vec::new(),
            configure_actions: ActionBroadcast::new(),
        })
    }

    /// Get the tool chain name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the kind classification (e.g. "GNU GCC").
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// `Tool chain '<name>' (<type name>)`.
    pub fn display_name(&self) -> String {
        format!("Tool chain '{}' ({})", self.name, self.type_name())
    }

    /// `<name>-<os name>`; distinct for same-named chains on different OSes.
    pub fn output_type(&self) -> String {
        format!("{}-{}", self.name, self.operating_system.name())
    }

    /// The operating system naming policy.
    pub fn operating_system(&self) -> &dyn OsNaming {
        self.operating_system.as_ref()
    }

    /// Executable file name for `base` on this tool chain's OS.
    pub fn executable_name(&self, base: &str) -> String {
        self.operating_system.executable_name(base)
    }

    /// Shared library file name for `base` on this tool chain's OS.
    pub fn shared_library_name(&self, base: &str) -> String {
        self.operating_system.shared_library_name(base)
    }

    /// File handed to the linker when linking against shared library `base`.
    pub fn shared_library_link_file_name(&self, base: &str) -> String {
        let shared = self.shared_library_name(base);
        self.kind.link_file_name(&shared).unwrap_or(shared)
    }

    /// Static library file name for `base` on this tool chain's OS.
    pub fn static_library_name(&self, base: &str) -> String {
        self.operating_system.static_library_name(base)
    }

    /// Register an action run for every platform this tool chain is selected for.
    pub fn each_platform<F>(&mut self, action: F)
    where
        F: Fn(&mut PlatformToolChain) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.configure_actions.add(action);
    }

    /// Declare `platform` as supported and register an action for it alone.
    ///
    /// Once any platform is declared, selecting an undeclared one fails.
    pub fn target<F>(&mut self, platform: impl Into<String>, action: F)
    where
        F: Fn(&mut PlatformToolChain) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let platform = platform.into();
        if !self.targets.contains(&platform) {
            self.targets.push(platform.clone());
        }

        self.configure_actions.add(move |view| {
            if view.platform().name == platform {
                action(view)
            } else {
                Ok(())
            }
        });
    }

    /// Platforms declared through [`NativeToolChain::target`].
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Whether [`NativeToolChain::select`] accepts `platform`.
    pub fn is_targeting(&self, platform: &TargetPlatform) -> bool {
        self.targets.is_empty() || self.targets.contains(&platform.name)
    }

    /// Number of registered platform actions.
    pub fn action_count(&self) -> usize {
        self.configure_actions.len()
    }

    /// Resolve a path with the tool chain's path resolver.
    pub fn resolve(&self, path: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        self.resolver.resolve(path.as_ref())
    }

    /// Resolve `entry` and append it to the tool search path.
    pub fn path(&mut self, entry: impl AsRef<Path>) -> anyhow::Result<()> {
        let resolved = self.resolve(entry)?;
        tracing::debug!(
            "Tool chain `{}` searches {}",
            self.name,
            resolved.display()
        );
        self.search_path.push(resolved);
        Ok(())
    }

    /// Directories searched for tool executables before `PATH`.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Add a tool. Each kind may be present once.
    pub fn add_tool(&mut self, tool: ToolConfiguration) -> Result<(), ToolChainError> {
        if self.tools.contains_key(&tool.kind()) {
            return Err(ToolChainError::DuplicateTool {
                toolchain: self.name.clone(),
                tool: tool.kind(),
            });
        }
        self.tools.insert(tool.kind(), tool);
        Ok(())
    }

    /// Get a tool by kind.
    pub fn tool(&self, kind: ToolKind) -> Option<&ToolConfiguration> {
        self.tools.get(&kind)
    }

    /// Get a mutable tool by kind.
    pub fn tool_mut(&mut self, kind: ToolKind) -> Option<&mut ToolConfiguration> {
        self.tools.get_mut(&kind)
    }

    /// Iterate over the tools in kind order.
    pub fn tools(&self) -> impl Iterator<Item = &ToolConfiguration> + '_ {
        self.tools.values()
    }

    /// Configure this tool chain for `platform`.
    ///
    /// Every platform action runs against a fresh copy of the tools, in
    /// registration order. The first failing action aborts the selection;
    /// the partially configured view is discarded.
    pub fn select(&self, platform: &TargetPlatform) -> Result<PlatformToolChain, ToolChainError> {
        if !self.is_targeting(platform) {
            return Err(ToolChainError::UnsupportedPlatform {
                toolchain: self.name.clone(),
                platform: platform.name.clone(),
                targets: self.targets.clone(),
            });
        }

        tracing::debug!(
            "Configuring `{}` for {} ({} actions)",
            self.name,
            platform.name,
            self.configure_actions.len()
        );

        let mut view = PlatformToolChain::new(
            self.name.clone(),
            platform.clone(),
            self.tools.clone(),
            self.search_path.clone(),
        );

        self.configure_actions
            .execute(&mut view)
            .map_err(|e| ToolChainError::ConfigureFailed {
                toolchain: self.name.clone(),
                platform: platform.name.clone(),
                index: e.index,
                source: e.source,
            })?;

        Ok(view)
    }
}

impl fmt::Display for NativeToolChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
