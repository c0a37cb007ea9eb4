//! Command implementations

pub mod completions;
pub mod list;
pub mod names;
pub mod show;
pub mod swift_version;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use shipwright::toolchain::{NativeToolChain, ToolChainRegistry};
use shipwright::util::config::{
    global_toolchains_config_path, load_toolchains_config, project_toolchains_config_path,
};
use shipwright::util::diagnostic::suggestions;

/// Resolve the project directory, defaulting to the current directory.
pub fn project_root(project: Option<&Path>) -> Result<PathBuf> {
    match project {
        Some(path) => Ok(path.to_path_buf()),
        None => std::env::current_dir().context("failed to determine current directory"),
    }
}

/// Load the tool chains declared for `project` and in the global config.
pub fn load_registry(project: Option<&Path>) -> Result<ToolChainRegistry> {
    let root = project_root(project)?;
    let project_path = project_toolchains_config_path(&root);
    let global_path = global_toolchains_config_path().unwrap_or_default();

    tracing::debug!(
        "Loading tool chains from {} and {}",
        global_path.display(),
        project_path.display()
    );

    let config = load_toolchains_config(&global_path, &project_path)?;
    config.into_registry(&root)
}

/// Look up a declared tool chain by name.
pub fn find<'a>(registry: &'a ToolChainRegistry, name: &str) -> Result<&'a NativeToolChain> {
    registry.get(name).ok_or_else(|| {
        anyhow::anyhow!(
            "no tool chain named `{}`\n{}",
            name,
            suggestions::TOOLCHAIN_NOT_FOUND
        )
    })
}
