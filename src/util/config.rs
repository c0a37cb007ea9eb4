//! Tool chain declaration files.
//!
//! Shipwright reads tool chains from two locations:
//! - Global: `~/.shipwright/toolchains.toml` - User-wide tool chains
//! - Project: `.shipwright/toolchains.toml` - Project-specific tool chains
//!
//! A project tool chain replaces a global tool chain with the same name.
//! A missing file declares nothing; a file that cannot be read or parsed
//! is an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::os::OperatingSystem;
use crate::core::path::BaseDirResolver;
use crate::toolchain::{
    kind_for_name, GccCompatible, NativeToolChain, PlatformToolChain, ToolChainRegistry,
    ToolConfiguration, ToolKind,
};

/// A tool chain config file that exists but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tool chain config: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tool chain config: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// The offending config file.
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Contents of a `toolchains.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolChainsConfig {
    /// Declared tool chains, in file order
    pub toolchain: Vec<ToolChainDecl>,
}

/// One `[[toolchain]]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolChainDecl {
    /// Unique tool chain name
    pub name: String,

    /// Tool chain kind (gcc, clang, visual-cpp, swiftc)
    pub kind: String,

    /// Target operating system; the host when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    /// Search path entries, relative to the project root
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathBuf>,

    /// Supported platforms; every platform when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,

    /// Tool overrides keyed by tool kind (e.g. `c-compiler`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tools: BTreeMap<String, ToolDecl>,

    /// Per-platform configuration, applied in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platform: Vec<PlatformDecl>,
}

/// A `[toolchain.tools.<kind>]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDecl {
    /// Executable name or path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,

    /// Arguments always passed to the tool
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Environment variables set for the tool
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// A `[[toolchain.platform]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDecl {
    /// Platform this entry applies to; every platform when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tool kind to configure
    pub tool: String,

    /// Replacement executable for this platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,

    /// Arguments appended for this platform
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl ToolChainsConfig {
    /// Load tool chain declarations from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load tool chain declarations if the file exists.
    ///
    /// A missing file declares nothing; any other failure is returned.
    pub fn load_if_exists(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No tool chain config at {}", path.display());
            Ok(Self::default())
        }
    }

    /// Save tool chain declarations to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize tool chain config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write tool chain config: {}", path.display()))?;

        Ok(())
    }

    /// Check if no tool chains are declared.
    pub fn is_empty(&self) -> bool {
        self.toolchain.is_empty()
    }

    /// Get a declaration by name.
    pub fn get(&self, name: &str) -> Option<&ToolChainDecl> {
        self.toolchain.iter().find(|decl| decl.name == name)
    }

    /// Merge another config into this one.
    ///
    /// Declarations in `other` replace same-named ones in place; new names
    /// are appended.
    pub fn merge(&mut self, other: ToolChainsConfig) {
        for decl in other.toolchain {
            match self.toolchain.iter_mut().find(|d| d.name == decl.name) {
                Some(existing) => *existing = decl,
                None => self.toolchain.push(decl),
            }
        }
    }

    /// Build a registry from these declarations.
    ///
    /// Relative search path entries resolve against `project_root`.
    pub fn into_registry(&self, project_root: &Path) -> Result<ToolChainRegistry> {
        let resolver = Arc::new(BaseDirResolver::new(project_root));
        let mut registry = ToolChainRegistry::new();

        for decl in &self.toolchain {
            let toolchain = decl
                .build(resolver.clone())
                .with_context(|| format!("invalid tool chain `{}`", decl.name))?;
            registry.add(toolchain)?;
        }

        Ok(registry)
    }
}

impl ToolChainDecl {
    fn build(&self, resolver: Arc<BaseDirResolver>) -> Result<NativeToolChain> {
        let kind = kind_for_name(&self.kind)?;
        let os = match &self.os {
            Some(name) => OperatingSystem::for_name(name),
            None => OperatingSystem::current(),
        };

        let mut toolchain = NativeToolChain::new(&self.name, kind, Arc::new(os), resolver)?;

        for (tool_name, decl) in &self.tools {
            let tool_kind = parse_tool(tool_name)?;
            apply_tool(&mut toolchain, tool_kind, decl)?;
        }

        // A custom C compiler brings its matching C++ driver unless one is given
        if matches!(self.kind.as_str(), "gcc" | "clang") {
            if let Some(cc) = self
                .tools
                .get(ToolKind::CCompiler.as_str())
                .and_then(|t| t.executable.as_deref())
            {
                let cxx = GccCompatible::infer_cxx(cc);
                for follower in [ToolKind::CppCompiler, ToolKind::Linker] {
                    if self.tools.contains_key(follower.as_str()) {
                        continue;
                    }
                    if let Some(tool) = toolchain.tool_mut(follower) {
                        tool.set_executable(cxx.clone());
                    }
                }
            }
        }

        for entry in &self.path {
            toolchain.path(entry)?;
        }

        for entry in &self.platform {
            let tool_kind = parse_tool(&entry.tool)?;
            let executable = entry.executable.clone();
            let args = entry.args.clone();
            let action = move |view: &mut PlatformToolChain| -> Result<()> {
                let tool = view.require_tool_mut(tool_kind)?;
                if let Some(executable) = &executable {
                    tool.set_executable(executable.clone());
                }
                tool.extend_args(args.iter().cloned());
                Ok(())
            };

            match &entry.name {
                Some(platform) => toolchain.target(platform.clone(), action),
                None => toolchain.each_platform(action),
            }
        }

        // Declared targets without platform entries still restrict selection
        for target in &self.targets {
            if !toolchain.targets().contains(target) {
                toolchain.target(target.clone(), |_| Ok(()));
            }
        }

        Ok(toolchain)
    }
}

fn parse_tool(name: &str) -> Result<ToolKind> {
    name.parse::<ToolKind>()
        .with_context(|| format!("invalid tool `{}`", name))
}

fn apply_tool(toolchain: &mut NativeToolChain, kind: ToolKind, decl: &ToolDecl) -> Result<()> {
    if toolchain.tool(kind).is_none() {
        let Some(executable) = &decl.executable else {
            bail!("{} has no default; `executable` is required", kind);
        };
        toolchain.add_tool(ToolConfiguration::new(kind, executable.clone()))?;
    }

    if let Some(tool) = toolchain.tool_mut(kind) {
        if let Some(executable) = &decl.executable {
            tool.set_executable(executable.clone());
        }
        tool.extend_args(decl.args.iter().cloned());
        for (key, value) in &decl.env {
            tool.set_env(key.clone(), value.clone());
        }
    }

    Ok(())
}

/// Load merged tool chain declarations from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.shipwright/toolchains.toml)
/// 2. Global config (~/.shipwright/toolchains.toml)
///
/// Either file failing to load fails the whole load, so a broken project
/// file never falls back to a same-named global tool chain.
pub fn load_toolchains_config(
    global_path: &Path,
    project_path: &Path,
) -> Result<ToolChainsConfig, ConfigError> {
    let mut config = ToolChainsConfig::load_if_exists(global_path)?;
    config.merge(ToolChainsConfig::load_if_exists(project_path)?);
    Ok(config)
}

/// Get the global shipwright config directory.
///
/// `SHIPWRIGHT_HOME` overrides the default of `~/.shipwright`.
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("SHIPWRIGHT_HOME") {
        return Some(PathBuf::from(home));
    }
    directories::BaseDirs::new().map(|b| b.home_dir().join(".shipwright"))
}

/// Get the global tool chain config path (`<global config dir>/toolchains.toml`).
pub fn global_toolchains_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("toolchains.toml"))
}

/// Get the project tool chain config path (.shipwright/toolchains.toml).
pub fn project_toolchains_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".shipwright").join("toolchains.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::os::OsFamily;
    use crate::core::platform::TargetPlatform;
    use crate::test_support::{project_with_config, GCC_CONFIG, MIXED_CONFIG};
    use crate::toolchain::ToolChainError;
    use tempfile::TempDir;

    fn x86() -> TargetPlatform {
        TargetPlatform::new("x86", OsFamily::Linux, "x86")
    }

    #[test]
    fn test_config_default() {
        let config = ToolChainsConfig::default();
        assert!(config.is_empty());
        assert!(config.get("gcc").is_none());
    }

    #[test]
    fn test_config_load() {
        let project = project_with_config(GCC_CONFIG);
        let config = ToolChainsConfig::load(&project_toolchains_config_path(project.path())).unwrap();

        let gcc = config.get("gcc").unwrap();
        assert_eq!(gcc.kind, "gcc");
        assert_eq!(gcc.os.as_deref(), Some("linux"));
        assert_eq!(gcc.path, vec![PathBuf::from("tools/bin")]);
        assert_eq!(gcc.targets, vec!["x86", "x86_64"]);

        let cc = &gcc.tools["c-compiler"];
        assert_eq!(cc.executable.as_deref(), Some("gcc-12"));
        assert_eq!(cc.args, vec!["-Wall"]);
        assert_eq!(cc.env.get("LANG").map(String::as_str), Some("C"));

        assert_eq!(gcc.platform.len(), 3);
        assert!(gcc.platform[0].name.is_none());
        assert_eq!(gcc.platform[1].name.as_deref(), Some("x86"));
    }

    #[test]
    fn test_config_load_reports_parse_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("toolchains.toml");
        std::fs::write(&path, "[[toolchain]]\nname = 3\n").unwrap();

        let err = ToolChainsConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse tool chain config"));
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_load_if_exists_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        let config = ToolChainsConfig::load_if_exists(&tmp.path().join("none.toml")).unwrap();
        assert!(config.is_empty());

        // A directory in place of the file cannot be read
        let dir = tmp.path().join("toolchains.toml");
        std::fs::create_dir(&dir).unwrap();
        let err = ToolChainsConfig::load_if_exists(&dir).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_config_save() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("toolchains.toml");

        let config = ToolChainsConfig {
            toolchain: vec![ToolChainDecl {
                name: "clang".to_string(),
                kind: "clang".to_string(),
                targets: vec!["arm64".to_string()],
                ..Default::default()
            }],
        };
        config.save(&path).unwrap();

        let loaded = ToolChainsConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_merge_replaces_by_name() {
        let mut base: ToolChainsConfig = toml::from_str(
            r#"
[[toolchain]]
name = "gcc"
kind = "gcc"
targets = ["x86"]

[[toolchain]]
name = "swift"
kind = "swiftc"
"#,
        )
        .unwrap();

        let project: ToolChainsConfig = toml::from_str(
            r#"
[[toolchain]]
name = "gcc"
kind = "clang"

[[toolchain]]
name = "msvc"
kind = "visual-cpp"
"#,
        )
        .unwrap();

        base.merge(project);

        let names: Vec<_> = base.toolchain.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["gcc", "swift", "msvc"]);
        // Replaced wholesale, not field by field
        let gcc = base.get("gcc").unwrap();
        assert_eq!(gcc.kind, "clang");
        assert!(gcc.targets.is_empty());
    }

    #[test]
    fn test_load_toolchains_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            "[[toolchain]]\nname = \"gcc\"\nkind = \"gcc\"\nos = \"linux\"\n",
        )
        .unwrap();
        std::fs::write(
            &project_path,
            "[[toolchain]]\nname = \"gcc\"\nkind = \"gcc\"\nos = \"windows\"\n",
        )
        .unwrap();

        let config = load_toolchains_config(&global_path, &project_path).unwrap();
        assert_eq!(config.toolchain.len(), 1);
        assert_eq!(config.get("gcc").unwrap().os.as_deref(), Some("windows"));

        let missing = tmp.path().join("missing.toml");
        let config = load_toolchains_config(&global_path, &missing).unwrap();
        assert_eq!(config.get("gcc").unwrap().os.as_deref(), Some("linux"));
    }

    #[test]
    fn test_broken_project_config_does_not_fall_back_to_global() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(&global_path, "[[toolchain]]\nname = \"gcc\"\nkind = \"gcc\"\n").unwrap();
        std::fs::write(
            &project_path,
            "[[toolchain]]\nname = \"gcc\"\nkind = \"clang\"\nos = 3\n",
        )
        .unwrap();

        let err = load_toolchains_config(&global_path, &project_path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), project_path.as_path());

        // A broken global file is fatal too
        std::fs::write(&global_path, "[[toolchain]]\ntargets = \"x86\"\n").unwrap();
        std::fs::remove_file(&project_path).unwrap();
        let err = load_toolchains_config(&global_path, &project_path).unwrap_err();
        assert_eq!(err.path(), global_path.as_path());
    }

    #[test]
    fn test_into_registry_configures_platforms() {
        let project = project_with_config(GCC_CONFIG);
        let config = ToolChainsConfig::load(&project_toolchains_config_path(project.path())).unwrap();
        let registry = config.into_registry(project.path()).unwrap();

        let gcc = registry.get("gcc").unwrap();
        assert_eq!(gcc.output_type(), "gcc-linux");
        assert_eq!(gcc.search_path(), &[project.path().join("tools/bin")]);
        assert_eq!(gcc.targets(), &["x86", "x86_64"]);

        // The C++ driver follows the custom C compiler
        assert_eq!(gcc.tool(ToolKind::CppCompiler).unwrap().executable(), "g++-12");
        assert_eq!(gcc.tool(ToolKind::Linker).unwrap().executable(), "g++-12");

        let view = gcc.select(&x86()).unwrap();
        let cc = view.tool(ToolKind::CCompiler).unwrap();
        assert_eq!(cc.executable(), "gcc-12");
        assert_eq!(cc.args(), &["-Wall", "-m32"]);
        assert_eq!(cc.env(), &[("LANG".to_string(), "C".to_string())]);
        assert_eq!(
            view.tool(ToolKind::Linker).unwrap().args(),
            &["-Wl,--as-needed"]
        );

        let err = gcc
            .select(&TargetPlatform::new("arm64", OsFamily::Linux, "aarch64"))
            .unwrap_err();
        assert!(matches!(err, ToolChainError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn test_into_registry_mixed_kinds() {
        let project = project_with_config(MIXED_CONFIG);
        let config = ToolChainsConfig::load(&project_toolchains_config_path(project.path())).unwrap();
        let registry = config.into_registry(project.path()).unwrap();

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["msvc", "swift"]);
        let msvc = registry.get("msvc").unwrap();
        assert_eq!(msvc.display_name(), "Tool chain 'msvc' (Visual Studio)");
        assert_eq!(msvc.shared_library_link_file_name("foo"), "foo.lib");

        let swift = registry.get("swift").unwrap();
        assert_eq!(swift.shared_library_name("foo"), "libfoo.dylib");
    }

    #[test]
    fn test_into_registry_rejects_unknown_kind() {
        let config: ToolChainsConfig =
            toml::from_str("[[toolchain]]\nname = \"tcc\"\nkind = \"tcc\"\n").unwrap();

        let err = config.into_registry(Path::new("/project")).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid tool chain `tcc`"));
        assert!(matches!(
            err.downcast_ref::<ToolChainError>(),
            Some(ToolChainError::UnknownKind { .. })
        ));
    }

    #[test]
    fn test_into_registry_rejects_unknown_tool() {
        let config: ToolChainsConfig = toml::from_str(
            "[[toolchain]]\nname = \"gcc\"\nkind = \"gcc\"\n[[toolchain.platform]]\ntool = \"debugger\"\n",
        )
        .unwrap();

        let err = config.into_registry(Path::new("/project")).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid tool `debugger`"));
    }

    #[test]
    fn test_extra_tool_needs_executable() {
        let config: ToolChainsConfig = toml::from_str(
            r#"
[[toolchain]]
name = "gcc"
kind = "gcc"

[toolchain.tools.windows-resource-compiler]
args = ["-O", "coff"]
"#,
        )
        .unwrap();
        let err = config.into_registry(Path::new("/project")).unwrap_err();
        assert!(format!("{:#}", err).contains("`executable` is required"));

        let config: ToolChainsConfig = toml::from_str(
            r#"
[[toolchain]]
name = "gcc"
kind = "gcc"

[toolchain.tools.windows-resource-compiler]
executable = "windres"
"#,
        )
        .unwrap();
        let registry = config.into_registry(Path::new("/project")).unwrap();
        let gcc = registry.get("gcc").unwrap();
        assert_eq!(
            gcc.tool(ToolKind::WindowsResourceCompiler).unwrap().executable(),
            "windres"
        );
    }
}
