//! Tool kinds and per-tool command configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// The tools a native tool chain may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    CCompiler,
    CppCompiler,
    ObjectiveCCompiler,
    ObjectiveCppCompiler,
    Assembler,
    Linker,
    StaticLibArchiver,
    SwiftCompiler,
    WindowsResourceCompiler,
}

impl ToolKind {
    /// All tool kinds, in declaration order.
    pub const ALL: [ToolKind; 9] = [
        ToolKind::CCompiler,
        ToolKind::CppCompiler,
        ToolKind::ObjectiveCCompiler,
        ToolKind::ObjectiveCppCompiler,
        ToolKind::Assembler,
        ToolKind::Linker,
        ToolKind::StaticLibArchiver,
        ToolKind::SwiftCompiler,
        ToolKind::WindowsResourceCompiler,
    ];

    /// Get the tool kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::CCompiler => "c-compiler",
            ToolKind::CppCompiler => "cpp-compiler",
            ToolKind::ObjectiveCCompiler => "objective-c-compiler",
            ToolKind::ObjectiveCppCompiler => "objective-cpp-compiler",
            ToolKind::Assembler => "assembler",
            ToolKind::Linker => "linker",
            ToolKind::StaticLibArchiver => "static-lib-archiver",
            ToolKind::SwiftCompiler => "swift-compiler",
            ToolKind::WindowsResourceCompiler => "windows-resource-compiler",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match ToolKind::ALL.iter().find(|k| k.as_str() == s) {
            Some(kind) => Ok(*kind),
            None => bail!("unknown tool `{}`", s),
        }
    }
}

/// A command to execute, with program, arguments, and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to run (e.g., "gcc", "cl.exe")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
    /// Environment variables to set
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

type ArgsAction = Arc<dyn Fn(&mut Vec<String>) + Send + Sync>;

/// How one tool of a tool chain is invoked.
///
/// Argument actions run last, over the full argument list, every time a
/// command is rendered.
#[derive(Clone)]
pub struct ToolConfiguration {
    kind: ToolKind,
    executable: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    args_actions: Vec<ArgsAction>,
}

impl ToolConfiguration {
    /// Create a tool configuration running `executable`.
    pub fn new(kind: ToolKind, executable: impl Into<String>) -> Self {
        ToolConfiguration {
            kind,
            executable: executable.into(),
            args: Vec::new(),
            env: Vec::new(),
            args_actions: Vec::new(),
        }
    }

    /// Get the tool kind.
    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    /// Get the executable name or path.
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Replace the executable.
    pub fn set_executable(&mut self, executable: impl Into<String>) {
        self.executable = executable.into();
    }

    /// Get the configured arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Append an argument.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn extend_args(&mut self, args: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Get the configured environment.
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Set an environment variable, replacing an earlier value for `key`.
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.env.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.env.push((key, value)),
        }
        self
    }

    /// Register an action that rewrites the final argument list.
    pub fn with_arguments<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(&mut Vec<String>) + Send + Sync + 'static,
    {
        self.args_actions.push(Arc::new(action));
        self
    }

    /// Render the command for invoking this tool.
    ///
    /// Configured arguments come first, then `extra`; argument actions see
    /// the combined list.
    pub fn command(&self, extra: impl IntoIterator<Item = impl Into<String>>) -> CommandSpec {
        let mut args = self.args.clone();
        args.extend(extra.into_iter().map(|a| a.into()));

        for action in &self.args_actions {
            action(&mut args);
        }

        let mut cmd = CommandSpec::new(&self.executable).args(args);
        for (key, value) in &self.env {
            cmd = cmd.env(key, value);
        }
        cmd
    }

    /// Locate the executable on `search_path`, then on `PATH`.
    pub fn locate(&self, search_path: &[PathBuf]) -> Option<PathBuf> {
        let executable = Path::new(&self.executable);
        if executable.is_absolute() {
            return executable.is_file().then(|| executable.to_path_buf());
        }

        if !search_path.is_empty() {
            let cwd = std::env::current_dir().unwrap_or_default();
            if let Ok(paths) = std::env::join_paths(search_path) {
                if let Ok(found) = which::which_in(&self.executable, Some(paths), cwd) {
                    return Some(found);
                }
            }
        }

        which::which(&self.executable).ok()
    }
}

impl fmt::Debug for ToolConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolConfiguration")
            .field("kind", &self.kind)
            .field("executable", &self.executable)
            .field("args", &self.args)
            .field("env", &self.env)
            .field("args_actions", &self.args_actions.len())
            .finish()
    }
}
