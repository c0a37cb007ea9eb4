//! User-friendly diagnostic messages.
//!
//! Every error shown by the CLI carries its root cause, the context that
//! led to it and, where one exists, a suggested fix.

use std::fmt;
use std::path::PathBuf;

use crate::toolchain::ToolChainError;
use crate::util::config::ConfigError;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no tool chains are declared.
    pub const NO_TOOLCHAINS: &str =
        "help: Declare a [[toolchain]] in .shipwright/toolchains.toml";

    /// Suggestion when a tool chain name is not found.
    pub const TOOLCHAIN_NOT_FOUND: &str =
        "help: Run `shipwright list` to see declared tool chains";

    /// Suggestion when a config file cannot be used.
    pub const FIX_CONFIG: &str = "Fix or remove the file; nothing was loaded from any config";
}

/// An error message with optional context and suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  → {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Build a diagnostic for any application error.
///
/// Tool chain errors anywhere in the chain get their dedicated diagnostic,
/// with the outer context lines attached; other errors list their causes.
/// Config file errors point at the offending file.
pub fn from_error(err: &anyhow::Error) -> Diagnostic {
    let diag = describe(err);
    match err.chain().find_map(|cause| cause.downcast_ref::<ConfigError>()) {
        Some(config_err) => diag
            .with_location(config_err.path())
            .with_suggestion(suggestions::FIX_CONFIG),
        None => diag,
    }
}

fn describe(err: &anyhow::Error) -> Diagnostic {
    let outer: Vec<String> = err
        .chain()
        .take_while(|cause| cause.downcast_ref::<ToolChainError>().is_none())
        .map(|cause| cause.to_string())
        .collect();

    match err.downcast_ref::<ToolChainError>() {
        Some(tc_err) => outer
            .into_iter()
            .fold(tc_err.to_diagnostic(), |diag, ctx| diag.with_context(ctx)),
        None => {
            let mut causes = outer.into_iter();
            let message = causes.next().unwrap_or_default();
            causes.fold(Diagnostic::error(message), |diag, ctx| diag.with_context(ctx))
        }
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
