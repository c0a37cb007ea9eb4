//! Tool chain error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::toolchain::tool::ToolKind;
use crate::util::diagnostic::Diagnostic;

/// Error while declaring or configuring a tool chain.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ToolChainError {
    #[error("tool chain name must not be empty")]
    #[diagnostic(code(shipwright::toolchain::empty_name))]
    EmptyName,

    #[error("tool chain `{toolchain}` already has a {tool}")]
    #[diagnostic(code(shipwright::toolchain::duplicate_tool))]
    DuplicateTool { toolchain: String, tool: ToolKind },

    #[error("tool chain `{name}` is already declared")]
    #[diagnostic(code(shipwright::toolchain::duplicate_toolchain))]
    DuplicateToolChain { name: String },

    #[error("tool chain `{toolchain}` does not target platform `{platform}`")]
    #[diagnostic(code(shipwright::toolchain::unsupported_platform))]
    UnsupportedPlatform {
        toolchain: String,
        platform: String,
        targets: Vec<String>,
    },

    #[error("failed to configure tool chain `{toolchain}` for platform `{platform}`")]
    #[diagnostic(code(shipwright::toolchain::configure_failed))]
    ConfigureFailed {
        toolchain: String,
        platform: String,
        /// Registration index of the failing action
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("unknown tool chain kind `{kind}`")]
    #[diagnostic(code(shipwright::toolchain::unknown_kind))]
    UnknownKind { kind: String, known: Vec<String> },
}

impl ToolChainError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ToolChainError::EmptyName => Diagnostic::error("tool chain declared without a name")
                .with_suggestion("Give every [[toolchain]] entry a `name`"),

            ToolChainError::DuplicateTool { toolchain, tool } => Diagnostic::error(format!(
                "tool chain `{}` declares {} twice",
                toolchain, tool
            ))
            .with_suggestion(format!("Configure the existing {} instead of adding one", tool)),

            ToolChainError::DuplicateToolChain { name } => {
                Diagnostic::error(format!("tool chain `{}` is declared twice", name))
                    .with_suggestion("Rename one of the tool chains")
            }

            ToolChainError::UnsupportedPlatform {
                toolchain,
                platform,
                targets,
            } => Diagnostic::error(format!(
                "tool chain `{}` cannot build for `{}`",
                toolchain, platform
            ))
            .with_context(format!("declared targets: {}", targets.join(", ")))
            .with_suggestion(format!(
                "Add `{}` to the `targets` of `{}`",
                platform, toolchain
            )),

            ToolChainError::ConfigureFailed {
                toolchain,
                platform,
                index,
                source,
            } => Diagnostic::error(format!(
                "configuring `{}` for `{}` failed",
                toolchain, platform
            ))
            .with_context(format!("action #{} returned: {:#}", index, source))
            .with_suggestion("Later configuration actions were not run"),

            ToolChainError::UnknownKind { kind, known } => {
                Diagnostic::error(format!("unknown tool chain kind `{}`", kind))
                    .with_context(format!("known kinds: {}", known.join(", ")))
            }
        }
    }
}
