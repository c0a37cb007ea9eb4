//! Resolution of path-like values against a project root.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

/// Turns a path-like value into an absolute file.
///
/// Failure semantics belong to the resolver; callers pass its errors on
/// unchanged.
pub trait PathResolver: Send + Sync + fmt::Debug {
    /// Resolve `path` to an absolute path.
    fn resolve(&self, path: &Path) -> Result<PathBuf>;
}

/// What a resolved path is required to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathValidation {
    /// No check; the path may not exist yet
    #[default]
    None,
    /// The path must exist
    Exists,
    /// The path must be an existing file
    File,
    /// The path must be an existing directory
    Directory,
}

/// Errors raised by [`BaseDirResolver`].
#[derive(Debug, Error)]
pub enum PathError {
    #[error("cannot resolve an empty path")]
    Empty,

    #[error("path does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("path is not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
}

/// Resolves relative paths against a fixed base directory.
#[derive(Debug, Clone)]
pub struct BaseDirResolver {
    base: PathBuf,
    validation: PathValidation,
}

impl BaseDirResolver {
    /// Create a resolver rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        BaseDirResolver {
            base: base.into(),
            validation: PathValidation::None,
        }
    }

    /// Require resolved paths to pass `validation`.
    pub fn with_validation(mut self, validation: PathValidation) -> Self {
        self.validation = validation;
        self
    }

    /// Get the base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn validate(&self, path: PathBuf) -> Result<PathBuf, PathError> {
        match self.validation {
            PathValidation::None => Ok(path),
            PathValidation::Exists if path.exists() => Ok(path),
            PathValidation::File if path.is_file() => Ok(path),
            PathValidation::Directory if path.is_dir() => Ok(path),
            _ if !path.exists() => Err(PathError::NotFound { path }),
            PathValidation::File => Err(PathError::NotAFile { path }),
            _ => Err(PathError::NotADirectory { path }),
        }
    }
}

impl PathResolver for BaseDirResolver {
    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(PathError::Empty.into());
        }

        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        };

        Ok(self.validate(normalize(&joined))?)
    }
}

/// Lexically remove `.` and `..` components.
///
/// `..` at the root is dropped, matching how the OS treats `/..`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }

    out
}
