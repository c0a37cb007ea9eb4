//! Target platforms a tool chain can be selected for.

use std::fmt;

use crate::core::os::OsFamily;

/// A named target platform: operating system family plus architecture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetPlatform {
    /// Platform name (e.g. "linux_x86-64", "windows_x86")
    pub name: String,
    /// Operating system family the platform runs
    pub os: OsFamily,
    /// CPU architecture (x86_64, aarch64, etc.)
    pub arch: String,
}

impl TargetPlatform {
    /// Create a new target platform.
    pub fn new(name: impl Into<String>, os: OsFamily, arch: impl Into<String>) -> Self {
        TargetPlatform {
            name: name.into(),
            os,
            arch: arch.into(),
        }
    }

    /// Create a platform named `name` for the host OS and architecture.
    pub fn named(name: impl Into<String>) -> Self {
        let host = TargetPlatform::host();
        TargetPlatform {
            name: name.into(),
            ..host
        }
    }

    /// Detect the host platform.
    ///
    /// The name is `<os>_<arch>` with `_` in the architecture replaced by `-`,
    /// so `linux` on `x86_64` becomes `linux_x86-64`.
    pub fn host() -> Self {
        let os = OsFamily::for_name(std::env::consts::OS);
        let arch = std::env::consts::ARCH;
        let name = format!("{}_{}", os.as_str(), arch.replace('_', "-"));

        TargetPlatform::new(name, os, arch)
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.os, self.arch)
    }
}
