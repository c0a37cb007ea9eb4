//! Operating system naming policies.
//!
//! A tool chain never inspects the host itself. It is handed an
//! [`OsNaming`] policy at construction and asks it how executables and
//! libraries are named on the operating system the chain targets.

use std::fmt;

/// Naming conventions of one operating system.
///
/// All naming functions are total: any input string produces a name, and
/// the same input always produces the same name.
pub trait OsNaming: Send + Sync + fmt::Debug {
    /// Short name of the operating system (e.g. "linux", "windows").
    fn name(&self) -> &str;

    /// Human readable description (name, version, architecture).
    fn display_name(&self) -> String;

    /// File name of an executable built from `base`.
    fn executable_name(&self, base: &str) -> String;

    /// File name of a shared library built from `base`.
    fn shared_library_name(&self, base: &str) -> String;

    /// File name of a static library built from `base`.
    fn static_library_name(&self, base: &str) -> String;
}

/// Operating system families with distinct naming rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Linux,
    MacOs,
    FreeBsd,
    Solaris,
    /// Any other Unix-like system
    Unix,
    Windows,
}

impl OsFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Linux => "linux",
            OsFamily::MacOs => "macos",
            OsFamily::FreeBsd => "freebsd",
            OsFamily::Solaris => "solaris",
            OsFamily::Unix => "unix",
            OsFamily::Windows => "windows",
        }
    }

    /// Classify an operating system name.
    ///
    /// Accepts both short names (`linux`, `macos`) and the long names
    /// reported by some runtimes (`Windows 10`, `Mac OS X`, `SunOS`).
    /// Unrecognized names are treated as generic Unix.
    pub fn for_name(name: &str) -> OsFamily {
        let name = name.trim().to_lowercase();

        if name.contains("windows") {
            OsFamily::Windows
        } else if name.contains("mac os x")
            || name.contains("darwin")
            || name.contains("macos")
            || name.contains("osx")
        {
            OsFamily::MacOs
        } else if name.contains("sunos") || name.contains("solaris") {
            OsFamily::Solaris
        } else if name.contains("linux") {
            OsFamily::Linux
        } else if name.contains("freebsd") {
            OsFamily::FreeBsd
        } else {
            OsFamily::Unix
        }
    }

    /// Whether this family follows Windows naming rules.
    pub fn is_windows(&self) -> bool {
        matches!(self, OsFamily::Windows)
    }

    fn shared_library_suffix(&self) -> &'static str {
        match self {
            OsFamily::MacOs => ".dylib",
            OsFamily::Windows => ".dll",
            _ => ".so",
        }
    }

    fn static_library_suffix(&self) -> &'static str {
        match self {
            OsFamily::Windows => ".lib",
            _ => ".a",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete operating system and its naming policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatingSystem {
    family: OsFamily,
    name: String,
    version: Option<String>,
    arch: String,
}

impl OperatingSystem {
    /// Create an operating system of the given family.
    pub fn new(family: OsFamily, name: impl Into<String>) -> Self {
        OperatingSystem {
            family,
            name: name.into(),
            version: None,
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Create an operating system from its name, classifying the family.
    pub fn for_name(name: &str) -> Self {
        OperatingSystem::new(OsFamily::for_name(name), name.trim())
    }

    /// Detect the host operating system.
    pub fn current() -> Self {
        OperatingSystem::for_name(std::env::consts::OS)
    }

    /// Shorthand for a Linux system.
    pub fn linux() -> Self {
        OperatingSystem::new(OsFamily::Linux, "linux")
    }

    /// Shorthand for a macOS system.
    pub fn macos() -> Self {
        OperatingSystem::new(OsFamily::MacOs, "macos")
    }

    /// Shorthand for a Windows system.
    pub fn windows() -> Self {
        OperatingSystem::new(OsFamily::Windows, "windows")
    }

    /// Set the operating system version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the architecture reported in the display name.
    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Get the operating system family.
    pub fn family(&self) -> OsFamily {
        self.family
    }

    /// Get the operating system version, if known.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Get the architecture.
    pub fn arch(&self) -> &str {
        &self.arch
    }
}

impl OsNaming for OperatingSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> String {
        match &self.version {
            Some(version) => format!("{} {} {}", self.name, version, self.arch),
            None => format!("{} {}", self.name, self.arch),
        }
    }

    fn executable_name(&self, base: &str) -> String {
        if self.family.is_windows() {
            with_extension(base, ".exe")
        } else {
            base.to_string()
        }
    }

    fn shared_library_name(&self, base: &str) -> String {
        let suffix = self.family.shared_library_suffix();
        if self.family.is_windows() {
            with_extension(base, suffix)
        } else {
            unix_library_name(base, suffix)
        }
    }

    fn static_library_name(&self, base: &str) -> String {
        let suffix = self.family.static_library_suffix();
        if self.family.is_windows() {
            with_extension(base, suffix)
        } else {
            unix_library_name(base, suffix)
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Unix libraries get a `lib` prefix on the file name and a suffix.
///
/// Names already carrying the suffix are returned unchanged.
fn unix_library_name(base: &str, suffix: &str) -> String {
    if base.ends_with(suffix) {
        return base.to_string();
    }

    match base.rfind('/') {
        Some(pos) => format!("{}lib{}{}", &base[..=pos], &base[pos + 1..], suffix),
        None => format!("lib{}{}", base, suffix),
    }
}

/// Replace the extension of the last path component with `extension`.
///
/// Matching extensions are kept as written, ignoring case. A leading dot
/// names a hidden file and does not start an extension.
fn with_extension(path: &str, extension: &str) -> String {
    if path.to_lowercase().ends_with(extension) {
        return path.to_string();
    }

    let file_start = path.rfind(['/', '\\']).map(|p| p + 1).unwrap_or(0);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => format!("{}{}", &path[..file_start + dot], extension),
        _ => format!("{}{}", path, extension),
    }
}
