//! Swift language version classification.

use std::fmt;

use semver::Version;

/// Swift language generations the tool chain distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwiftVersion {
    Swift2,
    Swift3,
    Swift4,
    Unknown,
}

impl SwiftVersion {
    /// Classify a swiftc version by its major component.
    pub fn of(compiler_version: &Version) -> SwiftVersion {
        match compiler_version.major {
            2 => SwiftVersion::Swift2,
            3 => SwiftVersion::Swift3,
            4 => SwiftVersion::Swift4,
            _ => SwiftVersion::Unknown,
        }
    }

    /// Classify a version string, allowing `4` and `4.2` as well as `4.2.1`.
    ///
    /// Unparseable input classifies as [`SwiftVersion::Unknown`].
    pub fn parse_lenient(s: &str) -> SwiftVersion {
        parse_version_lenient(s.trim())
            .map(|v| SwiftVersion::of(&v))
            .unwrap_or(SwiftVersion::Unknown)
    }

    /// Get the version name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SwiftVersion::Swift2 => "SWIFT2",
            SwiftVersion::Swift3 => "SWIFT3",
            SwiftVersion::Swift4 => "SWIFT4",
            SwiftVersion::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SwiftVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a version string, filling in missing minor and patch components.
fn parse_version_lenient(s: &str) -> Option<Version> {
    if let Ok(v) = s.parse() {
        return Some(v);
    }

    let parts: Vec<&str> = s.split('.').collect();
    match parts.len() {
        1 => {
            let major: u64 = parts[0].parse().ok()?;
            Some(Version::new(major, 0, 0))
        }
        2 => {
            let major: u64 = parts[0].parse().ok()?;
            let minor: u64 = parts[1].parse().ok()?;
            Some(Version::new(major, minor, 0))
        }
        _ => None,
    }
}
