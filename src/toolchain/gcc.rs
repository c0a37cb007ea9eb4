//! GCC and Clang tool chain kinds.

use super::tool::{ToolConfiguration, ToolKind};
use super::ToolChainKind;

/// Compiler family of a GCC-compatible tool chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GccFamily {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Clang/LLVM
    Clang,
}

/// GCC-compatible tool chain (GCC or Clang).
#[derive(Debug, Clone)]
pub struct GccCompatible {
    family: GccFamily,
}

impl GccCompatible {
    /// Create a GCC-compatible kind of the given family.
    pub fn new(family: GccFamily) -> Self {
        GccCompatible { family }
    }

    /// The GNU GCC kind.
    pub fn gcc() -> Self {
        GccCompatible::new(GccFamily::Gcc)
    }

    /// The Clang kind.
    pub fn clang() -> Self {
        GccCompatible::new(GccFamily::Clang)
    }

    /// Get the compiler family.
    pub fn family(&self) -> GccFamily {
        self.family
    }

    /// Infer C++ compiler path from C compiler path.
    ///
    /// Handles common patterns:
    /// - gcc, x86_64-linux-gnu-gcc -> g++, x86_64-linux-gnu-g++
    /// - clang, clang-17 -> clang++, clang++-17
    /// - gcc-12 -> g++-12
    /// - cc, /usr/bin/cc -> c++, /usr/bin/c++
    pub fn infer_cxx(cc: &str) -> String {
        // Versioned drivers keep their suffix after the C++ name
        if let Some((stem, version)) = cc.rsplit_once('-') {
            let is_version =
                !version.is_empty() && version.chars().all(|c| c.is_ascii_digit() || c == '.');
            if is_version && (stem.ends_with("gcc") || stem.ends_with("clang")) {
                return format!("{}-{}", GccCompatible::infer_cxx(stem), version);
            }
        }

        // gcc or *-gcc -> g++ or *-g++
        if let Some(prefix) = cc.strip_suffix("gcc") {
            return format!("{}g++", prefix);
        }

        if cc.ends_with("clang") {
            return format!("{}++", cc);
        }

        // Only match "cc" when it's a complete basename (not "mycc")
        let is_standalone_cc = cc == "cc"
            || cc.ends_with("/cc")
            || cc.ends_with("\\cc")
            || cc.ends_with("-cc");

        if is_standalone_cc {
            return format!("{}++", &cc[..cc.len() - 1]);
        }

        // Fallback: append ++ (handles edge cases like "tcc" -> "tcc++")
        format!("{}++", cc)
    }
}

impl ToolChainKind for GccCompatible {
    fn type_name(&self) -> &str {
        match self.family {
            GccFamily::Gcc => "GNU GCC",
            GccFamily::Clang => "Clang",
        }
    }

    fn default_tools(&self) -> Vec<ToolConfiguration> {
        let (cc, cxx) = match self.family {
            GccFamily::Gcc => ("gcc", "g++"),
            GccFamily::Clang => ("clang", "clang++"),
        };

        vec![
            ToolConfiguration::new(ToolKind::CCompiler, cc),
            ToolConfiguration::new(ToolKind::CppCompiler, cxx),
            ToolConfiguration::new(ToolKind::ObjectiveCCompiler, cc),
            ToolConfiguration::new(ToolKind::ObjectiveCppCompiler, cxx),
            ToolConfiguration::new(ToolKind::Assembler, "as"),
            ToolConfiguration::new(ToolKind::Linker, cxx),
            ToolConfiguration::new(ToolKind::StaticLibArchiver, "ar"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_cxx() {
        assert_eq!(GccCompatible::infer_cxx("gcc"), "g++");
        assert_eq!(
            GccCompatible::infer_cxx("x86_64-linux-gnu-gcc"),
            "x86_64-linux-gnu-g++"
        );
        assert_eq!(GccCompatible::infer_cxx("clang"), "clang++");
        assert_eq!(
            GccCompatible::infer_cxx("/usr/bin/clang-17"),
            "/usr/bin/clang++-17"
        );
        assert_eq!(GccCompatible::infer_cxx("gcc-12"), "g++-12");
        assert_eq!(
            GccCompatible::infer_cxx("aarch64-linux-gnu-gcc-13.2"),
            "aarch64-linux-gnu-g++-13.2"
        );
        assert_eq!(GccCompatible::infer_cxx("cc"), "c++");
        assert_eq!(GccCompatible::infer_cxx("/usr/bin/cc"), "/usr/bin/c++");
        assert_eq!(GccCompatible::infer_cxx("tcc"), "tcc++");
    }

    #[test]
    fn test_gcc_defaults() {
        let tools = GccCompatible::gcc().default_tools();
        let linker = tools.iter().find(|t| t.kind() == ToolKind::Linker).unwrap();
        assert_eq!(linker.executable(), "g++");

        let ar = tools
            .iter()
            .find(|t| t.kind() == ToolKind::StaticLibArchiver)
            .unwrap();
        assert_eq!(ar.executable(), "ar");
        assert!(!tools.iter().any(|t| t.kind() == ToolKind::SwiftCompiler));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(GccCompatible::gcc().type_name(), "GNU GCC");
        assert_eq!(GccCompatible::clang().type_name(), "Clang");
    }

    #[test]
    fn test_no_link_file_override() {
        assert_eq!(GccCompatible::gcc().link_file_name("libfoo.so"), None);
    }
}
