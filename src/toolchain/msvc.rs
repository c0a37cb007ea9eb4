//! Visual C++ tool chain kind.

use super::tool::{ToolConfiguration, ToolKind};
use super::ToolChainKind;

/// Microsoft Visual C++ tool chain.
///
/// Shared libraries are linked against an import library (`foo.lib`)
/// while the runtime artifact stays `foo.dll`.
#[derive(Debug, Clone, Default)]
pub struct VisualCpp;

impl VisualCpp {
    /// Create the Visual C++ kind.
    pub fn new() -> Self {
        VisualCpp
    }
}

impl ToolChainKind for VisualCpp {
    fn type_name(&self) -> &str {
        "Visual Studio"
    }

    fn default_tools(&self) -> Vec<ToolConfiguration> {
        // cl.exe compiles both C and C++
        vec![
            ToolConfiguration::new(ToolKind::CCompiler, "cl.exe"),
            ToolConfiguration::new(ToolKind::CppCompiler, "cl.exe"),
            ToolConfiguration::new(ToolKind::Assembler, "ml.exe"),
            ToolConfiguration::new(ToolKind::Linker, "link.exe"),
            ToolConfiguration::new(ToolKind::StaticLibArchiver, "lib.exe"),
            ToolConfiguration::new(ToolKind::WindowsResourceCompiler, "rc.exe"),
        ]
    }

    fn link_file_name(&self, shared_library_name: &str) -> Option<String> {
        // Matched ignoring case, as Windows naming keeps `FOO.DLL` as written
        let stem_len = shared_library_name.len().checked_sub(4)?;
        let suffix = shared_library_name.get(stem_len..)?;
        suffix
            .eq_ignore_ascii_case(".dll")
            .then(|| format!("{}.lib", &shared_library_name[..stem_len]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_library_name() {
        let kind = VisualCpp::new();
        assert_eq!(kind.link_file_name("foo.dll"), Some("foo.lib".to_string()));
        assert_eq!(
            kind.link_file_name("out\\bar.dll"),
            Some("out\\bar.lib".to_string())
        );
    }

    #[test]
    fn test_import_library_name_ignores_case() {
        let kind = VisualCpp::new();
        assert_eq!(kind.link_file_name("FOO.DLL"), Some("FOO.lib".to_string()));
        assert_eq!(kind.link_file_name("Bar.Dll"), Some("Bar.lib".to_string()));
        assert_eq!(kind.link_file_name("dll"), None);
    }

    #[test]
    fn test_non_dll_has_no_import_library() {
        assert_eq!(VisualCpp::new().link_file_name("libfoo.so"), None);
    }

    #[test]
    fn test_defaults() {
        let tools = VisualCpp::new().default_tools();
        let kinds: Vec<_> = tools.iter().map(|t| t.kind()).collect();
        assert!(kinds.contains(&ToolKind::WindowsResourceCompiler));
        assert!(!kinds.contains(&ToolKind::ObjectiveCCompiler));

        let archiver = tools
            .iter()
            .find(|t| t.kind() == ToolKind::StaticLibArchiver)
            .unwrap();
        assert_eq!(archiver.executable(), "lib.exe");
    }
}
