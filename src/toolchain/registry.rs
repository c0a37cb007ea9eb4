//! The set of tool chains declared for one build.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::core::platform::TargetPlatform;

use super::{NativeToolChain, PlatformToolChain, ToolChainError};

/// Tool chains of a build, keyed by unique name.
#[derive(Debug, Default)]
pub struct ToolChainRegistry {
    chains: BTreeMap<String, NativeToolChain>,
}

impl ToolChainRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ToolChainRegistry {
            chains: BTreeMap::new(),
        }
    }

    /// Add a tool chain. Names are unique within a registry.
    pub fn add(&mut self, toolchain: NativeToolChain) -> Result<(), ToolChainError> {
        if self.chains.contains_key(toolchain.name()) {
            return Err(ToolChainError::DuplicateToolChain {
                name: toolchain.name().to_string(),
            });
        }
        self.chains.insert(toolchain.name().to_string(), toolchain);
        Ok(())
    }

    /// Get a tool chain by name.
    pub fn get(&self, name: &str) -> Option<&NativeToolChain> {
        self.chains.get(name)
    }

    /// Get a mutable tool chain by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut NativeToolChain> {
        self.chains.get_mut(name)
    }

    /// Find the tool chain whose output type is `output_type`.
    pub fn by_output_type(&self, output_type: &str) -> Option<&NativeToolChain> {
        self.chains
            .values()
            .find(|tc| tc.output_type() == output_type)
    }

    /// Tool chain names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.chains.keys().map(|k| k.as_str())
    }

    /// Iterate over tool chains in name order.
    pub fn iter(&self) -> impl Iterator<Item = &NativeToolChain> + '_ {
        self.chains.values()
    }

    /// Get the number of tool chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Select every tool chain for `platform`.
    ///
    /// Tool chains share no state, so they are configured in parallel.
    /// Results are returned in name order; one failure does not affect the
    /// others.
    pub fn select_all(
        &self,
        platform: &TargetPlatform,
    ) -> Vec<(String, Result<PlatformToolChain, ToolChainError>)> {
        let chains: Vec<&NativeToolChain> = self.chains.values().collect();

        chains
            .par_iter()
            .map(|tc| (tc.name().to_string(), tc.select(platform)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::bail;

    use super::*;
    use crate::core::os::{OperatingSystem, OsFamily};
    use crate::core::path::BaseDirResolver;
    use crate::toolchain::{GccCompatible, Swiftc, ToolChainKind};

    fn chain(name: &str, kind: Arc<dyn ToolChainKind>, os: OperatingSystem) -> NativeToolChain {
        NativeToolChain::new(name, kind, Arc::new(os), Arc::new(BaseDirResolver::new("/p"))).unwrap()
    }

    #[test]
    fn test_unique_names() {
        let mut registry = ToolChainRegistry::new();
        registry
            .add(chain("gcc", Arc::new(GccCompatible::gcc()), OperatingSystem::linux()))
            .unwrap();

        let err = registry
            .add(chain("gcc", Arc::new(Swiftc::new()), OperatingSystem::macos()))
            .unwrap_err();
        assert!(matches!(err, ToolChainError::DuplicateToolChain { .. }));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("gcc").unwrap().type_name(), "GNU GCC");
    }

    #[test]
    fn test_by_output_type() {
        let mut registry = ToolChainRegistry::new();
        registry
            .add(chain("clang", Arc::new(GccCompatible::clang()), OperatingSystem::macos()))
            .unwrap();
        registry
            .add(chain("swift", Arc::new(Swiftc::new()), OperatingSystem::linux()))
            .unwrap();

        assert_eq!(
            registry.by_output_type("clang-macos").unwrap().name(),
            "clang"
        );
        assert!(registry.by_output_type("clang-linux").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["clang", "swift"]);
    }

    #[test]
    fn test_select_all_isolates_failures() {
        let mut registry = ToolChainRegistry::new();
        let mut broken = chain("broken", Arc::new(GccCompatible::gcc()), OperatingSystem::linux());
        broken.each_platform(|_| bail!("misconfigured"));
        registry.add(broken).unwrap();
        registry
            .add(chain("clang", Arc::new(GccCompatible::clang()), OperatingSystem::linux()))
            .unwrap();

        let platform = TargetPlatform::new("x64", OsFamily::Linux, "x86_64");
        let results = registry.select_all(&platform);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "broken");
        assert!(matches!(
            results[0].1,
            Err(ToolChainError::ConfigureFailed { .. })
        ));
        assert_eq!(results[1].0, "clang");
        assert!(results[1].1.is_ok());
    }

    #[test]
    fn test_get_mut_allows_late_configuration() {
        let mut registry = ToolChainRegistry::new();
        registry
            .add(chain("gcc", Arc::new(GccCompatible::gcc()), OperatingSystem::linux()))
            .unwrap();

        registry.get_mut("gcc").unwrap().each_platform(|_| Ok(()));
        assert_eq!(registry.get("gcc").unwrap().action_count(), 1);
    }
}
