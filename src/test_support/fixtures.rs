//! Test fixtures for tool chain configuration scenarios.

use std::path::Path;

use tempfile::TempDir;

use crate::util::config::project_toolchains_config_path;

/// A GCC tool chain with a custom compiler, a search path and per-platform flags.
pub const GCC_CONFIG: &str = r#"
[[toolchain]]
name = "gcc"
kind = "gcc"
os = "linux"
path = ["tools/bin"]
targets = ["x86", "x86_64"]

[toolchain.tools.c-compiler]
executable = "gcc-12"
args = ["-Wall"]
env = { LANG = "C" }

[[toolchain.platform]]
tool = "linker"
args = ["-Wl,--as-needed"]

[[toolchain.platform]]
name = "x86"
tool = "c-compiler"
args = ["-m32"]

[[toolchain.platform]]
name = "x86_64"
tool = "c-compiler"
args = ["-m64"]
"#;

/// Visual C++ and Swift tool chains without per-platform configuration.
pub const MIXED_CONFIG: &str = r#"
[[toolchain]]
name = "msvc"
kind = "visual-cpp"
os = "windows"

[[toolchain]]
name = "swift"
kind = "swiftc"
os = "macos"
"#;

/// Create a temporary project with `.shipwright/toolchains.toml` set to `config`.
pub fn project_with_config(config: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_project_config(tmp.path(), config);
    tmp
}

/// Write the project tool chain configuration under `root`.
pub fn write_project_config(root: &Path, config: &str) {
    let path = project_toolchains_config_path(root);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, config).unwrap();
}
