//! `shipwright names` command

use std::path::Path;

use anyhow::Result;

use crate::cli::NamesArgs;
use crate::commands::{find, load_registry};
use shipwright::core::os::{OperatingSystem, OsNaming};

pub fn execute(args: NamesArgs, project: Option<&Path>) -> Result<()> {
    if let Some(name) = &args.toolchain {
        let registry = load_registry(project)?;
        let toolchain = find(&registry, name)?;

        println!("{}", toolchain.display_name());
        print_row("Executable", &toolchain.executable_name(&args.base));
        print_row("Shared library", &toolchain.shared_library_name(&args.base));
        print_row(
            "Link file",
            &toolchain.shared_library_link_file_name(&args.base),
        );
        print_row("Static library", &toolchain.static_library_name(&args.base));
        return Ok(());
    }

    let os = match &args.os {
        Some(name) => OperatingSystem::for_name(name),
        None => OperatingSystem::current(),
    };

    println!("{}", os.display_name());
    print_row("Executable", &os.executable_name(&args.base));
    print_row("Shared library", &os.shared_library_name(&args.base));
    print_row("Static library", &os.static_library_name(&args.base));

    Ok(())
}

fn print_row(label: &str, value: &str) {
    println!("  {:<16} {}", format!("{}:", label), value);
}
