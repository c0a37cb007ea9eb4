//! `shipwright swift-version` command

use anyhow::Result;

use crate::cli::SwiftVersionArgs;
use shipwright::core::swift::SwiftVersion;

pub fn execute(args: SwiftVersionArgs) -> Result<()> {
    let version = SwiftVersion::parse_lenient(&args.version);
    if version == SwiftVersion::Unknown {
        tracing::debug!("`{}` is not a known Swift language version", args.version);
    }
    println!("{}", version);
    Ok(())
}
