//! External tool detection and availability checking.
//!
//! The system toolchain needs `plutil`, `sips` and `iconutil`, which only
//! ship with macOS. Lookup happens once per process.

use std::path::PathBuf;
use std::sync::LazyLock;

/// Resolved locations of the macOS conversion tools.
#[derive(Clone, Debug)]
pub struct SystemTools {
    pub plutil: PathBuf,
    pub sips: PathBuf,
    pub iconutil: PathBuf,
}

/// Cached lookup result. `Err` holds the name of the first missing tool.
pub static SYSTEM_TOOLS: LazyLock<Result<SystemTools, String>> = LazyLock::new(|| {
    Ok(SystemTools {
        plutil: locate("plutil")?,
        sips: locate("sips")?,
        iconutil: locate("iconutil")?,
    })
});

fn locate(tool: &str) -> Result<PathBuf, String> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool, e);
            Err(tool.to_string())
        }
    }
}
