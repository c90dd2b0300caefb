//! Optional TOML configuration file.
//!
//! ```toml
//! app_name = "Ace Software Center"
//! icon_file = "branding/ace.png"
//! postinstall = "branding/postinstall"
//! backend = "native"
//!
//! [localizations]
//! pt_BR = "Central de Gerenciamento de Software"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.
//! Command line arguments take precedence over every value here.

use crate::error::{CliError, RebrandError, Result};
use crate::rebrand::Backend;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Contents of a configuration file.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RebrandConfig {
    /// Desired application name.
    #[serde(default)]
    pub app_name: Option<String>,

    /// Icon to install (`.icns` or raster image).
    #[serde(default)]
    pub icon_file: Option<PathBuf>,

    /// Postinstall script to add to the package.
    #[serde(default)]
    pub postinstall: Option<PathBuf>,

    /// Directory receiving the postinstall script.
    #[serde(default)]
    pub scripts_dir: Option<PathBuf>,

    /// Scratch directory for icon conversion.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Conversion backend.
    #[serde(default)]
    pub backend: Option<Backend>,

    /// Extra or replacement localized names, keyed by language code.
    #[serde(default)]
    pub localizations: BTreeMap<String, String>,
}

impl RebrandConfig {
    /// Reads and parses `path`, resolving relative paths against its
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RebrandError::Cli(CliError::ExecutionFailed {
                command: "read_config".to_string(),
                reason: format!("Failed to read {}: {}", path.display(), e),
            })
        })?;

        let mut config: Self = toml::from_str(&contents)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.icon_file,
            &mut self.postinstall,
            &mut self.scripts_dir,
            &mut self.cache_dir,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
