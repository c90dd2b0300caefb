//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap and merges the
//! optional configuration file underneath the arguments.

use crate::config::RebrandConfig;
use crate::error::{CliError, Result};
use crate::rebrand::{Backend, LocalizationTable, RebrandSettings, RebrandSettingsBuilder};
use clap::Parser;
use std::path::PathBuf;

/// Rebrand Managed Software Center in an unpacked munkitools app package
#[derive(Parser, Debug)]
#[command(
    name = "munki_rebrand",
    version,
    about = "Rebrand Managed Software Center in an unpacked munkitools app package",
    long_about = "Rewrites the name of Managed Software Center in every supported localization of an
unpacked munkitools app package, and optionally replaces its icon and adds a postinstall script.

The tree is modified in place. Re-unpack the package from source if a run fails.

Usage:
  munki_rebrand --unpacked-path ./Payload --app-name 'Ace Software Center'
  munki_rebrand --unpacked-path ./Payload --app-name 'Ace Software Center' --icon-file ace.png
  munki_rebrand --unpacked-path ./Payload --config rebrand.toml"
)]
pub struct Args {
    /// Root of the unpacked munkitools app package payload
    #[arg(short = 'u', long, value_name = "DIR", env = "MUNKI_REBRAND_UNPACKED_PATH")]
    pub unpacked_path: PathBuf,

    /// Desired application name
    #[arg(short = 'a', long, value_name = "NAME", env = "MUNKI_REBRAND_APP_NAME")]
    pub app_name: Option<String>,

    /// Replacement icon: an .icns file or a 1024x1024 PNG with alpha channel
    #[arg(short = 'i', long, value_name = "PATH", env = "MUNKI_REBRAND_ICON_FILE")]
    pub icon_file: Option<PathBuf>,

    /// Script to install as the package postinstall
    #[arg(short = 'p', long, value_name = "PATH", env = "MUNKI_REBRAND_POSTINSTALL")]
    pub postinstall: Option<PathBuf>,

    /// Directory receiving the postinstall script [default: <unpacked-path>/Scripts]
    #[arg(long, value_name = "DIR", env = "MUNKI_REBRAND_SCRIPTS_DIR")]
    pub scripts_dir: Option<PathBuf>,

    /// Scratch directory for icon conversion [default: user cache dir]
    #[arg(long, value_name = "DIR", env = "MUNKI_REBRAND_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Conversion backend: system tools (plutil, sips, iconutil) or in-process
    #[arg(short = 'b', long, value_enum, env = "MUNKI_REBRAND_BACKEND")]
    pub backend: Option<Backend>,

    /// TOML configuration file
    #[arg(short = 'c', long, value_name = "FILE", env = "MUNKI_REBRAND_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.unpacked_path.is_dir() {
            return Err(format!(
                "Unpacked path {} is not a directory",
                self.unpacked_path.display()
            ));
        }

        if self.app_name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err("App name cannot be empty".to_string());
        }

        Ok(())
    }

    /// Loads the configuration file, if one was given.
    pub fn load_config(&self) -> Result<RebrandConfig> {
        match &self.config {
            Some(path) => RebrandConfig::load(path),
            None => Ok(RebrandConfig::default()),
        }
    }

    /// Backend chosen by the arguments, then the config file.
    pub fn backend(&self, config: &RebrandConfig) -> Backend {
        self.backend.or(config.backend).unwrap_or_default()
    }

    /// Builds run settings, arguments taking precedence over `config`.
    pub fn to_settings(&self, config: RebrandConfig) -> Result<RebrandSettings> {
        let app_name = self
            .app_name
            .clone()
            .or(config.app_name)
            .ok_or_else(|| CliError::MissingArgument {
                argument: "--app-name".to_string(),
            })?;

        let localizations = LocalizationTable::munki_defaults().with_overrides(config.localizations);

        let settings = RebrandSettingsBuilder::new()
            .unpacked_path(&self.unpacked_path)
            .app_name(app_name)
            .icon_file(self.icon_file.clone().or(config.icon_file))
            .postinstall(self.postinstall.clone().or(config.postinstall))
            .scripts_dir(self.scripts_dir.clone().or(config.scripts_dir))
            .cache_dir(self.cache_dir.clone().or(config.cache_dir))
            .localizations(localizations)
            .build()
            .map_err(|e| CliError::InvalidArguments {
                reason: e.to_string(),
            })?;

        Ok(settings)
    }
}
