//! Run configuration for the rebrander.

use crate::bail;
use crate::rebrand::error::{Context, Result};
use crate::rebrand::locale::LocalizationTable;
use std::path::{Path, PathBuf};

/// Resources directory of Managed Software Center inside the unpacked payload.
pub const MSC_RESOURCES: &str = "Applications/Managed Software Center.app/Contents/Resources";

/// Resources directory of MunkiStatus, nested inside Managed Software Center.
pub const MUNKISTATUS_RESOURCES: &str =
    "Applications/Managed Software Center.app/Contents/Resources/MunkiStatus.app/Contents/Resources";

/// One application bundle to rebrand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetApplication {
    name: String,
    resources_path: PathBuf,
    icon_name: String,
}

impl TargetApplication {
    /// `resources_path` is relative to the unpacked tree root; `icon_name` is
    /// the icon file inside it.
    pub fn new(
        name: impl Into<String>,
        resources_path: impl Into<PathBuf>,
        icon_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resources_path: resources_path.into(),
            icon_name: icon_name.into(),
        }
    }

    /// The applications munkitools installs, in processing order.
    pub fn munki_apps() -> Vec<Self> {
        vec![
            Self::new(
                "Managed Software Center",
                MSC_RESOURCES,
                "Managed Software Center.icns",
            ),
            Self::new("MunkiStatus", MUNKISTATUS_RESOURCES, "MunkiStatus.icns"),
        ]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resources directory relative to the tree root.
    pub fn resources_path(&self) -> &Path {
        &self.resources_path
    }

    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    /// Absolute resources directory under `root`.
    pub fn resources_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.resources_path)
    }

    /// Absolute icon path under `root`.
    pub fn icon_path(&self, root: &Path) -> PathBuf {
        self.resources_dir(root).join(&self.icon_name)
    }
}

/// Default scratch directory for icon staging.
///
/// The platform cache directory when there is one, the system temp
/// directory otherwise.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("munki_rebrand")
}

/// Immutable settings for one rebrand run. Built with
/// [`RebrandSettingsBuilder`].
#[derive(Clone, Debug)]
pub struct RebrandSettings {
    unpacked_path: PathBuf,
    app_name: String,
    icon_file: Option<PathBuf>,
    postinstall: Option<PathBuf>,
    scripts_dir: PathBuf,
    cache_dir: PathBuf,
    localizations: LocalizationTable,
    targets: Vec<TargetApplication>,
}

impl RebrandSettings {
    /// Root of the unpacked package payload.
    pub fn unpacked_path(&self) -> &Path {
        &self.unpacked_path
    }

    /// Desired application name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn icon_file(&self) -> Option<&Path> {
        self.icon_file.as_deref()
    }

    pub fn postinstall(&self) -> Option<&Path> {
        self.postinstall.as_deref()
    }

    /// Directory that receives the `postinstall` script.
    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }

    /// Scratch directory for icon staging.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn localizations(&self) -> &LocalizationTable {
        &self.localizations
    }

    pub fn targets(&self) -> &[TargetApplication] {
        &self.targets
    }
}

/// Builder for [`RebrandSettings`].
///
/// # Examples
///
/// ```no_run
/// use munki_rebrand::rebrand::RebrandSettingsBuilder;
///
/// # fn example() -> munki_rebrand::rebrand::Result<()> {
/// let settings = RebrandSettingsBuilder::new()
///     .unpacked_path("/tmp/munkitools_app/Payload")
///     .app_name("Ace Software Center")
///     .icon_file(Some("brand.png".into()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct RebrandSettingsBuilder {
    unpacked_path: Option<PathBuf>,
    app_name: Option<String>,
    icon_file: Option<PathBuf>,
    postinstall: Option<PathBuf>,
    scripts_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    localizations: Option<LocalizationTable>,
    targets: Option<Vec<TargetApplication>>,
}

impl RebrandSettingsBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the unpacked payload root.
    ///
    /// # Required
    pub fn unpacked_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.unpacked_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the desired application name.
    ///
    /// # Required
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Icon to install: `.icns` as is, or a raster image to convert.
    pub fn icon_file(mut self, path: Option<PathBuf>) -> Self {
        self.icon_file = path;
        self
    }

    /// Script installed as the package's postinstall.
    pub fn postinstall(mut self, path: Option<PathBuf>) -> Self {
        self.postinstall = path;
        self
    }

    /// Default: `<unpacked_path>/Scripts`
    pub fn scripts_dir(mut self, path: Option<PathBuf>) -> Self {
        self.scripts_dir = path;
        self
    }

    /// Default: [`default_cache_dir`]
    pub fn cache_dir(mut self, path: Option<PathBuf>) -> Self {
        self.cache_dir = path;
        self
    }

    /// Default: [`LocalizationTable::munki_defaults`]
    pub fn localizations(mut self, table: LocalizationTable) -> Self {
        self.localizations = Some(table);
        self
    }

    /// Default: [`TargetApplication::munki_apps`]
    pub fn targets(mut self, targets: Vec<TargetApplication>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Fails if `unpacked_path` or `app_name` is missing, or the name is
    /// blank.
    pub fn build(self) -> Result<RebrandSettings> {
        let unpacked_path = self.unpacked_path.context("unpacked_path is required")?;
        let app_name = self.app_name.context("app_name is required")?;
        if app_name.trim().is_empty() {
            bail!("app_name must not be empty");
        }

        Ok(RebrandSettings {
            scripts_dir: self
                .scripts_dir
                .unwrap_or_else(|| unpacked_path.join("Scripts")),
            cache_dir: self.cache_dir.unwrap_or_else(default_cache_dir),
            localizations: self.localizations.unwrap_or_default(),
            targets: self.targets.unwrap_or_else(TargetApplication::munki_apps),
            unpacked_path,
            app_name,
            icon_file: self.icon_file,
            postinstall: self.postinstall,
        })
    }
}
