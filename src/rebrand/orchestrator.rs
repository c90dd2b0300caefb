//! Main rebrand orchestration.
//!
//! This module provides the [`Rebrander`] that drives a whole run: the
//! localization walk of every target application, icon replacement and
//! postinstall installation.

use crate::rebrand::{
    Result, RebrandSettings,
    error::Error,
    icon::IconBundler,
    settings::TargetApplication,
    substitute::SubstitutionEngine,
    utils::fs,
    walker::{LocalizationWalker, WalkReport},
};
use crate::rebrand::convert::Toolchain;
use std::path::{Path, PathBuf};

/// Outcome of a rebrand run.
#[derive(Clone, Debug, Default)]
pub struct RebrandReport {
    /// Walk report per target application, in processing order.
    pub apps: Vec<(String, WalkReport)>,
    /// Icon files that were replaced.
    pub icons_installed: Vec<PathBuf>,
    /// Installed postinstall script, if any.
    pub postinstall: Option<PathBuf>,
}

impl RebrandReport {
    /// Files replaced across all applications.
    pub fn files_rewritten(&self) -> usize {
        self.apps.iter().map(|(_, r)| r.files_rewritten).sum()
    }

    /// Replacements made across all applications.
    pub fn replacements(&self) -> usize {
        self.apps.iter().map(|(_, r)| r.replacements).sum()
    }
}

/// Rebrand orchestrator.
///
/// Runs strictly in sequence with no retry and no rollback. The first fatal
/// error aborts the run and leaves the tree as it was at that point; only
/// individual files are replaced atomically.
///
/// # Examples
///
/// ```no_run
/// use munki_rebrand::rebrand::{Rebrander, RebrandSettingsBuilder, Toolchain};
///
/// # fn example() -> munki_rebrand::rebrand::Result<()> {
/// let settings = RebrandSettingsBuilder::new()
///     .unpacked_path("/tmp/munkitools_app/Payload")
///     .app_name("Ace Software Center")
///     .build()?;
///
/// let report = Rebrander::new(settings, Toolchain::native()).run()?;
/// println!("{} replacements", report.replacements());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Rebrander {
    settings: RebrandSettings,
    toolchain: Toolchain,
}

impl Rebrander {
    pub fn new(settings: RebrandSettings, toolchain: Toolchain) -> Self {
        Self {
            settings,
            toolchain,
        }
    }

    pub fn settings(&self) -> &RebrandSettings {
        &self.settings
    }

    /// Executes the run.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingInput`] before anything is modified if the tree,
    ///   icon or postinstall script does not exist
    /// - [`Error::MalformedResource`] if a resource cannot be parsed
    /// - [`Error::ToolInvocation`] if an external tool fails
    pub fn run(&self) -> Result<RebrandReport> {
        let root = self.settings.unpacked_path();
        log::info!(
            "Rebranding {} with app name {}",
            root.display(),
            self.settings.app_name()
        );
        self.preflight()?;

        let mut report = RebrandReport::default();
        let engine = SubstitutionEngine::new(
            self.settings.localizations(),
            self.toolchain.converter(),
            self.settings.app_name(),
        );
        let walker = LocalizationWalker::new(self.settings.localizations(), &engine);

        for app in self.settings.targets() {
            log::info!("Rewriting localizations of {}...", app.name());
            let walk = walker.walk(&app.resources_dir(root))?;
            log::info!(
                "✓ {}: {} file(s) rewritten in {} language(s)",
                app.name(),
                walk.files_rewritten,
                walk.languages.len()
            );
            if !walk.skipped_languages.is_empty() {
                log::info!(
                    "  skipped unsupported languages: {}",
                    walk.skipped_languages.join(", ")
                );
            }
            report.apps.push((app.name().to_string(), walk));
        }

        if let Some(icon) = self.settings.icon_file() {
            report.icons_installed = self.install_icon(icon)?;
        }

        if let Some(script) = self.settings.postinstall() {
            report.postinstall = Some(self.install_postinstall(script)?);
        }

        Ok(report)
    }

    /// Fails before any mutation if a required input is missing.
    fn preflight(&self) -> Result<()> {
        let root = self.settings.unpacked_path();
        if !root.is_dir() {
            return Err(Error::MissingInput {
                description: "unpacked path",
                path: root.to_path_buf(),
            });
        }
        if let Some(icon) = self.settings.icon_file().filter(|p| !p.exists()) {
            return Err(Error::MissingInput {
                description: "icon file",
                path: icon.to_path_buf(),
            });
        }
        if let Some(script) = self.settings.postinstall().filter(|p| !p.is_file()) {
            return Err(Error::MissingInput {
                description: "postinstall script",
                path: script.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Bundles `icon` once if needed and copies it over every target
    /// application's icon.
    fn install_icon(&self, icon: &Path) -> Result<Vec<PathBuf>> {
        let bundler = IconBundler::new(&self.toolchain, self.settings.cache_dir());
        let prepared = bundler.prepare(icon)?;

        let root = self.settings.unpacked_path();
        let mut installed = Vec::new();
        for app in self.settings.targets() {
            let dest = icon_destination(app, root)?;
            log::info!(
                "Replacing icons with {} in {}...",
                prepared.path().display(),
                dest.display()
            );
            fs::copy_file(prepared.path(), &dest)?;
            installed.push(dest);
        }
        Ok(installed)
    }

    fn install_postinstall(&self, script: &Path) -> Result<PathBuf> {
        let dest = self.settings.scripts_dir().join("postinstall");
        log::info!("Installing postinstall {} to {}", script.display(), dest.display());
        fs::copy_file(script, &dest)?;
        fs::make_executable(&dest)?;
        Ok(dest)
    }
}

/// Icon path of `app`, which must already have a resources directory.
fn icon_destination(app: &TargetApplication, root: &Path) -> Result<PathBuf> {
    let resources = app.resources_dir(root);
    if !resources.is_dir() {
        return Err(Error::GenericError(format!(
            "cannot install icon for {}: {} does not exist",
            app.name(),
            resources.display()
        )));
    }
    Ok(app.icon_path(root))
}
