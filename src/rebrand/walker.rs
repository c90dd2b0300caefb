//! Discovery of localized resources inside an application bundle.
//!
//! For a resources directory the walker finds every `*.lproj` directory,
//! skips languages the table does not know, and hands every file of the
//! remaining languages to the [`SubstitutionEngine`].

use crate::rebrand::error::{Error, Result};
use crate::rebrand::locale::LocalizationTable;
use crate::rebrand::resource::{self, LPROJ_EXTENSION, ResourceKind};
use crate::rebrand::substitute::{RewriteOutcome, SubstitutionEngine};
use std::path::{Path, PathBuf};

/// Summary of one walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalkReport {
    /// Known languages whose files were processed.
    pub languages: Vec<String>,
    /// Languages found on disk but absent from the table.
    pub skipped_languages: Vec<String>,
    /// Files that were replaced.
    pub files_rewritten: usize,
    /// Recognized files that needed no change.
    pub files_unchanged: usize,
    /// Total number of replacements.
    pub replacements: usize,
}

impl WalkReport {
    fn record(&mut self, outcome: RewriteOutcome) {
        match outcome {
            RewriteOutcome::Rewritten(count) => {
                self.files_rewritten += 1;
                self.replacements += count;
            }
            RewriteOutcome::Unchanged => self.files_unchanged += 1,
            RewriteOutcome::Ignored => {}
        }
    }
}

/// Walks the localizations of application bundles.
pub struct LocalizationWalker<'a> {
    table: &'a LocalizationTable,
    engine: &'a SubstitutionEngine<'a>,
}

impl<'a> LocalizationWalker<'a> {
    pub fn new(table: &'a LocalizationTable, engine: &'a SubstitutionEngine<'a>) -> Self {
        Self { table, engine }
    }

    /// Rewrites every known localization under `resources_dir`.
    ///
    /// A missing `resources_dir` yields an empty report. The first fatal
    /// error aborts the walk; files already rewritten stay rewritten.
    pub fn walk(&self, resources_dir: &Path) -> Result<WalkReport> {
        let mut report = WalkReport::default();

        if !resources_dir.is_dir() {
            log::warn!("Resources directory {} not found", resources_dir.display());
            return Ok(report);
        }

        for lproj in lproj_dirs(resources_dir)? {
            let Some(code) = resource::language_code(&lproj) else {
                continue;
            };

            if !self.table.contains(code) {
                log::debug!("Skipping unsupported language `{}`", code);
                report.skipped_languages.push(code.to_string());
                continue;
            }

            log::debug!("Rewriting {}", lproj.display());
            for file in resource_files(&lproj)? {
                let outcome = self.engine.rewrite(&file, code)?;
                report.record(outcome);
            }
            report.languages.push(code.to_string());
        }

        Ok(report)
    }
}

/// `*.lproj` directories directly under `resources_dir`, sorted.
fn lproj_dirs(resources_dir: &Path) -> Result<Vec<PathBuf>> {
    let base = resources_dir.to_str().ok_or_else(|| {
        Error::GenericError(format!(
            "resources path contains non-UTF8 characters: {}",
            resources_dir.display()
        ))
    })?;
    let pattern = format!("{}/*.{}", glob::Pattern::escape(base), LPROJ_EXTENSION);

    let mut dirs = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| Error::Fs {
            context: "reading localization directory".to_string(),
            path: e.path().to_path_buf(),
            source: e.into(),
        })?;
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Recognized resource files under `lproj`, recursively, in name order.
fn resource_files(lproj: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(lproj).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if ResourceKind::classify(entry.path()) != ResourceKind::Unrecognized {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
