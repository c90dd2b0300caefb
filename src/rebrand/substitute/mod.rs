//! Format-aware replacement of the localized application name.
//!
//! [`SubstitutionEngine`] looks up the localized name for a language and
//! dispatches on [`ResourceKind`]:
//!
//! - [`strings`] - value side of `.strings` assignments only
//! - [`nib`] - whole-file replacement through an XML round trip

mod encoding;
pub mod nib;
pub mod strings;

pub use encoding::TextEncoding;

use crate::rebrand::convert::FormatConverter;
use crate::rebrand::error::{Error, Result};
use crate::rebrand::locale::LocalizationTable;
use crate::rebrand::resource::ResourceKind;
use std::path::Path;

/// What happened to one resource file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The file was replaced; carries the number of replacements.
    Rewritten(usize),
    /// The file was parsed but held no occurrence of the localized name.
    Unchanged,
    /// The file kind carries no application name.
    Ignored,
}

/// Rewrites resource files for one desired application name.
pub struct SubstitutionEngine<'a> {
    table: &'a LocalizationTable,
    converter: &'a dyn FormatConverter,
    app_name: &'a str,
}

impl<'a> SubstitutionEngine<'a> {
    pub fn new(
        table: &'a LocalizationTable,
        converter: &'a dyn FormatConverter,
        app_name: &'a str,
    ) -> Self {
        Self {
            table,
            converter,
            app_name,
        }
    }

    /// Desired application name written in place of the localized one.
    pub fn app_name(&self) -> &str {
        self.app_name
    }

    /// Rewrites `path`, a resource belonging to language `code`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownLanguage`] if `code` is not in the table,
    /// [`Error::MalformedResource`] if the file cannot be parsed.
    pub fn rewrite(&self, path: &Path, code: &str) -> Result<RewriteOutcome> {
        let localized = self
            .table
            .localized_name(code)
            .ok_or_else(|| Error::UnknownLanguage(code.to_string()))?;

        let replacements = match ResourceKind::classify(path) {
            ResourceKind::TextKeyValue => {
                strings::rewrite_strings_file(path, localized, self.app_name)?
            }
            ResourceKind::StructuredInterface => {
                nib::rewrite_nib_file(path, localized, self.app_name, self.converter)?
            }
            ResourceKind::Unrecognized => return Ok(RewriteOutcome::Ignored),
        };

        if replacements == 0 {
            log::debug!("No occurrences in {}", path.display());
            Ok(RewriteOutcome::Unchanged)
        } else {
            log::debug!("Replaced {} occurrence(s) in {}", replacements, path.display());
            Ok(RewriteOutcome::Rewritten(replacements))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rebrand::convert::native::PlistConverter;

    #[test]
    fn unknown_language_is_an_error() {
        let table = LocalizationTable::munki_defaults();
        let engine = SubstitutionEngine::new(&table, &PlistConverter, "Ace");
        let err = engine.rewrite(Path::new("xx.lproj/Localizable.strings"), "xx").unwrap_err();
        assert!(matches!(err, Error::UnknownLanguage(code) if code == "xx"));
    }

    #[test]
    fn unrecognized_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("help.html");
        std::fs::write(&path, "Managed Software Center").unwrap();

        let table = LocalizationTable::munki_defaults();
        let engine = SubstitutionEngine::new(&table, &PlistConverter, "Ace");
        assert_eq!(engine.rewrite(&path, "en").unwrap(), RewriteOutcome::Ignored);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Managed Software Center");
    }

    #[test]
    fn uses_language_specific_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Localizable.strings");
        std::fs::write(
            &path,
            "\"t\" = \"Managed Software Centre\";\n\"u\" = \"Managed Software Center\";\n",
        )
        .unwrap();

        let table = LocalizationTable::munki_defaults();
        let engine = SubstitutionEngine::new(&table, &PlistConverter, "Ace");
        assert_eq!(engine.rewrite(&path, "en_GB").unwrap(), RewriteOutcome::Rewritten(1));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "\"t\" = \"Ace\";\n\"u\" = \"Managed Software Center\";\n"
        );
    }
}
