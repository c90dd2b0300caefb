//! Classification of files inside a language resource directory.

use std::path::Path;

/// Suffix of per-language resource directories.
pub const LPROJ_EXTENSION: &str = "lproj";

/// How a resource file carries the application name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    /// Line-oriented `"key" = "value";` table (`.strings`).
    TextKeyValue,
    /// Property-list encoded interface description (`.nib`).
    StructuredInterface,
    /// Anything else; never touched.
    Unrecognized,
}

impl ResourceKind {
    /// Classifies `path` by its file suffix.
    pub fn classify(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("strings") => Self::TextKeyValue,
            Some("nib") => Self::StructuredInterface,
            _ => Self::Unrecognized,
        }
    }
}

/// Language code of an `.lproj` directory (`en_GB.lproj` -> `en_GB`).
///
/// Returns `None` for paths that are not `.lproj` directories.
pub fn language_code(lproj_dir: &Path) -> Option<&str> {
    let is_lproj = lproj_dir
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == LPROJ_EXTENSION);
    if !is_lproj {
        return None;
    }

    let name = lproj_dir.file_name()?.to_str()?;
    name.split('.').next().filter(|code| !code.is_empty())
}
