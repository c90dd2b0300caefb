//! Known localized application names.
//!
//! The table maps an `.lproj` language code to the exact string Managed
//! Software Center currently displays in that language. Those strings are
//! search targets only; they are never written.

use std::collections::BTreeMap;

/// Display name of the stock application.
pub const APP_NAME: &str = "Managed Software Center";

/// Localized display names shipped with munkitools.
const MUNKI_LOCALIZED_NAMES: &[(&str, &str)] = &[
    ("da", "Managed Software Center"),
    ("de", "Geführte Softwareaktualisierung"),
    ("en", "Managed Software Center"),
    ("en_AU", "Managed Software Centre"),
    ("en_GB", "Managed Software Centre"),
    ("en_CA", "Managed Software Centre"),
    ("es", "Centro de aplicaciones"),
    ("fi", "Managed Software Center"),
    ("fr", "Centre de gestion des logiciels"),
    ("it", "Centro Gestione Applicazioni"),
    ("ja", "Managed Software Center"),
    ("nb", "Managed Software Center"),
    ("nl", "Managed Software Center"),
    ("ru", "Центр Управления ПО"),
    ("sv", "Managed Software Center"),
];

/// Mapping from language code to the localized application name.
///
/// Built once per run and handed to the walker and substitution engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizationTable {
    names: BTreeMap<String, String>,
}

impl LocalizationTable {
    /// Table with the names munkitools ships.
    pub fn munki_defaults() -> Self {
        Self {
            names: MUNKI_LOCALIZED_NAMES
                .iter()
                .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
                .collect(),
        }
    }

    /// Empty table. Every language is skipped.
    pub fn empty() -> Self {
        Self {
            names: BTreeMap::new(),
        }
    }

    /// Adds entries, replacing existing ones with the same code.
    ///
    /// Empty localized names are ignored: replacing the empty string would
    /// insert the new name between every character.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (code, name) in overrides {
            let (code, name) = (code.into(), name.into());
            if name.is_empty() {
                log::warn!("Ignoring empty localized name for language `{}`", code);
                continue;
            }
            self.names.insert(code, name);
        }
        self
    }

    /// Localized name for `code`, if the language is known.
    pub fn localized_name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Whether `code` is eligible for rewriting.
    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    /// Known language codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for LocalizationTable {
    fn default() -> Self {
        Self::munki_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_shipped_languages() {
        let table = LocalizationTable::munki_defaults();
        assert_eq!(table.len(), 15);
        assert_eq!(table.localized_name("en"), Some(APP_NAME));
        assert_eq!(table.localized_name("en_GB"), Some("Managed Software Centre"));
        assert_eq!(table.localized_name("ru"), Some("Центр Управления ПО"));
        assert!(!table.contains("xx"));
        assert!(!table.contains("Base"));
    }

    #[test]
    fn overrides_add_and_replace() {
        let table = LocalizationTable::munki_defaults()
            .with_overrides([("pt_BR", "Central de Software"), ("en", "Software Centre")]);
        assert_eq!(table.localized_name("pt_BR"), Some("Central de Software"));
        assert_eq!(table.localized_name("en"), Some("Software Centre"));
        assert_eq!(table.len(), 16);
    }

    #[test]
    fn empty_override_is_ignored() {
        let table = LocalizationTable::empty().with_overrides([("pt", "")]);
        assert!(table.is_empty());
    }
}
