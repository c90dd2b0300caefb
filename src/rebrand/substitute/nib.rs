//! `.nib` rewriting.
//!
//! A nib is a property list. It is converted to XML, every occurrence of the
//! localized name is replaced wherever it appears, and the result is
//! converted back to binary. There is no field scoping here: the format has
//! no single display-text channel to restrict the replacement to.

use crate::rebrand::convert::{FormatConverter, PlistFormat};
use crate::rebrand::error::{Error, ErrorExt, Result};
use crate::rebrand::utils::fs::replace_atomically;
use std::path::Path;

/// Escapes text for use inside XML character data.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Rewrites the nib at `path` in place. Returns the number of replacements.
///
/// When nothing matches, the original bytes are put back so the file is
/// left exactly as it was found.
pub fn rewrite_nib_file(
    path: &Path,
    localized: &str,
    app_name: &str,
    converter: &dyn FormatConverter,
) -> Result<usize> {
    let original = std::fs::read(path).fs_context("reading nib", path)?;

    converter.convert(path, PlistFormat::Xml)?;
    let xml = std::fs::read(path).fs_context("reading converted nib", path)?;
    let xml = String::from_utf8(xml).map_err(|e| Error::MalformedResource {
        path: path.to_path_buf(),
        reason: format!("converted XML is not UTF-8: {e}"),
    })?;

    let needle = escape_xml(localized);
    let replacement = escape_xml(app_name);
    let replacements = xml.matches(needle.as_str()).count();

    if replacements == 0 || needle == replacement {
        replace_atomically(path, &original)?;
        return Ok(0);
    }

    replace_atomically(path, xml.replace(needle.as_str(), &replacement).as_bytes())?;
    converter.convert(path, PlistFormat::Binary)?;

    Ok(replacements)
}
