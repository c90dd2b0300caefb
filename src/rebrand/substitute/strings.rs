//! `.strings` table rewriting.
//!
//! Only the value side of `"key" = "value";` lines is touched. Comment
//! lines are copied verbatim even when they contain `=`.

use super::encoding::TextEncoding;
use crate::rebrand::error::{Error, ErrorExt, Result};
use crate::rebrand::utils::fs::replace_atomically;
use std::path::Path;

/// Replaces `localized` with `app_name` on the right-hand side of every
/// non-comment assignment line.
///
/// Lines are split at the first `=` only. Line terminators and line count
/// are preserved. Returns the rewritten text and the number of
/// replacements made.
pub fn rewrite_table(text: &str, localized: &str, app_name: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut replacements = 0;
    let mut in_block_comment = false;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_comment = if in_block_comment {
            in_block_comment = !line.contains("*/");
            true
        } else if let Some(rest) = trimmed.strip_prefix("/*") {
            in_block_comment = !rest.contains("*/");
            true
        } else {
            trimmed.starts_with("//")
        };

        match line.split_once('=') {
            Some((key, value)) if !is_comment => {
                let count = value.matches(localized).count();
                out.push_str(key);
                out.push('=');
                if count == 0 {
                    out.push_str(value);
                } else {
                    out.push_str(&value.replace(localized, app_name));
                    replacements += count;
                }
            }
            _ => out.push_str(line),
        }
    }

    (out, replacements)
}

/// Rewrites the `.strings` file at `path` in place.
///
/// The file's encoding is detected and kept. The file is only replaced
/// when its contents actually change. Returns the number of replacements.
pub fn rewrite_strings_file(path: &Path, localized: &str, app_name: &str) -> Result<usize> {
    let bytes = std::fs::read(path).fs_context("reading strings file", path)?;
    let encoding = TextEncoding::detect(&bytes);
    let text = encoding
        .decode(&bytes)
        .map_err(|reason| Error::MalformedResource {
            path: path.to_path_buf(),
            reason,
        })?;

    let (rewritten, replacements) = rewrite_table(&text, localized, app_name);
    if replacements == 0 || rewritten == text {
        return Ok(0);
    }

    replace_atomically(path, &encoding.encode(&rewritten))?;
    Ok(replacements)
}
