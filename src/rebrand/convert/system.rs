//! Conversion capabilities backed by the macOS command line tools.
//!
//! Every call blocks until the tool exits. A non-zero exit becomes
//! [`Error::ToolInvocation`] carrying the tool's stderr.

use super::{FormatConverter, IconCompiler, ImageResampler, PlistFormat};
use crate::rebrand::error::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs `program` with `args` and maps failure to a rebrand error.
fn run_tool<I, S>(program: &Path, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string());

    let output = Command::new(program).args(args).output().map_err(|e| {
        Error::GenericError(format!("Failed to execute {}: {}", tool, e))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::ToolInvocation {
            tool,
            status: output.status,
            stderr,
        });
    }

    Ok(())
}

/// `plutil -convert <format> <file>`
#[derive(Clone, Debug)]
pub struct Plutil {
    program: PathBuf,
}

impl Plutil {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

impl FormatConverter for Plutil {
    fn convert(&self, path: &Path, format: PlistFormat) -> Result<()> {
        log::debug!("plutil -convert {} {}", format.plutil_name(), path.display());
        run_tool(
            &self.program,
            [
                OsStr::new("-convert"),
                OsStr::new(format.plutil_name()),
                path.as_os_str(),
            ],
        )
        .map_err(|e| match e {
            Error::ToolInvocation { stderr, .. } => Error::MalformedResource {
                path: path.to_path_buf(),
                reason: stderr,
            },
            other => other,
        })
    }
}

/// `sips -s format png -z <h> <w> <source> --out <dest>`
#[derive(Clone, Debug)]
pub struct Sips {
    program: PathBuf,
}

impl Sips {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }

    /// Output is always PNG; `sips` keeps the source format otherwise.
    fn resample_args(source: &Path, size: u32, dest: &Path) -> Vec<OsString> {
        let size = size.to_string();
        vec![
            "-s".into(),
            "format".into(),
            "png".into(),
            "-z".into(),
            size.clone().into(),
            size.into(),
            source.as_os_str().to_owned(),
            "--out".into(),
            dest.as_os_str().to_owned(),
        ]
    }
}

impl ImageResampler for Sips {
    fn resample(&self, source: &Path, size: u32, dest: &Path) -> Result<()> {
        run_tool(&self.program, Self::resample_args(source, size, dest))
    }
}

/// `iconutil -c icns <iconset> -o <output>`
#[derive(Clone, Debug)]
pub struct Iconutil {
    program: PathBuf,
}

impl Iconutil {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

impl IconCompiler for Iconutil {
    fn compile(&self, iconset: &Path, output: &Path) -> Result<()> {
        run_tool(
            &self.program,
            [
                OsStr::new("-c"),
                OsStr::new("icns"),
                iconset.as_os_str(),
                OsStr::new("-o"),
                output.as_os_str(),
            ],
        )
    }
}
