//! Error types for rebrand operations.
//!
//! Every fatal condition in the pipeline surfaces as an [`Error`] and is
//! propagated to the caller unchanged. Nothing is retried and nothing is
//! rolled back.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Result type alias for rebrand operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the rebrand pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An external conversion or compile step exited non-zero.
    #[error("{tool} failed ({status}): {stderr}")]
    ToolInvocation {
        /// Tool that was invoked (e.g. `plutil`)
        tool: String,
        /// Exit status of the process
        status: ExitStatus,
        /// Diagnostic output captured from the tool
        stderr: String,
    },

    /// A required external tool is not installed or not on `PATH`.
    #[error("required tool `{tool}` was not found in PATH")]
    ToolNotFound {
        /// Tool name
        tool: String,
    },

    /// A user-supplied input file does not exist.
    #[error("{description} {} does not exist!", .path.display())]
    MissingInput {
        /// What the input was supposed to be (e.g. "icon file")
        description: &'static str,
        /// Path that was supplied
        path: PathBuf,
    },

    /// A resource matched its expected suffix but could not be processed
    /// in its expected structure.
    #[error("malformed resource {}: {reason}", .path.display())]
    MalformedResource {
        /// Offending resource file
        path: PathBuf,
        /// Parser or converter diagnostic
        reason: String,
    },

    /// The substitution engine was asked to rewrite a language it has no
    /// localized name for.
    #[error("no localized application name known for language `{0}`")]
    UnknownLanguage(String),

    /// Filesystem error with the operation and path attached.
    #[error("{context} ({}): {source}", .path.display())]
    Fs {
        /// What was being attempted
        context: String,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Image decoding or encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Invalid glob pattern while discovering localizations.
    #[error("glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Attaches an operation description and path to IO failures.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] carrying `context` and `path`.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Turns a missing value into an error.
pub trait Context<T> {
    /// Fails with [`Error::GenericError`] carrying `msg`.
    fn context<C: std::fmt::Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: std::fmt::Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::rebrand::Error::GenericError(format!($($arg)*)))
    };
}
