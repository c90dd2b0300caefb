//! Rebranding library for Munki's Managed Software Center.
//!
//! This library rewrites an unpacked munkitools app package so the
//! application shows a different name:
//! - `.strings` and `.nib` resources in every supported localization
//! - optional replacement icon (converted from PNG when needed)
//! - optional postinstall script
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod rebrand;

// Re-export commonly used types
pub use error::{CliError, RebrandError, Result};
