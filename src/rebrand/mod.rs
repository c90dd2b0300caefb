//! Localization rewrite and icon conversion for an unpacked munkitools tree.
//!
//! # Overview
//!
//! A run:
//! 1. Reads configuration from [`RebrandSettings`]
//! 2. Walks the `.lproj` directories of each [`TargetApplication`]
//! 3. Rewrites `.strings` and `.nib` resources of known languages
//! 4. Optionally converts and installs an icon and a postinstall script
//! 5. Returns a [`RebrandReport`]
//!
//! # Module Organization
//!
//! - [`locale`] - known localized application names
//! - [`resource`] - resource file classification
//! - [`convert`] - plist, image and icon conversion capabilities
//! - [`substitute`] - format-aware name replacement
//! - [`icon`] - `.icns` bundling
//! - [`walker`] - localization discovery
//! - [`settings`] - run configuration
//! - [`orchestrator`] - the [`Rebrander`] itself

pub mod convert;
pub mod error;
pub mod icon;
pub mod locale;
pub mod orchestrator;
pub mod resource;
pub mod settings;
pub mod substitute;
pub mod utils;
pub mod walker;

pub use convert::{Backend, Toolchain};
pub use error::{Error, Result};
pub use locale::LocalizationTable;
pub use orchestrator::{RebrandReport, Rebrander};
pub use settings::{RebrandSettings, RebrandSettingsBuilder, TargetApplication};
pub use walker::WalkReport;
