//! Conversion capabilities used by the rebrand pipeline.
//!
//! Each external step sits behind a narrow trait with one blocking call:
//!
//! - [`FormatConverter`] - property list encoding (`plutil -convert`)
//! - [`ImageResampler`] - raster downsampling (`sips -z`)
//! - [`IconCompiler`] - iconset to `.icns` (`iconutil -c icns`)
//!
//! [`system`] shells out to the macOS tools, [`native`] does the same work
//! in-process. A [`Toolchain`] bundles one implementation of each.

pub mod native;
pub mod system;
mod tool_detection;

use crate::rebrand::error::{Error, Result};
use std::path::Path;

/// Property list encodings understood by [`FormatConverter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlistFormat {
    /// Human-readable XML (`xml1`).
    Xml,
    /// Compact binary (`binary1`).
    Binary,
}

impl PlistFormat {
    /// Name of the format as `plutil -convert` spells it.
    pub fn plutil_name(self) -> &'static str {
        match self {
            Self::Xml => "xml1",
            Self::Binary => "binary1",
        }
    }
}

/// Converts a property list file in place between encodings.
pub trait FormatConverter {
    /// Rewrites `path` in `format`. Fails if `path` is not a property list.
    fn convert(&self, path: &Path, format: PlistFormat) -> Result<()>;
}

/// Resamples a raster image to a square of the given size.
pub trait ImageResampler {
    /// Writes `source` scaled to `size`x`size` pixels as a PNG at `dest`.
    fn resample(&self, source: &Path, size: u32, dest: &Path) -> Result<()>;
}

/// Compiles an `.iconset` directory into an icon bundle.
pub trait IconCompiler {
    /// Compiles `iconset` into the `.icns` file at `output`.
    fn compile(&self, iconset: &Path, output: &Path) -> Result<()>;
}

/// Which implementation backs the conversion capabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// System tools when all of them are installed, native otherwise.
    #[default]
    Auto,
    /// `plutil`, `sips` and `iconutil` subprocesses.
    System,
    /// In-process conversion.
    Native,
}

/// One implementation of every conversion capability.
pub struct Toolchain {
    converter: Box<dyn FormatConverter>,
    resampler: Box<dyn ImageResampler>,
    compiler: Box<dyn IconCompiler>,
    backend: Backend,
}

impl std::fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl Toolchain {
    /// Builds a toolchain from arbitrary implementations, e.g. test doubles,
    /// reported as `backend`.
    pub fn new(
        converter: Box<dyn FormatConverter>,
        resampler: Box<dyn ImageResampler>,
        compiler: Box<dyn IconCompiler>,
        backend: Backend,
    ) -> Self {
        Self {
            converter,
            resampler,
            compiler,
            backend,
        }
    }

    /// In-process toolchain. Works on every platform.
    pub fn native() -> Self {
        Self {
            converter: Box::new(native::PlistConverter),
            resampler: Box::new(native::ImageCrateResampler),
            compiler: Box::new(native::IcnsCompiler),
            backend: Backend::Native,
        }
    }

    /// Subprocess toolchain. Fails with [`Error::ToolNotFound`] if any of the
    /// macOS tools is missing.
    pub fn system() -> Result<Self> {
        let tools = tool_detection::SYSTEM_TOOLS.as_ref().map_err(|missing| {
            Error::ToolNotFound {
                tool: missing.clone(),
            }
        })?;

        Ok(Self {
            converter: Box::new(system::Plutil::new(tools.plutil.clone())),
            resampler: Box::new(system::Sips::new(tools.sips.clone())),
            compiler: Box::new(system::Iconutil::new(tools.iconutil.clone())),
            backend: Backend::System,
        })
    }

    /// Resolves `backend` into a toolchain.
    pub fn for_backend(backend: Backend) -> Result<Self> {
        match backend {
            Backend::Native => Ok(Self::native()),
            Backend::System => Self::system(),
            Backend::Auto => {
                if tool_detection::SYSTEM_TOOLS.is_ok() {
                    Self::system()
                } else {
                    log::debug!("macOS conversion tools unavailable - using native toolchain");
                    Ok(Self::native())
                }
            }
        }
    }

    /// Backend actually in use ([`Backend::Auto`] is never returned).
    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn converter(&self) -> &dyn FormatConverter {
        self.converter.as_ref()
    }

    pub fn resampler(&self) -> &dyn ImageResampler {
        self.resampler.as_ref()
    }

    pub fn compiler(&self) -> &dyn IconCompiler {
        self.compiler.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plutil_format_names() {
        assert_eq!(PlistFormat::Xml.plutil_name(), "xml1");
        assert_eq!(PlistFormat::Binary.plutil_name(), "binary1");
    }

    struct NoopConverter;
    impl FormatConverter for NoopConverter {
        fn convert(&self, _path: &Path, _format: PlistFormat) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn injected_toolchain_reports_given_backend() {
        let native = Toolchain::native();
        let toolchain = Toolchain::new(
            Box::new(NoopConverter),
            Box::new(native::ImageCrateResampler),
            Box::new(native::IcnsCompiler),
            Backend::System,
        );
        assert_eq!(toolchain.backend(), Backend::System);
        assert_eq!(native.backend(), Backend::Native);
    }

    #[test]
    fn native_backend_resolves_without_tools() {
        let toolchain = Toolchain::for_backend(Backend::Native).unwrap();
        assert_eq!(toolchain.backend(), Backend::Native);
    }

    #[test]
    fn auto_backend_never_reports_auto() {
        let toolchain = Toolchain::for_backend(Backend::Auto).unwrap();
        assert_ne!(toolchain.backend(), Backend::Auto);
    }
}
