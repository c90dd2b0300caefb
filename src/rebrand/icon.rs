//! Icon bundle (`.icns`) creation from a single raster image.
//!
//! The source image is resampled into every rendition an iconset needs and
//! the iconset is compiled into one `.icns`. Staging happens in a fresh
//! temporary directory that is removed when the returned [`PreparedIcon`]
//! is dropped, including on error paths.

use crate::rebrand::convert::Toolchain;
use crate::rebrand::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One rendition of the iconset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconRendition {
    /// Edge length in pixels.
    pub pixels: u32,
    /// Point size and scale, e.g. `16x16@2x`.
    pub suffix: &'static str,
}

impl IconRendition {
    /// File name inside the `.iconset` directory.
    pub fn file_name(&self) -> String {
        format!("icon_{}.png", self.suffix)
    }
}

/// Every rendition an application icon bundle must contain.
pub const ICON_SPEC: [IconRendition; 10] = [
    IconRendition { pixels: 16, suffix: "16x16" },
    IconRendition { pixels: 32, suffix: "16x16@2x" },
    IconRendition { pixels: 32, suffix: "32x32" },
    IconRendition { pixels: 64, suffix: "32x32@2x" },
    IconRendition { pixels: 128, suffix: "128x128" },
    IconRendition { pixels: 256, suffix: "128x128@2x" },
    IconRendition { pixels: 256, suffix: "256x256" },
    IconRendition { pixels: 512, suffix: "256x256@2x" },
    IconRendition { pixels: 512, suffix: "512x512" },
    IconRendition { pixels: 1024, suffix: "512x512@2x" },
];

/// Expected edge length of a source image.
pub const SOURCE_ICON_SIZE: u32 = 1024;

const ICONSET_NAME: &str = "AppIcns.iconset";
const ICNS_NAME: &str = "AppIcns.icns";

/// Kind of icon file a user supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconSource {
    /// Raster image that must be bundled first.
    Raster,
    /// Ready-made icon bundle, installed as is.
    Bundle,
}

impl IconSource {
    /// Classifies `path` by suffix. Anything that is not a known raster
    /// format is treated as an icon bundle.
    pub fn classify(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png" | "jpg" | "jpeg" | "tif" | "tiff") => Self::Raster,
            _ => Self::Bundle,
        }
    }
}

/// An icon bundle ready to be copied into the tree.
///
/// Holds the staging directory alive when the bundle was generated.
#[derive(Debug)]
pub struct PreparedIcon {
    path: PathBuf,
    staging: Option<TempDir>,
}

impl PreparedIcon {
    /// Wraps a user-supplied `.icns` file.
    pub fn existing(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            staging: None,
        }
    }

    /// Path of the `.icns` file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the bundle was generated from a raster image.
    pub fn is_generated(&self) -> bool {
        self.staging.is_some()
    }
}

/// Renders raster images into icon bundles.
pub struct IconBundler<'a> {
    toolchain: &'a Toolchain,
    scratch_dir: PathBuf,
}

impl<'a> IconBundler<'a> {
    /// Staging directories are created under `scratch_dir`, which is created
    /// if missing.
    pub fn new(toolchain: &'a Toolchain, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            toolchain,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Returns an icon bundle for `icon`, converting it if it is a raster
    /// image.
    pub fn prepare(&self, icon: &Path) -> Result<PreparedIcon> {
        if !icon.exists() {
            return Err(Error::MissingInput {
                description: "icon file",
                path: icon.to_path_buf(),
            });
        }

        match IconSource::classify(icon) {
            IconSource::Raster => self.bundle(icon),
            IconSource::Bundle => {
                if icon.extension().and_then(|e| e.to_str()) != Some("icns") {
                    log::warn!(
                        "{} is not a recognised image; installing it as an icon bundle",
                        icon.display()
                    );
                }
                Ok(PreparedIcon::existing(icon))
            }
        }
    }

    /// Resamples `source` into every [`ICON_SPEC`] rendition and compiles
    /// them into an `.icns`.
    pub fn bundle(&self, source: &Path) -> Result<PreparedIcon> {
        log::info!("Converting {} to .icns...", source.display());
        self.check_source_dimensions(source);

        std::fs::create_dir_all(&self.scratch_dir)
            .fs_context("creating scratch directory", &self.scratch_dir)?;
        let staging = tempfile::Builder::new()
            .prefix("munki_rebrand-icon-")
            .tempdir_in(&self.scratch_dir)
            .fs_context("creating icon staging directory", &self.scratch_dir)?;

        let iconset = staging.path().join(ICONSET_NAME);
        std::fs::create_dir(&iconset).fs_context("creating iconset", &iconset)?;

        for rendition in &ICON_SPEC {
            let dest = iconset.join(rendition.file_name());
            log::debug!("Rendering {} ({}px)", rendition.suffix, rendition.pixels);
            self.toolchain
                .resampler()
                .resample(source, rendition.pixels, &dest)?;
        }

        let icns = staging.path().join(ICNS_NAME);
        self.toolchain.compiler().compile(&iconset, &icns)?;
        log::info!("✓ Created {}", icns.display());

        Ok(PreparedIcon {
            path: icns,
            staging: Some(staging),
        })
    }

    fn check_source_dimensions(&self, source: &Path) {
        match image::image_dimensions(source) {
            Ok((w, h)) if w == SOURCE_ICON_SIZE && h == SOURCE_ICON_SIZE => {}
            Ok((w, h)) => log::warn!(
                "{} is {}x{}; a {}x{} image with alpha gives the best results",
                source.display(),
                w,
                h,
                SOURCE_ICON_SIZE,
                SOURCE_ICON_SIZE
            ),
            Err(e) => log::debug!("Could not read dimensions of {}: {}", source.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rebrand::convert::{
        Backend, FormatConverter, IconCompiler, ImageResampler, PlistFormat,
    };
    use image::{Rgba, RgbaImage};

    struct NoopConverter;
    impl FormatConverter for NoopConverter {
        fn convert(&self, _path: &Path, _format: PlistFormat) -> Result<()> {
            Ok(())
        }
    }

    struct TouchResampler;
    impl ImageResampler for TouchResampler {
        fn resample(&self, _source: &Path, _size: u32, dest: &Path) -> Result<()> {
            std::fs::write(dest, b"png").fs_context("writing rendition", dest)
        }
    }

    struct FailingCompiler;
    impl IconCompiler for FailingCompiler {
        fn compile(&self, _iconset: &Path, _output: &Path) -> Result<()> {
            Err(Error::GenericError("iconutil: Invalid Iconset.".into()))
        }
    }

    #[test]
    fn iconset_has_ten_renditions_up_to_1024() {
        assert_eq!(ICON_SPEC.len(), 10);
        assert_eq!(ICON_SPEC[0].file_name(), "icon_16x16.png");
        assert_eq!(ICON_SPEC[9].file_name(), "icon_512x512@2x.png");
        assert_eq!(ICON_SPEC.iter().map(|r| r.pixels).max(), Some(1024));
        assert_eq!(ICON_SPEC.iter().map(|r| r.pixels).min(), Some(16));
    }

    #[test]
    fn classifies_icon_sources() {
        assert_eq!(IconSource::classify(Path::new("brand.png")), IconSource::Raster);
        assert_eq!(IconSource::classify(Path::new("brand.PNG")), IconSource::Raster);
        assert_eq!(IconSource::classify(Path::new("brand.icns")), IconSource::Bundle);
    }

    #[test]
    fn missing_icon_is_missing_input() {
        let toolchain = Toolchain::native();
        let scratch = tempfile::tempdir().unwrap();
        let bundler = IconBundler::new(&toolchain, scratch.path());
        let err = bundler.prepare(Path::new("/nonexistent/brand.png")).unwrap_err();
        assert!(matches!(err, Error::MissingInput { .. }));
    }

    #[test]
    fn existing_icns_is_used_directly() {
        let toolchain = Toolchain::native();
        let scratch = tempfile::tempdir().unwrap();
        let icns = scratch.path().join("brand.icns");
        std::fs::write(&icns, b"icns").unwrap();

        let prepared = IconBundler::new(&toolchain, scratch.path()).prepare(&icns).unwrap();
        assert_eq!(prepared.path(), icns);
        assert!(!prepared.is_generated());
    }

    #[test]
    fn bundles_png_into_icns_with_all_renditions() {
        let toolchain = Toolchain::native();
        let scratch = tempfile::tempdir().unwrap();
        let source = scratch.path().join("brand.png");
        RgbaImage::from_pixel(1024, 1024, Rgba([200, 40, 40, 255]))
            .save(&source)
            .unwrap();

        let prepared = IconBundler::new(&toolchain, scratch.path().join("cache"))
            .prepare(&source)
            .unwrap();
        assert!(prepared.is_generated());

        let reader = std::io::BufReader::new(std::fs::File::open(prepared.path()).unwrap());
        let family = icns::IconFamily::read(reader).unwrap();
        let icons = family.available_icons();
        assert_eq!(icons.len(), 10);
        for icon_type in icons {
            let image = family.get_icon_with_type(icon_type).unwrap();
            assert_eq!(image.width(), icon_type.pixel_width());
            assert_eq!(image.height(), icon_type.pixel_height());
        }
    }

    #[test]
    fn staging_directory_is_removed_on_drop() {
        let toolchain = Toolchain::native();
        let scratch = tempfile::tempdir().unwrap();
        let source = scratch.path().join("brand.png");
        RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255])).save(&source).unwrap();

        let cache = scratch.path().join("cache");
        let prepared = IconBundler::new(&toolchain, &cache).prepare(&source).unwrap();
        assert!(prepared.path().exists());
        drop(prepared);
        assert_eq!(std::fs::read_dir(&cache).unwrap().count(), 0);
    }

    #[test]
    fn compile_failure_cleans_up_staging() {
        let toolchain = Toolchain::new(
            Box::new(NoopConverter),
            Box::new(TouchResampler),
            Box::new(FailingCompiler),
            Backend::System,
        );
        let scratch = tempfile::tempdir().unwrap();
        let source = scratch.path().join("brand.png");
        std::fs::write(&source, b"not really a png").unwrap();

        let cache = scratch.path().join("cache");
        let err = IconBundler::new(&toolchain, &cache).prepare(&source).unwrap_err();
        assert!(err.to_string().contains("Invalid Iconset"));
        assert_eq!(std::fs::read_dir(&cache).unwrap().count(), 0);
    }
}
