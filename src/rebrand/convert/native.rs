//! In-process conversion capabilities.
//!
//! Mirrors what `plutil`, `sips` and `iconutil` do for the rebrand pipeline
//! using the `plist`, `image` and `icns` crates, so a tree can be rebranded
//! on hosts without the macOS tools.

use super::{FormatConverter, IconCompiler, ImageResampler, PlistFormat};
use crate::rebrand::error::{Error, ErrorExt, Result};
use crate::rebrand::utils::fs::replace_atomically;
use icns::{IconFamily, IconType};
use image::{DynamicImage, ImageFormat, imageops::FilterType};
use plist::{Dictionary, Uid, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Dictionary key `plutil` uses to spell an archiver reference in XML.
const UID_KEY: &str = "CF$UID";

/// Property list conversion via the `plist` crate.
///
/// XML property lists cannot hold `UID` values, so keyed-archive references
/// are written as `{CF$UID = n}` dictionaries and turned back into `UID`s
/// on the way to binary, the same way `plutil` does.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlistConverter;

impl FormatConverter for PlistConverter {
    fn convert(&self, path: &Path, format: PlistFormat) -> Result<()> {
        let malformed = |e: plist::Error| Error::MalformedResource {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        let value = Value::from_file(path).map_err(malformed)?;

        let mut buffer = Vec::new();
        match format {
            PlistFormat::Xml => encode_uids(value).to_writer_xml(&mut buffer),
            PlistFormat::Binary => decode_uids(value).to_writer_binary(&mut buffer),
        }
        .map_err(malformed)?;

        replace_atomically(path, &buffer)
    }
}

/// Replaces every `UID` with its `{CF$UID = n}` spelling.
fn encode_uids(value: Value) -> Value {
    match value {
        Value::Uid(uid) => {
            let mut reference = Dictionary::new();
            reference.insert(UID_KEY.to_string(), Value::Integer(uid.get().into()));
            Value::Dictionary(reference)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(encode_uids).collect()),
        Value::Dictionary(dict) => Value::Dictionary(
            dict.into_iter()
                .map(|(key, value)| (key, encode_uids(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Turns single-key `{CF$UID = n}` dictionaries back into `UID`s.
fn decode_uids(value: Value) -> Value {
    match value {
        Value::Dictionary(dict) => {
            if dict.len() == 1 {
                if let Some(n) = dict.get(UID_KEY).and_then(Value::as_unsigned_integer) {
                    return Value::Uid(Uid::new(n));
                }
            }
            Value::Dictionary(
                dict.into_iter()
                    .map(|(key, value)| (key, decode_uids(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(decode_uids).collect()),
        other => other,
    }
}

/// Lanczos3 resampling via the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateResampler;

impl ImageResampler for ImageCrateResampler {
    fn resample(&self, source: &Path, size: u32, dest: &Path) -> Result<()> {
        let image = image::open(source)?;
        let resized = if image.width() == size && image.height() == size {
            image
        } else {
            image.resize_exact(size, size, FilterType::Lanczos3)
        };

        DynamicImage::ImageRgba8(resized.to_rgba8()).save_with_format(dest, ImageFormat::Png)?;
        Ok(())
    }
}

/// `.icns` compilation via the `icns` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct IcnsCompiler;

/// Icon type for an iconset member name (`icon_32x32@2x.png` -> `32x32@2x`).
fn icon_type_for_suffix(suffix: &str) -> Option<IconType> {
    let icon_type = match suffix {
        "16x16" => IconType::RGBA32_16x16,
        "16x16@2x" => IconType::RGBA32_16x16_2x,
        "32x32" => IconType::RGBA32_32x32,
        "32x32@2x" => IconType::RGBA32_32x32_2x,
        "128x128" => IconType::RGBA32_128x128,
        "128x128@2x" => IconType::RGBA32_128x128_2x,
        "256x256" => IconType::RGBA32_256x256,
        "256x256@2x" => IconType::RGBA32_256x256_2x,
        "512x512" => IconType::RGBA32_512x512,
        "512x512@2x" => IconType::RGBA32_512x512_2x,
        _ => return None,
    };
    Some(icon_type)
}

impl IconCompiler for IcnsCompiler {
    fn compile(&self, iconset: &Path, output: &Path) -> Result<()> {
        let mut members: Vec<_> = std::fs::read_dir(iconset)
            .fs_context("reading iconset", iconset)?
            .collect::<std::io::Result<Vec<_>>>()
            .fs_context("reading iconset", iconset)?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("png"))
            .collect();
        members.sort();

        if members.is_empty() {
            return Err(Error::GenericError(format!(
                "{} contains no icon images",
                iconset.display()
            )));
        }

        let mut family = IconFamily::new();
        for member in &members {
            let icon_type = member
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_prefix("icon_"))
                .and_then(icon_type_for_suffix)
                .ok_or_else(|| {
                    Error::GenericError(format!(
                        "invalid iconset member name: {}",
                        member.display()
                    ))
                })?;

            let reader = BufReader::new(File::open(member).fs_context("opening icon image", member)?);
            let image = icns::Image::read_png(reader).map_err(|e| {
                Error::GenericError(format!("decoding {}: {}", member.display(), e))
            })?;

            log::debug!("Adding {:?} from {}", icon_type, member.display());
            family.add_icon_with_type(&image, icon_type).map_err(|e| {
                Error::GenericError(format!(
                    "adding {} to icon family: {}",
                    member.display(),
                    e
                ))
            })?;
        }

        let mut writer =
            BufWriter::new(File::create(output).fs_context("creating ICNS output file", output)?);
        family
            .write(&mut writer)
            .fs_context("writing ICNS data", output)?;
        writer.flush().fs_context("writing ICNS data", output)?;

        Ok(())
    }
}
