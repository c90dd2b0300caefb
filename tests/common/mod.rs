//! Shared fixtures for rebrand integration tests

#![allow(dead_code)]

use munki_rebrand::rebrand::settings::{MSC_RESOURCES, MUNKISTATUS_RESOURCES};
use munki_rebrand::rebrand::substitute::TextEncoding;
use plist::{Dictionary, Uid, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const UTF16: TextEncoding = TextEncoding::Utf16Le { bom: true };

pub const EN_STRINGS: &str = concat!(
    "/* Window title = Managed Software Center */\n",
    "\"APP_TITLE\" = \"Managed Software Center\";\n",
    "\"Managed Software Center\" = \"Managed Software Center\";\n",
    "\"UPDATE_CHECK\" = \"Checking for updates...\";\n",
);

pub const EN_STRINGS_REBRANDED: &str = concat!(
    "/* Window title = Managed Software Center */\n",
    "\"APP_TITLE\" = \"Ace Software Center\";\n",
    "\"Managed Software Center\" = \"Ace Software Center\";\n",
    "\"UPDATE_CHECK\" = \"Checking for updates...\";\n",
);

/// Writes a UTF-16 `.strings` file.
pub fn write_strings(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, UTF16.encode(text)).unwrap();
}

/// Reads a UTF-16 `.strings` file.
pub fn read_strings(path: &Path) -> String {
    UTF16.decode(&fs::read(path).unwrap()).unwrap()
}

/// Keyed-archiver shaped nib value with `title` in a couple of places and
/// `UID` references like a compiled nib.
pub fn nib_value(title: &str) -> Value {
    let mut window = Dictionary::new();
    window.insert("NSWindowTitle".into(), Value::String(title.into()));
    window.insert("NSFrameAutosaveName".into(), Value::String(format!("{title} Window")));
    window.insert("NSWindowStyleMask".into(), Value::Integer(15.into()));

    let mut top = Dictionary::new();
    top.insert("IB.objectdata".into(), Value::Uid(Uid::new(1)));

    let mut root = Dictionary::new();
    root.insert("$archiver".into(), Value::String("NSKeyedArchiver".into()));
    root.insert("$version".into(), Value::Integer(100000.into()));
    root.insert("$top".into(), Value::Dictionary(top));
    root.insert(
        "$objects".into(),
        Value::Array(vec![
            Value::String("$null".into()),
            Value::Dictionary(window),
            Value::Uid(Uid::new(1)),
        ]),
    );
    Value::Dictionary(root)
}

pub fn write_nib(path: &Path, title: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    nib_value(title).to_file_binary(path).unwrap();
}

/// Unpacked munkitools payload with both applications.
pub struct Tree {
    pub dir: tempfile::TempDir,
}

impl Tree {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let tree = Self { dir };

        for resources in [tree.msc(), tree.munkistatus()] {
            write_strings(&resources.join("en.lproj/Localizable.strings"), EN_STRINGS);
            write_strings(
                &resources.join("en_GB.lproj/InfoPlist.strings"),
                "\"CFBundleName\" = \"Managed Software Centre\";\n",
            );
            write_strings(
                &resources.join("xx.lproj/Localizable.strings"),
                "\"APP_TITLE\" = \"Managed Software Center\";\n",
            );
            write_strings(
                &resources.join("Base.lproj/Localizable.strings"),
                "\"APP_TITLE\" = \"Managed Software Center\";\n",
            );
            fs::write(resources.join("Managed Software Center.icns"), b"old icon").unwrap();
            fs::write(resources.join("MunkiStatus.icns"), b"old icon").unwrap();
        }
        write_nib(&tree.msc().join("en.lproj/MainMenu.nib"), "Managed Software Center");
        write_nib(&tree.msc().join("xx.lproj/MainMenu.nib"), "Managed Software Center");
        write_nib(
            &tree.msc().join("de.lproj/MainMenu.nib"),
            "Geführte Softwareaktualisierung",
        );

        tree
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn msc(&self) -> PathBuf {
        self.root().join(MSC_RESOURCES)
    }

    pub fn munkistatus(&self) -> PathBuf {
        self.root().join(MUNKISTATUS_RESOURCES)
    }

    /// Every file under the tree with its contents.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        snapshot(self.root())
    }
}

pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            (
                e.path().strip_prefix(root).unwrap().to_path_buf(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect()
}

/// Writes an opaque 1024x1024 PNG.
pub fn write_png(path: &Path) {
    image::RgbaImage::from_pixel(1024, 1024, image::Rgba([30, 90, 200, 255]))
        .save(path)
        .unwrap();
}
