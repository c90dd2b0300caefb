//! Text encodings of `.strings` tables.
//!
//! Munki ships its string tables as UTF-16 with a byte order mark. Newer
//! tooling writes UTF-8. Whatever was detected on read is used again on
//! write so untouched bytes stay identical.

/// Detected encoding of a text resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    Utf16Le { bom: bool },
    Utf16Be { bom: bool },
    Utf8 { bom: bool },
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

impl TextEncoding {
    /// Guesses the encoding of `bytes`.
    ///
    /// A byte order mark wins. Without one, valid NUL-free UTF-8 is taken as
    /// UTF-8 and anything else as little-endian UTF-16.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(UTF8_BOM) {
            Self::Utf8 { bom: true }
        } else if bytes.starts_with(UTF16_LE_BOM) {
            Self::Utf16Le { bom: true }
        } else if bytes.starts_with(UTF16_BE_BOM) {
            Self::Utf16Be { bom: true }
        } else if !bytes.contains(&0) && std::str::from_utf8(bytes).is_ok() {
            Self::Utf8 { bom: false }
        } else {
            Self::Utf16Le { bom: false }
        }
    }

    fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 { bom: true } => UTF8_BOM,
            Self::Utf16Le { bom: true } => UTF16_LE_BOM,
            Self::Utf16Be { bom: true } => UTF16_BE_BOM,
            _ => &[],
        }
    }

    /// Decodes `bytes`, dropping the byte order mark.
    pub fn decode(self, bytes: &[u8]) -> Result<String, String> {
        let body = &bytes[self.bom().len()..];
        match self {
            Self::Utf8 { .. } => std::str::from_utf8(body)
                .map(str::to_owned)
                .map_err(|e| format!("invalid UTF-8: {e}")),
            Self::Utf16Le { .. } => decode_utf16(body, u16::from_le_bytes),
            Self::Utf16Be { .. } => decode_utf16(body, u16::from_be_bytes),
        }
    }

    /// Encodes `text`, restoring the byte order mark if there was one.
    pub fn encode(self, text: &str) -> Vec<u8> {
        let mut out = self.bom().to_vec();
        match self {
            Self::Utf8 { .. } => out.extend_from_slice(text.as_bytes()),
            Self::Utf16Le { .. } => out.extend(text.encode_utf16().flat_map(u16::to_le_bytes)),
            Self::Utf16Be { .. } => out.extend(text.encode_utf16().flat_map(u16::to_be_bytes)),
        }
        out
    }
}

fn decode_utf16(body: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, String> {
    if body.len() % 2 != 0 {
        return Err(format!("odd byte length {} for UTF-16 text", body.len()));
    }

    let units = body.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| format!("invalid UTF-16: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_byte_order_marks() {
        assert_eq!(
            TextEncoding::detect(&[0xFF, 0xFE, b'a', 0]),
            TextEncoding::Utf16Le { bom: true }
        );
        assert_eq!(
            TextEncoding::detect(&[0xFE, 0xFF, 0, b'a']),
            TextEncoding::Utf16Be { bom: true }
        );
        assert_eq!(
            TextEncoding::detect(&[0xEF, 0xBB, 0xBF, b'a']),
            TextEncoding::Utf8 { bom: true }
        );
        assert_eq!(TextEncoding::detect(b"\"a\" = \"b\";"), TextEncoding::Utf8 { bom: false });
        assert_eq!(
            TextEncoding::detect(&[b'a', 0, b'b', 0]),
            TextEncoding::Utf16Le { bom: false }
        );
    }

    #[test]
    fn utf16_preserves_non_ascii_and_bom() {
        let text = "\"TITLE\" = \"Центр Управления ПО\";\n";
        for encoding in [
            TextEncoding::Utf16Le { bom: true },
            TextEncoding::Utf16Be { bom: true },
            TextEncoding::Utf16Le { bom: false },
        ] {
            let bytes = encoding.encode(text);
            assert_eq!(TextEncoding::detect(&bytes), encoding);
            assert_eq!(encoding.decode(&bytes).unwrap(), text);
        }
    }

    #[test]
    fn rejects_truncated_utf16() {
        let err = TextEncoding::Utf16Le { bom: true }
            .decode(&[0xFF, 0xFE, b'a'])
            .unwrap_err();
        assert!(err.contains("odd byte length"));
    }

    #[test]
    fn rejects_unpaired_surrogate() {
        let err = TextEncoding::Utf16Le { bom: true }
            .decode(&[0xFF, 0xFE, 0x00, 0xD8, b'a', 0])
            .unwrap_err();
        assert!(err.contains("invalid UTF-16"));
    }
}
