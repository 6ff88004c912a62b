//! Format detection for HWP-family documents.
//!
//! Triage is magic-byte first: a ZIP signature leads to an HWPX archive
//! check, an OLE2 signature means HWP 5.x, and the raw `HWP Document File`
//! prefix (outside any container) marks the legacy 3.x format.

use crate::error::{Error, Result};
use std::io::Cursor;
use std::path::Path;

/// OLE2 compound-file magic bytes.
const OLE2_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Signature at the start of a raw HWP 3.x file. The same literal opens the
/// `FileHeader` stream of a 5.x document, but there it sits inside the OLE2
/// container rather than at file offset 0.
const HWP3_SIGNATURE: &[u8] = b"HWP Document File";

/// Detected HWP document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// HWP 5.x (OLE2-based binary format).
    Hwp5,
    /// HWPX (ZIP + XML).
    Hwpx,
    /// HWP 3.x (legacy binary format, external-converter path only).
    Hwp3,
}

impl FormatType {
    /// Returns the usual file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Hwp5 | FormatType::Hwp3 => "hwp",
            FormatType::Hwpx => "hwpx",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Hwp5 => "HWP 5.x",
            FormatType::Hwpx => "HWPX",
            FormatType::Hwp3 => "HWP 3.x",
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the format of a file on disk.
///
/// # Example
///
/// ```no_run
/// use unhwp::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("document.hwp")?;
/// println!("Detected format: {}", format);
/// # Ok::<(), unhwp::Error>(())
/// ```
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<FormatType> {
    let data = std::fs::read(path.as_ref())?;
    detect_format_from_bytes(&data)
}

/// Detect the format of an in-memory file image.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<FormatType> {
    if data.len() >= 4 && data[..4] == ZIP_MAGIC {
        if is_hwpx_archive(data) {
            return Ok(FormatType::Hwpx);
        }
        return Err(Error::UnknownFormat);
    }
    if data.len() >= 8 && data[..8] == OLE2_MAGIC {
        return Ok(FormatType::Hwp5);
    }
    if data.len() >= HWP3_SIGNATURE.len() && &data[..HWP3_SIGNATURE.len()] == HWP3_SIGNATURE {
        return Ok(FormatType::Hwp3);
    }
    Err(Error::UnknownFormat)
}

/// Check whether a ZIP archive looks like an HWPX package: an `hwp`
/// mimetype entry, a `Contents/header.xml`, or any `Contents/section*.xml`.
fn is_hwpx_archive(data: &[u8]) -> bool {
    let Ok(mut archive) = zip::ZipArchive::new(Cursor::new(data)) else {
        return false;
    };

    if let Ok(mut file) = archive.by_name("mimetype") {
        let mut mimetype = String::new();
        use std::io::Read;
        if file.read_to_string(&mut mimetype).is_ok() && mimetype.to_lowercase().contains("hwp") {
            return true;
        }
    }

    let found = archive.file_names().any(|n| {
        n == "Contents/header.xml"
            || (n.starts_with("Contents/section") && n.ends_with(".xml"))
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with(names: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut archive = zip::ZipWriter::new(&mut buffer);
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
            for (name, content) in names {
                archive.start_file(*name, options).unwrap();
                archive.write_all(content).unwrap();
            }
            archive.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_detect_hwp5_by_ole2_magic() {
        let mut data = OLE2_MAGIC.to_vec();
        data.extend_from_slice(&[0u8; 24]);
        assert_eq!(detect_format_from_bytes(&data).unwrap(), FormatType::Hwp5);
    }

    #[test]
    fn test_detect_hwpx_by_mimetype() {
        let data = zip_with(&[("mimetype", b"application/hwp+zip")]);
        assert_eq!(detect_format_from_bytes(&data).unwrap(), FormatType::Hwpx);
    }

    #[test]
    fn test_detect_hwpx_by_contents() {
        let data = zip_with(&[("Contents/section0.xml", b"<sec/>")]);
        assert_eq!(detect_format_from_bytes(&data).unwrap(), FormatType::Hwpx);
    }

    #[test]
    fn test_plain_zip_is_unknown() {
        let data = zip_with(&[("word/document.xml", b"<doc/>")]);
        assert!(matches!(
            detect_format_from_bytes(&data),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_detect_hwp3_by_raw_signature() {
        let mut data = HWP3_SIGNATURE.to_vec();
        data.extend_from_slice(&[0u8; 32]);
        assert_eq!(detect_format_from_bytes(&data).unwrap(), FormatType::Hwp3);
    }

    #[test]
    fn test_garbage_is_unknown() {
        assert!(matches!(
            detect_format_from_bytes(&[0u8; 16]),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(b"PK"),
            Err(Error::UnknownFormat)
        ));
    }
}
