//! # unhwp
//!
//! Structured text extraction from Korean HWP 5.x and HWPX documents.
//!
//! HWP 5.x files are OLE2 compound containers holding DEFLATE-compressed
//! record streams; this library decodes those streams and reconstructs
//! sections, paragraphs, and tables. HWPX (the ZIP + XML successor) is
//! parsed into the same model, and legacy HWP 3.x files can be routed
//! through an external converter.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unhwp::{extract_text, parse_file};
//!
//! // Simple text extraction
//! let text = extract_text("document.hwp")?;
//! println!("{}", text);
//!
//! // Full parsing with access to structure
//! let doc = parse_file("document.hwp")?;
//! for section in &doc.sections {
//!     println!(
//!         "section {}: {} paragraphs, {} tables",
//!         section.index,
//!         section.paragraphs.len(),
//!         section.tables.len()
//!     );
//! }
//! # Ok::<(), unhwp::Error>(())
//! ```
//!
//! ## Format-Specific APIs
//!
//! ```no_run
//! use unhwp::hwp5::Hwp5Parser;
//! use unhwp::hwpx::HwpxParser;
//!
//! let doc = Hwp5Parser::open("binary.hwp")?.parse()?;
//! let doc = HwpxParser::open("modern.hwpx")?.parse()?;
//! # Ok::<(), unhwp::Error>(())
//! ```

pub mod batch;
pub mod detect;
pub mod error;
pub mod hwp3;
pub mod hwp5;
pub mod hwpx;
pub mod model;
pub mod render;

// Re-exports
pub use detect::{detect_format_from_bytes, detect_format_from_path, FormatType};
pub use error::{Error, Result};
pub use hwp5::Hwp5Parser;
pub use hwpx::HwpxParser;
pub use model::{Document, HwpVersion, Paragraph, Section, Table};

use std::path::Path;

/// How a document's content was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMethod {
    /// Structural decode of the HWP 5.x binary record streams.
    Hwp5,
    /// Structural parse of HWPX section XML.
    Hwpx,
    /// External-converter output for HWP 3.x.
    Hwp3,
    /// Text-only fallback from the `PrvText` preview stream.
    PrvText,
}

impl ExtractMethod {
    /// Stable method tag used in report metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractMethod::Hwp5 => "hwp5_structure",
            ExtractMethod::Hwpx => "hwpx_structure",
            ExtractMethod::Hwp3 => "hwp3_convert",
            ExtractMethod::PrvText => "prvtext",
        }
    }
}

impl std::fmt::Display for ExtractMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a document file, auto-detecting its format.
///
/// HWP 3.x files are rejected with [`Error::UnsupportedFormat`]; route them
/// through [`hwp3::Hwp3Converter`] explicitly.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    parse_path_with_method(path.as_ref()).map(|(doc, _)| doc)
}

/// Parse a document from an in-memory file image.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    match detect_format_from_bytes(data)? {
        FormatType::Hwp5 => Hwp5Parser::from_bytes(data.to_vec())?.parse(),
        FormatType::Hwpx => HwpxParser::from_bytes(data.to_vec())?.parse(),
        FormatType::Hwp3 => Err(Error::UnsupportedFormat(
            "HWP 3.x requires an external converter".to_string(),
        )),
    }
}

/// Parse a file and report which extraction method produced the result.
pub(crate) fn parse_path_with_method(path: &Path) -> Result<(Document, ExtractMethod)> {
    match detect_format_from_path(path)? {
        FormatType::Hwp5 => {
            let doc = Hwp5Parser::open(path)?.parse()?;
            Ok((doc, ExtractMethod::Hwp5))
        }
        FormatType::Hwpx => {
            let doc = HwpxParser::open(path)?.parse()?;
            Ok((doc, ExtractMethod::Hwpx))
        }
        FormatType::Hwp3 => Err(Error::UnsupportedFormat(
            "HWP 3.x requires an external converter".to_string(),
        )),
    }
}

/// Extract flattened plain text from a document.
///
/// For HWP 5.x the structural path is tried first; if body parsing fails
/// (or yields nothing) the `PrvText` preview stream is used as a text-only
/// fallback. Encrypted documents fail before any content is read.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    match detect_format_from_path(path)? {
        FormatType::Hwp5 => {
            let mut parser = Hwp5Parser::open(path)?;
            match parser.parse() {
                Ok(doc) => {
                    let text = render::to_raw_text(&doc);
                    if text.is_empty() {
                        if let Some(preview) = parser.read_prv_text() {
                            return Ok(preview);
                        }
                    }
                    Ok(text)
                }
                Err(e) => parser.read_prv_text().ok_or(e),
            }
        }
        FormatType::Hwpx => {
            let doc = HwpxParser::open(path)?.parse()?;
            Ok(render::to_raw_text(&doc))
        }
        FormatType::Hwp3 => Err(Error::UnsupportedFormat(
            "HWP 3.x requires an external converter".to_string(),
        )),
    }
}

/// Parse a file and render the YAML extraction report.
pub fn to_yaml(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let (doc, method) = parse_path_with_method(path)?;
    render::to_yaml(&doc, path.display().to_string(), method)
}

/// Parse a file and render it as JSON.
pub fn to_json(path: impl AsRef<Path>, format: render::JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}
