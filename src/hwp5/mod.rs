//! HWP 5.x binary-format parser.
//!
//! An HWP 5.x file is an OLE2 compound container. The `FileHeader` stream
//! carries the version and feature flags; each `BodyText/Section{n}` stream
//! is an (optionally raw-DEFLATE-compressed) sequence of tagged records that
//! the section assembler reconstructs into paragraphs and tables.

pub mod assembler;
pub mod container;
pub mod decompress;
pub mod header;
pub mod record;
pub mod text;

pub use assembler::SectionAssembler;
pub use container::OleContainer;
pub use header::FileHeader;

use crate::error::{Error, Result};
use crate::model::{Document, Section};
use log::warn;
use record::RecordIter;
use std::path::Path;

/// Stream name of the fixed-layout file header.
pub const STREAM_FILE_HEADER: &str = "/FileHeader";

/// Stream name of the pre-rendered preview text (optional).
pub const STREAM_PRV_TEXT: &str = "/PrvText";

/// Parser for HWP 5.x documents.
///
/// ```no_run
/// use unhwp::hwp5::Hwp5Parser;
///
/// let doc = Hwp5Parser::open("report.hwp")?.parse()?;
/// println!("sections: {}", doc.sections.len());
/// # Ok::<(), unhwp::Error>(())
/// ```
#[derive(Debug)]
pub struct Hwp5Parser {
    container: OleContainer,
    header: FileHeader,
    max_expansion: usize,
}

impl Hwp5Parser {
    /// Open an HWP 5.x file for parsing.
    ///
    /// Fails with [`Error::NotHwp5`] when the container or signature does
    /// not match, and with [`Error::Encrypted`] before any body data is
    /// touched when the encryption flag is set.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = OleContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a parser from an in-memory file image.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = OleContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    fn from_container(mut container: OleContainer) -> Result<Self> {
        let header_data = container
            .read_stream(STREAM_FILE_HEADER)
            .map_err(|_| Error::NotHwp5("missing FileHeader stream".to_string()))?;
        let header = FileHeader::parse(&header_data)?;
        if header.encrypted {
            return Err(Error::Encrypted);
        }
        Ok(Self {
            container,
            header,
            max_expansion: decompress::DEFAULT_MAX_EXPANSION,
        })
    }

    /// Override the decompression expansion ceiling (output bytes per input
    /// byte).
    pub fn with_max_expansion(mut self, ratio: usize) -> Self {
        self.max_expansion = ratio;
        self
    }

    /// The decoded file header.
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Parse every body section into a [`Document`].
    ///
    /// Sections are visited in numeric stream order. Container and
    /// decompression failures abort the whole document; a malformed record
    /// aborts only the owning section, which keeps what was assembled
    /// before the fault.
    pub fn parse(&mut self) -> Result<Document> {
        let mut doc = Document::new();
        doc.version = self.header.version;
        doc.compressed = self.header.compressed;

        for (index, stream_path) in self.container.body_sections() {
            let raw = self.container.read_stream(&stream_path)?;
            let data = decompress::decode_stream(&raw, self.header.compressed, self.max_expansion)?;
            doc.add_section(assemble_section(index, &data));
        }

        Ok(doc)
    }

    /// Read the `PrvText` preview stream, if present and non-empty.
    ///
    /// This is the fast text-only fallback; the structural path never uses
    /// it.
    pub fn read_prv_text(&mut self) -> Option<String> {
        if !self.container.exists(STREAM_PRV_TEXT) {
            return None;
        }
        let data = self.container.read_stream(STREAM_PRV_TEXT).ok()?;
        let preview = text::decode_prv_text(&data);
        if preview.is_empty() {
            None
        } else {
            Some(preview)
        }
    }
}

/// Run the section assembler over one decompressed record stream.
///
/// A malformed or truncated record ends assembly of this section; open
/// scopes are flushed as at end-of-stream and earlier content is kept.
pub fn assemble_section(index: u32, data: &[u8]) -> Section {
    let mut asm = SectionAssembler::new(index);
    for item in RecordIter::new(data) {
        match item {
            Ok(rec) => asm.feed(&rec),
            Err(e) => {
                warn!("section {index}: record stream aborted: {e}");
                break;
            }
        }
    }
    asm.finish()
}
