//! OLE2 compound-container access for HWP 5.x files.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Wrapper over a compound file exposing the streams the extractor needs.
///
/// The whole file is buffered in memory; streams are read once, start to
/// end, and every reader handle is released when the call returns.
pub struct OleContainer {
    comp: cfb::CompoundFile<Cursor<Vec<u8>>>,
}

impl OleContainer {
    /// Open a compound file from a path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Open a compound file from an in-memory byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let comp = cfb::CompoundFile::open(Cursor::new(data))
            .map_err(|e| Error::NotHwp5(format!("not an OLE2 compound file: {e}")))?;
        Ok(Self { comp })
    }

    /// Check whether a stream exists (names are case-sensitive).
    pub fn exists(&self, name: &str) -> bool {
        self.comp.is_stream(name)
    }

    /// Read a named stream fully into memory.
    pub fn read_stream(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut stream = self.comp.open_stream(name)?;
        let mut data = Vec::new();
        stream.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Enumerate `BodyText/Section{n}` streams, ordered by the numeric value
    /// of the suffix (so `Section10` follows `Section9`).
    ///
    /// Returns `(n, stream_path)` pairs. A container without a `BodyText`
    /// storage yields an empty list.
    pub fn body_sections(&self) -> Vec<(u32, String)> {
        let mut sections = Vec::new();
        if let Ok(entries) = self.comp.read_storage("/BodyText") {
            for entry in entries {
                if !entry.is_stream() {
                    continue;
                }
                if let Some(suffix) = entry.name().strip_prefix("Section") {
                    if let Ok(n) = suffix.parse::<u32>() {
                        sections.push((n, format!("/BodyText/{}", entry.name())));
                    }
                }
            }
        }
        sections.sort_by_key(|(n, _)| *n);
        sections
    }
}

impl std::fmt::Debug for OleContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OleContainer")
            .field("sections", &self.body_sections().len())
            .finish()
    }
}
