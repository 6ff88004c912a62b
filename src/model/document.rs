//! Document and section model structures.

use super::{Paragraph, Table};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// HWP file-format version, decoded from the `FileHeader` stream.
///
/// Serializes as the four-element sequence `[major, minor, revision, build]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HwpVersion {
    pub major: u8,
    pub minor: u8,
    pub revision: u8,
    pub build: u8,
}

impl HwpVersion {
    /// Create a version from its four components.
    pub fn new(major: u8, minor: u8, revision: u8, build: u8) -> Self {
        Self {
            major,
            minor,
            revision,
            build,
        }
    }

    /// Check for the HWP 5.x major version.
    pub fn is_5x(&self) -> bool {
        self.major == 5
    }
}

impl std::fmt::Display for HwpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.revision, self.build
        )
    }
}

impl Serialize for HwpVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.major, self.minor, self.revision, self.build].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HwpVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parts = <Vec<u8>>::deserialize(deserializer)?;
        if parts.len() != 4 {
            return Err(D::Error::invalid_length(parts.len(), &"4 version components"));
        }
        Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }
}

/// One body section of a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Section {
    /// Numeric suffix of the source stream name (`BodyText/Section{n}`),
    /// not a positional index.
    pub index: u32,

    /// Top-level paragraphs, excluding text produced inside table cells.
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,

    /// Tables in order of occurrence.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Section {
    /// Create an empty section with the given stream index.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Append a paragraph.
    pub fn add_paragraph(&mut self, para: Paragraph) {
        self.paragraphs.push(para);
    }

    /// Append a table, returning its index in the table list.
    pub fn add_table(&mut self, table: Table) -> usize {
        self.tables.push(table);
        self.tables.len() - 1
    }

    /// Check if the section holds no paragraphs and no tables.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty()
    }
}

/// A parsed document: version info plus body sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// File-format version from the header.
    pub version: HwpVersion,

    /// Whether the body streams were stored DEFLATE-compressed.
    #[serde(default)]
    pub compressed: bool,

    /// Body sections in numeric stream order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Check if the document holds no content.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() || self.sections.iter().all(|s| s.is_empty())
    }

    /// Total paragraph count across sections (cell text excluded).
    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(|s| s.paragraphs.len()).sum()
    }

    /// Total table count across sections.
    pub fn table_count(&self) -> usize {
        self.sections.iter().map(|s| s.tables.len()).sum()
    }

    /// Convert to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to compact JSON.
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_display() {
        let version = HwpVersion::new(5, 0, 3, 0);
        assert_eq!(version.to_string(), "5.0.3.0");
        assert!(version.is_5x());
        assert!(!HwpVersion::new(3, 0, 0, 0).is_5x());
    }

    #[test]
    fn test_version_serializes_as_sequence() {
        let version = HwpVersion::new(5, 1, 0, 2);
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "[5,1,0,2]");

        let parsed: HwpVersion = serde_json::from_str("[5,1,0,2]").unwrap();
        assert_eq!(parsed, version);
    }

    #[test]
    fn test_document_creation() {
        let mut doc = Document::new();
        assert!(doc.is_empty());

        let mut section = Section::new(0);
        section.add_paragraph(Paragraph::with_text("Hello"));
        doc.add_section(section);

        assert!(!doc.is_empty());
        assert_eq!(doc.paragraph_count(), 1);
        assert_eq!(doc.table_count(), 0);
    }

    #[test]
    fn test_section_index_is_stream_suffix() {
        let section = Section::new(10);
        assert_eq!(section.index, 10);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut doc = Document::new();
        doc.version = HwpVersion::new(5, 0, 5, 6);
        doc.compressed = true;

        let mut section = Section::new(0);
        section.add_paragraph(Paragraph::with_text("본문"));
        let idx = section.add_table(Table::new(2, 2));
        assert_eq!(idx, 0);
        doc.add_section(section);

        let json = doc.to_json().unwrap();
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version, doc.version);
        assert!(parsed.compressed);
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(parsed.sections[0].tables[0].rows, 2);
    }
}
