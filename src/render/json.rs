//! JSON renderer.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON.
    Compact,
    /// Pretty-printed with 2-space indentation.
    #[default]
    Pretty,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Compact => serde_json::to_string(doc),
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
    };
    result.map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HwpVersion, Paragraph, Section};

    fn sample_doc() -> Document {
        let mut doc = Document::new();
        doc.version = HwpVersion::new(5, 0, 3, 0);
        let mut section = Section::new(0);
        section.add_paragraph(Paragraph::with_text("Hello"));
        doc.add_section(section);
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample_doc(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"version\": ["));
        assert!(json.contains("\"text\": \"Hello\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample_doc(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"version\":[5,0,3,0]"));
    }
}
