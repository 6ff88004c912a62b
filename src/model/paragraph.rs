//! Paragraph model.

use serde::{Deserialize, Serialize};

/// A paragraph of body text.
///
/// `text` holds decoded Unicode with inline control codes already stripped or
/// translated; `level` preserves the outline depth reported by the source
/// record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text (UTF-8 in memory).
    pub text: String,

    /// Outline depth as reported by the source record.
    #[serde(default)]
    pub level: u16,

    /// Index into the owning section's table list, set when a table was
    /// anchored at this paragraph's position in the body stream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_ref: Option<usize>,
}

impl Paragraph {
    /// Create a paragraph with the given text at level 0.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a paragraph with text and outline level.
    pub fn new(text: impl Into<String>, level: u16) -> Self {
        Self {
            text: text.into(),
            level,
            table_ref: None,
        }
    }

    /// Check if this paragraph carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_creation() {
        let para = Paragraph::with_text("Hello");
        assert_eq!(para.text, "Hello");
        assert_eq!(para.level, 0);
        assert!(!para.is_blank());

        let para = Paragraph::new("nested", 2);
        assert_eq!(para.level, 2);
    }

    #[test]
    fn test_blank_detection() {
        assert!(Paragraph::with_text("").is_blank());
        assert!(Paragraph::with_text("  \n ").is_blank());
        assert!(!Paragraph::with_text("x").is_blank());
    }

    #[test]
    fn test_serialization_skips_empty_ref() {
        let para = Paragraph::with_text("Test");
        let json = serde_json::to_string(&para).unwrap();
        assert!(!json.contains("table_ref"));

        let mut para = Paragraph::with_text("Anchor");
        para.table_ref = Some(0);
        let json = serde_json::to_string(&para).unwrap();
        assert!(json.contains("table_ref"));
    }
}
