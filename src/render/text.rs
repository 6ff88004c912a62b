//! Flattened raw-text view.

use crate::model::{Document, Section};

/// Flatten a document to plain text by post-order traversal.
///
/// Each top-level paragraph contributes its text; a table is interleaved at
/// its position of occurrence as a tab-delimited, newline-separated dump.
/// Tables no paragraph refers to are appended at the end of their section.
/// Sections are separated by a blank line.
pub fn to_raw_text(doc: &Document) -> String {
    doc.sections
        .iter()
        .map(section_raw_text)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn section_raw_text(section: &Section) -> String {
    let mut chunks = Vec::new();
    let mut emitted = vec![false; section.tables.len()];

    for para in &section.paragraphs {
        if !para.text.is_empty() {
            chunks.push(para.text.clone());
        }
        if let Some(idx) = para.table_ref {
            if let Some(table) = section.tables.get(idx) {
                chunks.push(table.plain_text());
                emitted[idx] = true;
            }
        }
    }

    for (idx, table) in section.tables.iter().enumerate() {
        if !emitted[idx] {
            chunks.push(table.plain_text());
        }
    }

    chunks.join("\n")
}
