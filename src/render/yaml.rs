//! YAML report output.
//!
//! The report mirrors the downstream ingestion layout: an extraction
//! `metadata` block, the full `structure` tree, a flattened `tables` list,
//! and the `raw_text` view.

use crate::error::{Error, Result};
use crate::model::{Document, Table};
use crate::ExtractMethod;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ReportMetadata {
    source: String,
    method: &'static str,
    extracted_at: String,
}

/// Serializable extraction report.
#[derive(Debug, Serialize)]
pub struct YamlReport<'a> {
    metadata: ReportMetadata,
    structure: &'a Document,
    tables: Vec<&'a Table>,
    raw_text: String,
}

impl<'a> YamlReport<'a> {
    /// Assemble a report for a parsed document.
    pub fn new(doc: &'a Document, source: impl Into<String>, method: ExtractMethod) -> Self {
        Self {
            metadata: ReportMetadata {
                source: source.into(),
                method: method.as_str(),
                extracted_at: Utc::now().to_rfc3339(),
            },
            structure: doc,
            tables: doc.sections.iter().flat_map(|s| s.tables.iter()).collect(),
            raw_text: super::to_raw_text(doc),
        }
    }

    /// Serialize the report to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Render(e.to_string()))
    }
}

/// Render a document to a YAML report.
pub fn to_yaml(doc: &Document, source: impl Into<String>, method: ExtractMethod) -> Result<String> {
    YamlReport::new(doc, source, method).to_yaml_string()
}
