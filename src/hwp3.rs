//! HWP 3.x support via an external converter.
//!
//! The 1990s-era 3.x binary format is not parsed natively. Files triaged as
//! [`FormatType::Hwp3`](crate::detect::FormatType::Hwp3) can be run through
//! a converter command that prints plain text to stdout (the default wiring
//! is `libreoffice --headless --cat`), and the output is wrapped into the
//! shared document model as one section of paragraphs.

use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, Section};
use std::path::Path;
use std::process::Command;

/// External-converter wrapper for HWP 3.x files.
pub struct Hwp3Converter {
    command: String,
    args: Vec<String>,
}

impl Default for Hwp3Converter {
    fn default() -> Self {
        Self {
            command: "libreoffice".to_string(),
            args: vec!["--headless".to_string(), "--cat".to_string()],
        }
    }
}

impl Hwp3Converter {
    /// Use a custom converter command. The input path is appended as the
    /// final argument and stdout is taken as the extracted text.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// Add fixed arguments placed before the input path.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether the converter command can be invoked at all.
    pub fn available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    /// Convert a file and wrap the converter's stdout into a [`Document`]
    /// with a single section, one paragraph per non-blank output line.
    pub fn convert(&self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| Error::Conversion(format!("{}: {e}", self.command)))?;

        if !output.status.success() {
            return Err(Error::Conversion(format!(
                "{} exited with {} for {}",
                self.command,
                output.status,
                path.display()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let mut section = Section::new(0);
        for line in text.lines() {
            let line = line.trim_end();
            if !line.trim().is_empty() {
                section.add_paragraph(Paragraph::with_text(line));
            }
        }

        let mut doc = Document::new();
        doc.add_section(section);
        Ok(doc)
    }
}
