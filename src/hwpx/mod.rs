//! HWPX (ZIP + XML) parser.
//!
//! HWPX stores each body section as `Contents/section{n}.xml` inside a ZIP
//! container. Element lookup is namespace-tolerant: tags are matched by
//! local name so `hp:p` and `p` read the same.

use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, Section, Table};
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use std::path::Path;

/// Parser for HWPX documents.
///
/// ```no_run
/// use unhwp::hwpx::HwpxParser;
///
/// let doc = HwpxParser::open("report.hwpx")?.parse()?;
/// # Ok::<(), unhwp::Error>(())
/// ```
pub struct HwpxParser {
    archive: zip::ZipArchive<Cursor<Vec<u8>>>,
}

impl HwpxParser {
    /// Open an HWPX file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Create a parser from an in-memory file image.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Parse every body section into a [`Document`].
    pub fn parse(&mut self) -> Result<Document> {
        let mut doc = Document::new();

        for (index, name) in self.section_entries() {
            let mut file = self
                .archive
                .by_name(&name)
                .map_err(|e| Error::ZipArchive(e.to_string()))?;
            let mut xml = String::new();
            file.read_to_string(&mut xml)?;
            drop(file);

            doc.add_section(parse_section_xml(index, &xml)?);
        }

        Ok(doc)
    }

    /// Enumerate `Contents/section{n}.xml` entries ordered by numeric `n`.
    fn section_entries(&self) -> Vec<(u32, String)> {
        let mut entries = Vec::new();
        for name in self.archive.file_names() {
            if let Some(n) = section_suffix(name) {
                entries.push((n, name.to_string()));
            }
        }
        entries.sort_by_key(|(n, _)| *n);
        entries
    }
}

/// Extract `n` from `Contents/section{n}.xml`, case-insensitively.
fn section_suffix(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    let rest = lower.strip_prefix("contents/section")?;
    let digits = rest.strip_suffix(".xml")?;
    digits.parse().ok()
}

/// Table under construction while walking section XML.
struct TableBuilder {
    declared: Option<(u16, u16)>,
    grid: Vec<Vec<String>>,
    cell_parts: Option<Vec<String>>,
    cell_current: String,
    in_cell_para: bool,
}

impl TableBuilder {
    fn finish(self) -> Table {
        let observed_rows = self.grid.len() as u16;
        let observed_cols = self.grid.iter().map(|r| r.len()).max().unwrap_or(0) as u16;
        let (rows, cols) = self
            .declared
            .unwrap_or((observed_rows, observed_cols));
        let mut table = Table::new(rows.max(1), cols.max(1));
        for (r, row) in self.grid.into_iter().enumerate() {
            for (c, text) in row.into_iter().enumerate() {
                table.set_cell(r, c, text);
            }
        }
        table
    }
}

/// Parse one section XML document into the shared section model.
fn parse_section_xml(index: u32, xml: &str) -> Result<Section> {
    let mut section = Section::new(index);

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut para: Option<String> = None;
    let mut pending_refs: Vec<usize> = Vec::new();
    let mut table: Option<TableBuilder> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name();
                let local = name.local_name();
                match local.as_ref() {
                    b"p" => {
                        if let Some(tb) = table.as_mut() {
                            if tb.cell_parts.is_some() {
                                tb.in_cell_para = true;
                                tb.cell_current.clear();
                            }
                        } else if para.is_none() {
                            para = Some(String::new());
                        }
                    }
                    b"t" => in_text = true,
                    b"tbl" => {
                        let mut rows = None;
                        let mut cols = None;
                        for attr in e.attributes().flatten() {
                            match attr.key.local_name().as_ref() {
                                b"rowCnt" => {
                                    rows = String::from_utf8_lossy(&attr.value).parse::<u16>().ok()
                                }
                                b"colCnt" => {
                                    cols = String::from_utf8_lossy(&attr.value).parse::<u16>().ok()
                                }
                                _ => {}
                            }
                        }
                        let declared = rows.zip(cols);
                        table = Some(TableBuilder {
                            declared,
                            grid: Vec::new(),
                            cell_parts: None,
                            cell_current: String::new(),
                            in_cell_para: false,
                        });
                    }
                    b"tr" => {
                        if let Some(tb) = table.as_mut() {
                            tb.grid.push(Vec::new());
                        }
                    }
                    b"tc" => {
                        if let Some(tb) = table.as_mut() {
                            tb.cell_parts = Some(Vec::new());
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if in_text {
                    let text = e.unescape().unwrap_or_default();
                    if let Some(tb) = table.as_mut() {
                        if tb.in_cell_para {
                            tb.cell_current.push_str(&text);
                        }
                    } else if let Some(p) = para.as_mut() {
                        p.push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                let local = name.local_name();
                match local.as_ref() {
                    b"t" => in_text = false,
                    b"p" => {
                        if let Some(tb) = table.as_mut() {
                            if tb.in_cell_para {
                                tb.in_cell_para = false;
                                let text = std::mem::take(&mut tb.cell_current);
                                if let Some(parts) = tb.cell_parts.as_mut() {
                                    parts.push(text.trim().to_string());
                                }
                            }
                        } else if let Some(text) = para.take() {
                            push_paragraph(&mut section, text, &mut pending_refs);
                        }
                    }
                    b"tc" => {
                        if let Some(tb) = table.as_mut() {
                            if let Some(parts) = tb.cell_parts.take() {
                                let text = parts.join("\n").trim().to_string();
                                if let Some(row) = tb.grid.last_mut() {
                                    row.push(text);
                                }
                            }
                        }
                    }
                    b"tbl" => {
                        if let Some(tb) = table.take() {
                            let idx = section.add_table(tb.finish());
                            pending_refs.push(idx);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    // A dangling open paragraph or table reference at EOF is flushed.
    if let Some(text) = para.take() {
        push_paragraph(&mut section, text, &mut pending_refs);
    }
    for idx in pending_refs {
        section.paragraphs.push(Paragraph {
            text: String::new(),
            level: 0,
            table_ref: Some(idx),
        });
    }

    Ok(section)
}

/// Finalize a section-level paragraph, attaching any tables that occurred
/// inside it.
fn push_paragraph(section: &mut Section, text: String, pending_refs: &mut Vec<usize>) {
    let text = text.trim().to_string();
    let mut refs = pending_refs.drain(..);
    let first = refs.next();
    if !text.is_empty() || first.is_some() {
        section.paragraphs.push(Paragraph {
            text,
            level: 0,
            table_ref: first,
        });
    }
    let extras: Vec<usize> = refs.collect();
    for extra in extras {
        section.paragraphs.push(Paragraph {
            text: String::new(),
            level: 0,
            table_ref: Some(extra),
        });
    }
}
