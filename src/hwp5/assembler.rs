//! Section assembly: reconstructing paragraphs and tables from the flat
//! record sequence.
//!
//! Nesting in the body stream is implicit: every record carries a 10-bit
//! `level`, and that level is the only authoritative nesting signal. The
//! assembler keeps a stack of open scopes (tables and cells above an
//! implicit section root) and closes them by monotone level comparison.
//! Tables are denormalized in the stream — a `CTRL_HEADER` announces one,
//! the next `TABLE` record carries its geometry, and each cell arrives as a
//! `LIST_HEADER` followed by ordinary paragraph records.

use crate::hwp5::record::{CtrlKind, Record, Tag};
use crate::hwp5::text::{decode_para_text, trim_paragraph};
use crate::model::{Paragraph, Section, Table};
use log::warn;

/// A paragraph being accumulated, possibly across several `PARA_TEXT`
/// records.
struct OpenParagraph {
    text: String,
    level: u16,
    /// Tables anchored at this paragraph's position, as indices into the
    /// section table list.
    table_refs: Vec<usize>,
}

impl OpenParagraph {
    fn new(level: u16) -> Self {
        Self {
            text: String::new(),
            level,
            table_refs: Vec::new(),
        }
    }
}

/// A table whose cells are still being consumed.
struct TableScope {
    /// Level of the `CTRL_HEADER` that announced the table.
    level: u16,
    table: Table,
    /// Next cell slot in row-major order.
    cell_index: u32,
}

impl TableScope {
    fn is_full(&self) -> bool {
        self.cell_index as usize >= self.table.cell_count()
    }
}

/// A cell whose paragraphs are still being consumed.
struct CellScope {
    r: usize,
    c: usize,
    /// Level of the `LIST_HEADER` that opened the cell.
    level: u16,
    open: Option<OpenParagraph>,
    /// Finalized paragraph texts, joined on close.
    parts: Vec<String>,
}

enum Scope {
    Table(TableScope),
    Cell(CellScope),
}

/// Stateful assembler for one body section.
///
/// Feed records in stream order, then call [`finish`](Self::finish); any
/// open paragraph and scopes are flushed as at end-of-stream.
pub struct SectionAssembler {
    section: Section,
    /// Section-level paragraph under construction.
    open: Option<OpenParagraph>,
    /// Open scopes above the section root; a cell always sits directly
    /// above its table.
    stack: Vec<Scope>,
    /// Level of a `CTRL_HEADER` that announced a table whose geometry
    /// record has not arrived yet.
    pending_table: Option<u16>,
}

impl SectionAssembler {
    /// Create an assembler for the section with the given stream index.
    pub fn new(index: u32) -> Self {
        Self {
            section: Section::new(index),
            open: None,
            stack: Vec::new(),
            pending_table: None,
        }
    }

    /// Consume one record.
    pub fn feed(&mut self, rec: &Record<'_>) {
        self.close_scopes(rec);

        match rec.tag {
            Tag::ParaHeader => {
                self.finalize_site_paragraph();
                *self.site_open_mut() = Some(OpenParagraph::new(rec.level));
            }
            Tag::ParaText => {
                let text = decode_para_text(rec.payload);
                let level = rec.level;
                let open = self.site_open_mut();
                open.get_or_insert_with(|| OpenParagraph::new(level))
                    .text
                    .push_str(&text);
            }
            Tag::CtrlHeader => {
                self.pending_table = match CtrlKind::from_payload(rec.payload) {
                    Some(CtrlKind::Table) => Some(rec.level),
                    _ => None,
                };
            }
            Tag::Table => {
                if let Some(level) = self.pending_table.take() {
                    if let Some((rows, cols)) = parse_table_geometry(rec.payload) {
                        self.stack.push(Scope::Table(TableScope {
                            level,
                            table: Table::new(rows, cols),
                            cell_index: 0,
                        }));
                    }
                }
            }
            Tag::ListHeader => {
                if let Some(Scope::Table(t)) = self.stack.last_mut() {
                    if t.is_full() {
                        warn!(
                            "section {}: cell {} beyond {}x{} grid, dropped",
                            self.section.index, t.cell_index, t.table.rows, t.table.cols
                        );
                    } else {
                        let r = (t.cell_index / t.table.cols as u32) as usize;
                        let c = (t.cell_index % t.table.cols as u32) as usize;
                        t.cell_index += 1;
                        self.stack.push(Scope::Cell(CellScope {
                            r,
                            c,
                            level: rec.level,
                            open: None,
                            parts: Vec::new(),
                        }));
                    }
                }
                // Outside a table scope a LIST_HEADER is a no-op.
            }
            Tag::ParaCharShape | Tag::ParaLineSeg | Tag::Other(_) => {}
        }
    }

    /// Flush remaining state and return the finished section.
    pub fn finish(mut self) -> Section {
        while !self.stack.is_empty() {
            if matches!(self.stack.last(), Some(Scope::Cell(_))) {
                self.close_cell();
            } else {
                self.close_table();
            }
        }
        if let Some(open) = self.open.take() {
            self.push_section_paragraph(open);
        }
        self.section
    }

    /// Close every scope that the incoming record's level (and kind) says
    /// has ended. The decision is taken at the deepest scope that wants to
    /// close; everything above it closes with it.
    fn close_scopes(&mut self, rec: &Record<'_>) {
        let mut close_from = None;
        for (i, scope) in self.stack.iter().enumerate() {
            let wants_close = match scope {
                Scope::Cell(c) => {
                    rec.level < c.level
                        || (rec.tag == Tag::ListHeader && rec.level <= c.level)
                }
                Scope::Table(t) => {
                    rec.level <= t.level && (rec.tag == Tag::ParaHeader || t.is_full())
                }
            };
            if wants_close {
                close_from = Some(i);
                break;
            }
        }
        if let Some(i) = close_from {
            while self.stack.len() > i {
                if matches!(self.stack.last(), Some(Scope::Cell(_))) {
                    self.close_cell();
                } else {
                    self.close_table();
                }
            }
        }
    }

    /// Pop the cell on top of the stack, flushing its pending paragraph and
    /// writing the joined text into its grid slot.
    fn close_cell(&mut self) {
        let Some(Scope::Cell(mut cell)) = self.stack.pop() else {
            return;
        };
        if let Some(open) = cell.open.take() {
            cell.parts.push(trim_paragraph(&open.text).to_string());
        }
        while cell.parts.last().is_some_and(|p| p.is_empty()) {
            cell.parts.pop();
        }
        while cell.parts.first().is_some_and(|p| p.is_empty()) {
            cell.parts.remove(0);
        }
        let text = cell.parts.join("\n");
        if let Some(Scope::Table(t)) = self.stack.last_mut() {
            t.table.set_cell(cell.r, cell.c, text);
        }
    }

    /// Pop the table on top of the stack, appending it to the section and
    /// anchoring a back-reference on the paragraph open at its insertion
    /// site.
    fn close_table(&mut self) {
        let Some(Scope::Table(t)) = self.stack.pop() else {
            return;
        };
        let idx = self.section.add_table(t.table);
        if let Some(open) = self.site_open_mut() {
            open.table_refs.push(idx);
        }
    }

    /// The innermost scope that accepts paragraphs: the topmost open cell,
    /// or the section root. A table scope never accepts paragraphs.
    fn site_open_mut(&mut self) -> &mut Option<OpenParagraph> {
        for scope in self.stack.iter_mut().rev() {
            if let Scope::Cell(c) = scope {
                return &mut c.open;
            }
        }
        &mut self.open
    }

    /// Finalize the paragraph open at the current insertion site, if any.
    fn finalize_site_paragraph(&mut self) {
        for scope in self.stack.iter_mut().rev() {
            if let Scope::Cell(c) = scope {
                if let Some(open) = c.open.take() {
                    c.parts.push(trim_paragraph(&open.text).to_string());
                }
                return;
            }
        }
        if let Some(open) = self.open.take() {
            self.push_section_paragraph(open);
        }
    }

    /// Append a finalized paragraph to the section. Blank paragraphs are
    /// dropped unless they anchor a table; a paragraph anchoring several
    /// tables keeps the first reference and emits blank carriers for the
    /// rest so every table keeps its position in the stream.
    fn push_section_paragraph(&mut self, open: OpenParagraph) {
        let text = trim_paragraph(&open.text).to_string();
        let mut refs = open.table_refs.into_iter();
        let first = refs.next();
        if !text.trim().is_empty() || first.is_some() {
            self.section.paragraphs.push(Paragraph {
                text,
                level: open.level,
                table_ref: first,
            });
        }
        for extra in refs {
            self.section.paragraphs.push(Paragraph {
                text: String::new(),
                level: open.level,
                table_ref: Some(extra),
            });
        }
    }
}

/// Read `(rows, cols)` from a `TABLE` record payload: two little-endian
/// 16-bit fields at offsets 8 and 10, after an 8-byte flags block.
fn parse_table_geometry(payload: &[u8]) -> Option<(u16, u16)> {
    if payload.len() < 12 {
        return None;
    }
    let rows = u16::from_le_bytes([payload[8], payload[9]]);
    let cols = u16::from_le_bytes([payload[10], payload[11]]);
    Some((rows, cols))
}
