//! Data model for extracted documents.
//!
//! The model is a strict tree: a [`Document`] owns its [`Section`]s, which
//! own their [`Paragraph`]s and [`Table`]s. Entities are built once during
//! assembly and never mutated afterwards.

mod document;
mod paragraph;
mod table;

pub use document::{Document, HwpVersion, Section};
pub use paragraph::Paragraph;
pub use table::Table;
