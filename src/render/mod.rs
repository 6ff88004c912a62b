//! Output views over the document model.
//!
//! Three views share the model: a flattened plain-text dump, a YAML report
//! with an extraction-metadata block, and plain JSON.

mod json;
mod text;
mod yaml;

pub use json::{to_json, JsonFormat};
pub use text::to_raw_text;
pub use yaml::{to_yaml, YamlReport};
