//! Data model shared across the engine: anchors, grammatical features,
//! and document-structure levels.

pub mod anchor;
pub mod doc_structure;
pub mod features;
