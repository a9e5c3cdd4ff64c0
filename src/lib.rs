//! Surface Realiser — the surface-realisation engine of an interactive
//! natural-language-generation pipeline.
//!
//! Converts an abstract tree of grammatical specifications (noun phrases,
//! verb groups, sentences, coordinated structures, document-level
//! groupings) into linear, orthographically correct text, preserving a
//! mapping from each emitted text fragment back to the domain object that
//! produced it. That back-reference (the "anchor") is what lets a host UI
//! render generated text as clickable, editable hypertext.

pub mod core;
pub mod schema;
