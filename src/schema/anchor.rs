use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Newtype wrapper for anchor target IDs — an opaque identifier of the
/// domain object a text fragment refers back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorId(pub u64);

/// A dynamic value carried opaquely inside an anchor. The engine never
/// interprets these; the host UI uses them to build interaction menus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

/// A back-reference from a generated text fragment to the domain object
/// that produced it, plus whatever menu data the host UI attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub target: AnchorId,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

impl Anchor {
    pub fn new(target: AnchorId) -> Self {
        Self {
            target,
            properties: HashMap::new(),
        }
    }
}

/// The fragment type threaded through the whole pipeline: a piece of text
/// plus an optional back-reference to the domain object it realises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorString {
    pub text: String,
    pub anchor: Option<Anchor>,
}

impl AnchorString {
    pub fn new(text: impl Into<String>, anchor: Option<Anchor>) -> Self {
        Self {
            text: text.into(),
            anchor,
        }
    }

    /// A plain fragment with no back-reference.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Rewrite the text while keeping the anchor. Used for transformations
    /// that do not change which domain object the fragment represents
    /// (case inflection, pluralization, punctuation merging).
    pub fn map_text(self, f: impl FnOnce(String) -> String) -> Self {
        Self {
            text: f(self.text),
            anchor: self.anchor,
        }
    }
}

impl From<&str> for AnchorString {
    fn from(s: &str) -> Self {
        AnchorString::literal(s)
    }
}

impl From<String> for AnchorString {
    fn from(s: String) -> Self {
        AnchorString::literal(s)
    }
}

/// Concatenate a fragment sequence into one fragment re-homed to the given
/// anchor. This is the *dominant constituent* rule: when several
/// constituents combine into a single fragment (an NP absorbing its
/// determiner and modifiers), the resulting fragment carries the anchor of
/// the node that dominated the merge, and the children's anchors are
/// deliberately discarded rather than silently merged.
pub fn collapse(fragments: Vec<AnchorString>, anchor: Option<Anchor>) -> AnchorString {
    let mut text = String::new();
    for frag in fragments {
        text.push_str(&frag.text);
    }
    AnchorString { text, anchor }
}

/// Concatenate fragment texts without any re-homing, for inspection only.
pub fn joined_text(fragments: &[AnchorString]) -> String {
    fragments.iter().map(|f| f.text.as_str()).collect()
}
