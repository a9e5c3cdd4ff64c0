//! The closed set of specification node kinds and the attributes every
//! node carries.

use serde::{Deserialize, Serialize};

use crate::core::phrase::{CoordinateNpPhraseSpec, NpPhraseSpec, PpPhraseSpec, StringPhraseSpec};
use crate::core::realiser::{RealiseContext, HIGHLIGHT_END, HIGHLIGHT_START};
use crate::core::sentence::{AggregatePhraseSpec, SPhraseSpec};
use crate::core::text_spec::TextSpec;
use crate::core::verb_group::{CoordinateVerbGroupSpec, VerbGroupSpec};
use crate::schema::anchor::{collapse, Anchor, AnchorString};
use crate::schema::doc_structure::DocStructure;

/// Attributes shared by every specification node: the optional
/// back-reference, the visual highlight marker, and elision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecMeta {
    #[serde(default)]
    pub anchor: Option<Anchor>,
    #[serde(default)]
    pub flash: bool,
    #[serde(default)]
    pub elided: bool,
}

/// A node of the specification tree. Tagged variants rather than an open
/// class hierarchy: the set of node kinds is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Spec {
    Str(StringPhraseSpec),
    Np(NpPhraseSpec),
    CoordNp(CoordinateNpPhraseSpec),
    VerbGroup(VerbGroupSpec),
    CoordVerbGroup(CoordinateVerbGroupSpec),
    Pp(PpPhraseSpec),
    Sentence(SPhraseSpec),
    Aggregate(AggregatePhraseSpec),
    Text(TextSpec),
}

impl Spec {
    pub fn meta(&self) -> &SpecMeta {
        match self {
            Spec::Str(n) => &n.meta,
            Spec::Np(n) => &n.meta,
            Spec::CoordNp(n) => &n.meta,
            Spec::VerbGroup(n) => &n.meta,
            Spec::CoordVerbGroup(n) => &n.meta,
            Spec::Pp(n) => &n.meta,
            Spec::Sentence(n) => &n.meta,
            Spec::Aggregate(n) => &n.meta,
            Spec::Text(n) => &n.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut SpecMeta {
        match self {
            Spec::Str(n) => &mut n.meta,
            Spec::Np(n) => &mut n.meta,
            Spec::CoordNp(n) => &mut n.meta,
            Spec::VerbGroup(n) => &mut n.meta,
            Spec::CoordVerbGroup(n) => &mut n.meta,
            Spec::Pp(n) => &mut n.meta,
            Spec::Sentence(n) => &mut n.meta,
            Spec::Aggregate(n) => &mut n.meta,
            Spec::Text(n) => &mut n.meta,
        }
    }

    pub fn set_anchor(&mut self, anchor: Anchor) -> &mut Self {
        self.meta_mut().anchor = Some(anchor);
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.meta_mut().anchor = Some(anchor);
        self
    }

    /// Realise this node into an ordered fragment sequence. An elided
    /// node realises to nothing; a `flash` node is wrapped in the
    /// highlight marker pair; an anchored node collapses its realisation
    /// into a single fragment re-homed to that anchor (the dominant
    /// constituent absorbs its parts).
    pub fn realise(&self, ctx: &RealiseContext<'_>) -> Vec<AnchorString> {
        let meta = self.meta();
        if meta.elided {
            return Vec::new();
        }
        let mut frags = match self {
            Spec::Str(n) => n.realise(ctx),
            Spec::Np(n) => n.realise(ctx),
            Spec::CoordNp(n) => n.realise(ctx),
            Spec::VerbGroup(n) => n.realise(ctx),
            Spec::CoordVerbGroup(n) => n.realise(ctx),
            Spec::Pp(n) => n.realise(ctx),
            Spec::Sentence(n) => n.realise(ctx),
            Spec::Aggregate(n) => n.realise(ctx),
            Spec::Text(n) => n.realise(ctx),
        };
        if meta.anchor.is_some() && !matches!(self, Spec::CoordNp(_) | Spec::CoordVerbGroup(_)) {
            // Coordinations keep each conjunct's own anchor instead
            frags = vec![collapse(frags, meta.anchor.clone())];
        }
        if meta.flash {
            if let Some(first) = frags.first_mut() {
                first.text.insert_str(0, HIGHLIGHT_START);
            }
            if let Some(last) = frags.last_mut() {
                last.text.push_str(HIGHLIGHT_END);
            }
        }
        frags
    }

    /// The head word of this node.
    pub fn head(&self) -> String {
        match self {
            Spec::Str(n) => n.head(),
            Spec::Np(n) => n.head(),
            Spec::CoordNp(n) => n.head(),
            Spec::VerbGroup(n) => n.head(),
            Spec::CoordVerbGroup(n) => n.head(),
            Spec::Pp(n) => n.head(),
            Spec::Sentence(n) => n.head(),
            Spec::Aggregate(n) => n.head(),
            Spec::Text(n) => n.head(),
        }
    }

    /// The document-structure level of this node. Phrase-level for
    /// everything except text-structure nodes, which report their
    /// effective level.
    pub fn structure_level(&self) -> DocStructure {
        match self {
            Spec::Text(n) => n.effective_level(),
            _ => DocStructure::Phrase,
        }
    }

    /// Promote this node to at least `target`. A node whose level already
    /// dominates the target is returned unchanged; header and list levels
    /// absorb promotion without changing level. A sticky target sits
    /// outside the linear order, so the node is wrapped in it directly.
    /// Otherwise the node is wrapped in a text-structure node one level
    /// higher and promotion recurses. The result's level is the max of
    /// the requested level and the node's computed level.
    pub fn promote(self, target: DocStructure) -> Spec {
        let level = self.structure_level();
        if level.dominates(target) {
            return self;
        }
        if target.is_sticky() {
            return Spec::Text(TextSpec::with_level(target, vec![self]));
        }
        let wrapper = TextSpec::with_level(level.successor(), vec![self]);
        Spec::Text(wrapper).promote(target)
    }
}

impl From<StringPhraseSpec> for Spec {
    fn from(n: StringPhraseSpec) -> Spec {
        Spec::Str(n)
    }
}

impl From<NpPhraseSpec> for Spec {
    fn from(n: NpPhraseSpec) -> Spec {
        Spec::Np(n)
    }
}

impl From<CoordinateNpPhraseSpec> for Spec {
    fn from(n: CoordinateNpPhraseSpec) -> Spec {
        Spec::CoordNp(n)
    }
}

impl From<VerbGroupSpec> for Spec {
    fn from(n: VerbGroupSpec) -> Spec {
        Spec::VerbGroup(n)
    }
}

impl From<CoordinateVerbGroupSpec> for Spec {
    fn from(n: CoordinateVerbGroupSpec) -> Spec {
        Spec::CoordVerbGroup(n)
    }
}

impl From<PpPhraseSpec> for Spec {
    fn from(n: PpPhraseSpec) -> Spec {
        Spec::Pp(n)
    }
}

impl From<SPhraseSpec> for Spec {
    fn from(n: SPhraseSpec) -> Spec {
        Spec::Sentence(n)
    }
}

impl From<AggregatePhraseSpec> for Spec {
    fn from(n: AggregatePhraseSpec) -> Spec {
        Spec::Aggregate(n)
    }
}

impl From<TextSpec> for Spec {
    fn from(n: TextSpec) -> Spec {
        Spec::Text(n)
    }
}

impl From<&str> for Spec {
    fn from(s: &str) -> Spec {
        Spec::Str(StringPhraseSpec::new(s))
    }
}

impl From<String> for Spec {
    fn from(s: String) -> Spec {
        Spec::Str(StringPhraseSpec::new(s))
    }
}

impl From<AnchorString> for Spec {
    fn from(frag: AnchorString) -> Spec {
        let mut leaf = StringPhraseSpec::new(frag.text);
        leaf.meta.anchor = frag.anchor;
        Spec::Str(leaf)
    }
}
