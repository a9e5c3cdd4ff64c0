/// Document-structure levels — how deeply nested specification nodes are
/// grouped and formatted when the tree is linearised.
use serde::{Deserialize, Serialize};

/// The nesting level of a text-structure node.
///
/// The first seven levels form a total order
/// `Phrase < PhraseSet < Sentence < SentenceSet < Paragraph <
/// ParagraphSet < Document`. The list/header levels sit outside that
/// order: they have their own orthography and are sticky under promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocStructure {
    Phrase,
    PhraseSet,
    Sentence,
    SentenceSet,
    Paragraph,
    ParagraphSet,
    Document,
    ListItem,
    List,
    ListHeader,
    SetHeader,
    ParHeader,
}

impl Default for DocStructure {
    fn default() -> Self {
        Self::Phrase
    }
}

impl DocStructure {
    /// Position in the linear order, or `None` for the structurally
    /// special list/header levels.
    pub fn rank(self) -> Option<u8> {
        match self {
            Self::Phrase => Some(0),
            Self::PhraseSet => Some(1),
            Self::Sentence => Some(2),
            Self::SentenceSet => Some(3),
            Self::Paragraph => Some(4),
            Self::ParagraphSet => Some(5),
            Self::Document => Some(6),
            _ => None,
        }
    }

    /// True for the list/header family, which absorbs promotion requests
    /// without changing level.
    pub fn is_sticky(self) -> bool {
        self.rank().is_none()
    }

    /// Whether this level already dominates `target` in the total order.
    /// Sticky levels dominate everything (promotion is absorbed).
    pub fn dominates(self, target: DocStructure) -> bool {
        match (self.rank(), target.rank()) {
            (Some(a), Some(b)) => a >= b,
            // A sticky node absorbs promotion; promoting *to* a sticky
            // level is only satisfied by that exact level.
            (None, _) => true,
            (Some(_), None) => false,
        }
    }

    /// The next level up in the linear order. Saturates at `Document`;
    /// sticky levels have no successor.
    pub fn successor(self) -> DocStructure {
        match self {
            Self::Phrase => Self::PhraseSet,
            Self::PhraseSet => Self::Sentence,
            Self::Sentence => Self::SentenceSet,
            Self::SentenceSet => Self::Paragraph,
            Self::Paragraph => Self::ParagraphSet,
            Self::ParagraphSet => Self::Document,
            other => other,
        }
    }

    /// The larger of two levels in the linear order. Sticky levels win
    /// against linear ones (they are never demoted).
    pub fn max(self, other: DocStructure) -> DocStructure {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => {
                if a >= b {
                    self
                } else {
                    other
                }
            }
            (None, _) => self,
            (Some(_), None) => other,
        }
    }
}
