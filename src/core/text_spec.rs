//! Generic text-structure nodes: ordered children under a
//! document-structure level, with the promotion state machine that keeps
//! nesting levels consistent.

use serde::{Deserialize, Serialize};

use crate::core::realiser::{
    header_orthography, list_header_orthography, list_words, realise_conjunct_list,
    sentence_orthography, RealiseContext, LIST_ITEM_MARK, PARAGRAPH_BREAK,
};
use crate::core::spec::{Spec, SpecMeta};
use crate::schema::anchor::AnchorString;
use crate::schema::doc_structure::DocStructure;
use crate::schema::features::Conjunction;

/// A tree node grouping ordered children at a document-structure level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub meta: SpecMeta,
    level: DocStructure,
    pub children: Vec<Spec>,
    /// Overrides the conjunction used when children are list-conjoined.
    #[serde(default)]
    pub conjunct: Option<Conjunction>,
}

impl TextSpec {
    pub fn new() -> Self {
        Self::with_level(DocStructure::Phrase, Vec::new())
    }

    pub fn with_level(level: DocStructure, children: Vec<Spec>) -> Self {
        Self {
            meta: SpecMeta::default(),
            level,
            children,
            conjunct: None,
        }
    }

    pub fn push(&mut self, child: impl Into<Spec>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    pub fn level(&self) -> DocStructure {
        self.level
    }

    /// The maximum level achieved by any structural descendant. Sticky
    /// children (lists, headers) are skipped: a list inside a paragraph
    /// does not make the paragraph a list.
    pub fn computed_level(&self) -> DocStructure {
        self.children
            .iter()
            .map(|c| c.structure_level())
            .filter(|level| !level.is_sticky())
            .fold(DocStructure::Phrase, DocStructure::max)
    }

    /// The node's own level, raised to at least the computed level of
    /// its descendants: a paragraph never contains an untagged
    /// document-level child.
    pub fn effective_level(&self) -> DocStructure {
        self.level.max(self.computed_level())
    }

    pub fn head(&self) -> String {
        self.children.first().map(|c| c.head()).unwrap_or_default()
    }

    pub fn realise(&self, ctx: &RealiseContext<'_>) -> Vec<AnchorString> {
        let conjunct = self.conjunct.unwrap_or(Conjunction::And);
        match self.effective_level() {
            DocStructure::Phrase | DocStructure::PhraseSet => {
                let elements: Vec<Vec<AnchorString>> =
                    self.children.iter().map(|c| c.realise(ctx)).collect();
                realise_conjunct_list(elements, conjunct.as_str())
            }
            DocStructure::Sentence => {
                let parts: Vec<Vec<AnchorString>> =
                    self.children.iter().map(|c| c.realise(ctx)).collect();
                sentence_orthography(list_words(parts))
            }
            level @ (DocStructure::SentenceSet
            | DocStructure::Paragraph
            | DocStructure::ParagraphSet
            | DocStructure::Document) => {
                // Supra-sentence nodes never list-conjoin raw phrase
                // fragments: each child is promoted to a sentence first.
                let parts: Vec<Vec<AnchorString>> = self
                    .children
                    .iter()
                    .map(|c| c.clone().promote(DocStructure::Sentence).realise(ctx))
                    .collect();
                let mut frags = list_words(parts);
                if matches!(level, DocStructure::SentenceSet | DocStructure::Paragraph) {
                    frags.push(AnchorString::literal(PARAGRAPH_BREAK));
                }
                frags
            }
            DocStructure::ListItem => {
                let parts: Vec<Vec<AnchorString>> =
                    self.children.iter().map(|c| c.realise(ctx)).collect();
                let mut frags = vec![AnchorString::literal(LIST_ITEM_MARK)];
                frags.extend(sentence_orthography(list_words(parts)));
                frags
            }
            DocStructure::List => {
                let mut frags = Vec::new();
                for child in &self.children {
                    if child.structure_level() == DocStructure::ListItem {
                        frags.extend(child.realise(ctx));
                    } else {
                        let promoted = child.clone().promote(DocStructure::Sentence);
                        frags.push(AnchorString::literal(LIST_ITEM_MARK));
                        frags.extend(promoted.realise(ctx));
                    }
                }
                frags.push(AnchorString::literal(PARAGRAPH_BREAK));
                frags
            }
            DocStructure::ListHeader => {
                let parts: Vec<Vec<AnchorString>> =
                    self.children.iter().map(|c| c.realise(ctx)).collect();
                list_header_orthography(list_words(parts))
            }
            DocStructure::SetHeader | DocStructure::ParHeader => {
                let parts: Vec<Vec<AnchorString>> =
                    self.children.iter().map(|c| c.realise(ctx)).collect();
                header_orthography(list_words(parts))
            }
        }
    }
}

impl Default for TextSpec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::Lexicon;
    use crate::schema::anchor::joined_text;

    fn realise(spec: &TextSpec) -> String {
        let lexicon = Lexicon::new();
        let ctx = RealiseContext { lexicon: &lexicon };
        joined_text(&spec.realise(&ctx))
    }

    #[test]
    fn phrase_set_conjoins_children() {
        let mut ts = TextSpec::with_level(DocStructure::PhraseSet, Vec::new());
        ts.push("apples");
        ts.push("oranges");
        ts.push("pears");
        assert_eq!(realise(&ts), "apples, oranges, and pears");
    }

    #[test]
    fn conjunct_override() {
        let mut ts = TextSpec::with_level(DocStructure::PhraseSet, Vec::new());
        ts.push("tea");
        ts.push("coffee");
        ts.conjunct = Some(Conjunction::Or);
        assert_eq!(realise(&ts), "tea or coffee");
    }

    #[test]
    fn sentence_level_applies_orthography() {
        let mut ts = TextSpec::with_level(DocStructure::Sentence, Vec::new());
        ts.push("the paper");
        ts.push("arrived");
        assert_eq!(realise(&ts), "The paper arrived.");
    }

    #[test]
    fn paragraph_promotes_children_to_sentences() {
        let ts = TextSpec::with_level(
            DocStructure::Paragraph,
            vec![Spec::from("the paper arrived"), Spec::from("we read it")],
        );
        assert_eq!(
            realise(&ts),
            format!("The paper arrived. We read it.{}", PARAGRAPH_BREAK)
        );
    }

    #[test]
    fn effective_level_raised_by_descendants() {
        let inner = TextSpec::with_level(DocStructure::Paragraph, vec![Spec::from("deep")]);
        let outer = TextSpec::with_level(DocStructure::Sentence, vec![Spec::Text(inner)]);
        assert_eq!(outer.level(), DocStructure::Sentence);
        assert_eq!(outer.effective_level(), DocStructure::Paragraph);
    }

    #[test]
    fn list_header_ends_in_colon() {
        let ts = TextSpec::with_level(DocStructure::ListHeader, vec![Spec::from("contents")]);
        assert_eq!(realise(&ts), "Contents:");
    }

    #[test]
    fn list_marks_items() {
        let item = TextSpec::with_level(DocStructure::ListItem, vec![Spec::from("first point")]);
        let ts = TextSpec::with_level(
            DocStructure::List,
            vec![Spec::Text(item), Spec::from("second point")],
        );
        let out = realise(&ts);
        assert!(out.contains(&format!("{}First point.", LIST_ITEM_MARK)));
        assert!(out.contains(&format!("{}Second point.", LIST_ITEM_MARK)));
        assert!(out.ends_with(PARAGRAPH_BREAK));
    }

    #[test]
    fn promote_returns_max_of_requested_and_computed() {
        let ts = TextSpec::with_level(DocStructure::Sentence, vec![Spec::from("x")]);
        let promoted = Spec::Text(ts).promote(DocStructure::Paragraph);
        assert_eq!(promoted.structure_level(), DocStructure::Paragraph);
    }

    #[test]
    fn promoted_content_unchanged_when_already_dominant() {
        let lexicon = Lexicon::new();
        let ctx = RealiseContext { lexicon: &lexicon };
        let ts = Spec::Text(TextSpec::with_level(
            DocStructure::Paragraph,
            vec![Spec::from("the paper arrived")],
        ));
        let before = joined_text(&ts.realise(&ctx));
        let promoted = ts.promote(DocStructure::Sentence);
        let after = joined_text(&promoted.realise(&ctx));
        assert_eq!(before, after);
    }
}
