//! Noun-side phrase specifications: string leaves, noun phrases,
//! coordinated noun phrases, and prepositional phrases.

use serde::{Deserialize, Serialize};

use crate::core::realiser::{list_words, realise_conjunct_list, RealiseContext};
use crate::core::spec::{Spec, SpecMeta};
use crate::schema::anchor::AnchorString;
use crate::schema::features::{Case, Conjunction, Determiner, GrammaticalNumber, Pronoun};

/// A raw word or phrase leaf, with the agreement flags needed to bend it
/// into the surrounding context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringPhraseSpec {
    pub meta: SpecMeta,
    pub text: String,
    #[serde(default)]
    pub plural: bool,
    #[serde(default)]
    pub quoted: bool,
    #[serde(default)]
    pub case: Case,
    /// Realise a numeric string as a rank ordinal ("2" → "2nd").
    #[serde(default)]
    pub rank_ordinal: bool,
}

impl StringPhraseSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            meta: SpecMeta::default(),
            text: text.into(),
            plural: false,
            quoted: false,
            case: Case::Subject,
            rank_ordinal: false,
        }
    }

    pub fn head(&self) -> String {
        self.text.clone()
    }

    pub fn realise(&self, ctx: &RealiseContext<'_>) -> Vec<AnchorString> {
        // Pronouns bend through the closed case tables instead of the
        // morphology engine.
        if let Some(pronoun) = Pronoun::from_word(&self.text) {
            return vec![AnchorString::literal(pronoun.case_form(self.case))];
        }

        let mut word = if self.plural {
            ctx.lexicon.plural(&self.text)
        } else {
            self.text.clone()
        };
        if self.case == Case::Genitive {
            word = genitive_of(&word);
        }
        if self.rank_ordinal {
            if let Ok(n) = word.parse::<u64>() {
                word = format!("{}{}", n, ordinal_suffix(n));
            }
        }
        if self.quoted {
            word = format!("\"{}\"", word);
        }
        vec![AnchorString::literal(word)]
    }
}

/// Genitive marker: "paper" → "paper's", "papers" → "papers'".
pub(crate) fn genitive_of(word: &str) -> String {
    if word.ends_with('s') || word.ends_with('S') {
        format!("{}'", word)
    } else {
        format!("{}'s", word)
    }
}

fn ordinal_suffix(n: u64) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// A noun phrase: determiner + head modifiers + noun + end modifiers,
/// with case/number/genitive agreement and an optional pronoun form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpPhraseSpec {
    pub meta: SpecMeta,
    #[serde(default)]
    pub determiner: Determiner,
    #[serde(default)]
    pub head_modifiers: Vec<Spec>,
    pub noun: String,
    #[serde(default)]
    pub end_modifiers: Vec<Spec>,
    #[serde(default)]
    pub case: Case,
    #[serde(default)]
    pub number: GrammaticalNumber,
    /// When set, the whole NP realises as this pronoun instead. The
    /// anchor is preserved across the substitution: the fragment still
    /// denotes the same domain object.
    #[serde(default)]
    pub pronoun: Option<Pronoun>,
}

impl NpPhraseSpec {
    pub fn new(noun: impl Into<String>) -> Self {
        Self {
            meta: SpecMeta::default(),
            determiner: Determiner::None,
            head_modifiers: Vec::new(),
            noun: noun.into(),
            end_modifiers: Vec::new(),
            case: Case::Subject,
            number: GrammaticalNumber::Singular,
            pronoun: None,
        }
    }

    pub fn with_determiner(mut self, determiner: Determiner) -> Self {
        self.determiner = determiner;
        self
    }

    pub fn with_case(mut self, case: Case) -> Self {
        self.case = case;
        self
    }

    pub fn plural(mut self) -> Self {
        self.number = GrammaticalNumber::Plural;
        self
    }

    pub fn add_head_modifier(mut self, modifier: impl Into<Spec>) -> Self {
        self.head_modifiers.push(modifier.into());
        self
    }

    pub fn add_end_modifier(mut self, modifier: impl Into<Spec>) -> Self {
        self.end_modifiers.push(modifier.into());
        self
    }

    /// Substitute the whole NP by a pronoun at realisation time.
    pub fn as_pronoun(mut self, pronoun: Pronoun) -> Self {
        self.pronoun = Some(pronoun);
        self
    }

    pub fn head(&self) -> String {
        self.noun.clone()
    }

    pub fn is_plural(&self) -> bool {
        self.number == GrammaticalNumber::Plural
    }

    pub fn realise(&self, ctx: &RealiseContext<'_>) -> Vec<AnchorString> {
        if let Some(pronoun) = self.pronoun {
            // Anchor preservation is handled by the caller's collapse
            return vec![AnchorString::literal(pronoun.case_form(self.case))];
        }

        let head = if self.is_plural() {
            ctx.lexicon.plural(&self.noun)
        } else {
            self.noun.clone()
        };

        let mut parts: Vec<Vec<AnchorString>> = Vec::new();
        for modifier in &self.head_modifiers {
            parts.push(modifier.realise(ctx));
        }
        parts.push(vec![AnchorString::literal(head)]);
        for modifier in &self.end_modifiers {
            parts.push(modifier.realise(ctx));
        }
        let core = list_words(parts);

        let determiner = self.realise_determiner(&core);
        let mut frags = if determiner.is_empty() {
            core
        } else {
            list_words(vec![vec![AnchorString::literal(determiner)], core])
        };

        if self.case == Case::Genitive {
            if let Some(last) = frags.last_mut() {
                *last = last.clone().map_text(|t| genitive_of(&t));
            }
        }
        frags
    }

    /// The determiner's surface form. The indefinite article is resolved
    /// from the first letter of the realised head-with-modifiers and
    /// suppressed entirely when plural.
    fn realise_determiner(&self, core: &[AnchorString]) -> String {
        match self.determiner.fixed_form() {
            Some(form) => form.to_string(),
            None => {
                if self.is_plural() {
                    return String::new();
                }
                let first_word = core
                    .first()
                    .map(|f| f.text.to_lowercase())
                    .unwrap_or_default();
                if takes_an(&first_word) {
                    "an".to_string()
                } else {
                    "a".to_string()
                }
            }
        }
    }
}

/// Whether a word takes "an" rather than "a". Letter-based with the
/// usual exception lists (silent h; vowel letters pronounced as glides).
fn takes_an(word: &str) -> bool {
    const AN_EXCEPTIONS: [&str; 5] = ["hour", "honest", "honor", "honour", "heir"];
    const A_EXCEPTIONS: [&str; 6] = ["uni", "use", "usu", "eu", "one", "once"];
    if AN_EXCEPTIONS.iter().any(|p| word.starts_with(p)) {
        return true;
    }
    if A_EXCEPTIONS.iter().any(|p| word.starts_with(p)) {
        return false;
    }
    word.starts_with(['a', 'e', 'i', 'o', 'u'])
}

/// N coordinated noun phrases. Each conjunct keeps its own anchor on its
/// own sub-fragment: every conjunct maps to a different domain object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateNpPhraseSpec {
    pub meta: SpecMeta,
    pub conjuncts: Vec<Spec>,
    #[serde(default)]
    pub conjunction: Conjunction,
    #[serde(default)]
    pub case: Case,
}

impl CoordinateNpPhraseSpec {
    pub fn new(conjuncts: Vec<Spec>, conjunction: Conjunction) -> Self {
        Self {
            meta: SpecMeta::default(),
            conjuncts,
            conjunction,
            case: Case::Subject,
        }
    }

    pub fn head(&self) -> String {
        self.conjuncts
            .first()
            .map(|c| c.head())
            .unwrap_or_default()
    }

    /// A coordination of two or more NPs agrees as a plural.
    pub fn is_plural(&self) -> bool {
        self.conjuncts.len() > 1
    }

    pub fn realise(&self, ctx: &RealiseContext<'_>) -> Vec<AnchorString> {
        let elements: Vec<Vec<AnchorString>> = self
            .conjuncts
            .iter()
            .map(|c| propagate_case(c, self.case).realise(ctx))
            .collect();
        realise_conjunct_list(elements, self.conjunction.as_str())
    }
}

/// Clone a child with the coordination's case pushed down, where the
/// child kind has a case at all.
pub(crate) fn propagate_case(spec: &Spec, case: Case) -> Spec {
    let mut child = spec.clone();
    match &mut child {
        Spec::Np(np) => np.case = case,
        Spec::Str(s) => s.case = case,
        Spec::CoordNp(coord) => coord.case = case,
        _ => {}
    }
    child
}

/// A prepositional phrase: preposition + object list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpPhraseSpec {
    pub meta: SpecMeta,
    pub preposition: String,
    pub objects: Vec<Spec>,
}

impl PpPhraseSpec {
    pub fn new(preposition: impl Into<String>, objects: Vec<Spec>) -> Self {
        Self {
            meta: SpecMeta::default(),
            preposition: preposition.into(),
            objects,
        }
    }

    pub fn head(&self) -> String {
        self.preposition.clone()
    }

    pub fn realise(&self, ctx: &RealiseContext<'_>) -> Vec<AnchorString> {
        let elements: Vec<Vec<AnchorString>> = self
            .objects
            .iter()
            .map(|o| propagate_case(o, Case::Object).realise(ctx))
            .collect();
        let objects = realise_conjunct_list(elements, Conjunction::And.as_str());
        list_words(vec![
            vec![AnchorString::literal(self.preposition.clone())],
            objects,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::Lexicon;
    use crate::schema::anchor::{joined_text, Anchor, AnchorId};

    fn realise(spec: &Spec) -> String {
        let lexicon = Lexicon::new();
        let ctx = RealiseContext { lexicon: &lexicon };
        joined_text(&spec.realise(&ctx))
    }

    #[test]
    fn string_leaf_plain() {
        assert_eq!(realise(&Spec::from("paper")), "paper");
    }

    #[test]
    fn string_leaf_plural_and_genitive() {
        let mut leaf = StringPhraseSpec::new("paper");
        leaf.plural = true;
        assert_eq!(realise(&Spec::Str(leaf.clone())), "papers");
        leaf.case = Case::Genitive;
        assert_eq!(realise(&Spec::Str(leaf)), "papers'");
    }

    #[test]
    fn string_leaf_quoted_and_ordinal() {
        let mut leaf = StringPhraseSpec::new("2");
        leaf.rank_ordinal = true;
        assert_eq!(realise(&Spec::Str(leaf.clone())), "2nd");
        leaf.quoted = true;
        assert_eq!(realise(&Spec::Str(leaf)), "\"2nd\"");
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(21), "st");
    }

    #[test]
    fn string_leaf_pronoun_case() {
        let mut leaf = StringPhraseSpec::new("she");
        leaf.case = Case::Object;
        assert_eq!(realise(&Spec::Str(leaf)), "her");
    }

    #[test]
    fn np_with_determiner_and_modifiers() {
        let np = NpPhraseSpec::new("paper")
            .with_determiner(Determiner::The)
            .add_head_modifier("recent")
            .add_end_modifier("on morphology");
        assert_eq!(realise(&Spec::Np(np)), "the recent paper on morphology");
    }

    #[test]
    fn np_indefinite_article_resolution() {
        let np = NpPhraseSpec::new("paper").with_determiner(Determiner::A);
        assert_eq!(realise(&Spec::Np(np)), "a paper");

        let np = NpPhraseSpec::new("article").with_determiner(Determiner::A);
        assert_eq!(realise(&Spec::Np(np)), "an article");

        // The article inspects the first modifier, not the noun
        let np = NpPhraseSpec::new("paper")
            .with_determiner(Determiner::A)
            .add_head_modifier("old");
        assert_eq!(realise(&Spec::Np(np)), "an old paper");

        let np = NpPhraseSpec::new("honour").with_determiner(Determiner::A);
        assert_eq!(realise(&Spec::Np(np)), "an honour");

        let np = NpPhraseSpec::new("university").with_determiner(Determiner::A);
        assert_eq!(realise(&Spec::Np(np)), "a university");
    }

    #[test]
    fn np_plural_suppresses_indefinite_article() {
        let np = NpPhraseSpec::new("paper")
            .with_determiner(Determiner::A)
            .plural();
        assert_eq!(realise(&Spec::Np(np)), "papers");
    }

    #[test]
    fn np_genitive() {
        let np = NpPhraseSpec::new("paper")
            .with_determiner(Determiner::The)
            .with_case(Case::Genitive);
        assert_eq!(realise(&Spec::Np(np)), "the paper's");
    }

    #[test]
    fn np_pronoun_substitution_keeps_anchor() {
        let anchor = Anchor::new(AnchorId(9));
        let np = NpPhraseSpec::new("paper")
            .with_determiner(Determiner::The)
            .as_pronoun(Pronoun::It);
        let spec = Spec::Np(np).with_anchor(anchor.clone());
        let lexicon = Lexicon::new();
        let ctx = RealiseContext { lexicon: &lexicon };
        let frags = spec.realise(&ctx);
        assert_eq!(joined_text(&frags), "it");
        assert_eq!(frags[0].anchor, Some(anchor));
    }

    #[test]
    fn np_anchor_survives_pluralization() {
        let anchor = Anchor::new(AnchorId(4));
        let np = NpPhraseSpec::new("paper")
            .with_determiner(Determiner::The)
            .plural();
        let spec = Spec::Np(np).with_anchor(anchor.clone());
        let lexicon = Lexicon::new();
        let ctx = RealiseContext { lexicon: &lexicon };
        let frags = spec.realise(&ctx);
        assert_eq!(joined_text(&frags), "the papers");
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].anchor, Some(anchor));
    }

    #[test]
    fn coordinate_np_keeps_child_anchors() {
        let a1 = Anchor::new(AnchorId(1));
        let a2 = Anchor::new(AnchorId(2));
        let coord = CoordinateNpPhraseSpec::new(
            vec![
                Spec::Np(NpPhraseSpec::new("paper")).with_anchor(a1.clone()),
                Spec::Np(NpPhraseSpec::new("report")).with_anchor(a2.clone()),
            ],
            Conjunction::And,
        );
        let lexicon = Lexicon::new();
        let ctx = RealiseContext { lexicon: &lexicon };
        let frags = Spec::CoordNp(coord).realise(&ctx);
        assert_eq!(joined_text(&frags), "paper and report");
        let anchors: Vec<_> = frags.iter().filter_map(|f| f.anchor.clone()).collect();
        assert_eq!(anchors, vec![a1, a2]);
    }

    #[test]
    fn coordinate_np_is_plural() {
        let coord = CoordinateNpPhraseSpec::new(
            vec![Spec::from("a"), Spec::from("b")],
            Conjunction::And,
        );
        assert!(coord.is_plural());
    }

    #[test]
    fn pp_realises_preposition_and_objects() {
        let pp = PpPhraseSpec::new("by", vec![Spec::from("John")]);
        assert_eq!(realise(&Spec::Pp(pp)), "by John");
    }

    #[test]
    fn pp_object_case_propagates_to_pronouns() {
        let pp = PpPhraseSpec::new("by", vec![Spec::from("she")]);
        assert_eq!(realise(&Spec::Pp(pp)), "by her");
    }
}
